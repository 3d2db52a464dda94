//! protoc-c-codegen
//!
//! This crate implements:
//!  1) Text and identifier helpers (`utils`, `names`),
//!  2) Escaping of arbitrary bytes into C string literals (`escape`),
//!  3) The `$variable$` template printer (`printer`),
//!  4) Per-field code generators behind the `FieldGenerator` trait (`field`),
//!  5) Run-length field number tables (`ranges`),
//!  6) Message and file level generation (`message`, `file`),
//!  7) A schema model verifier and the `CodegenError` type.

pub mod error;
pub mod utils;
pub mod names;
pub mod escape;
pub mod printer;
pub mod ranges;
pub mod field;
pub mod verifier;
pub mod message;
pub mod file;

pub use error::CodegenError;
pub use escape::{escape_bytes, EscapeStyle};
pub use field::{make_field_generator, FieldGenerator, GeneratorOptions};
pub use file::{generate_file, GeneratedFile};
pub use ranges::{compress_ranges, IntRange, RangeTable};
pub use verifier::verify_file;
