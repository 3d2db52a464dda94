//! The schema model read by the protoc-c code generator.
//!
//! The model is produced by an external loader (normally from a protoc
//! `FileDescriptorSet`) and is read-only from the generator's point of view.
//! It can be round-tripped through JSON:
//!
//! ```
//! use protoc_c_schema::*;
//!
//! let model = SchemaModel::from_json(r#"{
//!     "files": [{
//!         "name": "foo.proto",
//!         "package": "foo",
//!         "messages": [{
//!             "name": "Blob",
//!             "full_name": "foo.Blob",
//!             "fields": [{
//!                 "name": "data",
//!                 "full_name": "foo.Blob.data",
//!                 "number": 1,
//!                 "kind": "bytes",
//!                 "default": [97, 98],
//!                 "cardinality": "required"
//!             }]
//!         }]
//!     }]
//! }"#).unwrap();
//!
//! let field = &model.files[0].messages[0].fields[0];
//! assert!(field.has_explicit_default());
//! assert_eq!(field.scope_name(), "foo.Blob");
//! ```

pub mod schema;

pub use schema::*;

/// Largest field number the wire format can carry.
pub const MAX_FIELD_NUMBER: i32 = (1 << 29) - 1;
