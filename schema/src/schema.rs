use serde::{Deserialize, Serialize};

/// A whole schema corpus, as handed over by the loader.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SchemaModel {
    pub files: Vec<FileModel>,
}

impl SchemaModel {
    pub fn from_json(text: &str) -> Result<SchemaModel, serde_json::Error> {
        serde_json::from_str(text)
    }
}

/// Schema language revision of a file. Decides whether optional fields carry
/// an explicit presence flag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Syntax {
    #[default]
    Proto2,
    Proto3,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOptions {
    /// Replaces the file's package when synthesizing C identifiers.
    pub c_package: Option<String>,
    pub use_oneof_field_name: bool,
    pub optimize_for_code_size: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FileModel {
    /// Path of the source file relative to the import root, e.g. `foo/bar.proto`.
    pub name: String,
    #[serde(default)]
    pub package: String,
    #[serde(default)]
    pub syntax: Syntax,
    #[serde(default)]
    pub options: FileOptions,
    #[serde(default)]
    pub messages: Vec<MessageModel>,
}

impl FileModel {
    /// Optional fields track presence with a `has_` flag only in proto2 files.
    pub fn uses_presence_flags(&self) -> bool {
        self.syntax == Syntax::Proto2
    }

    /// The package override, when one is configured and non-empty.
    pub fn package_override(&self) -> Option<&str> {
        self.options.c_package.as_deref().filter(|p| !p.is_empty())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MessageModel {
    pub name:      String,
    pub full_name: String,
    #[serde(default)]
    pub comment:   Option<String>,
    #[serde(default)]
    pub fields:    Vec<SchemaField>,
    #[serde(default)]
    pub nested:    Vec<MessageModel>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cardinality {
    Required,
    Optional,
    Repeated,
}

impl Cardinality {
    pub fn label_name(self) -> &'static str {
        match self {
            Cardinality::Required => "required",
            Cardinality::Optional => "optional",
            Cardinality::Repeated => "repeated",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScalarType {
    Int32,
    Sint32,
    Sfixed32,
    Int64,
    Sint64,
    Sfixed64,
    Uint32,
    Fixed32,
    Uint64,
    Fixed64,
    Bool,
    Float,
    Double,
}

impl ScalarType {
    /// Name of the scalar in the schema language, for diagnostics.
    pub fn schema_name(self) -> &'static str {
        match self {
            ScalarType::Int32    => "int32",
            ScalarType::Sint32   => "sint32",
            ScalarType::Sfixed32 => "sfixed32",
            ScalarType::Int64    => "int64",
            ScalarType::Sint64   => "sint64",
            ScalarType::Sfixed64 => "sfixed64",
            ScalarType::Uint32   => "uint32",
            ScalarType::Fixed32  => "fixed32",
            ScalarType::Uint64   => "uint64",
            ScalarType::Fixed64  => "fixed64",
            ScalarType::Bool     => "bool",
            ScalarType::Float    => "float",
            ScalarType::Double   => "double",
        }
    }
}

/// Default value of a scalar field. Which variant fits which scalar type is
/// checked by the code generator's verifier, not here.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScalarDefault {
    Int(i64),
    Uint(u64),
    Bool(bool),
    Float(f64),
}

/// The closed set of field kinds. Each variant carries its own default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FieldKind {
    Bytes {
        #[serde(default)]
        default: Option<Vec<u8>>,
    },
    String {
        #[serde(default)]
        default: Option<String>,
    },
    Scalar {
        scalar: ScalarType,
        #[serde(default)]
        default: Option<ScalarDefault>,
    },
    Enum {
        type_name: String,
        #[serde(default)]
        default: Option<String>,
    },
    Message {
        type_name: String,
    },
}

impl FieldKind {
    pub fn has_default(&self) -> bool {
        match self {
            FieldKind::Bytes { default }      => default.is_some(),
            FieldKind::String { default }     => default.is_some(),
            FieldKind::Scalar { default, .. } => default.is_some(),
            FieldKind::Enum { default, .. }   => default.is_some(),
            FieldKind::Message { .. }         => false,
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            FieldKind::Bytes { .. }            => "bytes",
            FieldKind::String { .. }           => "string",
            FieldKind::Scalar { scalar, .. }   => scalar.schema_name(),
            FieldKind::Enum { .. }             => "enum",
            FieldKind::Message { .. }          => "message",
        }
    }
}

/// One field of a message. Immutable once loaded; generators borrow it
/// together with the `FileModel` that declares it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaField {
    pub name:        String,
    pub full_name:   String,
    pub number:      i32,
    #[serde(flatten)]
    pub kind:        FieldKind,
    pub cardinality: Cardinality,
    #[serde(default)]
    pub oneof:       Option<String>,
    #[serde(default)]
    pub deprecated:  bool,
    #[serde(default)]
    pub packed:      Option<bool>,
}

impl SchemaField {
    pub fn has_explicit_default(&self) -> bool {
        self.kind.has_default()
    }

    pub fn in_oneof(&self) -> bool {
        self.oneof.is_some()
    }

    /// Full name of the message this field belongs to.
    pub fn scope_name(&self) -> &str {
        match self.full_name.rfind('.') {
            Some(pos) => &self.full_name[..pos],
            None => "",
        }
    }
}
