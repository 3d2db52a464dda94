//! Per-field code generation.
//!
//! Every field kind supports the same five emission steps, called by the
//! message generator in this order: struct members, default value
//! declarations, default value implementations, static initializer, and
//! descriptor initializer. Kinds differ only in the C types and literals they
//! print.

pub mod bytes;
pub mod primitive;
pub mod string;

use protoc_c_schema::{Cardinality, FieldKind, FileModel, SchemaField, Syntax};
use serde::{Deserialize, Serialize};

use crate::{
    error::CodegenError,
    escape::EscapeStyle,
    names::{field_deprecated, field_name, full_name_to_c, full_name_to_lower},
    printer::{Printer, Variables},
    utils::{camel_to_lower, to_upper},
};

pub use bytes::BytesFieldGenerator;
pub use primitive::PrimitiveFieldGenerator;
pub use string::StringFieldGenerator;

/// Knobs that are not part of the schema itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorOptions {
    pub escape_style:  EscapeStyle,
    /// Copy message comments into the generated header.
    pub emit_comments: bool,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        GeneratorOptions { escape_style: EscapeStyle::Hex, emit_comments: true }
    }
}

pub trait FieldGenerator {
    fn field(&self) -> &SchemaField;

    /// Members of the field inside the message struct.
    fn generate_struct_members(&self, printer: &mut Printer) -> Result<(), CodegenError>;

    /// `extern` declarations of default value storage, for the header.
    fn generate_default_value_declarations(&self, printer: &mut Printer) -> Result<(), CodegenError>;

    /// Definitions of default value storage, for the source file.
    fn generate_default_value_implementations(&self, printer: &mut Printer) -> Result<(), CodegenError>;

    /// Initializer of the struct members in a constant context.
    fn generate_static_init(&self, printer: &mut Printer) -> Result<(), CodegenError>;

    /// This field's entry in the message's `ProtobufCFieldDescriptor` table.
    fn generate_descriptor_initializer(&self, printer: &mut Printer) -> Result<(), CodegenError>;

    /// C expression for the field's default value.
    fn default_value(&self) -> String;
}

/// Picks the generator for `field`'s kind.
pub fn make_field_generator<'a>(
    file: &'a FileModel,
    field: &'a SchemaField,
    options: &GeneratorOptions,
) -> Result<Box<dyn FieldGenerator + 'a>, CodegenError> {
    let context = FieldContext::new(file, field, options);
    match &field.kind {
        FieldKind::Bytes { .. } => Ok(Box::new(BytesFieldGenerator::new(context))),
        FieldKind::String { .. } => Ok(Box::new(StringFieldGenerator::new(context))),
        FieldKind::Scalar { scalar, .. } => Ok(Box::new(PrimitiveFieldGenerator::new(context, *scalar))),
        FieldKind::Enum { .. } | FieldKind::Message { .. } => Err(CodegenError::UnsupportedKind {
            field: field.full_name.clone(),
            kind:  field.kind.kind_name(),
        }),
    }
}

/// State shared by every field kind: the field, its declaring file, and the
/// identifiers synthesized for it.
#[derive(Debug, Clone)]
pub struct FieldContext<'a> {
    pub file:         &'a FileModel,
    pub field:        &'a SchemaField,
    pub escape_style: EscapeStyle,
    /// Member name inside the struct.
    pub name:         String,
    /// Flattened lowercase full name, the prefix of default value symbols.
    pub lower_name:   String,
    /// Struct type name of the containing message.
    pub classname:    String,
    pub deprecated:   &'static str,
}

impl<'a> FieldContext<'a> {
    pub fn new(file: &'a FileModel, field: &'a SchemaField, options: &GeneratorOptions) -> Self {
        FieldContext {
            file,
            field,
            escape_style: options.escape_style,
            name:         field_name(field),
            lower_name:   full_name_to_lower(&field.full_name, file),
            classname:    full_name_to_c(field.scope_name(), file),
            deprecated:   field_deprecated(field),
        }
    }

    /// `name` and `deprecated`, the variables every member template uses.
    pub fn variables(&self) -> Variables {
        let mut vars = Variables::new();
        vars.insert("name".to_string(), self.name.clone());
        vars.insert("deprecated".to_string(), self.deprecated.to_string());
        vars
    }

    /// Optional fields outside a oneof get a `has_` flag in proto2 files.
    pub fn has_presence_flag(&self) -> bool {
        self.field.cardinality == Cardinality::Optional
            && !self.field.in_oneof()
            && self.file.uses_presence_flags()
    }

    fn label(&self) -> &'static str {
        let field = self.field;
        if field.cardinality == Cardinality::Optional
            && field.oneof.is_none()
            && self.file.syntax == Syntax::Proto3
        {
            "none"
        } else {
            field.cardinality.label_name()
        }
    }

    /// Prints the `ProtobufCFieldDescriptor` record for the field.
    ///
    /// `optional_uses_has` says whether an optional member of this kind has a
    /// `has_` flag to point the quantifier offset at.
    pub fn generate_descriptor_initializer_generic(
        &self,
        printer: &mut Printer,
        optional_uses_has: bool,
        type_macro: &str,
        default_value: &str,
        packable: bool,
    ) -> Result<(), CodegenError> {
        let field = self.field;
        let options = &self.file.options;

        let mut vars = Variables::new();
        vars.insert("TYPE".to_string(), type_macro.to_string());
        vars.insert("LABEL".to_string(), to_upper(self.label()));
        vars.insert("classname".to_string(), self.classname.clone());
        vars.insert("name".to_string(), self.name.clone());
        vars.insert("value".to_string(), field.number.to_string());
        vars.insert("default_value".to_string(), default_value.to_string());

        let proto_name = match (&field.oneof, options.use_oneof_field_name) {
            (Some(oneof), true) => oneof.clone(),
            _ => field.name.clone(),
        };
        vars.insert("proto_name".to_string(), proto_name);
        if let Some(oneof) = &field.oneof {
            vars.insert("oneofname".to_string(), camel_to_lower(oneof));
        }

        let mut flags = String::from("0");
        if field.cardinality == Cardinality::Repeated && packable {
            let packed = match field.packed {
                Some(packed) => packed,
                None => self.file.syntax == Syntax::Proto3,
            };
            if packed {
                flags.push_str(" | PROTOBUF_C_FIELD_FLAG_PACKED");
            }
        }
        if field.deprecated {
            flags.push_str(" | PROTOBUF_C_FIELD_FLAG_DEPRECATED");
        }
        if field.in_oneof() {
            flags.push_str(" | PROTOBUF_C_FIELD_FLAG_ONEOF");
        }
        vars.insert("flags".to_string(), flags);

        printer.print_raw("{\n");
        if options.optimize_for_code_size {
            printer.print(&vars, "  0,    /* CODE_SIZE */\n")?;
        } else {
            printer.print(&vars, "  \"$proto_name$\",\n")?;
        }
        printer.print(
            &vars,
            "  $value$,\n  PROTOBUF_C_LABEL_$LABEL$,\n  PROTOBUF_C_TYPE_$TYPE$,\n",
        )?;
        match field.cardinality {
            Cardinality::Required => {
                printer.print(&vars, "  0,   /* quantifier_offset */\n")?;
            }
            Cardinality::Optional => {
                if field.in_oneof() {
                    printer.print(&vars, "  offsetof($classname$, $oneofname$_case),\n")?;
                } else if optional_uses_has && self.has_presence_flag() {
                    printer.print(&vars, "  offsetof($classname$, has_$name$),\n")?;
                } else {
                    printer.print(&vars, "  0,   /* quantifier_offset */\n")?;
                }
            }
            Cardinality::Repeated => {
                printer.print(&vars, "  offsetof($classname$, n_$name$),\n")?;
            }
        }
        printer.print(&vars, "  offsetof($classname$, $name$),\n")?;
        printer.print(&vars, "  NULL,\n")?;
        printer.print(&vars, "  $default_value$,\n")?;
        printer.print(&vars, "  $flags$,             /* flags */\n")?;
        printer.print(&vars, "  0,NULL,NULL    /* reserved1,reserved2, etc */\n")?;
        printer.print_raw("},\n");
        Ok(())
    }
}
