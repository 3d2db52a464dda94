use protoc_c_schema::{Cardinality, FieldKind, SchemaField};
use tracing::trace;

use super::{FieldContext, FieldGenerator};
use crate::{
    error::CodegenError,
    escape::escape_bytes_with,
    printer::Printer,
};

/// Generator for `bytes` fields, stored as `ProtobufCBinaryData`.
pub struct BytesFieldGenerator<'a> {
    context: FieldContext<'a>,
}

impl<'a> BytesFieldGenerator<'a> {
    pub fn new(context: FieldContext<'a>) -> Self {
        trace!(field = %context.field.full_name, "bytes field generator");
        BytesFieldGenerator { context }
    }

    fn default_bytes(&self) -> Option<&'a [u8]> {
        let field: &'a SchemaField = self.context.field;
        match &field.kind {
            FieldKind::Bytes { default } => default.as_deref(),
            _ => None,
        }
    }

    /// Name of the array holding the default bytes.
    pub fn default_value_data_name(&self) -> String {
        format!("{}__default_value_data", self.context.lower_name)
    }
}

impl FieldGenerator for BytesFieldGenerator<'_> {
    fn field(&self) -> &SchemaField {
        self.context.field
    }

    fn generate_struct_members(&self, printer: &mut Printer) -> Result<(), CodegenError> {
        let vars = self.context.variables();
        match self.context.field.cardinality {
            Cardinality::Required => {
                printer.print(&vars, "ProtobufCBinaryData $name$$deprecated$;\n")?;
            }
            Cardinality::Optional => {
                if self.context.has_presence_flag() {
                    printer.print(&vars, "protobuf_c_boolean has_$name$$deprecated$;\n")?;
                }
                printer.print(&vars, "ProtobufCBinaryData $name$$deprecated$;\n")?;
            }
            Cardinality::Repeated => {
                printer.print(&vars, "size_t n_$name$$deprecated$;\n")?;
                printer.print(&vars, "ProtobufCBinaryData *$name$$deprecated$;\n")?;
            }
        }
        Ok(())
    }

    fn generate_default_value_declarations(&self, printer: &mut Printer) -> Result<(), CodegenError> {
        if self.default_bytes().is_none() {
            return Ok(());
        }
        printer.print_one(
            "extern uint8_t $default_value_data$[];\n",
            "default_value_data",
            &self.default_value_data_name(),
        )
    }

    fn generate_default_value_implementations(&self, printer: &mut Printer) -> Result<(), CodegenError> {
        let Some(default) = self.default_bytes() else {
            return Ok(());
        };
        let mut vars = self.context.variables();
        vars.insert("default_value_data".to_string(), self.default_value_data_name());
        vars.insert("escaped".to_string(), escape_bytes_with(default, self.context.escape_style));
        printer.print(&vars, "uint8_t $default_value_data$[] = \"$escaped$\";\n")
    }

    fn generate_static_init(&self, printer: &mut Printer) -> Result<(), CodegenError> {
        let mut vars = self.context.variables();
        vars.insert("default_value".to_string(), self.default_value());
        match self.context.field.cardinality {
            Cardinality::Required => printer.print(&vars, "$default_value$"),
            Cardinality::Optional => {
                if self.context.has_presence_flag() {
                    printer.print(&vars, "0, ")?;
                }
                printer.print(&vars, "$default_value$")
            }
            // Repeated fields start out empty; a default on one is dropped.
            Cardinality::Repeated => printer.print(&vars, "0,NULL"),
        }
    }

    fn generate_descriptor_initializer(&self, printer: &mut Printer) -> Result<(), CodegenError> {
        self.context
            .generate_descriptor_initializer_generic(printer, true, "BYTES", "NULL", false)
    }

    fn default_value(&self) -> String {
        match self.default_bytes() {
            Some(default) => format!("{{ {}, {} }}", default.len(), self.default_value_data_name()),
            None => "{0,NULL}".to_string(),
        }
    }
}
