use protoc_c_schema::{Cardinality, FieldKind, SchemaField};
use tracing::trace;

use super::{FieldContext, FieldGenerator};
use crate::{error::CodegenError, escape::escape_bytes_with, printer::Printer};

/// Generator for `string` fields, stored as NUL-terminated `char *`.
pub struct StringFieldGenerator<'a> {
    context: FieldContext<'a>,
}

impl<'a> StringFieldGenerator<'a> {
    pub fn new(context: FieldContext<'a>) -> Self {
        trace!(field = %context.field.full_name, "string field generator");
        StringFieldGenerator { context }
    }

    fn default_text(&self) -> Option<&'a str> {
        let field: &'a SchemaField = self.context.field;
        match &field.kind {
            FieldKind::String { default } => default.as_deref(),
            _ => None,
        }
    }

    pub fn default_value_name(&self) -> String {
        format!("{}__default_value", self.context.lower_name)
    }
}

impl FieldGenerator for StringFieldGenerator<'_> {
    fn field(&self) -> &SchemaField {
        self.context.field
    }

    fn generate_struct_members(&self, printer: &mut Printer) -> Result<(), CodegenError> {
        let vars = self.context.variables();
        match self.context.field.cardinality {
            // A null pointer already means "not set".
            Cardinality::Required | Cardinality::Optional => {
                printer.print(&vars, "char *$name$$deprecated$;\n")
            }
            Cardinality::Repeated => {
                printer.print(&vars, "size_t n_$name$$deprecated$;\n")?;
                printer.print(&vars, "char **$name$$deprecated$;\n")
            }
        }
    }

    fn generate_default_value_declarations(&self, printer: &mut Printer) -> Result<(), CodegenError> {
        if self.default_text().is_none() {
            return Ok(());
        }
        printer.print_one("extern char $default$[];\n", "default", &self.default_value_name())
    }

    fn generate_default_value_implementations(&self, printer: &mut Printer) -> Result<(), CodegenError> {
        let Some(default) = self.default_text() else {
            return Ok(());
        };
        let mut vars = self.context.variables();
        vars.insert("default".to_string(), self.default_value_name());
        vars.insert(
            "escaped".to_string(),
            escape_bytes_with(default.as_bytes(), self.context.escape_style),
        );
        printer.print(&vars, "char $default$[] = \"$escaped$\";\n")
    }

    fn generate_static_init(&self, printer: &mut Printer) -> Result<(), CodegenError> {
        let mut vars = self.context.variables();
        vars.insert("default".to_string(), self.default_value());
        match self.context.field.cardinality {
            Cardinality::Required | Cardinality::Optional => printer.print(&vars, "$default$"),
            Cardinality::Repeated => printer.print(&vars, "0,NULL"),
        }
    }

    fn generate_descriptor_initializer(&self, printer: &mut Printer) -> Result<(), CodegenError> {
        self.context
            .generate_descriptor_initializer_generic(printer, false, "STRING", "NULL", false)
    }

    fn default_value(&self) -> String {
        if self.default_text().is_some() {
            self.default_value_name()
        } else if self.context.file.uses_presence_flags() {
            "NULL".to_string()
        } else {
            "(char *)protobuf_c_empty_string".to_string()
        }
    }
}
