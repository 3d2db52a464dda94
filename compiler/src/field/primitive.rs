use protoc_c_schema::{Cardinality, FieldKind, ScalarDefault, ScalarType, SchemaField};
use tracing::trace;

use super::{FieldContext, FieldGenerator};
use crate::{
    error::CodegenError,
    printer::Printer,
    utils::{simple_dtoa, simple_ftoa, to_upper},
};

/// Generator for numeric and boolean fields. Their defaults are plain C
/// literals, so no default value storage is emitted.
pub struct PrimitiveFieldGenerator<'a> {
    context: FieldContext<'a>,
    scalar:  ScalarType,
}

pub fn c_type_name(scalar: ScalarType) -> &'static str {
    match scalar {
        ScalarType::Int32 | ScalarType::Sint32 | ScalarType::Sfixed32 => "int32_t",
        ScalarType::Int64 | ScalarType::Sint64 | ScalarType::Sfixed64 => "int64_t",
        ScalarType::Uint32 | ScalarType::Fixed32 => "uint32_t",
        ScalarType::Uint64 | ScalarType::Fixed64 => "uint64_t",
        ScalarType::Bool => "protobuf_c_boolean",
        ScalarType::Float => "float",
        ScalarType::Double => "double",
    }
}

/// C literal for `value` as a constant of type `scalar`.
pub fn scalar_literal(scalar: ScalarType, value: ScalarDefault) -> String {
    match scalar {
        ScalarType::Int32 | ScalarType::Sint32 | ScalarType::Sfixed32 => as_i64(value).to_string(),
        ScalarType::Int64 | ScalarType::Sint64 | ScalarType::Sfixed64 => {
            format!("INT64_C({})", as_i64(value))
        }
        ScalarType::Uint32 | ScalarType::Fixed32 => format!("{}u", as_u64(value)),
        ScalarType::Uint64 | ScalarType::Fixed64 => format!("UINT64_C({})", as_u64(value)),
        ScalarType::Bool => (if as_f64(value) != 0.0 { "1" } else { "0" }).to_string(),
        ScalarType::Float => simple_ftoa(as_f64(value) as f32),
        ScalarType::Double => simple_dtoa(as_f64(value)),
    }
}

fn as_i64(value: ScalarDefault) -> i64 {
    match value {
        ScalarDefault::Int(n) => n,
        ScalarDefault::Uint(n) => n as i64,
        ScalarDefault::Bool(b) => i64::from(b),
        ScalarDefault::Float(f) => f as i64,
    }
}

fn as_u64(value: ScalarDefault) -> u64 {
    match value {
        ScalarDefault::Int(n) => n as u64,
        ScalarDefault::Uint(n) => n,
        ScalarDefault::Bool(b) => u64::from(b),
        ScalarDefault::Float(f) => f as u64,
    }
}

fn as_f64(value: ScalarDefault) -> f64 {
    match value {
        ScalarDefault::Int(n) => n as f64,
        ScalarDefault::Uint(n) => n as f64,
        ScalarDefault::Bool(b) => f64::from(u8::from(b)),
        ScalarDefault::Float(f) => f,
    }
}

impl<'a> PrimitiveFieldGenerator<'a> {
    pub fn new(context: FieldContext<'a>, scalar: ScalarType) -> Self {
        trace!(field = %context.field.full_name, scalar = scalar.schema_name(), "primitive field generator");
        PrimitiveFieldGenerator { context, scalar }
    }

    fn default_scalar(&self) -> Option<ScalarDefault> {
        match &self.context.field.kind {
            FieldKind::Scalar { default, .. } => *default,
            _ => None,
        }
    }
}

impl FieldGenerator for PrimitiveFieldGenerator<'_> {
    fn field(&self) -> &SchemaField {
        self.context.field
    }

    fn generate_struct_members(&self, printer: &mut Printer) -> Result<(), CodegenError> {
        let mut vars = self.context.variables();
        vars.insert("c_type".to_string(), c_type_name(self.scalar).to_string());
        match self.context.field.cardinality {
            Cardinality::Required => printer.print(&vars, "$c_type$ $name$$deprecated$;\n"),
            Cardinality::Optional => {
                if self.context.has_presence_flag() {
                    printer.print(&vars, "protobuf_c_boolean has_$name$$deprecated$;\n")?;
                }
                printer.print(&vars, "$c_type$ $name$$deprecated$;\n")
            }
            Cardinality::Repeated => {
                printer.print(&vars, "size_t n_$name$$deprecated$;\n")?;
                printer.print(&vars, "$c_type$ *$name$$deprecated$;\n")
            }
        }
    }

    fn generate_default_value_declarations(&self, _printer: &mut Printer) -> Result<(), CodegenError> {
        Ok(())
    }

    fn generate_default_value_implementations(&self, _printer: &mut Printer) -> Result<(), CodegenError> {
        Ok(())
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
            Cardinality::Repeated => printer.print(&vars, "0,NULL"),
        }
    }

    fn generate_descriptor_initializer(&self, printer: &mut Printer) -> Result<(), CodegenError> {
        let type_macro = to_upper(self.scalar.schema_name());
        self.context
            .generate_descriptor_initializer_generic(printer, true, &type_macro, "NULL", true)
    }

    fn default_value(&self) -> String {
        match self.default_scalar() {
            Some(value) => scalar_literal(self.scalar, value),
            None => "0".to_string(),
        }
    }
}
