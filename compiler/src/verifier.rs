use std::collections::HashSet;

use protoc_c_schema::{
    Cardinality, FieldKind, FileModel, MessageModel, ScalarDefault, ScalarType, MAX_FIELD_NUMBER,
};

use crate::{error::CodegenError, utils::quote};

/// Checks the invariants the generator relies on but does not enforce itself.
/// Returns `Err(CodegenError::VerifierError(_))` on the first violation.
pub fn verify_file(file: &FileModel) -> Result<(), CodegenError> {
    for message in &file.messages {
        verify_message(message)?;
    }
    Ok(())
}

fn verify_message(message: &MessageModel) -> Result<(), CodegenError> {
    let mut names   = HashSet::new();
    let mut numbers = HashSet::new();

    for field in &message.fields {
        if !names.insert(field.name.as_str()) {
            return Err(CodegenError::VerifierError(format!(
                "The field name {} is used twice in {}",
                quote(&field.name),
                quote(&message.full_name)
            )));
        }
        if !numbers.insert(field.number) {
            return Err(CodegenError::VerifierError(format!(
                "The number for field {} is used twice",
                quote(&field.full_name)
            )));
        }
        if field.number <= 0 || field.number > MAX_FIELD_NUMBER {
            return Err(CodegenError::VerifierError(format!(
                "The number for field {} must be between 1 and {}",
                quote(&field.full_name),
                MAX_FIELD_NUMBER
            )));
        }
        if field.cardinality == Cardinality::Repeated && field.has_explicit_default() {
            return Err(CodegenError::VerifierError(format!(
                "The repeated field {} cannot have a default value",
                quote(&field.full_name)
            )));
        }
        if field.in_oneof() && field.cardinality != Cardinality::Optional {
            return Err(CodegenError::VerifierError(format!(
                "The oneof member {} must be optional",
                quote(&field.full_name)
            )));
        }
        if let FieldKind::Scalar { scalar, default: Some(default) } = &field.kind {
            if !default_fits(*scalar, *default) {
                return Err(CodegenError::VerifierError(format!(
                    "The default value of field {} does not fit type {}",
                    quote(&field.full_name),
                    quote(scalar.schema_name())
                )));
            }
        }
    }

    for nested in &message.nested {
        verify_message(nested)?;
    }
    Ok(())
}

fn default_fits(scalar: ScalarType, value: ScalarDefault) -> bool {
    match (scalar, value) {
        (ScalarType::Int32 | ScalarType::Sint32 | ScalarType::Sfixed32, ScalarDefault::Int(n)) => {
            i32::try_from(n).is_ok()
        }
        (ScalarType::Uint32 | ScalarType::Fixed32, ScalarDefault::Uint(n)) => u32::try_from(n).is_ok(),
        (ScalarType::Uint32 | ScalarType::Fixed32, ScalarDefault::Int(n)) => u32::try_from(n).is_ok(),
        (ScalarType::Int64 | ScalarType::Sint64 | ScalarType::Sfixed64, ScalarDefault::Int(_)) => true,
        (ScalarType::Uint64 | ScalarType::Fixed64, ScalarDefault::Uint(_)) => true,
        (ScalarType::Uint64 | ScalarType::Fixed64, ScalarDefault::Int(n)) => n >= 0,
        (ScalarType::Bool, ScalarDefault::Bool(_)) => true,
        (ScalarType::Float | ScalarType::Double, ScalarDefault::Float(_) | ScalarDefault::Int(_)) => true,
        _ => false,
    }
}
