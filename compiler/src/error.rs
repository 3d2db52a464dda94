use thiserror::Error;

#[derive(Debug, Error)]
pub enum CodegenError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Schema model decode error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Escape buffer too small: need {needed} bytes, have {available}")]
    Capacity {
        needed:    usize,
        available: usize,
    },

    #[error("Field {field} has kind \"{kind}\", which this generator does not emit")]
    UnsupportedKind {
        field: String,
        kind:  &'static str,
    },

    #[error("Template error: {0}")]
    Template(String),

    #[error("Verifier error: {0}")]
    VerifierError(String),
}
