use thiserror::Error;

/// Errors that can occur while loading inputs or generating receipts.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SynthError {
    /// Configuration file missing, unreadable, malformed or invalid.
    #[error("configuration error: {0}")]
    Config(String),

    /// Text corpus missing, malformed or structurally invalid.
    #[error("corpus error: {0}")]
    Corpus(String),

    /// Layout requested in an invalid state (e.g. no corpus attached).
    #[error("layout error: {0}")]
    Layout(String),

    /// Generation request that cannot be satisfied.
    #[error("generation error: {0}")]
    Generation(String),

    /// Filesystem error while persisting generated samples.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error while persisting generated samples.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A single validation error with field path and message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dot-separated path to the invalid field (e.g. "products.grocery[3].vat_rate").
    pub field: String,
    /// Human-readable error description.
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Join a list of validation errors into a single message.
pub(crate) fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
