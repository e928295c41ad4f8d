use thiserror::Error;

#[derive(Error, Debug)]
pub enum StampError {
    #[error("Failed to parse PDF: {0}")]
    ParseError(String),

    #[error("Invalid action at index {index}: {reason}")]
    Validation { index: usize, reason: String },

    #[error("PDF operation failed: {0}")]
    OperationError(String),

    #[error("Merge failed: {0}")]
    MergeError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}
