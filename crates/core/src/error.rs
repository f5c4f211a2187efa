/// Domain-level error shared by the prediction pipeline and delay analytics.
///
/// Each variant maps to one HTTP status in the serving crates; see their
/// `AppError` implementations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CoreError {
    /// The model bundle (or dataset) was not loaded at startup.
    #[error("Unavailable: {0}")]
    Unavailable(String),

    /// The request is malformed or out of accepted bounds.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A row does not have the width required by the feature schema.
    #[error("Incorrect number of features in row {row}: expected {expected}, received {received}")]
    ShapeMismatch {
        expected: usize,
        received: usize,
        row: usize,
    },

    /// Unexpected failure during scaling or inference.
    #[error("Internal error: {0}")]
    Internal(String),
}
