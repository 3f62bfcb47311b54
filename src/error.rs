use thiserror::Error;

/// Crate-wide error type. Every fallible public entry point returns
/// `Result<T, Error>`.
#[derive(Debug, Error)]
pub enum Error {
    #[error("{what} index {index} out of bounds (len {len})")]
    OutOfBounds { what: &'static str, index: usize, len: usize },

    #[error("degenerate math operation: {0}")]
    DegenerateMath(String),

    #[error("invalid shading mode: {0}")]
    InvalidMode(String),

    #[error("malformed OBJ input at line {line}: {message}")]
    ObjParse { line: usize, message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("failed to encode PNG: {0}")]
    Png(#[from] png::EncodingError),
}
