//! Error types for the lesson pipeline

use thiserror::Error;

/// Main error type for pipeline operations
#[derive(Error, Debug)]
pub enum PipelineError {
    /// File I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Intermediate CSV file could not be read or written
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    /// Deal identifier is not `<number>` or `<number>-<alternate>`
    #[error("Invalid deal id: {0:?}")]
    InvalidDealId(String),

    /// The PDF renderer could not be started
    #[error("Failed to run renderer {program}: {source}")]
    RendererSpawnFailed {
        program: String,
        source: std::io::Error,
    },

    /// The PDF renderer ran but reported failure
    #[error("Renderer exited with code {0}")]
    RendererFailed(i32),
}

/// Result type alias for pipeline operations
pub type PipelineResult<T> = Result<T, PipelineError>;
