//! Export error types.

/// Errors that can occur while serializing or backing up a snapshot.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// CSV serialization failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Upload through the object store failed. Retryable; the
    /// authoritative record store is never touched by a backup attempt.
    #[error("Backup transport error: {0}")]
    Transport(#[from] object_store::Error),

    /// I/O error while flushing the CSV buffer.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Catch-all for other errors.
    #[error("{0}")]
    Other(String),
}
