//! Store error types for vp-db.

use thiserror::Error;

/// Errors from registry, store, and lifecycle operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Registration raced or repeated an already-taken student number.
    #[error("Student number already registered: {student_number}")]
    DuplicateStudent { student_number: String },

    /// Authentication failed. Deliberately does not say whether the number
    /// or the credential was wrong.
    #[error("Invalid credentials")]
    InvalidCredential,

    /// Submission attempted before the profile was filled in.
    #[error("Profile incomplete for student: {student_number}")]
    ProfileIncomplete { student_number: String },

    /// Student lookup returned no row.
    #[error("Student not found: {student_number}")]
    StudentNotFound { student_number: String },

    /// Attestation lookup returned no row.
    #[error("Attestation not found: {id}")]
    AttestationNotFound { id: String },

    /// An attestation row has no owning student. Data-integrity fault:
    /// the snapshot surfaces it instead of silently dropping the row.
    #[error("Attestation {attestation_id} has no owning student")]
    IntegrityGap { attestation_id: String },

    /// A document address is malformed or escapes the storage root.
    #[error("Invalid document address: {0}")]
    InvalidAddress(String),

    /// Document persistence failed.
    #[error("Document write failed: {0}")]
    Document(#[from] std::io::Error),

    /// A SQL query failed.
    #[error("Query failed: {0}")]
    Query(String),

    /// Schema migration failed.
    #[error("Migration failed: {0}")]
    Migration(String),

    /// Expected a result row but none was returned.
    #[error("No result returned")]
    NoResult,

    /// Underlying libSQL error.
    #[error("libSQL error: {0}")]
    LibSql(#[from] libsql::Error),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
