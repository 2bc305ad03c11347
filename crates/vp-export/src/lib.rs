//! # vp-export
//!
//! Snapshot serialization and best-effort backup for valoparc.
//!
//! Takes the export snapshot produced by the record store (one row per
//! attestation, joined with its owner) and turns it into secondary
//! artifacts: a spreadsheet-compatible CSV blob and a dated backup object
//! in an S3-compatible bucket or local filesystem sink.
//!
//! Backups never feed back into the record store. A failed upload is
//! reported as [`ExportError::Transport`] and can simply be retried; the
//! next run regenerates the snapshot from scratch.

pub mod backup;
pub mod error;
pub mod tabular;

pub use backup::{BackupReceipt, BackupSynchronizer};
pub use error::ExportError;
pub use tabular::write_csv;
