use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::enums::ReviewStatus;

/// A submitted proof document with its scoring and review outcome.
///
/// `points` are computed from the scoring table at submission and frozen;
/// later schedule changes never rewrite them. `file_ref`, once set, is never
/// reassigned. Attestations are never deleted (audit trail).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Attestation {
    pub id: String,
    pub student_number: String,
    pub category: String,
    pub sub_category: String,
    pub points: i64,
    /// Storage address of the uploaded document,
    /// `{surname}_{first_name}/{filename}`.
    pub file_ref: String,
    pub status: ReviewStatus,
    /// Rejection comment. `None` until an admin rejects; the stored string
    /// may be empty (the reject form allows it).
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
}
