use serde::{Deserialize, Serialize};

use crate::enums::ReviewStatus;

/// One row of the export snapshot: an attestation joined with its owner.
///
/// Derived view, regenerated on demand and never persisted as a primary
/// record. Row order is attestation creation order, and one row exists per
/// attestation; a missing owner is a data-integrity fault surfaced by the
/// snapshot query, never a dropped row.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExportRow {
    pub attestation_id: String,
    pub student_number: String,
    pub surname: String,
    pub first_name: String,
    pub category: String,
    pub sub_category: String,
    pub points: i64,
    pub file_ref: String,
    pub status: ReviewStatus,
    pub comment: Option<String>,
}
