//! Typed audit detail payloads.
//!
//! Each audit action can carry a structured `detail` JSON blob. These types
//! pin the shapes the lifecycle methods write, so audit consumers can
//! deserialize instead of poking at raw JSON.

use serde::{Deserialize, Serialize};

/// Detail for `AuditAction::StatusChanged`.
///
/// `reason` carries the admin's rejection comment; `None` on validation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StatusChangedDetail {
    pub from: String,
    pub to: String,
    pub reason: Option<String>,
}

/// Detail for `AuditAction::Updated` on a student profile.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProfileUpdatedDetail {
    pub surname: String,
    pub first_name: String,
    pub cohort: String,
    pub email: String,
}
