//! Attestation lifecycle: submission and review decisions.
//!
//! The only write paths for attestations. `submit` gates on the student's
//! profile and persists the proof document before the row that points at
//! it; `validate` and `reject` move rows through the review machine.
//!
//! Review decisions are last-write-wins: an already-decided attestation can
//! be re-decided in either direction, but nothing ever moves a row back to
//! `Pending` (no decision API takes it as a target).

use chrono::Utc;

use vp_core::audit_detail::StatusChangedDetail;
use vp_core::entities::{Attestation, AuditEntry};
use vp_core::enums::{AuditAction, EntityType, ReviewStatus};
use vp_core::ids::PREFIX_AUDIT;

use crate::documents::document_address;
use crate::error::StoreError;
use crate::service::VpService;

impl VpService {
    /// Submit a proof document for review.
    ///
    /// Persists the file at `{surname}_{first_name}/{filename}`, then
    /// inserts the attestation row in `Pending` with points frozen from the
    /// scoring table. If the file write fails, no row is inserted.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::StudentNotFound` for an unregistered number,
    /// `StoreError::ProfileIncomplete` if the profile is not filled in
    /// (checked before any side effect), or `StoreError::InvalidAddress` /
    /// `StoreError::Document` if the file cannot be stored.
    pub async fn submit(
        &self,
        student_number: &str,
        category: &str,
        sub_category: &str,
        file_bytes: &[u8],
        filename: &str,
    ) -> Result<Attestation, StoreError> {
        let student = self.get_student(student_number).await?;
        if !student.profile_complete() {
            return Err(StoreError::ProfileIncomplete {
                student_number: student_number.to_string(),
            });
        }

        let address = document_address(&student.surname, &student.first_name, filename)?;
        self.documents().put(&address, file_bytes)?;

        let attestation = self
            .create_attestation(student_number, category, sub_category, &address)
            .await?;

        tracing::debug!(
            student = student_number,
            address = %attestation.file_ref,
            points = attestation.points,
            "attestation submitted"
        );

        Ok(attestation)
    }

    /// Mark an attestation as validated.
    ///
    /// Leaves every other field untouched, including any rejection comment
    /// left by an earlier decision.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::AttestationNotFound` for an unknown ID.
    pub async fn validate(&self, attestation_id: &str) -> Result<Attestation, StoreError> {
        let current = self.get_attestation(attestation_id).await?;

        let now = Utc::now();
        self.db()
            .conn()
            .execute(
                "UPDATE attestations SET status = ?1 WHERE id = ?2",
                libsql::params![ReviewStatus::Validated.as_str(), attestation_id],
            )
            .await?;

        self.record_decision(&current, ReviewStatus::Validated, None, now)
            .await?;

        Ok(Attestation {
            status: ReviewStatus::Validated,
            ..current
        })
    }

    /// Mark an attestation as rejected with an explanation for the student.
    ///
    /// The comment is stored verbatim; the empty string is a legal comment
    /// and is stored as given, not collapsed to NULL.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::AttestationNotFound` for an unknown ID.
    pub async fn reject(
        &self,
        attestation_id: &str,
        comment: &str,
    ) -> Result<Attestation, StoreError> {
        let current = self.get_attestation(attestation_id).await?;

        let now = Utc::now();
        self.db()
            .conn()
            .execute(
                "UPDATE attestations SET status = ?1, comment = ?2 WHERE id = ?3",
                libsql::params![ReviewStatus::Rejected.as_str(), comment, attestation_id],
            )
            .await?;

        self.record_decision(&current, ReviewStatus::Rejected, Some(comment), now)
            .await?;

        Ok(Attestation {
            status: ReviewStatus::Rejected,
            comment: Some(comment.to_string()),
            ..current
        })
    }

    /// Append the `StatusChanged` audit entry for a review decision.
    async fn record_decision(
        &self,
        before: &Attestation,
        new_status: ReviewStatus,
        comment: Option<&str>,
        now: chrono::DateTime<Utc>,
    ) -> Result<(), StoreError> {
        if before.status.is_terminal() {
            tracing::debug!(
                attestation = before.id.as_str(),
                from = before.status.as_str(),
                to = new_status.as_str(),
                "overwriting prior review decision"
            );
        }

        let detail = StatusChangedDetail {
            from: before.status.as_str().to_string(),
            to: new_status.as_str().to_string(),
            reason: comment.map(String::from),
        };

        let audit_id = self.db().generate_id(PREFIX_AUDIT).await?;
        self.append_audit(&AuditEntry {
            id: audit_id,
            entity_type: EntityType::Attestation,
            entity_id: before.id.clone(),
            action: AuditAction::StatusChanged,
            detail: Some(
                serde_json::to_value(&detail).map_err(|e| StoreError::Other(e.into()))?,
            ),
            created_at: now,
        })
        .await
    }
}
