//! Attestation store repository.
//!
//! Rows are append-only: review changes status and comment, nothing is
//! ever deleted. Points are computed from the service's scoring table at
//! insert time and frozen on the row; later schedule changes never rewrite
//! them.

use chrono::Utc;

use vp_core::entities::{Attestation, AuditEntry, ExportRow};
use vp_core::enums::{AuditAction, EntityType, ReviewStatus};
use vp_core::ids::{PREFIX_ATTESTATION, PREFIX_AUDIT};

use crate::error::StoreError;
use crate::helpers::{parse_datetime, parse_enum};
use crate::service::VpService;

const SELECT_COLS: &str =
    "id, student_number, category, sub_category, points, file_ref, status, comment, created_at";

fn row_to_attestation(row: &libsql::Row) -> Result<Attestation, StoreError> {
    Ok(Attestation {
        id: row.get(0)?,
        student_number: row.get(1)?,
        category: row.get(2)?,
        sub_category: row.get(3)?,
        points: row.get(4)?,
        file_ref: row.get(5)?,
        status: parse_enum(&row.get::<String>(6)?)?,
        // Not get_opt_string: an empty rejection comment is a stored value
        comment: row.get::<Option<String>>(7)?,
        created_at: parse_datetime(&row.get::<String>(8)?)?,
    })
}

fn row_to_export_row(row: &libsql::Row) -> Result<ExportRow, StoreError> {
    let attestation_id: String = row.get(0)?;
    // LEFT JOIN: a NULL owner column means the student row is gone
    if row.get::<Option<String>>(10)?.is_none() {
        return Err(StoreError::IntegrityGap { attestation_id });
    }
    Ok(ExportRow {
        attestation_id,
        student_number: row.get(1)?,
        surname: row.get(2)?,
        first_name: row.get(3)?,
        category: row.get(4)?,
        sub_category: row.get(5)?,
        points: row.get(6)?,
        file_ref: row.get(7)?,
        status: parse_enum(&row.get::<String>(8)?)?,
        comment: row.get::<Option<String>>(9)?,
    })
}

impl VpService {
    /// Insert a new attestation row in `Pending` with frozen points.
    ///
    /// Crate-internal: external callers go through `submit`, which owns the
    /// precondition checks and the document write.
    pub(crate) async fn create_attestation(
        &self,
        student_number: &str,
        category: &str,
        sub_category: &str,
        file_ref: &str,
    ) -> Result<Attestation, StoreError> {
        let now = Utc::now();
        let id = self.db().generate_id(PREFIX_ATTESTATION).await?;
        let points = self.scoring().points(category, sub_category);

        self.db()
            .conn()
            .execute(
                &format!(
                    "INSERT INTO attestations ({SELECT_COLS})
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)"
                ),
                libsql::params![
                    id.as_str(),
                    student_number,
                    category,
                    sub_category,
                    points,
                    file_ref,
                    ReviewStatus::Pending.as_str(),
                    libsql::Value::Null,
                    now.to_rfc3339()
                ],
            )
            .await?;

        let attestation = Attestation {
            id: id.clone(),
            student_number: student_number.to_string(),
            category: category.to_string(),
            sub_category: sub_category.to_string(),
            points,
            file_ref: file_ref.to_string(),
            status: ReviewStatus::Pending,
            comment: None,
            created_at: now,
        };

        let audit_id = self.db().generate_id(PREFIX_AUDIT).await?;
        self.append_audit(&AuditEntry {
            id: audit_id,
            entity_type: EntityType::Attestation,
            entity_id: id,
            action: AuditAction::Created,
            detail: None,
            created_at: now,
        })
        .await?;

        Ok(attestation)
    }

    /// Fetch an attestation by ID.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::AttestationNotFound` if no row matches.
    pub async fn get_attestation(&self, id: &str) -> Result<Attestation, StoreError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM attestations WHERE id = ?1"),
                [id],
            )
            .await?;
        let Some(row) = rows.next().await? else {
            return Err(StoreError::AttestationNotFound { id: id.to_string() });
        };
        row_to_attestation(&row)
    }

    /// List a student's attestations in insertion order.
    ///
    /// `rowid` breaks ties between rows created within the same clock tick.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the query fails.
    pub async fn list_attestations_for_student(
        &self,
        student_number: &str,
    ) -> Result<Vec<Attestation>, StoreError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!(
                    "SELECT {SELECT_COLS} FROM attestations
                     WHERE student_number = ?1 ORDER BY created_at, rowid"
                ),
                [student_number],
            )
            .await?;

        let mut attestations = Vec::new();
        while let Some(row) = rows.next().await? {
            attestations.push(row_to_attestation(&row)?);
        }
        Ok(attestations)
    }

    /// Snapshot every attestation joined with its owner, insertion order.
    ///
    /// Feeds the export writer and the admin review surface. One row per
    /// attestation, always: an owner missing from the registry aborts the
    /// snapshot with `IntegrityGap` instead of dropping the row, so a
    /// truncated export can never pass for a complete one.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::IntegrityGap` if an attestation has no owning
    /// student, or `StoreError` if the query fails.
    pub async fn list_all_with_students(&self) -> Result<Vec<ExportRow>, StoreError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT a.id, a.student_number, s.surname, s.first_name, a.category,
                        a.sub_category, a.points, a.file_ref, a.status, a.comment,
                        s.student_number
                 FROM attestations a
                 LEFT JOIN students s ON s.student_number = a.student_number
                 ORDER BY a.created_at, a.rowid",
                (),
            )
            .await?;

        let mut export_rows = Vec::new();
        while let Some(row) = rows.next().await? {
            export_rows.push(row_to_export_row(&row)?);
        }
        Ok(export_rows)
    }
}
