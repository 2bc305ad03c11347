//! Student registry repository.
//!
//! Registration, authentication, and profile updates. The student number
//! is the primary key; uniqueness under concurrent registration rides on
//! the PRIMARY KEY constraint rather than a check-then-insert.

use chrono::Utc;

use vp_core::audit_detail::ProfileUpdatedDetail;
use vp_core::entities::{AuditEntry, Student};
use vp_core::enums::{AuditAction, EntityType};
use vp_core::ids::PREFIX_AUDIT;

use crate::credential::{hash_credential, verify_credential};
use crate::error::StoreError;
use crate::helpers::{is_unique_violation, parse_datetime};
use crate::service::VpService;

const SELECT_COLS: &str =
    "student_number, surname, first_name, cohort, email, credential_hash, created_at";

fn row_to_student(row: &libsql::Row) -> Result<Student, StoreError> {
    Ok(Student {
        student_number: row.get(0)?,
        surname: row.get(1)?,
        first_name: row.get(2)?,
        cohort: row.get(3)?,
        email: row.get(4)?,
        credential_hash: row.get(5)?,
        created_at: parse_datetime(&row.get::<String>(6)?)?,
    })
}

impl VpService {
    /// Register a new student account with an empty profile.
    ///
    /// Two concurrent registrations of the same number race on the INSERT;
    /// exactly one wins, the other observes the constraint violation.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::DuplicateStudent` if the number is already taken.
    pub async fn register_student(
        &self,
        student_number: &str,
        credential: &str,
    ) -> Result<Student, StoreError> {
        let now = Utc::now();
        let credential_hash = hash_credential(credential);

        let insert = self
            .db()
            .conn()
            .execute(
                "INSERT INTO students (student_number, credential_hash, created_at)
                 VALUES (?1, ?2, ?3)",
                libsql::params![student_number, credential_hash.as_str(), now.to_rfc3339()],
            )
            .await;
        if let Err(e) = insert {
            if is_unique_violation(&e) {
                return Err(StoreError::DuplicateStudent {
                    student_number: student_number.to_string(),
                });
            }
            return Err(e.into());
        }

        let student = Student {
            student_number: student_number.to_string(),
            surname: String::new(),
            first_name: String::new(),
            cohort: String::new(),
            email: String::new(),
            credential_hash,
            created_at: now,
        };

        let audit_id = self.db().generate_id(PREFIX_AUDIT).await?;
        self.append_audit(&AuditEntry {
            id: audit_id,
            entity_type: EntityType::Student,
            entity_id: student_number.to_string(),
            action: AuditAction::Created,
            detail: None,
            created_at: now,
        })
        .await?;

        Ok(student)
    }

    /// Authenticate a student by number and credential.
    ///
    /// An unknown number and a wrong credential both return
    /// `InvalidCredential`; callers cannot probe which numbers exist.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::InvalidCredential` on any authentication failure.
    pub async fn authenticate_student(
        &self,
        student_number: &str,
        credential: &str,
    ) -> Result<Student, StoreError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM students WHERE student_number = ?1"),
                [student_number],
            )
            .await?;
        let Some(row) = rows.next().await? else {
            return Err(StoreError::InvalidCredential);
        };
        let student = row_to_student(&row)?;

        if !verify_credential(credential, &student.credential_hash) {
            return Err(StoreError::InvalidCredential);
        }
        Ok(student)
    }

    /// Fill in (or re-fill) a student's profile.
    ///
    /// Sets all four profile fields at once. Re-submitting is idempotent;
    /// the latest values win.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::StudentNotFound` if the number is not registered.
    pub async fn update_profile(
        &self,
        student_number: &str,
        surname: &str,
        first_name: &str,
        cohort: &str,
        email: &str,
    ) -> Result<Student, StoreError> {
        // Existence check first so an unknown number reports NotFound
        // rather than silently updating zero rows.
        self.get_student(student_number).await?;

        let now = Utc::now();
        self.db()
            .conn()
            .execute(
                "UPDATE students SET surname = ?1, first_name = ?2, cohort = ?3, email = ?4
                 WHERE student_number = ?5",
                libsql::params![surname, first_name, cohort, email, student_number],
            )
            .await?;

        let detail = ProfileUpdatedDetail {
            surname: surname.to_string(),
            first_name: first_name.to_string(),
            cohort: cohort.to_string(),
            email: email.to_string(),
        };

        let audit_id = self.db().generate_id(PREFIX_AUDIT).await?;
        self.append_audit(&AuditEntry {
            id: audit_id,
            entity_type: EntityType::Student,
            entity_id: student_number.to_string(),
            action: AuditAction::Updated,
            detail: Some(
                serde_json::to_value(&detail).map_err(|e| StoreError::Other(e.into()))?,
            ),
            created_at: now,
        })
        .await?;

        self.get_student(student_number).await
    }

    /// Fetch a student by number.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::StudentNotFound` if no row matches.
    pub async fn get_student(&self, student_number: &str) -> Result<Student, StoreError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM students WHERE student_number = ?1"),
                [student_number],
            )
            .await?;
        let Some(row) = rows.next().await? else {
            return Err(StoreError::StudentNotFound {
                student_number: student_number.to_string(),
            });
        };
        row_to_student(&row)
    }

    /// List all registered students ordered by student number.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the query fails.
    pub async fn list_students(&self) -> Result<Vec<Student>, StoreError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM students ORDER BY student_number"),
                (),
            )
            .await?;

        let mut students = Vec::new();
        while let Some(row) = rows.next().await? {
            students.push(row_to_student(&row)?);
        }
        Ok(students)
    }
}
