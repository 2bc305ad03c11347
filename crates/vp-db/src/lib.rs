//! # vp-db
//!
//! libSQL database operations for Valoparc state management.
//!
//! Handles all relational state: the student registry, the attestation
//! store, and the append-only audit trail. The lifecycle methods in
//! [`service::VpService`] are the only write path; raw connection access
//! exists for queries and tests.
//!
//! Uses the `libsql` crate (C `SQLite` fork, v0.9.29), local-only files
//! or `":memory:"` for tests.

pub mod credential;
pub mod documents;
pub mod error;
pub mod helpers;
pub mod lifecycle;
mod migrations;
pub mod repos;
pub mod service;
#[cfg(test)]
pub(crate) mod test_support;

use error::StoreError;
use libsql::Builder;

/// Central database handle for all Valoparc state operations.
///
/// Wraps a libSQL database and connection. Provides ID generation;
/// repository methods live on [`service::VpService`].
pub struct VpDb {
    #[allow(dead_code)]
    db: libsql::Database,
    conn: libsql::Connection,
}

impl VpDb {
    /// Open a local-only database at the given path.
    ///
    /// Runs migrations automatically on first open.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the database cannot be opened or
    /// migrations fail.
    pub async fn open_local(path: &str) -> Result<Self, StoreError> {
        let db = Builder::new_local(path).build().await?;
        let conn = db.connect()?;

        // Enable foreign keys (must be per-connection in SQLite)
        conn.execute("PRAGMA foreign_keys = ON", ())
            .await
            .map_err(|e| StoreError::Migration(format!("PRAGMA foreign_keys: {e}")))?;

        let vp_db = Self { db, conn };
        vp_db.run_migrations().await?;
        Ok(vp_db)
    }

    /// Access the underlying libSQL connection for direct queries.
    #[must_use]
    pub const fn conn(&self) -> &libsql::Connection {
        &self.conn
    }

    /// Generate a prefixed ID via libSQL. Returns e.g., `"att-a3f8b2c1"`.
    ///
    /// Uses `randomblob(4)` in SQL to produce 8-char hex, then prepends the prefix.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the query fails or returns no rows.
    pub async fn generate_id(&self, prefix: &str) -> Result<String, StoreError> {
        let mut rows = self
            .conn
            .query(
                &format!("SELECT '{prefix}-' || lower(hex(randomblob(4)))"),
                (),
            )
            .await?;
        let row = rows.next().await?.ok_or(StoreError::NoResult)?;
        Ok(row.get::<String>(0)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    /// Helper to create an in-memory database for testing.
    async fn test_db() -> VpDb {
        VpDb::open_local(":memory:").await.unwrap()
    }

    #[tokio::test]
    async fn open_local_creates_schema() {
        let db = test_db().await;

        let tables = ["students", "attestations", "audit_trail"];
        for table in &tables {
            let mut rows = db
                .conn()
                .query(
                    "SELECT name FROM sqlite_master WHERE type='table' AND name=?1",
                    [*table],
                )
                .await
                .unwrap();
            let row = rows.next().await.unwrap();
            assert!(row.is_some(), "table '{table}' should exist");
        }
    }

    #[tokio::test]
    async fn generate_id_correct_format() {
        let db = test_db().await;
        let id = db.generate_id("att").await.unwrap();
        assert!(id.starts_with("att-"), "ID should start with 'att-': {id}");
        assert_eq!(
            id.len(),
            12,
            "ID should be 12 chars (3 prefix + 1 dash + 8 hex): {id}"
        );

        // Verify hex characters
        let hex_part = &id[4..];
        assert!(
            hex_part.chars().all(|c| c.is_ascii_hexdigit()),
            "Random part should be hex: {hex_part}"
        );
    }

    #[tokio::test]
    async fn generate_id_all_prefixes() {
        let db = test_db().await;
        for prefix in vp_core::ids::ALL_PREFIXES {
            let id = db.generate_id(prefix).await.unwrap();
            assert!(id.starts_with(&format!("{prefix}-")));
        }
    }

    #[tokio::test]
    async fn generate_id_uniqueness() {
        let db = test_db().await;
        let mut ids = HashSet::new();
        for _ in 0..100 {
            let id = db.generate_id("tst").await.unwrap();
            assert!(ids.insert(id.clone()), "Duplicate ID generated: {id}");
        }
    }

    #[tokio::test]
    async fn idempotent_migrations() {
        let db = test_db().await;
        // Run migrations again; should not fail
        db.run_migrations().await.unwrap();
    }

    #[tokio::test]
    async fn insert_and_select_student() {
        let db = test_db().await;

        db.conn()
            .execute(
                "INSERT INTO students (student_number, credential_hash, created_at)
                 VALUES ('E001', 'abc123', '2026-08-25T10:00:00+00:00')",
                (),
            )
            .await
            .unwrap();

        let mut rows = db
            .conn()
            .query(
                "SELECT student_number, surname, credential_hash FROM students WHERE student_number = ?1",
                ["E001"],
            )
            .await
            .unwrap();
        let row = rows.next().await.unwrap().unwrap();
        assert_eq!(row.get::<String>(0).unwrap(), "E001");
        assert_eq!(row.get::<String>(1).unwrap(), "", "profile columns default to empty");
        assert_eq!(row.get::<String>(2).unwrap(), "abc123");
    }

    #[tokio::test]
    async fn duplicate_student_number_rejected() {
        let db = test_db().await;

        db.conn()
            .execute(
                "INSERT INTO students (student_number, credential_hash, created_at)
                 VALUES ('E001', 'abc', '2026-08-25T10:00:00+00:00')",
                (),
            )
            .await
            .unwrap();

        // Second INSERT with the same number must hit the PRIMARY KEY
        let result = db
            .conn()
            .execute(
                "INSERT INTO students (student_number, credential_hash, created_at)
                 VALUES ('E001', 'def', '2026-08-25T10:00:01+00:00')",
                (),
            )
            .await;
        assert!(result.is_err(), "duplicate student number should be rejected");
    }

    #[tokio::test]
    async fn insert_and_select_attestation() {
        let db = test_db().await;
        let att_id = db.generate_id("att").await.unwrap();

        db.conn()
            .execute(
                "INSERT INTO students (student_number, credential_hash, created_at)
                 VALUES ('E001', 'abc', '2026-08-25T10:00:00+00:00')",
                (),
            )
            .await
            .unwrap();

        db.conn()
            .execute(
                "INSERT INTO attestations (id, student_number, category, sub_category, points, file_ref, status, created_at)
                 VALUES (?1, 'E001', 'Mobilité', 'Stage Erasmus 1 semestre', 40, 'Dupont_Jean/stage.pdf', 'pending', '2026-08-25T10:01:00+00:00')",
                [att_id.as_str()],
            )
            .await
            .unwrap();

        let mut rows = db
            .conn()
            .query(
                "SELECT id, points, status FROM attestations WHERE id = ?1",
                [att_id.as_str()],
            )
            .await
            .unwrap();
        let row = rows.next().await.unwrap().unwrap();
        assert_eq!(row.get::<String>(0).unwrap(), att_id);
        assert_eq!(row.get::<i64>(1).unwrap(), 40);
        assert_eq!(row.get::<String>(2).unwrap(), "pending");
    }

    #[tokio::test]
    async fn attestation_requires_owner() {
        let db = test_db().await;

        // No student row: the foreign key must reject the insert
        let result = db
            .conn()
            .execute(
                "INSERT INTO attestations (id, student_number, category, sub_category, points, file_ref, status, created_at)
                 VALUES ('att-orphan01', 'E999', 'Sport', 'SUAPS', 10, 'X_Y/f.pdf', 'pending', '2026-08-25T10:00:00+00:00')",
                (),
            )
            .await;
        assert!(result.is_err(), "orphan attestation should be rejected");
    }
}
