//! Service layer orchestrating registry, store, and lifecycle mutations.
//!
//! `VpService` wraps `VpDb` (raw database access), `DocumentStore` (proof
//! document persistence), and `ScoringTable` (points lookup). All repo and
//! lifecycle methods are implemented as `impl VpService`.

use std::path::PathBuf;

use vp_core::scoring::ScoringTable;

use crate::VpDb;
use crate::documents::DocumentStore;
use crate::error::StoreError;

/// Orchestrates attestation lifecycle mutations with audit trail.
///
/// Every mutation method follows this protocol:
/// 1. Validate preconditions (existence, profile completeness, transitions)
/// 2. Persist side effects (document bytes before the row that points at them)
/// 3. Execute SQL
/// 4. Append an audit entry
///
/// The scoring table is fixed at construction: points computed for a
/// submission reflect the schedule of the service that accepted it, and
/// re-creating the service with a new table never rewrites stored points.
pub struct VpService {
    db: VpDb,
    documents: DocumentStore,
    scoring: ScoringTable,
}

impl VpService {
    /// Create a new service wrapping a local database.
    ///
    /// # Arguments
    ///
    /// * `db_path` - Path to the libSQL database file, or `":memory:"` for tests.
    /// * `document_root` - Directory for uploaded proof documents. Pass `None`
    ///   to disable document writing (for tests that don't need the bytes).
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the database cannot be opened or the document
    /// root cannot be created.
    pub async fn new_local(
        db_path: &str,
        document_root: Option<PathBuf>,
    ) -> Result<Self, StoreError> {
        let db = VpDb::open_local(db_path).await?;
        let documents = match document_root {
            Some(root) => DocumentStore::new(root)?,
            None => DocumentStore::disabled(),
        };
        Ok(Self {
            db,
            documents,
            scoring: ScoringTable::standard(),
        })
    }

    /// Create from an existing `VpDb` with an explicit scoring table.
    #[must_use]
    pub fn from_db(db: VpDb, documents: DocumentStore, scoring: ScoringTable) -> Self {
        Self {
            db,
            documents,
            scoring,
        }
    }

    /// Access the underlying database handle.
    #[must_use]
    pub const fn db(&self) -> &VpDb {
        &self.db
    }

    /// Access the document store.
    #[must_use]
    pub const fn documents(&self) -> &DocumentStore {
        &self.documents
    }

    /// The scoring table this service was constructed with.
    #[must_use]
    pub const fn scoring(&self) -> &ScoringTable {
        &self.scoring
    }
}
