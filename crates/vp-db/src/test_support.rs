//! Shared test utilities for vp-db unit tests.

pub(crate) mod helpers {
    use std::path::PathBuf;

    use vp_core::entities::Student;
    use vp_core::scoring::ScoringTable;

    use crate::VpDb;
    use crate::documents::DocumentStore;
    use crate::service::VpService;

    /// Create an in-memory `VpService` with document writing disabled and
    /// the standard scoring table.
    pub async fn test_service() -> VpService {
        let db = VpDb::open_local(":memory:").await.unwrap();
        VpService::from_db(db, DocumentStore::disabled(), ScoringTable::standard())
    }

    /// Create an in-memory `VpService` with a custom scoring table.
    pub async fn test_service_with_scoring(scoring: ScoringTable) -> VpService {
        let db = VpDb::open_local(":memory:").await.unwrap();
        VpService::from_db(db, DocumentStore::disabled(), scoring)
    }

    /// Create an in-memory `VpService` writing documents under `root`.
    pub async fn test_service_with_documents(root: PathBuf) -> VpService {
        let db = VpDb::open_local(":memory:").await.unwrap();
        VpService::from_db(
            db,
            DocumentStore::new(root).unwrap(),
            ScoringTable::standard(),
        )
    }

    /// Register a student and fill in the Dupont/Jean fixture profile.
    pub async fn registered_student(svc: &VpService, number: &str) -> Student {
        svc.register_student(number, "motdepasse").await.unwrap();
        svc.update_profile(number, "Dupont", "Jean", "P2", "jean@x.fr")
            .await
            .unwrap()
    }
}
