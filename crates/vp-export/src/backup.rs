//! Best-effort backup upload through `object_store`.
//!
//! The synchronizer serializes a snapshot with [`write_csv`] and puts the
//! blob at `{prefix}/sauvegarde_valoparc_{YYYY-MM-DD}.csv`. One object per
//! calendar day; a later backup the same day overwrites the earlier one.
//! Transport failures are logged and returned typed; retrying is always
//! safe because a backup never writes to the record store.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use object_store::aws::AmazonS3Builder;
use object_store::path::Path;
use object_store::{ObjectStore, PutPayload};
use serde::Serialize;
use vp_config::BackupConfig;
use vp_core::entities::ExportRow;

use crate::{ExportError, write_csv};

/// Outcome of a successful backup upload.
#[derive(Debug, Clone, Serialize)]
pub struct BackupReceipt {
    /// Full object path inside the bucket, prefix included.
    pub object_path: String,
    /// Size of the uploaded blob, BOM and headers included.
    pub bytes: usize,
    /// Entity tag reported by the store, when it reports one.
    pub e_tag: Option<String>,
}

fn backup_object_path(prefix: &str, date: NaiveDate) -> String {
    let name = format!("sauvegarde_valoparc_{}.csv", date.format("%Y-%m-%d"));
    if prefix.is_empty() {
        name
    } else {
        format!("{prefix}/{name}")
    }
}

/// Uploads snapshot CSVs to an injected object store.
#[derive(Debug, Clone)]
pub struct BackupSynchronizer {
    store: Arc<dyn ObjectStore>,
    prefix: String,
}

impl BackupSynchronizer {
    /// Wrap an already-built store. `prefix` may be empty; surrounding
    /// slashes are stripped.
    pub fn new(store: Arc<dyn ObjectStore>, prefix: impl Into<String>) -> Self {
        let prefix = prefix.into().trim_matches('/').to_string();
        Self { store, prefix }
    }

    /// Build an S3-compatible synchronizer from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::Other`] when the required credentials are
    /// absent and [`ExportError::Transport`] when the store cannot be built.
    pub fn from_config(config: &BackupConfig) -> Result<Self, ExportError> {
        if !config.is_configured() {
            return Err(ExportError::Other(
                "backup is not configured (set account_id/access_key_id/secret_access_key/bucket_name)"
                    .to_string(),
            ));
        }

        let endpoint = config.endpoint_url();
        let mut builder = AmazonS3Builder::new()
            .with_bucket_name(&config.bucket_name)
            .with_access_key_id(&config.access_key_id)
            .with_secret_access_key(&config.secret_access_key)
            .with_endpoint(&endpoint)
            .with_region(&config.region)
            .with_virtual_hosted_style_request(false);

        if endpoint.starts_with("http://") {
            builder = builder.with_allow_http(true);
        }

        let store = builder.build()?;
        Ok(Self::new(Arc::new(store), config.prefix.as_str()))
    }

    /// Serialize `rows` and upload today's backup object.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::Csv`] / [`ExportError::Io`] if serialization
    /// fails and [`ExportError::Transport`] if the upload fails. A transport
    /// failure leaves nothing behind to clean up.
    pub async fn backup(&self, rows: &[ExportRow]) -> Result<BackupReceipt, ExportError> {
        let blob = write_csv(rows)?;
        let bytes = blob.len();
        let object_path = backup_object_path(&self.prefix, Utc::now().date_naive());
        let location = Path::from(object_path.as_str());

        let put = match self.store.put(&location, PutPayload::from(blob)).await {
            Ok(put) => put,
            Err(error) => {
                tracing::warn!(object = %object_path, %error, "backup upload failed");
                return Err(ExportError::Transport(error));
            }
        };

        tracing::debug!(object = %object_path, rows = rows.len(), bytes, "backup uploaded");

        Ok(BackupReceipt {
            object_path,
            bytes,
            e_tag: put.e_tag,
        })
    }
}

#[cfg(test)]
mod tests {
    use object_store::local::LocalFileSystem;
    use object_store::memory::InMemory;
    use pretty_assertions::assert_eq;
    use vp_core::enums::ReviewStatus;

    use super::*;

    fn sample_row(status: ReviewStatus) -> ExportRow {
        ExportRow {
            attestation_id: "att-1a2b3c4d".to_string(),
            student_number: "E001".to_string(),
            surname: "Dupont".to_string(),
            first_name: "Jean".to_string(),
            category: "Mobilité".to_string(),
            sub_category: "Stage Erasmus 1 semestre".to_string(),
            points: 40,
            file_ref: "Dupont_Jean/attestation.pdf".to_string(),
            status,
            comment: None,
        }
    }

    #[test]
    fn object_path_is_dated_and_prefixed() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 7).unwrap();
        assert_eq!(
            backup_object_path("exports", date),
            "exports/sauvegarde_valoparc_2024-03-07.csv"
        );
        assert_eq!(
            backup_object_path("", date),
            "sauvegarde_valoparc_2024-03-07.csv"
        );
    }

    #[test]
    fn prefix_slashes_are_stripped() {
        let sync = BackupSynchronizer::new(Arc::new(InMemory::new()), "/exports/");
        assert_eq!(sync.prefix, "exports");
    }

    #[tokio::test]
    async fn backup_uploads_csv_blob() {
        let store = Arc::new(InMemory::new());
        let sync = BackupSynchronizer::new(Arc::clone(&store) as Arc<dyn ObjectStore>, "exports");

        let receipt = sync
            .backup(&[sample_row(ReviewStatus::Validated)])
            .await
            .unwrap();

        assert!(receipt.object_path.starts_with("exports/sauvegarde_valoparc_"));
        assert!(receipt.object_path.ends_with(".csv"));

        let stored = store
            .get(&Path::from(receipt.object_path.as_str()))
            .await
            .unwrap()
            .bytes()
            .await
            .unwrap();
        assert_eq!(receipt.bytes, stored.len());
        assert_eq!(&stored[..3], b"\xef\xbb\xbf");

        let text = String::from_utf8(stored[3..].to_vec()).unwrap();
        assert!(text.starts_with("Numéro Étudiant,"));
        assert!(text.contains("Validée"));
    }

    #[tokio::test]
    async fn same_day_backup_overwrites() {
        let store = Arc::new(InMemory::new());
        let sync = BackupSynchronizer::new(Arc::clone(&store) as Arc<dyn ObjectStore>, "");

        let first = sync.backup(&[sample_row(ReviewStatus::Pending)]).await.unwrap();
        let second = sync
            .backup(&[
                sample_row(ReviewStatus::Pending),
                sample_row(ReviewStatus::Rejected),
            ])
            .await
            .unwrap();

        assert_eq!(first.object_path, second.object_path);

        let stored = store
            .get(&Path::from(second.object_path.as_str()))
            .await
            .unwrap()
            .bytes()
            .await
            .unwrap();
        assert_eq!(stored.len(), second.bytes, "latest upload wins");
    }

    #[tokio::test]
    async fn local_filesystem_sink_writes_file() {
        let tmp = tempfile::tempdir().unwrap();
        let store = LocalFileSystem::new_with_prefix(tmp.path()).unwrap();
        let sync = BackupSynchronizer::new(Arc::new(store), "");

        let receipt = sync
            .backup(&[sample_row(ReviewStatus::Rejected)])
            .await
            .unwrap();

        let on_disk = std::fs::read(tmp.path().join(&receipt.object_path)).unwrap();
        assert_eq!(on_disk.len(), receipt.bytes);
        assert_eq!(&on_disk[..3], b"\xef\xbb\xbf");
    }

    #[tokio::test]
    async fn transport_failure_is_typed() {
        // A store rooted at a plain file cannot take writes
        let tmp = tempfile::tempdir().unwrap();
        let not_a_dir = tmp.path().join("not_a_dir");
        std::fs::write(&not_a_dir, b"x").unwrap();

        let store = LocalFileSystem::new_with_prefix(&not_a_dir).unwrap();
        let sync = BackupSynchronizer::new(Arc::new(store), "");

        let err = sync
            .backup(&[sample_row(ReviewStatus::Pending)])
            .await
            .unwrap_err();
        assert!(matches!(err, ExportError::Transport(_)), "got: {err}");
    }

    #[test]
    fn from_config_requires_credentials() {
        let config = BackupConfig::default();
        let err = BackupSynchronizer::from_config(&config).unwrap_err();
        assert!(matches!(err, ExportError::Other(_)));
        assert!(err.to_string().contains("not configured"));
    }

    #[test]
    fn from_config_builds_store() {
        let config = BackupConfig {
            account_id: "acc".to_string(),
            access_key_id: "key".to_string(),
            secret_access_key: "secret".to_string(),
            bucket_name: "valoparc".to_string(),
            endpoint: String::new(),
            region: "auto".to_string(),
            prefix: "exports/".to_string(),
        };

        let sync = BackupSynchronizer::from_config(&config).unwrap();
        assert_eq!(sync.prefix, "exports");
    }
}
