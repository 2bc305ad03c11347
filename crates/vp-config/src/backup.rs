//! Backup bucket configuration (S3-compatible storage).

use serde::{Deserialize, Serialize};

/// Default bucket name.
fn default_bucket_name() -> String {
    String::from("valoparc")
}

/// Default region. S3-compatible providers that ignore regions (R2, MinIO)
/// accept `"auto"`.
fn default_region() -> String {
    String::from("auto")
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BackupConfig {
    /// Provider account ID. Used to build the endpoint when `endpoint` is empty.
    #[serde(default)]
    pub account_id: String,

    /// Access key ID.
    #[serde(default)]
    pub access_key_id: String,

    /// Secret access key.
    #[serde(default)]
    pub secret_access_key: String,

    /// Bucket name.
    #[serde(default = "default_bucket_name")]
    pub bucket_name: String,

    /// Custom endpoint URL. If empty, built from `account_id`.
    #[serde(default)]
    pub endpoint: String,

    /// Bucket region.
    #[serde(default = "default_region")]
    pub region: String,

    /// Key prefix for backup objects within the bucket ("" for the root).
    #[serde(default)]
    pub prefix: String,
}

impl Default for BackupConfig {
    fn default() -> Self {
        Self {
            account_id: String::new(),
            access_key_id: String::new(),
            secret_access_key: String::new(),
            bucket_name: default_bucket_name(),
            endpoint: String::new(),
            region: default_region(),
            prefix: String::new(),
        }
    }
}

impl BackupConfig {
    /// Check if the backup config has the minimum required fields.
    pub fn is_configured(&self) -> bool {
        !self.account_id.is_empty()
            && !self.access_key_id.is_empty()
            && !self.secret_access_key.is_empty()
            && !self.bucket_name.is_empty()
    }

    /// Build the endpoint URL.
    ///
    /// Returns the custom `endpoint` if set, otherwise builds the R2-style
    /// URL from `account_id`.
    pub fn endpoint_url(&self) -> String {
        if self.endpoint.is_empty() {
            format!("https://{}.r2.cloudflarestorage.com", self.account_id)
        } else {
            self.endpoint.clone()
        }
    }
}
