//! Proof document storage configuration.

use serde::{Deserialize, Serialize};

/// Default document root, project-local.
fn default_root() -> String {
    String::from(".valoparc/documents")
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DocumentsConfig {
    /// Root directory for uploaded proof documents. Per-student
    /// subdirectories are created underneath.
    #[serde(default = "default_root")]
    pub root: String,
}

impl Default for DocumentsConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_project_local() {
        assert_eq!(DocumentsConfig::default().root, ".valoparc/documents");
    }
}
