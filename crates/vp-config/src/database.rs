//! Database location configuration.

use serde::{Deserialize, Serialize};

/// Default database file path, project-local.
fn default_path() -> String {
    String::from(".valoparc/valoparc.db")
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    /// Path to the libSQL database file. `":memory:"` for throwaway state.
    #[serde(default = "default_path")]
    pub path: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_project_local() {
        assert_eq!(DatabaseConfig::default().path, ".valoparc/valoparc.db");
    }
}
