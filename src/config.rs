//! Project configuration loaded from `.triage.yaml`.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Where and what to scan when locating scenarios.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriageConfig {
    /// Directories to walk for feature documents.
    #[serde(default = "default_feature_dirs")]
    pub feature_dirs: Vec<String>,
    /// File extensions treated as feature documents.
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
    /// Optional path to a YAML step-declaration index.
    #[serde(default)]
    pub step_index: Option<String>,
}

fn default_feature_dirs() -> Vec<String> {
    vec!["features".to_string()]
}

fn default_extensions() -> Vec<String> {
    vec!["feature".to_string()]
}

impl Default for TriageConfig {
    fn default() -> Self {
        Self {
            feature_dirs: default_feature_dirs(),
            extensions: default_extensions(),
            step_index: None,
        }
    }
}

impl TriageConfig {
    /// Loads configuration from `.triage.yaml` under `dir`, falling back
    /// to defaults when the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error string when the file exists but cannot be read or
    /// parsed.
    pub fn load(dir: &Path) -> Result<Self, String> {
        let path = dir.join(".triage.yaml");
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(&path)
            .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
        serde_yaml::from_str(&content)
            .map_err(|e| format!("Failed to parse config {}: {e}", path.display()))
    }
}
