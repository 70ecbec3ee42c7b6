//! YAML-backed source-index adapter.
//!
//! Stands in for a live code index: declarations are listed in a YAML
//! file, one entry per annotated step method.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::ports::source_index::{SourceIndex, StepDeclaration};

/// One declaration entry as written in the YAML index file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeclarationEntry {
    /// The declared step pattern.
    pub pattern: String,
    /// Name of the declaring method.
    pub method: String,
    /// Simple name of the declaring class.
    pub class: String,
    /// Package of the declaring class.
    #[serde(default)]
    pub package: String,
    /// Source file of the declaration.
    #[serde(default)]
    pub file: String,
    /// One-based line of the declaration.
    #[serde(default)]
    pub line: u32,
    /// The declaring method's raw text.
    #[serde(default)]
    pub text: String,
}

/// Serves step declarations from a YAML file on disk.
pub struct YamlSourceIndex {
    path: PathBuf,
}

impl YamlSourceIndex {
    /// Creates an index over the given YAML file.
    #[must_use]
    pub fn new(path: &Path) -> Self {
        Self { path: path.to_path_buf() }
    }
}

impl SourceIndex for YamlSourceIndex {
    fn step_declarations(
        &self,
    ) -> Result<Vec<StepDeclaration>, Box<dyn std::error::Error + Send + Sync>> {
        let content = std::fs::read_to_string(&self.path)
            .map_err(|e| format!("Failed to read step index {}: {e}", self.path.display()))?;
        let entries: Vec<DeclarationEntry> = serde_yaml::from_str(&content)
            .map_err(|e| format!("Failed to parse step index {}: {e}", self.path.display()))?;
        Ok(entries
            .into_iter()
            .map(|entry| StepDeclaration {
                pattern: entry.pattern,
                method_name: entry.method,
                class_name: entry.class,
                package_name: entry.package,
                source_file: entry.file,
                line: entry.line,
                method_text: entry.text,
            })
            .collect())
    }
}
