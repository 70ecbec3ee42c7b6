//! Live corpus adapter: a recursive walk over feature files on disk.

use std::path::{Path, PathBuf};

use crate::ports::corpus::{FeatureCorpus, FeatureDocument};

/// Serves feature documents from a directory tree.
///
/// Files are visited in lexicographic path order so "first document wins"
/// is stable across runs.
pub struct DirectoryCorpus {
    root: PathBuf,
    extensions: Vec<String>,
}

impl DirectoryCorpus {
    /// Creates a corpus rooted at `root`, keeping files whose extension
    /// appears in `extensions` (e.g. `["feature"]`).
    #[must_use]
    pub fn new(root: &Path, extensions: Vec<String>) -> Self {
        Self { root: root.to_path_buf(), extensions }
    }

    fn collect(
        &self,
        dir: &Path,
        found: &mut Vec<PathBuf>,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let mut entries: Vec<PathBuf> =
            std::fs::read_dir(dir)?.map(|entry| Ok(entry?.path())).collect::<Result<_, std::io::Error>>()?;
        entries.sort();
        for path in entries {
            if path.is_dir() {
                self.collect(&path, found)?;
            } else if self.wanted(&path) {
                found.push(path);
            }
        }
        Ok(())
    }

    fn wanted(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|extension| extension.to_str())
            .is_some_and(|extension| self.extensions.iter().any(|kept| kept == extension))
    }
}

impl FeatureCorpus for DirectoryCorpus {
    fn documents(&self) -> Result<Vec<FeatureDocument>, Box<dyn std::error::Error + Send + Sync>> {
        if !self.root.is_dir() {
            return Ok(Vec::new());
        }
        let mut paths = Vec::new();
        self.collect(&self.root, &mut paths)?;
        let mut documents = Vec::with_capacity(paths.len());
        for path in paths {
            let content = std::fs::read_to_string(&path)?;
            documents.push(FeatureDocument { name: path.display().to_string(), content });
        }
        Ok(documents)
    }
}

#[cfg(test)]
mod tests {
    use super::DirectoryCorpus;
    use crate::ports::corpus::FeatureCorpus;

    #[test]
    fn walks_recursively_in_lexicographic_order() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("auth")).unwrap();
        std::fs::write(dir.path().join("zoo.feature"), "Feature: Zoo").unwrap();
        std::fs::write(dir.path().join("auth/login.feature"), "Feature: Login").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "not a feature").unwrap();

        let corpus = DirectoryCorpus::new(dir.path(), vec!["feature".to_string()]);
        let documents = corpus.documents().unwrap();

        assert_eq!(documents.len(), 2);
        assert!(documents[0].name.ends_with("login.feature"));
        assert!(documents[1].name.ends_with("zoo.feature"));
        assert_eq!(documents[0].content, "Feature: Login");
    }

    #[test]
    fn missing_root_is_an_empty_corpus() {
        let corpus = DirectoryCorpus::new(
            std::path::Path::new("/nonexistent/features"),
            vec!["feature".to_string()],
        );
        assert!(corpus.documents().unwrap().is_empty());
    }
}
