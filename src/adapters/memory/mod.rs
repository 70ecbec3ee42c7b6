//! In-memory adapters: deterministic substitutes for the live boundaries,
//! used by tests and by CLI flows that already hold the data.

use crate::ports::corpus::{FeatureCorpus, FeatureDocument};
use crate::ports::source_index::{SourceIndex, StepDeclaration};

/// A corpus served from memory, in insertion order.
pub struct InMemoryCorpus {
    documents: Vec<FeatureDocument>,
}

impl InMemoryCorpus {
    /// Builds a corpus from `(name, content)` pairs.
    #[must_use]
    pub fn new(documents: Vec<(&str, &str)>) -> Self {
        Self {
            documents: documents
                .into_iter()
                .map(|(name, content)| FeatureDocument {
                    name: name.to_string(),
                    content: content.to_string(),
                })
                .collect(),
        }
    }
}

impl FeatureCorpus for InMemoryCorpus {
    fn documents(&self) -> Result<Vec<FeatureDocument>, Box<dyn std::error::Error + Send + Sync>> {
        Ok(self.documents.clone())
    }
}

/// A source index served from memory.
pub struct InMemoryIndex {
    declarations: Vec<StepDeclaration>,
}

impl InMemoryIndex {
    /// Builds an index over the given declarations.
    #[must_use]
    pub fn new(declarations: Vec<StepDeclaration>) -> Self {
        Self { declarations }
    }
}

impl SourceIndex for InMemoryIndex {
    fn step_declarations(
        &self,
    ) -> Result<Vec<StepDeclaration>, Box<dyn std::error::Error + Send + Sync>> {
        Ok(self.declarations.clone())
    }
}
