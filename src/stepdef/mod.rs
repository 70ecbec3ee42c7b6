//! Mapping a failed step phrase to its declaring method.
//!
//! The heavy lifting — enumerating annotated step patterns in a codebase
//! — belongs to the [`SourceIndex`] port. This module only matches the
//! phrase against each candidate declaration and shapes the result.

use serde::{Deserialize, Serialize};

use crate::gherkin::matcher::{placeholder_names, step_matches};
use crate::ports::source_index::{SourceIndex, StepDeclaration};

/// Structured result of resolving a step phrase to its declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepDefinitionRecord {
    /// Name of the declaring method.
    pub method_name: String,
    /// Simple name of the declaring class.
    pub class_name: String,
    /// Package of the declaring class.
    pub package_name: String,
    /// Source file of the declaration.
    pub source_file: String,
    /// One-based line of the declaration.
    pub line: u32,
    /// The declared step pattern, possibly containing placeholders.
    pub step_pattern: String,
    /// Named parameters, one per placeholder in `step_pattern`, in order.
    pub parameters: Vec<String>,
    /// The declaring method's raw text.
    pub method_text: String,
}

impl StepDefinitionRecord {
    /// Builds a record from a declaration. Parameters are derived from
    /// the pattern's placeholders, so their count always agrees with the
    /// pattern.
    #[must_use]
    pub fn from_declaration(declaration: &StepDeclaration) -> Self {
        Self {
            method_name: declaration.method_name.clone(),
            class_name: declaration.class_name.clone(),
            package_name: declaration.package_name.clone(),
            source_file: declaration.source_file.clone(),
            line: declaration.line,
            step_pattern: declaration.pattern.clone(),
            parameters: placeholder_names(&declaration.pattern),
            method_text: declaration.method_text.clone(),
        }
    }

    /// The fully qualified `package.Class.method` name.
    #[must_use]
    pub fn qualified_method(&self) -> String {
        format!("{}.{}.{}", self.package_name, self.class_name, self.method_name)
    }
}

/// Resolves step phrases against an external source index.
pub struct StepDefinitionLocator<'a> {
    index: &'a dyn SourceIndex,
}

impl<'a> StepDefinitionLocator<'a> {
    /// Creates a locator over the given index.
    #[must_use]
    pub fn new(index: &'a dyn SourceIndex) -> Self {
        Self { index }
    }

    /// Finds the first declaration whose pattern matches the step phrase.
    ///
    /// Returns `Ok(None)` for empty phrases and when no declaration
    /// matches — absence is a normal outcome.
    ///
    /// # Errors
    ///
    /// Returns an error only when the index cannot be queried.
    pub fn locate(
        &self,
        step: &str,
    ) -> Result<Option<StepDefinitionRecord>, Box<dyn std::error::Error + Send + Sync>> {
        if step.trim().is_empty() {
            return Ok(None);
        }
        let found = self
            .index
            .step_declarations()?
            .iter()
            .find(|declaration| step_matches(&declaration.pattern, step))
            .map(StepDefinitionRecord::from_declaration);
        Ok(found)
    }
}
