//! Source-index port: declared step patterns discovered in a codebase.

/// One annotated step-pattern declaration found in source code.
#[derive(Debug, Clone)]
pub struct StepDeclaration {
    /// The declared step pattern, possibly containing placeholders.
    pub pattern: String,
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
    /// The declaring method's raw text, when available.
    pub method_text: String,
}

/// Enumerates step-pattern declarations known to an external code index.
///
/// Building and querying the index is out of scope here; implementations
/// wrap whatever index the host environment provides.
pub trait SourceIndex: Send + Sync {
    /// Returns every known step declaration.
    ///
    /// # Errors
    ///
    /// Returns an error if the index cannot be queried.
    fn step_declarations(
        &self,
    ) -> Result<Vec<StepDeclaration>, Box<dyn std::error::Error + Send + Sync>>;
}
