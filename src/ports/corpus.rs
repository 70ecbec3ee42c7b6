//! Feature-document corpus port.

/// One feature document: full text plus a display name or path.
#[derive(Debug, Clone)]
pub struct FeatureDocument {
    /// Display name or path of the document.
    pub name: String,
    /// The document's full text content.
    pub content: String,
}

/// Supplies the ordered sequence of feature documents to scan.
///
/// How the documents are acquired (filesystem walk, project index) is the
/// adapter's concern; the locator only iterates, in the order given.
pub trait FeatureCorpus: Send + Sync {
    /// Returns the documents in scan order.
    ///
    /// # Errors
    ///
    /// Returns an error if the corpus cannot be enumerated or read.
    fn documents(&self) -> Result<Vec<FeatureDocument>, Box<dyn std::error::Error + Send + Sync>>;
}
