//! Live adapters for real external interactions.

pub mod corpus;
pub mod source_index;

pub use corpus::DirectoryCorpus;
pub use source_index::YamlSourceIndex;
