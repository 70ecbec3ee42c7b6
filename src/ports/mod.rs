//! Port traits defining external boundaries.
//!
//! Each trait represents a boundary between the classification core and
//! an externally supplied collaborator (the feature-document corpus, the
//! source-code index). Implementations live in `src/adapters/`.

pub mod corpus;
pub mod source_index;

pub use corpus::{FeatureCorpus, FeatureDocument};
pub use source_index::{SourceIndex, StepDeclaration};
