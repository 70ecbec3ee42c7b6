//! Structured failure records produced by the classification pipeline.
//!
//! A [`FailureRecord`] is assembled exactly once per classification call
//! through [`FailureRecordBuilder`] and is immutable afterwards — callers
//! receive an owned value and no shared state survives the call.

pub mod classifier;
pub mod strategies;
pub mod strategy;

use serde::{Deserialize, Serialize};

/// Category tag describing what kind of failure a record represents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssertionKind {
    /// An expected/actual comparison assertion.
    Comparison,
    /// A behavior-framework step that has no matching definition.
    UndefinedStep,
    /// A behavior-framework step matched by more than one definition.
    AmbiguousStep,
    /// A behavior-framework step marked pending.
    PendingStep,
    /// A general language-level runtime fault.
    Runtime,
    /// A missing or misconfigured file, resource, or configuration entry.
    Resource,
    /// A browser-automation failure.
    Automation,
    /// Nothing more specific could be determined.
    #[default]
    Unknown,
}

/// A structured note recorded while classifying, e.g. a strategy that
/// claimed the input but failed extraction and was skipped.
///
/// Diagnostics ride along inside the record instead of going to a
/// process-wide logger, so the caller decides how to surface them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Name of the strategy the note concerns.
    pub strategy: String,
    /// What happened.
    pub message: String,
}

/// Immutable structured result of classifying one piece of failure text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailureRecord {
    /// The extracted error message, when one could be isolated.
    pub error_message: Option<String>,
    /// Raw diagnostic text. Always populated; falls back to the original
    /// input verbatim when no narrower trace could be extracted.
    pub stack_trace: String,
    /// Expected value, for comparison failures only.
    pub expected: Option<String>,
    /// Actual value, for comparison failures only.
    pub actual: Option<String>,
    /// Category of the failure.
    pub assertion_kind: AssertionKind,
    /// The failed step phrase, for step-style failures only.
    pub failed_step: Option<String>,
    /// Best-effort source file of the failure site.
    pub source_file: Option<String>,
    /// Best-effort line number of the failure site.
    pub line: Option<u32>,
    /// Qualified name of the step-definition method, when resolved.
    pub step_definition_method: Option<String>,
    /// Name of the strategy that produced this record. Never empty.
    pub parsing_strategy: String,
    /// Wall-clock time the whole classification took.
    pub parsing_duration_millis: u64,
    /// Notes accumulated during classification (demoted strategies etc.).
    pub diagnostics: Vec<Diagnostic>,
}

impl FailureRecord {
    /// Stamps timing and accumulated diagnostics onto a freshly built
    /// record. Part of record construction; only the classifier calls it.
    #[must_use]
    pub(crate) fn stamped(mut self, millis: u64, diagnostics: Vec<Diagnostic>) -> Self {
        self.parsing_duration_millis = millis;
        self.diagnostics = diagnostics;
        self
    }
}

/// Accumulator for building a [`FailureRecord`].
///
/// The strategy name and raw input are required up front so the two record
/// invariants (non-empty strategy name, non-empty stack trace) hold by
/// construction.
#[derive(Debug)]
pub struct FailureRecordBuilder {
    record: FailureRecord,
}

impl FailureRecordBuilder {
    /// Starts a record for `strategy`, with `raw` as the stack-trace
    /// fallback.
    #[must_use]
    pub fn new(strategy: &str, raw: &str) -> Self {
        Self {
            record: FailureRecord {
                error_message: None,
                stack_trace: raw.to_string(),
                expected: None,
                actual: None,
                assertion_kind: AssertionKind::Unknown,
                failed_step: None,
                source_file: None,
                line: None,
                step_definition_method: None,
                parsing_strategy: strategy.to_string(),
                parsing_duration_millis: 0,
                diagnostics: Vec::new(),
            },
        }
    }

    /// Sets the extracted error message.
    #[must_use]
    pub fn error_message(mut self, message: impl Into<String>) -> Self {
        self.record.error_message = Some(message.into());
        self
    }

    /// Replaces the stack-trace fallback with a narrower extracted trace.
    #[must_use]
    pub fn stack_trace(mut self, trace: impl Into<String>) -> Self {
        self.record.stack_trace = trace.into();
        self
    }

    /// Sets the expected/actual pair of a comparison failure.
    #[must_use]
    pub fn comparison(mut self, expected: impl Into<String>, actual: impl Into<String>) -> Self {
        self.record.expected = Some(expected.into());
        self.record.actual = Some(actual.into());
        self
    }

    /// Sets the failure category.
    #[must_use]
    pub fn kind(mut self, kind: AssertionKind) -> Self {
        self.record.assertion_kind = kind;
        self
    }

    /// Sets the failed step phrase.
    #[must_use]
    pub fn failed_step(mut self, step: impl Into<String>) -> Self {
        self.record.failed_step = Some(step.into());
        self
    }

    /// Sets the best-effort source location.
    #[must_use]
    pub fn location(mut self, file: impl Into<String>, line: u32) -> Self {
        self.record.source_file = Some(file.into());
        self.record.line = Some(line);
        self
    }

    /// Sets the resolved step-definition method.
    #[must_use]
    pub fn step_definition_method(mut self, method: impl Into<String>) -> Self {
        self.record.step_definition_method = Some(method.into());
        self
    }

    /// Finishes the record. The value is immutable from here on.
    #[must_use]
    pub fn build(self) -> FailureRecord {
        self.record
    }
}
