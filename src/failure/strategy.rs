//! The parsing-strategy contract and helpers shared by all strategies.
//!
//! Each strategy pairs a cheap, side-effect-free detection predicate with
//! an extraction routine. The classifier runs predicates in priority order
//! and delegates extraction to the first claimant.

use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

use super::FailureRecord;

/// Faults raised by strategies and the classifier.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The input was empty or all whitespace. Always a caller bug; never
    /// recovered.
    #[error("failure text is empty")]
    EmptyInput,
    /// `parse` was invoked on input its `can_handle` declined. A
    /// programmer error: extraction must always be gated on the predicate.
    #[error("strategy `{strategy}` does not handle this input")]
    NotApplicable {
        /// The strategy that was misused.
        strategy: &'static str,
    },
    /// The strategy claimed the input but could not extract a full record.
    /// The classifier recovers by demoting to the next strategy.
    #[error("strategy `{strategy}` could not extract a record: {reason}")]
    Extraction {
        /// The strategy that failed.
        strategy: &'static str,
        /// Why extraction failed.
        reason: String,
    },
}

/// One member of the priority-ordered classification chain.
///
/// Implementations hold only compiled pattern tables after construction,
/// so a single instance is safe to share across threads.
pub trait ParsingStrategy: Send + Sync {
    /// Returns `true` if this strategy recognizes the given text.
    ///
    /// Must be side-effect free and use pattern matching only — it runs
    /// unconditionally against every candidate input.
    fn can_handle(&self, text: &str) -> bool;

    /// Extracts a structured record from text this strategy claimed.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::EmptyInput`] on empty text,
    /// [`ParseError::NotApplicable`] when called despite `can_handle`
    /// declining, and [`ParseError::Extraction`] when the claimed text
    /// resists extraction.
    fn parse(&self, text: &str) -> Result<FailureRecord, ParseError>;

    /// Fixed ranking; higher runs first.
    fn priority(&self) -> u8;

    /// Stable identifier stored in produced records.
    fn name(&self) -> &'static str;

    /// Shared precondition check for `parse` implementations.
    ///
    /// # Errors
    ///
    /// Returns the fault `parse` is documented to raise when its
    /// preconditions do not hold.
    fn gate(&self, text: &str) -> Result<(), ParseError> {
        if text.trim().is_empty() {
            return Err(ParseError::EmptyInput);
        }
        if !self.can_handle(text) {
            return Err(ParseError::NotApplicable { strategy: self.name() });
        }
        Ok(())
    }
}

/// A `at pkg.Class.method(File.java:123)` stack-frame line.
static FRAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*at\s+([\w$.<>/]+)\(([\w$.]+):(\d+)\)").expect("frame pattern is valid")
});

/// Package prefixes belonging to test frameworks and runtimes rather than
/// user code. Frames from these never count as the failure site.
const FRAMEWORK_PREFIXES: &[&str] = &[
    "org.junit",
    "junit.",
    "org.testng",
    "io.cucumber",
    "cucumber.",
    "gherkin.",
    "org.openqa.selenium",
    "java.",
    "javax.",
    "jdk.",
    "sun.",
    "com.sun.",
    "org.gradle",
    "worker.org.gradle",
    "org.apache.maven",
];

/// Returns `true` when the line is shaped like a stack-frame entry,
/// including frames without a resolvable source file.
pub(crate) fn is_frame_line(line: &str) -> bool {
    let trimmed = line.trim_start();
    trimmed.starts_with("at ") || trimmed.starts_with("Caused by:") || trimmed.starts_with("... ")
}

/// Finds the first stack frame that does not belong to a framework
/// package and returns its source file and line number.
pub(crate) fn first_user_frame(text: &str) -> Option<(String, u32)> {
    for line in text.lines() {
        let Some(caps) = FRAME.captures(line) else { continue };
        let method = &caps[1];
        if FRAMEWORK_PREFIXES.iter().any(|prefix| method.starts_with(prefix)) {
            continue;
        }
        let file = caps[2].to_string();
        let line_number = caps[3].parse::<u32>().ok()?;
        return Some((file, line_number));
    }
    None
}
