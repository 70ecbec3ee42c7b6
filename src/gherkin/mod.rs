//! Scenario records and the line-level vocabulary of feature documents.
//!
//! The locator works on plain text, one top-to-bottom pass per document;
//! the helpers here classify individual lines (headers, steps, tags,
//! table rows) without building a full syntax tree.

pub mod locator;
pub mod matcher;

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Leading grammatical keywords a step phrase may start with.
pub(crate) const STEP_KEYWORDS: &[&str] = &["Given", "When", "Then", "And", "But", "*"];

/// Structured result of locating the scenario that declared a failed step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioRecord {
    /// Name of the enclosing feature.
    pub feature_name: String,
    /// Name of the scenario (the template name for outlines).
    pub scenario_name: String,
    /// Step phrases in declaration order, background steps prepended.
    pub steps: Vec<String>,
    /// Tags attached to the scenario, without ordering.
    pub tags: BTreeSet<String>,
    /// Path or display name of the feature document.
    pub source_file: String,
    /// One-based line of the scenario header.
    pub line: u32,
    /// The scenario's full text as it appears in the document.
    pub text: String,
    /// Raw background lines, verbatim.
    pub background_text: String,
    /// Raw data-table rows belonging to the scenario's steps.
    pub data_table_rows: Vec<String>,
    /// Parsed examples-table rows; retained only for outlines.
    pub examples: Vec<Vec<String>>,
    /// `true` when the scenario is an outline with templated steps.
    pub is_outline: bool,
}

/// Tokenizes a tag line (`@smoke @login`) into its tags. Returns an empty
/// vector for lines not starting with the tag sigil.
pub(crate) fn parse_tags(line: &str) -> Vec<String> {
    let trimmed = line.trim();
    if !trimmed.starts_with('@') {
        return Vec::new();
    }
    trimmed
        .split_whitespace()
        .filter(|token| token.starts_with('@'))
        .map(ToString::to_string)
        .collect()
}

/// Splits a table row (`| a | b |`) on the column delimiter, trimming
/// cells and discarding empty ones.
pub(crate) fn parse_table_row(line: &str) -> Vec<String> {
    line.trim()
        .split('|')
        .map(str::trim)
        .filter(|cell| !cell.is_empty())
        .map(ToString::to_string)
        .collect()
}

/// Returns `true` when the line is a table row.
pub(crate) fn is_table_row(line: &str) -> bool {
    line.trim().starts_with('|')
}

/// Returns `true` when the line is a step (starts with a step keyword).
pub(crate) fn is_step_line(line: &str) -> bool {
    let trimmed = line.trim();
    STEP_KEYWORDS.iter().any(|keyword| {
        trimmed
            .strip_prefix(keyword)
            .is_some_and(|rest| rest.is_empty() || rest.starts_with(char::is_whitespace))
    })
}

/// Extracts the name from a `Prefix: name` header line.
pub(crate) fn header_value<'a>(line: &'a str, prefix: &str) -> Option<&'a str> {
    line.trim().strip_prefix(prefix)?.strip_prefix(':').map(str::trim)
}

/// Recognizes a scenario header; returns the name and whether it opens an
/// outline.
pub(crate) fn scenario_header(line: &str) -> Option<(String, bool)> {
    if let Some(name) = header_value(line, "Scenario Outline") {
        return Some((name.to_string(), true));
    }
    if let Some(name) = header_value(line, "Scenario Template") {
        return Some((name.to_string(), true));
    }
    if let Some(name) = header_value(line, "Scenario") {
        return Some((name.to_string(), false));
    }
    None
}

/// Returns `true` for an `Examples:` (or legacy `Scenarios:`) header.
pub(crate) fn is_examples_header(line: &str) -> bool {
    header_value(line, "Examples").is_some() || header_value(line, "Scenarios").is_some()
}
