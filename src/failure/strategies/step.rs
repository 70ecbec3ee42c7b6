//! Behavior-framework step-error strategy: undefined, ambiguous, and
//! pending step exceptions.

use std::sync::LazyLock;

use regex::Regex;

use crate::failure::strategy::{first_user_frame, ParseError, ParsingStrategy};
use crate::failure::{AssertionKind, FailureRecord, FailureRecordBuilder};

/// Markers that identify a step-level failure, paired with the category
/// they imply. Checked in order; the first hit decides the category.
const MARKERS: &[(&str, AssertionKind)] = &[
    ("UndefinedStepException", AssertionKind::UndefinedStep),
    ("is undefined", AssertionKind::UndefinedStep),
    ("undefined step", AssertionKind::UndefinedStep),
    ("AmbiguousStepDefinitionsException", AssertionKind::AmbiguousStep),
    ("matches more than one step definition", AssertionKind::AmbiguousStep),
    ("ambiguous step", AssertionKind::AmbiguousStep),
    ("PendingException", AssertionKind::PendingStep),
    ("step is pending", AssertionKind::PendingStep),
];

/// Step text quoted with double quotes or wrapped in square brackets.
static QUOTED_STEP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""([^"]+)"|\[([^\]]+)\]"#).expect("step pattern is valid"));

/// Recognizes step exceptions and pulls out the failed step phrase.
pub struct StepErrorStrategy;

impl StepErrorStrategy {
    /// Shared priority constant.
    pub const PRIORITY: u8 = 85;
}

/// Returns `true` when the text carries a step-exception marker.
pub(crate) fn looks_like_step_error(text: &str) -> bool {
    let lowered = text.to_lowercase();
    MARKERS.iter().any(|(marker, _)| lowered.contains(&marker.to_lowercase()))
}

impl ParsingStrategy for StepErrorStrategy {
    fn can_handle(&self, text: &str) -> bool {
        looks_like_step_error(text)
    }

    fn parse(&self, text: &str) -> Result<FailureRecord, ParseError> {
        self.gate(text)?;

        let lowered = text.to_lowercase();
        let kind = MARKERS
            .iter()
            .find(|(marker, _)| lowered.contains(&marker.to_lowercase()))
            .map_or(AssertionKind::UndefinedStep, |(_, kind)| *kind);

        let first_line = text.lines().find(|line| !line.trim().is_empty()).unwrap_or(text).trim();
        // Quoted or bracketed step text wins; otherwise the first
        // non-blank line stands in for the step phrase.
        let step = QUOTED_STEP
            .captures(text)
            .and_then(|caps| caps.get(1).or_else(|| caps.get(2)))
            .map_or(first_line, |group| group.as_str());

        let mut builder = FailureRecordBuilder::new(self.name(), text)
            .error_message(first_line)
            .failed_step(step)
            .kind(kind);
        if let Some((file, line)) = first_user_frame(text) {
            builder = builder.location(file, line);
        }
        Ok(builder.build())
    }

    fn priority(&self) -> u8 {
        Self::PRIORITY
    }

    fn name(&self) -> &'static str {
        "step-error"
    }
}
