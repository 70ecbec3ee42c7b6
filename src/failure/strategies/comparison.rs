//! Comparison-assertion strategy: `expected:<x> but was:<y>` shapes.

use std::sync::LazyLock;

use regex::Regex;

use crate::failure::strategy::{first_user_frame, ParseError, ParsingStrategy};
use crate::failure::{AssertionKind, FailureRecord, FailureRecordBuilder};

/// Expected/actual shapes emitted by the common assertion libraries, in
/// the order they are tried during extraction.
static SHAPES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        // JUnit 4 ComparisonFailure and JUnit 5 AssertionFailedError.
        r"expected:\s*<(.*?)>\s+but was:\s*<(.*?)>",
        // TestNG.
        r"expected \[(.*?)\] but found \[(.*?)\]",
        // AssertJ (message spans lines).
        r"(?s)expecting:?\s*<(.*?)>\s*to be equal to:\s*<(.*?)>",
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).expect("comparison pattern is valid"))
    .collect()
});

/// Recognizes and extracts expected/actual comparison failures.
pub struct ComparisonStrategy;

impl ComparisonStrategy {
    /// Shared priority constant, highest in the chain.
    pub const PRIORITY: u8 = 100;
}

/// Returns `true` when the text carries an expected/actual shape. Used by
/// lower-priority predicates to stay out of this strategy's territory.
pub(crate) fn looks_like_comparison(text: &str) -> bool {
    SHAPES.iter().any(|shape| shape.is_match(text))
}

impl ParsingStrategy for ComparisonStrategy {
    fn can_handle(&self, text: &str) -> bool {
        looks_like_comparison(text)
    }

    fn parse(&self, text: &str) -> Result<FailureRecord, ParseError> {
        self.gate(text)?;

        let caps = SHAPES
            .iter()
            .find_map(|shape| shape.captures(text))
            .ok_or_else(|| ParseError::Extraction {
                strategy: self.name(),
                reason: "no expected/actual pair found".to_string(),
            })?;

        let message = text.lines().find(|line| !line.trim().is_empty()).unwrap_or(text).trim();
        let mut builder = FailureRecordBuilder::new(self.name(), text)
            .error_message(message)
            .comparison(&caps[1], &caps[2])
            .kind(AssertionKind::Comparison);
        if let Some((file, line)) = first_user_frame(text) {
            builder = builder.location(file, line);
        }
        Ok(builder.build())
    }

    fn priority(&self) -> u8 {
        Self::PRIORITY
    }

    fn name(&self) -> &'static str {
        "comparison-assertion"
    }
}
