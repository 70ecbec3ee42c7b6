//! The failure classifier: a priority-ordered chain of strategies with a
//! guaranteed terminal outcome.

use std::time::Instant;

use super::strategies::{default_strategies, fallback::FallbackStrategy};
use super::strategy::{ParseError, ParsingStrategy};
use super::{Diagnostic, FailureRecord, FailureRecordBuilder};

/// Classifies raw failure text by delegating to the first strategy whose
/// predicate claims it.
///
/// Strategies are sorted once at construction, by descending priority
/// with registration order breaking ties. Instances hold no mutable state
/// after construction and are safe to share across threads.
pub struct FailureClassifier {
    strategies: Vec<Box<dyn ParsingStrategy>>,
}

impl Default for FailureClassifier {
    fn default() -> Self {
        Self::new(default_strategies())
    }
}

impl FailureClassifier {
    /// Builds a classifier over the given strategies.
    #[must_use]
    pub fn new(mut strategies: Vec<Box<dyn ParsingStrategy>>) -> Self {
        strategies.sort_by(|a, b| b.priority().cmp(&a.priority()));
        Self { strategies }
    }

    /// The strategies in evaluation order.
    #[must_use]
    pub fn strategies(&self) -> &[Box<dyn ParsingStrategy>] {
        &self.strategies
    }

    /// Classifies one piece of failure text into a structured record.
    ///
    /// A strategy that claims the text but fails extraction does not
    /// abort classification: the fault is recorded as a diagnostic on the
    /// eventual record and the next strategy in priority order is tried.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::EmptyInput`] for empty or all-whitespace
    /// text. Every other input produces a record.
    pub fn classify(&self, text: &str) -> Result<FailureRecord, ParseError> {
        if text.trim().is_empty() {
            return Err(ParseError::EmptyInput);
        }

        let started = Instant::now();
        let mut diagnostics = Vec::new();

        for strategy in &self.strategies {
            if !strategy.can_handle(text) {
                continue;
            }
            match strategy.parse(text) {
                Ok(record) => {
                    let millis = elapsed_millis(started);
                    return Ok(record.stamped(millis, diagnostics));
                }
                Err(fault) => {
                    diagnostics.push(Diagnostic {
                        strategy: strategy.name().to_string(),
                        message: fault.to_string(),
                    });
                }
            }
        }

        // Unreachable with the default chain (the fallback never declines
        // and never fails), but the terminal branch exists and is tested.
        let record = FailureRecordBuilder::new(FallbackStrategy.name(), text)
            .error_message(FallbackStrategy::GENERIC_MESSAGE)
            .build();
        Ok(record.stamped(elapsed_millis(started), diagnostics))
    }
}

#[allow(clippy::cast_possible_truncation)]
fn elapsed_millis(started: Instant) -> u64 {
    started.elapsed().as_millis() as u64
}

#[cfg(test)]
mod tests {
    use super::{FailureClassifier, ParseError, ParsingStrategy};
    use crate::failure::strategies::fallback::FallbackStrategy;
    use crate::failure::{FailureRecord, FailureRecordBuilder};

    /// Claims everything, always fails extraction. Exercises demotion.
    struct AlwaysFailing;

    impl ParsingStrategy for AlwaysFailing {
        fn can_handle(&self, _text: &str) -> bool {
            true
        }

        fn parse(&self, _text: &str) -> Result<FailureRecord, ParseError> {
            Err(ParseError::Extraction {
                strategy: self.name(),
                reason: "always fails".to_string(),
            })
        }

        fn priority(&self) -> u8 {
            200
        }

        fn name(&self) -> &'static str {
            "always-failing"
        }
    }

    /// Claims everything at a configurable priority.
    struct Claiming {
        priority: u8,
        name: &'static str,
    }

    impl ParsingStrategy for Claiming {
        fn can_handle(&self, _text: &str) -> bool {
            true
        }

        fn parse(&self, text: &str) -> Result<FailureRecord, ParseError> {
            Ok(FailureRecordBuilder::new(self.name, text).build())
        }

        fn priority(&self) -> u8 {
            self.priority
        }

        fn name(&self) -> &'static str {
            self.name
        }
    }

    #[test]
    fn empty_input_is_rejected() {
        let classifier = FailureClassifier::default();
        assert!(matches!(classifier.classify("  \n ").unwrap_err(), ParseError::EmptyInput));
    }

    #[test]
    fn strategies_are_sorted_descending_by_priority() {
        let classifier = FailureClassifier::default();
        let priorities: Vec<_> = classifier.strategies().iter().map(|s| s.priority()).collect();
        let mut sorted = priorities.clone();
        sorted.sort_unstable_by(|a, b| b.cmp(a));
        assert_eq!(priorities, sorted);
    }

    #[test]
    fn higher_priority_claimant_wins() {
        let classifier = FailureClassifier::new(vec![
            Box::new(Claiming { priority: 20, name: "low" }),
            Box::new(Claiming { priority: 90, name: "high" }),
        ]);
        let record = classifier.classify("anything").unwrap();
        assert_eq!(record.parsing_strategy, "high");
    }

    #[test]
    fn registration_order_breaks_priority_ties() {
        let classifier = FailureClassifier::new(vec![
            Box::new(Claiming { priority: 50, name: "first" }),
            Box::new(Claiming { priority: 50, name: "second" }),
        ]);
        let record = classifier.classify("anything").unwrap();
        assert_eq!(record.parsing_strategy, "first");
    }

    #[test]
    fn extraction_failure_demotes_to_next_strategy_with_a_diagnostic() {
        let classifier = FailureClassifier::new(vec![
            Box::new(AlwaysFailing),
            Box::new(FallbackStrategy),
        ]);
        let record = classifier.classify("some failure text").unwrap();

        assert_eq!(record.parsing_strategy, "fallback");
        assert_eq!(record.diagnostics.len(), 1);
        assert_eq!(record.diagnostics[0].strategy, "always-failing");
    }

    #[test]
    fn exhausted_chain_still_produces_a_minimal_record() {
        let classifier = FailureClassifier::new(vec![Box::new(AlwaysFailing)]);
        let record = classifier.classify("some failure text").unwrap();

        assert_eq!(record.parsing_strategy, "fallback");
        assert_eq!(record.stack_trace, "some failure text");
        assert_eq!(
            record.error_message.as_deref(),
            Some(FallbackStrategy::GENERIC_MESSAGE)
        );
        assert_eq!(record.diagnostics.len(), 1);
    }

    #[test]
    fn garbled_text_lands_on_the_fallback_with_raw_input_preserved() {
        let classifier = FailureClassifier::default();
        let text = "garbled text with no exception shape";
        let record = classifier.classify(text).unwrap();

        assert_eq!(record.parsing_strategy, "fallback");
        assert_eq!(record.stack_trace, text);
    }
}
