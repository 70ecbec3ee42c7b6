//! Runtime-fault strategy: general language-level exceptions that no
//! more specific family owns.

use std::sync::LazyLock;

use regex::Regex;

use crate::failure::strategies::browser::looks_like_browser;
use crate::failure::strategies::comparison::looks_like_comparison;
use crate::failure::strategies::resource::looks_like_resource;
use crate::failure::strategies::step::looks_like_step_error;
use crate::failure::strategy::{first_user_frame, ParseError, ParsingStrategy};
use crate::failure::{AssertionKind, FailureRecord, FailureRecordBuilder};

/// Language-level exception simple names this strategy claims.
const EXCEPTIONS: &[&str] = &[
    "NullPointerException",
    "IndexOutOfBoundsException",
    "ArrayIndexOutOfBoundsException",
    "StringIndexOutOfBoundsException",
    "IllegalStateException",
    "IllegalArgumentException",
    "ClassCastException",
    "ArithmeticException",
    "NumberFormatException",
    "ConcurrentModificationException",
    "UnsupportedOperationException",
    "StackOverflowError",
    "OutOfMemoryError",
];

/// `Exception in thread "main" qualified.Name: message` preamble.
static THREAD_PREAMBLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"Exception in thread "[^"]*"\s+([\w.$]+)"#).expect("preamble pattern is valid")
});

/// `qualified.Name: message` head of a trace, for message extraction.
/// The non-empty prefix keeps the bare word `Exception` (as in the
/// thread preamble) from matching on its own.
static EXCEPTION_HEAD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([\w.$]+(?:Exception|Error))(?::\s*(.*))?").expect("head pattern is valid")
});

/// Recognizes general runtime faults: NPEs, bounds errors, cast errors,
/// and the other `java.lang` staples.
pub struct RuntimeFaultStrategy;

impl RuntimeFaultStrategy {
    /// Shared priority constant.
    pub const PRIORITY: u8 = 80;
}

impl ParsingStrategy for RuntimeFaultStrategy {
    fn can_handle(&self, text: &str) -> bool {
        let claimed_elsewhere = looks_like_comparison(text)
            || looks_like_step_error(text)
            || looks_like_resource(text)
            || looks_like_browser(text);
        if claimed_elsewhere {
            return false;
        }
        EXCEPTIONS.iter().any(|name| text.contains(name)) || THREAD_PREAMBLE.is_match(text)
    }

    fn parse(&self, text: &str) -> Result<FailureRecord, ParseError> {
        self.gate(text)?;

        // First line naming an exception carries the type and message.
        let head = text
            .lines()
            .find_map(|line| EXCEPTION_HEAD.captures(line))
            .ok_or_else(|| ParseError::Extraction {
                strategy: self.name(),
                reason: "no exception head line found".to_string(),
            })?;

        let qualified = head[1].to_string();
        let simple = qualified.rsplit('.').next().unwrap_or(&qualified).to_string();
        let message = head
            .get(2)
            .map(|group| group.as_str().trim())
            .filter(|body| !body.is_empty())
            .map_or_else(|| simple.clone(), ToString::to_string);

        let mut builder = FailureRecordBuilder::new(self.name(), text)
            .error_message(message)
            .kind(AssertionKind::Runtime);
        if let Some((file, line)) = first_user_frame(text) {
            builder = builder.location(file, line);
        }
        Ok(builder.build())
    }

    fn priority(&self) -> u8 {
        Self::PRIORITY
    }

    fn name(&self) -> &'static str {
        "runtime-fault"
    }
}

#[cfg(test)]
mod tests {
    use super::{ParsingStrategy, RuntimeFaultStrategy};
    use crate::failure::AssertionKind;

    #[test]
    fn claims_plain_npe() {
        assert!(RuntimeFaultStrategy
            .can_handle("java.lang.NullPointerException: user must not be null"));
    }

    #[test]
    fn claims_thread_preamble_form() {
        assert!(RuntimeFaultStrategy
            .can_handle("Exception in thread \"main\" com.example.AppError: boom"));
    }

    #[test]
    fn defers_to_the_comparison_family() {
        let text = "java.lang.IllegalStateException: expected:<a> but was:<b>";
        assert!(!RuntimeFaultStrategy.can_handle(text));
    }

    #[test]
    fn defers_to_the_resource_family() {
        let text = "java.lang.IllegalStateException: BeanCreationException while wiring";
        assert!(!RuntimeFaultStrategy.can_handle(text));
    }

    #[test]
    fn extracts_message_and_user_frame() {
        let text = "java.lang.NullPointerException: user must not be null\n\
                    \tat java.base/java.util.Objects.requireNonNull(Objects.java:233)\n\
                    \tat com.shop.CartService.add(CartService.java:57)";
        let record = RuntimeFaultStrategy.parse(text).unwrap();

        assert_eq!(record.error_message.as_deref(), Some("user must not be null"));
        assert_eq!(record.assertion_kind, AssertionKind::Runtime);
        assert_eq!(record.source_file.as_deref(), Some("CartService.java"));
        assert_eq!(record.line, Some(57));
    }

    #[test]
    fn thread_preamble_does_not_hide_the_real_exception() {
        let record = RuntimeFaultStrategy
            .parse("Exception in thread \"main\" java.lang.IllegalStateException: already closed")
            .unwrap();
        assert_eq!(record.error_message.as_deref(), Some("already closed"));
    }

    #[test]
    fn messageless_exception_reports_its_simple_name() {
        let record = RuntimeFaultStrategy.parse("java.lang.StackOverflowError").unwrap();
        assert_eq!(record.error_message.as_deref(), Some("StackOverflowError"));
    }
}
