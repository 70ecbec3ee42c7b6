//! Configuration/resource-error strategy: missing files, unresolvable
//! configuration keys, and container wiring failures.

use std::sync::LazyLock;

use regex::Regex;

use crate::failure::strategies::browser::looks_like_browser;
use crate::failure::strategy::{first_user_frame, ParseError, ParsingStrategy};
use crate::failure::{AssertionKind, FailureRecord, FailureRecordBuilder};

/// Exception names and message fragments that mark a resource failure.
const MARKERS: &[&str] = &[
    "FileNotFoundException",
    "NoSuchFileException",
    "MissingResourceException",
    "NoSuchBeanDefinitionException",
    "BeanCreationException",
    "UnsatisfiedDependencyException",
    "ConfigurationException",
    "Could not resolve placeholder",
    "No such file or directory",
    "resource not found",
    "Missing required configuration",
];

/// A double-quoted substring.
static DOUBLE_QUOTED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""([^"]+)""#).expect("quote pattern is valid"));

/// A single-quoted substring. The opening quote must sit at a boundary so
/// an apostrophe inside a word (`Can't`) never opens a capture.
static SINGLE_QUOTED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:^|[\s:=(\[])'([^']+)'").expect("quote pattern is valid"));

/// A `key=value` fragment, e.g. `spring.datasource.url=jdbc:...`.
static KEY_VALUE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b([A-Za-z_][\w.-]*)=(\S+)").expect("kv pattern is valid"));

/// `SomeException: /path/to/resource (No such file or directory)` — the
/// parenthesized suffix is OS noise, the path is the resource.
static PATH_WITH_SUFFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"Exception:\s*(.+?)\s*\((?:No such file|Access denied|Permission denied)")
        .expect("suffix pattern is valid")
});

/// Recognizes resource/configuration failures and extracts the name of
/// the resource being referenced.
pub struct ResourceErrorStrategy;

impl ResourceErrorStrategy {
    /// Shared priority constant.
    pub const PRIORITY: u8 = 75;
}

/// Returns `true` when the text carries a resource-failure marker.
pub(crate) fn looks_like_resource(text: &str) -> bool {
    MARKERS.iter().any(|marker| text.contains(marker))
}

/// Ordered extraction heuristics: quoted substring, then `key=value`,
/// then exception-specific suffix stripping.
fn extract_resource_name(text: &str) -> Option<String> {
    if let Some(caps) = DOUBLE_QUOTED.captures(text) {
        return Some(caps[1].to_string());
    }
    if let Some(caps) = SINGLE_QUOTED.captures(text) {
        return Some(caps[1].to_string());
    }
    if let Some(caps) = KEY_VALUE.captures(text) {
        return Some(format!("{}={}", &caps[1], &caps[2]));
    }
    if let Some(caps) = PATH_WITH_SUFFIX.captures(text) {
        return Some(caps[1].to_string());
    }
    None
}

impl ParsingStrategy for ResourceErrorStrategy {
    fn can_handle(&self, text: &str) -> bool {
        // Browser-automation traces may mention missing resources; that
        // family is owned by the browser strategy.
        looks_like_resource(text) && !looks_like_browser(text)
    }

    fn parse(&self, text: &str) -> Result<FailureRecord, ParseError> {
        self.gate(text)?;

        // Claiming without a recoverable resource name is an extraction
        // failure; the classifier demotes to the next strategy.
        let resource = extract_resource_name(text).ok_or_else(|| ParseError::Extraction {
            strategy: self.name(),
            reason: "no resource name found".to_string(),
        })?;

        let mut builder = FailureRecordBuilder::new(self.name(), text)
            .error_message(resource)
            .kind(AssertionKind::Resource);
        if let Some((file, line)) = first_user_frame(text) {
            builder = builder.location(file, line);
        }
        Ok(builder.build())
    }

    fn priority(&self) -> u8 {
        Self::PRIORITY
    }

    fn name(&self) -> &'static str {
        "resource-error"
    }
}

#[cfg(test)]
mod tests {
    use super::{ParsingStrategy, ResourceErrorStrategy};
    use crate::failure::strategy::ParseError;
    use crate::failure::AssertionKind;

    #[test]
    fn quoted_resource_name_wins() {
        let text = "java.util.MissingResourceException: Can't find bundle 'messages_en'";
        let record = ResourceErrorStrategy.parse(text).unwrap();

        assert_eq!(record.error_message.as_deref(), Some("messages_en"));
        assert_eq!(record.assertion_kind, AssertionKind::Resource);
    }

    #[test]
    fn apostrophe_inside_a_word_does_not_open_a_capture() {
        let text = "java.util.MissingResourceException: Can't find bundle 'messages_en'";
        let record = ResourceErrorStrategy.parse(text).unwrap();

        assert_eq!(record.error_message.as_deref(), Some("messages_en"));
    }

    #[test]
    fn double_quotes_take_precedence_over_single_quotes() {
        let text = "ConfigurationException: Couldn't load \"app.yaml\" from 'config'";
        let record = ResourceErrorStrategy.parse(text).unwrap();

        assert_eq!(record.error_message.as_deref(), Some("app.yaml"));
    }

    #[test]
    fn key_value_pattern_is_second_choice() {
        let text = "ConfigurationException: Could not resolve placeholder db.url=jdbc:postgres://x";
        let record = ResourceErrorStrategy.parse(text).unwrap();

        assert_eq!(record.error_message.as_deref(), Some("db.url=jdbc:postgres://x"));
    }

    #[test]
    fn file_not_found_suffix_is_stripped() {
        let text = "java.io.FileNotFoundException: /etc/app/config.yaml (No such file or directory)";
        let record = ResourceErrorStrategy.parse(text).unwrap();

        assert_eq!(record.error_message.as_deref(), Some("/etc/app/config.yaml"));
    }

    #[test]
    fn claimed_text_without_resource_name_is_an_extraction_failure() {
        let text = "org.example.ConfigurationException";
        let err = ResourceErrorStrategy.parse(text).unwrap_err();

        assert!(matches!(err, ParseError::Extraction { strategy: "resource-error", .. }));
    }

    #[test]
    fn selenium_trace_is_left_to_the_browser_strategy() {
        let text = "org.openqa.selenium.NoSuchElementException: resource not found: #login";
        assert!(!ResourceErrorStrategy.can_handle(text));
    }
}
