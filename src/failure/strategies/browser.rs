//! Browser-automation strategy: a fixed set of WebDriver exception names.

use crate::failure::strategy::{first_user_frame, ParseError, ParsingStrategy};
use crate::failure::{AssertionKind, FailureRecord, FailureRecordBuilder};

/// Exception simple names that always mean browser automation.
const EXCEPTIONS: &[&str] = &[
    "ElementNotInteractableException",
    "ElementClickInterceptedException",
    "StaleElementReferenceException",
    "InvalidSelectorException",
    "SessionNotCreatedException",
    "WebDriverException",
    "MoveTargetOutOfBoundsException",
];

/// Names shared with other families; they count as browser automation
/// only alongside a WebDriver context marker.
const AMBIGUOUS_EXCEPTIONS: &[&str] = &["NoSuchElementException", "TimeoutException"];

const CONTEXT_MARKERS: &[&str] = &["org.openqa.selenium", "WebDriver", "Session info:"];

/// Trailing build/session metadata appended by Selenium to every message.
const MESSAGE_NOISE: &[&str] = &["\nBuild info:", "\nSession info:", "\nDriver info:", "\nSystem info:"];

/// Recognizes WebDriver failures and extracts their message body.
pub struct BrowserErrorStrategy;

impl BrowserErrorStrategy {
    /// Shared priority constant.
    pub const PRIORITY: u8 = 70;
}

/// Returns `true` when the text names a browser-automation exception.
pub(crate) fn looks_like_browser(text: &str) -> bool {
    if EXCEPTIONS.iter().any(|name| text.contains(name)) {
        return true;
    }
    AMBIGUOUS_EXCEPTIONS.iter().any(|name| text.contains(name))
        && CONTEXT_MARKERS.iter().any(|marker| text.contains(marker))
}

impl ParsingStrategy for BrowserErrorStrategy {
    fn can_handle(&self, text: &str) -> bool {
        looks_like_browser(text)
    }

    fn parse(&self, text: &str) -> Result<FailureRecord, ParseError> {
        self.gate(text)?;

        let matched = EXCEPTIONS
            .iter()
            .chain(AMBIGUOUS_EXCEPTIONS)
            .find(|name| text.contains(*name))
            .ok_or_else(|| ParseError::Extraction {
                strategy: self.name(),
                reason: "no known automation exception name".to_string(),
            })?;

        // Message body: everything after `Name:` up to the metadata noise
        // Selenium appends.
        let message = text
            .split_once(&format!("{matched}:"))
            .map_or_else(
                || text.lines().next().unwrap_or(text).to_string(),
                |(_, rest)| rest.to_string(),
            );
        let message = MESSAGE_NOISE
            .iter()
            .filter_map(|noise| message.split(noise).next())
            .min_by_key(|cut| cut.len())
            .unwrap_or(&message)
            .trim()
            .to_string();

        let mut builder = FailureRecordBuilder::new(self.name(), text)
            .error_message(message)
            .kind(AssertionKind::Automation);
        if let Some((file, line)) = first_user_frame(text) {
            builder = builder.location(file, line);
        }
        Ok(builder.build())
    }

    fn priority(&self) -> u8 {
        Self::PRIORITY
    }

    fn name(&self) -> &'static str {
        "browser-automation"
    }
}
