//! Universal fallback strategy: accepts everything, degrades to echoing
//! the raw input when no structure can be isolated.

use std::sync::LazyLock;

use regex::Regex;

use crate::failure::strategy::{is_frame_line, ParseError, ParsingStrategy};
use crate::failure::{FailureRecord, FailureRecordBuilder};

/// `qualified.ExceptionName: message` split on a single line.
static TYPED_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([\w.$]+(?:Exception|Error|Failure)):\s*(.+)$").expect("typed pattern is valid")
});

/// The terminal strategy. Never declines, never fails extraction.
pub struct FallbackStrategy;

impl FallbackStrategy {
    /// Shared priority constant, lowest in the chain.
    pub const PRIORITY: u8 = 10;
    /// Message used when the input yields no usable line at all.
    pub const GENERIC_MESSAGE: &'static str = "unrecognized failure output";
}

impl ParsingStrategy for FallbackStrategy {
    fn can_handle(&self, _text: &str) -> bool {
        true
    }

    fn parse(&self, text: &str) -> Result<FailureRecord, ParseError> {
        self.gate(text)?;

        // First line that is neither blank nor shaped like a stack frame
        // is the best candidate for a message.
        let candidate =
            text.lines().map(str::trim).find(|line| !line.is_empty() && !is_frame_line(line));

        let message = match candidate {
            Some(line) => TYPED_LINE
                .captures(line)
                .map_or_else(|| line.to_string(), |caps| caps[2].to_string()),
            None => Self::GENERIC_MESSAGE.to_string(),
        };

        // The raw input is preserved verbatim as the stack trace.
        Ok(FailureRecordBuilder::new(self.name(), text).error_message(message).build())
    }

    fn priority(&self) -> u8 {
        Self::PRIORITY
    }

    fn name(&self) -> &'static str {
        "fallback"
    }
}
