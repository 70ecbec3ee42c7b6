//! Reconciling concrete runtime step phrases against templated step text
//! containing `<name>`-style placeholders.

use std::sync::LazyLock;

use regex::Regex;

use super::STEP_KEYWORDS;

/// A `<name>` placeholder inside templated step text.
static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^<>]+>").expect("placeholder pattern is valid"));

/// Strips one leading grammatical keyword (`Given`, `When`, ...) from a
/// step phrase, so templates and runtime phrases compare on their bodies.
#[must_use]
pub fn strip_keyword(step: &str) -> &str {
    let trimmed = step.trim();
    for keyword in STEP_KEYWORDS {
        if let Some(rest) = trimmed.strip_prefix(keyword) {
            if rest.is_empty() {
                return rest;
            }
            if rest.starts_with(char::is_whitespace) {
                return rest.trim_start();
            }
        }
    }
    trimmed
}

/// Returns `true` when the templated step contains placeholders.
#[must_use]
pub fn has_placeholders(template: &str) -> bool {
    PLACEHOLDER.is_match(template)
}

/// Counts the placeholders in a templated step.
#[must_use]
pub fn placeholder_count(template: &str) -> usize {
    PLACEHOLDER.find_iter(template).count()
}

/// Names of the placeholders in a templated step, in order.
#[must_use]
pub fn placeholder_names(template: &str) -> Vec<String> {
    PLACEHOLDER
        .find_iter(template)
        .map(|found| found.as_str().trim_matches(['<', '>']).to_string())
        .collect()
}

/// Decides whether a concrete runtime step phrase is an instantiation of
/// a templated step.
///
/// Both sides are compared without their leading keyword. Templates
/// without placeholders match by equality or substring containment.
/// Templates with placeholders are rewritten into an anchored pattern in
/// which each placeholder matches any run of characters not containing a
/// quote; a pattern that fails to compile is treated as a non-match
/// rather than an error.
#[must_use]
pub fn step_matches(template: &str, concrete: &str) -> bool {
    let template_body = strip_keyword(template);
    let concrete_body = strip_keyword(concrete);
    if template_body.is_empty() || concrete_body.is_empty() {
        return false;
    }

    if !has_placeholders(template_body) {
        return template_body == concrete_body
            || template_body.contains(concrete_body)
            || concrete_body.contains(template_body);
    }

    let mut pattern = String::from("^");
    let mut rest = template_body;
    while let Some(found) = PLACEHOLDER.find(rest) {
        pattern.push_str(&regex::escape(&rest[..found.start()]));
        pattern.push_str("[^\"]*");
        rest = &rest[found.end()..];
    }
    pattern.push_str(&regex::escape(rest));
    pattern.push('$');

    Regex::new(&pattern).is_ok_and(|compiled| compiled.is_match(concrete_body))
}
