//! Locating the scenario that declared a failed step.
//!
//! One top-to-bottom scan per document, maintaining running state for the
//! background buffer and the scenario being read; the previous scenario
//! is evaluated whenever a new header appears and once more at end of
//! document. The first match across the ordered corpus wins.

use std::collections::BTreeSet;

use super::matcher::step_matches;
use super::{
    header_value, is_examples_header, is_step_line, is_table_row, parse_table_row, parse_tags,
    scenario_header, ScenarioRecord,
};
use crate::ports::corpus::{FeatureCorpus, FeatureDocument};

/// Scans a feature-document corpus for the scenario containing a step.
///
/// Holds no state beyond the corpus reference; safe to call from multiple
/// threads.
pub struct ScenarioLocator<'a> {
    corpus: &'a dyn FeatureCorpus,
}

/// Scenario being accumulated during a document scan.
struct PendingScenario {
    name: String,
    is_outline: bool,
    header_line: u32,
    tags: BTreeSet<String>,
    steps: Vec<String>,
    data_rows: Vec<String>,
    examples: Vec<Vec<String>>,
    raw: Vec<String>,
}

impl PendingScenario {
    fn start(
        name: String,
        is_outline: bool,
        header_line: u32,
        tags: BTreeSet<String>,
        raw: &str,
    ) -> Self {
        Self {
            name,
            is_outline,
            header_line,
            tags,
            steps: Vec::new(),
            data_rows: Vec::new(),
            examples: Vec::new(),
            raw: vec![raw.to_string()],
        }
    }
}

impl<'a> ScenarioLocator<'a> {
    /// Creates a locator over the given corpus.
    #[must_use]
    pub fn new(corpus: &'a dyn FeatureCorpus) -> Self {
        Self { corpus }
    }

    /// Finds the first scenario, across the corpus in order, that both
    /// satisfies the optional name hint and contains the failed step.
    ///
    /// Returns `Ok(None)` for empty step text and when nothing matches —
    /// absence is a normal outcome, not a fault.
    ///
    /// # Errors
    ///
    /// Returns an error only when the corpus itself cannot be read.
    pub fn locate(
        &self,
        failed_step: &str,
        scenario_hint: Option<&str>,
    ) -> Result<Option<ScenarioRecord>, Box<dyn std::error::Error + Send + Sync>> {
        if failed_step.trim().is_empty() {
            return Ok(None);
        }
        for document in self.corpus.documents()? {
            if let Some(record) = scan_document(&document, failed_step, scenario_hint) {
                return Ok(Some(record));
            }
        }
        Ok(None)
    }
}

/// Scans one document; returns the first scenario satisfying both the
/// name hint and step membership.
fn scan_document(
    document: &FeatureDocument,
    failed_step: &str,
    scenario_hint: Option<&str>,
) -> Option<ScenarioRecord> {
    let mut feature_name = String::new();
    let mut feature_tags: BTreeSet<String> = BTreeSet::new();
    let mut background_steps: Vec<String> = Vec::new();
    let mut background_raw: Vec<String> = Vec::new();
    let mut in_background = false;
    let mut in_examples = false;
    let mut pending_tags: BTreeSet<String> = BTreeSet::new();
    let mut current: Option<PendingScenario> = None;

    for (index, line) in document.content.lines().enumerate() {
        let trimmed = line.trim();

        if trimmed.starts_with('@') {
            pending_tags.extend(parse_tags(trimmed));
            continue;
        }
        if let Some(name) = header_value(trimmed, "Feature") {
            feature_name = name.to_string();
            // Tags above the feature header are feature-level; scenarios
            // inherit them.
            feature_tags = std::mem::take(&mut pending_tags);
            continue;
        }
        if header_value(trimmed, "Background").is_some() {
            in_background = true;
            in_examples = false;
            continue;
        }
        if let Some((name, is_outline)) = scenario_header(trimmed) {
            if let Some(finished) = current.take() {
                let evaluated = evaluate(
                    finished,
                    &feature_name,
                    &background_steps,
                    &background_raw,
                    document,
                    failed_step,
                    scenario_hint,
                );
                if evaluated.is_some() {
                    return evaluated;
                }
            }
            let header_line = u32::try_from(index + 1).unwrap_or(u32::MAX);
            let mut tags = feature_tags.clone();
            tags.append(&mut pending_tags);
            current = Some(PendingScenario::start(name, is_outline, header_line, tags, trimmed));
            in_background = false;
            in_examples = false;
            continue;
        }
        if is_examples_header(trimmed) {
            in_examples = true;
            if let Some(scenario) = current.as_mut() {
                scenario.raw.push(trimmed.to_string());
            }
            continue;
        }
        if is_step_line(trimmed) {
            if in_background {
                background_steps.push(trimmed.to_string());
                background_raw.push(trimmed.to_string());
            } else if let Some(scenario) = current.as_mut() {
                scenario.steps.push(trimmed.to_string());
                scenario.raw.push(trimmed.to_string());
            }
            continue;
        }
        if is_table_row(trimmed) {
            if in_examples {
                if let Some(scenario) = current.as_mut() {
                    scenario.examples.push(parse_table_row(trimmed));
                    scenario.raw.push(trimmed.to_string());
                }
            } else if in_background {
                background_raw.push(trimmed.to_string());
            } else if let Some(scenario) = current.as_mut() {
                scenario.data_rows.push(trimmed.to_string());
                scenario.raw.push(trimmed.to_string());
            }
            continue;
        }
        if !trimmed.is_empty() {
            if let Some(scenario) = current.as_mut() {
                scenario.raw.push(trimmed.to_string());
            }
        }
    }

    current.take().and_then(|finished| {
        evaluate(
            finished,
            &feature_name,
            &background_steps,
            &background_raw,
            document,
            failed_step,
            scenario_hint,
        )
    })
}

/// Checks the name hint and step membership for one finished scenario and
/// builds its record when both hold.
fn evaluate(
    scenario: PendingScenario,
    feature_name: &str,
    background_steps: &[String],
    background_raw: &[String],
    document: &FeatureDocument,
    failed_step: &str,
    scenario_hint: Option<&str>,
) -> Option<ScenarioRecord> {
    if let Some(hint) = scenario_hint {
        let hint = hint.trim();
        // Instantiated outline names differ from the template name, so
        // outlines match by mutual containment instead of equality.
        let name_matches = if scenario.is_outline {
            hint.contains(&scenario.name) || scenario.name.contains(hint)
        } else {
            scenario.name == hint
        };
        if !name_matches {
            return None;
        }
    }

    let contains_step = background_steps.iter().any(|step| step_matches(step, failed_step))
        || scenario.steps.iter().any(|step| step_matches(step, failed_step))
        || scenario
            .data_rows
            .iter()
            .any(|row| parse_table_row(row).iter().any(|cell| step_contains_cell(failed_step, cell)))
        || scenario
            .examples
            .iter()
            .skip(1)
            .any(|row| row.iter().any(|cell| step_contains_cell(failed_step, cell)));
    if !contains_step {
        return None;
    }

    let mut steps: Vec<String> = background_steps.to_vec();
    steps.extend(scenario.steps.iter().cloned());
    let text = scenario.raw.join("\n");
    let examples = if scenario.is_outline { scenario.examples } else { Vec::new() };

    Some(ScenarioRecord {
        feature_name: feature_name.to_string(),
        scenario_name: scenario.name,
        steps,
        tags: scenario.tags,
        source_file: document.name.clone(),
        line: scenario.header_line,
        text,
        background_text: background_raw.join("\n"),
        data_table_rows: scenario.data_rows,
        examples,
        is_outline: scenario.is_outline,
    })
}

/// Whole-token containment for table-row membership: the cell value must
/// appear in the failed step bounded by non-alphanumeric characters, so a
/// one-character cell cannot claim arbitrary steps.
fn step_contains_cell(failed_step: &str, cell: &str) -> bool {
    let cell = cell.trim();
    if cell.is_empty() {
        return false;
    }
    failed_step.match_indices(cell).any(|(start, _)| {
        let before_ok =
            failed_step[..start].chars().next_back().is_none_or(|c| !c.is_alphanumeric());
        let after_ok = failed_step[start + cell.len()..]
            .chars()
            .next()
            .is_none_or(|c| !c.is_alphanumeric());
        before_ok && after_ok
    })
}

#[cfg(test)]
mod tests {
    use super::ScenarioLocator;
    use crate::adapters::memory::InMemoryCorpus;

    const LOGIN_FEATURE: &str = "\
@auth
Feature: Login

  Background:
    Given the service is running

  @smoke @login
  Scenario: Successful login
    When I click the login button
    Then I see the dashboard

  Scenario Outline: Login with credentials
    When I enter \"<email>\" in the field
    Then I see the dashboard
    Examples:
      | email     |
      | a@b.com   |
      | c@d.org   |
";

    const CART_FEATURE: &str = "\
Feature: Cart

  Scenario: Successful login
    When I add an item to the cart

  Scenario: Bulk add
    When I add the following items:
      | qty | name  |
      | 5   | apple |
";

    fn corpus() -> InMemoryCorpus {
        InMemoryCorpus::new(vec![
            ("cart.feature", CART_FEATURE),
            ("login.feature", LOGIN_FEATURE),
        ])
    }

    #[test]
    fn empty_step_text_is_absent_not_an_error() {
        let corpus = corpus();
        let locator = ScenarioLocator::new(&corpus);
        assert!(locator.locate("  ", None).unwrap().is_none());
    }

    #[test]
    fn unknown_step_returns_absent() {
        let corpus = corpus();
        let locator = ScenarioLocator::new(&corpus);
        assert!(locator.locate("When I do something unheard of", None).unwrap().is_none());
    }

    #[test]
    fn finds_plain_scenario_and_prepends_background() {
        let corpus = corpus();
        let locator = ScenarioLocator::new(&corpus);
        let record = locator.locate("When I click the login button", None).unwrap().unwrap();

        assert_eq!(record.feature_name, "Login");
        assert_eq!(record.scenario_name, "Successful login");
        assert_eq!(record.source_file, "login.feature");
        assert!(!record.is_outline);
        assert_eq!(record.steps[0], "Given the service is running");
        assert_eq!(record.steps[1], "When I click the login button");
        assert!(record.tags.contains("@smoke"));
        assert!(record.tags.contains("@login"));
        assert!(record.tags.contains("@auth"));
    }

    #[test]
    fn feature_tags_are_inherited_by_every_scenario() {
        let corpus = corpus();
        let locator = ScenarioLocator::new(&corpus);
        // The outline carries no tags of its own; @auth sits above the
        // Feature header.
        let record =
            locator.locate("When I enter \"a@b.com\" in the field", None).unwrap().unwrap();

        assert!(record.tags.contains("@auth"));
        assert!(!record.tags.contains("@smoke"));
    }

    #[test]
    fn same_name_in_another_document_does_not_shadow_the_real_match() {
        // cart.feature scans first and has a scenario with the same name,
        // but only login.feature contains the step.
        let corpus = corpus();
        let locator = ScenarioLocator::new(&corpus);
        let record = locator
            .locate("When I click the login button", Some("Successful login"))
            .unwrap()
            .unwrap();

        assert_eq!(record.source_file, "login.feature");
    }

    #[test]
    fn name_hint_requires_exact_match_for_plain_scenarios() {
        let corpus = corpus();
        let locator = ScenarioLocator::new(&corpus);
        let absent =
            locator.locate("When I click the login button", Some("Successful")).unwrap();
        assert!(absent.is_none());
    }

    #[test]
    fn outline_is_found_through_an_instantiated_step() {
        let corpus = corpus();
        let locator = ScenarioLocator::new(&corpus);
        let record =
            locator.locate("When I enter \"a@b.com\" in the field", None).unwrap().unwrap();

        assert!(record.is_outline);
        assert_eq!(record.scenario_name, "Login with credentials");
        assert_eq!(record.examples.len(), 3);
        assert!(record.steps.iter().any(|step| step.contains("<email>")));
    }

    #[test]
    fn outline_name_hint_matches_relaxed() {
        let corpus = corpus();
        let locator = ScenarioLocator::new(&corpus);
        let record = locator
            .locate(
                "When I enter \"a@b.com\" in the field",
                Some("Login with credentials -- a@b.com"),
            )
            .unwrap()
            .unwrap();

        assert_eq!(record.scenario_name, "Login with credentials");
    }

    #[test]
    fn examples_row_content_counts_as_membership() {
        let corpus = corpus();
        let locator = ScenarioLocator::new(&corpus);
        // The literal value appears only in the examples table.
        let record = locator.locate("When I use c@d.org somewhere", None).unwrap().unwrap();

        assert!(record.is_outline);
        assert_eq!(record.scenario_name, "Login with credentials");
    }

    #[test]
    fn short_data_table_cell_only_matches_as_a_whole_token() {
        let corpus = corpus();
        let locator = ScenarioLocator::new(&corpus);

        // "15" contains the cell value "5" but not as a whole token.
        assert!(locator.locate("When I wait 15 seconds", None).unwrap().is_none());

        let record = locator.locate("When I add 5 of each", None).unwrap().unwrap();
        assert_eq!(record.scenario_name, "Bulk add");
    }

    #[test]
    fn scanning_stops_at_the_first_matching_document() {
        let corpus = corpus();
        let locator = ScenarioLocator::new(&corpus);
        let record = locator.locate("When I add an item to the cart", None).unwrap().unwrap();

        assert_eq!(record.source_file, "cart.feature");
        assert_eq!(record.feature_name, "Cart");
    }
}
