//! The built-in strategy families, one module per failure family.

pub mod browser;
pub mod comparison;
pub mod fallback;
pub mod resource;
pub mod runtime;
pub mod step;

use super::strategy::ParsingStrategy;

/// The full default chain, in registration order. The classifier sorts by
/// priority, so ordering here only breaks ties.
#[must_use]
pub fn default_strategies() -> Vec<Box<dyn ParsingStrategy>> {
    vec![
        Box::new(comparison::ComparisonStrategy),
        Box::new(step::StepErrorStrategy),
        Box::new(runtime::RuntimeFaultStrategy),
        Box::new(resource::ResourceErrorStrategy),
        Box::new(browser::BrowserErrorStrategy),
        Box::new(fallback::FallbackStrategy),
    ]
}

#[cfg(test)]
mod tests {
    use super::default_strategies;

    #[test]
    fn default_chain_has_distinct_names_and_priorities() {
        let strategies = default_strategies();
        let mut names: Vec<_> = strategies.iter().map(|s| s.name()).collect();
        let mut priorities: Vec<_> = strategies.iter().map(|s| s.priority()).collect();

        names.sort_unstable();
        names.dedup();
        priorities.sort_unstable();
        priorities.dedup();
        assert_eq!(names.len(), 6);
        assert_eq!(priorities.len(), 6);
    }
}
