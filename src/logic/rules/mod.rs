pub mod baseline;
pub mod crop_traits;
pub mod engine;
pub mod rainfall;
pub mod season;
pub mod soil;
pub mod temperature;

pub use engine::TraitRecommender;

use crate::models::{FarmingConditions, GeneticTrait, TraitSuggestion};

/// Trait for genetic-trait suggestion rules
pub trait TraitRule: Send + Sync {
    /// Unique identifier for this rule
    fn id(&self) -> &'static str;

    /// Human-readable name
    fn name(&self) -> &'static str;

    /// Evaluate the rule against the farm conditions.
    ///
    /// `found` holds the suggestions produced by earlier rules, in order.
    fn evaluate(
        &self,
        conditions: &FarmingConditions,
        found: &[TraitSuggestion],
    ) -> Vec<TraitSuggestion>;
}

pub(crate) fn contains_trait(found: &[TraitSuggestion], genetic_trait: GeneticTrait) -> bool {
    found.iter().any(|s| s.genetic_trait == genetic_trait)
}
