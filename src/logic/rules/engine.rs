use super::{
    baseline::BaselineRule, contains_trait, crop_traits::CropTraitRule, rainfall::RainfallRule,
    season::SeasonRule, soil::SoilRule, temperature::TemperatureRule, TraitRule,
};
use crate::models::{FarmingConditions, RuleVariant, TraitSuggestion};

const STANDARD_COLD_THRESHOLD_C: f64 = 10.0;
const EXTENDED_COLD_THRESHOLD_C: f64 = 15.0;

/// Ordered trait rules. Evaluation order decides which reason is kept when
/// two rules propose the same trait.
pub struct TraitRecommender {
    variant: RuleVariant,
    rules: Vec<Box<dyn TraitRule>>,
}

impl TraitRecommender {
    pub fn new(variant: RuleVariant) -> Self {
        let (cold_threshold, pest_baseline) = match variant {
            RuleVariant::Standard => (STANDARD_COLD_THRESHOLD_C, false),
            RuleVariant::Extended => (EXTENDED_COLD_THRESHOLD_C, true),
        };

        let rules: Vec<Box<dyn TraitRule>> = vec![
            Box::new(TemperatureRule::new(cold_threshold)),
            Box::new(RainfallRule),
            Box::new(CropTraitRule),
            Box::new(SoilRule),
            Box::new(SeasonRule),
            Box::new(BaselineRule::new(pest_baseline)),
        ];

        Self { variant, rules }
    }

    pub fn variant(&self) -> RuleVariant {
        self.variant
    }

    /// Suggested traits, one entry per trait, first reason wins
    pub fn recommend(&self, conditions: &FarmingConditions) -> Vec<TraitSuggestion> {
        let mut suggestions: Vec<TraitSuggestion> = Vec::new();

        for rule in &self.rules {
            for suggestion in rule.evaluate(conditions, &suggestions) {
                if contains_trait(&suggestions, suggestion.genetic_trait) {
                    tracing::trace!(
                        rule = rule.id(),
                        "Dropping duplicate {}",
                        suggestion.genetic_trait
                    );
                    continue;
                }
                suggestions.push(suggestion);
            }
        }

        suggestions
    }

    pub fn list_rules(&self) -> Vec<(&'static str, &'static str)> {
        self.rules.iter().map(|r| (r.id(), r.name())).collect()
    }
}

impl Default for TraitRecommender {
    fn default() -> Self {
        Self::new(RuleVariant::default())
    }
}
