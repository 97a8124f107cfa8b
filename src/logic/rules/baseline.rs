use super::{contains_trait, TraitRule};
use crate::models::{FarmingConditions, GeneticTrait, TraitSuggestion};

pub const HIGH_YIELD_BASELINE_REASON: &str = "Baseline trait to maximize productivity";
pub const PEST_BASELINE_REASON: &str =
    "Broadly beneficial protection against common field pests";

/// Baseline rule - guarantees the universally useful traits are present
///
/// High yield is always proposed. The extended table also proposes pest
/// resistance.
pub struct BaselineRule {
    include_pest_resistance: bool,
}

impl BaselineRule {
    pub fn new(include_pest_resistance: bool) -> Self {
        Self {
            include_pest_resistance,
        }
    }
}

impl TraitRule for BaselineRule {
    fn id(&self) -> &'static str {
        "baseline"
    }

    fn name(&self) -> &'static str {
        "Baseline Traits"
    }

    fn evaluate(
        &self,
        _conditions: &FarmingConditions,
        found: &[TraitSuggestion],
    ) -> Vec<TraitSuggestion> {
        let mut out = Vec::new();

        if !contains_trait(found, GeneticTrait::HighYield) {
            out.push(TraitSuggestion::new(
                GeneticTrait::HighYield,
                HIGH_YIELD_BASELINE_REASON,
            ));
        }

        if self.include_pest_resistance && !contains_trait(found, GeneticTrait::PestResistance) {
            out.push(TraitSuggestion::new(
                GeneticTrait::PestResistance,
                PEST_BASELINE_REASON,
            ));
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn conditions() -> FarmingConditions {
        FarmingConditions {
            crop: None,
            soil: None,
            season: None,
            temperature_c: 20.0,
            rainfall_mm: 800.0,
        }
    }

    #[test]
    fn adds_high_yield_when_missing() {
        let out = BaselineRule::new(false).evaluate(&conditions(), &[]);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].genetic_trait, GeneticTrait::HighYield);
        assert_eq!(out[0].reason, HIGH_YIELD_BASELINE_REASON);
    }

    #[test]
    fn skips_traits_already_found() {
        let found = vec![
            TraitSuggestion::new(GeneticTrait::HighYield, "crop"),
            TraitSuggestion::new(GeneticTrait::PestResistance, "crop"),
        ];
        assert!(BaselineRule::new(true)
            .evaluate(&conditions(), &found)
            .is_empty());
    }

    #[test]
    fn extended_adds_pest_resistance() {
        let out = BaselineRule::new(true).evaluate(&conditions(), &[]);
        let traits: Vec<_> = out.iter().map(|s| s.genetic_trait).collect();
        assert_eq!(
            traits,
            vec![GeneticTrait::HighYield, GeneticTrait::PestResistance]
        );
    }
}
