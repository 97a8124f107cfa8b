use super::TraitRule;
use crate::models::{FarmingConditions, GeneticTrait, Season, TraitSuggestion};

/// Seasonal rule
///
/// Short warm windows favour fast-maturing varieties, cold seasons need
/// adaptability, and rain-fed seasons need disease resistance.
pub struct SeasonRule;

impl TraitRule for SeasonRule {
    fn id(&self) -> &'static str {
        "season"
    }

    fn name(&self) -> &'static str {
        "Growing Season"
    }

    fn evaluate(
        &self,
        conditions: &FarmingConditions,
        _found: &[TraitSuggestion],
    ) -> Vec<TraitSuggestion> {
        let Some(season) = conditions.season else {
            return Vec::new();
        };

        let (genetic_trait, reason) = match season {
            Season::Summer => (
                GeneticTrait::FastGrowth,
                "Summer heat shortens the growing window; fast-maturing varieties escape late stress",
            ),
            Season::Winter => (
                GeneticTrait::ClimateAdaptability,
                "Winter sowing exposes seedlings to frost and cold snaps",
            ),
            Season::Monsoon => (
                GeneticTrait::DiseaseResistance,
                "Monsoon humidity encourages fungal and bacterial outbreaks",
            ),
            Season::Spring | Season::Autumn => (
                GeneticTrait::FastGrowth,
                "Fast-maturing varieties fit the shoulder-season window before temperature swings",
            ),
            Season::Zaid => (
                GeneticTrait::FastGrowth,
                "The short zaid interval between main seasons needs quick-maturing crops",
            ),
            Season::Kharif => (
                GeneticTrait::DiseaseResistance,
                "Rain-fed kharif crops face high disease incidence",
            ),
            Season::Rabi => (
                GeneticTrait::ClimateAdaptability,
                "Rabi crops grow through cool nights and late-season warming",
            ),
        };

        vec![TraitSuggestion::new(genetic_trait, reason)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn in_season(season: Season) -> GeneticTrait {
        let conditions = FarmingConditions {
            crop: None,
            soil: None,
            season: Some(season),
            temperature_c: 20.0,
            rainfall_mm: 800.0,
        };
        let out = SeasonRule.evaluate(&conditions, &[]);
        assert_eq!(out.len(), 1);
        out[0].genetic_trait
    }

    #[test]
    fn season_mapping() {
        assert_eq!(in_season(Season::Summer), GeneticTrait::FastGrowth);
        assert_eq!(in_season(Season::Winter), GeneticTrait::ClimateAdaptability);
        assert_eq!(in_season(Season::Monsoon), GeneticTrait::DiseaseResistance);
        assert_eq!(in_season(Season::Spring), GeneticTrait::FastGrowth);
        assert_eq!(in_season(Season::Autumn), GeneticTrait::FastGrowth);
    }

    #[test]
    fn no_season_no_suggestion() {
        let conditions = FarmingConditions::parse("wheat", "clay", "", 20.0, 800.0);
        assert!(SeasonRule.evaluate(&conditions, &[]).is_empty());
    }
}
