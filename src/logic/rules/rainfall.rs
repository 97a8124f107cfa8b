use super::TraitRule;
use crate::models::{FarmingConditions, GeneticTrait, TraitSuggestion};

const LOW_RAINFALL_MM: f64 = 500.0;
const HIGH_RAINFALL_MM: f64 = 1500.0;

/// Rainfall rule
///
/// Conditions:
/// - Under 500mm: drought tolerance
/// - Over 1500mm: disease resistance (wet canopies favour fungal disease)
pub struct RainfallRule;

impl TraitRule for RainfallRule {
    fn id(&self) -> &'static str {
        "rainfall"
    }

    fn name(&self) -> &'static str {
        "Rainfall Regime"
    }

    fn evaluate(
        &self,
        conditions: &FarmingConditions,
        _found: &[TraitSuggestion],
    ) -> Vec<TraitSuggestion> {
        let rain = conditions.rainfall_mm;

        if rain < LOW_RAINFALL_MM {
            vec![TraitSuggestion::new(
                GeneticTrait::DroughtTolerance,
                format!(
                    "Low rainfall ({:.0}mm) requires water-efficient varieties",
                    rain
                ),
            )]
        } else if rain > HIGH_RAINFALL_MM {
            vec![TraitSuggestion::new(
                GeneticTrait::DiseaseResistance,
                format!(
                    "High rainfall ({:.0}mm) raises fungal and bacterial disease pressure",
                    rain
                ),
            )]
        } else {
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_rain(rain: f64) -> Vec<GeneticTrait> {
        let conditions = FarmingConditions {
            crop: None,
            soil: None,
            season: None,
            temperature_c: 20.0,
            rainfall_mm: rain,
        };
        RainfallRule
            .evaluate(&conditions, &[])
            .into_iter()
            .map(|s| s.genetic_trait)
            .collect()
    }

    #[test]
    fn thresholds_are_exclusive() {
        assert_eq!(with_rain(499.0), vec![GeneticTrait::DroughtTolerance]);
        assert!(with_rain(500.0).is_empty());
        assert!(with_rain(1500.0).is_empty());
        assert_eq!(with_rain(1501.0), vec![GeneticTrait::DiseaseResistance]);
    }
}
