use super::TraitRule;
use crate::models::{FarmingConditions, GeneticTrait, TraitSuggestion};

const HEAT_STRESS_C: f64 = 30.0;

/// Temperature stress rule
///
/// Conditions:
/// - Above 30°C: drought tolerance and climate adaptability
/// - Below the cold cutoff: climate adaptability
pub struct TemperatureRule {
    cold_threshold_c: f64,
}

impl TemperatureRule {
    pub fn new(cold_threshold_c: f64) -> Self {
        Self { cold_threshold_c }
    }
}

impl TraitRule for TemperatureRule {
    fn id(&self) -> &'static str {
        "temperature_stress"
    }

    fn name(&self) -> &'static str {
        "Temperature Stress"
    }

    fn evaluate(
        &self,
        conditions: &FarmingConditions,
        _found: &[TraitSuggestion],
    ) -> Vec<TraitSuggestion> {
        let temp = conditions.temperature_c;

        if temp > HEAT_STRESS_C {
            vec![
                TraitSuggestion::new(
                    GeneticTrait::DroughtTolerance,
                    format!(
                        "High temperature ({:.1}°C) increases evaporation and water stress",
                        temp
                    ),
                ),
                TraitSuggestion::new(
                    GeneticTrait::ClimateAdaptability,
                    "Heat resilience needed for sustained temperatures above 30°C",
                ),
            ]
        } else if temp < self.cold_threshold_c {
            vec![TraitSuggestion::new(
                GeneticTrait::ClimateAdaptability,
                format!(
                    "Low temperature ({:.1}°C) calls for cold-tolerant varieties",
                    temp
                ),
            )]
        } else {
            Vec::new()
        }
    }
}
