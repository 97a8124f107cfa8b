use super::{CropRecommender, TraitRecommender};
use crate::models::{
    FarmingConditions, GeneticTrait, PredictionResults, RuleVariant, WeatherSnapshot,
};
use chrono::Utc;

/// Runs both recommenders over one form submission
pub struct Predictor {
    traits: TraitRecommender,
    crops: CropRecommender,
}

impl Predictor {
    pub fn new(variant: RuleVariant) -> Self {
        Self {
            traits: TraitRecommender::new(variant),
            crops: CropRecommender::new(),
        }
    }

    pub fn variant(&self) -> RuleVariant {
        self.traits.variant()
    }

    pub fn predict(
        &self,
        conditions: FarmingConditions,
        selected_traits: Vec<GeneticTrait>,
        weather: Option<WeatherSnapshot>,
    ) -> PredictionResults {
        let recommended_traits = self.traits.recommend(&conditions);
        let crop_matches = self.crops.recommend_crops(
            conditions.soil,
            conditions.temperature_c,
            conditions.rainfall_mm,
            conditions.season,
        );

        tracing::info!(
            variant = self.variant().as_str(),
            traits = recommended_traits.len(),
            crops = crop_matches.len(),
            "Prediction generated"
        );

        PredictionResults {
            generated_at: Utc::now(),
            conditions,
            variant: self.variant(),
            selected_traits,
            recommended_traits,
            crop_matches,
            weather,
        }
    }
}

impl Default for Predictor {
    fn default() -> Self {
        Self::new(RuleVariant::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CropType, Season, SoilType};

    #[test]
    fn prediction_combines_both_recommenders() {
        let predictor = Predictor::default();
        let conditions =
            FarmingConditions::new(CropType::Rice, SoilType::Clay, Season::Monsoon, 25.0, 200.0);
        let results = predictor.predict(
            conditions.clone(),
            vec![GeneticTrait::PestResistance],
            None,
        );

        assert_eq!(results.conditions, conditions);
        assert_eq!(results.variant, RuleVariant::Standard);
        assert_eq!(results.selected_traits, vec![GeneticTrait::PestResistance]);
        assert!(results
            .recommended_traits
            .iter()
            .any(|s| s.genetic_trait == GeneticTrait::DroughtTolerance));
        assert_eq!(results.crop_matches[0].crop, CropType::Rice);
        assert!(results.weather.is_none());
    }

    #[test]
    fn variant_flows_into_results() {
        let predictor = Predictor::new(RuleVariant::Extended);
        let conditions = FarmingConditions::parse("", "", "", 20.0, 800.0);
        let results = predictor.predict(conditions, Vec::new(), None);
        assert_eq!(results.variant, RuleVariant::Extended);
        let traits: Vec<_> = results
            .recommended_traits
            .iter()
            .map(|s| s.genetic_trait)
            .collect();
        assert_eq!(
            traits,
            vec![GeneticTrait::HighYield, GeneticTrait::PestResistance]
        );
    }
}
