use super::TraitRule;
use crate::models::{FarmingConditions, GeneticTrait, SoilType, TraitSuggestion};

/// Soil texture rule
///
/// Sandy soils drain fast (drought tolerance); clay holds water around the
/// roots (disease resistance). Other soils add nothing.
pub struct SoilRule;

impl TraitRule for SoilRule {
    fn id(&self) -> &'static str {
        "soil_texture"
    }

    fn name(&self) -> &'static str {
        "Soil Texture"
    }

    fn evaluate(
        &self,
        conditions: &FarmingConditions,
        _found: &[TraitSuggestion],
    ) -> Vec<TraitSuggestion> {
        match conditions.soil {
            Some(SoilType::Sandy) => vec![TraitSuggestion::new(
                GeneticTrait::DroughtTolerance,
                "Sandy soil drains quickly and holds little moisture",
            )],
            Some(SoilType::Clay) => vec![TraitSuggestion::new(
                GeneticTrait::DiseaseResistance,
                "Clay soil is prone to waterlogging and root diseases",
            )],
            Some(SoilType::Loamy)
            | Some(SoilType::Silty)
            | Some(SoilType::Black)
            | Some(SoilType::Red)
            | None => Vec::new(),
        }
    }
}
