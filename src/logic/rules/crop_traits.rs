use super::TraitRule;
use crate::models::{CropType, FarmingConditions, GeneticTrait, TraitSuggestion};

/// Crop-specific trait mapping
///
/// Each crop carries the traits that address its dominant agronomic threats.
pub struct CropTraitRule;

fn crop_traits(crop: CropType) -> &'static [(GeneticTrait, &'static str)] {
    use GeneticTrait::*;

    match crop {
        CropType::Wheat => &[
            (
                DiseaseResistance,
                "Rust and powdery mildew are major wheat diseases",
            ),
            (HighYield, "Grain yield drives wheat profitability"),
        ],
        CropType::Rice => &[
            (
                DiseaseResistance,
                "Blast and bacterial leaf blight are prevalent in rice",
            ),
            (
                HighYield,
                "High-yielding rice varieties maximize paddy output",
            ),
        ],
        CropType::Barley => &[
            (
                DiseaseResistance,
                "Net blotch and scald commonly affect barley",
            ),
            (HighYield, "Improved barley lines lift grain and malt yield"),
        ],
        CropType::Corn => &[
            (
                PestResistance,
                "Stem borers and fall armyworm cause heavy corn losses",
            ),
            (
                HighYield,
                "Hybrid corn responds strongly to yield-focused breeding",
            ),
        ],
        CropType::Cotton => &[
            (
                PestResistance,
                "Bollworm pressure is the main threat to cotton",
            ),
            (DroughtTolerance, "Cotton is often grown on rain-fed land"),
        ],
        CropType::Tomato => &[
            (
                DiseaseResistance,
                "Late blight and leaf curl virus limit tomato production",
            ),
            (PestResistance, "Fruit borers and whitefly attack tomato"),
        ],
        CropType::Soybean => &[
            (DiseaseResistance, "Soybean rust and root rot reduce stands"),
            (HighYield, "Pod set improvements raise soybean yield"),
        ],
        CropType::Potato => &[
            (
                DiseaseResistance,
                "Late blight is the most destructive potato disease",
            ),
            (
                PestResistance,
                "Tuber moth and aphids spread damage and viruses",
            ),
        ],
        CropType::Sugarcane => &[
            (
                HighYield,
                "Cane tonnage and sugar recovery determine returns",
            ),
            (PestResistance, "Early shoot borer damages young cane"),
        ],
        CropType::Millet => &[
            (DroughtTolerance, "Millet is grown where rainfall is scarce"),
            (FastGrowth, "Short-duration millets fit brief rainy spells"),
        ],
        CropType::Sorghum => &[
            (DroughtTolerance, "Sorghum is relied upon in dry regions"),
            (
                PestResistance,
                "Shoot fly and stem borer attack sorghum seedlings",
            ),
        ],
        CropType::Groundnut => &[
            (
                DroughtTolerance,
                "Groundnut pod filling suffers under moisture stress",
            ),
            (
                DiseaseResistance,
                "Leaf spot and rust reduce groundnut yield",
            ),
        ],
        CropType::Chickpea => &[
            (
                DiseaseResistance,
                "Fusarium wilt is the key chickpea disease",
            ),
            (DroughtTolerance, "Chickpea grows on residual soil moisture"),
        ],
        CropType::Mustard => &[
            (
                PestResistance,
                "Aphid infestations peak in mustard at flowering",
            ),
            (
                ClimateAdaptability,
                "Mustard is exposed to winter frost at flowering",
            ),
        ],
        CropType::Jute => &[
            (
                FastGrowth,
                "Jute must reach fibre maturity within the monsoon",
            ),
            (HighYield, "Fibre yield per hectare determines jute returns"),
        ],
    }
}

impl TraitRule for CropTraitRule {
    fn id(&self) -> &'static str {
        "crop_specific"
    }

    fn name(&self) -> &'static str {
        "Crop-Specific Traits"
    }

    fn evaluate(
        &self,
        conditions: &FarmingConditions,
        _found: &[TraitSuggestion],
    ) -> Vec<TraitSuggestion> {
        let Some(crop) = conditions.crop else {
            return Vec::new();
        };

        crop_traits(crop)
            .iter()
            .map(|(genetic_trait, reason)| TraitSuggestion::new(*genetic_trait, *reason))
            .collect()
    }
}
