use super::conditions::{CropType, FarmingConditions};
use super::forecast::WeatherSnapshot;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GeneticTrait {
    PestResistance,
    HighYield,
    DroughtTolerance,
    DiseaseResistance,
    FastGrowth,
    ClimateAdaptability,
}

impl GeneticTrait {
    pub fn all() -> &'static [GeneticTrait] {
        &[
            GeneticTrait::PestResistance,
            GeneticTrait::HighYield,
            GeneticTrait::DroughtTolerance,
            GeneticTrait::DiseaseResistance,
            GeneticTrait::FastGrowth,
            GeneticTrait::ClimateAdaptability,
        ]
    }

    pub fn id(&self) -> &'static str {
        match self {
            GeneticTrait::PestResistance => "pestResistance",
            GeneticTrait::HighYield => "highYield",
            GeneticTrait::DroughtTolerance => "droughtTolerance",
            GeneticTrait::DiseaseResistance => "diseaseResistance",
            GeneticTrait::FastGrowth => "fastGrowth",
            GeneticTrait::ClimateAdaptability => "climateAdaptability",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GeneticTrait::PestResistance => "Pest Resistance",
            GeneticTrait::HighYield => "High Yield",
            GeneticTrait::DroughtTolerance => "Drought Tolerance",
            GeneticTrait::DiseaseResistance => "Disease Resistance",
            GeneticTrait::FastGrowth => "Fast Growth",
            GeneticTrait::ClimateAdaptability => "Climate Adaptability",
        }
    }

    pub fn color(&self) -> ratatui::style::Color {
        use ratatui::style::Color;
        match self {
            GeneticTrait::PestResistance => Color::LightRed,
            GeneticTrait::HighYield => Color::Green,
            GeneticTrait::DroughtTolerance => Color::Yellow,
            GeneticTrait::DiseaseResistance => Color::Magenta,
            GeneticTrait::FastGrowth => Color::Cyan,
            GeneticTrait::ClimateAdaptability => Color::LightBlue,
        }
    }
}

impl std::fmt::Display for GeneticTrait {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraitSuggestion {
    #[serde(rename = "trait")]
    pub genetic_trait: GeneticTrait,
    pub reason: String,
}

impl TraitSuggestion {
    pub fn new(genetic_trait: GeneticTrait, reason: impl Into<String>) -> Self {
        Self {
            genetic_trait,
            reason: reason.into(),
        }
    }
}

/// Edition of the trait rule table.
///
/// `Extended` uses a warmer cold-stress cutoff and always proposes pest
/// resistance as a baseline.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleVariant {
    #[default]
    Standard,
    Extended,
}

impl RuleVariant {
    pub fn as_str(&self) -> &'static str {
        match self {
            RuleVariant::Standard => "Standard",
            RuleVariant::Extended => "Extended",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlantingWindowVerdict {
    pub recommended: bool,
    pub reason: String,
    pub best_days: Vec<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CropMatch {
    pub crop: CropType,
    pub reasons: Vec<String>,
    pub score: u8,
}

impl CropMatch {
    /// Matched rule phrases joined for display
    pub fn reason(&self) -> String {
        self.reasons.join(", ")
    }
}

/// Everything produced by one "Generate Prediction" run
#[derive(Debug, Clone, Serialize)]
pub struct PredictionResults {
    pub generated_at: DateTime<Utc>,
    pub conditions: FarmingConditions,
    pub variant: RuleVariant,
    pub selected_traits: Vec<GeneticTrait>,
    pub recommended_traits: Vec<TraitSuggestion>,
    pub crop_matches: Vec<CropMatch>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weather: Option<WeatherSnapshot>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn genetic_trait_serializes_camel_case() {
        let json = serde_json::to_string(&GeneticTrait::DroughtTolerance).unwrap();
        assert_eq!(json, "\"droughtTolerance\"");
        for t in GeneticTrait::all() {
            let json = serde_json::to_string(t).unwrap();
            assert_eq!(json, format!("\"{}\"", t.id()));
        }
    }

    #[test]
    fn trait_suggestion_uses_trait_key() {
        let s = TraitSuggestion::new(GeneticTrait::HighYield, "maximize productivity");
        let value = serde_json::to_value(&s).unwrap();
        assert_eq!(value["trait"], "highYield");
        assert_eq!(value["reason"], "maximize productivity");
    }

    #[test]
    fn crop_match_reason_joins_phrases() {
        let m = CropMatch {
            crop: CropType::Rice,
            reasons: vec!["Suitable soil".into(), "High rainfall".into()],
            score: 90,
        };
        assert_eq!(m.reason(), "Suitable soil, High rainfall");
    }

    #[test]
    fn rule_variant_defaults_to_standard() {
        assert_eq!(RuleVariant::default(), RuleVariant::Standard);
        let v: RuleVariant = serde_yaml::from_str("extended").unwrap();
        assert_eq!(v, RuleVariant::Extended);
    }
}
