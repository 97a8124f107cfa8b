use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CropType {
    Wheat,
    Rice,
    Corn,
    Soybean,
    Cotton,
    Barley,
    Tomato,
    Potato,
    Sugarcane,
    Millet,
    Sorghum,
    Groundnut,
    Chickpea,
    Mustard,
    Jute,
}

impl CropType {
    pub fn all() -> &'static [CropType] {
        &[
            CropType::Wheat,
            CropType::Rice,
            CropType::Corn,
            CropType::Soybean,
            CropType::Cotton,
            CropType::Barley,
            CropType::Tomato,
            CropType::Potato,
            CropType::Sugarcane,
            CropType::Millet,
            CropType::Sorghum,
            CropType::Groundnut,
            CropType::Chickpea,
            CropType::Mustard,
            CropType::Jute,
        ]
    }

    pub fn id(&self) -> &'static str {
        match self {
            CropType::Wheat => "wheat",
            CropType::Rice => "rice",
            CropType::Corn => "corn",
            CropType::Soybean => "soybean",
            CropType::Cotton => "cotton",
            CropType::Barley => "barley",
            CropType::Tomato => "tomato",
            CropType::Potato => "potato",
            CropType::Sugarcane => "sugarcane",
            CropType::Millet => "millet",
            CropType::Sorghum => "sorghum",
            CropType::Groundnut => "groundnut",
            CropType::Chickpea => "chickpea",
            CropType::Mustard => "mustard",
            CropType::Jute => "jute",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CropType::Wheat => "Wheat",
            CropType::Rice => "Rice",
            CropType::Corn => "Corn (Maize)",
            CropType::Soybean => "Soybean",
            CropType::Cotton => "Cotton",
            CropType::Barley => "Barley",
            CropType::Tomato => "Tomato",
            CropType::Potato => "Potato",
            CropType::Sugarcane => "Sugarcane",
            CropType::Millet => "Millet",
            CropType::Sorghum => "Sorghum",
            CropType::Groundnut => "Groundnut",
            CropType::Chickpea => "Chickpea",
            CropType::Mustard => "Mustard",
            CropType::Jute => "Jute",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "wheat" => Some(CropType::Wheat),
            "rice" | "paddy" => Some(CropType::Rice),
            "corn" | "maize" | "corn (maize)" => Some(CropType::Corn),
            "soybean" | "soy" | "soya" => Some(CropType::Soybean),
            "cotton" => Some(CropType::Cotton),
            "barley" => Some(CropType::Barley),
            "tomato" => Some(CropType::Tomato),
            "potato" => Some(CropType::Potato),
            "sugarcane" => Some(CropType::Sugarcane),
            "millet" => Some(CropType::Millet),
            "sorghum" => Some(CropType::Sorghum),
            "groundnut" | "peanut" => Some(CropType::Groundnut),
            "chickpea" => Some(CropType::Chickpea),
            "mustard" => Some(CropType::Mustard),
            "jute" => Some(CropType::Jute),
            _ => None,
        }
    }
}

impl std::fmt::Display for CropType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SoilType {
    Clay,
    Sandy,
    Loamy,
    Silty,
    Black,
    Red,
}

impl SoilType {
    pub fn all() -> &'static [SoilType] {
        &[
            SoilType::Clay,
            SoilType::Sandy,
            SoilType::Loamy,
            SoilType::Silty,
            SoilType::Black,
            SoilType::Red,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SoilType::Clay => "Clay",
            SoilType::Sandy => "Sandy",
            SoilType::Loamy => "Loamy",
            SoilType::Silty => "Silty",
            SoilType::Black => "Black",
            SoilType::Red => "Red",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "clay" => Some(SoilType::Clay),
            "sandy" | "sand" => Some(SoilType::Sandy),
            "loamy" | "loam" => Some(SoilType::Loamy),
            "silty" | "silt" => Some(SoilType::Silty),
            "black" => Some(SoilType::Black),
            "red" => Some(SoilType::Red),
            _ => None,
        }
    }
}

impl std::fmt::Display for SoilType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Season {
    Spring,
    Summer,
    Autumn,
    Winter,
    Monsoon,
    Kharif,
    Rabi,
    Zaid,
}

impl Season {
    pub fn all() -> &'static [Season] {
        &[
            Season::Spring,
            Season::Summer,
            Season::Autumn,
            Season::Winter,
            Season::Monsoon,
            Season::Kharif,
            Season::Rabi,
            Season::Zaid,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Season::Spring => "Spring",
            Season::Summer => "Summer",
            Season::Autumn => "Autumn",
            Season::Winter => "Winter",
            Season::Monsoon => "Monsoon",
            Season::Kharif => "Kharif",
            Season::Rabi => "Rabi",
            Season::Zaid => "Zaid",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "spring" => Some(Season::Spring),
            "summer" => Some(Season::Summer),
            "autumn" | "fall" => Some(Season::Autumn),
            "winter" => Some(Season::Winter),
            "monsoon" => Some(Season::Monsoon),
            "kharif" => Some(Season::Kharif),
            "rabi" => Some(Season::Rabi),
            "zaid" => Some(Season::Zaid),
            _ => None,
        }
    }
}

impl std::fmt::Display for Season {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Farm parameters for a single recommendation run.
///
/// Categorical fields are optional: a value the tables do not know about is
/// carried as `None` and simply matches no rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FarmingConditions {
    pub crop: Option<CropType>,
    pub soil: Option<SoilType>,
    pub season: Option<Season>,
    pub temperature_c: f64,
    pub rainfall_mm: f64,
}

impl FarmingConditions {
    pub fn new(
        crop: CropType,
        soil: SoilType,
        season: Season,
        temperature_c: f64,
        rainfall_mm: f64,
    ) -> Self {
        Self {
            crop: Some(crop),
            soil: Some(soil),
            season: Some(season),
            temperature_c,
            rainfall_mm,
        }
    }

    /// Build conditions from raw identifiers, leaving unrecognised ones unset.
    pub fn parse(
        crop: &str,
        soil: &str,
        season: &str,
        temperature_c: f64,
        rainfall_mm: f64,
    ) -> Self {
        let conditions = Self {
            crop: CropType::from_str(crop),
            soil: SoilType::from_str(soil),
            season: Season::from_str(season),
            temperature_c,
            rainfall_mm,
        };

        if conditions.crop.is_none() {
            tracing::debug!("Unrecognised crop '{}' - no crop rules will match", crop);
        }
        if conditions.soil.is_none() {
            tracing::debug!("Unrecognised soil '{}' - no soil rules will match", soil);
        }
        if conditions.season.is_none() {
            tracing::debug!(
                "Unrecognised season '{}' - no season rules will match",
                season
            );
        }

        conditions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crop_type_from_str_valid() {
        assert_eq!(CropType::from_str("wheat"), Some(CropType::Wheat));
        assert_eq!(CropType::from_str("Maize"), Some(CropType::Corn));
        assert_eq!(CropType::from_str(" RICE "), Some(CropType::Rice));
        assert_eq!(CropType::from_str("peanut"), Some(CropType::Groundnut));
    }

    #[test]
    fn crop_type_from_str_invalid() {
        assert_eq!(CropType::from_str("quinoa"), None);
        assert_eq!(CropType::from_str(""), None);
    }

    #[test]
    fn crop_type_id_round_trip() {
        for crop in CropType::all() {
            assert_eq!(
                CropType::from_str(crop.id()),
                Some(*crop),
                "Round-trip failed for {:?}",
                crop
            );
        }
    }

    #[test]
    fn soil_type_from_str() {
        assert_eq!(SoilType::from_str("loam"), Some(SoilType::Loamy));
        assert_eq!(SoilType::from_str("Black"), Some(SoilType::Black));
        assert_eq!(SoilType::from_str("peat"), None);
    }

    #[test]
    fn season_from_str() {
        assert_eq!(Season::from_str("fall"), Some(Season::Autumn));
        assert_eq!(Season::from_str("Kharif"), Some(Season::Kharif));
        assert_eq!(Season::from_str("dry"), None);
    }

    #[test]
    fn parse_leaves_unknown_values_unset() {
        let conditions = FarmingConditions::parse("quinoa", "clay", "dry", 22.0, 700.0);
        assert_eq!(conditions.crop, None);
        assert_eq!(conditions.soil, Some(SoilType::Clay));
        assert_eq!(conditions.season, None);
        assert_eq!(conditions.temperature_c, 22.0);
    }

    #[test]
    fn serde_uses_lowercase_identifiers() {
        let json = serde_json::to_string(&SoilType::Loamy).unwrap();
        assert_eq!(json, "\"loamy\"");
        let season: Season = serde_json::from_str("\"monsoon\"").unwrap();
        assert_eq!(season, Season::Monsoon);
    }
}
