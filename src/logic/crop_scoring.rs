use crate::models::{CropMatch, CropType, Season, SoilType};

use Condition::{Rainfall, RainfallAbove, RainfallBelow, SeasonIn, SoilIn, Temperature};

const BASE_SCORE: u32 = 50;
const MAX_SCORE: u32 = 100;
const MAX_MATCHES: usize = 5;

/// A single agronomic condition in a crop profile
#[derive(Debug, Clone, Copy)]
enum Condition {
    SoilIn(&'static [SoilType]),
    /// Inclusive °C range
    Temperature(f64, f64),
    RainfallAbove(f64),
    RainfallBelow(f64),
    /// Inclusive mm range
    Rainfall(f64, f64),
    SeasonIn(&'static [Season]),
}

#[derive(Debug, Clone, Copy)]
struct ScoreRule {
    condition: Condition,
    bonus: u32,
    phrase: &'static str,
}

const fn rule(condition: Condition, bonus: u32, phrase: &'static str) -> ScoreRule {
    ScoreRule {
        condition,
        bonus,
        phrase,
    }
}

struct CropProfile {
    crop: CropType,
    rules: &'static [ScoreRule],
}

#[rustfmt::skip]
static CATALOG: &[CropProfile] = &[
    CropProfile {
        crop: CropType::Rice,
        rules: &[
            rule(SoilIn(&[SoilType::Clay, SoilType::Loamy]), 20, "Suitable clay/loamy soil"),
            rule(RainfallAbove(150.0), 20, "High rainfall suits paddy"),
            rule(Temperature(20.0, 35.0), 15, "Optimal temperature range"),
            rule(SeasonIn(&[Season::Monsoon, Season::Kharif]), 15, "Ideal monsoon season"),
        ],
    },
    CropProfile {
        crop: CropType::Wheat,
        rules: &[
            rule(SoilIn(&[SoilType::Loamy, SoilType::Clay]), 20, "Well-suited loamy/clay soil"),
            rule(Temperature(10.0, 25.0), 20, "Cool growing temperatures"),
            rule(Rainfall(50.0, 100.0), 15, "Moderate rainfall"),
            rule(SeasonIn(&[Season::Winter, Season::Rabi]), 20, "Ideal rabi/winter season"),
        ],
    },
    CropProfile {
        crop: CropType::Corn,
        rules: &[
            rule(SoilIn(&[SoilType::Loamy, SoilType::Sandy]), 15, "Well-drained loamy/sandy soil"),
            rule(Temperature(18.0, 32.0), 20, "Warm temperatures"),
            rule(Rainfall(50.0, 150.0), 15, "Adequate rainfall"),
            rule(SeasonIn(&[Season::Summer, Season::Kharif, Season::Spring]), 15, "Warm-season sowing"),
        ],
    },
    CropProfile {
        crop: CropType::Soybean,
        rules: &[
            rule(SoilIn(&[SoilType::Loamy, SoilType::Black]), 15, "Fertile loamy/black soil"),
            rule(Temperature(20.0, 30.0), 20, "Optimal temperature range"),
            rule(Rainfall(60.0, 150.0), 15, "Adequate rainfall"),
            rule(SeasonIn(&[Season::Monsoon, Season::Kharif]), 15, "Kharif season crop"),
        ],
    },
    CropProfile {
        crop: CropType::Cotton,
        rules: &[
            rule(SoilIn(&[SoilType::Black, SoilType::Sandy]), 20, "Black cotton/sandy soil"),
            rule(Temperature(21.0, 35.0), 20, "Warm temperatures"),
            rule(Rainfall(50.0, 100.0), 15, "Moderate rainfall"),
            rule(SeasonIn(&[Season::Summer, Season::Kharif]), 15, "Long warm season"),
        ],
    },
    CropProfile {
        crop: CropType::Barley,
        rules: &[
            rule(SoilIn(&[SoilType::Loamy, SoilType::Sandy]), 15, "Light loamy/sandy soil"),
            rule(Temperature(12.0, 25.0), 15, "Cool temperatures"),
            rule(Rainfall(30.0, 80.0), 15, "Low to moderate rainfall"),
            rule(SeasonIn(&[Season::Winter, Season::Rabi]), 20, "Ideal rabi/winter season"),
        ],
    },
    CropProfile {
        crop: CropType::Sugarcane,
        rules: &[
            rule(SoilIn(&[SoilType::Loamy, SoilType::Black, SoilType::Clay]), 15, "Deep fertile soil"),
            rule(Temperature(20.0, 35.0), 20, "Tropical temperatures"),
            rule(RainfallAbove(100.0), 20, "High water availability"),
            rule(SeasonIn(&[Season::Spring, Season::Monsoon]), 10, "Good planting season"),
        ],
    },
    CropProfile {
        crop: CropType::Millet,
        rules: &[
            rule(SoilIn(&[SoilType::Sandy, SoilType::Red]), 20, "Tolerates sandy/red soil"),
            rule(Temperature(25.0, 35.0), 15, "Heat tolerant"),
            rule(RainfallBelow(60.0), 20, "Thrives with low rainfall"),
            rule(SeasonIn(&[Season::Summer, Season::Kharif, Season::Zaid]), 15, "Short warm season"),
        ],
    },
    CropProfile {
        crop: CropType::Sorghum,
        rules: &[
            rule(SoilIn(&[SoilType::Black, SoilType::Red, SoilType::Loamy]), 15, "Adaptable to black/red/loamy soil"),
            rule(Temperature(25.0, 32.0), 15, "Warm temperatures"),
            rule(Rainfall(40.0, 100.0), 15, "Modest rainfall"),
            rule(SeasonIn(&[Season::Kharif, Season::Summer]), 10, "Kharif/summer crop"),
        ],
    },
    CropProfile {
        crop: CropType::Groundnut,
        rules: &[
            rule(SoilIn(&[SoilType::Sandy, SoilType::Red]), 20, "Light sandy/red soil for pegging"),
            rule(Temperature(20.0, 30.0), 15, "Warm temperatures"),
            rule(Rainfall(50.0, 125.0), 15, "Moderate rainfall"),
            rule(SeasonIn(&[Season::Kharif, Season::Monsoon]), 10, "Rain-fed season"),
        ],
    },
    CropProfile {
        crop: CropType::Chickpea,
        rules: &[
            rule(SoilIn(&[SoilType::Loamy, SoilType::Black]), 15, "Loamy/black soil"),
            rule(Temperature(15.0, 25.0), 20, "Cool, dry temperatures"),
            rule(RainfallBelow(60.0), 15, "Grows on residual moisture"),
            rule(SeasonIn(&[Season::Rabi, Season::Winter]), 20, "Ideal rabi/winter season"),
        ],
    },
    CropProfile {
        crop: CropType::Mustard,
        rules: &[
            rule(SoilIn(&[SoilType::Loamy, SoilType::Sandy]), 15, "Loamy/sandy soil"),
            rule(Temperature(10.0, 25.0), 15, "Cool temperatures"),
            rule(Rainfall(25.0, 75.0), 15, "Low rainfall requirement"),
            rule(SeasonIn(&[Season::Rabi, Season::Winter]), 20, "Ideal rabi/winter season"),
        ],
    },
    CropProfile {
        crop: CropType::Potato,
        rules: &[
            rule(SoilIn(&[SoilType::Loamy, SoilType::Sandy]), 20, "Loose loamy/sandy soil for tubers"),
            rule(Temperature(15.0, 25.0), 20, "Cool temperatures for tuber set"),
            rule(Rainfall(50.0, 100.0), 10, "Moderate rainfall"),
            rule(SeasonIn(&[Season::Winter, Season::Rabi, Season::Autumn]), 15, "Cool season planting"),
        ],
    },
    CropProfile {
        crop: CropType::Tomato,
        rules: &[
            rule(SoilIn(&[SoilType::Loamy, SoilType::Red, SoilType::Sandy]), 15, "Well-drained soil"),
            rule(Temperature(20.0, 30.0), 20, "Optimal temperature range"),
            rule(Rainfall(40.0, 100.0), 10, "Moderate rainfall"),
            rule(SeasonIn(&[Season::Spring, Season::Summer, Season::Zaid]), 10, "Warm-season crop"),
        ],
    },
    CropProfile {
        crop: CropType::Jute,
        rules: &[
            rule(SoilIn(&[SoilType::Loamy, SoilType::Clay, SoilType::Silty]), 15, "Alluvial loamy/clay/silty soil"),
            rule(Temperature(24.0, 37.0), 15, "Hot, humid temperatures"),
            rule(RainfallAbove(150.0), 20, "High rainfall"),
            rule(SeasonIn(&[Season::Monsoon, Season::Kharif]), 15, "Monsoon crop"),
        ],
    },
];

impl Condition {
    fn matches(
        &self,
        soil: Option<SoilType>,
        temperature_c: f64,
        rainfall_mm: f64,
        season: Option<Season>,
    ) -> bool {
        match *self {
            SoilIn(allowed) => soil.is_some_and(|s| allowed.contains(&s)),
            Temperature(low, high) => temperature_c >= low && temperature_c <= high,
            RainfallAbove(limit) => rainfall_mm > limit,
            RainfallBelow(limit) => rainfall_mm < limit,
            Rainfall(low, high) => rainfall_mm >= low && rainfall_mm <= high,
            SeasonIn(allowed) => season.is_some_and(|s| allowed.contains(&s)),
        }
    }
}

/// Crop recommender - ranks the catalog against soil, weather and season
///
/// Every crop starts at 50 and gains its rule bonuses; scores are capped at
/// 100. Crops that match no rule at all are left out. The five best are
/// returned, ties in catalog order.
#[derive(Debug, Clone, Copy, Default)]
pub struct CropRecommender;

impl CropRecommender {
    pub fn new() -> Self {
        Self
    }

    pub fn recommend_crops(
        &self,
        soil: Option<SoilType>,
        temperature_c: f64,
        rainfall_mm: f64,
        season: Option<Season>,
    ) -> Vec<CropMatch> {
        let mut candidates: Vec<CropMatch> = CATALOG
            .iter()
            .filter_map(|profile| {
                let mut score = BASE_SCORE;
                let mut reasons = Vec::new();

                for rule in profile.rules {
                    if rule
                        .condition
                        .matches(soil, temperature_c, rainfall_mm, season)
                    {
                        score += rule.bonus;
                        reasons.push(rule.phrase.to_string());
                    }
                }

                if reasons.is_empty() {
                    return None;
                }

                Some(CropMatch {
                    crop: profile.crop,
                    reasons,
                    score: score.min(MAX_SCORE) as u8,
                })
            })
            .collect();

        // Vec::sort_by is stable, so equal scores keep catalog order
        candidates.sort_by(|a, b| b.score.cmp(&a.score));
        candidates.truncate(MAX_MATCHES);

        tracing::debug!(
            "Crop ranking: {}",
            candidates
                .iter()
                .map(|m| format!("{}={}", m.crop.id(), m.score))
                .collect::<Vec<_>>()
                .join(" ")
        );

        candidates
    }
}
