use super::calculations::{
    any_high_above, any_low_below, any_precipitation_above, average_temperature,
    total_precipitation,
};
use crate::error::{CropCastError, Result};
use crate::models::{validate_forecast, DailyForecast, PlantingWindowVerdict};

const FREEZING_C: f64 = 0.0;
const HEAT_WAVE_C: f64 = 35.0;
const HEAVY_RAIN_MM: f64 = 50.0;
const DRY_SPELL_TOTAL_MM: f64 = 5.0;

const IDEAL_AVG_TEMP_C: (f64, f64) = (15.0, 25.0);
const IDEAL_TOTAL_RAIN_MM: (f64, f64) = (10.0, 40.0);

const BEST_DAY_TEMP_C: (f64, f64) = (10.0, 30.0);
const BEST_DAY_MAX_PRECIP_MM: f64 = 10.0;
const MAX_BEST_DAYS: usize = 3;
const GOOD_WINDOW_MIN_DAYS: usize = 3;

pub const FROST_REASON: &str =
    "Freezing temperatures expected. Wait for warmer conditions to avoid frost damage.";
pub const HEAT_REASON: &str =
    "Extreme heat expected. Delay planting or ensure adequate irrigation systems are ready.";
pub const HEAVY_RAIN_REASON: &str =
    "Heavy rainfall expected. Wait for drier conditions to prevent seed rot and soil compaction.";
pub const DRY_REASON: &str =
    "Dry conditions ahead. Good for planting, but prepare irrigation immediately after sowing.";
pub const EXCELLENT_REASON: &str = "Excellent conditions! Moderate temperatures and adequate \
     rainfall create ideal planting conditions.";
pub const ACCEPTABLE_REASON: &str =
    "Conditions are acceptable for planting with proper soil preparation and care.";

/// Planting window analyzer - classifies a short-range forecast into a sowing verdict
///
/// Verdict priority (first match wins):
/// 1. Any low below 0°C: frost risk, not recommended
/// 2. Any high above 35°C: heat, not recommended
/// 3. Any day above 50mm rain: heavy rain, not recommended
/// 4. Total rain below 5mm: dry but plantable
/// 5. Average 15-25°C with 10-40mm total: excellent
/// 6. Three or more best days: good window
/// 7. Otherwise acceptable
///
/// A best day averages 10-30°C with under 10mm of rain.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlantingWindowAnalyzer;

impl PlantingWindowAnalyzer {
    pub fn new() -> Self {
        Self
    }

    pub fn analyze(&self, forecast: &[DailyForecast]) -> Result<PlantingWindowVerdict> {
        validate_forecast(forecast)?;

        let avg_temp = average_temperature(forecast).ok_or_else(|| {
            CropCastError::InvalidInput("forecast contains no days".into())
        })?;
        let total_rain = total_precipitation(forecast);

        let qualifying: Vec<_> = forecast
            .iter()
            .filter(|d| is_best_day(d))
            .map(|d| d.date)
            .collect();
        let qualifying_count = qualifying.len();
        let best_days: Vec<_> = qualifying.into_iter().take(MAX_BEST_DAYS).collect();

        let (recommended, reason) = if any_low_below(forecast, FREEZING_C) {
            (false, FROST_REASON.to_string())
        } else if any_high_above(forecast, HEAT_WAVE_C) {
            (false, HEAT_REASON.to_string())
        } else if any_precipitation_above(forecast, HEAVY_RAIN_MM) {
            (false, HEAVY_RAIN_REASON.to_string())
        } else if total_rain < DRY_SPELL_TOTAL_MM {
            (true, DRY_REASON.to_string())
        } else if in_range(avg_temp, IDEAL_AVG_TEMP_C) && in_range(total_rain, IDEAL_TOTAL_RAIN_MM)
        {
            (true, EXCELLENT_REASON.to_string())
        } else if qualifying_count >= GOOD_WINDOW_MIN_DAYS {
            (
                true,
                format!(
                    "Good planting window. {} favorable days ahead with moderate conditions.",
                    qualifying_count
                ),
            )
        } else {
            (true, ACCEPTABLE_REASON.to_string())
        };

        tracing::debug!(
            recommended,
            avg_temp,
            total_rain,
            best_days = best_days.len(),
            "Planting window analyzed"
        );

        Ok(PlantingWindowVerdict {
            recommended,
            reason,
            best_days,
        })
    }
}

fn is_best_day(day: &DailyForecast) -> bool {
    in_range(day.avg_temp_c(), BEST_DAY_TEMP_C) && day.precipitation_mm < BEST_DAY_MAX_PRECIP_MM
}

fn in_range(value: f64, (low, high): (f64, f64)) -> bool {
    value >= low && value <= high
}
