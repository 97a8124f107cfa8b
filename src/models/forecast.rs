use super::recommendation::PlantingWindowVerdict;
use crate::error::{CropCastError, Result};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Result<Self> {
        if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
            return Err(CropCastError::InvalidInput(format!(
                "coordinates out of range: {}, {}",
                latitude, longitude
            )));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }
}

impl std::fmt::Display for Coordinates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.4}, {:.4}", self.latitude, self.longitude)
    }
}

/// One day of the 7-day outlook
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyForecast {
    pub date: NaiveDate,
    pub max_temp_c: f64,
    pub min_temp_c: f64,
    pub precipitation_mm: f64,
    pub humidity_percent: f64,
}

impl DailyForecast {
    pub fn new(
        date: NaiveDate,
        max_temp_c: f64,
        min_temp_c: f64,
        precipitation_mm: f64,
        humidity_percent: f64,
    ) -> Self {
        Self {
            date,
            max_temp_c,
            min_temp_c,
            precipitation_mm,
            humidity_percent,
        }
    }

    /// Midpoint of the day's high and low
    pub fn avg_temp_c(&self) -> f64 {
        (self.max_temp_c + self.min_temp_c) / 2.0
    }

    fn validate(&self) -> Result<()> {
        let values = [
            self.max_temp_c,
            self.min_temp_c,
            self.precipitation_mm,
            self.humidity_percent,
        ];
        if values.iter().any(|v| !v.is_finite()) {
            return Err(CropCastError::InvalidInput(format!(
                "forecast for {} contains non-finite values",
                self.date
            )));
        }
        if self.min_temp_c > self.max_temp_c {
            return Err(CropCastError::InvalidInput(format!(
                "forecast for {} has min temperature {:.1}°C above max {:.1}°C",
                self.date, self.min_temp_c, self.max_temp_c
            )));
        }
        if self.precipitation_mm < 0.0 {
            return Err(CropCastError::InvalidInput(format!(
                "forecast for {} has negative precipitation",
                self.date
            )));
        }
        if !(0.0..=100.0).contains(&self.humidity_percent) {
            return Err(CropCastError::InvalidInput(format!(
                "forecast for {} has humidity {:.0}% outside 0-100",
                self.date, self.humidity_percent
            )));
        }
        Ok(())
    }
}

/// Check that a forecast is non-empty, well-formed and strictly chronological.
pub fn validate_forecast(days: &[DailyForecast]) -> Result<()> {
    if days.is_empty() {
        return Err(CropCastError::InvalidInput(
            "forecast contains no days".into(),
        ));
    }

    for day in days {
        day.validate()?;
    }

    for pair in days.windows(2) {
        if pair[1].date <= pair[0].date {
            return Err(CropCastError::InvalidInput(format!(
                "forecast dates must be unique and ascending ({} follows {})",
                pair[1].date, pair[0].date
            )));
        }
    }

    Ok(())
}

/// A validated, chronologically ordered forecast. Day 0 is today.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastSet {
    days: Vec<DailyForecast>,
}

impl ForecastSet {
    pub fn new(days: Vec<DailyForecast>) -> Result<Self> {
        validate_forecast(&days)?;
        Ok(Self { days })
    }

    pub fn days(&self) -> &[DailyForecast] {
        &self.days
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn max_temp_c(&self) -> Option<f64> {
        self.days
            .iter()
            .map(|d| d.max_temp_c)
            .max_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
    }

    pub fn min_temp_c(&self) -> Option<f64> {
        self.days
            .iter()
            .map(|d| d.min_temp_c)
            .min_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
    }
}

/// Current conditions plus outlook for one location, as fetched from the
/// weather provider.
#[derive(Debug, Clone, Serialize)]
pub struct WeatherSnapshot {
    pub fetched_at: DateTime<Utc>,
    pub location: String,
    pub coordinates: Coordinates,
    pub temperature_c: f64,
    pub humidity_percent: f64,
    pub rainfall_mm: f64,
    pub forecast: ForecastSet,
    pub planting_window: Option<PlantingWindowVerdict>,
}
