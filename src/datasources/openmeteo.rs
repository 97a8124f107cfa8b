use crate::config::WeatherConfig;
use crate::error::{CropCastError, Result};
use crate::models::{Coordinates, DailyForecast, ForecastSet};
use chrono::NaiveDate;
use serde::Deserialize;

const CURRENT_FIELDS: &str = "temperature_2m,relative_humidity_2m";
const DAILY_FIELDS: &str =
    "temperature_2m_max,temperature_2m_min,precipitation_sum,relative_humidity_2m_mean";

pub struct OpenMeteoClient {
    client: reqwest::Client,
    config: WeatherConfig,
}

/// Current conditions plus the daily outlook, rounded for display
#[derive(Debug, Clone)]
pub struct WeatherReading {
    pub temperature_c: f64,
    pub humidity_percent: f64,
    /// Today's precipitation total
    pub rainfall_mm: f64,
    pub forecast: ForecastSet,
}

// Open-Meteo API response structures
#[derive(Debug, Deserialize)]
struct OmResponse {
    current: OmCurrent,
    daily: OmDaily,
}

#[derive(Debug, Deserialize)]
struct OmCurrent {
    temperature_2m: f64,
    relative_humidity_2m: f64,
}

#[derive(Debug, Deserialize)]
struct OmDaily {
    time: Vec<String>,
    temperature_2m_max: Vec<Option<f64>>,
    temperature_2m_min: Vec<Option<f64>>,
    #[serde(default)]
    precipitation_sum: Vec<Option<f64>>,
    #[serde(default)]
    relative_humidity_2m_mean: Vec<Option<f64>>,
}

/// Half-up rounding to whole units, the way the dashboard shows readings
fn round_reading(value: f64) -> f64 {
    (value + 0.5).floor()
}

impl OpenMeteoClient {
    pub fn new(config: WeatherConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    fn forecast_url(&self, coords: Coordinates, days: u8) -> String {
        format!(
            "{}?latitude={}&longitude={}&current={}&daily={}&timezone=auto&forecast_days={}",
            self.config.base_url,
            coords.latitude,
            coords.longitude,
            CURRENT_FIELDS,
            DAILY_FIELDS,
            days
        )
    }

    /// Fetch current conditions and the daily forecast for a location
    pub async fn fetch(&self, coords: Coordinates) -> Result<WeatherReading> {
        let url = self.forecast_url(coords, self.config.forecast_days);
        tracing::debug!("Fetching forecast for {}", coords);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| CropCastError::DataSourceUnavailable(format!("Open-Meteo: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(CropCastError::DataSourceUnavailable(format!(
                "Open-Meteo returned {}: {}",
                status, body
            )));
        }

        let om_response: OmResponse = response.json().await.map_err(|e| {
            CropCastError::DataSourceUnavailable(format!(
                "Failed to parse Open-Meteo response: {}",
                e
            ))
        })?;

        convert_response(om_response)
    }

    /// Test connection to the Open-Meteo API
    pub async fn test_connection(&self) -> Result<bool> {
        let probe = Coordinates {
            latitude: 0.0,
            longitude: 0.0,
        };
        let url = self.forecast_url(probe, 1);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| CropCastError::DataSourceUnavailable(format!("Open-Meteo: {}", e)))?;

        Ok(response.status().is_success())
    }
}

fn convert_response(response: OmResponse) -> Result<WeatherReading> {
    let current_humidity = round_reading(response.current.relative_humidity_2m);
    let daily = response.daily;
    let rainfall_mm = daily
        .precipitation_sum
        .first()
        .copied()
        .flatten()
        .map(round_reading)
        .unwrap_or(0.0);

    let mut days = Vec::with_capacity(daily.time.len());
    for (i, raw_date) in daily.time.iter().enumerate() {
        let date = NaiveDate::parse_from_str(raw_date, "%Y-%m-%d").map_err(|e| {
            CropCastError::DataSourceUnavailable(format!(
                "Open-Meteo returned a bad date '{}': {}",
                raw_date, e
            ))
        })?;

        let max = daily.temperature_2m_max.get(i).copied().flatten();
        let min = daily.temperature_2m_min.get(i).copied().flatten();
        let (Some(max), Some(min)) = (max, min) else {
            tracing::warn!("Skipping forecast day {} with missing temperatures", date);
            continue;
        };

        let precipitation = daily
            .precipitation_sum
            .get(i)
            .copied()
            .flatten()
            .unwrap_or(0.0);
        let humidity = daily
            .relative_humidity_2m_mean
            .get(i)
            .copied()
            .flatten()
            .map(round_reading)
            .unwrap_or(current_humidity);

        days.push(DailyForecast::new(
            date,
            round_reading(max),
            round_reading(min),
            round_reading(precipitation),
            humidity,
        ));
    }

    let forecast = ForecastSet::new(days).map_err(|e| {
        CropCastError::DataSourceUnavailable(format!("Open-Meteo forecast unusable: {}", e))
    })?;

    Ok(WeatherReading {
        temperature_c: round_reading(response.current.temperature_2m),
        humidity_percent: current_humidity,
        rainfall_mm,
        forecast,
    })
}
