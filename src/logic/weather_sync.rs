use super::PlantingWindowAnalyzer;
use crate::config::Config;
use crate::datasources::{NominatimClient, OpenMeteoClient, WeatherReading, UNKNOWN_LOCATION};
use crate::error::{CropCastError, Result};
use crate::models::{Coordinates, WeatherSnapshot};
use chrono::Utc;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Where the user asked for weather, before resolution
#[derive(Debug, Clone, Default)]
pub struct LocationRequest {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub place: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedLocation {
    pub coordinates: Coordinates,
    /// Known when the location came from a place search
    pub name: Option<String>,
}

pub struct WeatherService {
    config: Config,
    weather_client: OpenMeteoClient,
    geocoding_client: Option<NominatimClient>,
    analyzer: PlantingWindowAnalyzer,
    current: Arc<RwLock<Option<WeatherSnapshot>>>,
}

impl WeatherService {
    pub fn new(config: Config) -> Self {
        let geocoding_client = if config.geocoding.enabled {
            Some(NominatimClient::new(config.geocoding.clone()))
        } else {
            tracing::info!("Geocoding disabled - locations will show as coordinates only");
            None
        };

        Self {
            weather_client: OpenMeteoClient::new(config.weather.clone()),
            geocoding_client,
            analyzer: PlantingWindowAnalyzer::new(),
            current: Arc::new(RwLock::new(None)),
            config,
        }
    }

    /// Command-line coordinates, then command-line place, then the configured
    /// coordinates, then the configured place
    pub async fn resolve_location(&self, request: &LocationRequest) -> Result<ResolvedLocation> {
        match (request.latitude, request.longitude) {
            (Some(lat), Some(lon)) => {
                return Ok(ResolvedLocation {
                    coordinates: Coordinates::new(lat, lon)?,
                    name: None,
                });
            }
            (Some(_), None) | (None, Some(_)) => {
                return Err(CropCastError::InvalidInput(
                    "latitude and longitude must be given together".into(),
                ));
            }
            (None, None) => {}
        }

        if let Some(place) = request.place.as_deref().filter(|p| !p.trim().is_empty()) {
            return self.search_place(place).await;
        }

        if let Some(coords) = self.config.location.coordinates() {
            return Ok(ResolvedLocation {
                coordinates: coords?,
                name: None,
            });
        }

        if let Some(place) = self.config.location.place() {
            return self.search_place(place).await;
        }

        Err(CropCastError::LocationUnavailable(
            "no coordinates or place given; pass --lat/--lon or --place, or set location in config"
                .into(),
        ))
    }

    async fn search_place(&self, place: &str) -> Result<ResolvedLocation> {
        let client = self.geocoding_client.as_ref().ok_or_else(|| {
            CropCastError::LocationUnavailable(format!(
                "cannot look up '{}' with geocoding disabled",
                place
            ))
        })?;

        let found = client.search(place).await?;
        tracing::debug!("Resolved '{}' to {}", place, found.coordinates);

        let short_name = found
            .name
            .split(',')
            .next()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(place)
            .to_string();

        Ok(ResolvedLocation {
            coordinates: found.coordinates,
            name: Some(short_name),
        })
    }

    /// Resolve a location and fetch its weather
    pub async fn fetch_for(&self, request: &LocationRequest) -> Result<WeatherSnapshot> {
        let location = self.resolve_location(request).await?;
        self.fetch_resolved(&location).await
    }

    pub async fn fetch(&self, coords: Coordinates) -> Result<WeatherSnapshot> {
        self.fetch_resolved(&ResolvedLocation {
            coordinates: coords,
            name: None,
        })
        .await
    }

    async fn fetch_resolved(&self, location: &ResolvedLocation) -> Result<WeatherSnapshot> {
        let reading = self.weather_client.fetch(location.coordinates).await?;

        let name = match location.name {
            Some(ref name) => name.clone(),
            None => self.location_name(location.coordinates).await,
        };

        let snapshot = self.build_snapshot(location.coordinates, name, reading);

        let mut current = self.current.write().await;
        *current = Some(snapshot.clone());
        tracing::debug!("Weather snapshot updated for {}", snapshot.location);

        Ok(snapshot)
    }

    async fn location_name(&self, coords: Coordinates) -> String {
        let Some(ref client) = self.geocoding_client else {
            return UNKNOWN_LOCATION.to_string();
        };

        match client.reverse(coords).await {
            Ok(name) => name,
            Err(e) => {
                tracing::warn!("Reverse geocoding failed for {}: {}", coords, e);
                UNKNOWN_LOCATION.to_string()
            }
        }
    }

    fn build_snapshot(
        &self,
        coordinates: Coordinates,
        location: String,
        reading: WeatherReading,
    ) -> WeatherSnapshot {
        let planting_window = match self.analyzer.analyze(reading.forecast.days()) {
            Ok(verdict) => Some(verdict),
            Err(e) => {
                tracing::warn!("Planting window analysis failed: {}", e);
                None
            }
        };

        WeatherSnapshot {
            fetched_at: Utc::now(),
            location,
            coordinates,
            temperature_c: reading.temperature_c,
            humidity_percent: reading.humidity_percent,
            rainfall_mm: reading.rainfall_mm,
            forecast: reading.forecast,
            planting_window,
        }
    }

    pub async fn get_current(&self) -> Option<WeatherSnapshot> {
        self.current.read().await.clone()
    }

    pub async fn check_connections(&self) -> ConnectionStatus {
        let mut status = ConnectionStatus::default();

        status.weather = self
            .weather_client
            .test_connection()
            .await
            .unwrap_or(false);

        if let Some(ref client) = self.geocoding_client {
            status.geocoding = client.test_connection().await.unwrap_or(false);
        }

        status
    }
}

#[derive(Debug, Clone, Default)]
pub struct ConnectionStatus {
    pub weather: bool,
    pub geocoding: bool,
}

impl ConnectionStatus {
    pub fn all_connected(&self) -> bool {
        self.weather && self.geocoding
    }

    pub fn summary(&self) -> String {
        let state = |ok: bool| if ok { "OK" } else { "OFFLINE" };
        format!(
            "Weather: {} | Geocoding: {}",
            state(self.weather),
            state(self.geocoding)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{GeocodingConfig, LocationConfig};
    use crate::models::{DailyForecast, ForecastSet};
    use chrono::NaiveDate;

    fn service(location: LocationConfig, geocoding: bool) -> WeatherService {
        WeatherService::new(Config {
            location,
            geocoding: GeocodingConfig {
                enabled: geocoding,
                ..GeocodingConfig::default()
            },
            ..Config::default()
        })
    }

    fn reading(days: Vec<DailyForecast>) -> WeatherReading {
        WeatherReading {
            temperature_c: 24.0,
            humidity_percent: 60.0,
            rainfall_mm: 0.0,
            forecast: ForecastSet::new(days).unwrap(),
        }
    }

    fn day(offset: u32, max: f64, min: f64, precip: f64) -> DailyForecast {
        let date = NaiveDate::from_ymd_opt(2025, 6, 1 + offset).unwrap();
        DailyForecast::new(date, max, min, precip, 60.0)
    }

    #[tokio::test]
    async fn command_line_coordinates_win() {
        let svc = service(
            LocationConfig {
                latitude: Some(10.0),
                longitude: Some(10.0),
                place: Some("Pune".into()),
            },
            false,
        );
        let request = LocationRequest {
            latitude: Some(18.5),
            longitude: Some(73.8),
            place: Some("Nashik".into()),
        };
        let resolved = svc.resolve_location(&request).await.unwrap();
        assert_eq!(resolved.coordinates, Coordinates::new(18.5, 73.8).unwrap());
        assert!(resolved.name.is_none());
    }

    #[tokio::test]
    async fn half_a_coordinate_is_invalid() {
        let svc = service(LocationConfig::default(), false);
        let request = LocationRequest {
            latitude: Some(18.5),
            ..LocationRequest::default()
        };
        let err = svc.resolve_location(&request).await.unwrap_err();
        assert!(matches!(err, CropCastError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn falls_back_to_configured_coordinates() {
        let svc = service(
            LocationConfig {
                latitude: Some(28.6),
                longitude: Some(77.2),
                place: None,
            },
            false,
        );
        let resolved = svc
            .resolve_location(&LocationRequest::default())
            .await
            .unwrap();
        assert_eq!(resolved.coordinates, Coordinates::new(28.6, 77.2).unwrap());
    }

    #[tokio::test]
    async fn nothing_configured_is_location_unavailable() {
        let svc = service(LocationConfig::default(), true);
        let err = svc
            .resolve_location(&LocationRequest::default())
            .await
            .unwrap_err();
        assert!(matches!(err, CropCastError::LocationUnavailable(_)));
    }

    #[tokio::test]
    async fn place_lookup_needs_geocoding() {
        let svc = service(LocationConfig::default(), false);
        let request = LocationRequest {
            place: Some("Nashik".into()),
            ..LocationRequest::default()
        };
        let err = svc.resolve_location(&request).await.unwrap_err();
        assert!(matches!(err, CropCastError::LocationUnavailable(_)));
    }

    #[tokio::test]
    async fn unknown_location_without_geocoding() {
        let svc = service(LocationConfig::default(), false);
        let name = svc.location_name(Coordinates::new(1.0, 1.0).unwrap()).await;
        assert_eq!(name, UNKNOWN_LOCATION);
    }

    #[test]
    fn snapshot_carries_planting_verdict() {
        let svc = service(LocationConfig::default(), false);
        let days = (0..7).map(|i| day(i, 25.0, 15.0, 5.0)).collect();
        let snapshot = svc.build_snapshot(
            Coordinates::new(18.5, 73.8).unwrap(),
            "Pune".into(),
            reading(days),
        );
        assert_eq!(snapshot.location, "Pune");
        assert_eq!(snapshot.forecast.len(), 7);
        let verdict = snapshot.planting_window.unwrap();
        assert!(verdict.recommended);
        assert_eq!(verdict.best_days.len(), 3);
    }

    #[test]
    fn connection_summary() {
        let status = ConnectionStatus {
            weather: true,
            geocoding: false,
        };
        assert!(!status.all_connected());
        assert_eq!(status.summary(), "Weather: OK | Geocoding: OFFLINE");
    }
}
