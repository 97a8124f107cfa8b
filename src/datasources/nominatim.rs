use crate::config::GeocodingConfig;
use crate::error::{CropCastError, Result};
use crate::models::Coordinates;
use reqwest::header::USER_AGENT;
use reqwest::Url;
use serde::Deserialize;

pub const UNKNOWN_LOCATION: &str = "Unknown Location";

pub struct NominatimClient {
    client: reqwest::Client,
    config: GeocodingConfig,
}

/// A forward-geocoding hit
#[derive(Debug, Clone, PartialEq)]
pub struct Place {
    pub name: String,
    pub coordinates: Coordinates,
}

#[derive(Debug, Deserialize)]
struct NomReverse {
    #[serde(default)]
    display_name: Option<String>,
    #[serde(default)]
    address: Option<NomAddress>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct NomAddress {
    city: Option<String>,
    town: Option<String>,
    village: Option<String>,
    state: Option<String>,
}

#[derive(Debug, Deserialize)]
struct NomSearchHit {
    // Nominatim sends coordinates as strings
    lat: String,
    lon: String,
    display_name: String,
}

impl NominatimClient {
    pub fn new(config: GeocodingConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    fn url(&self, path: &str, params: &[(&str, String)]) -> Result<Url> {
        let mut all: Vec<(&str, String)> = vec![
            ("format", "json".to_string()),
            ("accept-language", "en".to_string()),
        ];
        all.extend(params.iter().cloned());
        if let Some(ref email) = self.config.email {
            all.push(("email", email.clone()));
        }

        let base = format!("{}/{}", self.config.base_url.trim_end_matches('/'), path);
        Url::parse_with_params(&base, &all).map_err(|e| {
            CropCastError::Config(format!("Invalid geocoding URL '{}': {}", base, e))
        })
    }

    async fn get(&self, url: Url) -> Result<reqwest::Response> {
        let response = self
            .client
            .get(url)
            .header(USER_AGENT, &self.config.user_agent)
            .send()
            .await
            .map_err(|e| CropCastError::DataSourceUnavailable(format!("Nominatim: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(CropCastError::DataSourceUnavailable(format!(
                "Nominatim returned {}: {}",
                status, body
            )));
        }

        Ok(response)
    }

    /// Human-readable name for a coordinate pair
    pub async fn reverse(&self, coords: Coordinates) -> Result<String> {
        let url = self.url(
            "reverse",
            &[
                ("lat", coords.latitude.to_string()),
                ("lon", coords.longitude.to_string()),
            ],
        )?;

        let reply: NomReverse = self.get(url).await?.json().await.map_err(|e| {
            CropCastError::DataSourceUnavailable(format!(
                "Failed to parse Nominatim response: {}",
                e
            ))
        })?;

        if let Some(error) = reply.error {
            return Err(CropCastError::NotFound(format!(
                "No place at {}: {}",
                coords, error
            )));
        }

        Ok(location_name(&reply))
    }

    /// First match for a free-text place name
    pub async fn search(&self, place: &str) -> Result<Place> {
        let url = self.url(
            "search",
            &[("q", place.to_string()), ("limit", "1".to_string())],
        )?;

        let hits: Vec<NomSearchHit> = self.get(url).await?.json().await.map_err(|e| {
            CropCastError::DataSourceUnavailable(format!(
                "Failed to parse Nominatim response: {}",
                e
            ))
        })?;

        first_place(place, hits)
    }

    pub async fn test_connection(&self) -> Result<bool> {
        let url = self.url("status", &[])?;

        let response = self
            .client
            .get(url)
            .header(USER_AGENT, &self.config.user_agent)
            .send()
            .await
            .map_err(|e| CropCastError::DataSourceUnavailable(format!("Nominatim: {}", e)))?;

        Ok(response.status().is_success())
    }
}

/// city, town, village, state, then the first segment of display_name
fn location_name(reply: &NomReverse) -> String {
    let from_address = reply.address.as_ref().and_then(|a| {
        [&a.city, &a.town, &a.village, &a.state]
            .into_iter()
            .flatten()
            .map(|s| s.trim())
            .find(|s| !s.is_empty())
    });

    let from_display = || {
        reply
            .display_name
            .as_deref()
            .and_then(|d| d.split(',').next())
            .map(str::trim)
            .filter(|s| !s.is_empty())
    };

    from_address
        .or_else(from_display)
        .unwrap_or(UNKNOWN_LOCATION)
        .to_string()
}

fn first_place(query: &str, hits: Vec<NomSearchHit>) -> Result<Place> {
    let hit = hits
        .into_iter()
        .next()
        .ok_or_else(|| CropCastError::NotFound(format!("No place matches '{}'", query)))?;

    let parse = |v: &str| {
        v.parse::<f64>().map_err(|_| {
            CropCastError::DataSourceUnavailable(format!(
                "Nominatim returned bad coordinate '{}'",
                v
            ))
        })
    };

    Ok(Place {
        name: hit.display_name,
        coordinates: Coordinates::new(parse(&hit.lat)?, parse(&hit.lon)?)?,
    })
}
