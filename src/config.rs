use crate::error::{CropCastError, Result};
use crate::models::{Coordinates, RuleVariant};
use dialoguer::{Input, Select};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_WEATHER_URL: &str = "https://api.open-meteo.com/v1/forecast";
pub const DEFAULT_GEOCODING_URL: &str = "https://nominatim.openstreetmap.org";
pub const DEFAULT_USER_AGENT: &str = "Smart-Crop-Forecasting-App";
pub const DEFAULT_PREDICTION_DELAY_MS: u64 = 2000;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub farm: FarmConfig,
    #[serde(default)]
    pub location: LocationConfig,
    #[serde(default)]
    pub weather: WeatherConfig,
    #[serde(default)]
    pub geocoding: GeocodingConfig,
    #[serde(default)]
    pub report: ReportConfig,
    #[serde(default)]
    pub prediction: PredictionConfig,
}

/// Form defaults shown when the dashboard opens
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FarmConfig {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crop: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub soil: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub season: Option<String>,
}

impl Default for FarmConfig {
    fn default() -> Self {
        Self {
            name: "My Farm".into(),
            crop: None,
            soil: None,
            season: None,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct LocationConfig {
    #[serde(
        default,
        deserialize_with = "deserialize_coordinate",
        skip_serializing_if = "Option::is_none"
    )]
    pub latitude: Option<f64>,
    #[serde(
        default,
        deserialize_with = "deserialize_coordinate",
        skip_serializing_if = "Option::is_none"
    )]
    pub longitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub place: Option<String>,
}

/// Accepts a number, a numeric string (after `${VAR}` substitution) or an
/// empty string for "not set".
fn deserialize_coordinate<'de, D>(deserializer: D) -> std::result::Result<Option<f64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Error;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
    }

    match Option::<Raw>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Raw::Number(n)) => Ok(Some(n)),
        Some(Raw::Text(s)) if s.trim().is_empty() => Ok(None),
        Some(Raw::Text(s)) => s.trim().parse::<f64>().map(Some).map_err(|_| {
            D::Error::custom(format!(
                "invalid coordinate '{}' - check the location environment variables",
                s
            ))
        }),
    }
}

impl LocationConfig {
    /// Configured coordinates, if both halves are present
    pub fn coordinates(&self) -> Option<Result<Coordinates>> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) => Some(Coordinates::new(lat, lon)),
            _ => None,
        }
    }

    pub fn place(&self) -> Option<&str> {
        self.place
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty())
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WeatherConfig {
    #[serde(default = "default_weather_url")]
    pub base_url: String,
    #[serde(default = "default_forecast_days")]
    pub forecast_days: u8,
}

fn default_weather_url() -> String {
    DEFAULT_WEATHER_URL.into()
}

fn default_forecast_days() -> u8 {
    7
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            base_url: default_weather_url(),
            forecast_days: default_forecast_days(),
        }
    }
}

#[derive(Clone, Deserialize, Serialize)]
pub struct GeocodingConfig {
    #[serde(default = "default_geocoding_url")]
    pub base_url: String,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Contact address sent with each request, as the provider's usage
    /// policy asks for heavy users
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_geocoding_url() -> String {
    DEFAULT_GEOCODING_URL.into()
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.into()
}

fn default_enabled() -> bool {
    true
}

impl Default for GeocodingConfig {
    fn default() -> Self {
        Self {
            base_url: default_geocoding_url(),
            user_agent: default_user_agent(),
            email: None,
            enabled: true,
        }
    }
}

impl std::fmt::Debug for GeocodingConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeocodingConfig")
            .field("base_url", &self.base_url)
            .field("user_agent", &self.user_agent)
            .field("email", &self.email.as_ref().map(|_| "[REDACTED]"))
            .field("enabled", &self.enabled)
            .finish()
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ReportConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_dir: Option<PathBuf>,
}

impl ReportConfig {
    /// Where exported reports land; the working directory when unset
    pub fn output_dir(&self) -> PathBuf {
        self.output_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PredictionConfig {
    #[serde(default = "default_delay_ms")]
    pub delay_ms: u64,
    #[serde(default)]
    pub variant: RuleVariant,
}

fn default_delay_ms() -> u64 {
    DEFAULT_PREDICTION_DELAY_MS
}

impl Default for PredictionConfig {
    fn default() -> Self {
        Self {
            delay_ms: default_delay_ms(),
            variant: RuleVariant::default(),
        }
    }
}

impl Config {
    pub fn load(config_override: Option<PathBuf>) -> Result<Self> {
        let config_path = match config_override {
            Some(p) => p,
            None => Self::find_config_path()?,
        };

        if !config_path.exists() {
            return Err(CropCastError::Config(format!(
                "Config file not found at {:?}. Run `cropcast init` to set up.",
                config_path
            )));
        }

        let config_str = std::fs::read_to_string(&config_path)
            .map_err(|e| CropCastError::Config(format!("Failed to read config: {}", e)))?;

        let config = Self::from_yaml(&config_str)?;
        tracing::debug!("Loaded config from {}", config_path.display());
        Ok(config)
    }

    /// Like `load`, but a missing file yields the built-in defaults.
    /// A file that exists and fails to parse is still an error.
    pub fn load_or_default(config_override: Option<PathBuf>) -> Result<Self> {
        if Self::exists(config_override.as_ref()) {
            Self::load(config_override)
        } else {
            tracing::debug!("No config file found, using defaults");
            Ok(Self::default())
        }
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        let content = Self::substitute_env_vars(content)?;
        serde_yaml::from_str(&content)
            .map_err(|e| CropCastError::Config(format!("Failed to parse config: {}", e)))
    }

    /// Search for config.yaml in standard locations.
    /// Returns the path of the first found config, or the XDG default path if none found.
    fn find_config_path() -> Result<PathBuf> {
        let local_config = PathBuf::from("config/config.yaml");
        if local_config.exists() {
            return Ok(local_config);
        }

        let default_path = Self::default_config_path()?;
        if default_path.exists() {
            return Ok(default_path);
        }

        // Will trigger "not found" in load
        Ok(default_path)
    }

    pub fn exists(config_override: Option<&PathBuf>) -> bool {
        match config_override {
            Some(p) => p.exists(),
            None => Self::find_config_path()
                .map(|p| p.exists())
                .unwrap_or(false),
        }
    }

    /// Default path for writing new config files (~/.config/cropcast/config.yaml).
    pub fn default_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| CropCastError::Config("Cannot determine config directory".into()))?
            .join("cropcast");
        Ok(config_dir.join("config.yaml"))
    }

    /// Run interactive setup prompts and write config to disk.
    /// Returns the new Config and the path it was written to.
    pub fn setup_interactive() -> Result<(Self, PathBuf)> {
        println!();
        println!("No configuration found. Let's set up CropCast!");
        println!();

        println!("Farm");
        let name: String = Input::new()
            .with_prompt("  Farm name")
            .default("My Farm".into())
            .interact_text()
            .map_err(input_error)?;

        println!();

        println!("Location (used for the weather forecast)");
        let how = Select::new()
            .with_prompt("  Locate the farm by")
            .items(&["Place name", "Coordinates", "Skip for now"])
            .default(0)
            .interact()
            .map_err(input_error)?;

        let location = match how {
            0 => {
                let place: String = Input::new()
                    .with_prompt("  Place (town, region or address)")
                    .interact_text()
                    .map_err(input_error)?;
                LocationConfig {
                    place: Some(place),
                    ..LocationConfig::default()
                }
            }
            1 => {
                let latitude: f64 = Input::new()
                    .with_prompt("  Latitude")
                    .validate_with(|v: &f64| {
                        if (-90.0..=90.0).contains(v) {
                            Ok(())
                        } else {
                            Err("latitude must be between -90 and 90")
                        }
                    })
                    .interact_text()
                    .map_err(input_error)?;
                let longitude: f64 = Input::new()
                    .with_prompt("  Longitude")
                    .validate_with(|v: &f64| {
                        if (-180.0..=180.0).contains(v) {
                            Ok(())
                        } else {
                            Err("longitude must be between -180 and 180")
                        }
                    })
                    .interact_text()
                    .map_err(input_error)?;
                LocationConfig {
                    latitude: Some(latitude),
                    longitude: Some(longitude),
                    place: None,
                }
            }
            _ => LocationConfig::default(),
        };

        println!();

        println!("Recommendations");
        let variant = Select::new()
            .with_prompt("  Trait rule table")
            .items(&[
                "Standard (cold stress below 10°C)",
                "Extended (cold stress below 15°C, pest resistance baseline)",
            ])
            .default(0)
            .interact()
            .map_err(input_error)?;

        println!();

        let config = Config {
            farm: FarmConfig {
                name,
                ..FarmConfig::default()
            },
            location,
            prediction: PredictionConfig {
                variant: if variant == 1 {
                    RuleVariant::Extended
                } else {
                    RuleVariant::Standard
                },
                ..PredictionConfig::default()
            },
            ..Config::default()
        };

        let config_path = Self::default_config_path()?;
        config.save(&config_path)?;

        println!("Configuration saved to {}", config_path.display());
        println!();

        Ok((config, config_path))
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let yaml = serde_yaml::to_string(self)
            .map_err(|e| CropCastError::Config(format!("Failed to serialize config: {}", e)))?;

        let content = format!(
            "# CropCast Configuration\n# Generated by `cropcast init`\n# Environment variable substitution (${{VAR}}) is supported.\n\n{}",
            yaml
        );
        std::fs::write(path, content)?;
        Ok(())
    }

    fn substitute_env_vars(content: &str) -> Result<String> {
        let mut result = content.to_string();

        let re = regex_lite::Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
            .map_err(|e| CropCastError::Config(format!("Bad substitution pattern: {}", e)))?;

        for cap in re.captures_iter(content) {
            let var_name = &cap[1];
            let placeholder = &cap[0];
            match std::env::var(var_name) {
                Ok(value) => result = result.replace(placeholder, &value),
                Err(_) => tracing::warn!("Config references unset variable {}", var_name),
            }
        }

        Ok(result)
    }

    pub fn data_dir(data_dir_override: Option<&PathBuf>) -> Result<PathBuf> {
        if let Some(dir) = data_dir_override {
            std::fs::create_dir_all(dir)?;
            return Ok(dir.clone());
        }

        if let Ok(dir) = std::env::var("CROPCAST_DATA_DIR") {
            let p = PathBuf::from(dir);
            std::fs::create_dir_all(&p)?;
            return Ok(p);
        }

        let data_dir = dirs::data_dir()
            .ok_or_else(|| CropCastError::Config("Cannot determine data directory".into()))?
            .join("cropcast");

        std::fs::create_dir_all(&data_dir)?;
        Ok(data_dir)
    }

    pub fn log_path(data_dir_override: Option<&PathBuf>) -> Result<PathBuf> {
        Ok(Self::data_dir(data_dir_override)?.join("cropcast.log"))
    }
}

fn input_error(e: dialoguer::Error) -> CropCastError {
    CropCastError::Config(format!("Input error: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_uses_defaults() {
        let config = Config::from_yaml("{}").unwrap();
        assert_eq!(config.farm.name, "My Farm");
        assert_eq!(config.weather.base_url, DEFAULT_WEATHER_URL);
        assert_eq!(config.weather.forecast_days, 7);
        assert_eq!(config.geocoding.user_agent, DEFAULT_USER_AGENT);
        assert!(config.geocoding.enabled);
        assert_eq!(config.prediction.delay_ms, 2000);
        assert_eq!(config.prediction.variant, RuleVariant::Standard);
        assert!(config.location.coordinates().is_none());
        assert_eq!(config.report.output_dir(), PathBuf::from("."));
    }

    #[test]
    fn substitutes_environment_variables() {
        std::env::set_var("CROPCAST_TEST_LAT", "28.61");
        std::env::set_var("CROPCAST_TEST_FARM", "North Field");
        let yaml = r#"
farm:
  name: "${CROPCAST_TEST_FARM}"
location:
  latitude: "${CROPCAST_TEST_LAT}"
  longitude: 77.2
prediction:
  variant: extended
  delay_ms: 500
"#;
        let config = Config::from_yaml(yaml).unwrap();
        assert_eq!(config.farm.name, "North Field");
        let coords = config.location.coordinates().unwrap().unwrap();
        assert!((coords.latitude - 28.61).abs() < 1e-9);
        assert!((coords.longitude - 77.2).abs() < 1e-9);
        assert_eq!(config.prediction.variant, RuleVariant::Extended);
        assert_eq!(config.prediction.delay_ms, 500);
    }

    #[test]
    fn unset_variable_is_left_in_place() {
        let yaml = "farm:\n  name: \"${CROPCAST_TEST_DEFINITELY_UNSET}\"\n";
        let config = Config::from_yaml(yaml).unwrap();
        assert_eq!(config.farm.name, "${CROPCAST_TEST_DEFINITELY_UNSET}");
    }

    #[test]
    fn empty_coordinate_means_unset() {
        let yaml = "location:\n  latitude: \"\"\n  longitude: \"\"\n  place: \"  Pune  \"\n";
        let config = Config::from_yaml(yaml).unwrap();
        assert!(config.location.coordinates().is_none());
        assert_eq!(config.location.place(), Some("Pune"));
    }

    #[test]
    fn bad_coordinate_is_a_config_error() {
        let err = Config::from_yaml("location:\n  latitude: north\n").unwrap_err();
        assert!(matches!(err, CropCastError::Config(_)));
    }

    #[test]
    fn out_of_range_coordinates_are_rejected() {
        let yaml = "location:\n  latitude: 123.0\n  longitude: 10.0\n";
        let config = Config::from_yaml(yaml).unwrap();
        assert!(config.location.coordinates().unwrap().is_err());
    }

    #[test]
    fn debug_redacts_contact_email() {
        let config = GeocodingConfig {
            email: Some("farmer@example.com".into()),
            ..GeocodingConfig::default()
        };
        let debug = format!("{:?}", config);
        assert!(!debug.contains("farmer@example.com"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn save_and_load_round_trip() {
        let dir = std::env::temp_dir().join(format!("cropcast-config-{}", std::process::id()));
        let path = dir.join("config.yaml");
        let config = Config {
            location: LocationConfig {
                place: Some("Nashik".into()),
                ..LocationConfig::default()
            },
            ..Config::default()
        };
        config.save(&path).unwrap();
        let loaded = Config::load(Some(path.clone())).unwrap();
        assert_eq!(loaded.location.place(), Some("Nashik"));
        std::fs::remove_dir_all(dir).unwrap();
    }
}
