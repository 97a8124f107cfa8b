use crate::logic::LocationRequest;
use crate::models::{CropType, FarmingConditions, GeneticTrait, RuleVariant, Season, SoilType};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "cropcast",
    version,
    about = "Crop planning TUI with weather-driven planting windows"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Path to config.yaml
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Override the data directory (log file)
    #[arg(short, long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Increase log verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Re-run interactive setup
    Init,
    /// Validate config and test connections
    Check,
    /// Recommend genetic traits and crops for the given conditions
    Recommend(RecommendArgs),
    /// Show the 7-day forecast and planting window for a location
    Forecast(ForecastArgs),
    /// Write a prediction report to a text file
    Report(ReportArgs),
}

#[derive(Args, Debug, Clone)]
pub struct ConditionArgs {
    #[arg(long, value_parser = parse_crop)]
    pub crop: CropType,

    #[arg(long, value_parser = parse_soil)]
    pub soil: SoilType,

    #[arg(long, value_parser = parse_season)]
    pub season: Season,

    /// Average temperature in °C
    #[arg(long, allow_negative_numbers = true)]
    pub temperature: f64,

    /// Expected rainfall in mm
    #[arg(long)]
    pub rainfall: f64,

    /// Traits you intend to breed for, comma separated
    #[arg(long, value_parser = parse_trait, value_delimiter = ',')]
    pub traits: Vec<GeneticTrait>,

    /// Rule table to use instead of the configured one
    #[arg(long, value_parser = parse_variant)]
    pub variant: Option<RuleVariant>,
}

impl ConditionArgs {
    pub fn conditions(&self) -> FarmingConditions {
        FarmingConditions::new(
            self.crop,
            self.soil,
            self.season,
            self.temperature,
            self.rainfall,
        )
    }
}

#[derive(Args, Debug, Clone, Default)]
pub struct LocationArgs {
    /// Latitude in decimal degrees
    #[arg(long, requires = "lon", allow_negative_numbers = true)]
    pub lat: Option<f64>,

    /// Longitude in decimal degrees
    #[arg(long, requires = "lat", allow_negative_numbers = true)]
    pub lon: Option<f64>,

    /// Place name to look up instead of coordinates
    #[arg(long, conflicts_with_all = ["lat", "lon"])]
    pub place: Option<String>,
}

impl From<&LocationArgs> for LocationRequest {
    fn from(args: &LocationArgs) -> Self {
        LocationRequest {
            latitude: args.lat,
            longitude: args.lon,
            place: args.place.clone(),
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct RecommendArgs {
    #[command(flatten)]
    pub conditions: ConditionArgs,

    /// Print JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug, Clone)]
pub struct ForecastArgs {
    #[command(flatten)]
    pub location: LocationArgs,

    /// Print JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug, Clone)]
pub struct ReportArgs {
    #[command(flatten)]
    pub conditions: ConditionArgs,

    #[command(flatten)]
    pub location: LocationArgs,

    /// Fetch live weather and include the planting window
    #[arg(long)]
    pub with_weather: bool,

    /// Directory to write the report into
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

fn choices(ids: impl Iterator<Item = &'static str>) -> String {
    ids.collect::<Vec<_>>().join(", ")
}

fn parse_crop(s: &str) -> Result<CropType, String> {
    CropType::from_str(s).ok_or_else(|| {
        format!(
            "unknown crop '{}' (expected one of: {})",
            s,
            choices(CropType::all().iter().map(|c| c.id()))
        )
    })
}

fn parse_soil(s: &str) -> Result<SoilType, String> {
    SoilType::from_str(s).ok_or_else(|| {
        format!(
            "unknown soil '{}' (expected one of: {})",
            s,
            choices(SoilType::all().iter().map(|t| t.as_str()))
        )
    })
}

fn parse_season(s: &str) -> Result<Season, String> {
    Season::from_str(s).ok_or_else(|| {
        format!(
            "unknown season '{}' (expected one of: {})",
            s,
            choices(Season::all().iter().map(|t| t.as_str()))
        )
    })
}

fn parse_trait(s: &str) -> Result<GeneticTrait, String> {
    let wanted = s.trim().replace(['-', '_', ' '], "").to_lowercase();
    GeneticTrait::all()
        .iter()
        .copied()
        .find(|t| t.id().to_lowercase() == wanted)
        .ok_or_else(|| {
            format!(
                "unknown trait '{}' (expected one of: {})",
                s,
                choices(GeneticTrait::all().iter().map(|t| t.id()))
            )
        })
}

fn parse_variant(s: &str) -> Result<RuleVariant, String> {
    match s.trim().to_lowercase().as_str() {
        "standard" => Ok(RuleVariant::Standard),
        "extended" => Ok(RuleVariant::Extended),
        _ => Err(format!(
            "unknown rule variant '{}' (standard or extended)",
            s
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("cropcast").chain(args.iter().copied()))
    }

    #[test]
    fn no_subcommand_runs_tui() {
        let cli = parse(&[]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn recommend_parses_conditions() {
        let cli = parse(&[
            "recommend", "--crop", "maize", "--soil", "Loamy", "--season", "kharif",
            "--temperature", "-2.5", "--rainfall", "640", "--traits", "droughtTolerance,high-yield",
            "--json", "-vv",
        ])
        .unwrap();
        let Some(Commands::Recommend(args)) = cli.command else {
            panic!("expected recommend");
        };
        assert!(args.json);
        assert_eq!(cli.verbose, 2);
        let c = args.conditions.conditions();
        assert_eq!(c.crop, Some(CropType::Corn));
        assert_eq!(c.soil, Some(SoilType::Loamy));
        assert_eq!(c.season, Some(Season::Kharif));
        assert_eq!(c.temperature_c, -2.5);
        assert_eq!(
            args.conditions.traits,
            vec![GeneticTrait::DroughtTolerance, GeneticTrait::HighYield]
        );
    }

    #[test]
    fn unknown_values_are_rejected() {
        let err = parse(&[
            "recommend", "--crop", "quinoa", "--soil", "clay", "--season", "summer",
            "--temperature", "20", "--rainfall", "500",
        ]);
        assert!(err.is_err());
    }

    #[test]
    fn forecast_location_rules() {
        let cli = parse(&["forecast", "--lat", "-33.9", "--lon", "18.4"]).unwrap();
        let Some(Commands::Forecast(args)) = cli.command else {
            panic!("expected forecast");
        };
        let request = LocationRequest::from(&args.location);
        assert_eq!(request.latitude, Some(-33.9));
        assert_eq!(request.longitude, Some(18.4));

        assert!(parse(&["forecast", "--lat", "10"]).is_err());
        assert!(parse(&["forecast", "--place", "Pune", "--lat", "1", "--lon", "2"]).is_err());
        assert!(parse(&["forecast", "--place", "Pune"]).is_ok());
    }

    #[test]
    fn report_takes_output_and_weather_flag() {
        let cli = parse(&[
            "report", "--crop", "rice", "--soil", "clay", "--season", "monsoon",
            "--temperature", "25", "--rainfall", "200", "--with-weather", "--place", "Pune",
            "--output", "/tmp/reports", "--variant", "extended",
        ])
        .unwrap();
        let Some(Commands::Report(args)) = cli.command else {
            panic!("expected report");
        };
        assert!(args.with_weather);
        assert_eq!(args.output, Some(PathBuf::from("/tmp/reports")));
        assert_eq!(args.conditions.variant, Some(RuleVariant::Extended));
        assert!(args.conditions.traits.is_empty());
    }
}
