use crate::config::{Config, FarmConfig};
use crate::error::Result;
use crate::logic::Predictor;
use crate::models::{
    ChartSeries, CropType, FarmingConditions, GeneticTrait, PredictionResults, Season, SoilType,
    WeatherSnapshot,
};
use crate::report::ReportBuilder;
use crate::ui::screens::FormField;
use std::path::PathBuf;
use std::time::{Duration, Instant};

pub const FORM_INCOMPLETE: &str = "Please fill all fields";
pub const PREDICTION_DONE: &str = "Prediction completed successfully!";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Dashboard,
    Forecast,
    Results,
}

impl Screen {
    pub fn from_key(c: char) -> Option<Self> {
        match c {
            '1' => Some(Screen::Dashboard),
            '2' => Some(Screen::Forecast),
            '3' => Some(Screen::Results),
            _ => None,
        }
    }
}

fn cycle_index(current: Option<usize>, len: usize, forward: bool) -> Option<usize> {
    if len == 0 {
        return None;
    }
    Some(match (current, forward) {
        (None, true) => 0,
        (None, false) => len - 1,
        (Some(i), true) => (i + 1) % len,
        (Some(i), false) => (i + len - 1) % len,
    })
}

fn index_of<T: PartialEq>(all: &[T], value: Option<T>) -> Option<usize> {
    value.and_then(|v| all.iter().position(|x| *x == v))
}

pub struct FormState {
    pub focused_field: FormField,
    pub crop: Option<usize>,
    pub soil: Option<usize>,
    pub season: Option<usize>,
    pub temperature: String,
    pub rainfall: String,
    pub selected_traits: Vec<GeneticTrait>,
    pub trait_cursor: usize,
}

impl FormState {
    pub fn new() -> Self {
        Self {
            focused_field: FormField::Crop,
            crop: None,
            soil: None,
            season: None,
            temperature: String::new(),
            rainfall: String::new(),
            selected_traits: Vec::new(),
            trait_cursor: 0,
        }
    }

    /// Pre-select whatever the farm section of the config names
    /// Prefill the dropdowns from the farm profile; unknown names stay unselected
    pub fn from_farm(farm: &FarmConfig) -> Self {
        let profile = FarmingConditions::parse(
            farm.crop.as_deref().unwrap_or_default(),
            farm.soil.as_deref().unwrap_or_default(),
            farm.season.as_deref().unwrap_or_default(),
            0.0,
            0.0,
        );

        let mut form = Self::new();
        form.crop = index_of(CropType::all(), profile.crop);
        form.soil = index_of(SoilType::all(), profile.soil);
        form.season = index_of(Season::all(), profile.season);
        form
    }

    pub fn crop(&self) -> Option<CropType> {
        self.crop.and_then(|i| CropType::all().get(i)).copied()
    }

    pub fn soil(&self) -> Option<SoilType> {
        self.soil.and_then(|i| SoilType::all().get(i)).copied()
    }

    pub fn season(&self) -> Option<Season> {
        self.season.and_then(|i| Season::all().get(i)).copied()
    }

    pub fn next_field(&mut self) {
        self.focused_field = self.focused_field.next();
    }

    pub fn prev_field(&mut self) {
        self.focused_field = self.focused_field.prev();
    }

    pub fn is_text_field(&self) -> bool {
        matches!(
            self.focused_field,
            FormField::Temperature | FormField::Rainfall
        )
    }

    /// Left/right on the focused field: cycle a dropdown or move the trait cursor
    pub fn cycle(&mut self, forward: bool) {
        match self.focused_field {
            FormField::Crop => self.crop = cycle_index(self.crop, CropType::all().len(), forward),
            FormField::Soil => self.soil = cycle_index(self.soil, SoilType::all().len(), forward),
            FormField::Season => {
                self.season = cycle_index(self.season, Season::all().len(), forward)
            }
            FormField::Traits => {
                self.trait_cursor =
                    cycle_index(Some(self.trait_cursor), GeneticTrait::all().len(), forward)
                        .unwrap_or(0);
            }
            FormField::Temperature | FormField::Rainfall => {}
        }
    }

    fn buffer_mut(&mut self) -> Option<&mut String> {
        match self.focused_field {
            FormField::Temperature => Some(&mut self.temperature),
            FormField::Rainfall => Some(&mut self.rainfall),
            _ => None,
        }
    }

    /// Returns false when the character is not accepted by the focused field
    pub fn push_char(&mut self, c: char) -> bool {
        let Some(buffer) = self.buffer_mut() else {
            return false;
        };
        let accepted = match c {
            '0'..='9' => true,
            '.' => !buffer.contains('.'),
            '-' => buffer.is_empty(),
            _ => false,
        };
        if accepted {
            buffer.push(c);
        }
        accepted
    }

    pub fn backspace(&mut self) {
        if let Some(buffer) = self.buffer_mut() {
            buffer.pop();
        }
    }

    pub fn toggle_trait(&mut self) {
        let Some(genetic_trait) = GeneticTrait::all().get(self.trait_cursor).copied() else {
            return;
        };
        if self.selected_traits.contains(&genetic_trait) {
            self.selected_traits.retain(|t| *t != genetic_trait);
        } else {
            self.selected_traits.push(genetic_trait);
            self.selected_traits.sort_by_key(|t| {
                GeneticTrait::all()
                    .iter()
                    .position(|x| x == t)
                    .unwrap_or(usize::MAX)
            });
        }
    }

    /// Copy the live temperature and today's rainfall into the form
    pub fn apply_weather(&mut self, snapshot: &WeatherSnapshot) {
        self.temperature = snapshot.temperature_c.to_string();
        self.rainfall = snapshot.rainfall_mm.to_string();
    }

    pub fn conditions(&self) -> std::result::Result<FarmingConditions, &'static str> {
        let number = |s: &str| s.trim().parse::<f64>().ok().filter(|v| v.is_finite());

        match (
            self.crop(),
            self.soil(),
            self.season(),
            number(&self.temperature),
            number(&self.rainfall),
        ) {
            (Some(crop), Some(soil), Some(season), Some(temperature), Some(rainfall)) => Ok(
                FarmingConditions::new(crop, soil, season, temperature, rainfall),
            ),
            _ => Err(FORM_INCOMPLETE),
        }
    }
}

pub struct ForecastState {
    pub selected_index: usize,
}

impl ForecastState {
    pub fn new() -> Self {
        Self { selected_index: 0 }
    }

    pub fn next(&mut self, max: usize) {
        if max > 0 && self.selected_index < max - 1 {
            self.selected_index += 1;
        }
    }

    pub fn prev(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
        }
    }
}

struct PendingPrediction {
    deadline: Instant,
    conditions: FarmingConditions,
    selected_traits: Vec<GeneticTrait>,
}

pub struct App {
    pub screen: Screen,
    pub should_quit: bool,
    pub config: Config,

    // Data
    pub weather: Option<WeatherSnapshot>,
    pub results: Option<PredictionResults>,
    pub charts: Vec<ChartSeries>,

    // Screen states
    pub form: FormState,
    pub forecast_state: ForecastState,

    // Services
    pub predictor: Predictor,

    // UI state
    pub status_message: Option<String>,
    pub fetching_weather: bool,
    pub needs_weather: bool,
    pub needs_export: bool,
    pending: Option<PendingPrediction>,
    prediction_delay: Duration,
}

impl App {
    pub fn new(config: Config) -> Self {
        Self {
            screen: Screen::Dashboard,
            should_quit: false,
            weather: None,
            results: None,
            charts: vec![ChartSeries::yield_prediction(), ChartSeries::ga_evolution()],
            form: FormState::from_farm(&config.farm),
            forecast_state: ForecastState::new(),
            predictor: Predictor::new(config.prediction.variant),
            status_message: None,
            fetching_weather: false,
            needs_weather: false,
            needs_export: false,
            pending: None,
            prediction_delay: Duration::from_millis(config.prediction.delay_ms),
            config,
        }
    }

    pub fn switch_screen(&mut self, screen: Screen) {
        self.screen = screen;
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn set_status(&mut self, msg: &str) {
        self.status_message = Some(msg.to_string());
    }

    pub fn request_weather(&mut self) {
        if !self.fetching_weather {
            self.needs_weather = true;
        }
    }

    pub fn update_weather(&mut self, snapshot: WeatherSnapshot) {
        self.set_status(&format!("Weather updated for {}", snapshot.location));
        self.forecast_state = ForecastState::new();
        self.weather = Some(snapshot);
    }

    pub fn use_weather_in_form(&mut self) {
        match self.weather.as_ref() {
            Some(snapshot) => {
                self.form.apply_weather(snapshot);
                self.set_status("Filled temperature and rainfall from live weather");
            }
            None => self.set_status("No weather data yet - press [w] to fetch"),
        }
    }

    pub fn is_predicting(&self) -> bool {
        self.pending.is_some()
    }

    /// Validate the form and start the simulated analysis
    pub fn start_prediction(&mut self, now: Instant) -> bool {
        if self.is_predicting() {
            return false;
        }

        match self.form.conditions() {
            Ok(conditions) => {
                tracing::debug!(?conditions, "Starting prediction");
                self.pending = Some(PendingPrediction {
                    deadline: now + self.prediction_delay,
                    conditions,
                    selected_traits: self.form.selected_traits.clone(),
                });
                self.set_status("Analyzing...");
                true
            }
            Err(msg) => {
                self.set_status(msg);
                false
            }
        }
    }

    /// Completes a pending prediction once its deadline has passed
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.pending.as_ref() {
            Some(p) if now >= p.deadline => {}
            _ => return false,
        }

        let Some(pending) = self.pending.take() else {
            return false;
        };

        let results = self.predictor.predict(
            pending.conditions,
            pending.selected_traits,
            self.weather.clone(),
        );
        self.results = Some(results);
        self.set_status(PREDICTION_DONE);
        self.switch_screen(Screen::Results);
        true
    }

    pub fn request_export(&mut self) {
        if self.results.is_some() {
            self.needs_export = true;
        } else {
            self.set_status("Generate a prediction first");
        }
    }

    pub fn export_report(&self) -> Result<Option<PathBuf>> {
        let Some(results) = self.results.as_ref() else {
            return Ok(None);
        };

        let report = ReportBuilder::new().build(results);
        let path = report.write_to(&self.config.report.output_dir())?;
        tracing::debug!("Report has {} pages", report.page_count());
        Ok(Some(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Coordinates, DailyForecast, ForecastSet};
    use chrono::{NaiveDate, Utc};

    fn filled_app() -> App {
        let mut config = Config::default();
        config.farm.crop = Some("rice".into());
        config.farm.soil = Some("clay".into());
        config.farm.season = Some("monsoon".into());
        config.prediction.delay_ms = 2000;
        let mut app = App::new(config);
        app.form.temperature = "25".into();
        app.form.rainfall = "200".into();
        app
    }

    fn snapshot() -> WeatherSnapshot {
        let date = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        WeatherSnapshot {
            fetched_at: Utc::now(),
            location: "Pune".into(),
            coordinates: Coordinates::new(18.5, 73.8).unwrap(),
            temperature_c: 27.0,
            humidity_percent: 70.0,
            rainfall_mm: 12.0,
            forecast: ForecastSet::new(vec![DailyForecast::new(date, 30.0, 22.0, 12.0, 70.0)])
                .unwrap(),
            planting_window: None,
        }
    }

    #[test]
    fn screen_keys() {
        assert_eq!(Screen::from_key('1'), Some(Screen::Dashboard));
        assert_eq!(Screen::from_key('2'), Some(Screen::Forecast));
        assert_eq!(Screen::from_key('3'), Some(Screen::Results));
        assert_eq!(Screen::from_key('x'), None);
    }

    #[test]
    fn form_prefills_from_config() {
        let app = filled_app();
        assert_eq!(app.form.crop(), Some(CropType::Rice));
        assert_eq!(app.form.soil(), Some(SoilType::Clay));
        assert_eq!(app.form.season(), Some(Season::Monsoon));
    }

    #[test]
    fn unknown_farm_profile_names_stay_unselected() {
        let farm = FarmConfig {
            name: "Test".into(),
            crop: Some("Maize".into()),
            soil: Some("peat".into()),
            season: None,
        };
        let form = FormState::from_farm(&farm);
        assert_eq!(form.crop(), Some(CropType::Corn));
        assert_eq!(form.soil(), None);
        assert_eq!(form.season(), None);
    }

    #[test]
    fn incomplete_form_is_rejected() {
        let mut app = App::new(Config::default());
        app.form.temperature = "25".into();
        assert!(!app.start_prediction(Instant::now()));
        assert_eq!(app.status_message.as_deref(), Some(FORM_INCOMPLETE));
        assert!(!app.is_predicting());
    }

    #[test]
    fn non_numeric_field_is_rejected() {
        let mut app = filled_app();
        app.form.rainfall = "-".into();
        assert_eq!(app.form.conditions(), Err(FORM_INCOMPLETE));
    }

    #[test]
    fn prediction_waits_for_deadline() {
        let mut app = filled_app();
        let start = Instant::now();
        assert!(app.start_prediction(start));
        assert_eq!(app.status_message.as_deref(), Some("Analyzing..."));

        assert!(!app.tick(start + Duration::from_millis(1999)));
        assert!(app.results.is_none());
        assert!(app.is_predicting());

        assert!(app.tick(start + Duration::from_millis(2000)));
        assert!(!app.is_predicting());
        assert_eq!(app.status_message.as_deref(), Some(PREDICTION_DONE));
        assert_eq!(app.screen, Screen::Results);

        let results = app.results.as_ref().unwrap();
        assert_eq!(results.crop_matches[0].crop, CropType::Rice);
    }

    #[test]
    fn second_submit_while_analyzing_is_ignored() {
        let mut app = filled_app();
        let start = Instant::now();
        assert!(app.start_prediction(start));
        assert!(!app.start_prediction(start));
    }

    #[test]
    fn selects_cycle_and_wrap() {
        let mut form = FormState::new();
        form.focused_field = FormField::Soil;
        form.cycle(false);
        assert_eq!(form.soil(), SoilType::all().last().copied());
        form.cycle(true);
        assert_eq!(form.soil(), Some(SoilType::all()[0]));
    }

    #[test]
    fn numeric_fields_filter_input() {
        let mut form = FormState::new();
        form.focused_field = FormField::Temperature;
        for c in "-2a.5.".chars() {
            form.push_char(c);
        }
        assert_eq!(form.temperature, "-2.5");
        form.backspace();
        assert_eq!(form.temperature, "-2.");

        form.focused_field = FormField::Crop;
        assert!(!form.push_char('1'));
    }

    #[test]
    fn traits_toggle_in_display_order() {
        let mut form = FormState::new();
        form.trait_cursor = 2;
        form.toggle_trait();
        form.trait_cursor = 0;
        form.toggle_trait();
        assert_eq!(
            form.selected_traits,
            vec![GeneticTrait::all()[0], GeneticTrait::all()[2]]
        );
        form.toggle_trait();
        assert_eq!(form.selected_traits, vec![GeneticTrait::all()[2]]);
    }

    #[test]
    fn weather_fills_form_and_reaches_results() {
        let mut app = filled_app();
        app.use_weather_in_form();
        assert_eq!(app.form.temperature, "25");

        app.update_weather(snapshot());
        app.use_weather_in_form();
        assert_eq!(app.form.temperature, "27");
        assert_eq!(app.form.rainfall, "12");

        let start = Instant::now();
        app.start_prediction(start);
        app.tick(start + Duration::from_secs(3));
        let results = app.results.as_ref().unwrap();
        assert_eq!(results.weather.as_ref().unwrap().location, "Pune");
    }

    #[test]
    fn export_needs_results() {
        let mut app = App::new(Config::default());
        app.request_export();
        assert!(!app.needs_export);
        assert_eq!(app.export_report().unwrap(), None);
    }

    #[test]
    fn export_writes_into_configured_dir() {
        let dir = std::env::temp_dir().join(format!("cropcast-app-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();

        let mut app = filled_app();
        app.config.report.output_dir = Some(dir.clone());
        let start = Instant::now();
        app.start_prediction(start);
        app.tick(start + Duration::from_secs(2));
        app.request_export();
        assert!(app.needs_export);

        let path = app.export_report().unwrap().unwrap();
        assert!(path.starts_with(&dir));
        assert!(path.exists());
        std::fs::remove_dir_all(&dir).unwrap();
    }
}
