mod app;
mod cli;
mod config;
mod datasources;
mod error;
mod logic;
mod models;
mod report;
mod ui;

use anyhow::{Context, Result};
use app::{App, Screen};
use clap::Parser;
use cli::{Cli, Commands, ForecastArgs, RecommendArgs, ReportArgs};
use config::Config;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, KeyModifiers,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use logic::{LocationRequest, Predictor, TraitRecommender, WeatherService};
use models::{PredictionResults, WeatherSnapshot};
use ratatui::{backend::CrosstermBackend, Terminal};
use report::ReportBuilder;
use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;
use ui::screens::{DashboardScreen, ForecastScreen, FormField, ResultsScreen};

type Tui = Terminal<CrosstermBackend<io::Stdout>>;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Init) => {
            init_logging(cli.verbose, None)?;
            let (_, path) = Config::setup_interactive().context("Setup failed")?;
            println!("Configuration written to {}", path.display());
            Ok(())
        }
        Some(Commands::Check) => {
            init_logging(cli.verbose, None)?;
            run_check(cli.config).await
        }
        Some(Commands::Recommend(ref args)) => {
            init_logging(cli.verbose, None)?;
            let config = Config::load_or_default(cli.config.clone())?;
            run_recommend(&config, args)
        }
        Some(Commands::Forecast(ref args)) => {
            init_logging(cli.verbose, None)?;
            let config = Config::load_or_default(cli.config.clone())?;
            run_forecast(config, args).await
        }
        Some(Commands::Report(ref args)) => {
            init_logging(cli.verbose, None)?;
            let config = Config::load_or_default(cli.config.clone())?;
            run_report(config, args).await
        }
        None => {
            let log_path = Config::log_path(cli.data_dir.as_ref())
                .context("Cannot prepare the data directory")?;
            init_logging(cli.verbose, Some(log_path))?;
            run_tui(cli.config).await
        }
    }
}

/// `-v` and `-vv` win over `RUST_LOG`; otherwise `RUST_LOG`, then `warn`.
/// In TUI mode everything goes to the log file.
fn init_logging(verbose: u8, log_file: Option<PathBuf>) -> Result<()> {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    match log_file {
        Some(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
                .with_context(|| format!("Cannot open log file {}", path.display()))?;
            builder
                .with_writer(std::sync::Mutex::new(file))
                .with_ansi(false)
                .init();
        }
        None => builder.with_writer(io::stderr).init(),
    }

    Ok(())
}

async fn run_check(config_path: Option<PathBuf>) -> Result<()> {
    let config = Config::load(config_path).context("Configuration error")?;
    println!("Configuration OK (farm: {})", config.farm.name);

    if let Some(coords) = config.location.coordinates() {
        let coords = coords.context("Configured coordinates are invalid")?;
        println!("Location: {}", coords);
    } else if let Some(place) = config.location.place() {
        println!("Location: {}", place);
    } else {
        println!("Location: not configured");
    }

    let variant = config.prediction.variant;
    println!("Trait rules ({}):", variant.as_str());
    for (id, name) in TraitRecommender::new(variant).list_rules() {
        println!("  {:<20} {}", id, name);
    }

    let service = WeatherService::new(config);
    let status = service.check_connections().await;
    println!("{}", status.summary());
    if !status.all_connected() {
        println!("Some data sources are offline; manual conditions still work");
    }
    Ok(())
}

fn run_recommend(config: &Config, args: &RecommendArgs) -> Result<()> {
    let variant = args.conditions.variant.unwrap_or(config.prediction.variant);
    let results = Predictor::new(variant).predict(
        args.conditions.conditions(),
        args.conditions.traits.clone(),
        None,
    );

    if args.json {
        println!("{}", serde_json::to_string_pretty(&results)?);
    } else {
        print_results(&results);
    }
    Ok(())
}

async fn run_forecast(config: Config, args: &ForecastArgs) -> Result<()> {
    let service = WeatherService::new(config);
    let snapshot = service
        .fetch_for(&LocationRequest::from(&args.location))
        .await
        .context("Weather fetch failed")?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    } else {
        print_forecast(&snapshot);
    }
    Ok(())
}

async fn run_report(config: Config, args: &ReportArgs) -> Result<()> {
    let variant = args.conditions.variant.unwrap_or(config.prediction.variant);
    let output_dir = args
        .output
        .clone()
        .unwrap_or_else(|| config.report.output_dir());

    let weather = if args.with_weather {
        let service = WeatherService::new(config);
        let snapshot = service
            .fetch_for(&LocationRequest::from(&args.location))
            .await
            .context("Weather fetch failed")?;
        Some(snapshot)
    } else {
        None
    };

    let results = Predictor::new(variant).predict(
        args.conditions.conditions(),
        args.conditions.traits.clone(),
        weather,
    );

    let report = ReportBuilder::new().build(&results);
    let path = report
        .write_to(&output_dir)
        .with_context(|| format!("Cannot write report into {}", output_dir.display()))?;
    println!(
        "Report written to {} ({} pages)",
        path.display(),
        report.page_count()
    );
    Ok(())
}

fn print_results(results: &PredictionResults) {
    println!(
        "Recommended genetic traits ({} rules):",
        results.variant.as_str()
    );
    if results.recommended_traits.is_empty() {
        println!("  none");
    }
    for suggestion in &results.recommended_traits {
        println!("  • {}: {}", suggestion.genetic_trait, suggestion.reason);
    }

    println!();
    println!("Recommended crops:");
    if results.crop_matches.is_empty() {
        println!("  no crop matches these conditions");
    }
    for (i, m) in results.crop_matches.iter().enumerate() {
        println!(
            "  {}. {:<14} {:>3}  {}",
            i + 1,
            m.crop.as_str(),
            m.score,
            m.reason()
        );
    }
}

fn print_forecast(snapshot: &WeatherSnapshot) {
    println!("{} ({})", snapshot.location, snapshot.coordinates);
    println!(
        "Now: {}°C, {}% humidity, {} mm rain today",
        snapshot.temperature_c, snapshot.humidity_percent, snapshot.rainfall_mm
    );
    println!();
    println!(
        "{:<12} {:>6} {:>6} {:>8} {:>9}",
        "Date", "High", "Low", "Rain", "Humidity"
    );
    for day in snapshot.forecast.days() {
        println!(
            "{:<12} {:>5}° {:>5}° {:>5} mm {:>8}%",
            day.date.format("%a %d %b").to_string(),
            day.max_temp_c,
            day.min_temp_c,
            day.precipitation_mm,
            day.humidity_percent
        );
    }

    println!();
    match snapshot.planting_window.as_ref() {
        Some(verdict) => {
            let headline = if verdict.recommended {
                "Planting recommended"
            } else {
                "Planting not recommended"
            };
            println!("{}: {}", headline, verdict.reason);
            if !verdict.best_days.is_empty() {
                let days: Vec<String> = verdict
                    .best_days
                    .iter()
                    .map(|d| d.format("%a %d %b").to_string())
                    .collect();
                println!("Best days: {}", days.join(", "));
            }
        }
        None => println!("Planting window unavailable"),
    }
}

async fn run_tui(config_path: Option<PathBuf>) -> Result<()> {
    // First run: prompt before the terminal switches to raw mode
    let config = if Config::exists(config_path.as_ref()) {
        Config::load(config_path).context("Configuration error")?
    } else {
        let (config, path) = Config::setup_interactive().context("Setup failed")?;
        println!("Configuration written to {}", path.display());
        config
    };

    let weather = WeatherService::new(config.clone());
    let mut app = App::new(config);

    let status = weather.check_connections().await;
    app.set_status(&status.summary());

    if app.config.location.coordinates().is_some() || app.config.location.place().is_some() {
        app.request_weather();
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app, &weather).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn draw(terminal: &mut Tui, app: &App) -> Result<()> {
    terminal.draw(|f| {
        let area = f.area();
        let status = app.status_message.as_deref();

        match app.screen {
            Screen::Dashboard => {
                let screen = DashboardScreen::new(
                    &app.config.farm.name,
                    &app.form,
                    app.predictor.variant(),
                )
                .with_weather(app.weather.as_ref())
                .busy(app.is_predicting(), app.fetching_weather)
                .with_status(status);
                f.render_widget(screen, area);
            }
            Screen::Forecast => {
                let screen = ForecastScreen::new(app.weather.as_ref())
                    .with_selection(app.forecast_state.selected_index)
                    .fetching(app.fetching_weather)
                    .with_status(status);
                f.render_widget(screen, area);
            }
            Screen::Results => {
                let screen =
                    ResultsScreen::new(app.results.as_ref(), &app.charts).with_status(status);
                f.render_widget(screen, area);
            }
        }
    })?;
    Ok(())
}

async fn run_app(terminal: &mut Tui, app: &mut App, weather: &WeatherService) -> Result<()> {
    loop {
        draw(terminal, app)?;

        // Handle input with timeout for async operations
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    handle_key(app, key.code, key.modifiers);
                }
            }
        }

        app.tick(Instant::now());

        // Handle weather request
        if app.needs_weather {
            app.needs_weather = false;
            app.fetching_weather = true;
            draw(terminal, app)?;

            // Refresh the place already on screen; otherwise resolve from config
            let fetched = match app.weather.as_ref() {
                Some(current) => weather.fetch(current.coordinates).await,
                None => weather.fetch_for(&LocationRequest::default()).await,
            };
            match fetched {
                Ok(_) => {
                    if let Some(snapshot) = weather.get_current().await {
                        app.update_weather(snapshot);
                    }
                }
                Err(e) => {
                    tracing::warn!("Weather fetch failed: {}", e);
                    app.set_status(&format!("Weather fetch failed: {}", e));
                }
            }
            app.fetching_weather = false;
        }

        // Handle export request
        if app.needs_export {
            app.needs_export = false;
            match app.export_report() {
                Ok(Some(path)) => {
                    app.set_status(&format!("Report written to {}", path.display()))
                }
                Ok(None) => {}
                Err(e) => {
                    tracing::error!("Report export failed: {}", e);
                    app.set_status(&format!("Export failed: {}", e));
                }
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

fn handle_key(app: &mut App, code: KeyCode, modifiers: KeyModifiers) {
    let typing =
        app.screen == Screen::Dashboard && app.form.is_text_field() && !app.is_predicting();

    match code {
        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
            app.quit();
        }
        // Digits belong to the focused number field, not screen switching
        KeyCode::Char(c) if typing && app.form.push_char(c) => {}
        KeyCode::Char('q') => {
            app.quit();
        }
        KeyCode::Esc => {
            app.switch_screen(Screen::Dashboard);
        }
        KeyCode::Char(c) => {
            if let Some(screen) = Screen::from_key(c) {
                app.switch_screen(screen);
            } else {
                handle_screen_input(app, code);
            }
        }
        _ => {
            handle_screen_input(app, code);
        }
    }
}

fn handle_screen_input(app: &mut App, code: KeyCode) {
    match app.screen {
        Screen::Dashboard => handle_dashboard_input(app, code),
        Screen::Forecast => handle_forecast_input(app, code),
        Screen::Results => handle_results_input(app, code),
    }
}

fn handle_dashboard_input(app: &mut App, code: KeyCode) {
    if app.is_predicting() {
        return;
    }

    match code {
        KeyCode::Tab | KeyCode::Down => app.form.next_field(),
        KeyCode::BackTab | KeyCode::Up => app.form.prev_field(),
        KeyCode::Left => app.form.cycle(false),
        KeyCode::Right => app.form.cycle(true),
        KeyCode::Char(' ') if app.form.focused_field == FormField::Traits => {
            app.form.toggle_trait();
        }
        KeyCode::Backspace => app.form.backspace(),
        KeyCode::Enter => {
            app.start_prediction(Instant::now());
        }
        KeyCode::Char('w') => app.request_weather(),
        KeyCode::Char('u') => app.use_weather_in_form(),
        _ => {}
    }
}

fn handle_forecast_input(app: &mut App, code: KeyCode) {
    let count = app.weather.as_ref().map(|w| w.forecast.len()).unwrap_or(0);
    match code {
        KeyCode::Up => app.forecast_state.prev(),
        KeyCode::Down => app.forecast_state.next(count),
        KeyCode::Char('w') => app.request_weather(),
        _ => {}
    }
}

fn handle_results_input(app: &mut App, code: KeyCode) {
    if let KeyCode::Char('e') = code {
        app.request_export();
    }
}
