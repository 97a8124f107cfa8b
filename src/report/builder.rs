use super::chart::{ChartRenderer, TextBarChartRenderer};
use super::layout::{PageLayout, PageWriter};
use crate::error::Result;
use crate::models::insights::{
    group_thousands, MOCK_ACCURACY_PERCENT, MOCK_GA_GENERATIONS, MOCK_YIELD_IMPROVEMENT_PERCENT,
};
use crate::models::{ChartSeries, PredictionResults};
use chrono::{Local, NaiveDate};
use std::path::{Path, PathBuf};

pub const REPORT_TITLE: &str = "Smart Crop Forecasting Report";
pub const FOOTER_BRAND: &str = "Smart Crop Forecasting System";

// Vertical advances, in millimetres
const TITLE_MM: f64 = 10.0;
const SUBTITLE_MM: f64 = 15.0;
const HEADING_MM: f64 = 8.0;
const ITEM_MM: f64 = 6.0;
const WRAPPED_MM: f64 = 5.0;
const SECTION_GAP_MM: f64 = 5.0;
const CHART_LINE_MM: f64 = 4.0;
const CHART_GAP_MM: f64 = 10.0;

const INDENT: usize = 2;

/// A laid-out report, ready to write
#[derive(Debug, Clone)]
pub struct Report {
    date: NaiveDate,
    pages: Vec<Vec<String>>,
    width: usize,
}

impl Report {
    pub fn pages(&self) -> &[Vec<String>] {
        &self.pages
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn file_name(&self) -> String {
        format!("Crop_Forecast_Report_{}.txt", self.date.format("%Y-%m-%d"))
    }

    fn footer(&self, page: usize) -> String {
        let text = format!("Page {} of {} | {}", page, self.page_count(), FOOTER_BRAND);
        let pad = self.width.saturating_sub(text.chars().count()) / 2;
        format!("{}{}", " ".repeat(pad), text)
    }

    /// Pages joined with form feeds, each closed by its footer
    pub fn render(&self) -> String {
        self.pages
            .iter()
            .enumerate()
            .map(|(i, lines)| {
                let mut page = lines.join("\n");
                page.push_str("\n\n");
                page.push_str(&self.footer(i + 1));
                page.push('\n');
                page
            })
            .collect::<Vec<_>>()
            .join("\x0c")
    }

    pub fn write_to(&self, dir: &Path) -> Result<PathBuf> {
        std::fs::create_dir_all(dir)?;
        let path = dir.join(self.file_name());
        std::fs::write(&path, self.render())?;
        tracing::info!("Report written to {}", path.display());
        Ok(path)
    }
}

pub struct ReportBuilder {
    layout: PageLayout,
    renderer: Box<dyn ChartRenderer>,
    charts: Vec<ChartSeries>,
}

impl ReportBuilder {
    pub fn new() -> Self {
        Self {
            layout: PageLayout::default(),
            renderer: Box::new(TextBarChartRenderer::default()),
            charts: vec![ChartSeries::yield_prediction(), ChartSeries::ga_evolution()],
        }
    }

    pub fn build(&self, results: &PredictionResults) -> Report {
        let mut w = PageWriter::new(self.layout);
        let generated = results.generated_at.with_timezone(&Local);

        w.centered(REPORT_TITLE, TITLE_MM);
        w.centered(
            &format!("Generated on: {}", generated.format("%d/%m/%Y, %H:%M:%S")),
            SUBTITLE_MM,
        );

        self.input_parameters(&mut w, results);
        self.selected_traits(&mut w, results);
        self.recommended_traits(&mut w, results);
        self.recommended_crops(&mut w, results);
        self.planting_window(&mut w, results);
        self.prediction_figures(&mut w);
        self.chart_snapshots(&mut w);

        Report {
            date: generated.date_naive(),
            pages: w.finish(),
            width: self.layout.chars_per_line,
        }
    }

    fn heading(w: &mut PageWriter, title: &str) {
        w.line(title, HEADING_MM);
        w.line("-".repeat(title.chars().count()), 0.0);
    }

    fn input_parameters(&self, w: &mut PageWriter, results: &PredictionResults) {
        let c = &results.conditions;
        let or_unset = |v: Option<&'static str>| v.unwrap_or("Not specified");

        Self::heading(w, "Input Parameters");
        let mut params = vec![
            format!("Crop Type: {}", or_unset(c.crop.map(|x| x.as_str()))),
            format!("Soil Type: {}", or_unset(c.soil.map(|x| x.as_str()))),
            format!("Season: {}", or_unset(c.season.map(|x| x.as_str()))),
            format!("Temperature: {}°C", c.temperature_c),
            format!("Rainfall: {}mm", c.rainfall_mm),
        ];
        if let Some(ref weather) = results.weather {
            params.push(format!("Location: {}", weather.location));
            params.push(format!("Current Humidity: {}%", weather.humidity_percent));
        }
        for p in params {
            w.wrapped(&p, INDENT, ITEM_MM);
        }
        w.gap(SECTION_GAP_MM);
    }

    fn selected_traits(&self, w: &mut PageWriter, results: &PredictionResults) {
        Self::heading(w, "Selected Genetic Traits");
        if results.selected_traits.is_empty() {
            w.wrapped("No genetic traits selected", INDENT, ITEM_MM);
        } else {
            for t in &results.selected_traits {
                w.wrapped(&format!("• {}", t), INDENT, ITEM_MM);
            }
        }
        w.gap(SECTION_GAP_MM);
    }

    fn recommended_traits(&self, w: &mut PageWriter, results: &PredictionResults) {
        if results.recommended_traits.is_empty() {
            return;
        }
        Self::heading(w, "AI-Recommended Traits");
        for s in &results.recommended_traits {
            w.wrapped(
                &format!("• {}: {}", s.genetic_trait, s.reason),
                INDENT,
                WRAPPED_MM,
            );
        }
        w.gap(SECTION_GAP_MM);
    }

    fn recommended_crops(&self, w: &mut PageWriter, results: &PredictionResults) {
        Self::heading(w, "Recommended Crops");
        if results.crop_matches.is_empty() {
            w.wrapped(
                "No crop in the catalog matches these conditions",
                INDENT,
                ITEM_MM,
            );
        }
        for (rank, m) in results.crop_matches.iter().enumerate() {
            w.wrapped(
                &format!("{}. {} ({}/100): {}", rank + 1, m.crop, m.score, m.reason()),
                INDENT,
                WRAPPED_MM,
            );
        }
        w.gap(SECTION_GAP_MM);
    }

    fn planting_window(&self, w: &mut PageWriter, results: &PredictionResults) {
        let Some(verdict) = results
            .weather
            .as_ref()
            .and_then(|weather| weather.planting_window.as_ref())
        else {
            return;
        };

        Self::heading(w, "Planting Window");
        let outlook = if verdict.recommended {
            "Recommended"
        } else {
            "Not recommended"
        };
        w.wrapped(&format!("Verdict: {}", outlook), INDENT, ITEM_MM);
        w.wrapped(&verdict.reason, INDENT, WRAPPED_MM);
        if !verdict.best_days.is_empty() {
            let days: Vec<String> = verdict
                .best_days
                .iter()
                .map(|d| d.format("%a %Y-%m-%d").to_string())
                .collect();
            w.wrapped(&format!("Best days: {}", days.join(", ")), INDENT, ITEM_MM);
        }
        w.gap(SECTION_GAP_MM);
    }

    fn prediction_figures(&self, w: &mut PageWriter) {
        Self::heading(w, "Prediction Results");
        w.wrapped(
            &format!("AI Prediction Accuracy: {}%", MOCK_ACCURACY_PERCENT),
            INDENT,
            ITEM_MM,
        );
        w.wrapped(
            &format!(
                "Genetic Algorithm Generations: {}",
                group_thousands(MOCK_GA_GENERATIONS)
            ),
            INDENT,
            ITEM_MM,
        );
        w.wrapped(
            &format!(
                "Projected Yield Improvement: +{}% vs Traditional",
                MOCK_YIELD_IMPROVEMENT_PERCENT
            ),
            INDENT,
            CHART_GAP_MM,
        );
    }

    fn chart_snapshots(&self, w: &mut PageWriter) {
        for chart in &self.charts {
            match self.renderer.render(chart) {
                Ok(lines) => w.block(lines, CHART_LINE_MM, CHART_GAP_MM),
                Err(e) => {
                    tracing::error!("Error capturing chart '{}': {}", chart.title, e);
                }
            }
        }
    }
}

impl Default for ReportBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CropCastError;
    use crate::logic::{PlantingWindowAnalyzer, Predictor};
    use crate::models::{
        Coordinates, CropType, DailyForecast, FarmingConditions, ForecastSet, GeneticTrait,
        Season, SoilType, WeatherSnapshot,
    };
    use chrono::Utc;

    fn results(with_weather: bool) -> PredictionResults {
        let conditions =
            FarmingConditions::new(CropType::Rice, SoilType::Clay, Season::Monsoon, 25.0, 200.0);
        let weather = with_weather.then(|| {
            let days: Vec<_> = (0..7)
                .map(|i| {
                    DailyForecast::new(
                        NaiveDate::from_ymd_opt(2025, 6, 1 + i).unwrap(),
                        25.0,
                        15.0,
                        5.0,
                        70.0,
                    )
                })
                .collect();
            let verdict = PlantingWindowAnalyzer::new().analyze(&days).unwrap();
            WeatherSnapshot {
                fetched_at: Utc::now(),
                location: "Pune".into(),
                coordinates: Coordinates::new(18.52, 73.86).unwrap(),
                temperature_c: 27.0,
                humidity_percent: 62.0,
                rainfall_mm: 5.0,
                forecast: ForecastSet::new(days).unwrap(),
                planting_window: Some(verdict),
            }
        });
        Predictor::default().predict(conditions, vec![GeneticTrait::HighYield], weather)
    }

    fn all_text(report: &Report) -> String {
        report.render()
    }

    struct FailingRenderer;

    impl ChartRenderer for FailingRenderer {
        fn render(&self, chart: &ChartSeries) -> Result<Vec<String>> {
            Err(CropCastError::InvalidInput(format!(
                "cannot draw {}",
                chart.title
            )))
        }
    }

    #[test]
    fn sections_appear_in_order() {
        let report = ReportBuilder::new().build(&results(true));
        let text = all_text(&report);
        let order = [
            REPORT_TITLE,
            "Generated on:",
            "Input Parameters",
            "Location: Pune",
            "Current Humidity: 62%",
            "Selected Genetic Traits",
            "• High Yield",
            "AI-Recommended Traits",
            "Recommended Crops",
            "1. Rice (100/100)",
            "Planting Window",
            "Verdict: Recommended",
            "Prediction Results",
            "AI Prediction Accuracy: 94.5%",
            "Genetic Algorithm Generations: 1,247",
            "Projected Yield Improvement: +23.4% vs Traditional",
            "Yield Prediction Analysis",
            "Genetic Algorithm Evolution",
        ];
        let mut from = 0;
        for needle in order {
            let at = text[from..]
                .find(needle)
                .unwrap_or_else(|| panic!("'{}' missing or out of order", needle));
            from += at + needle.len();
        }
    }

    #[test]
    fn no_weather_means_no_location_or_window() {
        let text = all_text(&ReportBuilder::new().build(&results(false)));
        assert!(!text.contains("Location:"));
        assert!(!text.contains("Planting Window"));
        assert!(text.contains("Temperature: 25°C"));
        assert!(text.contains("Rainfall: 200mm"));
    }

    #[test]
    fn empty_selection_is_stated() {
        let mut r = results(false);
        r.selected_traits.clear();
        let text = all_text(&ReportBuilder::new().build(&r));
        assert!(text.contains("No genetic traits selected"));
    }

    #[test]
    fn every_page_has_a_footer() {
        let short = PageLayout {
            height_mm: 120.0,
            ..PageLayout::default()
        };
        let report = ReportBuilder {
            layout: short,
            ..ReportBuilder::new()
        }
        .build(&results(true));
        let n = report.page_count();
        assert!(n > 1);

        let rendered = report.render();
        let pages: Vec<&str> = rendered.split('\x0c').collect();
        assert_eq!(pages.len(), n);
        for (i, page) in pages.iter().enumerate() {
            let footer = format!("Page {} of {} | {}", i + 1, n, FOOTER_BRAND);
            assert!(page.trim_end().ends_with(&footer), "page {} footer", i + 1);
        }
    }

    #[test]
    fn chart_failure_does_not_abort_export() {
        let report = ReportBuilder {
            renderer: Box::new(FailingRenderer),
            ..ReportBuilder::new()
        }
        .build(&results(false));
        let text = all_text(&report);
        assert!(text.contains("Prediction Results"));
        assert!(!text.contains("Yield Prediction Analysis"));
    }

    #[test]
    fn writes_dated_file() {
        let report = ReportBuilder::new().build(&results(false));
        let name = report.file_name();
        assert!(name.starts_with("Crop_Forecast_Report_"));
        assert!(name.ends_with(".txt"));
        assert_eq!(name.len(), "Crop_Forecast_Report_YYYY-MM-DD.txt".len());

        let dir = std::env::temp_dir().join(format!("cropcast-report-{}", std::process::id()));
        let path = report.write_to(&dir).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, report.render());
        std::fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn lines_fit_the_page_width() {
        let report = ReportBuilder::new().build(&results(true));
        for page in report.pages() {
            for line in page {
                assert!(line.chars().count() <= 90, "too wide: {}", line);
            }
        }
    }
}
