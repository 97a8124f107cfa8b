use super::dashboard::render_status_message;
use crate::logic::calculations::{average_humidity, average_temperature, total_precipitation};
use crate::models::{DailyForecast, ForecastSet, PlantingWindowVerdict, WeatherSnapshot};
use crate::ui::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, Widget, Wrap},
};

pub struct ForecastScreen<'a> {
    pub weather: Option<&'a WeatherSnapshot>,
    pub selected_index: usize,
    pub fetching: bool,
    pub status_message: Option<&'a str>,
}

impl<'a> ForecastScreen<'a> {
    pub fn new(weather: Option<&'a WeatherSnapshot>) -> Self {
        Self {
            weather,
            selected_index: 0,
            fetching: false,
            status_message: None,
        }
    }

    pub fn with_selection(mut self, index: usize) -> Self {
        self.selected_index = index;
        self
    }

    pub fn fetching(mut self, fetching: bool) -> Self {
        self.fetching = fetching;
        self
    }

    pub fn with_status(mut self, status: Option<&'a str>) -> Self {
        self.status_message = status;
        self
    }
}

impl Widget for ForecastScreen<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(10),   // Table
                Constraint::Length(7), // Summary and verdict
                Constraint::Length(1), // Status message
                Constraint::Length(1), // Nav bar
            ])
            .split(area);

        self.render_header(chunks[0], buf);

        match self.weather {
            Some(weather) => {
                self.render_table(weather.forecast.days(), weather, chunks[1], buf);

                let bottom = Layout::default()
                    .direction(Direction::Horizontal)
                    .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
                    .split(chunks[2]);
                self.render_summary(&weather.forecast, bottom[0], buf);
                self.render_verdict(weather.planting_window.as_ref(), bottom[1], buf);
            }
            None => {
                let msg = if self.fetching {
                    Span::styled("Fetching forecast...", Theme::warning())
                } else {
                    Span::styled(
                        "No forecast loaded. Press [w] to fetch the 7-day outlook.",
                        Theme::dim(),
                    )
                };
                let block = Block::default()
                    .title("7-Day Forecast")
                    .borders(Borders::ALL)
                    .border_style(Theme::border());
                Paragraph::new(msg).block(block).render(chunks[1], buf);
            }
        }

        render_status_message(self.status_message, chunks[3], buf);
        self.render_nav(chunks[4], buf);
    }
}

impl ForecastScreen<'_> {
    fn render_header(&self, area: Rect, buf: &mut Buffer) {
        let (title, info) = match self.weather {
            Some(w) => (
                format!("Forecast - {}", w.location),
                format!(
                    "{} | fetched {}",
                    w.coordinates,
                    w.fetched_at.format("%Y-%m-%d %H:%M UTC")
                ),
            ),
            None => ("Forecast".to_string(), "Not fetched yet".to_string()),
        };

        let block = Block::default()
            .title(Span::styled(title, Theme::title()))
            .borders(Borders::BOTTOM)
            .border_style(Theme::border());

        Paragraph::new(Span::styled(info, Theme::dim()))
            .block(block)
            .render(area, buf);
    }

    fn render_table(
        &self,
        days: &[DailyForecast],
        weather: &WeatherSnapshot,
        area: Rect,
        buf: &mut Buffer,
    ) {
        let block = Block::default()
            .title("7-Day Forecast")
            .borders(Borders::ALL)
            .border_style(Theme::border());

        let inner = block.inner(area);
        block.render(area, buf);

        let best_days = weather
            .planting_window
            .as_ref()
            .map(|v| v.best_days.as_slice())
            .unwrap_or(&[]);

        let header = Row::new(vec![
            Cell::from("Date"),
            Cell::from("High"),
            Cell::from("Low"),
            Cell::from("Avg"),
            Cell::from("Rain"),
            Cell::from("Humidity"),
            Cell::from("Best"),
        ])
        .style(Theme::header());

        let rows: Vec<Row> = days
            .iter()
            .enumerate()
            .map(|(i, day)| {
                let temp_cell = |t: f64| {
                    Cell::from(format!("{:.0}°C", t))
                        .style(Style::default().fg(Theme::temp_color(t)))
                };
                let best = if best_days.contains(&day.date) {
                    Cell::from("★").style(Theme::success())
                } else {
                    Cell::from("")
                };

                let row = Row::new(vec![
                    Cell::from(day.date.format("%a %d %b").to_string()),
                    temp_cell(day.max_temp_c),
                    temp_cell(day.min_temp_c),
                    temp_cell(day.avg_temp_c()),
                    Cell::from(format!("{:.0} mm", day.precipitation_mm))
                        .style(Style::default().fg(Theme::rain_color(day.precipitation_mm))),
                    Cell::from(format!("{:.0}%", day.humidity_percent)),
                    best,
                ]);

                if i == self.selected_index {
                    row.style(Theme::selected())
                } else {
                    row
                }
            })
            .collect();

        let widths = [
            Constraint::Length(12),
            Constraint::Length(7),
            Constraint::Length(7),
            Constraint::Length(7),
            Constraint::Length(8),
            Constraint::Length(9),
            Constraint::Length(5),
        ];

        Table::new(rows, widths).header(header).render(inner, buf);
    }

    fn render_summary(&self, forecast: &ForecastSet, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title("Summary")
            .borders(Borders::ALL)
            .border_style(Theme::border());

        let days = forecast.days();
        let fmt = |v: Option<f64>, unit: &str| {
            v.map(|v| format!("{:.1}{}", v, unit))
                .unwrap_or_else(|| "-".to_string())
        };

        let lines = vec![
            Line::from(vec![
                Span::styled("Total rain:    ", Theme::dim()),
                Span::raw(format!("{:.0} mm", total_precipitation(days))),
            ]),
            Line::from(vec![
                Span::styled("Avg temp:      ", Theme::dim()),
                Span::raw(fmt(average_temperature(days), "°C")),
            ]),
            Line::from(vec![
                Span::styled("Avg humidity:  ", Theme::dim()),
                Span::raw(fmt(average_humidity(days), "%")),
            ]),
            Line::from(vec![
                Span::styled("Range:         ", Theme::dim()),
                Span::raw(format!(
                    "{} to {}",
                    fmt(forecast.min_temp_c(), "°C"),
                    fmt(forecast.max_temp_c(), "°C"),
                )),
            ]),
        ];

        Paragraph::new(lines).block(block).render(area, buf);
    }

    fn render_verdict(
        &self,
        verdict: Option<&PlantingWindowVerdict>,
        area: Rect,
        buf: &mut Buffer,
    ) {
        let block = Block::default()
            .title("Planting Window")
            .borders(Borders::ALL)
            .border_style(Theme::border());

        let lines = match verdict {
            Some(v) => {
                let headline = if v.recommended {
                    "Recommended - good time to plant"
                } else {
                    "Not recommended - wait for better conditions"
                };
                let best = if v.best_days.is_empty() {
                    "none".to_string()
                } else {
                    v.best_days
                        .iter()
                        .map(|d| d.format("%a %d %b").to_string())
                        .collect::<Vec<_>>()
                        .join(", ")
                };
                vec![
                    Line::from(Span::styled(headline, Theme::verdict(v.recommended))),
                    Line::from(Span::styled(v.reason.clone(), Theme::normal())),
                    Line::from(vec![
                        Span::styled("Best days: ", Theme::dim()),
                        Span::styled(best, Theme::highlight()),
                    ]),
                ]
            }
            None => vec![Line::from(Span::styled(
                "Planting window unavailable for this forecast",
                Theme::dim(),
            ))],
        };

        Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: true })
            .render(area, buf);
    }

    fn render_nav(&self, area: Rect, buf: &mut Buffer) {
        let nav = Line::from(vec![
            Span::styled("[1]", Theme::nav_key()),
            Span::styled("Dashboard ", Theme::nav_label()),
            Span::styled("[2]", Theme::nav_key()),
            Span::styled("Forecast ", Theme::nav_label()),
            Span::styled("[3]", Theme::nav_key()),
            Span::styled("Results ", Theme::nav_label()),
            Span::styled("[↑↓]", Theme::nav_key()),
            Span::styled("Select ", Theme::nav_label()),
            Span::styled("[w]", Theme::nav_key()),
            Span::styled("Refresh ", Theme::nav_label()),
            Span::styled("[q]", Theme::nav_key()),
            Span::styled("Quit", Theme::nav_label()),
        ]);

        Paragraph::new(nav).render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::PlantingWindowAnalyzer;
    use crate::models::Coordinates;
    use chrono::{NaiveDate, Utc};

    fn snapshot() -> WeatherSnapshot {
        let days: Vec<DailyForecast> = (0..7)
            .map(|i| {
                let date = NaiveDate::from_ymd_opt(2025, 6, 2 + i).unwrap();
                DailyForecast::new(date, 25.0, 15.0, 5.0, 60.0)
            })
            .collect();
        let verdict = PlantingWindowAnalyzer::new().analyze(&days).unwrap();
        WeatherSnapshot {
            fetched_at: Utc::now(),
            location: "Nashik".into(),
            coordinates: Coordinates::new(20.0, 73.8).unwrap(),
            temperature_c: 24.0,
            humidity_percent: 60.0,
            rainfall_mm: 5.0,
            forecast: ForecastSet::new(days).unwrap(),
            planting_window: Some(verdict),
        }
    }

    fn screen_text(buf: &Buffer) -> String {
        let area = buf.area;
        (0..area.height)
            .map(|y| {
                (0..area.width)
                    .map(|x| buf[(x, y)].symbol().to_string())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn shows_days_summary_and_verdict() {
        let weather = snapshot();
        let area = Rect::new(0, 0, 110, 30);
        let mut buf = Buffer::empty(area);
        ForecastScreen::new(Some(&weather)).render(area, &mut buf);

        let text = screen_text(&buf);
        assert!(text.contains("Forecast - Nashik"));
        assert!(text.contains("Mon 02 Jun"));
        assert!(text.contains("Sun 08 Jun"));
        assert!(text.contains("35 mm"));
        assert!(text.contains("60.0%"));
        assert!(text.contains("Recommended - good time to plant"));
    }

    #[test]
    fn empty_state_prompts_fetch() {
        let area = Rect::new(0, 0, 100, 24);
        let mut buf = Buffer::empty(area);
        ForecastScreen::new(None).render(area, &mut buf);
        assert!(screen_text(&buf).contains("Press [w]"));
    }
}
