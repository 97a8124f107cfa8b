use super::dashboard::render_status_message;
use crate::models::{ChartSeries, PredictionResults};
use crate::ui::components::{score_gauge, SeriesChart};
use crate::ui::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, Widget, Wrap},
};

pub struct ResultsScreen<'a> {
    pub results: Option<&'a PredictionResults>,
    pub charts: &'a [ChartSeries],
    pub status_message: Option<&'a str>,
}

impl<'a> ResultsScreen<'a> {
    pub fn new(results: Option<&'a PredictionResults>, charts: &'a [ChartSeries]) -> Self {
        Self {
            results,
            charts,
            status_message: None,
        }
    }

    pub fn with_status(mut self, status: Option<&'a str>) -> Self {
        self.status_message = status;
        self
    }
}

impl Widget for ResultsScreen<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),      // Header
                Constraint::Min(10),        // Recommendations
                Constraint::Percentage(40), // Charts
                Constraint::Length(1),      // Status message
                Constraint::Length(1),      // Nav bar
            ])
            .split(area);

        self.render_header(chunks[0], buf);

        match self.results {
            Some(results) => {
                let columns = Layout::default()
                    .direction(Direction::Horizontal)
                    .constraints([
                        Constraint::Percentage(25),
                        Constraint::Percentage(35),
                        Constraint::Percentage(40),
                    ])
                    .split(chunks[1]);

                self.render_inputs(results, columns[0], buf);
                self.render_traits(results, columns[1], buf);
                self.render_crops(results, columns[2], buf);
            }
            None => {
                let block = Block::default()
                    .title("Recommendations")
                    .borders(Borders::ALL)
                    .border_style(Theme::border());
                Paragraph::new(Span::styled(
                    "No prediction yet. Fill in the form on the Dashboard and press Enter.",
                    Theme::dim(),
                ))
                .block(block)
                .wrap(Wrap { trim: true })
                .render(chunks[1], buf);
            }
        }

        self.render_charts(chunks[2], buf);
        render_status_message(self.status_message, chunks[3], buf);
        self.render_nav(chunks[4], buf);
    }
}

impl ResultsScreen<'_> {
    fn render_header(&self, area: Rect, buf: &mut Buffer) {
        let info = match self.results {
            Some(r) => format!(
                "Generated {} | {} rule table",
                r.generated_at.format("%Y-%m-%d %H:%M UTC"),
                r.variant.as_str()
            ),
            None => "Awaiting prediction".to_string(),
        };

        let block = Block::default()
            .title(Span::styled("Prediction Results", Theme::title()))
            .borders(Borders::BOTTOM)
            .border_style(Theme::border());

        Paragraph::new(Span::styled(info, Theme::dim()))
            .block(block)
            .render(area, buf);
    }

    fn render_inputs(&self, results: &PredictionResults, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title("Input Parameters")
            .borders(Borders::ALL)
            .border_style(Theme::border());

        let c = &results.conditions;
        let name = |v: Option<&'static str>| v.unwrap_or("-");
        let field = |label: &'static str, value: String| {
            Line::from(vec![
                Span::styled(format!("{:<12}", label), Theme::dim()),
                Span::raw(value),
            ])
        };

        let mut lines = vec![
            field("Crop", name(c.crop.map(|v| v.as_str())).to_string()),
            field("Soil", name(c.soil.map(|v| v.as_str())).to_string()),
            field("Season", name(c.season.map(|v| v.as_str())).to_string()),
            field("Temperature", format!("{}°C", c.temperature_c)),
            field("Rainfall", format!("{} mm", c.rainfall_mm)),
        ];

        if let Some(w) = results.weather.as_ref() {
            lines.push(field("Location", w.location.clone()));
            lines.push(field("Humidity", format!("{}%", w.humidity_percent)));
        }

        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled("Selected traits", Theme::header())));
        if results.selected_traits.is_empty() {
            lines.push(Line::from(Span::styled(
                "No genetic traits selected",
                Theme::dim(),
            )));
        } else {
            for t in &results.selected_traits {
                lines.push(Line::from(Span::styled(
                    format!("• {}", t),
                    Style::default().fg(t.color()),
                )));
            }
        }

        Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: false })
            .render(area, buf);
    }

    fn render_traits(&self, results: &PredictionResults, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(format!(
                "AI-Recommended Traits ({})",
                results.recommended_traits.len()
            ))
            .borders(Borders::ALL)
            .border_style(Theme::border());

        let lines: Vec<Line> = if results.recommended_traits.is_empty() {
            vec![Line::from(Span::styled(
                "No additional traits suggested",
                Theme::dim(),
            ))]
        } else {
            results
                .recommended_traits
                .iter()
                .map(|s| {
                    Line::from(vec![
                        Span::styled(
                            format!("• {}: ", s.genetic_trait),
                            Style::default().fg(s.genetic_trait.color()),
                        ),
                        Span::styled(s.reason.clone(), Theme::normal()),
                    ])
                })
                .collect()
        };

        Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: true })
            .render(area, buf);
    }

    fn render_crops(&self, results: &PredictionResults, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title("Recommended Crops")
            .borders(Borders::ALL)
            .border_style(Theme::border());

        let inner = block.inner(area);
        block.render(area, buf);

        let Some(top) = results.crop_matches.first() else {
            Paragraph::new(Span::styled(
                "No crop matches these conditions",
                Theme::dim(),
            ))
            .render(inner, buf);
            return;
        };

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(2)])
            .split(inner);

        let top_title = format!("Best match: {}", top.crop);
        score_gauge(&top_title, top.score).render(chunks[0], buf);

        let header = Row::new(vec![
            Cell::from("#"),
            Cell::from("Crop"),
            Cell::from("Score"),
            Cell::from("Why"),
        ])
        .style(Theme::header());

        let rows: Vec<Row> = results
            .crop_matches
            .iter()
            .enumerate()
            .map(|(i, m)| {
                Row::new(vec![
                    Cell::from(format!("{}", i + 1)),
                    Cell::from(m.crop.as_str()),
                    Cell::from(format!("{}", m.score))
                        .style(Style::default().fg(Theme::score_color(m.score))),
                    Cell::from(m.reason()).style(Theme::dim()),
                ])
            })
            .collect();

        let widths = [
            Constraint::Length(2),
            Constraint::Length(13),
            Constraint::Length(5),
            Constraint::Min(10),
        ];

        Table::new(rows, widths)
            .header(header)
            .render(chunks[1], buf);
    }

    fn render_charts(&self, area: Rect, buf: &mut Buffer) {
        if self.charts.is_empty() {
            return;
        }

        let constraints: Vec<Constraint> = self
            .charts
            .iter()
            .map(|_| Constraint::Ratio(1, self.charts.len() as u32))
            .collect();
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(constraints)
            .split(area);

        for (chart, column) in self.charts.iter().zip(columns.iter()) {
            SeriesChart::new(chart)
                .bar_width(fit_bar_width(chart, column.width))
                .render(*column, buf);
        }
    }

    fn render_nav(&self, area: Rect, buf: &mut Buffer) {
        let nav = Line::from(vec![
            Span::styled("[1]", Theme::nav_key()),
            Span::styled("Dashboard ", Theme::nav_label()),
            Span::styled("[2]", Theme::nav_key()),
            Span::styled("Forecast ", Theme::nav_label()),
            Span::styled("[3]", Theme::nav_key()),
            Span::styled("Results ", Theme::nav_label()),
            Span::styled("[e]", Theme::nav_key()),
            Span::styled("Export Report ", Theme::nav_label()),
            Span::styled("[q]", Theme::nav_key()),
            Span::styled("Quit", Theme::nav_label()),
        ]);

        Paragraph::new(nav).render(area, buf);
    }
}

/// Widest bars that still fit every group inside a bordered column
fn fit_bar_width(series: &ChartSeries, width: u16) -> u16 {
    let groups = series.groups.len().max(1) as u16;
    let bars = groups * series.legend.len().max(1) as u16;
    let usable = width.saturating_sub(2 + 2 * (groups - 1));
    (usable / bars).clamp(1, 5)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::Predictor;
    use crate::models::{CropType, FarmingConditions, GeneticTrait, Season, SoilType};

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
    fn shows_crops_traits_and_charts() {
        let results = Predictor::default().predict(
            FarmingConditions::new(CropType::Rice, SoilType::Clay, Season::Monsoon, 25.0, 200.0),
            vec![GeneticTrait::HighYield],
            None,
        );
        let charts = vec![ChartSeries::yield_prediction(), ChartSeries::ga_evolution()];
        let area = Rect::new(0, 0, 160, 48);
        let mut buf = Buffer::empty(area);
        ResultsScreen::new(Some(&results), &charts).render(area, &mut buf);

        let text = screen_text(&buf);
        assert!(text.contains("Recommended Crops"));
        assert!(text.contains("Rice"));
        assert!(text.contains("100"));
        assert!(text.contains("• High Yield"));
        assert!(text.contains("Yield Prediction Analysis"));
        assert!(text.contains("Genetic Algorithm Evolution"));
        assert!(text.contains("[e]Export Report"));
        assert!(text.contains("Best match: Rice"));
        assert!(text.contains("100/100"));
    }

    #[test]
    fn bars_shrink_to_fit_narrow_columns() {
        let series = ChartSeries::yield_prediction();
        // 6 months of 3 bars, 10 gap columns, 2 border columns
        assert_eq!(fit_bar_width(&series, 80), 3);
        assert_eq!(fit_bar_width(&series, 40), 1);
        assert_eq!(fit_bar_width(&series, 300), 5);
        assert_eq!(fit_bar_width(&series, 5), 1);
    }

    #[test]
    fn placeholder_without_results() {
        let charts = vec![ChartSeries::ga_evolution()];
        let area = Rect::new(0, 0, 120, 36);
        let mut buf = Buffer::empty(area);
        ResultsScreen::new(None, &charts).render(area, &mut buf);

        let text = screen_text(&buf);
        assert!(text.contains("No prediction yet"));
        assert!(text.contains("Awaiting prediction"));
    }
}
