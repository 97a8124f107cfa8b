use crate::app::FormState;
use crate::models::insights::{
    group_thousands, MOCK_ACCURACY_PERCENT, MOCK_GA_GENERATIONS, MOCK_YIELD_IMPROVEMENT_PERCENT,
};
use crate::models::{CropType, GeneticTrait, RuleVariant, Season, SoilType, WeatherSnapshot};
use crate::ui::components::{
    humidity_gauge, rainfall_gauge, temperature_gauge, InputWidget, SelectWidget,
    ToggleListWidget,
};
use crate::ui::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Crop,
    Soil,
    Season,
    Temperature,
    Rainfall,
    Traits,
}

impl FormField {
    pub fn label(&self) -> &'static str {
        match self {
            FormField::Crop => "Crop Type",
            FormField::Soil => "Soil Type",
            FormField::Season => "Season",
            FormField::Temperature => "Temperature",
            FormField::Rainfall => "Rainfall",
            FormField::Traits => "Genetic Traits",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            FormField::Crop => FormField::Soil,
            FormField::Soil => FormField::Season,
            FormField::Season => FormField::Temperature,
            FormField::Temperature => FormField::Rainfall,
            FormField::Rainfall => FormField::Traits,
            FormField::Traits => FormField::Crop,
        }
    }

    pub fn prev(&self) -> Self {
        match self {
            FormField::Crop => FormField::Traits,
            FormField::Soil => FormField::Crop,
            FormField::Season => FormField::Soil,
            FormField::Temperature => FormField::Season,
            FormField::Rainfall => FormField::Temperature,
            FormField::Traits => FormField::Rainfall,
        }
    }
}

pub struct DashboardScreen<'a> {
    pub farm_name: &'a str,
    pub form: &'a FormState,
    pub weather: Option<&'a WeatherSnapshot>,
    pub variant: RuleVariant,
    pub predicting: bool,
    pub fetching_weather: bool,
    pub status_message: Option<&'a str>,
}

impl<'a> DashboardScreen<'a> {
    pub fn new(farm_name: &'a str, form: &'a FormState, variant: RuleVariant) -> Self {
        Self {
            farm_name,
            form,
            weather: None,
            variant,
            predicting: false,
            fetching_weather: false,
            status_message: None,
        }
    }

    pub fn with_weather(mut self, weather: Option<&'a WeatherSnapshot>) -> Self {
        self.weather = weather;
        self
    }

    pub fn busy(mut self, predicting: bool, fetching_weather: bool) -> Self {
        self.predicting = predicting;
        self.fetching_weather = fetching_weather;
        self
    }

    pub fn with_status(mut self, status: Option<&'a str>) -> Self {
        self.status_message = status;
        self
    }
}

impl Widget for DashboardScreen<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Length(4), // Headline cards
                Constraint::Min(18),   // Form and weather
                Constraint::Length(1), // Status message
                Constraint::Length(1), // Nav bar
            ])
            .split(area);

        self.render_header(chunks[0], buf);
        self.render_cards(chunks[1], buf);

        let middle = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(chunks[2]);

        self.render_form(middle[0], buf);
        self.render_weather(middle[1], buf);

        render_status_message(self.status_message, chunks[3], buf);
        self.render_nav(chunks[4], buf);
    }
}

impl DashboardScreen<'_> {
    fn render_header(&self, area: Rect, buf: &mut Buffer) {
        let title = format!("CropCast - {}", self.farm_name);

        let block = Block::default()
            .title(Span::styled(title, Theme::title()))
            .borders(Borders::BOTTOM)
            .border_style(Theme::border());

        let info = format!(
            "Smart Crop Forecasting | {} rule table",
            self.variant.as_str()
        );
        Paragraph::new(Span::styled(info, Theme::dim()))
            .block(block)
            .render(area, buf);
    }

    fn render_cards(&self, area: Rect, buf: &mut Buffer) {
        let cards = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Ratio(1, 3),
                Constraint::Ratio(1, 3),
                Constraint::Ratio(1, 3),
            ])
            .split(area);

        let figures = [
            (
                "AI Prediction",
                format!("{}%", MOCK_ACCURACY_PERCENT),
                "Neural network analysis",
                Theme::ACCENT,
            ),
            (
                "Genetic Algorithm",
                group_thousands(MOCK_GA_GENERATIONS),
                "Generations",
                Theme::SECONDARY,
            ),
            (
                "Yield Improvement",
                format!("+{}%", MOCK_YIELD_IMPROVEMENT_PERCENT),
                "vs Traditional",
                Theme::TERTIARY,
            ),
        ];

        for ((title, value, caption, color), card) in figures.into_iter().zip(cards.iter()) {
            let block = Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_style(Theme::border());

            let lines = vec![
                Line::from(Span::styled(
                    value,
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(caption, Theme::dim())),
            ];
            Paragraph::new(lines).block(block).render(*card, buf);
        }
    }

    fn render_form(&self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title("Farming Parameters")
            .borders(Borders::ALL)
            .border_style(Theme::border());

        let inner = block.inner(area);
        block.render(area, buf);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Selects
                Constraint::Length(3), // Numbers
                Constraint::Min(8),    // Traits
                Constraint::Length(1), // Submit
            ])
            .split(inner);

        let selects = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Ratio(1, 3),
                Constraint::Ratio(1, 3),
                Constraint::Ratio(1, 3),
            ])
            .split(rows[0]);

        let focused = |field: FormField| !self.predicting && self.form.focused_field == field;

        let crops: Vec<&str> = CropType::all().iter().map(|c| c.as_str()).collect();
        let soils: Vec<&str> = SoilType::all().iter().map(|s| s.as_str()).collect();
        let seasons: Vec<&str> = Season::all().iter().map(|s| s.as_str()).collect();

        SelectWidget::new(FormField::Crop.label(), &crops, self.form.crop)
            .focused(focused(FormField::Crop))
            .render(selects[0], buf);
        SelectWidget::new(FormField::Soil.label(), &soils, self.form.soil)
            .focused(focused(FormField::Soil))
            .render(selects[1], buf);
        SelectWidget::new(FormField::Season.label(), &seasons, self.form.season)
            .focused(focused(FormField::Season))
            .render(selects[2], buf);

        let numbers = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(rows[1]);

        InputWidget::new(FormField::Temperature.label(), &self.form.temperature)
            .unit("°C")
            .focused(focused(FormField::Temperature))
            .render(numbers[0], buf);
        InputWidget::new(FormField::Rainfall.label(), &self.form.rainfall)
            .unit("mm")
            .focused(focused(FormField::Rainfall))
            .render(numbers[1], buf);

        let traits = GeneticTrait::all()
            .iter()
            .map(|t| {
                (
                    t.as_str(),
                    self.form.selected_traits.contains(t),
                    Style::default().fg(t.color()),
                )
            })
            .collect();
        ToggleListWidget::new(FormField::Traits.label(), traits)
            .cursor(self.form.trait_cursor)
            .focused(focused(FormField::Traits))
            .render(rows[2], buf);

        let submit = if self.predicting {
            Line::from(Span::styled("Analyzing...", Theme::warning()))
        } else {
            Line::from(vec![
                Span::styled("[Enter]", Theme::nav_key()),
                Span::styled(" Generate Prediction", Theme::highlight()),
            ])
        };
        Paragraph::new(submit)
            .alignment(Alignment::Center)
            .render(rows[3], buf);
    }

    fn render_weather(&self, area: Rect, buf: &mut Buffer) {
        let title = match self.weather {
            Some(w) => format!("Live Weather - {}", w.location),
            None => "Live Weather".to_string(),
        };

        let block = Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(Theme::border());

        let inner = block.inner(area);
        block.render(area, buf);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4),
                Constraint::Length(4),
                Constraint::Length(4),
                Constraint::Min(3),
            ])
            .split(inner);

        let weather = self.weather;
        temperature_gauge("Temperature", weather.map(|w| w.temperature_c)).render(rows[0], buf);
        humidity_gauge("Humidity", weather.map(|w| w.humidity_percent)).render(rows[1], buf);
        rainfall_gauge("Rainfall Today", weather.map(|w| w.rainfall_mm)).render(rows[2], buf);

        let lines = match weather {
            _ if self.fetching_weather => {
                vec![Line::from(Span::styled("Fetching weather...", Theme::warning()))]
            }
            None => vec![Line::from(Span::styled(
                "Press [w] to fetch live weather",
                Theme::dim(),
            ))],
            Some(w) => {
                let mut lines = vec![Line::from(Span::styled(
                    format!(
                        "{} | updated {}",
                        w.coordinates,
                        w.fetched_at.format("%H:%M UTC")
                    ),
                    Theme::dim(),
                ))];
                match w.planting_window.as_ref() {
                    Some(verdict) => {
                        let label = if verdict.recommended {
                            "Good time to plant"
                        } else {
                            "Not recommended"
                        };
                        lines.push(Line::from(Span::styled(
                            label,
                            Theme::verdict(verdict.recommended),
                        )));
                        lines.push(Line::from(Span::styled(
                            verdict.reason.clone(),
                            Theme::normal(),
                        )));
                    }
                    None => lines.push(Line::from(Span::styled(
                        "Planting window unavailable",
                        Theme::dim(),
                    ))),
                }
                lines
            }
        };

        Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .render(rows[3], buf);
    }

    fn render_nav(&self, area: Rect, buf: &mut Buffer) {
        let nav = Line::from(vec![
            Span::styled("[1]", Theme::nav_key()),
            Span::styled("Dashboard ", Theme::nav_label()),
            Span::styled("[2]", Theme::nav_key()),
            Span::styled("Forecast ", Theme::nav_label()),
            Span::styled("[3]", Theme::nav_key()),
            Span::styled("Results ", Theme::nav_label()),
            Span::styled("[Tab]", Theme::nav_key()),
            Span::styled("Field ", Theme::nav_label()),
            Span::styled("[←→]", Theme::nav_key()),
            Span::styled("Change ", Theme::nav_label()),
            Span::styled("[Space]", Theme::nav_key()),
            Span::styled("Toggle ", Theme::nav_label()),
            Span::styled("[w]", Theme::nav_key()),
            Span::styled("Weather ", Theme::nav_label()),
            Span::styled("[u]", Theme::nav_key()),
            Span::styled("Use Weather ", Theme::nav_label()),
            Span::styled("[q]", Theme::nav_key()),
            Span::styled("Quit", Theme::nav_label()),
        ]);

        Paragraph::new(nav).render(area, buf);
    }
}

/// Shared by every screen: green for success messages, yellow otherwise
pub(crate) fn render_status_message(status: Option<&str>, area: Rect, buf: &mut Buffer) {
    let Some(msg) = status else {
        return;
    };

    let lower = msg.to_lowercase();
    let style = if lower.contains("fail") || lower.contains("error") {
        Theme::error()
    } else if lower.contains("success") || lower.contains("written") || lower.contains("updated")
    {
        Theme::success()
    } else {
        Theme::warning()
    };

    Paragraph::new(Span::styled(msg, style)).render(area, buf);
}

#[cfg(test)]
mod tests {
    use super::*;

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
    fn field_order_wraps_both_ways() {
        let mut field = FormField::Crop;
        for _ in 0..6 {
            field = field.next();
        }
        assert_eq!(field, FormField::Crop);
        assert_eq!(FormField::Crop.prev(), FormField::Traits);
    }

    #[test]
    fn renders_headline_figures_and_form() {
        let form = FormState::new();
        let area = Rect::new(0, 0, 120, 40);
        let mut buf = Buffer::empty(area);
        DashboardScreen::new("Test Farm", &form, RuleVariant::Standard)
            .with_status(Some("Please fill all fields"))
            .render(area, &mut buf);

        let text = screen_text(&buf);
        assert!(text.contains("CropCast - Test Farm"));
        assert!(text.contains("94.5%"));
        assert!(text.contains("1,247"));
        assert!(text.contains("+23.4%"));
        assert!(text.contains("Generate Prediction"));
        assert!(text.contains("Please fill all fields"));
        assert!(text.contains("Press [w] to fetch live weather"));
    }

    #[test]
    fn analyzing_replaces_submit_hint() {
        let form = FormState::new();
        let area = Rect::new(0, 0, 120, 40);
        let mut buf = Buffer::empty(area);
        DashboardScreen::new("Farm", &form, RuleVariant::Extended)
            .busy(true, false)
            .render(area, &mut buf);

        let text = screen_text(&buf);
        assert!(text.contains("Analyzing..."));
        assert!(!text.contains("Generate Prediction"));
        assert!(text.contains("Extended rule table"));
    }
}
