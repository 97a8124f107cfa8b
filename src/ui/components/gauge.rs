use crate::ui::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

pub struct GaugeWidget<'a> {
    title: &'a str,
    value: Option<f64>,
    unit: &'a str,
    min: f64,
    max: f64,
    thresholds: Vec<(f64, Color)>,
    precision: usize,
}

impl<'a> GaugeWidget<'a> {
    pub fn new(title: &'a str, value: Option<f64>, unit: &'a str) -> Self {
        Self {
            title,
            value,
            unit,
            min: 0.0,
            max: 100.0,
            thresholds: Vec::new(),
            precision: 0,
        }
    }

    pub fn range(mut self, min: f64, max: f64) -> Self {
        self.min = min;
        self.max = max;
        self
    }

    pub fn thresholds(mut self, thresholds: Vec<(f64, Color)>) -> Self {
        self.thresholds = thresholds;
        self
    }

    fn get_color(&self, value: f64) -> Color {
        for (threshold, color) in self.thresholds.iter().rev() {
            if value >= *threshold {
                return *color;
            }
        }
        Theme::FG
    }

    fn ratio(&self, value: f64) -> f64 {
        if self.max <= self.min {
            return 0.0;
        }
        ((value - self.min) / (self.max - self.min)).clamp(0.0, 1.0)
    }
}

impl Widget for GaugeWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height < 3 || area.width < 10 {
            return;
        }

        let block = Block::default()
            .title(self.title)
            .borders(Borders::ALL)
            .border_style(Theme::border());

        let inner = block.inner(area);
        block.render(area, buf);

        match self.value {
            Some(value) => {
                let color = self.get_color(value);
                let value_str = format!("{:.prec$}{}", value, self.unit, prec = self.precision);

                let value_line =
                    Line::from(vec![Span::styled(value_str, Style::default().fg(color))]);
                Paragraph::new(value_line).render(inner, buf);

                if inner.height >= 2 {
                    let bar_area = Rect {
                        x: inner.x,
                        y: inner.y + 1,
                        width: inner.width,
                        height: 1,
                    };

                    let filled = (bar_area.width as f64 * self.ratio(value)) as u16;

                    for x in bar_area.x..bar_area.x + bar_area.width {
                        let ch = if x < bar_area.x + filled {
                            '█'
                        } else {
                            '░'
                        };
                        buf[(x, bar_area.y)].set_char(ch).set_fg(color);
                    }
                }
            }
            None => {
                let na_line = Line::from(vec![Span::styled("N/A", Theme::dim())]);
                Paragraph::new(na_line).render(inner, buf);
            }
        }
    }
}

pub fn temperature_gauge(title: &str, value: Option<f64>) -> GaugeWidget<'_> {
    GaugeWidget::new(title, value, "°C")
        .range(-10.0, 45.0)
        .thresholds(vec![
            (-100.0, Theme::TEMP_COLD),
            (0.0, Theme::TEMP_COOL),
            (15.0, Theme::TEMP_WARM),
            (30.1, Theme::TEMP_HOT),
        ])
}

pub fn humidity_gauge(title: &str, value: Option<f64>) -> GaugeWidget<'_> {
    GaugeWidget::new(title, value, "%")
        .range(0.0, 100.0)
        .thresholds(vec![
            (0.0, Theme::SUCCESS),
            (80.0, Theme::WARNING),
            (90.0, Theme::ERROR),
        ])
}

pub fn rainfall_gauge(title: &str, value: Option<f64>) -> GaugeWidget<'_> {
    GaugeWidget::new(title, value, " mm")
        .range(0.0, 60.0)
        .thresholds(vec![
            (0.0, Theme::RAIN_DRY),
            (1.0, Theme::RAIN_OK),
            (50.1, Theme::RAIN_HEAVY),
        ])
}

pub fn score_gauge(title: &str, score: u8) -> GaugeWidget<'_> {
    GaugeWidget::new(title, Some(score as f64), "/100")
        .range(0.0, 100.0)
        .thresholds(vec![
            (0.0, Theme::score_color(0)),
            (70.0, Theme::score_color(70)),
            (90.0, Theme::score_color(90)),
        ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn colour_follows_thresholds() {
        let gauge = temperature_gauge("t", Some(20.0));
        assert_eq!(gauge.get_color(-5.0), Theme::TEMP_COLD);
        assert_eq!(gauge.get_color(20.0), Theme::TEMP_WARM);
        assert_eq!(gauge.get_color(30.0), Theme::TEMP_WARM);
        assert_eq!(gauge.get_color(31.0), Theme::TEMP_HOT);
    }

    #[test]
    fn ratio_is_clamped() {
        let gauge = humidity_gauge("h", None);
        assert_eq!(gauge.ratio(150.0), 1.0);
        assert_eq!(gauge.ratio(-3.0), 0.0);
        assert_eq!(gauge.ratio(50.0), 0.5);
    }

    #[test]
    fn renders_value_and_bar() {
        let area = Rect::new(0, 0, 20, 4);
        let mut buf = Buffer::empty(area);
        score_gauge("Rice", 100).render(area, &mut buf);
        let row: String = (1..19).map(|x| buf[(x, 1)].symbol().to_string()).collect();
        assert!(row.starts_with("100/100"));
        let bar: String = (1..19).map(|x| buf[(x, 2)].symbol().to_string()).collect();
        assert_eq!(bar, "█".repeat(18));
    }
}
