use crate::models::ChartSeries;
use crate::ui::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Paragraph, Widget},
};

/// Grouped bar chart with a legend row, one colour per series
pub struct SeriesChart<'a> {
    series: &'a ChartSeries,
    bar_width: u16,
}

impl<'a> SeriesChart<'a> {
    pub fn new(series: &'a ChartSeries) -> Self {
        Self {
            series,
            bar_width: 3,
        }
    }

    pub fn bar_width(mut self, width: u16) -> Self {
        self.bar_width = width.max(1);
        self
    }

    fn color(index: usize) -> Style {
        Style::default().fg(Theme::SERIES[index % Theme::SERIES.len()])
    }

    fn legend(&self) -> Line<'a> {
        let mut spans = Vec::new();
        for (i, name) in self.series.legend.iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw("  "));
            }
            spans.push(Span::styled("■ ", Self::color(i)));
            spans.push(Span::styled(*name, Theme::dim()));
        }
        Line::from(spans)
    }
}

impl Widget for SeriesChart<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(self.series.title)
            .borders(Borders::ALL)
            .border_style(Theme::border());

        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height < 3 {
            return;
        }

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Min(2)])
            .split(inner);

        Paragraph::new(self.legend()).render(chunks[0], buf);

        let Some(max) = self.series.max_value() else {
            Paragraph::new(Span::styled("No data", Theme::dim())).render(chunks[1], buf);
            return;
        };

        let mut chart = BarChart::default()
            .bar_width(self.bar_width)
            .bar_gap(0)
            .group_gap(2)
            .max(max);

        for (label, values) in &self.series.groups {
            let bars: Vec<Bar> = values
                .iter()
                .enumerate()
                .map(|(i, value)| Bar::default().value(*value).style(Self::color(i)))
                .collect();
            chart = chart.data(BarGroup::default().label(Line::from(*label)).bars(&bars));
        }

        chart.render(chunks[1], buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn legend_lists_every_series() {
        let series = ChartSeries::ga_evolution();
        let legend = SeriesChart::new(&series).legend();
        let text: String = legend.spans.iter().map(|s| s.content.as_ref()).collect();
        assert!(text.contains("Fitness Score"));
        assert!(text.contains("Population Diversity"));
    }

    #[test]
    fn renders_title_into_border() {
        let series = ChartSeries::yield_prediction();
        let area = Rect::new(0, 0, 80, 12);
        let mut buf = Buffer::empty(area);
        SeriesChart::new(&series).render(area, &mut buf);
        let top: String = (0..area.width)
            .map(|x| buf[(x, 0)].symbol().to_string())
            .collect();
        assert!(top.contains("Yield Prediction Analysis"));
    }
}
