use crate::ui::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

const PLACEHOLDER: &str = "Select...";

/// Single-line numeric entry with a block cursor at the end while focused
pub struct InputWidget<'a> {
    label: &'a str,
    value: &'a str,
    unit: &'a str,
    focused: bool,
}

impl<'a> InputWidget<'a> {
    pub fn new(label: &'a str, value: &'a str) -> Self {
        Self {
            label,
            value,
            unit: "",
            focused: false,
        }
    }

    pub fn unit(mut self, unit: &'a str) -> Self {
        self.unit = unit;
        self
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }
}

impl Widget for InputWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.focused {
            Theme::border_focused()
        } else {
            Theme::border()
        };

        let block = Block::default()
            .title(self.label)
            .borders(Borders::ALL)
            .border_style(border_style);

        let inner = block.inner(area);
        block.render(area, buf);

        let mut spans = Vec::new();
        if self.value.is_empty() && !self.focused {
            spans.push(Span::styled("-", Theme::dim()));
        } else {
            spans.push(Span::raw(self.value));
        }
        if self.focused {
            spans.push(Span::styled(" ", Theme::selected()));
        }
        if !self.unit.is_empty() {
            spans.push(Span::styled(format!(" {}", self.unit), Theme::dim()));
        }

        Paragraph::new(Line::from(spans)).render(inner, buf);
    }
}

/// Cycling dropdown; `None` shows a placeholder
pub struct SelectWidget<'a> {
    label: &'a str,
    options: &'a [&'a str],
    selected: Option<usize>,
    focused: bool,
}

impl<'a> SelectWidget<'a> {
    pub fn new(label: &'a str, options: &'a [&'a str], selected: Option<usize>) -> Self {
        Self {
            label,
            options,
            selected,
            focused: false,
        }
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    fn value(&self) -> Option<&str> {
        self.selected
            .and_then(|i| self.options.get(i))
            .copied()
    }
}

impl Widget for SelectWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.focused {
            Theme::border_focused()
        } else {
            Theme::border()
        };

        let block = Block::default()
            .title(self.label)
            .borders(Borders::ALL)
            .border_style(border_style);

        let inner = block.inner(area);
        block.render(area, buf);

        let (value, style) = match self.value() {
            Some(v) if self.focused => (v, Theme::highlight()),
            Some(v) => (v, Theme::normal()),
            None => (PLACEHOLDER, Theme::dim()),
        };
        let display = if self.focused {
            format!("< {} >", value)
        } else {
            value.to_string()
        };

        Paragraph::new(Span::styled(display, style)).render(inner, buf);
    }
}

/// Checkbox list; the cursor row is only highlighted while focused
pub struct ToggleListWidget<'a> {
    label: &'a str,
    items: Vec<(&'a str, bool, Style)>,
    cursor: usize,
    focused: bool,
}

impl<'a> ToggleListWidget<'a> {
    pub fn new(label: &'a str, items: Vec<(&'a str, bool, Style)>) -> Self {
        Self {
            label,
            items,
            cursor: 0,
            focused: false,
        }
    }

    pub fn cursor(mut self, cursor: usize) -> Self {
        self.cursor = cursor;
        self
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }
}

impl Widget for ToggleListWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.focused {
            Theme::border_focused()
        } else {
            Theme::border()
        };

        let block = Block::default()
            .title(self.label)
            .borders(Borders::ALL)
            .border_style(border_style);

        let inner = block.inner(area);
        block.render(area, buf);

        let lines: Vec<Line> = self
            .items
            .iter()
            .enumerate()
            .map(|(i, (name, checked, style))| {
                let mark = if *checked { "[x] " } else { "[ ] " };
                let row_style = if self.focused && i == self.cursor {
                    Theme::selected()
                } else {
                    *style
                };
                Line::from(vec![
                    Span::styled(mark, Theme::normal()),
                    Span::styled(*name, row_style),
                ])
            })
            .collect();

        Paragraph::new(lines).render(inner, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf[(x, y)].symbol().to_string())
            .collect()
    }

    #[test]
    fn select_shows_placeholder_until_chosen() {
        let options = ["Clay", "Sandy"];
        let area = Rect::new(0, 0, 20, 3);

        let mut buf = Buffer::empty(area);
        SelectWidget::new("Soil", &options, None).render(area, &mut buf);
        assert!(row(&buf, 1).contains(PLACEHOLDER));

        let mut buf = Buffer::empty(area);
        SelectWidget::new("Soil", &options, Some(1))
            .focused(true)
            .render(area, &mut buf);
        assert!(row(&buf, 1).contains("< Sandy >"));
    }

    #[test]
    fn toggle_list_marks_checked_items() {
        let area = Rect::new(0, 0, 24, 4);
        let mut buf = Buffer::empty(area);
        ToggleListWidget::new(
            "Traits",
            vec![
                ("High Yield", true, Theme::normal()),
                ("Pest Resistance", false, Theme::normal()),
            ],
        )
        .render(area, &mut buf);
        assert!(row(&buf, 1).contains("[x] High Yield"));
        assert!(row(&buf, 2).contains("[ ] Pest Resistance"));
    }

    #[test]
    fn input_shows_unit() {
        let area = Rect::new(0, 0, 20, 3);
        let mut buf = Buffer::empty(area);
        InputWidget::new("Rainfall", "640")
            .unit("mm")
            .render(area, &mut buf);
        assert!(row(&buf, 1).contains("640 mm"));
    }
}
