/// Page geometry in millimetres, A4 portrait by default
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageLayout {
    pub height_mm: f64,
    pub margin_mm: f64,
    /// Usable characters per line of body text
    pub chars_per_line: usize,
    /// Break before a text line once the cursor passes `height - text_break_mm`
    pub text_break_mm: f64,
    /// Break before a chart once the cursor passes `height - chart_break_mm`
    pub chart_break_mm: f64,
}

impl Default for PageLayout {
    fn default() -> Self {
        Self {
            height_mm: 297.0,
            margin_mm: 15.0,
            chars_per_line: 90,
            text_break_mm: 20.0,
            chart_break_mm: 80.0,
        }
    }
}

/// Lays text out top to bottom, starting new pages as the cursor runs out
pub struct PageWriter {
    layout: PageLayout,
    pages: Vec<Vec<String>>,
    cursor_mm: f64,
}

impl PageWriter {
    pub fn new(layout: PageLayout) -> Self {
        Self {
            layout,
            pages: vec![Vec::new()],
            cursor_mm: layout.margin_mm,
        }
    }

    fn new_page(&mut self) {
        self.pages.push(Vec::new());
        self.cursor_mm = self.layout.margin_mm;
    }

    fn current(&mut self) -> &mut Vec<String> {
        // pages is never empty
        let last = self.pages.len() - 1;
        &mut self.pages[last]
    }

    /// One line of text, followed by `advance_mm` of vertical space
    pub fn line(&mut self, text: impl Into<String>, advance_mm: f64) {
        if self.cursor_mm > self.layout.height_mm - self.layout.text_break_mm {
            self.new_page();
        }
        self.current().push(text.into());
        self.cursor_mm += advance_mm;
    }

    pub fn centered(&mut self, text: &str, advance_mm: f64) {
        let width = self.layout.chars_per_line;
        let len = text.chars().count();
        let pad = width.saturating_sub(len) / 2;
        self.line(format!("{}{}", " ".repeat(pad), text), advance_mm);
    }

    /// Word-wrapped paragraph; every wrapped line gets its own break check
    pub fn wrapped(&mut self, text: &str, indent: usize, advance_mm: f64) {
        let width = self.layout.chars_per_line.saturating_sub(indent).max(10);
        let prefix = " ".repeat(indent);
        for piece in wrap_text(text, width) {
            self.line(format!("{}{}", prefix, piece), advance_mm);
        }
    }

    /// Blank vertical space. Rendered as an empty line unless it falls at the
    /// top of a page.
    pub fn gap(&mut self, advance_mm: f64) {
        if !self.current().is_empty() {
            self.current().push(String::new());
        }
        self.cursor_mm += advance_mm;
    }

    /// A chart block, kept together, with its own break threshold
    pub fn block(&mut self, lines: Vec<String>, line_mm: f64, after_mm: f64) {
        if self.cursor_mm > self.layout.height_mm - self.layout.chart_break_mm {
            self.new_page();
        }
        self.cursor_mm += line_mm * lines.len() as f64 + after_mm;
        let page = self.current();
        page.extend(lines);
        page.push(String::new());
    }

    pub fn finish(self) -> Vec<Vec<String>> {
        self.pages
    }
}

/// Greedy word wrap. Words longer than `width` are split.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();

        while word.len() > width {
            if current_len > 0 {
                lines.push(std::mem::take(&mut current));
                current_len = 0;
            }
            let rest = word.split_off(width);
            lines.push(word.into_iter().collect());
            word = rest;
        }

        let needed = if current_len == 0 {
            word.len()
        } else {
            current_len + 1 + word.len()
        };

        if needed > width && current_len > 0 {
            lines.push(std::mem::take(&mut current));
            current_len = 0;
        }

        if current_len > 0 {
            current.push(' ');
            current_len += 1;
        }
        current_len += word.len();
        current.extend(word);
    }

    if current_len > 0 || lines.is_empty() {
        lines.push(current);
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_on_word_boundaries() {
        let lines = wrap_text("the quick brown fox jumps over the lazy dog", 10);
        assert_eq!(
            lines,
            vec!["the quick", "brown fox", "jumps over", "the lazy", "dog"]
        );
        assert!(lines.iter().all(|l| l.chars().count() <= 10));
    }

    #[test]
    fn splits_overlong_words() {
        let lines = wrap_text("ab abcdefghij k", 4);
        assert_eq!(lines, vec!["ab", "abcd", "efgh", "ij k"]);
    }

    #[test]
    fn empty_text_is_one_empty_line() {
        assert_eq!(wrap_text("   ", 20), vec![String::new()]);
    }

    #[test]
    fn multibyte_text_counts_chars() {
        let lines = wrap_text("25°C 30°C 35°C", 9);
        assert_eq!(lines, vec!["25°C 30°C", "35°C"]);
    }

    #[test]
    fn text_breaks_after_threshold() {
        let layout = PageLayout {
            height_mm: 50.0,
            margin_mm: 10.0,
            text_break_mm: 20.0,
            ..PageLayout::default()
        };
        let mut writer = PageWriter::new(layout);
        // cursor 10, 20, 30 fit; 40 passes 50 - 20
        for i in 0..5 {
            writer.line(format!("line {}", i), 10.0);
        }
        let pages = writer.finish();
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].len(), 3);
        assert_eq!(pages[1], vec!["line 3", "line 4"]);
    }

    #[test]
    fn chart_uses_larger_threshold() {
        let layout = PageLayout {
            height_mm: 100.0,
            margin_mm: 10.0,
            text_break_mm: 20.0,
            chart_break_mm: 80.0,
            ..PageLayout::default()
        };
        let mut writer = PageWriter::new(layout);
        writer.line("intro", 15.0);
        // cursor 25 > 100 - 80
        writer.block(vec!["chart".into()], 5.0, 10.0);
        let pages = writer.finish();
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[1][0], "chart");
    }

    #[test]
    fn gap_at_top_of_page_is_not_rendered() {
        let mut writer = PageWriter::new(PageLayout::default());
        writer.gap(5.0);
        writer.line("first", 5.0);
        let pages = writer.finish();
        assert_eq!(pages[0], vec!["first"]);
    }
}
