use ratatui::style::{Color, Modifier, Style};

pub struct Theme;

impl Theme {
    // Base colors
    pub const FG: Color = Color::White;
    pub const DIM: Color = Color::DarkGray;
    pub const ACCENT: Color = Color::Green;
    pub const HIGHLIGHT: Color = Color::Cyan;
    pub const SECONDARY: Color = Color::Magenta;
    pub const TERTIARY: Color = Color::Yellow;

    // Status colors
    pub const SUCCESS: Color = Color::Green;
    pub const WARNING: Color = Color::Yellow;
    pub const ERROR: Color = Color::Red;

    // Weather colors
    pub const TEMP_COLD: Color = Color::LightBlue;
    pub const TEMP_COOL: Color = Color::Cyan;
    pub const TEMP_WARM: Color = Color::Yellow;
    pub const TEMP_HOT: Color = Color::Red;
    pub const RAIN_DRY: Color = Color::Yellow;
    pub const RAIN_OK: Color = Color::Green;
    pub const RAIN_HEAVY: Color = Color::LightBlue;

    // Chart series, in legend order
    pub const SERIES: [Color; 3] = [Color::Green, Color::Cyan, Color::Magenta];

    // Styles
    pub fn title() -> Style {
        Style::default()
            .fg(Self::ACCENT)
            .add_modifier(Modifier::BOLD)
    }

    pub fn header() -> Style {
        Style::default().fg(Self::FG).add_modifier(Modifier::BOLD)
    }

    pub fn normal() -> Style {
        Style::default().fg(Self::FG)
    }

    pub fn dim() -> Style {
        Style::default().fg(Self::DIM)
    }

    pub fn highlight() -> Style {
        Style::default()
            .fg(Self::HIGHLIGHT)
            .add_modifier(Modifier::BOLD)
    }

    pub fn selected() -> Style {
        Style::default()
            .bg(Color::DarkGray)
            .fg(Self::FG)
            .add_modifier(Modifier::BOLD)
    }

    pub fn success() -> Style {
        Style::default().fg(Self::SUCCESS)
    }

    pub fn warning() -> Style {
        Style::default().fg(Self::WARNING)
    }

    pub fn error() -> Style {
        Style::default().fg(Self::ERROR)
    }

    /// Thresholds follow the planting-window bands (frost, moderate, heat)
    pub fn temp_color(temp_c: f64) -> Color {
        if temp_c < 0.0 {
            Self::TEMP_COLD
        } else if temp_c < 15.0 {
            Self::TEMP_COOL
        } else if temp_c <= 30.0 {
            Self::TEMP_WARM
        } else {
            Self::TEMP_HOT
        }
    }

    /// Daily precipitation
    pub fn rain_color(precip_mm: f64) -> Color {
        if precip_mm < 1.0 {
            Self::RAIN_DRY
        } else if precip_mm <= 50.0 {
            Self::RAIN_OK
        } else {
            Self::RAIN_HEAVY
        }
    }

    pub fn score_color(score: u8) -> Color {
        if score >= 90 {
            Self::SUCCESS
        } else if score >= 70 {
            Self::HIGHLIGHT
        } else {
            Self::WARNING
        }
    }

    pub fn verdict(recommended: bool) -> Style {
        if recommended {
            Self::success().add_modifier(Modifier::BOLD)
        } else {
            Self::error().add_modifier(Modifier::BOLD)
        }
    }

    pub fn nav_key() -> Style {
        Style::default()
            .fg(Self::ACCENT)
            .add_modifier(Modifier::BOLD)
    }

    pub fn nav_label() -> Style {
        Style::default().fg(Self::DIM)
    }

    pub fn border() -> Style {
        Style::default().fg(Self::DIM)
    }

    pub fn border_focused() -> Style {
        Style::default().fg(Self::ACCENT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn temperature_bands() {
        assert_eq!(Theme::temp_color(-1.0), Theme::TEMP_COLD);
        assert_eq!(Theme::temp_color(10.0), Theme::TEMP_COOL);
        assert_eq!(Theme::temp_color(30.0), Theme::TEMP_WARM);
        assert_eq!(Theme::temp_color(36.0), Theme::TEMP_HOT);
    }

    #[test]
    fn score_bands() {
        assert_eq!(Theme::score_color(100), Theme::SUCCESS);
        assert_eq!(Theme::score_color(75), Theme::HIGHLIGHT);
        assert_eq!(Theme::score_color(60), Theme::WARNING);
    }
}
