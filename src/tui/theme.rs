use ratatui::style::Color;

use crate::model::config::UiConfig;
use crate::model::mood::MoodKind;
use crate::model::todo::Priority;

/// Parsed color theme for the TUI
#[derive(Debug, Clone)]
pub struct Theme {
    pub background: Color,
    pub text: Color,
    pub text_bright: Color,
    pub highlight: Color,
    pub dim: Color,
    pub red: Color,
    pub orange: Color,
    pub yellow: Color,
    pub green: Color,
    pub cyan: Color,
    pub purple: Color,
    pub pink: Color,
    pub selection_bg: Color,
    pub selection_border: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            background: Color::Rgb(0x28, 0x2A, 0x36),
            text: Color::Rgb(0xF8, 0xF8, 0xF2),
            text_bright: Color::Rgb(0xFF, 0xFF, 0xFF),
            highlight: Color::Rgb(0x8B, 0xE9, 0xFD),
            dim: Color::Rgb(0x62, 0x72, 0xA4),
            red: Color::Rgb(0xFF, 0x55, 0x55),
            orange: Color::Rgb(0xFF, 0xB8, 0x6C),
            yellow: Color::Rgb(0xF1, 0xFA, 0x8C),
            green: Color::Rgb(0x50, 0xFA, 0x7B),
            cyan: Color::Rgb(0x8B, 0xE9, 0xFD),
            purple: Color::Rgb(0xBD, 0x93, 0xF9),
            pink: Color::Rgb(0xFF, 0x79, 0xC6),
            selection_bg: Color::Rgb(0x44, 0x47, 0x5A),
            selection_border: Color::Rgb(0xBD, 0x93, 0xF9),
        }
    }
}

/// Parse a hex color string like "#FF4444" into an RGB Color
fn parse_hex_color(hex: &str) -> Option<Color> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some(Color::Rgb(channel(0)?, channel(2)?, channel(4)?))
}

impl Theme {
    /// Defaults with `[ui.colors]` overrides applied. Unknown names and
    /// malformed colors are ignored.
    pub fn from_config(ui: &UiConfig) -> Self {
        let mut theme = Theme::default();
        for (key, value) in &ui.colors {
            let Some(color) = parse_hex_color(value) else {
                continue;
            };
            let slot = match key.as_str() {
                "background" => &mut theme.background,
                "text" => &mut theme.text,
                "text_bright" => &mut theme.text_bright,
                "highlight" => &mut theme.highlight,
                "dim" => &mut theme.dim,
                "red" => &mut theme.red,
                "orange" => &mut theme.orange,
                "yellow" => &mut theme.yellow,
                "green" => &mut theme.green,
                "cyan" => &mut theme.cyan,
                "purple" => &mut theme.purple,
                "pink" => &mut theme.pink,
                "selection_bg" => &mut theme.selection_bg,
                "selection_border" => &mut theme.selection_border,
                _ => continue,
            };
            *slot = color;
        }
        theme
    }

    pub fn priority_color(&self, priority: Priority) -> Color {
        match priority {
            Priority::High => self.red,
            Priority::Medium => self.yellow,
            Priority::Low => self.green,
        }
    }

    pub fn mood_color(&self, mood: MoodKind) -> Color {
        match mood {
            MoodKind::Amazing => self.green,
            MoodKind::Great => self.cyan,
            MoodKind::Good => self.yellow,
            MoodKind::Okay => self.orange,
            MoodKind::Bad => self.pink,
            MoodKind::Terrible => self.red,
        }
    }

    /// Rotating color for the n-th activity in a chart
    pub fn activity_color(&self, n: usize) -> Color {
        let palette = [
            self.cyan,
            self.green,
            self.pink,
            self.yellow,
            self.purple,
            self.orange,
            self.red,
        ];
        palette[n % palette.len()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(parse_hex_color("#FF5555"), Some(Color::Rgb(0xFF, 0x55, 0x55)));
        assert_eq!(parse_hex_color("FF5555"), None);
        assert_eq!(parse_hex_color("#FF55"), None);
        assert_eq!(parse_hex_color("#ZZZZZZ"), None);
        assert_eq!(parse_hex_color("#ÿÿÿ"), None);
    }

    #[test]
    fn test_from_config_overrides() {
        let mut ui = UiConfig::default();
        ui.colors.insert("background".into(), "#000000".into());
        ui.colors.insert("nonsense".into(), "#112233".into());
        ui.colors.insert("red".into(), "not a color".into());

        let theme = Theme::from_config(&ui);
        assert_eq!(theme.background, Color::Rgb(0, 0, 0));
        assert_eq!(theme.red, Theme::default().red);
        assert_eq!(theme.text, Color::Rgb(0xF8, 0xF8, 0xF2));
    }

    #[test]
    fn test_activity_colors_wrap() {
        let theme = Theme::default();
        assert_eq!(theme.activity_color(0), theme.activity_color(7));
        assert_eq!(theme.mood_color(MoodKind::Terrible), theme.red);
        assert_eq!(theme.priority_color(Priority::High), theme.red);
    }
}
