use ratatui::style::Color;

use crate::model::{ThemeMode, UiConfig};
use crate::toast::Severity;

/// Parsed color theme for the TUI
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub mode: ThemeMode,
    pub background: Color,
    pub text: Color,
    pub text_bright: Color,
    pub highlight: Color,
    pub dim: Color,
    pub red: Color,
    pub yellow: Color,
    pub green: Color,
    pub blue: Color,
    pub selection_bg: Color,
    pub move_bg: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Theme::dark()
    }
}

impl Theme {
    pub fn dark() -> Self {
        Theme {
            mode: ThemeMode::Dark,
            background: Color::Rgb(0x0C, 0x00, 0x1B),
            text: Color::Rgb(0xB0, 0xAA, 0xFF),
            text_bright: Color::Rgb(0xFF, 0xFF, 0xFF),
            highlight: Color::Rgb(0xFB, 0x41, 0x96),
            dim: Color::Rgb(0x7D, 0x78, 0xBF),
            red: Color::Rgb(0xFF, 0x44, 0x44),
            yellow: Color::Rgb(0xFF, 0xD7, 0x00),
            green: Color::Rgb(0x44, 0xFF, 0x88),
            blue: Color::Rgb(0x44, 0x88, 0xFF),
            selection_bg: Color::Rgb(0x3D, 0x14, 0x38),
            move_bg: Color::Rgb(0x14, 0x2A, 0x4D),
        }
    }

    pub fn light() -> Self {
        Theme {
            mode: ThemeMode::Light,
            background: Color::Rgb(0xF9, 0xFA, 0xFB),
            text: Color::Rgb(0x1F, 0x29, 0x37),
            text_bright: Color::Rgb(0x11, 0x18, 0x27),
            highlight: Color::Rgb(0x25, 0x63, 0xEB),
            dim: Color::Rgb(0x6B, 0x72, 0x80),
            red: Color::Rgb(0xDC, 0x26, 0x26),
            yellow: Color::Rgb(0xB4, 0x53, 0x09),
            green: Color::Rgb(0x16, 0xA3, 0x4A),
            blue: Color::Rgb(0x25, 0x63, 0xEB),
            selection_bg: Color::Rgb(0xDB, 0xEA, 0xFE),
            move_bg: Color::Rgb(0xFE, 0xF3, 0xC7),
        }
    }

    /// Base palette for `mode` with `[ui.colors]` overrides applied
    pub fn from_config(mode: ThemeMode, ui: &UiConfig) -> Self {
        let mut theme = match mode {
            ThemeMode::Dark => Theme::dark(),
            ThemeMode::Light => Theme::light(),
        };

        for (key, value) in &ui.colors {
            let Some(color) = parse_hex_color(value) else {
                log::warn!("ignoring color {} = {:?}: expected #RRGGBB", key, value);
                continue;
            };
            match key.as_str() {
                "background" => theme.background = color,
                "text" => theme.text = color,
                "text_bright" => theme.text_bright = color,
                "highlight" => theme.highlight = color,
                "dim" => theme.dim = color,
                "red" => theme.red = color,
                "yellow" => theme.yellow = color,
                "green" => theme.green = color,
                "blue" => theme.blue = color,
                "selection_bg" => theme.selection_bg = color,
                "move_bg" => theme.move_bg = color,
                _ => log::warn!("unknown color key: {}", key),
            }
        }

        theme
    }

    pub fn severity_color(&self, severity: Severity) -> Color {
        match severity {
            Severity::Success => self.green,
            Severity::Info => self.blue,
            Severity::Warning => self.yellow,
            Severity::Error => self.red,
        }
    }
}

/// Parse a hex color string like "#FF4444" into an RGB Color
fn parse_hex_color(hex: &str) -> Option<Color> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(hex.get(0..2)?, 16).ok()?;
    let g = u8::from_str_radix(hex.get(2..4)?, 16).ok()?;
    let b = u8::from_str_radix(hex.get(4..6)?, 16).ok()?;
    Some(Color::Rgb(r, g, b))
}
