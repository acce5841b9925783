use ratatui::style::Color;

use crate::config::Theme;

/// Theme strings resolved into terminal colors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub fg: Color,
    pub bg: Color,
    pub highlight_bg: Color,
    pub highlight_fg: Color,
    pub muted: Color,
}

impl Palette {
    /// Resolve a theme. An empty highlight_fg is derived from highlight_bg.
    pub fn from_theme(theme: &Theme) -> Self {
        let highlight_bg = parse_color(&theme.highlight_bg);
        let highlight_fg = if theme.highlight_fg.trim().is_empty() {
            get_contrast_text_color(highlight_bg)
        } else {
            parse_color(&theme.highlight_fg)
        };
        Self {
            fg: parse_color(&theme.fg),
            bg: parse_color(&theme.bg),
            highlight_bg,
            highlight_fg,
            muted: parse_color(&theme.muted),
        }
    }
}

/// Parse a color string into a ratatui Color.
/// Accepts named colors and hex (#RRGGBB or #RGB); anything else is white
pub fn parse_color(color_str: &str) -> Color {
    let s = color_str.trim().to_lowercase();

    match s.as_str() {
        "black" => Color::Black,
        "red" => Color::Red,
        "green" => Color::Green,
        "yellow" => Color::Yellow,
        "blue" => Color::Blue,
        "magenta" => Color::Magenta,
        "cyan" => Color::Cyan,
        "white" => Color::White,
        "gray" | "grey" => Color::Gray,
        "darkgray" | "darkgrey" => Color::DarkGray,
        "lightred" => Color::LightRed,
        "lightgreen" => Color::LightGreen,
        "lightyellow" => Color::LightYellow,
        "lightblue" => Color::LightBlue,
        "lightmagenta" => Color::LightMagenta,
        "lightcyan" => Color::LightCyan,
        _ => s
            .strip_prefix('#')
            .and_then(parse_hex_color)
            .unwrap_or(Color::White),
    }
}

/// Parse hex color digits (RRGGBB or RGB, without the '#')
fn parse_hex_color(hex: &str) -> Option<Color> {
    if !hex.is_ascii() {
        return None;
    }
    match hex.len() {
        6 => {
            let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
            let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
            let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
            Some(Color::Rgb(r, g, b))
        }
        3 => {
            // Expand: 0xF -> 0xFF
            let mut channels = [0u8; 3];
            for (i, channel) in channels.iter_mut().enumerate() {
                let v = u8::from_str_radix(&hex[i..i + 1], 16).ok()?;
                *channel = (v << 4) | v;
            }
            Some(Color::Rgb(channels[0], channels[1], channels[2]))
        }
        _ => None,
    }
}

/// Pick black or white text for a background.
/// RGB colors use perceived brightness; named colors use a fixed dark set
pub fn get_contrast_text_color(background: Color) -> Color {
    let dark = match background {
        Color::Rgb(r, g, b) => {
            let brightness = 0.299 * r as f64 + 0.587 * g as f64 + 0.114 * b as f64;
            brightness < 128.0
        }
        Color::Black | Color::Blue | Color::Magenta | Color::Red | Color::DarkGray => true,
        _ => false,
    };
    if dark { Color::White } else { Color::Black }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_named_and_hex_colors() {
        assert_eq!(parse_color("Blue"), Color::Blue);
        assert_eq!(parse_color("#ff0080"), Color::Rgb(255, 0, 128));
        assert_eq!(parse_color("#0f0"), Color::Rgb(0, 255, 0));
        assert_eq!(parse_color("#zzz"), Color::White);
        assert_eq!(parse_color("chartreuse-ish"), Color::White);
    }

    #[test]
    fn empty_highlight_fg_is_derived() {
        let theme = Theme {
            highlight_bg: "yellow".to_string(),
            highlight_fg: String::new(),
            ..Theme::default()
        };
        assert_eq!(Palette::from_theme(&theme).highlight_fg, Color::Black);
    }
}
