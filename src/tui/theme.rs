//! Catppuccin colours for the terminal front-end.

use ratatui::style::{Color, Modifier, Style};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeVariant {
    #[default]
    Mocha, // Dark
    Latte, // Light
}

#[derive(Debug, Clone)]
pub struct Theme {
    pub red: Color,
    pub peach: Color,
    pub yellow: Color,
    pub green: Color,
    pub teal: Color,
    pub blue: Color,
    pub lavender: Color,
    pub text: Color,
    pub subtext0: Color,
    pub overlay1: Color,
    pub surface1: Color,
    pub surface0: Color,
    pub base: Color,
    pub crust: Color,
}

impl Theme {
    pub fn new(variant: ThemeVariant) -> Self {
        match variant {
            ThemeVariant::Mocha => Self {
                red: Color::Rgb(0xf3, 0x8b, 0xa8),
                peach: Color::Rgb(0xfa, 0xb3, 0x87),
                yellow: Color::Rgb(0xf9, 0xe2, 0xaf),
                green: Color::Rgb(0xa6, 0xe3, 0xa1),
                teal: Color::Rgb(0x94, 0xe2, 0xd5),
                blue: Color::Rgb(0x89, 0xb4, 0xfa),
                lavender: Color::Rgb(0xb4, 0xbe, 0xfe),
                text: Color::Rgb(0xcd, 0xd6, 0xf4),
                subtext0: Color::Rgb(0xa6, 0xad, 0xc8),
                overlay1: Color::Rgb(0x7f, 0x84, 0x9c),
                surface1: Color::Rgb(0x45, 0x47, 0x5a),
                surface0: Color::Rgb(0x31, 0x32, 0x44),
                base: Color::Rgb(0x1e, 0x1e, 0x2e),
                crust: Color::Rgb(0x11, 0x11, 0x1b),
            },
            ThemeVariant::Latte => Self {
                red: Color::Rgb(0xd2, 0x0f, 0x39),
                peach: Color::Rgb(0xfe, 0x64, 0x0b),
                yellow: Color::Rgb(0xdf, 0x8e, 0x1d),
                green: Color::Rgb(0x40, 0xa0, 0x2b),
                teal: Color::Rgb(0x17, 0x92, 0x99),
                blue: Color::Rgb(0x1e, 0x66, 0xf5),
                lavender: Color::Rgb(0x72, 0x87, 0xfd),
                text: Color::Rgb(0x4c, 0x4f, 0x69),
                subtext0: Color::Rgb(0x6c, 0x6f, 0x85),
                overlay1: Color::Rgb(0x8c, 0x8f, 0xa1),
                surface1: Color::Rgb(0xbc, 0xc0, 0xcc),
                surface0: Color::Rgb(0xcc, 0xd0, 0xda),
                base: Color::Rgb(0xef, 0xf1, 0xf5),
                crust: Color::Rgb(0xdc, 0xe0, 0xe8),
            },
        }
    }

    pub fn title_style(&self) -> Style {
        Style::default().fg(self.blue).add_modifier(Modifier::BOLD)
    }

    pub fn muted_style(&self) -> Style {
        Style::default().fg(self.overlay1)
    }

    pub fn selected_style(&self, accent: Color) -> Style {
        Style::default().bg(self.surface1).fg(accent).add_modifier(Modifier::BOLD)
    }

    /// Blend `color` toward the crust colour by `amount` (0 = unchanged, 1 = crust)
    pub fn dim(&self, color: Color, amount: f32) -> Color {
        match (color, self.crust) {
            (Color::Rgb(r, g, b), Color::Rgb(cr, cg, cb)) => {
                let mix = |from: u8, to: u8| -> u8 {
                    let amount = amount.clamp(0.0, 1.0);
                    (from as f32 + (to as f32 - from as f32) * amount).round() as u8
                };
                Color::Rgb(mix(r, cr), mix(g, cg), mix(b, cb))
            }
            _ => color,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::new(ThemeVariant::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dim_bounds() {
        let theme = Theme::default();
        assert_eq!(theme.dim(theme.text, 0.0), theme.text);
        assert_eq!(theme.dim(theme.text, 1.0), theme.crust);
        assert_eq!(theme.dim(Color::Reset, 0.5), Color::Reset);
    }
}
