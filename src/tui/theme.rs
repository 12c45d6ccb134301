//! Dark/light palettes and per-category tile colors.

use ratatui::style::{Color, Modifier, Style};

use crate::core::element::PhysicalState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn toggle(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }

    pub fn base(self) -> Style {
        match self {
            Theme::Dark => Style::default().fg(Color::Gray).bg(Color::Rgb(10, 25, 47)),
            Theme::Light => Style::default().fg(Color::Rgb(30, 41, 59)).bg(Color::Rgb(226, 232, 240)),
        }
    }

    pub fn accent(self) -> Style {
        match self {
            Theme::Dark => Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            Theme::Light => Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD),
        }
    }

    pub fn muted(self) -> Style {
        self.base().fg(Color::DarkGray)
    }

    pub fn border(self) -> Style {
        match self {
            Theme::Dark => self.base().fg(Color::Rgb(100, 255, 218)),
            Theme::Light => self.base().fg(Color::Rgb(71, 85, 105)),
        }
    }
}

/// Tile background for a dataset category. Unknown categories render gray.
pub fn category_color(category: &str) -> Color {
    match category {
        "alkali metal" => Color::Rgb(220, 38, 38),
        "alkaline earth metal" => Color::Rgb(249, 115, 22),
        "lanthanide" => Color::Rgb(250, 204, 21),
        "actinide" => Color::Rgb(234, 179, 8),
        "transition metal" => Color::Rgb(244, 63, 94),
        "post-transition metal" => Color::Rgb(74, 222, 128),
        "metalloid" => Color::Rgb(6, 182, 212),
        "diatomic nonmetal" => Color::Rgb(96, 165, 250),
        "polyatomic nonmetal" => Color::Rgb(59, 130, 246),
        "noble gas" => Color::Rgb(168, 85, 247),
        "halogen" => Color::Rgb(56, 189, 248),
        _ => Color::Rgb(107, 114, 128),
    }
}

pub fn state_color(state: PhysicalState) -> Color {
    match state {
        PhysicalState::Solid => Color::LightGreen,
        PhysicalState::Liquid => Color::LightBlue,
        PhysicalState::Gas => Color::LightRed,
    }
}
