use minimalist_todo_core::{Category, Priority};
use ratatui::style::Color;

/// Colors for one theme. The renderer picks one from the dark-mode flag on
/// every frame.
pub struct Palette {
    pub background: Color,
    pub text: Color,
    pub muted: Color,
    pub primary: Color,
    pub highlight: Color,
    pub done: Color,
    pub active: Color,
    pub high: Color,
    pub medium: Color,
    pub low: Color,
}

const LIGHT: Palette = Palette {
    background: Color::Rgb(249, 250, 251),
    text: Color::Rgb(17, 24, 39),
    muted: Color::Rgb(107, 114, 128),
    primary: Color::Rgb(37, 99, 235),
    highlight: Color::Rgb(219, 234, 254),
    done: Color::Rgb(5, 150, 105),
    active: Color::Rgb(217, 119, 6),
    high: Color::Rgb(220, 38, 38),
    medium: Color::Rgb(217, 119, 6),
    low: Color::Rgb(5, 150, 105),
};

const DARK: Palette = Palette {
    background: Color::Rgb(17, 24, 39),
    text: Color::Rgb(243, 244, 246),
    muted: Color::Rgb(156, 163, 175),
    primary: Color::Rgb(96, 165, 250),
    highlight: Color::Rgb(55, 65, 81),
    done: Color::Rgb(52, 211, 153),
    active: Color::Rgb(251, 191, 36),
    high: Color::Rgb(248, 113, 113),
    medium: Color::Rgb(251, 191, 36),
    low: Color::Rgb(52, 211, 153),
};

impl Palette {
    pub fn for_dark_mode(dark: bool) -> &'static Palette {
        if dark {
            &DARK
        } else {
            &LIGHT
        }
    }

    pub fn priority(&self, priority: Priority) -> Color {
        match priority {
            Priority::High => self.high,
            Priority::Medium => self.medium,
            Priority::Low => self.low,
        }
    }

    pub fn category(&self, category: &Category) -> Color {
        category
            .rgb()
            .map(|(r, g, b)| Color::Rgb(r, g, b))
            .unwrap_or(self.muted)
    }
}
