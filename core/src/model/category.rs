use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Color given to a new category when none is picked.
pub const DEFAULT_COLOR: &str = "#3B82F6";

/// Quick-pick palette: blue, green, amber, red, purple, pink, teal, orange.
pub const PRESET_COLORS: [&str; 8] = [
    "#3B82F6", "#10B981", "#F59E0B", "#EF4444", "#8B5CF6", "#EC4899", "#14B8A6", "#F97316",
];

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub color: String,
}

impl Category {
    pub fn new(name: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            color: color.into(),
        }
    }

    /// Seed written on first run.
    pub fn defaults() -> Vec<Category> {
        [("1", "Work", "#3B82F6"), ("2", "Personal", "#10B981"), ("3", "Shopping", "#F59E0B")]
            .into_iter()
            .map(|(id, name, color)| Category {
                id: id.to_string(),
                name: name.to_string(),
                color: color.to_string(),
            })
            .collect()
    }

    pub fn apply(&mut self, patch: CategoryPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(color) = patch.color {
            self.color = color;
        }
    }

    /// The color as an RGB triple, if it is a `#RRGGBB` string.
    pub fn rgb(&self) -> Option<(u8, u8, u8)> {
        parse_hex_color(&self.color)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryPatch {
    pub name: Option<String>,
    pub color: Option<String>,
}

impl CategoryPatch {
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }
}

pub fn is_hex_color(value: &str) -> bool {
    parse_hex_color(value).is_some()
}

fn parse_hex_color(value: &str) -> Option<(u8, u8, u8)> {
    let hex = value.strip_prefix('#')?;
    if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some((channel(0)?, channel(2)?, channel(4)?))
}
