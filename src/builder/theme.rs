//! Cup color themes

use serde::{Deserialize, Serialize};

use crate::cup::Color;

/// Colors for the lid, cup outline and straw accent
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CupTheme {
    pub name: String,
    pub lid: Color,
    pub cup: Color,
    pub straw: Color,
}

impl CupTheme {
    fn preset(name: &str, lid: Color, cup: Color, straw: Color) -> Self {
        Self {
            name: name.to_string(),
            lid,
            cup,
            straw,
        }
    }

    /// The selectable themes, default first
    pub fn presets() -> Vec<CupTheme> {
        vec![
            Self::preset(
                "Matcha",
                Color::rgb(0xa1, 0xc4, 0x8e),
                Color::rgb(0x7f, 0xa8, 0x7f),
                Color::rgb(0x5e, 0x8b, 0x5e),
            ),
            Self::preset(
                "Espresso",
                Color::rgb(0x9a, 0xba, 0xd9),
                Color::rgb(0x6c, 0x96, 0xba),
                Color::rgb(0x3e, 0x65, 0x87),
            ),
            Self::preset(
                "Smoothie",
                Color::rgb(0xff, 0xe5, 0x9a),
                Color::rgb(0xff, 0xc8, 0x57),
                Color::rgb(0xff, 0xb0, 0x00),
            ),
            Self::preset(
                "Berry",
                Color::rgb(0xdd, 0xb0, 0xd4),
                Color::rgb(0xb9, 0x81, 0xbd),
                Color::rgb(0x9a, 0x5a, 0x9f),
            ),
            Self::preset(
                "Stormy Sea",
                Color::rgb(0x3e, 0x4c, 0x59),
                Color::rgb(0x62, 0x7c, 0x8c),
                Color::rgb(0xaa, 0xb4, 0xc0),
            ),
            Self::preset(
                "Neon Purple",
                Color::rgb(0xa4, 0x2c, 0xd6),
                Color::rgb(0xd9, 0x4c, 0xf6),
                Color::rgb(0xf0, 0xaa, 0xff),
            ),
            Self::preset(
                "Sunset Orange",
                Color::rgb(0xff, 0x63, 0x47),
                Color::rgb(0xff, 0x85, 0x66),
                Color::rgb(0xff, 0xa4, 0x88),
            ),
            Self::preset(
                "Forest Green",
                Color::rgb(0x2e, 0x8b, 0x57),
                Color::rgb(0x3c, 0xb3, 0x71),
                Color::rgb(0x66, 0xcd, 0xaa),
            ),
        ]
    }

    /// Look up a preset by name, ignoring case
    pub fn named(name: &str) -> Option<CupTheme> {
        Self::presets()
            .into_iter()
            .find(|theme| theme.name.eq_ignore_ascii_case(name.trim()))
    }
}

impl Default for CupTheme {
    fn default() -> Self {
        Self::presets().swap_remove(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_first_preset() {
        let presets = CupTheme::presets();
        assert_eq!(presets.len(), 8);
        assert_eq!(presets[0], CupTheme::default());
    }

    #[test]
    fn test_named_lookup() {
        let theme = CupTheme::named("stormy sea").unwrap();
        assert_eq!(theme.cup.to_string(), "#627c8c");
        assert!(CupTheme::named("Latte").is_none());
    }
}
