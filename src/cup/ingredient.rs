//! Ingredient descriptors and colors
//!
//! The catalog hands ingredients over in the shape the backend stores them,
//! with nullable columns left optional. Validation into a [`FillPlan`] or
//! [`DrainPlan`] happens right before the store is touched.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{CupError, Result};

/// Percentage of the cup an ingredient can claim at most before the store
/// itself caps it.
pub const FULL_CUP_PERCENT: f64 = 100.0;

/// Stable identity of a catalog ingredient
///
/// Layers are matched to ingredients by this id, never by display name, so
/// two differently configured ingredients sharing a name stay distinct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IngredientId(pub u32);

impl fmt::Display for IngredientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for IngredientId {
    fn from(id: u32) -> Self {
        IngredientId(id)
    }
}

/// An RGBA color as used for layer bands and cup themes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    /// Fully transparent black, drawn for empty slots
    pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0);

    /// Create an opaque color
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 0xff }
    }

    /// Create a color with explicit alpha
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Whether this color has any opacity at all
    pub fn is_visible(&self) -> bool {
        self.a > 0
    }
}

impl FromStr for Color {
    type Err = CupError;

    /// Parse `#rgb`, `#rrggbb`, `#rrggbbaa` or the keyword `transparent`.
    fn from_str(s: &str) -> Result<Self> {
        let invalid = || CupError::InvalidColor {
            value: s.to_string(),
        };

        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("transparent") {
            return Ok(Color::TRANSPARENT);
        }

        let hex = trimmed.strip_prefix('#').ok_or_else(invalid)?;
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }

        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16).map_err(|_| invalid())
        };

        match hex.len() {
            3 => {
                // #abc expands to #aabbcc
                let short = |i: usize| channel(i..i + 1).map(|v| v * 0x11);
                Ok(Color::rgb(short(0)?, short(1)?, short(2)?))
            }
            6 => Ok(Color::rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?)),
            8 => Ok(Color::rgba(
                channel(0..2)?,
                channel(2..4)?,
                channel(4..6)?,
                channel(6..8)?,
            )),
            _ => Err(invalid()),
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if *self == Color::TRANSPARENT {
            write!(f, "transparent")
        } else if self.a == 0xff {
            write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            write!(f, "#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}

impl TryFrom<String> for Color {
    type Error = CupError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}

/// Number of slots an ingredient occupies in a cup of `capacity` slots
///
/// Each slot stands for `100 / capacity` percent; partial slots are
/// truncated, so 24% in a 20-slot cup is 4 slots, not 5.
///
/// # Example
/// ```
/// use drommekopp::cup::slots_for_fill_level;
/// assert_eq!(slots_for_fill_level(25.0, 20), 5);
/// assert_eq!(slots_for_fill_level(24.0, 20), 4);
/// assert_eq!(slots_for_fill_level(150.0, 20), 30);
/// ```
pub fn slots_for_fill_level(fill_level: f64, capacity: usize) -> usize {
    if capacity == 0 || !fill_level.is_finite() || fill_level <= 0.0 {
        return 0;
    }
    // Multiply first: `100 / capacity` is inexact for capacities like 11
    (fill_level * capacity as f64 / FULL_CUP_PERCENT).floor() as usize
}

/// Ingredient descriptor as provided by the catalog
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ingredient {
    /// Catalog identity
    #[serde(rename = "ingredientId", default)]
    pub id: Option<IngredientId>,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Band color as a hex string
    #[serde(default)]
    pub color: Option<String>,
    /// Share of the cup this ingredient fills, in percent
    #[serde(default)]
    pub fill_level: Option<f64>,
    #[serde(default = "default_available")]
    pub is_available: bool,
    #[serde(default)]
    pub unit_price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_name: Option<String>,
}

fn default_available() -> bool {
    true
}

/// Validated input for a fill
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FillPlan {
    pub id: IngredientId,
    pub color: Color,
    pub slots: usize,
}

/// Validated input for a drain
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrainPlan {
    pub id: IngredientId,
    pub slots: usize,
}

impl Ingredient {
    /// Create a complete, available ingredient
    pub fn new(
        id: u32,
        name: impl Into<String>,
        fill_level: f64,
        color: impl Into<String>,
    ) -> Self {
        Self {
            id: Some(IngredientId(id)),
            name: name.into(),
            color: Some(color.into()),
            fill_level: Some(fill_level),
            is_available: true,
            ..Self::default()
        }
    }

    /// Set the unit price
    pub fn with_price(mut self, unit_price: f64) -> Self {
        self.unit_price = unit_price;
        self
    }

    /// Set the category name used for grouping
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category_name = Some(category.into());
        self
    }

    /// Name to show when an ingredient has no usable name
    pub fn display_name(&self) -> &str {
        if self.name.trim().is_empty() {
            "(unnamed)"
        } else {
            &self.name
        }
    }

    fn checked_id(&self) -> Result<IngredientId> {
        self.id
            .ok_or_else(|| CupError::invalid_ingredient(format!("'{}' has no id", self.display_name())))
    }

    fn checked_fill_level(&self) -> Result<f64> {
        match self.fill_level {
            None => Err(CupError::invalid_ingredient(format!(
                "'{}' has no fill level",
                self.display_name()
            ))),
            Some(level) if !level.is_finite() => Err(CupError::invalid_ingredient(format!(
                "'{}' has a non-numeric fill level",
                self.display_name()
            ))),
            Some(level) if level < 0.0 => Err(CupError::invalid_ingredient(format!(
                "'{}' has a negative fill level ({})",
                self.display_name(),
                level
            ))),
            Some(level) => Ok(level),
        }
    }

    /// Validate for a fill into a cup of `capacity` slots
    ///
    /// # Errors
    /// `InvalidIngredient` when the id, color or fill level is missing, the
    /// fill level is negative or not a number, or the color cannot be parsed.
    pub fn fill_plan(&self, capacity: usize) -> Result<FillPlan> {
        let id = self.checked_id()?;
        let fill_level = self.checked_fill_level()?;
        let raw_color = self.color.as_deref().ok_or_else(|| {
            CupError::invalid_ingredient(format!("'{}' has no color", self.display_name()))
        })?;
        let color = raw_color
            .parse::<Color>()
            .map_err(|e| CupError::invalid_ingredient(format!("'{}': {}", self.display_name(), e)))?;

        Ok(FillPlan {
            id,
            color,
            slots: slots_for_fill_level(fill_level, capacity),
        })
    }

    /// Validate for a drain from a cup of `capacity` slots
    ///
    /// The color plays no part in removal, so only id and fill level are
    /// checked.
    pub fn drain_plan(&self, capacity: usize) -> Result<DrainPlan> {
        let id = self.checked_id()?;
        let fill_level = self.checked_fill_level()?;

        Ok(DrainPlan {
            id,
            slots: slots_for_fill_level(fill_level, capacity),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(0.0, 20 => 0 ; "empty")]
    #[test_case(4.9, 20 => 0 ; "below one slot")]
    #[test_case(5.0, 20 => 1 ; "exactly one slot")]
    #[test_case(49.0, 20 => 9 ; "truncates partial slot")]
    #[test_case(100.0, 20 => 20 ; "full cup")]
    #[test_case(50.0, 10 => 5 ; "smaller cup")]
    #[test_case(100.0, 11 => 11 ; "full cup of eleven")]
    #[test_case(100.0, 91 => 91 ; "full cup of ninety one")]
    fn test_slot_mapping_truncates(fill_level: f64, capacity: usize) -> usize {
        slots_for_fill_level(fill_level, capacity)
    }

    #[test]
    fn test_full_pour_fills_every_capacity() {
        for capacity in 1..=100 {
            assert_eq!(slots_for_fill_level(100.0, capacity), capacity, "capacity {capacity}");
            assert_eq!(slots_for_fill_level(50.0, capacity * 2), capacity);
        }
    }

    #[test]
    fn test_slot_mapping_degenerate_inputs() {
        assert_eq!(slots_for_fill_level(f64::NAN, 20), 0);
        assert_eq!(slots_for_fill_level(-10.0, 20), 0);
        assert_eq!(slots_for_fill_level(50.0, 0), 0);
    }

    #[test]
    fn test_color_parsing() {
        assert_eq!("#6f4e37".parse::<Color>().unwrap(), Color::rgb(0x6f, 0x4e, 0x37));
        assert_eq!("#FFF".parse::<Color>().unwrap(), Color::rgb(0xff, 0xff, 0xff));
        assert_eq!(
            "#11223380".parse::<Color>().unwrap(),
            Color::rgba(0x11, 0x22, 0x33, 0x80)
        );
        assert_eq!("transparent".parse::<Color>().unwrap(), Color::TRANSPARENT);
    }

    #[test]
    fn test_color_rejects_garbage() {
        for value in ["", "red", "#12", "#12345", "#gggggg", "6f4e37", "#ééé"] {
            let err = value.parse::<Color>().unwrap_err();
            assert_eq!(err.error_code(), "INVALID_COLOR", "accepted {value:?}");
        }
    }

    #[test]
    fn test_color_display() {
        assert_eq!(Color::rgb(0x6f, 0x4e, 0x37).to_string(), "#6f4e37");
        assert_eq!(Color::rgba(1, 2, 3, 4).to_string(), "#01020304");
        assert_eq!(Color::TRANSPARENT.to_string(), "transparent");
    }

    #[test]
    fn test_color_serde() {
        let json = serde_json::to_string(&Color::rgb(0xa1, 0xc4, 0x8e)).unwrap();
        assert_eq!(json, "\"#a1c48e\"");
        let back: Color = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Color::rgb(0xa1, 0xc4, 0x8e));
        assert!(serde_json::from_str::<Color>("\"not-a-color\"").is_err());
    }

    #[test]
    fn test_fill_plan() {
        let espresso = Ingredient::new(7, "Espresso", 25.0, "#6f4e37");
        let plan = espresso.fill_plan(20).unwrap();
        assert_eq!(plan.id, IngredientId(7));
        assert_eq!(plan.slots, 5);
        assert_eq!(plan.color, Color::rgb(0x6f, 0x4e, 0x37));
    }

    #[test]
    fn test_fill_plan_rejects_missing_fields() {
        let mut no_level = Ingredient::new(1, "Melk", 25.0, "#ffffff");
        no_level.fill_level = None;
        assert!(no_level.fill_plan(20).is_err());

        let mut no_color = Ingredient::new(1, "Melk", 25.0, "#ffffff");
        no_color.color = None;
        assert!(no_color.fill_plan(20).is_err());

        let mut no_id = Ingredient::new(1, "Melk", 25.0, "#ffffff");
        no_id.id = None;
        assert!(no_id.fill_plan(20).is_err());
    }

    #[test]
    fn test_fill_plan_rejects_bad_values() {
        let negative = Ingredient::new(1, "Melk", -5.0, "#ffffff");
        let nan = Ingredient::new(1, "Melk", f64::NAN, "#ffffff");
        let bad_color = Ingredient::new(1, "Melk", 25.0, "white-ish");

        for ingredient in [negative, nan, bad_color] {
            let err = ingredient.fill_plan(20).unwrap_err();
            assert_eq!(err.error_code(), "INVALID_INGREDIENT");
        }
    }

    #[test]
    fn test_drain_plan_ignores_color() {
        let mut syrup = Ingredient::new(3, "Sirup", 10.0, "#c68e17");
        syrup.color = None;
        let plan = syrup.drain_plan(20).unwrap();
        assert_eq!(plan, DrainPlan { id: IngredientId(3), slots: 2 });
    }

    #[test]
    fn test_ingredient_json_shape() {
        let json = r##"{
            "ingredientId": 4,
            "name": "Matcha",
            "color": "#7fa87f",
            "fillLevel": 30,
            "isAvailable": true,
            "unitPrice": 12.5,
            "categoryId": 2,
            "categoryName": "Te"
        }"##;
        let ingredient: Ingredient = serde_json::from_str(json).unwrap();
        assert_eq!(ingredient.id, Some(IngredientId(4)));
        assert_eq!(ingredient.fill_level, Some(30.0));
        assert_eq!(ingredient.category_name.as_deref(), Some("Te"));
        assert_eq!(ingredient.fill_plan(20).unwrap().slots, 6);
    }

    #[test]
    fn test_ingredient_json_nullable_columns() {
        let json = r#"{ "ingredientId": 9, "name": "Is", "color": null, "fillLevel": null }"#;
        let ingredient: Ingredient = serde_json::from_str(json).unwrap();
        assert!(ingredient.is_available);
        assert!(ingredient.fill_plan(20).is_err());
    }
}
