//! Ingredient Catalog
//!
//! The catalog itself lives in the backend; this is the seam the builder
//! reads it through, plus a JSON-backed implementation fed from the
//! backend's ingredient listing.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use tracing::{info, warn};

use crate::cup::{Ingredient, IngredientId};
use crate::error::{CupError, Result};

/// Group name for ingredients without a category
pub const UNCATEGORIZED: &str = "Uncategorized";

/// Source of ingredient descriptors
pub trait IngredientCatalog {
    /// Find one ingredient by id
    fn lookup(&self, id: IngredientId) -> Option<Ingredient>;

    /// Every ingredient, in catalog order
    fn ingredients(&self) -> Vec<Ingredient>;

    /// Find one ingredient or fail with `UnknownIngredient`
    fn require(&self, id: IngredientId) -> Result<Ingredient> {
        self.lookup(id)
            .ok_or(CupError::UnknownIngredient { id: id.0 })
    }

    /// Ingredients grouped by category name, groups sorted by name
    fn by_category(&self) -> BTreeMap<String, Vec<Ingredient>> {
        let mut groups: BTreeMap<String, Vec<Ingredient>> = BTreeMap::new();
        for ingredient in self.ingredients() {
            let category = ingredient
                .category_name
                .clone()
                .filter(|name| !name.trim().is_empty())
                .unwrap_or_else(|| UNCATEGORIZED.to_string());
            groups.entry(category).or_default().push(ingredient);
        }
        groups
    }
}

/// Catalog held in memory, loaded from the backend's JSON listing
#[derive(Debug, Clone, Default)]
pub struct JsonCatalog {
    ingredients: Vec<Ingredient>,
}

impl JsonCatalog {
    pub fn new(ingredients: Vec<Ingredient>) -> Self {
        let ids_missing = ingredients.iter().filter(|i| i.id.is_none()).count();
        if ids_missing > 0 {
            warn!("{ids_missing} catalog ingredient(s) have no id and cannot be looked up");
        }
        Self { ingredients }
    }

    /// Parse a JSON array of ingredients
    pub fn from_json_str(json: &str) -> Result<Self> {
        let ingredients: Vec<Ingredient> = serde_json::from_str(json)?;
        Ok(Self::new(ingredients))
    }

    /// Read a JSON array of ingredients from a file
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| CupError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let catalog = Self::from_json_str(&content)?;
        info!(
            "Loaded {} ingredient(s) from {}",
            catalog.len(),
            path.display()
        );
        Ok(catalog)
    }

    pub fn len(&self) -> usize {
        self.ingredients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ingredients.is_empty()
    }
}

impl IngredientCatalog for JsonCatalog {
    fn lookup(&self, id: IngredientId) -> Option<Ingredient> {
        self.ingredients
            .iter()
            .find(|ingredient| ingredient.id == Some(id))
            .cloned()
    }

    fn ingredients(&self) -> Vec<Ingredient> {
        self.ingredients.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LISTING: &str = r##"[
        { "ingredientId": 1, "name": "Espresso", "color": "#6f4e37", "fillLevel": 25, "categoryName": "Kaffe", "unitPrice": 15 },
        { "ingredientId": 2, "name": "Havremelk", "color": "#f3e5ab", "fillLevel": 50, "categoryName": "Melk", "unitPrice": 8 },
        { "ingredientId": 3, "name": "Vaniljesirup", "color": "#f3e5ab", "fillLevel": 5 }
    ]"##;

    #[test]
    fn test_lookup() {
        let catalog = JsonCatalog::from_json_str(LISTING).unwrap();
        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.lookup(IngredientId(2)).unwrap().name, "Havremelk");
        assert!(catalog.lookup(IngredientId(9)).is_none());
    }

    #[test]
    fn test_require_unknown() {
        let catalog = JsonCatalog::from_json_str(LISTING).unwrap();
        let err = catalog.require(IngredientId(9)).unwrap_err();
        assert!(matches!(err, CupError::UnknownIngredient { id: 9 }));
    }

    #[test]
    fn test_grouping() {
        let catalog = JsonCatalog::from_json_str(LISTING).unwrap();
        let groups = catalog.by_category();
        let names: Vec<&str> = groups.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["Kaffe", "Melk", UNCATEGORIZED]);
        assert_eq!(groups[UNCATEGORIZED][0].name, "Vaniljesirup");
    }

    #[test]
    fn test_malformed_listing() {
        let err = JsonCatalog::from_json_str("{ not json").unwrap_err();
        assert_eq!(err.error_code(), "SERIALIZATION_ERROR");
    }
}
