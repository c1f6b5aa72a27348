//! Drink Builder Session
//!
//! One user's cup in progress: the layer store plus the list of chosen
//! ingredients, the highlighted choice, the cup theme and the drink name.
//! Every mutation finishes writing state before its animation is planned
//! and handed to the renderer.

mod shared;
mod theme;

pub use shared::SharedBuilder;
pub use theme::CupTheme;

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::animation::{self, Renderer, TracingRenderer};
use crate::config::CupConfig;
use crate::cup::{CupEvent, Ingredient, IngredientId, LayerSlot, LayerStore, FULL_CUP_PERCENT};
use crate::error::{CupError, Result};

/// Name given to a drink when the user does not choose one
pub const DEFAULT_DRINK_NAME: &str = "Min Drømmekopp";

/// A finished drink, ready for the persistence layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DrinkDraft {
    pub name: String,
    pub base_price: f64,
    pub sale_price: f64,
    pub ingredient_ids: Vec<IngredientId>,
    pub theme: CupTheme,
    /// Cup contents at the time of drafting, for the drink image
    pub layers: Vec<LayerSlot>,
    pub created_at: DateTime<Utc>,
}

/// Drink builder session state
pub struct DrinkBuilder {
    session_id: Uuid,
    started_at: DateTime<Utc>,
    config: CupConfig,
    store: LayerStore,
    /// Ingredients added to the cup, in the order they were added
    selected: Vec<Ingredient>,
    /// Ingredient highlighted in the list but not yet added
    current: Option<Ingredient>,
    theme: CupTheme,
    drink_name: String,
    /// Sum of added fill levels, capped at 100
    fill_level: f64,
    renderer: Box<dyn Renderer>,
}

impl fmt::Debug for DrinkBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DrinkBuilder")
            .field("session_id", &self.session_id)
            .field("started_at", &self.started_at)
            .field("store", &self.store)
            .field("selected", &self.selected.len())
            .field("theme", &self.theme.name)
            .field("drink_name", &self.drink_name)
            .field("fill_level", &self.fill_level)
            .finish_non_exhaustive()
    }
}

impl DrinkBuilder {
    /// Start a session with an empty cup
    ///
    /// # Errors
    /// `InvalidConfig` if the configuration does not validate
    pub fn new(config: CupConfig) -> Result<Self> {
        config.validate()?;

        let session_id = Uuid::new_v4();
        info!(%session_id, capacity = config.capacity, "Starting drink builder session");

        Ok(Self {
            session_id,
            started_at: Utc::now(),
            store: LayerStore::new(config.capacity),
            config,
            selected: Vec::new(),
            current: None,
            theme: CupTheme::default(),
            drink_name: DEFAULT_DRINK_NAME.to_string(),
            fill_level: 0.0,
            renderer: Box::new(TracingRenderer),
        })
    }

    /// Replace the renderer that receives animation timelines
    pub fn with_renderer(mut self, renderer: impl Renderer + 'static) -> Self {
        self.renderer = Box::new(renderer);
        self
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn config(&self) -> &CupConfig {
        &self.config
    }

    /// The layer store (read-only)
    pub fn store(&self) -> &LayerStore {
        &self.store
    }

    /// Current slot contents
    pub fn snapshot(&self) -> &[LayerSlot] {
        self.store.snapshot()
    }

    /// Ingredients added so far, in order
    pub fn selected(&self) -> &[Ingredient] {
        &self.selected
    }

    /// Highlighted ingredient, if any
    pub fn current(&self) -> Option<&Ingredient> {
        self.current.as_ref()
    }

    pub fn theme(&self) -> &CupTheme {
        &self.theme
    }

    pub fn set_theme(&mut self, theme: CupTheme) {
        self.theme = theme;
    }

    pub fn drink_name(&self) -> &str {
        &self.drink_name
    }

    /// Rename the drink; a blank name restores the default
    pub fn set_drink_name(&mut self, name: impl Into<String>) {
        let name = name.into();
        self.drink_name = if name.trim().is_empty() {
            DEFAULT_DRINK_NAME.to_string()
        } else {
            name.trim().to_string()
        };
    }

    /// Nominal fill level in percent
    ///
    /// This is the sum of the added ingredients' fill levels, capped at
    /// 100, and can differ from the store when slots were truncated or the
    /// cup overflowed.
    pub fn fill_level(&self) -> f64 {
        self.fill_level
    }

    /// Highlight an ingredient without adding it
    pub fn select(&mut self, ingredient: Ingredient) {
        self.current = Some(ingredient);
    }

    /// Add the highlighted ingredient to the cup
    pub fn add_selected(&mut self) -> Result<CupEvent> {
        let ingredient = self.current.clone().ok_or(CupError::NothingSelected)?;
        self.add(ingredient)
    }

    /// Pour an ingredient into the cup and record it in the list
    ///
    /// # Errors
    /// `InvalidIngredient` if the descriptor is incomplete; nothing changes.
    pub fn add(&mut self, ingredient: Ingredient) -> Result<CupEvent> {
        let outcome = self.store.fill(&ingredient)?;

        let level = ingredient.fill_level.unwrap_or_default();
        self.fill_level = (self.fill_level + level).min(FULL_CUP_PERCENT);
        info!(
            session_id = %self.session_id,
            ingredient = ingredient.display_name(),
            layers = outcome.filled.len(),
            "Added ingredient"
        );
        self.selected.push(ingredient);

        let event = CupEvent::Filled(outcome);
        self.publish(&event);
        Ok(event)
    }

    /// Take the ingredient at `position` in the list back out of the cup
    ///
    /// # Errors
    /// `SelectionOutOfRange` if there is no such list entry.
    pub fn remove(&mut self, position: usize) -> Result<(Ingredient, CupEvent)> {
        let ingredient = self
            .selected
            .get(position)
            .ok_or(CupError::SelectionOutOfRange {
                index: position,
                len: self.selected.len(),
            })?;

        let outcome = self.store.drain(ingredient)?;
        let removed = self.selected.remove(position);

        let level = removed.fill_level.unwrap_or_default();
        self.fill_level = (self.fill_level - level).max(0.0);
        info!(
            session_id = %self.session_id,
            ingredient = removed.display_name(),
            layers = outcome.cleared.len(),
            "Removed ingredient"
        );

        let event = CupEvent::Drained(outcome);
        self.publish(&event);
        Ok((removed, event))
    }

    /// Empty the cup and forget every choice
    pub fn clear_all(&mut self) -> CupEvent {
        self.selected.clear();
        self.current = None;
        self.fill_level = 0.0;

        let event = CupEvent::Reset(self.store.reset());
        info!(session_id = %self.session_id, "Cleared all choices");
        self.publish(&event);
        event
    }

    /// Sum of the unit prices of the added ingredients
    pub fn total_price(&self) -> f64 {
        self.selected.iter().map(|i| i.unit_price).sum()
    }

    /// Describe the current cup as a drink
    ///
    /// `name` overrides the session's drink name when it is not blank.
    pub fn draft(&self, name: Option<&str>) -> DrinkDraft {
        let name = match name {
            Some(name) if !name.trim().is_empty() => name.trim().to_string(),
            _ => self.drink_name.clone(),
        };
        let price = self.total_price();

        DrinkDraft {
            name,
            base_price: price,
            sale_price: price,
            ingredient_ids: self.selected.iter().filter_map(|i| i.id).collect(),
            theme: self.theme.clone(),
            layers: self.store.snapshot().to_vec(),
            created_at: Utc::now(),
        }
    }

    /// Draft the drink and start over with an empty cup
    pub fn finish(&mut self, name: Option<&str>) -> DrinkDraft {
        let draft = self.draft(name);
        info!(session_id = %self.session_id, name = %draft.name, "Drink drafted");
        self.clear_all();
        self.drink_name = DEFAULT_DRINK_NAME.to_string();
        draft
    }

    fn publish(&mut self, event: &CupEvent) {
        let timeline = animation::plan(event, self.store.capacity(), &self.config.animation);
        self.renderer.render(&timeline);
    }
}
