//! Layer Store
//!
//! A fixed number of slots, each either empty or holding one band of an
//! ingredient. The highest index is the floor of the cup: fills settle on
//! the highest free indices and drains let the remaining bands fall back
//! toward the floor, so occupied slots always form one unbroken run ending
//! at `capacity - 1`.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::cup::ingredient::{Color, Ingredient, IngredientId};
use crate::error::Result;

/// Slot count of the reference cup (each slot is 5% of the cup)
pub const DEFAULT_CAPACITY: usize = 20;

/// One occupied band of the cup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Layer {
    pub color: Color,
    /// Ingredient that poured this band
    pub ingredient: IngredientId,
}

/// A slot is either empty or holds a [`Layer`]
pub type LayerSlot = Option<Layer>;

/// A band that fell from one slot to another during compaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SlotMove {
    pub from: usize,
    pub to: usize,
}

impl SlotMove {
    /// Number of slots travelled (always positive: bands only fall)
    pub fn distance(&self) -> usize {
        self.to.abs_diff(self.from)
    }
}

/// Result of a fill
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FillOutcome {
    pub ingredient: IngredientId,
    pub color: Color,
    /// Newly claimed indices, in the order they were claimed
    pub filled: Vec<usize>,
}

/// Result of a drain
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrainOutcome {
    pub ingredient: IngredientId,
    /// Indices cleared before compaction, in the order they were cleared
    pub cleared: Vec<usize>,
    /// Every surviving band whose index changed during compaction
    pub moved: Vec<SlotMove>,
}

/// Result of a reset
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResetOutcome {
    /// Indices that held a band before the reset
    pub cleared: Vec<usize>,
}

/// What changed in the cup after one operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CupEvent {
    Filled(FillOutcome),
    Drained(DrainOutcome),
    Reset(ResetOutcome),
}

impl CupEvent {
    /// True when the operation left the store exactly as it was
    pub fn is_noop(&self) -> bool {
        match self {
            CupEvent::Filled(outcome) => outcome.filled.is_empty(),
            CupEvent::Drained(outcome) => outcome.cleared.is_empty(),
            CupEvent::Reset(outcome) => outcome.cleared.is_empty(),
        }
    }
}

/// An operation on the store, for the value-returning [`LayerStore::apply`]
#[derive(Debug, Clone, PartialEq)]
pub enum CupOp {
    Fill(Ingredient),
    Drain(Ingredient),
    Reset,
}

/// Fixed-capacity stack of ingredient bands
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LayerStore {
    slots: Vec<LayerSlot>,
}

impl Default for LayerStore {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl LayerStore {
    /// Create an empty store with `capacity` slots
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: vec![None; capacity],
        }
    }

    /// Number of slots
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Read-only view of every slot, index 0 first
    pub fn snapshot(&self) -> &[LayerSlot] {
        &self.slots
    }

    /// Get a single slot
    pub fn get(&self, index: usize) -> Option<&Layer> {
        self.slots.get(index).and_then(Option::as_ref)
    }

    /// Number of occupied slots
    pub fn occupied(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    /// Number of empty slots
    pub fn free(&self) -> usize {
        self.capacity() - self.occupied()
    }

    /// Check if no slot is occupied
    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    /// Check if every slot is occupied
    pub fn is_full(&self) -> bool {
        self.slots.iter().all(Option::is_some)
    }

    /// Share of the cup currently filled, `0.0..=1.0`
    pub fn fill_fraction(&self) -> f64 {
        if self.slots.is_empty() {
            return 0.0;
        }
        self.occupied() as f64 / self.capacity() as f64
    }

    /// Check that occupied slots form one run ending at the floor
    pub fn is_compact(&self) -> bool {
        let empty_prefix = self.free();
        self.slots[..empty_prefix].iter().all(Option::is_none)
    }

    /// Indices currently holding bands of `ingredient`, lowest index first
    pub fn layers_of(&self, ingredient: IngredientId) -> Vec<usize> {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| matches!(slot, Some(layer) if layer.ingredient == ingredient))
            .map(|(index, _)| index)
            .collect()
    }

    /// Ingredient ids of the occupied slots in index order
    pub fn ingredient_order(&self) -> Vec<IngredientId> {
        self.slots.iter().flatten().map(|layer| layer.ingredient).collect()
    }

    /// Pour an ingredient into the cup
    ///
    /// Claims `slots_for_fill_level(fill_level)` empty slots, scanning from
    /// the floor upward. When the cup runs out of room only the remaining
    /// slots are filled; a full cup fills nothing and is not an error.
    ///
    /// # Errors
    /// `InvalidIngredient` if the descriptor is incomplete; the store is
    /// left untouched.
    ///
    /// # Example
    /// ```
    /// use drommekopp::cup::{Ingredient, LayerStore};
    /// let mut cup = LayerStore::default();
    /// let outcome = cup.fill(&Ingredient::new(1, "Espresso", 25.0, "#6f4e37")).unwrap();
    /// assert_eq!(outcome.filled, vec![19, 18, 17, 16, 15]);
    /// ```
    pub fn fill(&mut self, ingredient: &Ingredient) -> Result<FillOutcome> {
        let plan = ingredient.fill_plan(self.capacity())?;
        let layer = Layer {
            color: plan.color,
            ingredient: plan.id,
        };

        let mut filled = Vec::with_capacity(plan.slots.min(self.capacity()));
        for index in (0..self.capacity()).rev() {
            if filled.len() >= plan.slots {
                break;
            }
            if self.slots[index].is_none() {
                self.slots[index] = Some(layer);
                filled.push(index);
            }
        }

        debug!(
            ingredient = %plan.id,
            requested = plan.slots,
            filled = filled.len(),
            occupied = self.occupied(),
            "Filled cup"
        );
        debug_assert!(self.is_compact());

        Ok(FillOutcome {
            ingredient: plan.id,
            color: plan.color,
            filled,
        })
    }

    /// Pour an ingredient back out of the cup
    ///
    /// Clears up to `slots_for_fill_level(fill_level)` bands belonging to the
    /// ingredient, scanning from the floor upward, then lets every remaining
    /// band fall so the cup has no gaps. Remaining bands keep their relative
    /// order. Draining an ingredient that is not in the cup changes nothing.
    pub fn drain(&mut self, ingredient: &Ingredient) -> Result<DrainOutcome> {
        let plan = ingredient.drain_plan(self.capacity())?;

        let mut cleared = Vec::new();
        for index in (0..self.capacity()).rev() {
            if cleared.len() >= plan.slots {
                break;
            }
            if matches!(self.slots[index], Some(layer) if layer.ingredient == plan.id) {
                self.slots[index] = None;
                cleared.push(index);
            }
        }

        let moved = if cleared.is_empty() {
            Vec::new()
        } else {
            self.compact()
        };

        debug!(
            ingredient = %plan.id,
            requested = plan.slots,
            cleared = cleared.len(),
            moved = moved.len(),
            "Drained cup"
        );
        debug_assert!(self.is_compact());

        Ok(DrainOutcome {
            ingredient: plan.id,
            cleared,
            moved,
        })
    }

    /// Empty every slot
    ///
    /// Only slots that held a band are reported, so resetting an empty cup
    /// reports nothing.
    pub fn reset(&mut self) -> ResetOutcome {
        let cleared: Vec<usize> = self
            .slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.is_some())
            .map(|(index, _)| index)
            .collect();

        self.slots.iter_mut().for_each(|slot| *slot = None);

        debug!(cleared = cleared.len(), "Reset cup");
        ResetOutcome { cleared }
    }

    /// Apply an operation to a copy of the store
    ///
    /// Returns the new store and the change event; `self` is never modified.
    pub fn apply(&self, op: &CupOp) -> Result<(LayerStore, CupEvent)> {
        let mut next = self.clone();
        let event = match op {
            CupOp::Fill(ingredient) => CupEvent::Filled(next.fill(ingredient)?),
            CupOp::Drain(ingredient) => CupEvent::Drained(next.drain(ingredient)?),
            CupOp::Reset => CupEvent::Reset(next.reset()),
        };
        Ok((next, event))
    }

    /// Shift surviving bands toward the floor, preserving their order
    fn compact(&mut self) -> Vec<SlotMove> {
        let survivors: Vec<(usize, Layer)> = self
            .slots
            .iter()
            .enumerate()
            .filter_map(|(index, slot)| slot.map(|layer| (index, layer)))
            .collect();

        let base = self.capacity() - survivors.len();
        self.slots.iter_mut().for_each(|slot| *slot = None);

        let mut moved = Vec::new();
        for (rank, (from, layer)) in survivors.into_iter().enumerate() {
            let to = base + rank;
            self.slots[to] = Some(layer);
            if from != to {
                moved.push(SlotMove { from, to });
            }
        }
        moved
    }
}
