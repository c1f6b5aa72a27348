//! Cup Layer Model
//!
//! Implements the layered cup behind the drink builder:
//! - Ingredient descriptors and their slot counts
//! - The fixed-capacity layer store with fill, drain and reset

mod ingredient;
mod store;

pub use ingredient::{
    slots_for_fill_level, Color, DrainPlan, FillPlan, Ingredient, IngredientId, FULL_CUP_PERCENT,
};
pub use store::{
    CupEvent, CupOp, DrainOutcome, FillOutcome, Layer, LayerSlot, LayerStore, ResetOutcome,
    SlotMove, DEFAULT_CAPACITY,
};
