//! Drømmekopp - Build-Your-Own-Drink Cup Model
//!
//! The drink builder lets a café guest pour ingredients into a cup and watch
//! it fill band by band. This crate holds the part of that feature with
//! real state:
//!
//! - `cup`: the fixed-capacity layer store with fill, drain and reset
//! - `animation`: timelines planned from store events, for any renderer
//! - `builder`: a guest's session around the store (choices, theme, draft)
//! - `catalog`: the seam to the backend's ingredient catalog
//!
//! # Example
//! ```
//! use drommekopp::cup::{Ingredient, LayerStore};
//!
//! let mut cup = LayerStore::default();
//! cup.fill(&Ingredient::new(1, "Espresso", 25.0, "#6f4e37")).unwrap();
//! cup.fill(&Ingredient::new(2, "Havremelk", 50.0, "#f3e5ab")).unwrap();
//!
//! let drained = cup.drain(&Ingredient::new(1, "Espresso", 25.0, "#6f4e37")).unwrap();
//! assert_eq!(drained.moved.len(), 10);
//! assert!(cup.is_compact());
//! ```

pub mod animation;
pub mod builder;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod cup;
pub mod error;

pub use error::{CupError, Result};
