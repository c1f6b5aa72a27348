//! Thread-safe handle to a builder session

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::builder::DrinkBuilder;
use crate::cup::{CupEvent, Ingredient, LayerSlot};
use crate::error::Result;

/// A [`DrinkBuilder`] behind one lock
///
/// Every operation is a writer, so a single mutex per session is enough;
/// sessions are never shared between users. Store operations cannot leave
/// the cup half-updated, so a poisoned lock is recovered rather than
/// propagated.
#[derive(Debug, Clone)]
pub struct SharedBuilder {
    inner: Arc<Mutex<DrinkBuilder>>,
}

impl SharedBuilder {
    pub fn new(builder: DrinkBuilder) -> Self {
        Self {
            inner: Arc::new(Mutex::new(builder)),
        }
    }

    fn lock(&self) -> MutexGuard<'_, DrinkBuilder> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Run `f` with exclusive access to the session
    pub fn with<R>(&self, f: impl FnOnce(&mut DrinkBuilder) -> R) -> R {
        f(&mut *self.lock())
    }

    pub fn add(&self, ingredient: Ingredient) -> Result<CupEvent> {
        self.lock().add(ingredient)
    }

    pub fn remove(&self, position: usize) -> Result<(Ingredient, CupEvent)> {
        self.lock().remove(position)
    }

    pub fn clear_all(&self) -> CupEvent {
        self.lock().clear_all()
    }

    /// Copy of the current slot contents
    pub fn snapshot(&self) -> Vec<LayerSlot> {
        self.lock().snapshot().to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CupConfig;

    #[test]
    fn test_clones_share_one_session() {
        let shared = SharedBuilder::new(DrinkBuilder::new(CupConfig::default()).unwrap());
        let other = shared.clone();

        other
            .add(Ingredient::new(1, "Espresso", 25.0, "#6f4e37"))
            .unwrap();

        assert_eq!(shared.snapshot().iter().flatten().count(), 5);
        assert_eq!(shared.with(|b| b.selected().len()), 1);
    }
}
