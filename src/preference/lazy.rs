#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
//! Single-slot lazy memoization.

use crate::error::Result;
use std::cell::OnceCell;

/// A compute-once cache for a single value.
///
/// Not thread-safe: the engine computes its closure from a single caller.
/// A failing supplier leaves the slot empty, so the computation is retried
/// on the next call; only a usable value is ever cached.
#[derive(Debug, Default)]
pub struct Lazy<T> {
    slot: OnceCell<T>,
}

impl<T> Lazy<T> {
    /// Creates an empty slot.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            slot: OnceCell::new(),
        }
    }

    /// Returns the cached value, computing it with `supplier` on first use.
    ///
    /// # Errors
    ///
    /// Propagates the supplier's error without caching it.
    pub fn get_or_compute<F>(&self, supplier: F) -> Result<&T>
    where
        F: FnOnce() -> Result<T>,
    {
        if let Some(value) = self.slot.get() {
            return Ok(value);
        }
        let value = supplier()?;
        Ok(self.slot.get_or_init(|| value))
    }
}
