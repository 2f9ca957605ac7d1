//! Dice pool selection.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::DieFace;

/// A selection of dice to be rolled together, keyed by face.
///
/// Quantities are never negative. A face with quantity zero is not stored,
/// so iteration only ever yields selected faces, in ascending order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DicePool {
    quantities: BTreeMap<DieFace, u32>,
}

impl DicePool {
    /// Create an empty dice pool.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`DicePool::set_quantity`].
    pub fn with(mut self, face: DieFace, qty: i64) -> Self {
        self.set_quantity(face, qty);
        self
    }

    /// Replace the quantity for `face`. Negative requests are floored to 0.
    pub fn set_quantity(&mut self, face: DieFace, qty: i64) {
        let qty = u32::try_from(qty.max(0)).unwrap_or(u32::MAX);
        if qty == 0 {
            self.quantities.remove(&face);
        } else {
            self.quantities.insert(face, qty);
        }
    }

    /// Add one die of the given face.
    pub fn increment(&mut self, face: DieFace) {
        let qty = self.quantities.entry(face).or_insert(0);
        *qty = qty.saturating_add(1);
    }

    /// Remove one die of the given face. Does nothing when none are selected.
    pub fn decrement(&mut self, face: DieFace) {
        if let Some(qty) = self.quantities.get_mut(&face) {
            *qty -= 1;
            if *qty == 0 {
                self.quantities.remove(&face);
            }
        }
    }

    /// Clear every selection.
    pub fn reset(&mut self) {
        self.quantities.clear();
    }

    /// How many dice of `face` are selected.
    pub fn quantity(&self, face: DieFace) -> u32 {
        self.quantities.get(&face).copied().unwrap_or(0)
    }

    /// Returns true if at least one die is selected.
    pub fn has_any_selection(&self) -> bool {
        !self.quantities.is_empty()
    }

    /// Total number of dice across all faces.
    pub fn dice_count(&self) -> u64 {
        self.quantities.values().map(|&q| u64::from(q)).sum()
    }

    /// Selected faces with their quantities, in ascending face order.
    pub fn iter(&self) -> impl Iterator<Item = (DieFace, u32)> + '_ {
        self.quantities.iter().map(|(&face, &qty)| (face, qty))
    }

    /// Formula terms such as `"2d6"`, in ascending face order.
    pub fn terms(&self) -> Vec<String> {
        self.iter().map(|(face, qty)| format!("{qty}{face}")).collect()
    }
}
