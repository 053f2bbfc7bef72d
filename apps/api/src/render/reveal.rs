//! Scroll-reveal bookkeeping. Each slot animates in at most once; after that
//! every re-render carries the `visible` class so nothing animates twice.

use std::collections::HashSet;

use crate::gem::builder::Slot;

#[derive(Debug, Default)]
pub struct RevealTracker {
    revealed: HashSet<Slot>,
}

impl RevealTracker {
    /// Records that `slot` scrolled into view. Returns `true` only the first time.
    pub fn reveal(&mut self, slot: Slot) -> bool {
        self.revealed.insert(slot)
    }

    pub fn is_revealed(&self, slot: Slot) -> bool {
        self.revealed.contains(&slot)
    }

    /// Class list for the animated root element of a slot.
    pub fn animate_class(&self, slot: Slot) -> &'static str {
        if self.is_revealed(slot) {
            " visible"
        } else {
            ""
        }
    }
}
