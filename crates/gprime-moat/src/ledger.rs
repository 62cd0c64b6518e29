//! Component bookkeeping for the streaming explorer.

use gprime_core::GaussianInteger;
use std::collections::BTreeSet;
use std::fmt;

/// Identifies a component slot in a [`ComponentLedger`].
///
/// Slots are reused once their component dies, so an id is only
/// meaningful within the block that produced it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ComponentId(pub u32);

impl ComponentId {
    /// The origin's component. Never freed.
    pub const ORIGIN: Self = Self(0);

    fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for ComponentId {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

#[derive(Clone, Debug, Default)]
struct Slot {
    size: u64,
    farthest: Option<GaussianInteger>,
    propagated: bool,
}

/// Sizes, farthest members and propagation flags of the live components.
///
/// Freed slots go to an ordered free list; [`allocate`](Self::allocate)
/// hands out the lowest one before growing.
#[derive(Clone, Debug)]
pub struct ComponentLedger {
    slots: Vec<Slot>,
    free: BTreeSet<u32>,
}

impl Default for ComponentLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl ComponentLedger {
    /// A ledger holding only the (empty) origin component.
    pub fn new() -> Self {
        Self {
            slots: vec![Slot::default()],
            free: BTreeSet::new(),
        }
    }

    /// A fresh slot with size zero.
    pub fn allocate(&mut self) -> ComponentId {
        match self.free.pop_first() {
            Some(id) => ComponentId(id),
            None => {
                self.slots.push(Slot::default());
                ComponentId((self.slots.len() - 1) as u32)
            }
        }
    }

    /// Count `g` as a member of `id`.
    pub fn record(&mut self, id: ComponentId, g: GaussianInteger) {
        let slot = &mut self.slots[id.index()];
        slot.size += 1;
        slot.farthest = slot.farthest.max(Some(g));
    }

    /// Fold `from` into `into` and free `from`.
    pub fn absorb(&mut self, into: ComponentId, from: ComponentId) {
        debug_assert_ne!(into, from);
        let taken = std::mem::take(&mut self.slots[from.index()]);
        let slot = &mut self.slots[into.index()];
        slot.size += taken.size;
        slot.farthest = slot.farthest.max(taken.farthest);
        slot.propagated |= taken.propagated;
        self.release(from);
    }

    /// Zero `id` and return it to the free list. The origin is only
    /// zeroed.
    pub fn tombstone(&mut self, id: ComponentId) {
        self.slots[id.index()] = Slot::default();
        self.release(id);
    }

    fn release(&mut self, id: ComponentId) {
        if id != ComponentId::ORIGIN {
            self.free.insert(id.0);
        }
    }

    /// Members counted so far.
    pub fn size(&self, id: ComponentId) -> u64 {
        self.slots.get(id.index()).map_or(0, |s| s.size)
    }

    /// Member of largest norm counted so far.
    pub fn farthest(&self, id: ComponentId) -> Option<GaussianInteger> {
        self.slots.get(id.index()).and_then(|s| s.farthest)
    }

    /// Flag `id` as having reached the right boundary strip.
    pub fn mark_propagated(&mut self, id: ComponentId) {
        self.slots[id.index()].propagated = true;
    }

    /// Whether `id` reached the right boundary strip this block.
    pub fn has_propagated(&self, id: ComponentId) -> bool {
        self.slots.get(id.index()).is_some_and(|s| s.propagated)
    }

    /// Clear every propagation flag before a new block.
    pub fn reset_propagation(&mut self) {
        for slot in &mut self.slots {
            slot.propagated = false;
        }
    }

    /// Ids of slots that are allocated and not free, ascending. Includes
    /// the origin.
    pub fn live_ids(&self) -> Vec<ComponentId> {
        (0..self.slots.len() as u32)
            .filter(|id| !self.free.contains(id))
            .map(ComponentId)
            .collect()
    }

    /// Number of live slots, origin included.
    pub fn live_count(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    /// Total slots ever allocated.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn g(a: i64, b: i64) -> GaussianInteger {
        GaussianInteger::new(a, b)
    }

    #[test]
    fn starts_with_origin() {
        let l = ComponentLedger::new();
        assert_eq!(l.live_ids(), vec![ComponentId::ORIGIN]);
        assert_eq!(l.size(ComponentId::ORIGIN), 0);
    }

    #[test]
    fn record_tracks_size_and_farthest() {
        let mut l = ComponentLedger::new();
        l.record(ComponentId::ORIGIN, g(2, 1));
        l.record(ComponentId::ORIGIN, g(5, 2));
        l.record(ComponentId::ORIGIN, g(3, 2));
        assert_eq!(l.size(ComponentId::ORIGIN), 3);
        assert_eq!(l.farthest(ComponentId::ORIGIN), Some(g(5, 2)));
    }

    #[test]
    fn lowest_free_slot_is_reused() {
        let mut l = ComponentLedger::new();
        let a = l.allocate();
        let b = l.allocate();
        let c = l.allocate();
        assert_eq!((a.0, b.0, c.0), (1, 2, 3));
        l.tombstone(c);
        l.tombstone(a);
        assert_eq!(l.allocate(), a);
        assert_eq!(l.allocate(), c);
        assert_eq!(l.allocate(), ComponentId(4));
    }

    #[test]
    fn absorb_merges_and_frees() {
        let mut l = ComponentLedger::new();
        let k = l.allocate();
        l.record(ComponentId::ORIGIN, g(2, 1));
        l.record(k, g(11, 4));
        l.record(k, g(10, 1));
        l.mark_propagated(k);
        l.absorb(ComponentId::ORIGIN, k);
        assert_eq!(l.size(ComponentId::ORIGIN), 3);
        assert_eq!(l.farthest(ComponentId::ORIGIN), Some(g(11, 4)));
        assert!(l.has_propagated(ComponentId::ORIGIN));
        assert_eq!(l.size(k), 0);
        assert_eq!(l.live_count(), 1);
    }

    #[test]
    fn origin_is_never_freed() {
        let mut l = ComponentLedger::new();
        l.record(ComponentId::ORIGIN, g(2, 1));
        l.tombstone(ComponentId::ORIGIN);
        assert_eq!(l.size(ComponentId::ORIGIN), 0);
        assert_eq!(l.allocate(), ComponentId(1));
    }

    #[test]
    fn tombstone_twice_is_harmless() {
        let mut l = ComponentLedger::new();
        let k = l.allocate();
        l.tombstone(k);
        l.tombstone(k);
        assert_eq!(l.live_count(), 1);
        assert_eq!(l.allocate(), k);
        assert_eq!(l.allocate(), ComponentId(2));
    }

    #[test]
    fn propagation_resets() {
        let mut l = ComponentLedger::new();
        l.mark_propagated(ComponentId::ORIGIN);
        l.reset_propagation();
        assert!(!l.has_propagated(ComponentId::ORIGIN));
    }
}
