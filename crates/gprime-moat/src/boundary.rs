//! Component ids along the seam between two blocks.

use crate::ledger::ComponentId;
use indexmap::IndexMap;

/// The rightmost columns of a block with the component id of every
/// counted prime in them.
///
/// Coordinates are strip-local: column 0 is the first strip column. The
/// strip a block writes on its right edge is read by the next block as
/// its left edge, where the same local coordinates are block-local.
#[derive(Clone, Debug, Default)]
pub struct BoundaryStrip {
    width: usize,
    height: usize,
    ids: Vec<Option<ComponentId>>,
    members: IndexMap<ComponentId, Vec<(i64, i64)>>,
}

impl BoundaryStrip {
    /// An empty strip of `width` columns and `height` rows.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            ids: vec![None; width * height],
            members: IndexMap::new(),
        }
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.height
    }

    fn slot(&self, u: i64, v: i64) -> Option<usize> {
        let (u, v) = (usize::try_from(u).ok()?, usize::try_from(v).ok()?);
        (u < self.width && v < self.height).then(|| u * self.height + v)
    }

    /// Component recorded at `(u, v)`; `None` outside the strip or for an
    /// unrecorded cell.
    pub fn lookup(&self, u: i64, v: i64) -> Option<ComponentId> {
        self.slot(u, v).and_then(|i| self.ids[i])
    }

    /// Record `(u, v)` as a member of `id`.
    pub fn record(&mut self, id: ComponentId, u: i64, v: i64) {
        let Some(i) = self.slot(u, v) else {
            debug_assert!(false, "({u}, {v}) outside the strip");
            return;
        };
        self.ids[i] = Some(id);
        self.members.entry(id).or_default().push((u, v));
    }

    /// Cells recorded under `id`.
    pub fn cells(&self, id: ComponentId) -> &[(i64, i64)] {
        self.members.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Move every cell of `from` to `to`, returning the moved cells.
    pub fn relabel(&mut self, from: ComponentId, to: ComponentId) -> Vec<(i64, i64)> {
        let Some(cells) = self.members.shift_remove(&from) else {
            return Vec::new();
        };
        for &(u, v) in &cells {
            if let Some(i) = self.slot(u, v) {
                self.ids[i] = Some(to);
            }
        }
        self.members
            .entry(to)
            .or_default()
            .extend_from_slice(&cells);
        cells
    }

    /// Ids with at least one cell, ascending.
    pub fn ids(&self) -> Vec<ComponentId> {
        let mut ids: Vec<_> = self.members.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// Number of distinct components in the strip.
    pub fn component_count(&self) -> usize {
        self.members.len()
    }

    /// Number of recorded cells.
    pub fn cell_count(&self) -> usize {
        self.members.values().map(Vec::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_outside_is_none() {
        let s = BoundaryStrip::new(3, 10);
        assert_eq!(s.lookup(-1, 0), None);
        assert_eq!(s.lookup(3, 0), None);
        assert_eq!(s.lookup(0, 10), None);
        assert_eq!(s.lookup(1, 1), None);
    }

    #[test]
    fn record_and_relabel() {
        let mut s = BoundaryStrip::new(3, 10);
        let (a, b) = (ComponentId(1), ComponentId(4));
        s.record(b, 0, 3);
        s.record(a, 2, 7);
        s.record(b, 1, 9);
        assert_eq!(s.ids(), vec![a, b]);
        assert_eq!(s.lookup(1, 9), Some(b));

        let moved = s.relabel(b, a);
        assert_eq!(moved, vec![(0, 3), (1, 9)]);
        assert_eq!(s.lookup(0, 3), Some(a));
        assert_eq!(s.ids(), vec![a]);
        assert_eq!(s.cells(a).len(), 3);
        assert!(s.cells(b).is_empty());
        assert!(s.relabel(b, a).is_empty());
    }

    #[test]
    fn counts() {
        let mut s = BoundaryStrip::new(2, 4);
        s.record(ComponentId(0), 0, 1);
        s.record(ComponentId(2), 1, 2);
        s.record(ComponentId(2), 1, 3);
        assert_eq!(s.component_count(), 2);
        assert_eq!(s.cell_count(), 3);
        assert_eq!(BoundaryStrip::default().width(), 0);
    }
}
