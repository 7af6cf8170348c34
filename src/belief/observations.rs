//! Per-hazard observation vectors.
//!
//! Layout mirrors the belief model's variables: the first `N*N` entries say
//! whether each cell holds the hazard, the next `N*N` whether each cell shows
//! the hazard's cue. `None` means the entry has not been observed.

/// Which half of the observation vector an entry belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Slot {
    /// "This cell holds the hazard"
    Hazard,
    /// "This cell exhibits the cue"
    Cue,
}

/// Known/unknown facts about one hazard type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ObservationVector {
    cells: usize,
    entries: Vec<Option<bool>>,
}

impl ObservationVector {
    /// Fully unknown vector for a grid with `cells` cells.
    pub fn new(cells: usize) -> Self {
        Self {
            cells,
            entries: vec![None; cells * 2],
        }
    }

    /// Number of cells covered.
    #[inline]
    pub fn cell_count(&self) -> usize {
        self.cells
    }

    /// Total entries (`2 * cells`).
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    pub fn get(&self, slot: Slot, index: usize) -> Option<bool> {
        self.entries[self.offset(slot, index)]
    }

    #[inline]
    pub fn hazard(&self, index: usize) -> Option<bool> {
        self.get(Slot::Hazard, index)
    }

    #[inline]
    pub fn cue(&self, index: usize) -> Option<bool> {
        self.get(Slot::Cue, index)
    }

    /// Store a value, returning what was there before.
    pub(crate) fn set(&mut self, slot: Slot, index: usize, value: bool) -> Option<bool> {
        let offset = self.offset(slot, index);
        self.entries[offset].replace(value)
    }

    /// Mark every entry as known-false.
    pub(crate) fn clear_all(&mut self) {
        self.entries.fill(Some(false));
    }

    /// Number of entries that are no longer unknown.
    pub fn known_count(&self) -> usize {
        self.entries.iter().filter(|e| e.is_some()).count()
    }

    /// Raw entries in layout order.
    pub fn entries(&self) -> &[Option<bool>] {
        &self.entries
    }

    #[inline]
    fn offset(&self, slot: Slot, index: usize) -> usize {
        match slot {
            Slot::Hazard => index,
            Slot::Cue => self.cells + index,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout() {
        let mut obs = ObservationVector::new(16);
        assert_eq!(obs.len(), 32);
        assert_eq!(obs.known_count(), 0);

        assert_eq!(obs.set(Slot::Cue, 3, true), None);
        assert_eq!(obs.cue(3), Some(true));
        assert_eq!(obs.hazard(3), None);
        assert_eq!(obs.entries()[16 + 3], Some(true));

        assert_eq!(obs.set(Slot::Cue, 3, true), Some(true));
        assert_eq!(obs.known_count(), 1);
    }

    #[test]
    fn test_clear_all() {
        let mut obs = ObservationVector::new(4);
        obs.set(Slot::Cue, 0, true);
        obs.clear_all();
        assert_eq!(obs.known_count(), 8);
        assert!(obs.entries().iter().all(|e| *e == Some(false)));
    }
}
