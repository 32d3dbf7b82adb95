//! Row selection for bulk actions.

use crate::domain::record::RecordId;
use std::collections::BTreeSet;

/// State of the header checkbox relative to a set of candidate ids.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HeaderCheck {
    #[default]
    None,
    /// Some, but not all, candidates are selected.
    Some,
    All,
}

/// Selected record ids of one table.
///
/// The owning table calls [`SelectionSet::retain`] after every collection
/// change, so the set never holds ids that are no longer present.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSet {
    ids: BTreeSet<RecordId>,
}

impl SelectionSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Flips membership of `id`. Returns `true` when it is now selected.
    pub fn toggle(&mut self, id: RecordId) -> bool {
        if self.ids.remove(&id) {
            false
        } else {
            self.ids.insert(id);
            true
        }
    }

    /// Adds every id in `ids`.
    pub fn select_all(&mut self, ids: impl IntoIterator<Item = RecordId>) {
        self.ids.extend(ids);
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    pub fn remove(&mut self, id: RecordId) -> bool {
        self.ids.remove(&id)
    }

    /// Drops ids for which `exists` returns `false`.
    pub fn retain(&mut self, exists: impl Fn(RecordId) -> bool) {
        self.ids.retain(|id| exists(*id));
    }

    #[must_use]
    pub fn is_selected(&self, id: RecordId) -> bool {
        self.ids.contains(&id)
    }

    #[must_use]
    pub fn count(&self) -> usize {
        self.ids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Selected ids in ascending order.
    #[must_use]
    pub fn ids(&self) -> Vec<RecordId> {
        self.ids.iter().copied().collect()
    }

    /// Header checkbox state relative to `candidates`.
    #[must_use]
    pub fn header_state(&self, candidates: &[RecordId]) -> HeaderCheck {
        let selected = candidates.iter().filter(|id| self.ids.contains(id)).count();
        match selected {
            0 => HeaderCheck::None,
            n if n == candidates.len() => HeaderCheck::All,
            _ => HeaderCheck::Some,
        }
    }

    /// Header checkbox click: selects every candidate unless all already are,
    /// in which case the whole selection is cleared.
    pub fn toggle_header(&mut self, candidates: &[RecordId]) {
        if self.header_state(candidates) == HeaderCheck::All {
            self.clear();
        } else {
            self.select_all(candidates.iter().copied());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_twice_restores_membership() {
        let mut selection = SelectionSet::new();
        assert!(selection.toggle(4));
        assert!(selection.is_selected(4));
        assert!(!selection.toggle(4));
        assert!(selection.is_empty());
    }

    #[test]
    fn header_state_tracks_candidates() {
        let mut selection = SelectionSet::new();
        let candidates = [1, 2, 3];
        assert_eq!(selection.header_state(&candidates), HeaderCheck::None);

        selection.toggle(2);
        assert_eq!(selection.header_state(&candidates), HeaderCheck::Some);

        selection.toggle_header(&candidates);
        assert_eq!(selection.header_state(&candidates), HeaderCheck::All);
        assert_eq!(selection.ids(), vec![1, 2, 3]);

        selection.toggle_header(&candidates);
        assert!(selection.is_empty());
    }

    #[test]
    fn empty_candidate_list_reads_as_unchecked() {
        let selection = SelectionSet::new();
        assert_eq!(selection.header_state(&[]), HeaderCheck::None);
    }

    #[test]
    fn retain_drops_missing_ids() {
        let mut selection = SelectionSet::new();
        selection.select_all([1, 5, 9]);
        selection.retain(|id| id != 5);
        assert_eq!(selection.ids(), vec![1, 9]);
        assert_eq!(selection.count(), 2);
    }
}
