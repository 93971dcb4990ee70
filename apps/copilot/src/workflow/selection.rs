//! Selection Set — the operator's current picks, with tri-state "select all".

use std::collections::HashSet;

use serde::Serialize;

use crate::models::candidate::CandidateKey;

/// Visual state of the "select all" checkbox.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectAllState {
    Unchecked,
    Indeterminate,
    Checked,
}

#[derive(Debug, Clone, Default)]
pub struct SelectionSet {
    keys: HashSet<CandidateKey>,
}

impl SelectionSet {
    /// Inserts `key` if absent, removes it if present.
    pub fn toggle(&mut self, key: &CandidateKey) {
        if !self.keys.remove(key) {
            self.keys.insert(key.clone());
        }
    }

    /// Clears everything when `all_keys` is already fully selected, otherwise
    /// selects every key in `all_keys`. Partial selection always promotes.
    pub fn toggle_all(&mut self, all_keys: &[CandidateKey]) {
        if self.is_fully_selected(all_keys) {
            self.keys.clear();
        } else {
            self.keys.extend(all_keys.iter().cloned());
        }
    }

    pub fn clear(&mut self) {
        self.keys.clear();
    }

    pub fn contains(&self, key: &CandidateKey) -> bool {
        self.keys.contains(key)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn is_fully_selected(&self, all_keys: &[CandidateKey]) -> bool {
        !all_keys.is_empty() && all_keys.iter().all(|key| self.keys.contains(key))
    }

    pub fn is_partially_selected(&self, all_keys: &[CandidateKey]) -> bool {
        !self.is_empty() && !self.is_fully_selected(all_keys)
    }

    pub fn select_all_state(&self, all_keys: &[CandidateKey]) -> SelectAllState {
        if self.is_fully_selected(all_keys) {
            SelectAllState::Checked
        } else if self.is_partially_selected(all_keys) {
            SelectAllState::Indeterminate
        } else {
            SelectAllState::Unchecked
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(n: usize) -> Vec<CandidateKey> {
        (0..n)
            .map(|i| CandidateKey::from(format!("c{i}@x.com-90-{i}")))
            .collect()
    }

    #[test]
    fn test_toggle_adds_then_removes() {
        let all = keys(2);
        let mut set = SelectionSet::default();
        set.toggle(&all[0]);
        assert!(set.contains(&all[0]));
        assert!(!set.contains(&all[1]));
        set.toggle(&all[0]);
        assert!(set.is_empty());
    }

    #[test]
    fn test_toggle_all_on_full_selection_clears() {
        let all = keys(3);
        let mut set = SelectionSet::default();
        set.toggle_all(&all);
        assert!(set.is_fully_selected(&all));
        set.toggle_all(&all);
        assert!(set.is_empty());
        // Not idempotent: a third call selects everything again.
        set.toggle_all(&all);
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn test_toggle_all_promotes_partial_selection() {
        let all = keys(3);
        let mut set = SelectionSet::default();
        set.toggle(&all[0]);
        set.toggle(&all[2]);
        set.toggle_all(&all);
        assert_eq!(set.len(), 3);
        assert!(set.is_fully_selected(&all));
    }

    #[test]
    fn test_toggle_all_keeps_keys_outside_the_list() {
        let all = keys(2);
        let outsider = CandidateKey::from("someone-else");
        let mut set = SelectionSet::default();
        set.toggle(&outsider);
        set.toggle_all(&all);
        assert!(set.contains(&outsider));
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn test_empty_key_list_is_never_fully_selected() {
        let set = SelectionSet::default();
        assert!(!set.is_fully_selected(&[]));
        assert_eq!(set.select_all_state(&[]), SelectAllState::Unchecked);
    }

    #[test]
    fn test_partial_selection_states() {
        let all = keys(3);
        let mut set = SelectionSet::default();
        assert!(!set.is_partially_selected(&all));

        set.toggle(&all[1]);
        assert!(set.is_partially_selected(&all));
        assert_eq!(set.select_all_state(&all), SelectAllState::Indeterminate);

        set.toggle_all(&all);
        assert!(!set.is_partially_selected(&all));
        assert_eq!(set.select_all_state(&all), SelectAllState::Checked);
    }

    #[test]
    fn test_clear_empties_the_set() {
        let all = keys(2);
        let mut set = SelectionSet::default();
        set.toggle_all(&all);
        set.clear();
        assert!(set.is_empty());
    }
}
