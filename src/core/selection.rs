use std::collections::{BTreeMap, BTreeSet};

use uuid::Uuid;

static EMPTY_SET: BTreeSet<Uuid> = BTreeSet::new();

/// Session-local record of which interventions the user has ticked for
/// invoicing, per partner store.
///
/// Selection is keyed by intervention id and independent of what the
/// period filter currently shows: filtering only affects *select-all*
/// semantics, never existing selections. A store's set is cleared only
/// after an invoice was successfully generated for it.
#[derive(Debug, Clone, Default)]
pub struct SelectionState {
    by_store: BTreeMap<Uuid, BTreeSet<Uuid>>,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Selected intervention ids for one store.
    pub fn selected(&self, store_id: Uuid) -> &BTreeSet<Uuid> {
        self.by_store.get(&store_id).unwrap_or(&EMPTY_SET)
    }

    pub fn is_selected(&self, store_id: Uuid, intervention_id: Uuid) -> bool {
        self.selected(store_id).contains(&intervention_id)
    }

    /// Number of selected interventions for one store.
    pub fn count(&self, store_id: Uuid) -> usize {
        self.selected(store_id).len()
    }

    /// Flip one intervention in one store's set. Self-inverse; other
    /// stores' sets are untouched.
    pub fn toggle(&mut self, store_id: Uuid, intervention_id: Uuid) {
        let set = self.by_store.entry(store_id).or_default();
        if !set.remove(&intervention_id) {
            set.insert(intervention_id);
        }
    }

    /// All-or-none flip over the currently visible rows of one store.
    ///
    /// If every visible id is already selected, all of them are removed;
    /// otherwise all visible ids are added (merged uniquely). Ids selected
    /// earlier but hidden by the current period filter are never dropped.
    pub fn toggle_all_visible(&mut self, store_id: Uuid, visible_ids: &[Uuid]) {
        let set = self.by_store.entry(store_id).or_default();
        let all_selected =
            !visible_ids.is_empty() && visible_ids.iter().all(|id| set.contains(id));
        if all_selected {
            for id in visible_ids {
                set.remove(id);
            }
        } else {
            set.extend(visible_ids.iter().copied());
        }
    }

    /// Drop one store's whole set (after a successful generation).
    pub fn clear_store(&mut self, store_id: Uuid) {
        self.by_store.remove(&store_id);
    }
}
