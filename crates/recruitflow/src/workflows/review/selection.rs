use std::collections::BTreeSet;

use super::domain::ApplicationId;

/// State of the "select all" control driving a tri-state checkbox.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectAllState {
    Checked,
    Indeterminate,
    Unchecked,
}

/// Ephemeral set of applications chosen for a bulk action.
///
/// Scoped to one review session; the owner clears it whenever the visible
/// list changes. Ordered storage keeps bulk dispatch order deterministic.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Selection {
    chosen: BTreeSet<ApplicationId>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the id if absent, remove it if present.
    pub fn toggle(&mut self, id: ApplicationId) {
        if !self.chosen.remove(&id) {
            self.chosen.insert(id);
        }
    }

    /// All-or-nothing toggle: when the selection already equals the full
    /// visible set it clears, otherwise it becomes exactly the visible set.
    /// No partial semantics.
    pub fn toggle_all(&mut self, visible: &[ApplicationId]) {
        if self.is_all_selected(visible) {
            self.chosen.clear();
        } else {
            self.chosen = visible.iter().copied().collect();
        }
    }

    pub fn is_all_selected(&self, visible: &[ApplicationId]) -> bool {
        !visible.is_empty()
            && self.chosen.len() == visible.len()
            && visible.iter().all(|id| self.chosen.contains(id))
    }

    pub fn is_partially_selected(&self, visible: &[ApplicationId]) -> bool {
        !self.chosen.is_empty() && !self.is_all_selected(visible)
    }

    pub fn select_all_state(&self, visible: &[ApplicationId]) -> SelectAllState {
        if self.is_all_selected(visible) {
            SelectAllState::Checked
        } else if self.is_partially_selected(visible) {
            SelectAllState::Indeterminate
        } else {
            SelectAllState::Unchecked
        }
    }

    pub fn clear(&mut self) {
        self.chosen.clear();
    }

    /// Prune ids that fell out of visibility, restoring the invariant
    /// selection ⊆ visible set.
    pub fn retain_visible(&mut self, visible: &[ApplicationId]) {
        self.chosen.retain(|id| visible.contains(id));
    }

    pub fn contains(&self, id: ApplicationId) -> bool {
        self.chosen.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.chosen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chosen.is_empty()
    }

    /// Ids in dispatch order (ascending).
    pub fn ids(&self) -> impl Iterator<Item = ApplicationId> + '_ {
        self.chosen.iter().copied()
    }
}
