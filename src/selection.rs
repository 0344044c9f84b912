use std::collections::BTreeSet;
use slint::VecModel;

/// Ids whose selected flag flipped during one selection operation.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SelectionChange {
    pub selected: Vec<i32>,
    pub deselected: Vec<i32>,
}

impl SelectionChange {
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty() && self.deselected.is_empty()
    }
}

#[derive(Default)]
pub struct SelectionManager {
    selected: BTreeSet<i32>,
}

impl SelectionManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Click on a node: plain click selects only `id`, shift-click toggles it.
    pub fn handle_interaction(&mut self, id: i32, shift_held: bool) -> SelectionChange {
        if shift_held {
            let mut change = SelectionChange::default();
            if self.selected.remove(&id) {
                change.deselected.push(id);
            } else {
                self.selected.insert(id);
                change.selected.push(id);
            }
            change
        } else {
            self.replace_selection([id])
        }
    }

    pub fn clear(&mut self) -> SelectionChange {
        self.replace_selection(std::iter::empty())
    }

    /// Replace the whole selection, e.g. after a box selection.
    pub fn replace_selection<I>(&mut self, ids: I) -> SelectionChange
    where
        I: IntoIterator<Item = i32>,
    {
        let next: BTreeSet<i32> = ids.into_iter().collect();
        let change = SelectionChange {
            selected: next.difference(&self.selected).copied().collect(),
            deselected: self.selected.difference(&next).copied().collect(),
        };
        self.selected = next;
        change
    }

    /// Forget an id without reporting a change (the node is gone).
    pub fn forget(&mut self, id: i32) {
        self.selected.remove(&id);
    }

    pub fn contains(&self, id: i32) -> bool {
        self.selected.contains(&id)
    }

    /// Selected ids in ascending order.
    pub fn selected_ids(&self) -> Vec<i32> {
        self.selected.iter().copied().collect()
    }

    /// Mirror the selection into a Slint model.
    pub fn sync_to_model(&self, model: &VecModel<i32>) {
        model.set_vec(self.selected_ids());
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }
}
