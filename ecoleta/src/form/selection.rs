use std::collections::BTreeSet;

/// Set of selected category ids.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CategorySelection {
    ids: BTreeSet<u32>,
}

impl CategorySelection {
    /// Selects the category if it is not selected, deselects it otherwise. Returns true if the
    /// category is selected after the call.
    pub fn toggle(&mut self, id: u32) -> bool {
        if self.ids.remove(&id) {
            false
        } else {
            self.ids.insert(id);
            true
        }
    }

    /// Whether the category is selected.
    pub fn contains(&self, id: u32) -> bool {
        self.ids.contains(&id)
    }

    /// Selected ids in ascending order.
    pub fn ids(&self) -> &BTreeSet<u32> {
        &self.ids
    }

    /// Number of selected categories.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// True if nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}
