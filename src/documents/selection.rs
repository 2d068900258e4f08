use std::collections::HashSet;

use tracing::debug;

use super::DocumentRegistry;

/// Set of selected document ids.
///
/// Every id in the set is known to the registry it was toggled against.
/// The set carries no ordering; [`SelectionSet::ordered_ids`] projects it onto
/// registry order when a deterministic sequence is needed.
#[derive(Debug, Clone, Default)]
pub struct SelectionSet {
    ids: HashSet<String>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip the selection state of `id`.
    ///
    /// Returns the new state, or `None` when the registry does not know `id`
    /// (in which case nothing changes).
    pub fn toggle(&mut self, registry: &DocumentRegistry, id: &str) -> Option<bool> {
        if !registry.contains(id) {
            debug!(document_id = %id, "Ignoring toggle for unknown document");
            return None;
        }

        let selected = if self.ids.remove(id) {
            false
        } else {
            self.ids.insert(id.to_string());
            true
        };
        debug!(document_id = %id, selected, "Selection toggled");
        Some(selected)
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn count(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Drop ids the registry no longer knows.
    ///
    /// The registry is append-only today, so this only matters if a removal
    /// path is ever added.
    pub fn prune(&mut self, registry: &DocumentRegistry) {
        self.ids.retain(|id| registry.contains(id));
    }

    /// Selected ids in registry order.
    pub fn ordered_ids(&self, registry: &DocumentRegistry) -> Vec<String> {
        registry
            .ids()
            .filter(|id| self.ids.contains(*id))
            .map(str::to_string)
            .collect()
    }
}
