use apiwatch_core::event::EventId;
use std::collections::HashSet;

/// Set of events whose detail panel is open.
///
/// Membership survives re-renders, filter churn, and stats updates. An
/// id whose event no longer renders is inert — it stays in the set and
/// never causes an error. Only a wholesale clear removes entries.
#[derive(Debug, Default)]
pub struct ExpansionTracker {
    open: HashSet<EventId>,
}

impl ExpansionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip the panel state for `id`; returns the new state.
    pub fn toggle(&mut self, id: EventId) -> bool {
        if self.open.remove(&id) {
            false
        } else {
            self.open.insert(id);
            true
        }
    }

    pub fn is_expanded(&self, id: EventId) -> bool {
        self.open.contains(&id)
    }

    pub fn clear(&mut self) {
        self.open.clear();
    }

    pub fn len(&self) -> usize {
        self.open.len()
    }

    pub fn is_empty(&self) -> bool {
        self.open.is_empty()
    }
}
