use crate::event::{EventId, Registrant};
use std::collections::HashMap;

/// Registrants per event, in registration order.
///
/// An event nobody has registered for has no entry at all; the entry is
/// created on the first registration.
#[derive(Debug, Clone, Default)]
pub struct RegistrationLedger {
    entries: HashMap<EventId, Vec<Registrant>>,
}

impl RegistrationLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record(&mut self, event_id: EventId, registrant: Registrant) {
        self.entries.entry(event_id).or_default().push(registrant);
    }

    /// Registrants for an event. Empty if nobody registered yet.
    pub fn registrants(&self, event_id: EventId) -> &[Registrant] {
        self.entries
            .get(&event_id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Whether the ledger holds an entry for the event.
    pub fn has_entry(&self, event_id: EventId) -> bool {
        self.entries.contains_key(&event_id)
    }

    pub fn is_registered(&self, event_id: EventId, registrant: &Registrant) -> bool {
        self.registrants(event_id).contains(registrant)
    }

    /// Total registrations across all events.
    pub fn total(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }
}
