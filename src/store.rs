use crate::event::{Event, EventId};
use crate::query;

/// Ordered sequence of events in insertion order.
///
/// Events are never removed. Identifiers are not checked for uniqueness:
/// when two events share an id, lookups resolve to the one inserted first.
#[derive(Debug, Clone, Default)]
pub struct EventStore {
    events: Vec<Event>,
}

impl EventStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an event. Returns `true` if another event already used its id.
    pub(crate) fn push(&mut self, event: Event) -> bool {
        let duplicate = self.contains(event.id);
        self.events.push(event);
        duplicate
    }

    pub fn get(&self, id: EventId) -> Option<&Event> {
        self.events.iter().find(|e| e.id == id)
    }

    pub(crate) fn get_mut(&mut self, id: EventId) -> Option<&mut Event> {
        self.events.iter_mut().find(|e| e.id == id)
    }

    pub fn contains(&self, id: EventId) -> bool {
        self.get(id).is_some()
    }

    /// All events, in insertion order.
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Events whose category matches, or every event for
    /// [`ALL_CATEGORIES`](crate::ALL_CATEGORIES).
    pub fn filter_by_category(&self, category: &str) -> Vec<&Event> {
        query::filter_events_by_category(&self.events, category)
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
