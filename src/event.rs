use crate::error::InvalidEvent;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Caller-assigned event identifier.
pub type EventId = u32;

/// A community event with a finite number of seats.
///
/// Events are created at seed/import time and afterwards only ever change
/// through a seat decrement performed by
/// [`Portal::register_user`](crate::Portal::register_user). The seat count is
/// unsigned, so it can never go negative.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use community_portal::Event;
///
/// let date = NaiveDate::from_ymd_opt(2025, 6, 15).unwrap();
/// let event = Event::new(1, "Music Fiesta", date, 30)
///     .with_category("music")
///     .with_location("Community Hall");
/// assert_eq!(event.category, "music");
/// assert!(event.check_availability());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Event {
    /// Identifier, unique by convention only. The store does not enforce it.
    pub id: EventId,

    /// Display name. Never empty for events that went through
    /// [`EventDraft`] validation.
    pub name: String,

    /// Calendar date the event takes place on.
    pub date: NaiveDate,

    /// Seats still available.
    pub seats: u32,

    /// Free-form category tag (e.g. `"music"`, `"workshop"`).
    pub category: String,

    /// Where the event takes place.
    pub location: String,
}

impl Event {
    /// Create an event with an empty category and location.
    ///
    /// Use [`Event::with_category`] and [`Event::with_location`] to fill them in.
    pub fn new(id: EventId, name: impl Into<String>, date: NaiveDate, seats: u32) -> Self {
        Event {
            id,
            name: name.into(),
            date,
            seats,
            category: String::new(),
            location: String::new(),
        }
    }

    /// Set the category tag.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Set the location.
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    /// Returns `true` while at least one seat is left.
    pub fn check_availability(&self) -> bool {
        self.seats > 0
    }
}

/// The import shape of an [`Event`].
///
/// `name`, `date` and `seats` are optional so that a missing field can be
/// represented and rejected, whether the draft came from JSON or from a form.
/// Missing `category` and `location` default to empty text.
///
/// # Examples
///
/// ```
/// use community_portal::{Event, EventDraft};
///
/// let draft: EventDraft = serde_json::from_str(
///     r#"{"id": 7, "name": "Book Swap", "date": "2030-01-05", "seats": 12}"#,
/// ).unwrap();
/// let event = Event::try_from(draft).unwrap();
/// assert_eq!(event.seats, 12);
///
/// let missing_seats: EventDraft =
///     serde_json::from_str(r#"{"id": 8, "name": "Quiz", "date": "2030-01-06"}"#).unwrap();
/// assert!(Event::try_from(missing_seats).is_err());
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct EventDraft {
    pub id: EventId,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub seats: Option<u32>,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub location: String,
}

impl TryFrom<EventDraft> for Event {
    type Error = InvalidEvent;

    fn try_from(draft: EventDraft) -> Result<Self, Self::Error> {
        let name = draft
            .name
            .filter(|n| !n.trim().is_empty())
            .ok_or(InvalidEvent::MissingName)?;
        let date = draft.date.ok_or(InvalidEvent::MissingDate)?;
        let seats = draft.seats.ok_or(InvalidEvent::MissingSeats)?;
        Ok(Event {
            id: draft.id,
            name,
            date,
            seats,
            category: draft.category,
            location: draft.location,
        })
    }
}

impl From<Event> for EventDraft {
    fn from(event: Event) -> Self {
        EventDraft {
            id: event.id,
            name: Some(event.name),
            date: Some(event.date),
            seats: Some(event.seats),
            category: event.category,
            location: event.location,
        }
    }
}

/// A person signing up for an event.
///
/// No uniqueness is implied: the same name/email pair may appear several
/// times in the ledger unless the portal is configured with
/// [`DuplicatePolicy::Reject`](crate::DuplicatePolicy::Reject).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Registrant {
    pub name: String,
    pub email: String,
}

impl Registrant {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Registrant {
            name: name.into(),
            email: email.into(),
        }
    }

    /// Both fields carry non-whitespace text.
    ///
    /// Stricter than a plain emptiness check: a name or email of only
    /// spaces counts as missing.
    pub fn is_complete(&self) -> bool {
        !self.name.trim().is_empty() && !self.email.trim().is_empty()
    }
}
