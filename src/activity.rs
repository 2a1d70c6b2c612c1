use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::{SystemTime, UNIX_EPOCH};

/// Activity type recorded when an event is inserted into the store.
pub const EVENT_ADDED: &str = "event_added";

/// Activity type recorded after a successful registration.
pub const USER_REGISTERED: &str = "user_registered";

/// An immutable record of something that happened during the session.
///
/// The portal appends one activity per event insertion and per successful
/// registration. The `data` payload is untyped JSON; views decide what it
/// means.
///
/// # Examples
///
/// ```
/// use community_portal::Activity;
/// use serde_json::json;
///
/// let activity = Activity::new("user_registered", json!({"event_id": 1}))
///     .with_actor("a@x.com");
/// assert_eq!(activity.kind, "user_registered");
/// assert_eq!(activity.data["event_id"], 1);
/// assert_eq!(activity.actor.as_deref(), Some("a@x.com"));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Activity {
    /// Activity type (e.g. `"event_added"`). Serialized as `"type"`.
    #[serde(rename = "type")]
    pub kind: String,

    /// Arbitrary JSON payload.
    pub data: Value,

    /// Unix timestamp in seconds, set by [`Activity::new`].
    pub ts: u64,

    /// Who caused the activity, when known (registrant email).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actor: Option<String>,
}

impl Activity {
    /// Create an activity stamped with the current time.
    ///
    /// A clock set before the Unix epoch yields a timestamp of 0.
    pub fn new(kind: &str, data: Value) -> Self {
        let ts = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        Activity {
            kind: kind.to_string(),
            data,
            ts,
            actor: None,
        }
    }

    /// Set the actor that caused this activity.
    pub fn with_actor(mut self, actor: impl Into<String>) -> Self {
        self.actor = Some(actor.into());
        self
    }
}

/// Append-only, in-memory record of the session's activities.
///
/// Offsets are positions in the log: the offset returned by
/// [`ActivityLog::append`] is where the activity starts, and
/// [`ActivityLog::read_from`] yields the offset just past each activity so a
/// reader can resume from there.
#[derive(Debug, Clone, Default)]
pub struct ActivityLog {
    entries: Vec<Activity>,
}

impl ActivityLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an activity and return the offset where it starts.
    pub fn append(&mut self, activity: Activity) -> u64 {
        let offset = self.entries.len() as u64;
        log::debug!("activity #{offset}: {}", activity.kind);
        self.entries.push(activity);
        offset
    }

    /// Read activities starting at `offset`.
    ///
    /// Yields `(activity, next_offset)` pairs. An offset past the end yields
    /// nothing.
    pub fn read_from(&self, offset: u64) -> impl Iterator<Item = (&Activity, u64)> {
        let start = usize::try_from(offset).unwrap_or(usize::MAX);
        self.entries
            .iter()
            .enumerate()
            .skip(start)
            .map(|(i, activity)| (activity, i as u64 + 1))
    }

    /// Offset one past the last activity.
    pub fn end_offset(&self) -> u64 {
        self.entries.len() as u64
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All activities, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &Activity> {
        self.entries.iter()
    }
}
