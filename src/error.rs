//! Error types. Every `Display` string is the user-visible reason.

use crate::event::EventId;

/// Why an event could not be added to the store.
///
/// All variants render as the same generic message; the variant tells the
/// caller which field was missing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidEvent {
    #[error("Invalid event data")]
    MissingName,
    #[error("Invalid event data")]
    MissingDate,
    #[error("Invalid event data")]
    MissingSeats,
}

/// Why a registration was refused.
///
/// Preconditions are checked in declaration order and the first failing one
/// is reported.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistrationError {
    #[error("Event not found")]
    EventNotFound(EventId),
    #[error("No seats available")]
    NoSeatsAvailable(EventId),
    #[error("User info incomplete")]
    UserInfoIncomplete,
    /// Only produced under [`DuplicatePolicy::Reject`](crate::DuplicatePolicy::Reject).
    #[error("Already registered")]
    AlreadyRegistered(EventId),
}

/// Failure of a simulated network call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    #[error("request rejected by server")]
    Rejected,
    #[error("transport unavailable: {0}")]
    Unavailable(String),
}

/// Errors from the portal coordinator outside of the registration path.
#[derive(Debug, thiserror::Error)]
pub enum PortalError {
    #[error(transparent)]
    InvalidEvent(#[from] InvalidEvent),

    #[error("malformed event import: {0}")]
    Import(#[from] serde_json::Error),

    #[error("view '{0}' not found")]
    ViewNotFound(String),

    #[error("view '{0}' type mismatch")]
    ViewTypeMismatch(String),
}
