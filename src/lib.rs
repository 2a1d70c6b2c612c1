mod activity;
mod clock;
mod error;
mod event;
mod ledger;
pub mod page;
mod portal;
mod query;
pub mod render;
mod seed;
mod store;
mod tracker;
pub mod transport;
mod view;

pub use activity::{Activity, ActivityLog, EVENT_ADDED, USER_REGISTERED};
pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{InvalidEvent, PortalError, RegistrationError, TransportError};
pub use event::{Event, EventDraft, EventId, Registrant};
pub use ledger::RegistrationLedger;
pub use page::{PortalPage, RegistrationForm};
pub use portal::{
    outcome_message, DuplicatePolicy, Portal, PortalBuilder, CATEGORY_TOTALS_VIEW,
    REGISTRATION_SUCCESSFUL,
};
pub use query::{
    filter_events_by_category, format_event_summaries, is_valid_event, music_events,
    name_matches, EventFilter, ALL_CATEGORIES,
};
pub use render::{render_events, EventCard, RenderedEvents, SelectOption};
pub use seed::sample_events;
pub use store::EventStore;
pub use tracker::{CategoryTracker, TRACKED_CATEGORY};
pub use transport::{RegistrationRequest, ScriptedTransport, SimulatedTransport, Transport};
pub use view::{category_totals, CategoryTotals, ReduceFn, View, ViewOps};
