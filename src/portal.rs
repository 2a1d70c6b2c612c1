use crate::activity::{Activity, ActivityLog, EVENT_ADDED, USER_REGISTERED};
use crate::error::{InvalidEvent, PortalError, RegistrationError};
use crate::event::{Event, EventDraft, EventId, Registrant};
use crate::ledger::RegistrationLedger;
use crate::query::EventFilter;
use crate::seed;
use crate::store::EventStore;
use crate::tracker::CategoryTracker;
use crate::view::{category_totals, CategoryTotals, ReduceFn, View, ViewOps};
use serde_json::json;

/// Name of the built-in per-category registration view.
pub const CATEGORY_TOTALS_VIEW: &str = "category_totals";

/// Message for a successful [`Portal::register_user`].
pub const REGISTRATION_SUCCESSFUL: &str = "Registration successful";

/// What to do when a registrant signs up for an event they are already
/// registered for (same name and email).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DuplicatePolicy {
    /// Record the registration again and consume another seat.
    #[default]
    Allow,
    /// Refuse with [`RegistrationError::AlreadyRegistered`].
    Reject,
}

/// Map a registration result to the text shown in the message area.
///
/// # Examples
///
/// ```
/// use community_portal::{outcome_message, RegistrationError};
///
/// assert_eq!(outcome_message(&Ok(())), "Registration successful");
/// assert_eq!(
///     outcome_message(&Err(RegistrationError::EventNotFound(99))),
///     "Error: Event not found"
/// );
/// ```
pub fn outcome_message(result: &Result<(), RegistrationError>) -> String {
    match result {
        Ok(()) => REGISTRATION_SUCCESSFUL.to_string(),
        Err(e) => format!("Error: {e}"),
    }
}

/// Application state for one session: events, registrations, the music
/// tracker, and the activity log with its derived views.
///
/// Created through [`Portal::builder`].
///
/// # Examples
///
/// ```
/// use community_portal::{Portal, Registrant};
///
/// let mut portal = Portal::builder().seed_sample_events().build().unwrap();
/// portal.register_user(1, Registrant::new("Ann", "a@x.com")).unwrap();
/// assert_eq!(portal.event(1).unwrap().seats, 29);
/// assert_eq!(portal.tracker().total(), 1);
/// ```
pub struct Portal {
    store: EventStore,
    ledger: RegistrationLedger,
    tracker: CategoryTracker,
    log: ActivityLog,
    views: Vec<Box<dyn ViewOps>>,
    duplicates: DuplicatePolicy,
}

impl std::fmt::Debug for Portal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Portal")
            .field("store", &self.store)
            .field("ledger", &self.ledger)
            .field("tracker", &self.tracker)
            .field("activities", &self.log.len())
            .field("duplicates", &self.duplicates)
            .finish()
    }
}

impl Default for Portal {
    fn default() -> Self {
        Portal::builder().assemble()
    }
}

impl Portal {
    /// Start configuring a portal.
    pub fn builder() -> PortalBuilder {
        PortalBuilder::new()
    }

    /// Add an event to the end of the store.
    ///
    /// A duplicate identifier is accepted; lookups keep resolving to the
    /// earlier event.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidEvent`] if the name, date or seat count is missing.
    pub fn add_event(&mut self, draft: impl Into<EventDraft>) -> Result<(), InvalidEvent> {
        let event = Event::try_from(draft.into())?;
        self.insert(event);
        Ok(())
    }

    /// Add every event of a JSON array of [`EventDraft`]s, in order.
    ///
    /// Stops at the first invalid draft; drafts before it stay added.
    /// Returns the number of events added.
    ///
    /// # Errors
    ///
    /// Returns [`PortalError::Import`] for malformed JSON and
    /// [`PortalError::InvalidEvent`] for a draft missing required fields.
    pub fn import_events_json(&mut self, json: &str) -> Result<usize, PortalError> {
        let drafts: Vec<EventDraft> = serde_json::from_str(json)?;
        let mut added = 0;
        for draft in drafts {
            self.add_event(draft)?;
            added += 1;
        }
        Ok(added)
    }

    fn insert(&mut self, event: Event) {
        let activity = Activity::new(
            EVENT_ADDED,
            json!({
                "event_id": event.id,
                "name": event.name,
                "category": event.category,
                "seats": event.seats,
            }),
        );
        let id = event.id;
        if self.store.push(event) {
            log::warn!("event id {id} is already in use; lookups resolve to the first event");
        }
        self.log.append(activity);
        log::info!("event {id} added");
    }

    /// Register someone for an event.
    ///
    /// Checks, in order: the event exists, it has a free seat, the
    /// registrant's name and email are filled in, and (under
    /// [`DuplicatePolicy::Reject`]) they are not already registered. Nothing
    /// changes unless every check passes. On success the registrant is
    /// appended to the ledger, one seat is consumed, and the music tracker
    /// is bumped for music events.
    ///
    /// # Errors
    ///
    /// Returns the first failed check as a [`RegistrationError`].
    pub fn register_user(
        &mut self,
        event_id: EventId,
        registrant: Registrant,
    ) -> Result<(), RegistrationError> {
        let event = self
            .store
            .get(event_id)
            .ok_or(RegistrationError::EventNotFound(event_id))?;
        if !event.check_availability() {
            return Err(RegistrationError::NoSeatsAvailable(event_id));
        }
        if !registrant.is_complete() {
            return Err(RegistrationError::UserInfoIncomplete);
        }
        if self.duplicates == DuplicatePolicy::Reject
            && self.ledger.is_registered(event_id, &registrant)
        {
            return Err(RegistrationError::AlreadyRegistered(event_id));
        }

        let Some(event) = self.store.get_mut(event_id) else {
            return Err(RegistrationError::EventNotFound(event_id));
        };
        event.seats -= 1;
        let category = event.category.clone();
        let seats_left = event.seats;

        if category == self.tracker.category() {
            self.tracker.increment();
        }
        self.log.append(
            Activity::new(
                USER_REGISTERED,
                json!({
                    "event_id": event_id,
                    "category": category,
                    "name": registrant.name,
                }),
            )
            .with_actor(registrant.email.clone()),
        );
        self.ledger.record(event_id, registrant);

        log::info!("registration for event {event_id} recorded, {seats_left} seats left");
        Ok(())
    }

    /// Look up an event by id. The first inserted event wins on duplicates.
    pub fn event(&self, id: EventId) -> Option<&Event> {
        self.store.get(id)
    }

    /// All events in insertion order.
    pub fn events(&self) -> &[Event] {
        self.store.events()
    }

    pub fn store(&self) -> &EventStore {
        &self.store
    }

    /// See [`filter_events_by_category`](crate::filter_events_by_category).
    pub fn filter_events_by_category(&self, category: &str) -> Vec<&Event> {
        self.store.filter_by_category(category)
    }

    /// Events passing both the category filter and the name search.
    pub fn filter_events(&self, filter: &EventFilter) -> Vec<&Event> {
        filter.apply(self.store.events())
    }

    pub fn registrants(&self, event_id: EventId) -> &[Registrant] {
        self.ledger.registrants(event_id)
    }

    pub fn ledger(&self) -> &RegistrationLedger {
        &self.ledger
    }

    pub fn tracker(&self) -> &CategoryTracker {
        &self.tracker
    }

    pub fn duplicate_policy(&self) -> DuplicatePolicy {
        self.duplicates
    }

    /// Everything that happened this session, oldest first.
    pub fn activity_log(&self) -> &ActivityLog {
        &self.log
    }

    /// Bring every registered view up to date with the activity log.
    pub fn refresh_all(&mut self) {
        for view in &mut self.views {
            view.refresh_boxed(&self.log);
        }
    }

    /// Current state of a registered view, as of the last refresh.
    ///
    /// # Errors
    ///
    /// Returns [`PortalError::ViewNotFound`] if no view has that name, or
    /// [`PortalError::ViewTypeMismatch`] if `S` is not the view's state type.
    pub fn view<S: Default + 'static>(&self, name: &str) -> Result<&S, PortalError> {
        let view = self
            .views
            .iter()
            .find(|v| v.view_name() == name)
            .ok_or_else(|| PortalError::ViewNotFound(name.to_string()))?;
        view.as_any()
            .downcast_ref::<View<S>>()
            .map(View::state)
            .ok_or_else(|| PortalError::ViewTypeMismatch(name.to_string()))
    }

    /// Refresh one view and return its state.
    ///
    /// # Errors
    ///
    /// Same as [`Portal::view`].
    pub fn refresh_view<S: Default + 'static>(&mut self, name: &str) -> Result<&S, PortalError> {
        let view = self
            .views
            .iter_mut()
            .find(|v| v.view_name() == name)
            .ok_or_else(|| PortalError::ViewNotFound(name.to_string()))?;
        let view = view
            .as_any_mut()
            .downcast_mut::<View<S>>()
            .ok_or_else(|| PortalError::ViewTypeMismatch(name.to_string()))?;
        Ok(view.refresh(&self.log))
    }

    /// Successful registrations per category, freshly folded.
    pub fn category_totals(&mut self) -> CategoryTotals {
        self.refresh_view::<CategoryTotals>(CATEGORY_TOTALS_VIEW)
            .cloned()
            .unwrap_or_default()
    }
}

/// Builder for [`Portal`].
///
/// # Examples
///
/// ```
/// use community_portal::{Activity, DuplicatePolicy, Portal};
///
/// fn count(n: u64, _a: &Activity) -> u64 {
///     n + 1
/// }
///
/// let mut portal = Portal::builder()
///     .duplicate_registrations(DuplicatePolicy::Reject)
///     .seed_sample_events()
///     .view::<u64>("activity_count", count)
///     .build()
///     .unwrap();
/// portal.refresh_all();
/// assert_eq!(*portal.view::<u64>("activity_count").unwrap(), 4);
/// ```
pub struct PortalBuilder {
    duplicates: DuplicatePolicy,
    events: Vec<EventDraft>,
    views: Vec<Box<dyn ViewOps>>,
}

impl PortalBuilder {
    fn new() -> Self {
        PortalBuilder {
            duplicates: DuplicatePolicy::default(),
            events: Vec::new(),
            views: vec![Box::new(View::<CategoryTotals>::new(
                CATEGORY_TOTALS_VIEW,
                category_totals,
            ))],
        }
    }

    pub fn duplicate_registrations(mut self, policy: DuplicatePolicy) -> Self {
        self.duplicates = policy;
        self
    }

    /// Queue the four sample events.
    pub fn seed_sample_events(mut self) -> Self {
        self.events
            .extend(seed::sample_events().into_iter().map(EventDraft::from));
        self
    }

    /// Queue an event to be added when the portal is built. It is
    /// validated like [`Portal::add_event`].
    pub fn event(mut self, event: impl Into<EventDraft>) -> Self {
        self.events.push(event.into());
        self
    }

    /// Register a derived view over the activity log.
    pub fn view<S: Default + 'static>(mut self, name: &str, reducer: ReduceFn<S>) -> Self {
        self.views.push(Box::new(View::new(name, reducer)));
        self
    }

    /// Build the portal, adding the queued events in order.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidEvent`] for the first queued event missing its name,
    /// date or seat count.
    pub fn build(mut self) -> Result<Portal, InvalidEvent> {
        let drafts = std::mem::take(&mut self.events);
        let mut portal = self.assemble();
        for draft in drafts {
            portal.add_event(draft)?;
        }
        Ok(portal)
    }

    fn assemble(self) -> Portal {
        Portal {
            store: EventStore::new(),
            ledger: RegistrationLedger::new(),
            tracker: CategoryTracker::new(),
            log: ActivityLog::new(),
            views: self.views,
            duplicates: self.duplicates,
        }
    }
}
