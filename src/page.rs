use crate::clock::{Clock, SystemClock};
use crate::error::TransportError;
use crate::event::{Event, EventId, Registrant};
use crate::portal::{outcome_message, Portal};
use crate::query::EventFilter;
use crate::render::{render_events, RenderedEvents};
use crate::transport::{RegistrationRequest, Transport};

pub const PLEASE_FILL_ALL_FIELDS: &str = "Please fill all fields.";
pub const SUBMITTING_REGISTRATION: &str = "Submitting registration...";
pub const REGISTRATION_SUCCESSFUL_VIA_SERVER: &str = "Registration successful (via server)!";
pub const REGISTRATION_FAILED: &str = "Registration failed. Please try again.";
pub const FAILED_TO_LOAD_EVENTS: &str = "Failed to load events.";

/// The registration form's fields, as typed by the visitor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistrationForm {
    pub user_name: String,
    pub user_email: String,
    /// Selected option value; `None` for the placeholder.
    pub event_select: Option<EventId>,
}

impl RegistrationForm {
    pub fn reset(&mut self) {
        *self = RegistrationForm::default();
    }

    fn registrant(&self) -> Registrant {
        Registrant::new(self.user_name.trim(), self.user_email.trim())
    }
}

/// Everything on the portal page: the portal itself plus filter, form,
/// message area, loading indicator and the last rendering.
///
/// Each `on_*`/`submit*`/`load*` method is one user interaction. The async
/// ones are also available as `begin_*`/`finish_*` pairs for callers that
/// drive the transport themselves and show the state in between.
pub struct PortalPage<C = SystemClock> {
    portal: Portal,
    clock: C,
    filter: EventFilter,
    form: RegistrationForm,
    message: String,
    loading: bool,
    container_text: Option<String>,
    rendered: RenderedEvents,
}

impl PortalPage<SystemClock> {
    pub fn new(portal: Portal) -> Self {
        PortalPage::with_clock(portal, SystemClock)
    }
}

impl<C: Clock> PortalPage<C> {
    /// Wrap a portal. Nothing is rendered until the first interaction or
    /// [`PortalPage::load_events_via`].
    pub fn with_clock(portal: Portal, clock: C) -> Self {
        PortalPage {
            portal,
            clock,
            filter: EventFilter::default(),
            form: RegistrationForm::default(),
            message: String::new(),
            loading: false,
            container_text: None,
            rendered: RenderedEvents::default(),
        }
    }

    pub fn portal(&self) -> &Portal {
        &self.portal
    }

    pub fn portal_mut(&mut self) -> &mut Portal {
        &mut self.portal
    }

    pub fn filter(&self) -> &EventFilter {
        &self.filter
    }

    pub fn form(&self) -> &RegistrationForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut RegistrationForm {
        &mut self.form
    }

    /// Text of the message area.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Whether the loading indicator is visible.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Text that replaced the event cards, after a failed load.
    pub fn container_text(&self) -> Option<&str> {
        self.container_text.as_deref()
    }

    pub fn rendered(&self) -> &RenderedEvents {
        &self.rendered
    }

    /// Re-render every event, ignoring the filter.
    pub fn render_all(&mut self) {
        self.rendered = render_events(self.portal.events(), self.clock.today());
        self.container_text = None;
    }

    fn render_filtered(&mut self) {
        let filtered = self.portal.filter_events(&self.filter);
        self.rendered = render_events(filtered, self.clock.today());
        self.container_text = None;
    }

    /// The category selector changed.
    pub fn on_category_change(&mut self, category: &str) {
        self.filter.category = category.to_string();
        self.render_filtered();
    }

    /// The search box changed.
    pub fn on_search_input(&mut self, search: &str) {
        self.filter.search = search.to_string();
        self.render_filtered();
    }

    /// A card's register button was clicked. Uses the name and email
    /// currently in the form.
    pub fn on_register_click(&mut self, event_id: EventId) {
        self.register_locally(event_id);
    }

    /// The form was submitted, with no server round trip.
    pub fn submit_form(&mut self) {
        if let Some(event_id) = self.checked_form() {
            self.register_locally(event_id);
        }
    }

    /// The form was submitted and the registration is also posted.
    ///
    /// Equivalent to [`PortalPage::begin_submit`], the post, then
    /// [`PortalPage::finish_submit`].
    pub async fn submit_form_via<T: Transport + ?Sized>(&mut self, transport: &T) {
        if let Some(request) = self.begin_submit() {
            let result = transport.post_registration(request).await;
            self.finish_submit(result);
        }
    }

    /// First half of a posted submission. The local registration happens
    /// here; only when it succeeds is the submitting message shown and the
    /// request to post returned.
    pub fn begin_submit(&mut self) -> Option<RegistrationRequest> {
        let event_id = self.checked_form()?;
        let request = RegistrationRequest {
            name: self.form.user_name.trim().to_string(),
            email: self.form.user_email.trim().to_string(),
            event_id,
        };
        if !self.register_locally(event_id) {
            return None;
        }
        self.message = SUBMITTING_REGISTRATION.to_string();
        Some(request)
    }

    /// Second half of a posted submission. A failed post leaves local state
    /// as it is.
    pub fn finish_submit(&mut self, result: Result<(), TransportError>) {
        match result {
            Ok(()) => {
                self.message = REGISTRATION_SUCCESSFUL_VIA_SERVER.to_string();
                self.render_all();
            }
            Err(e) => {
                log::warn!("posting registration failed: {e}");
                self.message = REGISTRATION_FAILED.to_string();
            }
        }
    }

    /// Show the loading indicator, fetch the event list and render it.
    pub async fn load_events_via<T: Transport + ?Sized>(&mut self, transport: &T) {
        let snapshot = self.begin_load();
        let result = transport.fetch_events(snapshot).await;
        self.finish_load(result);
    }

    /// Show the loading indicator and snapshot the events to fetch.
    pub fn begin_load(&mut self) -> Vec<Event> {
        self.loading = true;
        self.portal.events().to_vec()
    }

    /// Hide the loading indicator and render the fetched events, or replace
    /// the cards with the failure text.
    pub fn finish_load(&mut self, result: Result<Vec<Event>, TransportError>) {
        self.loading = false;
        match result {
            Ok(events) => {
                self.rendered = render_events(&events, self.clock.today());
                self.container_text = None;
            }
            Err(e) => {
                log::warn!("loading events failed: {e}");
                self.rendered = RenderedEvents::default();
                self.container_text = Some(FAILED_TO_LOAD_EVENTS.to_string());
            }
        }
    }

    /// Trimmed fields all present, or the fill-all-fields message.
    fn checked_form(&mut self) -> Option<EventId> {
        let registrant = self.form.registrant();
        match self.form.event_select {
            Some(event_id) if registrant.is_complete() => Some(event_id),
            _ => {
                self.message = PLEASE_FILL_ALL_FIELDS.to_string();
                None
            }
        }
    }

    /// Register with the form's name and email. On success the whole list
    /// is re-rendered and the form reset.
    fn register_locally(&mut self, event_id: EventId) -> bool {
        let result = self.portal.register_user(event_id, self.form.registrant());
        self.message = outcome_message(&result);
        if result.is_ok() {
            self.render_all();
            self.form.reset();
        }
        result.is_ok()
    }
}
