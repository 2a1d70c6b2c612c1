//! Projection of events onto the page: cards plus the registration select.

use crate::event::{Event, EventId};
use crate::query::is_valid_event;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Label of the leading, empty option of the event select.
pub const SELECT_PLACEHOLDER: &str = "--Select--";

/// One event as displayed in the events container.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventCard {
    /// Id the card's register button is bound to.
    pub event_id: EventId,
    pub name: String,
    pub date: NaiveDate,
    pub category: String,
    pub location: String,
    pub seats: u32,
}

impl From<&Event> for EventCard {
    fn from(event: &Event) -> Self {
        EventCard {
            event_id: event.id,
            name: event.name.clone(),
            date: event.date,
            category: event.category.clone(),
            location: event.location.clone(),
            seats: event.seats,
        }
    }
}

/// An `<option>` of the event select. The placeholder has an empty value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl SelectOption {
    fn placeholder() -> Self {
        SelectOption {
            value: String::new(),
            label: SELECT_PLACEHOLDER.to_string(),
        }
    }
}

impl From<&Event> for SelectOption {
    fn from(event: &Event) -> Self {
        SelectOption {
            value: event.id.to_string(),
            label: format!("{} ({})", event.name, event.date),
        }
    }
}

/// Result of a rendering pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderedEvents {
    pub cards: Vec<EventCard>,
    /// Placeholder first, then one option per card, in the same order.
    pub options: Vec<SelectOption>,
}

/// Render the valid events among `events`.
///
/// Past events and events without seats get neither a card nor an option.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use community_portal::{render_events, sample_events};
///
/// let now = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
/// let page = render_events(&sample_events(), now);
/// assert_eq!(page.cards.len(), 3);
/// assert_eq!(page.options[1].label, "Music Fiesta (2025-06-15)");
/// ```
pub fn render_events<'a>(
    events: impl IntoIterator<Item = &'a Event>,
    now: NaiveDate,
) -> RenderedEvents {
    let mut rendered = RenderedEvents {
        cards: Vec::new(),
        options: vec![SelectOption::placeholder()],
    };
    for event in events {
        if !is_valid_event(event, now) {
            continue;
        }
        rendered.cards.push(EventCard::from(event));
        rendered.options.push(SelectOption::from(event));
    }
    log::debug!("rendered {} event cards", rendered.cards.len());
    rendered
}

impl RenderedEvents {
    pub fn card(&self, event_id: EventId) -> Option<&EventCard> {
        self.cards.iter().find(|c| c.event_id == event_id)
    }

    /// Markup for the events container: one `div.eventCard` per card.
    pub fn cards_html(&self) -> String {
        let mut html = String::new();
        for card in &self.cards {
            html.push_str(&format!(
                concat!(
                    "<div class=\"eventCard\">",
                    "<h3>{name}</h3>",
                    "<p><b>Date:</b> {date}</p>",
                    "<p><b>Category:</b> {category}</p>",
                    "<p><b>Location:</b> {location}</p>",
                    "<p><b>Seats Available:</b> {seats}</p>",
                    "<button class=\"registerBtn\" data-id=\"{id}\">Register</button>",
                    "</div>"
                ),
                name = escape(&card.name),
                date = card.date,
                category = escape(&card.category),
                location = escape(&card.location),
                seats = card.seats,
                id = card.event_id,
            ));
        }
        html
    }

    /// Markup for the contents of the event select.
    pub fn options_html(&self) -> String {
        let mut html = String::new();
        for option in &self.options {
            html.push_str(&format!(
                "<option value=\"{}\">{}</option>",
                escape(&option.value),
                escape(&option.label)
            ));
        }
        html
    }
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
