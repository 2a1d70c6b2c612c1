#![allow(dead_code)]

use chrono::NaiveDate;
use community_portal::{Activity, Event, FixedClock, Portal, Registrant, USER_REGISTERED};
use serde::{Deserialize, Serialize};

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// A day before every sample event.
pub fn before_season() -> NaiveDate {
    date(2025, 6, 1)
}

pub fn before_season_clock() -> FixedClock {
    FixedClock(before_season())
}

pub fn sample_portal() -> Portal {
    Portal::builder().seed_sample_events().build().unwrap()
}

pub fn ann() -> Registrant {
    Registrant::new("Ann", "a@x.com")
}

pub fn bo() -> Registrant {
    Registrant::new("Bo", "b@x.com")
}

pub fn event(id: u32, category: &str, seats: u32) -> Event {
    Event::new(id, format!("Event {id}"), date(2030, 1, 1), seats).with_category(category)
}

pub fn counter_reducer(state: u64, _activity: &Activity) -> u64 {
    state + 1
}

#[derive(Default, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AttendeeState {
    pub emails: Vec<String>,
}

pub fn attendee_reducer(mut state: AttendeeState, activity: &Activity) -> AttendeeState {
    match activity.kind.as_str() {
        USER_REGISTERED => {
            if let Some(actor) = &activity.actor {
                state.emails.push(actor.clone());
            }
        }
        _ => {}
    }
    state
}
