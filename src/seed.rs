use crate::event::Event;
use chrono::NaiveDate;

const fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    match NaiveDate::from_ymd_opt(y, m, d) {
        Some(date) => date,
        None => panic!("invalid sample event date"),
    }
}

// Evaluated at compile time, so a bad date fails the build.
const MUSIC_FIESTA: NaiveDate = date(2025, 6, 15);
const BAKING_WORKSHOP: NaiveDate = date(2025, 6, 20);
const SOCCER_TOURNAMENT: NaiveDate = date(2025, 7, 1);
const JAZZ_NIGHT: NaiveDate = date(2025, 6, 25);

/// The four sample events a fresh portal is seeded with.
///
/// Jazz Night starts with zero seats, so it never shows up on the page.
pub fn sample_events() -> Vec<Event> {
    vec![
        Event::new(1, "Music Fiesta", MUSIC_FIESTA, 30)
            .with_category("music")
            .with_location("Community Hall"),
        Event::new(2, "Baking Workshop", BAKING_WORKSHOP, 15)
            .with_category("workshop")
            .with_location("Kitchen Studio"),
        Event::new(3, "Soccer Tournament", SOCCER_TOURNAMENT, 20)
            .with_category("sports")
            .with_location("Local Stadium"),
        Event::new(4, "Jazz Night", JAZZ_NIGHT, 0)
            .with_category("music")
            .with_location("Jazz Club"),
    ]
}
