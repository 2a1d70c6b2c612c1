//! Pure validity and filtering functions over event slices.

use crate::event::Event;
use crate::tracker::TRACKED_CATEGORY;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Category selector value meaning "no category filter".
pub const ALL_CATEGORIES: &str = "all";

/// An event is shown only if it has not happened yet and still has seats.
///
/// An event dated today counts as upcoming.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use community_portal::{is_valid_event, Event};
///
/// let today = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
/// let later = NaiveDate::from_ymd_opt(2025, 6, 15).unwrap();
/// assert!(is_valid_event(&Event::new(1, "Fiesta", later, 30), today));
/// assert!(!is_valid_event(&Event::new(2, "Full", later, 0), today));
/// assert!(!is_valid_event(&Event::new(3, "Past", today.pred_opt().unwrap(), 5), today));
/// ```
pub fn is_valid_event(event: &Event, now: NaiveDate) -> bool {
    event.date >= now && event.check_availability()
}

/// Events matching `category` in their original order, or all of them for
/// [`ALL_CATEGORIES`].
pub fn filter_events_by_category<'a>(events: &'a [Event], category: &str) -> Vec<&'a Event> {
    if category == ALL_CATEGORIES {
        events.iter().collect()
    } else {
        events.iter().filter(|e| e.category == category).collect()
    }
}

/// Case-insensitive substring match on the event name. An empty needle
/// matches everything.
pub fn name_matches(event: &Event, needle: &str) -> bool {
    event.name.to_lowercase().contains(&needle.to_lowercase())
}

/// Events in the tracked (music) category.
pub fn music_events(events: &[Event]) -> Vec<&Event> {
    filter_events_by_category(events, TRACKED_CATEGORY)
}

/// One `"<name> (<category>)"` line per event.
pub fn format_event_summaries<'a>(events: impl IntoIterator<Item = &'a Event>) -> Vec<String> {
    events
        .into_iter()
        .map(|e| format!("{} ({})", e.name, e.category))
        .collect()
}

/// The category selector and the search box, as one filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventFilter {
    pub category: String,
    pub search: String,
}

impl Default for EventFilter {
    fn default() -> Self {
        EventFilter {
            category: ALL_CATEGORIES.to_string(),
            search: String::new(),
        }
    }
}

impl EventFilter {
    pub fn new(category: impl Into<String>, search: impl Into<String>) -> Self {
        EventFilter {
            category: category.into(),
            search: search.into(),
        }
    }

    /// Category filter first, then the name search. Order is preserved.
    pub fn apply<'a>(&self, events: &'a [Event]) -> Vec<&'a Event> {
        filter_events_by_category(events, &self.category)
            .into_iter()
            .filter(|e| name_matches(e, &self.search))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn events() -> Vec<Event> {
        vec![
            Event::new(1, "Music Fiesta", date(2025, 6, 15), 30).with_category("music"),
            Event::new(2, "Baking Workshop", date(2025, 6, 20), 15).with_category("workshop"),
            Event::new(3, "Jazz Night", date(2025, 6, 25), 0).with_category("music"),
        ]
    }

    #[test]
    fn test_event_on_today_is_valid() {
        let e = Event::new(1, "Today", date(2025, 6, 1), 1);
        assert!(is_valid_event(&e, date(2025, 6, 1)));
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let all = events();
        let filter = EventFilter::new(ALL_CATEGORIES, "JAZZ");
        let found: Vec<_> = filter.apply(&all).iter().map(|e| e.id).collect();
        assert_eq!(found, vec![3]);
    }

    #[test]
    fn test_search_composes_with_category() {
        let all = events();
        let filter = EventFilter::new("workshop", "night");
        assert!(filter.apply(&all).is_empty());
        let filter = EventFilter::new("music", "");
        let found: Vec<_> = filter.apply(&all).iter().map(|e| e.id).collect();
        assert_eq!(found, vec![1, 3]);
    }

    #[test]
    fn test_unknown_category_matches_nothing() {
        assert!(filter_events_by_category(&events(), "chess").is_empty());
    }

    #[test]
    fn test_summaries() {
        let all = events();
        assert_eq!(
            format_event_summaries(music_events(&all)),
            vec!["Music Fiesta (music)", "Jazz Night (music)"]
        );
    }

    #[test]
    fn test_music_events_follow_tracked_category() {
        let all = events();
        let music: Vec<_> = music_events(&all).iter().map(|e| e.id).collect();
        let tracked: Vec<_> = filter_events_by_category(&all, TRACKED_CATEGORY)
            .iter()
            .map(|e| e.id)
            .collect();
        assert_eq!(music, tracked);
    }
}
