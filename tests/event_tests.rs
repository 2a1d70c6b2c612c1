mod common;

use common::{ann, date, event, sample_portal};
use community_portal::{
    filter_events_by_category, format_event_summaries, music_events, sample_events, Event,
    EventDraft, InvalidEvent, Portal, PortalError, ALL_CATEGORIES,
};

#[test]
fn test_sample_events() {
    let events = sample_events();
    let ids: Vec<u32> = events.iter().map(|e| e.id).collect();
    assert_eq!(ids, vec![1, 2, 3, 4]);
    assert_eq!(events[0].name, "Music Fiesta");
    assert_eq!(events[0].date, date(2025, 6, 15));
    assert_eq!(events[0].seats, 30);
    assert_eq!(events[0].location, "Community Hall");
    assert_eq!(events[3].name, "Jazz Night");
    assert!(!events[3].check_availability());

    let dates: Vec<_> = events.iter().map(|e| e.date).collect();
    assert_eq!(
        dates,
        vec![date(2025, 6, 15), date(2025, 6, 20), date(2025, 7, 1), date(2025, 6, 25)]
    );
    assert!(events.iter().all(|e| e.date != chrono::NaiveDate::default()));
}

#[test]
fn test_add_event_appends() {
    let mut portal = sample_portal();
    portal.add_event(event(5, "sports", 8)).unwrap();

    assert_eq!(portal.events().len(), 5);
    assert_eq!(portal.events().last().unwrap().id, 5);
}

#[test]
fn test_add_event_missing_fields() {
    let mut portal = Portal::default();
    let complete = EventDraft::from(event(1, "music", 3));

    let no_name = EventDraft { name: None, ..complete.clone() };
    let blank_name = EventDraft { name: Some(String::new()), ..complete.clone() };
    let no_date = EventDraft { date: None, ..complete.clone() };
    let no_seats = EventDraft { seats: None, ..complete.clone() };

    assert_eq!(portal.add_event(no_name), Err(InvalidEvent::MissingName));
    assert_eq!(portal.add_event(blank_name), Err(InvalidEvent::MissingName));
    assert_eq!(portal.add_event(no_date), Err(InvalidEvent::MissingDate));
    assert_eq!(portal.add_event(no_seats), Err(InvalidEvent::MissingSeats));
    assert!(portal.events().is_empty());
    assert!(portal.activity_log().is_empty());

    assert_eq!(InvalidEvent::MissingSeats.to_string(), "Invalid event data");
}

#[test]
fn test_zero_seats_is_not_missing() {
    let mut portal = Portal::default();
    let draft = EventDraft::from(event(1, "music", 0));
    assert!(portal.add_event(draft).is_ok());
}

// Identifiers are not checked on insertion. Registration and lookup both
// land on the first event with the id.
#[test]
fn test_duplicate_id_is_accepted_first_wins() {
    let mut portal = Portal::default();
    portal.add_event(event(1, "music", 2)).unwrap();
    portal
        .add_event(Event::new(1, "Shadow", date(2030, 2, 2), 50).with_category("sports"))
        .unwrap();

    assert_eq!(portal.events().len(), 2);
    assert_eq!(portal.event(1).unwrap().seats, 2);

    portal.register_user(1, ann()).unwrap();
    assert_eq!(portal.events()[0].seats, 1);
    assert_eq!(portal.events()[1].seats, 50);
    assert_eq!(portal.tracker().total(), 1);
}

#[test]
fn test_import_events_json() {
    let mut portal = Portal::default();
    let added = portal
        .import_events_json(
            r#"[
                {"id": 1, "name": "Open Mic", "date": "2030-03-01", "seats": 40,
                 "category": "music", "location": "Library"},
                {"id": 2, "name": "Chess Club", "date": "2030-03-02", "seats": 12}
            ]"#,
        )
        .unwrap();

    assert_eq!(added, 2);
    assert_eq!(portal.event(1).unwrap().location, "Library");
    assert_eq!(portal.event(2).unwrap().category, "");
}

#[test]
fn test_import_stops_at_invalid_draft() {
    let mut portal = Portal::default();
    let err = portal
        .import_events_json(
            r#"[
                {"id": 1, "name": "Open Mic", "date": "2030-03-01", "seats": 40},
                {"id": 2, "name": "No Date", "seats": 12},
                {"id": 3, "name": "Never Reached", "date": "2030-03-03", "seats": 1}
            ]"#,
        )
        .unwrap_err();

    assert!(matches!(err, PortalError::InvalidEvent(InvalidEvent::MissingDate)));
    assert_eq!(portal.events().len(), 1);
}

#[test]
fn test_import_malformed_json() {
    let mut portal = Portal::default();
    let err = portal.import_events_json("{not json").unwrap_err();
    assert!(matches!(err, PortalError::Import(_)));
}

#[test]
fn test_event_serde_uses_iso_dates() {
    let json = serde_json::to_value(&sample_events()[0]).unwrap();
    assert_eq!(json["date"], "2025-06-15");
    let back: Event = serde_json::from_value(json).unwrap();
    assert_eq!(back, sample_events()[0]);
}

#[test]
fn test_filter_all_keeps_order() {
    let events = sample_events();
    let all: Vec<u32> = filter_events_by_category(&events, ALL_CATEGORIES)
        .iter()
        .map(|e| e.id)
        .collect();
    assert_eq!(all, vec![1, 2, 3, 4]);
}

#[test]
fn test_filter_music() {
    let portal = sample_portal();
    let music: Vec<u32> = portal
        .filter_events_by_category("music")
        .iter()
        .map(|e| e.id)
        .collect();
    assert_eq!(music, vec![1, 4]);
    assert_eq!(
        format_event_summaries(music_events(portal.events())),
        vec!["Music Fiesta (music)", "Jazz Night (music)"]
    );
}
