mod common;

use common::{before_season, date, sample_portal};
use community_portal::render::SELECT_PLACEHOLDER;
use community_portal::{render_events, sample_events, EventFilter};

#[test]
fn test_seed_renders_three_cards() {
    let page = render_events(&sample_events(), before_season());

    let ids: Vec<u32> = page.cards.iter().map(|c| c.event_id).collect();
    assert_eq!(ids, vec![1, 2, 3]);
    assert_eq!(page.card(1).unwrap().seats, 30);
    assert!(page.card(4).is_none());
}

#[test]
fn test_select_options_mirror_cards() {
    let page = render_events(&sample_events(), before_season());

    assert_eq!(page.options.len(), page.cards.len() + 1);
    assert_eq!(page.options[0].value, "");
    assert_eq!(page.options[0].label, SELECT_PLACEHOLDER);
    let labels: Vec<&str> = page.options[1..].iter().map(|o| o.label.as_str()).collect();
    assert_eq!(
        labels,
        vec![
            "Music Fiesta (2025-06-15)",
            "Baking Workshop (2025-06-20)",
            "Soccer Tournament (2025-07-01)",
        ]
    );
    assert_eq!(page.options[1].value, "1");
}

#[test]
fn test_past_events_are_hidden() {
    let page = render_events(&sample_events(), date(2025, 6, 21));
    let ids: Vec<u32> = page.cards.iter().map(|c| c.event_id).collect();
    assert_eq!(ids, vec![3]);

    let page = render_events(&sample_events(), date(2026, 1, 1));
    assert!(page.cards.is_empty());
    assert_eq!(page.options.len(), 1);
}

#[test]
fn test_event_on_render_day_is_shown() {
    let page = render_events(&sample_events(), date(2025, 7, 1));
    assert_eq!(page.cards.len(), 1);
    assert_eq!(page.cards[0].name, "Soccer Tournament");
}

#[test]
fn test_sold_out_event_disappears_after_last_registration() {
    let mut portal = community_portal::Portal::builder()
        .event(common::event(7, "music", 1))
        .build()
        .unwrap();
    assert_eq!(render_events(portal.events(), before_season()).cards.len(), 1);

    portal.register_user(7, common::ann()).unwrap();

    assert!(render_events(portal.events(), before_season()).cards.is_empty());
    assert!(portal.event(7).is_some());
}

#[test]
fn test_render_filtered_subset() {
    let portal = sample_portal();
    let filter = EventFilter::new("music", "");
    let page = render_events(portal.filter_events(&filter), before_season());
    let ids: Vec<u32> = page.cards.iter().map(|c| c.event_id).collect();
    assert_eq!(ids, vec![1]);
}

#[test]
fn test_cards_html() {
    let page = render_events(&sample_events(), before_season());
    let html = page.cards_html();

    assert_eq!(html.matches("<div class=\"eventCard\">").count(), 3);
    assert!(html.contains("<h3>Music Fiesta</h3>"));
    assert!(html.contains("<p><b>Date:</b> 2025-06-15</p>"));
    assert!(html.contains("<p><b>Location:</b> Community Hall</p>"));
    assert!(html.contains("<p><b>Seats Available:</b> 30</p>"));
    assert!(html.contains("<button class=\"registerBtn\" data-id=\"1\">Register</button>"));
    assert!(!html.contains("Jazz Night"));

    let options = page.options_html();
    assert!(options.starts_with("<option value=\"\">--Select--</option>"));
    assert!(options.contains("<option value=\"2\">Baking Workshop (2025-06-20)</option>"));
}
