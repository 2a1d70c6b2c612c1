//! Walk through the portal page: load, filter, register, post.

use chrono::NaiveDate;
use community_portal::{
    EventDraft, FixedClock, Portal, PortalPage, RegistrationForm, SimulatedTransport,
    TRACKED_CATEGORY,
};
use std::time::Duration;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let portal = Portal::builder().seed_sample_events().build()?;
    // The sample events run in June 2025; look at them from just before.
    let opening = NaiveDate::from_ymd_opt(2025, 6, 1).ok_or("bad date")?;
    let mut page = PortalPage::with_clock(portal, FixedClock(opening));

    // Shorter than the defaults so the demo does not drag.
    let transport = SimulatedTransport::builder()
        .fetch_delay(Duration::from_millis(300))
        .post_delay(Duration::from_millis(200))
        .build();

    println!("Welcome to the Community Portal");
    page.load_events_via(&transport).await;
    match page.container_text() {
        Some(text) => println!("{text}"),
        None => {
            println!("{} upcoming events:", page.rendered().cards.len());
            for card in &page.rendered().cards {
                println!(
                    "  [{}] {} on {} at {} ({} seats)",
                    card.event_id, card.name, card.date, card.location, card.seats
                );
            }
        }
    }

    page.on_category_change("music");
    println!("\nmusic filter: {} cards", page.rendered().cards.len());

    *page.form_mut() = RegistrationForm {
        user_name: "Ann".to_string(),
        user_email: "a@x.com".to_string(),
        event_select: Some(1),
    };
    page.submit_form_via(&transport).await;
    println!("\nsubmit: {}", page.message());

    let undated = EventDraft {
        id: 5,
        name: Some("Poetry Night".to_string()),
        ..Default::default()
    };
    if let Err(e) = page.portal_mut().add_event(undated) {
        println!("add_event: {e}");
    }

    println!(
        "\n{} registrations so far: {}",
        TRACKED_CATEGORY,
        page.portal().tracker().total()
    );
    println!("activity log holds {} entries", page.portal().activity_log().len());
    Ok(())
}
