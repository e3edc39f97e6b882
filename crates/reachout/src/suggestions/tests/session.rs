use super::common::*;
use crate::contacts::domain::{Cadence, CalendarEvent, ContactId, EventKind};
use crate::contacts::repository::{NoEvents, StoreError};
use crate::suggestions::scoring::ReasonKind;

use chrono::Duration;

#[tokio::test]
async fn current_is_empty_until_the_first_pass() {
    let contacts = MemoryContacts::with_records(vec![record("alex", Cadence::Monthly, None)]);
    let session = session(contacts, NoEvents);

    assert!(session.current().is_none());
    assert!(session.suggestions().is_empty());
}

#[tokio::test]
async fn empty_store_yields_no_suggestions() {
    let mut session = session(MemoryContacts::default(), NoEvents);

    let suggestions = session.regenerate().await;
    assert!(suggestions.is_empty());
    assert!(session.current().is_none());
}

#[tokio::test]
async fn read_failure_degrades_to_empty_instead_of_erroring() {
    let mut session = session(UnavailableContacts, NoEvents);

    let suggestions = session.regenerate().await;
    assert!(suggestions.is_empty());
    assert!(session.current().is_none());
}

#[tokio::test]
async fn event_store_failure_only_skips_event_bonuses() {
    let contacts = MemoryContacts::with_records(vec![record(
        "alex",
        Cadence::Monthly,
        Some(reference_now() - Duration::days(45)),
    )]);
    let mut session = session(contacts, UnavailableEvents);

    session.regenerate().await;

    let featured = session.current().expect("contact still scored");
    assert_eq!(featured.contact_id, ContactId("alex".to_string()));
    assert!(featured
        .reasons
        .iter()
        .all(|reason| reason.kind != ReasonKind::UpcomingEvent));
}

#[tokio::test]
async fn linked_events_surface_as_reasons() {
    let contacts = MemoryContacts::with_records(vec![record(
        "alex",
        Cadence::Monthly,
        Some(reference_now() - Duration::days(45)),
    )]);
    let events = MemoryEvents::with_events(vec![CalendarEvent {
        id: "evt-1".to_string(),
        title: "Dinner with alex".to_string(),
        date: reference_now().date_naive() + Duration::days(2),
        kind: EventKind::Custom,
        contact_id: Some(ContactId("alex".to_string())),
    }]);
    let mut session = session(contacts, events);

    session.regenerate().await;

    let featured = session.current().expect("suggestion present");
    assert!(featured
        .reasons
        .iter()
        .any(|reason| reason.description == "Dinner with alex in 2 days"));
}

#[tokio::test]
async fn mark_contacted_persists_and_deflates_the_score() {
    let contacts = MemoryContacts::with_records(vec![record(
        "alex",
        Cadence::Monthly,
        Some(reference_now() - Duration::days(45)),
    )]);
    let store = contacts.clone();
    let mut session = session(contacts, NoEvents);

    session.regenerate().await;
    let before = session.current().expect("ranked before").score;

    session
        .mark_contacted(&ContactId("alex".to_string()))
        .await
        .expect("write succeeds");

    let updated = store
        .get(&ContactId("alex".to_string()))
        .expect("record still present");
    assert_eq!(updated.last_contacted_at, Some(reference_now()));
    assert_eq!(updated.last_contacted_label.as_deref(), Some("Today"));

    let after = session.current().expect("ranked after").score;
    assert!(after < before, "freshly contacted score must drop");
}

#[tokio::test]
async fn mark_contacted_propagates_unknown_contact() {
    let contacts = MemoryContacts::default();
    let mut session = session(contacts, NoEvents);

    let err = session
        .mark_contacted(&ContactId("ghost".to_string()))
        .await
        .expect_err("missing contact must error");
    assert!(matches!(err, StoreError::NotFound));
}

#[tokio::test]
async fn mark_contacted_propagates_write_failure() {
    let mut session = session(UnavailableContacts, NoEvents);

    let err = session
        .mark_contacted(&ContactId("alex".to_string()))
        .await
        .expect_err("write failure must surface");
    assert!(matches!(err, StoreError::Unavailable(_)));
}

#[tokio::test]
async fn regenerate_leaves_store_untouched() {
    let original = record(
        "alex",
        Cadence::Monthly,
        Some(reference_now() - Duration::days(45)),
    );
    let contacts = MemoryContacts::with_records(vec![original.clone()]);
    let store = contacts.clone();
    let mut session = session(contacts, NoEvents);

    session.regenerate().await;
    session.regenerate().await;

    assert_eq!(store.get(&original.id), Some(original));
}
