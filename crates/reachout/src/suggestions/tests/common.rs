use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, TimeZone, Utc};

use crate::contacts::domain::{
    Cadence, CalendarEvent, ContactId, ContactRecord, ContactSnapshot,
};
use crate::contacts::repository::{ContactStore, EventStore, StoreError};
use crate::suggestions::clock::FixedClock;
use crate::suggestions::jitter::NoJitter;
use crate::suggestions::ranker::SuggestionRanker;
use crate::suggestions::session::SuggestionSession;

pub(super) fn utc(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 12, 0, 0)
        .single()
        .expect("valid timestamp")
}

pub(super) fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

/// Reference "now" shared across the suites: 2026-06-15 12:00 UTC.
pub(super) fn reference_now() -> DateTime<Utc> {
    utc(2026, 6, 15)
}

pub(super) fn record(
    id: &str,
    cadence: Cadence,
    last_contacted_at: Option<DateTime<Utc>>,
) -> ContactRecord {
    ContactRecord {
        id: ContactId(id.to_string()),
        first_name: id.to_string(),
        last_name: None,
        phone: None,
        cadence: Some(cadence),
        birthday: None,
        last_contacted_at,
        last_contacted_label: None,
        notes: None,
        created_at: utc(2026, 1, 1),
    }
}

pub(super) fn snapshot(
    id: &str,
    cadence: Cadence,
    last_contacted_at: Option<DateTime<Utc>>,
) -> ContactSnapshot {
    ContactSnapshot::from_record(&record(id, cadence, last_contacted_at), reference_now())
}

#[derive(Default, Clone)]
pub(super) struct MemoryContacts {
    records: Arc<Mutex<HashMap<ContactId, ContactRecord>>>,
}

impl MemoryContacts {
    pub(super) fn with_records(records: Vec<ContactRecord>) -> Self {
        let map = records
            .into_iter()
            .map(|record| (record.id.clone(), record))
            .collect();
        Self {
            records: Arc::new(Mutex::new(map)),
        }
    }

    pub(super) fn get(&self, id: &ContactId) -> Option<ContactRecord> {
        self.records
            .lock()
            .expect("contact mutex poisoned")
            .get(id)
            .cloned()
    }
}

#[async_trait]
impl ContactStore for MemoryContacts {
    async fn fetch_contacts(&self) -> Result<Vec<ContactRecord>, StoreError> {
        let guard = self.records.lock().expect("contact mutex poisoned");
        Ok(guard.values().cloned().collect())
    }

    async fn record_contact(
        &self,
        id: &ContactId,
        at: DateTime<Utc>,
        label: String,
    ) -> Result<(), StoreError> {
        let mut guard = self.records.lock().expect("contact mutex poisoned");
        let record = guard.get_mut(id).ok_or(StoreError::NotFound)?;
        record.last_contacted_at = Some(at);
        record.last_contacted_label = Some(label);
        Ok(())
    }
}

/// Contact store whose reads and writes always fail.
#[derive(Default, Clone, Copy)]
pub(super) struct UnavailableContacts;

#[async_trait]
impl ContactStore for UnavailableContacts {
    async fn fetch_contacts(&self) -> Result<Vec<ContactRecord>, StoreError> {
        Err(StoreError::Unavailable("contact store offline".to_string()))
    }

    async fn record_contact(
        &self,
        _id: &ContactId,
        _at: DateTime<Utc>,
        _label: String,
    ) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("contact store offline".to_string()))
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryEvents {
    events: Vec<CalendarEvent>,
}

impl MemoryEvents {
    pub(super) fn with_events(events: Vec<CalendarEvent>) -> Self {
        Self { events }
    }
}

#[async_trait]
impl EventStore for MemoryEvents {
    async fn upcoming_events(&self, _window_days: u32) -> Result<Vec<CalendarEvent>, StoreError> {
        Ok(self.events.clone())
    }
}

/// Event store that always fails; the session must degrade, not crash.
#[derive(Default, Clone, Copy)]
pub(super) struct UnavailableEvents;

#[async_trait]
impl EventStore for UnavailableEvents {
    async fn upcoming_events(&self, _window_days: u32) -> Result<Vec<CalendarEvent>, StoreError> {
        Err(StoreError::Unavailable("event store offline".to_string()))
    }
}

pub(super) fn session<C, E>(contacts: C, events: E) -> SuggestionSession<C, E>
where
    C: ContactStore,
    E: EventStore,
{
    SuggestionSession::new(
        Arc::new(contacts),
        Arc::new(events),
        SuggestionRanker::with_defaults(),
        Arc::new(FixedClock(reference_now())),
        Box::new(NoJitter),
    )
}
