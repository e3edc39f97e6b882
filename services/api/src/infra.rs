use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use metrics_exporter_prometheus::PrometheusHandle;

use reachout::contacts::{
    CalendarEvent, ContactId, ContactRecord, ContactStore, EventStore, StoreError,
};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Process-local contact store backing the service. The engine only sees the
/// `ContactStore` trait, so swapping in a database later touches nothing else.
#[derive(Default, Clone)]
pub(crate) struct InMemoryContactStore {
    records: Arc<Mutex<HashMap<ContactId, ContactRecord>>>,
}

impl InMemoryContactStore {
    pub(crate) fn seed(&self, records: Vec<ContactRecord>) {
        let mut guard = self.records.lock().expect("contact mutex poisoned");
        for record in records {
            guard.insert(record.id.clone(), record);
        }
    }

    pub(crate) fn all(&self) -> Vec<ContactRecord> {
        let guard = self.records.lock().expect("contact mutex poisoned");
        let mut records: Vec<ContactRecord> = guard.values().cloned().collect();
        records.sort_by(|a, b| a.id.cmp(&b.id));
        records
    }
}

#[async_trait]
impl ContactStore for InMemoryContactStore {
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

/// Process-local event store. Filters by the requested window against the
/// wall clock, matching what a calendar-backed implementation would return.
#[derive(Default, Clone)]
pub(crate) struct InMemoryEventStore {
    events: Arc<Mutex<Vec<CalendarEvent>>>,
}

impl InMemoryEventStore {
    pub(crate) fn seed(&self, events: Vec<CalendarEvent>) {
        let mut guard = self.events.lock().expect("event mutex poisoned");
        guard.extend(events);
    }
}

#[async_trait]
impl EventStore for InMemoryEventStore {
    async fn upcoming_events(&self, window_days: u32) -> Result<Vec<CalendarEvent>, StoreError> {
        let today = Utc::now().date_naive();
        let guard = self.events.lock().expect("event mutex poisoned");
        Ok(guard
            .iter()
            .filter(|event| {
                let days_until = (event.date - today).num_days();
                days_until >= 0 && days_until <= i64::from(window_days)
            })
            .cloned()
            .collect())
    }
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|err| format!("invalid date '{raw}': {err}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use reachout::contacts::EventKind;

    fn event(id: &str, days_from_now: i64) -> CalendarEvent {
        CalendarEvent {
            id: id.to_string(),
            title: format!("event {id}"),
            date: Utc::now().date_naive() + Duration::days(days_from_now),
            kind: EventKind::Custom,
            contact_id: None,
        }
    }

    #[tokio::test]
    async fn seeded_events_filter_to_the_requested_window() {
        let store = InMemoryEventStore::default();
        store.seed(vec![event("past", -1), event("soon", 2), event("late", 30)]);

        let upcoming = store.upcoming_events(7).await.expect("read succeeds");
        let ids: Vec<&str> = upcoming.iter().map(|event| event.id.as_str()).collect();
        assert_eq!(ids, vec!["soon"]);
    }
}
