use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::domain::{CalendarEvent, ContactId, ContactRecord};

/// Error enumeration for external store failures.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("contact not found")]
    NotFound,
    #[error("store unavailable: {0}")]
    Unavailable(String),
    #[error("malformed record: {0}")]
    Malformed(String),
}

/// Read and write boundary to the external contact store. The engine pulls a
/// fresh snapshot on every scoring pass and never caches across calls.
#[async_trait]
pub trait ContactStore: Send + Sync {
    async fn fetch_contacts(&self) -> Result<Vec<ContactRecord>, StoreError>;

    /// Persist `last_contacted_at = at` plus the derived human-readable
    /// label. The only side effect the engine ever triggers.
    async fn record_contact(
        &self,
        id: &ContactId,
        at: DateTime<Utc>,
        label: String,
    ) -> Result<(), StoreError>;
}

/// Optional read boundary to an external event store.
#[async_trait]
pub trait EventStore: Send + Sync {
    /// Events dated within the next `window_days` days.
    async fn upcoming_events(&self, window_days: u32) -> Result<Vec<CalendarEvent>, StoreError>;
}

/// Stand-in for callers without an event collaborator; the event proximity
/// bonus is simply skipped.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoEvents;

#[async_trait]
impl EventStore for NoEvents {
    async fn upcoming_events(&self, _window_days: u32) -> Result<Vec<CalendarEvent>, StoreError> {
        Ok(Vec::new())
    }
}
