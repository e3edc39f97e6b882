use std::sync::Arc;

use tracing::warn;

use crate::contacts::domain::ContactSnapshot;
use crate::contacts::repository::{ContactStore, EventStore, StoreError};
use crate::contacts::ContactId;

use super::clock::Clock;
use super::jitter::JitterSource;
use super::ranker::SuggestionRanker;
use super::recency::format_relative;
use super::scoring::Suggestion;

/// Stateful wrapper around the ranking pipeline.
///
/// Holds the most recent ranked list as a last-writer-wins slot. Each pass
/// pulls a fresh snapshot from the stores; nothing is cached across passes.
/// A failed store read degrades to "no suggestions"; only the
/// [`mark_contacted`](Self::mark_contacted) write surfaces errors, because
/// silently dropping that mutation would corrupt every later ranking.
pub struct SuggestionSession<C, E> {
    contacts: Arc<C>,
    events: Arc<E>,
    ranker: SuggestionRanker,
    clock: Arc<dyn Clock>,
    jitter: Box<dyn JitterSource>,
    limit: usize,
    current: Vec<Suggestion>,
}

impl<C, E> SuggestionSession<C, E>
where
    C: ContactStore,
    E: EventStore,
{
    pub fn new(
        contacts: Arc<C>,
        events: Arc<E>,
        ranker: SuggestionRanker,
        clock: Arc<dyn Clock>,
        jitter: Box<dyn JitterSource>,
    ) -> Self {
        let limit = ranker.scorer().config().suggestion_limit;
        Self {
            contacts,
            events,
            ranker,
            clock,
            jitter,
            limit,
            current: Vec::new(),
        }
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    /// The featured suggestion from the latest pass. Absent before the
    /// first [`regenerate`](Self::regenerate) even when the store holds
    /// contacts, and after any pass over an empty or unreadable store;
    /// callers that need a populated slot run a pass first.
    pub fn current(&self) -> Option<&Suggestion> {
        self.current.first()
    }

    pub fn suggestions(&self) -> &[Suggestion] {
        &self.current
    }

    /// Rescore from a fresh store snapshot with fresh jitter. Mutates no
    /// external state.
    pub async fn regenerate(&mut self) -> &[Suggestion] {
        let now = self.clock.now();

        let records = match self.contacts.fetch_contacts().await {
            Ok(records) => records,
            Err(err) => {
                warn!(error = %err, "contact store read failed; serving no suggestions");
                self.current.clear();
                return &self.current;
            }
        };

        let window = self.ranker.scorer().config().event_window_days.max(0) as u32;
        let events = match self.events.upcoming_events(window).await {
            Ok(events) => events,
            Err(err) => {
                warn!(error = %err, "event store read failed; skipping event bonuses");
                Vec::new()
            }
        };

        let mut snapshots: Vec<ContactSnapshot> = records
            .iter()
            .map(|record| ContactSnapshot::from_record(record, now))
            .collect();
        for snapshot in &mut snapshots {
            snapshot.attach_events(&events);
        }

        self.current = self
            .ranker
            .rank(&snapshots, now, self.limit, self.jitter.as_mut());
        &self.current
    }

    /// Record that the contact was reached today, then re-rank. The store
    /// write error, if any, propagates unchanged.
    pub async fn mark_contacted(&mut self, id: &ContactId) -> Result<(), StoreError> {
        let now = self.clock.now();
        self.contacts
            .record_contact(id, now, format_relative(0))
            .await?;
        self.regenerate().await;
        Ok(())
    }
}
