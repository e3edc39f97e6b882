use chrono::{DateTime, Utc};

use crate::contacts::domain::ContactSnapshot;

use super::jitter::JitterSource;
use super::scoring::{ContactScorer, Suggestion};

/// Scores every snapshot, sorts descending by score, truncates to `limit`.
/// Ties break on ascending contact id, never on input order; storage layers
/// give no ordering guarantee.
pub struct SuggestionRanker {
    scorer: ContactScorer,
}

impl SuggestionRanker {
    pub fn new(scorer: ContactScorer) -> Self {
        Self { scorer }
    }

    pub fn with_defaults() -> Self {
        Self::new(ContactScorer::with_defaults())
    }

    pub fn scorer(&self) -> &ContactScorer {
        &self.scorer
    }

    pub fn rank(
        &self,
        contacts: &[ContactSnapshot],
        now: DateTime<Utc>,
        limit: usize,
        jitter: &mut dyn JitterSource,
    ) -> Vec<Suggestion> {
        let mut ranked: Vec<Suggestion> = contacts
            .iter()
            .map(|contact| self.scorer.score(contact, now, jitter))
            .collect();

        ranked.sort_by(|a, b| {
            b.score
                .total_cmp(&a.score)
                .then_with(|| a.contact_id.cmp(&b.contact_id))
        });
        ranked.truncate(limit);
        ranked
    }
}
