//! The contact scorer: one contact snapshot in, one scored suggestion out.

mod config;

pub use config::{ScoringConfig, ScoringConfigError};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::contacts::domain::{CadenceTable, ContactId, ContactSnapshot};

use super::jitter::JitterSource;
use super::occasions::{birthday_bonus, event_bonuses};
use super::recency::days_since;

/// Why a suggestion scored the way it did; anchors the explanation UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReasonKind {
    CadencePriority,
    LastContacted,
    UpcomingEvent,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuggestionReason {
    pub kind: ReasonKind,
    pub description: String,
    pub weight: f64,
}

/// One ranked recommendation. Ephemeral: created per scoring pass, never
/// persisted, and referencing the contact only by id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    pub contact_id: ContactId,
    pub display_name: String,
    pub score: f64,
    pub reasons: Vec<SuggestionReason>,
    pub generated_at: DateTime<Utc>,
}

/// Stateless scorer applying the cadence table and tuning constants to a
/// normalized contact snapshot. Scoring is total: every snapshot yields a
/// suggestion, whatever optional fields it is missing.
pub struct ContactScorer {
    table: CadenceTable,
    config: ScoringConfig,
}

struct RecencyTerm {
    points: f64,
    description: String,
}

impl ContactScorer {
    pub fn new(table: CadenceTable, config: ScoringConfig) -> Self {
        Self { table, config }
    }

    pub fn with_defaults() -> Self {
        Self::new(CadenceTable::default(), ScoringConfig::default())
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    pub fn table(&self) -> &CadenceTable {
        &self.table
    }

    pub fn score(
        &self,
        contact: &ContactSnapshot,
        now: DateTime<Utc>,
        jitter: &mut dyn JitterSource,
    ) -> Suggestion {
        let profile = self.table.profile(contact.cadence);

        let mut reasons = vec![SuggestionReason {
            kind: ReasonKind::CadencePriority,
            description: format!("Cadence: {}", profile.label),
            weight: profile.base_urgency_weight,
        }];
        let mut score = profile.base_urgency_weight;

        let recency = self.recency_term(contact, now);
        score += recency.points;
        reasons.push(SuggestionReason {
            kind: ReasonKind::LastContacted,
            description: recency.description,
            weight: recency.points.max(5.0),
        });

        let today = now.date_naive();
        if let Some(bonus) = birthday_bonus(contact.birthday.as_ref(), today, &self.config) {
            score += bonus.points;
            reasons.push(SuggestionReason {
                kind: ReasonKind::UpcomingEvent,
                description: format!(
                    "Birthday in {} day{}",
                    bonus.days_until,
                    plural(bonus.days_until)
                ),
                weight: bonus.points,
            });
        }

        for event in event_bonuses(&contact.linked_events, today, &self.config) {
            score += event.points;
            reasons.push(SuggestionReason {
                kind: ReasonKind::UpcomingEvent,
                description: format!(
                    "{} in {} day{}",
                    event.title,
                    event.days_until,
                    plural(event.days_until)
                ),
                weight: event.points,
            });
        }

        score += jitter.next_unit() * self.config.jitter_magnitude;

        Suggestion {
            contact_id: contact.id.clone(),
            display_name: contact.display_name.clone(),
            score,
            reasons,
            generated_at: now,
        }
    }

    fn recency_term(&self, contact: &ContactSnapshot, now: DateTime<Utc>) -> RecencyTerm {
        let profile = self.table.profile(contact.cadence);

        let Some(last) = contact.last_contacted_at else {
            return RecencyTerm {
                points: self.config.never_contacted_boost * profile.urgency_multiplier,
                description: "New connection, no contact recorded yet".to_string(),
            };
        };

        let elapsed = days_since(Some(last), now);
        let interval = profile.target_interval_days as i64;
        // A zero interval cannot come out of a validated table; treat it as
        // permanently overdue rather than dividing by it.
        let ratio = if interval > 0 {
            elapsed as f64 / interval as f64
        } else {
            f64::INFINITY
        };

        if ratio >= 1.0 {
            let overdue_days = elapsed - interval.max(0);
            let boost = (self.config.overdue_base
                + (ratio - 1.0) * self.config.overdue_ratio_scale)
                .min(self.config.overdue_cap)
                * profile.urgency_multiplier;
            let description = if overdue_days > 0 {
                format!("Overdue by {overdue_days} day{}", plural(overdue_days))
            } else {
                format!("Due now (every {interval} days)")
            };
            return RecencyTerm {
                points: boost,
                description,
            };
        }

        let due_in = interval - elapsed;
        let boost = ratio * self.config.approaching_scale * profile.urgency_multiplier;
        let threshold = self.config.freshness_ratio_threshold;
        let penalty = if ratio < threshold {
            -self.config.freshness_penalty * (1.0 - ratio / threshold)
        } else {
            0.0
        };
        RecencyTerm {
            points: boost + penalty,
            description: format!("Due in {due_in} day{}", plural(due_in)),
        }
    }
}

fn plural(count: i64) -> &'static str {
    if count == 1 {
        ""
    } else {
        "s"
    }
}
