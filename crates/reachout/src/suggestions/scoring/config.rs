use serde::{Deserialize, Serialize};

use crate::contacts::domain::EventKind;

/// Every tuned constant in the scoring function, named and overridable.
/// Defaults carry the companion app's tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Boost at exactly one full cadence elapsed, before the urgency
    /// multiplier.
    pub overdue_base: f64,
    /// Additional boost per unit of overdue ratio beyond 1.0.
    pub overdue_ratio_scale: f64,
    /// Ceiling on the overdue term so long-neglected contacts cannot grow
    /// without bound.
    pub overdue_cap: f64,
    /// Scale of the ramp applied while a contact approaches its due date.
    pub approaching_scale: f64,
    /// Ratio below which the freshness penalty applies; the penalty fades
    /// linearly to zero at this threshold.
    pub freshness_ratio_threshold: f64,
    /// Maximum magnitude of the freshness penalty, at ratio zero.
    pub freshness_penalty: f64,
    /// Upper bound of the random score addition.
    pub jitter_magnitude: f64,
    /// Boost for contacts with no recorded contact at all, before the
    /// urgency multiplier. Must stay at or above `overdue_cap` so a
    /// never-contacted contact outranks any finite history.
    pub never_contacted_boost: f64,
    pub birthday_window_days: i64,
    pub birthday_imminent_days: i64,
    pub birthday_imminent_bonus: f64,
    pub birthday_upcoming_bonus: f64,
    pub event_window_days: i64,
    pub event_birthday_bonus: f64,
    pub event_anniversary_bonus: f64,
    pub event_achievement_bonus: f64,
    pub event_milestone_bonus: f64,
    pub event_generic_bonus: f64,
    /// Default top-N truncation for a ranking pass.
    pub suggestion_limit: usize,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            overdue_base: 30.0,
            overdue_ratio_scale: 35.0,
            overdue_cap: 100.0,
            approaching_scale: 20.0,
            freshness_ratio_threshold: 0.3,
            freshness_penalty: 10.0,
            jitter_magnitude: 8.0,
            never_contacted_boost: 120.0,
            birthday_window_days: 30,
            birthday_imminent_days: 7,
            birthday_imminent_bonus: 50.0,
            birthday_upcoming_bonus: 30.0,
            event_window_days: 7,
            event_birthday_bonus: 40.0,
            event_anniversary_bonus: 30.0,
            event_achievement_bonus: 25.0,
            event_milestone_bonus: 25.0,
            event_generic_bonus: 20.0,
            suggestion_limit: 5,
        }
    }
}

impl ScoringConfig {
    pub fn event_bonus(&self, kind: EventKind) -> f64 {
        match kind {
            EventKind::Birthday => self.event_birthday_bonus,
            EventKind::Anniversary => self.event_anniversary_bonus,
            EventKind::Achievement => self.event_achievement_bonus,
            EventKind::Milestone => self.event_milestone_bonus,
            EventKind::Holiday | EventKind::Custom => self.event_generic_bonus,
        }
    }

    pub fn validate(&self) -> Result<(), ScoringConfigError> {
        if self.jitter_magnitude < 0.0 {
            return Err(ScoringConfigError::NegativeJitter);
        }
        if self.birthday_window_days <= 0 || self.event_window_days <= 0 {
            return Err(ScoringConfigError::EmptyWindow);
        }
        if self.never_contacted_boost < self.overdue_cap {
            return Err(ScoringConfigError::NeverContactedBelowCap);
        }
        if self.freshness_ratio_threshold <= 0.0 || self.freshness_ratio_threshold >= 1.0 {
            return Err(ScoringConfigError::FreshnessThresholdOutOfRange);
        }
        Ok(())
    }
}

/// Scoring configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ScoringConfigError {
    #[error("jitter magnitude must be non-negative")]
    NegativeJitter,
    #[error("bonus windows must span at least one day")]
    EmptyWindow,
    #[error("never-contacted boost must be at least the overdue cap")]
    NeverContactedBelowCap,
    #[error("freshness ratio threshold must lie strictly between 0 and 1")]
    FreshnessThresholdOutOfRange,
}
