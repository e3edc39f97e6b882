//! The suggestion pipeline: recency math, occasion bonuses, the contact
//! scorer, the ranker, and the session that ties them to the stores.

pub mod clock;
pub mod jitter;
pub mod occasions;
pub mod ranker;
pub mod recency;
pub mod router;
pub mod scoring;
pub mod session;

#[cfg(test)]
mod tests;

pub use clock::{Clock, FixedClock, SystemClock};
pub use jitter::{JitterSource, NoJitter, SequenceJitter, ThreadRngJitter};
pub use occasions::Anniversary;
pub use ranker::SuggestionRanker;
pub use recency::{days_since, format_relative, NEVER_CONTACTED_DAYS};
pub use router::suggestion_router;
pub use scoring::{
    ContactScorer, ReasonKind, ScoringConfig, ScoringConfigError, Suggestion, SuggestionReason,
};
pub use session::SuggestionSession;
