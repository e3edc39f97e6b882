//! Connection-suggestion engine.
//!
//! Scores a person's contacts against their desired contact cadence and
//! surfaces who to reach out to next. The scoring pipeline is pure and
//! synchronous; the only async boundaries are the [`contacts`] store traits
//! that the [`suggestions::SuggestionSession`] delegates reads and writes to.

pub mod config;
pub mod contacts;
pub mod error;
pub mod suggestions;
pub mod telemetry;
