//! Birthday and event proximity bonuses.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::contacts::domain::LinkedEvent;

use super::scoring::ScoringConfig;

/// A recurring month/day date; the year of the source value is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Anniversary {
    pub month: u32,
    pub day: u32,
}

impl Anniversary {
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            month: date.month(),
            day: date.day(),
        }
    }

    /// Parses the formats contact sources actually hold a birthday in:
    /// a full ISO date, the vCard year-less form `--MM-DD`, or bare `MM-DD`.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
            return Some(Self::from_date(date));
        }
        let month_day = trimmed.strip_prefix("--").unwrap_or(trimmed);
        let (month_raw, day_raw) = month_day.split_once('-')?;
        let month: u32 = month_raw.parse().ok()?;
        let day: u32 = day_raw.parse().ok()?;
        // Validate against a leap year so Feb 29 stays representable.
        NaiveDate::from_ymd_opt(2000, month, day)?;
        Some(Self { month, day })
    }

    /// Days until the next annual occurrence, with today counting as
    /// occurring today (0), not as already passed.
    pub fn days_until_next(&self, today: NaiveDate) -> i64 {
        let this_year = self.occurrence_in(today.year());
        let next = if this_year < today {
            self.occurrence_in(today.year() + 1)
        } else {
            this_year
        };
        (next - today).num_days()
    }

    fn occurrence_in(&self, year: i32) -> NaiveDate {
        // Feb 29 clamps to Feb 28 in non-leap years.
        NaiveDate::from_ymd_opt(year, self.month, self.day)
            .or_else(|| NaiveDate::from_ymd_opt(year, self.month, self.day.saturating_sub(1)))
            .unwrap_or_default()
    }
}

/// A bonus contribution together with the proximity that produced it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OccasionBonus {
    pub points: f64,
    pub days_until: i64,
}

/// Step-function birthday bonus: a higher tier once the birthday is
/// imminent, a lower tier inside the window, nothing beyond it.
pub fn birthday_bonus(
    birthday: Option<&Anniversary>,
    today: NaiveDate,
    config: &ScoringConfig,
) -> Option<OccasionBonus> {
    let days_until = birthday?.days_until_next(today);
    if days_until > config.birthday_window_days {
        return None;
    }
    let points = if days_until <= config.birthday_imminent_days {
        config.birthday_imminent_bonus
    } else {
        config.birthday_upcoming_bonus
    };
    Some(OccasionBonus { points, days_until })
}

/// One qualifying linked event.
#[derive(Debug, Clone, PartialEq)]
pub struct EventBonus {
    pub title: String,
    pub date: NaiveDate,
    pub days_until: i64,
    pub points: f64,
}

/// Per-event bonuses for events inside the near-term window, ordered by
/// event date ascending. Past events never qualify.
pub fn event_bonuses(
    events: &[LinkedEvent],
    today: NaiveDate,
    config: &ScoringConfig,
) -> Vec<EventBonus> {
    let mut bonuses: Vec<EventBonus> = events
        .iter()
        .filter_map(|event| {
            let days_until = (event.date - today).num_days();
            if days_until < 0 || days_until > config.event_window_days {
                return None;
            }
            Some(EventBonus {
                title: event.title.clone(),
                date: event.date,
                days_until,
                points: config.event_bonus(event.kind),
            })
        })
        .collect();
    bonuses.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.title.cmp(&b.title)));
    bonuses
}
