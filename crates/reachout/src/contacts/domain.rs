use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::suggestions::occasions::Anniversary;
use crate::suggestions::recency::{days_since, format_relative};

/// Opaque contact identifier. Ordered because it doubles as the ranking
/// tie-break key when two contacts score identically.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ContactId(pub String);

impl fmt::Display for ContactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Desired interval between touches for a relationship.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Cadence {
    Weekly,
    Biweekly,
    Monthly,
    Quarterly,
    Semiannual,
    Annually,
}

impl Cadence {
    pub const ALL: [Cadence; 6] = [
        Cadence::Weekly,
        Cadence::Biweekly,
        Cadence::Monthly,
        Cadence::Quarterly,
        Cadence::Semiannual,
        Cadence::Annually,
    ];
}

/// Fallback for contacts created before a cadence was recorded.
pub const DEFAULT_CADENCE: Cadence = Cadence::Monthly;

/// Scoring parameters plus presentation metadata for one cadence.
/// The display fields are irrelevant to scoring but round-trip through serde.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CadenceProfile {
    pub label: String,
    pub short_label: String,
    pub color: String,
    pub target_interval_days: u32,
    pub base_urgency_weight: f64,
    pub urgency_multiplier: f64,
}

impl CadenceProfile {
    fn new(
        label: &str,
        short_label: &str,
        color: &str,
        target_interval_days: u32,
        base_urgency_weight: f64,
        urgency_multiplier: f64,
    ) -> Self {
        Self {
            label: label.to_string(),
            short_label: short_label.to_string(),
            color: color.to_string(),
            target_interval_days,
            base_urgency_weight,
            urgency_multiplier,
        }
    }
}

/// Exhaustive `Cadence -> CadenceProfile` lookup. One field per variant so a
/// missing entry is a compile error, never a runtime fallback.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CadenceTable {
    pub weekly: CadenceProfile,
    pub biweekly: CadenceProfile,
    pub monthly: CadenceProfile,
    pub quarterly: CadenceProfile,
    pub semiannual: CadenceProfile,
    pub annually: CadenceProfile,
}

impl CadenceTable {
    pub fn profile(&self, cadence: Cadence) -> &CadenceProfile {
        match cadence {
            Cadence::Weekly => &self.weekly,
            Cadence::Biweekly => &self.biweekly,
            Cadence::Monthly => &self.monthly,
            Cadence::Quarterly => &self.quarterly,
            Cadence::Semiannual => &self.semiannual,
            Cadence::Annually => &self.annually,
        }
    }

    /// Overridden tables must keep every target interval positive; the
    /// overdue ratio is undefined otherwise.
    pub fn validate(&self) -> Result<(), CadenceTableError> {
        for cadence in Cadence::ALL {
            if self.profile(cadence).target_interval_days == 0 {
                return Err(CadenceTableError::ZeroInterval(cadence));
            }
        }
        Ok(())
    }
}

impl Default for CadenceTable {
    fn default() -> Self {
        Self {
            weekly: CadenceProfile::new("Every week", "Weekly", "#ff6b81", 7, 80.0, 1.4),
            biweekly: CadenceProfile::new("Every 2 weeks", "2 wks", "#ff4757", 14, 65.0, 1.2),
            monthly: CadenceProfile::new("Every month", "Monthly", "#ffa502", 30, 50.0, 1.0),
            quarterly: CadenceProfile::new("Every 3 months", "Quarterly", "#2ed573", 90, 35.0, 0.7),
            semiannual: CadenceProfile::new("Every 6 months", "6 months", "#747d8c", 180, 25.0, 0.5),
            annually: CadenceProfile::new("Every year", "Yearly", "#57606f", 365, 10.0, 0.35),
        }
    }
}

/// Cadence table configuration error.
#[derive(Debug, thiserror::Error)]
pub enum CadenceTableError {
    #[error("cadence {0:?} has a zero target interval")]
    ZeroInterval(Cadence),
}

/// Category attached to a calendar event; determines the proximity bonus tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Birthday,
    Anniversary,
    Achievement,
    Milestone,
    Holiday,
    Custom,
}

/// An event already attached to a contact snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkedEvent {
    pub title: String,
    pub date: NaiveDate,
    pub kind: EventKind,
}

/// An event row as the external event store returns it, before it has been
/// matched against a contact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub id: String,
    pub title: String,
    pub date: NaiveDate,
    pub kind: EventKind,
    pub contact_id: Option<ContactId>,
}

/// Raw contact shape as the external store owns it. Optional fields stay
/// optional here; [`ContactSnapshot::from_record`] resolves them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactRecord {
    pub id: ContactId,
    pub first_name: String,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub cadence: Option<Cadence>,
    /// Birthday as the source recorded it; year is ignored for recurrence.
    #[serde(default)]
    pub birthday: Option<String>,
    #[serde(default)]
    pub last_contacted_at: Option<DateTime<Utc>>,
    /// Derived display label persisted alongside the timestamp; normalization
    /// recomputes it, so a stale stored value is harmless.
    #[serde(default)]
    pub last_contacted_label: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Normalized, read-only engine input. All the defensive fallbacks happen
/// exactly once, here, so the scoring pipeline can assume clean data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactSnapshot {
    pub id: ContactId,
    pub display_name: String,
    pub phone: Option<String>,
    pub cadence: Cadence,
    pub last_contacted_at: Option<DateTime<Utc>>,
    pub last_contacted_label: String,
    pub birthday: Option<Anniversary>,
    pub linked_events: Vec<LinkedEvent>,
}

impl ContactSnapshot {
    pub fn from_record(record: &ContactRecord, now: DateTime<Utc>) -> Self {
        let last_contacted_label = match record.last_contacted_at {
            Some(at) => format_relative(days_since(Some(at), now)),
            None => "Not recorded".to_string(),
        };

        Self {
            id: record.id.clone(),
            display_name: display_name(&record.first_name, record.last_name.as_deref()),
            phone: record.phone.as_deref().and_then(sanitize_phone),
            cadence: record.cadence.unwrap_or(DEFAULT_CADENCE),
            last_contacted_at: record.last_contacted_at,
            last_contacted_label,
            // Unparseable birthdays drop to None; one bad field must not
            // abort scoring of the record.
            birthday: record.birthday.as_deref().and_then(Anniversary::parse),
            linked_events: Vec::new(),
        }
    }

    /// Attach the store's upcoming events that belong to this contact,
    /// ordered by date. An event matches through an explicit id link or,
    /// failing that, by mentioning the contact's first name in its title.
    pub fn attach_events(&mut self, events: &[CalendarEvent]) {
        let first_name = self
            .display_name
            .split_whitespace()
            .next()
            .unwrap_or_default()
            .to_lowercase();

        let mut linked: Vec<LinkedEvent> = events
            .iter()
            .filter(|event| match &event.contact_id {
                Some(id) => *id == self.id,
                None => !first_name.is_empty() && event.title.to_lowercase().contains(&first_name),
            })
            .map(|event| LinkedEvent {
                title: event.title.clone(),
                date: event.date,
                kind: event.kind,
            })
            .collect();
        linked.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.title.cmp(&b.title)));
        self.linked_events = linked;
    }
}

fn display_name(first: &str, last: Option<&str>) -> String {
    let joined = [Some(first), last]
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

    if joined.is_empty() {
        "Friend".to_string()
    } else {
        joined
    }
}

fn sanitize_phone(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    let has_plus = trimmed.starts_with('+');
    let digits: String = trimmed.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return None;
    }
    Some(if has_plus {
        format!("+{digits}")
    } else {
        digits
    })
}
