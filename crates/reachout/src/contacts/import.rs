//! CSV contact import.
//!
//! Accepts the export format used by the companion app: one row per contact
//! with `Name`, `Cadence`, `Birthday`, and `Last Contacted` columns. Blank
//! cells mean "absent"; unknown cadence labels fall back to the default so a
//! half-filled export still imports.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer};

use super::domain::{Cadence, ContactId, ContactRecord, DEFAULT_CADENCE};

#[derive(Debug, thiserror::Error)]
pub enum ContactImportError {
    #[error("failed to read contact export: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid contact CSV data: {0}")]
    Csv(#[from] csv::Error),
}

/// Outcome of one import run.
#[derive(Debug, Clone, PartialEq)]
pub struct ContactImportSummary {
    pub records: Vec<ContactRecord>,
    /// Rows dropped for having no usable name.
    pub skipped: usize,
}

pub struct ContactCsvImporter;

impl ContactCsvImporter {
    pub fn from_path(
        path: &Path,
        now: DateTime<Utc>,
    ) -> Result<ContactImportSummary, ContactImportError> {
        let file = File::open(path)?;
        Self::from_reader(file, now)
    }

    pub fn from_reader<R: Read>(
        reader: R,
        now: DateTime<Utc>,
    ) -> Result<ContactImportSummary, ContactImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut records = Vec::new();
        let mut skipped = 0usize;

        for (index, row) in csv_reader.deserialize::<ContactRow>().enumerate() {
            let row = row?;
            let Some((first_name, last_name)) = split_name(&row.name) else {
                skipped += 1;
                continue;
            };

            let cadence = row.cadence();
            let last_contacted_at = row.last_contacted();
            records.push(ContactRecord {
                id: ContactId(format!("import-{:04}", index + 1)),
                first_name,
                last_name,
                phone: row.phone,
                cadence: Some(cadence),
                birthday: row.birthday,
                last_contacted_at,
                last_contacted_label: None,
                notes: None,
                created_at: now,
            });
        }

        Ok(ContactImportSummary { records, skipped })
    }
}

#[derive(Debug, Deserialize)]
struct ContactRow {
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Cadence", default, deserialize_with = "empty_string_as_none")]
    cadence: Option<String>,
    #[serde(rename = "Birthday", default, deserialize_with = "empty_string_as_none")]
    birthday: Option<String>,
    #[serde(
        rename = "Last Contacted",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    last_contacted: Option<String>,
    #[serde(rename = "Phone", default, deserialize_with = "empty_string_as_none")]
    phone: Option<String>,
}

impl ContactRow {
    fn cadence(&self) -> Cadence {
        match self.cadence.as_deref() {
            Some(raw) => parse_cadence(raw).unwrap_or(DEFAULT_CADENCE),
            None => DEFAULT_CADENCE,
        }
    }

    fn last_contacted(&self) -> Option<DateTime<Utc>> {
        self.last_contacted.as_deref().and_then(parse_datetime)
    }
}

fn parse_cadence(raw: &str) -> Option<Cadence> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "weekly" | "every week" => Some(Cadence::Weekly),
        "biweekly" | "every 2 weeks" => Some(Cadence::Biweekly),
        "monthly" | "every month" => Some(Cadence::Monthly),
        "quarterly" | "every 3 months" => Some(Cadence::Quarterly),
        "semiannual" | "biannual" | "every 6 months" => Some(Cadence::Semiannual),
        "annually" | "yearly" | "every year" => Some(Cadence::Annually),
        _ => None,
    }
}

fn parse_datetime(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
        return Some(timestamp.with_timezone(&Utc));
    }
    if let Ok(timestamp) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return Some(timestamp.and_utc());
    }
    for format in ["%Y-%m-%d", "%m/%d/%Y"] {
        if let Ok(date) = NaiveDate::parse_from_str(raw, format) {
            return date.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc());
        }
    }
    None
}

fn split_name(raw: &str) -> Option<(String, Option<String>)> {
    let mut parts = raw.split_whitespace();
    let first = parts.next()?.to_string();
    let rest = parts.collect::<Vec<_>>().join(" ");
    let last = if rest.is_empty() { None } else { Some(rest) };
    Some((first, last))
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|raw| !raw.trim().is_empty()))
}
