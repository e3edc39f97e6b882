use crate::infra::{parse_date, InMemoryContactStore, InMemoryEventStore};
use chrono::{Duration, NaiveDate, NaiveTime, Utc};
use clap::Args;
use reachout::contacts::{
    Cadence, CalendarEvent, ContactCsvImporter, ContactId, ContactRecord, EventKind,
};
use reachout::error::AppError;
use reachout::suggestions::{
    Clock, FixedClock, NoJitter, SuggestionRanker, SuggestionSession, SystemClock,
    ThreadRngJitter,
};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Seed the demo from a CSV export instead of the built-in sample list.
    #[arg(long)]
    pub(crate) contacts_csv: Option<PathBuf>,
    /// Score as of this date (YYYY-MM-DD) instead of today.
    #[arg(long, value_parser = parse_date)]
    pub(crate) today: Option<NaiveDate>,
    /// How many suggestions to print.
    #[arg(long, default_value_t = 5)]
    pub(crate) limit: usize,
    /// Disable the jitter term so repeated runs rank identically.
    #[arg(long)]
    pub(crate) deterministic: bool,
}

pub(crate) async fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let clock: Arc<dyn Clock> = match args.today {
        Some(date) => Arc::new(FixedClock(date.and_time(NaiveTime::default()).and_utc())),
        None => Arc::new(SystemClock),
    };
    let now = clock.now();

    let contacts = Arc::new(InMemoryContactStore::default());
    let events = Arc::new(InMemoryEventStore::default());
    match args.contacts_csv {
        Some(path) => {
            let summary = ContactCsvImporter::from_path(&path, now)?;
            println!(
                "Imported {} contact(s), skipped {} row(s).",
                summary.records.len(),
                summary.skipped
            );
            contacts.seed(summary.records);
        }
        None => {
            contacts.seed(sample_contacts());
            events.seed(sample_events(now.date_naive()));
        }
    }

    let mut session = SuggestionSession::new(
        contacts,
        events,
        SuggestionRanker::with_defaults(),
        clock,
        if args.deterministic {
            Box::new(NoJitter)
        } else {
            Box::new(ThreadRngJitter)
        },
    )
    .with_limit(args.limit);

    session.regenerate().await;

    if session.current().is_none() {
        println!("No suggestions: the contact list is empty.");
        return Ok(());
    }

    println!("Who to reach out to ({}):", now.date_naive());
    for (position, suggestion) in session.suggestions().iter().enumerate() {
        println!(
            "{:>2}. {} (score {:.1})",
            position + 1,
            suggestion.display_name,
            suggestion.score
        );
        for reason in &suggestion.reasons {
            println!("      - {} ({:+.1})", reason.description, reason.weight);
        }
    }

    Ok(())
}

fn sample_contacts() -> Vec<ContactRecord> {
    let now = Utc::now();
    let sample = |id: &str,
                  name: (&str, Option<&str>),
                  cadence: Cadence,
                  contacted_days_ago: Option<i64>,
                  birthday: Option<&str>| ContactRecord {
        id: ContactId(id.to_string()),
        first_name: name.0.to_string(),
        last_name: name.1.map(str::to_string),
        phone: None,
        cadence: Some(cadence),
        birthday: birthday.map(str::to_string),
        last_contacted_at: contacted_days_ago.map(|days| now - Duration::days(days)),
        last_contacted_label: None,
        notes: None,
        created_at: now - Duration::days(200),
    };

    vec![
        sample("c-001", ("Jordan", Some("Lee")), Cadence::Monthly, Some(45), None),
        sample("c-002", ("Riley", Some("Okafor")), Cadence::Weekly, Some(2), None),
        sample(
            "c-003",
            ("Sam", Some("Whitaker")),
            Cadence::Quarterly,
            Some(30),
            Some("1992-06-18"),
        ),
        sample("c-004", ("Devon", None), Cadence::Biweekly, None, None),
        sample("c-005", ("Maya", Some("Castillo")), Cadence::Annually, Some(400), None),
    ]
}

/// Upcoming events for the built-in sample list, dated relative to the
/// demo's "today" so they land inside the proximity window.
fn sample_events(today: NaiveDate) -> Vec<CalendarEvent> {
    vec![
        CalendarEvent {
            id: "e-001".to_string(),
            title: "Dinner with Jordan".to_string(),
            date: today + Duration::days(2),
            kind: EventKind::Custom,
            contact_id: Some(ContactId("c-001".to_string())),
        },
        CalendarEvent {
            id: "e-002".to_string(),
            title: "Sam's graduation".to_string(),
            date: today + Duration::days(5),
            kind: EventKind::Achievement,
            contact_id: Some(ContactId("c-003".to_string())),
        },
    ]
}
