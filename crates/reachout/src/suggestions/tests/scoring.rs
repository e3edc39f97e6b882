use super::common::*;
use crate::contacts::domain::{Cadence, CadenceTable, ContactSnapshot};
use crate::suggestions::jitter::{NoJitter, SequenceJitter};
use crate::suggestions::occasions::Anniversary;
use crate::suggestions::scoring::{ContactScorer, ReasonKind, ScoringConfig};

use chrono::Duration;

fn scorer() -> ContactScorer {
    ContactScorer::with_defaults()
}

fn monthly_contacted_days_ago(days: i64) -> ContactSnapshot {
    snapshot(
        "alex",
        Cadence::Monthly,
        Some(reference_now() - Duration::days(days)),
    )
}

#[test]
fn cadence_reason_always_leads() {
    let suggestion = scorer().score(
        &monthly_contacted_days_ago(45),
        reference_now(),
        &mut NoJitter,
    );

    assert!(!suggestion.reasons.is_empty());
    assert_eq!(suggestion.reasons[0].kind, ReasonKind::CadencePriority);
    assert_eq!(suggestion.reasons[0].description, "Cadence: Every month");
    assert_eq!(suggestion.reasons[1].kind, ReasonKind::LastContacted);
}

#[test]
fn overdue_description_names_the_gap() {
    let suggestion = scorer().score(
        &monthly_contacted_days_ago(45),
        reference_now(),
        &mut NoJitter,
    );

    assert!(suggestion
        .reasons
        .iter()
        .any(|reason| reason.description == "Overdue by 15 days"));
}

#[test]
fn exactly_due_reads_as_due_now() {
    let suggestion = scorer().score(
        &monthly_contacted_days_ago(30),
        reference_now(),
        &mut NoJitter,
    );

    assert!(suggestion
        .reasons
        .iter()
        .any(|reason| reason.description == "Due now (every 30 days)"));
}

#[test]
fn approaching_description_counts_down() {
    let suggestion = scorer().score(
        &monthly_contacted_days_ago(20),
        reference_now(),
        &mut NoJitter,
    );

    assert!(suggestion
        .reasons
        .iter()
        .any(|reason| reason.description == "Due in 10 days"));
}

#[test]
fn score_non_decreasing_once_overdue() {
    let scorer = scorer();
    let mut previous = f64::NEG_INFINITY;
    for days in [30, 31, 45, 60, 120, 400, 2000] {
        let suggestion = scorer.score(
            &monthly_contacted_days_ago(days),
            reference_now(),
            &mut NoJitter,
        );
        assert!(
            suggestion.score >= previous,
            "score dropped at {days} days overdue"
        );
        previous = suggestion.score;
    }
}

#[test]
fn never_contacted_outranks_any_finite_history() {
    let scorer = scorer();
    let never = scorer.score(
        &snapshot("alex", Cadence::Monthly, None),
        reference_now(),
        &mut NoJitter,
    );
    for days in [0, 30, 365, 3650] {
        let finite = scorer.score(
            &monthly_contacted_days_ago(days),
            reference_now(),
            &mut NoJitter,
        );
        assert!(
            never.score >= finite.score,
            "never-contacted lost to {days} days"
        );
    }
    assert!(never
        .reasons
        .iter()
        .any(|reason| reason.description.contains("no contact recorded")));
}

#[test]
fn freshness_penalty_fades_out_at_threshold() {
    let scorer = scorer();
    let config = ScoringConfig::default();

    let just_contacted = scorer.score(
        &monthly_contacted_days_ago(0),
        reference_now(),
        &mut NoJitter,
    );
    let at_threshold = scorer.score(
        &monthly_contacted_days_ago(9), // ratio 0.3
        reference_now(),
        &mut NoJitter,
    );

    let base = scorer.table().profile(Cadence::Monthly).base_urgency_weight;
    assert_eq!(just_contacted.score, base - config.freshness_penalty);
    assert!(at_threshold.score > just_contacted.score);

    // At the threshold the penalty is gone: pure approaching boost.
    let expected = base + 0.3 * config.approaching_scale;
    assert!((at_threshold.score - expected).abs() < 1e-9);
}

#[test]
fn jitter_is_bounded_by_magnitude() {
    let scorer = scorer();
    let contact = monthly_contacted_days_ago(45);

    let flat = scorer.score(&contact, reference_now(), &mut NoJitter);
    let mut max_jitter = SequenceJitter::new(vec![1.0]);
    let boosted = scorer.score(&contact, reference_now(), &mut max_jitter);

    let config = ScoringConfig::default();
    assert!((boosted.score - flat.score - config.jitter_magnitude).abs() < 1e-9);
}

#[test]
fn birthday_reason_appends_after_recency() {
    let mut contact = monthly_contacted_days_ago(20);
    contact.birthday = Some(Anniversary::from_date(
        reference_now().date_naive() + Duration::days(3),
    ));

    let suggestion = scorer().score(&contact, reference_now(), &mut NoJitter);

    let birthday = suggestion
        .reasons
        .iter()
        .find(|reason| reason.kind == ReasonKind::UpcomingEvent)
        .expect("birthday reason present");
    assert_eq!(birthday.description, "Birthday in 3 days");
}

#[test]
fn zero_interval_is_treated_as_fully_overdue() {
    let mut table = CadenceTable::default();
    table.monthly.target_interval_days = 0;
    assert!(table.validate().is_err());

    let scorer = ContactScorer::new(table, ScoringConfig::default());
    let suggestion = scorer.score(
        &monthly_contacted_days_ago(1),
        reference_now(),
        &mut NoJitter,
    );

    let config = ScoringConfig::default();
    let profile_base = 50.0;
    let capped = config.overdue_cap * 1.0;
    assert_eq!(suggestion.score, profile_base + capped);
}

#[test]
fn cadence_table_round_trips_display_metadata() {
    let table = CadenceTable::default();
    let json = serde_json::to_string(&table).expect("serialize");
    let back: CadenceTable = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(table, back);
}

#[test]
fn scoring_config_validation_catches_bad_overrides() {
    let mut config = ScoringConfig::default();
    config.jitter_magnitude = -1.0;
    assert!(config.validate().is_err());

    let mut config = ScoringConfig::default();
    config.never_contacted_boost = 10.0;
    assert!(config.validate().is_err());

    assert!(ScoringConfig::default().validate().is_ok());
}
