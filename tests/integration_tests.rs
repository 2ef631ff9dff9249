use chrono::{Days, NaiveDate};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::fs;
use tempfile::TempDir;

use vitalrs::config::AppConfig;
use vitalrs::import::import_sessions;
use vitalrs::load::{internal_load, weekly_volume, LoadSummary};
use vitalrs::risk::{mania_risk, suicide_risk_alert, ManiaRiskConfig, PainSeverity, ScoreScale};
use vitalrs::sleep::sleep_duration_str;
use vitalrs::stats::{trend, SeriesStats};
use vitalrs::workload::{AcwrZone, TsbStatus, WorkloadSeries};
use vitalrs::{DailySession, PmcCalculator, WorkloadAssessment, WorkloadCalculator};

/// End-to-end checks over the public API

fn start() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 3).unwrap()
}

fn daily_sessions(loads: &[(u32, u8)]) -> Vec<DailySession> {
    loads
        .iter()
        .enumerate()
        .map(|(i, (duration, rpe))| DailySession::new(start() + Days::new(i as u64), *duration, *rpe))
        .collect()
}

#[test]
fn test_zero_duration_or_rpe_has_no_load() {
    for session in daily_sessions(&[(0, 7), (45, 0), (0, 0)]) {
        assert_eq!(session.internal_load(), dec!(0));
    }
    assert_eq!(internal_load(dec!(0), dec!(10)), dec!(0));
}

#[test]
fn test_sleep_duration_cases() {
    assert_eq!(sleep_duration_str("22:00", "22:00").unwrap(), dec!(24));
    assert_eq!(sleep_duration_str("22:00", "06:00").unwrap(), dec!(8));
    assert_eq!(sleep_duration_str("06:00", "22:00").unwrap(), dec!(16));
}

#[test]
fn test_seven_equal_sessions() {
    let sessions = daily_sessions(&[(50, 6); 7]);
    let assessment = WorkloadCalculator::new().assess_sessions(&sessions);

    let metrics = assessment.metrics().expect("seven sessions are enough");
    assert_eq!(metrics.acwr, dec!(1));
    assert_eq!(metrics.tsb, dec!(0));
    assert_eq!(metrics.acwr_zone, AcwrZone::IdealZone);
}

#[test]
fn test_load_spike_after_steady_block() {
    let mut plan = vec![(45, 4); 21];
    plan.extend(vec![(75, 8); 7]);
    let sessions = daily_sessions(&plan);

    let metrics = WorkloadCalculator::new()
        .assess_sessions(&sessions)
        .metrics()
        .cloned()
        .unwrap();
    assert!(metrics.acwr > dec!(1));
    assert!(metrics.tsb < dec!(0));
}

#[test]
fn test_all_rest_history_is_zero_not_insufficient() {
    let sessions = daily_sessions(&[(0, 0); 10]);
    match WorkloadCalculator::new().assess_sessions(&sessions) {
        WorkloadAssessment::Available(metrics) => {
            assert_eq!(metrics.ctl, dec!(0));
            assert_eq!(metrics.acwr, dec!(0));
        }
        other => panic!("expected metrics, got {:?}", other),
    }
}

#[test]
fn test_short_history_is_flagged() {
    let sessions = daily_sessions(&[(60, 5); 3]);
    let calculator = WorkloadCalculator::new();

    assert!(calculator.assess_sessions(&sessions).is_insufficient());
    assert!(matches!(
        calculator.series(&sessions),
        WorkloadSeries::InsufficientData { available: 3, .. }
    ));
}

#[test]
fn test_classifier_boundaries() {
    let labels: Vec<&str> = [3, 4, 6, 7, 8, 9]
        .iter()
        .map(|v| PainSeverity::from_intensity(Decimal::from(*v)).label())
        .collect();
    assert_eq!(labels, vec!["mild", "moderate", "moderate", "intense", "intense", "severe"]);

    let config = ManiaRiskConfig::default();
    let check = |stress, energy| mania_risk(stress, ScoreScale::ZeroToHundred, energy, &config);
    assert!(!check(dec!(50), dec!(5)));
    assert!(!check(dec!(90), dec!(5)));
    assert!(!check(dec!(50), dec!(9)));
    assert!(check(dec!(90), dec!(9)));

    assert!(!suicide_risk_alert(dec!(4.9)));
    assert!(suicide_risk_alert(dec!(5.0)));
}

#[test]
fn test_stats_helpers() {
    assert_eq!(SeriesStats::from_values(&[]), SeriesStats::default());
    assert_eq!(trend(&[dec!(1), dec!(2), dec!(3)]), dec!(0));
    let values = [dec!(1), dec!(1), dec!(1), dec!(5), dec!(5), dec!(5)];
    assert_eq!(trend(&values), dec!(4));
}

#[test]
fn test_csv_import_feeds_calculators() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("sessions.csv");

    let mut csv = String::from("date,duration_min,rpe\n");
    for day in 1..=10 {
        csv.push_str(&format!("2024-06-{:02},60,5\n", day));
    }
    fs::write(&path, csv).unwrap();

    let sessions = import_sessions(&path).unwrap();
    assert_eq!(sessions.len(), 10);

    let metrics = WorkloadCalculator::new()
        .assess_sessions(&sessions)
        .metrics()
        .cloned()
        .unwrap();
    assert_eq!(metrics.atl, dec!(300));
    assert_eq!(metrics.tsb_status, TsbStatus::Normal);

    let as_of = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap();
    assert_eq!(weekly_volume(&sessions, Some(as_of)), dec!(2100));
    assert_eq!(LoadSummary::from_sessions(&sessions, Some(as_of)).monotony, dec!(0));

    let point = PmcCalculator::new().latest_point(&sessions, Some(as_of)).unwrap();
    assert_eq!(point.atl, dec!(300));
}

#[test]
fn test_config_drives_calculator() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(
        &path,
        "[workload]\nacute_window = 3\nchronic_window = 6\nmin_sessions = 3\n",
    )
    .unwrap();

    let (config, problem) = AppConfig::load_or_default(Some(&path));
    assert!(problem.is_none());
    let calculator = WorkloadCalculator::with_config(config.workload);

    let sessions = daily_sessions(&[(60, 5); 3]);
    assert!(!calculator.assess_sessions(&sessions).is_insufficient());
}
