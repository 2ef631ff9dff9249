//! Session-RPE training load calculations
//!
//! Internal load follows Foster's session-RPE method: duration in minutes
//! multiplied by the rating of perceived exertion, expressed in arbitrary
//! units (AU). Weekly aggregates (volume, monotony, strain) are built on
//! top of it.

use chrono::{Days, NaiveDate, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::models::{DailySession, Exercise};
use crate::stats;

/// Reference TRIMP for a maximal session when scaling to a TSS-like value
pub const DEFAULT_TRIMP_MAX: Decimal = dec!(600);

/// Monotony above this value flags an injury risk
pub const MONOTONY_THRESHOLD: Decimal = dec!(2.0);

/// TSB below this value flags an injury risk
pub const TSB_FATIGUE_THRESHOLD: Decimal = dec!(-30);

/// Days in the trailing volume window, including the reference day
const WEEK_DAYS: u64 = 7;

/// Internal load (duration × RPE) in arbitrary units
///
/// No bounds checking: negative or out-of-scale inputs pass straight
/// through. A product beyond the `Decimal` range saturates.
pub fn internal_load(duration_minutes: Decimal, rpe: Decimal) -> Decimal {
    duration_minutes.saturating_mul(rpe)
}

/// Work density in kg per minute, zero when the session has no duration
pub fn training_density(tonnage: Decimal, duration_minutes: Decimal) -> Decimal {
    stats::saturating_div(tonnage, duration_minutes)
}

/// Total tonnage lifted (sets × reps × kg summed over exercises)
pub fn total_tonnage(exercises: &[Exercise]) -> Decimal {
    exercises
        .iter()
        .map(|e| (Decimal::from(e.sets) * Decimal::from(e.reps)).saturating_mul(e.load_kg))
        .fold(Decimal::ZERO, Decimal::saturating_add)
}

/// Sum of session loads over the seven calendar days ending at `as_of`
///
/// The window is `as_of - 6 days ..= as_of`. Sessions outside it, including
/// any dated after `as_of`, are excluded entirely. `None` means today (UTC).
pub fn weekly_volume(sessions: &[DailySession], as_of: Option<NaiveDate>) -> Decimal {
    let end = as_of.unwrap_or_else(|| Utc::now().date_naive());
    let start = week_start(end);

    sessions
        .iter()
        .filter(|s| s.date >= start && s.date <= end)
        .map(|s| s.effective_load())
        .fold(Decimal::ZERO, Decimal::saturating_add)
}

/// Training monotony: mean daily load divided by its population std dev
///
/// Zero when there are no loads or when every load is identical.
pub fn monotony(daily_loads: &[Decimal]) -> Decimal {
    if daily_loads.is_empty() {
        return Decimal::ZERO;
    }

    let std_dev = stats::population_std_dev(daily_loads);
    if std_dev.is_zero() {
        return Decimal::ZERO;
    }
    stats::saturating_div(stats::mean(daily_loads), std_dev)
}

/// Training strain: weekly load multiplied by monotony
pub fn strain(weekly_load: Decimal, monotony: Decimal) -> Decimal {
    weekly_load.saturating_mul(monotony)
}

/// Injury risk from monotonous loading or deep accumulated fatigue
pub fn injury_risk(monotony: Decimal, tsb: Decimal) -> bool {
    monotony > MONOTONY_THRESHOLD || tsb < TSB_FATIGUE_THRESHOLD
}

/// Scale a TRIMP (session RPE load) to a TSS-like 0-100 value
pub fn tss_from_trimp(trimp: Decimal, trimp_max: Decimal) -> Decimal {
    stats::saturating_div(trimp, trimp_max).saturating_mul(dec!(100))
}

fn week_start(end: NaiveDate) -> NaiveDate {
    end.checked_sub_days(Days::new(WEEK_DAYS - 1)).unwrap_or(end)
}

/// Weekly load picture for one athlete
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadSummary {
    pub as_of: NaiveDate,
    pub weekly_volume: Decimal,
    /// Daily totals for each of the seven days, rest days included as zero
    pub daily_loads: Vec<Decimal>,
    pub monotony: Decimal,
    pub strain: Decimal,
}

impl LoadSummary {
    /// Build the weekly summary ending at `as_of` (today when `None`)
    pub fn from_sessions(sessions: &[DailySession], as_of: Option<NaiveDate>) -> Self {
        let end = as_of.unwrap_or_else(|| Utc::now().date_naive());
        let start = week_start(end);

        let mut per_day: BTreeMap<NaiveDate, Decimal> = start
            .iter_days()
            .take_while(|d| *d <= end)
            .map(|d| (d, Decimal::ZERO))
            .collect();

        for session in sessions {
            if let Some(total) = per_day.get_mut(&session.date) {
                *total = total.saturating_add(session.effective_load());
            }
        }

        let daily_loads: Vec<Decimal> = per_day.into_values().collect();
        let weekly_volume = daily_loads
            .iter()
            .fold(Decimal::ZERO, |acc, load| acc.saturating_add(*load));
        let monotony = monotony(&daily_loads);

        LoadSummary {
            as_of: end,
            weekly_volume,
            strain: strain(weekly_volume, monotony),
            daily_loads,
            monotony,
        }
    }

    /// Injury flag for this week given the current training stress balance
    pub fn injury_risk(&self, tsb: Decimal) -> bool {
        injury_risk(self.monotony, tsb)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 9, day).unwrap()
    }

    #[test]
    fn test_internal_load_passes_values_through() {
        assert_eq!(internal_load(dec!(60), dec!(5)), dec!(300));
        assert_eq!(internal_load(dec!(0), dec!(8)), dec!(0));
        assert_eq!(internal_load(dec!(45), dec!(0)), dec!(0));
        assert_eq!(internal_load(dec!(-10), dec!(5)), dec!(-50));
    }

    #[test]
    fn test_training_density() {
        assert_eq!(training_density(dec!(5000), dec!(50)), dec!(100));
        assert_eq!(training_density(dec!(5000), dec!(0)), dec!(0));
    }

    #[test]
    fn test_internal_load_saturates() {
        assert_eq!(internal_load(Decimal::MAX, dec!(2)), Decimal::MAX);
        assert_eq!(internal_load(Decimal::MAX, dec!(-2)), Decimal::MIN);
    }

    #[test]
    fn test_training_density_saturates() {
        assert_eq!(training_density(dec!(5000), Decimal::new(1, 28)), Decimal::MAX);
        assert_eq!(training_density(dec!(-5000), Decimal::new(1, 28)), Decimal::MIN);
    }

    #[test]
    fn test_total_tonnage() {
        let exercises = [
            Exercise {
                sets: 3,
                reps: 10,
                load_kg: dec!(100),
            },
            Exercise {
                sets: 4,
                reps: 5,
                load_kg: dec!(62.5),
            },
        ];
        assert_eq!(total_tonnage(&exercises), dec!(4250));
        assert_eq!(total_tonnage(&[]), dec!(0));
    }

    #[test]
    fn test_weekly_volume_window() {
        let sessions = vec![
            DailySession::new(date(1), 60, 5),  // 8 days before the 9th, excluded
            DailySession::new(date(3), 60, 5),  // first day of the window
            DailySession::new(date(9), 30, 4),  // reference day
            DailySession::new(date(10), 90, 9), // after reference day, excluded
        ];
        assert_eq!(weekly_volume(&sessions, Some(date(9))), dec!(420));
    }

    #[test]
    fn test_weekly_volume_uses_stored_session_load() {
        let sessions = vec![DailySession {
            session_load: Some(dec!(250)),
            ..DailySession::new(date(5), 60, 5)
        }];
        assert_eq!(weekly_volume(&sessions, Some(date(5))), dec!(250));
    }

    #[test]
    fn test_monotony() {
        assert_eq!(monotony(&[]), dec!(0));
        assert_eq!(monotony(&[dec!(300); 7]), dec!(0));
        // mean 5, population std 2
        let loads = [
            dec!(2),
            dec!(4),
            dec!(4),
            dec!(4),
            dec!(5),
            dec!(5),
            dec!(7),
            dec!(9),
        ];
        assert_eq!(monotony(&loads), dec!(2.5));
    }

    #[test]
    fn test_strain_and_injury_risk() {
        assert_eq!(strain(dec!(2000), dec!(1.5)), dec!(3000));

        assert!(!injury_risk(dec!(2.0), dec!(-30)));
        assert!(injury_risk(dec!(2.01), dec!(0)));
        assert!(injury_risk(dec!(1.0), dec!(-30.5)));
    }

    #[test]
    fn test_tss_from_trimp() {
        assert_eq!(tss_from_trimp(dec!(300), DEFAULT_TRIMP_MAX), dec!(50));
        assert_eq!(tss_from_trimp(dec!(300), dec!(0)), dec!(0));
    }

    #[test]
    fn test_load_summary_includes_rest_days() {
        let sessions = vec![
            DailySession::new(date(8), 60, 5),
            DailySession::new(date(8), 30, 2),
            DailySession::new(date(14), 60, 5),
        ];
        let summary = LoadSummary::from_sessions(&sessions, Some(date(14)));

        assert_eq!(summary.daily_loads.len(), 7);
        assert_eq!(summary.daily_loads[0], dec!(360));
        assert_eq!(summary.daily_loads[6], dec!(300));
        assert_eq!(summary.weekly_volume, dec!(660));
        assert!(summary.monotony > dec!(0));
        assert_eq!(summary.strain, summary.weekly_volume * summary.monotony);
    }
}
