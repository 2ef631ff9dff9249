//! Acute:Chronic Workload Ratio (ACWR) and Training Stress Balance (TSB)
//!
//! Loads are windowed by session occurrence, not by calendar day: the acute
//! load is the mean of the last 7 sessions and the chronic load the mean of
//! the last 28, each clipped to however many sessions exist.
//!
//! - **ACWR** = ATL / CTL, defined as 0 when there is no chronic baseline
//! - **TSB** = CTL - ATL, positive when recovered and negative when fatigued
//!
//! Fewer than `min_sessions` sessions is reported as
//! [`WorkloadAssessment::InsufficientData`], never as a misleading zero.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

use crate::models::{load_series, DailySession};
use crate::risk::DisplayColor;
use crate::stats;

/// Window sizes for the workload ratio engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkloadConfig {
    /// Sessions averaged for the acute load (default: 7)
    pub acute_window: usize,

    /// Sessions averaged for the chronic load (default: 28)
    pub chronic_window: usize,

    /// Sessions required before any ratio is reported (default: 7)
    pub min_sessions: usize,
}

impl Default for WorkloadConfig {
    fn default() -> Self {
        WorkloadConfig {
            acute_window: 7,
            chronic_window: 28,
            min_sessions: 7,
        }
    }
}

/// ACWR interpretation bands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AcwrZone {
    /// Below 0.8
    Undertraining,
    /// 0.8 to 1.3 inclusive
    IdealZone,
    /// Above 1.3 up to 1.5 inclusive
    Caution,
    /// Above 1.5
    HighInjuryRisk,
}

impl AcwrZone {
    pub fn from_ratio(acwr: Decimal) -> Self {
        if acwr < dec!(0.8) {
            AcwrZone::Undertraining
        } else if acwr <= dec!(1.3) {
            AcwrZone::IdealZone
        } else if acwr <= dec!(1.5) {
            AcwrZone::Caution
        } else {
            AcwrZone::HighInjuryRisk
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AcwrZone::Undertraining => "undertraining",
            AcwrZone::IdealZone => "ideal zone",
            AcwrZone::Caution => "caution",
            AcwrZone::HighInjuryRisk => "high injury risk",
        }
    }

    pub fn color(&self) -> DisplayColor {
        match self {
            AcwrZone::Undertraining => DisplayColor::Blue,
            AcwrZone::IdealZone => DisplayColor::Green,
            AcwrZone::Caution => DisplayColor::Yellow,
            AcwrZone::HighInjuryRisk => DisplayColor::Red,
        }
    }

    pub fn recommendation(&self) -> &'static str {
        match self {
            AcwrZone::Undertraining => {
                "Training load is low relative to your baseline. Build volume gradually."
            }
            AcwrZone::IdealZone => "Training load is in the ideal zone. Keep progressing steadily.",
            AcwrZone::Caution => {
                "Training load is climbing quickly. Monitor fatigue and soreness closely."
            }
            AcwrZone::HighInjuryRisk => {
                "Load spike detected. Reduce volume or intensity to limit injury risk."
            }
        }
    }
}

impl fmt::Display for AcwrZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// TSB interpretation bands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TsbStatus {
    /// Above 0
    Recovered,
    /// -30 to 0 inclusive
    Normal,
    /// Below -30
    ElevatedFatigue,
}

impl TsbStatus {
    pub fn from_tsb(tsb: Decimal) -> Self {
        if tsb > Decimal::ZERO {
            TsbStatus::Recovered
        } else if tsb >= dec!(-30) {
            TsbStatus::Normal
        } else {
            TsbStatus::ElevatedFatigue
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TsbStatus::Recovered => "recovered",
            TsbStatus::Normal => "normal",
            TsbStatus::ElevatedFatigue => "elevated fatigue",
        }
    }

    pub fn color(&self) -> DisplayColor {
        match self {
            TsbStatus::Recovered => DisplayColor::Green,
            TsbStatus::Normal => DisplayColor::Blue,
            TsbStatus::ElevatedFatigue => DisplayColor::Red,
        }
    }
}

impl fmt::Display for TsbStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Workload metrics evaluated at one session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkloadMetrics {
    /// Acute training load (mean of the acute window)
    pub atl: Decimal,

    /// Chronic training load (mean of the chronic window)
    pub ctl: Decimal,

    /// Acute:chronic workload ratio
    pub acwr: Decimal,

    /// Training stress balance (CTL - ATL)
    pub tsb: Decimal,

    pub acwr_zone: AcwrZone,
    pub tsb_status: TsbStatus,
}

/// Outcome of a workload evaluation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum WorkloadAssessment {
    #[serde(rename = "ok")]
    Available(WorkloadMetrics),
    InsufficientData { available: usize, required: usize },
}

impl WorkloadAssessment {
    pub fn metrics(&self) -> Option<&WorkloadMetrics> {
        match self {
            WorkloadAssessment::Available(metrics) => Some(metrics),
            WorkloadAssessment::InsufficientData { .. } => None,
        }
    }

    pub fn is_insufficient(&self) -> bool {
        matches!(self, WorkloadAssessment::InsufficientData { .. })
    }
}

/// Workload metrics for one session in a series
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkloadPoint {
    pub date: NaiveDate,
    /// This session's own load
    pub load: Decimal,
    /// Metrics using history up to and including this session
    pub metrics: WorkloadMetrics,
}

/// Outcome of a workload series evaluation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum WorkloadSeries {
    #[serde(rename = "ok")]
    Available { points: Vec<WorkloadPoint> },
    InsufficientData { available: usize, required: usize },
}

impl WorkloadSeries {
    pub fn points(&self) -> &[WorkloadPoint] {
        match self {
            WorkloadSeries::Available { points } => points,
            WorkloadSeries::InsufficientData { .. } => &[],
        }
    }

    /// Metrics at the most recent session
    pub fn latest(&self) -> Option<&WorkloadPoint> {
        self.points().last()
    }
}

/// Acute:chronic ratio, zero when there is no chronic baseline
///
/// Saturates when the ratio does not fit in a `Decimal`.
pub fn acwr(atl: Decimal, ctl: Decimal) -> Decimal {
    stats::saturating_div(atl, ctl)
}

/// Training stress balance: chronic minus acute
pub fn tsb(ctl: Decimal, atl: Decimal) -> Decimal {
    ctl.saturating_sub(atl)
}

/// Stateless workload ratio engine
#[derive(Debug, Clone, Default)]
pub struct WorkloadCalculator {
    config: WorkloadConfig,
}

impl WorkloadCalculator {
    pub fn new() -> Self {
        WorkloadCalculator {
            config: WorkloadConfig::default(),
        }
    }

    pub fn with_config(config: WorkloadConfig) -> Self {
        WorkloadCalculator { config }
    }

    pub fn config(&self) -> &WorkloadConfig {
        &self.config
    }

    /// Mean of the last `acute_window` loads
    pub fn acute_load(&self, loads: &[Decimal]) -> Decimal {
        trailing_mean(loads, self.config.acute_window)
    }

    /// Mean of the last `chronic_window` loads
    pub fn chronic_load(&self, loads: &[Decimal]) -> Decimal {
        trailing_mean(loads, self.config.chronic_window)
    }

    /// Metrics at the last load, without the minimum-history gate
    pub fn metrics_at(&self, loads: &[Decimal]) -> WorkloadMetrics {
        let atl = self.acute_load(loads);
        let ctl = self.chronic_load(loads);
        let ratio = acwr(atl, ctl);
        let balance = tsb(ctl, atl);

        WorkloadMetrics {
            atl,
            ctl,
            acwr: ratio,
            tsb: balance,
            acwr_zone: AcwrZone::from_ratio(ratio),
            tsb_status: TsbStatus::from_tsb(balance),
        }
    }

    /// Evaluate a load series as of its last session
    pub fn assess(&self, loads: &[Decimal]) -> WorkloadAssessment {
        let required = self.config.min_sessions;
        if loads.len() < required {
            debug!(
                available = loads.len(),
                required, "Not enough sessions for workload ratio"
            );
            return WorkloadAssessment::InsufficientData {
                available: loads.len(),
                required,
            };
        }

        WorkloadAssessment::Available(self.metrics_at(loads))
    }

    /// Evaluate sessions (in any order) as of the most recent one
    pub fn assess_sessions(&self, sessions: &[DailySession]) -> WorkloadAssessment {
        self.assess(&load_series(sessions))
    }

    /// Rolling metrics for every session from the `min_sessions`-th onwards
    pub fn series(&self, sessions: &[DailySession]) -> WorkloadSeries {
        let required = self.config.min_sessions;
        if sessions.len() < required {
            debug!(
                available = sessions.len(),
                required, "Not enough sessions for workload series"
            );
            return WorkloadSeries::InsufficientData {
                available: sessions.len(),
                required,
            };
        }

        let mut ordered: Vec<&DailySession> = sessions.iter().collect();
        ordered.sort_by_key(|s| s.date);
        let loads: Vec<Decimal> = ordered.iter().map(|s| s.effective_load()).collect();

        let first = required.max(1) - 1;
        let points = ordered
            .iter()
            .enumerate()
            .skip(first)
            .map(|(idx, session)| WorkloadPoint {
                date: session.date,
                load: loads[idx],
                metrics: self.metrics_at(&loads[..=idx]),
            })
            .collect();

        WorkloadSeries::Available { points }
    }
}

fn trailing_mean(loads: &[Decimal], window: usize) -> Decimal {
    let start = loads.len().saturating_sub(window);
    stats::mean(&loads[start..])
}
