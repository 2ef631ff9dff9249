use chrono::{Days, NaiveDate};
use rust_decimal::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

use crate::error::{CalculationError, Result};
use crate::models::DailySession;
use crate::workload::TsbStatus;

/// Daily load total with the sessions that contributed to it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyLoad {
    /// Date of the training day
    pub date: NaiveDate,

    /// Total session load for the day (sum of all sessions)
    pub total_load: Decimal,

    /// Number of sessions logged on this day
    pub session_count: u16,
}

/// Performance model values for a single calendar day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PmcPoint {
    pub date: NaiveDate,

    /// Load used in the calculation, zero on rest days
    pub daily_load: Decimal,

    /// Acute Training Load (7-day exponentially weighted average)
    pub atl: Decimal,

    /// Chronic Training Load (42-day exponentially weighted average)
    pub ctl: Decimal,

    /// Training Stress Balance (CTL - ATL)
    pub tsb: Decimal,

    pub tsb_status: TsbStatus,
}

/// Time constants for the exponentially weighted loads
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PmcConfig {
    /// ATL time constant in days (default: 7)
    pub atl_time_constant: u16,

    /// CTL time constant in days (default: 42)
    pub ctl_time_constant: u16,
}

impl Default for PmcConfig {
    fn default() -> Self {
        PmcConfig {
            atl_time_constant: 7,
            ctl_time_constant: 42,
        }
    }
}

/// Smoothing factor for a time constant: `1 - e^(-1/T)`
pub fn smoothing_factor(time_constant: u16) -> Decimal {
    if time_constant == 0 {
        return Decimal::ONE;
    }
    let alpha = 1.0 - (-1.0 / f64::from(time_constant)).exp();
    Decimal::from_f64(alpha).unwrap_or(Decimal::ONE)
}

/// Exponential moving average seeded with the first value
pub fn exponential_moving_average(values: &[Decimal], alpha: Decimal) -> Vec<Decimal> {
    let mut averages = Vec::with_capacity(values.len());
    let mut current = match values.first() {
        Some(first) => *first,
        None => return averages,
    };

    for value in values {
        current = current.saturating_add(value.saturating_sub(current).saturating_mul(alpha));
        averages.push(current);
    }

    averages
}

/// Banister performance model over daily session loads
pub struct PmcCalculator {
    config: PmcConfig,
}

impl PmcCalculator {
    pub fn new() -> Self {
        PmcCalculator {
            config: PmcConfig::default(),
        }
    }

    pub fn with_config(config: PmcConfig) -> Self {
        PmcCalculator { config }
    }

    /// Sum session loads per calendar day
    pub fn aggregate_daily_load(&self, sessions: &[DailySession]) -> BTreeMap<NaiveDate, DailyLoad> {
        let mut daily: BTreeMap<NaiveDate, DailyLoad> = BTreeMap::new();

        for session in sessions {
            let load = session.effective_load();

            daily
                .entry(session.date)
                .and_modify(|day| {
                    day.total_load = day.total_load.saturating_add(load);
                    day.session_count += 1;
                })
                .or_insert(DailyLoad {
                    date: session.date,
                    total_load: load,
                    session_count: 1,
                });
        }

        daily
    }

    /// Calculate ATL, CTL and TSB for every calendar day in `[start, end]`
    ///
    /// Rest days contribute a load of zero. Both averages are seeded with the
    /// load on `start`.
    pub fn calculate_series(
        &self,
        daily: &BTreeMap<NaiveDate, DailyLoad>,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<PmcPoint>> {
        if start > end {
            return Err(CalculationError::InvalidParameter {
                calculation: "performance model".to_string(),
                parameter: "start".to_string(),
                value: format!("{} is after {}", start, end),
            }
            .into());
        }

        if daily.is_empty() {
            return Err(CalculationError::InsufficientData {
                calculation: "performance model".to_string(),
                reason: "no sessions logged".to_string(),
            }
            .into());
        }

        let dates: Vec<NaiveDate> = start.iter_days().take_while(|d| *d <= end).collect();
        let loads: Vec<Decimal> = dates
            .iter()
            .map(|d| daily.get(d).map(|day| day.total_load).unwrap_or(Decimal::ZERO))
            .collect();

        let atl = exponential_moving_average(
            &loads,
            smoothing_factor(self.config.atl_time_constant),
        );
        let ctl = exponential_moving_average(
            &loads,
            smoothing_factor(self.config.ctl_time_constant),
        );

        debug!(days = dates.len(), %start, %end, "Calculated performance model series");

        Ok(dates
            .into_iter()
            .enumerate()
            .map(|(i, date)| {
                let tsb = ctl[i].saturating_sub(atl[i]);
                PmcPoint {
                    date,
                    daily_load: loads[i],
                    atl: atl[i],
                    ctl: ctl[i],
                    tsb,
                    tsb_status: TsbStatus::from_tsb(tsb),
                }
            })
            .collect())
    }

    /// Model values on `as_of` (today when `None`), starting from the first session
    pub fn latest_point(
        &self,
        sessions: &[DailySession],
        as_of: Option<NaiveDate>,
    ) -> Result<PmcPoint> {
        let daily = self.aggregate_daily_load(sessions);
        let end = as_of.unwrap_or_else(|| chrono::Utc::now().date_naive());
        let start = daily.keys().next().copied().unwrap_or(end).min(end);

        self.calculate_series(&daily, start, end)?
            .pop()
            .ok_or_else(|| {
                CalculationError::InsufficientData {
                    calculation: "performance model".to_string(),
                    reason: "empty date range".to_string(),
                }
                .into()
            })
    }

    /// Series over the trailing `days` days ending at `end`
    pub fn trailing_series(
        &self,
        sessions: &[DailySession],
        end: NaiveDate,
        days: u64,
    ) -> Result<Vec<PmcPoint>> {
        let start = end
            .checked_sub_days(Days::new(days.saturating_sub(1)))
            .unwrap_or(end);
        self.calculate_series(&self.aggregate_daily_load(sessions), start, end)
    }
}

impl Default for PmcCalculator {
    fn default() -> Self {
        Self::new()
    }
}
