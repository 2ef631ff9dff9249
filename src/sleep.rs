//! Sleep duration and efficiency
//!
//! Bedtime and wake time are times of day without a date. Both are placed
//! on a common reference day; when the wake time is not strictly after the
//! bedtime it is taken to fall on the following day, so a night that
//! crosses midnight is measured correctly and identical times mean a full
//! 24 hours.

use chrono::{NaiveTime, Timelike};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::{InputError, Result};
use crate::models::SleepTimes;
use crate::risk::DisplayColor;
use crate::stats;

const SECONDS_PER_HOUR: Decimal = dec!(3600);
const SECONDS_PER_DAY: i64 = 24 * 60 * 60;

/// Parse an `HH:MM` (or `HH:MM:SS`) time of day
pub fn parse_time_of_day(value: &str) -> Result<NaiveTime> {
    let trimmed = value.trim();
    NaiveTime::parse_from_str(trimmed, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(trimmed, "%H:%M:%S"))
        .map_err(|_| {
            InputError::invalid("time_of_day", format!("'{}' is not a valid HH:MM time", value))
                .into()
        })
}

/// Hours slept between `bedtime` and `wake_time`
pub fn sleep_duration(bedtime: NaiveTime, wake_time: NaiveTime) -> Decimal {
    let bed = i64::from(bedtime.num_seconds_from_midnight());
    let mut wake = i64::from(wake_time.num_seconds_from_midnight());

    // Not strictly after bedtime: the wake time belongs to the next day
    if wake <= bed {
        wake += SECONDS_PER_DAY;
    }

    Decimal::from(wake - bed) / SECONDS_PER_HOUR
}

/// [`sleep_duration`] over `HH:MM` strings
pub fn sleep_duration_str(bedtime: &str, wake_time: &str) -> Result<Decimal> {
    Ok(sleep_duration(
        parse_time_of_day(bedtime)?,
        parse_time_of_day(wake_time)?,
    ))
}

/// Sleep efficiency as a percentage of time in bed
///
/// Returns zero when `time_in_bed` is zero. Not clamped: a duration longer
/// than the time in bed yields a value above 100, and a ratio outside the
/// `Decimal` range saturates.
pub fn sleep_efficiency(sleep_duration: Decimal, time_in_bed: Decimal) -> Decimal {
    stats::saturating_div(dec!(100).saturating_mul(sleep_duration), time_in_bed)
}

impl SleepTimes {
    pub fn parse(bedtime: &str, wake_time: &str) -> Result<Self> {
        Ok(SleepTimes {
            bedtime: parse_time_of_day(bedtime)?,
            wake_time: parse_time_of_day(wake_time)?,
        })
    }

    /// Hours slept
    pub fn duration(&self) -> Decimal {
        sleep_duration(self.bedtime, self.wake_time)
    }
}

/// Sleep duration band shown on the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SleepDurationBand {
    /// 7 hours or more
    Good,
    /// 6 to under 7 hours
    Fair,
    /// Under 6 hours
    Short,
}

impl SleepDurationBand {
    pub fn from_hours(hours: Decimal) -> Self {
        if hours >= dec!(7) {
            SleepDurationBand::Good
        } else if hours >= dec!(6) {
            SleepDurationBand::Fair
        } else {
            SleepDurationBand::Short
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SleepDurationBand::Good => "good",
            SleepDurationBand::Fair => "fair",
            SleepDurationBand::Short => "short",
        }
    }

    pub fn color(&self) -> DisplayColor {
        match self {
            SleepDurationBand::Good => DisplayColor::Green,
            SleepDurationBand::Fair => DisplayColor::Yellow,
            SleepDurationBand::Short => DisplayColor::Red,
        }
    }
}
