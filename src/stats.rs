//! Descriptive statistics over metric series
//!
//! Backs the dashboard summaries and is shared by the load calculators.
//! Empty input is never an error: every statistic falls back to zero.
//! Results that do not fit in a `Decimal` saturate at `Decimal::MAX` or
//! `Decimal::MIN` instead of panicking.

use rust_decimal::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Minimum series length before a trend is reported
pub const MIN_TREND_VALUES: usize = 6;

/// Number of values averaged at each end of the series for the trend
const TREND_EDGE: usize = 3;

/// Summary statistics for a metric series
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SeriesStats {
    pub avg: Decimal,
    pub min: Decimal,
    pub max: Decimal,
    /// Population standard deviation (divides by N)
    pub std: Decimal,
}

impl SeriesStats {
    /// Compute avg/min/max/std; an empty series yields all zeros
    pub fn from_values(values: &[Decimal]) -> Self {
        if values.is_empty() {
            return SeriesStats::default();
        }

        SeriesStats {
            avg: mean(values),
            min: values.iter().copied().min().unwrap_or(Decimal::ZERO),
            max: values.iter().copied().max().unwrap_or(Decimal::ZERO),
            std: population_std_dev(values),
        }
    }
}

/// Division that is zero for a zero denominator and saturates on overflow
pub fn saturating_div(numerator: Decimal, denominator: Decimal) -> Decimal {
    if denominator.is_zero() {
        return Decimal::ZERO;
    }
    numerator.checked_div(denominator).unwrap_or_else(|| {
        if numerator.is_sign_negative() == denominator.is_sign_negative() {
            Decimal::MAX
        } else {
            Decimal::MIN
        }
    })
}

/// Arithmetic mean, zero for an empty slice
pub fn mean(values: &[Decimal]) -> Decimal {
    if values.is_empty() {
        return Decimal::ZERO;
    }
    let n = Decimal::from(values.len());

    match values.iter().try_fold(Decimal::ZERO, |acc, v| acc.checked_add(*v)) {
        Some(sum) => sum / n,
        // The running sum left the Decimal range; average the scaled terms
        None => values
            .iter()
            .fold(Decimal::ZERO, |acc, v| acc.saturating_add(*v / n)),
    }
}

/// Population standard deviation, zero for an empty slice
pub fn population_std_dev(values: &[Decimal]) -> Decimal {
    if values.is_empty() {
        return Decimal::ZERO;
    }

    let avg = mean(values);
    let squared_diffs = values.iter().try_fold(Decimal::ZERO, |acc, v| {
        let diff = v.checked_sub(avg)?;
        acc.checked_add(diff.checked_mul(diff)?)
    });

    let variance = match squared_diffs {
        Some(sum) => sum / Decimal::from(values.len()),
        None => return wide_std_dev(values),
    };

    if variance.is_zero() {
        return Decimal::ZERO;
    }

    Decimal::from_f64(variance.to_f64().unwrap_or(0.0).sqrt()).unwrap_or_default()
}

/// Standard deviation in `f64` for series whose squared deviations overflow
fn wide_std_dev(values: &[Decimal]) -> Decimal {
    use statrs::statistics::Statistics;

    let std_dev = values
        .iter()
        .map(|v| v.to_f64().unwrap_or(0.0))
        .population_std_dev();
    Decimal::from_f64(std_dev).unwrap_or(Decimal::MAX)
}

/// Recent-versus-early trend of a series
///
/// Mean of the last three values minus the mean of the first three, so a
/// positive result means recent values are higher. Series shorter than
/// [`MIN_TREND_VALUES`] return zero.
pub fn trend(values: &[Decimal]) -> Decimal {
    if values.len() < MIN_TREND_VALUES {
        return Decimal::ZERO;
    }

    let first = mean(&values[..TREND_EDGE]);
    let last = mean(&values[values.len() - TREND_EDGE..]);
    last.saturating_sub(first)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_empty_stats_are_zero() {
        let stats = SeriesStats::from_values(&[]);
        assert_eq!(stats.avg, dec!(0));
        assert_eq!(stats.min, dec!(0));
        assert_eq!(stats.max, dec!(0));
        assert_eq!(stats.std, dec!(0));
    }

    #[test]
    fn test_population_std_dev() {
        // Classic example: population std of this set is exactly 2
        let values = [
            dec!(2),
            dec!(4),
            dec!(4),
            dec!(4),
            dec!(5),
            dec!(5),
            dec!(7),
            dec!(9),
        ];
        let stats = SeriesStats::from_values(&values);
        assert_eq!(stats.avg, dec!(5));
        assert_eq!(stats.min, dec!(2));
        assert_eq!(stats.max, dec!(9));
        assert_eq!(stats.std, dec!(2));
    }

    #[test]
    fn test_std_divides_by_n() {
        // Sample std of [1, 3] would be ~1.414; population std is 1
        let stats = SeriesStats::from_values(&[dec!(1), dec!(3)]);
        assert_eq!(stats.std, dec!(1));
    }

    #[test]
    fn test_constant_series_has_zero_std() {
        let stats = SeriesStats::from_values(&[dec!(7.5); 5]);
        assert_eq!(stats.std, Decimal::ZERO);
        assert_eq!(stats.avg, dec!(7.5));
    }

    #[test]
    fn test_saturating_div() {
        assert_eq!(saturating_div(dec!(9), dec!(3)), dec!(3));
        assert_eq!(saturating_div(dec!(9), dec!(0)), dec!(0));
        assert_eq!(saturating_div(dec!(9), Decimal::new(1, 28)), Decimal::MAX);
        assert_eq!(saturating_div(dec!(9), Decimal::new(-1, 28)), Decimal::MIN);
    }

    #[test]
    fn test_mean_survives_sum_overflow() {
        let half = Decimal::MAX / dec!(2);
        let avg = mean(&[half; 7]);
        assert!((avg - half).abs() < dec!(5));

        assert!(mean(&[Decimal::MAX, Decimal::MAX]) >= Decimal::MAX - dec!(1));
    }

    #[test]
    fn test_std_dev_survives_square_overflow() {
        let std = population_std_dev(&[Decimal::MIN, Decimal::MAX]);
        assert!(std > dec!(70000000000000000000000000000));
    }

    #[test]
    fn test_trend_saturates() {
        let mut values = vec![Decimal::MIN; 3];
        values.extend([Decimal::MAX; 3]);
        assert_eq!(trend(&values), Decimal::MAX);
    }

    #[test]
    fn test_trend_direction() {
        let rising = [dec!(1), dec!(1), dec!(1), dec!(5), dec!(5), dec!(5)];
        assert_eq!(trend(&rising), dec!(4));

        let falling = [dec!(5), dec!(5), dec!(5), dec!(1), dec!(1), dec!(1)];
        assert_eq!(trend(&falling), dec!(-4));
    }

    #[test]
    fn test_trend_requires_six_values() {
        assert_eq!(trend(&[]), Decimal::ZERO);
        assert_eq!(
            trend(&[dec!(1), dec!(2), dec!(3), dec!(4), dec!(5)]),
            Decimal::ZERO
        );
    }

    #[test]
    fn test_trend_ignores_middle_values() {
        let values = [
            dec!(2),
            dec!(2),
            dec!(2),
            dec!(100),
            dec!(-100),
            dec!(3),
            dec!(3),
            dec!(3),
        ];
        assert_eq!(trend(&values), dec!(1));
    }
}
