//! Clinical and physical risk classification
//!
//! Every classifier here is a pure lookup over scalar readings with fixed,
//! contractual thresholds. Results carry a [`DisplayColor`] hint for the
//! presentation layer; they never describe how to render anything.
//!
//! # Mania risk and stress scales
//!
//! Stress arrives on two different scales: the app-computed stress score
//! (0-100) and the self-reported mental stress (0-10). Rather than hard-code
//! one assumption, [`ManiaRiskConfig`] names a single threshold together with
//! the scale it is expressed on, and every reading passed to [`mania_risk`]
//! declares its own scale so it can be rescaled before comparison.

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::WellnessEntry;
use crate::stats;

/// Suicide-risk readings at or above this value raise an alert
pub const SUICIDE_ALERT_THRESHOLD: Decimal = dec!(5);

const SCALE_MAX: Decimal = dec!(10);

/// Display hint attached to classification results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayColor {
    Green,
    Yellow,
    Orange,
    Red,
    Blue,
}

impl fmt::Display for DisplayColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisplayColor::Green => write!(f, "green"),
            DisplayColor::Yellow => write!(f, "yellow"),
            DisplayColor::Orange => write!(f, "orange"),
            DisplayColor::Red => write!(f, "red"),
            DisplayColor::Blue => write!(f, "blue"),
        }
    }
}

/// Numeric scale a score is reported on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreScale {
    ZeroToTen,
    ZeroToHundred,
}

impl ScoreScale {
    pub fn max(&self) -> Decimal {
        match self {
            ScoreScale::ZeroToTen => dec!(10),
            ScoreScale::ZeroToHundred => dec!(100),
        }
    }

    /// Express `value` (on this scale) on the `to` scale
    pub fn rescale(&self, value: Decimal, to: ScoreScale) -> Decimal {
        if *self == to {
            return value;
        }
        value * to.max() / self.max()
    }
}

/// Threshold-and-scale pair for the mania-risk flag
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManiaRiskConfig {
    /// Scale `stress_threshold` is expressed on
    pub stress_scale: ScoreScale,

    /// Stress must be strictly above this value
    pub stress_threshold: Decimal,

    /// Energy (0-10) must be strictly above this value
    pub energy_threshold: Decimal,
}

impl Default for ManiaRiskConfig {
    fn default() -> Self {
        ManiaRiskConfig {
            stress_scale: ScoreScale::ZeroToHundred,
            stress_threshold: dec!(80),
            energy_threshold: dec!(8),
        }
    }
}

/// Risk thresholds used by the classifiers and summaries
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskConfig {
    pub mania: ManiaRiskConfig,
    pub suicide_alert_threshold: Decimal,
}

impl Default for RiskConfig {
    fn default() -> Self {
        RiskConfig {
            mania: ManiaRiskConfig::default(),
            suicide_alert_threshold: SUICIDE_ALERT_THRESHOLD,
        }
    }
}

impl RiskConfig {
    /// Suicide-risk alert against the configured threshold
    pub fn suicide_alert(&self, score: Decimal) -> bool {
        score >= self.suicide_alert_threshold
    }

    /// Mania-risk flag against the configured threshold-and-scale pair
    pub fn mania(&self, stress: Decimal, stress_scale: ScoreScale, energy: Decimal) -> bool {
        mania_risk(stress, stress_scale, energy, &self.mania)
    }
}

/// Mania-risk flag: stress and energy simultaneously elevated
///
/// `stress_scale` is the scale the caller's `stress` reading is on. Both
/// conditions are strict and both are required.
pub fn mania_risk(
    stress: Decimal,
    stress_scale: ScoreScale,
    energy: Decimal,
    config: &ManiaRiskConfig,
) -> bool {
    let stress = stress_scale.rescale(stress, config.stress_scale);
    stress > config.stress_threshold && energy > config.energy_threshold
}

/// Suicide-risk alert for a 0-10 reading (`>= 5`)
pub fn suicide_risk_alert(score: Decimal) -> bool {
    score >= SUICIDE_ALERT_THRESHOLD
}

/// Pain intensity band (0-10 scale)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PainSeverity {
    Mild,
    Moderate,
    Intense,
    Severe,
}

impl PainSeverity {
    pub fn from_intensity(intensity: Decimal) -> Self {
        if intensity <= dec!(3) {
            PainSeverity::Mild
        } else if intensity <= dec!(6) {
            PainSeverity::Moderate
        } else if intensity <= dec!(8) {
            PainSeverity::Intense
        } else {
            PainSeverity::Severe
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PainSeverity::Mild => "mild",
            PainSeverity::Moderate => "moderate",
            PainSeverity::Intense => "intense",
            PainSeverity::Severe => "severe",
        }
    }

    pub fn color(&self) -> DisplayColor {
        match self {
            PainSeverity::Mild => DisplayColor::Green,
            PainSeverity::Moderate => DisplayColor::Yellow,
            PainSeverity::Intense => DisplayColor::Orange,
            PainSeverity::Severe => DisplayColor::Red,
        }
    }
}

/// Readiness band for a 0-10 readiness score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadinessLevel {
    Excellent,
    Moderate,
    Low,
}

impl ReadinessLevel {
    pub fn from_score(score: Decimal) -> Self {
        if score >= dec!(7) {
            ReadinessLevel::Excellent
        } else if score >= dec!(5) {
            ReadinessLevel::Moderate
        } else {
            ReadinessLevel::Low
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ReadinessLevel::Excellent => "excellent",
            ReadinessLevel::Moderate => "moderate",
            ReadinessLevel::Low => "low",
        }
    }

    pub fn color(&self) -> DisplayColor {
        match self {
            ReadinessLevel::Excellent => DisplayColor::Green,
            ReadinessLevel::Moderate => DisplayColor::Yellow,
            ReadinessLevel::Low => DisplayColor::Red,
        }
    }
}

/// Readiness score (0-10) from a wellness entry, rounded to one decimal
///
/// Averages the positive factors (sleep, mood, perceived recovery) with the
/// inverted negative factors (fatigue, soreness, stress).
pub fn readiness_score(entry: &WellnessEntry) -> Decimal {
    let positive = stats::mean(&[entry.sleep_quality, entry.mood_level, entry.prs_score]);
    let negative = stats::mean(&[
        entry.fatigue_level,
        entry.muscle_soreness,
        entry.stress_level,
    ]);
    ((positive + (SCALE_MAX - negative)) / dec!(2))
        .round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero)
}

/// Mean of the muscular, mental and sleep recovery ratings
pub fn recovery_score(muscular: Decimal, mental: Decimal, sleep: Decimal) -> Decimal {
    (muscular + mental + sleep) / dec!(3)
}

/// A 0-10 recovery score as a percentage
pub fn recovery_percent(score: Decimal) -> Decimal {
    score / SCALE_MAX * dec!(100)
}

/// Composite recovery band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecoveryStatus {
    OptimalRecovery,
    ModerateRecovery,
    InsufficientRecovery,
}

impl RecoveryStatus {
    pub fn from_score(score: Decimal) -> Self {
        if score >= dec!(7) {
            RecoveryStatus::OptimalRecovery
        } else if score >= dec!(5) {
            RecoveryStatus::ModerateRecovery
        } else {
            RecoveryStatus::InsufficientRecovery
        }
    }

    /// Average of sleep quality, inverted fatigue and inverted stress
    pub fn assess(sleep_quality: Decimal, fatigue: Decimal, stress: Decimal) -> RecoveryAssessment {
        let score = stats::mean(&[
            sleep_quality,
            SCALE_MAX - fatigue,
            SCALE_MAX - stress,
        ]);
        RecoveryAssessment {
            score,
            status: RecoveryStatus::from_score(score),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RecoveryStatus::OptimalRecovery => "optimal recovery",
            RecoveryStatus::ModerateRecovery => "moderate recovery",
            RecoveryStatus::InsufficientRecovery => "insufficient recovery",
        }
    }

    pub fn color(&self) -> DisplayColor {
        match self {
            RecoveryStatus::OptimalRecovery => DisplayColor::Green,
            RecoveryStatus::ModerateRecovery => DisplayColor::Yellow,
            RecoveryStatus::InsufficientRecovery => DisplayColor::Red,
        }
    }

    pub fn recommendation(&self) -> &'static str {
        match self {
            RecoveryStatus::OptimalRecovery => {
                "Well recovered. Good day for high-intensity or high-volume training."
            }
            RecoveryStatus::ModerateRecovery => {
                "Moderate recovery. Consider light to moderate training."
            }
            RecoveryStatus::InsufficientRecovery => {
                "Low recovery. Rest or very light training is recommended."
            }
        }
    }
}

/// Recovery score with its band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecoveryAssessment {
    pub score: Decimal,
    pub status: RecoveryStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app_mania(stress: Decimal, energy: Decimal) -> bool {
        mania_risk(
            stress,
            ScoreScale::ZeroToHundred,
            energy,
            &ManiaRiskConfig::default(),
        )
    }

    #[test]
    fn test_mania_risk_quadrants() {
        assert!(!app_mania(dec!(50), dec!(5)));
        assert!(!app_mania(dec!(85), dec!(5)));
        assert!(!app_mania(dec!(50), dec!(9)));
        assert!(app_mania(dec!(85), dec!(9)));
    }

    #[test]
    fn test_mania_thresholds_are_strict() {
        assert!(!app_mania(dec!(80), dec!(9)));
        assert!(!app_mania(dec!(85), dec!(8)));
        assert!(app_mania(dec!(80.1), dec!(8.1)));
    }

    #[test]
    fn test_mania_rescales_ten_point_stress() {
        let config = ManiaRiskConfig::default();
        // 8.5 on 0-10 is 85 on 0-100
        assert!(mania_risk(dec!(8.5), ScoreScale::ZeroToTen, dec!(9), &config));
        assert!(!mania_risk(dec!(8), ScoreScale::ZeroToTen, dec!(9), &config));
    }

    #[test]
    fn test_mania_config_on_ten_point_scale() {
        let config = ManiaRiskConfig {
            stress_scale: ScoreScale::ZeroToTen,
            stress_threshold: dec!(8),
            energy_threshold: dec!(8),
        };
        assert!(mania_risk(dec!(90), ScoreScale::ZeroToHundred, dec!(9), &config));
        assert!(!mania_risk(dec!(8), ScoreScale::ZeroToTen, dec!(9), &config));
    }

    #[test]
    fn test_suicide_risk_boundary() {
        assert!(!suicide_risk_alert(dec!(4.9)));
        assert!(suicide_risk_alert(dec!(5.0)));
        assert!(suicide_risk_alert(dec!(10)));
        assert!(!suicide_risk_alert(dec!(0)));
    }

    #[test]
    fn test_pain_boundaries() {
        assert_eq!(PainSeverity::from_intensity(dec!(3)), PainSeverity::Mild);
        assert_eq!(PainSeverity::from_intensity(dec!(4)), PainSeverity::Moderate);
        assert_eq!(PainSeverity::from_intensity(dec!(6)), PainSeverity::Moderate);
        assert_eq!(PainSeverity::from_intensity(dec!(7)), PainSeverity::Intense);
        assert_eq!(PainSeverity::from_intensity(dec!(8)), PainSeverity::Intense);
        assert_eq!(PainSeverity::from_intensity(dec!(9)), PainSeverity::Severe);
        assert_eq!(PainSeverity::from_intensity(dec!(3.5)), PainSeverity::Moderate);
    }

    #[test]
    fn test_pain_labels_and_colors() {
        assert_eq!(PainSeverity::Mild.label(), "mild");
        assert_eq!(PainSeverity::Mild.color(), DisplayColor::Green);
        assert_eq!(PainSeverity::Moderate.color(), DisplayColor::Yellow);
        assert_eq!(PainSeverity::Intense.color(), DisplayColor::Orange);
        assert_eq!(PainSeverity::Severe.color(), DisplayColor::Red);
        assert_eq!(DisplayColor::Orange.to_string(), "orange");
    }

    #[test]
    fn test_readiness_levels() {
        assert_eq!(ReadinessLevel::from_score(dec!(7)), ReadinessLevel::Excellent);
        assert_eq!(ReadinessLevel::from_score(dec!(6.9)), ReadinessLevel::Moderate);
        assert_eq!(ReadinessLevel::from_score(dec!(5)), ReadinessLevel::Moderate);
        assert_eq!(ReadinessLevel::from_score(dec!(4.9)), ReadinessLevel::Low);
        assert_eq!(ReadinessLevel::Low.color(), DisplayColor::Red);
    }

    #[test]
    fn test_readiness_score() {
        let entry = WellnessEntry {
            sleep_quality: dec!(8),
            mood_level: dec!(7),
            prs_score: dec!(6),
            fatigue_level: dec!(3),
            muscle_soreness: dec!(2),
            stress_level: dec!(4),
        };
        // positive 7, negative 3 -> (7 + 7) / 2
        assert_eq!(readiness_score(&entry), dec!(7.0));
    }

    #[test]
    fn test_readiness_score_rounds_to_one_decimal() {
        let entry = WellnessEntry {
            sleep_quality: dec!(8),
            mood_level: dec!(8),
            prs_score: dec!(7),
            fatigue_level: dec!(2),
            muscle_soreness: dec!(2),
            stress_level: dec!(2),
        };
        // positive 7.666.., negative 2 -> 7.8333..
        assert_eq!(readiness_score(&entry), dec!(7.8));
    }

    #[test]
    fn test_recovery_status_bands() {
        let optimal = RecoveryStatus::assess(dec!(8), dec!(2), dec!(3));
        assert!(optimal.score > dec!(7.66) && optimal.score < dec!(7.67));
        assert_eq!(optimal.status, RecoveryStatus::OptimalRecovery);

        let moderate = RecoveryStatus::assess(dec!(5), dec!(5), dec!(5));
        assert_eq!(moderate.score, dec!(5));
        assert_eq!(moderate.status, RecoveryStatus::ModerateRecovery);

        let low = RecoveryStatus::assess(dec!(3), dec!(8), dec!(7));
        assert_eq!(low.status, RecoveryStatus::InsufficientRecovery);
        assert!(!low.status.recommendation().is_empty());
    }

    #[test]
    fn test_recovery_score_and_percent() {
        assert_eq!(recovery_score(dec!(6), dec!(7), dec!(8)), dec!(7));
        assert_eq!(recovery_percent(dec!(7)), dec!(70));
    }

    #[test]
    fn test_score_scale_rescale() {
        assert_eq!(ScoreScale::ZeroToTen.rescale(dec!(8), ScoreScale::ZeroToHundred), dec!(80));
        assert_eq!(ScoreScale::ZeroToHundred.rescale(dec!(80), ScoreScale::ZeroToTen), dec!(8));
        assert_eq!(ScoreScale::ZeroToTen.rescale(dec!(8), ScoreScale::ZeroToTen), dec!(8));
    }
}
