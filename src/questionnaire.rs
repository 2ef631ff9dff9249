//! Psychometric questionnaire scoring
//!
//! PHQ-9 and GAD-7 are plain additive scores with published severity bands.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::stats;

/// Totals at or above this warrant clinician follow-up (PHQ-9 and GAD-7)
pub const FOLLOW_UP_THRESHOLD: u32 = 10;

/// Sum of item answers
pub fn additive_score(answers: &[u8]) -> u32 {
    answers.iter().map(|a| u32::from(*a)).sum()
}

/// PHQ-9 depression severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phq9Severity {
    Minimal,
    Mild,
    Moderate,
    ModeratelySevere,
    Severe,
}

impl Phq9Severity {
    pub fn from_score(score: u32) -> Self {
        match score {
            0..=4 => Phq9Severity::Minimal,
            5..=9 => Phq9Severity::Mild,
            10..=14 => Phq9Severity::Moderate,
            15..=19 => Phq9Severity::ModeratelySevere,
            _ => Phq9Severity::Severe,
        }
    }

    pub fn from_answers(answers: &[u8]) -> Self {
        Self::from_score(additive_score(answers))
    }

    pub fn label(&self) -> &'static str {
        match self {
            Phq9Severity::Minimal => "minimal",
            Phq9Severity::Mild => "mild",
            Phq9Severity::Moderate => "moderate",
            Phq9Severity::ModeratelySevere => "moderately severe",
            Phq9Severity::Severe => "severe",
        }
    }

    pub fn needs_follow_up(&self) -> bool {
        !matches!(self, Phq9Severity::Minimal | Phq9Severity::Mild)
    }
}

/// GAD-7 anxiety severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gad7Severity {
    Minimal,
    Mild,
    Moderate,
    Severe,
}

impl Gad7Severity {
    pub fn from_score(score: u32) -> Self {
        match score {
            0..=4 => Gad7Severity::Minimal,
            5..=9 => Gad7Severity::Mild,
            10..=14 => Gad7Severity::Moderate,
            _ => Gad7Severity::Severe,
        }
    }

    pub fn from_answers(answers: &[u8]) -> Self {
        Self::from_score(additive_score(answers))
    }

    pub fn label(&self) -> &'static str {
        match self {
            Gad7Severity::Minimal => "minimal",
            Gad7Severity::Mild => "mild",
            Gad7Severity::Moderate => "moderate",
            Gad7Severity::Severe => "severe",
        }
    }

    pub fn needs_follow_up(&self) -> bool {
        matches!(self, Gad7Severity::Moderate | Gad7Severity::Severe)
    }
}

/// DASS-21 subscale score (item sum doubled to the DASS-42 range)
pub fn dass21_subscore(answers: &[u8]) -> u32 {
    2 * additive_score(answers)
}

/// Emotional balance on a 0-10 scale centred at 5
///
/// Positive affect (beauty, vitality, fulfilment) raises the score and
/// negative affect (emptiness, anxiety) lowers it.
pub fn emotional_score(
    beauty: Decimal,
    vitality: Decimal,
    fulfillment: Decimal,
    emptiness: Decimal,
    anxiety: Decimal,
) -> Decimal {
    ((beauty + vitality + fulfillment) - (emptiness + anxiety)) / dec!(5) + dec!(5)
}

/// Flow state score on a 0-10 scale from nine 1-5 items
pub fn flow_score(answers: &[u8]) -> Decimal {
    (Decimal::from(additive_score(answers)) - dec!(9)) / dec!(36) * dec!(10)
}

/// Mean pain intensity across body regions, zero when none are reported
pub fn daily_pain(intensities: &[Decimal]) -> Decimal {
    stats::mean(intensities)
}
