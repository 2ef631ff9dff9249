//! Esketamine (Spravato) treatment report

use rust_decimal::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics;

use crate::error::{CalculationError, Result};
use crate::models::SpravatoSession;
use crate::stats;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpravatoReport {
    pub total_sessions: usize,
    pub avg_dose: Decimal,
    /// Pearson correlation between dissociation and post-session mood
    pub correlation_dissociation_mood: Option<f64>,
    /// Session with the highest post-session mood
    pub best_session: SpravatoSession,
}

impl SpravatoReport {
    pub fn from_sessions(sessions: &[SpravatoSession]) -> Result<Self> {
        let first = sessions.first().ok_or_else(|| CalculationError::InsufficientData {
            calculation: "spravato report".to_string(),
            reason: "no sessions recorded".to_string(),
        })?;

        // Ties keep the earliest logged session
        let best_session = sessions
            .iter()
            .fold(first, |best, s| if s.mood_after > best.mood_after { s } else { best })
            .clone();

        let doses: Vec<Decimal> = sessions.iter().map(|s| s.dose_mg).collect();

        Ok(SpravatoReport {
            total_sessions: sessions.len(),
            avg_dose: stats::mean(&doses),
            correlation_dissociation_mood: dissociation_mood_correlation(sessions),
            best_session,
        })
    }
}

/// Sample Pearson correlation, `None` below two sessions or with zero variance
fn dissociation_mood_correlation(sessions: &[SpravatoSession]) -> Option<f64> {
    if sessions.len() < 2 {
        return None;
    }

    let dissociation: Vec<f64> = sessions
        .iter()
        .map(|s| s.dissociation.to_f64().unwrap_or(0.0))
        .collect();
    let mood: Vec<f64> = sessions
        .iter()
        .map(|s| s.mood_after.to_f64().unwrap_or(0.0))
        .collect();

    let spread = dissociation.iter().std_dev() * mood.iter().std_dev();
    if !spread.is_finite() || spread == 0.0 {
        return None;
    }

    let correlation = dissociation.iter().covariance(mood.iter()) / spread;
    correlation.is_finite().then_some(correlation)
}
