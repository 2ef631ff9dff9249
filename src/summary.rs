use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::models::{MentalMetrics, PhysicalMetrics};
use crate::risk::{RiskConfig, ScoreScale};

/// Readiness assumed when the athlete has not reported one
pub const DEFAULT_READINESS: Decimal = dec!(5);

const LOW_READINESS: Decimal = dec!(4);
const HIGH_READINESS: Decimal = dec!(8);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SummaryStatus {
    Normal,
    Warning,
}

/// Alerts and advice for one day of readings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailySummary {
    pub date: NaiveDate,
    pub status: SummaryStatus,
    pub alerts: Vec<String>,
    pub recommendations: Vec<String>,
}

impl DailySummary {
    pub fn build(
        date: NaiveDate,
        physical: &PhysicalMetrics,
        mental: &MentalMetrics,
        risk: &RiskConfig,
    ) -> Self {
        let mut summary = DailySummary {
            date,
            status: SummaryStatus::Normal,
            alerts: Vec::new(),
            recommendations: Vec::new(),
        };

        let stress = mental.stress_score_app.unwrap_or(Decimal::ZERO);
        let energy = mental.energy_level.unwrap_or(Decimal::ZERO);
        if risk.mania(stress, ScoreScale::ZeroToHundred, energy) {
            summary.warn("High risk of mania detected");
            summary
                .recommendations
                .push("Avoid stimulants and prioritize sleep.".to_string());
        }

        if let Some(suicide_risk) = mental.suicide_risk {
            if risk.suicide_alert(suicide_risk) {
                summary.warn("Elevated suicide risk reported");
                summary
                    .recommendations
                    .push("Please contact your care team today.".to_string());
            }
        }

        let readiness = physical.readiness_to_train.unwrap_or(DEFAULT_READINESS);
        if readiness < LOW_READINESS {
            summary
                .recommendations
                .push("Low readiness. Consider a rest day.".to_string());
        } else if readiness > HIGH_READINESS {
            summary
                .recommendations
                .push("High readiness! Good day for intensity.".to_string());
        }

        if summary.status == SummaryStatus::Warning {
            info!(%date, alerts = summary.alerts.len(), "Daily summary raised alerts");
        }

        summary
    }

    fn warn(&mut self, alert: &str) {
        self.status = SummaryStatus::Warning;
        self.alerts.push(alert.to_string());
    }
}
