//! Clinician view over many patients at once

use rayon::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use tracing::debug;

use crate::models::{DailySession, MentalMetrics};
use crate::risk::{RiskConfig, ScoreScale};
use crate::workload::{WorkloadAssessment, WorkloadCalculator, WorkloadConfig};

/// Latest readings and training history for one patient
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientSnapshot {
    pub patient_id: String,
    pub name: String,
    pub latest_mental: Option<MentalMetrics>,
    #[serde(default)]
    pub sessions: Vec<DailySession>,
}

/// Risk flags for one patient, as listed on the clinician dashboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientRiskSummary {
    pub patient_id: String,
    pub name: String,
    pub latest_suicide_risk: Option<Decimal>,
    pub suicide_alert: bool,
    pub mania_risk: bool,
    pub workload: WorkloadAssessment,
}

impl PatientRiskSummary {
    pub fn from_snapshot(
        snapshot: &PatientSnapshot,
        risk: &RiskConfig,
        calculator: &WorkloadCalculator,
    ) -> Self {
        let mental = snapshot.latest_mental.as_ref();
        let latest_suicide_risk = mental.and_then(|m| m.suicide_risk);

        let mania_risk = mental
            .map(|m| {
                risk.mania(
                    m.stress_score_app.unwrap_or(Decimal::ZERO),
                    ScoreScale::ZeroToHundred,
                    m.energy_level.unwrap_or(Decimal::ZERO),
                )
            })
            .unwrap_or(false);

        PatientRiskSummary {
            patient_id: snapshot.patient_id.clone(),
            name: snapshot.name.clone(),
            latest_suicide_risk,
            suicide_alert: latest_suicide_risk
                .map(|score| risk.suicide_alert(score))
                .unwrap_or(false),
            mania_risk,
            workload: calculator.assess_sessions(&snapshot.sessions),
        }
    }
}

/// Assess every patient, highest suicide risk first
///
/// Patients without a reading sort last; ties are broken by patient id.
pub fn assess_cohort(
    patients: &[PatientSnapshot],
    risk: &RiskConfig,
    workload: &WorkloadConfig,
) -> Vec<PatientRiskSummary> {
    let calculator = WorkloadCalculator::with_config(workload.clone());

    let mut summaries: Vec<PatientRiskSummary> = patients
        .par_iter()
        .map(|patient| PatientRiskSummary::from_snapshot(patient, risk, &calculator))
        .collect();

    summaries.sort_by(compare_by_risk);

    debug!(
        patients = summaries.len(),
        alerts = summaries.iter().filter(|s| s.suicide_alert).count(),
        "Assessed cohort"
    );

    summaries
}

fn compare_by_risk(a: &PatientRiskSummary, b: &PatientRiskSummary) -> Ordering {
    // Option orders None below Some, so reversing puts missing readings last
    b.latest_suicide_risk
        .cmp(&a.latest_suicide_risk)
        .then_with(|| a.patient_id.cmp(&b.patient_id))
}
