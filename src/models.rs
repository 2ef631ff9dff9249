use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{InputError, Result};
use crate::load;

/// Highest valid RPE on the CR-10 scale
pub const MAX_RPE: u8 = 10;

/// A single logged training session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailySession {
    /// Calendar date of the session
    pub date: NaiveDate,

    /// Session duration in minutes
    pub duration_minutes: u32,

    /// Rating of perceived exertion (0-10, 0 meaning no session)
    pub rpe: u8,

    /// Load precomputed by the logging form, if stored with the row
    #[serde(default)]
    pub session_load: Option<Decimal>,
}

impl DailySession {
    pub fn new(date: NaiveDate, duration_minutes: u32, rpe: u8) -> Self {
        DailySession {
            date,
            duration_minutes,
            rpe,
            session_load: None,
        }
    }

    /// Internal load in arbitrary units (duration × RPE)
    pub fn internal_load(&self) -> Decimal {
        load::internal_load(
            Decimal::from(self.duration_minutes),
            Decimal::from(self.rpe),
        )
    }

    /// Stored session load when present, otherwise the computed internal load
    pub fn effective_load(&self) -> Decimal {
        self.session_load.unwrap_or_else(|| self.internal_load())
    }

    /// Optional sanity check; the calculators never call this themselves
    pub fn validate(&self) -> Result<()> {
        if self.rpe > MAX_RPE {
            return Err(InputError::invalid(
                "rpe",
                format!("{} is above the maximum of {}", self.rpe, MAX_RPE),
            )
            .into());
        }
        Ok(())
    }
}

/// Loosely typed session row as stored by the logging forms
///
/// Every numeric field may be missing. Conversion into [`DailySession`]
/// applies the defaulting rules in one place: missing duration or RPE is
/// treated as 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub date: NaiveDate,

    #[serde(default, alias = "duration", alias = "duration_min")]
    pub duration_minutes: Option<i64>,

    #[serde(default, alias = "srpe")]
    pub rpe: Option<i64>,

    #[serde(default)]
    pub session_load: Option<Decimal>,
}

impl TryFrom<SessionRecord> for DailySession {
    type Error = InputError;

    fn try_from(record: SessionRecord) -> std::result::Result<Self, Self::Error> {
        let duration = record.duration_minutes.unwrap_or(0);
        let duration_minutes = u32::try_from(duration).map_err(|_| {
            InputError::invalid(
                "duration_minutes",
                format!("{} is not a valid number of minutes", duration),
            )
        })?;

        let rpe = record.rpe.unwrap_or(0);
        let rpe = u8::try_from(rpe)
            .map_err(|_| InputError::invalid("rpe", format!("{} is not a valid RPE", rpe)))?;

        Ok(DailySession {
            date: record.date,
            duration_minutes,
            rpe,
            session_load: record.session_load,
        })
    }
}

/// Per-session load series in ascending date order
///
/// Sorting is stable so sessions sharing a date keep their logged order.
pub fn load_series(sessions: &[DailySession]) -> Vec<Decimal> {
    let mut ordered: Vec<&DailySession> = sessions.iter().collect();
    ordered.sort_by_key(|s| s.date);
    ordered.iter().map(|s| s.effective_load()).collect()
}

/// Bedtime and wake time pair for one night
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SleepTimes {
    pub bedtime: NaiveTime,
    pub wake_time: NaiveTime,
}

/// Daily mental-health readings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MentalMetrics {
    pub date: Option<NaiveDate>,

    /// Self-reported suicide risk (0-10)
    pub suicide_risk: Option<Decimal>,

    /// Energy level (0-10)
    pub energy_level: Option<Decimal>,

    /// App-computed stress score (0-100)
    pub stress_score_app: Option<Decimal>,

    /// Self-reported mental stress (0-10)
    pub stress_mental: Option<Decimal>,

    /// Clinician-facing mania risk score (0-10)
    pub mania_risk_score: Option<Decimal>,
}

/// Daily physical readiness readings (0-10 scales)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PhysicalMetrics {
    pub date: Option<NaiveDate>,
    pub readiness_to_train: Option<Decimal>,
    pub sleep_quality: Option<Decimal>,
    pub fatigue_level: Option<Decimal>,
    pub muscle_soreness: Option<Decimal>,
    pub stress_level: Option<Decimal>,
    pub mood_level: Option<Decimal>,
    pub prs_score: Option<Decimal>,
}

/// Complete wellness questionnaire entry (0-10 scales)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WellnessEntry {
    pub sleep_quality: Decimal,
    pub mood_level: Decimal,
    /// Perceived recovery status
    pub prs_score: Decimal,
    pub fatigue_level: Decimal,
    pub muscle_soreness: Decimal,
    pub stress_level: Decimal,
}

/// One strength exercise within a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exercise {
    pub sets: u32,
    pub reps: u32,
    pub load_kg: Decimal,
}

/// A ketamine-assisted therapy (Spravato) session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpravatoSession {
    pub date: NaiveDate,
    pub dose_mg: Decimal,
    /// Dissociation intensity (0-10)
    pub dissociation: Decimal,
    /// Mood change reported after the session
    pub mood_after: Decimal,
}
