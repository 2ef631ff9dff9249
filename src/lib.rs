// Library interface for VitalRS modules
// The binary and the integration tests both build on this

pub mod cohort;
pub mod config;
pub mod error;
pub mod import;
pub mod load;
pub mod logging;
pub mod models;
pub mod pmc;
pub mod questionnaire;
pub mod risk;
pub mod sleep;
pub mod spravato;
pub mod stats;
pub mod summary;
pub mod workload;

// Re-export commonly used types for convenience
pub use models::*;
pub use error::{Result, VitalRsError};
pub use pmc::PmcCalculator;
pub use risk::RiskConfig;
pub use workload::{WorkloadAssessment, WorkloadCalculator, WorkloadConfig};
