//! Unified error hierarchy for VitalRS
//!
//! The calculators are total functions and rarely fail: division by zero has
//! a defined fallback of zero and short workload history is reported through
//! a tagged result. Errors are reserved for malformed input, impossible
//! parameters and the I/O edges (import, configuration).

use thiserror::Error;

/// Top-level error type for all VitalRS operations
#[derive(Debug, Error)]
pub enum VitalRsError {
    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Session import errors
    #[error("Import error: {0}")]
    Import(#[from] ImportError),

    /// Calculation errors
    #[error("Calculation error: {0}")]
    Calculation(#[from] CalculationError),

    /// Malformed caller input
    #[error("Input error: {0}")]
    Input(#[from] InputError),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Caller contract violations detected at the boundary
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputError {
    /// A field could not be parsed or is outside its domain
    #[error("Invalid input for {field}: {reason}")]
    InvalidInput { field: String, reason: String },
}

impl InputError {
    pub fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        InputError::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Session import errors
#[derive(Debug, Error)]
pub enum ImportError {
    /// Unsupported file format
    #[error("Unsupported format: {format}")]
    UnsupportedFormat { format: String },

    /// Format-specific parsing error
    #[error("Parse error in {format}: {reason}")]
    ParseError { format: String, reason: String },
}

/// Calculation errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CalculationError {
    /// Insufficient data for calculation
    #[error("Insufficient data for {calculation}: {reason}")]
    InsufficientData { calculation: String, reason: String },

    /// Invalid parameter
    #[error("Invalid parameter for {calculation}: {parameter}={value}")]
    InvalidParameter {
        calculation: String,
        parameter: String,
        value: String,
    },
}

/// Result type alias for VitalRS operations
pub type Result<T> = std::result::Result<T, VitalRsError>;

impl VitalRsError {
    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            VitalRsError::Input(_) => ErrorSeverity::Warning,
            VitalRsError::Calculation(CalculationError::InsufficientData { .. }) => {
                ErrorSeverity::Info
            }
            VitalRsError::Configuration(_) => ErrorSeverity::Critical,
            _ => ErrorSeverity::Error,
        }
    }

    /// Get user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            VitalRsError::Input(InputError::InvalidInput { field, reason }) => {
                format!("The value given for {} was not accepted: {}", field, reason)
            }
            VitalRsError::Calculation(CalculationError::InsufficientData {
                calculation,
                ..
            }) => {
                format!(
                    "Not enough data to calculate {} yet. Keep logging and check back later.",
                    calculation
                )
            }
            VitalRsError::Import(ImportError::UnsupportedFormat { format }) => {
                format!("Files of type '{}' cannot be imported (use csv or json)", format)
            }
            VitalRsError::Configuration(reason) => {
                format!("The configuration cannot be used: {}", reason)
            }
            _ => self.to_string(),
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// Critical error requiring immediate attention
    Critical,
    /// Error that prevents operation but the process can continue
    Error,
    /// Warning that doesn't prevent operation
    Warning,
    /// Informational message
    Info,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_severity() {
        let err = VitalRsError::Input(InputError::invalid("bedtime", "not HH:MM"));
        assert_eq!(err.severity(), ErrorSeverity::Warning);

        let err = VitalRsError::Calculation(CalculationError::InsufficientData {
            calculation: "spravato".to_string(),
            reason: "no sessions".to_string(),
        });
        assert_eq!(err.severity(), ErrorSeverity::Info);

        let err = VitalRsError::Configuration("bad window".to_string());
        assert_eq!(err.severity(), ErrorSeverity::Critical);
    }

    #[test]
    fn test_user_messages() {
        let err = VitalRsError::Input(InputError::invalid("rpe", "must be at most 10"));
        assert!(err.user_message().contains("rpe"));

        let err = VitalRsError::Import(ImportError::UnsupportedFormat {
            format: "fit".to_string(),
        });
        assert!(err.user_message().contains("csv or json"));

        let err = VitalRsError::Configuration("acute window too long".to_string());
        assert!(err.user_message().contains("acute window too long"));

        let err = VitalRsError::Io(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"));
        assert_eq!(err.user_message(), "IO error: gone");
    }
}
