//! Error types for the casual pay engine.
//!
//! Only configuration problems are errors. Data-quality conditions met while
//! running the pipeline (a shift for an unknown employer, a wage level with no
//! rates) are logged and skipped instead, so they never appear here.

use thiserror::Error;

/// The main error type for the casual pay engine.
///
/// # Example
///
/// ```
/// use casual_pay::error::EngineError;
///
/// let error = EngineError::UnsupportedPayCycle {
///     value: "quarterly".to_string(),
/// };
/// assert_eq!(error.to_string(), "Unsupported pay cycle: quarterly");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// The break schedule does not form an ordered set of hour ranges.
    #[error("Invalid break schedule: {message}")]
    InvalidBreakSchedule {
        /// What is wrong with the schedule.
        message: String,
    },

    /// An employer record breaks one of its invariants.
    #[error("Invalid employer '{employer_id}': {message}")]
    InvalidEmployer {
        /// The ID of the offending employer.
        employer_id: String,
        /// A description of the broken invariant.
        message: String,
    },

    /// A pay cycle other than weekly, fortnightly or monthly was supplied.
    #[error("Unsupported pay cycle: {value}")]
    UnsupportedPayCycle {
        /// The value that was supplied.
        value: String,
    },

    /// A general calculation error occurred.
    #[error("Calculation error: {message}")]
    CalculationError {
        /// A description of the calculation error.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_not_found_displays_path() {
        let error = EngineError::ConfigNotFound {
            path: "/missing/rates.yaml".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Configuration file not found: /missing/rates.yaml"
        );
    }

    #[test]
    fn test_config_parse_error_displays_path_and_message() {
        let error = EngineError::ConfigParseError {
            path: "/config/bad.yaml".to_string(),
            message: "invalid YAML syntax".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to parse configuration file '/config/bad.yaml': invalid YAML syntax"
        );
    }

    #[test]
    fn test_invalid_break_schedule_displays_message() {
        let error = EngineError::InvalidBreakSchedule {
            message: "schedule is empty".to_string(),
        };
        assert_eq!(error.to_string(), "Invalid break schedule: schedule is empty");
    }

    #[test]
    fn test_invalid_employer_displays_id_and_message() {
        let error = EngineError::InvalidEmployer {
            employer_id: "emp_cafe".to_string(),
            message: "nextPayDate 2026-01-14 is a Wednesday, payday is Thursday".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid employer 'emp_cafe': nextPayDate 2026-01-14 is a Wednesday, payday is Thursday"
        );
    }

    #[test]
    fn test_unsupported_pay_cycle_displays_value() {
        let error = EngineError::UnsupportedPayCycle {
            value: "quarterly".to_string(),
        };
        assert_eq!(error.to_string(), "Unsupported pay cycle: quarterly");
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<EngineError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_unsupported() -> EngineResult<()> {
            Err(EngineError::UnsupportedPayCycle {
                value: "daily".to_string(),
            })
        }

        fn propagates_error() -> EngineResult<()> {
            returns_unsupported()?;
            Ok(())
        }

        assert!(propagates_error().is_err());
    }
}
