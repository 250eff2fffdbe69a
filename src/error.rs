//! Error types for the Income Tax Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while loading tax-year policies
//! and calculating tax.

use chrono::NaiveDate;
use thiserror::Error;

/// The main error type for the Income Tax Engine.
///
/// All operations in the engine return this error type, making it easy
/// to handle errors consistently throughout the application.
///
/// # Example
///
/// ```
/// use tax_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/file.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/file.yaml");
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

    /// A tax-year policy table is malformed (gaps, overlaps, non-monotonic rates).
    #[error("Invalid policy for tax year {tax_year}: {message}")]
    PolicyConfiguration {
        /// The tax year label of the offending policy.
        tax_year: String,
        /// A description of what made the policy invalid.
        message: String,
    },

    /// No policy has been loaded for the requested tax year.
    #[error("Tax year not found: {tax_year}")]
    TaxYearNotFound {
        /// The tax year label that was requested.
        tax_year: String,
    },

    /// No loaded policy covers the requested date.
    #[error("No tax year policy covers date {date}")]
    NoPolicyForDate {
        /// The date that fell outside every loaded tax year.
        date: NaiveDate,
    },

    /// A calculation input was negative or otherwise out of domain.
    #[error("Invalid input field '{field}': {message}")]
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
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
            path: "/missing/file.yaml".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Configuration file not found: /missing/file.yaml"
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
    fn test_policy_configuration_displays_year_and_message() {
        let error = EngineError::PolicyConfiguration {
            tax_year: "2025/26".to_string(),
            message: "gap between brackets".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid policy for tax year 2025/26: gap between brackets"
        );
    }

    #[test]
    fn test_tax_year_not_found_displays_label() {
        let error = EngineError::TaxYearNotFound {
            tax_year: "1999/00".to_string(),
        };
        assert_eq!(error.to_string(), "Tax year not found: 1999/00");
    }

    #[test]
    fn test_no_policy_for_date_displays_date() {
        let error = EngineError::NoPolicyForDate {
            date: NaiveDate::from_ymd_opt(2010, 5, 1).unwrap(),
        };
        assert_eq!(
            error.to_string(),
            "No tax year policy covers date 2010-05-01"
        );
    }

    #[test]
    fn test_invalid_input_displays_field_and_message() {
        let error = EngineError::InvalidInput {
            field: "gross_income".to_string(),
            message: "must not be negative".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid input field 'gross_income': must not be negative"
        );
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<EngineError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_tax_year_not_found() -> EngineResult<()> {
            Err(EngineError::TaxYearNotFound {
                tax_year: "2030/31".to_string(),
            })
        }

        fn propagates_error() -> EngineResult<()> {
            returns_tax_year_not_found()?;
            Ok(())
        }

        assert!(propagates_error().is_err());
    }
}
