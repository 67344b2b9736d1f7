//! Error types
//!
//! Two channels, never mixed:
//! - [`ValidationErrors`]: data-driven failures accumulated while a record is
//!   validated. They never stop the remaining rules from running.
//! - [`ConfigError`]: the engine is mis-wired (unknown rule set, missing
//!   parameter, duplicate registration). Returned immediately as `Err`.

use std::fmt;
use thiserror::Error;

// ============================================================================
// Configuration Errors
// ============================================================================

/// Result alias for setup operations
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Hard failures caused by engine setup rather than by input data
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("[{0}] Duplicate definition of rules")]
    DuplicateRuleSet(String),

    #[error("\"{0}\" rules not defined")]
    UnknownRuleSet(String),

    #[error("[{0}] Must define one or more object property rules")]
    EmptyRuleSet(String),

    #[error("[{title}] {message}")]
    RuleSyntax { title: String, message: String },

    #[error("\"{0}\" is already defined")]
    DuplicateType(String),

    #[error("\"{0}\" type is not defined")]
    UnknownType(String),

    #[error("\"{0}\" enumeration is already defined")]
    DuplicateEnum(String),

    #[error("\"{0}\" enumeration is not defined")]
    UnknownEnum(String),

    #[error("\"{field}\" is type \"{type_name}\" and must specify {parameter}")]
    MissingParameter {
        field: String,
        type_name: String,
        parameter: &'static str,
    },

    #[error("\"{field}\" has an invalid {parameter} parameter \"{value}\"")]
    InvalidParameter {
        field: String,
        parameter: &'static str,
        value: String,
    },

    #[error("\"{field}\" has an invalid pattern \"{pattern}\": {source}")]
    InvalidPattern {
        field: String,
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

// ============================================================================
// Validation Errors Collection
// ============================================================================

/// Ordered, append-only collection of validation errors
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ValidationErrors {
    /// List of individual validation errors
    pub errors: Vec<ValidationError>,
}

impl ValidationErrors {
    /// Create a new empty validation errors collection
    pub fn new() -> Self {
        Self { errors: Vec::new() }
    }

    /// Check if there are any errors
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Get the number of errors
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Add a validation error to the collection
    pub fn add(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    /// Get errors as a slice
    pub fn as_slice(&self) -> &[ValidationError] {
        &self.errors
    }

    /// The human-readable messages, in the order they were recorded
    pub fn messages(&self) -> Vec<String> {
        self.errors.iter().map(|e| e.message.clone()).collect()
    }

    /// Errors recorded against one field
    pub fn for_field(&self, field: &str) -> Vec<&ValidationError> {
        self.errors.iter().filter(|e| e.field == field).collect()
    }

    /// Ok if no errors, Err with the collection otherwise
    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} validation error(s)", self.errors.len())
    }
}

impl std::error::Error for ValidationErrors {}

impl IntoIterator for ValidationErrors {
    type Item = ValidationError;
    type IntoIter = std::vec::IntoIter<ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

impl<'a> IntoIterator for &'a ValidationErrors {
    type Item = &'a ValidationError;
    type IntoIter = std::slice::Iter<'a, ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}

// ============================================================================
// Single Validation Error
// ============================================================================

/// A single field validation error
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ValidationError {
    /// Field name the rule applies to
    pub field: String,

    /// Human-readable error message
    pub message: String,

    /// Error type classification
    pub error_type: ErrorType,
}

impl ValidationError {
    /// Create a new validation error
    pub fn new(field: impl Into<String>, message: impl Into<String>, error_type: ErrorType) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            error_type,
        }
    }

    /// `"<field>" is required`
    pub fn missing(field: &str) -> Self {
        Self::new(field, format!("\"{}\" is required", field), ErrorType::Missing)
    }

    /// `"<field>" is not a valid "<type>"`
    pub fn invalid_type(field: &str, type_name: &str) -> Self {
        Self::new(
            field,
            format!("\"{}\" is not a valid \"{}\"", field, type_name),
            ErrorType::TypeError,
        )
    }

    /// Out-of-range number or length
    pub fn range(field: &str, message: impl Into<String>) -> Self {
        Self::new(field, message, ErrorType::RangeError)
    }

    /// `"<field>" does not match pattern "<pattern>"`
    pub fn pattern_mismatch(field: &str, pattern: &str) -> Self {
        Self::new(
            field,
            format!("\"{}\" does not match pattern \"{}\"", field, pattern),
            ErrorType::PatternError,
        )
    }

    /// `"<field>" and "<other>" do not match`
    pub fn compare_mismatch(field: &str, other: &str) -> Self {
        Self::new(
            field,
            format!("\"{}\" and \"{}\" do not match", field, other),
            ErrorType::CompareError,
        )
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

// ============================================================================
// Error Type Classification
// ============================================================================

/// Classification of validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ErrorType {
    /// Required field missing
    Missing,

    /// Value could not be parsed as the rule's type
    TypeError,

    /// Number or length outside the configured bounds
    RangeError,

    /// String does not match the rule's pattern
    PatternError,

    /// Value is not a member of the enumeration
    EnumError,

    /// Two fields that must be equal are not
    CompareError,

    /// Reported by a custom validator
    Custom,
}

impl fmt::Display for ErrorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing => write!(f, "missing"),
            Self::TypeError => write!(f, "type_error"),
            Self::RangeError => write!(f, "range_error"),
            Self::PatternError => write!(f, "pattern_error"),
            Self::EnumError => write!(f, "enum_error"),
            Self::CompareError => write!(f, "compare_error"),
            Self::Custom => write!(f, "custom"),
        }
    }
}
