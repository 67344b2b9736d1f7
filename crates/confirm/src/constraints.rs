//! Constraints decoded from rule parameters
//!
//! - `integer` / `float`: `min,max` (either may be empty)
//! - `string`: `minLength,maxLength,casing` where casing is
//!   `upper`, `lower`, `title` or `first`
//!
//! A parameter that cannot be decoded is a configuration error.

use crate::errors::{ConfigError, ConfigResult, ValidationError, ValidationErrors};
use crate::rules::Rule;
use crate::strings::{first_case, title_case};
use std::fmt::Display;
use std::str::FromStr;

// ============================================================================
// Numeric Bounds
// ============================================================================

/// Inclusive bounds for `integer` and `float` rules
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct NumericBounds<T> {
    /// Minimum value (inclusive)
    pub minimum: Option<T>,
    /// Maximum value (inclusive)
    pub maximum: Option<T>,
}

impl<T> NumericBounds<T>
where
    T: FromStr + PartialOrd + Display + Copy,
{
    /// Decode `params[0]` / `params[1]`
    pub fn from_rule(rule: &Rule) -> ConfigResult<Self> {
        Ok(Self {
            minimum: decode_param(rule, 0, "minimum")?,
            maximum: decode_param(rule, 1, "maximum")?,
        })
    }

    /// Record at most one range error; true when `value` is within bounds
    pub fn check(&self, field: &str, value: T, errors: &mut ValidationErrors) -> bool {
        if let Some(min) = self.minimum {
            if value < min {
                errors.add(ValidationError::range(
                    field,
                    format!("\"{}\" cannot be less than {}", field, min),
                ));
                return false;
            }
        }
        if let Some(max) = self.maximum {
            if value > max {
                errors.add(ValidationError::range(
                    field,
                    format!("\"{}\" cannot be greater than {}", field, max),
                ));
                return false;
            }
        }
        true
    }
}

// ============================================================================
// String Constraints
// ============================================================================

/// Casing applied to a coerced string
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Casing {
    Upper,
    Lower,
    Title,
    First,
}

impl Casing {
    pub fn apply(self, s: &str) -> String {
        match self {
            Self::Upper => s.to_uppercase(),
            Self::Lower => s.to_lowercase(),
            Self::Title => title_case(s),
            Self::First => first_case(s),
        }
    }
}

impl FromStr for Casing {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "upper" => Ok(Self::Upper),
            "lower" => Ok(Self::Lower),
            "title" => Ok(Self::Title),
            "first" => Ok(Self::First),
            _ => Err(()),
        }
    }
}

/// Length bounds (in characters) and casing for `string` rules
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StringConstraints {
    /// Minimum length (in characters, not bytes)
    pub min_length: Option<usize>,
    /// Maximum length (in characters, not bytes)
    pub max_length: Option<usize>,
    /// Casing written back after validation
    pub casing: Option<Casing>,
}

impl StringConstraints {
    /// Decode `params[0..3]`
    pub fn from_rule(rule: &Rule) -> ConfigResult<Self> {
        Ok(Self {
            min_length: decode_param(rule, 0, "minimum length")?,
            max_length: decode_param(rule, 1, "maximum length")?,
            casing: decode_param(rule, 2, "casing")?,
        })
    }

    /// Record at most one length error; true when the length is within bounds
    pub fn check_length(&self, field: &str, s: &str, errors: &mut ValidationErrors) -> bool {
        let len = s.chars().count();
        if let Some(min) = self.min_length {
            if len < min {
                errors.add(ValidationError::range(
                    field,
                    format!("\"{}\" must be at least {} characters", field, min),
                ));
                return false;
            }
        }
        if let Some(max) = self.max_length {
            if len > max {
                errors.add(ValidationError::range(
                    field,
                    format!("\"{}\" must be no more than {} characters", field, max),
                ));
                return false;
            }
        }
        true
    }
}

fn decode_param<T: FromStr>(
    rule: &Rule,
    index: usize,
    parameter: &'static str,
) -> ConfigResult<Option<T>> {
    let Some(raw) = rule.param_at(index) else {
        return Ok(None);
    };
    raw.trim()
        .parse::<T>()
        .map(Some)
        .map_err(|_| ConfigError::InvalidParameter {
            field: rule.name.clone(),
            parameter,
            value: raw.to_string(),
        })
}
