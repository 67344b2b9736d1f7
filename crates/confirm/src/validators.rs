//! Built-in validators
//!
//! Scalar types share one protocol ([`apply_protocol`]):
//!
//! 1. Field absent: error if required, otherwise write the default verbatim.
//! 2. Field present: run the parser; `None` appends
//!    `"<name>" is not a valid "<type>"`.
//! 3. Parsed: write the canonical value back under the same key.
//!
//! `compare`, `enum` and `regex` need rule parameters and report a
//! [`ConfigError`] when those are missing.

use crate::constraints::{NumericBounds, StringConstraints};
use crate::custom_validators::{BoxedTypeValidator, TypeValidator, ValidatorContext};
use crate::errors::{ConfigError, ConfigResult, ErrorType, ValidationError, ValidationErrors};
use crate::parsers;
use crate::rules::Rule;
use crate::types::{Record, Value};
use regex::Regex;
use std::fmt;
use std::sync::Arc;

// ============================================================================
// Validator Kind - dispatch table entry
// ============================================================================

/// What runs for a registered type
#[derive(Clone)]
pub enum ValidatorKind {
    AuthRole,
    Boolean,
    Compare,
    Date,
    Email,
    Enum,
    Float,
    Integer,
    Password,
    Regex,
    String,
    Time,
    /// Registered at runtime
    Custom(BoxedTypeValidator),
}

impl ValidatorKind {
    /// Built-in type names and their validators, in registration order
    pub fn builtins() -> [(&'static str, ValidatorKind); 12] {
        [
            ("authRole", Self::AuthRole),
            ("boolean", Self::Boolean),
            ("compare", Self::Compare),
            ("date", Self::Date),
            ("email", Self::Email),
            ("enum", Self::Enum),
            ("float", Self::Float),
            ("integer", Self::Integer),
            ("password", Self::Password),
            ("regex", Self::Regex),
            ("string", Self::String),
            ("time", Self::Time),
        ]
    }

    /// Wrap a custom validator
    pub fn custom(validator: impl TypeValidator + 'static) -> Self {
        Self::Custom(Arc::new(validator))
    }

    /// Name used in debug output
    pub fn name(&self) -> &'static str {
        match self {
            Self::AuthRole => "authRole",
            Self::Boolean => "boolean",
            Self::Compare => "compare",
            Self::Date => "date",
            Self::Email => "email",
            Self::Enum => "enum",
            Self::Float => "float",
            Self::Integer => "integer",
            Self::Password => "password",
            Self::Regex => "regex",
            Self::String => "string",
            Self::Time => "time",
            Self::Custom(_) => "custom",
        }
    }

    /// Validate one rule against `data`
    pub fn run(
        &self,
        rule: &Rule,
        data: &mut Record,
        ctx: &ValidatorContext<'_>,
        errors: &mut ValidationErrors,
    ) -> ConfigResult<bool> {
        match self {
            Self::AuthRole => Ok(valid_auth_role(rule, data, ctx, errors)),
            Self::Boolean => Ok(valid_boolean(rule, data, errors)),
            Self::Compare => valid_compare(rule, data, errors),
            Self::Date => Ok(valid_date(rule, data, errors)),
            Self::Email => Ok(valid_email(rule, data, errors)),
            Self::Enum => valid_enum(rule, data, ctx, errors),
            Self::Float => valid_float(rule, data, errors),
            Self::Integer => valid_integer(rule, data, errors),
            Self::Password => Ok(valid_password(rule, data, ctx, errors)),
            Self::Regex => valid_regex(rule, data, errors),
            Self::String => valid_string(rule, data, errors),
            Self::Time => Ok(valid_time(rule, data, errors)),
            Self::Custom(validator) => validator.validate(rule, data, ctx, errors),
        }
    }
}

impl fmt::Debug for ValidatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Custom(_) => f.write_str("Custom(..)"),
            other => f.write_str(other.name()),
        }
    }
}

/// Built-ins compare by kind, custom validators by identity
impl PartialEq for ValidatorKind {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Custom(a), Self::Custom(b)) => Arc::ptr_eq(a, b),
            (Self::Custom(_), _) | (_, Self::Custom(_)) => false,
            (a, b) => std::mem::discriminant(a) == std::mem::discriminant(b),
        }
    }
}

// ============================================================================
// Shared Protocol
// ============================================================================

/// How the shared protocol finished for one field
#[derive(Debug, Clone, PartialEq)]
pub enum FieldOutcome {
    /// Parsed and written back
    Coerced(Value),
    /// Absent and optional; the default (if any) was written
    Defaulted,
    /// Absent and required
    Missing,
    /// Present but not parseable
    Invalid,
}

impl FieldOutcome {
    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Coerced(_) | Self::Defaulted)
    }
}

/// Run the shared protocol and report only pass/fail
pub fn valid_value<P>(rule: &Rule, data: &mut Record, parser: P, errors: &mut ValidationErrors) -> bool
where
    P: FnOnce(&Value) -> Option<Value>,
{
    apply_protocol(rule, data, parser, errors).is_ok()
}

/// Run the shared protocol, reporting parse failures as type errors
pub fn apply_protocol<P>(
    rule: &Rule,
    data: &mut Record,
    parser: P,
    errors: &mut ValidationErrors,
) -> FieldOutcome
where
    P: FnOnce(&Value) -> Option<Value>,
{
    apply_protocol_as(rule, data, parser, ErrorType::TypeError, errors)
}

/// Run the shared protocol, classifying parse failures as `error_type`
pub fn apply_protocol_as<P>(
    rule: &Rule,
    data: &mut Record,
    parser: P,
    error_type: ErrorType,
    errors: &mut ValidationErrors,
) -> FieldOutcome
where
    P: FnOnce(&Value) -> Option<Value>,
{
    let Some(raw) = data.get(&rule.name) else {
        if rule.required {
            errors.add(ValidationError::missing(&rule.name));
            return FieldOutcome::Missing;
        }
        if let Some(default) = &rule.default {
            data.set(&rule.name, default.clone());
        }
        return FieldOutcome::Defaulted;
    };

    match parser(raw) {
        Some(parsed) => {
            data.set(&rule.name, parsed.clone());
            FieldOutcome::Coerced(parsed)
        }
        None => {
            errors.add(ValidationError {
                error_type,
                ..ValidationError::invalid_type(&rule.name, &rule.type_name)
            });
            FieldOutcome::Invalid
        }
    }
}

// ============================================================================
// Scalar Validators
// ============================================================================

pub fn valid_auth_role(
    rule: &Rule,
    data: &mut Record,
    ctx: &ValidatorContext<'_>,
    errors: &mut ValidationErrors,
) -> bool {
    let roles = ctx.auth_roles();
    apply_protocol_as(
        rule,
        data,
        |value| parsers::parse_auth_role(value, roles),
        ErrorType::EnumError,
        errors,
    )
    .is_ok()
}

pub fn valid_boolean(rule: &Rule, data: &mut Record, errors: &mut ValidationErrors) -> bool {
    valid_value(rule, data, parsers::parse_boolean, errors)
}

pub fn valid_date(rule: &Rule, data: &mut Record, errors: &mut ValidationErrors) -> bool {
    valid_value(rule, data, parsers::parse_date, errors)
}

pub fn valid_email(rule: &Rule, data: &mut Record, errors: &mut ValidationErrors) -> bool {
    valid_value(rule, data, parsers::parse_email, errors)
}

/// Float with optional `min,max` params
pub fn valid_float(rule: &Rule, data: &mut Record, errors: &mut ValidationErrors) -> ConfigResult<bool> {
    let bounds = NumericBounds::<f64>::from_rule(rule)?;
    Ok(match apply_protocol(rule, data, parsers::parse_float, errors) {
        FieldOutcome::Coerced(Value::Float(f)) => bounds.check(&rule.name, f, errors),
        outcome => outcome.is_ok(),
    })
}

/// Integer with optional `min,max` params
pub fn valid_integer(rule: &Rule, data: &mut Record, errors: &mut ValidationErrors) -> ConfigResult<bool> {
    let bounds = NumericBounds::<i64>::from_rule(rule)?;
    Ok(match apply_protocol(rule, data, parsers::parse_integer, errors) {
        FieldOutcome::Coerced(Value::Int(n)) => bounds.check(&rule.name, n, errors),
        outcome => outcome.is_ok(),
    })
}

pub fn valid_password(
    rule: &Rule,
    data: &mut Record,
    ctx: &ValidatorContext<'_>,
    errors: &mut ValidationErrors,
) -> bool {
    let policy = ctx.config().password;
    valid_value(rule, data, |value| parsers::parse_password(value, &policy), errors)
}

/// String with optional `minLength,maxLength,casing` params
pub fn valid_string(rule: &Rule, data: &mut Record, errors: &mut ValidationErrors) -> ConfigResult<bool> {
    let constraints = StringConstraints::from_rule(rule)?;
    Ok(match apply_protocol(rule, data, parsers::parse_string, errors) {
        FieldOutcome::Coerced(Value::String(s)) => {
            let ok = constraints.check_length(&rule.name, &s, errors);
            if let Some(casing) = constraints.casing {
                data.set(&rule.name, Value::String(casing.apply(&s)));
            }
            ok
        }
        outcome => outcome.is_ok(),
    })
}

pub fn valid_time(rule: &Rule, data: &mut Record, errors: &mut ValidationErrors) -> bool {
    valid_value(rule, data, parsers::parse_time, errors)
}

// ============================================================================
// Relational Validators
// ============================================================================

/// Strict equality between `data[rule.name]` and `data[params[0]]`
/// (see [`Value::strict_eq`]). Never writes to `data`.
pub fn valid_compare(rule: &Rule, data: &mut Record, errors: &mut ValidationErrors) -> ConfigResult<bool> {
    let other = rule.param_at(0).ok_or_else(|| ConfigError::MissingParameter {
        field: rule.name.clone(),
        type_name: rule.type_name.clone(),
        parameter: "the field to compare with",
    })?;

    let Some(value) = data.get(&rule.name) else {
        if rule.required {
            errors.add(ValidationError::missing(&rule.name));
            return Ok(false);
        }
        return Ok(true);
    };

    if data.get(other).is_some_and(|o| value.strict_eq(o)) {
        Ok(true)
    } else {
        errors.add(ValidationError::compare_mismatch(&rule.name, other));
        Ok(false)
    }
}

/// Membership in the enumeration named by `params[0]`; coerces to the
/// enumeration's spelling
pub fn valid_enum(
    rule: &Rule,
    data: &mut Record,
    ctx: &ValidatorContext<'_>,
    errors: &mut ValidationErrors,
) -> ConfigResult<bool> {
    let name = rule.param_at(0).ok_or_else(|| ConfigError::MissingParameter {
        field: rule.name.clone(),
        type_name: rule.type_name.clone(),
        parameter: "enumeration type",
    })?;
    let entry = ctx
        .enums()
        .find(name)
        .ok_or_else(|| ConfigError::UnknownEnum(name.to_string()))?;

    Ok(apply_protocol_as(
        rule,
        data,
        |value| parsers::parse_enum(value, &entry.values),
        ErrorType::EnumError,
        errors,
    )
    .is_ok())
}

/// String that must match the pattern in `params[0]`
///
/// The pattern is only tested against a parsed value: a missing required
/// field reports "is required" and nothing else, and defaults are not tested.
pub fn valid_regex(rule: &Rule, data: &mut Record, errors: &mut ValidationErrors) -> ConfigResult<bool> {
    let pattern = rule.param_at(0).ok_or_else(|| ConfigError::MissingParameter {
        field: rule.name.clone(),
        type_name: rule.type_name.clone(),
        parameter: "a pattern",
    })?;
    let re = Regex::new(pattern).map_err(|source| ConfigError::InvalidPattern {
        field: rule.name.clone(),
        pattern: pattern.to_string(),
        source,
    })?;

    Ok(match apply_protocol(rule, data, parsers::parse_string, errors) {
        FieldOutcome::Coerced(Value::String(s)) => {
            if re.is_match(&s) {
                true
            } else {
                errors.add(ValidationError::pattern_mismatch(&rule.name, pattern));
                false
            }
        }
        outcome => outcome.is_ok(),
    })
}

// ============================================================================
// Tests
// ============================================================================
