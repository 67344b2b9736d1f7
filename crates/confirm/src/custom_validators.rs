//! Custom type support
//!
//! Types registered at runtime implement [`TypeValidator`]. Most custom types
//! only need a parser, in which case [`ParserValidator`] wraps it in the same
//! required/default/parse/coerce protocol the built-in scalar types use.
//!
//! # Example
//!
//! ```rust
//! use confirm::{ParserValidator, Record, RuleEngine, ValidatorKind, Value};
//!
//! let mut engine = RuleEngine::new();
//! engine
//!     .types_mut()
//!     .add(
//!         "zip",
//!         ValidatorKind::custom(ParserValidator::new(|value: &Value| {
//!             let s = value.as_str()?.trim();
//!             (s.len() == 5 && s.chars().all(|c| c.is_ascii_digit()))
//!                 .then(|| Value::from(s))
//!         })),
//!     )
//!     .unwrap();
//! engine.add_rules("address", &["zip,zip,required"]).unwrap();
//!
//! let mut record = Record::new().with("zip", " 90210 ");
//! let errors = engine.validate("address", &mut record).unwrap();
//! assert!(errors.is_empty());
//! assert_eq!(record.get("zip"), Some(&Value::from("90210")));
//! ```

use crate::config::EngineConfig;
use crate::enums::{EnumRegistry, AUTH_ROLES_ENUM};
use crate::errors::{ConfigResult, ValidationErrors};
use crate::rules::Rule;
use crate::types::{Record, Value};
use crate::validators::valid_value;
use std::sync::Arc;

// ============================================================================
// Validator Context
// ============================================================================

/// Read-only view of the engine handed to every validator
#[derive(Debug, Clone, Copy)]
pub struct ValidatorContext<'a> {
    config: &'a EngineConfig,
    enums: &'a EnumRegistry,
}

impl<'a> ValidatorContext<'a> {
    pub fn new(config: &'a EngineConfig, enums: &'a EnumRegistry) -> Self {
        Self { config, enums }
    }

    pub fn config(&self) -> &'a EngineConfig {
        self.config
    }

    pub fn enums(&self) -> &'a EnumRegistry {
        self.enums
    }

    /// Roles accepted by `authRole`: the `authRoles` enumeration when
    /// registered, the configured list otherwise
    pub fn auth_roles(&self) -> &'a [String] {
        self.enums
            .find(AUTH_ROLES_ENUM)
            .map(|entry| entry.values.as_slice())
            .unwrap_or(self.config.auth_roles.as_slice())
    }
}

// ============================================================================
// Type Validator Trait
// ============================================================================

/// Validation logic for one registered type
///
/// Returns `Ok(true)` when the field passed, `Ok(false)` after appending one
/// or more messages to `errors`, and `Err` when the rule itself is unusable.
pub trait TypeValidator: Send + Sync {
    fn validate(
        &self,
        rule: &Rule,
        data: &mut Record,
        ctx: &ValidatorContext<'_>,
        errors: &mut ValidationErrors,
    ) -> ConfigResult<bool>;
}

/// Type alias for shared custom validators
pub type BoxedTypeValidator = Arc<dyn TypeValidator>;

// ============================================================================
// Function-based Validators (for ergonomic API)
// ============================================================================

/// Create a type validator from a function
pub struct FnTypeValidator<F>
where
    F: Fn(&Rule, &mut Record, &ValidatorContext<'_>, &mut ValidationErrors) -> ConfigResult<bool>
        + Send
        + Sync,
{
    validate_fn: F,
}

impl<F> FnTypeValidator<F>
where
    F: Fn(&Rule, &mut Record, &ValidatorContext<'_>, &mut ValidationErrors) -> ConfigResult<bool>
        + Send
        + Sync,
{
    pub fn new(validate_fn: F) -> Self {
        Self { validate_fn }
    }
}

impl<F> TypeValidator for FnTypeValidator<F>
where
    F: Fn(&Rule, &mut Record, &ValidatorContext<'_>, &mut ValidationErrors) -> ConfigResult<bool>
        + Send
        + Sync,
{
    fn validate(
        &self,
        rule: &Rule,
        data: &mut Record,
        ctx: &ValidatorContext<'_>,
        errors: &mut ValidationErrors,
    ) -> ConfigResult<bool> {
        (self.validate_fn)(rule, data, ctx, errors)
    }
}

/// Run the shared field protocol around a custom parser
pub struct ParserValidator<F>
where
    F: Fn(&Value) -> Option<Value> + Send + Sync,
{
    parser: F,
}

impl<F> ParserValidator<F>
where
    F: Fn(&Value) -> Option<Value> + Send + Sync,
{
    pub fn new(parser: F) -> Self {
        Self { parser }
    }
}

impl<F> TypeValidator for ParserValidator<F>
where
    F: Fn(&Value) -> Option<Value> + Send + Sync,
{
    fn validate(
        &self,
        rule: &Rule,
        data: &mut Record,
        _ctx: &ValidatorContext<'_>,
        errors: &mut ValidationErrors,
    ) -> ConfigResult<bool> {
        Ok(valid_value(rule, data, &self.parser, errors))
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::{ErrorType, ValidationError};

    #[test]
    fn test_auth_roles_prefers_enum_entry() {
        let config = EngineConfig::default();
        let mut enums = EnumRegistry::new();

        let ctx = ValidatorContext::new(&config, &enums);
        assert_eq!(ctx.auth_roles(), config.auth_roles.as_slice());

        enums.add(AUTH_ROLES_ENUM, ["Owner"]).unwrap();
        let ctx = ValidatorContext::new(&config, &enums);
        assert_eq!(ctx.auth_roles(), ["Owner".to_string()].as_slice());
    }

    #[test]
    fn test_fn_type_validator() {
        let validator = FnTypeValidator::new(|rule, data, _ctx, errors| {
            match data.get(&rule.name).and_then(Value::as_i64) {
                Some(n) if n % 2 == 0 => Ok(true),
                _ => {
                    errors.add(ValidationError::new(
                        rule.name.as_str(),
                        format!("\"{}\" must be even", rule.name),
                        ErrorType::Custom,
                    ));
                    Ok(false)
                }
            }
        });

        let config = EngineConfig::default();
        let enums = EnumRegistry::new();
        let ctx = ValidatorContext::new(&config, &enums);
        let rule = Rule::new("count", "even");
        let mut errors = ValidationErrors::new();

        let mut data = Record::new().with("count", 4);
        assert!(validator.validate(&rule, &mut data, &ctx, &mut errors).unwrap());

        let mut data = Record::new().with("count", 3);
        assert!(!validator.validate(&rule, &mut data, &ctx, &mut errors).unwrap());
        assert_eq!(errors.messages(), vec!["\"count\" must be even".to_string()]);
    }

    #[test]
    fn test_parser_validator_uses_protocol() {
        let validator = ParserValidator::new(|value: &Value| {
            value.as_str().map(|s| Value::String(s.to_uppercase()))
        });

        let config = EngineConfig::default();
        let enums = EnumRegistry::new();
        let ctx = ValidatorContext::new(&config, &enums);
        let rule = Rule::new("code", "upper");
        let mut errors = ValidationErrors::new();

        let mut data = Record::new().with("code", "abc");
        assert!(validator.validate(&rule, &mut data, &ctx, &mut errors).unwrap());
        assert_eq!(data.get("code"), Some(&Value::from("ABC")));

        let mut data = Record::new();
        assert!(!validator.validate(&rule, &mut data, &ctx, &mut errors).unwrap());
        assert_eq!(errors.messages(), vec!["\"code\" is required".to_string()]);
    }
}
