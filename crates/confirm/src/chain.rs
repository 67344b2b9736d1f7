//! Chained ad-hoc checks
//!
//! For one-off validation without registering a rule set:
//!
//! ```rust
//! use confirm::{Record, RuleEngine, Value};
//!
//! let engine = RuleEngine::new();
//! let mut record = Record::new()
//!     .with("email", "Jane@Example.com")
//!     .with("age", "17");
//!
//! let errors = engine
//!     .checker(&mut record)
//!     .is_email("email", true)
//!     .is_integer("age", Some(18), None)
//!     .finish()
//!     .unwrap();
//!
//! assert_eq!(errors.messages(), vec!["\"age\" cannot be less than 18".to_string()]);
//! assert_eq!(record.get("email"), Some(&Value::from("jane@example.com")));
//! ```

use crate::engine::RuleEngine;
use crate::errors::{ConfigError, ConfigResult, ErrorType, ValidationErrors};
use crate::parsers::parse_enum;
use crate::rules::Rule;
use crate::types::Record;
use crate::validators::apply_protocol_as;

/// Builder that runs one rule per call against a borrowed record
///
/// The first configuration error is kept and every later check is skipped;
/// [`Checker::finish`] returns it.
pub struct Checker<'a> {
    engine: &'a RuleEngine,
    data: &'a mut Record,
    errors: ValidationErrors,
    failure: Option<ConfigError>,
}

impl<'a> Checker<'a> {
    pub fn new(engine: &'a RuleEngine, data: &'a mut Record) -> Self {
        Self {
            engine,
            data,
            errors: ValidationErrors::new(),
            failure: None,
        }
    }

    /// Run an arbitrary rule
    pub fn check(mut self, rule: Rule) -> Self {
        if self.failure.is_none() {
            if let Err(e) = self.engine.validate_rule(&rule, self.data, &mut self.errors) {
                self.failure = Some(e);
            }
        }
        self
    }

    pub fn is_boolean(self, name: &str, required: bool) -> Self {
        self.check(Rule::new(name, "boolean").required(required))
    }

    pub fn is_date(self, name: &str, required: bool) -> Self {
        self.check(Rule::new(name, "date").required(required))
    }

    pub fn is_email(self, name: &str, required: bool) -> Self {
        self.check(Rule::new(name, "email").required(required))
    }

    pub fn is_time(self, name: &str, required: bool) -> Self {
        self.check(Rule::new(name, "time").required(required))
    }

    pub fn is_password(self, name: &str, required: bool) -> Self {
        self.check(Rule::new(name, "password").required(required))
    }

    pub fn is_auth_role(self, name: &str, required: bool) -> Self {
        self.check(Rule::new(name, "authRole").required(required))
    }

    /// Required integer within optional inclusive bounds
    pub fn is_integer(self, name: &str, min: Option<i64>, max: Option<i64>) -> Self {
        self.check(Rule::new(name, "integer").params(bounds(min, max)))
    }

    /// Required float within optional inclusive bounds
    pub fn is_float(self, name: &str, min: Option<f64>, max: Option<f64>) -> Self {
        self.check(Rule::new(name, "float").params(bounds(min, max)))
    }

    /// Required string with optional length bounds (in characters)
    pub fn is_string(self, name: &str, min_length: Option<usize>, max_length: Option<usize>) -> Self {
        self.check(Rule::new(name, "string").params(bounds(min_length, max_length)))
    }

    /// Required member of a registered enumeration
    pub fn is_enum(self, name: &str, enum_name: &str) -> Self {
        self.check(Rule::new(name, "enum").param(enum_name))
    }

    /// Required member of an inline list, without registering it
    pub fn is_one_of<S: AsRef<str>>(mut self, name: &str, values: &[S]) -> Self {
        if self.failure.is_none() {
            let rule = Rule::new(name, "enum");
            apply_protocol_as(
                &rule,
                self.data,
                |value| parse_enum(value, values),
                ErrorType::EnumError,
                &mut self.errors,
            );
        }
        self
    }

    /// Required string matching `pattern`
    pub fn is_regex(self, name: &str, pattern: &str) -> Self {
        self.check(Rule::new(name, "regex").param(pattern))
    }

    /// Required field strictly equal to `other`
    pub fn is_duplicate(self, name: &str, other: &str) -> Self {
        self.check(Rule::new(name, "compare").param(other))
    }

    /// Data errors gathered so far
    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    /// Finish the chain
    pub fn finish(self) -> ConfigResult<ValidationErrors> {
        match self.failure {
            Some(e) => Err(e),
            None => Ok(self.errors),
        }
    }
}

fn bounds<T: ToString>(min: Option<T>, max: Option<T>) -> Vec<String> {
    match (min, max) {
        (None, None) => Vec::new(),
        (min, max) => vec![
            min.map(|v| v.to_string()).unwrap_or_default(),
            max.map(|v| v.to_string()).unwrap_or_default(),
        ],
    }
}
