//! Confirm
//!
//! Declarative validation of loosely-typed records.
//!
//! Rules are declared as short strings, grouped under a title, and checked
//! against a [`Record`]. Validation coerces each field to its canonical form
//! in place (trimmed lowercase emails, 24-hour times, real booleans and
//! numbers) and collects every data problem as a human-readable message.
//!
//! # Architecture
//!
//! ```text
//! RuleEngine
//!   ├── EngineConfig    password policy, auth roles
//!   ├── TypeRegistry    type name -> ValidatorKind (built-ins + custom)
//!   ├── EnumRegistry    enumeration name -> allowed values
//!   └── RuleRegistry    title -> RuleSet
//! ```
//!
//! # Features
//!
//! - **Default**: `serde`, JSON interop for [`Value`] and [`Record`]
//!
//! # Example
//!
//! ```rust
//! use confirm::{Record, RuleEngine, Value};
//!
//! let mut engine = RuleEngine::new();
//! engine
//!     .add_rules(
//!         "sign up",
//!         &[
//!             "email,email,required",
//!             "password,password,required",
//!             "confirmPassword,compare,required,,password",
//!             "newsletter,boolean,optional,false",
//!         ],
//!     )
//!     .unwrap();
//!
//! let mut record = Record::new()
//!     .with("email", " Jane@Example.com ")
//!     .with("password", "Tr0ub4dor&3")
//!     .with("confirmPassword", "Tr0ub4dor&3");
//!
//! let errors = engine.validate("sign up", &mut record).unwrap();
//! assert!(errors.is_empty());
//! assert_eq!(record.get("email"), Some(&Value::from("jane@example.com")));
//! assert_eq!(record.get("newsletter"), Some(&Value::from("false")));
//!
//! let mut record = Record::new().with("email", "jane");
//! let errors = engine.validate("sign up", &mut record).unwrap();
//! assert_eq!(
//!     errors.messages(),
//!     vec![
//!         "\"email\" is not a valid \"email\"".to_string(),
//!         "\"password\" is required".to_string(),
//!         "\"confirmpassword\" is required".to_string(),
//!     ]
//! );
//! ```

// Public modules
pub mod chain;
pub mod config;
pub mod constraints;
pub mod custom_validators;
pub mod engine;
pub mod enums;
pub mod errors;
pub mod parsers;
pub mod registry;
pub mod rules;
pub mod shared;
pub mod strings;
pub mod types;
pub mod validators;

// Re-export commonly used types
pub use chain::Checker;
pub use config::{EngineConfig, PasswordPolicy};
pub use custom_validators::{
    BoxedTypeValidator, FnTypeValidator, ParserValidator, TypeValidator, ValidatorContext,
};
pub use engine::RuleEngine;
pub use enums::{EnumEntry, EnumRegistry};
pub use errors::{ConfigError, ConfigResult, ErrorType, ValidationError, ValidationErrors};
pub use registry::{TypeEntry, TypeRegistry};
pub use rules::{Rule, RuleParseError, RuleRegistry, RuleSet};
pub use types::{Record, Value};
pub use validators::{valid_value, FieldOutcome, ValidatorKind};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
