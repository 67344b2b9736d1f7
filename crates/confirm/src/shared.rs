//! Process-wide engine
//!
//! For applications that register their rules once at startup and validate
//! from anywhere. The engine is built from the environment on first use.

use crate::engine::RuleEngine;
use crate::errors::{ConfigResult, ValidationErrors};
use crate::types::Record;
use once_cell::sync::Lazy;
use parking_lot::RwLock;

static ENGINE: Lazy<RwLock<RuleEngine>> = Lazy::new(|| RwLock::new(RuleEngine::from_env()));

/// Get the global engine
pub fn engine() -> &'static RwLock<RuleEngine> {
    &ENGINE
}

/// Register a rule set on the global engine
pub fn add_rules<S: AsRef<str>>(title: &str, texts: &[S]) -> ConfigResult<()> {
    ENGINE.write().add_rules(title, texts).map(|_| ())
}

/// Validate against a rule set on the global engine
pub fn validate(title: &str, data: &mut Record) -> ConfigResult<ValidationErrors> {
    ENGINE.read().validate(title, data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Value;

    #[test]
    fn test_shared_engine() {
        add_rules("shared engine test", &["flag,boolean,optional,false"]).unwrap();
        assert!(add_rules("Shared Engine Test", &["flag,boolean,required"]).is_err());

        let mut data = Record::new().with("flag", "on");
        let errors = validate("shared engine test", &mut data).unwrap();
        assert!(errors.is_empty());
        assert_eq!(data.get("flag"), Some(&Value::Bool(true)));

        assert!(engine().read().rules().find("shared engine test").is_some());
    }
}
