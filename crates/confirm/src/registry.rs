//! Type registry
//!
//! Maps type names to the [`ValidatorKind`] that checks them. Type names
//! compare ASCII case-insensitively, so the built-in `authRole` matches the
//! lowercased `authrole` coming out of a parsed rule.

use crate::errors::{ConfigError, ConfigResult};
use crate::validators::ValidatorKind;
use tracing::info;

/// One registered type
#[derive(Debug, Clone, PartialEq)]
pub struct TypeEntry {
    pub type_name: String,
    pub validator: ValidatorKind,
}

/// Registry of validator types
#[derive(Debug, Clone, Default)]
pub struct TypeRegistry {
    entries: Vec<TypeEntry>,
}

impl TypeRegistry {
    /// Empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry seeded with the built-in types
    pub fn with_builtins() -> Self {
        let entries = ValidatorKind::builtins()
            .into_iter()
            .map(|(type_name, validator)| TypeEntry {
                type_name: type_name.to_string(),
                validator,
            })
            .collect();
        Self { entries }
    }

    /// Register a new type; fails if the name is taken
    pub fn add(&mut self, type_name: &str, validator: ValidatorKind) -> ConfigResult<()> {
        if self.find(type_name).is_some() {
            return Err(ConfigError::DuplicateType(type_name.to_string()));
        }
        info!(type_name, validator = validator.name(), "Registered type");
        self.entries.push(TypeEntry {
            type_name: type_name.to_string(),
            validator,
        });
        Ok(())
    }

    /// Look up a type
    pub fn find(&self, type_name: &str) -> Option<&TypeEntry> {
        self.entries
            .iter()
            .find(|entry| entry.type_name.eq_ignore_ascii_case(type_name))
    }

    /// Replace the validator of an existing type
    pub fn update(&mut self, type_name: &str, validator: ValidatorKind) -> ConfigResult<()> {
        let entry = self
            .entries
            .iter_mut()
            .find(|entry| entry.type_name.eq_ignore_ascii_case(type_name))
            .ok_or_else(|| ConfigError::UnknownType(type_name.to_string()))?;
        info!(type_name, validator = validator.name(), "Updated type");
        entry.validator = validator;
        Ok(())
    }

    /// Remove a type; fails if it is not registered
    pub fn remove(&mut self, type_name: &str) -> ConfigResult<TypeEntry> {
        let index = self
            .entries
            .iter()
            .position(|entry| entry.type_name.eq_ignore_ascii_case(type_name))
            .ok_or_else(|| ConfigError::UnknownType(type_name.to_string()))?;
        info!(type_name, "Removed type");
        Ok(self.entries.remove(index))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TypeEntry> {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::custom_validators::ParserValidator;
    use crate::parsers::parse_string;

    #[test]
    fn test_builtins() {
        let types = TypeRegistry::with_builtins();
        assert_eq!(types.len(), 12);

        let names: Vec<&str> = types.iter().map(|e| e.type_name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "authRole", "boolean", "compare", "date", "email", "enum", "float", "integer",
                "password", "regex", "string", "time"
            ]
        );
        assert_eq!(types.find("email").unwrap().validator, ValidatorKind::Email);
        assert_eq!(types.find("authrole").unwrap().validator, ValidatorKind::AuthRole);
        assert!(types.find("zip").is_none());
    }

    #[test]
    fn test_add_duplicate() {
        let mut types = TypeRegistry::with_builtins();
        let err = types.add("Email", ValidatorKind::String).unwrap_err();
        assert!(matches!(err, ConfigError::DuplicateType(_)));
        assert_eq!(types.find("email").unwrap().validator, ValidatorKind::Email);
        assert_eq!(types.len(), 12);
    }

    #[test]
    fn test_add_update_remove_custom() {
        let mut types = TypeRegistry::new();
        let custom = ValidatorKind::custom(ParserValidator::new(parse_string));

        types.add("code", custom.clone()).unwrap();
        assert_eq!(types.find("CODE").unwrap().validator, custom);

        types.update("code", ValidatorKind::String).unwrap();
        assert_eq!(types.find("code").unwrap().validator, ValidatorKind::String);

        let removed = types.remove("code").unwrap();
        assert_eq!(removed.type_name, "code");
        assert!(types.is_empty());
    }

    #[test]
    fn test_absent_type_errors() {
        let mut types = TypeRegistry::new();
        assert!(matches!(
            types.update("missing", ValidatorKind::Date),
            Err(ConfigError::UnknownType(_))
        ));
        assert!(matches!(types.remove("missing"), Err(ConfigError::UnknownType(_))));
    }
}
