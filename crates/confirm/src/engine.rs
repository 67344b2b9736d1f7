//! Rule engine
//!
//! [`RuleEngine`] owns the configuration and the three registries (types,
//! enumerations, rule sets). Validation borrows it immutably, so a built
//! engine can be shared across threads behind an `Arc`.

use crate::chain::Checker;
use crate::config::EngineConfig;
use crate::custom_validators::ValidatorContext;
use crate::enums::{EnumEntry, EnumRegistry, AUTH_ROLES_ENUM};
use crate::errors::{ConfigError, ConfigResult, ValidationErrors};
use crate::registry::TypeRegistry;
use crate::rules::{Rule, RuleRegistry, RuleSet};
use crate::types::Record;
use crate::validators::ValidatorKind;
use tracing::{debug, trace};

/// Validation engine
#[derive(Debug, Clone)]
pub struct RuleEngine {
    config: EngineConfig,
    types: TypeRegistry,
    enums: EnumRegistry,
    rules: RuleRegistry,
}

impl Default for RuleEngine {
    fn default() -> Self {
        Self::with_config(EngineConfig::default())
    }
}

impl RuleEngine {
    /// Engine with default configuration and the built-in types
    pub fn new() -> Self {
        Self::default()
    }

    /// Engine configured from the process environment
    pub fn from_env() -> Self {
        Self::with_config(EngineConfig::from_env())
    }

    /// Engine with an explicit configuration.
    ///
    /// Registers the built-in types and seeds the `authRoles` enumeration
    /// from `config.auth_roles`.
    pub fn with_config(config: EngineConfig) -> Self {
        let enums = EnumRegistry::with_entry(EnumEntry::new(
            AUTH_ROLES_ENUM,
            config.auth_roles.iter().cloned(),
        ));
        Self {
            config,
            types: TypeRegistry::with_builtins(),
            enums,
            rules: RuleRegistry::new(),
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn types(&self) -> &TypeRegistry {
        &self.types
    }

    pub fn types_mut(&mut self) -> &mut TypeRegistry {
        &mut self.types
    }

    pub fn enums(&self) -> &EnumRegistry {
        &self.enums
    }

    pub fn enums_mut(&mut self) -> &mut EnumRegistry {
        &mut self.enums
    }

    pub fn rules(&self) -> &RuleRegistry {
        &self.rules
    }

    pub fn rules_mut(&mut self) -> &mut RuleRegistry {
        &mut self.rules
    }

    /// Context handed to validators
    pub fn context(&self) -> ValidatorContext<'_> {
        ValidatorContext::new(&self.config, &self.enums)
    }

    // ========================================================================
    // Rules and Validation
    // ========================================================================

    /// Parse and register a titled rule set
    pub fn add_rules<S: AsRef<str>>(&mut self, title: &str, texts: &[S]) -> ConfigResult<&RuleSet> {
        self.rules.add(title, texts)
    }

    /// Validate `data` against the rule set registered under `title`.
    ///
    /// Every rule runs, in declaration order, and writes coerced values or
    /// defaults back into `data`. Data problems are collected in the returned
    /// [`ValidationErrors`]; an empty collection means the record is valid.
    ///
    /// Fails with [`ConfigError::UnknownRuleSet`] before touching `data` if
    /// the title is not registered, and with [`ConfigError::UnknownType`] if
    /// any rule names an unregistered type.
    pub fn validate(&self, title: &str, data: &mut Record) -> ConfigResult<ValidationErrors> {
        let set = self
            .rules
            .find(title)
            .ok_or_else(|| ConfigError::UnknownRuleSet(title.to_string()))?;

        let plan = set
            .rules
            .iter()
            .map(|rule| self.resolve(rule).map(|validator| (rule, validator)))
            .collect::<ConfigResult<Vec<_>>>()?;

        debug!(title = %set.title, rules = plan.len(), "Validating record");

        let ctx = self.context();
        let mut errors = ValidationErrors::new();
        for (rule, validator) in plan {
            let passed = validator.run(rule, data, &ctx, &mut errors)?;
            trace!(field = %rule.name, type_name = %rule.type_name, passed, "Checked field");
        }

        debug!(title = %set.title, errors = errors.len(), "Validation finished");
        Ok(errors)
    }

    /// Validate a single rule, appending to `errors`
    pub fn validate_rule(
        &self,
        rule: &Rule,
        data: &mut Record,
        errors: &mut ValidationErrors,
    ) -> ConfigResult<bool> {
        let validator = self.resolve(rule)?;
        validator.run(rule, data, &self.context(), errors)
    }

    /// Start a chain of ad-hoc checks against `data`
    pub fn checker<'a>(&'a self, data: &'a mut Record) -> Checker<'a> {
        Checker::new(self, data)
    }

    fn resolve(&self, rule: &Rule) -> ConfigResult<&ValidatorKind> {
        self.types
            .find(&rule.type_name)
            .map(|entry| &entry.validator)
            .ok_or_else(|| ConfigError::UnknownType(rule.type_name.clone()))
    }
}
