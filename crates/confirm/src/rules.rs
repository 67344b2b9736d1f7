//! Rules, rule sets and the rule-set registry
//!
//! A rule is declared as a comma-separated string:
//!
//! ```text
//! name,type,required|optional,default,param1,param2,...
//! ```
//!
//! `name` and `type` are trimmed and lowercased. The default and the params
//! are kept verbatim; a param cannot itself contain a comma. A non-empty
//! default makes the rule optional even when it says `required`.

use crate::errors::{ConfigError, ConfigResult};
use crate::types::Value;
use std::str::FromStr;
use thiserror::Error;
use tracing::info;

// ============================================================================
// Rule
// ============================================================================

/// Declarative validation of one record field
#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    /// Field name (lowercased)
    pub name: String,
    /// Type name, resolved in the type registry at validation time
    pub type_name: String,
    /// Whether absence is an error
    pub required: bool,
    /// Written verbatim when the field is absent and not required
    pub default: Option<Value>,
    /// Type-specific parameters
    pub params: Vec<String>,
}

impl Rule {
    /// Create a required rule with no default and no params
    pub fn new(name: impl AsRef<str>, type_name: impl AsRef<str>) -> Self {
        Self {
            name: name.as_ref().trim().to_lowercase(),
            type_name: type_name.as_ref().trim().to_lowercase(),
            required: true,
            default: None,
            params: Vec::new(),
        }
    }

    /// Set whether the field is required
    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Mark the field optional
    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    /// Set the default value; a field with a default is never required
    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self.required = false;
        self
    }

    /// Append one parameter
    pub fn param(mut self, param: impl Into<String>) -> Self {
        self.params.push(param.into());
        self
    }

    /// Append several parameters
    pub fn params<I, S>(mut self, params: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.params.extend(params.into_iter().map(Into::into));
        self
    }

    /// Parameter at `index`, treating an empty token as absent
    pub fn param_at(&self, index: usize) -> Option<&str> {
        self.params
            .get(index)
            .map(String::as_str)
            .filter(|p| !p.is_empty())
    }
}

/// Why a rule string was rejected
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RuleParseError {
    #[error("Name of property is missing")]
    MissingName,

    #[error("Type of property is missing")]
    MissingType,

    #[error("Exists is missing")]
    MissingExistence,

    #[error("Exists must be \"required\" or \"optional\" (got \"{0}\")")]
    InvalidExistence(String),

    #[error("\"{0}\" is type \"enum\" and must specify enumeration type")]
    MissingEnumName(String),
}

impl FromStr for Rule {
    type Err = RuleParseError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let mut parts = text.split(',');

        let name = parts.next().unwrap_or_default().trim().to_lowercase();
        if name.is_empty() {
            return Err(RuleParseError::MissingName);
        }

        let type_name = parts.next().unwrap_or_default().trim().to_lowercase();
        if type_name.is_empty() {
            return Err(RuleParseError::MissingType);
        }

        let required = match parts.next().unwrap_or_default().trim().to_lowercase().as_str() {
            "" => return Err(RuleParseError::MissingExistence),
            "required" => true,
            "optional" => false,
            other => return Err(RuleParseError::InvalidExistence(other.to_string())),
        };

        let default = parts
            .next()
            .filter(|d| !d.is_empty())
            .map(|d| Value::String(d.to_string()));

        let params: Vec<String> = parts.map(str::to_string).collect();

        if type_name == "enum" && params.first().map_or(true, |p| p.is_empty()) {
            return Err(RuleParseError::MissingEnumName(name));
        }

        Ok(Self {
            name,
            type_name,
            // A field with a default is never required
            required: required && default.is_none(),
            default,
            params,
        })
    }
}

// ============================================================================
// Rule Set
// ============================================================================

/// Named, ordered collection of rules
#[derive(Debug, Clone, PartialEq)]
pub struct RuleSet {
    /// Normalized title (trimmed, lowercased)
    pub title: String,
    /// Rules in declaration order
    pub rules: Vec<Rule>,
}

impl RuleSet {
    /// Parse a titled list of rule strings
    pub fn parse<S: AsRef<str>>(title: &str, texts: &[S]) -> ConfigResult<Self> {
        if texts.is_empty() {
            return Err(ConfigError::EmptyRuleSet(title.to_string()));
        }

        let rules = texts
            .iter()
            .map(|text| {
                text.as_ref()
                    .parse::<Rule>()
                    .map_err(|e| ConfigError::RuleSyntax {
                        title: title.to_string(),
                        message: e.to_string(),
                    })
            })
            .collect::<ConfigResult<Vec<_>>>()?;

        Ok(Self {
            title: normalize_title(title),
            rules,
        })
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Titles are trimmed and lowercased for both registration and lookup
pub fn normalize_title(title: &str) -> String {
    title.trim().to_lowercase()
}

// ============================================================================
// Rule Registry
// ============================================================================

/// Registry of rule sets, keyed by normalized title
#[derive(Debug, Clone, Default)]
pub struct RuleRegistry {
    sets: Vec<RuleSet>,
}

impl RuleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and register a rule set. Fails without touching the registry if
    /// the title is taken or any rule string is malformed.
    pub fn add<S: AsRef<str>>(&mut self, title: &str, texts: &[S]) -> ConfigResult<&RuleSet> {
        if self.find(title).is_some() {
            return Err(ConfigError::DuplicateRuleSet(title.to_string()));
        }
        let set = RuleSet::parse(title, texts)?;
        Ok(self.insert(set))
    }

    /// Register rules built in code
    pub fn add_rules(&mut self, title: &str, rules: Vec<Rule>) -> ConfigResult<&RuleSet> {
        if self.find(title).is_some() {
            return Err(ConfigError::DuplicateRuleSet(title.to_string()));
        }
        if rules.is_empty() {
            return Err(ConfigError::EmptyRuleSet(title.to_string()));
        }
        Ok(self.insert(RuleSet {
            title: normalize_title(title),
            rules,
        }))
    }

    fn insert(&mut self, set: RuleSet) -> &RuleSet {
        info!(title = %set.title, rules = set.rules.len(), "Registered rule set");
        self.sets.push(set);
        &self.sets[self.sets.len() - 1]
    }

    /// Find a rule set by title
    pub fn find(&self, title: &str) -> Option<&RuleSet> {
        let title = normalize_title(title);
        self.sets.iter().find(|set| set.title == title)
    }

    /// Number of registered rule sets
    pub fn len(&self) -> usize {
        self.sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RuleSet> {
        self.sets.iter()
    }
}
