//! Enum registry
//!
//! Named, ordered lists of allowed string values, used by the `enum` and
//! `authRole` types. Names compare ASCII case-insensitively.

use crate::errors::{ConfigError, ConfigResult};
use tracing::info;

/// Name of the entry seeded from the configured auth roles
pub const AUTH_ROLES_ENUM: &str = "authRoles";

/// One named enumeration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumEntry {
    pub name: String,
    pub values: Vec<String>,
}

impl EnumEntry {
    pub fn new<I, S>(name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }
}

/// Registry of enumerations
#[derive(Debug, Clone, Default)]
pub struct EnumRegistry {
    entries: Vec<EnumEntry>,
}

impl EnumRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding a single enumeration
    pub fn with_entry(entry: EnumEntry) -> Self {
        Self {
            entries: vec![entry],
        }
    }

    /// Register a new enumeration; fails if the name is taken
    pub fn add<I, S>(&mut self, name: &str, values: I) -> ConfigResult<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if self.find(name).is_some() {
            return Err(ConfigError::DuplicateEnum(name.to_string()));
        }
        let values: Vec<String> = values.into_iter().map(Into::into).collect();
        info!(name, values = values.len(), "Registered enumeration");
        self.entries.push(EnumEntry::new(name, values));
        Ok(())
    }

    /// Look up an enumeration
    pub fn find(&self, name: &str) -> Option<&EnumEntry> {
        self.entries
            .iter()
            .find(|entry| entry.name.eq_ignore_ascii_case(name))
    }

    /// Replace the values of an existing enumeration
    pub fn update<I, S>(&mut self, name: &str, values: I) -> ConfigResult<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let entry = self
            .entries
            .iter_mut()
            .find(|entry| entry.name.eq_ignore_ascii_case(name))
            .ok_or_else(|| ConfigError::UnknownEnum(name.to_string()))?;
        entry.values = values.into_iter().map(Into::into).collect();
        info!(name, values = entry.values.len(), "Updated enumeration");
        Ok(())
    }

    /// Remove an enumeration; fails if it is not registered
    pub fn remove(&mut self, name: &str) -> ConfigResult<EnumEntry> {
        let index = self
            .entries
            .iter()
            .position(|entry| entry.name.eq_ignore_ascii_case(name))
            .ok_or_else(|| ConfigError::UnknownEnum(name.to_string()))?;
        info!(name, "Removed enumeration");
        Ok(self.entries.remove(index))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &EnumEntry> {
        self.entries.iter()
    }
}
