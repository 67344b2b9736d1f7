//! Engine configuration
//!
//! Password policy and the auth-role list. Read once, when the engine is built.
//!
//! | Variable              | Default                  |
//! |-----------------------|--------------------------|
//! | `AUTH_ROLES`          | `Guest,Subscriber,Admin` |
//! | `PASSWORD_MIN_LENGTH` | `8`                      |
//! | `PASSWORD_MIN_UPPER`  | `1`                      |
//! | `PASSWORD_MIN_LOWER`  | `1`                      |
//! | `PASSWORD_MIN_DIGIT`  | `1`                      |
//! | `PASSWORD_MIN_SYMBOL` | `1`                      |

use tracing::warn;

/// Roles accepted by the `authRole` type when `AUTH_ROLES` is unset
pub const DEFAULT_AUTH_ROLES: &[&str] = &["Guest", "Subscriber", "Admin"];

// ============================================================================
// Password Policy
// ============================================================================

/// Minimum length and per-class character counts for the `password` type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordPolicy {
    /// Minimum length in characters
    pub min_length: usize,
    /// Minimum uppercase letters
    pub min_upper: usize,
    /// Minimum lowercase letters
    pub min_lower: usize,
    /// Minimum digits
    pub min_digit: usize,
    /// Minimum symbols (anything that is not alphanumeric)
    pub min_symbol: usize,
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self {
            min_length: 8,
            min_upper: 1,
            min_lower: 1,
            min_digit: 1,
            min_symbol: 1,
        }
    }
}

impl PasswordPolicy {
    pub fn min_length(mut self, n: usize) -> Self {
        self.min_length = n;
        self
    }

    pub fn min_upper(mut self, n: usize) -> Self {
        self.min_upper = n;
        self
    }

    pub fn min_lower(mut self, n: usize) -> Self {
        self.min_lower = n;
        self
    }

    pub fn min_digit(mut self, n: usize) -> Self {
        self.min_digit = n;
        self
    }

    pub fn min_symbol(mut self, n: usize) -> Self {
        self.min_symbol = n;
        self
    }
}

// ============================================================================
// Engine Config
// ============================================================================

/// Configuration consumed by the built-in parsers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Canonical role names for the `authRole` type
    pub auth_roles: Vec<String>,
    /// Policy for the `password` type
    pub password: PasswordPolicy,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            auth_roles: DEFAULT_AUTH_ROLES.iter().map(|r| r.to_string()).collect(),
            password: PasswordPolicy::default(),
        }
    }
}

impl EngineConfig {
    /// Create a config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a config from the process environment.
    ///
    /// Missing or empty variables keep their defaults. A present but
    /// unparseable number also keeps its default and logs a warning.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = PasswordPolicy::default();
        let auth_roles = match lookup("AUTH_ROLES") {
            Some(raw) if !raw.trim().is_empty() => raw
                .split(',')
                .map(|role| role.trim().to_string())
                .filter(|role| !role.is_empty())
                .collect(),
            _ => DEFAULT_AUTH_ROLES.iter().map(|r| r.to_string()).collect(),
        };

        Self {
            auth_roles,
            password: PasswordPolicy {
                min_length: env_usize(&lookup, "PASSWORD_MIN_LENGTH", defaults.min_length),
                min_upper: env_usize(&lookup, "PASSWORD_MIN_UPPER", defaults.min_upper),
                min_lower: env_usize(&lookup, "PASSWORD_MIN_LOWER", defaults.min_lower),
                min_digit: env_usize(&lookup, "PASSWORD_MIN_DIGIT", defaults.min_digit),
                min_symbol: env_usize(&lookup, "PASSWORD_MIN_SYMBOL", defaults.min_symbol),
            },
        }
    }

    /// Replace the auth-role list
    pub fn auth_roles<I, S>(mut self, roles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.auth_roles = roles.into_iter().map(Into::into).collect();
        self
    }

    /// Replace the password policy
    pub fn password(mut self, policy: PasswordPolicy) -> Self {
        self.password = policy;
        self
    }
}

fn env_usize<F>(lookup: &F, key: &str, default: usize) -> usize
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(key) else {
        return default;
    };
    let raw = raw.trim();
    if raw.is_empty() {
        return default;
    }
    match raw.parse::<usize>() {
        Ok(n) => n,
        Err(e) => {
            warn!(key, value = raw, error = %e, default, "Ignoring unparseable setting");
            default
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
