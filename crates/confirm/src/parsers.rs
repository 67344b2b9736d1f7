//! Parsers: raw value to canonical value
//!
//! Every parser is total. `Some(value)` is the canonical form to write back
//! into the record, `None` means the input is not a valid member of the type.
//! Parsers know nothing about rules, records or error messages.

use crate::config::PasswordPolicy;
use crate::types::Value;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;

// ============================================================================
// Pre-compiled Regex Patterns
// ============================================================================

/// `local@domain.tld`, domain with at least one dot, alphabetic TLD of 2+ chars.
/// Applied after lowercasing.
static EMAIL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[a-z]{2,}$").unwrap());

/// `H:MM[:SS][ AM|PM]`
static TIME_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(\d{1,2}):(\d{2})(?::(\d{2}))? ?([AP]M)?$").unwrap()
});

/// Leading integer portion of a string
static INTEGER_PREFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*([+-]?\d+)").unwrap());

/// Leading decimal portion of a string, exponent included
static FLOAT_PREFIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*([+-]?(?:\d+(?:\.\d*)?|\.\d+)(?:[eE][+-]?\d+)?)").unwrap()
});

const TRUE_WORDS: &[&str] = &["true", "t", "yes", "y", "on"];
const FALSE_WORDS: &[&str] = &["false", "f", "no", "n", "off"];

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%B %d, %Y", "%b %d, %Y"];

// ============================================================================
// Parsers
// ============================================================================

/// Parse a boolean
///
/// Booleans pass through. Strings match `true/t/yes/y/on` and
/// `false/f/no/n/off` case-insensitively. The numbers 1 and 0 map to true and
/// false. Everything else is invalid.
///
/// ```
/// use confirm::parsers::parse_boolean;
/// use confirm::Value;
///
/// assert_eq!(parse_boolean(&Value::from("Yes")), Some(Value::Bool(true)));
/// assert_eq!(parse_boolean(&Value::Int(0)), Some(Value::Bool(false)));
/// assert_eq!(parse_boolean(&Value::Int(2)), None);
/// ```
pub fn parse_boolean(value: &Value) -> Option<Value> {
    match value {
        Value::Bool(b) => Some(Value::Bool(*b)),
        Value::String(s) => {
            let word = s.to_lowercase();
            if TRUE_WORDS.contains(&word.as_str()) {
                Some(Value::Bool(true))
            } else if FALSE_WORDS.contains(&word.as_str()) {
                Some(Value::Bool(false))
            } else {
                None
            }
        }
        Value::Int(1) => Some(Value::Bool(true)),
        Value::Int(0) => Some(Value::Bool(false)),
        Value::Float(f) if *f == 1.0 => Some(Value::Bool(true)),
        Value::Float(f) if *f == 0.0 => Some(Value::Bool(false)),
        _ => None,
    }
}

/// Parse a point in time, normalized to UTC
///
/// Accepts dates, RFC 3339 / RFC 2822 strings, ISO-like date-times without an
/// offset (read as UTC), plain dates (midnight UTC) and epoch milliseconds.
pub fn parse_date(value: &Value) -> Option<Value> {
    match value {
        Value::Date(d) => Some(Value::Date(*d)),
        Value::String(s) => parse_date_str(s.trim()).map(Value::Date),
        Value::Int(millis) => DateTime::from_timestamp_millis(*millis).map(Value::Date),
        Value::Float(millis) if millis.is_finite() => {
            DateTime::from_timestamp_millis(millis.trunc() as i64).map(Value::Date)
        }
        _ => None,
    }
}

fn parse_date_str(s: &str) -> Option<DateTime<Utc>> {
    if s.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(s) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
            return Some(naive.and_utc());
        }
    }
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(s, format) {
            return date.and_hms_opt(0, 0, 0).map(|naive| naive.and_utc());
        }
    }
    None
}

/// Parse an email address, returning it trimmed and lowercased
///
/// ```
/// use confirm::parsers::parse_email;
/// use confirm::Value;
///
/// assert_eq!(
///     parse_email(&Value::from("  Support@Example.COM ")),
///     Some(Value::from("support@example.com"))
/// );
/// assert_eq!(parse_email(&Value::from("user@localhost")), None);
/// ```
pub fn parse_email(value: &Value) -> Option<Value> {
    let email = value.as_str()?.trim().to_lowercase();
    if EMAIL_REGEX.is_match(&email) {
        Some(Value::String(email))
    } else {
        None
    }
}

/// Match a string against `allowed` ignoring case, returning the entry as
/// spelled in `allowed`
///
/// ```
/// use confirm::parsers::parse_enum;
/// use confirm::Value;
///
/// let roles = ["Guest", "Subscriber", "Admin"];
/// assert_eq!(parse_enum(&Value::from("ADMIN"), &roles), Some(Value::from("Admin")));
/// assert_eq!(parse_enum(&Value::from("nope"), &roles), None);
/// ```
pub fn parse_enum<S: AsRef<str>>(value: &Value, allowed: &[S]) -> Option<Value> {
    let wanted = value.as_str()?.trim().to_lowercase();
    allowed
        .iter()
        .map(AsRef::as_ref)
        .find(|candidate| candidate.to_lowercase() == wanted)
        .map(|candidate| Value::String(candidate.to_string()))
}

/// [`parse_enum`] bound to the configured auth roles
pub fn parse_auth_role<S: AsRef<str>>(value: &Value, roles: &[S]) -> Option<Value> {
    parse_enum(value, roles)
}

/// Parse a float from a number or from the leading numeric portion of a string
pub fn parse_float(value: &Value) -> Option<Value> {
    let parsed = match value {
        Value::Float(f) => *f,
        Value::Int(i) => *i as f64,
        Value::String(s) => {
            let caps = FLOAT_PREFIX.captures(s)?;
            caps[1].parse::<f64>().ok()?
        }
        _ => return None,
    };
    parsed.is_finite().then_some(Value::Float(parsed))
}

/// Parse an integer from a number or from the leading digits of a string.
/// Fractions are truncated.
pub fn parse_integer(value: &Value) -> Option<Value> {
    match value {
        Value::Int(i) => Some(Value::Int(*i)),
        Value::Float(f) if f.is_finite() => {
            let truncated = f.trunc();
            // i64::MAX rounds up to 2^63 as f64, so the upper bound is exclusive
            if truncated >= i64::MIN as f64 && truncated < 9_223_372_036_854_775_808.0 {
                Some(Value::Int(truncated as i64))
            } else {
                None
            }
        }
        Value::String(s) => {
            let caps = INTEGER_PREFIX.captures(s)?;
            caps[1].parse::<i64>().ok().map(Value::Int)
        }
        _ => None,
    }
}

/// Check a password against `policy`; the password itself is returned unchanged
///
/// ```
/// use confirm::parsers::parse_password;
/// use confirm::{PasswordPolicy, Value};
///
/// let policy = PasswordPolicy::default();
/// assert!(parse_password(&Value::from("Abcd-1234"), &policy).is_some());
/// assert!(parse_password(&Value::from("abcd1234"), &policy).is_none());
/// ```
pub fn parse_password(value: &Value, policy: &PasswordPolicy) -> Option<Value> {
    let password = value.as_str()?;
    if password.chars().count() < policy.min_length {
        return None;
    }

    let counts = CharacterCounts::of(password);
    let ok = counts.upper >= policy.min_upper
        && counts.lower >= policy.min_lower
        && counts.digit >= policy.min_digit
        && counts.symbol >= policy.min_symbol;

    ok.then(|| Value::String(password.to_string()))
}

/// Character class tallies used by the password policy
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CharacterCounts {
    pub upper: usize,
    pub lower: usize,
    pub digit: usize,
    /// Anything that is not alphanumeric
    pub symbol: usize,
}

impl CharacterCounts {
    pub fn of(s: &str) -> Self {
        s.chars().fold(Self::default(), |mut counts, c| {
            if c.is_uppercase() {
                counts.upper += 1;
            } else if c.is_lowercase() {
                counts.lower += 1;
            } else if c.is_numeric() {
                counts.digit += 1;
            } else if !c.is_alphanumeric() {
                counts.symbol += 1;
            }
            counts
        })
    }
}

/// Identity for strings
pub fn parse_string(value: &Value) -> Option<Value> {
    value.as_str().map(|s| Value::String(s.to_string()))
}

/// Parse `H:MM[:SS][ AM|PM]` into 24-hour `HH:MM` or `HH:MM:SS`
///
/// Seconds are emitted only when the input carried them.
///
/// ```
/// use confirm::parsers::parse_time;
/// use confirm::Value;
///
/// assert_eq!(parse_time(&Value::from("1:30:30 PM")), Some(Value::from("13:30:30")));
/// assert_eq!(parse_time(&Value::from("25:00")), None);
/// ```
pub fn parse_time(value: &Value) -> Option<Value> {
    let caps = TIME_REGEX.captures(value.as_str()?)?;

    let mut hours: u32 = caps[1].parse().ok()?;
    let minutes: u32 = caps[2].parse().ok()?;
    let seconds: Option<u32> = match caps.get(3) {
        Some(m) => Some(m.as_str().parse().ok()?),
        None => None,
    };

    if let Some(period) = caps.get(4) {
        let pm = period.as_str().eq_ignore_ascii_case("pm");
        if pm && hours < 12 {
            hours += 12;
        } else if !pm && hours == 12 {
            hours = 0;
        }
    }

    if hours >= 24 || minutes >= 60 || seconds.is_some_and(|s| s >= 60) {
        return None;
    }

    let formatted = match seconds {
        Some(s) => format!("{:02}:{:02}:{:02}", hours, minutes, s),
        None => format!("{:02}:{:02}", hours, minutes),
    };
    Some(Value::String(formatted))
}
