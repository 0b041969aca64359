//! PhoneNumber value object and the fixed 11-digit phone rules.

use super::errors::ValidationError;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// An optional leading `+` followed by exactly 11 ASCII digits.
///
/// `\d` would also match non-ASCII decimal digits, which `substitute` cannot
/// slice by byte offset.
static JUST_DIGITS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+?[0-9]{11}$").expect("Failed to compile phone digits regex"));

/// Characters accepted as visual separators inside a phone number.
const FORMATTING_CHARS: [char; 5] = ['/', '-', '(', ')', ' '];

/// Remove every formatting character from a raw phone number.
fn simplify(raw: &str) -> String {
    raw.chars().filter(|c| !FORMATTING_CHARS.contains(c)).collect()
}

/// Decide whether `raw` is a valid phone number.
///
/// After stripping `/`, `-`, `(`, `)` and spaces the remainder must be an
/// optional `+` followed by exactly 11 digits.
pub fn is_valid(raw: &str) -> bool {
    JUST_DIGITS.is_match(&simplify(raw))
}

/// Render `raw` in the canonical `PP(SS)NNN-NNNN` form.
///
/// Returns `None` when the number is not valid. A leading `+` is preserved.
///
/// # Example
///
/// ```
/// use person_registry::domain::phone;
///
/// assert_eq!(phone::format("0630/123-4567").as_deref(), Some("06(30)123-4567"));
/// assert_eq!(phone::format("+36 30 1234567").as_deref(), Some("+36(30)123-4567"));
/// assert_eq!(phone::format("0630123456"), None);
/// ```
pub fn format(raw: &str) -> Option<String> {
    let simplified = simplify(raw);
    if !JUST_DIGITS.is_match(&simplified) {
        return None;
    }

    match simplified.strip_prefix('+') {
        Some(digits) => Some(format!("+{}", substitute(digits))),
        None => Some(substitute(&simplified)),
    }
}

/// Split 11 ASCII digits into prefix, supplier and the two number parts.
fn substitute(digits: &str) -> String {
    let prefix = &digits[0..2];
    let supplier = &digits[2..4];
    let part1 = &digits[4..7];
    let part2 = &digits[7..];

    format!("{}({}){}-{}", prefix, supplier, part1, part2)
}

/// A validated phone number in canonical display form.
///
/// # Example
///
/// ```
/// use person_registry::domain::PhoneNumber;
///
/// let phone = PhoneNumber::parse("06 30 123 4567").unwrap();
/// assert_eq!(phone.as_str(), "06(30)123-4567");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Validate and canonicalize a raw phone number.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::InvalidPhone` if the number does not have
    /// exactly 11 digits once formatting characters are removed.
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        format(raw)
            .map(Self)
            .ok_or_else(|| ValidationError::InvalidPhone(raw.to_string()))
    }

    /// Get the formatted phone number as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Get the phone number with only digits (no formatting, no `+`).
    pub fn digits_only(&self) -> String {
        self.0.chars().filter(|c| c.is_ascii_digit()).collect()
    }

    /// Whether the number was entered with an international `+` prefix.
    pub fn is_international(&self) -> bool {
        self.0.starts_with('+')
    }
}

// Serde support - serialize as string
impl Serialize for PhoneNumber {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

// Serde support - deserialize from string with validation
impl<'de> Deserialize<'de> for PhoneNumber {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        PhoneNumber::parse(&s).map_err(serde::de::Error::custom)
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for PhoneNumber {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
