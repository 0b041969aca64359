//! EmailAddress value object.

use super::errors::ValidationError;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Dot-atom local part: no leading, trailing or doubled dots.
static LOCAL_PART: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+(\.[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+)*$")
        .expect("Failed to compile email local part regex")
});

/// Two or more labels, the last one an alphabetic top-level domain.
static DOMAIN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([A-Za-z0-9]([A-Za-z0-9-]{0,61}[A-Za-z0-9])?\.)+[A-Za-z]{2,63}$")
        .expect("Failed to compile email domain regex")
});

const MAX_LOCAL_LEN: usize = 64;
const MAX_EMAIL_LEN: usize = 254;

/// Decide whether `raw` is a syntactically valid email address.
///
/// # Validation Rules
///
/// - Exactly one '@' separating a local part and a domain
/// - The local part is a dot-atom of at most 64 characters
/// - The domain has at least one '.' and ends in an alphabetic top-level label
/// - No whitespace anywhere
pub fn is_valid(raw: &str) -> bool {
    if raw.len() > MAX_EMAIL_LEN {
        return false;
    }

    let Some((local, domain)) = raw.split_once('@') else {
        return false;
    };

    if local.is_empty() || local.len() > MAX_LOCAL_LEN {
        return false;
    }

    LOCAL_PART.is_match(local) && DOMAIN.is_match(domain)
}

/// A type-safe wrapper for email addresses.
///
/// The address is stored verbatim, so the original casing is preserved.
///
/// # Example
///
/// ```
/// use person_registry::domain::EmailAddress;
///
/// let email = EmailAddress::parse("User@Example.com").unwrap();
/// assert_eq!(email.as_str(), "User@Example.com");
/// assert!(EmailAddress::parse("vki@barmi").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Create a new EmailAddress, validating the format.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::InvalidEmail` if the email format is invalid.
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        if !is_valid(raw) {
            return Err(ValidationError::InvalidEmail(raw.to_string()));
        }

        Ok(Self(raw.to_string()))
    }

    /// Get the email address as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Get the local part (before '@').
    pub fn local_part(&self) -> &str {
        self.0.split_once('@').map(|(local, _)| local).unwrap_or("")
    }

    /// Get the domain part (after '@').
    pub fn domain(&self) -> &str {
        self.0.split_once('@').map(|(_, domain)| domain).unwrap_or("")
    }
}

// Serde support - serialize as string
impl Serialize for EmailAddress {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

// Serde support - deserialize from string with validation
impl<'de> Deserialize<'de> for EmailAddress {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        EmailAddress::parse(&s).map_err(serde::de::Error::custom)
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
