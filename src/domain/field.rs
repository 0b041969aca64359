//! Tri-state storage for validated person fields.

use serde::{Serialize, Serializer};
use std::fmt;

/// Display text of a field whose only update was rejected.
pub const INVALID_SENTINEL: &str = "INVALID";

/// State of a validated field on a [`Person`](crate::models::Person).
///
/// A field starts `Unset`. The first update either stores a `Valid` value or
/// marks the field `Invalid`. A valid value is never replaced by `Invalid`,
/// and a field never returns to `Unset`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FieldState<T> {
    /// Never set.
    #[default]
    Unset,
    /// The first value supplied was rejected.
    Invalid,
    /// A validated value.
    Valid(T),
}

/// Result of applying one raw update to a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldUpdate {
    /// A new valid value was stored.
    Changed,
    /// The new value equals the stored one (case-insensitive).
    Unchanged,
    /// The value was invalid and the field had never been set.
    MarkedInvalid,
    /// The value was invalid and the stored value was kept.
    Rejected,
}

impl FieldUpdate {
    /// Whether the stored value changed.
    pub fn is_change(self) -> bool {
        matches!(self, FieldUpdate::Changed)
    }

    /// Whether the incoming value failed validation.
    pub fn is_rejection(self) -> bool {
        matches!(self, FieldUpdate::MarkedInvalid | FieldUpdate::Rejected)
    }
}

impl<T: AsRef<str>> FieldState<T> {
    /// Text shown to users: `None` for unset, the sentinel for invalid.
    pub fn display_value(&self) -> Option<&str> {
        match self {
            FieldState::Unset => None,
            FieldState::Invalid => Some(INVALID_SENTINEL),
            FieldState::Valid(value) => Some(value.as_ref()),
        }
    }

    /// The valid value, if any.
    pub fn valid(&self) -> Option<&T> {
        match self {
            FieldState::Valid(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_unset(&self) -> bool {
        matches!(self, FieldState::Unset)
    }

    pub fn is_invalid(&self) -> bool {
        matches!(self, FieldState::Invalid)
    }

    /// Apply a validation result using the update policy shared by phone and email.
    pub(crate) fn apply<E>(&mut self, candidate: Result<T, E>) -> FieldUpdate {
        match candidate {
            Ok(value) => {
                if let FieldState::Valid(current) = self {
                    if current.as_ref().eq_ignore_ascii_case(value.as_ref()) {
                        return FieldUpdate::Unchanged;
                    }
                }
                *self = FieldState::Valid(value);
                FieldUpdate::Changed
            }
            Err(_) if self.is_unset() => {
                *self = FieldState::Invalid;
                FieldUpdate::MarkedInvalid
            }
            Err(_) => FieldUpdate::Rejected,
        }
    }
}

impl<T: AsRef<str>> fmt::Display for FieldState<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_value().unwrap_or("EMPTY"))
    }
}

// Serialized as the display value, `null` when unset.
impl<T: AsRef<str>> Serialize for FieldState<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.display_value().serialize(serializer)
    }
}
