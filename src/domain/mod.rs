//! Domain value objects and types.
//!
//! This module contains type-safe wrappers for the two validated fields of a
//! person, phone number and email address, together with the tri-state
//! [`FieldState`] that records whether a field was never set, explicitly
//! rejected, or holds a valid value.

pub mod email;
pub mod errors;
pub mod field;
pub mod phone;

pub use email::EmailAddress;
pub use errors::ValidationError;
pub use field::{FieldState, FieldUpdate, INVALID_SENTINEL};
pub use phone::PhoneNumber;
