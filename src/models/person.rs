//! Person model: a named registry entry with a phone number and an email.

use crate::domain::{EmailAddress, FieldState, FieldUpdate, PhoneNumber};
use serde::Serialize;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Trim and drop every double quote from user or file input.
pub(crate) fn clean_input(raw: &str) -> String {
    raw.trim().replace('"', "")
}

/// A person identified by a unique name.
///
/// Phone number and email are validated on every update. An invalid value
/// never overwrites a valid one; if a field has never been set, an invalid
/// value marks it [`FieldState::Invalid`].
///
/// Two people are equal when their names are equal.
///
/// # Example
///
/// ```
/// use person_registry::models::Person;
///
/// let mut person = Person::new("\"Alice\"", "0630/1234567", "alice@x.com");
/// assert_eq!(person.name(), "Alice");
/// assert_eq!(person.phone_number(), Some("06(30)123-4567"));
/// assert!(!person.set_phone_number("123"));
/// assert_eq!(person.phone_number(), Some("06(30)123-4567"));
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct Person {
    name: String,
    phone: FieldState<PhoneNumber>,
    email: FieldState<EmailAddress>,
}

impl Person {
    /// Create a new person. Never fails: invalid phone or email values leave
    /// the corresponding field marked invalid.
    pub fn new(name: &str, phone: &str, email: &str) -> Self {
        let mut person = Self {
            name: clean_input(name),
            phone: FieldState::Unset,
            email: FieldState::Unset,
        };
        person.update_phone(phone);
        person.update_email(email);
        person
    }

    /// Create a person whose phone number and email have never been set.
    pub fn with_name(name: &str) -> Self {
        Self {
            name: clean_input(name),
            phone: FieldState::Unset,
            email: FieldState::Unset,
        }
    }

    /// The person's unique name.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn phone(&self) -> &FieldState<PhoneNumber> {
        &self.phone
    }

    pub fn email(&self) -> &FieldState<EmailAddress> {
        &self.email
    }

    /// Stored phone text: `None` when unset, `"INVALID"` when rejected.
    pub fn phone_number(&self) -> Option<&str> {
        self.phone.display_value()
    }

    /// Stored email text: `None` when unset, `"INVALID"` when rejected.
    pub fn email_address(&self) -> Option<&str> {
        self.email.display_value()
    }

    /// Apply a raw phone number and report what happened to the field.
    pub fn update_phone(&mut self, raw: &str) -> FieldUpdate {
        let raw = clean_input(raw);
        let outcome = self.phone.apply(PhoneNumber::parse(&raw));

        if outcome == FieldUpdate::Rejected {
            tracing::warn!(
                person = %self.name,
                value = %raw,
                "Phone number will not be modified as the given number is invalid"
            );
        }
        outcome
    }

    /// Apply a raw email address and report what happened to the field.
    pub fn update_email(&mut self, raw: &str) -> FieldUpdate {
        let raw = clean_input(raw);
        let outcome = self.email.apply(EmailAddress::parse(&raw));

        if outcome == FieldUpdate::Rejected {
            tracing::warn!(
                person = %self.name,
                value = %raw,
                "Email address will not be modified as the given email is invalid"
            );
        }
        outcome
    }

    /// Set the phone number. Returns whether the stored value changed.
    pub fn set_phone_number(&mut self, raw: &str) -> bool {
        self.update_phone(raw).is_change()
    }

    /// Set the email address. Returns whether the stored value changed.
    pub fn set_email(&mut self, raw: &str) -> bool {
        self.update_email(raw).is_change()
    }
}

impl PartialEq for Person {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Person {}

impl Hash for Person {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl fmt::Display for Person {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = if self.name.is_empty() { "EMPTY" } else { &self.name };
        writeln!(f, "Name: {}", name)?;
        writeln!(f, "Number: {}", self.phone)?;
        writeln!(f, "Email: {}", self.email)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    const NAME: &str = "TestName";
    const PHONE: &str = "0630/1234567";
    const FORMATTED: &str = "06(30)123-4567";
    const EMAIL: &str = "test@email.com";

    fn sample() -> Person {
        Person::new(NAME, PHONE, EMAIL)
    }

    #[test]
    fn test_create_with_valid_data() {
        let person = sample();
        assert_eq!(person.name(), NAME);
        assert_eq!(person.phone_number(), Some(FORMATTED));
        assert_eq!(person.email_address(), Some(EMAIL));
    }

    #[test]
    fn test_quotes_and_whitespace_removed() {
        let person = Person::new("  \"Name\" ", " \"0630/1234567\"", " \"a@b.com\" ");
        assert_eq!(person.name(), "Name");
        assert_eq!(person.phone_number(), Some(FORMATTED));
        assert_eq!(person.email_address(), Some("a@b.com"));
    }

    #[test]
    fn test_short_and_long_phone_marked_invalid() {
        assert_eq!(Person::new(NAME, "0630123456", EMAIL).phone_number(), Some("INVALID"));
        assert_eq!(Person::new(NAME, "063012345678", EMAIL).phone_number(), Some("INVALID"));
    }

    #[test]
    fn test_non_ascii_digit_phone_marked_invalid() {
        let arabic_indic = "٠٦٣٠١٢٣٤٥٦٧";
        let person = Person::new("A", arabic_indic, "a@x.com");
        assert_eq!(person.phone_number(), Some("INVALID"));
        assert_eq!(person.email_address(), Some("a@x.com"));

        let mut person = sample();
        let fullwidth = "０６３０１２３４５６７";
        assert_eq!(person.update_phone(fullwidth), FieldUpdate::Rejected);
        assert_eq!(person.phone_number(), Some(FORMATTED));
    }

    #[test]
    fn test_bad_emails_marked_invalid() {
        for email in [".@barmi.hu", "space space@barmi.hu", "vki@barmi", ""] {
            let person = Person::new(NAME, PHONE, email);
            assert_eq!(person.email_address(), Some("INVALID"), "email {:?}", email);
        }
    }

    #[test]
    fn test_invalid_phone_keeps_valid_value() {
        let mut person = sample();
        assert!(!person.set_phone_number("0630123456"));
        assert_eq!(person.phone_number(), Some(FORMATTED));
        assert_eq!(person.update_phone("0630123456"), FieldUpdate::Rejected);
    }

    #[test]
    fn test_invalid_email_keeps_valid_value() {
        let mut person = sample();
        assert!(!person.set_email(".@email.com"));
        assert_eq!(person.email_address(), Some(EMAIL));
    }

    #[test]
    fn test_same_value_is_no_change() {
        let mut person = sample();
        assert!(!person.set_phone_number("06 30 123 4567"));
        assert!(!person.set_email("TEST@Email.com"));
        assert_eq!(person.email_address(), Some(EMAIL));
    }

    #[test]
    fn test_new_value_is_change() {
        let mut person = sample();
        assert!(person.set_phone_number("+36 20 1234567"));
        assert_eq!(person.phone_number(), Some("+36(20)123-4567"));
        assert!(person.set_email("other@email.com"));
        assert_eq!(person.email_address(), Some("other@email.com"));
    }

    #[test]
    fn test_invalid_field_accepts_later_valid_value() {
        let mut person = Person::new(NAME, "bad", "bad");
        assert!(person.phone().is_invalid());
        assert!(person.set_phone_number(PHONE));
        assert!(person.set_email(EMAIL));
        assert_eq!(person.phone_number(), Some(FORMATTED));
    }

    #[test]
    fn test_equality_by_name_only() {
        let a = Person::new("Same", PHONE, EMAIL);
        let b = Person::new("Same", "bad", "other@x.com");
        let c = Person::new("same", PHONE, EMAIL);
        assert_eq!(a, b);
        assert_ne!(a, c);

        let set: HashSet<Person> = [a, b, c].into_iter().collect();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_display_rendering() {
        let person = Person::new(NAME, "bad", EMAIL);
        assert_eq!(
            person.to_string(),
            "Name: TestName\nNumber: INVALID\nEmail: test@email.com\n"
        );
    }

    #[test]
    fn test_display_unset_fields() {
        let person = Person::with_name("Lonely");
        assert!(person.phone().is_unset());
        assert_eq!(person.phone_number(), None);
        assert_eq!(person.to_string(), "Name: Lonely\nNumber: EMPTY\nEmail: EMPTY\n");
    }

    #[test]
    fn test_serialization() {
        let person = Person::new(NAME, PHONE, "nope");
        let json = serde_json::to_value(&person).unwrap();
        assert_eq!(json["name"], "TestName");
        assert_eq!(json["phone"], FORMATTED);
        assert_eq!(json["email"], "INVALID");
    }
}
