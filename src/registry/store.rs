use crate::domain::FieldUpdate;
use crate::models::person::{clean_input, Person};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use serde::Serialize;

/// Normalize a user-supplied name into a registry key.
///
/// Trims, strips double quotes and uppercases the first character.
/// Returns `None` when nothing is left.
///
/// # Example
///
/// ```
/// use person_registry::registry::normalize_name;
///
/// assert_eq!(normalize_name("  alice ").as_deref(), Some("Alice"));
/// assert_eq!(normalize_name("   "), None);
/// ```
pub fn normalize_name(raw: &str) -> Option<String> {
    let cleaned = clean_input(raw);
    let mut chars = cleaned.trim().chars();
    let first = chars.next()?;
    Some(first.to_uppercase().chain(chars).collect())
}

/// Which branch an upsert took.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UpsertKind {
    /// A new person was inserted.
    Created,
    /// An existing person had at least one field changed.
    Updated,
    /// An existing person was left as it was.
    Unchanged,
}

/// Per-field results of modifying an existing person.
///
/// A field is `None` when no value was supplied for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ModifyReport {
    pub phone: Option<FieldUpdate>,
    pub email: Option<FieldUpdate>,
}

impl ModifyReport {
    /// Whether either field changed.
    pub fn changed(&self) -> bool {
        self.phone.is_some_and(FieldUpdate::is_change)
            || self.email.is_some_and(FieldUpdate::is_change)
    }
}

/// Result of [`Registry::add_or_update`].
#[derive(Debug, Clone)]
pub struct UpsertOutcome {
    pub kind: UpsertKind,
    /// Snapshot of the person after the operation.
    pub person: Person,
    /// Field results when an existing person was modified.
    pub report: Option<ModifyReport>,
}

/// Concurrent map of people keyed by name.
///
/// Backed by `DashMap`, so callers on different threads can read and write
/// without external locking.
#[derive(Debug, Default)]
pub struct Registry {
    people: DashMap<String, Person>,
}

impl Registry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            people: DashMap::new(),
        }
    }

    /// Apply non-empty phone and email values to a person, phone first.
    fn apply_updates(person: &mut Person, phone: &str, email: &str) -> ModifyReport {
        let mut report = ModifyReport::default();

        if !phone.is_empty() {
            report.phone = Some(person.update_phone(phone));
        }
        if !email.is_empty() {
            report.email = Some(person.update_email(email));
        }

        report
    }

    /// Insert a new person or modify the existing one with the same name.
    ///
    /// The first letter of the name is capitalized before lookup. Returns
    /// `None` only when the name is blank.
    pub fn add_or_update(&self, name: &str, phone: &str, email: &str) -> Option<UpsertOutcome> {
        let name = normalize_name(name)?;

        let outcome = match self.people.entry(name) {
            Entry::Occupied(mut entry) => {
                let report = Self::apply_updates(entry.get_mut(), phone, email);
                let kind = if report.changed() {
                    UpsertKind::Updated
                } else {
                    UpsertKind::Unchanged
                };
                UpsertOutcome {
                    kind,
                    person: entry.get().clone(),
                    report: Some(report),
                }
            }
            Entry::Vacant(entry) => {
                let person = Person::new(entry.key(), phone, email);
                entry.insert(person.clone());
                UpsertOutcome {
                    kind: UpsertKind::Created,
                    person,
                    report: None,
                }
            }
        };

        Some(outcome)
    }

    /// Modify the person stored under exactly `name`.
    ///
    /// The phone setter runs only for a non-empty `phone`, the email setter
    /// only for a non-empty `email`; both run when both are given. Returns
    /// `None` when no such person exists.
    pub fn modify_report(&self, name: &str, phone: &str, email: &str) -> Option<ModifyReport> {
        let mut person = self.people.get_mut(name)?;
        Some(Self::apply_updates(person.value_mut(), phone, email))
    }

    /// Modify the person stored under exactly `name`.
    ///
    /// Returns true if either field changed.
    pub fn modify(&self, name: &str, phone: &str, email: &str) -> bool {
        self.modify_report(name, phone, email)
            .is_some_and(|report| report.changed())
    }

    /// Remove a person. The first letter of the name is capitalized first.
    pub fn delete(&self, name: &str) -> bool {
        normalize_name(name)
            .and_then(|name| self.people.remove(&name))
            .is_some()
    }

    /// Snapshot of the person stored under exactly `name`.
    pub fn get(&self, name: &str) -> Option<Person> {
        self.people.get(name).map(|entry| entry.value().clone())
    }

    /// Whether a person is stored under exactly `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.people.contains_key(name)
    }

    /// Insert a person keyed by its name, replacing any previous entry.
    pub fn put(&self, person: Person) -> Option<Person> {
        self.people.insert(person.name().to_string(), person)
    }

    /// Snapshot of every person, in no particular order.
    pub fn values(&self) -> Vec<Person> {
        self.people.iter().map(|entry| entry.value().clone()).collect()
    }

    /// All names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.people.iter().map(|entry| entry.key().clone()).collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.people.len()
    }

    pub fn is_empty(&self) -> bool {
        self.people.is_empty()
    }
}
