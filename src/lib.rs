//! Person Registry - a concurrent, file-backed registry of people.
//!
//! Each person has a unique name, a phone number and an email address. Phone
//! numbers and emails are validated on every update, and an invalid value
//! never overwrites a valid one. Registries are loaded from and saved to text
//! files whose header line declares the field separators.
//!
//! # Architecture
//!
//! - **domain**: Validated value objects (phone numbers, email addresses, field state)
//! - **models**: The `Person` entity
//! - **registry**: Concurrent name-keyed store with upsert semantics
//! - **codec**: Registry file format: header, reader and writer
//! - **services**: Background load/save tasks and person operations
//! - **events**: Info, error and output notifications for the presentation layer
//! - **error**: Custom error types for precise error handling
//! - **config**: Configuration management from environment variables
//! - **shell**: Command parsing for the interactive binary

pub mod codec;
pub mod config;
pub mod domain;
pub mod error;
pub mod events;
pub mod models;
pub mod registry;
pub mod services;
pub mod shell;

// Re-export commonly used types
pub use codec::Separators;
pub use config::Config;
pub use domain::{EmailAddress, FieldState, FieldUpdate, PhoneNumber, ValidationError};
pub use error::{CodecError, ConfigError, ServiceError};
pub use events::{EventSink, RegistryEvent};
pub use models::Person;
pub use registry::{Registry, UpsertKind, UpsertOutcome};
pub use services::{FileTask, FileTaskOutcome, RegistryService, RegistryServiceImpl};
