//! Application service layer.
//!
//! Services contain the operations the presentation layer calls. They
//! orchestrate the registry and the file codec, run file work on background
//! tasks, and report progress through [`EventSink`](crate::events::EventSink).

mod file_task;
mod registry_service;

pub use file_task::{FileTask, FileTaskKind, FileTaskOutcome};
pub use registry_service::{RegistryService, RegistryServiceImpl};

// Re-export common types used by services
pub use crate::models::Person;
pub use crate::registry::{UpsertKind, UpsertOutcome};
