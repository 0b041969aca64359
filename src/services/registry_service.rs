//! Registry service layer.
//!
//! Entry points used by the shell: loading and saving registry files on
//! background tasks, and adding, modifying and deleting people. Every
//! operation reports what happened through the service's [`EventSink`].

use super::file_task::{FileTask, FileTaskKind, FileTaskOutcome};
use crate::codec::{self, Separators};
use crate::domain::FieldUpdate;
use crate::error::{CodecError, ServiceError};
use crate::events::EventSink;
use crate::models::Person;
use crate::registry::{normalize_name, ModifyReport, Registry, UpsertKind, UpsertOutcome};
use async_trait::async_trait;
use std::io::BufRead;
use std::path::PathBuf;
use std::sync::{Arc, RwLock};
use tokio::runtime::Handle;
use tokio_util::sync::CancellationToken;

/// Registry service trait for the operations the shell exposes.
#[async_trait]
pub trait RegistryService: Send + Sync {
    /// Start loading the registry file at `path` on a background task.
    ///
    /// Returns `None` (after emitting an error event) when the path is blank.
    fn process_file(&self, path: &str) -> Option<FileTask>;

    /// Start saving the registry to `path` on a background task.
    ///
    /// The header of the last loaded file is written first. Returns `None`
    /// (after emitting an error event) when the path is blank.
    fn save_file(&self, path: &str) -> Option<FileTask>;

    /// Add a new person or modify the existing one with the same name.
    fn upsert_person(&self, name: &str, phone: &str, email: &str) -> Option<UpsertOutcome>;

    /// Remove a person. Returns false if the name is blank or unknown.
    fn delete_person(&self, name: &str) -> bool;

    /// Look up a person by name, capitalizing the first letter first.
    fn person(&self, name: &str) -> Option<Person>;

    /// Every person, sorted by name.
    fn people(&self) -> Vec<Person>;

    /// The header and separators used for the next save.
    fn separators(&self) -> Separators;

    /// Load `path` and wait for the load to finish.
    async fn load(&self, path: &str) -> FileTaskOutcome {
        match self.process_file(path) {
            Some(task) => task.join().await,
            None => FileTaskOutcome::Failed(ServiceError::MissingPath("process file.").to_string()),
        }
    }

    /// Save to `path` and wait for the save to finish.
    async fn save(&self, path: &str) -> FileTaskOutcome {
        match self.save_file(path) {
            Some(task) => task.join().await,
            None => FileTaskOutcome::Failed(
                ServiceError::MissingPath("save registry to file.").to_string(),
            ),
        }
    }
}

/// Default implementation of RegistryService.
pub struct RegistryServiceImpl {
    registry: Arc<Registry>,
    separators: Arc<RwLock<Separators>>,
    events: EventSink,
}

impl RegistryServiceImpl {
    /// Create a service over an empty registry using the default header.
    pub fn new(events: EventSink) -> Self {
        Self::with_separators(Separators::default(), events)
    }

    /// Create a service over an empty registry with a starting header.
    pub fn with_separators(separators: Separators, events: EventSink) -> Self {
        Self {
            registry: Arc::new(Registry::new()),
            separators: Arc::new(RwLock::new(separators)),
            events,
        }
    }

    /// The registry this service operates on.
    pub fn registry(&self) -> Arc<Registry> {
        Arc::clone(&self.registry)
    }

    fn current_separators(separators: &RwLock<Separators>) -> Separators {
        match separators.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    fn replace_separators(separators: &RwLock<Separators>, next: Separators) {
        match separators.write() {
            Ok(mut guard) => *guard = next,
            Err(poisoned) => *poisoned.into_inner() = next,
        }
    }

    /// Start loading `path` on a background task that stops when `cancel` fires.
    ///
    /// [`RegistryService::process_file`] calls this with a fresh token.
    pub fn process_file_with_token(
        &self,
        path: &str,
        cancel: CancellationToken,
    ) -> Option<FileTask> {
        let path = path.trim();
        if path.is_empty() {
            self.events.error(ServiceError::MissingPath("process file.").to_string());
            return None;
        }

        self.events.info(format!("Processing registry from '{}'", path));

        let path = PathBuf::from(path);
        let registry = Arc::clone(&self.registry);
        let separators = Arc::clone(&self.separators);
        let events = self.events.clone();

        self.spawn_file_task(FileTaskKind::Load, cancel, move |cancel| {
            match codec::open(&path) {
                Ok(reader) => Self::run_load(reader, &registry, &separators, cancel, &events),
                Err(e) => {
                    events.error(format!("Exception occurred during processing the file: {}", e));
                    FileTaskOutcome::Failed(e.to_string())
                }
            }
        })
    }

    /// Start saving to `path` on a background task that stops when `cancel` fires.
    ///
    /// [`RegistryService::save_file`] calls this with a fresh token.
    pub fn save_file_with_token(
        &self,
        path: &str,
        cancel: CancellationToken,
    ) -> Option<FileTask> {
        let path = path.trim();
        if path.is_empty() {
            self.events
                .error(ServiceError::MissingPath("save registry to file.").to_string());
            return None;
        }

        self.events.info(format!("Saving registry to file: '{}'", path));

        let path = PathBuf::from(path);
        let registry = Arc::clone(&self.registry);
        let separators = Self::current_separators(&self.separators);
        let events = self.events.clone();

        self.spawn_file_task(FileTaskKind::Save, cancel, move |cancel| {
            match codec::save_to_path(&path, &registry, &separators, cancel) {
                Ok(summary) if summary.cancelled => {
                    events.error(
                        "Interruption occurred while saving registry to file, \
                         file will be deleted as its content may be broken",
                    );
                    FileTaskOutcome::Cancelled {
                        processed: summary.written,
                    }
                }
                Ok(summary) => {
                    events.info("Registry saved successfully.");
                    FileTaskOutcome::Completed {
                        processed: summary.written,
                        skipped: 0,
                    }
                }
                Err(e) => {
                    events.error(format!("Exception occurred while saving registry: {}", e));
                    FileTaskOutcome::Failed(e.to_string())
                }
            }
        })
    }

    /// Read a registry file into `registry`.
    ///
    /// The active header is replaced as soon as the file's header is parsed,
    /// so it matches the rows already stored even if reading fails later.
    fn run_load<R: BufRead>(
        mut reader: R,
        registry: &Registry,
        separators: &RwLock<Separators>,
        cancel: &CancellationToken,
        events: &EventSink,
    ) -> FileTaskOutcome {
        let result = codec::read_header(&mut reader, cancel).and_then(|declared| {
            Self::replace_separators(separators, declared.clone());
            codec::read_people(&mut reader, declared, registry, cancel, events)
        });

        match result {
            Ok(summary) if summary.cancelled => {
                events.error("Interruption occurred while processing registry file");
                FileTaskOutcome::Cancelled {
                    processed: summary.loaded,
                }
            }
            Ok(summary) => {
                events.info(format!(
                    "Registry processed: {} people loaded, {} lines skipped",
                    summary.loaded, summary.skipped
                ));
                FileTaskOutcome::Completed {
                    processed: summary.loaded,
                    skipped: summary.skipped,
                }
            }
            Err(CodecError::Cancelled) => {
                events.error("Interruption occurred while processing registry file");
                FileTaskOutcome::Cancelled { processed: 0 }
            }
            Err(e @ CodecError::Format(_)) => {
                let expected = Self::current_separators(separators);
                events.error(format!(
                    "{}. Expected structure: {}. File can't be processed.",
                    e,
                    expected.header()
                ));
                FileTaskOutcome::Failed(e.to_string())
            }
            Err(e) => {
                events.error(format!("Exception occurred during processing the file: {}", e));
                FileTaskOutcome::Failed(e.to_string())
            }
        }
    }

    /// Run `job` on the blocking pool, stopping it when `cancel` fires.
    fn spawn_file_task<F>(
        &self,
        kind: FileTaskKind,
        cancel: CancellationToken,
        job: F,
    ) -> Option<FileTask>
    where
        F: FnOnce(&CancellationToken) -> FileTaskOutcome + Send + 'static,
    {
        let runtime = match Handle::try_current() {
            Ok(runtime) => runtime,
            Err(e) => {
                self.events.error(ServiceError::TaskFailed(e.to_string()).to_string());
                return None;
            }
        };

        let token = cancel.clone();
        let handle = runtime.spawn_blocking(move || job(&token));

        Some(FileTask::new(kind, cancel, handle))
    }

    /// Report fields that kept their old value because the input was invalid.
    fn report_rejections(&self, name: &str, report: &ModifyReport) {
        if report.phone == Some(FieldUpdate::Rejected) {
            self.events.error(format!(
                "Person {}'s phone number will not be modified as the given number is invalid",
                name
            ));
        }
        if report.email == Some(FieldUpdate::Rejected) {
            self.events.error(format!(
                "Person {}'s email address will not be modified as the given email is invalid",
                name
            ));
        }
    }
}

#[async_trait]
impl RegistryService for RegistryServiceImpl {
    fn process_file(&self, path: &str) -> Option<FileTask> {
        self.process_file_with_token(path, CancellationToken::new())
    }

    fn save_file(&self, path: &str) -> Option<FileTask> {
        self.save_file_with_token(path, CancellationToken::new())
    }

    fn upsert_person(&self, name: &str, phone: &str, email: &str) -> Option<UpsertOutcome> {
        let Some(outcome) = self.registry.add_or_update(name, phone, email) else {
            self.events.error(
                ServiceError::MissingName("modify/add a new person to the registry").to_string(),
            );
            return None;
        };

        if let Some(report) = &outcome.report {
            self.report_rejections(outcome.person.name(), report);
        }

        match outcome.kind {
            UpsertKind::Created => self.events.info("New person added to registry"),
            UpsertKind::Updated => self.events.info("Updated person in registry"),
            UpsertKind::Unchanged => self
                .events
                .info("No update is needed to the person in registry"),
        }
        self.events.output(outcome.person.to_string());

        Some(outcome)
    }

    fn delete_person(&self, name: &str) -> bool {
        let Some(name) = normalize_name(name) else {
            self.events
                .error(ServiceError::MissingName("delete anyone from registry").to_string());
            return false;
        };

        if self.registry.delete(&name) {
            self.events
                .info(format!("Person named '{}' is deleted from registry", name));
            true
        } else {
            self.events
                .error(ServiceError::UnknownPerson(name).to_string());
            false
        }
    }

    fn person(&self, name: &str) -> Option<Person> {
        normalize_name(name).and_then(|name| self.registry.get(&name))
    }

    fn people(&self) -> Vec<Person> {
        let mut people = self.registry.values();
        people.sort_by(|a, b| a.name().cmp(b.name()));
        people
    }

    fn separators(&self) -> Separators {
        Self::current_separators(&self.separators)
    }
}
