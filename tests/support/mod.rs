//! Shared helpers for registry integration tests.
//!
//! Provides temporary registry files and event collection so each test can
//! assert on what the service reported.

use person_registry::events::RegistryEvent;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;
use tokio::sync::mpsc::UnboundedReceiver;

pub mod fixtures;

/// A temporary directory that holds registry files for one test.
///
/// The directory and everything in it is removed on drop.
pub struct RegistryDir {
    dir: TempDir,
}

impl RegistryDir {
    /// # Panics
    ///
    /// Panics if a temporary directory cannot be created.
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp dir"),
        }
    }

    /// Path of `name` inside the directory; the file need not exist.
    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// Write `content` to `name` and return its path as a string.
    pub fn write(&self, name: &str, content: &str) -> String {
        let path = self.path(name);
        fs::write(&path, content).expect("Failed to write registry file");
        path.display().to_string()
    }

    /// Read `name` back as text.
    pub fn read(&self, name: &str) -> String {
        fs::read_to_string(self.path(name)).expect("Failed to read registry file")
    }
}

/// Take every event currently queued on `rx`.
#[allow(dead_code)]
pub fn drain_events(rx: &mut UnboundedReceiver<RegistryEvent>) -> Vec<RegistryEvent> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}

/// Messages of the error events in `events`.
#[allow(dead_code)]
pub fn error_messages(events: &[RegistryEvent]) -> Vec<&str> {
    events
        .iter()
        .filter(|event| event.is_error())
        .map(RegistryEvent::message)
        .collect()
}

/// Assert that an event with exactly `message` was emitted.
#[allow(dead_code)]
pub fn assert_event(events: &[RegistryEvent], expected: &RegistryEvent) {
    assert!(
        events.contains(expected),
        "Expected event {:?}, got: {:#?}",
        expected,
        events
    );
}
