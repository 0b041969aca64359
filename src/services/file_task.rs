//! Handles for background load and save tasks.

use crate::error::ServiceError;
use std::fmt;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Which file operation a task performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileTaskKind {
    Load,
    Save,
}

impl fmt::Display for FileTaskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileTaskKind::Load => write!(f, "load"),
            FileTaskKind::Save => write!(f, "save"),
        }
    }
}

/// How a file task ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileTaskOutcome {
    /// Ran to the end. `processed` people were read or written.
    Completed { processed: usize, skipped: usize },
    /// Stopped by its cancellation token.
    Cancelled { processed: usize },
    /// Stopped by an error; the message was also sent as an error event.
    Failed(String),
}

impl FileTaskOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, FileTaskOutcome::Completed { .. })
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, FileTaskOutcome::Cancelled { .. })
    }
}

/// A load or save running on the blocking thread pool.
///
/// Dropping the handle does not stop the task; call [`FileTask::cancel`].
#[derive(Debug)]
pub struct FileTask {
    kind: FileTaskKind,
    cancel: CancellationToken,
    handle: JoinHandle<FileTaskOutcome>,
}

impl FileTask {
    pub(crate) fn new(
        kind: FileTaskKind,
        cancel: CancellationToken,
        handle: JoinHandle<FileTaskOutcome>,
    ) -> Self {
        Self {
            kind,
            cancel,
            handle,
        }
    }

    pub fn kind(&self) -> FileTaskKind {
        self.kind
    }

    /// Ask the task to stop at the next line or person.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Wait for the task to end.
    pub async fn join(self) -> FileTaskOutcome {
        match self.handle.await {
            Ok(outcome) => outcome,
            Err(e) => {
                let err = ServiceError::TaskFailed(e.to_string());
                tracing::error!(kind = %self.kind, "{}", err);
                FileTaskOutcome::Failed(err.to_string())
            }
        }
    }
}
