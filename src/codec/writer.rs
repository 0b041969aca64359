use super::separators::Separators;
use crate::error::CodecResult;
use crate::models::Person;
use crate::registry::Registry;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;
use tokio_util::sync::CancellationToken;

/// What a save wrote before it stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SaveSummary {
    /// People written after the header.
    pub written: usize,
    /// Whether the save stopped early because it was cancelled.
    pub cancelled: bool,
}

/// Render one person as a registry file line, including the trailing newline.
///
/// Unset and invalid fields are written as empty text.
///
/// # Example
///
/// ```
/// use person_registry::codec::{render, Separators};
/// use person_registry::models::Person;
///
/// let person = Person::new("Bob", "bad", "bob@x.com");
/// assert_eq!(render(&person, &Separators::default()), "Bob: , bob@x.com\n");
/// ```
pub fn render(person: &Person, separators: &Separators) -> String {
    let phone = person.phone().valid().map(|p| p.as_str()).unwrap_or("");
    let email = person.email().valid().map(|e| e.as_str()).unwrap_or("");

    format!(
        "{}{} {}{} {}\n",
        person.name(),
        separators.name_number(),
        phone,
        separators.number_email(),
        email
    )
}

/// Write the header and every person in `registry` to `writer`.
///
/// The registry is snapshotted first, so people added while the save runs may
/// or may not be written. The token is checked before the header and before
/// every person.
pub fn save<W: Write>(
    registry: &Registry,
    separators: &Separators,
    writer: &mut W,
    cancel: &CancellationToken,
) -> CodecResult<SaveSummary> {
    let mut summary = SaveSummary {
        written: 0,
        cancelled: false,
    };

    if cancel.is_cancelled() {
        summary.cancelled = true;
        return Ok(summary);
    }

    writeln!(writer, "{}", separators.header())?;

    for person in registry.values() {
        if cancel.is_cancelled() {
            summary.cancelled = true;
            return Ok(summary);
        }

        writer.write_all(render(&person, separators).as_bytes())?;
        summary.written += 1;
    }

    writer.flush()?;
    Ok(summary)
}

/// Save `registry` to the file at `path`, creating or truncating it.
///
/// If the save is cancelled or fails part way, the file is removed so no
/// partial registry is left behind.
pub fn save_to_path(
    path: impl AsRef<Path>,
    registry: &Registry,
    separators: &Separators,
    cancel: &CancellationToken,
) -> CodecResult<SaveSummary> {
    let path = path.as_ref();
    let mut writer = BufWriter::new(File::create(path)?);

    let result = save(registry, separators, &mut writer, cancel);
    drop(writer);

    match result {
        Ok(summary) if !summary.cancelled => Ok(summary),
        other => {
            discard(path);
            other
        }
    }
}

fn discard(path: &Path) {
    if let Err(e) = fs::remove_file(path) {
        tracing::warn!(
            path = %path.display(),
            error = %e,
            "Failed to remove partial registry file"
        );
    }
}
