use super::separators::Separators;
use crate::error::{CodecError, CodecResult};
use crate::events::EventSink;
use crate::models::person::{clean_input, Person};
use crate::registry::Registry;
use std::borrow::Cow;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use tokio_util::sync::CancellationToken;

/// What a load did before it stopped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadSummary {
    /// Separators declared by the file's header.
    pub separators: Separators,
    /// People stored in the registry.
    pub loaded: usize,
    /// Data lines that could not be parsed.
    pub skipped: usize,
    /// Whether the load stopped early because it was cancelled.
    pub cancelled: bool,
}

fn parse_error(line: &str, reason: impl Into<String>) -> CodecError {
    CodecError::Parse {
        line: line.to_string(),
        reason: reason.into(),
    }
}

/// Turn one data line into a person.
///
/// The line is split once on the name/number separator and the remainder
/// once on the number/email separator.
///
/// # Errors
///
/// Returns `CodecError::Parse` if a separator is missing or the name is empty.
pub fn parse_line(line: &str, separators: &Separators) -> CodecResult<Person> {
    let (name, rest) = line.split_once(separators.name_number()).ok_or_else(|| {
        parse_error(line, format!("missing '{}' separator", separators.name_number()))
    })?;

    let (phone, email) = rest.split_once(separators.number_email()).ok_or_else(|| {
        parse_error(line, format!("missing '{}' separator", separators.number_email()))
    })?;

    if clean_input(name).is_empty() {
        return Err(parse_error(line, "empty name"));
    }

    Ok(Person::new(name, phone, email))
}

/// Read one line without its terminator. Returns `None` at end of input.
///
/// Bytes that are not valid UTF-8 are replaced with U+FFFD so one damaged
/// line does not end the read.
fn next_line<R: BufRead>(reader: &mut R, buf: &mut Vec<u8>) -> io::Result<Option<String>> {
    buf.clear();
    if reader.read_until(b'\n', buf)? == 0 {
        return Ok(None);
    }

    let line = match String::from_utf8_lossy(buf) {
        Cow::Borrowed(text) => text.to_string(),
        Cow::Owned(text) => {
            tracing::warn!(line = %text.trim_end(), "Replaced invalid UTF-8 in registry line");
            text
        }
    };

    Ok(Some(line.trim_end_matches(|c| c == '\n' || c == '\r').to_string()))
}

/// Skip blank lines and parse the first non-blank line as the header.
///
/// # Errors
///
/// Returns `CodecError::Format` for a missing or malformed header,
/// `CodecError::Cancelled` if the token fires first and `CodecError::Io` if
/// reading fails.
pub fn read_header<R: BufRead>(
    reader: &mut R,
    cancel: &CancellationToken,
) -> CodecResult<Separators> {
    let mut buf = Vec::new();

    loop {
        if cancel.is_cancelled() {
            return Err(CodecError::Cancelled);
        }

        let Some(line) = next_line(reader, &mut buf)? else {
            return Err(CodecError::Format("file contains no header line".to_string()));
        };

        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if !line.to_lowercase().contains("name") {
            return Err(CodecError::Format(format!(
                "first non-empty line doesn't match expected structure: '{}'",
                line
            )));
        }

        let separators = Separators::from_header(line)?;
        tracing::debug!(
            header = %separators.header(),
            name_number = %separators.name_number(),
            number_email = %separators.number_email(),
            "Registry header declared"
        );
        return Ok(separators);
    }
}

/// Read the data lines that follow a header into `registry`.
///
/// Blank lines are skipped. Unparseable lines are reported through `events`
/// and skipped. The token is checked before every line; on cancellation the
/// people already stored stay in the registry.
///
/// # Errors
///
/// Returns `CodecError::Io` if reading fails. People stored before the
/// failure stay in the registry.
pub fn read_people<R: BufRead>(
    reader: &mut R,
    separators: Separators,
    registry: &Registry,
    cancel: &CancellationToken,
    events: &EventSink,
) -> CodecResult<LoadSummary> {
    let mut summary = LoadSummary {
        separators,
        loaded: 0,
        skipped: 0,
        cancelled: false,
    };
    let mut buf = Vec::new();

    loop {
        if cancel.is_cancelled() {
            summary.cancelled = true;
            break;
        }

        let Some(line) = next_line(reader, &mut buf)? else {
            break;
        };
        if line.trim().is_empty() {
            continue;
        }

        match parse_line(&line, &summary.separators) {
            Ok(person) => {
                events.output(person.to_string());
                registry.put(person);
                summary.loaded += 1;
            }
            Err(e) => {
                events.error(e.to_string());
                summary.skipped += 1;
            }
        }
    }

    Ok(summary)
}

/// Read a registry file from `reader` into `registry`.
///
/// The first non-blank line must be a header containing `name`; otherwise
/// nothing else is read and the registry is left untouched. The rest is read
/// by [`read_people`].
///
/// # Errors
///
/// See [`read_header`] and [`read_people`].
pub fn load<R: BufRead>(
    mut reader: R,
    registry: &Registry,
    cancel: &CancellationToken,
    events: &EventSink,
) -> CodecResult<LoadSummary> {
    let separators = read_header(&mut reader, cancel)?;
    read_people(&mut reader, separators, registry, cancel, events)
}

/// Open `path` for buffered reading.
pub fn open(path: impl AsRef<Path>) -> CodecResult<BufReader<File>> {
    Ok(BufReader::new(File::open(path.as_ref())?))
}

/// Open `path` and [`load`] it.
pub fn load_from_path(
    path: impl AsRef<Path>,
    registry: &Registry,
    cancel: &CancellationToken,
    events: &EventSink,
) -> CodecResult<LoadSummary> {
    load(open(path)?, registry, cancel, events)
}
