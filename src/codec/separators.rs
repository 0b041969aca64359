use crate::error::{CodecError, CodecResult};

/// Header written when no file has been loaded yet.
pub const DEFAULT_HEADER: &str = "Name:Number,Email";

/// Derive the two separator characters from a header line.
///
/// The header is trimmed and lowercased, the first `name` is removed and the
/// first non-whitespace character left becomes the name/number separator.
/// From the text after it, the first `number` is removed and the next
/// non-whitespace character becomes the number/email separator.
///
/// # Errors
///
/// Returns `CodecError::Format` if the header has no `name` label or runs out
/// of characters before both separators are found.
///
/// # Example
///
/// ```
/// use person_registry::codec::declare_separators;
///
/// assert_eq!(declare_separators("Name;Number|Email").unwrap(), (';', '|'));
/// assert_eq!(declare_separators("Name: Number, Email").unwrap(), (':', ','));
/// ```
pub fn declare_separators(header: &str) -> CodecResult<(char, char)> {
    let schema = header.trim().to_lowercase();
    if !schema.contains("name") {
        return Err(CodecError::Format(format!(
            "header '{}' has no name label",
            header
        )));
    }

    let schema = schema.replacen("name", "", 1);
    let mut chars = schema.trim_start().chars();
    let name_number = chars.next().ok_or_else(|| {
        CodecError::Format(format!("header '{}' has no separator after name", header))
    })?;

    let rest = chars.as_str().trim().replacen("number", "", 1);
    let number_email = rest.trim_start().chars().next().ok_or_else(|| {
        CodecError::Format(format!("header '{}' has no separator after number", header))
    })?;

    Ok((name_number, number_email))
}

/// The active header line and the separators it declares.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Separators {
    header: String,
    name_number: char,
    number_email: char,
}

impl Separators {
    /// Parse a header line into separators.
    pub fn from_header(header: &str) -> CodecResult<Self> {
        let (name_number, number_email) = declare_separators(header)?;
        Ok(Self {
            header: header.trim().to_string(),
            name_number,
            number_email,
        })
    }

    /// The header line as it will be written to a file.
    pub fn header(&self) -> &str {
        &self.header
    }

    pub fn name_number(&self) -> char {
        self.name_number
    }

    pub fn number_email(&self) -> char {
        self.number_email
    }
}

impl Default for Separators {
    fn default() -> Self {
        Self {
            header: DEFAULT_HEADER.to_string(),
            name_number: ':',
            number_email: ',',
        }
    }
}
