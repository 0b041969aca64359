//! Line-oriented registry file format.
//!
//! A registry file starts with a header such as `Name:Number,Email`. The
//! character after the `name` label separates a person's name from the phone
//! number, and the character after the `number` label separates the phone
//! number from the email. Each following non-blank line holds one person:
//!
//! ```text
//! Name:Number,Email
//! Alice: 06(30)123-4567, alice@x.com
//! Bob: , bob@x.com
//! ```
//!
//! Both reading and writing poll a cancellation token between lines.

mod reader;
mod separators;
mod writer;

pub use reader::{
    load, load_from_path, open, parse_line, read_header, read_people, LoadSummary,
};
pub use separators::{declare_separators, Separators, DEFAULT_HEADER};
pub use writer::{render, save, save_to_path, SaveSummary};
