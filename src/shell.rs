//! Command parsing for the interactive shell.

use std::fmt;

/// Usage text printed by `help` and after an unknown command.
pub const USAGE: &str = "\
Commands:
  load [path]                     load a registry file in the background
  save [path]                     save the registry in the background
  cancel                          stop the running load or save
  add <name>;<phone>;<email>      add a person or modify an existing one
  delete <name>                   remove a person
  show <name>                     print one person
  list                            print everyone
  dump                            print the registry as JSON
  help                            print this text
  quit                            exit";

/// One line of shell input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Load(Option<String>),
    Save(Option<String>),
    Cancel,
    Add {
        name: String,
        phone: String,
        email: String,
    },
    Delete(String),
    Show(String),
    List,
    Dump,
    Help,
    Quit,
}

/// A line that is not a known command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCommand(pub String);

impl fmt::Display for UnknownCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown command '{}'", self.0)
    }
}

impl std::error::Error for UnknownCommand {}

fn optional_arg(rest: &str) -> Option<String> {
    let rest = rest.trim();
    (!rest.is_empty()).then(|| rest.to_string())
}

/// Parse one line of input. Blank lines parse to `Ok(None)`.
///
/// The keyword is case-insensitive; the rest of the line is the argument.
/// `add` splits its argument on `;` into name, phone and email, leaving
/// missing parts empty.
pub fn parse_command(line: &str) -> Result<Option<Command>, UnknownCommand> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let (keyword, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    let rest = rest.trim();

    let command = match keyword.to_lowercase().as_str() {
        "load" => Command::Load(optional_arg(rest)),
        "save" => Command::Save(optional_arg(rest)),
        "cancel" => Command::Cancel,
        "add" => {
            let mut parts = rest.splitn(3, ';').map(|part| part.trim().to_string());
            Command::Add {
                name: parts.next().unwrap_or_default(),
                phone: parts.next().unwrap_or_default(),
                email: parts.next().unwrap_or_default(),
            }
        }
        "delete" | "rm" => Command::Delete(rest.to_string()),
        "show" => Command::Show(rest.to_string()),
        "list" | "ls" => Command::List,
        "dump" => Command::Dump,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        _ => return Err(UnknownCommand(keyword.to_string())),
    };

    Ok(Some(command))
}
