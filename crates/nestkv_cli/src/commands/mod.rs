//! Shell commands.
//!
//! Each input line parses into one [`Command`]; [`dispatch::execute`] maps it
//! onto a single store operation.

pub mod dispatch;

use crate::error::CommandError;

/// The kinds of command the shell understands, with their documentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    /// `BEGIN`
    Begin,
    /// `END`
    End,
    /// `COMMIT`
    Commit,
    /// `ROLLBACK`
    Rollback,
    /// `GET name`
    Get,
    /// `SET name value`
    Set,
    /// `UNSET name`
    Unset,
    /// `NUMEQUALTO value`
    NumEqualTo,
    /// `HELP`
    Help,
}

impl CommandKind {
    /// Every command, in help order.
    pub const ALL: [CommandKind; 9] = [
        Self::Set,
        Self::Get,
        Self::Unset,
        Self::NumEqualTo,
        Self::Begin,
        Self::Rollback,
        Self::Commit,
        Self::Help,
        Self::End,
    ];

    /// Looks up a command by its uppercased name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }

    /// Returns the command name as typed (case-insensitive).
    pub fn name(self) -> &'static str {
        match self {
            Self::Begin => "BEGIN",
            Self::End => "END",
            Self::Commit => "COMMIT",
            Self::Rollback => "ROLLBACK",
            Self::Get => "GET",
            Self::Set => "SET",
            Self::Unset => "UNSET",
            Self::NumEqualTo => "NUMEQUALTO",
            Self::Help => "HELP",
        }
    }

    /// Returns the number of arguments the command takes.
    pub fn arity(self) -> usize {
        match self {
            Self::Set => 2,
            Self::Get | Self::Unset | Self::NumEqualTo => 1,
            Self::Begin | Self::End | Self::Commit | Self::Rollback | Self::Help => 0,
        }
    }

    /// Returns a usage line.
    pub fn usage(self) -> &'static str {
        match self {
            Self::Get => "GET name",
            Self::Set => "SET name value",
            Self::Unset => "UNSET name",
            Self::NumEqualTo => "NUMEQUALTO value",
            other => other.name(),
        }
    }

    /// Returns the one-line description shown by `HELP`.
    pub fn description(self) -> &'static str {
        match self {
            Self::Begin => "Open a new transaction block. Blocks can be nested.",
            Self::End => "Exit the program.",
            Self::Commit => {
                "Close all open transaction blocks, permanently applying their changes. \
                 Prints NO TRANSACTION if none is open."
            }
            Self::Rollback => {
                "Undo the most recent transaction block and close it. \
                 Prints NO TRANSACTION if none is open."
            }
            Self::Get => "Print the value of name, or NULL if it is not set.",
            Self::Set => "Set name to value. Names and values contain no spaces.",
            Self::Unset => "Unset name, as if it had never been set.",
            Self::NumEqualTo => "Print how many names are currently set to value.",
            Self::Help => "Print this list of commands.",
        }
    }
}

/// A parsed command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Open a transaction block.
    Begin,
    /// Stop the session.
    End,
    /// Commit all open blocks.
    Commit,
    /// Roll back the newest block.
    Rollback,
    /// Print a key's value.
    Get {
        /// Key to read.
        key: String,
    },
    /// Set a key.
    Set {
        /// Key to write.
        key: String,
        /// New value.
        value: String,
    },
    /// Unset a key.
    Unset {
        /// Key to remove.
        key: String,
    },
    /// Print how many keys hold a value.
    NumEqualTo {
        /// Value to count.
        value: String,
    },
    /// Print the command list.
    Help,
}

impl Command {
    /// Parses one input line.
    ///
    /// Tokens are separated by whitespace. The command name is
    /// case-insensitive; keys and values are taken verbatim.
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        let (name, args) = tokens.split_first().ok_or(CommandError::Empty)?;

        let name = name.to_ascii_uppercase();
        let kind = CommandKind::from_name(&name)
            .ok_or_else(|| CommandError::UnknownCommand { name: name.clone() })?;

        if args.len() != kind.arity() {
            return Err(CommandError::WrongArity {
                command: kind.name(),
                expected: kind.arity(),
                actual: args.len(),
            });
        }

        let command = match kind {
            CommandKind::Begin => Self::Begin,
            CommandKind::End => Self::End,
            CommandKind::Commit => Self::Commit,
            CommandKind::Rollback => Self::Rollback,
            CommandKind::Help => Self::Help,
            CommandKind::Get => Self::Get {
                key: args[0].to_owned(),
            },
            CommandKind::Set => Self::Set {
                key: args[0].to_owned(),
                value: args[1].to_owned(),
            },
            CommandKind::Unset => Self::Unset {
                key: args[0].to_owned(),
            },
            CommandKind::NumEqualTo => Self::NumEqualTo {
                value: args[0].to_owned(),
            },
        };
        Ok(command)
    }

    /// Returns the kind of this command.
    pub fn kind(&self) -> CommandKind {
        match self {
            Self::Begin => CommandKind::Begin,
            Self::End => CommandKind::End,
            Self::Commit => CommandKind::Commit,
            Self::Rollback => CommandKind::Rollback,
            Self::Get { .. } => CommandKind::Get,
            Self::Set { .. } => CommandKind::Set,
            Self::Unset { .. } => CommandKind::Unset,
            Self::NumEqualTo { .. } => CommandKind::NumEqualTo,
            Self::Help => CommandKind::Help,
        }
    }
}

/// Renders the `HELP` listing.
pub fn help_text() -> String {
    let width = CommandKind::ALL
        .iter()
        .map(|kind| kind.usage().len())
        .max()
        .unwrap_or(0);

    CommandKind::ALL
        .iter()
        .map(|kind| format!("{:<width$}  {}", kind.usage(), kind.description()))
        .collect::<Vec<_>>()
        .join("\n")
}
