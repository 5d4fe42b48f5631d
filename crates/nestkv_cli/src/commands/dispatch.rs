//! Command execution against the store.

use crate::commands::{help_text, Command};
use nestkv_core::{CoreError, CoreResult, Store};

/// Printed by `GET` for a key that is not set.
pub const NULL_OUTPUT: &str = "NULL";

/// What the shell should do after a command ran.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Print this text on its own line.
    Print(String),
    /// Print nothing.
    Silent,
    /// Stop reading input.
    Exit,
}

/// Runs one command against the store.
pub fn execute(command: &Command, store: &mut Store) -> Outcome {
    match command {
        Command::Begin => report(store.begin()),
        Command::End => Outcome::Exit,
        Command::Commit => report(store.commit()),
        Command::Rollback => report(store.rollback()),
        Command::Get { key } => Outcome::Print(store.get(key).unwrap_or(NULL_OUTPUT).to_owned()),
        Command::Set { key, value } => {
            store.set(key, value);
            Outcome::Silent
        }
        Command::Unset { key } => {
            store.unset(key);
            Outcome::Silent
        }
        Command::NumEqualTo { value } => Outcome::Print(store.count_equal_to(value).to_string()),
        Command::Help => Outcome::Print(help_text()),
    }
}

/// Turns a transaction-control result into shell output.
fn report(result: CoreResult<()>) -> Outcome {
    match result {
        Ok(()) => Outcome::Silent,
        Err(err @ CoreError::NoTransaction) => Outcome::Print(err.to_string()),
        Err(err) => Outcome::Print(format!("ERROR: {err}")),
    }
}
