//! Line-by-line command loop.

use crate::commands::dispatch::{execute, Outcome};
use crate::commands::Command;
use crate::error::{CliError, CliResult};
use nestkv_core::Store;
use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;
use tracing::{debug, warn};

/// Counters for one finished session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionSummary {
    /// Lines that parsed and ran.
    pub commands: usize,
    /// Lines rejected as invalid input.
    pub rejected: usize,
    /// Whether the session stopped at an `END` command rather than end of input.
    pub ended: bool,
}

/// Opens a script file for reading.
pub fn open_script(path: &Path) -> CliResult<BufReader<File>> {
    let file = File::open(path).map_err(|source| CliError::OpenScript {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(BufReader::new(file))
}

/// Reads commands from `input` until `END` or end of input.
///
/// Blank lines are skipped. A malformed line, including one that is not
/// valid UTF-8, prints `INVALID INPUT: <line>` and the loop carries on.
/// Only I/O failures end the session early.
pub fn run<R, W>(store: &mut Store, mut input: R, mut output: W) -> CliResult<SessionSummary>
where
    R: BufRead,
    W: Write,
{
    let mut summary = SessionSummary::default();
    let mut buf = Vec::new();

    loop {
        buf.clear();
        if input.read_until(b'\n', &mut buf)? == 0 {
            break;
        }

        let line = match std::str::from_utf8(&buf) {
            Ok(text) => text.trim(),
            Err(err) => {
                summary.rejected += 1;
                warn!(error = %err, "rejected non-UTF-8 input");
                let lossy = String::from_utf8_lossy(&buf);
                writeln!(output, "INVALID INPUT: {}", lossy.trim())?;
                continue;
            }
        };
        if line.is_empty() {
            continue;
        }

        let command = match Command::parse(line) {
            Ok(command) => command,
            Err(err) => {
                summary.rejected += 1;
                warn!(error = %err, "rejected input");
                writeln!(output, "INVALID INPUT: {line}")?;
                continue;
            }
        };

        summary.commands += 1;
        debug!(kind = command.kind().name(), "executing");
        match execute(&command, store) {
            Outcome::Print(text) => writeln!(output, "{text}")?,
            Outcome::Silent => {}
            Outcome::Exit => {
                summary.ended = true;
                break;
            }
        }
    }

    output.flush()?;
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use nestkv_core::{Config, RollbackScope};
    use std::io::Cursor;

    fn transcript(store: &mut Store, script: &str) -> (String, SessionSummary) {
        let mut out = Vec::new();
        let summary = run(store, Cursor::new(script), &mut out).unwrap();
        (String::from_utf8(out).unwrap(), summary)
    }

    fn session(script: &str) -> String {
        transcript(&mut Store::new(), script).0
    }

    #[test]
    fn basic_get_set_unset() {
        let out = session("SET ex 10\nGET ex\nUNSET ex\nGET ex\nEND\n");
        assert_eq!(out, "10\nNULL\n");
    }

    #[test]
    fn numequalto_follows_writes() {
        let out = session(
            "SET a 10\nSET b 10\nNUMEQUALTO 10\nNUMEQUALTO 20\nSET b 30\nNUMEQUALTO 10\nEND\n",
        );
        assert_eq!(out, "2\n0\n1\n");
    }

    #[test]
    fn nested_rollbacks() {
        let out = session(
            "BEGIN\nSET a 10\nGET a\nBEGIN\nSET a 20\nGET a\nROLLBACK\nGET a\nROLLBACK\nGET a\nEND\n",
        );
        assert_eq!(out, "10\n20\n10\nNULL\n");
    }

    #[test]
    fn commit_closes_all_blocks() {
        let out = session("BEGIN\nSET a 30\nBEGIN\nSET a 40\nCOMMIT\nGET a\nROLLBACK\nEND\n");
        assert_eq!(out, "40\nNO TRANSACTION\n");
    }

    #[test]
    fn unset_inside_nested_block() {
        let out = session(
            "SET a 50\nBEGIN\nGET a\nSET a 60\nBEGIN\nUNSET a\nGET a\nROLLBACK\nGET a\nCOMMIT\nGET a\nEND\n",
        );
        assert_eq!(out, "50\nNULL\n60\n60\n");
    }

    #[test]
    fn numequalto_across_nested_unset() {
        let out = session(
            "SET a 10\nBEGIN\nNUMEQUALTO 10\nBEGIN\nUNSET a\nNUMEQUALTO 10\nROLLBACK\nNUMEQUALTO 10\nCOMMIT\nEND\n",
        );
        assert_eq!(out, "1\n0\n1\n");
    }

    #[test]
    fn rollback_all_scope() {
        let mut store =
            Store::with_config(Config::new().rollback_scope(RollbackScope::All));
        let (out, _) = transcript(
            &mut store,
            "BEGIN\nSET a 1\nBEGIN\nSET a 2\nROLLBACK\nGET a\nROLLBACK\n",
        );
        assert_eq!(out, "NULL\nNO TRANSACTION\n");
    }

    #[test]
    fn invalid_input_is_reported_and_skipped() {
        let mut store = Store::new();
        let (out, summary) = transcript(&mut store, "FOO bar\nSET a\nSET a 1\nGET a\n");
        assert_eq!(out, "INVALID INPUT: FOO bar\nINVALID INPUT: SET a\n1\n");
        assert_eq!(summary.rejected, 2);
        assert_eq!(summary.commands, 2);
        assert!(!summary.ended);
    }

    #[test]
    fn non_utf8_line_is_rejected_and_skipped() {
        let mut store = Store::new();
        let mut out = Vec::new();
        let script: &[u8] = b"SET a 1\nGET \xff\xfe\nGET a\n";
        let summary = run(&mut store, Cursor::new(script), &mut out).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "INVALID INPUT: GET \u{FFFD}\u{FFFD}\n1\n"
        );
        assert_eq!(summary.rejected, 1);
        assert_eq!(summary.commands, 2);
    }

    #[test]
    fn blank_lines_are_ignored() {
        let out = session("\n   \nset a 1\n\nget a\n");
        assert_eq!(out, "1\n");
    }

    #[test]
    fn end_stops_reading() {
        let mut store = Store::new();
        let (out, summary) = transcript(&mut store, "SET a 1\nEND\nGET a\n");
        assert_eq!(out, "");
        assert!(summary.ended);
        assert_eq!(summary.commands, 2);
    }

    #[test]
    fn end_of_input_without_end() {
        let mut store = Store::new();
        let (_, summary) = transcript(&mut store, "SET a 1");
        assert!(!summary.ended);
        assert_eq!(store.get("a"), Some("1"));
    }

    #[test]
    fn reads_script_file() {
        let mut script = tempfile::NamedTempFile::new().unwrap();
        writeln!(script, "SET k v").unwrap();
        writeln!(script, "NUMEQUALTO v").unwrap();
        writeln!(script, "END").unwrap();

        let mut store = Store::new();
        let mut out = Vec::new();
        let reader = open_script(script.path()).unwrap();
        run(&mut store, reader, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "1\n");
    }

    #[test]
    fn missing_script_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = open_script(&dir.path().join("nope.txt")).unwrap_err();
        assert!(matches!(err, CliError::OpenScript { .. }));
    }
}
