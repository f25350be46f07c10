//! External checker invocation
//!
//! The checker is run as `<program> check <rules-file>` with the output
//! directory as working directory. Its error stream is relayed line by line
//! while it runs; the exit status is collected once the stream closes.

use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::errors::{CapValError, Result};

/// Result of one checker run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckerOutcome {
    /// Exit code, `None` if the process was terminated by a signal
    pub exit_code: Option<i32>,
    /// Number of stderr lines relayed
    pub lines: usize,
}

impl CheckerOutcome {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Resolve a relative checker path against the current directory
///
/// Bare program names are left for `PATH` lookup. Relative paths with a
/// directory part are made absolute, since the checker runs in another
/// working directory.
pub fn resolve_program(program: &Path) -> PathBuf {
    if program.is_absolute() || program.components().count() < 2 {
        return program.to_path_buf();
    }
    match std::env::current_dir() {
        Ok(cwd) => cwd.join(program),
        Err(_) => program.to_path_buf(),
    }
}

/// Run the checker on `rules_file` inside `working_dir`
///
/// Each stderr line is handed to `on_line` as soon as it is read, with
/// invalid UTF-8 replaced. Stdout is discarded.
///
/// # Errors
///
/// Returns `CheckerLaunch` if the process cannot be started or waited on.
pub fn run_checker(
    program: &Path,
    rules_file: &str,
    working_dir: &Path,
    mut on_line: impl FnMut(&str),
) -> Result<CheckerOutcome> {
    let program = resolve_program(program);
    let launch_error = |e: std::io::Error| CapValError::CheckerLaunch {
        program: program.clone(),
        message: e.to_string(),
    };

    let mut child = Command::new(&program)
        .arg("check")
        .arg(rules_file)
        .current_dir(working_dir)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(launch_error)?;

    let mut lines = 0;
    if let Some(stderr) = child.stderr.take() {
        let mut reader = BufReader::new(stderr);
        let mut buf = Vec::new();
        loop {
            buf.clear();
            match reader.read_until(b'\n', &mut buf) {
                Ok(0) => break,
                Ok(_) => {
                    lines += 1;
                    // invalid UTF-8 is replaced, never a reason to stop draining
                    let line = String::from_utf8_lossy(&buf);
                    on_line(line.trim_end_matches(|c: char| c == '\n' || c == '\r'));
                }
                Err(e) => {
                    tracing::warn!(error = %e, "checker stderr unreadable, relay stopped");
                    break;
                }
            }
        }
    }

    let status = child.wait().map_err(launch_error)?;
    Ok(CheckerOutcome {
        exit_code: status.code(),
        lines,
    })
}
