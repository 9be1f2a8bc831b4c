//! Thin wrapper around the `git` executable.
//!
//! Every call captures stdout/stderr and maps spawn failures and non-zero
//! exits to [`ReportError::Git`].

mod repo;

pub use repo::GitRepo;

use crate::error::{ReportError, Result};
use std::path::Path;
use std::process::{Command, Output};

/// Captured output of a successful git invocation.
#[derive(Debug, Clone)]
pub struct GitOutput {
    pub stdout: String,
    pub stderr: String,
}

impl GitOutput {
    fn from_output(output: &Output) -> Self {
        Self {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        }
    }
}

/// Run `program` with `args` inside `cwd`.
///
/// Blocks until the process exits; there is no timeout.
pub fn run_git<P: AsRef<Path>>(program: &str, cwd: P, args: &[&str]) -> Result<GitOutput> {
    let cwd = cwd.as_ref();
    let subcommand = args.first().copied().unwrap_or("");

    let output = Command::new(program)
        .current_dir(cwd)
        .args(args)
        .output()
        .map_err(|e| {
            ReportError::Git(format!(
                "failed to execute {program} {subcommand} in {}: {e}",
                cwd.display()
            ))
        })?;

    let git_output = GitOutput::from_output(&output);

    if output.status.success() {
        Ok(git_output)
    } else {
        let exit_code = output.status.code().unwrap_or(-1);
        let detail = if git_output.stderr.is_empty() {
            git_output.stdout.trim().to_string()
        } else {
            git_output.stderr
        };
        Err(ReportError::Git(format!(
            "{program} {subcommand} failed in {} (exit code {exit_code}): {detail}",
            cwd.display()
        )))
    }
}
