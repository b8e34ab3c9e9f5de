//! External command execution
//!
//! Every host mutation goes through [`CommandRunner`] so provisioning steps
//! can be unit tested against a recording mock. The real runner inherits
//! stdio: the operator sees each sub-tool's own output inline, and failure
//! diagnostics are whatever that tool printed.

use std::process::Command;

use crate::error::{HostprepError, Result};

/// Outcome of one external command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunOutcome {
    pub success: bool,
    pub code: Option<i32>,
}

impl RunOutcome {
    /// Render the exit status for error messages. The sub-tool's own stderr
    /// already streamed to the operator; this is just the numeric tail.
    pub fn status_text(&self) -> String {
        match self.code {
            Some(code) => format!("exit status: {code}"),
            None => "terminated by signal".to_string(),
        }
    }
}

/// Runs external commands on behalf of provisioning steps
pub trait CommandRunner {
    /// Run `program` with `args`, blocking until it exits. Spawn failure is
    /// an error; a non-zero exit is a normal [`RunOutcome`] for the caller
    /// to map to its own step-tagged error.
    fn run(&self, program: &str, args: &[String]) -> Result<RunOutcome>;
}

/// Real runner backed by `std::process::Command` with inherited stdio
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, program: &str, args: &[String]) -> Result<RunOutcome> {
        let status = Command::new(program)
            .args(args)
            .status()
            .map_err(|e| HostprepError::CommandSpawnFailed {
                program: program.to_string(),
                reason: e.to_string(),
            })?;

        Ok(RunOutcome {
            success: status.success(),
            code: status.code(),
        })
    }
}

/// Convenience for building owned argument vectors at call sites
pub fn args(parts: &[&str]) -> Vec<String> {
    parts.iter().map(|s| (*s).to_string()).collect()
}
