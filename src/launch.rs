//! Application launcher
//!
//! Activates the isolated environment in this process (VIRTUAL_ENV plus a
//! PATH prepend, the same effect as sourcing the activate script) and then
//! replaces the process image with the application. No child is spawned on
//! Unix: the supervisor observes the application's own exit codes, resource
//! usage, and signals, with no wrapper in between.
//!
//! Mutual exclusion between instances is the OS's port-binding exclusivity;
//! no lock is taken here.

use std::path::{Path, PathBuf};
use std::process::Command;

use crate::config::ProvisionConfig;
use crate::error::{HostprepError, Result};
use crate::steps::environment::venv_tool;

/// Fixed invocation contract for the application, immutable once built
pub struct LaunchConfig {
    app_dir: PathBuf,
    venv_dir: PathBuf,
    entry_point: PathBuf,
    host: String,
    port: u16,
    extra_args: Vec<String>,
}

impl LaunchConfig {
    pub fn new(app_dir: &Path, config: &ProvisionConfig, extra_args: Vec<String>) -> Self {
        Self {
            app_dir: app_dir.to_path_buf(),
            venv_dir: app_dir.join(&config.environment.venv_dir),
            entry_point: config.launch.entry_point.clone(),
            host: config.launch.host.clone(),
            port: config.launch.port,
            extra_args,
        }
    }

    /// Interpreter inside the isolated environment
    pub fn python_path(&self) -> PathBuf {
        venv_tool(&self.venv_dir, "python")
    }

    /// Application argv: the bind address is hardcoded ahead of the
    /// forwarded arguments, overriding any caller default.
    pub fn argv(&self) -> Vec<String> {
        let mut argv = vec![
            self.entry_point.display().to_string(),
            "--host".to_string(),
            self.host.clone(),
            "--port".to_string(),
            self.port.to_string(),
        ];
        argv.extend(self.extra_args.iter().cloned());
        argv
    }

    /// Build the activated command. Fails when the environment was never
    /// provisioned; the non-zero exit propagates to the supervisor.
    pub fn command(&self) -> Result<Command> {
        let python = self.python_path();
        if !python.exists() {
            return Err(HostprepError::ActivationFailed {
                path: self.venv_dir.display().to_string(),
            });
        }

        let venv_bin = python
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| self.venv_dir.clone());
        let path_var = match std::env::var_os("PATH") {
            Some(existing) => std::env::join_paths(
                std::iter::once(venv_bin.clone()).chain(std::env::split_paths(&existing)),
            )
            .map_err(|e| HostprepError::ActivationFailed {
                path: format!("{} ({e})", self.venv_dir.display()),
            })?,
            None => venv_bin.clone().into(),
        };

        let mut cmd = Command::new(&python);
        cmd.args(self.argv())
            .current_dir(&self.app_dir)
            .env("VIRTUAL_ENV", &self.venv_dir)
            .env("PATH", path_var);
        Ok(cmd)
    }

    /// Hand off execution to the application. On Unix this replaces the
    /// process image and only ever returns an error; elsewhere it waits on
    /// a child and exits with the child's own code, keeping the lifecycle
    /// the supervisor sees equivalent.
    pub fn exec(&self) -> Result<()> {
        let mut cmd = self.command()?;

        #[cfg(unix)]
        {
            use std::os::unix::process::CommandExt;
            let err = cmd.exec();
            // exec() only returns on failure.
            Err(HostprepError::ExecFailed {
                reason: err.to_string(),
            })
        }

        #[cfg(not(unix))]
        {
            let status = cmd
                .status()
                .map_err(|e| HostprepError::ExecFailed {
                    reason: e.to_string(),
                })?;
            std::process::exit(status.code().unwrap_or(1));
        }
    }
}
