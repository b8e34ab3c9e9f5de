//! Browser acquisition step
//!
//! Guarantees the headless-browser command resolves on PATH afterwards,
//! using the cheapest sufficient action:
//!
//! 1. Check gate: the command already resolves, nothing runs.
//! 2. Primary path: resumable direct download of the vendor .deb, local
//!    install, artifact removed on success.
//! 3. Fallback path (primary download failed): import the vendor signing
//!    key, register the vendor repository, refresh, install from there.
//!
//! A failed download leaves the partial artifact in place so the next run's
//! `wget -c` resumes instead of restarting from byte zero.

use std::path::{Path, PathBuf};

use crate::config::BrowserConfig;
use crate::error::{HostprepError, Result};
use crate::progress::StepOutcome;
use crate::runner::{CommandRunner, args};
use crate::steps::ProvisionStep;

/// Default PATH probe behind the check gate
fn command_on_path(command: &str) -> bool {
    which::which(command).is_ok()
}

/// Acquires the headless browser via direct download or vendor repository
pub struct BrowserStep {
    config: BrowserConfig,
    artifact_dir: PathBuf,
    probe: fn(&str) -> bool,
}

impl BrowserStep {
    pub fn new(config: BrowserConfig) -> Self {
        Self {
            config,
            artifact_dir: std::env::temp_dir().join("hostprep"),
            probe: command_on_path,
        }
    }

    /// Override the PATH probe (tests)
    pub fn with_probe(mut self, probe: fn(&str) -> bool) -> Self {
        self.probe = probe;
        self
    }

    /// Override where the download artifact lives (tests)
    pub fn with_artifact_dir(mut self, dir: PathBuf) -> Self {
        self.artifact_dir = dir;
        self
    }

    /// Download artifact path, stable across runs so transfers resume
    fn artifact_path(&self) -> PathBuf {
        let file_name = self
            .config
            .deb_url
            .rsplit('/')
            .next()
            .filter(|name| !name.is_empty())
            .unwrap_or("browser.deb");
        self.artifact_dir.join(file_name)
    }

    /// Install the downloaded package, recovering missing dependencies once
    fn install_local(&self, runner: &dyn CommandRunner, artifact: &Path) -> Result<()> {
        let artifact_arg = artifact.display().to_string();
        let install = runner.run("dpkg", &args(&["-i", &artifact_arg]))?;
        if install.success {
            return Ok(());
        }

        // dpkg unpacked but couldn't configure; let apt pull the missing deps
        let fix = runner.run("apt-get", &args(&["install", "-f", "-y"]))?;
        if !fix.success {
            return Err(HostprepError::BrowserInstallFailed {
                package: self.config.package.clone(),
                status: fix.status_text(),
            });
        }
        Ok(())
    }

    /// Register the vendor repository and install the package from it
    fn install_from_repo(&self, runner: &dyn CommandRunner) -> Result<()> {
        let key_file = tempfile::NamedTempFile::new().map_err(|e| {
            HostprepError::BrowserRepoFailed {
                reason: format!("could not create key file: {e}"),
            }
        })?;
        let key_arg = key_file.path().display().to_string();

        let fetch = runner.run(
            "wget",
            &args(&["-q", &self.config.signing_key_url, "-O", &key_arg]),
        )?;
        if !fetch.success {
            return Err(HostprepError::BrowserRepoFailed {
                reason: format!("signing key download failed ({})", fetch.status_text()),
            });
        }

        let import = runner.run("apt-key", &args(&["add", &key_arg]))?;
        if !import.success {
            return Err(HostprepError::BrowserRepoFailed {
                reason: format!("signing key import failed ({})", import.status_text()),
            });
        }

        std::fs::write(
            &self.config.sources_list,
            format!("{}\n", self.config.repo_line),
        )
        .map_err(|e| HostprepError::BrowserRepoFailed {
            reason: format!(
                "could not write {}: {e}",
                self.config.sources_list.display()
            ),
        })?;

        let refresh = runner.run("apt-get", &args(&["update"]))?;
        if !refresh.success {
            return Err(HostprepError::BrowserRepoFailed {
                reason: format!("index refresh failed ({})", refresh.status_text()),
            });
        }

        // Repository installs can trip on incomplete metadata; permit the
        // fix-missing recovery mode.
        let install = runner.run(
            "apt-get",
            &args(&["install", "-y", "--fix-missing", &self.config.package]),
        )?;
        if !install.success {
            return Err(HostprepError::BrowserUnavailable {
                command: self.config.command.clone(),
            });
        }
        Ok(())
    }
}

impl ProvisionStep for BrowserStep {
    fn name(&self) -> &str {
        "Headless browser"
    }

    fn run(&self, runner: &dyn CommandRunner) -> Result<StepOutcome> {
        if (self.probe)(&self.config.command) {
            return Ok(StepOutcome::Unchanged);
        }

        std::fs::create_dir_all(&self.artifact_dir)?;
        let artifact = self.artifact_path();
        let artifact_arg = artifact.display().to_string();

        let download = runner.run(
            "wget",
            &args(&["-c", &self.config.deb_url, "-O", &artifact_arg]),
        )?;
        if download.success {
            self.install_local(runner, &artifact)?;
            std::fs::remove_file(&artifact)?;
            return Ok(StepOutcome::Changed);
        }

        self.install_from_repo(runner)?;
        Ok(StepOutcome::Changed)
    }
}
