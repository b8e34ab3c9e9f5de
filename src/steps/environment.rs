//! Isolated environment step
//!
//! Creates the venv only when its directory is absent, then unconditionally
//! reconciles its contents against the dependency manifest: upgrade pip,
//! install every manifest entry. Always re-running the install trades a
//! slower run for never needing drift detection; the manifest stays the
//! single source of truth.

use std::path::{Path, PathBuf};

use crate::error::{HostprepError, Result};
use crate::manifest::Manifest;
use crate::progress::StepOutcome;
use crate::runner::{CommandRunner, args};
use crate::steps::ProvisionStep;

/// Creates and reconciles the isolated Python environment
pub struct EnvironmentStep {
    venv_dir: PathBuf,
    manifest_path: PathBuf,
}

/// Path to a tool inside the venv (also used by the launcher)
pub fn venv_tool(venv_dir: &Path, tool: &str) -> PathBuf {
    #[cfg(windows)]
    {
        venv_dir.join("Scripts").join(format!("{tool}.exe"))
    }
    #[cfg(not(windows))]
    {
        venv_dir.join("bin").join(tool)
    }
}

impl EnvironmentStep {
    pub fn new(venv_dir: PathBuf, manifest_path: PathBuf) -> Self {
        Self {
            venv_dir,
            manifest_path,
        }
    }
}

impl ProvisionStep for EnvironmentStep {
    fn name(&self) -> &str {
        "Isolated environment"
    }

    fn run(&self, runner: &dyn CommandRunner) -> Result<StepOutcome> {
        // Parse before mutating anything so a bad manifest aborts cleanly.
        let manifest = Manifest::load(&self.manifest_path)?;
        if manifest.is_empty() {
            return Err(HostprepError::ManifestInvalid {
                line: self.manifest_path.display().to_string(),
                reason: "manifest lists no dependencies".to_string(),
            });
        }

        let venv_arg = self.venv_dir.display().to_string();
        let created = if self.venv_dir.exists() {
            false
        } else {
            let create = runner.run("python3", &args(&["-m", "venv", &venv_arg]))?;
            if !create.success {
                return Err(HostprepError::EnvironmentCreateFailed {
                    path: venv_arg,
                    status: create.status_text(),
                });
            }
            true
        };

        let pip = venv_tool(&self.venv_dir, "pip").display().to_string();
        let manifest_arg = self.manifest_path.display().to_string();

        let upgrade = runner.run(&pip, &args(&["install", "--upgrade", "pip"]))?;
        if !upgrade.success {
            return Err(HostprepError::ManifestInstallFailed {
                manifest: manifest_arg,
                status: upgrade.status_text(),
            });
        }

        let install = runner.run(&pip, &args(&["install", "-r", &manifest_arg]))?;
        if !install.success {
            return Err(HostprepError::ManifestInstallFailed {
                manifest: manifest_arg,
                status: install.status_text(),
            });
        }

        Ok(if created {
            StepOutcome::Changed
        } else {
            StepOutcome::Unchanged
        })
    }
}
