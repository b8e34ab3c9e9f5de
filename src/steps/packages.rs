//! OS package step
//!
//! Refreshes the package index, then installs the whole package set in one
//! batch so apt resolves shared dependencies once. Installed-or-absent is
//! apt's own state; nothing is tracked here.

use crate::error::{HostprepError, Result};
use crate::progress::StepOutcome;
use crate::runner::{CommandRunner, args};
use crate::steps::ProvisionStep;

/// Installs the fixed set of OS prerequisites
pub struct PackageStep {
    packages: Vec<String>,
}

impl PackageStep {
    pub fn new(packages: Vec<String>) -> Self {
        Self { packages }
    }
}

impl ProvisionStep for PackageStep {
    fn name(&self) -> &str {
        "OS packages"
    }

    fn run(&self, runner: &dyn CommandRunner) -> Result<StepOutcome> {
        let refresh = runner.run("apt-get", &args(&["update"]))?;
        if !refresh.success {
            return Err(HostprepError::PackageIndexFailed {
                status: refresh.status_text(),
            });
        }

        let mut install_args = args(&["install", "-y"]);
        install_args.extend(self.packages.iter().cloned());
        let install = runner.run("apt-get", &install_args)?;
        if !install.success {
            return Err(HostprepError::PackageInstallFailed {
                packages: self.packages.join(" "),
                status: install.status_text(),
            });
        }

        Ok(StepOutcome::Changed)
    }
}
