//! Launch command implementation
//!
//! Performs no provisioning. Builds the fixed launch contract, activates
//! the isolated environment, and hands the process over to the application.
//! On success this function never returns.

use std::path::PathBuf;

use crate::cli::LaunchArgs;
use crate::commands::helpers::resolve_app_dir;
use crate::config::ProvisionConfig;
use crate::error::Result;
use crate::launch::LaunchConfig;

/// Run the launch command
pub fn run(app_dir: Option<PathBuf>, args: LaunchArgs) -> Result<()> {
    let app_dir = resolve_app_dir(app_dir)?;
    let config = ProvisionConfig::load(&app_dir)?;
    let launch = LaunchConfig::new(&app_dir, &config, args.extra_args);
    launch.exec()
}
