//! Provision command implementation
//!
//! Runs the full pipeline unconditionally end to end:
//! 1. OS packages (index refresh, one batched install)
//! 2. Headless browser (check gate, direct download, repository fallback)
//! 3. Isolated environment (create if absent, reconcile against manifest)
//!
//! Every step is idempotent; re-running after partial or full success
//! converges to the same end state without destructive actions.

use std::path::PathBuf;

use console::Style;

use crate::cli::ProvisionArgs;
use crate::commands::helpers::resolve_app_dir;
use crate::config::ProvisionConfig;
use crate::error::Result;
use crate::pipeline;
use crate::runner::SystemRunner;

/// Run the provision command
pub fn run(app_dir: Option<PathBuf>, _args: ProvisionArgs) -> Result<()> {
    let app_dir = resolve_app_dir(app_dir)?;
    let config = ProvisionConfig::load(&app_dir)?;

    println!(
        "{} {}",
        Style::new().bold().apply_to("Provisioning host for"),
        Style::new().bold().yellow().apply_to(app_dir.display())
    );

    let steps = pipeline::standard_steps(&app_dir, &config);
    pipeline::run(&steps, &SystemRunner)?;

    println!(
        "{}",
        Style::new()
            .green()
            .apply_to("Host is ready; start the application with 'hostprep launch'")
    );
    Ok(())
}
