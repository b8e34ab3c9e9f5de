//! Service-unit command implementation
//!
//! Prints a systemd unit to stdout; installing it (and owning restart
//! policy) stays with the operator and the init system.

use std::path::PathBuf;

use crate::commands::helpers::resolve_app_dir;
use crate::error::Result;
use crate::systemd;

/// Run the service-unit command
pub fn run(app_dir: Option<PathBuf>) -> Result<()> {
    let app_dir = resolve_app_dir(app_dir)?;
    let launcher = std::env::current_exe().unwrap_or_else(|_| PathBuf::from("hostprep"));
    print!("{}", systemd::render_unit(&launcher, &app_dir));
    Ok(())
}
