//! systemd unit rendering
//!
//! Service registration stays with the init system: this only renders the
//! unit text for the operator to install verbatim. The launcher command is
//! the stable contract — safe to kill and restart at any point, with
//! deterministic bind behavior on every invocation.

use std::path::Path;

/// Render a systemd unit wiring the launcher to restart-on-crash policy
pub fn render_unit(launcher: &Path, app_dir: &Path) -> String {
    format!(
        "[Unit]\n\
         Description=GeoCentralis scraper\n\
         After=network-online.target\n\
         Wants=network-online.target\n\
         \n\
         [Service]\n\
         Type=simple\n\
         WorkingDirectory={app_dir}\n\
         ExecStart={launcher} --app-dir {app_dir} launch -- --auto-start\n\
         Restart=always\n\
         RestartSec=5\n\
         \n\
         [Install]\n\
         WantedBy=multi-user.target\n",
        launcher = launcher.display(),
        app_dir = app_dir.display(),
    )
}
