//! Command helper utilities

use crate::error::{HostprepError, Result};

/// Resolve the app dir from the optional global argument
///
/// If an app dir is provided, use it. Otherwise, resolve to the current
/// directory.
pub fn resolve_app_dir(app_dir: Option<std::path::PathBuf>) -> Result<std::path::PathBuf> {
    match app_dir {
        Some(path) => Ok(path),
        None => std::env::current_dir().map_err(|e| HostprepError::IoError {
            message: format!("Failed to get current directory: {e}"),
        }),
    }
}
