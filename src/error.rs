//! Error types and handling for hostprep
//!
//! Uses `thiserror` for error definitions and `miette` for pretty diagnostics.
//! Every variant is fail-fast: the first error aborts the whole run, tagged
//! with the step it came from.

use miette::Diagnostic;
use thiserror::Error;

/// Main error type for hostprep operations
#[derive(Error, Diagnostic, Debug)]
pub enum HostprepError {
    // Package manager errors
    #[error("Package index refresh failed ({status})")]
    #[diagnostic(
        code(hostprep::packages::index_failed),
        help("Check network access and the host's configured apt mirrors")
    )]
    PackageIndexFailed { status: String },

    #[error("Package installation failed for: {packages}")]
    #[diagnostic(
        code(hostprep::packages::install_failed),
        help("Re-run provisioning once the package manager issue is resolved; the pipeline is safe to retry")
    )]
    PackageInstallFailed { packages: String, status: String },

    // Browser acquisition errors
    #[error("Browser download failed: {url}")]
    #[diagnostic(code(hostprep::browser::download_failed))]
    BrowserDownloadFailed { url: String, status: String },

    #[error("Browser package installation failed: {package}")]
    #[diagnostic(code(hostprep::browser::install_failed))]
    BrowserInstallFailed { package: String, status: String },

    #[error("Failed to register browser package repository")]
    #[diagnostic(
        code(hostprep::browser::repo_failed),
        help("The vendor signing key or repository source could not be set up")
    )]
    BrowserRepoFailed { reason: String },

    #[error(
        "Browser '{command}' unavailable: both the direct download and the repository fallback failed"
    )]
    #[diagnostic(
        code(hostprep::browser::unavailable),
        help("Check network access to the vendor host and re-run provisioning")
    )]
    BrowserUnavailable { command: String },

    // Isolated environment errors
    #[error("Failed to create isolated environment at '{path}'")]
    #[diagnostic(
        code(hostprep::env::create_failed),
        help("Ensure python3 and python3-venv are installed (the package step provides them)")
    )]
    EnvironmentCreateFailed { path: String, status: String },

    #[error("Dependency manifest not found: {path}")]
    #[diagnostic(
        code(hostprep::env::manifest_missing),
        help("Run hostprep from the application directory or pass --app-dir")
    )]
    ManifestNotFound { path: String },

    #[error("Invalid dependency manifest entry: {line}")]
    #[diagnostic(code(hostprep::env::manifest_invalid))]
    ManifestInvalid { line: String, reason: String },

    #[error("Dependency installation from '{manifest}' failed ({status})")]
    #[diagnostic(code(hostprep::env::install_failed))]
    ManifestInstallFailed { manifest: String, status: String },

    // Launcher errors
    #[error("Isolated environment activation failed: {path}")]
    #[diagnostic(
        code(hostprep::launch::activation_failed),
        help("Run 'hostprep provision' first to create the environment")
    )]
    ActivationFailed { path: String },

    #[error("Failed to hand off to the application: {reason}")]
    #[diagnostic(code(hostprep::launch::exec_failed))]
    ExecFailed { reason: String },

    // Configuration errors
    #[error("Failed to parse configuration file: {path}")]
    #[diagnostic(code(hostprep::config::parse_failed))]
    ConfigParseFailed { path: String, reason: String },

    // Command execution
    #[error("Failed to run '{program}': {reason}")]
    #[diagnostic(
        code(hostprep::exec::spawn_failed),
        help("Check that the tool is installed and on PATH")
    )]
    CommandSpawnFailed { program: String, reason: String },

    #[error("IO error: {message}")]
    #[diagnostic(code(hostprep::fs::io_error))]
    IoError { message: String },
}

impl From<std::io::Error> for HostprepError {
    fn from(err: std::io::Error) -> Self {
        HostprepError::IoError {
            message: err.to_string(),
        }
    }
}

impl From<serde_yaml::Error> for HostprepError {
    fn from(err: serde_yaml::Error) -> Self {
        HostprepError::ConfigParseFailed {
            path: "unknown".to_string(),
            reason: err.to_string(),
        }
    }
}

/// Result type alias using miette for error handling
pub type Result<T> = miette::Result<T, HostprepError>;
