//! Provisioning configuration (hostprep.yaml) data structures
//!
//! Defaults mirror the GeoCentralis deployment; a `hostprep.yaml` in the
//! application directory overrides individual sections. A missing file means
//! defaults, a malformed file is a hard error.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{HostprepError, Result};

/// Name of the optional configuration file inside the app dir
pub const CONFIG_FILE: &str = "hostprep.yaml";

/// Full provisioning and launch configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProvisionConfig {
    /// OS packages required before anything else runs
    pub packages: Vec<String>,

    /// Headless browser acquisition settings
    pub browser: BrowserConfig,

    /// Isolated Python environment settings
    pub environment: EnvironmentConfig,

    /// Application launch contract
    pub launch: LaunchSettings,
}

/// Browser acquisition settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BrowserConfig {
    /// Command name whose PATH resolution is the idempotency gate
    pub command: String,

    /// Package name used by both the direct .deb and the repository fallback
    pub package: String,

    /// Direct download URL for the self-contained installer package
    pub deb_url: String,

    /// Vendor signing key, imported only on the fallback path
    pub signing_key_url: String,

    /// Repository source entry written on the fallback path
    pub repo_line: String,

    /// Destination for the repository source entry
    pub sources_list: PathBuf,
}

/// Isolated environment settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EnvironmentConfig {
    /// Environment directory, relative to the app dir
    pub venv_dir: PathBuf,

    /// Dependency manifest, relative to the app dir
    pub manifest: PathBuf,
}

/// Launch contract settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LaunchSettings {
    /// Application entry point, relative to the app dir
    pub entry_point: PathBuf,

    /// Bind address forced onto the application (all interfaces)
    pub host: String,

    /// Fixed port the application is always bound to
    pub port: u16,
}

impl Default for ProvisionConfig {
    fn default() -> Self {
        Self {
            packages: [
                "python3",
                "python3-venv",
                "python3-pip",
                "wget",
                "unzip",
                "ca-certificates",
            ]
            .iter()
            .map(|s| (*s).to_string())
            .collect(),
            browser: BrowserConfig::default(),
            environment: EnvironmentConfig::default(),
            launch: LaunchSettings::default(),
        }
    }
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            command: "google-chrome".to_string(),
            package: "google-chrome-stable".to_string(),
            deb_url: "https://dl.google.com/linux/direct/google-chrome-stable_current_amd64.deb"
                .to_string(),
            signing_key_url: "https://dl.google.com/linux/linux_signing_key.pub".to_string(),
            repo_line: "deb [arch=amd64] https://dl.google.com/linux/chrome/deb/ stable main"
                .to_string(),
            sources_list: PathBuf::from("/etc/apt/sources.list.d/google-chrome.list"),
        }
    }
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            venv_dir: PathBuf::from("venv"),
            manifest: PathBuf::from("requirements.txt"),
        }
    }
}

impl Default for LaunchSettings {
    fn default() -> Self {
        Self {
            entry_point: PathBuf::from("main.py"),
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl ProvisionConfig {
    /// Parse configuration from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        Ok(config)
    }

    /// Load configuration for an app dir: `hostprep.yaml` when present,
    /// defaults otherwise.
    pub fn load(app_dir: &Path) -> Result<Self> {
        let path = app_dir.join(CONFIG_FILE);
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents =
            std::fs::read_to_string(&path).map_err(|e| HostprepError::ConfigParseFailed {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;
        Self::from_yaml(&contents).map_err(|e| HostprepError::ConfigParseFailed {
            path: path.display().to_string(),
            reason: e.to_string(),
        })
    }
}
