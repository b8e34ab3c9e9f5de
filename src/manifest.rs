//! Dependency manifest parsing
//!
//! The manifest is a flat requirements file: one `name` or `name<op>version`
//! entry per line, `#` comments and blank lines skipped. It is the single
//! source of truth for the isolated environment's contents; drift is
//! corrected by re-running the install step, never diffed.

use std::path::Path;

use crate::error::{HostprepError, Result};

/// A single manifest entry: package name plus optional version constraint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestEntry {
    pub name: String,
    pub constraint: Option<String>,
}

/// Parsed dependency manifest
#[derive(Debug, Clone)]
pub struct Manifest {
    pub entries: Vec<ManifestEntry>,
}

const CONSTRAINT_OPS: [&str; 6] = ["==", ">=", "<=", "~=", ">", "<"];

fn parse_entry(line: &str) -> Result<ManifestEntry> {
    for op in CONSTRAINT_OPS {
        if let Some((name, version)) = line.split_once(op) {
            let name = name.trim();
            let version = version.trim();
            if name.is_empty() {
                return Err(HostprepError::ManifestInvalid {
                    line: line.to_string(),
                    reason: "missing package name".to_string(),
                });
            }
            if version.is_empty() {
                return Err(HostprepError::ManifestInvalid {
                    line: line.to_string(),
                    reason: format!("'{op}' without a version"),
                });
            }
            return Ok(ManifestEntry {
                name: name.to_string(),
                constraint: Some(format!("{op}{version}")),
            });
        }
    }

    if line.contains(char::is_whitespace) {
        return Err(HostprepError::ManifestInvalid {
            line: line.to_string(),
            reason: "unexpected whitespace in package name".to_string(),
        });
    }

    Ok(ManifestEntry {
        name: line.to_string(),
        constraint: None,
    })
}

impl Manifest {
    /// Parse a manifest from its text contents
    pub fn parse(contents: &str) -> Result<Self> {
        let mut entries = Vec::new();
        for line in contents.lines() {
            let line = line.split('#').next().unwrap_or("").trim();
            if line.is_empty() {
                continue;
            }
            entries.push(parse_entry(line)?);
        }
        Ok(Self { entries })
    }

    /// Load and parse the manifest file; a missing file is a hard error
    /// surfaced before any install runs.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(HostprepError::ManifestNotFound {
                path: path.display().to_string(),
            });
        }
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_and_pinned_entries() {
        let manifest = Manifest::parse("fastapi\nuvicorn==0.30.1\nselenium>=4.0\nrequests\n")
            .unwrap();
        assert_eq!(manifest.entries.len(), 4);
        assert_eq!(manifest.entries[0].name, "fastapi");
        assert_eq!(manifest.entries[0].constraint, None);
        assert_eq!(manifest.entries[1].name, "uvicorn");
        assert_eq!(
            manifest.entries[1].constraint,
            Some("==0.30.1".to_string())
        );
        assert_eq!(manifest.entries[2].constraint, Some(">=4.0".to_string()));
    }

    #[test]
    fn test_parse_skips_comments_and_blanks() {
        let manifest = Manifest::parse("# web stack\n\nfastapi  # dashboard\n\n").unwrap();
        assert_eq!(manifest.entries.len(), 1);
        assert_eq!(manifest.entries[0].name, "fastapi");
    }

    #[test]
    fn test_parse_rejects_missing_name() {
        let err = Manifest::parse("==1.0\n").unwrap_err();
        assert!(matches!(err, HostprepError::ManifestInvalid { .. }));
    }

    #[test]
    fn test_parse_rejects_dangling_constraint() {
        let err = Manifest::parse("uvicorn==\n").unwrap_err();
        assert!(matches!(err, HostprepError::ManifestInvalid { .. }));
    }

    #[test]
    fn test_parse_rejects_whitespace_name() {
        let err = Manifest::parse("fast api\n").unwrap_err();
        assert!(matches!(err, HostprepError::ManifestInvalid { .. }));
    }

    #[test]
    fn test_load_missing_file() {
        let temp = tempfile::TempDir::new().unwrap();
        let err = Manifest::load(&temp.path().join("requirements.txt")).unwrap_err();
        assert!(matches!(err, HostprepError::ManifestNotFound { .. }));
    }

    #[test]
    fn test_load_reads_file() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("requirements.txt");
        std::fs::write(&path, "fastapi\nuvicorn\n").unwrap();
        let manifest = Manifest::load(&path).unwrap();
        assert_eq!(manifest.entries.len(), 2);
        assert!(!manifest.is_empty());
    }
}
