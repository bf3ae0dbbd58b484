//! Manifest parsing for shares.toml files

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use share_model::{ShareDeclaration, default_share_name};
use tracing::{debug, warn};

use crate::{Error, Result};

/// Manifest location when none is given
pub const DEFAULT_CONFIG_PATH: &str = "/etc/sharectl/shares.toml";

/// `[sharing]` section: how to reach the tool
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SharingSection {
    /// Path to the `sharing` executable
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command: Option<PathBuf>,

    /// File locked for the duration of a sync run
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lock_file: Option<PathBuf>,
}

impl SharingSection {
    pub fn is_empty(&self) -> bool {
        self.command.is_none() && self.lock_file.is_none()
    }
}

/// Share declarations parsed from a shares.toml file
///
/// ```toml
/// [sharing]
/// command = "/usr/sbin/sharing"
///
/// [[share]]
/// path = "/Shares/Projects"
/// protocols = ["afp", "smb"]
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    #[serde(default, skip_serializing_if = "SharingSection::is_empty")]
    pub sharing: SharingSection,

    #[serde(default, rename = "share")]
    pub shares: Vec<ShareDeclaration>,
}

impl Manifest {
    /// Parse a manifest from TOML content
    ///
    /// # Example
    ///
    /// ```
    /// use share_core::config::Manifest;
    ///
    /// let manifest = Manifest::parse(r#"
    /// [[share]]
    /// path = "/Shares/A"
    /// protocols = ["smb"]
    /// "#).unwrap();
    ///
    /// assert_eq!(manifest.shares.len(), 1);
    /// ```
    pub fn parse(content: &str) -> Result<Self> {
        let manifest: Manifest = toml::from_str(content)?;
        Ok(manifest)
    }

    /// Load a manifest from disk
    ///
    /// # Errors
    ///
    /// [`Error::ConfigNotFound`] if the file does not exist,
    /// [`Error::InvalidManifest`] if it is not a valid manifest.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::ConfigNotFound {
                path: path.to_path_buf(),
            });
        }
        let content = std::fs::read_to_string(path)?;
        let manifest = Self::parse(&content).map_err(|e| Error::InvalidManifest {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        debug!(path = %path.display(), shares = manifest.shares.len(), "Loaded manifest");
        Ok(manifest)
    }

    /// Load and merge several manifests, later ones taking precedence
    pub fn load_all<P: AsRef<Path>>(paths: &[P]) -> Result<Self> {
        let mut merged = Manifest::default();
        for path in paths {
            merged.merge(Self::load(path.as_ref())?);
        }
        Ok(merged)
    }

    /// Merge another manifest into this one
    ///
    /// `other` takes precedence: its sharing settings replace ours when set,
    /// and a share it declares replaces ours for the same path in place.
    /// New shares are appended.
    pub fn merge(&mut self, other: Manifest) {
        if other.sharing.command.is_some() {
            self.sharing.command = other.sharing.command;
        }
        if other.sharing.lock_file.is_some() {
            self.sharing.lock_file = other.sharing.lock_file;
        }

        for share in other.shares {
            match self.shares.iter_mut().find(|s| s.path == share.path) {
                Some(existing) => *existing = share,
                None => self.shares.push(share),
            }
        }
    }

    /// Check the declarations can be reconciled.
    ///
    /// # Errors
    ///
    /// Fails on duplicate paths and on paths with no final component, even
    /// when an explicit `share_name` is given: `sharing -a` still has to
    /// register the share under one.
    /// Guest protocols that are not enabled only produce a warning.
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for share in &self.shares {
            if !seen.insert(share.path.as_str()) {
                return Err(Error::DuplicateShare {
                    path: share.path.clone(),
                });
            }

            default_share_name(&share.path)?;
            let record = share.resolve()?;
            let orphans = record.orphan_guest_protocols();
            if !orphans.is_empty() {
                let orphans: Vec<String> = orphans.iter().map(ToString::to_string).collect();
                warn!(
                    path = %share.path,
                    protocols = %orphans.join(","),
                    "Guest access declared for protocols that are not enabled"
                );
            }
        }
        Ok(())
    }

    /// Serialize back to TOML
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}
