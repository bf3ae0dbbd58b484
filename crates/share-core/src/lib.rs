//! Core reconciliation layer for sharectl
//!
//! This crate sits above the Layer 0 crates and below the CLI:
//!
//! ```text
//!                      sharectl
//!                         |
//!                     share-core
//!                         |
//!        +----------------+----------------+
//!        |                |                |
//!   share-model     share-listing      share-exec
//! ```
//!
//! It provides:
//!
//! - **Manifests**: declared shares loaded from TOML ([`config`])
//! - **Reconciler**: accumulate-then-flush diffing of one share ([`reconcile`])
//! - **SyncEngine**: discovery, check and sync over all declared shares ([`sync`])
//! - **Locks**: per-path serialization and a whole-run lock file ([`locks`])

pub mod config;
pub mod error;
pub mod locks;
pub mod reconcile;
pub mod sync;

pub use config::{DEFAULT_CONFIG_PATH, Manifest, SharingSection};
pub use error::{Error, Result};
pub use locks::{PathGuard, PathLocks, RunLock};
pub use reconcile::{Reconciler, ShareOutcome, Transition, existence_transition};
pub use sync::{
    CheckReport, CheckStatus, DriftItem, SyncEngine, SyncOptions, SyncReport, check_listing,
};

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn error_config_not_found_displays_correctly() {
        let path = PathBuf::from("/etc/sharectl/shares.toml");
        let error = Error::ConfigNotFound { path };

        let display = format!("{}", error);
        assert!(
            display.contains("/etc/sharectl/shares.toml"),
            "Error display should contain the path, got: {}",
            display
        );
    }

    #[test]
    fn error_share_vanished_names_path() {
        let error = Error::ShareVanished {
            path: "/Shares/A".to_string(),
        };
        assert!(error.to_string().contains("/Shares/A"));
    }
}
