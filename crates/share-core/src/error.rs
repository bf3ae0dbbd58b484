//! Error types for share-core

use std::path::PathBuf;

/// Result type for share-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading declarations or reconciling shares
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Manifest file not found at expected path
    #[error("Configuration not found at {path}")]
    ConfigNotFound { path: PathBuf },

    /// Manifest could not be parsed
    #[error("Invalid manifest {path}: {message}")]
    InvalidManifest { path: PathBuf, message: String },

    /// The same path is declared more than once
    #[error("Share path '{path}' is declared more than once")]
    DuplicateShare { path: String },

    /// The share disappeared between discovery and the batched edit
    #[error("Share point for '{path}' no longer exists; refusing to edit it")]
    ShareVanished { path: String },

    // Transparent wrappers for underlying crate errors
    /// Data model error from share-model
    #[error(transparent)]
    Model(#[from] share_model::Error),

    /// Listing parse error from share-listing
    #[error(transparent)]
    Parse(#[from] share_listing::ParseError),

    /// Tool invocation error from share-exec
    #[error(transparent)]
    Exec(#[from] share_exec::Error),

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// TOML deserialization error
    #[error(transparent)]
    TomlDe(#[from] toml::de::Error),

    /// TOML serialization error
    #[error(transparent)]
    TomlSer(#[from] toml::ser::Error),
}
