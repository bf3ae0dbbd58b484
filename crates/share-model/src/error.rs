//! Error types for share-model

/// Result type for share-model operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building share records
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Protocol identifier outside the supported set
    #[error("Unknown protocol '{value}' (expected afp, smb or ftp)")]
    UnknownProtocol { value: String },

    /// Share path with no usable final component
    #[error("Cannot derive a share name from path '{path}'")]
    UnnamedPath { path: String },
}
