//! Error types for share-listing

/// Result type for listing parsing
pub type Result<T> = std::result::Result<T, ParseError>;

/// A listing, or one block of it, could not be turned into records
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// The header marker never appears, so nothing can be trusted
    #[error("Listing does not contain the '{marker}' header")]
    MissingHeader { marker: &'static str },

    /// A share block has no usable `path:` line
    #[error("Share block {index} ('{share_name}') has no path line")]
    MissingPath { index: usize, share_name: String },
}
