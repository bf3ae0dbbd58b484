//! Error types for share-exec

use std::path::PathBuf;

/// Result type for tool invocations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while invoking the `sharing` tool.
///
/// Failed mutations are never retried: part of an edit may already have
/// been applied when the tool reports failure.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The tool could not be started at all
    #[error("Failed to launch {program}: {source}")]
    Spawn {
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The tool exited with a non-zero status
    #[error("`{command}` failed (exit code {code}): {stderr}")]
    CommandFailed {
        command: String,
        code: i32,
        stderr: String,
    },

    /// The tool exited successfully but printed a diagnostic
    #[error("`{command}` reported: {output}")]
    UnexpectedOutput { command: String, output: String },

    /// Share points can only be managed through `sharing` on macOS
    #[error("The sharing tool is only available on macOS (running on {os})")]
    UnsupportedPlatform { os: String },

    /// No executable at the configured location
    #[error("Sharing tool not found at {path}")]
    ToolNotFound { path: PathBuf },
}
