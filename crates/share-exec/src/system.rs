//! Backend that runs the real `sharing` executable

use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::{debug, info, warn};

use crate::{Error, Result, SharingBackend, SharingCommand};

/// Where macOS installs the tool
pub const DEFAULT_PROGRAM: &str = "/usr/sbin/sharing";

/// Runs `sharing` as a child process
#[derive(Debug, Clone)]
pub struct SystemSharing {
    program: PathBuf,
}

impl SystemSharing {
    /// Use `program` without any platform checks
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Locate the tool for the current host.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedPlatform`] off macOS and
    /// [`Error::ToolNotFound`] when `program` does not exist.
    pub fn detect(program: Option<&Path>) -> Result<Self> {
        if !cfg!(target_os = "macos") {
            return Err(Error::UnsupportedPlatform {
                os: std::env::consts::OS.to_string(),
            });
        }

        let program = program
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_PROGRAM));
        if !program.is_file() {
            return Err(Error::ToolNotFound { path: program });
        }
        Ok(Self::new(program))
    }

    pub fn program(&self) -> &Path {
        &self.program
    }
}

impl SharingBackend for SystemSharing {
    fn run(&self, command: &SharingCommand) -> Result<String> {
        debug!(program = %self.program.display(), %command, "Invoking sharing tool");

        let output = Command::new(&self.program)
            .args(command.args())
            .output()
            .map_err(|source| Error::Spawn {
                program: self.program.clone(),
                source,
            })?;

        let stdout = String::from_utf8_lossy(&output.stdout).to_string();
        let stderr = String::from_utf8_lossy(&output.stderr).to_string();
        let stdout = check_output(command, output.status.code(), stdout, &stderr)?;
        if command.is_mutation() {
            info!(%command, "Applied share change");
        }
        Ok(stdout)
    }
}

/// Decide whether a finished invocation succeeded.
///
/// A non-zero (or missing) exit code is a failure. For mutations, anything
/// written to stderr despite a zero exit code is treated as a failure too,
/// since the tool reports some rejected edits that way.
pub(crate) fn check_output(
    command: &SharingCommand,
    code: Option<i32>,
    stdout: String,
    stderr: &str,
) -> Result<String> {
    let stderr = stderr.trim();
    match code {
        Some(0) => {}
        code => {
            return Err(Error::CommandFailed {
                command: command.to_string(),
                code: code.unwrap_or(-1),
                stderr: stderr.to_string(),
            });
        }
    }

    if !stderr.is_empty() {
        if command.is_mutation() {
            return Err(Error::UnexpectedOutput {
                command: command.to_string(),
                output: stderr.to_string(),
            });
        }
        warn!(%command, stderr, "sharing tool wrote to stderr");
    }
    Ok(stdout)
}
