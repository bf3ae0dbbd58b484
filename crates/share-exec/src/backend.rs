//! The seam between reconciliation and the `sharing` tool

use crate::{Result, SharingCommand};

/// Something that can execute `sharing` commands.
///
/// Implementations block until the command completes. The returned string
/// is the command's standard output.
pub trait SharingBackend: Send + Sync {
    /// Execute a single command
    fn run(&self, command: &SharingCommand) -> Result<String>;

    /// Raw `sharing -l` output
    fn list(&self) -> Result<String> {
        self.run(&SharingCommand::List)
    }
}

impl<T: SharingBackend + ?Sized> SharingBackend for &T {
    fn run(&self, command: &SharingCommand) -> Result<String> {
        (**self).run(command)
    }
}

impl<T: SharingBackend + ?Sized> SharingBackend for Box<T> {
    fn run(&self, command: &SharingCommand) -> Result<String> {
        (**self).run(command)
    }
}
