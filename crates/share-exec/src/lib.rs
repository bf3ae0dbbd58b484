//! Invocation plumbing for the macOS `sharing` tool
//!
//! [`SharingCommand`] describes the four operations sharectl needs (list,
//! add, remove, edit). [`SharingBackend`] is the trait the reconciler talks
//! to; [`SystemSharing`] implements it by spawning the real executable.

pub mod backend;
pub mod command;
pub mod error;
pub mod system;

pub use backend::SharingBackend;
pub use command::SharingCommand;
pub use error::{Error, Result};
pub use system::{DEFAULT_PROGRAM, SystemSharing};
