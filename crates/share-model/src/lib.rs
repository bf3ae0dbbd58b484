//! Data model for share point reconciliation
//!
//! This crate is the bottom layer of the workspace. It defines:
//!
//! - [`Protocol`] and the three-digit flag encoding ([`encode_flags`])
//! - [`ShareRecord`], the full state of one share point
//! - [`ShareDeclaration`], a desired share as written in a manifest
//! - [`PendingEdit`], one `(flag, value)` pair for the batched edit primitive

pub mod declaration;
pub mod edit;
pub mod error;
pub mod protocol;
pub mod record;

pub use declaration::ShareDeclaration;
pub use edit::{EditFlag, PendingEdit};
pub use error::{Error, Result};
pub use protocol::{Protocol, ProtocolSet, encode_flags};
pub use record::{Existence, ShareRecord, default_share_name};
