//! Shared test utilities for the sharectl workspace.
//!
//! This crate is a dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`listing`]: listing text fixtures and a renderer for records
//! - [`fake`]: [`FakeSharing`], an in-memory stand-in for the `sharing` tool
//! - [`manifest`]: temporary manifest files

pub mod fake;
pub mod listing;
pub mod manifest;

pub use fake::FakeSharing;
pub use listing::{SAMPLE_LISTING, render_listing, share};
pub use manifest::TestManifest;
