//! SyncEngine for coordinating declared shares with the sharing tool
//!
//! This module provides:
//! - **discover**: Query the tool and parse its listing into a snapshot
//! - **check**: Report which declared shares differ from the snapshot
//! - **sync**: Create, remove and edit shares until they match

mod check;
mod engine;

pub use check::{CheckReport, CheckStatus, DriftItem};
pub use engine::{SyncEngine, SyncOptions, SyncReport, check_listing};
