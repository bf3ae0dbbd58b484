//! Per-share reconciliation
//!
//! Reconciling one share happens in two phases:
//!
//! 1. **Accumulate**: compare desired and current state and queue
//!    `(flag, value)` edits. Nothing is sent to the tool.
//! 2. **Flush**: re-resolve the share's registered name and send every
//!    queued edit in a single `sharing -e` call.
//!
//! Existence changes (`add`/`remove`) are issued immediately since the edit
//! primitive can only target a share that exists.

mod lookup;
mod reconciler;

pub use lookup::resolve_live_name;
pub use reconciler::{Reconciler, ShareOutcome};

use serde::{Deserialize, Serialize};
use share_model::{Existence, ShareRecord};

/// What has to happen to a share's existence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Transition {
    Noop,
    Create,
    Destroy,
}

/// Compare the desired existence against whether the share is present
pub fn existence_transition(desired: &ShareRecord, current: Option<&ShareRecord>) -> Transition {
    match (desired.existence, current.is_some()) {
        (Existence::Present, false) => Transition::Create,
        (Existence::Absent, true) => Transition::Destroy,
        _ => Transition::Noop,
    }
}
