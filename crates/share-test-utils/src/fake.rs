//! [`FakeSharing`]: an in-memory `sharing` tool.
//!
//! Shares are kept as records; `list` renders them in the real listing
//! layout and mutations update them the way the tool would. Every command is
//! recorded so tests can assert on the exact invocation sequence.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use share_exec::{Error, Result, SharingBackend, SharingCommand};
use share_model::{EditFlag, PendingEdit, Protocol, ProtocolSet, ShareRecord};

use crate::listing::render_listing;

#[derive(Default)]
struct FakeState {
    shares: BTreeMap<String, ShareRecord>,
    invocations: Vec<SharingCommand>,
    fail_next: Vec<&'static str>,
    raw_listing: Option<String>,
}

/// In-memory stand-in for the `sharing` tool
#[derive(Default)]
pub struct FakeSharing {
    state: Mutex<FakeState>,
}

impl FakeSharing {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with `record` already shared
    pub fn with_share(self, record: ShareRecord) -> Self {
        self.insert(record);
        self
    }

    fn state(&self) -> MutexGuard<'_, FakeState> {
        self.state.lock().expect("FakeSharing state poisoned")
    }

    pub fn insert(&self, record: ShareRecord) {
        self.state().shares.insert(record.path.clone(), record);
    }

    /// Make the next command of `kind` ("list", "add", "remove", "edit")
    /// exit with status 1
    pub fn fail_next(&self, kind: &'static str) {
        self.state().fail_next.push(kind);
    }

    /// Serve `text` for every `list` instead of rendering the shares
    pub fn set_raw_listing(&self, text: impl Into<String>) {
        self.state().raw_listing = Some(text.into());
    }

    /// Every command received so far, in order
    pub fn invocations(&self) -> Vec<SharingCommand> {
        self.state().invocations.clone()
    }

    /// Commands other than `list`, in order
    pub fn mutations(&self) -> Vec<SharingCommand> {
        self.invocations()
            .into_iter()
            .filter(SharingCommand::is_mutation)
            .collect()
    }

    pub fn clear_invocations(&self) {
        self.state().invocations.clear();
    }

    pub fn share(&self, path: &str) -> Option<ShareRecord> {
        self.state().shares.get(path).cloned()
    }

    pub fn shares(&self) -> Vec<ShareRecord> {
        self.state().shares.values().cloned().collect()
    }
}

fn failure(command: &SharingCommand, stderr: &str) -> Error {
    Error::CommandFailed {
        command: command.to_string(),
        code: 1,
        stderr: stderr.to_string(),
    }
}

/// Inverse of `encode_flags`: hundreds afp, tens ftp, units smb
pub fn decode_flags(flags: &str) -> ProtocolSet {
    let digits: Vec<char> = flags.chars().collect();
    [Protocol::Afp, Protocol::Ftp, Protocol::Smb]
        .into_iter()
        .enumerate()
        .filter(|(i, _)| digits.get(*i) == Some(&'1'))
        .map(|(_, p)| p)
        .collect()
}

fn apply_edit(record: &mut ShareRecord, edit: &PendingEdit) {
    match edit.flag {
        EditFlag::ShareName => {
            record.share_name = edit.value.clone();
            let share_name = record.share_name.clone();
            record.name_overrides.retain(|_, name| *name != share_name);
        }
        EditFlag::Shared => record.enabled_protocols = decode_flags(&edit.value),
        EditFlag::GuestAccess => record.guest_protocols = decode_flags(&edit.value),
        EditFlag::AfpName => record.set_name_override(Protocol::Afp, edit.value.as_str()),
        EditFlag::SmbName => record.set_name_override(Protocol::Smb, edit.value.as_str()),
        EditFlag::FtpName => record.set_name_override(Protocol::Ftp, edit.value.as_str()),
        EditFlag::InheritPerms => record.afp_inherit_perms = edit.value.starts_with('1'),
    }
}

impl SharingBackend for FakeSharing {
    fn run(&self, command: &SharingCommand) -> Result<String> {
        let mut state = self.state();
        state.invocations.push(command.clone());

        if let Some(pos) = state.fail_next.iter().position(|k| *k == command.kind()) {
            state.fail_next.remove(pos);
            return Err(failure(command, "injected failure"));
        }

        match command {
            SharingCommand::List => Ok(match &state.raw_listing {
                Some(raw) => raw.clone(),
                None => render_listing(state.shares.values()),
            }),
            SharingCommand::Add { path } => {
                if state.shares.contains_key(path) {
                    return Err(failure(command, "share point already exists"));
                }
                let record = ShareRecord::unconfigured(path.clone())
                    .map_err(|e| failure(command, &e.to_string()))?;
                state.shares.insert(path.clone(), record);
                Ok(String::new())
            }
            SharingCommand::Remove { share_name } => {
                let path = state
                    .shares
                    .values()
                    .find(|r| r.share_name == *share_name)
                    .map(|r| r.path.clone())
                    .ok_or_else(|| failure(command, "no such share point"))?;
                state.shares.remove(&path);
                Ok(String::new())
            }
            SharingCommand::Edit { share_name, edits } => {
                let record = state
                    .shares
                    .values_mut()
                    .find(|r| r.share_name == *share_name)
                    .ok_or_else(|| failure(command, "no such share point"))?;
                for edit in edits {
                    apply_edit(record, edit);
                }
                Ok(String::new())
            }
        }
    }
}
