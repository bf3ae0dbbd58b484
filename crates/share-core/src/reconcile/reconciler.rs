//! Accumulate-then-flush reconciliation of a single share

use serde::Serialize;
use share_exec::{SharingBackend, SharingCommand};
use share_model::{EditFlag, Existence, PendingEdit, Protocol, ProtocolSet, ShareRecord, encode_flags};
use tracing::{debug, info};

use super::{Transition, existence_transition, resolve_live_name};
use crate::Result;

/// What reconciling one share did (or, for a plan, would do)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShareOutcome {
    pub path: String,
    pub transition: Transition,
    /// Mutating commands, in the order they were issued
    #[serde(serialize_with = "serialize_commands")]
    pub commands: Vec<SharingCommand>,
}

fn serialize_commands<S: serde::Serializer>(
    commands: &[SharingCommand],
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.collect_seq(commands.iter().map(ToString::to_string))
}

impl ShareOutcome {
    pub fn is_noop(&self) -> bool {
        self.commands.is_empty()
    }
}

/// Reconciles one share: desired state, the state last observed, and the
/// edits queued for the next flush.
///
/// Setters only append to the pending list; the tool is touched by
/// [`create`](Self::create), [`destroy`](Self::destroy) and
/// [`flush`](Self::flush), each issuing exactly one mutating command.
#[derive(Debug, Clone)]
pub struct Reconciler {
    desired: ShareRecord,
    current: Option<ShareRecord>,
    pending: Vec<PendingEdit>,
}

impl Reconciler {
    pub fn new(desired: ShareRecord, current: Option<ShareRecord>) -> Self {
        Self {
            desired,
            current,
            pending: Vec::new(),
        }
    }

    pub fn current(&self) -> Option<&ShareRecord> {
        self.current.as_ref()
    }

    /// Edits queued for the next flush, in order
    pub fn pending(&self) -> &[PendingEdit] {
        &self.pending
    }

    pub fn transition(&self) -> Transition {
        existence_transition(&self.desired, self.current.as_ref())
    }

    pub fn set_share_name(&mut self, name: &str) {
        self.pending.push(PendingEdit::new(EditFlag::ShareName, name));
    }

    pub fn set_enabled_protocols(&mut self, protocols: &ProtocolSet) {
        self.pending
            .push(PendingEdit::new(EditFlag::Shared, encode_flags(protocols)));
    }

    pub fn set_guest_protocols(&mut self, protocols: &ProtocolSet) {
        self.pending
            .push(PendingEdit::new(EditFlag::GuestAccess, encode_flags(protocols)));
    }

    /// Queue a per-protocol name. A name equal to the share name the record
    /// resolves to is not an override and is not queued.
    pub fn set_protocol_name(&mut self, protocol: Protocol, name: &str) {
        if name == self.desired.share_name {
            return;
        }
        self.pending
            .push(PendingEdit::new(EditFlag::name_for(protocol), name));
    }

    pub fn set_afp_inherit_perms(&mut self, inherit: bool) {
        self.pending.push(PendingEdit::inherit_perms(inherit));
    }

    /// Queue an edit for every attribute where the current state differs
    /// from the desired one. Does nothing when the share is not present.
    pub fn queue_changes(&mut self) {
        let Some(current) = self.current.clone() else {
            return;
        };
        let desired = self.desired.clone();

        if desired.share_name != current.share_name {
            self.set_share_name(&desired.share_name);
        }
        if desired.enabled_protocols != current.enabled_protocols {
            self.set_enabled_protocols(&desired.enabled_protocols);
        }
        if desired.guest_protocols != current.guest_protocols {
            self.set_guest_protocols(&desired.guest_protocols);
        }
        // `-n` moves every protocol without an override to the new name, so
        // compare against the names the share has once the rename is applied
        for protocol in Protocol::ALL {
            let name = desired.protocol_name(protocol);
            let after_rename = current
                .name_override(protocol)
                .unwrap_or(desired.share_name.as_str());
            if name != after_rename {
                self.set_protocol_name(protocol, name);
            }
        }
        if desired.afp_inherit_perms != current.afp_inherit_perms {
            self.set_afp_inherit_perms(desired.afp_inherit_perms);
        }
    }

    /// Add the share, then queue every declared attribute.
    ///
    /// `sharing -a` registers the share under its final path component with
    /// nothing enabled, so the attributes are diffed against that state.
    /// A path with no final component fails before anything is added.
    pub fn create<B: SharingBackend + ?Sized>(&mut self, backend: &B) -> Result<SharingCommand> {
        let baseline = ShareRecord::unconfigured(self.desired.path.clone())?;
        let command = SharingCommand::Add {
            path: self.desired.path.clone(),
        };
        backend.run(&command)?;
        info!(path = %self.desired.path, "Created share point");

        self.current = Some(baseline);
        self.queue_changes();
        Ok(command)
    }

    /// Remove the share under its currently registered name
    pub fn destroy<B: SharingBackend + ?Sized>(&mut self, backend: &B) -> Result<Option<SharingCommand>> {
        let Some(current) = &self.current else {
            return Ok(None);
        };
        let command = SharingCommand::Remove {
            share_name: current.share_name.clone(),
        };
        backend.run(&command)?;
        info!(path = %self.desired.path, share_name = %current.share_name, "Removed share point");

        self.current = None;
        self.pending.clear();
        Ok(Some(command))
    }

    /// Send every pending edit in one `sharing -e` call.
    ///
    /// Only runs when the share should be present and edits are pending. The
    /// target name is looked up fresh because the registered name may differ
    /// from the one seen at discovery.
    pub fn flush<B: SharingBackend + ?Sized>(&mut self, backend: &B) -> Result<Option<SharingCommand>> {
        if self.desired.existence != Existence::Present || self.pending.is_empty() {
            return Ok(None);
        }

        let share_name = resolve_live_name(backend, &self.desired.path)?;
        let command = SharingCommand::Edit {
            share_name,
            edits: self.pending.clone(),
        };
        backend.run(&command)?;
        info!(path = %self.desired.path, edits = self.pending.len(), "Flushed share edits");

        self.pending.clear();
        self.current = Some(self.desired.clone());
        Ok(Some(command))
    }

    /// Apply the existence transition and flush pending edits
    pub fn apply<B: SharingBackend + ?Sized>(&mut self, backend: &B) -> Result<ShareOutcome> {
        let transition = self.transition();
        debug!(path = %self.desired.path, ?transition, "Reconciling share");

        let mut commands = Vec::new();
        match transition {
            Transition::Create => commands.push(self.create(backend)?),
            Transition::Destroy => commands.extend(self.destroy(backend)?),
            Transition::Noop => self.queue_changes(),
        }
        commands.extend(self.flush(backend)?);

        Ok(ShareOutcome {
            path: self.desired.path.clone(),
            transition,
            commands,
        })
    }

    /// The commands [`apply`](Self::apply) would issue, without touching the
    /// tool. Edits target the name currently known for the share.
    pub fn plan(&self) -> Result<ShareOutcome> {
        let transition = self.transition();
        let mut preview = self.clone();
        let mut commands = Vec::new();

        match transition {
            Transition::Create => {
                preview.current = Some(ShareRecord::unconfigured(self.desired.path.clone())?);
                commands.push(SharingCommand::Add {
                    path: self.desired.path.clone(),
                });
                preview.queue_changes();
            }
            Transition::Destroy => {
                if let Some(current) = &self.current {
                    commands.push(SharingCommand::Remove {
                        share_name: current.share_name.clone(),
                    });
                }
                preview.pending.clear();
            }
            Transition::Noop => preview.queue_changes(),
        }

        if self.desired.existence == Existence::Present
            && !preview.pending.is_empty()
            && let Some(current) = &preview.current
        {
            commands.push(SharingCommand::Edit {
                share_name: current.share_name.clone(),
                edits: preview.pending.clone(),
            });
        }

        Ok(ShareOutcome {
            path: self.desired.path.clone(),
            transition,
            commands,
        })
    }
}
