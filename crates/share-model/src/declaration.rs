//! Declared (desired) share points as written in a manifest

use serde::{Deserialize, Serialize};

use crate::record::default_share_name;
use crate::{Existence, Protocol, ProtocolSet, Result, ShareRecord};

fn is_false(value: &bool) -> bool {
    !*value
}

fn is_present(ensure: &Existence) -> bool {
    *ensure == Existence::Present
}

/// One `[[share]]` entry. Unset attributes take their defaults when the
/// declaration is resolved into a [`ShareRecord`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ShareDeclaration {
    /// Filesystem path being shared; the identity of the share
    pub path: String,

    /// Registration name, defaults to the final path component
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub share_name: Option<String>,

    /// Protocols the share is exported over
    #[serde(default, skip_serializing_if = "ProtocolSet::is_empty")]
    pub protocols: ProtocolSet,

    /// Protocols allowing unauthenticated access
    #[serde(default, skip_serializing_if = "ProtocolSet::is_empty")]
    pub guest_protocols: ProtocolSet,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub afp_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub smb_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ftp_name: Option<String>,

    #[serde(default, skip_serializing_if = "is_false")]
    pub afp_inherit_perms: bool,

    #[serde(default, skip_serializing_if = "is_present")]
    pub ensure: Existence,
}

impl ShareDeclaration {
    /// A declaration for `path` with every attribute at its default
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            share_name: None,
            protocols: ProtocolSet::new(),
            guest_protocols: ProtocolSet::new(),
            afp_name: None,
            smb_name: None,
            ftp_name: None,
            afp_inherit_perms: false,
            ensure: Existence::Present,
        }
    }

    /// Declared name for `protocol`, if any
    pub fn protocol_name(&self, protocol: Protocol) -> Option<&str> {
        match protocol {
            Protocol::Afp => self.afp_name.as_deref(),
            Protocol::Smb => self.smb_name.as_deref(),
            Protocol::Ftp => self.ftp_name.as_deref(),
        }
    }

    fn protocol_name_mut(&mut self, protocol: Protocol) -> &mut Option<String> {
        match protocol {
            Protocol::Afp => &mut self.afp_name,
            Protocol::Smb => &mut self.smb_name,
            Protocol::Ftp => &mut self.ftp_name,
        }
    }

    /// Apply defaults and produce the desired record.
    ///
    /// # Errors
    ///
    /// Fails when no share name is declared and the path has no final
    /// component to default to.
    pub fn resolve(&self) -> Result<ShareRecord> {
        let share_name = match &self.share_name {
            Some(name) => name.clone(),
            None => default_share_name(&self.path)?,
        };

        let mut record = ShareRecord {
            path: self.path.clone(),
            share_name,
            enabled_protocols: self.protocols.clone(),
            guest_protocols: self.guest_protocols.clone(),
            name_overrides: Default::default(),
            afp_inherit_perms: self.afp_inherit_perms,
            existence: self.ensure,
        };
        for protocol in Protocol::ALL {
            if let Some(name) = self.protocol_name(protocol) {
                record.set_name_override(protocol, name);
            }
        }
        Ok(record)
    }

    /// Describe a discovered record with every attribute spelled out
    pub fn from_record(record: &ShareRecord) -> Self {
        let mut declaration = Self::new(record.path.clone());
        declaration.share_name = Some(record.share_name.clone());
        declaration.protocols = record.enabled_protocols.clone();
        declaration.guest_protocols = record.guest_protocols.clone();
        for protocol in Protocol::ALL {
            *declaration.protocol_name_mut(protocol) =
                Some(record.protocol_name(protocol).to_string());
        }
        declaration.afp_inherit_perms = record.afp_inherit_perms;
        declaration.ensure = record.existence;
        declaration
    }

    /// Describe a discovered record, leaving out attributes that equal
    /// their defaults so the output reads like a hand-written manifest.
    pub fn minimal(record: &ShareRecord) -> Self {
        let mut declaration = Self::new(record.path.clone());
        let default_name = default_share_name(&record.path).ok();
        if default_name.as_deref() != Some(record.share_name.as_str()) {
            declaration.share_name = Some(record.share_name.clone());
        }
        declaration.protocols = record.enabled_protocols.clone();
        declaration.guest_protocols = record.guest_protocols.clone();
        for (protocol, name) in &record.name_overrides {
            *declaration.protocol_name_mut(*protocol) = Some(name.clone());
        }
        declaration.afp_inherit_perms = record.afp_inherit_perms;
        declaration.ensure = record.existence;
        declaration
    }
}
