//! The share point record shared by the parser and the reconciler

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{Error, Protocol, ProtocolSet, Result};

/// Whether a share point should exist (or does exist)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Existence {
    #[default]
    Present,
    Absent,
}

/// Full state of one share point.
///
/// `path` is the identity. `share_name` is the registration name the
/// `sharing` tool uses to address the share and can change over the
/// record's lifetime, so it must never be used to match records across a
/// mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShareRecord {
    pub path: String,
    pub share_name: String,
    #[serde(default)]
    pub enabled_protocols: ProtocolSet,
    #[serde(default)]
    pub guest_protocols: ProtocolSet,
    /// Per-protocol names that differ from `share_name`
    #[serde(default)]
    pub name_overrides: BTreeMap<Protocol, String>,
    #[serde(default)]
    pub afp_inherit_perms: bool,
    #[serde(default)]
    pub existence: Existence,
}

impl ShareRecord {
    /// The state `sharing -a` leaves a new share in: registered under the
    /// final path component with nothing enabled.
    pub fn unconfigured(path: impl Into<String>) -> Result<Self> {
        let path = path.into();
        let share_name = default_share_name(&path)?;
        Ok(Self {
            path,
            share_name,
            enabled_protocols: ProtocolSet::new(),
            guest_protocols: ProtocolSet::new(),
            name_overrides: BTreeMap::new(),
            afp_inherit_perms: false,
            existence: Existence::Present,
        })
    }

    pub fn is_present(&self) -> bool {
        self.existence == Existence::Present
    }

    /// The override for `protocol`, if one differs from the share name
    pub fn name_override(&self, protocol: Protocol) -> Option<&str> {
        self.name_overrides.get(&protocol).map(String::as_str)
    }

    /// Name the share is published under for `protocol`
    pub fn protocol_name(&self, protocol: Protocol) -> &str {
        self.name_override(protocol).unwrap_or(&self.share_name)
    }

    /// Record a per-protocol name. Empty names and names equal to the
    /// share name mean "no override" and clear any existing entry.
    pub fn set_name_override(&mut self, protocol: Protocol, name: impl Into<String>) {
        let name = name.into();
        if name.is_empty() || name == self.share_name {
            self.name_overrides.remove(&protocol);
        } else {
            self.name_overrides.insert(protocol, name);
        }
    }

    /// Protocols allowing guest access that are not enabled at all
    pub fn orphan_guest_protocols(&self) -> ProtocolSet {
        self.guest_protocols
            .difference(&self.enabled_protocols)
            .copied()
            .collect()
    }
}

/// Share name used when none is declared: the final component of `path`.
pub fn default_share_name(path: &str) -> Result<String> {
    Path::new(path)
        .file_name()
        .and_then(|name| name.to_str())
        .map(str::to_string)
        .ok_or_else(|| Error::UnnamedPath {
            path: path.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn unconfigured_uses_final_component() {
        let record = ShareRecord::unconfigured("/Shares/Projects").unwrap();
        assert_eq!(record.share_name, "Projects");
        assert!(record.enabled_protocols.is_empty());
        assert!(record.guest_protocols.is_empty());
        assert!(record.name_overrides.is_empty());
        assert!(!record.afp_inherit_perms);
        assert!(record.is_present());
    }

    #[test]
    fn trailing_slash_is_ignored() {
        assert_eq!(default_share_name("/Shares/A/").unwrap(), "A");
    }

    #[test]
    fn root_has_no_default_name() {
        assert!(matches!(
            default_share_name("/"),
            Err(Error::UnnamedPath { .. })
        ));
    }

    #[test]
    fn override_equal_to_share_name_collapses() {
        let mut record = ShareRecord::unconfigured("/Shares/A").unwrap();
        record.set_name_override(Protocol::Afp, "A");
        record.set_name_override(Protocol::Smb, "");
        record.set_name_override(Protocol::Ftp, "Files");

        assert_eq!(record.name_override(Protocol::Afp), None);
        assert_eq!(record.name_override(Protocol::Smb), None);
        assert_eq!(record.name_override(Protocol::Ftp), Some("Files"));
        assert_eq!(record.protocol_name(Protocol::Afp), "A");
        assert_eq!(record.protocol_name(Protocol::Ftp), "Files");
    }

    #[test]
    fn override_can_be_cleared() {
        let mut record = ShareRecord::unconfigured("/Shares/A").unwrap();
        record.set_name_override(Protocol::Smb, "Other");
        record.set_name_override(Protocol::Smb, "A");
        assert!(record.name_overrides.is_empty());
    }

    #[test]
    fn orphan_guest_protocols_are_reported() {
        let mut record = ShareRecord::unconfigured("/Shares/A").unwrap();
        record.enabled_protocols.insert(Protocol::Afp);
        record.guest_protocols.insert(Protocol::Afp);
        record.guest_protocols.insert(Protocol::Smb);

        let orphans: Vec<_> = record.orphan_guest_protocols().into_iter().collect();
        assert_eq!(orphans, vec![Protocol::Smb]);
    }
}
