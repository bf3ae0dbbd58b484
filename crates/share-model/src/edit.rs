//! Pending edit entries accumulated before a batched `sharing -e` call

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::Protocol;

/// A flag accepted by the `sharing -e` edit primitive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EditFlag {
    /// `-n`: rename the share
    ShareName,
    /// `-s`: enabled protocol flags
    Shared,
    /// `-g`: guest access protocol flags
    GuestAccess,
    /// `-A`: AFP specific name
    AfpName,
    /// `-S`: SMB specific name
    SmbName,
    /// `-F`: FTP specific name
    FtpName,
    /// `-i`: AFP permission inheritance
    InheritPerms,
}

impl EditFlag {
    /// The command-line switch for this flag
    pub fn as_arg(self) -> &'static str {
        match self {
            EditFlag::ShareName => "-n",
            EditFlag::Shared => "-s",
            EditFlag::GuestAccess => "-g",
            EditFlag::AfpName => "-A",
            EditFlag::SmbName => "-S",
            EditFlag::FtpName => "-F",
            EditFlag::InheritPerms => "-i",
        }
    }

    /// The name override flag for a protocol
    pub fn name_for(protocol: Protocol) -> Self {
        match protocol {
            Protocol::Afp => EditFlag::AfpName,
            Protocol::Smb => EditFlag::SmbName,
            Protocol::Ftp => EditFlag::FtpName,
        }
    }
}

impl fmt::Display for EditFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_arg())
    }
}

/// One `(flag, value)` pair waiting for the next flush
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingEdit {
    pub flag: EditFlag,
    pub value: String,
}

impl PendingEdit {
    pub fn new(flag: EditFlag, value: impl Into<String>) -> Self {
        Self {
            flag,
            value: value.into(),
        }
    }

    /// Value for `-i` given the desired inheritance setting
    pub fn inherit_perms(inherit: bool) -> Self {
        Self::new(EditFlag::InheritPerms, if inherit { "10" } else { "00" })
    }
}

impl fmt::Display for PendingEdit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.flag, self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_flags_follow_protocol() {
        assert_eq!(EditFlag::name_for(Protocol::Afp).as_arg(), "-A");
        assert_eq!(EditFlag::name_for(Protocol::Smb).as_arg(), "-S");
        assert_eq!(EditFlag::name_for(Protocol::Ftp).as_arg(), "-F");
    }

    #[test]
    fn inherit_perms_values() {
        assert_eq!(PendingEdit::inherit_perms(true).value, "10");
        assert_eq!(PendingEdit::inherit_perms(false).value, "00");
    }

    #[test]
    fn display_is_flag_then_value() {
        let edit = PendingEdit::new(EditFlag::Shared, "101");
        assert_eq!(edit.to_string(), "-s 101");
    }
}
