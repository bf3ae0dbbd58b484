//! Sharing protocols and the three-digit flag encoding used by `sharing`
//!
//! The `sharing` tool takes enabled and guest protocols as a positional
//! decimal string: AFP occupies the hundreds digit, FTP the tens digit and
//! SMB the units digit. `{afp, smb}` therefore encodes as `"101"`.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::Error;

/// A protocol a share point can be exported over
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum Protocol {
    Afp,
    Smb,
    Ftp,
}

/// Set of protocols, ordered so encoded output and listings are stable
pub type ProtocolSet = BTreeSet<Protocol>;

impl Protocol {
    /// Every supported protocol, in the order the listing grammar scans them
    pub const ALL: [Protocol; 3] = [Protocol::Afp, Protocol::Smb, Protocol::Ftp];

    /// Identifier used in listing output and manifests
    pub fn key(self) -> &'static str {
        match self {
            Protocol::Afp => "afp",
            Protocol::Smb => "smb",
            Protocol::Ftp => "ftp",
        }
    }

    /// Positional weight of this protocol in the flag string
    pub fn weight(self) -> u16 {
        match self {
            Protocol::Afp => 100,
            Protocol::Ftp => 10,
            Protocol::Smb => 1,
        }
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Protocol {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "afp" => Ok(Protocol::Afp),
            "smb" => Ok(Protocol::Smb),
            "ftp" => Ok(Protocol::Ftp),
            _ => Err(Error::UnknownProtocol {
                value: s.to_string(),
            }),
        }
    }
}

impl TryFrom<String> for Protocol {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Encode a protocol set into the zero-padded flag string `sharing` expects.
///
/// The result is always exactly three characters; an empty set is `"000"`.
///
/// # Example
///
/// ```
/// use share_model::{encode_flags, Protocol, ProtocolSet};
///
/// let protocols: ProtocolSet = [Protocol::Afp, Protocol::Smb].into_iter().collect();
/// assert_eq!(encode_flags(&protocols), "101");
/// ```
pub fn encode_flags(protocols: &ProtocolSet) -> String {
    let sum: u16 = protocols.iter().map(|p| p.weight()).sum();
    format!("{:03}", sum)
}
