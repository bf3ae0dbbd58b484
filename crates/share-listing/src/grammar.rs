//! Literal-prefix grammar for `sharing -l` output
//!
//! The listing looks like this (tabs shown as `\t`):
//!
//! ```text
//! List of Share Points
//! name:\t\tPublic
//! path:\t\t/Users/me/Public
//! \tafp:\t{
//! \t\tname:\tPublic
//! \t\tshared:\t1
//! \t\tguest access:\t1
//! \t\tinherit perms:\t0
//! \t}
//! \tsmb:\t{
//! ...
//! ```
//!
//! Protocols and keys form closed sets; everything is located by scanning
//! for fixed prefixes.

use std::collections::BTreeMap;

use share_model::Protocol;

/// Text that precedes the first share block
pub const HEADER_MARKER: &str = "List of Share Points";

/// Every share block starts with a line beginning with this token
pub const BLOCK_PREFIX: &str = "name:";

/// Prefix of the line carrying the shared path
pub const PATH_PREFIX: &str = "path:";

const NAME_KEY: &str = "name";
const SHARED_KEY: &str = "shared";
const GUEST_ACCESS_KEY: &str = "guest access";
const INHERIT_PERMS_KEY: &str = "inherit perms";

/// Everything after the header marker, with leading whitespace removed
pub(crate) fn strip_header(text: &str) -> Option<&str> {
    let start = text.find(HEADER_MARKER)? + HEADER_MARKER.len();
    Some(text[start..].trim_start())
}

/// Split content into share blocks at each line starting with `name:`.
///
/// The `name:` token itself is not part of the returned slices. Text before
/// the first block is dropped.
pub(crate) fn split_blocks(content: &str) -> Vec<&str> {
    let mut starts = Vec::new();
    let mut offset = 0;
    for line in content.split_inclusive('\n') {
        if line.starts_with(BLOCK_PREFIX) {
            starts.push(offset);
        }
        offset += line.len();
    }

    starts
        .iter()
        .enumerate()
        .map(|(i, &start)| {
            let end = starts.get(i + 1).copied().unwrap_or(content.len());
            &content[start + BLOCK_PREFIX.len()..end]
        })
        .collect()
}

/// Split a block into its share name and configuration body
pub(crate) fn split_block_header(block: &str) -> (String, &str) {
    let (first, body) = block.split_once('\n').unwrap_or((block, ""));
    let share_name = first.trim_start_matches('\t').trim_end_matches('\r');
    (share_name.to_string(), body)
}

/// Value of the first `path:` line in the body, if present and non-empty
pub(crate) fn extract_path(body: &str) -> Option<String> {
    let line = body.lines().find(|line| line.starts_with(PATH_PREFIX))?;
    let field = match line.rsplit('\t').next() {
        Some(field) if field != line => field,
        _ => line[PATH_PREFIX.len()..].trim_start(),
    };
    let path = field.trim_end_matches(['\r', '\n']);
    (!path.is_empty()).then(|| path.to_string())
}

/// Length of a `<protocol>:\t*{` (or `}`) delimiter at the start of `rest`
fn delimiter_len(rest: &str, protocol: Protocol) -> Option<usize> {
    let after_colon = rest.strip_prefix(protocol.key())?.strip_prefix(':')?;
    let after_tabs = after_colon.trim_start_matches('\t');
    let after_brace = after_tabs
        .strip_prefix('{')
        .or_else(|| after_tabs.strip_prefix('}'))?;
    Some(rest.len() - after_brace.len())
}

/// Pair each protocol found in the body with the text that follows its
/// delimiter, up to the next delimiter or the end of the block.
pub(crate) fn protocol_sections(body: &str) -> BTreeMap<Protocol, &str> {
    // (protocol, delimiter start, section start)
    let mut marks: Vec<(Protocol, usize, usize)> = Vec::new();
    let mut resume_at = 0;
    for (i, _) in body.char_indices() {
        if i < resume_at {
            continue;
        }
        let rest = &body[i..];
        for protocol in Protocol::ALL {
            if let Some(len) = delimiter_len(rest, protocol) {
                marks.push((protocol, i, i + len));
                resume_at = i + len;
                break;
            }
        }
    }

    let mut sections = BTreeMap::new();
    for (k, &(protocol, _, start)) in marks.iter().enumerate() {
        let end = marks.get(k + 1).map(|m| m.1).unwrap_or(body.len());
        sections.insert(protocol, &body[start..end]);
    }
    sections
}

/// Value of `key` within a protocol section, or `""` when the key is absent
fn key_value(section: &str, key: &str) -> String {
    for line in section.lines() {
        let line = line.trim_start_matches([' ', '\t']);
        if let Some(value) = line.strip_prefix(key).and_then(|rest| rest.strip_prefix(':')) {
            return value
                .trim_start_matches('\t')
                .trim_end_matches('\r')
                .to_string();
        }
    }
    String::new()
}

/// The four keys read from every protocol section
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct ProtocolFields {
    pub name: String,
    pub shared: String,
    pub guest_access: String,
    pub inherit_perms: String,
}

impl ProtocolFields {
    pub fn parse(section: &str) -> Self {
        Self {
            name: key_value(section, NAME_KEY),
            shared: key_value(section, SHARED_KEY),
            guest_access: key_value(section, GUEST_ACCESS_KEY),
            inherit_perms: key_value(section, INHERIT_PERMS_KEY),
        }
    }

    pub fn is_shared(&self) -> bool {
        self.shared == "1"
    }

    pub fn allows_guests(&self) -> bool {
        self.guest_access == "1"
    }

    pub fn inherits_perms(&self) -> bool {
        self.inherit_perms == "1"
    }
}
