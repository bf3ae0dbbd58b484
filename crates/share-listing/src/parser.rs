//! Turn raw listing text into share records keyed by path

use std::collections::BTreeMap;

use share_model::{Existence, Protocol, ProtocolSet, ShareRecord};
use tracing::{debug, warn};

use crate::error::{ParseError, Result};
use crate::grammar::{self, HEADER_MARKER, ProtocolFields};

/// Snapshot of every share the listing reported.
///
/// Blocks that could not be parsed are kept as [`ParseError`]s alongside the
/// records that could, so one bad block never hides the others.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Listing {
    shares: BTreeMap<String, ShareRecord>,
    failures: Vec<ParseError>,
}

impl Listing {
    /// Record reported for `path`, if any
    pub fn get(&self, path: &str) -> Option<&ShareRecord> {
        self.shares.get(path)
    }

    /// All records, keyed by path
    pub fn shares(&self) -> &BTreeMap<String, ShareRecord> {
        &self.shares
    }

    /// Blocks that were skipped because they could not be parsed
    pub fn failures(&self) -> &[ParseError] {
        &self.failures
    }

    pub fn len(&self) -> usize {
        self.shares.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shares.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ShareRecord> {
        self.shares.values()
    }
}

/// Parse the full output of `sharing -l`.
///
/// When the same path appears in more than one block the last one wins.
///
/// # Errors
///
/// Returns [`ParseError::MissingHeader`] when the header marker is absent.
/// Per-block failures do not fail the listing; see [`Listing::failures`].
pub fn parse_listing(text: &str) -> Result<Listing> {
    let content = grammar::strip_header(text).ok_or(ParseError::MissingHeader {
        marker: HEADER_MARKER,
    })?;

    let mut listing = Listing::default();
    for (index, block) in grammar::split_blocks(content).into_iter().enumerate() {
        match parse_block(index, block) {
            Ok(record) => {
                listing.shares.insert(record.path.clone(), record);
            }
            Err(e) => {
                warn!(error = %e, "Skipping unparseable share block");
                listing.failures.push(e);
            }
        }
    }

    debug!(
        shares = listing.shares.len(),
        failures = listing.failures.len(),
        "Parsed share listing"
    );
    Ok(listing)
}

/// Parse one share block (the text following a `name:` token).
///
/// `index` is the block's position in the listing and is only used to
/// identify the block in errors.
pub fn parse_block(index: usize, block: &str) -> Result<ShareRecord> {
    let (share_name, body) = grammar::split_block_header(block);
    let path = grammar::extract_path(body).ok_or_else(|| ParseError::MissingPath {
        index,
        share_name: share_name.clone(),
    })?;

    let sections = grammar::protocol_sections(body);
    let fields: BTreeMap<Protocol, ProtocolFields> = Protocol::ALL
        .into_iter()
        .map(|protocol| {
            let fields = sections
                .get(&protocol)
                .map(|section| ProtocolFields::parse(section))
                .unwrap_or_default();
            (protocol, fields)
        })
        .collect();

    let enabled_protocols: ProtocolSet = fields
        .iter()
        .filter(|(_, f)| f.is_shared())
        .map(|(p, _)| *p)
        .collect();
    let guest_protocols: ProtocolSet = fields
        .iter()
        .filter(|(_, f)| f.allows_guests())
        .map(|(p, _)| *p)
        .collect();
    let afp_inherit_perms = fields
        .get(&Protocol::Afp)
        .is_some_and(ProtocolFields::inherits_perms);

    let mut record = ShareRecord {
        path,
        share_name,
        enabled_protocols,
        guest_protocols,
        name_overrides: BTreeMap::new(),
        afp_inherit_perms,
        existence: Existence::Present,
    };
    for (protocol, f) in &fields {
        record.set_name_override(*protocol, f.name.as_str());
    }

    debug!(index, path = %record.path, share_name = %record.share_name, "Parsed share block");
    Ok(record)
}
