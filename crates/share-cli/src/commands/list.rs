//! List command: the host's share points as manifest entries

use std::path::Path;

use colored::Colorize;
use share_core::Manifest;
use share_exec::SharingBackend;
use share_listing::{Listing, parse_listing};
use share_model::ShareDeclaration;

use crate::context::Context;
use crate::error::Result;

/// Run the list command
///
/// Reads `input` when given, otherwise runs `sharing -l`.
pub fn run_list(ctx: &Context, all: bool, json: bool, input: Option<&Path>) -> Result<()> {
    let text = match input {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let manifest = ctx.optional_manifest()?;
            ctx.backend(&manifest.sharing)?.list()?
        }
    };

    let listing = parse_listing(&text)?;
    for failure in listing.failures() {
        eprintln!("{} {}", "warning:".yellow().bold(), failure);
    }

    print!("{}", render(&listing, all, json)?);
    Ok(())
}

/// Render the listing as `[[share]]` TOML or a JSON array.
///
/// Without `all`, attributes equal to their defaults are left out.
pub fn render(listing: &Listing, all: bool, json: bool) -> Result<String> {
    let shares: Vec<ShareDeclaration> = listing
        .iter()
        .map(|record| {
            if all {
                ShareDeclaration::from_record(record)
            } else {
                ShareDeclaration::minimal(record)
            }
        })
        .collect();

    if json {
        return Ok(format!("{}\n", serde_json::to_string_pretty(&shares)?));
    }

    let manifest = Manifest {
        shares,
        ..Manifest::default()
    };
    Ok(manifest.to_toml()?)
}
