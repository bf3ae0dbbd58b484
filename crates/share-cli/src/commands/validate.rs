//! Validate command

use colored::Colorize;

use crate::context::Context;
use crate::error::Result;

/// Load and validate the manifests without running the sharing tool
pub fn run_validate(ctx: &Context) -> Result<()> {
    let manifest = ctx.load_manifest()?;
    let sources: Vec<String> = ctx
        .config_paths()
        .iter()
        .map(|p| p.display().to_string())
        .collect();

    println!(
        "{} {} share(s) declared in {}",
        "OK".green().bold(),
        manifest.shares.len(),
        sources.join(", ").cyan()
    );
    Ok(())
}
