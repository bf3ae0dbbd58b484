//! Check and sync command implementations
//!
//! Both commands discover the host's shares once and compare them with the
//! declared manifest; only sync changes anything.

use colored::Colorize;

use share_core::{CheckReport, CheckStatus, DriftItem, SyncEngine, SyncOptions, SyncReport};

use crate::context::Context;
use crate::error::{CliError, Result};

/// Run the check command
///
/// Fails unless every declared share matches the host.
pub fn run_check(ctx: &Context, json: bool) -> Result<()> {
    let manifest = ctx.load_manifest()?;
    let engine = SyncEngine::new(ctx.backend(&manifest.sharing)?);

    if !json {
        println!("{} Checking share points...", "=>".blue().bold());
    }
    let report = engine.check(&manifest.shares)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_check_report(&report);
    }

    if report.is_healthy() {
        Ok(())
    } else {
        Err(CliError::user("Share points do not match the manifest"))
    }
}

fn print_items(marker: colored::ColoredString, items: &[DriftItem]) {
    for item in items {
        let name = item.share_name.as_deref().unwrap_or("-");
        println!(
            "   {} {} ({}): {}",
            marker,
            item.path.cyan(),
            name.dimmed(),
            item.description
        );
        for edit in &item.edits {
            println!("       {}", edit.to_string().dimmed());
        }
    }
}

fn print_check_report(report: &CheckReport) {
    for msg in &report.messages {
        println!("   {} {}", "warning:".yellow().bold(), msg);
    }

    match report.status {
        CheckStatus::Healthy => {
            println!("{} All share points match the manifest.", "OK".green().bold());
        }
        CheckStatus::Missing => {
            println!("{} Some share points are missing:", "MISSING".yellow().bold());
            print_items("-".yellow(), &report.missing);
            println!();
            println!("Run {} to repair.", "sharectl sync".cyan());
        }
        CheckStatus::Drifted => {
            println!("{} Share points have drifted:", "DRIFTED".red().bold());
            print_items("!".red(), &report.drifted);
            if !report.missing.is_empty() {
                println!();
                println!("{} Also missing:", "MISSING".yellow().bold());
                print_items("-".yellow(), &report.missing);
            }
            println!();
            println!("Run {} to repair.", "sharectl sync".cyan());
        }
        CheckStatus::Broken => {
            println!("{} Share points could not be checked:", "BROKEN".red().bold());
            print_items("!".red(), &report.drifted);
            print_items("-".yellow(), &report.missing);
            println!();
            println!("Manual intervention may be required.");
        }
    }
}

/// Run the sync command
///
/// Reconciles every declared share; fails if any share could not be
/// reconciled after attempting all of them.
pub fn run_sync(ctx: &Context, dry_run: bool, jobs: usize, json: bool) -> Result<()> {
    let manifest = ctx.load_manifest()?;
    let engine = SyncEngine::new(ctx.backend(&manifest.sharing)?);
    let options = SyncOptions {
        dry_run,
        jobs,
        lock_file: manifest.sharing.lock_file.clone(),
    };

    if !json {
        let verb = if dry_run { "Planning" } else { "Synchronizing" };
        println!("{} {} share points...", "=>".blue().bold(), verb);
    }
    let report = engine.sync(&manifest.shares, &options)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_sync_report(&report, dry_run);
    }

    if report.success {
        Ok(())
    } else {
        Err(CliError::user("Synchronization failed"))
    }
}

fn print_sync_report(report: &SyncReport, dry_run: bool) {
    for msg in &report.messages {
        println!("   {} {}", "warning:".yellow().bold(), msg);
    }

    if report.actions.is_empty() && report.success {
        println!("{} Already synchronized. No changes needed.", "OK".green().bold());
        return;
    }

    if !report.actions.is_empty() {
        let heading = if dry_run {
            "Would apply:"
        } else {
            "Synchronization complete:"
        };
        println!("{} {}", "OK".green().bold(), heading);
        for action in &report.actions {
            println!("   {} {}", "+".green(), action);
        }
    }

    if !report.success {
        println!("{} Some share points failed:", "ERROR".red().bold());
        for error in &report.errors {
            println!("   {} {}", "!".red(), error);
        }
    }
}
