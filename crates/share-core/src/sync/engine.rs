//! SyncEngine implementation
//!
//! The SyncEngine coordinates declared shares (the manifest) with the
//! shares the `sharing` tool reports.

use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};
use std::thread;

use serde::Serialize;
use share_exec::SharingBackend;
use share_listing::{Listing, parse_listing};
use share_model::ShareDeclaration;
use tracing::{debug, info, warn};

use crate::Result;
use crate::locks::{PathLocks, RunLock};
use crate::reconcile::{Reconciler, ShareOutcome, Transition};

use super::check::{CheckReport, DriftItem};

/// Report from a sync operation
#[derive(Debug, Clone, Serialize)]
pub struct SyncReport {
    /// Whether every declared share was reconciled
    pub success: bool,
    /// Actions taken during the operation
    pub actions: Vec<String>,
    /// Errors encountered, one per failed share
    pub errors: Vec<String>,
    /// Warnings that did not stop the run
    pub messages: Vec<String>,
    /// Per-share results, in declaration order
    pub outcomes: Vec<ShareOutcome>,
}

impl SyncReport {
    /// Create a successful sync report
    pub fn success() -> Self {
        Self {
            success: true,
            actions: Vec::new(),
            errors: Vec::new(),
            messages: Vec::new(),
            outcomes: Vec::new(),
        }
    }

    /// Number of shares that needed at least one command
    pub fn changed(&self) -> usize {
        self.outcomes.iter().filter(|o| !o.is_noop()).count()
    }
}

/// Options for sync operations
#[derive(Debug, Clone, Default)]
pub struct SyncOptions {
    /// If true, compute the commands without running them.
    /// Actions will be prefixed with "[dry-run] Would ..."
    pub dry_run: bool,
    /// Shares reconciled concurrently; 0 and 1 both mean sequential
    pub jobs: usize,
    /// File to lock for the duration of the run
    pub lock_file: Option<PathBuf>,
}

/// Compare declarations against a listing snapshot without running anything
pub fn check_listing(declarations: &[ShareDeclaration], listing: &Listing) -> CheckReport {
    let mut report = CheckReport::healthy();
    for failure in listing.failures() {
        report = report.with_message(format!("Skipped listing block: {}", failure));
    }
    for declaration in declarations {
        report = report.merge(check_share(declaration, listing));
    }
    report
}

fn check_share(declaration: &ShareDeclaration, listing: &Listing) -> CheckReport {
    let desired = match declaration.resolve() {
        Ok(desired) => desired,
        Err(e) => return CheckReport::broken(format!("{}: {}", declaration.path, e)),
    };
    let orphans = desired.orphan_guest_protocols();
    let current = listing.get(&desired.path).cloned();
    let share_name = current.as_ref().map(|c| c.share_name.clone());
    let mut reconciler = Reconciler::new(desired, current);

    let report = match reconciler.transition() {
        Transition::Create => CheckReport::with_missing(vec![DriftItem {
            path: declaration.path.clone(),
            share_name,
            description: "Share point does not exist".to_string(),
            edits: Vec::new(),
        }]),
        Transition::Destroy => CheckReport::with_drifted(vec![DriftItem {
            path: declaration.path.clone(),
            share_name,
            description: "Share point should be absent".to_string(),
            edits: Vec::new(),
        }]),
        Transition::Noop => {
            reconciler.queue_changes();
            if reconciler.pending().is_empty() {
                CheckReport::healthy()
            } else {
                CheckReport::with_drifted(vec![DriftItem {
                    path: declaration.path.clone(),
                    share_name,
                    description: format!("{} attribute(s) differ", reconciler.pending().len()),
                    edits: reconciler.pending().to_vec(),
                }])
            }
        }
    };

    if orphans.is_empty() {
        return report;
    }
    let orphans: Vec<String> = orphans.iter().map(ToString::to_string).collect();
    report.with_message(format!(
        "{}: guest access declared for protocols that are not enabled: {}",
        declaration.path,
        orphans.join(",")
    ))
}

/// Engine for synchronizing declared shares
///
/// The SyncEngine provides three main operations:
/// - **discover**: Snapshot the shares the tool reports
/// - **check**: Report drift between declarations and the snapshot
/// - **sync**: Reconcile every declared share
pub struct SyncEngine<B> {
    backend: B,
    locks: PathLocks,
}

impl<B: SharingBackend> SyncEngine<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            locks: PathLocks::new(),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Run `sharing -l` and parse its output
    ///
    /// # Errors
    ///
    /// Fails when the tool fails or the listing has no header. Individual
    /// unparseable blocks are reported through [`Listing::failures`].
    pub fn discover(&self) -> Result<Listing> {
        let raw = self.backend.list()?;
        let listing = parse_listing(&raw)?;
        debug!(shares = listing.len(), "Discovered share points");
        Ok(listing)
    }

    /// Check the declarations against a fresh snapshot
    pub fn check(&self, declarations: &[ShareDeclaration]) -> Result<CheckReport> {
        let listing = match self.discover() {
            Ok(listing) => listing,
            Err(crate::Error::Parse(e)) => {
                return Ok(CheckReport::broken(format!(
                    "Failed to parse share listing: {}",
                    e
                )));
            }
            Err(e) => return Err(e),
        };
        Ok(check_listing(declarations, &listing))
    }

    /// Reconcile one declared share against the snapshot.
    ///
    /// Holds the share's path lock from the transition through the flush.
    pub fn reconcile(
        &self,
        declaration: &ShareDeclaration,
        listing: &Listing,
        dry_run: bool,
    ) -> Result<ShareOutcome> {
        let _guard = self.locks.lock(&declaration.path);

        let desired = declaration.resolve()?;
        let current = listing.get(&desired.path).cloned();
        let mut reconciler = Reconciler::new(desired, current);
        if dry_run {
            reconciler.plan()
        } else {
            reconciler.apply(&self.backend)
        }
    }

    /// Reconcile every declaration against one discovery snapshot.
    ///
    /// A failing share is recorded in the report and does not stop the
    /// others. Only a failed discovery aborts the run.
    pub fn sync(&self, declarations: &[ShareDeclaration], options: &SyncOptions) -> Result<SyncReport> {
        let _run_lock = match &options.lock_file {
            Some(path) => Some(RunLock::acquire(path)?),
            None => None,
        };

        let listing = self.discover()?;
        let mut report = SyncReport::success();
        for failure in listing.failures() {
            report.messages.push(format!("Skipped listing block: {}", failure));
        }

        let results = self.reconcile_all(declarations, &listing, options);
        for (declaration, result) in declarations.iter().zip(results) {
            match result {
                Ok(outcome) => {
                    for command in &outcome.commands {
                        let action = if options.dry_run {
                            format!("[dry-run] Would run {}", command)
                        } else {
                            format!("Ran {}", command)
                        };
                        report.actions.push(action);
                    }
                    report.outcomes.push(outcome);
                }
                Err(e) => {
                    warn!(path = %declaration.path, error = %e, "Failed to reconcile share");
                    report.errors.push(format!("{}: {}", declaration.path, e));
                    report.success = false;
                }
            }
        }

        info!(
            shares = declarations.len(),
            changed = report.changed(),
            failed = report.errors.len(),
            dry_run = options.dry_run,
            "Sync finished"
        );
        Ok(report)
    }

    fn reconcile_all(
        &self,
        declarations: &[ShareDeclaration],
        listing: &Listing,
        options: &SyncOptions,
    ) -> Vec<Result<ShareOutcome>> {
        let jobs = options.jobs.clamp(1, declarations.len().max(1));
        if jobs == 1 {
            return declarations
                .iter()
                .map(|d| self.reconcile(d, listing, options.dry_run))
                .collect();
        }

        let next = AtomicUsize::new(0);
        let finished = Mutex::new(Vec::with_capacity(declarations.len()));
        thread::scope(|scope| {
            for _ in 0..jobs {
                scope.spawn(|| {
                    loop {
                        let index = next.fetch_add(1, Ordering::SeqCst);
                        let Some(declaration) = declarations.get(index) else {
                            break;
                        };
                        let result = self.reconcile(declaration, listing, options.dry_run);
                        finished
                            .lock()
                            .unwrap_or_else(PoisonError::into_inner)
                            .push((index, result));
                    }
                });
            }
        });

        let mut finished = finished
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner);
        finished.sort_by_key(|(index, _)| *index);
        finished.into_iter().map(|(_, result)| result).collect()
    }
}
