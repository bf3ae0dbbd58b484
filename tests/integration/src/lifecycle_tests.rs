//! Share point lifecycle tests
//!
//! Each scenario loads a manifest from disk, runs the engine against the
//! in-memory sharing tool and checks both the commands sent and the state
//! the tool ends up in.

use pretty_assertions::assert_eq;
use share_core::{CheckStatus, Manifest, SyncEngine, SyncOptions};
use share_exec::SharingCommand;
use share_model::{EditFlag, PendingEdit, Protocol};
use share_test_utils::{FakeSharing, TestManifest, share};

// =============================================================================
// Test Infrastructure
// =============================================================================

fn load(content: &str) -> Manifest {
    let file = TestManifest::new(content);
    let manifest = Manifest::load(file.path()).unwrap();
    manifest.validate().unwrap();
    manifest
}

fn sync(engine: &SyncEngine<FakeSharing>, manifest: &Manifest) -> share_core::SyncReport {
    engine.sync(&manifest.shares, &SyncOptions::default()).unwrap()
}

fn edit(name: &str, edits: &[(EditFlag, &str)]) -> SharingCommand {
    SharingCommand::Edit {
        share_name: name.to_string(),
        edits: edits
            .iter()
            .map(|(flag, value)| PendingEdit::new(*flag, *value))
            .collect(),
    }
}

// =============================================================================
// Scenarios
// =============================================================================

#[test]
fn create_share_from_manifest() {
    let manifest = load(
        r#"
[[share]]
path = "/Shares/Media"
protocols = ["smb"]
guest_protocols = ["smb"]
"#,
    );
    let engine = SyncEngine::new(FakeSharing::new());

    let report = sync(&engine, &manifest);

    assert!(report.success);
    assert_eq!(
        engine.backend().mutations(),
        vec![
            SharingCommand::Add {
                path: "/Shares/Media".to_string()
            },
            edit("Media", &[(EditFlag::Shared, "001"), (EditFlag::GuestAccess, "001")]),
        ]
    );
    assert!(engine.check(&manifest.shares).unwrap().is_healthy());
}

#[test]
fn rename_then_edit_uses_live_name() {
    let fake = FakeSharing::new().with_share(share("/Shares/Media", "Media", &[Protocol::Afp]));
    let engine = SyncEngine::new(fake);
    let manifest = load(
        r#"
[[share]]
path = "/Shares/Media"
share_name = "Family Media"
protocols = ["afp", "smb"]
smb_name = "MEDIA"
"#,
    );

    let report = sync(&engine, &manifest);
    assert!(report.success, "errors: {:?}", report.errors);
    assert_eq!(
        engine.backend().mutations(),
        vec![edit(
            "Media",
            &[
                (EditFlag::ShareName, "Family Media"),
                (EditFlag::Shared, "101"),
                (EditFlag::SmbName, "MEDIA"),
            ]
        )]
    );

    // A later change targets the name the share now has
    engine.backend().clear_invocations();
    let manifest = load(
        r#"
[[share]]
path = "/Shares/Media"
share_name = "Family Media"
protocols = ["smb"]
smb_name = "MEDIA"
"#,
    );
    sync(&engine, &manifest);
    assert_eq!(
        engine.backend().mutations(),
        vec![edit("Family Media", &[(EditFlag::Shared, "001")])]
    );
}

#[test]
fn destroy_share_marked_absent() {
    let fake = FakeSharing::new()
        .with_share(share("/Shares/Old", "Archive", &[Protocol::Smb]))
        .with_share(share("/Shares/Keep", "Keep", &[Protocol::Smb]));
    let engine = SyncEngine::new(fake);
    let manifest = load(
        r#"
[[share]]
path = "/Shares/Old"
ensure = "absent"
"#,
    );

    let report = sync(&engine, &manifest);

    assert!(report.success);
    assert_eq!(
        engine.backend().mutations(),
        vec![SharingCommand::Remove {
            share_name: "Archive".to_string()
        }]
    );
    assert!(engine.backend().share("/Shares/Old").is_none());
    assert!(engine.backend().share("/Shares/Keep").is_some());
}

#[test]
fn second_sync_changes_nothing() {
    let engine = SyncEngine::new(FakeSharing::new());
    let manifest = load(
        r#"
[[share]]
path = "/Shares/A"
protocols = ["afp", "smb", "ftp"]
afp_inherit_perms = true

[[share]]
path = "/Shares/B"
share_name = "Bravo"
protocols = ["ftp"]
guest_protocols = ["ftp"]
"#,
    );

    assert_eq!(sync(&engine, &manifest).changed(), 2);
    engine.backend().clear_invocations();

    let report = sync(&engine, &manifest);
    assert!(report.success);
    assert_eq!(report.changed(), 0);
    assert!(report.actions.is_empty());
    assert!(engine.backend().mutations().is_empty());
}

#[test]
fn one_failing_share_does_not_stop_the_rest() {
    let fake = FakeSharing::new();
    fake.fail_next("add");
    let engine = SyncEngine::new(fake);
    let manifest = load(
        r#"
[[share]]
path = "/Shares/First"
protocols = ["smb"]

[[share]]
path = "/Shares/Second"
protocols = ["smb"]
"#,
    );

    let report = sync(&engine, &manifest);

    assert!(!report.success);
    assert_eq!(report.errors.len(), 1);
    assert!(report.errors[0].starts_with("/Shares/First"));
    assert!(engine.backend().share("/Shares/First").is_none());
    assert!(engine.backend().share("/Shares/Second").is_some());

    let check = engine.check(&manifest.shares).unwrap();
    assert_eq!(check.status, CheckStatus::Missing);
}

#[test]
fn parallel_sync_matches_sequential() {
    let content: String = (0..8)
        .map(|i| format!("[[share]]\npath = \"/Shares/S{i}\"\nprotocols = [\"afp\"]\n\n"))
        .collect();
    let manifest = load(&content);
    let engine = SyncEngine::new(FakeSharing::new());

    let options = SyncOptions {
        jobs: 4,
        ..SyncOptions::default()
    };
    let report = engine.sync(&manifest.shares, &options).unwrap();

    assert!(report.success, "errors: {:?}", report.errors);
    let paths: Vec<&str> = report.outcomes.iter().map(|o| o.path.as_str()).collect();
    let expected: Vec<String> = (0..8).map(|i| format!("/Shares/S{i}")).collect();
    assert_eq!(paths, expected.iter().map(String::as_str).collect::<Vec<_>>());
    assert_eq!(engine.backend().shares().len(), 8);
    assert!(engine.check(&manifest.shares).unwrap().is_healthy());
}

#[test]
fn layered_manifests_override_by_path() {
    let base = TestManifest::new(
        r#"
[[share]]
path = "/Shares/A"
protocols = ["afp"]

[[share]]
path = "/Shares/B"
protocols = ["afp"]
"#,
    );
    let host = base.write_sibling(
        "host.toml",
        "[[share]]\npath = \"/Shares/B\"\nprotocols = [\"smb\"]\n",
    );
    let manifest = Manifest::load_all(&[base.path().to_path_buf(), host]).unwrap();
    let engine = SyncEngine::new(FakeSharing::new());

    sync(&engine, &manifest);

    assert_eq!(
        engine.backend().share("/Shares/B").unwrap().enabled_protocols,
        [Protocol::Smb].into_iter().collect()
    );
}

#[test]
fn rename_keeping_old_name_for_one_protocol_converges() {
    let fake = FakeSharing::new().with_share(share("/Shares/A", "A", &[Protocol::Afp]));
    let engine = SyncEngine::new(fake);
    let manifest = load(
        r#"
[[share]]
path = "/Shares/A"
share_name = "B"
protocols = ["afp"]
afp_name = "A"
"#,
    );

    let report = sync(&engine, &manifest);
    assert!(report.success, "errors: {:?}", report.errors);
    assert_eq!(
        engine.backend().mutations(),
        vec![edit("A", &[(EditFlag::ShareName, "B"), (EditFlag::AfpName, "A")])]
    );

    engine.backend().clear_invocations();
    let second = sync(&engine, &manifest);
    assert!(second.actions.is_empty(), "actions: {:?}", second.actions);
    assert!(engine.backend().mutations().is_empty());
}

#[test]
fn root_path_is_rejected_before_anything_runs() {
    let file = TestManifest::new("[[share]]\npath = \"/\"\nshare_name = \"Root\"\nprotocols = [\"smb\"]\n");
    let manifest = Manifest::load(file.path()).unwrap();
    assert!(manifest.validate().is_err());

    let engine = SyncEngine::new(FakeSharing::new());
    let report = sync(&engine, &manifest);
    assert!(!report.success);
    assert!(engine.backend().mutations().is_empty());
}
