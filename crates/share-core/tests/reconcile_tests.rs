//! Reconciliation scenarios against the in-memory sharing tool

use pretty_assertions::assert_eq;
use share_core::{Error, Reconciler, Transition};
use share_exec::SharingCommand;
use share_model::{EditFlag, PendingEdit, Protocol, ShareDeclaration};
use share_test_utils::{FakeSharing, share};

fn add(path: &str) -> SharingCommand {
    SharingCommand::Add {
        path: path.to_string(),
    }
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

#[test]
fn new_share_is_added_then_edited_once() {
    let fake = FakeSharing::new();
    let mut declaration = ShareDeclaration::new("/Shares/A");
    declaration.protocols = [Protocol::Afp, Protocol::Smb].into_iter().collect();

    let outcome = Reconciler::new(declaration.resolve().unwrap(), None)
        .apply(&fake)
        .unwrap();

    assert_eq!(outcome.transition, Transition::Create);
    assert_eq!(
        fake.mutations(),
        vec![add("/Shares/A"), edit("A", &[(EditFlag::Shared, "101")])]
    );
}

#[test]
fn new_share_with_every_attribute() {
    let fake = FakeSharing::new();
    let declaration: ShareDeclaration = toml::from_str(
        r#"
path = "/Shares/Team"
share_name = "Team Files"
protocols = ["afp", "smb", "ftp"]
guest_protocols = ["ftp"]
afp_name = "Team Files"
smb_name = "TEAM"
afp_inherit_perms = true
"#,
    )
    .unwrap();

    Reconciler::new(declaration.resolve().unwrap(), None)
        .apply(&fake)
        .unwrap();

    // The edit targets the name `sharing -a` registered, before the rename
    assert_eq!(
        fake.mutations(),
        vec![
            add("/Shares/Team"),
            edit(
                "Team",
                &[
                    (EditFlag::ShareName, "Team Files"),
                    (EditFlag::Shared, "111"),
                    (EditFlag::GuestAccess, "010"),
                    (EditFlag::SmbName, "TEAM"),
                    (EditFlag::InheritPerms, "10"),
                ]
            ),
        ]
    );

    let record = fake.share("/Shares/Team").unwrap();
    assert_eq!(record, declaration.resolve().unwrap());
}

#[test]
fn explicit_afp_name_equal_to_share_name_is_not_sent() {
    let current = share("/Shares/A", "A", &[Protocol::Afp]);
    let fake = FakeSharing::new().with_share(current.clone());
    let mut declaration = ShareDeclaration::new("/Shares/A");
    declaration.protocols = [Protocol::Afp].into_iter().collect();
    declaration.afp_name = Some("A".to_string());

    let outcome = Reconciler::new(declaration.resolve().unwrap(), Some(current))
        .apply(&fake)
        .unwrap();

    assert!(outcome.is_noop());
    assert!(fake.invocations().is_empty());
}

#[test]
fn matching_share_needs_no_invocation() {
    let mut current = share("/Shares/A", "Alpha", &[Protocol::Smb, Protocol::Ftp]);
    current.guest_protocols.insert(Protocol::Smb);
    current.set_name_override(Protocol::Smb, "AlphaWin");
    let fake = FakeSharing::new().with_share(current.clone());

    let mut reconciler = Reconciler::new(current.clone(), Some(current));
    reconciler.queue_changes();
    assert!(reconciler.pending().is_empty());

    assert_eq!(reconciler.flush(&fake).unwrap(), None);
    assert!(fake.invocations().is_empty());
}

#[test]
fn rename_is_resolved_against_live_name() {
    let current = share("/Shares/A", "A", &[Protocol::Afp]);
    let fake = FakeSharing::new().with_share(current.clone());
    let mut declaration = ShareDeclaration::new("/Shares/A");
    declaration.share_name = Some("Renamed".to_string());
    declaration.protocols = [Protocol::Afp].into_iter().collect();

    Reconciler::new(declaration.resolve().unwrap(), Some(current))
        .apply(&fake)
        .unwrap();

    assert_eq!(
        fake.mutations(),
        vec![edit("A", &[(EditFlag::ShareName, "Renamed")])]
    );
    assert_eq!(fake.share("/Shares/A").unwrap().share_name, "Renamed");
}

#[test]
fn destroy_then_nothing_else() {
    let current = share("/Shares/A", "Registered", &[Protocol::Afp]);
    let fake = FakeSharing::new().with_share(current.clone());
    let mut declaration = ShareDeclaration::new("/Shares/A");
    declaration.ensure = share_model::Existence::Absent;

    let outcome = Reconciler::new(declaration.resolve().unwrap(), Some(current))
        .apply(&fake)
        .unwrap();

    assert_eq!(outcome.transition, Transition::Destroy);
    assert_eq!(
        fake.mutations(),
        vec![SharingCommand::Remove {
            share_name: "Registered".to_string()
        }]
    );
}

#[test]
fn failed_add_is_not_retried() {
    let fake = FakeSharing::new();
    fake.fail_next("add");

    let err = Reconciler::new(share("/Shares/A", "A", &[Protocol::Smb]), None)
        .apply(&fake)
        .unwrap_err();

    assert!(matches!(err, Error::Exec(_)));
    assert_eq!(fake.invocations(), vec![add("/Shares/A")]);
}
