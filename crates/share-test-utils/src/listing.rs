//! Listing text fixtures.
//!
//! [`render_listing`] produces text in the exact layout `sharing -l` prints,
//! so tests can go through the real parser.

use share_model::{Protocol, ShareRecord};

/// Output of `sharing -l` on a host with two share points
pub const SAMPLE_LISTING: &str = "List of Share Points
name:\t\tPublic
path:\t\t/Users/me/Public
\tafp:\t{
\t\tname:\tPublic
\t\tshared:\t1
\t\tguest access:\t1
\t\tinherit perms:\t0
\t}
\tftp:\t{
\t\tname:\tPublic
\t\tshared:\t0
\t\tguest access:\t0
\t}
\tsmb:\t{
\t\tname:\tPublic
\t\tshared:\t1
\t\tguest access:\t0
\t}

name:\t\tProjects
path:\t\t/Shares/Projects
\tafp:\t{
\t\tname:\tProjects
\t\tshared:\t1
\t\tguest access:\t0
\t\tinherit perms:\t1
\t}
\tftp:\t{
\t\tname:\tProjects
\t\tshared:\t0
\t\tguest access:\t0
\t}
\tsmb:\t{
\t\tname:\tProjectsWin
\t\tshared:\t1
\t\tguest access:\t0
\t}
";

/// Build a present record with the given name and enabled protocols
pub fn share(path: &str, share_name: &str, protocols: &[Protocol]) -> ShareRecord {
    let mut record = ShareRecord::unconfigured(path).expect("fixture path must have a name");
    record.share_name = share_name.to_string();
    record.enabled_protocols = protocols.iter().copied().collect();
    record
}

fn flag(value: bool) -> &'static str {
    if value { "1" } else { "0" }
}

/// Render one share block
pub fn render_block(record: &ShareRecord) -> String {
    let mut out = format!(
        "name:\t\t{}\npath:\t\t{}\n",
        record.share_name, record.path
    );
    for protocol in [Protocol::Afp, Protocol::Ftp, Protocol::Smb] {
        out.push_str(&format!("\t{}:\t{{\n", protocol.key()));
        out.push_str(&format!("\t\tname:\t{}\n", record.protocol_name(protocol)));
        out.push_str(&format!(
            "\t\tshared:\t{}\n",
            flag(record.enabled_protocols.contains(&protocol))
        ));
        out.push_str(&format!(
            "\t\tguest access:\t{}\n",
            flag(record.guest_protocols.contains(&protocol))
        ));
        if protocol == Protocol::Afp {
            out.push_str(&format!(
                "\t\tinherit perms:\t{}\n",
                flag(record.afp_inherit_perms)
            ));
        }
        out.push_str("\t}\n");
    }
    out
}

/// Render a full listing, header included
pub fn render_listing<'a>(records: impl IntoIterator<Item = &'a ShareRecord>) -> String {
    let blocks: Vec<String> = records.into_iter().map(render_block).collect();
    format!("List of Share Points\n{}", blocks.join("\n"))
}
