//! The operations sharectl issues to `sharing`

use std::fmt;

use share_model::PendingEdit;

/// One invocation of the `sharing` tool
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SharingCommand {
    /// `sharing -l`: list every share point
    List,
    /// `sharing -a <path>`: create a share point for `path`
    Add { path: String },
    /// `sharing -r <name>`: remove a share point by its registered name
    Remove { share_name: String },
    /// `sharing -e <name> <flag> <value>...`: apply a batch of edits
    Edit {
        share_name: String,
        edits: Vec<PendingEdit>,
    },
}

impl SharingCommand {
    /// Arguments passed to the tool, program name excluded
    pub fn args(&self) -> Vec<String> {
        match self {
            SharingCommand::List => vec!["-l".to_string()],
            SharingCommand::Add { path } => vec!["-a".to_string(), path.clone()],
            SharingCommand::Remove { share_name } => vec!["-r".to_string(), share_name.clone()],
            SharingCommand::Edit { share_name, edits } => {
                let mut args = Vec::with_capacity(2 + edits.len() * 2);
                args.push("-e".to_string());
                args.push(share_name.clone());
                for edit in edits {
                    args.push(edit.flag.as_arg().to_string());
                    args.push(edit.value.clone());
                }
                args
            }
        }
    }

    /// Short operation name used in logs and reports
    pub fn kind(&self) -> &'static str {
        match self {
            SharingCommand::List => "list",
            SharingCommand::Add { .. } => "add",
            SharingCommand::Remove { .. } => "remove",
            SharingCommand::Edit { .. } => "edit",
        }
    }

    /// Whether the command changes system state
    pub fn is_mutation(&self) -> bool {
        !matches!(self, SharingCommand::List)
    }
}

impl fmt::Display for SharingCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("sharing")?;
        for arg in self.args() {
            if arg.is_empty() || arg.contains(char::is_whitespace) {
                write!(f, " {:?}", arg)?;
            } else {
                write!(f, " {}", arg)?;
            }
        }
        Ok(())
    }
}
