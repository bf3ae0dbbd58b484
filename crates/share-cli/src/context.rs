//! Manifest and backend resolution shared by every command

use std::path::{Path, PathBuf};

use share_core::{DEFAULT_CONFIG_PATH, Error as CoreError, Manifest, SharingSection};
use share_exec::{Error as ExecError, SystemSharing};
use tracing::debug;

use crate::cli::Cli;
use crate::error::Result;

/// Where to find manifests and the sharing tool
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Context {
    configs: Vec<PathBuf>,
    sharing_bin: Option<PathBuf>,
}

impl Context {
    pub fn new(configs: Vec<PathBuf>, sharing_bin: Option<PathBuf>) -> Self {
        Self {
            configs,
            sharing_bin,
        }
    }

    pub fn from_cli(cli: &Cli) -> Self {
        Self::new(cli.configs.clone(), cli.sharing_bin.clone())
    }

    /// Manifests to load, in precedence order
    pub fn config_paths(&self) -> Vec<PathBuf> {
        if self.configs.is_empty() {
            vec![PathBuf::from(DEFAULT_CONFIG_PATH)]
        } else {
            self.configs.clone()
        }
    }

    /// Load, merge and validate the manifests
    pub fn load_manifest(&self) -> Result<Manifest> {
        let paths = self.config_paths();
        let manifest = Manifest::load_all(paths.as_slice())?;
        manifest.validate()?;
        debug!(manifests = paths.len(), shares = manifest.shares.len(), "Loaded configuration");
        Ok(manifest)
    }

    /// Like [`load_manifest`](Self::load_manifest), but a missing default
    /// manifest yields an empty one. Explicitly named manifests must exist.
    pub fn optional_manifest(&self) -> Result<Manifest> {
        match self.load_manifest() {
            Err(crate::error::CliError::Core(CoreError::ConfigNotFound { .. }))
                if self.configs.is_empty() =>
            {
                Ok(Manifest::default())
            }
            other => other,
        }
    }

    /// The sharing tool to run.
    ///
    /// `--sharing-bin` takes precedence over `[sharing] command` and is used
    /// on any platform; otherwise the tool is only available on macOS.
    pub fn backend(&self, sharing: &SharingSection) -> Result<SystemSharing> {
        match &self.sharing_bin {
            Some(program) => explicit_backend(program),
            None => Ok(SystemSharing::detect(sharing.command.as_deref())?),
        }
    }
}

fn explicit_backend(program: &Path) -> Result<SystemSharing> {
    if !program.is_file() {
        return Err(ExecError::ToolNotFound {
            path: program.to_path_buf(),
        }
        .into());
    }
    Ok(SystemSharing::new(program))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CliError;
    use share_test_utils::TestManifest;
    use tempfile::TempDir;

    #[test]
    fn default_config_path_when_none_given() {
        let ctx = Context::default();
        assert_eq!(ctx.config_paths(), vec![PathBuf::from(DEFAULT_CONFIG_PATH)]);
    }

    #[test]
    fn later_manifest_wins() {
        let base = TestManifest::new("[[share]]\npath = \"/Shares/A\"\nprotocols = [\"afp\"]\n");
        let host = base.write_sibling(
            "host.toml",
            "[[share]]\npath = \"/Shares/A\"\nprotocols = [\"smb\"]\n",
        );

        let ctx = Context::new(vec![base.path().to_path_buf(), host], None);
        let manifest = ctx.load_manifest().unwrap();
        assert_eq!(manifest.shares.len(), 1);
        assert!(manifest.shares[0].protocols.contains(&share_model::Protocol::Smb));
    }

    #[test]
    fn explicit_missing_manifest_is_an_error() {
        let dir = TempDir::new().unwrap();
        let ctx = Context::new(vec![dir.path().join("missing.toml")], None);
        assert!(matches!(
            ctx.optional_manifest(),
            Err(CliError::Core(CoreError::ConfigNotFound { .. }))
        ));
    }

    #[test]
    fn invalid_manifest_fails_validation() {
        let manifest = TestManifest::new("[[share]]\npath = \"/\"\n");
        let ctx = Context::new(vec![manifest.path().to_path_buf()], None);
        assert!(ctx.load_manifest().is_err());
    }

    #[test]
    fn missing_sharing_bin_is_reported() {
        let dir = TempDir::new().unwrap();
        let ctx = Context::new(Vec::new(), Some(dir.path().join("sharing")));
        assert!(matches!(
            ctx.backend(&SharingSection::default()),
            Err(CliError::Exec(ExecError::ToolNotFound { .. }))
        ));
    }

    #[test]
    fn explicit_sharing_bin_skips_platform_check() {
        let manifest = TestManifest::new("");
        let ctx = Context::new(Vec::new(), Some(manifest.path().to_path_buf()));
        let backend = ctx.backend(&SharingSection::default()).unwrap();
        assert_eq!(backend.program(), manifest.path());
    }
}
