//! Named repository working directories

use git2::{ErrorCode, Repository};
use serde::{Deserialize, Serialize};

use gc_fs::NormalizedPath;

use crate::commits::{self, CommitInfo};
use crate::{Error, Result};

/// A configured backup or intended repository.
///
/// Repositories are compared by their normalized root path when the
/// resolver matches a rendered template against them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RepositoryRef {
    pub name: String,
    #[serde(alias = "path")]
    pub root_path: NormalizedPath,
}

impl RepositoryRef {
    pub fn new(name: impl Into<String>, root_path: impl Into<NormalizedPath>) -> Self {
        Self {
            name: name.into(),
            root_path: root_path.into(),
        }
    }

    /// Fail unless the root path is an existing directory.
    pub fn ensure_root(&self) -> Result<()> {
        if self.root_path.is_dir() {
            Ok(())
        } else {
            Err(Error::MissingRoot {
                name: self.name.clone(),
                path: self.root_path.to_native(),
            })
        }
    }

    /// HEAD commit of the working directory.
    ///
    /// `None` when the root is not a git work tree or has no commits yet.
    pub fn head_commit(&self) -> Result<Option<CommitInfo>> {
        let repo = match Repository::open(self.root_path.to_native()) {
            Ok(repo) => repo,
            Err(e) if e.code() == ErrorCode::NotFound => {
                tracing::debug!(repository = %self.name, "Not a git work tree");
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };
        commits::head_commit(&repo)
    }
}

impl std::fmt::Display for RepositoryRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.root_path)
    }
}
