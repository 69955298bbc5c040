//! [`TestWorkspace`] builder for compliance scenarios.

use std::fs;
use std::path::{Path, PathBuf};

use git2::Oid;
use tempfile::TempDir;

use crate::git::{commit_all, real_git_repo};

/// A temporary directory holding repository roots under `git/<name>`.
///
/// # Example
///
/// ```rust,no_run
/// use gc_test_utils::TestWorkspace;
///
/// let ws = TestWorkspace::new();
/// ws.write("backups", "ams01/rtr-01.cfg", "hostname rtr-01\n");
/// ws.write("intended", "ams01/rtr-01.cfg", "hostname rtr-01\n");
/// ws.init_git("backups");
/// ```
pub struct TestWorkspace {
    temp_dir: TempDir,
}

impl Default for TestWorkspace {
    fn default() -> Self {
        Self::new()
    }
}

impl TestWorkspace {
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().unwrap(),
        }
    }

    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// The prefix repository matching templates are joined onto.
    pub fn repository_root(&self) -> PathBuf {
        self.root().join("git")
    }

    /// Root of the named repository. Not created.
    pub fn repo_path(&self, repo: &str) -> PathBuf {
        self.repository_root().join(repo)
    }

    /// Create an empty repository directory.
    pub fn add_repository(&self, repo: &str) -> PathBuf {
        let path = self.repo_path(repo);
        fs::create_dir_all(&path).unwrap();
        path
    }

    /// Write `content` to `relative` inside the named repository, creating
    /// directories as needed.
    pub fn write(&self, repo: &str, relative: &str, content: &str) -> PathBuf {
        let path = self.repo_path(repo).join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
        path
    }

    /// Write a file relative to the workspace root (settings, rules, ...).
    pub fn write_root_file(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.root().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
        path
    }

    /// Turn the named repository into a git work tree with one commit of
    /// everything written so far.
    pub fn init_git(&self, repo: &str) -> Oid {
        let path = self.add_repository(repo);
        let git = real_git_repo(&path);
        commit_all(&git, "Initial configurations")
    }

    pub fn read(&self, relative: &str) -> String {
        let path = self.root().join(relative);
        fs::read_to_string(&path)
            .unwrap_or_else(|_| panic!("Could not read file: {}", path.display()))
    }

    /// Assert that `relative` (to the workspace root) exists.
    ///
    /// # Panics
    /// Panics with a descriptive message if the path does not exist.
    pub fn assert_file_exists(&self, relative: &str) {
        let full_path = self.root().join(relative);
        assert!(
            full_path.exists(),
            "Expected file to exist: {}",
            full_path.display()
        );
    }
}
