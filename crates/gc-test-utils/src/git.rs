//! Git repository fixtures.

use std::path::Path;

use git2::{IndexAddOption, Oid, Repository, Signature};

/// Initialise a real git repository with empty history.
///
/// # Panics
/// Panics if `git2::Repository::init` fails.
pub fn real_git_repo(path: &Path) -> Repository {
    Repository::init(path).unwrap_or_else(|e| {
        panic!(
            "real_git_repo: failed to init repository at {}: {e}",
            path.display()
        )
    })
}

/// Stage every file in the work tree and commit it on top of HEAD.
///
/// # Panics
/// Panics if any git operation fails.
pub fn commit_all(repo: &Repository, message: &str) -> Oid {
    let mut index = repo.index().expect("commit_all: index");
    index
        .add_all(["*"], IndexAddOption::DEFAULT, None)
        .expect("commit_all: add_all");
    index.write().expect("commit_all: write index");
    let tree_id = index.write_tree().expect("commit_all: write tree");
    let tree = repo.find_tree(tree_id).expect("commit_all: find tree");

    let signature = Signature::now("Golden Config", "golden-config@example.com")
        .expect("commit_all: signature");
    let parent = repo.head().ok().and_then(|head| head.peel_to_commit().ok());
    let parents: Vec<_> = parent.iter().collect();

    repo.commit(Some("HEAD"), &signature, &signature, message, &tree, &parents)
        .expect("commit_all: commit")
}
