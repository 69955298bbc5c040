//! Shared test fixtures for the golden-config workspace.
//!
//! Dev-dependency only, never published.
//!
//! - [`git`]: real git repositories with history
//! - [`workspace`]: [`TestWorkspace`], a temporary tree of backup and
//!   intended repositories

pub mod git;
pub mod workspace;

pub use workspace::TestWorkspace;
