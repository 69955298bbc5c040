//! Repository handling for golden-config
//!
//! Backup and intended configurations live in version-controlled working
//! directories. A [`RepositoryRef`] names one of them; the resolver in
//! gc-core picks among several per device.

pub mod commits;
pub mod error;
pub mod repository;

pub use commits::CommitInfo;
pub use error::{Error, Result};
pub use repository::RepositoryRef;
