//! Filesystem boundary for golden-config
//!
//! Loads raw configuration text from resolved paths, reads and writes
//! structured input/output documents, and normalizes paths so that
//! repository roots compare equal regardless of separators.

pub mod config;
pub mod error;
pub mod io;
pub mod path;

pub use config::ConfigStore;
pub use error::{Error, Result};
pub use io::load_config;
pub use path::NormalizedPath;
