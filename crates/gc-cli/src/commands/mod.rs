//! Command implementations

mod compliance;
mod diff;
mod validate;

pub use compliance::{ComplianceOptions, run_compliance};
pub use diff::run_diff;
pub use validate::run_validate;
