//! Configuration content handling for golden-config
//!
//! Everything that looks inside configuration text lives here:
//!
//! - [`template`]: strict-undefined Jinja rendering of path and matching templates
//! - [`dialect`] / [`parser`]: the per-platform parser map and the
//!   hierarchical parsers behind it
//! - [`section`]: carving a rule's section out of a parsed configuration
//! - [`compliance`]: comparing actual and intended sections
//! - [`diff`]: unified diffs of whole backup/intended files

pub mod compliance;
pub mod dialect;
pub mod diff;
pub mod error;
pub mod parser;
pub mod section;
pub mod template;

pub use compliance::{
    ComplianceResult, MatchOutcome, OrderedMatch, RuleSpec, UnorderedMatch, evaluate,
    evaluate_parsed,
};
pub use dialect::{Dialect, Structure};
pub use diff::{UnifiedDiff, unified_diff};
pub use error::{Error, Result};
pub use parser::{ConfigLine, ParsedConfig};
pub use section::SectionMarkers;
pub use template::{JinjaTemplateEngine, TemplateErrorKind, TemplateEvaluator, UndefinedBehavior};
