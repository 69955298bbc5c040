//! Compliance evaluation of one rule against one device
//!
//! The actual section is carved from the backup configuration, the intended
//! section from the intended configuration, and the two are compared either
//! positionally (ordered rules) or as sets of lines (unordered rules).

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::dialect::Dialect;
use crate::error::Result;
use crate::parser::ParsedConfig;
use crate::section::SectionMarkers;

/// What a rule contributes to an evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleSpec {
    pub ordered: bool,
    pub markers: SectionMarkers,
}

impl RuleSpec {
    pub fn new(ordered: bool, match_config: &str) -> Self {
        Self {
            ordered,
            markers: SectionMarkers::from_match_config(match_config),
        }
    }
}

/// Positional comparison result.
///
/// At each position where the sections differ, the intended line is
/// missing and the backup line is extra. Lines past the end of the shorter
/// section land on the longer section's side.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderedMatch {
    pub missing: Vec<String>,
    pub extra: Vec<String>,
}

/// Set comparison result. Both sides are sorted and free of duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnorderedMatch {
    pub missing: BTreeSet<String>,
    pub extra: BTreeSet<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum MatchOutcome {
    Ordered(OrderedMatch),
    Unordered(UnorderedMatch),
}

/// Outcome of evaluating one rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplianceResult {
    /// Section extracted from the backup, newline-joined.
    pub actual: String,
    /// Section extracted from the intended configuration, newline-joined.
    pub intended: String,
    /// Whether actual and intended match line for line.
    pub ordered_compliant: bool,
    pub outcome: MatchOutcome,
}

impl ComplianceResult {
    /// Intended lines absent from the backup.
    pub fn missing(&self) -> Vec<&str> {
        match &self.outcome {
            MatchOutcome::Ordered(m) => m.missing.iter().map(String::as_str).collect(),
            MatchOutcome::Unordered(m) => m.missing.iter().map(String::as_str).collect(),
        }
    }

    /// Backup lines absent from the intended configuration.
    pub fn extra(&self) -> Vec<&str> {
        match &self.outcome {
            MatchOutcome::Ordered(m) => m.extra.iter().map(String::as_str).collect(),
            MatchOutcome::Unordered(m) => m.extra.iter().map(String::as_str).collect(),
        }
    }

    pub fn is_compliant(&self) -> bool {
        match &self.outcome {
            MatchOutcome::Ordered(m) => m.missing.is_empty() && m.extra.is_empty(),
            MatchOutcome::Unordered(m) => m.missing.is_empty() && m.extra.is_empty(),
        }
    }

    pub fn is_ordered(&self) -> bool {
        matches!(self.outcome, MatchOutcome::Ordered(_))
    }
}

/// Evaluate a rule against raw backup and intended text for a network OS.
///
/// Fails only when the network OS has no parser support. A configuration
/// that cannot be parsed is evaluated as empty.
pub fn evaluate(
    rule: &RuleSpec,
    backup: &str,
    intended: &str,
    network_os: &str,
) -> Result<ComplianceResult> {
    let dialect = Dialect::lookup(network_os)?;
    let backup = dialect.parse_lossy(backup);
    let intended = dialect.parse_lossy(intended);
    Ok(evaluate_parsed(rule, &backup, &intended))
}

/// Evaluate a rule against already parsed configurations.
///
/// Callers evaluating many rules for one device parse each file once and
/// use this directly.
pub fn evaluate_parsed(
    rule: &RuleSpec,
    backup: &ParsedConfig,
    intended: &ParsedConfig,
) -> ComplianceResult {
    let actual_lines = rule.markers.extract(backup);
    let intended_lines = rule.markers.extract(intended);

    let outcome = if rule.ordered {
        MatchOutcome::Ordered(compare_ordered(&actual_lines, &intended_lines))
    } else {
        MatchOutcome::Unordered(compare_unordered(&actual_lines, &intended_lines))
    };

    ComplianceResult {
        ordered_compliant: actual_lines == intended_lines,
        actual: actual_lines.join("\n"),
        intended: intended_lines.join("\n"),
        outcome,
    }
}

fn compare_ordered(actual: &[&str], intended: &[&str]) -> OrderedMatch {
    let mut result = OrderedMatch::default();

    for idx in 0..actual.len().max(intended.len()) {
        match (actual.get(idx), intended.get(idx)) {
            (Some(have), Some(want)) if have != want => {
                result.missing.push(want.to_string());
                result.extra.push(have.to_string());
            }
            (Some(have), None) => result.extra.push(have.to_string()),
            (None, Some(want)) => result.missing.push(want.to_string()),
            _ => {}
        }
    }

    result
}

fn compare_unordered(actual: &[&str], intended: &[&str]) -> UnorderedMatch {
    let have: BTreeSet<&str> = actual.iter().copied().collect();
    let want: BTreeSet<&str> = intended.iter().copied().collect();

    UnorderedMatch {
        missing: want.difference(&have).map(|line| line.to_string()).collect(),
        extra: have.difference(&want).map(|line| line.to_string()).collect(),
    }
}
