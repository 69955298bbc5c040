//! The rule index
//!
//! Built once per run from every CLI rule, then shared read-only by all
//! device evaluations.

use std::collections::HashMap;

use gc_content::RuleSpec;
use gc_meta::ComplianceRule;

use crate::{Error, Result};

/// One rule as the evaluator sees it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexedRule {
    pub rule_id: String,
    pub platform: String,
    pub spec: RuleSpec,
}

impl IndexedRule {
    pub fn ordered(&self) -> bool {
        self.spec.ordered
    }
}

/// Rules grouped by platform, in source order.
#[derive(Debug, Clone, Default)]
pub struct RuleIndex {
    by_platform: HashMap<String, Vec<IndexedRule>>,
}

impl RuleIndex {
    /// Index every CLI rule. Rules of other configuration types are skipped.
    pub fn build<'a>(rules: impl IntoIterator<Item = &'a ComplianceRule>) -> Self {
        let mut by_platform: HashMap<String, Vec<IndexedRule>> = HashMap::new();

        for rule in rules {
            if !rule.is_cli() {
                tracing::debug!(
                    rule = %rule.id,
                    config_type = ?rule.config_type,
                    "Skipping non-CLI rule"
                );
                continue;
            }
            by_platform
                .entry(rule.platform.clone())
                .or_default()
                .push(IndexedRule {
                    rule_id: rule.id.clone(),
                    platform: rule.platform.clone(),
                    spec: RuleSpec::new(rule.ordered, &rule.match_config_text()),
                });
        }

        Self { by_platform }
    }

    /// Rules for a platform; a platform without rules is an error.
    pub fn rules_for(&self, platform: &str) -> Result<&[IndexedRule]> {
        match self.by_platform.get(platform) {
            Some(rules) if !rules.is_empty() => Ok(rules),
            _ => Err(Error::NoRuleForPlatform {
                platform: platform.to_string(),
            }),
        }
    }

    /// Indexed platforms, sorted.
    pub fn platforms(&self) -> Vec<&str> {
        let mut platforms: Vec<_> = self.by_platform.keys().map(String::as_str).collect();
        platforms.sort_unstable();
        platforms
    }

    /// Total number of indexed rules.
    pub fn len(&self) -> usize {
        self.by_platform.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
