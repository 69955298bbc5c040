//! Output records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use gc_content::ComplianceResult;

use crate::rules::IndexedRule;

/// Compliance of one device against one rule. Unique per
/// `(device_id, rule_id)` and always replaced as a whole.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigComplianceRecord {
    pub device_id: String,
    pub rule_id: String,
    pub actual: String,
    pub intended: String,
    pub missing: Vec<String>,
    pub extra: Vec<String>,
    pub compliance: bool,
    pub compliance_int: u8,
    pub ordered: bool,
    pub ordered_compliant: bool,
}

impl ConfigComplianceRecord {
    pub fn from_result(device_id: &str, rule: &IndexedRule, result: &ComplianceResult) -> Self {
        let compliance = result.is_compliant();
        Self {
            device_id: device_id.to_string(),
            rule_id: rule.rule_id.clone(),
            actual: result.actual.clone(),
            intended: result.intended.clone(),
            missing: result.missing().into_iter().map(String::from).collect(),
            extra: result.extra().into_iter().map(String::from).collect(),
            compliance,
            compliance_int: u8::from(compliance),
            ordered: result.is_ordered(),
            ordered_compliant: result.ordered_compliant,
        }
    }
}

/// Per-device run record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoldenConfigRecord {
    pub device_id: String,
    pub compliance_last_attempt_date: Option<DateTime<Utc>>,
    pub compliance_last_success_date: Option<DateTime<Utc>>,
    /// Unified diff of the full backup and intended files from the last
    /// successful run.
    pub compliance_config: String,
}

impl GoldenConfigRecord {
    pub fn new(device_id: impl Into<String>) -> Self {
        Self {
            device_id: device_id.into(),
            ..Default::default()
        }
    }
}
