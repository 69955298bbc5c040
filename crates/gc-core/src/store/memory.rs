//! In-memory store

use std::collections::{BTreeMap, HashMap};
use std::sync::{PoisonError, RwLock};

use crate::records::{ConfigComplianceRecord, GoldenConfigRecord};
use crate::store::ComplianceStore;
use crate::{Error, Result};

#[derive(Debug, Default)]
pub struct MemoryStore {
    golden: RwLock<HashMap<String, GoldenConfigRecord>>,
    compliance: RwLock<BTreeMap<(String, String), ConfigComplianceRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run record of a device, if one was ever saved.
    pub fn golden_config(&self, device_id: &str) -> Result<Option<GoldenConfigRecord>> {
        let golden = self.golden.read().map_err(poisoned)?;
        Ok(golden.get(device_id).cloned())
    }
}

fn poisoned<T>(err: PoisonError<T>) -> Error {
    Error::StoreUnavailable {
        message: err.to_string(),
    }
}

impl ComplianceStore for MemoryStore {
    fn get_or_create_golden_config(&self, device_id: &str) -> Result<GoldenConfigRecord> {
        let mut golden = self.golden.write().map_err(poisoned)?;
        Ok(golden
            .entry(device_id.to_string())
            .or_insert_with(|| GoldenConfigRecord::new(device_id))
            .clone())
    }

    fn save_golden_config(&self, record: &GoldenConfigRecord) -> Result<()> {
        let mut golden = self.golden.write().map_err(poisoned)?;
        golden.insert(record.device_id.clone(), record.clone());
        Ok(())
    }

    fn upsert_compliance(&self, record: &ConfigComplianceRecord) -> Result<()> {
        let mut compliance = self.compliance.write().map_err(poisoned)?;
        compliance.insert(
            (record.device_id.clone(), record.rule_id.clone()),
            record.clone(),
        );
        Ok(())
    }

    fn compliance_for_device(&self, device_id: &str) -> Result<Vec<ConfigComplianceRecord>> {
        let compliance = self.compliance.read().map_err(poisoned)?;
        Ok(compliance
            .values()
            .filter(|record| record.device_id == device_id)
            .cloned()
            .collect())
    }
}
