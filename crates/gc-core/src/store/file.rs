//! One JSON document per device

use std::collections::BTreeMap;
use std::fmt::Write;

use serde::{Deserialize, Serialize};

use gc_fs::{ConfigStore, NormalizedPath};

use crate::{Error, Result};
use crate::records::{ConfigComplianceRecord, GoldenConfigRecord};
use crate::store::ComplianceStore;

#[derive(Debug, Default, Serialize, Deserialize)]
struct DeviceDocument {
    #[serde(default)]
    golden_config: Option<GoldenConfigRecord>,
    /// Keyed by rule id.
    #[serde(default)]
    compliance: BTreeMap<String, ConfigComplianceRecord>,
}

/// Stores each device's records in `<root>/<device id>.json`.
///
/// Documents are rewritten atomically, so a reader never sees a half
/// written device.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: NormalizedPath,
    docs: ConfigStore,
}

impl FileStore {
    pub fn new(root: impl Into<NormalizedPath>) -> Self {
        Self {
            root: root.into(),
            docs: ConfigStore::new(),
        }
    }

    pub fn root(&self) -> &NormalizedPath {
        &self.root
    }

    /// Path of a device's document.
    ///
    /// Bytes of the id outside `[A-Za-z0-9._-]` are percent-encoded, so
    /// distinct ids never share a file.
    pub fn document_path(&self, device_id: &str) -> NormalizedPath {
        let mut file_name = String::with_capacity(device_id.len() + 5);
        for byte in device_id.bytes() {
            if byte.is_ascii_alphanumeric() || matches!(byte, b'.' | b'_' | b'-') {
                file_name.push(char::from(byte));
            } else {
                let _ = write!(file_name, "%{byte:02X}");
            }
        }
        file_name.push_str(".json");
        self.root.join(&file_name)
    }

    fn load(&self, device_id: &str) -> Result<DeviceDocument> {
        let path = self.document_path(device_id);
        if !path.is_file() {
            return Ok(DeviceDocument::default());
        }
        let doc: DeviceDocument = self.docs.load(&path)?;

        let owners = doc
            .golden_config
            .iter()
            .map(|run| run.device_id.as_str())
            .chain(doc.compliance.values().map(|record| record.device_id.as_str()));
        for owner in owners {
            if owner != device_id {
                return Err(Error::StoreUnavailable {
                    message: format!("{path} holds records for `{owner}`, not `{device_id}`"),
                });
            }
        }
        Ok(doc)
    }

    fn save(&self, device_id: &str, doc: &DeviceDocument) -> Result<()> {
        Ok(self.docs.save(&self.document_path(device_id), doc)?)
    }
}

impl ComplianceStore for FileStore {
    fn get_or_create_golden_config(&self, device_id: &str) -> Result<GoldenConfigRecord> {
        let mut doc = self.load(device_id)?;
        if let Some(existing) = &doc.golden_config {
            return Ok(existing.clone());
        }
        let created = GoldenConfigRecord::new(device_id);
        doc.golden_config = Some(created.clone());
        self.save(device_id, &doc)?;
        Ok(created)
    }

    fn save_golden_config(&self, record: &GoldenConfigRecord) -> Result<()> {
        let mut doc = self.load(&record.device_id)?;
        doc.golden_config = Some(record.clone());
        self.save(&record.device_id, &doc)
    }

    fn upsert_compliance(&self, record: &ConfigComplianceRecord) -> Result<()> {
        let mut doc = self.load(&record.device_id)?;
        doc.compliance.insert(record.rule_id.clone(), record.clone());
        self.save(&record.device_id, &doc)
    }

    fn compliance_for_device(&self, device_id: &str) -> Result<Vec<ConfigComplianceRecord>> {
        Ok(self.load(device_id)?.compliance.into_values().collect())
    }

    fn persist_device(
        &self,
        run: &GoldenConfigRecord,
        records: &[ConfigComplianceRecord],
    ) -> Result<()> {
        let mut doc = self.load(&run.device_id)?;
        for record in records {
            doc.compliance.insert(record.rule_id.clone(), record.clone());
        }
        doc.golden_config = Some(run.clone());
        self.save(&run.device_id, &doc)
    }
}
