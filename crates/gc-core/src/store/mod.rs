//! Persistence of compliance and run records

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use crate::Result;
use crate::records::{ConfigComplianceRecord, GoldenConfigRecord};

/// Where the orchestrator writes its results.
///
/// Writes for different devices never touch the same record, so
/// implementations only need per-record atomicity.
pub trait ComplianceStore: Send + Sync {
    /// The device's run record, or a fresh one if it has none yet.
    fn get_or_create_golden_config(&self, device_id: &str) -> Result<GoldenConfigRecord>;

    fn save_golden_config(&self, record: &GoldenConfigRecord) -> Result<()>;

    /// Insert or wholly replace the record for `(device_id, rule_id)`.
    fn upsert_compliance(&self, record: &ConfigComplianceRecord) -> Result<()>;

    /// All compliance records of a device, ordered by rule id.
    fn compliance_for_device(&self, device_id: &str) -> Result<Vec<ConfigComplianceRecord>>;

    /// Persist a finished device run: every compliance record, then the
    /// run record.
    fn persist_device(
        &self,
        run: &GoldenConfigRecord,
        records: &[ConfigComplianceRecord],
    ) -> Result<()> {
        for record in records {
            self.upsert_compliance(record)?;
        }
        self.save_golden_config(run)
    }
}
