//! The compliance orchestrator
//!
//! Each device walks `Pending -> Resolving -> Loading -> Evaluating ->
//! Persisting -> Done`, or stops in `Failed` from any of the middle states.
//! Expected, device-specific failures are logged and end that device only;
//! anything else is logged and aborts the batch.
//!
//! Nothing is written for a device until every rule has been evaluated, so
//! a failed device never leaves partial compliance records behind. Only its
//! last-attempt date moves.

use std::fmt;
use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;

use gc_content::{Dialect, JinjaTemplateEngine, TemplateEvaluator, evaluate_parsed, unified_diff};
use gc_fs::NormalizedPath;
use gc_git::RepositoryRef;
use gc_meta::{Device, GoldenConfigSettings, RepositoryKind};

use crate::logger::JobLogger;
use crate::pairs::sticky_pairs;
use crate::records::ConfigComplianceRecord;
use crate::resolver::{RepositoryResolver, ResolvedRepository};
use crate::rules::RuleIndex;
use crate::store::ComplianceStore;
use crate::summary::JobSummary;
use crate::{Error, Result};

const REQUIRED_SETTINGS: &[&str] = &["backup_path_template", "intended_path_template"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceState {
    Pending,
    Resolving,
    Loading,
    Evaluating,
    Persisting,
    Done,
    Failed,
}

impl fmt::Display for DeviceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Pending => "pending",
            Self::Resolving => "resolving",
            Self::Loading => "loading",
            Self::Evaluating => "evaluating",
            Self::Persisting => "persisting",
            Self::Done => "done",
            Self::Failed => "failed",
        };
        f.write_str(label)
    }
}

/// How one device's run ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeviceOutcome {
    pub device_id: String,
    pub device_name: String,
    pub state: DeviceState,
    /// State the device was in when it failed.
    pub failed_in: Option<DeviceState>,
    pub reason: Option<String>,
    pub rules_evaluated: usize,
    pub compliant_rules: usize,
    pub backup_commit: Option<String>,
    pub intended_commit: Option<String>,
    pub backup_path: Option<NormalizedPath>,
    pub intended_path: Option<NormalizedPath>,
}

impl DeviceOutcome {
    fn pending(device: &Device) -> Self {
        Self {
            device_id: device.id.clone(),
            device_name: device.display_name().to_string(),
            state: DeviceState::Pending,
            failed_in: None,
            reason: None,
            rules_evaluated: 0,
            compliant_rules: 0,
            backup_commit: None,
            intended_commit: None,
            backup_path: None,
            intended_path: None,
        }
    }

    fn enter(&mut self, state: DeviceState) {
        tracing::debug!(
            device = %self.device_name,
            from = %self.state,
            to = %state,
            "Device state change"
        );
        self.state = state;
    }

    fn fail(&mut self, reason: String) {
        self.failed_in = Some(self.state);
        self.state = DeviceState::Failed;
        self.reason = Some(reason);
    }

    pub fn is_success(&self) -> bool {
        self.state == DeviceState::Done
    }
}

/// Backup and intended files of one repository pairing.
#[derive(Debug)]
struct Target {
    backup: ResolvedRepository,
    intended: ResolvedRepository,
    backup_path: NormalizedPath,
    intended_path: NormalizedPath,
}

#[derive(Debug)]
struct Loaded<'t> {
    target: &'t Target,
    backup: String,
    intended: String,
}

/// What gets persisted for a device that evaluated cleanly.
#[derive(Debug)]
struct Evaluation {
    records: Vec<ConfigComplianceRecord>,
    diff: String,
}

/// Runs compliance for devices against shared, read-only settings and
/// rules.
///
/// Cloning is cheap; clones share the settings, rule index, store and
/// logger, so one orchestrator can be handed to every worker.
#[derive(Clone)]
pub struct ComplianceOrchestrator {
    settings: Arc<GoldenConfigSettings>,
    rules: Arc<RuleIndex>,
    store: Arc<dyn ComplianceStore>,
    logger: Arc<dyn JobLogger>,
    templates: Arc<dyn TemplateEvaluator>,
}

impl ComplianceOrchestrator {
    pub fn new(
        settings: Arc<GoldenConfigSettings>,
        rules: Arc<RuleIndex>,
        store: Arc<dyn ComplianceStore>,
        logger: Arc<dyn JobLogger>,
    ) -> Self {
        Self {
            settings,
            rules,
            store,
            logger,
            templates: Arc::new(JinjaTemplateEngine::strict()),
        }
    }

    pub fn settings(&self) -> &GoldenConfigSettings {
        &self.settings
    }

    pub fn rules(&self) -> &RuleIndex {
        &self.rules
    }

    /// Checks that must pass before any device runs. Failures are logged
    /// without a device.
    pub fn preflight(&self) -> Result<()> {
        let checked = self
            .settings
            .require(REQUIRED_SETTINGS)
            .and_then(|()| self.settings.validate());
        if let Err(err) = checked {
            self.logger.log_failure(None, &err.to_string());
            return Err(err.into());
        }
        Ok(())
    }

    /// Run compliance for every device in order.
    ///
    /// Device-local failures are recorded in the summary; the first
    /// systemic failure stops the batch.
    pub fn run_batch(&self, devices: &[Device]) -> Result<JobSummary> {
        self.preflight()?;
        let outcomes = devices
            .iter()
            .map(|device| self.run_device(device))
            .collect::<Result<Vec<_>>>()?;
        Ok(JobSummary::new(outcomes))
    }

    /// Run compliance for one device.
    ///
    /// Returns `Ok` with a `Failed` outcome for device-local errors and
    /// `Err` for errors that should abort the batch.
    pub fn run_device(&self, device: &Device) -> Result<DeviceOutcome> {
        let name = device.display_name();
        let mut outcome = DeviceOutcome::pending(device);

        let mut run = self
            .store
            .get_or_create_golden_config(&device.id)
            .and_then(|mut run| {
                run.compliance_last_attempt_date = Some(Utc::now());
                self.store.save_golden_config(&run)?;
                Ok(run)
            })
            .inspect_err(|err| self.logger.log_failure(Some(name), &err.to_string()))?;

        match self.evaluate_device(device, &mut outcome) {
            Ok(evaluation) => {
                outcome.enter(DeviceState::Persisting);
                run.compliance_last_success_date = Some(Utc::now());
                run.compliance_config = evaluation.diff;
                self.store
                    .persist_device(&run, &evaluation.records)
                    .inspect_err(|err| self.logger.log_failure(Some(name), &err.to_string()))?;
                outcome.enter(DeviceState::Done);
                self.logger.log_success(Some(name), "Successfully tested compliance job.");
                Ok(outcome)
            }
            Err(err) if err.is_device_local() => {
                self.logger.log_failure(Some(name), &err.to_string());
                outcome.fail(err.to_string());
                Ok(outcome)
            }
            Err(err) => {
                self.logger.log_failure(Some(name), &err.to_string());
                Err(err)
            }
        }
    }

    fn evaluate_device(&self, device: &Device, outcome: &mut DeviceOutcome) -> Result<Evaluation> {
        outcome.enter(DeviceState::Resolving);
        let platform = device.platform.as_deref().ok_or(Error::DeviceWithoutPlatform)?;
        let targets = self.resolve_targets(device)?;

        outcome.enter(DeviceState::Loading);
        let loaded = targets
            .iter()
            .map(|target| -> Result<Loaded<'_>> {
                Ok(Loaded {
                    target,
                    backup: load(RepositoryKind::Backup, &target.backup_path)?,
                    intended: load(RepositoryKind::Intended, &target.intended_path)?,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        outcome.enter(DeviceState::Evaluating);
        let rules = self.rules.rules_for(platform)?;
        let dialect = Dialect::lookup(self.settings.dialect_for(platform))?;

        // Every pairing is evaluated so that any of them can fail the
        // device; the last one is what gets persisted.
        let mut last = None;
        for files in &loaded {
            let backup = dialect.parse_lossy(&files.backup);
            let intended = dialect.parse_lossy(&files.intended);
            let records: Vec<_> = rules
                .iter()
                .map(|rule| {
                    let result = evaluate_parsed(&rule.spec, &backup, &intended);
                    ConfigComplianceRecord::from_result(&device.id, rule, &result)
                })
                .collect();
            last = Some((files, records));
        }
        let Some((files, records)) = last else {
            return Err(Error::NoRepositoryConfigured {
                kind: RepositoryKind::Backup,
            });
        };

        outcome.rules_evaluated = records.len();
        outcome.compliant_rules = records.iter().filter(|r| r.compliance).count();
        outcome.backup_path = Some(files.target.backup_path.clone());
        outcome.intended_path = Some(files.target.intended_path.clone());
        outcome.backup_commit = self.inspect(device, &files.target.backup.repository);
        outcome.intended_commit = self.inspect(device, &files.target.intended.repository);

        Ok(Evaluation {
            records,
            diff: unified_diff(&files.backup, &files.intended).to_text(),
        })
    }

    /// Resolve every backup/intended pairing for a device.
    ///
    /// Repositories are paired positionally with sticky last pairing: when
    /// one list runs out, its last repository keeps being paired with the
    /// remaining entries of the other. A kind with a matching template
    /// resolves against all of its repositories instead of its pair entry.
    /// Pairings that land on the same files are evaluated once.
    fn resolve_targets(&self, device: &Device) -> Result<Vec<Target>> {
        let resolver = RepositoryResolver::new(&self.settings, self.templates.as_ref());
        let backups = self.settings.repositories(RepositoryKind::Backup);
        let intendeds = self.settings.repositories(RepositoryKind::Intended);

        for kind in RepositoryKind::ALL {
            if self.settings.repositories(kind).is_empty() {
                return Err(Error::NoRepositoryConfigured { kind });
            }
        }

        let mut targets: Vec<Target> = Vec::new();
        for (backup_repo, intended_repo) in sticky_pairs(backups, intendeds) {
            let backup = resolver.resolve(
                RepositoryKind::Backup,
                device,
                self.candidates(RepositoryKind::Backup, backup_repo),
            )?;
            let intended = resolver.resolve(
                RepositoryKind::Intended,
                device,
                self.candidates(RepositoryKind::Intended, intended_repo),
            )?;
            let backup_path = resolver.config_path(&backup, device)?;
            let intended_path = resolver.config_path(&intended, device)?;

            if targets
                .iter()
                .any(|t| t.backup_path == backup_path && t.intended_path == intended_path)
            {
                continue;
            }
            tracing::debug!(
                device = %device,
                backup = %backup_path,
                intended = %intended_path,
                "Resolved configuration files"
            );
            targets.push(Target {
                backup,
                intended,
                backup_path,
                intended_path,
            });
        }
        Ok(targets)
    }

    fn candidates<'s>(
        &'s self,
        kind: RepositoryKind,
        paired: &'s RepositoryRef,
    ) -> &'s [RepositoryRef] {
        if self.settings.repository_template(kind).trim().is_empty() {
            std::slice::from_ref(paired)
        } else {
            self.settings.repositories(kind)
        }
    }

    /// HEAD commit id of a repository, if it is a git work tree.
    fn inspect(&self, device: &Device, repository: &RepositoryRef) -> Option<String> {
        match repository.head_commit() {
            Ok(Some(commit)) => {
                self.logger.log_debug(&format!(
                    "{device}: {repository} at {} ({})",
                    commit.short_id(),
                    commit.summary
                ));
                Some(commit.id)
            }
            Ok(None) => None,
            Err(err) => {
                self.logger.log_warning(
                    Some(device.display_name()),
                    &format!("Unable to inspect {repository}: {err}"),
                );
                None
            }
        }
    }
}

/// Read a resolved configuration file, reporting a missing one with its
/// side.
fn load(kind: RepositoryKind, path: &NormalizedPath) -> Result<String> {
    gc_fs::load_config(path).map_err(|err| match err {
        gc_fs::Error::FileNotFound { .. } => Error::ConfigFileMissing {
            kind,
            path: path.clone(),
        },
        other => other.into(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fail_records_stage() {
        let mut outcome = DeviceOutcome::pending(&Device::new("1", "cisco_ios"));
        outcome.enter(DeviceState::Loading);
        outcome.fail("missing".into());
        assert_eq!(outcome.state, DeviceState::Failed);
        assert_eq!(outcome.failed_in, Some(DeviceState::Loading));
        assert!(!outcome.is_success());
    }

    #[test]
    fn test_missing_file_names_side() {
        let err =
            load(RepositoryKind::Backup, &NormalizedPath::new("/nonexistent/r1.cfg")).unwrap_err();
        assert!(matches!(err, Error::ConfigFileMissing { kind: RepositoryKind::Backup, .. }));
        assert!(err.is_device_local());
    }
}
