//! Compliance command implementation
//!
//! Loads the input documents, builds the rule index once and fans devices
//! out over a bounded pool of blocking tasks.

use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use colored::Colorize;
use tokio::sync::Semaphore;

use gc_core::{
    ComplianceOrchestrator, ComplianceStore, FileStore, JobSummary, MemoryStore, RuleIndex,
    TracingJobLogger,
};
use gc_fs::NormalizedPath;
use gc_meta::{Device, DeviceFilter};
use gc_meta::loader::{load_devices, load_rules, load_settings};

use crate::cli::Inputs;
use crate::error::{CliError, Result};

/// Everything `golden-config compliance` was asked to do.
#[derive(Debug, Clone)]
pub struct ComplianceOptions {
    pub inputs: Inputs,
    pub devices: PathBuf,
    pub store: Option<PathBuf>,
    pub workers: Option<usize>,
    pub names: Vec<String>,
    pub platforms: Vec<String>,
    pub filters: Vec<String>,
    pub json: bool,
}

/// Run the compliance command
pub fn run_compliance(options: ComplianceOptions) -> Result<()> {
    let settings = load_settings(&NormalizedPath::new(&options.inputs.settings))?;
    let rules = load_rules(&NormalizedPath::new(&options.inputs.rules))?;
    let inventory = load_devices(&NormalizedPath::new(&options.devices))?;

    let mut filter = DeviceFilter::new()
        .with_names(options.names)
        .with_platforms(options.platforms);
    for expr in &options.filters {
        filter = filter.with_attribute_expr(expr)?;
    }
    let devices = filter.select(&inventory)?;
    if devices.is_empty() {
        return Err(CliError::user("No devices match the given filters."));
    }

    let store: Arc<dyn ComplianceStore> = match options.store {
        Some(root) => Arc::new(FileStore::new(root)),
        None => Arc::new(MemoryStore::new()),
    };
    let orchestrator = ComplianceOrchestrator::new(
        Arc::new(settings),
        Arc::new(RuleIndex::build(&rules)),
        store,
        Arc::new(TracingJobLogger),
    );
    orchestrator.preflight()?;

    let workers = options.workers.unwrap_or_else(default_workers).max(1);
    tracing::info!(devices = devices.len(), workers, "Starting compliance job");

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(workers)
        .build()?;
    let summary = runtime.block_on(run_pool(orchestrator, devices, workers))?;

    if options.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print_summary(&summary);
    }

    if summary.is_success() {
        Ok(())
    } else {
        Err(CliError::user(format!(
            "{} of {} device(s) failed compliance",
            summary.failed().count(),
            summary.total()
        )))
    }
}

fn default_workers() -> usize {
    std::thread::available_parallelism()
        .map(NonZeroUsize::get)
        .unwrap_or(1)
}

/// Run every device with at most `workers` in flight.
///
/// A systemic failure stops new devices from being started; devices
/// already running finish first.
async fn run_pool(
    orchestrator: ComplianceOrchestrator,
    devices: Vec<Device>,
    workers: usize,
) -> Result<JobSummary> {
    let permits = Arc::new(Semaphore::new(workers));
    let aborted = Arc::new(AtomicBool::new(false));
    let mut handles = Vec::with_capacity(devices.len());

    for device in devices {
        let permit = permits
            .clone()
            .acquire_owned()
            .await
            .map_err(|e| CliError::user(e.to_string()))?;
        if aborted.load(Ordering::SeqCst) {
            break;
        }

        let orchestrator = orchestrator.clone();
        let aborted = aborted.clone();
        handles.push(tokio::task::spawn_blocking(move || {
            let _permit = permit;
            let outcome = orchestrator.run_device(&device);
            if outcome.is_err() {
                aborted.store(true, Ordering::SeqCst);
            }
            outcome
        }));
    }

    let mut outcomes = Vec::with_capacity(handles.len());
    for handle in handles {
        outcomes.push(handle.await??);
    }
    Ok(JobSummary::new(outcomes))
}

/// Print human-readable job summary
fn print_summary(summary: &JobSummary) {
    println!(
        "{} {} device(s): {} succeeded, {} failed",
        "Compliance".blue().bold(),
        summary.total(),
        summary.succeeded().count().to_string().green(),
        summary.failed().count().to_string().red()
    );

    for outcome in summary.succeeded() {
        let verdict = if outcome.compliant_rules == outcome.rules_evaluated {
            "compliant".green()
        } else {
            "non-compliant".yellow()
        };
        println!(
            "  {} {} {} ({}/{} rules)",
            "OK".green().bold(),
            outcome.device_name,
            verdict,
            outcome.compliant_rules,
            outcome.rules_evaluated
        );
    }

    for outcome in summary.failed() {
        let stage = outcome.failed_in.map(|s| s.to_string()).unwrap_or_default();
        println!(
            "  {} {} [{}] {}",
            "FAILED".red().bold(),
            outcome.device_name,
            stage.dimmed(),
            outcome.reason.as_deref().unwrap_or("unknown")
        );
    }
}
