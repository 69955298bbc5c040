//! Orchestrator runs persisted through the file store, across threads

use std::sync::Arc;
use std::thread;

use serde_json::json;

use gc_core::{ComplianceOrchestrator, ComplianceStore, FileStore, RuleIndex, TracingJobLogger};
use gc_fs::NormalizedPath;
use gc_git::RepositoryRef;
use gc_meta::{ComplianceRule, Device, GoldenConfigSettings};
use gc_test_utils::TestWorkspace;

fn orchestrator(ws: &TestWorkspace, store: Arc<FileStore>) -> ComplianceOrchestrator {
    let settings = GoldenConfigSettings {
        backup_path_template: "{{ obj.name }}.cfg".into(),
        intended_path_template: "{{ obj.name }}.cfg".into(),
        repository_root: NormalizedPath::new(ws.repository_root()),
        backup_repositories: vec![RepositoryRef::new("backups", ws.add_repository("backups"))],
        intended_repositories: vec![RepositoryRef::new("intended", ws.add_repository("intended"))],
        ..Default::default()
    };
    let rules = [ComplianceRule::cli("ntp", "cisco_ios", false, &["ntp"])];
    ComplianceOrchestrator::new(
        Arc::new(settings),
        Arc::new(RuleIndex::build(&rules)),
        store,
        Arc::new(TracingJobLogger),
    )
}

#[test]
fn test_concurrent_devices_write_separate_documents() {
    let ws = TestWorkspace::new();
    let store = Arc::new(FileStore::new(ws.root().join("results")));
    let orchestrator = orchestrator(&ws, store.clone());

    let devices: Vec<Device> = (0..8)
        .map(|n| {
            let name = format!("rtr-{n:02}");
            ws.write("backups", &format!("{name}.cfg"), "ntp server 10.0.0.1\n");
            ws.write("intended", &format!("{name}.cfg"), "ntp server 10.0.0.1\n");
            Device::new(name.clone(), "cisco_ios").with_attribute("role", json!("edge"))
        })
        .collect();

    let handles: Vec<_> = devices
        .into_iter()
        .map(|device| {
            let orchestrator = orchestrator.clone();
            thread::spawn(move || orchestrator.run_device(&device).unwrap())
        })
        .collect();
    for handle in handles {
        assert!(handle.join().unwrap().is_success());
    }

    for n in 0..8 {
        let id = format!("rtr-{n:02}");
        let records = store.compliance_for_device(&id).unwrap();
        assert_eq!(records.len(), 1);
        assert!(records[0].compliance);
        ws.assert_file_exists(&format!("results/{id}.json"));
    }
}

#[test]
fn test_file_store_survives_reopen() {
    let ws = TestWorkspace::new();
    let store = Arc::new(FileStore::new(ws.root().join("results")));
    let orchestrator = orchestrator(&ws, store);
    ws.write("backups", "r1.cfg", "ntp server 10.0.0.1\n");
    ws.write("intended", "r1.cfg", "ntp server 10.0.0.2\n");

    orchestrator.run_device(&Device::new("r1", "cisco_ios")).unwrap();

    let reopened = FileStore::new(ws.root().join("results"));
    let records = reopened.compliance_for_device("r1").unwrap();
    assert_eq!(records[0].missing, vec!["ntp server 10.0.0.2"]);
    assert_eq!(records[0].extra, vec!["ntp server 10.0.0.1"]);
    let run = reopened.get_or_create_golden_config("r1").unwrap();
    assert!(run.compliance_last_success_date.is_some());
    assert!(run.compliance_config.contains("-ntp server 10.0.0.1\n+ntp server 10.0.0.2"));
}
