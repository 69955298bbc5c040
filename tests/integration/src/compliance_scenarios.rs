//! End-to-end compliance batches driven from settings, rules and device
//! documents on disk.

use std::sync::Arc;

use pretty_assertions::assert_eq;

use gc_core::{
    ComplianceOrchestrator, ComplianceStore, DeviceState, FileStore, LogLevel, MemoryJobLogger,
    RuleIndex,
};
use gc_fs::NormalizedPath;
use gc_meta::loader::{load_devices, load_rules, load_settings};
use gc_test_utils::TestWorkspace;

const RULES: &str = r#"
rules:
  - id: ntp
    platform: cisco_ios
    match_config: ntp server
  - id: interfaces
    platform: cisco_ios
    ordered: true
    match_config: |
      interface
  - id: banner
    platform: cisco_ios
    match_config: banner
  - id: system
    platform: junos
    ordered: true
    match_config:
      - system
"#;

const DEVICES: &str = r#"
devices:
  - id: "101"
    name: ams01-rtr-01
    platform: cisco_ios
    site: {slug: ams01, region: {slug: nl, parent: {slug: ams}}}
  - id: "102"
    name: nyc01-rtr-01
    platform: cisco_ios
    site: {slug: nyc01, region: {slug: ny, parent: {slug: nyc}}}
  - id: "103"
    name: nyc01-mx-01
    platform: junos
    site: {slug: nyc01, region: {slug: ny, parent: {slug: nyc}}}
  - id: "104"
    name: ams01-fw-01
    platform: panos
    site: {slug: ams01, region: {slug: nl, parent: {slug: ams}}}
"#;

const IOS_INTENDED: &str = "\
hostname ams01-rtr-01
!
banner motd ^C
Authorized access only
^C
!
ntp server 10.0.0.1
ntp server 10.0.0.2
!
interface Gi0/1
 description uplink
 ip address 10.1.1.1 255.255.255.0
interface Gi0/2
 shutdown
";

const IOS_BACKUP: &str = "\
hostname ams01-rtr-01
!
banner motd ^C
Authorized access only
^C
!
ntp server 10.0.0.2
ntp server 10.0.0.1
ntp server 10.9.9.9
!
interface Gi0/1
 description uplink
 ip address 10.1.1.1 255.255.255.0
interface Gi0/2
 no shutdown
";

const JUNOS: &str = "\
system {
    host-name nyc01-mx-01;
    ntp {
        server 10.0.0.1;
    }
}
interfaces {
    ge-0/0/0 {
        description uplink;
    }
}
";

struct Job {
    ws: TestWorkspace,
    orchestrator: ComplianceOrchestrator,
    store: Arc<FileStore>,
    logger: Arc<MemoryJobLogger>,
    devices: Vec<gc_meta::Device>,
}

fn job() -> Job {
    let ws = TestWorkspace::new();
    let settings = format!(
        r#"
backup_path_template: "{{{{ obj.site.slug }}}}/{{{{ obj.name }}}}.cfg"
intended_path_template: "{{{{ obj.site.slug }}}}/{{{{ obj.name }}}}.cfg"
backup_repository_template: "backups-{{{{ obj.site.region.parent.slug }}}}"
repository_root: '{root}'
platform_slug_map:
  junos: juniper_junos
  panos: paloalto_panos
backup_repositories:
  - name: backups-ams
    root_path: '{ams}'
  - name: backups-nyc
    root_path: '{nyc}'
intended_repositories:
  - name: intended
    root_path: '{intended}'
"#,
        root = ws.repository_root().display(),
        ams = ws.add_repository("backups-ams").display(),
        nyc = ws.add_repository("backups-nyc").display(),
        intended = ws.add_repository("intended").display(),
    );
    let settings_path = NormalizedPath::new(ws.write_root_file("settings.yaml", &settings));
    let settings = load_settings(&settings_path).unwrap();
    let rules = load_rules(&NormalizedPath::new(ws.write_root_file("rules.yaml", RULES))).unwrap();
    let devices_path = NormalizedPath::new(ws.write_root_file("devices.yaml", DEVICES));
    let devices = load_devices(&devices_path).unwrap();

    let store = Arc::new(FileStore::new(ws.root().join("results")));
    let logger = Arc::new(MemoryJobLogger::new());
    let orchestrator = ComplianceOrchestrator::new(
        Arc::new(settings),
        Arc::new(RuleIndex::build(&rules)),
        store.clone(),
        logger.clone(),
    );
    Job {
        ws,
        orchestrator,
        store,
        logger,
        devices,
    }
}

#[test]
fn test_multi_region_batch() {
    let job = job();
    job.ws.write("backups-ams", "ams01/ams01-rtr-01.cfg", IOS_BACKUP);
    job.ws.write("intended", "ams01/ams01-rtr-01.cfg", IOS_INTENDED);
    job.ws.write("backups-nyc", "nyc01/nyc01-mx-01.cfg", JUNOS);
    job.ws.write("intended", "nyc01/nyc01-mx-01.cfg", JUNOS);
    job.ws.write("backups-ams", "ams01/ams01-fw-01.cfg", "");
    job.ws.write("intended", "ams01/ams01-fw-01.cfg", "");

    let summary = job.orchestrator.run_batch(&job.devices).unwrap();
    let states: Vec<_> = summary
        .outcomes
        .iter()
        .map(|o| (o.device_name.as_str(), o.state, o.failed_in))
        .collect();
    assert_eq!(
        states,
        vec![
            ("ams01-rtr-01", DeviceState::Done, None),
            ("nyc01-rtr-01", DeviceState::Failed, Some(DeviceState::Loading)),
            ("nyc01-mx-01", DeviceState::Done, None),
            ("ams01-fw-01", DeviceState::Failed, Some(DeviceState::Evaluating)),
        ]
    );
    assert_eq!(
        summary.outcomes[3].reason.as_deref(),
        Some("There is no defined `Configuration Rule` for platform slug `panos`.")
    );

    let records = job.store.compliance_for_device("101").unwrap();
    let by_rule = |id: &str| records.iter().find(|r| r.rule_id == id).unwrap();

    let ntp = by_rule("ntp");
    assert!(!ntp.compliance);
    assert_eq!(ntp.extra, vec!["ntp server 10.9.9.9"]);
    assert!(ntp.missing.is_empty());

    let interfaces = by_rule("interfaces");
    assert_eq!(interfaces.missing, vec![" shutdown"]);
    assert_eq!(interfaces.extra, vec![" no shutdown"]);

    let banner = by_rule("banner");
    assert!(banner.compliance);
    assert_eq!(banner.actual, "banner motd ^C\nAuthorized access only\n^C");

    let junos = job.store.compliance_for_device("103").unwrap();
    assert_eq!(junos.len(), 1);
    assert!(junos[0].compliance && junos[0].ordered_compliant);
    assert_eq!(
        junos[0].actual,
        "system {\n    host-name nyc01-mx-01;\n    ntp {\n        server 10.0.0.1;"
    );

    assert!(job.store.compliance_for_device("102").unwrap().is_empty());
    assert!(job.store.compliance_for_device("104").unwrap().is_empty());

    let failures: Vec<_> = job
        .logger
        .failures()
        .into_iter()
        .map(|e| e.device.unwrap_or_default())
        .collect();
    assert_eq!(failures, vec!["nyc01-rtr-01", "ams01-fw-01"]);
}

#[test]
fn test_rerun_after_remediation() {
    let job = job();
    let device = &job.devices[0];
    job.ws.write("backups-ams", "ams01/ams01-rtr-01.cfg", IOS_BACKUP);
    job.ws.write("intended", "ams01/ams01-rtr-01.cfg", IOS_INTENDED);

    job.orchestrator.run_device(device).unwrap();
    let first = job.store.get_or_create_golden_config("101").unwrap();
    assert!(first.compliance_config.contains("-ntp server 10.9.9.9"));

    job.ws.write("backups-ams", "ams01/ams01-rtr-01.cfg", IOS_INTENDED);
    job.orchestrator.run_device(device).unwrap();

    let second = job.store.get_or_create_golden_config("101").unwrap();
    assert!(second.compliance_last_success_date >= first.compliance_last_success_date);
    assert_eq!(second.compliance_config, "");
    let records = job.store.compliance_for_device("101").unwrap();
    assert_eq!(records.len(), 3);
    assert!(records.iter().all(|r| r.compliance));
}

#[test]
fn test_failed_rerun_keeps_previous_success() {
    let job = job();
    let device = &job.devices[0];
    job.ws.write("backups-ams", "ams01/ams01-rtr-01.cfg", IOS_INTENDED);
    job.ws.write("intended", "ams01/ams01-rtr-01.cfg", IOS_INTENDED);
    job.orchestrator.run_device(device).unwrap();
    let first = job.store.get_or_create_golden_config("101").unwrap();

    std::fs::remove_file(job.ws.repo_path("intended").join("ams01/ams01-rtr-01.cfg")).unwrap();
    let outcome = job.orchestrator.run_device(device).unwrap();
    assert_eq!(outcome.state, DeviceState::Failed);

    let second = job.store.get_or_create_golden_config("101").unwrap();
    assert_eq!(second.compliance_last_success_date, first.compliance_last_success_date);
    assert!(second.compliance_last_attempt_date >= first.compliance_last_success_date);
    assert_eq!(job.store.compliance_for_device("101").unwrap().len(), 3);
}

#[test]
fn test_git_backed_repositories() {
    let job = job();
    job.ws.write("backups-nyc", "nyc01/nyc01-mx-01.cfg", JUNOS);
    job.ws.write("intended", "nyc01/nyc01-mx-01.cfg", JUNOS);
    let backup_commit = job.ws.init_git("backups-nyc");
    let intended_commit = job.ws.init_git("intended");

    let outcome = job.orchestrator.run_device(&job.devices[2]).unwrap();
    assert_eq!(outcome.backup_commit, Some(backup_commit.to_string()));
    assert_eq!(outcome.intended_commit, Some(intended_commit.to_string()));
    assert!(
        job.logger
            .entries()
            .iter()
            .any(|e| e.level == LogLevel::Debug && e.message.contains(&backup_commit.to_string()))
    );
}
