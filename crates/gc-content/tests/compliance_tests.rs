//! Compliance evaluation across dialects

use gc_content::{Dialect, MatchOutcome, RuleSpec, evaluate, compliance::evaluate_parsed};
use pretty_assertions::assert_eq;
use rstest::rstest;

const IOS_BACKUP: &str = "\
!
hostname router1
!
interface Gi0/1
 description OLD
 no shutdown
!
ntp server 10.0.0.1
ntp server 10.0.0.2
!
banner motd ^C
Authorized access only
^C
";

const IOS_INTENDED: &str = "\
hostname router1
interface Gi0/1
 description NEW
 no shutdown
ntp server 10.0.0.2
ntp server 10.0.0.1
banner motd ^C
Authorized access only
^C
";

#[test]
fn test_ordered_interface_description_change() {
    let rule = RuleSpec::new(true, "interface Gi0/1");
    let result = evaluate(&rule, IOS_BACKUP, IOS_INTENDED, "cisco_ios").unwrap();

    assert_eq!(result.missing(), vec![" description NEW"]);
    assert_eq!(result.extra(), vec![" description OLD"]);
    assert!(!result.is_compliant());
    assert!(matches!(result.outcome, MatchOutcome::Ordered(_)));
}

#[rstest]
#[case::unordered(false, true)]
#[case::ordered(true, false)]
fn test_ntp_reordering(#[case] ordered: bool, #[case] compliant: bool) {
    let rule = RuleSpec::new(ordered, "ntp");
    let result = evaluate(&rule, IOS_BACKUP, IOS_INTENDED, "cisco_ios").unwrap();
    assert_eq!(result.is_compliant(), compliant);
    assert!(!result.ordered_compliant);
}

#[test]
fn test_banner_section_compliant() {
    let rule = RuleSpec::new(true, "banner");
    let result = evaluate(&rule, IOS_BACKUP, IOS_INTENDED, "cisco_ios").unwrap();
    assert!(result.is_compliant());
    assert_eq!(result.actual, "banner motd ^C\nAuthorized access only\n^C");
}

#[test]
fn test_multiple_markers_in_one_rule() {
    let rule = RuleSpec::new(false, "hostname\ninterface");
    let result = evaluate(&rule, IOS_BACKUP, IOS_INTENDED, "cisco_ios").unwrap();
    assert_eq!(result.missing(), vec![" description NEW"]);
    assert_eq!(result.extra(), vec![" description OLD"]);
}

#[test]
fn test_junos_section() {
    let backup = "\
system {
    host-name r1;
    ntp {
        server 10.0.0.1;
    }
}
";
    let intended = "\
system {
    host-name r1;
    ntp {
        server 10.0.0.9;
    }
}
";
    let rule = RuleSpec::new(false, "system");
    let result = evaluate(&rule, backup, intended, "juniper_junos").unwrap();
    assert_eq!(result.missing(), vec!["        server 10.0.0.9;"]);
    assert_eq!(result.extra(), vec!["        server 10.0.0.1;"]);
}

#[test]
fn test_parse_once_evaluate_many() {
    let dialect = Dialect::lookup("cisco_ios").unwrap();
    let backup = dialect.parse_lossy(IOS_BACKUP);
    let intended = dialect.parse_lossy(IOS_INTENDED);

    let results: Vec<_> = ["hostname", "interface", "ntp", "banner"]
        .iter()
        .map(|marker| evaluate_parsed(&RuleSpec::new(false, marker), &backup, &intended))
        .map(|result| result.is_compliant())
        .collect();

    assert_eq!(results, vec![true, false, true, true]);
}

#[test]
fn test_result_serializes_with_kind_tag() {
    let rule = RuleSpec::new(true, "interface Gi0/1");
    let result = evaluate(&rule, IOS_BACKUP, IOS_INTENDED, "cisco_ios").unwrap();
    let value = serde_json::to_value(&result).unwrap();
    assert_eq!(value["outcome"]["kind"], "ordered");
    assert_eq!(value["outcome"]["missing"][0], " description NEW");
}
