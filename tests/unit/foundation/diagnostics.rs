use super::*;

#[test]
fn report_once_emits_first_occurrence_only() {
    let mut log = DiagnosticLog::default();
    for _ in 0..5 {
        log.report_once(
            "red/4:1:1",
            Severity::Error,
            DiagnosticKind::UnsupportedCombination,
            "red on 4:1:1 is not implemented",
        );
    }
    assert_eq!(log.len(), 1);
    assert_eq!(log.suppressed(), 4);

    log.report_once(
        "cyan/4:1:1",
        Severity::Error,
        DiagnosticKind::UnsupportedCombination,
        "cyan on 4:1:1 is not implemented",
    );
    assert_eq!(log.len(), 2);
}

#[test]
fn history_is_bounded() {
    let mut log = DiagnosticLog::with_capacity(2);
    for i in 0..4 {
        log.report(
            Severity::Warning,
            DiagnosticKind::ConfigurationFallback,
            format!("event {i}"),
        );
    }
    let msgs: Vec<_> = log.events().map(|d| d.message.as_str()).collect();
    assert_eq!(msgs, vec!["event 2", "event 3"]);
}

#[test]
fn clear_keeps_report_once_keys() {
    let mut log = DiagnosticLog::default();
    assert!(log.report_once("k", Severity::Error, DiagnosticKind::InvalidFrame, "m"));
    log.clear();
    assert!(log.is_empty());
    assert!(!log.report_once("k", Severity::Error, DiagnosticKind::InvalidFrame, "m"));
}

#[test]
fn zero_capacity_keeps_nothing() {
    let mut log = DiagnosticLog::with_capacity(0);
    log.report(Severity::Error, DiagnosticKind::AllocationFailure, "x");
    assert!(log.is_empty());
}
