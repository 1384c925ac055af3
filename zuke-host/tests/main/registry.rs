use crate::fake::Harness;
use std::sync::atomic::Ordering;

#[test]
fn runner_is_shared_by_every_case_of_a_project() {
    let harness = Harness::new();
    harness.run(&harness.scenario("Add two numbers"));
    harness.run(&harness.scenario("Registering people"));

    assert_eq!(harness.created.load(Ordering::SeqCst), 1);
    assert_eq!(harness.bridge.runners().len(), 1);
}

#[test]
fn shutdown_ends_the_test_run() {
    let harness = Harness::new();
    harness.run(&harness.scenario("Add two numbers"));

    harness.bridge.runners().shutdown().unwrap();
    assert_eq!(harness.runner.calls().last().unwrap(), "test_run_end");
    assert!(harness.bridge.runners().is_empty());
}

#[test]
fn shutdown_reports_runner_errors() {
    let harness = Harness::new();
    harness.run(&harness.scenario("Add two numbers"));
    harness.runner.fail_on("test_run_end");

    let error = harness.bridge.runners().shutdown().unwrap_err();
    assert_eq!(
        format!("{:#}", error),
        "Error ending test run for calculator: test_run_end failed"
    );
}

#[test]
fn skipped_cases_create_no_runner() {
    let harness = Harness::new();
    harness.run(&harness.scenario("Division"));

    assert_eq!(harness.created.load(Ordering::SeqCst), 0);
    assert!(harness.bridge.runners().is_empty());
}
