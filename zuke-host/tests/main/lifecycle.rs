use crate::fake::Harness;
use zuke_host::*;

#[test]
fn hooks_and_steps_run_in_order() {
    let harness = Harness::new();
    let summary = harness.run(&harness.scenario("Add two numbers"));

    assert!(harness.outcome().passed());
    assert_eq!(summary.failed, 0);
    assert_eq!(
        harness.runner.calls(),
        [
            "feature_start Calculator en-US",
            "scenario_start Add two numbers",
            "register",
            "given a calculator",
            "given I have entered 50 into the calculator",
            "and I have entered 70 into the calculator",
            "when I press add",
            "then the result should be 120 on the screen",
            "collect",
            "scenario_end",
            "feature_end",
        ]
    );
}

#[test]
fn failing_step_stops_the_scenario_but_not_teardown() {
    let harness = Harness::new();
    harness.run(&harness.scenario("Broken addition"));

    let outcome = harness.outcome();
    let error = format!("{:#}", outcome.error().unwrap());
    assert!(error.contains("When I press explode"), "{}", error);
    assert!(error.contains("the calculator exploded"), "{}", error);

    let calls = harness.runner.calls();
    assert!(calls.contains(&"when I press explode".to_string()));
    assert!(!calls.contains(&"then the result should be 1 on the screen".to_string()));
    assert_eq!(calls[calls.len() - 3..], ["collect", "scenario_end", "feature_end"]);
}

#[test]
fn cleanup_error_after_failed_step_keeps_the_step_error() {
    let harness = Harness::new();
    harness.runner.fail_on("collect");
    harness.run(&harness.scenario("Broken addition"));

    let outcome = harness.outcome();
    match outcome.error().unwrap().downcast_ref::<Error>() {
        Some(Error::Teardown { teardown, original }) => {
            assert_eq!(teardown.to_string(), "collect failed");
            assert!(format!("{:#}", original).contains("the calculator exploded"));
        }
        other => panic!("expected a superseded step error, got {:?}", other),
    }

    let calls = harness.runner.calls();
    assert_eq!(calls[calls.len() - 3..], ["collect", "scenario_end", "feature_end"]);
}

#[test]
fn panicking_step_fails_the_scenario() {
    let harness = Harness::new();
    harness.run(&harness.scenario("Panicking addition"));

    let outcome = harness.outcome();
    assert!(outcome.failed());
    let error = format!("{:#}", outcome.error().unwrap());
    assert!(error.contains("Panicked: the calculator panicked"), "{}", error);

    let calls = harness.runner.calls();
    assert_eq!(calls[calls.len() - 2..], ["scenario_end", "feature_end"]);
}

#[test]
fn teardown_error_supersedes_step_error() {
    let harness = Harness::new();
    harness.runner.fail_on("scenario_end");
    harness.run(&harness.scenario("Broken addition"));

    let outcome = harness.outcome();
    match outcome.error().unwrap().downcast_ref::<Error>() {
        Some(Error::Teardown { teardown, original }) => {
            assert_eq!(teardown.to_string(), "scenario_end failed");
            assert!(format!("{:#}", original).contains("the calculator exploded"));
        }
        other => panic!("expected a teardown error, got {:?}", other),
    }
    // feature teardown still ran
    assert_eq!(harness.runner.calls().last().unwrap(), "feature_end");
}

#[test]
fn scenario_cleanup_errors_fail_the_scenario() {
    let harness = Harness::new();
    harness.runner.fail_on("collect");
    harness.run(&harness.scenario("Add two numbers"));

    let outcome = harness.outcome();
    assert_eq!(outcome.error().unwrap().to_string(), "collect failed");
    assert_eq!(harness.runner.calls().last().unwrap(), "feature_end");
}

#[test]
fn feature_setup_failure_runs_nothing_else() {
    let harness = Harness::new();
    harness.runner.fail_on("feature_start");
    harness.run(&harness.scenario("Add two numbers"));

    assert!(harness.outcome().failed());
    assert_eq!(harness.runner.calls(), ["feature_start Calculator en-US"]);
}

#[test]
fn missing_output_sink_fails_before_the_scenario_starts() {
    let harness = Harness::new();
    harness.run_with(
        &harness.scenario("Add two numbers"),
        None,
        &ErrorAggregator::new(),
    );

    let outcome = harness.outcome();
    assert!(matches!(
        outcome.error().unwrap().downcast_ref::<Error>(),
        Some(Error::MissingOutput { .. })
    ));
    assert_eq!(harness.runner.calls(), ["feature_start Calculator en-US"]);
}

#[test]
fn host_errors_fail_the_case_without_running_it() {
    let harness = Harness::new();
    let mut aggregator = ErrorAggregator::new();
    aggregator.add(anyhow::anyhow!("class fixture failed"));

    harness.run_with(
        &harness.scenario("Add two numbers"),
        Some(std::sync::Arc::new(OutputCapture::new())),
        &aggregator,
    );

    let outcome = harness.outcome();
    assert_eq!(outcome.error().unwrap().to_string(), "class fixture failed");
    assert!(harness.runner.calls().is_empty());
}

#[test]
fn host_errors_fail_ignored_cases_too() {
    let harness = Harness::new();
    let mut aggregator = ErrorAggregator::new();
    aggregator.add(anyhow::anyhow!("class fixture failed"));

    let summary = harness.run_with(
        &harness.scenario("Division"),
        Some(std::sync::Arc::new(OutputCapture::new())),
        &aggregator,
    );

    assert_eq!(summary.failed, 1);
    assert_eq!(harness.outcome().error().unwrap().to_string(), "class fixture failed");
    assert!(harness.runner.calls().is_empty());
}

#[test]
fn tables_and_doc_strings_reach_the_runner() {
    let harness = Harness::new();
    harness.run(&harness.scenario("Registering people"));

    assert!(harness.outcome().passed());

    let tables = harness.runner.tables();
    assert_eq!(tables.len(), 1);
    assert_eq!(tables[0].header(), ["name", "age"]);
    assert_eq!(tables[0].rows().len(), 2);
    assert_eq!(tables[0].get(1, "name"), Some("Bob"));

    let doc_strings = harness.runner.doc_strings();
    assert_eq!(doc_strings.len(), 1);
    assert_eq!(doc_strings[0].trim(), "hello");
    assert!(harness
        .runner
        .calls()
        .contains(&"but the following note:".to_string()));
}
