use crate::fake::Harness;
use std::sync::Arc;
use zuke_host::*;

#[test]
fn outcome_and_finished_share_time_and_output() {
    let harness = Harness::new();
    let case = harness.scenario("Add two numbers");
    let summary = harness.run(&case);

    let messages = harness.bus.messages();
    assert_eq!(messages.len(), 2);
    let (outcome, finished) = (&messages[0], &messages[1]);

    assert!(outcome.outcome().unwrap().passed());
    assert!(finished.is_finished());
    for message in &messages {
        assert_eq!(message.test, case.unique_id());
        assert_eq!(message.display_name, "Add two numbers");
    }
    assert_eq!(outcome.time, finished.time);
    assert_eq!(outcome.time, summary.time);
    assert_eq!(outcome.output, finished.output);
    assert!(outcome.output.contains("I have entered 70 into the calculator\n"));
}

#[test]
fn unknown_scenario_is_skipped() {
    let harness = Harness::new();
    let case = harness.scenario("Subtract").with_display_name("Calculator: Subtract");
    let summary = harness.run(&case);

    let outcome = harness.outcome();
    assert_eq!(
        outcome.skip_reason(),
        Some("Unable to find Scenario: Calculator: Subtract")
    );
    assert_eq!(summary.skipped, 1);
    assert_eq!(summary.time, 0.0);
    assert!(harness.runner.calls().is_empty());
    assert!(harness.bus.messages()[0].output.is_empty());
}

#[test]
fn ignored_scenario_is_skipped() {
    let harness = Harness::new();
    harness.run(&harness.scenario("Division"));

    assert_eq!(harness.outcome().skip_reason(), Some("Ignored"));
    assert!(harness.runner.calls().is_empty());
}

#[test]
fn feature_tags_are_inherited() {
    let harness = Harness::new();
    harness.run(&TestCase::scenario(harness.file("unfinished.feature"), "Anything"));

    assert_eq!(harness.outcome().skip_reason(), Some("Ignored"));
    assert!(harness.runner.calls().is_empty());
}

#[test]
fn ignore_tag_is_configurable() {
    let options = BridgeOptions::builder().ignore_tag("@math").build().unwrap();
    let harness = Harness::with_options(options);
    harness.run(&harness.scenario("Add two numbers"));

    assert_eq!(harness.outcome().skip_reason(), Some("Ignored"));
}

#[test]
fn missing_feature_file_fails() {
    let harness = Harness::new();
    let summary = harness.run(&TestCase::scenario(harness.file("nope.feature"), "Anything"));

    let outcome = harness.outcome();
    let error = format!("{:#}", outcome.error().unwrap());
    assert!(error.contains("Unable to load calculator:features/nope.feature"), "{}", error);
    assert_eq!(summary.failed, 1);
}

#[test]
fn rejected_outcome_cancels_the_run() {
    let harness = Harness::new();
    harness.bus.reject_all();
    harness.run(&harness.scenario("Add two numbers"));

    assert!(harness.cancel.is_set());
    // the scenario itself still ran to completion
    assert_eq!(harness.runner.calls().last().unwrap(), "feature_end");
}

#[test]
fn canceled_run_only_reports_finished() {
    let harness = Harness::new();
    harness.cancel.set();
    harness.run(&harness.scenario("Add two numbers"));

    let messages = harness.bus.messages();
    assert_eq!(messages.len(), 1);
    assert!(messages[0].is_finished());
}

#[test]
fn failures_are_reported_over_a_channel() {
    let harness = Harness::new();
    let (bus, mut recv) = ChannelBus::new(4);
    let case = harness.scenario("Broken addition");

    let summary = async_std::task::block_on(harness.bridge.run(
        &case,
        Host {
            bus: &bus,
            output: Some(Arc::new(OutputCapture::new())),
            aggregator: &ErrorAggregator::new(),
            cancel: &harness.cancel,
        },
    ));

    assert_eq!(summary.failed, 1);
    let outcome = recv.try_next().unwrap().unwrap();
    assert!(outcome.outcome().unwrap().failed());
    assert!(recv.try_next().unwrap().unwrap().is_finished());
    assert!(!harness.cancel.is_set());
}
