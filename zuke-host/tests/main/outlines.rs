use crate::fake::Harness;
use rstest::rstest;
use zuke_host::*;

#[rstest]
#[case(1usize, "2", "3", "5")]
#[case(2usize, "5", "5", "10")]
fn example_rows_are_substituted(
    #[case] id: usize,
    #[case] a: &str,
    #[case] b: &str,
    #[case] sum: &str,
) {
    let harness = Harness::new();
    let case = TestCase::example(harness.file("calculator.feature"), "Add numbers", id);
    harness.run(&case);

    assert!(harness.outcome().passed());
    assert_eq!(
        harness.runner.calls()[4..8],
        [
            format!("given I have entered {} into the calculator", a),
            format!("and I have entered {} into the calculator", b),
            "when I press add".to_string(),
            format!("then the result should be {} on the screen", sum),
        ]
    );
}

#[test]
fn missing_example_row_is_skipped() {
    let harness = Harness::new();
    let case = TestCase::example(harness.file("calculator.feature"), "Add numbers", 7usize);
    harness.run(&case);

    assert_eq!(
        harness.outcome().skip_reason(),
        Some("Unable to find Scenario: Add numbers [7]")
    );
    assert!(harness.runner.calls().is_empty());
}

#[test]
fn outline_is_not_a_plain_scenario() {
    let harness = Harness::new();
    harness.run(&harness.scenario("Add numbers"));

    assert!(harness.outcome().skipped());
    assert!(harness.runner.calls().is_empty());
}

#[test]
fn resolves_from_a_parsed_file() {
    let harness = Harness::new();
    let case = TestCase::example(harness.file("calculator.feature"), "Add numbers", 2usize);
    let document = async_std::task::block_on(GherkinSource::new().document(case.feature()))
        .unwrap()
        .unwrap();

    let scenario = resolve(&document, &case).unwrap();
    assert_eq!(scenario.inherited_tags, ["math"]);
    assert_eq!(scenario.background.len(), 1);
    assert_eq!(scenario.steps[3].text, "the result should be 10 on the screen");
}

#[test]
fn example_block_tags_apply_to_its_rows() {
    let harness = Harness::new();
    let file = harness.file("tagged_examples.feature");
    let case = TestCase::example(file, "Subtract numbers", 1usize);
    harness.run(&case);

    assert_eq!(harness.outcome().skip_reason(), Some("Ignored"));
    assert!(harness.runner.calls().is_empty());
}
