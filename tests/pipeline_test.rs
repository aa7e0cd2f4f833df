//! Integration tests driving the full pipeline with a scripted mock runner
//!
//! These verify the end-to-end analysis flow without requiring a live model:
//! round-trip field fidelity, fence stripping, both fallback paths, the
//! empty-log fast path, and the signal audit trail.

use logtriage::{AnalyzeService, MockReply, MockRunner, TextRunner};
use std::sync::Arc;

fn service_with_replies(replies: Vec<MockReply>) -> (AnalyzeService, Arc<MockRunner>) {
    let runner = Arc::new(MockRunner::new());
    runner.add_replies(replies);
    (
        AnalyzeService::new(Arc::clone(&runner) as Arc<dyn TextRunner>),
        runner,
    )
}

const FAILING_LOG: &str = "\
[12:01:02] compiling module auth\n\
[12:01:09] npm ERR! 404 Not Found - GET https://registry.npmjs.org/left-pad\n\
[12:01:10] ERROR: dependency resolution failed\n\
[12:01:10] Exception in publish step: aborting\n\
[12:01:11] build step failed with exit code 1\n";

#[tokio::test]
async fn test_well_formed_round_trip() {
    let (service, runner) = service_with_replies(vec![
        MockReply::text(
            r#"{"error_type":"Dependency Issue","root_cause":"left-pad version does not exist","confidence":"High"}"#,
        ),
        MockReply::text(r#"{"suggested_fix": "Fix the left-pad version in package.json\nRun npm install\nCommit the updated lockfile"}"#),
    ]);

    let report = service.analyze("build.log", FAILING_LOG).await.unwrap();

    // Fields copy through with no transformation beyond default substitution.
    assert_eq!(report.error_type, "Dependency Issue");
    assert_eq!(report.root_cause, "left-pad version does not exist");
    assert_eq!(report.confidence, "High");
    assert_eq!(
        report.suggested_fix,
        vec![
            "Fix the left-pad version in package.json",
            "Run npm install",
            "Commit the updated lockfile"
        ]
    );
    assert_eq!(
        report.signals,
        vec![
            "agent1:log_extractor",
            "agent1:found_error_lines=3",
            "agent2:root_cause",
            "agent2:parsed_json=true",
            "agent3:fix_suggester",
            "agent3:parsed_json=true"
        ]
    );

    // Exactly two model calls per request.
    assert_eq!(runner.remaining_replies(), 0);
    assert_eq!(runner.recorded_prompts().len(), 2);
}

#[tokio::test]
async fn test_prompts_embed_extracted_block_and_classification() {
    let (service, runner) = service_with_replies(vec![
        MockReply::text(
            r#"{"error_type":"Dependency Issue","root_cause":"missing package","confidence":"Medium"}"#,
        ),
        MockReply::text(r#"{"suggested_fix": "Run npm install"}"#),
    ]);

    service.analyze("build.log", FAILING_LOG).await.unwrap();

    let prompts = runner.recorded_prompts();
    // Stage 2 sees the extracted block verbatim inside the LOG BLOCK section.
    assert!(prompts[0].contains("LOG BLOCK:"));
    assert!(prompts[0].contains("ERROR: dependency resolution failed"));
    // Non-matching noise lines never reach the model.
    assert!(!prompts[0].contains("compiling module auth"));
    // Stage 3 sees the classification and the same block.
    assert!(prompts[1].contains("error_type: Dependency Issue"));
    assert!(prompts[1].contains("root_cause: missing package"));
    assert!(prompts[1].contains("ERROR: dependency resolution failed"));
}

#[tokio::test]
async fn test_fenced_completions_are_stripped() {
    let (service, _runner) = service_with_replies(vec![
        MockReply::text(
            "```json\n{\"error_type\":\"Test Failure\",\"root_cause\":\"flaky assertion\",\"confidence\":\"Low\"}\n```",
        ),
        MockReply::text("```\n{\"suggested_fix\": \"Rerun the test suite\"}\n```"),
    ]);

    let report = service.analyze("build.log", FAILING_LOG).await.unwrap();

    assert_eq!(report.error_type, "Test Failure");
    assert_eq!(report.suggested_fix, vec!["Rerun the test suite"]);
    assert!(report
        .signals
        .contains(&"agent2:parsed_json=true".to_string()));
    assert!(report
        .signals
        .contains(&"agent3:parsed_json=true".to_string()));
}

#[tokio::test]
async fn test_classifier_prose_falls_back_to_raw_text() {
    let (service, _runner) = service_with_replies(vec![
        MockReply::text("Looks like a dependency problem to me."),
        MockReply::text(r#"{"suggested_fix": "Check the registry"}"#),
    ]);

    let report = service.analyze("build.log", FAILING_LOG).await.unwrap();

    assert_eq!(report.error_type, "Unknown");
    assert_eq!(report.root_cause, "Looks like a dependency problem to me.");
    assert_eq!(report.confidence, "Low");
    assert_eq!(
        report.signals,
        vec![
            "agent1:log_extractor",
            "agent1:found_error_lines=3",
            "agent2:root_cause",
            "agent2:parsed_json=false",
            "agent2:raw_fallback",
            "agent3:fix_suggester",
            "agent3:parsed_json=true"
        ]
    );
}

#[tokio::test]
async fn test_fix_best_effort_recovery_unescapes_line_breaks() {
    let (service, _runner) = service_with_replies(vec![
        MockReply::text(
            r#"{"error_type":"Dependency Issue","root_cause":"bad version","confidence":"High"}"#,
        ),
        MockReply::text(
            "Of course! Here is the JSON you asked for: {\"suggested_fix\": \"Run npm install\\nCheck package.json\"}",
        ),
    ]);

    let report = service.analyze("build.log", FAILING_LOG).await.unwrap();

    assert_eq!(
        report.suggested_fix,
        vec!["Run npm install", "Check package.json"]
    );
    assert!(report
        .signals
        .contains(&"agent3:parsed_json=false".to_string()));
    assert!(report
        .signals
        .contains(&"agent3:best_effort_extract=true".to_string()));
}

#[tokio::test]
async fn test_fix_unrecoverable_prose_becomes_single_raw_block() {
    let (service, _runner) = service_with_replies(vec![
        MockReply::text(
            r#"{"error_type":"Timeout","root_cause":"job exceeded limit","confidence":"Medium"}"#,
        ),
        MockReply::text("Raise the job timeout.\nSplit the test suite."),
    ]);

    let report = service.analyze("build.log", FAILING_LOG).await.unwrap();

    // Raw fallback text still gets split into steps by the orchestrator.
    assert_eq!(
        report.suggested_fix,
        vec!["Raise the job timeout.", "Split the test suite."]
    );
    assert!(report
        .signals
        .contains(&"agent3:best_effort_extract=false".to_string()));
}

#[tokio::test]
async fn test_empty_log_fast_path_still_completes() {
    let (service, runner) = service_with_replies(vec![
        MockReply::text(
            r#"{"error_type":"Unknown","root_cause":"No log content provided.","confidence":"Low"}"#,
        ),
        MockReply::text(r#"{"suggested_fix": "Re-run the job with logging enabled"}"#),
    ]);

    let report = service.analyze("empty.log", "   \n  ").await.unwrap();

    assert_eq!(report.signals[0], "agent1:log_extractor");
    assert_eq!(report.signals[1], "agent1:empty_log");
    assert_eq!(
        report.suggested_fix,
        vec!["Re-run the job with logging enabled"]
    );
    // Both model calls ran against the empty block.
    assert_eq!(runner.remaining_replies(), 0);
}

#[tokio::test]
async fn test_truncation_drops_log_head() {
    let runner = Arc::new(MockRunner::new());
    runner.add_replies(vec![
        MockReply::text(
            r#"{"error_type":"Build Failure","root_cause":"late failure","confidence":"High"}"#,
        ),
        MockReply::text(r#"{"suggested_fix": "Inspect the final build step"}"#),
    ]);
    let service =
        AnalyzeService::with_max_input_chars(Arc::clone(&runner) as Arc<dyn TextRunner>, 200);

    let padding = "x".repeat(500);
    let log = format!("error: early failure\n{}\nerror: late failure\n", padding);
    service.analyze("build.log", &log).await.unwrap();

    let prompts = runner.recorded_prompts();
    // Only the tail survives truncation, so the early error never reaches the model.
    assert!(prompts[0].contains("error: late failure"));
    assert!(!prompts[0].contains("error: early failure"));
}

#[tokio::test]
async fn test_fallback_excerpt_when_no_error_lines() {
    let (service, runner) = service_with_replies(vec![
        MockReply::text(
            r#"{"error_type":"Unknown","root_cause":"nothing conclusive","confidence":"Low"}"#,
        ),
        MockReply::text(r#"{"suggested_fix": "Check the runner configuration"}"#),
    ]);

    let report = service
        .analyze("build.log", "step one ok\nstep two ok\nstep three ok\n")
        .await
        .unwrap();

    assert!(report
        .signals
        .contains(&"agent1:fallback_last_lines=200".to_string()));
    let prompts = runner.recorded_prompts();
    assert!(prompts[0].contains("step three ok"));
}

#[tokio::test]
async fn test_both_stages_degraded_still_produces_report() {
    let (service, _runner) = service_with_replies(vec![
        MockReply::text("total nonsense"),
        MockReply::text("more nonsense"),
    ]);

    let report = service.analyze("build.log", FAILING_LOG).await.unwrap();

    assert_eq!(report.error_type, "Unknown");
    assert_eq!(report.root_cause, "total nonsense");
    assert_eq!(report.suggested_fix, vec!["more nonsense"]);
    assert_eq!(
        report.signals,
        vec![
            "agent1:log_extractor",
            "agent1:found_error_lines=3",
            "agent2:root_cause",
            "agent2:parsed_json=false",
            "agent2:raw_fallback",
            "agent3:fix_suggester",
            "agent3:parsed_json=false",
            "agent3:raw_fallback",
            "agent3:best_effort_extract=false"
        ]
    );
}
