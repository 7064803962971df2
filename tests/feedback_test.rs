use chrono::Utc;
use opentelemetry::metrics::MeterProvider as _;
use opentelemetry_sdk::metrics::SdkMeterProvider;
use std::sync::Arc;
use teller_rs::feedback::{FeedbackRecorder, normalize_score};
use teller_rs::model::SatisfactionReport;
use teller_rs::telemetry::metrics::AgentMetrics;

fn recorder() -> FeedbackRecorder {
    let meter = SdkMeterProvider::builder().build().meter("test");
    FeedbackRecorder::new(Arc::new(AgentMetrics::new(&meter)))
}

#[test]
fn scores_normalize_onto_the_unit_interval() {
    // Five-star scale.
    assert!((normalize_score(4.5) - 0.9).abs() < 1e-12);
    assert!((normalize_score(5.0) - 1.0).abs() < 1e-12);
    assert!((normalize_score(1.5) - 0.3).abs() < 1e-12);
    // Already normalized.
    assert_eq!(normalize_score(1.0), 1.0);
    assert_eq!(normalize_score(0.42), 0.42);
    // Out of range in either direction clamps.
    assert_eq!(normalize_score(-3.0), 0.0);
    assert_eq!(normalize_score(25.0), 1.0);
}

#[test]
fn satisfaction_report_records_without_error() {
    let recorder = recorder();
    recorder.record_satisfaction(&SatisfactionReport {
        session_id: "sess-1".to_string(),
        account_number: Some("ACC001".to_string()),
        provider: "ollama".to_string(),
        intent: "CHECK_BALANCE".to_string(),
        score: 4.0,
        feedback: Some("quick and clear".to_string()),
        was_helpful: Some(true),
        was_accurate: Some(true),
        submitted_at: Utc::now(),
    });
}

#[test]
fn quick_feedback_and_issues_record_without_error() {
    let recorder = recorder();
    recorder.record_quick_feedback("sess-2", "openai", "GENERAL_INQUIRY", true);
    recorder.record_quick_feedback("sess-2", "openai", "GENERAL_INQUIRY", false);
    recorder.record_issue(
        "sess-3",
        "ollama",
        "VIEW_TRANSACTIONS",
        "wrong_amounts",
        Some("summary listed a deposit that never happened"),
    );
    recorder.record_issue("sess-4", "ollama", "GENERAL_INQUIRY", "other", None);
}
