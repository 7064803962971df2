//! User feedback intake: satisfaction scores, quick thumbs, and issue
//! reports, folded into the correctness gauge and feedback counters.
//!
//! Recording is infallible and side-effect only. Feedback that cannot be
//! attributed perfectly is still worth counting, so nothing here validates
//! session or account references.

use crate::model::SatisfactionReport;
use crate::telemetry::metrics::AgentMetrics;
use crate::telemetry::request::record_business_event;
use std::sync::Arc;
use tracing::{info, warn};

/// Fold a raw satisfaction score into the 0..1 range.
///
/// Scores above 1.0 are taken to be on the familiar five-star scale and
/// divided by 5; anything already in range passes through. The result is
/// clamped so out-of-range input cannot distort the gauge.
pub fn normalize_score(score: f64) -> f64 {
    if score > 1.0 {
        (score / 5.0).clamp(0.0, 1.0)
    } else {
        score.max(0.0)
    }
}

pub struct FeedbackRecorder {
    metrics: Arc<AgentMetrics>,
}

impl FeedbackRecorder {
    pub fn new(metrics: Arc<AgentMetrics>) -> Self {
        Self { metrics }
    }

    /// Record a full satisfaction report.
    pub fn record_satisfaction(&self, report: &SatisfactionReport) {
        let score = normalize_score(report.score);
        self.metrics
            .record_correctness(score, &report.provider, &report.intent);
        self.metrics.record_feedback_submission("satisfaction");

        let helpful = report.was_helpful.map(|b| b.to_string());
        let accurate = report.was_accurate.map(|b| b.to_string());
        let score_text = format!("{score:.3}");
        record_business_event(
            "user_satisfaction_submitted",
            &[
                ("session", report.session_id.as_str()),
                ("account", report.account_number.as_deref().unwrap_or("none")),
                ("provider", report.provider.as_str()),
                ("intent", report.intent.as_str()),
                ("score", score_text.as_str()),
                ("helpful", helpful.as_deref().unwrap_or("unknown")),
                ("accurate", accurate.as_deref().unwrap_or("unknown")),
            ],
        );
        info!(
            session = %report.session_id,
            provider = %report.provider,
            intent = %report.intent,
            score,
            "satisfaction feedback recorded"
        );
    }

    /// Record a one-tap helpful / not-helpful signal. Helpful maps to a
    /// score of 1.0, not helpful to 0.0.
    pub fn record_quick_feedback(
        &self,
        session_id: &str,
        provider: &str,
        intent: &str,
        helpful: bool,
    ) {
        let score = if helpful { 1.0 } else { 0.0 };
        self.metrics.record_correctness(score, provider, intent);
        self.metrics.record_feedback_submission("quick");

        record_business_event(
            "quick_feedback_submitted",
            &[
                ("session", session_id),
                ("provider", provider),
                ("intent", intent),
                ("helpful", if helpful { "true" } else { "false" }),
            ],
        );
        info!(session = session_id, provider, intent, helpful, "quick feedback recorded");
    }

    /// Record a reported problem with a response. Always scores 0.0: an
    /// issue report is a correctness failure by definition.
    pub fn record_issue(
        &self,
        session_id: &str,
        provider: &str,
        intent: &str,
        issue_type: &str,
        description: Option<&str>,
    ) {
        self.metrics.record_correctness(0.0, provider, intent);
        self.metrics.record_feedback_submission("issue");

        record_business_event(
            "issue_reported",
            &[
                ("session", session_id),
                ("provider", provider),
                ("intent", intent),
                ("issue_type", issue_type),
                ("description", description.unwrap_or("")),
            ],
        );
        warn!(
            session = session_id,
            provider, intent, issue_type, "issue reported by user"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn five_star_scores_are_rescaled() {
        assert!((normalize_score(4.5) - 0.9).abs() < 1e-12);
        assert!((normalize_score(5.0) - 1.0).abs() < 1e-12);
        assert!((normalize_score(2.0) - 0.4).abs() < 1e-12);
    }

    #[test]
    fn unit_scores_pass_through() {
        assert_eq!(normalize_score(1.0), 1.0);
        assert_eq!(normalize_score(0.5), 0.5);
        assert_eq!(normalize_score(0.0), 0.0);
    }

    #[test]
    fn out_of_range_scores_are_clamped() {
        assert_eq!(normalize_score(-0.2), 0.0);
        assert_eq!(normalize_score(7.0), 1.0);
    }
}
