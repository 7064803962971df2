//! User feedback submissions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A full satisfaction submission for one answered query.
///
/// Append-only observational record: created on submission, never updated.
/// `score` is either on the 1–5 scale used by the feedback form or already
/// normalized to [0,1]; the recorder normalizes before emitting correctness
/// samples.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SatisfactionReport {
    pub session_id: String,
    pub account_number: Option<String>,
    /// Provider key the rated response came from.
    pub provider: String,
    /// Intent label of the rated response.
    pub intent: String,
    pub score: f64,
    pub feedback: Option<String>,
    pub was_helpful: Option<bool>,
    pub was_accurate: Option<bool>,
    pub submitted_at: DateTime<Utc>,
}
