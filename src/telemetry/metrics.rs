//! Metric instruments for the agent.
//!
//! Built from an injected [`Meter`] at construction time — there is no
//! global registry. Dimensions stay bounded: provider, model, and intent
//! only.

use opentelemetry::KeyValue;
use opentelemetry::metrics::{Counter, Gauge, Histogram, Meter};

pub struct AgentMetrics {
    requests: Counter<u64>,
    errors: Counter<u64>,
    tokens: Counter<u64>,
    response_time_ms: Histogram<f64>,
    correctness: Gauge<f64>,
    feedback_submissions: Counter<u64>,
}

impl AgentMetrics {
    pub fn new(meter: &Meter) -> Self {
        Self {
            requests: meter
                .u64_counter("teller.llm.requests")
                .with_description("Number of LLM completion calls started")
                .build(),
            errors: meter
                .u64_counter("teller.llm.errors")
                .with_description("Number of failed LLM completion calls")
                .build(),
            tokens: meter
                .u64_counter("teller.llm.tokens")
                .with_description("Estimated LLM tokens consumed")
                .build(),
            response_time_ms: meter
                .f64_histogram("teller.llm.response_time_ms")
                .with_description("LLM completion call duration in milliseconds")
                .with_unit("ms")
                .build(),
            correctness: meter
                .f64_gauge("teller.llm.correctness_score")
                .with_description("Latest correctness score derived from user feedback, 0..1")
                .build(),
            feedback_submissions: meter
                .u64_counter("teller.feedback.submissions")
                .with_description("Number of user feedback submissions")
                .build(),
        }
    }

    pub fn record_request(&self, provider: &str, model: &str) {
        self.requests.add(1, &dims(provider, model));
    }

    pub fn record_error(&self, provider: &str, model: &str) {
        self.errors.add(1, &dims(provider, model));
    }

    pub fn add_tokens(&self, count: u64, provider: &str, model: &str) {
        self.tokens.add(count, &dims(provider, model));
    }

    pub fn record_response_time(&self, millis: f64, provider: &str, model: &str) {
        self.response_time_ms.record(millis, &dims(provider, model));
    }

    pub fn record_correctness(&self, score: f64, provider: &str, intent: &str) {
        self.correctness.record(
            score,
            &[
                KeyValue::new("provider", provider.to_string()),
                KeyValue::new("intent", intent.to_string()),
            ],
        );
    }

    pub fn record_feedback_submission(&self, kind: &str) {
        self.feedback_submissions
            .add(1, &[KeyValue::new("kind", kind.to_string())]);
    }
}

fn dims(provider: &str, model: &str) -> [KeyValue; 2] {
    [
        KeyValue::new("provider", provider.to_string()),
        KeyValue::new("model", model.to_string()),
    ]
}
