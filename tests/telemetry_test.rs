use opentelemetry::metrics::MeterProvider as _;
use opentelemetry_sdk::metrics::SdkMeterProvider;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use teller_rs::telemetry::genai::{CallOutcome, LlmTelemetry};
use teller_rs::telemetry::metrics::AgentMetrics;
use tracing::Subscriber;
use tracing::span::{Attributes, Id};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt as _};
use tracing_subscriber::registry::LookupSpan;

/// Counts span opens and closes so tests can assert that every call context
/// ends its span exactly once.
#[derive(Clone, Default)]
struct SpanCounter {
    opened: Arc<AtomicUsize>,
    closed: Arc<AtomicUsize>,
}

impl<S: Subscriber + for<'a> LookupSpan<'a>> Layer<S> for SpanCounter {
    fn on_new_span(&self, _attrs: &Attributes<'_>, _id: &Id, _ctx: Context<'_, S>) {
        self.opened.fetch_add(1, Ordering::SeqCst);
    }

    fn on_close(&self, _id: Id, _ctx: Context<'_, S>) {
        self.closed.fetch_add(1, Ordering::SeqCst);
    }
}

fn test_telemetry() -> LlmTelemetry {
    // Reader-less provider: instruments resolve, samples go nowhere.
    let meter = SdkMeterProvider::builder().build().meter("test");
    LlmTelemetry::new(Arc::new(AgentMetrics::new(&meter)))
}

#[tokio::test]
async fn every_call_closes_exactly_one_span() {
    let counter = SpanCounter::default();
    let subscriber = tracing_subscriber::registry().with(counter.clone());
    let _guard = tracing::subscriber::set_default(subscriber);

    let telemetry = test_telemetry();
    let calls = 16;

    // Open all contexts first so their lifetimes overlap, then drive them
    // to completion out of order.
    let mut in_flight = Vec::new();
    for i in 0..calls {
        let mut call = telemetry.start_call("ollama", "llama3.2", "classify_intent");
        call.record_prompt(&format!("prompt number {i}"), Some(0.7), None);
        in_flight.push(call);
        tokio::task::yield_now().await;
    }

    assert_eq!(counter.opened.load(Ordering::SeqCst), calls);
    assert_eq!(counter.closed.load(Ordering::SeqCst), 0);

    while let Some(mut call) = in_flight.pop() {
        call.record_completion("a perfectly fine answer", "stop");
        call.finish(CallOutcome::Success);
        tokio::task::yield_now().await;
    }

    assert_eq!(counter.opened.load(Ordering::SeqCst), calls);
    assert_eq!(counter.closed.load(Ordering::SeqCst), calls);
}

#[tokio::test]
async fn failed_calls_still_close_their_span() {
    let counter = SpanCounter::default();
    let subscriber = tracing_subscriber::registry().with(counter.clone());
    let _guard = tracing::subscriber::set_default(subscriber);

    let telemetry = test_telemetry();
    let mut call = telemetry.start_call("openai", "gpt-4", "generate_response");
    call.record_prompt("tell me about fees", Some(0.7), None);
    call.finish(CallOutcome::Error("connection refused".to_string()));

    assert_eq!(counter.opened.load(Ordering::SeqCst), 1);
    assert_eq!(counter.closed.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn dropped_call_without_finish_closes_its_span() {
    let counter = SpanCounter::default();
    let subscriber = tracing_subscriber::registry().with(counter.clone());
    let _guard = tracing::subscriber::set_default(subscriber);

    let telemetry = test_telemetry();
    {
        let _call = telemetry.start_call("ollama", "llama3.2", "classify_intent");
    }

    assert_eq!(counter.opened.load(Ordering::SeqCst), 1);
    assert_eq!(counter.closed.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn prompt_and_completion_attributes_are_set_once() {
    let telemetry = test_telemetry();
    let mut call = telemetry.start_call("ollama", "llama3.2", "generate_response");

    call.record_prompt("12345678", Some(0.7), None);
    assert_eq!(call.prompt_tokens(), Some(2));
    // Second recording is ignored, not overwritten.
    call.record_prompt(&"x".repeat(400), Some(0.2), Some(64));
    assert_eq!(call.prompt_tokens(), Some(2));

    call.record_completion("abcd", "stop");
    assert_eq!(call.completion_tokens(), Some(1));
    call.record_completion(&"y".repeat(4000), "length");
    assert_eq!(call.completion_tokens(), Some(1));

    call.finish(CallOutcome::Success);
}

#[tokio::test]
async fn completion_before_prompt_does_not_panic() {
    let telemetry = test_telemetry();
    let mut call = telemetry.start_call("ollama", "llama3.2", "generate_response");
    call.record_completion("out-of-order response", "stop");
    assert_eq!(call.prompt_tokens(), None);
    assert!(call.completion_tokens().is_some());
    call.finish(CallOutcome::Success);
}
