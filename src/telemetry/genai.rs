//! Call instrumentation context for LLM completions.
//!
//! One [`LlmCall`] per completion call: opened by
//! [`LlmTelemetry::start_call`], fed prompt/completion/domain attributes as
//! the call progresses, and closed exactly once by [`LlmCall::finish`] —
//! which takes the context by value, so a double finish does not compile.
//! Dropping an unfinished context still closes the span (panic safety).
//!
//! Span attributes follow the OpenTelemetry GenAI semantic conventions
//! (`gen_ai.*`) plus a few `llm.*` and `banking.*` extensions. All emission
//! here is best-effort: nothing in this module can fail the business call
//! it observes.

use crate::telemetry::estimate::{estimate_cost, estimate_tokens, normalize_provider};
use crate::telemetry::metrics::AgentMetrics;
use std::sync::Arc;
use std::time::Instant;
use tracing::Span;

/// Factory for instrumented LLM calls. Cheap to clone via the shared
/// metrics handle; construct once and hand to every component that makes
/// completion calls.
pub struct LlmTelemetry {
    metrics: Arc<AgentMetrics>,
}

impl LlmTelemetry {
    pub fn new(metrics: Arc<AgentMetrics>) -> Self {
        Self { metrics }
    }

    pub fn metrics(&self) -> &Arc<AgentMetrics> {
        &self.metrics
    }

    /// Open the span for one completion call and count the request.
    ///
    /// Attributes recorded later must be declared here — tracing spans only
    /// accept fields named at creation.
    pub fn start_call(&self, provider: &str, model: &str, operation: &str) -> LlmCall {
        let span = tracing::info_span!(
            "gen_ai.chat.completions",
            "gen_ai.provider.name" = %normalize_provider(provider),
            "gen_ai.request.model" = model,
            "gen_ai.operation.name" = operation,
            "gen_ai.request.temperature" = tracing::field::Empty,
            "gen_ai.request.max_tokens" = tracing::field::Empty,
            "gen_ai.usage.input_tokens" = tracing::field::Empty,
            "gen_ai.usage.output_tokens" = tracing::field::Empty,
            "gen_ai.response.finish_reasons" = tracing::field::Empty,
            "llm.prompt.length" = tracing::field::Empty,
            "llm.response.length" = tracing::field::Empty,
            "llm.total.tokens" = tracing::field::Empty,
            "llm.latency_ms" = tracing::field::Empty,
            "llm.cost.usd" = tracing::field::Empty,
            "banking.intent" = tracing::field::Empty,
            "banking.account" = tracing::field::Empty,
            "error.message" = tracing::field::Empty,
            "otel.status_code" = tracing::field::Empty,
        );

        self.metrics.record_request(provider, model);

        LlmCall {
            span,
            started: Instant::now(),
            provider: provider.to_string(),
            model: model.to_string(),
            prompt_tokens: None,
            completion_tokens: None,
            metrics: Arc::clone(&self.metrics),
        }
    }
}

/// Outcome of one completion call, as seen by the instrumentation.
#[derive(Debug)]
pub enum CallOutcome {
    Success,
    Error(String),
}

/// Short-lived instrumentation state for one in-flight completion call.
///
/// Single-writer: owned by the call path that created it, never shared.
pub struct LlmCall {
    span: Span,
    started: Instant,
    provider: String,
    model: String,
    prompt_tokens: Option<u64>,
    completion_tokens: Option<u64>,
    metrics: Arc<AgentMetrics>,
}

impl LlmCall {
    /// The call span, for `.instrument(...)`-ing the outbound request so
    /// the round trip is timed inside it.
    pub fn span(&self) -> &Span {
        &self.span
    }

    /// Record prompt attributes and the prompt token estimate. Set at most
    /// once; a second call is ignored.
    pub fn record_prompt(&mut self, text: &str, temperature: Option<f32>, max_tokens: Option<u32>) {
        if self.prompt_tokens.is_some() {
            tracing::debug!("prompt already recorded for this call, ignoring");
            return;
        }
        let tokens = estimate_tokens(text);
        self.prompt_tokens = Some(tokens);
        self.span.record("llm.prompt.length", text.len() as u64);
        self.span.record("gen_ai.usage.input_tokens", tokens);
        if let Some(t) = temperature {
            self.span.record("gen_ai.request.temperature", t as f64);
        }
        if let Some(m) = max_tokens {
            self.span.record("gen_ai.request.max_tokens", u64::from(m));
        }
    }

    /// Record completion attributes: response length, token estimates,
    /// latency so far, finish reason, and the estimated cost. Set at most
    /// once; a second call is ignored.
    pub fn record_completion(&mut self, text: &str, finish_reason: &str) {
        if self.completion_tokens.is_some() {
            tracing::debug!("completion already recorded for this call, ignoring");
            return;
        }
        let tokens = estimate_tokens(text);
        self.completion_tokens = Some(tokens);
        let prompt_tokens = self.prompt_tokens.unwrap_or(0);

        self.span.record("llm.response.length", text.len() as u64);
        self.span.record("gen_ai.usage.output_tokens", tokens);
        self.span.record("llm.total.tokens", prompt_tokens + tokens);
        self.span
            .record("gen_ai.response.finish_reasons", finish_reason);
        self.span
            .record("llm.latency_ms", self.started.elapsed().as_millis() as u64);

        let cost = estimate_cost(&self.provider, prompt_tokens, tokens);
        if cost.total() > 0.0 {
            self.span.record("llm.cost.usd", cost.total());
        }
    }

    /// Attach the classified intent and account reference.
    pub fn record_domain_context(&self, intent: &str, account: Option<&str>) {
        self.span.record("banking.intent", intent);
        if let Some(account) = account {
            self.span.record("banking.account", account);
        }
    }

    pub fn prompt_tokens(&self) -> Option<u64> {
        self.prompt_tokens
    }

    pub fn completion_tokens(&self) -> Option<u64> {
        self.completion_tokens
    }

    /// Close the call: set the final span status, update the error and
    /// token counters, and record the response-time sample. Consumes the
    /// context — the span ends exactly once, when `self` drops at the end
    /// of this method.
    pub fn finish(self, outcome: CallOutcome) {
        let elapsed = self.started.elapsed();
        self.metrics.record_response_time(
            elapsed.as_secs_f64() * 1000.0,
            &self.provider,
            &self.model,
        );

        match outcome {
            CallOutcome::Success => {
                self.span.record("otel.status_code", "OK");
                let total =
                    self.prompt_tokens.unwrap_or(0) + self.completion_tokens.unwrap_or(0);
                if total > 0 {
                    self.metrics.add_tokens(total, &self.provider, &self.model);
                }
                tracing::debug!(
                    provider = %self.provider,
                    model = %self.model,
                    latency_ms = elapsed.as_millis() as u64,
                    "completion call finished"
                );
            }
            CallOutcome::Error(cause) => {
                self.span.record("error.message", cause.as_str());
                self.span.record("otel.status_code", "ERROR");
                self.metrics.record_error(&self.provider, &self.model);
                tracing::error!(
                    provider = %self.provider,
                    model = %self.model,
                    %cause,
                    "completion call failed"
                );
            }
        }
    }
}
