//! Business-operation span helpers.
//!
//! One `banking.process_request` span wraps each inbound query end to end;
//! business events are short spans with a tracing event inside, so they
//! show up in both the trace tree and the log stream.

use crate::model::{Intent, ResponseStatus};
use tracing::Span;

/// Start the span for one banking request.
///
/// Intent and status are not known yet — declared empty and recorded via
/// [`record_intent`] / [`record_status`].
pub fn start_request_span(provider: &str, account: Option<&str>) -> Span {
    tracing::info_span!(
        "banking.process_request",
        "banking.provider" = provider,
        "banking.account" = account.unwrap_or("none"),
        "banking.intent" = tracing::field::Empty,
        "banking.response_status" = tracing::field::Empty,
        "error.message" = tracing::field::Empty,
        "otel.status_code" = tracing::field::Empty,
    )
}

pub fn record_intent(span: &Span, intent: Intent) {
    span.record("banking.intent", intent.as_str());
}

pub fn record_status(span: &Span, status: ResponseStatus) {
    span.record("banking.response_status", status.as_str());
}

/// Mark the request span failed with the given cause.
pub fn record_failure(span: &Span, cause: &str) {
    span.record("error.message", cause);
    span.record("otel.status_code", "ERROR");
}

/// Emit one business event with a fixed attribute set.
///
/// Tracing spans cannot take dynamic field names, so the attributes ride
/// the event payload rather than individual span fields.
pub fn record_business_event(event_type: &str, attributes: &[(&str, &str)]) {
    let span = tracing::info_span!("banking.business_event", "event.type" = event_type);
    span.in_scope(|| {
        tracing::info!(event_type, ?attributes, "business event");
    });
}
