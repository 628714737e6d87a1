//! Trace context carried across the asynchronous web request boundary.
//!
//! A web request is issued in one event handler and completes in a later one.
//! The submitting span's identifiers travel in the request context map so the
//! completion handler can re-parent its spans and both halves end up in the
//! same trace.

use serde::{Deserialize, Serialize};

/// OpenTelemetry identifiers of the span that issued a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceContext {
    /// OpenTelemetry trace ID as a hex string.
    pub trace_id: String,

    /// Span ID of the issuing span as a hex string.
    pub parent_span_id: String,
}

impl TraceContext {
    /// Captures the identifiers of the current tracing span.
    ///
    /// Returns `None` when no OpenTelemetry layer is installed or the span
    /// context is not valid (for example in unit tests).
    pub fn from_current() -> Option<Self> {
        use opentelemetry::trace::TraceContextExt;
        use tracing_opentelemetry::OpenTelemetrySpanExt;

        let otel_context = tracing::Span::current().context();
        let span_ref = otel_context.span();
        let span_context = span_ref.span_context();

        if !span_context.is_valid() {
            return None;
        }

        Some(Self {
            trace_id: format!("{:032x}", span_context.trace_id()),
            parent_span_id: format!("{:016x}", span_context.span_id()),
        })
    }

    /// Re-parents `span` under the span that issued the request.
    ///
    /// Takes precedence over the span's tracing parent, so it must be called
    /// before `span` is entered. Returns `false` if either identifier is not
    /// valid hex.
    pub fn set_parent_of(&self, span: &tracing::Span) -> bool {
        use opentelemetry::trace::{
            SpanContext, SpanId, TraceContextExt, TraceFlags, TraceId, TraceState,
        };
        use tracing_opentelemetry::OpenTelemetrySpanExt;

        let (Ok(trace_id), Ok(span_id)) = (
            TraceId::from_hex(&self.trace_id),
            SpanId::from_hex(&self.parent_span_id),
        ) else {
            return false;
        };

        let span_context = SpanContext::new(
            trace_id,
            span_id,
            TraceFlags::SAMPLED,
            true,
            TraceState::default(),
        );
        span.set_parent(opentelemetry::Context::new().with_remote_span_context(span_context));
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_context_without_otel_layer() {
        assert_eq!(TraceContext::from_current(), None);
    }

    #[test]
    fn test_set_parent_rejects_invalid_hex() {
        let context = TraceContext {
            trace_id: "not-hex".to_string(),
            parent_span_id: "0000000000000001".to_string(),
        };
        assert!(!context.set_parent_of(&tracing::Span::none()));
    }

    #[test]
    fn test_set_parent_accepts_valid_ids() {
        let context = TraceContext {
            trace_id: "4bf92f3577b34da6a3ce929d0e0e4736".to_string(),
            parent_span_id: "00f067aa0ba902b7".to_string(),
        };
        assert!(context.set_parent_of(&tracing::Span::none()));
    }
}
