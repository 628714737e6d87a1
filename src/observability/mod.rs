//! OpenTelemetry tracing with file-based export.
//!
//! ```text
//! tracing macros → tracing-opentelemetry → SDK tracer provider
//!                → FileSpanExporter → RotatingWriter → hnpane-otlp.json
//! ```
//!
//! Spans are written as OTLP/JSON lines to
//! `~/.local/share/zellij/hnpane/hnpane-otlp.json`, rotated at 10 MB with three
//! numbered backups. The level comes from the `trace_level` plugin option
//! (default `"info"`).
//!
//! Fetch requests carry the active trace context in their web request context
//! map (see [`TraceContext`](crate::fetch::TraceContext)), so the span that
//! handles a completion is parented to the span that submitted the query.
//!
//! # Modules
//!
//! - `init`: Subscriber setup
//! - `exporter`: Span exporter and OTLP/JSON encoding
//! - `rotation`: Size-rotated line writer

mod exporter;
mod init;
mod rotation;

pub use init::{init_tracing, TRACE_FILE_NAME};

#[cfg(test)]
mod tests {
    use crate::app::{handle_event, Action, AppState, Event};
    use crate::domain::SearchResult;
    use crate::ui::Theme;
    use opentelemetry::trace::TracerProvider as _;
    use opentelemetry_sdk::resource::Resource;
    use tracing_subscriber::layer::SubscriberExt;

    fn exported_spans(path: &std::path::Path) -> Vec<serde_json::Value> {
        std::fs::read_to_string(path)
            .unwrap()
            .lines()
            .flat_map(|line| {
                let batch: serde_json::Value = serde_json::from_str(line).unwrap();
                batch["resourceSpans"][0]["scopeSpans"][0]["spans"]
                    .as_array()
                    .cloned()
                    .unwrap_or_default()
            })
            .collect()
    }

    #[test]
    fn test_completion_joins_submitting_trace_under_update_span() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(super::TRACE_FILE_NAME);
        let provider = super::exporter::create_tracer_provider(path.clone(), Resource::empty());
        let subscriber = tracing_subscriber::registry()
            .with(tracing_opentelemetry::layer().with_tracer(provider.tracer("hnpane")));

        let request = tracing::subscriber::with_default(subscriber, || {
            let mut state = AppState::new("", Theme::default());

            let request = {
                let _update = tracing::debug_span!("plugin_update_event").entered();
                let (_, actions) = handle_event(
                    &mut state,
                    &Event::SubmitQuery {
                        term: "tampa".to_string(),
                    },
                )
                .unwrap();
                match actions.into_iter().next() {
                    Some(Action::Fetch(request)) => request,
                    other => panic!("expected a fetch, got {other:?}"),
                }
            };

            let _update = tracing::debug_span!("plugin_update_event").entered();
            handle_event(
                &mut state,
                &Event::FetchCompleted {
                    request: Some(request.clone()),
                    outcome: Ok(SearchResult {
                        hits: vec![],
                        page: 0,
                        nb_pages: None,
                    }),
                },
            )
            .unwrap();
            request
        });

        let parent = request.trace_context.expect("submission captures a trace context");
        let spans = exported_spans(&path);
        let completion = spans
            .iter()
            .find(|span| {
                span["name"] == "handle_event" && span["parentSpanId"] == parent.parent_span_id
            })
            .expect("completion span is parented to the submitting span");
        assert_eq!(completion["traceId"], parent.trace_id);
    }
}
