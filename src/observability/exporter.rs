//! File-backed OpenTelemetry span exporter.
//!
//! Each exported batch becomes one line of OTLP/JSON (`resourceSpans` →
//! `scopeSpans` → `spans`) appended to a [`RotatingWriter`].

use super::rotation::RotatingWriter;
use futures_util::future::BoxFuture;
use opentelemetry::trace::{SpanId, SpanKind, Status, TraceError};
use opentelemetry::{KeyValue, Value};
use opentelemetry_sdk::export::trace::{ExportResult, SpanData, SpanExporter};
use opentelemetry_sdk::resource::Resource;
use opentelemetry_sdk::trace::TracerProvider;
use serde::Serialize;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

/// Instrumentation scope recorded on every exported batch.
const SCOPE_NAME: &str = "hnpane";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TraceBatch {
    resource_spans: Vec<ResourceSpans>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ResourceSpans {
    resource: ResourceRecord,
    scope_spans: Vec<ScopeSpans>,
}

#[derive(Serialize)]
struct ResourceRecord {
    attributes: Vec<Attribute>,
}

#[derive(Serialize)]
struct ScopeSpans {
    scope: Scope,
    spans: Vec<SpanRecord>,
}

#[derive(Serialize)]
struct Scope {
    name: &'static str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SpanRecord {
    trace_id: String,
    span_id: String,
    parent_span_id: String,
    name: String,
    kind: u8,
    start_time_unix_nano: String,
    end_time_unix_nano: String,
    attributes: Vec<Attribute>,
    events: Vec<EventRecord>,
    status: StatusRecord,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct EventRecord {
    time_unix_nano: String,
    name: String,
    attributes: Vec<Attribute>,
}

#[derive(Serialize)]
struct StatusRecord {
    code: u8,
    message: String,
}

#[derive(Debug, Serialize, PartialEq)]
struct Attribute {
    key: String,
    value: AnyValue,
}

/// OTLP `AnyValue`, serialized as `{"stringValue": "..."}` and friends.
#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
enum AnyValue {
    BoolValue(bool),
    /// OTLP/JSON encodes 64-bit integers as strings.
    IntValue(String),
    DoubleValue(f64),
    StringValue(String),
}

impl From<&Value> for AnyValue {
    fn from(value: &Value) -> Self {
        match value {
            Value::Bool(b) => Self::BoolValue(*b),
            Value::I64(i) => Self::IntValue(i.to_string()),
            Value::F64(f) => Self::DoubleValue(*f),
            Value::String(s) => Self::StringValue(s.to_string()),
            Value::Array(_) => Self::StringValue(value.to_string()),
        }
    }
}

fn attributes(pairs: &[KeyValue]) -> Vec<Attribute> {
    pairs
        .iter()
        .map(|kv| Attribute {
            key: kv.key.to_string(),
            value: AnyValue::from(&kv.value),
        })
        .collect()
}

fn unix_nanos(time: SystemTime) -> String {
    time.duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| elapsed.as_nanos())
        .to_string()
}

const fn kind_code(kind: &SpanKind) -> u8 {
    match kind {
        SpanKind::Internal => 1,
        SpanKind::Server => 2,
        SpanKind::Client => 3,
        SpanKind::Producer => 4,
        SpanKind::Consumer => 5,
    }
}

impl From<&SpanData> for SpanRecord {
    fn from(span: &SpanData) -> Self {
        let parent_span_id = if span.parent_span_id == SpanId::INVALID {
            String::new()
        } else {
            format!("{:016x}", span.parent_span_id)
        };
        let status = match &span.status {
            Status::Unset => StatusRecord { code: 0, message: String::new() },
            Status::Ok => StatusRecord { code: 1, message: String::new() },
            Status::Error { description } => StatusRecord {
                code: 2,
                message: description.to_string(),
            },
        };

        Self {
            trace_id: format!("{:032x}", span.span_context.trace_id()),
            span_id: format!("{:016x}", span.span_context.span_id()),
            parent_span_id,
            name: span.name.to_string(),
            kind: kind_code(&span.span_kind),
            start_time_unix_nano: unix_nanos(span.start_time),
            end_time_unix_nano: unix_nanos(span.end_time),
            attributes: attributes(&span.attributes),
            events: span
                .events
                .iter()
                .map(|event| EventRecord {
                    time_unix_nano: unix_nanos(event.timestamp),
                    name: event.name.to_string(),
                    attributes: attributes(&event.attributes),
                })
                .collect(),
            status,
        }
    }
}

/// Span exporter appending OTLP/JSON lines to a rotating file.
#[derive(Debug)]
struct FileSpanExporter {
    writer: RotatingWriter,
    resource_attributes: Vec<KeyValue>,
    is_shutdown: bool,
}

impl FileSpanExporter {
    fn new(file_path: PathBuf, resource: &Resource) -> Self {
        let mut exporter = Self {
            writer: RotatingWriter::new(file_path),
            resource_attributes: Vec::new(),
            is_shutdown: false,
        };
        exporter.set_resource(resource);
        exporter
    }

    fn encode(&self, batch: &[SpanData]) -> serde_json::Result<String> {
        let document = TraceBatch {
            resource_spans: vec![ResourceSpans {
                resource: ResourceRecord {
                    attributes: attributes(&self.resource_attributes),
                },
                scope_spans: vec![ScopeSpans {
                    scope: Scope { name: SCOPE_NAME },
                    spans: batch.iter().map(SpanRecord::from).collect(),
                }],
            }],
        };
        serde_json::to_string(&document)
    }
}

impl SpanExporter for FileSpanExporter {
    fn export(&mut self, batch: Vec<SpanData>) -> BoxFuture<'static, ExportResult> {
        if self.is_shutdown {
            return Box::pin(std::future::ready(Err(TraceError::from(
                "exporter is shut down",
            ))));
        }

        let result = self
            .encode(&batch)
            .map_err(|e| TraceError::from(e.to_string()))
            .and_then(|line| {
                self.writer
                    .write_line(&line)
                    .map_err(|e| TraceError::from(e.to_string()))
            });

        Box::pin(std::future::ready(result))
    }

    fn shutdown(&mut self) {
        self.is_shutdown = true;
    }

    fn set_resource(&mut self, res: &Resource) {
        self.resource_attributes = res
            .iter()
            .map(|(key, value)| KeyValue::new(key.clone(), value.clone()))
            .collect();
    }
}

/// Builds a tracer provider whose spans are written to `file_path` as they end.
pub fn create_tracer_provider(file_path: PathBuf, resource: Resource) -> TracerProvider {
    let exporter = FileSpanExporter::new(file_path, &resource);

    TracerProvider::builder()
        .with_config(opentelemetry_sdk::trace::Config::default().with_resource(resource))
        .with_simple_exporter(exporter)
        .build()
}
