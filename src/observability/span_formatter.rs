//! OTLP JSON encoding of finished spans.
//!
//! Each call to [`SpanFormatter::format_batch`] yields one self-contained
//! `resourceSpans` document, so the trace file is newline-delimited OTLP JSON
//! that collectors and viewers can ingest line by line.

use opentelemetry::trace::{Event, Link, SpanId, SpanKind, Status};
use opentelemetry::{KeyValue, Value};
use opentelemetry_sdk::export::trace::SpanData;
use opentelemetry_sdk::resource::Resource;
use serde_json::{json, Value as JsonValue};
use std::time::{SystemTime, UNIX_EPOCH};

pub struct SpanFormatter {
    resource: Resource,
    scope: &'static str,
}

impl SpanFormatter {
    pub const fn new(resource: Resource, scope: &'static str) -> Self {
        Self { resource, scope }
    }

    /// Encodes `batch` under a single resource and instrumentation scope.
    ///
    /// ```json
    /// {"resourceSpans":[{"resource":{"attributes":[...]},
    ///   "scopeSpans":[{"scope":{"name":"SanctionCheck"},"spans":[...]}]}]}
    /// ```
    pub fn format_batch(&self, batch: &[SpanData]) -> JsonValue {
        let resource_attrs: Vec<JsonValue> = self
            .resource
            .iter()
            .map(|(key, value)| json!({ "key": key.to_string(), "value": attribute_value(value) }))
            .collect();

        let spans: Vec<JsonValue> = batch.iter().map(format_span).collect();

        json!({
            "resourceSpans": [{
                "resource": { "attributes": resource_attrs },
                "scopeSpans": [{
                    "scope": { "name": self.scope },
                    "spans": spans
                }]
            }]
        })
    }
}

impl std::fmt::Debug for SpanFormatter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpanFormatter")
            .field("scope", &self.scope)
            .finish_non_exhaustive()
    }
}

fn format_span(span: &SpanData) -> JsonValue {
    let parent = if span.parent_span_id == SpanId::INVALID {
        String::new()
    } else {
        format!("{:016x}", span.parent_span_id)
    };
    let (status_code, status_message) = status(&span.status);

    json!({
        "traceId": format!("{:032x}", span.span_context.trace_id()),
        "spanId": format!("{:016x}", span.span_context.span_id()),
        "parentSpanId": parent,
        "name": span.name,
        "kind": kind_code(&span.span_kind),
        "startTimeUnixNano": unix_nanos(span.start_time),
        "endTimeUnixNano": unix_nanos(span.end_time),
        "attributes": attributes(&span.attributes),
        "events": span.events.iter().map(format_event).collect::<Vec<_>>(),
        "links": span.links.iter().map(format_link).collect::<Vec<_>>(),
        "status": { "code": status_code, "message": status_message },
    })
}

fn format_event(event: &Event) -> JsonValue {
    json!({
        "timeUnixNano": unix_nanos(event.timestamp),
        "name": event.name,
        "attributes": attributes(&event.attributes),
    })
}

fn format_link(link: &Link) -> JsonValue {
    json!({
        "traceId": format!("{:032x}", link.span_context.trace_id()),
        "spanId": format!("{:016x}", link.span_context.span_id()),
        "attributes": attributes(&link.attributes),
    })
}

/// OTLP encodes 64-bit timestamps as decimal strings.
fn unix_nanos(time: SystemTime) -> String {
    time.duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or_default()
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

fn status(status: &Status) -> (u8, String) {
    match status {
        Status::Unset => (0, String::new()),
        Status::Ok => (1, String::new()),
        Status::Error { description } => (2, description.to_string()),
    }
}

fn attributes(attributes: &[KeyValue]) -> Vec<JsonValue> {
    attributes
        .iter()
        .map(|kv| json!({ "key": kv.key.to_string(), "value": attribute_value(&kv.value) }))
        .collect()
}

fn attribute_value(value: &Value) -> JsonValue {
    match value {
        Value::Bool(b) => json!({ "boolValue": b }),
        Value::I64(i) => json!({ "intValue": i.to_string() }),
        Value::F64(f) => json!({ "doubleValue": f }),
        Value::String(s) => json!({ "stringValue": s.to_string() }),
        Value::Array(_) => json!({ "stringValue": value.to_string() }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attribute_values_use_otlp_keys() {
        assert_eq!(attribute_value(&Value::I64(503)), json!({ "intValue": "503" }));
        assert_eq!(attribute_value(&Value::Bool(true)), json!({ "boolValue": true }));
        assert_eq!(
            attribute_value(&Value::from("check")),
            json!({ "stringValue": "check" })
        );
    }

    #[test]
    fn empty_batch_still_carries_resource_and_scope() {
        let resource = Resource::new(vec![KeyValue::new("service.name", "SanctionCheck")]);
        let doc = SpanFormatter::new(resource, "SanctionCheck").format_batch(&[]);

        let group = &doc["resourceSpans"][0];
        assert_eq!(group["scopeSpans"][0]["scope"]["name"], "SanctionCheck");
        assert_eq!(group["scopeSpans"][0]["spans"], json!([]));
        let attrs = group["resource"]["attributes"].as_array().unwrap();
        assert!(attrs.iter().any(|a| a["key"] == "service.name"
            && a["value"]["stringValue"] == "SanctionCheck"));
    }

    #[test]
    fn timestamps_are_decimal_nanoseconds() {
        assert_eq!(unix_nanos(UNIX_EPOCH), "0");
        assert_eq!(
            unix_nanos(UNIX_EPOCH + std::time::Duration::from_millis(1)),
            "1000000"
        );
    }
}
