//! Worker thread message types for cross-thread communication.
//!
//! Requests and responses between the plugin and the background worker that
//! reads passport files from the host filesystem. Messages travel as JSON, so
//! file contents are carried base64-encoded. Each request also carries the
//! caller's trace context so worker spans join the plugin's trace.

use crate::domain::error::{CheckerError, Result};
use serde::{Deserialize, Serialize};

/// Distributed tracing context for cross-thread span propagation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceContext {
    /// OpenTelemetry trace ID as a hex string.
    pub trace_id: String,

    /// Parent span ID for linking spans across threads.
    pub parent_span_id: String,
}

impl TraceContext {
    /// Creates a trace context from the current tracing span.
    ///
    /// Returns `None` if the current span has no valid OpenTelemetry context
    /// (for example when tracing was never initialised).
    #[must_use]
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
}

/// Generates constructors that attach the current trace context.
macro_rules! worker_message_builders {
    (
        $(
            $builder_name:ident($variant:ident { $($field:ident: $ty:ty),* $(,)? })
        ),* $(,)?
    ) => {
        impl WorkerMessage {
            $(
                #[doc = concat!("Create a ", stringify!($variant), " message with current trace context")]
                #[must_use]
                pub fn $builder_name($($field: $ty),*) -> Self {
                    Self::$variant {
                        $($field,)*
                        trace_context: TraceContext::from_current(),
                    }
                }
            )*
        }
    };
}

worker_message_builders! {
    load_file(LoadFile { path: String }),
}

/// Messages sent from the plugin to the worker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkerMessage {
    /// Read a passport image from the host filesystem.
    LoadFile {
        /// Path as typed by the user (`~` and relative paths allowed).
        path: String,

        #[serde(skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },
}

impl WorkerMessage {
    /// Parses a message posted by the plugin.
    ///
    /// # Errors
    ///
    /// Returns [`CheckerError::Worker`] if the payload is not a known message.
    pub fn decode(payload: &str) -> Result<Self> {
        serde_json::from_str(payload).map_err(|e| CheckerError::Worker(format!("bad worker message: {e}")))
    }

    #[must_use]
    pub fn trace_context(&self) -> Option<&TraceContext> {
        match self {
            Self::LoadFile { trace_context, .. } => trace_context.as_ref(),
        }
    }
}

/// Responses sent from the worker back to the plugin.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkerResponse {
    /// The file was read.
    FileLoaded {
        /// Path exactly as it was requested.
        path: String,
        /// File name without directories.
        name: String,
        /// Contents, base64-encoded.
        data_base64: String,
    },

    /// The file could not be used.
    FileUnreadable {
        /// Path exactly as it was requested.
        path: String,
        reason: String,
    },
}

impl WorkerResponse {
    /// Parses a response posted by the worker.
    ///
    /// # Errors
    ///
    /// Returns [`CheckerError::Worker`] if the payload is not a known response.
    pub fn decode(payload: &str) -> Result<Self> {
        serde_json::from_str(payload).map_err(|e| CheckerError::Worker(format!("bad worker response: {e}")))
    }
}

impl std::fmt::Debug for WorkerResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::FileLoaded {
                path,
                name,
                data_base64,
            } => f
                .debug_struct("FileLoaded")
                .field("path", path)
                .field("name", name)
                .field("encoded_len", &data_base64.len())
                .finish(),
            Self::FileUnreadable { path, reason } => f
                .debug_struct("FileUnreadable")
                .field("path", path)
                .field("reason", reason)
                .finish(),
        }
    }
}
