//! Span export to a local OTLP JSON file.
//!
//! The plugin runs inside Zellij's WASI sandbox with no collector to talk to,
//! so spans are serialized and appended to a file in the plugin data
//! directory:
//!
//! ```text
//! tracing macros → tracing-opentelemetry → FileSpanExporter → sanction-check-otlp.json
//! ```
//!
//! The filter comes from the `trace_level` configuration key and defaults to
//! `info`. Every check request, capture command and worker round trip runs
//! inside a span, so a slow or failing check can be followed end to end.
//!
//! ```rust
//! use sanction_check::observability::init_tracing;
//! use sanction_check::Config;
//!
//! init_tracing(&Config::default());
//! tracing::debug!("tracing ready");
//! ```

mod file_writer;
mod init;
mod span_formatter;
mod tracer;

pub use init::init_tracing;
