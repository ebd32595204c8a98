//! Worker thread implementation for file loading.
//!
//! Reading a multi-megabyte passport scan would stall rendering, so the plugin
//! posts a [`WorkerMessage::LoadFile`] and the worker answers with the file's
//! contents or the reason it could not be used.

use crate::infrastructure::paths;
use crate::worker::{WorkerMessage, WorkerResponse};
use base64::engine::general_purpose::STANDARD as BASE64_ENGINE;
use base64::Engine as _;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use zellij_tile::prelude::{PluginMessage, ZellijWorker};
use zellij_tile::shim::post_message_to_plugin;

/// Largest file accepted for upload.
pub const MAX_FILE_BYTES: u64 = 20 * 1024 * 1024;

/// Worker state. Stateless apart from the Zellij worker contract.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct SanctionCheckWorker;

impl SanctionCheckWorker {
    /// Processes a worker message and returns the response to post back.
    pub fn handle_message(&mut self, message: WorkerMessage) -> WorkerResponse {
        let _context_guard = attach_parent_trace_context(&message);

        let span = tracing::debug_span!("worker_handle_message", message_type = ?message);
        let _guard = span.entered();

        match message {
            WorkerMessage::LoadFile { path, .. } => Self::handle_load_file(path),
        }
    }

    fn handle_load_file(path: String) -> WorkerResponse {
        let resolved = paths::resolve_host_path(&path);

        match read_passport_file(&resolved) {
            Ok((name, bytes)) => {
                tracing::debug!(path = %path, len = bytes.len(), "file loaded");
                WorkerResponse::FileLoaded {
                    path,
                    name,
                    data_base64: BASE64_ENGINE.encode(bytes),
                }
            }
            Err(reason) => {
                tracing::debug!(path = %path, resolved = %resolved.display(), reason = %reason, "file rejected");
                WorkerResponse::FileUnreadable { path, reason }
            }
        }
    }
}

/// Reads a candidate passport image, enforcing the size limits.
///
/// Returns the file name and contents, or a human-readable reason.
pub fn read_passport_file(path: &Path) -> Result<(String, Vec<u8>), String> {
    let metadata = fs::metadata(path).map_err(|e| e.to_string())?;
    if !metadata.is_file() {
        return Err("not a regular file".to_string());
    }
    if metadata.len() > MAX_FILE_BYTES {
        return Err(format!(
            "file is {} MiB, the limit is {} MiB",
            metadata.len() / (1024 * 1024),
            MAX_FILE_BYTES / (1024 * 1024)
        ));
    }

    let bytes = fs::read(path).map_err(|e| e.to_string())?;
    if bytes.is_empty() {
        return Err("file is empty".to_string());
    }

    let name = path
        .file_name()
        .map_or_else(|| "upload".to_string(), |n| n.to_string_lossy().into_owned());
    Ok((name, bytes))
}

/// Re-attaches the plugin's trace context so worker spans join its trace.
///
/// The returned guard must be held for the duration of the operation.
fn attach_parent_trace_context(message: &WorkerMessage) -> Option<opentelemetry::ContextGuard> {
    use opentelemetry::trace::{SpanContext, SpanId, TraceContextExt, TraceFlags, TraceId, TraceState};

    let trace_context = message.trace_context()?;
    let trace_id = TraceId::from_hex(&trace_context.trace_id).ok()?;
    let span_id = SpanId::from_hex(&trace_context.parent_span_id).ok()?;

    let span_context = SpanContext::new(trace_id, span_id, TraceFlags::SAMPLED, true, TraceState::default());
    let otel_context = opentelemetry::Context::current().with_remote_span_context(span_context);

    Some(otel_context.attach())
}

static WORKER_TRACING_INITIALIZED: std::sync::atomic::AtomicBool =
    std::sync::atomic::AtomicBool::new(false);

impl ZellijWorker<'_> for SanctionCheckWorker {
    /// Entry point for messages from the plugin. The response is posted back
    /// under the same message name.
    fn on_message(&mut self, message: String, payload: String) {
        if !WORKER_TRACING_INITIALIZED.swap(true, std::sync::atomic::Ordering::Relaxed) {
            crate::observability::init_tracing(&crate::Config::default());
        }

        let worker_message = match WorkerMessage::decode(&payload) {
            Ok(msg) => msg,
            Err(e) => {
                tracing::debug!(error = %e, "dropping worker message");
                return;
            }
        };

        let response = self.handle_message(worker_message);

        match serde_json::to_string(&response) {
            Ok(payload) => post_message_to_plugin(PluginMessage {
                name: message,
                payload,
                worker_name: None,
            }),
            Err(e) => tracing::debug!(error = %e, "failed to serialize worker response"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn reads_name_and_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("passport.jpg");
        fs::File::create(&path).unwrap().write_all(&[0xff, 0xd8, 0xff]).unwrap();

        let (name, bytes) = read_passport_file(&path).unwrap();
        assert_eq!(name, "passport.jpg");
        assert_eq!(bytes, vec![0xff, 0xd8, 0xff]);
    }

    #[test]
    fn rejects_empty_missing_and_directories() {
        let dir = tempfile::tempdir().unwrap();
        let empty = dir.path().join("empty.png");
        fs::File::create(&empty).unwrap();

        assert_eq!(read_passport_file(&empty), Err("file is empty".to_string()));
        assert!(read_passport_file(&dir.path().join("missing.png")).is_err());
        assert_eq!(read_passport_file(dir.path()), Err("not a regular file".to_string()));
    }

    #[test]
    fn rejects_oversized_files() {
        let file = tempfile::NamedTempFile::new().unwrap();
        file.as_file().set_len(MAX_FILE_BYTES + 1).unwrap();
        let reason = read_passport_file(file.path()).unwrap_err();
        assert!(reason.contains("limit is 20 MiB"), "{reason}");
    }

    #[test]
    fn unreadable_files_echo_the_requested_path() {
        let mut worker = SanctionCheckWorker;
        let response = worker.handle_message(WorkerMessage::LoadFile {
            path: "/definitely/not/here.jpg".into(),
            trace_context: None,
        });
        let WorkerResponse::FileUnreadable { path, .. } = response else {
            panic!("expected FileUnreadable");
        };
        assert_eq!(path, "/definitely/not/here.jpg");
    }
}
