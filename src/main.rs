//! Zellij plugin wrapper and entry point.
//!
//! Thin integration layer between the `sanction_check` library and the Zellij
//! plugin system. It translates host events into library [`Event`]s and
//! executes the [`Action`]s the library returns.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────┐
//! │     Zellij Main Thread       │
//! │  ┌────────────────────────┐  │
//! │  │     State (plugin)     │  │  ← UI state, event handling
//! │  └────────────────────────┘  │
//! │      │ IPC       │ host calls│
//! │      ▼           ▼           │
//! │  ┌──────────┐ ┌───────────┐  │
//! │  │  worker  │ │web_request│  │  ← file reads / HTTP / ffmpeg
//! │  │ (files)  │ │run_command│  │
//! │  └──────────┘ └───────────┘  │
//! └──────────────────────────────┘
//! ```
//!
//! # Reply Routing
//!
//! Every host call carries a context map with a `kind` key:
//!
//! - `check`: a check request; `ticket` identifies the submission
//! - `status`: the sanctions-list status probe
//! - `capture`: the webcam capture command; `ticket` identifies the capture
//!
//! # Keybindings
//!
//! Menu:
//! - `f`: Enter a file path
//! - `w` / `x`: Open / close the live camera view
//! - `c`: Capture a frame
//! - `n`: Edit the full name
//! - `Enter`: Submit
//! - `l`: Expand or collapse flagged links
//! - `r`: Refresh the sanctions-list status
//! - `q` / `Esc`: Close
//!
//! File prompt and name field:
//! - Characters and `Backspace` edit the text
//! - `Enter`: Load the file / submit the name
//! - `Esc`: Back to the menu

#![allow(clippy::multiple_crate_versions)]

use std::collections::BTreeMap;
use zellij_tile::prelude::*;
use zellij_tile::shim::post_message_to;

use sanction_check::api::TransportOutcome;
use sanction_check::app::CommandOutcome;
use sanction_check::worker::{SanctionCheckWorker, WorkerMessage, WorkerResponse};
use sanction_check::{handle_event, Action, Config, Event, Focus};

register_plugin!(State);
register_worker!(SanctionCheckWorker, sanction_check_worker, SANCTION_CHECK_WORKER);

const CONTEXT_KIND: &str = "kind";
const CONTEXT_TICKET: &str = "ticket";
const KIND_CHECK: &str = "check";
const KIND_STATUS: &str = "status";
const KIND_CAPTURE: &str = "capture";

/// Plugin state wrapper.
struct State {
    app: sanction_check::AppState,

    /// Worker name for IPC messaging, derived from `register_worker!`.
    worker_name: String,
}

impl Default for State {
    fn default() -> Self {
        Self {
            app: sanction_check::AppState::default(),
            worker_name: "sanction_check".to_string(),
        }
    }
}

impl ZellijPlugin for State {
    /// Parses configuration, starts tracing, requests permissions and
    /// subscribes to events. The status probe waits for the permission grant.
    fn load(&mut self, configuration: BTreeMap<String, String>) {
        let config = Config::from_zellij(&configuration);
        sanction_check::observability::init_tracing(&config);

        let span = tracing::debug_span!("plugin_load");
        let _guard = span.entered();

        tracing::debug!(config = ?config, "parsed configuration");
        self.app = sanction_check::initialize(&config);

        request_permission(&[
            PermissionType::WebAccess,
            PermissionType::RunCommands,
            PermissionType::FullHdAccess,
        ]);

        subscribe(&[
            EventType::Key,
            EventType::WebRequestResult,
            EventType::RunCommandResult,
            EventType::PermissionRequestResult,
            EventType::CustomMessage,
        ]);

        tracing::debug!("plugin load complete - waiting for permissions");
    }

    /// Translates the host event, runs the reducer and executes the returned
    /// actions. Returns `true` if the UI should re-render.
    fn update(&mut self, event: zellij_tile::prelude::Event) -> bool {
        let event_name = Self::get_event_name(&event);
        let span_name = format!("plugin_update::{event_name}");
        let span = tracing::debug_span!("plugin_update_event", otel.name = %span_name, event_type = %event_name);
        let _guard = span.entered();

        let our_event = match event {
            zellij_tile::prelude::Event::Key(ref key) => self.map_key_event(key),
            zellij_tile::prelude::Event::WebRequestResult(status, headers, body, context) => {
                Self::map_web_result_event(status, &headers, body, &context)
            }
            zellij_tile::prelude::Event::RunCommandResult(exit_code, stdout, stderr, context) => {
                Self::map_command_result_event(exit_code, stdout, stderr, &context)
            }
            zellij_tile::prelude::Event::PermissionRequestResult(permissions) => {
                Some(Event::PermissionsResult {
                    granted: matches!(permissions, PermissionStatus::Granted),
                })
            }
            zellij_tile::prelude::Event::CustomMessage(message, payload) => {
                self.map_custom_message_event(&message, &payload)
            }
            _ => None,
        };
        let Some(our_event) = our_event else {
            return false;
        };

        match handle_event(&mut self.app, &our_event) {
            Ok((should_render, actions)) => {
                tracing::debug!(
                    action_count = actions.len(),
                    should_render = should_render,
                    "event handled successfully"
                );
                for a in actions {
                    self.execute_action(&a);
                }
                should_render
            }
            Err(e) => {
                tracing::warn!(error = %e, "error handling event");
                false
            }
        }
    }

    fn render(&mut self, rows: usize, cols: usize) {
        sanction_check::ui::render(&self.app, rows, cols);
    }
}

impl State {
    fn get_event_name(event: &zellij_tile::prelude::Event) -> String {
        match event {
            zellij_tile::prelude::Event::Key(key) => format!("Key({:?})", key.bare_key),
            zellij_tile::prelude::Event::WebRequestResult(status, ..) => format!("WebRequestResult({status})"),
            zellij_tile::prelude::Event::RunCommandResult(..) => "RunCommandResult".to_string(),
            zellij_tile::prelude::Event::PermissionRequestResult(..) => "PermissionRequestResult".to_string(),
            zellij_tile::prelude::Event::CustomMessage(msg, _) => format!("CustomMessage({msg})"),
            _ => "Other".to_string(),
        }
    }

    /// Maps keys by focus. Text fields swallow every printable key.
    fn map_key_event(&self, key: &KeyWithModifier) -> Option<Event> {
        tracing::debug!(bare_key = ?key.bare_key, focus = ?self.app.focus, "key event");

        match self.app.focus {
            Focus::Menu => Some(match key.bare_key {
                BareKey::Char('f') => Event::FocusFilePrompt,
                BareKey::Char('w') => Event::ActivateWebcam,
                BareKey::Char('x') => Event::DeactivateWebcam,
                BareKey::Char('c') => Event::Capture,
                BareKey::Char('n') => Event::FocusNameField,
                BareKey::Char('l') => Event::ToggleFlaggedLinks,
                BareKey::Char('r') => Event::RefreshServiceStatus,
                BareKey::Enter => Event::Submit,
                BareKey::Char('q') | BareKey::Esc => Event::CloseFocus,
                _ => return None,
            }),
            Focus::FilePrompt | Focus::NameField => Some(match key.bare_key {
                BareKey::Enter if self.app.focus == Focus::FilePrompt => Event::ConfirmFilePath,
                BareKey::Enter => Event::Submit,
                BareKey::Esc => Event::Escape,
                BareKey::Backspace => Event::Backspace,
                BareKey::Char(c) if !key.has_modifiers(&[KeyModifier::Ctrl]) => Event::Char(c),
                _ => return None,
            }),
        }
    }

    /// Routes a web reply by its context. Zellij reports requests that never
    /// reached a server with status 400 and no headers.
    fn map_web_result_event(
        status: u16,
        headers: &BTreeMap<String, String>,
        body: Vec<u8>,
        context: &BTreeMap<String, String>,
    ) -> Option<Event> {
        tracing::debug!(status, body_len = body.len(), context = ?context, "web request result");

        let outcome = if headers.is_empty() {
            TransportOutcome::Failed {
                reason: String::from_utf8(body)
                    .ok()
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .unwrap_or_else(|| "could not reach the sanctions service".to_string()),
            }
        } else {
            TransportOutcome::Response { status, body }
        };

        match context.get(CONTEXT_KIND).map(String::as_str) {
            Some(KIND_CHECK) => {
                let Some(ticket) = context.get(CONTEXT_TICKET).and_then(|t| t.parse::<u64>().ok()) else {
                    tracing::warn!(context = ?context, "check reply without a ticket");
                    return None;
                };
                Some(Event::CheckCompleted { ticket, outcome })
            }
            Some(KIND_STATUS) => Some(Event::StatusReceived(outcome)),
            _ => {
                tracing::debug!(context = ?context, "ignoring web reply with unknown context");
                None
            }
        }
    }

    fn map_command_result_event(
        exit_code: Option<i32>,
        stdout: Vec<u8>,
        stderr: Vec<u8>,
        context: &BTreeMap<String, String>,
    ) -> Option<Event> {
        tracing::debug!(exit_code = ?exit_code, stdout_len = stdout.len(), "run command result event");

        if context.get(CONTEXT_KIND).map(String::as_str) != Some(KIND_CAPTURE) {
            return None;
        }
        let Some(ticket) = context.get(CONTEXT_TICKET).and_then(|t| t.parse::<u64>().ok()) else {
            tracing::warn!(context = ?context, "capture result without a ticket");
            return None;
        };
        Some(Event::FrameCaptured {
            ticket,
            outcome: CommandOutcome {
                exit_code,
                stdout,
                stderr,
            },
        })
    }

    fn map_custom_message_event(&self, message: &str, payload: &str) -> Option<Event> {
        if message != self.worker_name {
            tracing::debug!(message_name = %message, "ignoring custom message with unknown name");
            return None;
        }

        match WorkerResponse::decode(payload) {
            Ok(response) => {
                tracing::debug!(response = ?response, "worker response received");
                Some(Event::WorkerResponse(response))
            }
            Err(e) => {
                tracing::warn!(error = %e, "dropping worker response");
                None
            }
        }
    }

    /// Serializes the message as JSON and sends it over Zellij's IPC.
    /// Serialization errors are logged, not propagated.
    fn post_worker_message(&self, message: &WorkerMessage) {
        match serde_json::to_string(&message) {
            Ok(payload) => {
                tracing::debug!(payload_len = payload.len(), "posting message to worker");
                post_message_to(PluginMessage {
                    worker_name: Some(self.worker_name.clone()),
                    name: self.worker_name.clone(),
                    payload,
                });
            }
            Err(e) => {
                tracing::debug!(error = %e, "failed to serialize worker message");
            }
        }
    }

    fn context(kind: &str) -> BTreeMap<String, String> {
        BTreeMap::from([(CONTEXT_KIND.to_string(), kind.to_string())])
    }

    /// Translates library actions to Zellij API calls.
    #[tracing::instrument(level = "debug", skip(self))]
    fn execute_action(&self, action: &Action) {
        match action {
            Action::CloseFocus => {
                tracing::debug!("closing plugin focus");
                hide_self();
            }
            Action::PostToWorker(ref message) => {
                self.post_worker_message(message);
            }
            Action::SendCheck(ref request) => {
                tracing::info!(ticket = request.ticket, endpoint = ?request.endpoint, "sending check");
                web_request(
                    &request.url,
                    HttpVerb::Post,
                    request.headers.clone(),
                    request.body.clone(),
                    request.context(),
                );
            }
            Action::FetchServiceStatus { ref url } => {
                web_request(url, HttpVerb::Get, BTreeMap::new(), vec![], Self::context(KIND_STATUS));
            }
            Action::CaptureFrame { ticket, command } => {
                let args: Vec<&str> = command.iter().map(String::as_str).collect();
                let mut context = Self::context(KIND_CAPTURE);
                context.insert(CONTEXT_TICKET.to_string(), ticket.to_string());
                run_command(&args, context);
            }
        }
    }
}
