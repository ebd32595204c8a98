//! Sanction Check: a Zellij plugin for screening people against a sanctions
//! compliance service.
//!
//! The plugin submits one of three inputs to a remote HTTP service and renders
//! the verdict:
//! - a passport image file, read from the host filesystem by a worker
//! - a still frame captured from the webcam
//! - a full name

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Zellij Plugin Shim (main.rs)                       │  ← Host calls
//! └─────────────────────────────────────────────────────┘
//!                        │ Event ↓   ↑ Action
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │
//! │  - Input mode exclusivity                           │
//! │  - Single-slot submission with tickets              │
//! │  - Webcam capture bookkeeping                       │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ UI Layer      │   │ API Layer     │   │ Worker Layer  │
//! │ (ui/)         │   │ (api/)        │   │ (worker/)     │
//! │ - Presenter   │   │ - Requests    │   │ - File reads  │
//! │ - Components  │   │ - Responses   │   │ - IPC bridge  │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain & Infrastructure (domain/, infrastructure/) │
//! │  Observability (observability/)                     │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! Nothing in the library performs I/O on the plugin thread. Every network
//! request, capture command and file read leaves [`handle_event`] as an
//! [`Action`] and comes back later as an [`Event`], so the whole check flow
//! can be driven in tests without a Zellij host.
//!
//! # Configuration
//!
//! ```kdl
//! pane {
//!     plugin location="file:/path/to/sanction-check.wasm" {
//!         api_url "https://compliance.example.com"
//!         theme "catppuccin-latte"
//!         camera_device "/dev/video2"
//!         clear_capture_on_deactivate "true"
//!         trace_level "debug"
//!     }
//! }
//! ```
//!
//! # Example
//!
//! ```rust
//! use sanction_check::{handle_event, initialize, Action, Config, Event};
//!
//! let mut state = initialize(&Config::default());
//!
//! handle_event(&mut state, &Event::FocusNameField)?;
//! for c in "Jane Doe".chars() {
//!     handle_event(&mut state, &Event::Char(c))?;
//! }
//! let (_, actions) = handle_event(&mut state, &Event::Submit)?;
//! assert!(matches!(actions.as_slice(), [Action::SendCheck(_)]));
//! # Ok::<(), sanction_check::CheckerError>(())
//! ```

pub mod api;
pub mod app;
pub mod domain;
pub mod infrastructure;
pub mod worker;

pub mod ui;

pub mod observability;

pub use app::{handle_event, Action, AppState, CapturePolicy, Event, Focus, InputMode};
pub use domain::{CheckError, CheckResult, CheckerError, Result};
pub use ui::Theme;

use api::Endpoints;
use app::WebcamSession;
use std::collections::BTreeMap;

/// Plugin configuration parsed from the layout's plugin block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Base address of the compliance service.
    pub api_url: String,

    /// Built-in theme name. Ignored if `theme_file` is set.
    pub theme_name: Option<String>,

    /// Path to a custom TOML theme. See [`ui::theme`] for the format.
    pub theme_file: Option<String>,

    /// `EnvFilter` directive for spans. Default: `"info"`.
    pub trace_level: Option<String>,

    /// Video device handed to the default capture command.
    pub camera_device: String,

    /// Replaces the default ffmpeg invocation. Must write one JPEG frame to
    /// stdout.
    pub capture_command: Option<Vec<String>>,

    pub capture_policy: CapturePolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: api::DEFAULT_API_URL.to_string(),
            theme_name: None,
            theme_file: None,
            trace_level: None,
            camera_device: app::webcam::DEFAULT_CAMERA_DEVICE.to_string(),
            capture_command: None,
            capture_policy: CapturePolicy::default(),
        }
    }
}

impl Config {
    /// Parses the configuration map Zellij hands to `load`.
    ///
    /// Blank values count as unset. `capture_command` is split on
    /// whitespace. `clear_capture_on_deactivate` accepts `true`/`yes`/`1`.
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use sanction_check::{CapturePolicy, Config};
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("api_url".to_string(), "https://checker.example.com/".to_string());
    /// map.insert("capture_command".to_string(), "grab-frame --jpeg".to_string());
    /// map.insert("clear_capture_on_deactivate".to_string(), "true".to_string());
    ///
    /// let config = Config::from_zellij(&map);
    /// assert_eq!(config.api_url, "https://checker.example.com/");
    /// assert_eq!(config.capture_command, Some(vec!["grab-frame".into(), "--jpeg".into()]));
    /// assert_eq!(config.capture_policy, CapturePolicy::ClearOnDeactivate);
    /// ```
    #[must_use]
    pub fn from_zellij(config: &BTreeMap<String, String>) -> Self {
        let value = |key: &str| {
            config
                .get(key)
                .map(|v| v.trim())
                .filter(|v| !v.is_empty())
                .map(String::from)
        };
        let defaults = Self::default();

        let capture_command = value("capture_command")
            .map(|c| c.split_whitespace().map(String::from).collect::<Vec<_>>());

        let capture_policy = match value("clear_capture_on_deactivate").as_deref() {
            Some("true" | "yes" | "1") => CapturePolicy::ClearOnDeactivate,
            _ => CapturePolicy::KeepOnDeactivate,
        };

        Self {
            api_url: value("api_url").unwrap_or(defaults.api_url),
            theme_name: value("theme"),
            theme_file: value("theme_file"),
            trace_level: value("trace_level"),
            camera_device: value("camera_device").unwrap_or(defaults.camera_device),
            capture_command,
            capture_policy,
        }
    }

    /// Theme from `theme_file`, then `theme`, then the default. Load
    /// failures fall back to the next choice.
    #[must_use]
    pub fn theme(&self) -> Theme {
        if let Some(theme_file) = &self.theme_file {
            let path = infrastructure::resolve_host_path(theme_file);
            match Theme::from_file(&path) {
                Ok(theme) => return theme,
                Err(e) => {
                    tracing::warn!(theme_file = %path.display(), error = %e, "failed to load theme file");
                }
            }
        }

        self.theme_name.as_ref().map_or_else(Theme::default, |name| {
            Theme::from_name(name).unwrap_or_else(|| {
                tracing::warn!(theme_name = %name, "unknown theme, using default");
                Theme::default()
            })
        })
    }

    #[must_use]
    pub fn webcam(&self) -> WebcamSession {
        self.capture_command.as_ref().map_or_else(
            || WebcamSession::for_device(&self.camera_device),
            |command| WebcamSession::new(command.clone()),
        )
    }
}

/// Builds the initial [`AppState`] from configuration.
///
/// Does not start tracing; the plugin shim calls
/// [`observability::init_tracing`] first.
#[must_use]
pub fn initialize(config: &Config) -> AppState {
    tracing::debug!(api_url = %config.api_url, policy = ?config.capture_policy, "initializing sanction check");

    AppState::new(
        Endpoints::new(&config.api_url),
        config.capture_policy,
        config.webcam(),
        config.theme(),
    )
}
