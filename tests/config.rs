use sanction_check::api::TransportOutcome;
use sanction_check::{handle_event, initialize, Action, CapturePolicy, Config, Event, InputMode, Theme};
use std::collections::BTreeMap;
use std::io::Write;

fn config_map(entries: &[(&str, &str)]) -> BTreeMap<String, String> {
    entries
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect()
}

#[test]
fn empty_configuration_uses_defaults() {
    let config = Config::from_zellij(&BTreeMap::new());
    assert_eq!(config, Config::default());
    assert_eq!(config.api_url, "http://localhost:8000");
    assert_eq!(config.camera_device, "/dev/video0");
    assert_eq!(config.capture_policy, CapturePolicy::KeepOnDeactivate);
}

#[test]
fn blank_values_count_as_unset() {
    let config = Config::from_zellij(&config_map(&[("api_url", "  "), ("theme", "")]));
    assert_eq!(config.api_url, "http://localhost:8000");
    assert_eq!(config.theme_name, None);
}

#[test]
fn theme_file_wins_over_theme_name() {
    let mut custom = Theme::default();
    custom.name = "audit-room".into();
    custom.colors.success_fg = "#00ff00".into();

    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "{}", toml::to_string(&custom).unwrap()).unwrap();

    let config = Config::from_zellij(&config_map(&[
        ("theme", "catppuccin-latte"),
        ("theme_file", file.path().to_str().unwrap()),
    ]));
    assert_eq!(initialize(&config).theme, custom);
}

#[test]
fn unreadable_theme_file_falls_back_to_theme_name() {
    let config = Config::from_zellij(&config_map(&[
        ("theme", "catppuccin-latte"),
        ("theme_file", "/no/such/theme.toml"),
    ]));
    assert_eq!(initialize(&config).theme.name, "catppuccin-latte");

    let unknown = Config::from_zellij(&config_map(&[("theme", "solarized")]));
    assert_eq!(initialize(&unknown).theme, Theme::default());
}

#[test]
fn api_url_and_camera_settings_reach_the_actions() {
    let config = Config::from_zellij(&config_map(&[
        ("api_url", "https://compliance.example.com/"),
        ("camera_device", "/dev/video2"),
    ]));
    let mut state = initialize(&config);

    let (_, actions) = handle_event(&mut state, &Event::PermissionsResult { granted: true }).unwrap();
    assert_eq!(
        actions,
        vec![Action::FetchServiceStatus {
            url: "https://compliance.example.com/sanctions-status/".into()
        }]
    );

    handle_event(&mut state, &Event::ActivateWebcam).unwrap();
    let (_, actions) = handle_event(&mut state, &Event::Capture).unwrap();
    let [Action::CaptureFrame { command, .. }] = actions.as_slice() else {
        panic!("expected CaptureFrame, got {actions:?}");
    };
    assert!(command.iter().any(|arg| arg == "/dev/video2"));
}

#[test]
fn capture_command_override_is_split_on_whitespace() {
    let config = Config::from_zellij(&config_map(&[("capture_command", "  grab-still  --device /dev/video1 ")]));
    let mut state = initialize(&config);

    handle_event(&mut state, &Event::ActivateWebcam).unwrap();
    let (_, actions) = handle_event(&mut state, &Event::Capture).unwrap();
    let [Action::CaptureFrame { command, .. }] = actions.as_slice() else {
        panic!("expected CaptureFrame, got {actions:?}");
    };
    assert_eq!(command, &["grab-still", "--device", "/dev/video1"]);
}

#[test]
fn clear_on_deactivate_policy_drops_the_capture() {
    let config = Config::from_zellij(&config_map(&[("clear_capture_on_deactivate", "yes")]));
    let mut state = initialize(&config);

    handle_event(&mut state, &Event::ActivateWebcam).unwrap();
    let (_, actions) = handle_event(&mut state, &Event::Capture).unwrap();
    let [Action::CaptureFrame { ticket, .. }] = actions.as_slice() else {
        panic!("expected CaptureFrame, got {actions:?}");
    };
    handle_event(
        &mut state,
        &Event::FrameCaptured {
            ticket: *ticket,
            outcome: sanction_check::app::CommandOutcome {
                exit_code: Some(0),
                stdout: vec![0xff, 0xd8, 0xff, 0xd9],
                stderr: vec![],
            },
        },
    )
    .unwrap();
    assert!(state.inputs().capture_image().is_some());

    handle_event(&mut state, &Event::DeactivateWebcam).unwrap();
    assert!(state.inputs().capture_image().is_none());
    assert_eq!(state.inputs().mode(), InputMode::Webcam);
}

#[test]
fn status_probe_fills_the_header() {
    let mut state = initialize(&Config::default());
    handle_event(
        &mut state,
        &Event::StatusReceived(TransportOutcome::Response {
            status: 200,
            body: br#"{"status":"active","total_entries":12873,"last_updated":null}"#.to_vec(),
        }),
    )
    .unwrap();

    let header = state.compute_viewmodel(24, 80).header;
    let subtitle = header.subtitle.unwrap();
    assert!(subtitle.contains("12873"), "unexpected subtitle {subtitle:?}");
}
