//! Path handling for the Zellij sandbox.
//!
//! Inside the plugin the host filesystem is mounted at `/host`, which points at
//! the directory Zellij was started from (usually the user's home). Paths the
//! user types are mapped onto that mount before the worker reads them.

use std::path::PathBuf;

const HOST_MOUNT: &str = "/host";

/// Returns the data directory for trace output.
///
/// ```
/// use sanction_check::infrastructure::get_data_dir;
///
/// assert_eq!(
///     get_data_dir().to_str(),
///     Some("/host/.local/share/zellij/sanction-check")
/// );
/// ```
#[must_use]
pub fn get_data_dir() -> PathBuf {
    PathBuf::from(HOST_MOUNT).join(".local/share/zellij").join("sanction-check")
}

/// Expands `~` to the `/host` mount.
///
/// ```
/// use sanction_check::infrastructure::expand_tilde;
///
/// assert_eq!(expand_tilde("~/scans/id.png"), "/host/scans/id.png");
/// assert_eq!(expand_tilde("~"), "/host");
/// assert_eq!(expand_tilde("/tmp/id.png"), "/tmp/id.png");
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> String {
    if path.starts_with("~/") {
        path.replacen('~', HOST_MOUNT, 1)
    } else if path == "~" {
        HOST_MOUNT.to_string()
    } else {
        path.to_string()
    }
}

/// Maps a user-typed path to where the plugin can read it.
///
/// `~` and relative paths resolve under `/host`; absolute paths are used as
/// given.
///
/// ```
/// use sanction_check::infrastructure::resolve_host_path;
/// use std::path::PathBuf;
///
/// assert_eq!(resolve_host_path("scans/id.png"), PathBuf::from("/host/scans/id.png"));
/// assert_eq!(resolve_host_path(" ~/id.png "), PathBuf::from("/host/id.png"));
/// assert_eq!(resolve_host_path("/tmp/id.png"), PathBuf::from("/tmp/id.png"));
/// ```
#[must_use]
pub fn resolve_host_path(path: &str) -> PathBuf {
    let expanded = expand_tilde(path.trim());
    if expanded.starts_with('/') {
        PathBuf::from(expanded)
    } else {
        PathBuf::from(HOST_MOUNT).join(expanded)
    }
}
