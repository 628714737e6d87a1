//! Path helpers for the Zellij plugin sandbox.

use std::path::PathBuf;

/// Sandbox mount point of the host home directory.
const HOST_ROOT: &str = "/host";

/// Directory holding the plugin's trace files.
///
/// Resolves to `~/.local/share/zellij/hnpane` when Zellij was started from
/// the home directory.
///
/// # Examples
///
/// ```
/// use hnpane::infrastructure::get_data_dir;
///
/// assert_eq!(get_data_dir().to_str(), Some("/host/.local/share/zellij/hnpane"));
/// ```
#[must_use]
pub fn get_data_dir() -> PathBuf {
    PathBuf::from(HOST_ROOT)
        .join(".local/share/zellij")
        .join("hnpane")
}

/// Rewrites a `~`-prefixed path (such as a configured `theme_file`) to its
/// sandbox location.
///
/// # Examples
///
/// ```
/// use hnpane::infrastructure::expand_tilde;
///
/// assert_eq!(expand_tilde("~/themes/dark.toml"), "/host/themes/dark.toml");
/// assert_eq!(expand_tilde("/etc/theme.toml"), "/etc/theme.toml");
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> String {
    match path.strip_prefix('~') {
        Some("") => HOST_ROOT.to_string(),
        Some(rest) if rest.starts_with('/') => format!("{HOST_ROOT}{rest}"),
        _ => path.to_string(),
    }
}
