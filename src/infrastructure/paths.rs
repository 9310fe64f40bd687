//! Plugin data locations inside the Zellij sandbox.
//!
//! The host filesystem is visible under `/host`, which Zellij points at the
//! cwd of the last focused terminal (usually `$HOME`).

use std::path::PathBuf;

/// File name of the OTLP trace log.
pub const TRACE_FILE_NAME: &str = "tagtable-otlp.json";

/// Directory for files the plugin writes: `/host/.local/share/zellij/tagtable`.
///
/// ```
/// use tagtable::infrastructure::get_data_dir;
///
/// assert_eq!(get_data_dir().to_str(), Some("/host/.local/share/zellij/tagtable"));
/// ```
#[must_use]
pub fn get_data_dir() -> PathBuf {
    PathBuf::from("/host/.local/share/zellij").join("tagtable")
}

/// Full path of the trace log inside [`get_data_dir`].
#[must_use]
pub fn trace_file() -> PathBuf {
    get_data_dir().join(TRACE_FILE_NAME)
}

/// Maps a `~`-relative path from the plugin configuration into the sandbox.
///
/// ```
/// use tagtable::infrastructure::expand_tilde;
///
/// assert_eq!(expand_tilde("~/themes/mine.toml"), "/host/themes/mine.toml");
/// assert_eq!(expand_tilde("/etc/theme.toml"), "/etc/theme.toml");
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> String {
    match path.strip_prefix('~') {
        Some("") => "/host".to_string(),
        Some(rest) if rest.starts_with('/') => format!("/host{rest}"),
        _ => path.to_string(),
    }
}
