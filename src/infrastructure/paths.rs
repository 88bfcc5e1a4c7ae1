//! Path handling for the Zellij plugin sandbox.
//!
//! Inside the sandbox the host's home directory is mounted at `/host`, so
//! user-facing paths such as `~/.config/...` have to be rewritten before the
//! plugin or its worker can open them.

use std::path::PathBuf;

/// Where Chromium keeps the bookmarks of the default profile on Linux.
pub const DEFAULT_BOOKMARKS_FILE: &str = "~/.config/google-chrome/Default/Bookmarks";

/// Returns the plugin's data directory, `/host/.local/share/zellij/zmarks`.
///
/// Trace files are written here.
///
/// ```
/// use zmarks::infrastructure::get_data_dir;
///
/// assert_eq!(get_data_dir().to_str(), Some("/host/.local/share/zellij/zmarks"));
/// ```
#[must_use]
pub fn get_data_dir() -> PathBuf {
    PathBuf::from("/host/.local/share/zellij").join("zmarks")
}

/// Rewrites a leading `~` to the `/host` sandbox mount.
///
/// ```
/// use zmarks::infrastructure::expand_tilde;
///
/// assert_eq!(expand_tilde("~/.config"), "/host/.config");
/// assert_eq!(expand_tilde("~"), "/host");
/// assert_eq!(expand_tilde("/etc/hosts"), "/etc/hosts");
/// assert_eq!(expand_tilde("~user/x"), "~user/x");
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> String {
    if path.starts_with("~/") {
        path.replacen('~', "/host", 1)
    } else if path == "~" {
        "/host".to_string()
    } else {
        path.to_string()
    }
}

/// Turns a sandbox path back into the `~` form the user configured.
///
/// This is the inverse of [`expand_tilde`]; only a whole leading `/host`
/// component is rewritten.
///
/// ```
/// use zmarks::infrastructure::display_path;
///
/// assert_eq!(display_path("/host/.config/Bookmarks"), "~/.config/Bookmarks");
/// assert_eq!(display_path("/hostname/x"), "/hostname/x");
/// ```
#[must_use]
pub fn display_path(path: &str) -> String {
    match path.strip_prefix("/host") {
        Some(rest) if rest.is_empty() || rest.starts_with('/') => format!("~{rest}"),
        _ => path.to_string(),
    }
}

/// Resolves the configured bookmarks file to a path the sandbox can open.
///
/// An empty setting falls back to [`DEFAULT_BOOKMARKS_FILE`].
#[must_use]
pub fn resolve_bookmarks_file(configured: &str) -> PathBuf {
    let configured = configured.trim();
    let path = if configured.is_empty() {
        DEFAULT_BOOKMARKS_FILE
    } else {
        configured
    };
    PathBuf::from(expand_tilde(path))
}
