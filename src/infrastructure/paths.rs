//! Filesystem locations used by the client.
//!
//! Configuration lives under the platform config directory, traces under the
//! platform data directory and exports go to the user's download directory.
//! Each falls back to the current directory when the platform has none.

use std::path::{Path, PathBuf};

const APP_DIR: &str = "recipe-client";

/// Default config file: `<config_dir>/recipe-client/config.toml`.
///
/// # Examples
///
/// ```
/// use recipe_client::infrastructure::default_config_file;
///
/// assert!(default_config_file().ends_with("recipe-client/config.toml"));
/// ```
#[must_use]
pub fn default_config_file() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
        .join("config.toml")
}

/// Directory for trace output: `<data_dir>/recipe-client`.
#[must_use]
pub fn get_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
}

/// Directory exported recipes are written to.
#[must_use]
pub fn default_download_dir() -> PathBuf {
    dirs::download_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Expands a leading `~` to the home directory.
///
/// Paths without one, and every path when no home directory is known, come
/// back unchanged.
#[must_use]
pub fn expand_tilde(path: &str) -> PathBuf {
    let Some(home) = dirs::home_dir() else {
        return PathBuf::from(path);
    };
    if path == "~" {
        home
    } else if let Some(rest) = path.strip_prefix("~/") {
        home.join(rest)
    } else {
        PathBuf::from(path)
    }
}

/// Ensures the parent directory of `path` exists.
///
/// # Errors
///
/// Returns any error from creating the directory.
pub fn ensure_parent(path: &Path) -> std::io::Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => std::fs::create_dir_all(parent),
        _ => Ok(()),
    }
}
