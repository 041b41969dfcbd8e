//! Recipe client: a terminal front end for a recipe generation service.
//!
//! The client talks to an HTTP backend that generates recipes from a list of
//! ingredients and keeps a library of saved recipes. It provides:
//! - Debounced ingredient validation while the user types
//! - Recipe generation, saving, export to a file and copy to the clipboard
//! - A searchable library with a toggleable minimum-rating filter and
//!   literal, case-insensitive match highlighting
//! - Rating, editing and deletion of saved recipes
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Binary (main.rs)                                   │  ← CLI, runtime
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← Session state
//! │  - Command parsing                                  │  ← Event handlers
//! │  - Search/filter coordination                       │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ UI Layer      │   │ API Layer     │   │ Worker Layer  │
//! │ (ui/)         │   │ (api/)        │   │ (worker/)     │
//! │ - Frontend    │   │ - RecipeApi   │   │ - Requests    │
//! │ - Theming     │   │ - reqwest     │   │ - Debounce    │
//! │ - Components  │   │               │   │ - Downloads   │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!         │                    │                    │
//! ┌─────────────────────────────────────────────────────┐
//! │  Infrastructure & Domain Layers                     │
//! │  - Platform paths (infrastructure/)                 │
//! │  - Error types (domain/error)                       │
//! │  - Recipes and search rules (domain/)               │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │
//! │  - OpenTelemetry tracing to a rotating OTLP file    │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`api`]: Backend trait and its reqwest implementation
//! - [`app`]: Session state, event handlers and the controller loop
//! - [`domain`]: Recipe types, search rules and errors
//! - [`infrastructure`]: Platform paths
//! - [`observability`]: Tracing setup
//! - [`ui`]: Frontend trait, terminal rendering and themes
//! - [`worker`]: Background requests and debounce timers
//!
//! # Configuration
//!
//! Settings are read from `<config_dir>/recipe-client/config.toml`:
//!
//! ```toml
//! base_url = "http://127.0.0.1:8000"
//! per_page = 20
//! validation_debounce_ms = 500
//! search_debounce_ms = 300
//! theme = "recipe-light"
//! trace_level = "debug"
//! log_stderr = false
//! download_dir = "~/Downloads"
//! ```
//!
//! # Example
//!
//! ```rust
//! use recipe_client::{handle_event, initialize, Action, Config, Event};
//!
//! let mut state = initialize(&Config::default());
//! let (render, actions) = handle_event(&mut state, &Event::RatingFilterClicked(4))?;
//! assert!(render);
//! assert!(matches!(actions.last(), Some(Action::Dispatch(_))));
//! # Ok::<(), recipe_client::RecipeClientError>(())
//! ```

#![allow(clippy::multiple_crate_versions)]

pub mod api;
pub mod app;
pub mod domain;
pub mod infrastructure;
pub mod observability;
pub mod ui;
pub mod worker;

pub use app::{handle_event, Action, AppState, Event, Session};
pub use domain::{RecipeClientError, Result};
pub use ui::Theme;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use worker::WorkerSettings;

const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";
const DEFAULT_PER_PAGE: u32 = 20;
const MAX_PER_PAGE: u32 = 100;
const DEFAULT_VALIDATION_DEBOUNCE_MS: u64 = 500;
const DEFAULT_SEARCH_DEBOUNCE_MS: u64 = 300;

/// Client configuration.
///
/// Built from a TOML file or a string map. Every key is optional; a value
/// that does not parse falls back to its default, except `base_url`, which
/// must be a valid http(s) URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Root URL of the recipe service. Default: `http://127.0.0.1:8000`
    pub base_url: String,

    /// Page size requested when listing recipes, `1..=100`. Default: 20
    pub per_page: u32,

    /// Quiet period before ingredients typed so far are validated.
    pub validation_debounce_ms: u64,

    /// Quiet period before typed search text is sent.
    pub search_debounce_ms: u64,

    /// Built-in theme name: `recipe-dark` or `recipe-light`.
    /// Ignored if `theme_file` is set.
    pub theme_name: Option<String>,

    /// Path to a custom TOML theme file. Takes precedence over `theme_name`.
    pub theme_file: Option<String>,

    /// Level filter for tracing, overridden by `RUST_LOG`. Default: `"info"`
    pub trace_level: Option<String>,

    /// Also print log events to stderr.
    pub log_stderr: bool,

    /// Where exported recipes are written. Default: the download directory.
    pub download_dir: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            per_page: DEFAULT_PER_PAGE,
            validation_debounce_ms: DEFAULT_VALIDATION_DEBOUNCE_MS,
            search_debounce_ms: DEFAULT_SEARCH_DEBOUNCE_MS,
            theme_name: None,
            theme_file: None,
            trace_level: None,
            log_stderr: false,
            download_dir: None,
        }
    }
}

impl Config {
    /// Parses configuration from a key/value map.
    ///
    /// # Parsing Rules
    ///
    /// - `base_url`: must parse as an `http` or `https` URL
    /// - `per_page`: `u32` in `1..=100`, else 20
    /// - `validation_debounce_ms`, `search_debounce_ms`: `u64`, else the default
    /// - `theme`, `theme_file`, `trace_level`, `download_dir`: taken as is
    /// - `log_stderr`: `true`/`false`, else `false`
    ///
    /// # Errors
    ///
    /// Returns [`RecipeClientError::Config`] if `base_url` is not a valid
    /// http(s) URL.
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use recipe_client::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("per_page".to_string(), "50".to_string());
    /// map.insert("search_debounce_ms".to_string(), "soon".to_string());
    ///
    /// let config = Config::from_map(&map)?;
    /// assert_eq!(config.per_page, 50);
    /// assert_eq!(config.search_debounce_ms, 300);
    /// # Ok::<(), recipe_client::RecipeClientError>(())
    /// ```
    pub fn from_map(config: &BTreeMap<String, String>) -> Result<Self> {
        let defaults = Self::default();

        let base_url = match config.get("base_url") {
            Some(url) => validate_base_url(url)?,
            None => defaults.base_url,
        };

        let per_page = parse_or(config, "per_page", defaults.per_page)
            .clamp(1, MAX_PER_PAGE);

        Ok(Self {
            base_url,
            per_page,
            validation_debounce_ms: parse_or(
                config,
                "validation_debounce_ms",
                defaults.validation_debounce_ms,
            ),
            search_debounce_ms: parse_or(config, "search_debounce_ms", defaults.search_debounce_ms),
            theme_name: config.get("theme").cloned(),
            theme_file: config.get("theme_file").cloned(),
            trace_level: config.get("trace_level").cloned(),
            log_stderr: parse_or(config, "log_stderr", defaults.log_stderr),
            download_dir: config.get("download_dir").cloned(),
        })
    }

    /// Parses a TOML document.
    ///
    /// Top-level scalars are read as strings and go through [`Config::from_map`],
    /// so a wrongly typed value falls back the same way a malformed string does.
    ///
    /// # Errors
    ///
    /// Returns [`RecipeClientError::Config`] if the document is not valid
    /// TOML or `base_url` is invalid.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let table: BTreeMap<String, toml::Value> =
            toml::from_str(source).map_err(|e| RecipeClientError::Config(e.to_string()))?;

        let map = table
            .into_iter()
            .filter_map(|(key, value)| match value {
                toml::Value::String(s) => Some((key, s)),
                toml::Value::Integer(i) => Some((key, i.to_string())),
                toml::Value::Boolean(b) => Some((key, b.to_string())),
                other => {
                    tracing::debug!(key = %key, value = %other, "ignoring non-scalar config value");
                    None
                }
            })
            .collect();

        Self::from_map(&map)
    }

    /// Reads configuration from `path`.
    ///
    /// # Errors
    ///
    /// Returns [`RecipeClientError::Io`] if the file cannot be read, or any
    /// error from [`Config::from_toml_str`].
    pub fn load(path: &Path) -> Result<Self> {
        let source = std::fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }

    /// Reads the default config file, or returns defaults if there is none.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_default() -> Result<Self> {
        let path = infrastructure::default_config_file();
        if path.exists() {
            Self::load(&path)
        } else {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            Ok(Self::default())
        }
    }

    /// Paging and debounce settings for the worker.
    #[must_use]
    pub const fn worker_settings(&self) -> WorkerSettings {
        WorkerSettings {
            per_page: self.per_page,
            validation_delay: Duration::from_millis(self.validation_debounce_ms),
            search_delay: Duration::from_millis(self.search_debounce_ms),
        }
    }

    /// Loads the configured theme: `theme_file`, then `theme`, then the default.
    ///
    /// # Errors
    ///
    /// Returns [`RecipeClientError::Theme`] if the file cannot be loaded or
    /// the name is not a built-in theme.
    pub fn resolve_theme(&self) -> Result<Theme> {
        if let Some(file) = &self.theme_file {
            return Theme::from_file(infrastructure::expand_tilde(file));
        }
        match &self.theme_name {
            Some(name) => Theme::from_name(name)
                .ok_or_else(|| RecipeClientError::Theme(format!("unknown theme '{name}'"))),
            None => Ok(Theme::default()),
        }
    }

    /// Directory exported recipes are written to.
    #[must_use]
    pub fn download_dir(&self) -> PathBuf {
        self.download_dir.as_deref().map_or_else(
            infrastructure::default_download_dir,
            infrastructure::expand_tilde,
        )
    }
}

fn parse_or<T: std::str::FromStr>(config: &BTreeMap<String, String>, key: &str, default: T) -> T {
    match config.get(key) {
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::debug!(key, value = %raw, "invalid config value, using default");
            default
        }),
        None => default,
    }
}

fn validate_base_url(raw: &str) -> Result<String> {
    let url = reqwest::Url::parse(raw.trim())
        .map_err(|e| RecipeClientError::Config(format!("invalid base_url '{raw}': {e}")))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(RecipeClientError::Config(format!(
            "invalid base_url '{raw}': scheme must be http or https"
        )));
    }
    Ok(raw.trim().trim_end_matches('/').to_string())
}

/// Creates the initial session state.
///
/// A theme that fails to load is logged and replaced by the default.
///
/// # Example
///
/// ```rust
/// use recipe_client::{initialize, Config};
///
/// let config = Config {
///     theme_name: Some("recipe-light".to_string()),
///     ..Default::default()
/// };
/// let state = initialize(&config);
/// assert_eq!(state.panel, recipe_client::app::Panel::Generator);
/// ```
#[must_use]
pub fn initialize(config: &Config) -> AppState {
    tracing::debug!(base_url = %config.base_url, "initializing recipe client");

    let theme = config.resolve_theme().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "failed to load theme, using default");
        Theme::default()
    });

    AppState::new(theme)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn empty_map_gives_defaults() {
        assert_eq!(Config::from_map(&BTreeMap::new()).unwrap(), Config::default());
    }

    #[test]
    fn invalid_values_fall_back_per_key() {
        let config = Config::from_map(&map(&[
            ("per_page", "lots"),
            ("validation_debounce_ms", "250"),
            ("log_stderr", "yes"),
        ]))
        .unwrap();

        assert_eq!(config.per_page, 20);
        assert_eq!(config.validation_debounce_ms, 250);
        assert!(!config.log_stderr);
    }

    #[test]
    fn per_page_is_clamped() {
        assert_eq!(Config::from_map(&map(&[("per_page", "0")])).unwrap().per_page, 1);
        assert_eq!(Config::from_map(&map(&[("per_page", "500")])).unwrap().per_page, 100);
    }

    #[test]
    fn bad_base_url_is_a_config_error() {
        for url in ["not a url", "ftp://recipes.example"] {
            let err = Config::from_map(&map(&[("base_url", url)])).unwrap_err();
            assert!(matches!(err, RecipeClientError::Config(_)), "{url}: {err}");
        }
    }

    #[test]
    fn base_url_loses_trailing_slash() {
        let config = Config::from_map(&map(&[("base_url", "https://recipes.example/")])).unwrap();
        assert_eq!(config.base_url, "https://recipes.example");
    }

    #[test]
    fn toml_scalars_are_read() {
        let config = Config::from_toml_str(
            r#"
            base_url = "http://localhost:9000"
            per_page = 5
            search_debounce_ms = 100
            log_stderr = true
            theme = "recipe-light"
            "#,
        )
        .unwrap();

        assert_eq!(config.base_url, "http://localhost:9000");
        assert_eq!(config.per_page, 5);
        assert_eq!(config.worker_settings().search_delay, Duration::from_millis(100));
        assert!(config.log_stderr);
        assert_eq!(config.resolve_theme().unwrap().name, "recipe-light");
    }

    #[test]
    fn load_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "per_page = 42\ndownload_dir = \"/tmp/recipes\"\n").unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.per_page, 42);
        assert_eq!(config.download_dir(), PathBuf::from("/tmp/recipes"));
    }

    #[test]
    fn unknown_theme_name_is_an_error_but_initialize_falls_back() {
        let config = Config {
            theme_name: Some("neon".to_string()),
            ..Config::default()
        };
        assert!(matches!(config.resolve_theme(), Err(RecipeClientError::Theme(_))));
        assert_eq!(initialize(&config).theme, Theme::default());
    }
}
