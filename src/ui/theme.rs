//! Theme management and ANSI escape sequence generation.
//!
//! Colour schemes come from built-in TOML themes or a custom TOML file, and
//! are turned into 24-bit ANSI escapes when rendering.
//!
//! # Built-in Themes
//!
//! - `recipe-dark`: Dark theme with warm accents (default)
//! - `recipe-light`: Light theme for bright terminals
//!
//! # TOML Format
//!
//! ```toml
//! name = "my-theme"
//!
//! [colors]
//! header_fg = "#f2e9e1"
//! selection_fg = "#1f1d2e"
//! selection_bg = "#ebbcba"
//! text_normal = "#e0def4"
//! text_dim = "#6e6a86"
//! border = "#403d52"
//! search_bar_border = "#ebbcba"
//! match_highlight_fg = "#1f1d2e"
//! match_highlight_bg = "#f6c177"
//! empty_state_fg = "#9ccfd8"
//! success_fg = "#a6da95"
//! error_fg = "#eb6f92"
//! rating_fg = "#f6c177"
//! ```
//!
//! # Example
//!
//! ```rust
//! use recipe_client::ui::theme::Theme;
//!
//! let theme = Theme::from_name("recipe-dark").unwrap();
//! println!("{}", Theme::fg(&theme.colors.header_fg));
//! println!("{}Bold Text{}", Theme::bold(), Theme::reset());
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::app::modes::Severity;
use crate::domain::error::{RecipeClientError, Result};

/// Colour scheme configuration for UI rendering.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Theme {
    /// Human-readable theme name.
    pub name: String,
    /// Color palette for all UI elements.
    pub colors: ThemeColors,
}

/// Color definitions for all UI elements.
///
/// All colors are hex strings (e.g., "#e0def4"). Optional fields default to
/// `None`, allowing themes to opt out of certain styling.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ThemeColors {
    /// Header text color.
    pub header_fg: String,
    /// Optional header background color.
    #[serde(default)]
    pub header_bg: Option<String>,

    /// Selected row foreground color.
    pub selection_fg: String,
    /// Selected row background color.
    pub selection_bg: String,

    /// Normal text color.
    pub text_normal: String,
    /// Dimmed text color (footer, secondary info).
    pub text_dim: String,

    /// Border and separator line color.
    pub border: String,

    /// Search bar border color.
    pub search_bar_border: String,
    /// Search match highlight foreground.
    pub match_highlight_fg: String,
    /// Search match highlight background.
    pub match_highlight_bg: String,

    /// Empty state message color.
    pub empty_state_fg: String,

    /// Success notifications and valid-ingredient feedback.
    pub success_fg: String,
    /// Error notifications and feedback.
    pub error_fg: String,
    /// Star bars and the active rating button.
    pub rating_fg: String,
}

impl Theme {
    /// Loads a built-in theme by name.
    ///
    /// Returns `None` if the name is not `recipe-dark` or `recipe-light`.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let toml_str = match name {
            "recipe-dark" => include_str!("../../themes/recipe-dark.toml"),
            "recipe-light" => include_str!("../../themes/recipe-light.toml"),
            _ => return None,
        };

        toml::from_str(toml_str).ok()
    }

    /// Loads a theme from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`RecipeClientError::Theme`] if the file cannot be read or
    /// the TOML content does not describe a theme.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| {
            RecipeClientError::Theme(format!("Failed to read {}: {e}", path.display()))
        })?;

        toml::from_str(&contents)
            .map_err(|e| RecipeClientError::Theme(format!("Failed to parse theme TOML: {e}")))
    }

    /// Foreground colour for a notification or feedback line.
    #[must_use]
    pub fn severity_fg(&self, severity: Severity) -> &str {
        match severity {
            Severity::Success => &self.colors.success_fg,
            Severity::Error => &self.colors.error_fg,
        }
    }

    /// Converts a hex color to an RGB tuple, falling back to white.
    fn hex_to_rgb(hex: &str) -> (u8, u8, u8) {
        let hex = hex.trim_start_matches('#').trim();

        if hex.len() != 6 || !hex.is_ascii() {
            return (255, 255, 255);
        }

        let r = u8::from_str_radix(&hex[0..2], 16).unwrap_or(255);
        let g = u8::from_str_radix(&hex[2..4], 16).unwrap_or(255);
        let b = u8::from_str_radix(&hex[4..6], 16).unwrap_or(255);

        (r, g, b)
    }

    /// Generates an ANSI 24-bit foreground color escape sequence.
    ///
    /// # Example
    ///
    /// ```rust
    /// use recipe_client::ui::theme::Theme;
    ///
    /// assert_eq!(Theme::fg("#ff8000"), "\u{1b}[38;2;255;128;0m");
    /// ```
    #[must_use]
    pub fn fg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[38;2;{r};{g};{b}m")
    }

    /// Generates an ANSI 24-bit background color escape sequence.
    #[must_use]
    pub fn bg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[48;2;{r};{g};{b}m")
    }

    #[must_use]
    pub const fn bold() -> &'static str {
        "\u{001b}[1m"
    }

    #[must_use]
    pub const fn dim() -> &'static str {
        "\u{001b}[2m"
    }

    /// Returns the ANSI reset escape sequence (`\x1b[0m`).
    ///
    /// Clears all styling (colors, bold, dim, etc.).
    #[must_use]
    pub const fn reset() -> &'static str {
        "\u{001b}[0m"
    }
}

impl Default for Theme {
    /// Returns the default theme (`recipe-dark`).
    ///
    /// # Panics
    ///
    /// Panics if the built-in theme fails to parse (should never occur).
    fn default() -> Self {
        Self::from_name("recipe-dark").expect("Built-in recipe-dark theme should always parse")
    }
}
