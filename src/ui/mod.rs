//! User interface rendering layer with component-based architecture.
//!
//! This module turns view models into ANSI-styled terminal output through
//! composable rendering components, behind the [`Frontend`] capability the
//! session is given.
//!
//! # Architecture
//!
//! ```text
//! AppState → compute_viewmodel → UIViewModel → Frontend::render → ANSI Output
//! ```
//!
//! # Modules
//!
//! - [`viewmodel`]: View model types representing renderable UI state
//! - [`render`]: The `Frontend` trait and the terminal frontend
//! - [`components`]: Composable UI component renderers
//! - [`theme`]: Color scheme definitions and ANSI escape sequence generation

pub mod components;
pub mod render;
pub mod theme;
pub mod viewmodel;

pub use render::{Frontend, TerminalFrontend};
pub use theme::Theme;
pub use viewmodel::{DisplayItem, EmptyState, FooterInfo, HeaderInfo, PanelView, UIViewModel};
