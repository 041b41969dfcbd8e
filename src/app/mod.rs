//! Application layer coordinating state, events, and actions.
//!
//! This layer sits between the binary (main.rs) and the domain/api/worker
//! layers and implements the event-driven controller of the client.
//!
//! # Architecture
//!
//! The application layer follows a unidirectional data flow pattern:
//!
//! ```text
//! Command line → Events → Event Handler → State Mutations → Actions → Side Effects
//!                              ↑                                          ↓
//!                              └────────── Worker Responses / Timers ─────┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`commands`]: Parsing of typed command lines into events
//! - [`handler`]: Event processing logic and state transition coordinator
//! - [`modes`]: Rating filter, form and panel state machine types
//! - [`search`]: Search/filter coordinator
//! - [`session`]: Controller loop owning state, worker and frontend
//! - [`state`]: Central application state container and view model computation
//!
//! # Example
//!
//! ```rust
//! use recipe_client::app::{handle_event, Action, AppState, Event};
//! use recipe_client::ui::Theme;
//!
//! let mut state = AppState::new(Theme::default());
//! let (_, actions) = handle_event(&mut state, &Event::LoadAllRecipes)?;
//! assert!(actions.iter().any(|a| matches!(a, Action::Dispatch(_))));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod actions;
pub mod commands;
pub mod handler;
pub mod modes;
pub mod search;
pub mod session;
pub mod state;

pub use actions::{Action, DebounceKey};
pub use commands::Command;
pub use handler::{handle_event, Event};
pub use modes::{FormMode, Panel, RatingFilter, Severity};
pub use search::{RecipeResults, SearchCoordinator, SearchOutcome};
pub use session::Session;
pub use state::AppState;
