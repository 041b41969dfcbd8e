//! Actions representing side effects to be executed by the session.
//!
//! The event handler never performs I/O. It mutates [`AppState`] and returns
//! a `Vec<Action>`; the [`Session`] executes them in order against the worker
//! and the frontend.
//!
//! # Example
//!
//! ```rust
//! use recipe_client::app::actions::{Action, DebounceKey};
//! use recipe_client::worker::{ApiRequest, Envelope};
//!
//! let actions = vec![
//!     Action::CancelDebounce(DebounceKey::Search),
//!     Action::Dispatch(Envelope::new(1, ApiRequest::ListAll)),
//! ];
//! assert_eq!(actions.len(), 2);
//! ```
//!
//! [`AppState`]: crate::app::AppState
//! [`Session`]: crate::app::session::Session

use std::time::Duration;

use crate::domain::recipe::ExportFormat;
use crate::worker::Envelope;

/// Debounced bindings owned by the worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DebounceKey {
    /// Silent ingredient validation while typing.
    Validation,
    /// Library search while typing.
    Search,
}

/// Commands produced by the event handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Runs a backend request immediately.
    Dispatch(Envelope),

    /// Runs a backend request after the binding's quiet period, replacing
    /// whatever the binding had pending.
    Debounce {
        key: DebounceKey,
        envelope: Envelope,
    },

    /// Drops the binding's pending request without running it.
    CancelDebounce(DebounceKey),

    /// Emits [`Event::DismissNotification`](crate::app::Event::DismissNotification)
    /// for `id` once `after` has elapsed.
    ScheduleDismiss { id: u64, after: Duration },

    /// Writes exported recipe bytes to the download directory.
    SaveDownload {
        format: ExportFormat,
        file_name: String,
        bytes: Vec<u8>,
    },

    /// Places text on the clipboard through the frontend.
    CopyToClipboard(String),
}
