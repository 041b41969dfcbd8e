//! Background tasks for backend requests, debounce timers and local effects.
//!
//! The controller never awaits the network. It hands [`Envelope`]s to the
//! [`Worker`], which runs each request on its own tokio task and reports the
//! outcome back over the event channel as [`Event::ApiResponse`].
//!
//! # Architecture
//!
//! - `messages`: Request/response envelopes with generations and trace context
//! - `handler`: Request execution against a [`RecipeApi`]
//! - `debounce`: Trailing-edge debounced actions

pub mod debounce;
pub mod handler;
pub mod messages;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use futures_util::future::BoxFuture;
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, warn};

use crate::api::RecipeApi;
use crate::app::actions::DebounceKey;
use crate::app::handler::Event;
use crate::domain::recipe::ExportFormat;
use debounce::Debounced;

pub use messages::{
    ApiOutcome, ApiRequest, ApiResponse, Envelope, RequestKind, TraceContext, ValidationIntent,
};

/// Timing and paging settings for the worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkerSettings {
    pub per_page: u32,
    pub validation_delay: Duration,
    pub search_delay: Duration,
}

impl Default for WorkerSettings {
    fn default() -> Self {
        Self {
            per_page: 20,
            validation_delay: Duration::from_millis(500),
            search_delay: Duration::from_millis(300),
        }
    }
}

/// Spawns request tasks and owns the debounced bindings.
pub struct Worker {
    api: Arc<dyn RecipeApi>,
    events: UnboundedSender<Event>,
    per_page: u32,
    validation: Debounced<Envelope>,
    search: Debounced<Envelope>,
}

impl Worker {
    /// Creates a worker reporting to `events`. Must be called inside a tokio runtime
    /// before any method that spawns.
    #[must_use]
    pub fn new(
        api: Arc<dyn RecipeApi>,
        events: UnboundedSender<Event>,
        settings: WorkerSettings,
    ) -> Self {
        let validation = Debounced::new(
            settings.validation_delay,
            runner(Arc::clone(&api), events.clone(), settings.per_page),
        );
        let search = Debounced::new(
            settings.search_delay,
            runner(Arc::clone(&api), events.clone(), settings.per_page),
        );

        Self {
            api,
            events,
            per_page: settings.per_page,
            validation,
            search,
        }
    }

    /// Runs `envelope` now on its own task.
    pub fn dispatch(&self, envelope: Envelope) {
        debug!(kind = ?envelope.kind(), generation = envelope.generation, "dispatching request");
        tokio::spawn(run(
            Arc::clone(&self.api),
            self.events.clone(),
            envelope,
            self.per_page,
        ));
    }

    /// Schedules `envelope` on the debounced binding for `key`.
    pub fn debounce(&self, key: DebounceKey, envelope: Envelope) {
        debug!(key = ?key, generation = envelope.generation, "debouncing request");
        self.binding(key).trigger(envelope);
    }

    /// Drops the pending debounced request for `key`, if any.
    pub fn cancel(&self, key: DebounceKey) {
        if self.binding(key).cancel() {
            debug!(key = ?key, "pending debounced request cancelled");
        }
    }

    #[must_use]
    pub fn is_pending(&self, key: DebounceKey) -> bool {
        self.binding(key).is_pending()
    }

    /// Sends [`Event::DismissNotification`] for `id` after `after`.
    pub fn schedule_dismiss(&self, id: u64, after: Duration) {
        let events = self.events.clone();
        tokio::spawn(async move {
            tokio::time::sleep(after).await;
            // Closed channel means the session ended.
            let _ = events.send(Event::DismissNotification(id));
        });
    }

    /// Writes an exported recipe to `dir` and reports the result as an event.
    pub fn save_download(&self, dir: PathBuf, format: ExportFormat, file_name: String, bytes: Vec<u8>) {
        let events = self.events.clone();
        tokio::spawn(async move {
            let path = dir.join(&file_name);
            let result = match tokio::fs::create_dir_all(&dir).await {
                Ok(()) => tokio::fs::write(&path, &bytes).await,
                Err(e) => Err(e),
            };

            let event = match result {
                Ok(()) => {
                    debug!(path = %path.display(), bytes = bytes.len(), "export written");
                    Event::DownloadSaved { format, path }
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "failed to write export");
                    Event::DownloadFailed {
                        format,
                        error: e.to_string(),
                    }
                }
            };
            let _ = events.send(event);
        });
    }

    const fn binding(&self, key: DebounceKey) -> &Debounced<Envelope> {
        match key {
            DebounceKey::Validation => &self.validation,
            DebounceKey::Search => &self.search,
        }
    }
}

fn runner(
    api: Arc<dyn RecipeApi>,
    events: UnboundedSender<Event>,
    per_page: u32,
) -> impl Fn(Envelope) -> BoxFuture<'static, ()> + Send + Sync + 'static {
    move |envelope| Box::pin(run(Arc::clone(&api), events.clone(), envelope, per_page))
}

async fn run(
    api: Arc<dyn RecipeApi>,
    events: UnboundedSender<Event>,
    envelope: Envelope,
    per_page: u32,
) {
    let response = handler::perform(api.as_ref(), envelope, per_page).await;
    if events.send(Event::ApiResponse(response)).is_err() {
        debug!("event channel closed, dropping response");
    }
}
