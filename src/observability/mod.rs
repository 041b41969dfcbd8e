//! OpenTelemetry-based observability with file-based trace export.
//!
//! Spans recorded with `tracing` are exported as OTLP JSON lines to a
//! rotating file for offline analysis.
//!
//! ```text
//! tracing → tracing-opentelemetry → OpenTelemetry SDK → FileSpanExporter → JSON file
//! ```
//!
//! # Files
//!
//! - Traces go to `<data dir>/recipe-client/recipe-client-otlp.json`
//! - Files rotate at 10MB with 3 backups kept
//!
//! # Configuration
//!
//! The level filter is resolved from:
//! 1. `RUST_LOG` environment variable (highest priority)
//! 2. `trace_level` in the config file
//! 3. Default: `"info"`
//!
//! With `log_stderr = true` events are also printed to stderr, which keeps
//! them off the screen the frontend draws on stdout.
//!
//! # Usage
//!
//! ```rust,no_run
//! use recipe_client::observability::init_tracing;
//! use recipe_client::Config;
//!
//! let _guard = init_tracing(&Config::default());
//! tracing::debug!("client started");
//! ```

mod exporter;
mod rotating;

use opentelemetry::trace::TracerProvider as _;
use opentelemetry::KeyValue;
use opentelemetry_sdk::resource::Resource;
use opentelemetry_sdk::trace::TracerProvider;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub use exporter::{create_tracer_provider, FileSpanExporter};
pub use rotating::{RotatingFile, DEFAULT_BACKUPS, DEFAULT_MAX_BYTES};

use crate::infrastructure::paths::{ensure_parent, get_data_dir};
use crate::Config;

const SERVICE_NAME: &str = "recipe-client";

/// Trace file name inside the data directory.
pub const TRACE_FILE_NAME: &str = "recipe-client-otlp.json";

/// Keeps the tracer provider alive and flushes it when dropped.
#[must_use = "dropping the guard shuts tracing down"]
#[derive(Debug)]
pub struct TracingGuard {
    provider: Option<TracerProvider>,
}

impl Drop for TracingGuard {
    fn drop(&mut self) {
        if let Some(provider) = self.provider.take() {
            if let Err(e) = provider.shutdown() {
                eprintln!("failed to shut down tracer provider: {e}");
            }
        }
    }
}

/// Installs the global tracing subscriber.
///
/// Observability is optional: when the data directory cannot be created
/// the file exporter is skipped and only the level filter (plus the stderr
/// layer, if enabled) is installed. Calling this twice leaves the first
/// subscriber in place.
pub fn init_tracing(config: &Config) -> TracingGuard {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(config.trace_level.as_deref().unwrap_or("info"))
    });

    let trace_file = get_data_dir().join(TRACE_FILE_NAME);
    let provider = match ensure_parent(&trace_file) {
        Ok(()) => {
            let resource = Resource::new(vec![KeyValue::new("service.name", SERVICE_NAME)]);
            let exporter =
                FileSpanExporter::new(RotatingFile::new(trace_file), resource.clone(), SERVICE_NAME);
            Some(create_tracer_provider(exporter, resource))
        }
        Err(_) => None,
    };

    let otel_layer = provider
        .as_ref()
        .map(|p| OpenTelemetryLayer::new(p.tracer(SERVICE_NAME)));
    let stderr_layer = config.log_stderr.then(|| {
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
    });

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(otel_layer)
        .with(stderr_layer)
        .try_init();

    TracingGuard { provider }
}
