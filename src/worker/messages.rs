//! Request and response envelopes exchanged between the controller and the
//! worker tasks.
//!
//! Every request carries the generation number it was issued under and the
//! tracing context of the span that issued it, so the response can be matched
//! against the latest request of its kind and its spans linked to the caller.

use std::time::Duration;

use crate::domain::error::{ErrorKind, ErrorReport};
use crate::domain::recipe::{
    ExportFormat, GeneratedRecipe, Rating, RecipeEdit, RecipeId, RecipeRecord, RecipeRequest,
    RecipeSummary, SaveReceipt, ValidationOutcome,
};
use crate::domain::search::SearchQuery;

/// Distributed tracing context for cross-task span propagation.
///
/// Captures the current trace and span IDs from OpenTelemetry so spans opened
/// by the worker task are parented to the span that issued the request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceContext {
    /// OpenTelemetry trace ID as a hex string.
    pub trace_id: String,

    /// Parent span ID for linking spans across tasks.
    pub parent_span_id: String,
}

impl TraceContext {
    /// Creates a trace context from the current tracing span.
    ///
    /// Returns `None` when no OpenTelemetry layer is installed or the span
    /// context is invalid.
    #[must_use]
    pub fn from_current() -> Option<Self> {
        use opentelemetry::trace::TraceContextExt;
        use tracing_opentelemetry::OpenTelemetrySpanExt;

        let otel_context = tracing::Span::current().context();
        let span_ref = otel_context.span();
        let span_context = span_ref.span_context();

        if !span_context.is_valid() {
            return None;
        }

        Some(Self {
            trace_id: format!("{:032x}", span_context.trace_id()),
            parent_span_id: format!("{:016x}", span_context.span_id()),
        })
    }

    /// Rebuilds the remote OpenTelemetry context this trace context points at.
    #[must_use]
    pub fn to_otel_context(&self) -> Option<opentelemetry::Context> {
        use opentelemetry::trace::{
            SpanContext, SpanId, TraceContextExt, TraceFlags, TraceId, TraceState,
        };

        let trace_id = TraceId::from_hex(&self.trace_id).ok()?;
        let span_id = SpanId::from_hex(&self.parent_span_id).ok()?;
        let span_context = SpanContext::new(
            trace_id,
            span_id,
            TraceFlags::SAMPLED,
            true,
            TraceState::default(),
        );

        Some(opentelemetry::Context::current().with_remote_span_context(span_context))
    }
}

/// Kinds of backend request, each with its own generation counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestKind {
    Validate,
    Generate,
    Save,
    Export,
    List,
    Detail,
    Update,
    Rate,
    Delete,
}

impl RequestKind {
    pub const ALL: [Self; 9] = [
        Self::Validate,
        Self::Generate,
        Self::Save,
        Self::Export,
        Self::List,
        Self::Detail,
        Self::Update,
        Self::Rate,
        Self::Delete,
    ];

    /// Whether a newer request of this kind makes older responses stale.
    ///
    /// Mutations never supersede each other; every one of them is applied.
    #[must_use]
    pub const fn supersedes(self) -> bool {
        matches!(self, Self::Validate | Self::List | Self::Detail)
    }

    /// Message shown when a request of this kind fails without a usable
    /// backend message.
    #[must_use]
    pub const fn fallback_message(self) -> &'static str {
        match self {
            Self::Validate => "Error validating ingredients",
            Self::Generate => "Failed to generate recipe",
            Self::Save => "Failed to save recipe",
            Self::Export => "Failed to export recipe",
            Self::List => "Failed to load recipes",
            Self::Detail => "Failed to load recipe",
            Self::Update => "Failed to update recipe",
            Self::Rate => "Failed to update rating",
            Self::Delete => "Failed to delete recipe",
        }
    }

    /// User-facing text for a failed request of this kind.
    #[must_use]
    pub fn failure_message(self, report: &ErrorReport) -> String {
        if self == Self::Generate && report.kind == ErrorKind::Transport {
            return "Network error. Please check your connection and try again.".to_string();
        }
        report.message_or(self.fallback_message())
    }

    pub(crate) const fn index(self) -> usize {
        self as usize
    }
}

/// Why an ingredient validation was requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationIntent {
    /// Debounced while typing; failures are absorbed.
    Silent,

    /// The user asked for validation.
    Explicit,

    /// Gate in front of a generate request.
    BeforeGenerate,
}

/// Backend request issued by the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiRequest {
    Validate {
        ingredients: String,
        intent: ValidationIntent,
    },
    Generate(RecipeRequest),
    Save(GeneratedRecipe),
    Export {
        format: ExportFormat,
        recipe: GeneratedRecipe,
    },
    /// Search with user criteria; an empty query yields a prompt.
    Search(SearchQuery),
    /// Unfiltered listing.
    ListAll,
    Detail(RecipeId),
    Update {
        id: RecipeId,
        edit: RecipeEdit,
    },
    Rate {
        id: RecipeId,
        rating: Rating,
    },
    Delete(RecipeId),
}

impl ApiRequest {
    #[must_use]
    pub const fn kind(&self) -> RequestKind {
        match self {
            Self::Validate { .. } => RequestKind::Validate,
            Self::Generate(_) => RequestKind::Generate,
            Self::Save(_) => RequestKind::Save,
            Self::Export { .. } => RequestKind::Export,
            Self::Search(_) | Self::ListAll => RequestKind::List,
            Self::Detail(_) => RequestKind::Detail,
            Self::Update { .. } => RequestKind::Update,
            Self::Rate { .. } => RequestKind::Rate,
            Self::Delete(_) => RequestKind::Delete,
        }
    }

    /// Validation intent, for validation requests.
    #[must_use]
    pub const fn intent(&self) -> Option<ValidationIntent> {
        match self {
            Self::Validate { intent, .. } => Some(*intent),
            _ => None,
        }
    }
}

/// A request tagged with its generation and trace context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    pub generation: u64,
    pub request: ApiRequest,
    pub trace_context: Option<TraceContext>,
}

impl Envelope {
    /// Wraps `request`, capturing the current trace context.
    #[must_use]
    pub fn new(generation: u64, request: ApiRequest) -> Self {
        Self {
            generation,
            request,
            trace_context: TraceContext::from_current(),
        }
    }

    #[must_use]
    pub const fn kind(&self) -> RequestKind {
        self.request.kind()
    }
}

/// Result of one backend request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiOutcome {
    Validated {
        intent: ValidationIntent,
        outcome: ValidationOutcome,
    },
    Generated(GeneratedRecipe),
    Saved(SaveReceipt),
    Exported {
        format: ExportFormat,
        file_name: String,
        bytes: Vec<u8>,
    },
    /// The search had no criteria; see
    /// [`SearchCoordinator::execute`](crate::app::search::SearchCoordinator::execute).
    Prompt,
    Listed {
        query: SearchQuery,
        recipes: Vec<RecipeSummary>,
    },
    Loaded(RecipeRecord),
    Updated {
        id: RecipeId,
        edit: RecipeEdit,
    },
    Rated {
        id: RecipeId,
        rating: Rating,
    },
    Deleted(RecipeId),
    Failed {
        /// Set for validation requests so silent failures can be absorbed.
        intent: Option<ValidationIntent>,
        report: ErrorReport,
    },
}

/// Response delivered back to the controller as an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub generation: u64,
    pub kind: RequestKind,
    pub outcome: ApiOutcome,
}

/// How long a notification stays on screen.
#[must_use]
pub const fn notification_lifetime(is_error: bool) -> Duration {
    if is_error {
        Duration::from_secs(5)
    } else {
        Duration::from_secs(3)
    }
}
