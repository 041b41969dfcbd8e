//! Event handling and state transition logic.
//!
//! [`handle_event`] is the dispatch table of the client: every user input,
//! backend response and local effect result arrives as an [`Event`], mutates
//! [`AppState`] and yields the [`Action`]s the session must perform. The
//! handler itself never touches the network, timers or the terminal.
//!
//! # Architecture
//!
//! 1. Events arrive from the command line, the worker or timers
//! 2. [`handle_event`] pattern-matches the event type
//! 3. State mutations occur via `AppState` methods
//! 4. Actions are collected and returned for execution
//!
//! Backend responses carry the generation their request was issued under.
//! Responses for validation, listing and detail requests that are no longer
//! the latest of their kind are dropped here.
//!
//! # Example
//!
//! ```rust
//! use recipe_client::app::{handle_event, AppState, Event};
//! use recipe_client::ui::Theme;
//!
//! let mut state = AppState::new(Theme::default());
//! let (render, actions) = handle_event(&mut state, &Event::ShowAbout)?;
//! assert!(render && actions.is_empty());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use std::path::PathBuf;

use super::actions::{Action, DebounceKey};
use super::modes::{FormMode, Panel, Severity};
use super::state::AppState;
use crate::domain::error::{RecipeClientError, Result};
use crate::domain::recipe::{ExportFormat, Rating, RecipeEdit, RecipeId, ValidationOutcome};
use crate::domain::search::SEARCH_PROMPT;
use crate::worker::{ApiOutcome, ApiRequest, ApiResponse, Envelope, RequestKind, ValidationIntent};

const EMPTY_INGREDIENTS: &str = "Please enter at least one ingredient";

/// Events triggered by user input, backend responses or local effects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Ingredients field edited; schedules a silent validation.
    IngredientsChanged(String),
    DietaryChanged(String),
    CuisineChanged(String),
    ServingSizeChanged(u32),

    /// Validate button.
    ValidateRequested,
    /// Generate button; validates first, then generates.
    GenerateRequested,
    SaveRequested,
    ExportRequested(ExportFormat),
    CopyRequested,

    /// Search box edited; schedules a debounced search.
    SearchTextChanged(String),
    /// Search submitted; runs at once.
    SearchSubmitted,
    /// Rating filter button for `n` stars.
    RatingFilterClicked(u8),
    /// Clears search criteria and lists every saved recipe.
    LoadAllRecipes,

    /// Moves selection down by one (wraps to top).
    SelectNext,
    /// Moves selection up by one (wraps to bottom).
    SelectPrevious,
    /// Opens the selected list row.
    OpenSelected,
    OpenRecipe(RecipeId),

    RateRecipe {
        id: RecipeId,
        stars: u8,
    },
    EditRecipe {
        id: RecipeId,
        edit: RecipeEdit,
    },
    DeleteRecipe(RecipeId),

    ShowGenerator,
    ShowLibrary,
    /// Leaves the detail panel for the list; ignored elsewhere.
    Back,
    ShowAbout,
    CloseAbout,

    /// Timer for notification `id` elapsed.
    DismissNotification(u64),

    /// A backend request finished.
    ApiResponse(ApiResponse),

    /// An export was written to disk.
    DownloadSaved {
        format: ExportFormat,
        path: PathBuf,
    },
    DownloadFailed {
        format: ExportFormat,
        error: String,
    },

    /// The frontend finished a clipboard write.
    ClipboardResult {
        ok: bool,
    },
}

/// Processes an event, mutates application state, and returns actions to execute.
///
/// The returned bool tells the session whether the view changed.
///
/// # Errors
///
/// Returns [`RecipeClientError::InvalidRating`] for a star count outside
/// `1..=5` and [`RecipeClientError::Validation`] for an empty edit. State is
/// left untouched in both cases.
#[allow(clippy::too_many_lines)]
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = ?event).entered();

    match event {
        Event::IngredientsChanged(text) => {
            if state.form_mode == FormMode::Busy {
                tracing::debug!("form busy, ignoring edit");
                return Ok((false, vec![]));
            }
            state.form.ingredients.clone_from(text);
            if text.trim().is_empty() {
                state.feedback = None;
                // Late answers for the old text are dropped.
                state.begin(RequestKind::Validate);
                return Ok((true, vec![Action::CancelDebounce(DebounceKey::Validation)]));
            }
            let envelope = envelope(
                state,
                ApiRequest::Validate {
                    ingredients: text.clone(),
                    intent: ValidationIntent::Silent,
                },
            );
            Ok((
                true,
                vec![Action::Debounce {
                    key: DebounceKey::Validation,
                    envelope,
                }],
            ))
        }
        Event::DietaryChanged(text) => {
            if state.form_mode == FormMode::Busy {
                return Ok((false, vec![]));
            }
            state.form.dietary_restrictions.clone_from(text);
            Ok((true, vec![]))
        }
        Event::CuisineChanged(text) => {
            if state.form_mode == FormMode::Busy {
                return Ok((false, vec![]));
            }
            state.form.cuisine_preference.clone_from(text);
            Ok((true, vec![]))
        }
        Event::ServingSizeChanged(servings) => {
            if state.form_mode == FormMode::Busy {
                return Ok((false, vec![]));
            }
            state.form.serving_size = *servings;
            Ok((true, vec![]))
        }
        Event::ValidateRequested => {
            if state.form_mode == FormMode::Busy {
                tracing::debug!("generate in progress, ignoring validate");
                return Ok((false, vec![]));
            }
            if state.form.ingredients.trim().is_empty() {
                state.set_feedback(Severity::Error, EMPTY_INGREDIENTS);
                return Ok((true, vec![Action::CancelDebounce(DebounceKey::Validation)]));
            }
            let request = ApiRequest::Validate {
                ingredients: state.form.ingredients.clone(),
                intent: ValidationIntent::Explicit,
            };
            Ok((
                false,
                vec![
                    Action::CancelDebounce(DebounceKey::Validation),
                    Action::Dispatch(envelope(state, request)),
                ],
            ))
        }
        Event::GenerateRequested => {
            if state.form_mode == FormMode::Busy {
                tracing::debug!("generate already in progress");
                return Ok((false, vec![]));
            }
            if let Err(e) = state.form.to_request().check() {
                let message = match e {
                    RecipeClientError::Validation(message) => message,
                    other => other.to_string(),
                };
                state.set_feedback(Severity::Error, message);
                return Ok((true, vec![]));
            }

            state.form_mode = FormMode::Busy;
            let request = ApiRequest::Validate {
                ingredients: state.form.ingredients.clone(),
                intent: ValidationIntent::BeforeGenerate,
            };
            Ok((
                true,
                vec![
                    Action::CancelDebounce(DebounceKey::Validation),
                    Action::Dispatch(envelope(state, request)),
                ],
            ))
        }
        Event::SaveRequested => {
            let Some(recipe) = state.current_recipe.clone() else {
                return Ok((true, vec![state.show_error("No recipe to save")]));
            };
            Ok((false, vec![Action::Dispatch(envelope(state, ApiRequest::Save(recipe)))]))
        }
        Event::ExportRequested(format) => {
            let Some(recipe) = state.current_recipe.clone() else {
                return Ok((true, vec![state.show_error("No recipe to export")]));
            };
            let request = ApiRequest::Export {
                format: *format,
                recipe,
            };
            Ok((false, vec![Action::Dispatch(envelope(state, request))]))
        }
        Event::CopyRequested => {
            let Some(recipe) = &state.current_recipe else {
                return Ok((true, vec![state.show_error("No recipe to copy")]));
            };
            Ok((false, vec![Action::CopyToClipboard(recipe.clipboard_text())]))
        }
        Event::SearchTextChanged(text) => {
            state.panel = Panel::Library;
            state.search.set_free_text(text);
            let query = state.search.current_query();
            if query.is_empty() {
                return Ok((true, show_prompt(state)));
            }
            let envelope = envelope(state, ApiRequest::Search(query));
            Ok((
                true,
                vec![Action::Debounce {
                    key: DebounceKey::Search,
                    envelope,
                }],
            ))
        }
        Event::SearchSubmitted => Ok((true, submit_search(state))),
        Event::RatingFilterClicked(stars) => {
            let rating = Rating::new(*stars)?;
            state.search.toggle_rating_filter(rating);
            Ok((true, submit_search(state)))
        }
        Event::LoadAllRecipes => {
            state.search.reset();
            state.panel = Panel::Library;
            Ok((true, list_all(state)))
        }
        Event::SelectNext => {
            state.move_selection_down();
            Ok((true, vec![]))
        }
        Event::SelectPrevious => {
            state.move_selection_up();
            Ok((true, vec![]))
        }
        Event::OpenSelected => {
            let Some(id) = state.selected_recipe().map(|r| r.id) else {
                tracing::debug!("no recipe selected");
                return Ok((false, vec![]));
            };
            Ok((false, vec![Action::Dispatch(envelope(state, ApiRequest::Detail(id)))]))
        }
        Event::OpenRecipe(id) => {
            Ok((false, vec![Action::Dispatch(envelope(state, ApiRequest::Detail(*id)))]))
        }
        Event::RateRecipe { id, stars } => {
            let rating = Rating::new(*stars)?;
            let request = ApiRequest::Rate { id: *id, rating };
            Ok((false, vec![Action::Dispatch(envelope(state, request))]))
        }
        Event::EditRecipe { id, edit } => {
            if edit.is_empty() {
                return Err(RecipeClientError::Validation("Nothing to update".to_string()));
            }
            let request = ApiRequest::Update {
                id: *id,
                edit: edit.clone(),
            };
            Ok((false, vec![Action::Dispatch(envelope(state, request))]))
        }
        Event::DeleteRecipe(id) => {
            Ok((false, vec![Action::Dispatch(envelope(state, ApiRequest::Delete(*id)))]))
        }
        Event::ShowGenerator => {
            state.panel = Panel::Generator;
            Ok((true, vec![]))
        }
        Event::ShowLibrary => Ok((true, show_library(state))),
        Event::Back => {
            if state.panel != Panel::Detail {
                tracing::debug!(panel = ?state.panel, "nothing to go back to");
                return Ok((false, vec![]));
            }
            Ok((true, show_library(state)))
        }
        Event::ShowAbout => {
            state.about_open = true;
            Ok((true, vec![]))
        }
        Event::CloseAbout => {
            state.about_open = false;
            Ok((true, vec![]))
        }
        Event::DismissNotification(id) => Ok((state.dismiss(*id), vec![])),
        Event::ApiResponse(response) => Ok(handle_response(state, response)),
        Event::DownloadSaved { format, path } => {
            tracing::info!(path = %path.display(), "recipe exported");
            let message = format!("Recipe exported as {}", format.as_str().to_uppercase());
            Ok((true, vec![state.show_success(message)]))
        }
        Event::DownloadFailed { format, error } => {
            tracing::warn!(format = ?format, error = %error, "export not written");
            Ok((true, vec![state.show_error(RequestKind::Export.fallback_message())]))
        }
        Event::ClipboardResult { ok: true } => {
            Ok((true, vec![state.show_success("Recipe copied to clipboard!")]))
        }
        Event::ClipboardResult { ok: false } => {
            Ok((true, vec![state.show_error("Failed to copy recipe")]))
        }
    }
}

fn show_library(state: &mut AppState) -> Vec<Action> {
    state.panel = Panel::Library;
    if state.results.is_empty() && state.list_message.is_none() {
        return list_all(state);
    }
    vec![]
}

/// Applies one backend response.
fn handle_response(state: &mut AppState, response: &ApiResponse) -> (bool, Vec<Action>) {
    let ApiResponse {
        generation,
        kind,
        outcome,
    } = response;

    if !state.is_latest(*kind, *generation) {
        tracing::debug!(
            kind = ?kind,
            generation = generation,
            latest = state.generation(*kind),
            "discarding stale response"
        );
        return (false, vec![]);
    }

    match outcome {
        ApiOutcome::Validated { intent, outcome } => on_validated(state, *intent, outcome),
        ApiOutcome::Generated(recipe) => {
            tracing::info!(servings = recipe.serving_size, "recipe generated");
            state.form_mode = FormMode::Editable;
            state.loading = false;
            state.current_recipe = Some(recipe.clone());
            state.recipe_visible = true;
            (true, vec![])
        }
        ApiOutcome::Saved(receipt) => (true, vec![state.show_success(receipt.describe())]),
        ApiOutcome::Exported {
            format,
            file_name,
            bytes,
        } => (
            false,
            vec![Action::SaveDownload {
                format: *format,
                file_name: file_name.clone(),
                bytes: bytes.clone(),
            }],
        ),
        ApiOutcome::Prompt => {
            state.show_list_message(SEARCH_PROMPT);
            (true, vec![])
        }
        ApiOutcome::Listed { query, recipes } => {
            tracing::debug!(count = recipes.len(), "recipes listed");
            state.apply_listing(query.clone(), recipes.clone());
            (true, vec![])
        }
        ApiOutcome::Loaded(record) => {
            state.detail = Some(record.clone());
            state.panel = Panel::Detail;
            (true, vec![])
        }
        ApiOutcome::Updated { id, edit } => {
            if let Some(detail) = state.detail.as_mut().filter(|d| d.id == *id) {
                edit.apply_to(detail);
                if let Some(summary) = state.results.iter_mut().find(|r| r.id == *id) {
                    detail.refresh_summary(summary);
                }
            } else if let Some(summary) = state.results.iter_mut().find(|r| r.id == *id) {
                if let Some(title) = &edit.title {
                    summary.title.clone_from(title);
                }
                if let Some(ingredients) = &edit.ingredients_used {
                    summary.ingredients_used.clone_from(ingredients);
                }
            }
            (true, vec![state.show_success("Recipe updated")])
        }
        ApiOutcome::Rated { id, rating } => {
            state.apply_rating(*id, *rating);
            (true, vec![state.show_success(format!("Rated {rating} stars"))])
        }
        ApiOutcome::Deleted(id) => {
            state.remove_recipe(*id);
            (true, vec![state.show_success("Recipe deleted")])
        }
        ApiOutcome::Failed { intent, report } => {
            let message = kind.failure_message(report);
            match (kind, intent) {
                (RequestKind::Validate, Some(ValidationIntent::Silent)) => {
                    tracing::debug!(detail = ?report.detail, "silent validation failed");
                    (false, vec![])
                }
                (RequestKind::Validate, Some(ValidationIntent::BeforeGenerate)) => {
                    state.form_mode = FormMode::Editable;
                    state.set_feedback(Severity::Error, message);
                    (true, vec![])
                }
                (RequestKind::Validate, _) => {
                    state.set_feedback(Severity::Error, message);
                    (true, vec![])
                }
                (RequestKind::Generate, _) => {
                    tracing::warn!(message = %message, "recipe generation failed");
                    state.form_mode = FormMode::Editable;
                    state.loading = false;
                    (true, vec![state.show_error(message)])
                }
                _ => {
                    tracing::warn!(kind = ?kind, message = %message, "request failed");
                    (true, vec![state.show_error(message)])
                }
            }
        }
    }
}

fn on_validated(
    state: &mut AppState,
    intent: ValidationIntent,
    outcome: &ValidationOutcome,
) -> (bool, Vec<Action>) {
    let severity = if outcome.valid {
        Severity::Success
    } else {
        Severity::Error
    };

    match intent {
        ValidationIntent::Silent | ValidationIntent::Explicit => {
            state.set_feedback(severity, outcome.message.clone());
            (true, vec![])
        }
        ValidationIntent::BeforeGenerate if outcome.valid => {
            state.feedback = None;
            state.loading = true;
            state.recipe_visible = false;
            let request = ApiRequest::Generate(state.form.to_request());
            (true, vec![Action::Dispatch(envelope(state, request))])
        }
        ValidationIntent::BeforeGenerate => {
            state.form_mode = FormMode::Editable;
            state.set_feedback(severity, outcome.message.clone());
            (true, vec![])
        }
    }
}

/// Searches now with the coordinator's criteria, or shows the prompt.
fn submit_search(state: &mut AppState) -> Vec<Action> {
    state.panel = Panel::Library;
    let query = state.search.current_query();
    if query.is_empty() {
        return show_prompt(state);
    }
    vec![
        Action::CancelDebounce(DebounceKey::Search),
        Action::Dispatch(envelope(state, ApiRequest::Search(query))),
    ]
}

fn show_prompt(state: &mut AppState) -> Vec<Action> {
    // Results of an abandoned search must not replace the prompt.
    state.begin(RequestKind::List);
    state.show_list_message(SEARCH_PROMPT);
    vec![Action::CancelDebounce(DebounceKey::Search)]
}

fn list_all(state: &mut AppState) -> Vec<Action> {
    vec![
        Action::CancelDebounce(DebounceKey::Search),
        Action::Dispatch(envelope(state, ApiRequest::ListAll)),
    ]
}

/// Wraps `request` under a fresh generation for its kind.
fn envelope(state: &mut AppState, request: ApiRequest) -> Envelope {
    let generation = state.begin(request.kind());
    Envelope::new(generation, request)
}
