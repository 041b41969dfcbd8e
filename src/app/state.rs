//! Application state management and view model computation.
//!
//! [`AppState`] is the single session-state value owned by the controller:
//! the generator form, the current recipe, the library search and its
//! results, the open detail record, the transient notification and one
//! generation counter per request kind. Nothing else in the crate holds
//! mutable session state.
//!
//! # View Model Computation
//!
//! [`AppState::compute_viewmodel`] turns a state snapshot into a
//! [`UIViewModel`], handling list windowing around the selection, literal
//! match highlighting, star bars and responsive truncation.
//!
//! # Example
//!
//! ```rust
//! use recipe_client::app::AppState;
//! use recipe_client::ui::Theme;
//!
//! let state = AppState::new(Theme::default());
//! let viewmodel = state.compute_viewmodel(24, 80);
//! assert!(viewmodel.notification.is_none());
//! ```

use std::time::Duration;

use chrono::{DateTime, Utc};

use super::actions::Action;
use super::modes::{FormMode, Panel, Severity};
use super::search::SearchCoordinator;
use crate::domain::recipe::{
    star_bar, GeneratedRecipe, Rating, RecipeId, RecipeRecord, RecipeRequest, RecipeSummary,
    DEFAULT_SERVING_SIZE,
};
use crate::domain::search::{Highlighter, SearchQuery};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{
    ingredients_column_width, AboutView, DetailView, DisplayItem, EmptyState, FeedbackView,
    FooterInfo, FormField, GeneratorView, HeaderInfo, HighlightedText, LibraryView,
    NotificationView, PanelView, RatingButton, RecipeView, SearchBarInfo, UIViewModel,
    TITLE_COLUMN_WIDTH,
};
use crate::worker::messages::{notification_lifetime, RequestKind};

/// Rows taken by header, notification, search bar, rating buttons, column
/// headers, borders and footer in the library panel.
const LIBRARY_CHROME_ROWS: usize = 11;

/// Generator form contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorForm {
    pub ingredients: String,
    pub dietary_restrictions: String,
    pub cuisine_preference: String,
    pub serving_size: u32,
}

impl Default for GeneratorForm {
    fn default() -> Self {
        Self {
            ingredients: String::new(),
            dietary_restrictions: String::new(),
            cuisine_preference: String::new(),
            serving_size: DEFAULT_SERVING_SIZE,
        }
    }
}

impl GeneratorForm {
    /// Builds the generate request body from the form.
    #[must_use]
    pub fn to_request(&self) -> RecipeRequest {
        RecipeRequest {
            ingredients: self.ingredients.trim().to_string(),
            dietary_restrictions: self.dietary_restrictions.trim().to_string(),
            cuisine_preference: self.cuisine_preference.trim().to_string(),
            serving_size: self.serving_size,
        }
    }
}

/// Inline feedback under the ingredients field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feedback {
    pub severity: Severity,
    pub message: String,
}

/// Transient notification; `id` lets a late dismissal skip a newer one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: u64,
    pub severity: Severity,
    pub message: String,
}

/// Central application state container.
#[derive(Debug, Clone)]
pub struct AppState {
    pub form: GeneratorForm,
    pub form_mode: FormMode,
    pub feedback: Option<Feedback>,

    /// True while a generate request is in flight.
    pub loading: bool,

    /// Last generated recipe; target of save, export and copy.
    pub current_recipe: Option<GeneratedRecipe>,

    /// Hidden while a new recipe is being generated.
    pub recipe_visible: bool,

    pub search: SearchCoordinator,

    /// Results of the latest listing.
    pub results: Vec<RecipeSummary>,

    /// Query that produced `results`; drives highlighting.
    pub results_query: SearchQuery,

    /// Prompt or no-results message replacing the list.
    pub list_message: Option<String>,

    /// Zero-based index into `results`.
    pub selected_index: usize,

    pub detail: Option<RecipeRecord>,
    pub notification: Option<Notification>,
    pub about_open: bool,
    pub panel: Panel,
    pub theme: Theme,

    next_notification_id: u64,
    generations: [u64; RequestKind::ALL.len()],
}

impl AppState {
    #[must_use]
    pub fn new(theme: Theme) -> Self {
        Self {
            form: GeneratorForm::default(),
            form_mode: FormMode::Editable,
            feedback: None,
            loading: false,
            current_recipe: None,
            recipe_visible: false,
            search: SearchCoordinator::new(),
            results: Vec::new(),
            results_query: SearchQuery::default(),
            list_message: None,
            selected_index: 0,
            detail: None,
            notification: None,
            about_open: false,
            panel: Panel::Generator,
            theme,
            next_notification_id: 0,
            generations: [0; RequestKind::ALL.len()],
        }
    }

    /// Starts a new request of `kind` and returns its generation.
    pub fn begin(&mut self, kind: RequestKind) -> u64 {
        let slot = &mut self.generations[kind.index()];
        *slot += 1;
        *slot
    }

    /// Latest generation issued for `kind`.
    #[must_use]
    pub const fn generation(&self, kind: RequestKind) -> u64 {
        self.generations[kind.index()]
    }

    /// Whether a response of `kind` issued under `generation` should apply.
    ///
    /// Always true for kinds that do not supersede.
    #[must_use]
    pub const fn is_latest(&self, kind: RequestKind, generation: u64) -> bool {
        !kind.supersedes() || self.generations[kind.index()] == generation
    }

    pub fn set_feedback(&mut self, severity: Severity, message: impl Into<String>) {
        self.feedback = Some(Feedback {
            severity,
            message: message.into(),
        });
    }

    /// Shows an error notification and returns the action that dismisses it.
    pub fn show_error(&mut self, message: impl Into<String>) -> Action {
        self.notify(Severity::Error, message.into())
    }

    /// Shows a success notification and returns the action that dismisses it.
    pub fn show_success(&mut self, message: impl Into<String>) -> Action {
        self.notify(Severity::Success, message.into())
    }

    fn notify(&mut self, severity: Severity, message: String) -> Action {
        self.next_notification_id += 1;
        let id = self.next_notification_id;
        tracing::debug!(id, severity = ?severity, message = %message, "notification shown");
        self.notification = Some(Notification {
            id,
            severity,
            message,
        });
        Action::ScheduleDismiss {
            id,
            after: notification_lifetime(severity == Severity::Error),
        }
    }

    /// Clears the notification if `id` is still the one shown.
    pub fn dismiss(&mut self, id: u64) -> bool {
        if self.notification.as_ref().is_some_and(|n| n.id == id) {
            self.notification = None;
            true
        } else {
            false
        }
    }

    /// Moves selection down by one, wrapping to the top.
    pub fn move_selection_down(&mut self) {
        if self.results.is_empty() {
            return;
        }
        self.selected_index = (self.selected_index + 1) % self.results.len();
    }

    /// Moves selection up by one, wrapping to the bottom.
    pub fn move_selection_up(&mut self) {
        if self.results.is_empty() {
            return;
        }
        if self.selected_index == 0 {
            self.selected_index = self.results.len() - 1;
        } else {
            self.selected_index -= 1;
        }
    }

    #[must_use]
    pub fn selected_recipe(&self) -> Option<&RecipeSummary> {
        self.results.get(self.selected_index)
    }

    /// Replaces the list with `recipes` returned for `query`.
    pub fn apply_listing(&mut self, query: SearchQuery, recipes: Vec<RecipeSummary>) {
        self.list_message = if recipes.is_empty() {
            Some(if query.is_empty() {
                "No saved recipes yet".to_string()
            } else {
                query.no_results_message()
            })
        } else {
            None
        };
        self.results = recipes;
        self.results_query = query;
        self.clamp_selection();
    }

    /// Clears the list and shows `message` in its place.
    pub fn show_list_message(&mut self, message: impl Into<String>) {
        self.results.clear();
        self.results_query = SearchQuery::default();
        self.list_message = Some(message.into());
        self.selected_index = 0;
    }

    /// Records a new rating on the list row and the open detail.
    pub fn apply_rating(&mut self, id: RecipeId, rating: Rating) {
        if let Some(summary) = self.results.iter_mut().find(|r| r.id == id) {
            summary.rating = Some(rating.stars());
        }
        if let Some(detail) = self.detail.as_mut().filter(|d| d.id == id) {
            detail.rating = Some(rating.stars());
        }
    }

    /// Drops a deleted recipe from the list and closes it if open.
    pub fn remove_recipe(&mut self, id: RecipeId) {
        self.results.retain(|r| r.id != id);
        self.clamp_selection();
        if self.detail.as_ref().is_some_and(|d| d.id == id) {
            self.detail = None;
            if self.panel == Panel::Detail {
                self.panel = Panel::Library;
            }
        }
    }

    fn clamp_selection(&mut self) {
        if self.results.is_empty() {
            self.selected_index = 0;
        } else {
            self.selected_index = self.selected_index.min(self.results.len() - 1);
        }
    }

    /// Computes a renderable view model from current state and terminal size.
    #[must_use]
    pub fn compute_viewmodel(&self, rows: usize, cols: usize) -> UIViewModel {
        let body = match self.panel {
            Panel::Generator => PanelView::Generator(self.compute_generator()),
            Panel::Library => PanelView::Library(self.compute_library(rows, cols, Utc::now())),
            Panel::Detail => match &self.detail {
                Some(record) => PanelView::Detail(Self::compute_detail(record)),
                None => PanelView::Library(self.compute_library(rows, cols, Utc::now())),
            },
        };

        UIViewModel {
            header: self.compute_header(),
            notification: self.notification.as_ref().map(|n| NotificationView {
                severity: n.severity,
                message: n.message.clone(),
            }),
            body,
            about: self.about_open.then(Self::compute_about),
            footer: self.compute_footer(),
        }
    }

    fn compute_generator(&self) -> GeneratorView {
        let fields = vec![
            FormField {
                label: "Ingredients",
                value: self.form.ingredients.clone(),
            },
            FormField {
                label: "Dietary restrictions",
                value: self.form.dietary_restrictions.clone(),
            },
            FormField {
                label: "Cuisine preference",
                value: self.form.cuisine_preference.clone(),
            },
            FormField {
                label: "Serving size",
                value: self.form.serving_size.to_string(),
            },
        ];

        let recipe = self
            .current_recipe
            .as_ref()
            .filter(|_| self.recipe_visible)
            .map(|recipe| RecipeView {
                meta: vec![
                    ("Ingredients Used", recipe.ingredients_used.clone()),
                    ("Dietary", recipe.dietary_label().to_string()),
                    ("Cuisine", recipe.cuisine_label().to_string()),
                    ("Servings", recipe.serving_size.to_string()),
                ],
                body: recipe.recipe.clone(),
            });

        GeneratorView {
            fields,
            editable: self.form_mode == FormMode::Editable,
            feedback: self.feedback.as_ref().map(|f| FeedbackView {
                severity: f.severity,
                message: f.message.clone(),
            }),
            loading: self.loading,
            recipe,
        }
    }

    /// Library panel with the visible window of results.
    ///
    /// The window is centred on the selection and shifted to stay full near
    /// either end of the list.
    fn compute_library(&self, rows: usize, cols: usize, now: DateTime<Utc>) -> LibraryView {
        let filter = self.search.filter();
        let rating_buttons = Rating::all()
            .map(|rating| RatingButton {
                stars: rating.stars(),
                label: format!("{rating}+★"),
                is_active: filter.is_active(rating),
            })
            .collect();
        let search_bar = SearchBarInfo {
            query: self.search.free_text().to_string(),
        };

        if self.results.is_empty() {
            return LibraryView {
                search_bar,
                rating_buttons,
                display_items: Vec::new(),
                selected_index: 0,
                empty_state: Some(self.compute_empty_state()),
            };
        }

        let available_rows = rows.saturating_sub(LIBRARY_CHROME_ROWS).max(1);
        let mut visible_start = self.selected_index.saturating_sub(available_rows / 2);
        let visible_end = (visible_start + available_rows).min(self.results.len());
        if visible_end - visible_start < available_rows && self.results.len() >= available_rows {
            visible_start = visible_end.saturating_sub(available_rows);
        }

        let highlighter = self.results_query.highlighter();
        let ingredients_width = ingredients_column_width(cols);

        let display_items = self.results[visible_start..visible_end]
            .iter()
            .enumerate()
            .map(|(relative_idx, summary)| DisplayItem {
                id: summary.id,
                title: highlight(highlighter.as_ref(), &summary.title)
                    .truncated(TITLE_COLUMN_WIDTH - 1),
                ingredients: highlight(highlighter.as_ref(), &summary.ingredients_used)
                    .truncated(ingredients_width - 1),
                rating: star_bar(summary.rating),
                age: summary.time_ago(now),
                is_selected: visible_start + relative_idx == self.selected_index,
            })
            .collect();

        LibraryView {
            search_bar,
            rating_buttons,
            display_items,
            selected_index: self.selected_index.saturating_sub(visible_start),
            empty_state: None,
        }
    }

    fn compute_empty_state(&self) -> EmptyState {
        self.list_message.as_ref().map_or_else(
            || EmptyState {
                message: "Nothing loaded yet".to_string(),
                subtitle: "Type `all` to load every saved recipe".to_string(),
            },
            |message| EmptyState {
                message: message.clone(),
                subtitle: "Try a different search or clear the rating filter".to_string(),
            },
        )
    }

    fn compute_detail(record: &RecipeRecord) -> DetailView {
        DetailView {
            id: record.id,
            title: record.title.clone(),
            rating: star_bar(record.rating),
            meta: vec![
                ("Ingredients Used", record.ingredients_used.clone()),
                (
                    "Dietary",
                    record
                        .dietary_restrictions
                        .clone()
                        .filter(|d| !d.trim().is_empty())
                        .unwrap_or_else(|| "None".to_string()),
                ),
                (
                    "Cuisine",
                    record
                        .cuisine_preference
                        .clone()
                        .filter(|c| !c.trim().is_empty())
                        .unwrap_or_else(|| "Any".to_string()),
                ),
                ("Servings", record.serving_size.to_string()),
                ("Saved", record.timestamp.clone()),
            ],
            body: record.recipe.clone(),
        }
    }

    fn compute_about() -> AboutView {
        AboutView {
            lines: vec![
                format!("recipe-client {}", env!("CARGO_PKG_VERSION")),
                "Generate recipes from the ingredients you have,".to_string(),
                "then save, rate, search and export them.".to_string(),
                "Type `close` to dismiss.".to_string(),
            ],
        }
    }

    fn compute_header(&self) -> HeaderInfo {
        let title = match self.panel {
            Panel::Generator => " Recipe Generator ".to_string(),
            Panel::Library => format!(" Saved Recipes ({}) ", self.results.len()),
            Panel::Detail => self.detail.as_ref().map_or_else(
                || " Saved Recipes ".to_string(),
                |d| format!(" {} ", d.title),
            ),
        };
        HeaderInfo { title }
    }

    fn compute_footer(&self) -> FooterInfo {
        let keybindings = match (self.panel, self.form_mode) {
            (Panel::Generator, FormMode::Busy) => "Generating recipe...  library: saved recipes  quit".to_string(),
            (Panel::Generator, FormMode::Editable) => {
                "ingredients/diet/cuisine/servings <v>  validate  generate  save  export json|txt  copy  library  help".to_string()
            }
            (Panel::Library, _) => {
                "search <text>  rating <1-5>  all  next/prev  open [id]  rate <id> <n>  delete <id>  generator  help".to_string()
            }
            (Panel::Detail, _) => {
                "rate <n>  edit <field>=<value>  delete  back  generator  help".to_string()
            }
        };
        FooterInfo { keybindings }
    }
}

fn highlight(highlighter: Option<&Highlighter>, text: &str) -> HighlightedText {
    HighlightedText {
        text: text.to_string(),
        ranges: highlighter.map_or_else(Vec::new, |h| h.ranges(text)),
    }
}

/// How long an error notification stays up.
pub const ERROR_NOTIFICATION: Duration = notification_lifetime(true);

/// How long a success notification stays up.
pub const SUCCESS_NOTIFICATION: Duration = notification_lifetime(false);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fake::summary;

    fn state() -> AppState {
        AppState::new(Theme::default())
    }

    #[test]
    fn generations_only_gate_superseding_kinds() {
        let mut state = state();
        let first = state.begin(RequestKind::List);
        let second = state.begin(RequestKind::List);
        assert!(!state.is_latest(RequestKind::List, first));
        assert!(state.is_latest(RequestKind::List, second));

        let save = state.begin(RequestKind::Save);
        state.begin(RequestKind::Save);
        assert!(state.is_latest(RequestKind::Save, save));
    }

    #[test]
    fn notifications_have_kind_specific_lifetimes() {
        let mut state = state();
        let Action::ScheduleDismiss { id, after } = state.show_error("boom") else {
            panic!("expected dismissal");
        };
        assert_eq!(after, ERROR_NOTIFICATION);

        let Action::ScheduleDismiss { id: newer, after } = state.show_success("saved") else {
            panic!("expected dismissal");
        };
        assert_eq!(after, SUCCESS_NOTIFICATION);

        assert!(!state.dismiss(id));
        assert!(state.notification.is_some());
        assert!(state.dismiss(newer));
        assert!(state.notification.is_none());
    }

    #[test]
    fn library_highlights_both_matching_titles() {
        let mut state = state();
        state.panel = Panel::Library;
        state.apply_listing(
            SearchQuery::new("chicken", None),
            vec![
                summary(1, "Chicken Soup", "chicken, leeks", Some(4)),
                summary(2, "BBQ Chicken", "chicken, sauce", None),
            ],
        );

        let PanelView::Library(library) = state.compute_viewmodel(24, 100).body else {
            panic!("expected library");
        };
        let titles: Vec<String> = library
            .display_items
            .iter()
            .map(|item| item.title.marked("[", "]"))
            .collect();
        assert_eq!(titles, vec!["[Chicken] Soup", "BBQ [Chicken]"]);
        assert_eq!(library.display_items[0].rating, "★★★★☆");
        assert!(library.display_items[0].is_selected);
    }

    #[test]
    fn empty_listing_shows_query_specific_message() {
        let mut state = state();
        state.apply_listing(SearchQuery::new("tofu", None), vec![]);
        assert_eq!(
            state.list_message.as_deref(),
            Some("No recipes found matching \"tofu\"")
        );

        state.panel = Panel::Library;
        let PanelView::Library(library) = state.compute_viewmodel(24, 80).body else {
            panic!("expected library");
        };
        assert_eq!(
            library.empty_state.map(|e| e.message).as_deref(),
            Some("No recipes found matching \"tofu\"")
        );
    }

    #[test]
    fn rating_buttons_mark_only_active_filter() {
        let mut state = state();
        state.panel = Panel::Library;
        state.search.toggle_rating_filter(Rating::new(3).unwrap());

        let PanelView::Library(library) = state.compute_viewmodel(24, 80).body else {
            panic!("expected library");
        };
        let active: Vec<u8> = library
            .rating_buttons
            .iter()
            .filter(|b| b.is_active)
            .map(|b| b.stars)
            .collect();
        assert_eq!(active, vec![3]);
    }

    #[test]
    fn window_follows_selection() {
        let mut state = state();
        state.panel = Panel::Library;
        let recipes = (1..=40)
            .map(|id| summary(id, &format!("Recipe {id}"), "water", None))
            .collect();
        state.apply_listing(SearchQuery::default(), recipes);
        state.selected_index = 39;

        let PanelView::Library(library) = state.compute_viewmodel(21, 80).body else {
            panic!("expected library");
        };
        assert_eq!(library.display_items.len(), 10);
        assert_eq!(library.display_items.last().map(|i| i.id), Some(40));
        assert_eq!(library.selected_index, 9);
    }

    #[test]
    fn selection_wraps() {
        let mut state = state();
        state.apply_listing(
            SearchQuery::default(),
            vec![summary(1, "A", "", None), summary(2, "B", "", None)],
        );
        state.move_selection_up();
        assert_eq!(state.selected_recipe().map(|r| r.id), Some(2));
        state.move_selection_down();
        assert_eq!(state.selected_recipe().map(|r| r.id), Some(1));
    }
}
