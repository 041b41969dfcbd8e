//! View model types representing renderable UI state.
//!
//! View models are computed from application state by
//! [`AppState::compute_viewmodel`](crate::app::AppState::compute_viewmodel)
//! and consumed by a [`Frontend`](crate::ui::render::Frontend). They contain no
//! business logic, only display-ready data: pre-computed highlight ranges,
//! star bars, relative ages and selection state.

use crate::app::modes::Severity;

/// Width of the recipe id column in the library table.
pub const ID_COLUMN_WIDTH: usize = 6;
/// Width of the title column in the library table.
pub const TITLE_COLUMN_WIDTH: usize = 32;
/// Width of the star bar column.
pub const RATING_COLUMN_WIDTH: usize = 7;
/// Width of the relative age column.
pub const AGE_COLUMN_WIDTH: usize = 10;

/// Width left for the ingredients column on a terminal `cols` wide.
#[must_use]
pub const fn ingredients_column_width(cols: usize) -> usize {
    let fixed = ID_COLUMN_WIDTH + TITLE_COLUMN_WIDTH + 1 + RATING_COLUMN_WIDTH + AGE_COLUMN_WIDTH + 1;
    let available = cols.saturating_sub(fixed);
    if available < 10 {
        10
    } else {
        available
    }
}

/// Complete UI view model for one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UIViewModel {
    pub header: HeaderInfo,

    /// Transient notification shown above the panel.
    pub notification: Option<NotificationView>,

    /// Content of the panel in front.
    pub body: PanelView,

    /// About dialog, drawn over the panel when open.
    pub about: Option<AboutView>,

    pub footer: FooterInfo,
}

/// The panel in front and its contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelView {
    Generator(GeneratorView),
    Library(LibraryView),
    Detail(DetailView),
}

/// Ingredient form plus the current generated recipe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorView {
    pub fields: Vec<FormField>,

    /// False while a generate request is in flight.
    pub editable: bool,

    /// Inline validation feedback under the ingredients field.
    pub feedback: Option<FeedbackView>,

    pub loading: bool,

    /// The current recipe, when one is shown.
    pub recipe: Option<RecipeView>,
}

/// One labelled form field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormField {
    pub label: &'static str,
    pub value: String,
}

/// A generated recipe ready for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeView {
    /// Label/value pairs shown above the recipe text.
    pub meta: Vec<(&'static str, String)>,
    pub body: String,
}

/// Saved recipe list with its search controls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibraryView {
    pub search_bar: SearchBarInfo,

    /// One button per star rating; at most one is active.
    pub rating_buttons: Vec<RatingButton>,

    /// Visible window of results.
    pub display_items: Vec<DisplayItem>,

    /// Index of the selected item within `display_items`.
    pub selected_index: usize,

    /// Shown instead of rows when there is nothing to list.
    pub empty_state: Option<EmptyState>,
}

/// Search input contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchBarInfo {
    pub query: String,
}

/// Minimum-rating filter button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RatingButton {
    pub stars: u8,
    pub label: String,
    pub is_active: bool,
}

/// One row of the recipe list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayItem {
    pub id: i64,
    pub title: HighlightedText,
    pub ingredients: HighlightedText,
    /// Star bar, e.g. `★★★☆☆`.
    pub rating: String,
    /// Relative age, e.g. `3h ago`.
    pub age: String,
    pub is_selected: bool,
}

/// Text with character ranges to highlight.
///
/// Each range is `(start, end)` in character indices, end exclusive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HighlightedText {
    pub text: String,
    pub ranges: Vec<(usize, usize)>,
}

impl HighlightedText {
    #[must_use]
    pub fn plain(text: &str) -> Self {
        Self {
            text: text.to_string(),
            ranges: Vec::new(),
        }
    }

    /// Splits the text into `(segment, highlighted)` runs.
    #[must_use]
    pub fn segments(&self) -> Vec<(String, bool)> {
        let chars: Vec<char> = self.text.chars().collect();
        let mut segments = Vec::new();
        let mut pos = 0;

        for &(start, end) in &self.ranges {
            let start = start.min(chars.len());
            let end = end.min(chars.len());
            if start > pos {
                segments.push((chars[pos..start].iter().collect(), false));
            }
            if end > start {
                segments.push((chars[start..end].iter().collect(), true));
            }
            pos = pos.max(end);
        }

        if pos < chars.len() {
            segments.push((chars[pos..].iter().collect(), false));
        }
        segments
    }

    /// Text with every highlighted run wrapped in `open`/`close`.
    #[must_use]
    pub fn marked(&self, open: &str, close: &str) -> String {
        self.segments()
            .into_iter()
            .map(|(segment, highlighted)| {
                if highlighted {
                    format!("{open}{segment}{close}")
                } else {
                    segment
                }
            })
            .collect()
    }

    /// Cuts the text to `max_chars`, ending with `...` when shortened.
    /// Ranges are clipped to the visible part.
    #[must_use]
    pub fn truncated(&self, max_chars: usize) -> Self {
        let len = self.text.chars().count();
        if len <= max_chars {
            return self.clone();
        }

        let keep = max_chars.saturating_sub(3);
        let mut text: String = self.text.chars().take(keep).collect();
        text.push_str("...");
        let ranges = self
            .ranges
            .iter()
            .filter(|(start, _)| *start < keep)
            .map(|&(start, end)| (start, end.min(keep)))
            .collect();
        Self { text, ranges }
    }

    #[must_use]
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}

/// One saved recipe in full.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailView {
    pub id: i64,
    pub title: String,
    pub rating: String,
    pub meta: Vec<(&'static str, String)>,
    pub body: String,
}

/// Inline feedback line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedbackView {
    pub severity: Severity,
    pub message: String,
}

/// Transient notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationView {
    pub severity: Severity,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AboutView {
    pub lines: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderInfo {
    pub title: String,
}

/// Help text and command hints for the bottom of the UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterInfo {
    pub keybindings: String,
}

/// Message shown when a list has nothing to display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    pub message: String,
    pub subtitle: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn segments_split_on_ranges() {
        let text = HighlightedText {
            text: "BBQ Chicken".to_string(),
            ranges: vec![(4, 11)],
        };
        assert_eq!(
            text.segments(),
            vec![("BBQ ".to_string(), false), ("Chicken".to_string(), true)]
        );
        assert_eq!(text.marked("[", "]"), "BBQ [Chicken]");
    }

    #[test]
    fn truncation_clips_ranges() {
        let text = HighlightedText {
            text: "chicken, carrots, celery, onion".to_string(),
            ranges: vec![(0, 7), (18, 24)],
        };
        let short = text.truncated(12);
        assert_eq!(short.text, "chicken, ...");
        assert_eq!(short.ranges, vec![(0, 7)]);
        assert_eq!(short.char_len(), 12);
    }
}
