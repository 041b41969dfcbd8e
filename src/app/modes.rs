//! Mode and filter state types for the application.
//!
//! These small enums drive what the controller accepts and what the view
//! shows:
//!
//! - [`RatingFilter`]: zero or one active minimum-rating filter
//! - [`FormMode`]: whether the generator form accepts input
//! - [`Panel`]: which screen is in front
//! - [`Severity`]: tone of inline feedback and notifications
//!
//! # Rating filter state machine
//!
//! ```text
//! NoFilter ──click r──▶ Active(r)
//! Active(r) ──click r──▶ NoFilter
//! Active(x) ──click r──▶ Active(r)      (x ≠ r)
//! ```
//!
//! # Example
//!
//! ```rust
//! use recipe_client::app::modes::RatingFilter;
//! use recipe_client::domain::Rating;
//!
//! let four = Rating::new(4).unwrap();
//! let filter = RatingFilter::NoFilter.toggle(four);
//! assert_eq!(filter.active(), Some(four));
//! assert_eq!(filter.toggle(four), RatingFilter::NoFilter);
//! ```

use crate::domain::Rating;

/// Minimum-rating filter applied to recipe searches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RatingFilter {
    /// No rating constraint.
    #[default]
    NoFilter,

    /// Only recipes rated at least this many stars.
    Active(Rating),
}

impl RatingFilter {
    /// Returns the state after the user clicks the button for `rating`.
    #[must_use]
    pub fn toggle(self, rating: Rating) -> Self {
        match self {
            Self::Active(current) if current == rating => Self::NoFilter,
            _ => Self::Active(rating),
        }
    }

    #[must_use]
    pub const fn active(self) -> Option<Rating> {
        match self {
            Self::NoFilter => None,
            Self::Active(rating) => Some(rating),
        }
    }

    /// True when `rating` is the active filter.
    #[must_use]
    pub fn is_active(self, rating: Rating) -> bool {
        self.active() == Some(rating)
    }
}

/// Whether the generator form accepts input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FormMode {
    /// Fields and buttons are enabled.
    #[default]
    Editable,

    /// A generate request is in flight; the form is disabled until it settles.
    Busy,
}

/// Screen currently in front.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Panel {
    /// Ingredient form and the current generated recipe.
    #[default]
    Generator,

    /// Saved recipes with search and rating filters.
    Library,

    /// One saved recipe in full.
    Detail,
}

/// Tone of a feedback line or notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Error,
}
