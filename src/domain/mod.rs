//! Domain layer for the recipe client.
//!
//! This module contains the wire types exchanged with the recipe service and
//! the search rules applied to them, independent of HTTP, terminal, or
//! runtime concerns.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`recipe`]: Recipe requests, generated and saved recipes, ratings
//! - [`search`]: Search criteria and literal match highlighting
//!
//! # Examples
//!
//! ```
//! use recipe_client::domain::{Rating, Result, SearchQuery};
//!
//! fn top_rated(text: &str) -> Result<SearchQuery> {
//!     Ok(SearchQuery::new(text, Some(Rating::new(4)?)))
//! }
//!
//! let query = top_rated("soup").unwrap();
//! assert_eq!(query.no_results_message(), "No recipes found matching \"soup\" rated 4+ stars");
//! ```

pub mod error;
pub mod recipe;
pub mod search;

pub use error::{ErrorKind, ErrorReport, RecipeClientError, Result};
pub use recipe::{
    star_bar, ExportFormat, GeneratedRecipe, Rating, RecipeEdit, RecipeId, RecipeList,
    RecipeRecord, RecipeRequest, RecipeSummary, SaveReceipt, ValidationOutcome,
};
pub use search::{Highlighter, SearchQuery, SEARCH_PROMPT};
