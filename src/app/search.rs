//! Search/filter coordination for the recipe library.
//!
//! [`SearchCoordinator`] owns the free text and the rating filter the user
//! has entered and turns them into a [`SearchQuery`]. [`SearchCoordinator::execute`]
//! runs a query against the service, refusing to issue a request when no
//! criteria are set.

use tracing::debug;

use super::modes::RatingFilter;
use crate::api::RecipeApi;
use crate::domain::error::Result;
use crate::domain::recipe::{Rating, RecipeSummary};
use crate::domain::search::SearchQuery;

/// Search criteria as the user has entered them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchCoordinator {
    free_text: String,
    filter: RatingFilter,
}

/// Result of [`SearchCoordinator::execute`].
#[derive(Debug)]
pub enum SearchOutcome {
    /// No criteria were set; nothing was requested.
    Prompt,

    /// The service answered.
    Results(RecipeResults),
}

/// One-shot sequence of search results.
///
/// Consuming it does not re-issue the request; a fresh
/// [`SearchCoordinator::execute`] call is needed for new results.
#[derive(Debug)]
pub struct RecipeResults {
    query: SearchQuery,
    recipes: std::vec::IntoIter<RecipeSummary>,
}

impl RecipeResults {
    /// Query that produced these results.
    #[must_use]
    pub const fn query(&self) -> &SearchQuery {
        &self.query
    }
}

impl Iterator for RecipeResults {
    type Item = RecipeSummary;

    fn next(&mut self) -> Option<Self::Item> {
        self.recipes.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.recipes.size_hint()
    }
}

impl ExactSizeIterator for RecipeResults {}

impl SearchCoordinator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the free text; whitespace is trimmed when the query is built.
    pub fn set_free_text(&mut self, text: &str) {
        self.free_text = text.to_string();
    }

    #[must_use]
    pub fn free_text(&self) -> &str {
        &self.free_text
    }

    /// Clicks the button for `rating` and returns the new filter state.
    pub fn toggle_rating_filter(&mut self, rating: Rating) -> RatingFilter {
        self.filter = self.filter.toggle(rating);
        debug!(filter = ?self.filter, "rating filter toggled");
        self.filter
    }

    #[must_use]
    pub const fn filter(&self) -> RatingFilter {
        self.filter
    }

    #[must_use]
    pub fn current_query(&self) -> SearchQuery {
        SearchQuery::new(&self.free_text, self.filter.active())
    }

    /// Clears the free text and the rating filter.
    pub fn reset(&mut self) {
        self.free_text.clear();
        self.filter = RatingFilter::NoFilter;
    }

    /// Runs `query` against the service.
    ///
    /// Returns [`SearchOutcome::Prompt`] without touching the network when
    /// the query is empty. Otherwise issues exactly one list request.
    ///
    /// # Errors
    ///
    /// Propagates transport and backend errors from the list request.
    pub async fn execute(
        api: &dyn RecipeApi,
        query: &SearchQuery,
        per_page: u32,
    ) -> Result<SearchOutcome> {
        if query.is_empty() {
            debug!("empty search query, prompting instead of requesting");
            return Ok(SearchOutcome::Prompt);
        }

        let recipes = api.list_recipes(query, per_page).await?;
        debug!(count = recipes.len(), "search returned");
        Ok(SearchOutcome::Results(RecipeResults {
            query: query.clone(),
            recipes: recipes.into_iter(),
        }))
    }
}
