//! Recipe service abstraction.
//!
//! This module defines the [`RecipeApi`] trait covering every endpoint the
//! client talks to. The worker only ever holds an `Arc<dyn RecipeApi>`, so
//! tests swap in an in-memory implementation without touching the network.

use async_trait::async_trait;

use crate::domain::error::Result;
use crate::domain::recipe::{
    ExportFormat, GeneratedRecipe, Rating, RecipeEdit, RecipeId, RecipeRecord, RecipeRequest,
    RecipeSummary, SaveReceipt, ValidationOutcome,
};
use crate::domain::search::SearchQuery;

/// Operations offered by the recipe service.
///
/// Implementations must be shareable across tasks; the worker clones the
/// handle into every spawned request.
///
/// # Errors
///
/// Every method returns [`RecipeClientError::Network`] when the request did
/// not complete and [`RecipeClientError::Backend`] for non-success statuses,
/// carrying the backend's `error` message verbatim.
///
/// [`RecipeClientError::Network`]: crate::domain::RecipeClientError::Network
/// [`RecipeClientError::Backend`]: crate::domain::RecipeClientError::Backend
#[async_trait]
pub trait RecipeApi: Send + Sync {
    /// Asks the backend whether the comma-separated ingredient list is usable.
    ///
    /// A rejection is a normal outcome (`valid == false`), not an error.
    async fn validate_ingredients(&self, ingredients: &str) -> Result<ValidationOutcome>;

    /// Generates a recipe from the form contents.
    async fn generate_recipe(&self, request: &RecipeRequest) -> Result<GeneratedRecipe>;

    /// Persists a generated recipe.
    async fn save_recipe(&self, recipe: &GeneratedRecipe) -> Result<SaveReceipt>;

    /// Renders a generated recipe in `format` and returns the file contents.
    async fn export_recipe(&self, format: ExportFormat, recipe: &GeneratedRecipe)
        -> Result<Vec<u8>>;

    /// Lists saved recipes matching `query`.
    async fn list_recipes(&self, query: &SearchQuery, per_page: u32)
        -> Result<Vec<RecipeSummary>>;

    async fn get_recipe(&self, id: RecipeId) -> Result<RecipeRecord>;

    /// Applies a partial edit; only the fields present in `edit` change.
    async fn update_recipe(&self, id: RecipeId, edit: &RecipeEdit) -> Result<()>;

    async fn rate_recipe(&self, id: RecipeId, rating: Rating) -> Result<()>;

    async fn delete_recipe(&self, id: RecipeId) -> Result<()>;
}
