//! reqwest implementation of [`RecipeApi`].

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use super::backend::RecipeApi;
use crate::domain::error::{RecipeClientError, Result};
use crate::domain::recipe::{
    ExportFormat, GeneratedRecipe, Rating, RecipeEdit, RecipeId, RecipeList, RecipeRecord,
    RecipeRequest, RecipeSummary, SaveReceipt, ValidationOutcome,
};
use crate::domain::search::SearchQuery;

/// HTTP client for the recipe service.
///
/// No request timeout is configured; a hung backend leaves the request
/// pending and newer requests supersede it.
#[derive(Debug, Clone)]
pub struct HttpRecipeApi {
    client: Client,
    base_url: String,
}

#[derive(Serialize)]
struct ValidateBody<'a> {
    ingredients: &'a str,
}

#[derive(Serialize)]
struct RecipeDataBody<'a> {
    recipe_data: &'a GeneratedRecipe,
}

#[derive(Serialize)]
struct RatingBody {
    rating: u8,
}

/// Error envelope sent with non-success statuses.
#[derive(Deserialize, Default)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ListBody {
    Envelope(RecipeList),
    Bare(Vec<RecipeSummary>),
}

impl HttpRecipeApi {
    /// Creates a client for the service rooted at `base_url`.
    #[must_use]
    pub fn new(base_url: &str) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    /// Creates a client reusing an existing reqwest `Client`.
    #[must_use]
    pub fn with_client(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

/// Reads the body and turns non-success statuses into [`RecipeClientError::Backend`].
async fn body_bytes(response: Response) -> Result<(StatusCode, Vec<u8>)> {
    let status = response.status();
    let bytes = response.bytes().await?.to_vec();
    if status.is_success() {
        Ok((status, bytes))
    } else {
        Err(backend_error(status, &bytes))
    }
}

fn backend_error(status: StatusCode, body: &[u8]) -> RecipeClientError {
    let parsed: ErrorBody = serde_json::from_slice(body).unwrap_or_default();
    let message = parsed.error.or(parsed.message).filter(|m| !m.trim().is_empty());
    warn!(status = status.as_u16(), message = ?message, "backend returned an error status");
    RecipeClientError::Backend {
        status: status.as_u16(),
        message,
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
    let (_, bytes) = body_bytes(response).await?;
    Ok(serde_json::from_slice(&bytes)?)
}

async fn expect_success(response: Response) -> Result<()> {
    body_bytes(response).await.map(|_| ())
}

#[async_trait]
impl RecipeApi for HttpRecipeApi {
    #[instrument(skip(self, ingredients), fields(len = ingredients.len()))]
    async fn validate_ingredients(&self, ingredients: &str) -> Result<ValidationOutcome> {
        let response = self
            .client
            .post(self.url("/validate_ingredients"))
            .json(&ValidateBody { ingredients })
            .send()
            .await?;

        // A 400 carries the same {valid, message} shape as a 200.
        let status = response.status();
        let bytes = response.bytes().await?;
        if status.is_success() || status == StatusCode::BAD_REQUEST {
            if let Ok(outcome) = serde_json::from_slice::<ValidationOutcome>(&bytes) {
                debug!(valid = outcome.valid, "ingredients validated");
                return Ok(outcome);
            }
        }
        if status.is_success() {
            return Ok(serde_json::from_slice(&bytes)?);
        }
        Err(backend_error(status, &bytes))
    }

    #[instrument(skip(self, request), fields(serving_size = request.serving_size))]
    async fn generate_recipe(&self, request: &RecipeRequest) -> Result<GeneratedRecipe> {
        let response = self
            .client
            .post(self.url("/generate_recipe"))
            .json(request)
            .send()
            .await?;
        decode(response).await
    }

    #[instrument(skip(self, recipe))]
    async fn save_recipe(&self, recipe: &GeneratedRecipe) -> Result<SaveReceipt> {
        let response = self
            .client
            .post(self.url("/save_recipe"))
            .json(&RecipeDataBody { recipe_data: recipe })
            .send()
            .await?;
        decode(response).await
    }

    #[instrument(skip(self, recipe), fields(format = %format))]
    async fn export_recipe(
        &self,
        format: ExportFormat,
        recipe: &GeneratedRecipe,
    ) -> Result<Vec<u8>> {
        let response = self
            .client
            .post(self.url(&format!("/export_recipe/{format}")))
            .json(&RecipeDataBody { recipe_data: recipe })
            .send()
            .await?;
        let (_, bytes) = body_bytes(response).await?;
        debug!(bytes = bytes.len(), "recipe exported");
        Ok(bytes)
    }

    #[instrument(skip(self, query), fields(search = %query.free_text, min_rating = ?query.min_rating))]
    async fn list_recipes(
        &self,
        query: &SearchQuery,
        per_page: u32,
    ) -> Result<Vec<RecipeSummary>> {
        let response = self
            .client
            .get(self.url("/api/recipes"))
            .query(&query.query_pairs(per_page))
            .send()
            .await?;
        let recipes = match decode::<ListBody>(response).await? {
            ListBody::Envelope(list) => list.recipes,
            ListBody::Bare(recipes) => recipes,
        };
        debug!(count = recipes.len(), "recipes listed");
        Ok(recipes)
    }

    #[instrument(skip(self))]
    async fn get_recipe(&self, id: RecipeId) -> Result<RecipeRecord> {
        let response = self
            .client
            .get(self.url(&format!("/api/recipes/{id}")))
            .send()
            .await?;
        decode(response).await
    }

    #[instrument(skip(self, edit))]
    async fn update_recipe(&self, id: RecipeId, edit: &RecipeEdit) -> Result<()> {
        if edit.is_empty() {
            return Err(RecipeClientError::Validation(
                "Nothing to update".to_string(),
            ));
        }
        let response = self
            .client
            .put(self.url(&format!("/api/recipes/{id}")))
            .json(edit)
            .send()
            .await?;
        expect_success(response).await
    }

    #[instrument(skip(self), fields(rating = rating.stars()))]
    async fn rate_recipe(&self, id: RecipeId, rating: Rating) -> Result<()> {
        let response = self
            .client
            .put(self.url(&format!("/api/recipes/{id}/rating")))
            .json(&RatingBody {
                rating: rating.stars(),
            })
            .send()
            .await?;
        expect_success(response).await
    }

    #[instrument(skip(self))]
    async fn delete_recipe(&self, id: RecipeId) -> Result<()> {
        let response = self
            .client
            .delete(self.url(&format!("/api/recipes/{id}")))
            .send()
            .await?;
        expect_success(response).await
    }
}
