//! In-memory [`RecipeApi`] used by unit tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use super::backend::RecipeApi;
use crate::domain::error::{RecipeClientError, Result};
use crate::domain::recipe::{
    ExportFormat, GeneratedRecipe, Rating, RecipeEdit, RecipeId, RecipeRecord, RecipeRequest,
    RecipeSummary, SaveReceipt, ValidationOutcome,
};
use crate::domain::search::SearchQuery;

#[derive(Default)]
pub struct FakeApi {
    pub recipes: Mutex<Vec<RecipeSummary>>,
    pub calls: Mutex<Vec<String>>,
    pub list_queries: Mutex<Vec<Vec<(&'static str, String)>>>,
    failures: Mutex<HashMap<&'static str, (u16, Option<String>)>>,
}

impl FakeApi {
    pub fn with_recipes(recipes: Vec<RecipeSummary>) -> Self {
        Self {
            recipes: Mutex::new(recipes),
            ..Self::default()
        }
    }

    /// Makes `method` answer with a backend error.
    pub fn fail(&self, method: &'static str, status: u16, message: Option<&str>) {
        self.failures
            .lock()
            .unwrap()
            .insert(method, (status, message.map(String::from)));
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, method: &'static str) -> Result<()> {
        self.calls.lock().unwrap().push(method.to_string());
        match self.failures.lock().unwrap().get(method) {
            Some((status, message)) => Err(RecipeClientError::Backend {
                status: *status,
                message: message.clone(),
            }),
            None => Ok(()),
        }
    }
}

pub fn summary(id: RecipeId, title: &str, ingredients: &str, rating: Option<u8>) -> RecipeSummary {
    RecipeSummary {
        id,
        title: title.to_string(),
        ingredients_used: ingredients.to_string(),
        dietary_restrictions: None,
        timestamp: "2026-01-02T10:00:00Z".to_string(),
        rating,
    }
}

pub fn generated(recipe: &str) -> GeneratedRecipe {
    GeneratedRecipe {
        recipe: recipe.to_string(),
        ingredients_used: "eggs, flour".to_string(),
        dietary_restrictions: String::new(),
        cuisine_preference: String::new(),
        serving_size: 4,
        timestamp: "2026-01-02T10:00:00Z".to_string(),
    }
}

#[async_trait]
impl RecipeApi for FakeApi {
    async fn validate_ingredients(&self, ingredients: &str) -> Result<ValidationOutcome> {
        self.record("validate_ingredients")?;
        let count = crate::domain::recipe::ingredient_list(ingredients).len();
        Ok(if count == 0 {
            ValidationOutcome {
                valid: false,
                message: "Please provide at least one ingredient".to_string(),
            }
        } else {
            ValidationOutcome {
                valid: true,
                message: format!("Found {count} valid ingredients"),
            }
        })
    }

    async fn generate_recipe(&self, request: &RecipeRequest) -> Result<GeneratedRecipe> {
        self.record("generate_recipe")?;
        let mut recipe = generated("Omelette\n\n1. Whisk");
        recipe.ingredients_used.clone_from(&request.ingredients);
        recipe.serving_size = request.serving_size;
        Ok(recipe)
    }

    async fn save_recipe(&self, _recipe: &GeneratedRecipe) -> Result<SaveReceipt> {
        self.record("save_recipe")?;
        Ok(SaveReceipt {
            filename: Some("recipe_1.json".to_string()),
            ..SaveReceipt::default()
        })
    }

    async fn export_recipe(
        &self,
        format: ExportFormat,
        recipe: &GeneratedRecipe,
    ) -> Result<Vec<u8>> {
        self.record("export_recipe")?;
        Ok(match format {
            ExportFormat::Json => serde_json::to_vec(recipe)?,
            ExportFormat::Txt => recipe.clipboard_text().into_bytes(),
        })
    }

    async fn list_recipes(
        &self,
        query: &SearchQuery,
        per_page: u32,
    ) -> Result<Vec<RecipeSummary>> {
        self.record("list_recipes")?;
        self.list_queries
            .lock()
            .unwrap()
            .push(query.query_pairs(per_page));
        let needle = query.free_text.to_lowercase();
        let min = query.min_rating.map_or(0, Rating::stars);
        Ok(self
            .recipes
            .lock()
            .unwrap()
            .iter()
            .filter(|r| {
                needle.is_empty()
                    || r.title.to_lowercase().contains(&needle)
                    || r.ingredients_used.to_lowercase().contains(&needle)
            })
            .filter(|r| r.rating.unwrap_or(0) >= min)
            .take(per_page as usize)
            .cloned()
            .collect())
    }

    async fn get_recipe(&self, id: RecipeId) -> Result<RecipeRecord> {
        self.record("get_recipe")?;
        let recipes = self.recipes.lock().unwrap();
        let summary = recipes
            .iter()
            .find(|r| r.id == id)
            .ok_or(RecipeClientError::Backend {
                status: 404,
                message: Some("Recipe not found".to_string()),
            })?;
        Ok(RecipeRecord {
            id,
            title: summary.title.clone(),
            recipe: format!("{}\n\n1. Cook", summary.title),
            ingredients_used: summary.ingredients_used.clone(),
            dietary_restrictions: summary.dietary_restrictions.clone(),
            cuisine_preference: None,
            serving_size: 4,
            timestamp: summary.timestamp.clone(),
            rating: summary.rating,
        })
    }

    async fn update_recipe(&self, _id: RecipeId, _edit: &RecipeEdit) -> Result<()> {
        self.record("update_recipe")
    }

    async fn rate_recipe(&self, id: RecipeId, rating: Rating) -> Result<()> {
        self.record("rate_recipe")?;
        if let Some(r) = self.recipes.lock().unwrap().iter_mut().find(|r| r.id == id) {
            r.rating = Some(rating.stars());
        }
        Ok(())
    }

    async fn delete_recipe(&self, id: RecipeId) -> Result<()> {
        self.record("delete_recipe")?;
        self.recipes.lock().unwrap().retain(|r| r.id != id);
        Ok(())
    }
}
