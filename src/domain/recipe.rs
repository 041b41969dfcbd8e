//! Recipe domain model and wire types.
//!
//! These types mirror the JSON shapes exchanged with the recipe service. The
//! backend owns every saved recipe; the client only displays them and asks for
//! mutations. [`GeneratedRecipe`] is the one record the client holds on to
//! between requests: the "current recipe" that can be saved, exported or copied.

use super::error::{RecipeClientError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const SECONDS_PER_MINUTE: i64 = 60;
const SECONDS_PER_HOUR: i64 = 3600;
const SECONDS_PER_DAY: i64 = 86400;

/// Serving sizes accepted by the backend's validation middleware.
pub const SERVING_SIZE_RANGE: std::ops::RangeInclusive<u32> = 1..=12;

/// Default serving size used by the generator form.
pub const DEFAULT_SERVING_SIZE: u32 = 4;

/// Backend identifier of a saved recipe.
pub type RecipeId = i64;

/// A star rating between 1 and 5 inclusive.
///
/// # Examples
///
/// ```
/// use recipe_client::domain::Rating;
///
/// assert_eq!(Rating::new(4).unwrap().stars(), 4);
/// assert!(Rating::new(0).is_err());
/// assert!(Rating::new(6).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Rating(u8);

impl Rating {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    /// Creates a rating, rejecting anything outside `1..=5`.
    ///
    /// # Errors
    ///
    /// Returns [`RecipeClientError::InvalidRating`] for out-of-range values.
    pub fn new(stars: u8) -> Result<Self> {
        if stars >= Self::MIN && stars <= Self::MAX {
            Ok(Self(stars))
        } else {
            Err(RecipeClientError::InvalidRating(stars))
        }
    }

    #[must_use]
    pub const fn stars(self) -> u8 {
        self.0
    }

    /// All five ratings in ascending order.
    pub fn all() -> impl Iterator<Item = Self> {
        (Self::MIN..=Self::MAX).map(Self)
    }
}

impl TryFrom<u8> for Rating {
    type Error = RecipeClientError;

    fn try_from(value: u8) -> Result<Self> {
        Self::new(value)
    }
}

impl From<Rating> for u8 {
    fn from(rating: Rating) -> Self {
        rating.0
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Renders a 0-5 star count as filled and empty stars.
#[must_use]
pub fn star_bar(stars: Option<u8>) -> String {
    let filled = usize::from(stars.unwrap_or(0).min(Rating::MAX));
    let empty = usize::from(Rating::MAX) - filled;
    format!("{}{}", "★".repeat(filled), "☆".repeat(empty))
}

/// Body of `POST /generate_recipe`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeRequest {
    pub ingredients: String,
    pub dietary_restrictions: String,
    pub cuisine_preference: String,
    pub serving_size: u32,
}

impl RecipeRequest {
    /// Applies the checks the backend would otherwise reject with a 400.
    ///
    /// # Errors
    ///
    /// Returns [`RecipeClientError::Validation`] when the ingredient list is
    /// blank or the serving size is outside `1..=12`.
    pub fn check(&self) -> Result<()> {
        if ingredient_list(&self.ingredients).is_empty() {
            return Err(RecipeClientError::Validation(
                "Please enter at least one ingredient".to_string(),
            ));
        }
        if !SERVING_SIZE_RANGE.contains(&self.serving_size) {
            return Err(RecipeClientError::Validation(
                "Serving size must be between 1 and 12".to_string(),
            ));
        }
        Ok(())
    }
}

/// Splits a comma-separated ingredient string, dropping blank entries.
#[must_use]
pub fn ingredient_list(raw: &str) -> Vec<&str> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

/// Recipe payload returned by `POST /generate_recipe`.
///
/// This is the session's "current recipe". It is sent back verbatim as
/// `recipe_data` when saving or exporting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedRecipe {
    pub recipe: String,
    pub ingredients_used: String,
    #[serde(default)]
    pub dietary_restrictions: String,
    #[serde(default)]
    pub cuisine_preference: String,
    pub serving_size: u32,
    pub timestamp: String,
}

impl GeneratedRecipe {
    /// Dietary restrictions for display, `"None"` when unset.
    #[must_use]
    pub fn dietary_label(&self) -> &str {
        non_empty_or(&self.dietary_restrictions, "None")
    }

    /// Cuisine preference for display, `"Any"` when unset.
    #[must_use]
    pub fn cuisine_label(&self) -> &str {
        non_empty_or(&self.cuisine_preference, "Any")
    }

    /// Plain-text rendering placed on the clipboard.
    #[must_use]
    pub fn clipboard_text(&self) -> String {
        format!(
            "Recipe Generated on {}\n\nIngredients Used: {}\nDietary Restrictions: {}\nCuisine Preference: {}\nServing Size: {}\n\n{}",
            self.timestamp,
            self.ingredients_used,
            self.dietary_label(),
            self.cuisine_label(),
            self.serving_size,
            self.recipe
        )
    }
}

fn non_empty_or<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.trim().is_empty() {
        fallback
    } else {
        value
    }
}

/// Response of `POST /validate_ingredients`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationOutcome {
    pub valid: bool,
    #[serde(default)]
    pub message: String,
}

/// Response of `POST /save_recipe`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveReceipt {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub filename: Option<String>,
    #[serde(default)]
    pub recipe_id: Option<RecipeId>,
}

impl SaveReceipt {
    /// Success text shown after a save.
    #[must_use]
    pub fn describe(&self) -> String {
        if let Some(filename) = &self.filename {
            format!("Recipe saved as {filename}")
        } else if let Some(title) = &self.title {
            format!("Recipe saved as \"{title}\"")
        } else {
            self.message
                .clone()
                .unwrap_or_else(|| "Recipe saved".to_string())
        }
    }
}

/// Export formats offered by `POST /export_recipe/{format}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportFormat {
    Json,
    Txt,
}

impl ExportFormat {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Txt => "txt",
        }
    }

    /// Download file name for an export taken at `epoch_ms`.
    #[must_use]
    pub fn file_name(self, epoch_ms: i64) -> String {
        format!("recipe_{epoch_ms}.{}", self.as_str())
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExportFormat {
    type Err = RecipeClientError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "txt" | "text" => Ok(Self::Txt),
            other => Err(RecipeClientError::Validation(format!(
                "Unsupported export format: {other}"
            ))),
        }
    }
}

/// Minimal description of a saved recipe used in list views.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeSummary {
    pub id: RecipeId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub ingredients_used: String,
    #[serde(default)]
    pub dietary_restrictions: Option<String>,
    #[serde(default)]
    pub timestamp: String,
    #[serde(default)]
    pub rating: Option<u8>,
}

impl RecipeSummary {
    /// Relative age of the recipe ("just now", "5m ago", "3h ago", "7d ago").
    ///
    /// Falls back to the raw timestamp when it is not RFC 3339.
    #[must_use]
    pub fn time_ago(&self, now: chrono::DateTime<chrono::Utc>) -> String {
        time_ago(&self.timestamp, now)
    }
}

fn time_ago(timestamp: &str, now: chrono::DateTime<chrono::Utc>) -> String {
    let Ok(created) = chrono::DateTime::parse_from_rfc3339(timestamp) else {
        return timestamp.to_string();
    };
    let diff = now.timestamp() - created.timestamp();

    if diff < SECONDS_PER_MINUTE {
        "just now".to_string()
    } else if diff < SECONDS_PER_HOUR {
        format!("{}m ago", diff / SECONDS_PER_MINUTE)
    } else if diff < SECONDS_PER_DAY {
        format!("{}h ago", diff / SECONDS_PER_HOUR)
    } else {
        format!("{}d ago", diff / SECONDS_PER_DAY)
    }
}

/// Envelope of `GET /api/recipes`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RecipeList {
    #[serde(default)]
    pub recipes: Vec<RecipeSummary>,
    #[serde(default)]
    pub total: Option<i64>,
}

/// Full saved recipe returned by `GET /api/recipes/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeRecord {
    pub id: RecipeId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub recipe: String,
    #[serde(default)]
    pub ingredients_used: String,
    #[serde(default)]
    pub dietary_restrictions: Option<String>,
    #[serde(default)]
    pub cuisine_preference: Option<String>,
    #[serde(default)]
    pub serving_size: u32,
    #[serde(default)]
    pub timestamp: String,
    #[serde(default)]
    pub rating: Option<u8>,
}

impl RecipeRecord {
    /// Copies the list-visible fields onto a summary with the same id.
    pub fn refresh_summary(&self, summary: &mut RecipeSummary) {
        summary.title.clone_from(&self.title);
        summary.ingredients_used.clone_from(&self.ingredients_used);
        summary.dietary_restrictions.clone_from(&self.dietary_restrictions);
        summary.rating = self.rating;
    }
}

/// Body of `PUT /api/recipes/{id}`; only present fields are sent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeEdit {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recipe: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ingredients_used: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dietary_restrictions: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cuisine_preference: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub serving_size: Option<u32>,
}

impl RecipeEdit {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.recipe.is_none()
            && self.ingredients_used.is_none()
            && self.dietary_restrictions.is_none()
            && self.cuisine_preference.is_none()
            && self.serving_size.is_none()
    }

    /// Sets one field from a `name=value` pair as typed in the terminal.
    ///
    /// # Errors
    ///
    /// Returns a validation error for unknown fields or a non-numeric
    /// serving size.
    pub fn set_field(&mut self, name: &str, value: &str) -> Result<()> {
        let value = value.trim().to_string();
        match name.trim() {
            "title" => self.title = Some(value),
            "recipe" | "body" => self.recipe = Some(value),
            "ingredients" => self.ingredients_used = Some(value),
            "diet" | "dietary" => self.dietary_restrictions = Some(value),
            "cuisine" => self.cuisine_preference = Some(value),
            "servings" | "serving_size" => {
                let servings = value.parse::<u32>().map_err(|_| {
                    RecipeClientError::Validation(format!("Invalid serving size: {value}"))
                })?;
                self.serving_size = Some(servings);
            }
            other => {
                return Err(RecipeClientError::Validation(format!(
                    "Unknown recipe field: {other}"
                )))
            }
        }
        Ok(())
    }

    /// Applies this edit to a local record.
    pub fn apply_to(&self, record: &mut RecipeRecord) {
        if let Some(title) = &self.title {
            record.title.clone_from(title);
        }
        if let Some(recipe) = &self.recipe {
            record.recipe.clone_from(recipe);
        }
        if let Some(ingredients) = &self.ingredients_used {
            record.ingredients_used.clone_from(ingredients);
        }
        if let Some(dietary) = &self.dietary_restrictions {
            record.dietary_restrictions = Some(dietary.clone());
        }
        if let Some(cuisine) = &self.cuisine_preference {
            record.cuisine_preference = Some(cuisine.clone());
        }
        if let Some(servings) = self.serving_size {
            record.serving_size = servings;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_recipe() -> GeneratedRecipe {
        GeneratedRecipe {
            recipe: "Chicken Soup\n\n1. Boil water".to_string(),
            ingredients_used: "chicken, carrots".to_string(),
            dietary_restrictions: String::new(),
            cuisine_preference: "French".to_string(),
            serving_size: 4,
            timestamp: "2026-01-02T10:00:00Z".to_string(),
        }
    }

    #[test]
    fn rating_rejects_out_of_range_values() {
        assert!(Rating::new(0).is_err());
        assert!(Rating::new(6).is_err());
        assert_eq!(Rating::all().map(Rating::stars).collect::<Vec<_>>(), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn rating_deserialization_is_checked() {
        assert_eq!(serde_json::from_str::<Rating>("3").unwrap().stars(), 3);
        assert!(serde_json::from_str::<Rating>("9").is_err());
    }

    #[test]
    fn clipboard_text_uses_labels_for_empty_fields() {
        let text = sample_recipe().clipboard_text();
        assert!(text.starts_with("Recipe Generated on 2026-01-02T10:00:00Z\n\n"));
        assert!(text.contains("Dietary Restrictions: None\n"));
        assert!(text.contains("Cuisine Preference: French\n"));
        assert!(text.contains("Serving Size: 4\n\nChicken Soup"));
    }

    #[test]
    fn request_check_mirrors_backend_rules() {
        let mut request = RecipeRequest {
            ingredients: " , ,".to_string(),
            dietary_restrictions: String::new(),
            cuisine_preference: String::new(),
            serving_size: 4,
        };
        assert!(matches!(request.check(), Err(RecipeClientError::Validation(_))));

        request.ingredients = "eggs, flour".to_string();
        assert!(request.check().is_ok());

        request.serving_size = 13;
        assert!(request.check().is_err());
    }

    #[test]
    fn export_file_name_uses_epoch_millis() {
        assert_eq!(ExportFormat::Json.file_name(1_700_000_000_123), "recipe_1700000000123.json");
        assert_eq!("TXT".parse::<ExportFormat>().unwrap(), ExportFormat::Txt);
        assert!("pdf".parse::<ExportFormat>().is_err());
    }

    #[test]
    fn save_receipt_prefers_filename_then_title() {
        let mut receipt = SaveReceipt {
            title: Some("Soup".to_string()),
            ..SaveReceipt::default()
        };
        assert_eq!(receipt.describe(), "Recipe saved as \"Soup\"");
        receipt.filename = Some("soup.json".to_string());
        assert_eq!(receipt.describe(), "Recipe saved as soup.json");
    }

    #[test]
    fn summary_time_ago_buckets() {
        let now = chrono::Utc.with_ymd_and_hms(2026, 1, 2, 12, 0, 0).unwrap();
        let mut summary = RecipeSummary {
            id: 1,
            title: "Soup".to_string(),
            ingredients_used: String::new(),
            dietary_restrictions: None,
            timestamp: "2026-01-02T11:55:00Z".to_string(),
            rating: None,
        };
        assert_eq!(summary.time_ago(now), "5m ago");
        summary.timestamp = "2025-12-26T12:00:00Z".to_string();
        assert_eq!(summary.time_ago(now), "7d ago");
        summary.timestamp = "yesterday".to_string();
        assert_eq!(summary.time_ago(now), "yesterday");
    }

    #[test]
    fn edit_serializes_only_present_fields() {
        let mut edit = RecipeEdit::default();
        assert!(edit.is_empty());
        edit.set_field("title", " Better Soup ").unwrap();
        edit.set_field("servings", "6").unwrap();
        assert!(edit.set_field("colour", "red").is_err());

        let json = serde_json::to_value(&edit).unwrap();
        assert_eq!(json, serde_json::json!({"title": "Better Soup", "serving_size": 6}));
    }

    #[test]
    fn star_bar_clamps() {
        assert_eq!(star_bar(Some(3)), "★★★☆☆");
        assert_eq!(star_bar(None), "☆☆☆☆☆");
        assert_eq!(star_bar(Some(9)), "★★★★★");
    }
}
