//! Runs the reqwest client against an in-process axum server.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use serde_json::{json, Value};

use recipe_client::api::{HttpRecipeApi, RecipeApi};
use recipe_client::domain::{
    ExportFormat, GeneratedRecipe, Rating, RecipeClientError, RecipeEdit, RecipeRequest,
    SearchQuery,
};

#[derive(Clone, Default)]
struct Seen {
    queries: Arc<Mutex<Vec<HashMap<String, String>>>>,
    bodies: Arc<Mutex<Vec<Value>>>,
}

impl Seen {
    fn record_body(&self, body: Value) {
        self.bodies.lock().unwrap().push(body);
    }
}

async fn validate(Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    if body["ingredients"].as_str().unwrap_or_default().trim().is_empty() {
        (
            StatusCode::BAD_REQUEST,
            Json(json!({ "valid": false, "message": "Please enter at least one ingredient" })),
        )
    } else {
        (StatusCode::OK, Json(json!({ "valid": true, "message": "Looks good" })))
    }
}

async fn generate() -> (StatusCode, Json<Value>) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": "model unavailable" })),
    )
}

async fn export(Path(format): Path<String>, Json(body): Json<Value>) -> (StatusCode, Vec<u8>) {
    let text = body["recipe_data"]["recipe"].as_str().unwrap_or_default();
    (StatusCode::OK, format!("{format}:{text}").into_bytes())
}

async fn list(
    State(seen): State<Seen>,
    Query(params): Query<HashMap<String, String>>,
) -> Json<Value> {
    seen.queries.lock().unwrap().push(params);
    Json(json!({
        "recipes": [
            { "id": 1, "title": "Chicken Soup", "ingredients_used": "chicken, leeks", "rating": 4 },
            { "id": 2, "title": "BBQ Chicken", "ingredients_used": "chicken, sauce" }
        ],
        "total": 2
    }))
}

async fn get_recipe(Path(id): Path<i64>) -> (StatusCode, Json<Value>) {
    if id == 1 {
        (
            StatusCode::OK,
            Json(json!({
                "id": 1,
                "title": "Chicken Soup",
                "recipe": "Simmer everything.",
                "ingredients_used": "chicken, leeks",
                "serving_size": 4,
                "timestamp": "2026-10-01T12:00:00",
                "rating": 4
            })),
        )
    } else {
        (StatusCode::NOT_FOUND, Json(json!({ "message": "Recipe not found" })))
    }
}

async fn update(State(seen): State<Seen>, Json(body): Json<Value>) -> StatusCode {
    seen.record_body(body);
    StatusCode::OK
}

async fn rate(State(seen): State<Seen>, Json(body): Json<Value>) -> StatusCode {
    seen.record_body(body);
    StatusCode::OK
}

async fn delete(Path(id): Path<i64>) -> (StatusCode, Json<Value>) {
    if id == 1 {
        (StatusCode::OK, Json(json!({ "message": "Recipe deleted" })))
    } else {
        (StatusCode::NOT_FOUND, Json(json!({ "error": "Recipe not found" })))
    }
}

async fn spawn_backend() -> (HttpRecipeApi, Seen) {
    let seen = Seen::default();
    let router = Router::new()
        .route("/validate_ingredients", post(validate))
        .route("/generate_recipe", post(generate))
        .route("/export_recipe/{format}", post(export))
        .route("/api/recipes", get(list))
        .route("/api/recipes/{id}", get(get_recipe).put(update).delete(delete))
        .route("/api/recipes/{id}/rating", put(rate))
        .with_state(seen.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    (HttpRecipeApi::new(&format!("http://{addr}/")), seen)
}

fn recipe(text: &str) -> GeneratedRecipe {
    GeneratedRecipe {
        recipe: text.to_string(),
        ingredients_used: "eggs".to_string(),
        dietary_restrictions: String::new(),
        cuisine_preference: String::new(),
        serving_size: 2,
        timestamp: "2026-10-01T12:00:00".to_string(),
    }
}

#[tokio::test]
async fn generate_failure_carries_backend_message() {
    let (api, _) = spawn_backend().await;
    let request = RecipeRequest {
        ingredients: "eggs, flour".to_string(),
        dietary_restrictions: String::new(),
        cuisine_preference: String::new(),
        serving_size: 4,
    };

    let err = api.generate_recipe(&request).await.unwrap_err();
    assert!(matches!(err, RecipeClientError::Backend { status: 500, .. }));
    assert_eq!(err.backend_message(), Some("model unavailable"));
}

#[tokio::test]
async fn validation_rejection_is_decoded_not_an_error() {
    let (api, _) = spawn_backend().await;

    let rejected = api.validate_ingredients("  ").await.unwrap();
    assert!(!rejected.valid);
    assert_eq!(rejected.message, "Please enter at least one ingredient");

    let accepted = api.validate_ingredients("eggs").await.unwrap();
    assert!(accepted.valid);
}

#[tokio::test]
async fn list_sends_only_the_parameters_in_use() {
    let (api, seen) = spawn_backend().await;

    let recipes = api
        .list_recipes(&SearchQuery::new("chicken", Some(Rating::new(4).unwrap())), 20)
        .await
        .unwrap();
    assert_eq!(recipes.len(), 2);
    api.list_recipes(&SearchQuery::new("chicken", None), 20)
        .await
        .unwrap();

    let queries = seen.queries.lock().unwrap().clone();
    assert_eq!(queries[0].get("per_page").map(String::as_str), Some("20"));
    assert_eq!(queries[0].get("search").map(String::as_str), Some("chicken"));
    assert_eq!(queries[0].get("min_rating").map(String::as_str), Some("4"));
    assert!(!queries[1].contains_key("min_rating"));
}

#[tokio::test]
async fn export_returns_raw_bytes() {
    let (api, _) = spawn_backend().await;
    let bytes = api
        .export_recipe(ExportFormat::Txt, &recipe("Boil water"))
        .await
        .unwrap();
    assert_eq!(bytes, b"txt:Boil water");
}

#[tokio::test]
async fn saved_recipe_round_trip() {
    let (api, seen) = spawn_backend().await;

    let record = api.get_recipe(1).await.unwrap();
    assert_eq!(record.title, "Chicken Soup");
    assert_eq!(record.rating, Some(4));

    let missing = api.get_recipe(9).await.unwrap_err();
    assert_eq!(missing.backend_message(), Some("Recipe not found"));

    api.rate_recipe(1, Rating::new(5).unwrap()).await.unwrap();
    let edit = RecipeEdit {
        title: Some("Leek Soup".to_string()),
        ..RecipeEdit::default()
    };
    api.update_recipe(1, &edit).await.unwrap();

    let bodies = seen.bodies.lock().unwrap().clone();
    assert_eq!(bodies[0], json!({ "rating": 5 }));
    assert_eq!(bodies[1]["title"], "Leek Soup");
}

#[tokio::test]
async fn delete_reports_missing_recipe() {
    let (api, _) = spawn_backend().await;
    api.delete_recipe(1).await.unwrap();

    let err = api.delete_recipe(2).await.unwrap_err();
    assert!(matches!(err, RecipeClientError::Backend { status: 404, .. }));
}
