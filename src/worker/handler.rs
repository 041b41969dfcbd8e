//! Execution of backend requests inside worker tasks.
//!
//! [`perform`] runs one [`Envelope`] against a [`RecipeApi`] and folds the
//! result, success or failure, into an [`ApiResponse`] tagged with the
//! envelope's generation. Errors never escape: they become
//! [`ApiOutcome::Failed`] with a cloneable [`ErrorReport`].

use tracing::Instrument;
use tracing_opentelemetry::OpenTelemetrySpanExt;

use super::messages::{ApiOutcome, ApiRequest, ApiResponse, Envelope};
use crate::api::RecipeApi;
use crate::app::search::{SearchCoordinator, SearchOutcome};
use crate::domain::error::{ErrorReport, Result};
use crate::domain::search::SearchQuery;

/// Runs `envelope` against `api` and returns the tagged response.
pub async fn perform(api: &dyn RecipeApi, envelope: Envelope, per_page: u32) -> ApiResponse {
    let Envelope {
        generation,
        request,
        trace_context,
    } = envelope;
    let kind = request.kind();

    let span = tracing::info_span!("api_request", kind = ?kind, generation = generation);
    if let Some(parent) = trace_context.as_ref().and_then(|ctx| ctx.to_otel_context()) {
        span.set_parent(parent);
    }

    let intent = request.intent();
    let outcome = async {
        match execute(api, request, per_page).await {
            Ok(outcome) => {
                tracing::debug!("request succeeded");
                outcome
            }
            Err(e) => {
                tracing::debug!(error = %e, "request failed");
                ApiOutcome::Failed {
                    intent,
                    report: ErrorReport::from(&e),
                }
            }
        }
    }
    .instrument(span)
    .await;

    ApiResponse {
        generation,
        kind,
        outcome,
    }
}

async fn execute(api: &dyn RecipeApi, request: ApiRequest, per_page: u32) -> Result<ApiOutcome> {
    let outcome = match request {
        ApiRequest::Validate {
            ingredients,
            intent,
        } => ApiOutcome::Validated {
            intent,
            outcome: api.validate_ingredients(&ingredients).await?,
        },
        ApiRequest::Generate(form) => ApiOutcome::Generated(api.generate_recipe(&form).await?),
        ApiRequest::Save(recipe) => ApiOutcome::Saved(api.save_recipe(&recipe).await?),
        ApiRequest::Export { format, recipe } => {
            let bytes = api.export_recipe(format, &recipe).await?;
            ApiOutcome::Exported {
                format,
                file_name: format.file_name(chrono::Utc::now().timestamp_millis()),
                bytes,
            }
        }
        ApiRequest::Search(query) => {
            match SearchCoordinator::execute(api, &query, per_page).await? {
                SearchOutcome::Prompt => ApiOutcome::Prompt,
                SearchOutcome::Results(results) => ApiOutcome::Listed {
                    query: results.query().clone(),
                    recipes: results.collect(),
                },
            }
        }
        ApiRequest::ListAll => {
            let query = SearchQuery::default();
            let recipes = api.list_recipes(&query, per_page).await?;
            ApiOutcome::Listed { query, recipes }
        }
        ApiRequest::Detail(id) => ApiOutcome::Loaded(api.get_recipe(id).await?),
        ApiRequest::Update { id, edit } => {
            api.update_recipe(id, &edit).await?;
            ApiOutcome::Updated { id, edit }
        }
        ApiRequest::Rate { id, rating } => {
            api.rate_recipe(id, rating).await?;
            ApiOutcome::Rated { id, rating }
        }
        ApiRequest::Delete(id) => {
            api.delete_recipe(id).await?;
            ApiOutcome::Deleted(id)
        }
    };
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fake::{generated, summary, FakeApi};
    use crate::domain::error::ErrorKind;
    use crate::domain::recipe::{ExportFormat, RecipeRequest};
    use crate::worker::messages::{RequestKind, ValidationIntent};

    #[tokio::test]
    async fn backend_failure_becomes_failed_outcome() {
        let api = FakeApi::default();
        api.fail("generate_recipe", 500, Some("model unavailable"));
        let request = RecipeRequest {
            ingredients: "eggs".to_string(),
            dietary_restrictions: String::new(),
            cuisine_preference: String::new(),
            serving_size: 2,
        };

        let response = perform(&api, Envelope::new(4, ApiRequest::Generate(request)), 20).await;
        assert_eq!(response.generation, 4);
        assert_eq!(response.kind, RequestKind::Generate);
        let ApiOutcome::Failed { intent, report } = response.outcome else {
            panic!("expected failure");
        };
        assert_eq!(intent, None);
        assert_eq!(report.kind, ErrorKind::Backend);
        assert_eq!(report.detail.as_deref(), Some("model unavailable"));
    }

    #[tokio::test]
    async fn failed_validation_keeps_intent() {
        let api = FakeApi::default();
        api.fail("validate_ingredients", 503, None);
        let envelope = Envelope::new(
            1,
            ApiRequest::Validate {
                ingredients: "eggs".to_string(),
                intent: ValidationIntent::Silent,
            },
        );
        let response = perform(&api, envelope, 20).await;
        assert!(matches!(
            response.outcome,
            ApiOutcome::Failed {
                intent: Some(ValidationIntent::Silent),
                ..
            }
        ));
    }

    #[tokio::test]
    async fn export_names_file_after_format() {
        let api = FakeApi::default();
        let envelope = Envelope::new(
            1,
            ApiRequest::Export {
                format: ExportFormat::Txt,
                recipe: generated("Pancakes"),
            },
        );
        let ApiOutcome::Exported {
            format,
            file_name,
            bytes,
        } = perform(&api, envelope, 20).await.outcome
        else {
            panic!("expected export");
        };
        assert_eq!(format, ExportFormat::Txt);
        assert!(file_name.starts_with("recipe_") && file_name.ends_with(".txt"));
        assert!(String::from_utf8(bytes).unwrap().ends_with("Pancakes"));
    }

    #[tokio::test]
    async fn empty_search_prompts_without_request() {
        let api = FakeApi::default();
        let envelope = Envelope::new(1, ApiRequest::Search(SearchQuery::default()));
        assert_eq!(perform(&api, envelope, 20).await.outcome, ApiOutcome::Prompt);
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn list_all_sends_unfiltered_query() {
        let api = FakeApi::with_recipes(vec![summary(1, "Soup", "water", None)]);
        let response = perform(&api, Envelope::new(2, ApiRequest::ListAll), 10).await;
        let ApiOutcome::Listed { query, recipes } = response.outcome else {
            panic!("expected listing");
        };
        assert!(query.is_empty());
        assert_eq!(recipes.len(), 1);
        assert_eq!(
            api.list_queries.lock().unwrap()[0],
            vec![("per_page", "10".to_string())]
        );
    }
}
