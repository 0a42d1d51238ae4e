use axum::{extract::State, Json};
use validator::Validate;

use crate::dtos::{NicheRequest, SuggestionResponse};
use crate::startup::AppState;
use service_core::error::AppError;

/// Returned when the trend lookup has nothing usable for the niche.
const NO_IDEAS_FALLBACK: &str = "No ideas available. Please try a different niche.";

/// Maximum number of trends forwarded to the completion API per request.
const MAX_TRENDS: usize = 3;

/// Prefix marking the trend provider's "nothing found" sentinel.
const NO_TRENDS_PREFIX: &str = "No trending";

#[tracing::instrument(skip(state, request))]
pub async fn suggest_content(
    State(state): State<AppState>,
    Json(request): Json<NicheRequest>,
) -> Result<Json<SuggestionResponse>, AppError> {
    request.validate()?;

    if request.niche.trim().is_empty() {
        return Err(AppError::BadRequest(anyhow::anyhow!(
            "Niche cannot be empty"
        )));
    }

    let trends = state
        .trend_provider
        .fetch_trending(&request.niche)
        .await
        .map_err(|e| AppError::ServiceUnavailable(e.to_string()))?;

    if trends.first().map_or(true, |t| t.starts_with(NO_TRENDS_PREFIX)) {
        return Ok(Json(SuggestionResponse {
            content_suggestions: vec![NO_IDEAS_FALLBACK.to_string()],
        }));
    }

    let mut content_suggestions = Vec::with_capacity(trends.len().min(MAX_TRENDS));
    for trend in trends.iter().take(MAX_TRENDS) {
        let suggestion = state
            .completion_provider
            .generate(trend)
            .await
            .map_err(|e| AppError::ServiceUnavailable(e.to_string()))?;
        content_suggestions.push(suggestion);
    }

    tracing::info!(
        niche = %request.niche,
        suggestions = content_suggestions.len(),
        "Content suggestions generated"
    );

    Ok(Json(SuggestionResponse {
        content_suggestions,
    }))
}

#[cfg(test)]
mod tests {
    use crate::config::{HeuristConfig, OpenAiConfig, SuggestionConfig};
    use crate::services::providers::{
        CompletionProvider, MockCompletionProvider, MockTrendProvider, TrendProvider,
        NO_TRENDS_SENTINEL,
    };
    use crate::startup::{build_router, AppState};
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use axum::Router;
    use secrecy::Secret;
    use serde_json::json;
    use std::sync::Arc;
    use tower::util::ServiceExt;

    fn test_state(
        trend_provider: Arc<dyn TrendProvider>,
        completion_provider: Arc<dyn CompletionProvider>,
    ) -> AppState {
        AppState {
            config: SuggestionConfig {
                common: service_core::config::Config { port: 0 },
                heurist: HeuristConfig {
                    api_url: "http://127.0.0.1:0".to_string(),
                },
                openai: OpenAiConfig {
                    api_key: Secret::new("test-key".to_string()),
                    api_base_url: "http://127.0.0.1:0".to_string(),
                    model: "gpt-4".to_string(),
                },
            },
            trend_provider,
            completion_provider,
        }
    }

    async fn post_chatbot(
        router: Router,
        body: serde_json::Value,
    ) -> (StatusCode, serde_json::Value) {
        let response = router
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/chatbot/")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = serde_json::from_slice(&bytes).unwrap();
        (status, body)
    }

    #[tokio::test]
    async fn whitespace_niche_is_rejected_before_any_lookup() {
        let trends = Arc::new(MockTrendProvider::returning(vec!["home workouts"]));
        let completions = Arc::new(MockCompletionProvider::new());
        let router = build_router(test_state(trends.clone(), completions.clone()));

        let (status, _) = post_chatbot(router, json!({ "niche": "   " })).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(trends.call_count(), 0);
        assert_eq!(completions.call_count(), 0);
    }

    #[tokio::test]
    async fn empty_niche_is_rejected_by_schema_validation() {
        let trends = Arc::new(MockTrendProvider::returning(vec!["home workouts"]));
        let completions = Arc::new(MockCompletionProvider::new());
        let router = build_router(test_state(trends.clone(), completions.clone()));

        let (status, _) = post_chatbot(router, json!({ "niche": "" })).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(trends.call_count(), 0);
    }

    #[tokio::test]
    async fn empty_trend_list_returns_fallback_without_generation() {
        let trends = Arc::new(MockTrendProvider::returning(vec![]));
        let completions = Arc::new(MockCompletionProvider::new());
        let router = build_router(test_state(trends.clone(), completions.clone()));

        let (status, body) = post_chatbot(router, json!({ "niche": "fitness" })).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({
                "content_suggestions": ["No ideas available. Please try a different niche."]
            })
        );
        assert_eq!(completions.call_count(), 0);
    }

    #[tokio::test]
    async fn sentinel_trend_short_circuits_generation() {
        let trends = Arc::new(MockTrendProvider::returning(vec![NO_TRENDS_SENTINEL]));
        let completions = Arc::new(MockCompletionProvider::new());
        let router = build_router(test_state(trends.clone(), completions.clone()));

        let (status, body) = post_chatbot(router, json!({ "niche": "fitness" })).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body["content_suggestions"],
            json!(["No ideas available. Please try a different niche."])
        );
        assert_eq!(completions.call_count(), 0);
    }

    #[tokio::test]
    async fn generation_is_capped_at_the_first_three_trends() {
        let trends = Arc::new(MockTrendProvider::returning(vec![
            "trend one",
            "trend two",
            "trend three",
            "trend four",
            "trend five",
        ]));
        let completions = Arc::new(MockCompletionProvider::new());
        let router = build_router(test_state(trends.clone(), completions.clone()));

        let (status, body) = post_chatbot(router, json!({ "niche": "fitness" })).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body["content_suggestions"],
            json!([
                "Idea for trend one",
                "Idea for trend two",
                "Idea for trend three"
            ])
        );
        assert_eq!(
            completions.calls(),
            vec!["trend one", "trend two", "trend three"]
        );
    }

    #[tokio::test]
    async fn trend_lookup_failure_maps_to_503() {
        let trends = Arc::new(MockTrendProvider::failing(
            "Error fetching trending ideas: connection refused",
        ));
        let completions = Arc::new(MockCompletionProvider::new());
        let router = build_router(test_state(trends.clone(), completions.clone()));

        let (status, body) = post_chatbot(router, json!({ "niche": "fitness" })).await;

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert!(body["error"]
            .as_str()
            .unwrap()
            .contains("connection refused"));
        assert_eq!(completions.call_count(), 0);
    }

    #[tokio::test]
    async fn failed_generation_aborts_the_whole_request() {
        let trends = Arc::new(MockTrendProvider::returning(vec![
            "trend one",
            "trend two",
            "trend three",
        ]));
        let completions = Arc::new(MockCompletionProvider::failing_on_call(2));
        let router = build_router(test_state(trends.clone(), completions.clone()));

        let (status, body) = post_chatbot(router, json!({ "niche": "fitness" })).await;

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert!(body.get("content_suggestions").is_none());
        // The failure on the second call stops the sequence short.
        assert_eq!(completions.call_count(), 2);
    }
}
