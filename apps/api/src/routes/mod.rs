pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::generation::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/cv/generate", post(handlers::handle_generate))
        .route("/api/v1/cv/render", post(handlers::handle_render))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::Ordering;
    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::config::Config;
    use crate::generation::generator::tests::StubProvider;
    use crate::generation::normalizer::tests::valid_document;
    use crate::llm_client::{self, ProviderError};

    fn app_with(provider: Arc<StubProvider>) -> Router {
        let config = Config {
            port: 0,
            rust_log: "info".to_string(),
            llm_api_url: llm_client::DEFAULT_API_URL.to_string(),
            llm_model: "stub-model".to_string(),
            llm_max_tokens: 4000,
            llm_temperature: 0.7,
            llm_timeout_secs: 5,
            llm_json_mode: true,
        };
        build_router(AppState {
            provider,
            settings: config.generation_settings(),
            config,
        })
    }

    fn app(provider: StubProvider) -> Router {
        app_with(Arc::new(provider))
    }

    fn form() -> Value {
        json!({
            "name": "Jane Doe",
            "email": "jane@x.com",
            "phone": "+1 555 0100",
            "location": "Remote",
            "education": "BSc CS",
            "experienceLevel": "junior",
            "jobDescription": "Data engineer. Python, SQL, Airflow.",
            "apiKey": "gsk_route_secret"
        })
    }

    async fn post_json(app: Router, uri: &str, body: Value) -> (StatusCode, Value) {
        let response = app
            .oneshot(
                Request::post(uri)
                    .header("content-type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_health() {
        let response = app(StubProvider::replying("{}"))
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["status"], "ok");
        assert_eq!(body["model"], "stub-model");
    }

    #[tokio::test]
    async fn test_generate_returns_document_and_rendering() {
        let provider = StubProvider::replying(format!("```json\n{}\n```", valid_document()));
        let (status, body) = post_json(app(provider), "/api/v1/cv/generate", form()).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["atsScore"], 72);
        assert_eq!(body["data"]["warnings"].as_array().unwrap().len(), 1);
        assert!(body["rendered"].as_str().unwrap().starts_with("Jane Doe\n"));
    }

    #[tokio::test]
    async fn test_generate_rejects_missing_field_without_calling_provider() {
        let provider = Arc::new(StubProvider::replying(valid_document().to_string()));
        let router = app_with(provider.clone());

        let mut body = form();
        body["jobDescription"] = json!("   ");
        let (status, body) = post_json(router, "/api/v1/cv/generate", body).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert_eq!(body["error"]["message"], "jobDescription is required");
        assert_eq!(provider.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_generate_auth_failure_hides_key() {
        let provider = StubProvider::failing(|| ProviderError::AuthFailure {
            message: "401 Invalid API Key".to_string(),
        });
        let (status, body) = post_json(app(provider), "/api/v1/cv/generate", form()).await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["error"]["code"], "PROVIDER_AUTH_FAILURE");
        assert!(!body.to_string().contains("gsk_route_secret"));
    }

    #[tokio::test]
    async fn test_generate_malformed_reply() {
        let provider = StubProvider::replying("Sorry, I cannot do that.");
        let (status, body) = post_json(app(provider), "/api/v1/cv/generate", form()).await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["error"]["code"], "MALFORMED_RESPONSE");
    }

    #[tokio::test]
    async fn test_render_endpoint() {
        let request = json!({
            "profile": {
                "name": "Jane Doe",
                "email": "jane@x.com",
                "phone": "+1 555 0100",
                "location": "Remote",
                "education": "BSc CS"
            },
            "cv": valid_document()
        });
        let (status, body) =
            post_json(app(StubProvider::replying("{}")), "/api/v1/cv/render", request).await;

        assert_eq!(status, StatusCode::OK);
        assert!(body["rendered"]
            .as_str()
            .unwrap()
            .contains("PROFESSIONAL SUMMARY"));
    }

    #[tokio::test]
    async fn test_render_rejects_invalid_document() {
        let mut cv = valid_document();
        cv["format"] = json!("indonesia");
        let request = json!({
            "profile": {
                "name": "Jane Doe",
                "email": "jane@x.com",
                "phone": "+1 555 0100",
                "location": "Remote",
                "education": "BSc CS"
            },
            "cv": cv
        });
        let (status, body) =
            post_json(app(StubProvider::replying("{}")), "/api/v1/cv/render", request).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"]["code"], "UNPROCESSABLE_ENTITY");
        assert!(body["error"]["message"].as_str().unwrap().contains("format"));
    }
}
