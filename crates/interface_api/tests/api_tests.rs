//! HTTP tests for interface_api, driving the router in process

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use core_kernel::PrincipalId;
use domain_cipher::{CapabilityRegistry, CipherPort, InMemoryCipher};
use domain_claims::{ClaimsEngine, EngineConfig};
use interface_api::{auth::create_token, config::ApiConfig, create_router};
use test_utils::Cast;

const SECRET: &str = "api-test-secret";

struct TestApp {
    router: Router,
    cast: Cast,
}

impl TestApp {
    fn new() -> Self {
        let cast = Cast::new();
        let config = ApiConfig {
            jwt_secret: SECRET.to_string(),
            insurer: cast.insurer,
            system_account: cast.system,
            ..ApiConfig::default()
        };

        let registry = Arc::new(CapabilityRegistry::new());
        let cipher: Arc<dyn CipherPort> = Arc::new(InMemoryCipher::new(cast.system, registry.clone()));
        let engine = Arc::new(ClaimsEngine::new(cast.insurer, cipher, registry, EngineConfig::default()));

        Self {
            router: create_router(engine, config),
            cast,
        }
    }

    async fn send(&self, method: Method, uri: &str, caller: Option<PrincipalId>, body: Option<Value>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(caller) = caller {
            let token = create_token(caller, SECRET, 60).unwrap();
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    async fn get(&self, uri: &str, caller: PrincipalId) -> (StatusCode, Value) {
        self.send(Method::GET, uri, Some(caller), None).await
    }

    async fn post(&self, uri: &str, caller: PrincipalId, body: Value) -> (StatusCode, Value) {
        self.send(Method::POST, uri, Some(caller), Some(body)).await
    }

    async fn add_reviewer(&self, reviewer: PrincipalId) {
        let (status, _) = self
            .post("/api/v1/reviewers", self.cast.insurer, json!({ "reviewer": reviewer }))
            .await;
        assert_eq!(status, StatusCode::NO_CONTENT);
    }

    async fn submit_reference_claim(&self) -> u64 {
        let (status, body) = self
            .post(
                "/api/v1/claims",
                self.cast.submitter,
                json!({
                    "amount": 2000,
                    "diagnosis_code": 42,
                    "treatment_cost": 1500,
                    "patient_age": 35,
                    "severity_level": 3
                }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
        body["id"].as_u64().unwrap()
    }
}

// ============================================================================
// Health and Authentication
// ============================================================================

mod health_tests {
    use super::*;

    #[tokio::test]
    async fn test_health_needs_no_token() {
        let app = TestApp::new();

        let (status, body) = app.send(Method::GET, "/health", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
    }

    #[tokio::test]
    async fn test_readiness_reports_cipher_health() {
        let app = TestApp::new();

        let (status, body) = app.send(Method::GET, "/health/ready", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ready");
        assert_eq!(body["cipher"]["status"], "healthy");
    }
}

mod auth_tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_token_is_401() {
        let app = TestApp::new();

        let (status, body) = app.send(Method::GET, "/api/v1/claims", None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "unauthenticated");
    }

    #[tokio::test]
    async fn test_foreign_token_is_401() {
        let app = TestApp::new();
        let token = create_token(app.cast.submitter, "some-other-secret", 60).unwrap();
        let request = Request::builder()
            .uri("/api/v1/claims")
            .header(header::AUTHORIZATION, format!("Bearer {}", token))
            .body(Body::empty())
            .unwrap();

        let response = app.router.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}

// ============================================================================
// Claim Lifecycle over HTTP
// ============================================================================

mod lifecycle_tests {
    use super::*;

    #[tokio::test]
    async fn test_policy_to_payment() {
        let app = TestApp::new();
        let cast = app.cast;
        app.add_reviewer(cast.reviewer).await;

        let (status, policy) = app
            .post("/api/v1/policies", cast.submitter, json!({ "premium": 100, "coverage": 5000 }))
            .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(policy["encrypted_premium"]["width"], "u32");

        let (status, figures) = app
            .get(&format!("/api/v1/policies/{}/figures", cast.submitter.as_uuid()), cast.submitter)
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(figures, json!({ "premium": 100, "coverage": 5000 }));

        let id = app.submit_reference_claim().await;
        assert_eq!(id, 1);

        let (status, claim) = app.post(&format!("/api/v1/claims/{}/review", id), cast.reviewer, json!({})).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(claim["state"], "under_review");

        let (status, figures) = app.get(&format!("/api/v1/claims/{}/figures", id), cast.reviewer).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(figures["amount"], 2000);
        assert_eq!(figures["severity_level"], 3);

        let (status, claim) = app.post(&format!("/api/v1/claims/{}/approve", id), cast.reviewer, json!({})).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(claim["state"], "approved");

        let (status, claim) = app.post(&format!("/api/v1/claims/{}/pay", id), cast.insurer, json!({})).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(claim["state"], "paid");

        let (status, body) = app.post(&format!("/api/v1/claims/{}/pay", id), cast.insurer, json!({})).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"], "invalid_state");
    }

    #[tokio::test]
    async fn test_list_claims_returns_own_claims() {
        let app = TestApp::new();
        app.submit_reference_claim().await;
        app.submit_reference_claim().await;

        let (status, body) = app.get("/api/v1/claims", app.cast.submitter).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["claims"], json!([1, 2]));

        let (_, body) = app.get("/api/v1/claims", app.cast.outsider).await;
        assert_eq!(body["claims"], json!([]));
    }

    #[tokio::test]
    async fn test_decrypt_single_field() {
        let app = TestApp::new();
        let id = app.submit_reference_claim().await;

        let (_, claim) = app.get(&format!("/api/v1/claims/{}", id), app.cast.outsider).await;
        let amount = claim["fields"]["amount"]["handle"].as_u64().unwrap();

        let (status, body) = app
            .get(&format!("/api/v1/fields/{}?width=u64", amount), app.cast.submitter)
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["value"], 2000);

        let (status, _) = app
            .get(&format!("/api/v1/fields/{}?width=u32", amount), app.cast.submitter)
            .await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, body) = app
            .get(&format!("/api/v1/fields/{}?width=u64", amount), app.cast.outsider)
            .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["error"], "access_denied");
    }
}

// ============================================================================
// Error Mapping
// ============================================================================

mod error_mapping_tests {
    use super::*;

    #[tokio::test]
    async fn test_outsider_cannot_read_figures() {
        let app = TestApp::new();
        let id = app.submit_reference_claim().await;

        let (status, body) = app.get(&format!("/api/v1/claims/{}/figures", id), app.cast.outsider).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["error"], "access_denied");
    }

    #[tokio::test]
    async fn test_duplicate_policy_is_409() {
        let app = TestApp::new();
        let body = json!({ "premium": 100, "coverage": 5000 });

        let (status, _) = app.post("/api/v1/policies", app.cast.holder, body.clone()).await;
        assert_eq!(status, StatusCode::CREATED);
        let (status, body) = app.post("/api/v1/policies", app.cast.holder, body).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"], "duplicate_policy");
    }

    #[tokio::test]
    async fn test_non_reviewer_review_is_403() {
        let app = TestApp::new();
        let id = app.submit_reference_claim().await;

        let (status, body) = app.post(&format!("/api/v1/claims/{}/review", id), app.cast.outsider, json!({})).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["error"], "unauthorized");
    }

    #[tokio::test]
    async fn test_unknown_claim_is_404() {
        let app = TestApp::new();

        let (status, body) = app.get("/api/v1/claims/42", app.cast.submitter).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "not_found");
    }

    #[tokio::test]
    async fn test_reject_reasons() {
        let app = TestApp::new();
        app.add_reviewer(app.cast.reviewer).await;
        let id = app.submit_reference_claim().await;
        app.post(&format!("/api/v1/claims/{}/review", id), app.cast.reviewer, json!({})).await;
        let uri = format!("/api/v1/claims/{}/reject", id);

        let (status, body) = app.post(&uri, app.cast.reviewer, json!({ "reason": "" })).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "invalid_argument");

        let (status, body) = app
            .post(&uri, app.cast.reviewer, json!({ "reason": "x".repeat(2000) }))
            .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"], "validation_error");

        let (status, claim) = app
            .post(&uri, app.cast.reviewer, json!({ "reason": "Not covered" }))
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(claim["state"], "rejected");
        assert_eq!(claim["rejection_reason"], "Not covered");
    }

    #[tokio::test]
    async fn test_events_are_insurer_only() {
        let app = TestApp::new();
        app.add_reviewer(app.cast.reviewer).await;

        let (status, _) = app.get("/api/v1/events", app.cast.reviewer).await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, body) = app.get("/api/v1/events", app.cast.insurer).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body[0]["event"]["type"], "reviewer_added");
    }

    #[tokio::test]
    async fn test_remove_reviewer_by_non_insurer_is_403() {
        let app = TestApp::new();
        app.add_reviewer(app.cast.reviewer).await;

        let uri = format!("/api/v1/reviewers/{}", app.cast.reviewer.as_uuid());
        let (status, _) = app.send(Method::DELETE, &uri, Some(app.cast.reviewer), None).await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, _) = app.send(Method::DELETE, &uri, Some(app.cast.insurer), None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (_, body) = app.get("/api/v1/reviewers", app.cast.insurer).await;
        assert_eq!(body["reviewers"], json!([]));
    }
}
