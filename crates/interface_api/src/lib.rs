//! HTTP API Layer
//!
//! This crate provides the REST API for the confidential claims engine using
//! Axum.
//!
//! # Architecture
//!
//! - **Handlers**: Request handlers for policies, claims, reviewers and audit
//! - **Middleware**: Bearer authentication, audit logging
//! - **DTOs**: Request/Response data transfer objects
//! - **Error Handling**: Consistent error responses
//!
//! Every `/api/v1` route acts on behalf of the principal named by the bearer
//! token. Authorization beyond authentication is the engine's job.
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_api::create_router;
//!
//! let app = create_router(engine, config);
//! axum::serve(listener, app).await?;
//! ```

pub mod config;
pub mod error;
pub mod middleware;
pub mod handlers;
pub mod dto;
pub mod auth;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post, delete},
    middleware as axum_middleware,
};
use tower_http::trace::TraceLayer;
use tower_http::cors::{CorsLayer, Any};

use domain_claims::ClaimsEngine;

use crate::config::ApiConfig;
use crate::middleware::{auth_middleware, audit_middleware};
use crate::handlers::{claims, events, health, policy, reviewers};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<ClaimsEngine>,
    pub config: ApiConfig,
}

/// Creates the main API router
///
/// # Arguments
///
/// * `engine` - The claims engine all requests act on
/// * `config` - API configuration
///
/// # Returns
///
/// Configured Axum router with all routes and middleware
pub fn create_router(engine: Arc<ClaimsEngine>, config: ApiConfig) -> Router {
    let state = AppState { engine, config };

    // Public routes (no auth required)
    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check));

    // Policy routes
    let policy_routes = Router::new()
        .route("/", post(policy::create_policy))
        .route("/:owner", get(policy::get_policy))
        .route("/:owner/figures", get(policy::reveal_policy));

    // Claims routes
    let claims_routes = Router::new()
        .route("/", post(claims::submit_claim))
        .route("/", get(claims::list_claims))
        .route("/:id", get(claims::get_claim))
        .route("/:id/figures", get(claims::reveal_claim))
        .route("/:id/review", post(claims::review_claim))
        .route("/:id/approve", post(claims::approve_claim))
        .route("/:id/reject", post(claims::reject_claim))
        .route("/:id/pay", post(claims::process_payment));

    // Reviewer routes
    let reviewer_routes = Router::new()
        .route("/", post(reviewers::add_reviewer))
        .route("/", get(reviewers::list_reviewers))
        .route("/:principal", delete(reviewers::remove_reviewer));

    // Protected API routes
    let api_routes = Router::new()
        .nest("/policies", policy_routes)
        .nest("/claims", claims_routes)
        .nest("/reviewers", reviewer_routes)
        .route("/fields/:handle", get(claims::decrypt_field))
        .route("/events", get(events::list_events))
        .layer(axum_middleware::from_fn(audit_middleware))
        .layer(axum_middleware::from_fn_with_state(state.clone(), auth_middleware));

    // Combine all routes
    Router::new()
        .merge(public_routes)
        .nest("/api/v1", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
