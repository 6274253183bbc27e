//! Policy handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};

use core_kernel::PrincipalId;
use domain_claims::PolicyFigures;

use crate::dto::policy::*;
use crate::middleware::Caller;
use crate::{error::ApiError, AppState};

/// Creates the caller's policy
pub async fn create_policy(
    State(state): State<AppState>,
    Extension(Caller(caller)): Extension<Caller>,
    Json(request): Json<CreatePolicyRequest>,
) -> Result<(StatusCode, Json<PolicyResponse>), ApiError> {
    state
        .engine
        .create_policy(caller, request.premium, request.coverage)
        .await?;
    let policy = state.engine.get_policy(caller).await?;
    Ok((StatusCode::CREATED, Json(policy.into())))
}

/// Gets a policy by owner; values stay encrypted
pub async fn get_policy(
    State(state): State<AppState>,
    Path(owner): Path<PrincipalId>,
) -> Result<Json<PolicyResponse>, ApiError> {
    let policy = state.engine.get_policy(owner).await?;
    Ok(Json(policy.into()))
}

/// Decrypts a policy's premium and coverage for the caller
pub async fn reveal_policy(
    State(state): State<AppState>,
    Extension(Caller(caller)): Extension<Caller>,
    Path(owner): Path<PrincipalId>,
) -> Result<Json<PolicyFigures>, ApiError> {
    Ok(Json(state.engine.reveal_policy(caller, owner).await?))
}
