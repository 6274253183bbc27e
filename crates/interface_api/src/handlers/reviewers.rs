//! Reviewer management handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};

use core_kernel::PrincipalId;

use crate::dto::reviewers::*;
use crate::middleware::Caller;
use crate::{error::ApiError, AppState};

/// Adds a reviewer; insurer only
pub async fn add_reviewer(
    State(state): State<AppState>,
    Extension(Caller(caller)): Extension<Caller>,
    Json(request): Json<AddReviewerRequest>,
) -> Result<StatusCode, ApiError> {
    state.engine.add_reviewer(caller, request.reviewer).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Removes a reviewer; insurer only
pub async fn remove_reviewer(
    State(state): State<AppState>,
    Extension(Caller(caller)): Extension<Caller>,
    Path(reviewer): Path<PrincipalId>,
) -> Result<StatusCode, ApiError> {
    state.engine.remove_reviewer(caller, reviewer).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Lists current reviewers
pub async fn list_reviewers(State(state): State<AppState>) -> Json<ReviewersResponse> {
    Json(ReviewersResponse {
        reviewers: state.engine.roles().reviewers().await,
    })
}
