//! Claims handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use validator::Validate;

use core_kernel::{CiphertextHandle, ClaimId};
use domain_cipher::EncryptedField;
use domain_claims::{ClaimFigures, ClaimView};

use crate::dto::claims::*;
use crate::middleware::Caller;
use crate::{error::ApiError, AppState};

/// Files a claim for the caller
pub async fn submit_claim(
    State(state): State<AppState>,
    Extension(Caller(caller)): Extension<Caller>,
    Json(request): Json<SubmitClaimRequest>,
) -> Result<(StatusCode, Json<SubmitClaimResponse>), ApiError> {
    let id = state.engine.submit_claim(caller, request.into()).await?;
    let claim = state.engine.get_claim(id).await?;
    Ok((
        StatusCode::CREATED,
        Json(SubmitClaimResponse {
            id,
            state: claim.state,
        }),
    ))
}

/// Lists the caller's own claims
pub async fn list_claims(
    State(state): State<AppState>,
    Extension(Caller(caller)): Extension<Caller>,
) -> Json<ClaimListResponse> {
    Json(ClaimListResponse {
        claims: state.engine.claims_of(caller).await,
    })
}

/// Gets a claim by ID; values stay encrypted
pub async fn get_claim(
    State(state): State<AppState>,
    Path(id): Path<ClaimId>,
) -> Result<Json<ClaimView>, ApiError> {
    Ok(Json(state.engine.get_claim(id).await?))
}

/// Decrypts all five values of a claim for the caller
pub async fn reveal_claim(
    State(state): State<AppState>,
    Extension(Caller(caller)): Extension<Caller>,
    Path(id): Path<ClaimId>,
) -> Result<Json<ClaimFigures>, ApiError> {
    Ok(Json(state.engine.reveal_claim(caller, id).await?))
}

/// Takes a claim under review
pub async fn review_claim(
    State(state): State<AppState>,
    Extension(Caller(caller)): Extension<Caller>,
    Path(id): Path<ClaimId>,
) -> Result<Json<ClaimView>, ApiError> {
    state.engine.review_claim(caller, id).await?;
    Ok(Json(state.engine.get_claim(id).await?))
}

/// Approves a claim under the caller's review
pub async fn approve_claim(
    State(state): State<AppState>,
    Extension(Caller(caller)): Extension<Caller>,
    Path(id): Path<ClaimId>,
) -> Result<Json<ClaimView>, ApiError> {
    state.engine.approve_claim(caller, id).await?;
    Ok(Json(state.engine.get_claim(id).await?))
}

/// Rejects a claim under the caller's review
pub async fn reject_claim(
    State(state): State<AppState>,
    Extension(Caller(caller)): Extension<Caller>,
    Path(id): Path<ClaimId>,
    Json(request): Json<RejectClaimRequest>,
) -> Result<Json<ClaimView>, ApiError> {
    request.validate()?;
    state.engine.reject_claim(caller, id, request.reason).await?;
    Ok(Json(state.engine.get_claim(id).await?))
}

/// Pays an approved claim
pub async fn process_payment(
    State(state): State<AppState>,
    Extension(Caller(caller)): Extension<Caller>,
    Path(id): Path<ClaimId>,
) -> Result<Json<ClaimView>, ApiError> {
    state.engine.process_payment(caller, id).await?;
    Ok(Json(state.engine.get_claim(id).await?))
}

/// Decrypts a single field for the caller
pub async fn decrypt_field(
    State(state): State<AppState>,
    Extension(Caller(caller)): Extension<Caller>,
    Path(handle): Path<CiphertextHandle>,
    Query(query): Query<FieldQuery>,
) -> Result<Json<FieldValueResponse>, ApiError> {
    let field = EncryptedField::new(handle, query.width);
    let value = state.engine.decrypt_field(caller, &field).await?;
    Ok(Json(FieldValueResponse {
        handle,
        width: query.width,
        value,
    }))
}
