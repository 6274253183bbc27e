//! Audit log handlers

use axum::{extract::State, Extension, Json};

use domain_claims::AuditRecord;

use crate::middleware::Caller;
use crate::{error::ApiError, AppState};

/// Returns the whole audit log; insurer only
pub async fn list_events(
    State(state): State<AppState>,
    Extension(Caller(caller)): Extension<Caller>,
) -> Result<Json<Vec<AuditRecord>>, ApiError> {
    if !state.engine.roles().is_insurer(caller) {
        return Err(ApiError::Forbidden("only the insurer may read the audit log".to_string()));
    }
    Ok(Json(state.engine.events().await))
}
