//! Claims DTOs

use serde::{Deserialize, Serialize};
use validator::Validate;

use core_kernel::{CiphertextHandle, ClaimId};
use domain_cipher::FieldWidth;
use domain_claims::{ClaimFigures, ClaimState};

#[derive(Debug, Serialize, Deserialize)]
pub struct SubmitClaimRequest {
    pub amount: u64,
    pub diagnosis_code: u32,
    pub treatment_cost: u32,
    pub patient_age: u32,
    pub severity_level: u32,
}

impl From<SubmitClaimRequest> for ClaimFigures {
    fn from(request: SubmitClaimRequest) -> Self {
        ClaimFigures {
            amount: request.amount,
            diagnosis_code: request.diagnosis_code,
            treatment_cost: request.treatment_cost,
            patient_age: request.patient_age,
            severity_level: request.severity_level,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SubmitClaimResponse {
    pub id: ClaimId,
    pub state: ClaimState,
}

/// Emptiness is left to the engine, which reports it as an invalid argument
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct RejectClaimRequest {
    #[validate(length(max = 1024))]
    pub reason: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ClaimListResponse {
    pub claims: Vec<ClaimId>,
}

#[derive(Debug, Deserialize)]
pub struct FieldQuery {
    pub width: FieldWidth,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FieldValueResponse {
    pub handle: CiphertextHandle,
    pub width: FieldWidth,
    pub value: u64,
}
