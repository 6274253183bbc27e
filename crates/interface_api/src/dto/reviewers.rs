//! Reviewer DTOs

use serde::{Deserialize, Serialize};

use core_kernel::PrincipalId;

#[derive(Debug, Serialize, Deserialize)]
pub struct AddReviewerRequest {
    pub reviewer: PrincipalId,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ReviewersResponse {
    pub reviewers: Vec<PrincipalId>,
}
