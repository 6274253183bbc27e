//! Policy DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::PrincipalId;
use domain_cipher::EncryptedField;
use domain_policy::Policy;

#[derive(Debug, Serialize, Deserialize)]
pub struct CreatePolicyRequest {
    pub premium: u32,
    pub coverage: u32,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PolicyResponse {
    pub owner: PrincipalId,
    pub encrypted_premium: EncryptedField,
    pub encrypted_coverage: EncryptedField,
    pub created_at: DateTime<Utc>,
}

impl From<Policy> for PolicyResponse {
    fn from(policy: Policy) -> Self {
        Self {
            owner: policy.owner,
            encrypted_premium: policy.encrypted_premium,
            encrypted_coverage: policy.encrypted_coverage,
            created_at: policy.created_at,
        }
    }
}
