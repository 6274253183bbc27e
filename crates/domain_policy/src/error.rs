//! Policy domain errors

use thiserror::Error;

use core_kernel::PrincipalId;

/// Errors that can occur in the policy domain
#[derive(Debug, Error)]
pub enum PolicyError {
    /// The owner already holds a policy
    #[error("Policy already exists for {0}")]
    DuplicatePolicy(PrincipalId),

    /// No policy is recorded for the owner
    #[error("Policy not found for {0}")]
    PolicyNotFound(PrincipalId),

    /// A field was supplied with the wrong width
    #[error("Invalid field: {0}")]
    InvalidField(String),
}
