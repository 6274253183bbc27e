//! Claims domain errors

use serde::Serialize;
use thiserror::Error;

use core_kernel::{CiphertextHandle, ClaimId, PrincipalId};
use domain_cipher::CipherError;
use domain_policy::PolicyError;

use crate::claim::ClaimState;

/// Errors that can occur in the claims domain
///
/// Every error is a permanent rejection of the attempted operation. None of
/// them leave a partially applied change behind.
#[derive(Debug, Error)]
pub enum ClaimError {
    #[error("Unauthorized: {principal} may not {action}")]
    Unauthorized {
        principal: PrincipalId,
        action: &'static str,
    },

    #[error("Claim not found: {0}")]
    ClaimNotFound(ClaimId),

    #[error("Policy not found for {0}")]
    PolicyNotFound(PrincipalId),

    #[error("Policy already exists for {0}")]
    DuplicatePolicy(PrincipalId),

    #[error("Invalid state transition for {claim_id} from {from} to {to}")]
    InvalidState {
        claim_id: ClaimId,
        from: ClaimState,
        to: ClaimState,
    },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Access denied: {principal} holds no grant on {handle}")]
    AccessDenied {
        handle: CiphertextHandle,
        principal: PrincipalId,
    },

    #[error("Cipher service error: {0}")]
    Cipher(#[source] CipherError),
}

/// Coarse classification of a [`ClaimError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Unauthorized,
    NotFound,
    DuplicatePolicy,
    InvalidState,
    InvalidArgument,
    AccessDenied,
    Unavailable,
}

impl ClaimError {
    pub fn unauthorized(principal: PrincipalId, action: &'static str) -> Self {
        ClaimError::Unauthorized { principal, action }
    }

    pub fn invalid_argument(message: impl Into<String>) -> Self {
        ClaimError::InvalidArgument(message.into())
    }

    /// Returns the error kind
    pub fn kind(&self) -> ErrorKind {
        match self {
            ClaimError::Unauthorized { .. } => ErrorKind::Unauthorized,
            ClaimError::ClaimNotFound(_) | ClaimError::PolicyNotFound(_) => ErrorKind::NotFound,
            ClaimError::DuplicatePolicy(_) => ErrorKind::DuplicatePolicy,
            ClaimError::InvalidState { .. } => ErrorKind::InvalidState,
            ClaimError::InvalidArgument(_) => ErrorKind::InvalidArgument,
            ClaimError::AccessDenied { .. } => ErrorKind::AccessDenied,
            ClaimError::Cipher(CipherError::UnknownHandle(_)) => ErrorKind::NotFound,
            ClaimError::Cipher(_) => ErrorKind::Unavailable,
        }
    }
}

impl From<CipherError> for ClaimError {
    fn from(err: CipherError) -> Self {
        match err {
            CipherError::AccessDenied { handle, principal } => ClaimError::AccessDenied { handle, principal },
            CipherError::ValueOutOfRange { .. } => ClaimError::InvalidArgument(err.to_string()),
            other => ClaimError::Cipher(other),
        }
    }
}

impl From<PolicyError> for ClaimError {
    fn from(err: PolicyError) -> Self {
        match err {
            PolicyError::DuplicatePolicy(owner) => ClaimError::DuplicatePolicy(owner),
            PolicyError::PolicyNotFound(owner) => ClaimError::PolicyNotFound(owner),
            PolicyError::InvalidField(msg) => ClaimError::InvalidArgument(msg),
        }
    }
}
