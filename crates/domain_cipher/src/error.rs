//! Cipher domain errors

use thiserror::Error;

use core_kernel::{CiphertextHandle, PrincipalId};
use crate::field::FieldWidth;

/// Errors surfaced by the cipher service
#[derive(Debug, Error)]
pub enum CipherError {
    #[error("Access denied: {principal} holds no grant on {handle}")]
    AccessDenied {
        handle: CiphertextHandle,
        principal: PrincipalId,
    },

    #[error("Unknown ciphertext handle: {0}")]
    UnknownHandle(CiphertextHandle),

    #[error("Value {value} does not fit in a {width} field")]
    ValueOutOfRange { value: u64, width: FieldWidth },

    #[error("Cipher service unavailable: {0}")]
    Unavailable(String),
}

impl CipherError {
    /// Returns true if this error is a refused decryption
    pub fn is_access_denied(&self) -> bool {
        matches!(self, CipherError::AccessDenied { .. })
    }
}
