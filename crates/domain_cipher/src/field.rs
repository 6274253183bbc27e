//! Encrypted field values

use serde::{Deserialize, Serialize};
use std::fmt;

use core_kernel::CiphertextHandle;

/// Declared bit-width of the plaintext hidden behind a ciphertext
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldWidth {
    /// Unsigned 32-bit integer
    U32,
    /// Unsigned 64-bit integer
    U64,
}

impl FieldWidth {
    /// Number of bits in the plaintext
    pub fn bits(&self) -> u32 {
        match self {
            FieldWidth::U32 => 32,
            FieldWidth::U64 => 64,
        }
    }

    /// Largest plaintext this width can carry
    pub fn max_value(&self) -> u64 {
        match self {
            FieldWidth::U32 => u64::from(u32::MAX),
            FieldWidth::U64 => u64::MAX,
        }
    }

    /// Returns true if `value` fits in this width
    pub fn admits(&self, value: u64) -> bool {
        value <= self.max_value()
    }
}

impl fmt::Display for FieldWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "u{}", self.bits())
    }
}

/// An opaque ciphertext handle plus the width of its plaintext
///
/// Immutable once created. Replacing a value means encrypting a new one and
/// getting a new handle; nothing ever rewrites a field in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EncryptedField {
    handle: CiphertextHandle,
    width: FieldWidth,
}

impl EncryptedField {
    /// Wraps a handle issued by a cipher service
    pub fn new(handle: CiphertextHandle, width: FieldWidth) -> Self {
        Self { handle, width }
    }

    pub fn handle(&self) -> CiphertextHandle {
        self.handle
    }

    pub fn width(&self) -> FieldWidth {
        self.width
    }
}

impl fmt::Display for EncryptedField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.handle, self.width)
    }
}
