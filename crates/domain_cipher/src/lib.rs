//! Confidential Field Domain
//!
//! Sensitive numbers in this system never sit in a record as plaintext. A
//! record holds an [`EncryptedField`]: a handle to a ciphertext owned by an
//! external cipher service, plus the declared width of the hidden value.
//!
//! Who may turn a handle back into a number is decided by the
//! [`CapabilityRegistry`], an append-only ledger of (handle, principal)
//! grants. The cipher service consults it on every decryption.
//!
//! # Flow
//!
//! ```text
//! encrypt(value, width) -> EncryptedField
//! registry.grant(field.handle(), principal)
//! decrypt(field, principal) -> value | AccessDenied
//! ```

pub mod field;
pub mod capability;
pub mod ports;
pub mod adapters;
pub mod error;

pub use field::{EncryptedField, FieldWidth};
pub use capability::CapabilityRegistry;
pub use ports::CipherPort;
pub use adapters::InMemoryCipher;
pub use error::CipherError;
