//! Cipher Service Port
//!
//! The cryptographic engine is an external collaborator. The core only needs
//! two things from it: turn a plaintext into an [`EncryptedField`], and turn
//! a field back into a plaintext for a requester the [`CapabilityRegistry`]
//! says may see it.
//!
//! Any backend (homomorphic, searchable, an HSM-fronted vault) can stand
//! behind this trait without the claims logic changing.
//!
//! ```rust,ignore
//! let cipher: Arc<dyn CipherPort> = Arc::new(InMemoryCipher::new(system, registry));
//! let field = cipher.encrypt(2000, FieldWidth::U64).await?;
//! let value = cipher.decrypt(&field, requester).await?;
//! ```
//!
//! [`CapabilityRegistry`]: crate::capability::CapabilityRegistry

use async_trait::async_trait;

use core_kernel::{DomainPort, HealthCheckable, PrincipalId};

use crate::error::CipherError;
use crate::field::{EncryptedField, FieldWidth};

/// Port to the external cipher service
#[async_trait]
pub trait CipherPort: DomainPort + HealthCheckable {
    /// The account the service acts as when it operates on ciphertexts
    ///
    /// Every field the core creates is granted to this principal.
    fn system_principal(&self) -> PrincipalId;

    /// Encrypts `plaintext` as a value of the given width
    ///
    /// # Errors
    ///
    /// `CipherError::ValueOutOfRange` if the plaintext does not fit the width
    async fn encrypt(&self, plaintext: u64, width: FieldWidth) -> Result<EncryptedField, CipherError>;

    /// Reveals the plaintext behind `field` to `requester`
    ///
    /// Implementations must consult the capability registry and refuse with
    /// `CipherError::AccessDenied` when the requester holds no grant.
    async fn decrypt(&self, field: &EncryptedField, requester: PrincipalId) -> Result<u64, CipherError>;
}
