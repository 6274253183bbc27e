//! In-memory cipher adapter
//!
//! A stand-in for the external cipher service. It allocates sequential
//! handles and keeps the hidden values in its own table, which the core never
//! reads directly. It provides no confidentiality beyond process boundaries
//! and exists so the claims logic can run without a real backend.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::{debug, warn};

use core_kernel::{
    AdapterHealth, CiphertextHandle, DomainPort, HealthCheckResult, HealthCheckable, PrincipalId,
};

use crate::capability::CapabilityRegistry;
use crate::error::CipherError;
use crate::field::{EncryptedField, FieldWidth};
use crate::ports::CipherPort;

#[derive(Debug, Clone, Copy)]
struct SealedValue {
    width: FieldWidth,
    value: u64,
}

/// Process-local implementation of [`CipherPort`]
#[derive(Debug)]
pub struct InMemoryCipher {
    system: PrincipalId,
    registry: Arc<CapabilityRegistry>,
    next_handle: AtomicU64,
    sealed: RwLock<HashMap<CiphertextHandle, SealedValue>>,
}

impl InMemoryCipher {
    /// Creates an adapter acting as `system` and consulting `registry`
    pub fn new(system: PrincipalId, registry: Arc<CapabilityRegistry>) -> Self {
        Self {
            system,
            registry,
            next_handle: AtomicU64::new(CiphertextHandle::FIRST.value()),
            sealed: RwLock::new(HashMap::new()),
        }
    }

    /// Number of ciphertexts issued so far
    pub async fn issued(&self) -> usize {
        self.sealed.read().await.len()
    }
}

impl DomainPort for InMemoryCipher {}

#[async_trait]
impl HealthCheckable for InMemoryCipher {
    async fn health_check(&self) -> HealthCheckResult {
        HealthCheckResult {
            adapter_id: "in-memory-cipher".to_string(),
            status: AdapterHealth::Healthy,
            latency_ms: 0,
            message: Some(format!("{} ciphertexts held", self.issued().await)),
            checked_at: Utc::now(),
        }
    }
}

#[async_trait]
impl CipherPort for InMemoryCipher {
    fn system_principal(&self) -> PrincipalId {
        self.system
    }

    async fn encrypt(&self, plaintext: u64, width: FieldWidth) -> Result<EncryptedField, CipherError> {
        if !width.admits(plaintext) {
            return Err(CipherError::ValueOutOfRange { value: plaintext, width });
        }

        let handle = CiphertextHandle::from_raw(self.next_handle.fetch_add(1, Ordering::SeqCst));
        self.sealed
            .write()
            .await
            .insert(handle, SealedValue { width, value: plaintext });

        debug!(%handle, %width, "value sealed");
        Ok(EncryptedField::new(handle, width))
    }

    async fn decrypt(&self, field: &EncryptedField, requester: PrincipalId) -> Result<u64, CipherError> {
        let handle = field.handle();
        let sealed = self
            .sealed
            .read()
            .await
            .get(&handle)
            .copied()
            .filter(|sealed| sealed.width == field.width())
            .ok_or(CipherError::UnknownHandle(handle))?;

        if !self.registry.has_access(handle, requester).await {
            warn!(%handle, %requester, "decryption refused");
            return Err(CipherError::AccessDenied { handle, principal: requester });
        }

        Ok(sealed.value)
    }
}
