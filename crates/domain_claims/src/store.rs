//! Claim store
//!
//! Claims live behind their own mutex inside a shared index. Work on one
//! claim locks only that claim, so distinct claims proceed in parallel while
//! operations on the same claim serialize.
//!
//! # Invariants
//!
//! - Ids are assigned at insertion, under the index write lock, starting at 1
//!   with no gaps.
//! - A claim's initial capability grants are written before the claim becomes
//!   visible in the index.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, OwnedMutexGuard, RwLock};
use tracing::debug;

use core_kernel::{ClaimId, PrincipalId};
use domain_cipher::CapabilityRegistry;

use crate::claim::{Claim, EncryptedClaimFields};
use crate::error::ClaimError;

/// Shared handle to one claim
pub type ClaimHandle = Arc<Mutex<Claim>>;

#[derive(Debug)]
struct ClaimIndex {
    next_id: ClaimId,
    claims: HashMap<ClaimId, ClaimHandle>,
    by_submitter: HashMap<PrincipalId, Vec<ClaimId>>,
}

impl Default for ClaimIndex {
    fn default() -> Self {
        Self {
            next_id: ClaimId::FIRST,
            claims: HashMap::new(),
            by_submitter: HashMap::new(),
        }
    }
}

/// In-memory store of claims keyed by sequential id
#[derive(Debug, Default)]
pub struct ClaimStore {
    index: RwLock<ClaimIndex>,
}

impl ClaimStore {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Files a new claim and grants its fields to `grantees`
    ///
    /// Returns the new claim still locked, so the caller can finish its
    /// bookkeeping before any other operation reaches the claim.
    pub async fn insert(
        &self,
        submitter: PrincipalId,
        fields: EncryptedClaimFields,
        registry: &CapabilityRegistry,
        grantees: &[PrincipalId],
    ) -> OwnedMutexGuard<Claim> {
        let mut index = self.index.write().await;

        let id = index.next_id;
        let handle = Arc::new(Mutex::new(Claim::submitted(id, submitter, fields)));
        let guard = handle.clone().lock_owned().await;
        registry.grant_all(&fields.handles(), grantees).await;

        index.next_id = id.next();
        index.claims.insert(id, handle);
        index.by_submitter.entry(submitter).or_default().push(id);

        debug!(claim_id = %id, %submitter, "claim stored");
        guard
    }

    /// Returns the shared handle for `id`
    pub async fn handle(&self, id: ClaimId) -> Result<ClaimHandle, ClaimError> {
        self.index
            .read()
            .await
            .claims
            .get(&id)
            .cloned()
            .ok_or(ClaimError::ClaimNotFound(id))
    }

    /// Returns a consistent copy of the claim
    pub async fn snapshot(&self, id: ClaimId) -> Result<Claim, ClaimError> {
        let handle = self.handle(id).await?;
        let claim = handle.lock().await;
        Ok(claim.clone())
    }

    /// Claims filed by `submitter`, in submission order
    pub async fn claims_of(&self, submitter: PrincipalId) -> Vec<ClaimId> {
        self.index
            .read()
            .await
            .by_submitter
            .get(&submitter)
            .cloned()
            .unwrap_or_default()
    }

    /// Number of claims filed
    pub async fn len(&self) -> usize {
        self.index.read().await.claims.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
