//! Capability registry
//!
//! The registry is the authorization ledger the cipher service consults
//! before it reveals a plaintext. It records which principal may decrypt
//! which ciphertext handle and nothing else.
//!
//! # Invariants
//!
//! - Grants are monotonic: there is no revoke, and a pair once granted stays
//!   granted for the lifetime of the registry.
//! - Granting an existing pair is a no-op.
//! - Absence of a grant is the only way access is denied.

use std::collections::{HashMap, HashSet};

use tokio::sync::RwLock;
use tracing::debug;

use core_kernel::{CiphertextHandle, PrincipalId};

/// Append-only set of (ciphertext handle, principal) grants
#[derive(Debug, Default)]
pub struct CapabilityRegistry {
    grants: RwLock<HashMap<CiphertextHandle, HashSet<PrincipalId>>>,
}

impl CapabilityRegistry {
    /// Creates an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Grants `principal` the right to decrypt `handle`
    ///
    /// Returns true if the grant is new, false if it already existed.
    pub async fn grant(&self, handle: CiphertextHandle, principal: PrincipalId) -> bool {
        let added = self
            .grants
            .write()
            .await
            .entry(handle)
            .or_default()
            .insert(principal);

        if added {
            debug!(%handle, %principal, "capability granted");
        }
        added
    }

    /// Grants every principal access to every handle under a single lock
    ///
    /// Readers observe either none or all of the pairs. Returns the number of
    /// grants that did not already exist.
    pub async fn grant_all(&self, handles: &[CiphertextHandle], principals: &[PrincipalId]) -> usize {
        let mut grants = self.grants.write().await;
        let mut added = 0;

        for handle in handles {
            let holders = grants.entry(*handle).or_default();
            for principal in principals {
                if holders.insert(*principal) {
                    added += 1;
                }
            }
        }

        debug!(
            handles = handles.len(),
            principals = principals.len(),
            added,
            "capabilities granted"
        );
        added
    }

    /// Returns true if `principal` may decrypt `handle`
    pub async fn has_access(&self, handle: CiphertextHandle, principal: PrincipalId) -> bool {
        self.grants
            .read()
            .await
            .get(&handle)
            .map(|holders| holders.contains(&principal))
            .unwrap_or(false)
    }

    /// Lists the principals holding a grant on `handle`, sorted
    pub async fn grants_for(&self, handle: CiphertextHandle) -> Vec<PrincipalId> {
        let mut holders: Vec<_> = self
            .grants
            .read()
            .await
            .get(&handle)
            .map(|holders| holders.iter().copied().collect())
            .unwrap_or_default();
        holders.sort();
        holders
    }

    /// Total number of (handle, principal) grants recorded
    pub async fn grant_count(&self) -> usize {
        self.grants.read().await.values().map(HashSet::len).sum()
    }
}
