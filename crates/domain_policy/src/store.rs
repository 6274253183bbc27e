//! Policy store
//!
//! Holds at most one [`Policy`] per owner. Insertion and the capability
//! grants for the new policy's fields happen under the same write lock, so
//! a losing racer leaves neither a record nor grants behind.

use std::collections::HashMap;

use tokio::sync::RwLock;
use tracing::debug;

use core_kernel::PrincipalId;
use domain_cipher::CapabilityRegistry;

use crate::error::PolicyError;
use crate::policy::Policy;

/// In-memory store of policies keyed by owner
#[derive(Debug, Default)]
pub struct PolicyStore {
    policies: RwLock<HashMap<PrincipalId, Policy>>,
}

impl PolicyStore {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if `owner` already holds a policy
    pub async fn exists(&self, owner: PrincipalId) -> bool {
        self.policies
            .read()
            .await
            .get(&owner)
            .map(|p| p.exists)
            .unwrap_or(false)
    }

    /// Persists `policy` and grants its fields to `grantees`
    ///
    /// # Errors
    ///
    /// `PolicyError::DuplicatePolicy` if the owner already holds a policy;
    /// nothing is granted in that case.
    pub async fn insert(
        &self,
        policy: Policy,
        registry: &CapabilityRegistry,
        grantees: &[PrincipalId],
    ) -> Result<(), PolicyError> {
        let mut policies = self.policies.write().await;

        if policies.get(&policy.owner).map(|p| p.exists).unwrap_or(false) {
            return Err(PolicyError::DuplicatePolicy(policy.owner));
        }

        let handles: Vec<_> = policy.fields().iter().map(|f| f.handle()).collect();
        registry.grant_all(&handles, grantees).await;

        debug!(owner = %policy.owner, "policy stored");
        policies.insert(policy.owner, policy);
        Ok(())
    }

    /// Retrieves the policy held by `owner`
    pub async fn get(&self, owner: PrincipalId) -> Result<Policy, PolicyError> {
        self.policies
            .read()
            .await
            .get(&owner)
            .cloned()
            .ok_or(PolicyError::PolicyNotFound(owner))
    }

    /// Number of policies held
    pub async fn len(&self) -> usize {
        self.policies.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
