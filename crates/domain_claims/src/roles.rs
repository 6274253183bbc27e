//! Role directory
//!
//! Tracks the single insurer and the set of reviewers. The insurer is fixed
//! when the directory is built; only the insurer may change the reviewer set.

use std::collections::BTreeSet;

use tokio::sync::RwLock;
use tracing::{info, warn};

use core_kernel::PrincipalId;

use crate::error::ClaimError;

/// Insurer and reviewer lookup
#[derive(Debug)]
pub struct RoleDirectory {
    insurer: PrincipalId,
    reviewers: RwLock<BTreeSet<PrincipalId>>,
}

impl RoleDirectory {
    /// Creates a directory with `insurer` as the fixed insurer and no reviewers
    pub fn new(insurer: PrincipalId) -> Self {
        Self {
            insurer,
            reviewers: RwLock::new(BTreeSet::new()),
        }
    }

    pub fn insurer(&self) -> PrincipalId {
        self.insurer
    }

    pub fn is_insurer(&self, principal: PrincipalId) -> bool {
        principal == self.insurer
    }

    pub async fn is_reviewer(&self, principal: PrincipalId) -> bool {
        self.reviewers.read().await.contains(&principal)
    }

    /// Adds `reviewer` to the reviewer set
    ///
    /// Returns true if the reviewer was not already present.
    ///
    /// # Errors
    ///
    /// `ClaimError::Unauthorized` unless `caller` is the insurer
    pub async fn add_reviewer(&self, caller: PrincipalId, reviewer: PrincipalId) -> Result<bool, ClaimError> {
        self.require_insurer(caller, "add reviewers")?;
        let added = self.reviewers.write().await.insert(reviewer);
        if added {
            info!(%reviewer, "reviewer added");
        }
        Ok(added)
    }

    /// Removes `reviewer` from the reviewer set; a non-member is a no-op
    ///
    /// Returns true if the reviewer was present.
    ///
    /// # Errors
    ///
    /// `ClaimError::Unauthorized` unless `caller` is the insurer
    pub async fn remove_reviewer(&self, caller: PrincipalId, reviewer: PrincipalId) -> Result<bool, ClaimError> {
        self.require_insurer(caller, "remove reviewers")?;
        let removed = self.reviewers.write().await.remove(&reviewer);
        if removed {
            info!(%reviewer, "reviewer removed");
        }
        Ok(removed)
    }

    /// Current reviewers, sorted
    pub async fn reviewers(&self) -> Vec<PrincipalId> {
        self.reviewers.read().await.iter().copied().collect()
    }

    fn require_insurer(&self, caller: PrincipalId, action: &'static str) -> Result<(), ClaimError> {
        if !self.is_insurer(caller) {
            warn!(%caller, action, "insurer-only action refused");
            return Err(ClaimError::unauthorized(caller, action));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_insurer_manages_reviewers() {
        let insurer = PrincipalId::new();
        let reviewer = PrincipalId::new();
        let roles = RoleDirectory::new(insurer);

        assert!(roles.add_reviewer(insurer, reviewer).await.unwrap());
        assert!(!roles.add_reviewer(insurer, reviewer).await.unwrap());
        assert!(roles.is_reviewer(reviewer).await);

        assert!(roles.remove_reviewer(insurer, reviewer).await.unwrap());
        assert!(!roles.is_reviewer(reviewer).await);
    }

    #[tokio::test]
    async fn test_removing_non_member_is_noop() {
        let insurer = PrincipalId::new();
        let roles = RoleDirectory::new(insurer);

        assert!(!roles.remove_reviewer(insurer, PrincipalId::new()).await.unwrap());
        assert!(roles.reviewers().await.is_empty());
    }

    #[tokio::test]
    async fn test_non_insurer_refused() {
        let roles = RoleDirectory::new(PrincipalId::new());
        let intruder = PrincipalId::new();

        let add = roles.add_reviewer(intruder, intruder).await;
        let remove = roles.remove_reviewer(intruder, intruder).await;

        assert!(matches!(add, Err(ClaimError::Unauthorized { .. })));
        assert!(matches!(remove, Err(ClaimError::Unauthorized { .. })));
        assert!(!roles.is_reviewer(intruder).await);
    }

    #[tokio::test]
    async fn test_insurer_is_not_implicitly_a_reviewer() {
        let insurer = PrincipalId::new();
        let roles = RoleDirectory::new(insurer);
        assert!(roles.is_insurer(insurer));
        assert!(!roles.is_reviewer(insurer).await);
    }
}
