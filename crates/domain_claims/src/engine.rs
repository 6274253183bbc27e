//! Claims engine
//!
//! The engine is the only entry point that mutates policies, claims and
//! capability grants. Each operation checks every precondition before it
//! touches a store, and writes the grants a transition authorizes while it
//! holds the claim's lock, so no caller can observe a reviewer without their
//! capabilities or a grant without its transition.
//!
//! # Grants issued
//!
//! | Operation        | Fields                 | Granted to                    |
//! |------------------|------------------------|-------------------------------|
//! | `create_policy`  | premium, coverage      | system account, policy holder |
//! | `submit_claim`   | all five claim fields  | system account, submitter     |
//! | `review_claim`   | all five claim fields  | the reviewer                  |

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

use core_kernel::{ClaimId, PrincipalId};
use domain_cipher::{CapabilityRegistry, CipherError, CipherPort, EncryptedField, FieldWidth};
use domain_policy::{Policy, PolicyStore};

use crate::claim::{Claim, ClaimState, EncryptedClaimFields};
use crate::error::ClaimError;
use crate::events::{AuditLog, AuditRecord, ClaimEvent};
use crate::roles::RoleDirectory;
use crate::store::ClaimStore;

/// Behavioural switches for the engine
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Refuse claims from principals that hold no policy
    #[serde(default)]
    pub require_policy_for_claims: bool,
    /// Refuse claims whose amount is zero
    #[serde(default)]
    pub reject_zero_claim_amount: bool,
}

/// Plaintext values of a claim: what a claimant submits and what an
/// authorized principal gets back
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimFigures {
    pub amount: u64,
    pub diagnosis_code: u32,
    pub treatment_cost: u32,
    pub patient_age: u32,
    pub severity_level: u32,
}

/// Plaintext premium and coverage of a policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyFigures {
    pub premium: u32,
    pub coverage: u32,
}

/// Public view of a claim: metadata in the clear, values as handles only
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimView {
    pub id: ClaimId,
    pub submitter: PrincipalId,
    pub state: ClaimState,
    pub reviewers: Vec<PrincipalId>,
    pub rejection_reason: Option<String>,
    pub fields: EncryptedClaimFields,
    pub created_at: DateTime<Utc>,
    pub reviewed_at: Option<DateTime<Utc>>,
    pub decided_at: Option<DateTime<Utc>>,
    pub paid_at: Option<DateTime<Utc>>,
}

impl From<&Claim> for ClaimView {
    fn from(claim: &Claim) -> Self {
        Self {
            id: claim.id,
            submitter: claim.submitter,
            state: claim.state,
            reviewers: claim.reviewers.iter().copied().collect(),
            rejection_reason: claim.rejection_reason.clone(),
            fields: claim.fields,
            created_at: claim.created_at,
            reviewed_at: claim.reviewed_at,
            decided_at: claim.decided_at,
            paid_at: claim.paid_at,
        }
    }
}

/// Orchestrates policies, claims, roles and capability grants
pub struct ClaimsEngine {
    config: EngineConfig,
    roles: RoleDirectory,
    policies: PolicyStore,
    claims: ClaimStore,
    registry: Arc<CapabilityRegistry>,
    cipher: Arc<dyn CipherPort>,
    audit: AuditLog,
}

impl ClaimsEngine {
    /// Creates an engine with `insurer` as the fixed insurer
    ///
    /// `registry` must be the registry `cipher` consults on decryption.
    pub fn new(
        insurer: PrincipalId,
        cipher: Arc<dyn CipherPort>,
        registry: Arc<CapabilityRegistry>,
        config: EngineConfig,
    ) -> Self {
        Self {
            config,
            roles: RoleDirectory::new(insurer),
            policies: PolicyStore::new(),
            claims: ClaimStore::new(),
            registry,
            cipher,
            audit: AuditLog::new(),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn roles(&self) -> &RoleDirectory {
        &self.roles
    }

    pub fn registry(&self) -> &CapabilityRegistry {
        &self.registry
    }

    pub fn cipher(&self) -> &Arc<dyn CipherPort> {
        &self.cipher
    }

    fn system(&self) -> PrincipalId {
        self.cipher.system_principal()
    }

    // ========================================================================
    // Roles
    // ========================================================================

    #[instrument(skip(self))]
    pub async fn add_reviewer(&self, caller: PrincipalId, reviewer: PrincipalId) -> Result<(), ClaimError> {
        if self.roles.add_reviewer(caller, reviewer).await? {
            self.audit.record(caller, ClaimEvent::ReviewerAdded { reviewer }).await;
        }
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn remove_reviewer(&self, caller: PrincipalId, reviewer: PrincipalId) -> Result<(), ClaimError> {
        if self.roles.remove_reviewer(caller, reviewer).await? {
            self.audit.record(caller, ClaimEvent::ReviewerRemoved { reviewer }).await;
        }
        Ok(())
    }

    // ========================================================================
    // Policies
    // ========================================================================

    /// Creates the caller's policy with an encrypted premium and coverage
    ///
    /// # Errors
    ///
    /// `ClaimError::DuplicatePolicy` if the caller already holds one
    #[instrument(skip(self, premium, coverage))]
    pub async fn create_policy(&self, caller: PrincipalId, premium: u32, coverage: u32) -> Result<(), ClaimError> {
        if self.policies.exists(caller).await {
            return Err(ClaimError::DuplicatePolicy(caller));
        }

        let encrypted_premium = self.cipher.encrypt(premium.into(), FieldWidth::U32).await?;
        let encrypted_coverage = self.cipher.encrypt(coverage.into(), FieldWidth::U32).await?;
        let policy = Policy::new(caller, encrypted_premium, encrypted_coverage)?;

        self.policies
            .insert(policy, &self.registry, &[self.system(), caller])
            .await?;
        self.audit.record(caller, ClaimEvent::PolicyCreated { owner: caller }).await;

        info!("policy created");
        Ok(())
    }

    pub async fn get_policy(&self, owner: PrincipalId) -> Result<Policy, ClaimError> {
        Ok(self.policies.get(owner).await?)
    }

    pub async fn has_policy(&self, owner: PrincipalId) -> bool {
        self.policies.exists(owner).await
    }

    pub async fn policy_count(&self) -> usize {
        self.policies.len().await
    }

    /// Decrypts `owner`'s premium and coverage for `caller`
    pub async fn reveal_policy(&self, caller: PrincipalId, owner: PrincipalId) -> Result<PolicyFigures, ClaimError> {
        let policy = self.policies.get(owner).await?;
        Ok(PolicyFigures {
            premium: self.decrypt_u32(caller, &policy.encrypted_premium).await?,
            coverage: self.decrypt_u32(caller, &policy.encrypted_coverage).await?,
        })
    }

    // ========================================================================
    // Claims
    // ========================================================================

    /// Files a claim on behalf of `caller`
    ///
    /// Returns the sequential id assigned to the claim.
    #[instrument(skip(self, figures))]
    pub async fn submit_claim(&self, caller: PrincipalId, figures: ClaimFigures) -> Result<ClaimId, ClaimError> {
        if self.config.reject_zero_claim_amount && figures.amount == 0 {
            return Err(ClaimError::invalid_argument("claim amount must be greater than zero"));
        }
        if self.config.require_policy_for_claims && !self.policies.exists(caller).await {
            return Err(ClaimError::PolicyNotFound(caller));
        }

        let fields = EncryptedClaimFields {
            amount: self.cipher.encrypt(figures.amount, FieldWidth::U64).await?,
            diagnosis_code: self.cipher.encrypt(figures.diagnosis_code.into(), FieldWidth::U32).await?,
            treatment_cost: self.cipher.encrypt(figures.treatment_cost.into(), FieldWidth::U32).await?,
            patient_age: self.cipher.encrypt(figures.patient_age.into(), FieldWidth::U32).await?,
            severity_level: self.cipher.encrypt(figures.severity_level.into(), FieldWidth::U32).await?,
        };
        fields.validate()?;

        let claim = self
            .claims
            .insert(caller, fields, &self.registry, &[self.system(), caller])
            .await;
        let claim_id = claim.id;
        self.audit
            .record(caller, ClaimEvent::ClaimSubmitted { claim_id, submitter: caller })
            .await;
        drop(claim);

        info!(%claim_id, "claim submitted");
        Ok(claim_id)
    }

    /// Moves a submitted claim under review by `caller`
    ///
    /// The reviewer is granted all five fields of the claim.
    #[instrument(skip(self))]
    pub async fn review_claim(&self, caller: PrincipalId, claim_id: ClaimId) -> Result<(), ClaimError> {
        if !self.roles.is_reviewer(caller).await {
            warn!("review refused: caller is not a reviewer");
            return Err(ClaimError::unauthorized(caller, "review claims"));
        }

        let handle = self.claims.handle(claim_id).await?;
        let mut claim = handle.lock().await;
        claim.ensure_transition(ClaimState::UnderReview)?;

        self.registry.grant_all(&claim.fields.handles(), &[caller]).await;
        claim.begin_review(caller)?;
        self.audit
            .record(caller, ClaimEvent::ClaimReviewed { claim_id, reviewer: caller })
            .await;

        info!("claim under review");
        Ok(())
    }

    /// Approves a claim `caller` is reviewing
    #[instrument(skip(self))]
    pub async fn approve_claim(&self, caller: PrincipalId, claim_id: ClaimId) -> Result<(), ClaimError> {
        let handle = self.claims.handle(claim_id).await?;
        let mut claim = handle.lock().await;
        claim.ensure_transition(ClaimState::Approved)?;
        Self::require_reviewer_of(&claim, caller, "approve this claim")?;

        claim.approve()?;
        self.audit
            .record(caller, ClaimEvent::ClaimApproved { claim_id, reviewer: caller })
            .await;

        info!("claim approved");
        Ok(())
    }

    /// Rejects a claim `caller` is reviewing, recording `reason`
    #[instrument(skip(self, reason))]
    pub async fn reject_claim(
        &self,
        caller: PrincipalId,
        claim_id: ClaimId,
        reason: impl Into<String>,
    ) -> Result<(), ClaimError> {
        let reason = reason.into();
        let handle = self.claims.handle(claim_id).await?;
        let mut claim = handle.lock().await;
        claim.ensure_transition(ClaimState::Rejected)?;
        Self::require_reviewer_of(&claim, caller, "reject this claim")?;

        claim.reject(reason.clone())?;
        self.audit
            .record(caller, ClaimEvent::ClaimRejected { claim_id, reviewer: caller, reason })
            .await;

        info!("claim rejected");
        Ok(())
    }

    /// Marks an approved claim as paid; insurer only
    #[instrument(skip(self))]
    pub async fn process_payment(&self, caller: PrincipalId, claim_id: ClaimId) -> Result<(), ClaimError> {
        if !self.roles.is_insurer(caller) {
            warn!("payment refused: caller is not the insurer");
            return Err(ClaimError::unauthorized(caller, "process payments"));
        }

        let handle = self.claims.handle(claim_id).await?;
        let mut claim = handle.lock().await;
        claim.mark_paid()?;
        self.audit.record(caller, ClaimEvent::ClaimPaid { claim_id }).await;

        info!("claim paid");
        Ok(())
    }

    pub async fn get_claim(&self, claim_id: ClaimId) -> Result<ClaimView, ClaimError> {
        let claim = self.claims.snapshot(claim_id).await?;
        Ok(ClaimView::from(&claim))
    }

    /// Claims filed by `submitter`, in submission order
    pub async fn claims_of(&self, submitter: PrincipalId) -> Vec<ClaimId> {
        self.claims.claims_of(submitter).await
    }

    pub async fn claim_count(&self) -> usize {
        self.claims.len().await
    }

    /// Decrypts all five values of a claim for `caller`
    ///
    /// # Errors
    ///
    /// `ClaimError::AccessDenied` if the caller lacks a grant on any field
    pub async fn reveal_claim(&self, caller: PrincipalId, claim_id: ClaimId) -> Result<ClaimFigures, ClaimError> {
        let fields = self.claims.snapshot(claim_id).await?.fields;
        Ok(ClaimFigures {
            amount: self.decrypt_field(caller, &fields.amount).await?,
            diagnosis_code: self.decrypt_u32(caller, &fields.diagnosis_code).await?,
            treatment_cost: self.decrypt_u32(caller, &fields.treatment_cost).await?,
            patient_age: self.decrypt_u32(caller, &fields.patient_age).await?,
            severity_level: self.decrypt_u32(caller, &fields.severity_level).await?,
        })
    }

    /// Asks the cipher service to reveal one field to `caller`
    pub async fn decrypt_field(&self, caller: PrincipalId, field: &EncryptedField) -> Result<u64, ClaimError> {
        Ok(self.cipher.decrypt(field, caller).await?)
    }

    // ========================================================================
    // Audit
    // ========================================================================

    pub async fn events(&self) -> Vec<AuditRecord> {
        self.audit.records().await
    }

    pub async fn events_for(&self, claim_id: ClaimId) -> Vec<AuditRecord> {
        self.audit.records_for(claim_id).await
    }

    fn require_reviewer_of(claim: &Claim, caller: PrincipalId, action: &'static str) -> Result<(), ClaimError> {
        if !claim.is_reviewed_by(caller) {
            warn!(claim_id = %claim.id, %caller, "decision refused: caller is not a reviewer of record");
            return Err(ClaimError::unauthorized(caller, action));
        }
        Ok(())
    }

    async fn decrypt_u32(&self, caller: PrincipalId, field: &EncryptedField) -> Result<u32, ClaimError> {
        let value = self.decrypt_field(caller, field).await?;
        u32::try_from(value).map_err(|_| {
            ClaimError::Cipher(CipherError::Unavailable(format!(
                "{} decrypted to a value wider than u32",
                field.handle()
            )))
        })
    }
}
