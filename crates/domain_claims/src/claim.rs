//! Claim aggregate

use std::collections::BTreeSet;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::{CiphertextHandle, ClaimId, PrincipalId};
use domain_cipher::{EncryptedField, FieldWidth};

use crate::error::ClaimError;

/// Claim state
///
/// ```text
/// Submitted -> UnderReview -> Approved -> Paid
///                          \-> Rejected
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClaimState {
    /// Filed by the claimant, awaiting a reviewer
    Submitted,
    /// Picked up by a reviewer
    UnderReview,
    /// Approved for payment
    Approved,
    /// Rejected with a reason; terminal
    Rejected,
    /// Paid out; terminal
    Paid,
}

impl ClaimState {
    /// Checks if transition is valid
    pub fn can_transition_to(&self, target: ClaimState) -> bool {
        use ClaimState::*;
        matches!(
            (self, target),
            (Submitted, UnderReview) |
            (UnderReview, Approved) |
            (UnderReview, Rejected) |
            (Approved, Paid)
        )
    }

    /// Returns true if no further transition is possible
    pub fn is_terminal(&self) -> bool {
        matches!(self, ClaimState::Rejected | ClaimState::Paid)
    }

    /// Position along the lifecycle, used to check that states only advance
    pub fn rank(&self) -> u8 {
        match self {
            ClaimState::Submitted => 0,
            ClaimState::UnderReview => 1,
            ClaimState::Approved | ClaimState::Rejected => 2,
            ClaimState::Paid => 3,
        }
    }
}

impl fmt::Display for ClaimState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ClaimState::Submitted => "Submitted",
            ClaimState::UnderReview => "UnderReview",
            ClaimState::Approved => "Approved",
            ClaimState::Rejected => "Rejected",
            ClaimState::Paid => "Paid",
        };
        f.write_str(name)
    }
}

/// The five confidential values carried by a claim
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncryptedClaimFields {
    /// Claimed amount, 64-bit
    pub amount: EncryptedField,
    /// Diagnosis code, 32-bit
    pub diagnosis_code: EncryptedField,
    /// Treatment cost, 32-bit
    pub treatment_cost: EncryptedField,
    /// Patient age, 32-bit
    pub patient_age: EncryptedField,
    /// Severity level, 32-bit
    pub severity_level: EncryptedField,
}

impl EncryptedClaimFields {
    /// Checks that every field carries its declared width
    pub fn validate(&self) -> Result<(), ClaimError> {
        if self.amount.width() != FieldWidth::U64 {
            return Err(ClaimError::invalid_argument("claim amount must be a u64 field"));
        }
        let narrow = [
            ("diagnosis code", &self.diagnosis_code),
            ("treatment cost", &self.treatment_cost),
            ("patient age", &self.patient_age),
            ("severity level", &self.severity_level),
        ];
        for (name, field) in narrow {
            if field.width() != FieldWidth::U32 {
                return Err(ClaimError::invalid_argument(format!("{} must be a u32 field", name)));
            }
        }
        Ok(())
    }

    /// All five fields, amount first
    pub fn all(&self) -> [EncryptedField; 5] {
        [
            self.amount,
            self.diagnosis_code,
            self.treatment_cost,
            self.patient_age,
            self.severity_level,
        ]
    }

    pub fn handles(&self) -> [CiphertextHandle; 5] {
        self.all().map(|f| f.handle())
    }
}

/// An insurance claim with confidential medical and financial details
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claim {
    /// Sequential identifier, starting at 1
    pub id: ClaimId,
    /// Principal who filed the claim
    pub submitter: PrincipalId,
    /// Encrypted values
    pub fields: EncryptedClaimFields,
    /// Current state
    pub state: ClaimState,
    /// Reviewers of record; only ever grows
    pub reviewers: BTreeSet<PrincipalId>,
    /// Set iff state is Rejected
    pub rejection_reason: Option<String>,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
    /// When review started
    pub reviewed_at: Option<DateTime<Utc>>,
    /// When approved or rejected
    pub decided_at: Option<DateTime<Utc>>,
    /// When paid
    pub paid_at: Option<DateTime<Utc>>,
}

impl Claim {
    /// Creates a newly submitted claim
    pub fn submitted(id: ClaimId, submitter: PrincipalId, fields: EncryptedClaimFields) -> Self {
        Self {
            id,
            submitter,
            fields,
            state: ClaimState::Submitted,
            reviewers: BTreeSet::new(),
            rejection_reason: None,
            created_at: Utc::now(),
            reviewed_at: None,
            decided_at: None,
            paid_at: None,
        }
    }

    /// Returns true if `principal` is a reviewer of record
    pub fn is_reviewed_by(&self, principal: PrincipalId) -> bool {
        self.reviewers.contains(&principal)
    }

    /// Fails with `InvalidState` unless the claim may move to `target`
    pub fn ensure_transition(&self, target: ClaimState) -> Result<(), ClaimError> {
        if !self.state.can_transition_to(target) {
            return Err(ClaimError::InvalidState {
                claim_id: self.id,
                from: self.state,
                to: target,
            });
        }
        Ok(())
    }

    /// Submitted -> UnderReview, recording `reviewer`
    pub fn begin_review(&mut self, reviewer: PrincipalId) -> Result<(), ClaimError> {
        self.ensure_transition(ClaimState::UnderReview)?;
        self.state = ClaimState::UnderReview;
        self.reviewers.insert(reviewer);
        self.reviewed_at = Some(Utc::now());
        Ok(())
    }

    /// UnderReview -> Approved
    pub fn approve(&mut self) -> Result<(), ClaimError> {
        self.ensure_transition(ClaimState::Approved)?;
        self.state = ClaimState::Approved;
        self.decided_at = Some(Utc::now());
        Ok(())
    }

    /// UnderReview -> Rejected
    ///
    /// The reason must contain something other than whitespace.
    pub fn reject(&mut self, reason: String) -> Result<(), ClaimError> {
        self.ensure_transition(ClaimState::Rejected)?;
        if reason.trim().is_empty() {
            return Err(ClaimError::invalid_argument("rejection reason must not be empty"));
        }
        self.state = ClaimState::Rejected;
        self.rejection_reason = Some(reason);
        self.decided_at = Some(Utc::now());
        Ok(())
    }

    /// Approved -> Paid
    pub fn mark_paid(&mut self) -> Result<(), ClaimError> {
        self.ensure_transition(ClaimState::Paid)?;
        self.state = ClaimState::Paid;
        self.paid_at = Some(Utc::now());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields() -> EncryptedClaimFields {
        let f = |raw, width| EncryptedField::new(CiphertextHandle::from_raw(raw), width);
        EncryptedClaimFields {
            amount: f(1, FieldWidth::U64),
            diagnosis_code: f(2, FieldWidth::U32),
            treatment_cost: f(3, FieldWidth::U32),
            patient_age: f(4, FieldWidth::U32),
            severity_level: f(5, FieldWidth::U32),
        }
    }

    #[test]
    fn test_only_forward_edges_allowed() {
        use ClaimState::*;
        let all = [Submitted, UnderReview, Approved, Rejected, Paid];
        for from in all {
            for to in all {
                if from.can_transition_to(to) {
                    assert!(to.rank() == from.rank() + 1, "{} -> {} skips or reverses", from, to);
                }
            }
        }
    }

    #[test]
    fn test_terminal_states_have_no_exits() {
        use ClaimState::*;
        for terminal in [Rejected, Paid] {
            assert!(terminal.is_terminal());
            for to in [Submitted, UnderReview, Approved, Rejected, Paid] {
                assert!(!terminal.can_transition_to(to));
            }
        }
    }

    #[test]
    fn test_reject_requires_reason_and_keeps_state() {
        let mut claim = Claim::submitted(ClaimId::FIRST, PrincipalId::new(), fields());
        claim.begin_review(PrincipalId::new()).unwrap();

        assert!(matches!(claim.reject("   ".to_string()), Err(ClaimError::InvalidArgument(_))));
        assert_eq!(claim.state, ClaimState::UnderReview);
        assert!(claim.rejection_reason.is_none());
    }

    #[test]
    fn test_field_widths_validated() {
        let mut bad = fields();
        bad.amount = EncryptedField::new(CiphertextHandle::from_raw(1), FieldWidth::U32);
        assert!(bad.validate().is_err());
        assert!(fields().validate().is_ok());
    }
}
