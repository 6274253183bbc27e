//! Domain events for the claims workflow
//!
//! Every successful operation of the engine appends one event to the audit
//! log. Events name principals, claim ids and ciphertext handles; they never
//! carry plaintext values.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use core_kernel::{AuditEventId, ClaimId, PrincipalId};

/// Events emitted by the claims engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClaimEvent {
    /// A policy holder created their policy
    PolicyCreated {
        owner: PrincipalId,
    },

    /// A claim was filed
    ClaimSubmitted {
        claim_id: ClaimId,
        submitter: PrincipalId,
    },

    /// A reviewer picked the claim up and was granted its fields
    ClaimReviewed {
        claim_id: ClaimId,
        reviewer: PrincipalId,
    },

    /// The claim was approved
    ClaimApproved {
        claim_id: ClaimId,
        reviewer: PrincipalId,
    },

    /// The claim was rejected
    ClaimRejected {
        claim_id: ClaimId,
        reviewer: PrincipalId,
        reason: String,
    },

    /// The insurer paid the claim
    ClaimPaid {
        claim_id: ClaimId,
    },

    /// The insurer added a reviewer
    ReviewerAdded {
        reviewer: PrincipalId,
    },

    /// The insurer removed a reviewer
    ReviewerRemoved {
        reviewer: PrincipalId,
    },
}

impl ClaimEvent {
    /// Returns the claim this event concerns, if any
    pub fn claim_id(&self) -> Option<ClaimId> {
        match self {
            ClaimEvent::ClaimSubmitted { claim_id, .. }
            | ClaimEvent::ClaimReviewed { claim_id, .. }
            | ClaimEvent::ClaimApproved { claim_id, .. }
            | ClaimEvent::ClaimRejected { claim_id, .. }
            | ClaimEvent::ClaimPaid { claim_id } => Some(*claim_id),
            _ => None,
        }
    }
}

/// An event together with who caused it and when
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditRecord {
    pub id: AuditEventId,
    pub actor: PrincipalId,
    pub event: ClaimEvent,
    pub recorded_at: DateTime<Utc>,
}

/// Append-only audit log
#[derive(Debug, Default)]
pub struct AuditLog {
    records: RwLock<Vec<AuditRecord>>,
}

impl AuditLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an event
    pub async fn record(&self, actor: PrincipalId, event: ClaimEvent) {
        self.records.write().await.push(AuditRecord {
            id: AuditEventId::new_v7(),
            actor,
            event,
            recorded_at: Utc::now(),
        });
    }

    /// All records, oldest first
    pub async fn records(&self) -> Vec<AuditRecord> {
        self.records.read().await.clone()
    }

    /// Records concerning one claim, oldest first
    pub async fn records_for(&self, claim_id: ClaimId) -> Vec<AuditRecord> {
        self.records
            .read()
            .await
            .iter()
            .filter(|r| r.event.claim_id() == Some(claim_id))
            .cloned()
            .collect()
    }
}
