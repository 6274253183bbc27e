//! Confidential Claims Domain
//!
//! This crate implements the claim lifecycle over encrypted medical and
//! financial values, and decides who may decrypt them along the way.
//!
//! # Claim Lifecycle
//!
//! ```text
//! Submitted -> UnderReview -> Approved -> Paid
//!                          \-> Rejected
//! ```
//!
//! # Capabilities
//!
//! The submitter and the cipher system account can decrypt a claim's fields
//! from the moment it is filed. A reviewer gains the same capability when
//! they take the claim under review. Nothing is ever revoked.
//!
//! # Example
//!
//! ```rust,ignore
//! let engine = ClaimsEngine::new(insurer, cipher, registry, EngineConfig::default());
//! engine.add_reviewer(insurer, reviewer).await?;
//! let id = engine.submit_claim(patient, figures).await?;
//! engine.review_claim(reviewer, id).await?;
//! engine.approve_claim(reviewer, id).await?;
//! engine.process_payment(insurer, id).await?;
//! ```

pub mod claim;
pub mod store;
pub mod roles;
pub mod events;
pub mod engine;
pub mod error;

pub use claim::{Claim, ClaimState, EncryptedClaimFields};
pub use store::ClaimStore;
pub use roles::RoleDirectory;
pub use events::{AuditLog, AuditRecord, ClaimEvent};
pub use engine::{ClaimsEngine, EngineConfig, ClaimFigures, PolicyFigures, ClaimView};
pub use error::{ClaimError, ErrorKind};
