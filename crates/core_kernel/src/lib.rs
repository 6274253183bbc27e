//! Core Kernel - Foundational types for the confidential claims system
//!
//! This crate provides the building blocks shared by every domain crate:
//! - Principals and other strongly-typed identifiers
//! - Port markers and health reporting for external collaborators
//! - The kernel error type

pub mod identifiers;
pub mod ports;
pub mod error;

pub use identifiers::{PrincipalId, AuditEventId, ClaimId, CiphertextHandle};
pub use ports::{DomainPort, HealthCheckable, HealthCheckResult, AdapterHealth};
pub use error::CoreError;
