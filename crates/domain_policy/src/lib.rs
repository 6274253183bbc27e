//! Policy Domain
//!
//! One [`Policy`] per policy holder, carrying the premium and coverage limit
//! as encrypted 32-bit fields. Policies are created once and never updated or
//! deleted; the `exists` flag guards against a second creation for the same
//! owner.
//!
//! # Example
//!
//! ```rust,ignore
//! let premium = cipher.encrypt(100, FieldWidth::U32).await?;
//! let coverage = cipher.encrypt(5000, FieldWidth::U32).await?;
//! let policy = Policy::new(owner, premium, coverage)?;
//! store.insert(policy, &registry, &[system, owner]).await?;
//! ```

pub mod policy;
pub mod store;
pub mod error;

pub use policy::Policy;
pub use store::PolicyStore;
pub use error::PolicyError;
