//! Request handlers

pub mod claims;
pub mod events;
pub mod health;
pub mod policy;
pub mod reviewers;
