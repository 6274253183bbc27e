//! Request and response bodies

pub mod claims;
pub mod policy;
pub mod reviewers;
