//! Property-Based Test Generators
//!
//! Provides proptest strategies for generating random test data
//! that maintains domain invariants.

use domain_claims::{ClaimFigures, PolicyFigures};
use proptest::prelude::*;

/// Strategy for generating claim figures over the full field widths
pub fn claim_figures_strategy() -> impl Strategy<Value = ClaimFigures> {
    (any::<u64>(), any::<u32>(), any::<u32>(), any::<u32>(), any::<u32>()).prop_map(
        |(amount, diagnosis_code, treatment_cost, patient_age, severity_level)| ClaimFigures {
            amount,
            diagnosis_code,
            treatment_cost,
            patient_age,
            severity_level,
        },
    )
}

/// Strategy for generating claim figures with a non-zero amount
pub fn nonzero_claim_figures_strategy() -> impl Strategy<Value = ClaimFigures> {
    (1u64..=u64::MAX, claim_figures_strategy()).prop_map(|(amount, figures)| ClaimFigures { amount, ..figures })
}

/// Strategy for generating policy figures
pub fn policy_figures_strategy() -> impl Strategy<Value = PolicyFigures> {
    (any::<u32>(), any::<u32>()).prop_map(|(premium, coverage)| PolicyFigures { premium, coverage })
}

/// One step a principal may attempt on a claim
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClaimAction {
    /// Reviewer `n` of the cast reviews
    Review(usize),
    /// Reviewer `n` of the cast approves
    Approve(usize),
    /// Reviewer `n` of the cast rejects with the given reason
    Reject(usize, String),
    /// The insurer pays
    Pay,
    /// Someone with no role pays
    OutsiderPay,
}

/// Strategy for generating a single claim action among `reviewers` reviewers
pub fn claim_action_strategy(reviewers: usize) -> impl Strategy<Value = ClaimAction> {
    let reviewers = reviewers.max(1);
    prop_oneof![
        (0..reviewers).prop_map(ClaimAction::Review),
        (0..reviewers).prop_map(ClaimAction::Approve),
        (0..reviewers, prop_oneof![Just(String::new()), "[a-z ]{1,20}"])
            .prop_map(|(n, reason)| ClaimAction::Reject(n, reason)),
        Just(ClaimAction::Pay),
        Just(ClaimAction::OutsiderPay),
    ]
}

/// Strategy for generating a sequence of claim actions
pub fn claim_action_sequence_strategy(reviewers: usize, max_len: usize) -> impl Strategy<Value = Vec<ClaimAction>> {
    prop::collection::vec(claim_action_strategy(reviewers), 0..=max_len)
}
