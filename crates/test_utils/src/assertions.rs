//! Custom Test Assertions
//!
//! Provides specialized assertion helpers for domain types that give
//! more meaningful error messages than standard assertions.

use core_kernel::{ClaimId, PrincipalId};
use domain_cipher::CapabilityRegistry;
use domain_claims::{ClaimError, ClaimState, ClaimsEngine, ErrorKind};

/// Asserts that `principal` holds a grant on every field of the claim
///
/// # Panics
///
/// Panics if the claim is missing or any of its five handles is not
/// granted to `principal`
pub async fn assert_has_access_to_claim(engine: &ClaimsEngine, claim_id: ClaimId, principal: PrincipalId) {
    let claim = engine
        .get_claim(claim_id)
        .await
        .unwrap_or_else(|e| panic!("claim {} should exist: {}", claim_id, e));

    for handle in claim.fields.handles() {
        assert!(
            engine.registry().has_access(handle, principal).await,
            "Expected {} to hold a grant on {} of claim {}",
            principal,
            handle,
            claim_id
        );
    }
}

/// Asserts that `principal` holds no grant on any field of the claim
pub async fn assert_has_no_access_to_claim(engine: &ClaimsEngine, claim_id: ClaimId, principal: PrincipalId) {
    let claim = engine
        .get_claim(claim_id)
        .await
        .unwrap_or_else(|e| panic!("claim {} should exist: {}", claim_id, e));

    for handle in claim.fields.handles() {
        assert!(
            !engine.registry().has_access(handle, principal).await,
            "Expected {} to hold no grant on {} of claim {}",
            principal,
            handle,
            claim_id
        );
    }
}

/// Asserts that the claim is in `expected`
pub async fn assert_claim_state(engine: &ClaimsEngine, claim_id: ClaimId, expected: ClaimState) {
    let actual = engine
        .get_claim(claim_id)
        .await
        .unwrap_or_else(|e| panic!("claim {} should exist: {}", claim_id, e))
        .state;
    assert_eq!(
        actual, expected,
        "Claim {} state mismatch: actual={}, expected={}",
        claim_id, actual, expected
    );
}

/// Asserts that a result failed with an error of `expected` kind
///
/// # Panics
///
/// Panics if the result is `Ok` or the error kind differs
pub fn assert_error_kind<T: std::fmt::Debug>(result: Result<T, ClaimError>, expected: ErrorKind) {
    match result {
        Ok(value) => panic!("Expected {:?} error, got Ok({:?})", expected, value),
        Err(e) => assert_eq!(
            e.kind(),
            expected,
            "Error kind mismatch: actual={:?}, expected={:?}, error={}",
            e.kind(),
            expected,
            e
        ),
    }
}

/// Asserts that the registry holds exactly `expected` grants in total
pub async fn assert_grant_count(registry: &CapabilityRegistry, expected: usize) {
    let actual = registry.grant_count().await;
    assert_eq!(
        actual, expected,
        "Grant count mismatch: actual={}, expected={}",
        actual, expected
    );
}
