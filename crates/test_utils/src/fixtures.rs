//! Pre-built Test Fixtures
//!
//! Provides the principals and values used throughout the test suite. The
//! figures match the reference walkthrough: a policy of 100 / 5000 and a
//! claim of 2000 with diagnosis 42, cost 1500, age 35 and severity 3.

use core_kernel::PrincipalId;
use domain_claims::{ClaimFigures, PolicyFigures};

/// The principals taking part in a scenario
#[derive(Debug, Clone, Copy)]
pub struct Cast {
    /// The fixed insurer
    pub insurer: PrincipalId,
    /// Account the cipher service acts as
    pub system: PrincipalId,
    /// A reviewer added by the insurer
    pub reviewer: PrincipalId,
    /// A second reviewer, also added by the insurer
    pub second_reviewer: PrincipalId,
    /// A policy holder
    pub holder: PrincipalId,
    /// A claimant
    pub submitter: PrincipalId,
    /// Someone with no role at all
    pub outsider: PrincipalId,
}

impl Cast {
    /// Creates a cast of fresh, distinct principals
    pub fn new() -> Self {
        Self {
            insurer: PrincipalId::new(),
            system: PrincipalId::new(),
            reviewer: PrincipalId::new(),
            second_reviewer: PrincipalId::new(),
            holder: PrincipalId::new(),
            submitter: PrincipalId::new(),
            outsider: PrincipalId::new(),
        }
    }
}

impl Default for Cast {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture for plaintext values
pub struct FigureFixtures;

impl FigureFixtures {
    /// Premium 100, coverage 5000
    pub fn policy() -> PolicyFigures {
        PolicyFigures {
            premium: 100,
            coverage: 5000,
        }
    }

    /// Amount 2000, diagnosis 42, cost 1500, age 35, severity 3
    pub fn claim() -> ClaimFigures {
        ClaimFigures {
            amount: 2000,
            diagnosis_code: 42,
            treatment_cost: 1500,
            patient_age: 35,
            severity_level: 3,
        }
    }

    /// A claim whose amount only fits in 64 bits
    pub fn large_claim() -> ClaimFigures {
        ClaimFigures {
            amount: u64::from(u32::MAX) * 4,
            ..Self::claim()
        }
    }

    /// A claim for nothing
    pub fn zero_claim() -> ClaimFigures {
        ClaimFigures {
            amount: 0,
            ..Self::claim()
        }
    }
}

/// Fixture for rejection reasons
pub struct ReasonFixtures;

impl ReasonFixtures {
    pub fn valid() -> &'static str {
        "Treatment not covered by the policy"
    }

    pub fn empty() -> &'static str {
        ""
    }

    pub fn blank() -> &'static str {
        "   \t"
    }
}
