//! Test Data Builders
//!
//! Provides a builder for a fully wired claims engine over the in-memory
//! cipher, so tests only spell out what they care about.

use std::sync::Arc;

use core_kernel::{ClaimId, PrincipalId};
use domain_cipher::{CapabilityRegistry, CipherPort, InMemoryCipher};
use domain_claims::{ClaimsEngine, EngineConfig};

use crate::fixtures::{Cast, FigureFixtures, ReasonFixtures};

/// An engine plus the collaborators a test may want to poke at directly
pub struct TestEngine {
    pub engine: ClaimsEngine,
    pub registry: Arc<CapabilityRegistry>,
    pub cipher: Arc<InMemoryCipher>,
    pub cast: Cast,
}

impl TestEngine {
    /// Submits the reference claim as the cast's submitter
    pub async fn submit_reference_claim(&self) -> ClaimId {
        self.engine
            .submit_claim(self.cast.submitter, FigureFixtures::claim())
            .await
            .expect("reference claim should be accepted")
    }

    /// Submits the reference claim and puts it under review by the reviewer
    pub async fn claim_under_review(&self) -> ClaimId {
        let id = self.submit_reference_claim().await;
        self.engine
            .review_claim(self.cast.reviewer, id)
            .await
            .expect("reviewer should be able to review");
        id
    }

    /// Drives the reference claim to Approved
    pub async fn approved_claim(&self) -> ClaimId {
        let id = self.claim_under_review().await;
        self.engine
            .approve_claim(self.cast.reviewer, id)
            .await
            .expect("reviewer should be able to approve");
        id
    }

    /// Drives the reference claim to Rejected
    pub async fn rejected_claim(&self) -> ClaimId {
        let id = self.claim_under_review().await;
        self.engine
            .reject_claim(self.cast.reviewer, id, ReasonFixtures::valid())
            .await
            .expect("reviewer should be able to reject");
        id
    }
}

/// Builder for [`TestEngine`]
pub struct TestEngineBuilder {
    cast: Cast,
    config: EngineConfig,
    reviewers: Vec<PrincipalId>,
    with_default_reviewers: bool,
}

impl Default for TestEngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestEngineBuilder {
    /// Creates a builder with a fresh cast and both cast reviewers enrolled
    pub fn new() -> Self {
        Self {
            cast: Cast::new(),
            config: EngineConfig::default(),
            reviewers: Vec::new(),
            with_default_reviewers: true,
        }
    }

    /// Uses the given cast
    pub fn with_cast(mut self, cast: Cast) -> Self {
        self.cast = cast;
        self
    }

    /// Uses the given engine configuration
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Enrolls an extra reviewer
    pub fn with_reviewer(mut self, reviewer: PrincipalId) -> Self {
        self.reviewers.push(reviewer);
        self
    }

    /// Leaves the cast reviewers out of the reviewer set
    pub fn without_reviewers(mut self) -> Self {
        self.with_default_reviewers = false;
        self
    }

    /// Wires the engine and enrolls reviewers through the insurer
    pub async fn build(self) -> TestEngine {
        let registry = Arc::new(CapabilityRegistry::new());
        let cipher = Arc::new(InMemoryCipher::new(self.cast.system, registry.clone()));
        let port: Arc<dyn CipherPort> = cipher.clone();
        let engine = ClaimsEngine::new(self.cast.insurer, port, registry.clone(), self.config);

        let mut reviewers = self.reviewers;
        if self.with_default_reviewers {
            reviewers.push(self.cast.reviewer);
            reviewers.push(self.cast.second_reviewer);
        }
        for reviewer in reviewers {
            engine
                .add_reviewer(self.cast.insurer, reviewer)
                .await
                .expect("insurer should be able to add reviewers");
        }

        TestEngine {
            engine,
            registry,
            cipher,
            cast: self.cast,
        }
    }
}
