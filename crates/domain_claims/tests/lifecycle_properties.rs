//! Property tests for the claim lifecycle

use proptest::prelude::*;

use domain_claims::{ClaimState, ErrorKind};
use test_utils::{claim_action_sequence_strategy, claim_figures_strategy, ClaimAction, TestEngineBuilder};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Whatever is attempted, a claim only ever moves forward and every
    /// reviewer of record can decrypt it
    #[test]
    fn states_only_advance(actions in claim_action_sequence_strategy(2, 12)) {
        let runtime = tokio::runtime::Runtime::new().unwrap();

        runtime.block_on(async {
            let t = TestEngineBuilder::new().build().await;
            let reviewers = [t.cast.reviewer, t.cast.second_reviewer];
            let id = t.submit_reference_claim().await;
            let mut previous = ClaimState::Submitted;
            let mut paid = 0;

            for action in actions {
                let result = match action {
                    ClaimAction::Review(n) => t.engine.review_claim(reviewers[n], id).await,
                    ClaimAction::Approve(n) => t.engine.approve_claim(reviewers[n], id).await,
                    ClaimAction::Reject(n, reason) => t.engine.reject_claim(reviewers[n], id, reason).await,
                    ClaimAction::Pay => t.engine.process_payment(t.cast.insurer, id).await,
                    ClaimAction::OutsiderPay => t.engine.process_payment(t.cast.outsider, id).await,
                };

                let claim = t.engine.get_claim(id).await.unwrap();
                match &result {
                    Ok(()) => assert_ne!(claim.state, previous),
                    Err(e) => {
                        assert_eq!(claim.state, previous);
                        assert_ne!(e.kind(), ErrorKind::Unavailable);
                    }
                }
                assert!(claim.state.rank() >= previous.rank());
                if previous.is_terminal() {
                    assert_eq!(claim.state, previous);
                }
                if claim.state == ClaimState::Paid && previous != ClaimState::Paid {
                    paid += 1;
                }

                for reviewer in &claim.reviewers {
                    for handle in claim.fields.handles() {
                        assert!(t.registry.has_access(handle, *reviewer).await);
                    }
                }
                previous = claim.state;
            }

            assert!(paid <= 1);
        });
    }

    /// Submitter and system account read back exactly what was submitted
    #[test]
    fn submitted_figures_round_trip_for_grantees(figures in claim_figures_strategy()) {
        let runtime = tokio::runtime::Runtime::new().unwrap();

        runtime.block_on(async {
            let t = TestEngineBuilder::new().build().await;
            let id = t.engine.submit_claim(t.cast.submitter, figures).await.unwrap();

            assert_eq!(t.engine.reveal_claim(t.cast.submitter, id).await.unwrap(), figures);
            assert_eq!(t.engine.reveal_claim(t.cast.system, id).await.unwrap(), figures);
            assert_eq!(
                t.engine.reveal_claim(t.cast.outsider, id).await.unwrap_err().kind(),
                ErrorKind::AccessDenied
            );
        });
    }
}
