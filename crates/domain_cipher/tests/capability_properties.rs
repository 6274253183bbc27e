//! Property tests for the capability registry

use std::collections::HashSet;

use proptest::prelude::*;

use core_kernel::{CiphertextHandle, PrincipalId};
use domain_cipher::CapabilityRegistry;

proptest! {
    /// Once granted, a pair stays visible no matter what is granted later
    #[test]
    fn grants_are_monotonic(pairs in prop::collection::vec((0u64..8, 0usize..4), 1..40)) {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let principals: Vec<PrincipalId> = (0..4).map(|_| PrincipalId::new()).collect();

        runtime.block_on(async {
            let registry = CapabilityRegistry::new();
            let mut seen = HashSet::new();

            for (raw, who) in pairs {
                let handle = CiphertextHandle::from_raw(raw);
                let principal = principals[who];
                let added = registry.grant(handle, principal).await;
                assert_eq!(added, seen.insert((handle, principal)));

                for (h, p) in &seen {
                    assert!(registry.has_access(*h, *p).await);
                }
            }

            assert_eq!(registry.grant_count().await, seen.len());
        });
    }
}
