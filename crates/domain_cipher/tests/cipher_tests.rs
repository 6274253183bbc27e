//! Tests for the cipher port and its in-memory adapter

use std::sync::Arc;

use core_kernel::{AdapterHealth, CiphertextHandle, HealthCheckable, PrincipalId};
use domain_cipher::{CapabilityRegistry, CipherError, CipherPort, EncryptedField, FieldWidth, InMemoryCipher};

fn setup() -> (Arc<CapabilityRegistry>, InMemoryCipher, PrincipalId) {
    let registry = Arc::new(CapabilityRegistry::new());
    let system = PrincipalId::new();
    let cipher = InMemoryCipher::new(system, registry.clone());
    (registry, cipher, system)
}

mod encrypt_tests {
    use super::*;

    #[tokio::test]
    async fn test_handles_are_sequential() {
        let (_, cipher, _) = setup();

        let first = cipher.encrypt(100, FieldWidth::U32).await.unwrap();
        let second = cipher.encrypt(5000, FieldWidth::U32).await.unwrap();

        assert_eq!(first.handle(), CiphertextHandle::FIRST);
        assert_eq!(second.handle(), CiphertextHandle::FIRST.next());
        assert_eq!(cipher.issued().await, 2);
    }

    #[tokio::test]
    async fn test_encrypting_the_same_value_twice_gives_distinct_fields() {
        let (_, cipher, _) = setup();

        let a = cipher.encrypt(42, FieldWidth::U32).await.unwrap();
        let b = cipher.encrypt(42, FieldWidth::U32).await.unwrap();

        assert_ne!(a, b);
    }

    #[tokio::test]
    async fn test_u32_overflow_rejected() {
        let (_, cipher, _) = setup();

        let result = cipher.encrypt(u64::from(u32::MAX) + 1, FieldWidth::U32).await;

        assert!(matches!(result, Err(CipherError::ValueOutOfRange { width: FieldWidth::U32, .. })));
        assert_eq!(cipher.issued().await, 0);
    }

    #[tokio::test]
    async fn test_u64_accepts_full_range() {
        let (_, cipher, _) = setup();
        let field = cipher.encrypt(u64::MAX, FieldWidth::U64).await.unwrap();
        assert_eq!(field.width(), FieldWidth::U64);
    }
}

mod decrypt_tests {
    use super::*;

    #[tokio::test]
    async fn test_granted_principal_sees_plaintext() {
        let (registry, cipher, _) = setup();
        let owner = PrincipalId::new();

        let field = cipher.encrypt(2000, FieldWidth::U64).await.unwrap();
        registry.grant(field.handle(), owner).await;

        assert_eq!(cipher.decrypt(&field, owner).await.unwrap(), 2000);
    }

    #[tokio::test]
    async fn test_ungranted_principal_is_denied() {
        let (_, cipher, _) = setup();
        let stranger = PrincipalId::new();

        let field = cipher.encrypt(35, FieldWidth::U32).await.unwrap();
        let err = cipher.decrypt(&field, stranger).await.unwrap_err();

        assert!(err.is_access_denied());
    }

    #[tokio::test]
    async fn test_system_account_needs_a_grant_too() {
        let (registry, cipher, system) = setup();

        let field = cipher.encrypt(7, FieldWidth::U32).await.unwrap();
        assert!(cipher.decrypt(&field, system).await.is_err());

        registry.grant(field.handle(), system).await;
        assert_eq!(cipher.decrypt(&field, system).await.unwrap(), 7);
        assert_eq!(cipher.system_principal(), system);
    }

    #[tokio::test]
    async fn test_unknown_handle() {
        let (_, cipher, _) = setup();
        let forged = EncryptedField::new(CiphertextHandle::from_raw(99), FieldWidth::U32);

        let err = cipher.decrypt(&forged, PrincipalId::new()).await.unwrap_err();

        assert!(matches!(err, CipherError::UnknownHandle(h) if h.value() == 99));
    }

    #[tokio::test]
    async fn test_width_mismatch_is_unknown() {
        let (registry, cipher, _) = setup();
        let owner = PrincipalId::new();

        let field = cipher.encrypt(1, FieldWidth::U32).await.unwrap();
        registry.grant(field.handle(), owner).await;
        let relabelled = EncryptedField::new(field.handle(), FieldWidth::U64);

        assert!(matches!(
            cipher.decrypt(&relabelled, owner).await,
            Err(CipherError::UnknownHandle(_))
        ));
    }
}

mod health_tests {
    use super::*;

    #[tokio::test]
    async fn test_in_memory_cipher_is_healthy() {
        let (_, cipher, _) = setup();
        let result = cipher.health_check().await;
        assert_eq!(result.status, AdapterHealth::Healthy);
        assert_eq!(result.adapter_id, "in-memory-cipher");
    }
}
