//! Policy record

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::PrincipalId;
use domain_cipher::{EncryptedField, FieldWidth};

use crate::error::PolicyError;

/// An insurance policy with confidential financial terms
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Policy {
    /// Policy holder
    pub owner: PrincipalId,
    /// Premium, 32-bit
    pub encrypted_premium: EncryptedField,
    /// Coverage limit, 32-bit
    pub encrypted_coverage: EncryptedField,
    /// Set on creation; guards against duplicates
    pub exists: bool,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
}

impl Policy {
    /// Creates a policy record from freshly encrypted fields
    ///
    /// # Errors
    ///
    /// `PolicyError::InvalidField` if either field is not 32-bit
    pub fn new(
        owner: PrincipalId,
        encrypted_premium: EncryptedField,
        encrypted_coverage: EncryptedField,
    ) -> Result<Self, PolicyError> {
        require_u32("premium", &encrypted_premium)?;
        require_u32("coverage", &encrypted_coverage)?;

        Ok(Self {
            owner,
            encrypted_premium,
            encrypted_coverage,
            exists: true,
            created_at: Utc::now(),
        })
    }

    /// The encrypted fields this policy owns
    pub fn fields(&self) -> [EncryptedField; 2] {
        [self.encrypted_premium, self.encrypted_coverage]
    }
}

fn require_u32(name: &str, field: &EncryptedField) -> Result<(), PolicyError> {
    if field.width() != FieldWidth::U32 {
        return Err(PolicyError::InvalidField(format!(
            "{} must be u32, got {}",
            name,
            field.width()
        )));
    }
    Ok(())
}
