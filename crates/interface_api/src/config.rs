//! API configuration

use serde::{Deserialize, Serialize};

use core_kernel::PrincipalId;
use domain_claims::EngineConfig;

/// API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// JWT secret for authentication
    pub jwt_secret: String,
    /// JWT expiration in seconds
    pub jwt_expiration_secs: u64,
    /// Log level
    pub log_level: String,
    /// The fixed insurer
    pub insurer: PrincipalId,
    /// Account the cipher service acts as
    pub system_account: PrincipalId,
    /// Refuse claims from principals without a policy
    #[serde(default)]
    pub require_policy_for_claims: bool,
    /// Refuse claims for a zero amount
    #[serde(default)]
    pub reject_zero_claim_amount: bool,
}

impl Default for ApiConfig {
    /// Development defaults; the insurer and system account are fresh
    /// principals each time
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            jwt_secret: "change-me-in-production".to_string(),
            jwt_expiration_secs: 3600,
            log_level: "info".to_string(),
            insurer: PrincipalId::new(),
            system_account: PrincipalId::new(),
            require_policy_for_claims: false,
            reject_zero_claim_amount: false,
        }
    }
}

impl ApiConfig {
    /// Loads configuration from `API_*` environment variables over the
    /// defaults
    pub fn from_env() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::Config::try_from(&Self::default())?)
            .add_source(config::Environment::with_prefix("API").try_parsing(true))
            .build()?
            .try_deserialize()
    }

    /// Returns the server address
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Engine switches carried by this configuration
    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            require_policy_for_claims: self.require_policy_for_claims,
            reject_zero_claim_amount: self.reject_zero_claim_amount,
        }
    }
}
