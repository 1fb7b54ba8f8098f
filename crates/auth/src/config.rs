//! Token-signing configuration.
//!
//! Loaded once at startup and treated as immutable for the process lifetime;
//! shared across requests behind an `Arc`. Construction validates every
//! invariant, so a live `TokenConfig` is always usable — configuration
//! problems are startup-fatal, never per-request.

use thiserror::Error;

/// Minimum signing-secret length accepted for HMAC-SHA-256.
pub const MIN_SIGNING_KEY_BYTES: usize = 32;

/// Immutable token issuance configuration.
///
/// # Invariants
/// - `signing_key` is at least [`MIN_SIGNING_KEY_BYTES`] bytes.
/// - `audiences` is non-empty.
/// - `default_expiry_minutes` is positive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenConfig {
    signing_key: Vec<u8>,
    issuer: String,
    audiences: Vec<String>,
    default_expiry_minutes: i64,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("signing key is {actual} bytes; HMAC-SHA-256 requires at least {MIN_SIGNING_KEY_BYTES}")]
    SigningKeyTooShort { actual: usize },

    #[error("issuer must not be empty")]
    EmptyIssuer,

    #[error("allowed-audiences set must not be empty")]
    NoAudiences,

    #[error("audience entries must not be empty strings")]
    EmptyAudience,

    #[error("default expiry must be positive, got {actual}")]
    NonPositiveExpiry { actual: i64 },
}

impl TokenConfig {
    pub fn new(
        signing_key: impl Into<Vec<u8>>,
        issuer: impl Into<String>,
        audiences: Vec<String>,
        default_expiry_minutes: i64,
    ) -> Result<Self, ConfigError> {
        let signing_key = signing_key.into();
        let issuer = issuer.into();

        if signing_key.len() < MIN_SIGNING_KEY_BYTES {
            return Err(ConfigError::SigningKeyTooShort {
                actual: signing_key.len(),
            });
        }
        if issuer.trim().is_empty() {
            return Err(ConfigError::EmptyIssuer);
        }
        if audiences.is_empty() {
            return Err(ConfigError::NoAudiences);
        }
        if audiences.iter().any(|a| a.trim().is_empty()) {
            return Err(ConfigError::EmptyAudience);
        }
        if default_expiry_minutes <= 0 {
            return Err(ConfigError::NonPositiveExpiry {
                actual: default_expiry_minutes,
            });
        }

        Ok(Self {
            signing_key,
            issuer,
            audiences,
            default_expiry_minutes,
        })
    }

    pub fn signing_key(&self) -> &[u8] {
        &self.signing_key
    }

    pub fn issuer(&self) -> &str {
        &self.issuer
    }

    pub fn audiences(&self) -> &[String] {
        &self.audiences
    }

    pub fn default_expiry_minutes(&self) -> i64 {
        self.default_expiry_minutes
    }

    /// Resolve a requested audience against the allow-list.
    ///
    /// Exact string match, linear scan (the set is small by design). Returns
    /// the *configured* string, never the caller's, so the issued claim is
    /// byte-identical to configuration.
    pub fn resolve_audience(&self, requested: &str) -> Option<&str> {
        self.audiences
            .iter()
            .find(|a| a.as_str() == requested)
            .map(String::as_str)
    }
}
