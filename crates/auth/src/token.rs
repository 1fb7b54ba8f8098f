//! Token issuer.
//!
//! Builds signed compact JWTs (header.claims.signature, HMAC-SHA-256) for a
//! verified identity. The only designed failure of this component is an
//! audience miss; everything else is a caller-guaranteed precondition.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use gatekey_core::UserId;

use crate::config::TokenConfig;

/// Claims embedded in every issued token.
///
/// Standard registered names where they exist (`sub`, `jti`, `iss`, `aud`,
/// `exp`), so the wire format stays decodable by any off-the-shelf JWT
/// library.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Stable subject identifier.
    pub sub: String,
    /// Display name of the subject.
    pub unique_name: String,
    /// Fresh per-issuance token id (replay traceability; not checked here).
    pub jti: String,
    /// One entry per bound role.
    pub roles: Vec<String>,
    pub iss: String,
    pub aud: String,
    /// Expiry, seconds since the unix epoch.
    pub exp: i64,
}

/// A signed token plus its expiry instant.
///
/// Stateless: never stored server-side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Error)]
pub enum IssueError {
    /// The requested audience is not in the configured allow-list. A designed
    /// negative outcome, surfaced to callers as a client-facing failure.
    #[error("requested audience {requested:?} is not allowed")]
    AudienceRejected { requested: String },

    /// The expiry override is too large to land on a representable instant.
    /// Another designed negative outcome, surfaced as a client-facing failure.
    #[error("duration of {minutes} minutes is out of range")]
    DurationOutOfRange { minutes: i64 },

    /// Signing failed inside the JWT library. Not expected for HS256 with a
    /// validated config; rendered as a server fault at the boundary.
    #[error("token signing failed")]
    Signing(#[from] jsonwebtoken::errors::Error),
}

/// Issues signed, time-bounded, audience-scoped bearer tokens.
pub struct TokenIssuer {
    config: Arc<TokenConfig>,
    encoding_key: EncodingKey,
}

impl TokenIssuer {
    pub fn new(config: Arc<TokenConfig>) -> Self {
        let encoding_key = EncodingKey::from_secret(config.signing_key());
        Self {
            config,
            encoding_key,
        }
    }

    pub fn config(&self) -> &TokenConfig {
        &self.config
    }

    /// Issue a token for a verified identity.
    ///
    /// `duration_minutes`, when present, must be positive; the validation
    /// pre-pass rejects other values before they reach the core. It is never
    /// clamped here: an override too large to represent as an expiry instant
    /// is refused with [`IssueError::DurationOutOfRange`]. Two calls with
    /// identical inputs still produce distinct tokens: the `jti` is fresh per
    /// issuance.
    pub fn issue(
        &self,
        subject: &UserId,
        username: &str,
        roles: &[String],
        requested_audience: &str,
        duration_minutes: Option<i64>,
    ) -> Result<IssuedToken, IssueError> {
        tracing::info!(
            user = %username,
            subject = %subject,
            audience = %requested_audience,
            "issuing token"
        );

        let Some(audience) = self.config.resolve_audience(requested_audience) else {
            tracing::warn!(
                audience = %requested_audience,
                "token issuance refused: audience not allowed"
            );
            return Err(IssueError::AudienceRejected {
                requested: requested_audience.to_string(),
            });
        };

        let duration = duration_minutes.unwrap_or(self.config.default_expiry_minutes());
        debug_assert!(duration > 0, "duration overrides are validated upstream");

        let expires_at = Duration::try_minutes(duration)
            .and_then(|d| Utc::now().checked_add_signed(d))
            .ok_or(IssueError::DurationOutOfRange { minutes: duration })?;
        let claims = Claims {
            sub: subject.to_string(),
            unique_name: username.to_string(),
            jti: Uuid::new_v4().to_string(),
            roles: roles.to_vec(),
            iss: self.config.issuer().to_string(),
            aud: audience.to_string(),
            exp: expires_at.timestamp(),
        };

        let token = encode(&Header::default(), &claims, &self.encoding_key)?;
        tracing::info!(user = %username, "token issued");

        Ok(IssuedToken { token, expires_at })
    }
}
