//! Auth orchestrator.
//!
//! Composes the role directory, credential store, and token issuer into the
//! Register and Authenticate operations. Each invocation is a stateless,
//! request-scoped computation: steps run sequentially, short-circuit on the
//! first terminal outcome, and nothing is retried.

use std::sync::Arc;

use thiserror::Error;

use gatekey_core::StoreError;

use crate::config::TokenConfig;
use crate::credentials::{CredentialError, CredentialStore, VerifyOutcome};
use crate::identity::Identity;
use crate::roles::{RoleDirectory, RoleError};
use crate::token::{IssueError, IssuedToken, TokenIssuer};

/// What to do with a freshly created credential when the subsequent role
/// binding fails.
///
/// The observed behavior of the original system is `Keep` (the orphaned
/// credential stays, with no role bound). `Compensate` deletes it so the
/// failed registration leaves no trace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrphanPolicy {
    #[default]
    Keep,
    Compensate,
}

/// Terminal outcomes of `Register` other than success.
#[derive(Debug, Error)]
pub enum RegisterError {
    #[error("requested role does not exist")]
    RoleNotFound { role: String },

    #[error("{}", reasons.join(", "))]
    CredentialCreationFailed { reasons: Vec<String> },

    #[error("{}", reasons.join(", "))]
    RoleBindingFailed { reasons: Vec<String> },

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Terminal outcomes of `Authenticate` other than success.
#[derive(Debug, Error)]
pub enum AuthenticateError {
    #[error("user account locked out")]
    AccountLockedOut,

    #[error("invalid login attempt")]
    InvalidLogin,

    #[error("user has no roles")]
    NoRolesAssigned,

    #[error("invalid audience")]
    InvalidAudience { requested: String },

    #[error("duration out of range")]
    InvalidDuration { minutes: i64 },

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("token signing failed")]
    Signing(#[source] jsonwebtoken::errors::Error),
}

/// Register/Authenticate orchestration over swappable store backends.
pub struct AuthService<R, C> {
    roles: R,
    credentials: C,
    issuer: TokenIssuer,
    orphan_policy: OrphanPolicy,
}

impl<R, C> AuthService<R, C>
where
    R: RoleDirectory,
    C: CredentialStore,
{
    pub fn new(roles: R, credentials: C, config: Arc<TokenConfig>) -> Self {
        Self {
            roles,
            credentials,
            issuer: TokenIssuer::new(config),
            orphan_policy: OrphanPolicy::default(),
        }
    }

    pub fn with_orphan_policy(mut self, policy: OrphanPolicy) -> Self {
        self.orphan_policy = policy;
        self
    }

    /// Register a new user against an existing role.
    ///
    /// Sequencing: role existence check, then credential creation, then role
    /// binding. No credential is created when the role is unknown. On a bind
    /// failure the just-created credential is handled per [`OrphanPolicy`].
    pub fn register(
        &self,
        email: &str,
        password: &str,
        role: &str,
    ) -> Result<Identity, RegisterError> {
        tracing::info!(email = %email, role = %role, "registering user");

        match self.roles.exists(role) {
            Ok(true) => {}
            Ok(false) => {
                tracing::info!(role = %role, "registration refused: role does not exist");
                return Err(RegisterError::RoleNotFound {
                    role: role.to_string(),
                });
            }
            Err(RoleError::Store(e)) => return Err(e.into()),
            // exists() only reports store faults.
            Err(e) => return Err(StoreError::new(e.to_string()).into()),
        }

        let identity = match self.credentials.create_identity(email, password) {
            Ok(identity) => identity,
            Err(CredentialError::Rejected { reasons }) => {
                tracing::info!(email = %email, "credential creation rejected");
                return Err(RegisterError::CredentialCreationFailed { reasons });
            }
            Err(CredentialError::Store(e)) => return Err(e.into()),
        };

        match self.credentials.bind_role(&identity.id, role) {
            Ok(()) => {}
            Err(CredentialError::Rejected { reasons }) => {
                tracing::warn!(email = %email, role = %role, "role binding failed");
                self.handle_orphan(&identity);
                return Err(RegisterError::RoleBindingFailed { reasons });
            }
            Err(CredentialError::Store(e)) => {
                self.handle_orphan(&identity);
                return Err(e.into());
            }
        }

        tracing::info!(email = %email, role = %role, "user registered");
        Ok(Identity {
            roles: vec![role.to_string()],
            ..identity
        })
    }

    fn handle_orphan(&self, identity: &Identity) {
        match self.orphan_policy {
            OrphanPolicy::Keep => {
                tracing::warn!(
                    user = %identity.id,
                    "credential left without a bound role"
                );
            }
            OrphanPolicy::Compensate => {
                if let Err(e) = self.credentials.delete_identity(&identity.id) {
                    // Compensation is best-effort; the binding failure is
                    // still the reported outcome.
                    tracing::error!(user = %identity.id, error = %e, "compensation delete failed");
                }
            }
        }
    }

    /// Verify credentials and issue an audience-scoped token.
    ///
    /// An identity that cannot be resolved after a successful sign-in is
    /// reported as `InvalidLogin`, not as a server fault, so internal state
    /// never leaks to the caller.
    pub fn authenticate(
        &self,
        email: &str,
        password: &str,
        audience: &str,
        duration_minutes: Option<i64>,
    ) -> Result<IssuedToken, AuthenticateError> {
        match self.credentials.verify_password(email, password)? {
            VerifyOutcome::Success => {}
            VerifyOutcome::LockedOut => {
                tracing::info!(email = %email, "sign-in refused: account locked out");
                return Err(AuthenticateError::AccountLockedOut);
            }
            VerifyOutcome::InvalidCredentials => {
                tracing::info!(email = %email, "sign-in refused: invalid credentials");
                return Err(AuthenticateError::InvalidLogin);
            }
        }

        let Some(identity) = self.credentials.find_by_email(email)? else {
            tracing::warn!(email = %email, "identity missing after successful sign-in");
            return Err(AuthenticateError::InvalidLogin);
        };

        let roles = self.credentials.roles_of(&identity.id)?;
        if roles.is_empty() {
            tracing::info!(email = %email, "sign-in refused: no roles assigned");
            return Err(AuthenticateError::NoRolesAssigned);
        }

        match self.issuer.issue(
            &identity.id,
            &identity.username,
            &roles,
            audience,
            duration_minutes,
        ) {
            Ok(token) => Ok(token),
            Err(IssueError::AudienceRejected { requested }) => {
                Err(AuthenticateError::InvalidAudience { requested })
            }
            Err(IssueError::DurationOutOfRange { minutes }) => {
                Err(AuthenticateError::InvalidDuration { minutes })
            }
            Err(IssueError::Signing(e)) => Err(AuthenticateError::Signing(e)),
        }
    }
}
