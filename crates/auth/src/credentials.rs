//! Credential store capability.
//!
//! The credential store is an external collaborator: it owns password
//! hashing, storage, and the lockout policy. The core only consumes this
//! contract and never inspects stored credentials directly.

use std::sync::Arc;

use thiserror::Error;

use gatekey_core::{StoreError, UserId};

use crate::identity::Identity;

/// Outcome of a password check against stored credentials.
///
/// `LockedOut` and `InvalidCredentials` are distinct outcomes with different
/// caller-visible messages, but both are authentication failures — neither is
/// a server error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerifyOutcome {
    Success,
    LockedOut,
    InvalidCredentials,
}

/// Rejection or fault from a credential-store mutation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CredentialError {
    /// Structured business-rule rejection (duplicate email, password policy,
    /// unknown role on bind, ...). Reasons pass through to the caller.
    #[error("{}", reasons.join(", "))]
    Rejected { reasons: Vec<String> },

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl CredentialError {
    pub fn rejected(reasons: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self::Rejected {
            reasons: reasons.into_iter().map(Into::into).collect(),
        }
    }
}

/// External credential store contract.
///
/// Concurrency discipline (locking, transactions) is the implementation's
/// responsibility; the core issues at most one outstanding call at a time
/// per request and never retries.
pub trait CredentialStore: Send + Sync {
    /// Validate email+password. Store faults are opaque; lockout and wrong
    /// password are ordinary outcomes, not errors.
    fn verify_password(&self, email: &str, password: &str) -> Result<VerifyOutcome, StoreError>;

    /// Look up an identity by email.
    fn find_by_email(&self, email: &str) -> Result<Option<Identity>, StoreError>;

    /// Role names currently bound to an identity.
    fn roles_of(&self, id: &UserId) -> Result<Vec<String>, StoreError>;

    /// Create a new identity with the given credentials.
    fn create_identity(&self, email: &str, password: &str) -> Result<Identity, CredentialError>;

    /// Bind a role (by name) to an identity.
    fn bind_role(&self, id: &UserId, role: &str) -> Result<(), CredentialError>;

    /// Remove an identity and its credentials (compensation support).
    fn delete_identity(&self, id: &UserId) -> Result<(), StoreError>;
}

impl<S> CredentialStore for Arc<S>
where
    S: CredentialStore + ?Sized,
{
    fn verify_password(&self, email: &str, password: &str) -> Result<VerifyOutcome, StoreError> {
        (**self).verify_password(email, password)
    }

    fn find_by_email(&self, email: &str) -> Result<Option<Identity>, StoreError> {
        (**self).find_by_email(email)
    }

    fn roles_of(&self, id: &UserId) -> Result<Vec<String>, StoreError> {
        (**self).roles_of(id)
    }

    fn create_identity(&self, email: &str, password: &str) -> Result<Identity, CredentialError> {
        (**self).create_identity(email, password)
    }

    fn bind_role(&self, id: &UserId, role: &str) -> Result<(), CredentialError> {
        (**self).bind_role(id, role)
    }

    fn delete_identity(&self, id: &UserId) -> Result<(), StoreError> {
        (**self).delete_identity(id)
    }
}
