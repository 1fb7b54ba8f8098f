//! In-memory auth store (dev/test backend).
//!
//! Implements both [`RoleDirectory`] and [`CredentialStore`] over a single
//! `RwLock`, which is what lets a role rename cascade to bound identities
//! atomically. Passwords are kept verbatim — this backend exists to exercise
//! the core, real hashing belongs to the external store.

use std::sync::RwLock;

use gatekey_auth::{
    CredentialError, CredentialStore, Identity, RoleDirectory, RoleError, VerifyOutcome,
};
use gatekey_core::{StoreError, UserId};

/// Failed sign-in attempts tolerated before an account locks.
const DEFAULT_LOCKOUT_THRESHOLD: u32 = 5;

/// Minimum password length accepted at credential creation.
///
/// This mirrors the external store's password policy so creation rejections
/// are exercisable; the API validation pre-pass normally catches these first.
const MIN_PASSWORD_CHARS: usize = 6;

#[derive(Debug, Clone)]
struct StoredUser {
    id: UserId,
    email: String,
    password: String,
    roles: Vec<String>,
    failed_attempts: u32,
    locked: bool,
}

impl StoredUser {
    fn identity(&self) -> Identity {
        Identity {
            id: self.id,
            // The original system uses the email as the username.
            username: self.email.clone(),
            email: self.email.clone(),
            roles: self.roles.clone(),
        }
    }
}

#[derive(Debug, Default)]
struct Inner {
    roles: Vec<String>,
    users: Vec<StoredUser>,
}

/// In-memory role directory + credential store.
#[derive(Debug)]
pub struct InMemoryAuthStore {
    inner: RwLock<Inner>,
    lockout_threshold: u32,
}

impl InMemoryAuthStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner::default()),
            lockout_threshold: DEFAULT_LOCKOUT_THRESHOLD,
        }
    }

    /// Override the lockout threshold (tests mostly).
    pub fn with_lockout_threshold(mut self, attempts: u32) -> Self {
        self.lockout_threshold = attempts;
        self
    }

    /// Snapshot of all registered identities (admin listing).
    pub fn list_users(&self) -> Result<Vec<Identity>, StoreError> {
        Ok(self.read()?.users.iter().map(StoredUser::identity).collect())
    }

    fn read(&self) -> Result<std::sync::RwLockReadGuard<'_, Inner>, StoreError> {
        self.inner
            .read()
            .map_err(|_| StoreError::new("auth store lock poisoned"))
    }

    fn write(&self) -> Result<std::sync::RwLockWriteGuard<'_, Inner>, StoreError> {
        self.inner
            .write()
            .map_err(|_| StoreError::new("auth store lock poisoned"))
    }
}

impl Default for InMemoryAuthStore {
    fn default() -> Self {
        Self::new()
    }
}

impl RoleDirectory for InMemoryAuthStore {
    fn exists(&self, name: &str) -> Result<bool, RoleError> {
        Ok(self.read()?.roles.iter().any(|r| r == name))
    }

    fn create(&self, name: &str) -> Result<(), RoleError> {
        let mut inner = self.write()?;
        if inner.roles.iter().any(|r| r == name) {
            return Err(RoleError::AlreadyExists {
                name: name.to_string(),
            });
        }
        inner.roles.push(name.to_string());
        Ok(())
    }

    fn rename(&self, old: &str, new: &str) -> Result<(), RoleError> {
        let mut inner = self.write()?;
        if inner.roles.iter().any(|r| r == new) {
            return Err(RoleError::AlreadyExists {
                name: new.to_string(),
            });
        }
        let Some(role) = inner.roles.iter_mut().find(|r| r.as_str() == old) else {
            return Err(RoleError::NotFound {
                name: old.to_string(),
            });
        };
        *role = new.to_string();

        // Binding is by name: cascade so identities keep the relationship.
        let mut cascaded = 0usize;
        for user in &mut inner.users {
            for role in &mut user.roles {
                if role == old {
                    *role = new.to_string();
                    cascaded += 1;
                }
            }
        }
        tracing::info!(old = %old, new = %new, bindings = cascaded, "role renamed");
        Ok(())
    }

    fn delete(&self, name: &str) -> Result<(), RoleError> {
        let mut inner = self.write()?;
        let before = inner.roles.len();
        inner.roles.retain(|r| r != name);
        if inner.roles.len() == before {
            return Err(RoleError::NotFound {
                name: name.to_string(),
            });
        }
        // Bound identities keep the name as a soft reference; no cascade.
        Ok(())
    }

    fn list(&self) -> Result<Vec<String>, RoleError> {
        Ok(self.read()?.roles.clone())
    }
}

impl CredentialStore for InMemoryAuthStore {
    fn verify_password(&self, email: &str, password: &str) -> Result<VerifyOutcome, StoreError> {
        let threshold = self.lockout_threshold;
        let mut inner = self.write()?;
        let Some(user) = inner.users.iter_mut().find(|u| u.email == email) else {
            return Ok(VerifyOutcome::InvalidCredentials);
        };

        if user.locked {
            return Ok(VerifyOutcome::LockedOut);
        }

        if user.password == password {
            user.failed_attempts = 0;
            return Ok(VerifyOutcome::Success);
        }

        user.failed_attempts += 1;
        if user.failed_attempts >= threshold {
            user.locked = true;
            tracing::warn!(email = %email, "account locked out");
            return Ok(VerifyOutcome::LockedOut);
        }
        Ok(VerifyOutcome::InvalidCredentials)
    }

    fn find_by_email(&self, email: &str) -> Result<Option<Identity>, StoreError> {
        Ok(self
            .read()?
            .users
            .iter()
            .find(|u| u.email == email)
            .map(StoredUser::identity))
    }

    fn roles_of(&self, id: &UserId) -> Result<Vec<String>, StoreError> {
        let inner = self.read()?;
        let user = inner
            .users
            .iter()
            .find(|u| u.id == *id)
            .ok_or_else(|| StoreError::new(format!("unknown user id {id}")))?;
        Ok(user.roles.clone())
    }

    fn create_identity(&self, email: &str, password: &str) -> Result<Identity, CredentialError> {
        let mut inner = self.write().map_err(CredentialError::Store)?;

        let mut reasons = Vec::new();
        if inner.users.iter().any(|u| u.email == email) {
            reasons.push(format!("email '{email}' is already taken"));
        }
        if password.chars().count() < MIN_PASSWORD_CHARS {
            reasons.push(format!(
                "password must be at least {MIN_PASSWORD_CHARS} characters"
            ));
        }
        if !reasons.is_empty() {
            return Err(CredentialError::Rejected { reasons });
        }

        let user = StoredUser {
            id: UserId::new(),
            email: email.to_string(),
            password: password.to_string(),
            roles: Vec::new(),
            failed_attempts: 0,
            locked: false,
        };
        let identity = user.identity();
        inner.users.push(user);
        Ok(identity)
    }

    fn bind_role(&self, id: &UserId, role: &str) -> Result<(), CredentialError> {
        let mut inner = self.write().map_err(CredentialError::Store)?;

        if !inner.roles.iter().any(|r| r == role) {
            return Err(CredentialError::rejected([format!(
                "role '{role}' does not exist"
            )]));
        }
        let Some(user) = inner.users.iter_mut().find(|u| u.id == *id) else {
            return Err(CredentialError::Store(StoreError::new(format!(
                "unknown user id {id}"
            ))));
        };
        if user.roles.iter().any(|r| r == role) {
            return Err(CredentialError::rejected([format!(
                "user is already in role '{role}'"
            )]));
        }
        user.roles.push(role.to_string());
        Ok(())
    }

    fn delete_identity(&self, id: &UserId) -> Result<(), StoreError> {
        // Idempotent: compensation may race with nothing else having created
        // the identity.
        self.write()?.users.retain(|u| u.id != *id);
        Ok(())
    }
}
