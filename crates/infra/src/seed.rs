//! Startup seeding of default roles and users.
//!
//! Idempotent: existing roles/users are left untouched, so seeding can run on
//! every startup.

use gatekey_auth::{CredentialError, CredentialStore, RoleDirectory, RoleError};
use gatekey_core::StoreError;

/// Roles present after every startup.
pub const DEFAULT_ROLES: [&str; 3] = ["Support", "Dev", "Admin"];

/// Passwords for the default users, one per default role.
///
/// A missing password skips that user with a warning; roles are always
/// seeded regardless.
#[derive(Debug, Clone, Default)]
pub struct SeedUsers {
    pub support_password: Option<String>,
    pub dev_password: Option<String>,
    pub admin_password: Option<String>,
}

/// Create the default roles where absent.
pub fn seed_roles(directory: &impl RoleDirectory) -> Result<(), RoleError> {
    for role in DEFAULT_ROLES {
        if !directory.exists(role)? {
            directory.create(role)?;
            tracing::info!(role = %role, "seeded role");
        }
    }
    Ok(())
}

/// Create one default user per role where absent.
///
/// Store faults propagate; business rejections (e.g. the external store's
/// password policy) are logged and skipped so one bad seed entry does not
/// block startup.
pub fn seed_users(store: &impl CredentialStore, users: &SeedUsers) -> Result<(), StoreError> {
    let entries = [
        ("support@example.com", &users.support_password, "Support"),
        ("dev@example.com", &users.dev_password, "Dev"),
        ("admin@example.com", &users.admin_password, "Admin"),
    ];

    for (email, password, role) in entries {
        let Some(password) = password else {
            tracing::warn!(email = %email, "no seed password configured; skipping user");
            continue;
        };

        if store.find_by_email(email)?.is_some() {
            continue;
        }

        let identity = match store.create_identity(email, password) {
            Ok(identity) => identity,
            Err(CredentialError::Rejected { reasons }) => {
                tracing::warn!(email = %email, reasons = ?reasons, "seed user rejected");
                continue;
            }
            Err(CredentialError::Store(e)) => return Err(e),
        };

        match store.bind_role(&identity.id, role) {
            Ok(()) => tracing::info!(email = %email, role = %role, "seeded user"),
            Err(CredentialError::Rejected { reasons }) => {
                tracing::warn!(email = %email, reasons = ?reasons, "seed role binding rejected");
            }
            Err(CredentialError::Store(e)) => return Err(e),
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::InMemoryAuthStore;
    use gatekey_auth::VerifyOutcome;

    fn seed_all() -> SeedUsers {
        SeedUsers {
            support_password: Some("Support1!".into()),
            dev_password: Some("Devpass1!".into()),
            admin_password: Some("Adminpass1!".into()),
        }
    }

    #[test]
    fn seeding_creates_roles_and_users() {
        let store = InMemoryAuthStore::new();
        seed_roles(&store).unwrap();
        seed_users(&store, &seed_all()).unwrap();

        for role in DEFAULT_ROLES {
            assert!(store.exists(role).unwrap());
        }
        let admin = store.find_by_email("admin@example.com").unwrap().unwrap();
        assert_eq!(store.roles_of(&admin.id).unwrap(), vec!["Admin"]);
        assert_eq!(
            store
                .verify_password("admin@example.com", "Adminpass1!")
                .unwrap(),
            VerifyOutcome::Success
        );
    }

    #[test]
    fn seeding_twice_is_idempotent() {
        let store = InMemoryAuthStore::new();
        for _ in 0..2 {
            seed_roles(&store).unwrap();
            seed_users(&store, &seed_all()).unwrap();
        }
        assert_eq!(store.list().unwrap().len(), DEFAULT_ROLES.len());
    }

    #[test]
    fn missing_password_skips_that_user_only() {
        let store = InMemoryAuthStore::new();
        seed_roles(&store).unwrap();
        let users = SeedUsers {
            support_password: None,
            ..seed_all()
        };
        seed_users(&store, &users).unwrap();

        assert!(store.find_by_email("support@example.com").unwrap().is_none());
        assert!(store.find_by_email("dev@example.com").unwrap().is_some());
        assert!(store.find_by_email("admin@example.com").unwrap().is_some());
    }
}
