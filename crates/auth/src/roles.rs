//! Role directory capability.
//!
//! The directory is the authoritative set of role names. Name comparison is
//! case-sensitive exact match everywhere. Backends are swappable; the core
//! only sees this trait.

use std::sync::Arc;

use thiserror::Error;

use gatekey_core::StoreError;

/// Business-rule rejections and faults from the role directory.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RoleError {
    #[error("role {name} already exists")]
    AlreadyExists { name: String },

    #[error("role {name} not found")]
    NotFound { name: String },

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Authoritative set of role names.
///
/// Identities bind to roles **by name**, so implementations of [`rename`]
/// must cascade the new name to every bound identity — otherwise bindings
/// would silently dangle. [`delete`] deliberately does *not* cascade:
/// bindings to a deleted role remain as soft references.
///
/// [`rename`]: RoleDirectory::rename
/// [`delete`]: RoleDirectory::delete
pub trait RoleDirectory: Send + Sync {
    /// Case-sensitive existence check.
    fn exists(&self, name: &str) -> Result<bool, RoleError>;

    /// Create a role; `AlreadyExists` if the name is taken.
    fn create(&self, name: &str) -> Result<(), RoleError>;

    /// Rename a role in place, cascading to bound identities.
    ///
    /// `NotFound` if `old` is absent; `AlreadyExists` if `new` is taken
    /// (names stay unique at all times).
    fn rename(&self, old: &str, new: &str) -> Result<(), RoleError>;

    /// Delete a role; bound identities keep their (now dangling) binding.
    fn delete(&self, name: &str) -> Result<(), RoleError>;

    /// Snapshot of all role names; order is not meaningful.
    fn list(&self) -> Result<Vec<String>, RoleError>;
}

impl<S> RoleDirectory for Arc<S>
where
    S: RoleDirectory + ?Sized,
{
    fn exists(&self, name: &str) -> Result<bool, RoleError> {
        (**self).exists(name)
    }

    fn create(&self, name: &str) -> Result<(), RoleError> {
        (**self).create(name)
    }

    fn rename(&self, old: &str, new: &str) -> Result<(), RoleError> {
        (**self).rename(old, new)
    }

    fn delete(&self, name: &str) -> Result<(), RoleError> {
        (**self).delete(name)
    }

    fn list(&self) -> Result<Vec<String>, RoleError> {
        (**self).list()
    }
}
