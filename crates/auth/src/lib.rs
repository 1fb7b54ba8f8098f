//! `gatekey-auth` — token issuance and the credential/role-binding protocol.
//!
//! This crate is intentionally decoupled from HTTP and storage. Stores are
//! reached through capability traits ([`RoleDirectory`], [`CredentialStore`])
//! so the core can be exercised against in-memory fakes.

pub mod config;
pub mod credentials;
pub mod identity;
pub mod orchestrator;
pub mod roles;
pub mod token;

pub use config::{ConfigError, TokenConfig, MIN_SIGNING_KEY_BYTES};
pub use credentials::{CredentialError, CredentialStore, VerifyOutcome};
pub use identity::Identity;
pub use orchestrator::{AuthService, AuthenticateError, OrphanPolicy, RegisterError};
pub use roles::{RoleDirectory, RoleError};
pub use token::{Claims, IssueError, IssuedToken, TokenIssuer};
