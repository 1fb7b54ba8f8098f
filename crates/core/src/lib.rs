//! `gatekey-core` — shared primitives for the auth service.
//!
//! This crate contains identifier newtypes and the collaborator-fault error
//! model. No business logic lives here.

pub mod error;
pub mod id;

pub use error::{StoreError, StoreResult};
pub use id::UserId;
