//! Infrastructure layer: store backends and seeding.
//!
//! The production user/role store is an external system; this crate provides
//! the in-memory backend used for development and tests, plus startup
//! seeding of default roles and users.

pub mod memory;
pub mod seed;


pub use memory::InMemoryAuthStore;
pub use seed::{seed_roles, seed_users, SeedUsers, DEFAULT_ROLES};
