//! Environment-backed startup configuration.
//!
//! Every token-signing setting is required: a missing or invalid value is
//! startup-fatal, never a per-request error. Seed passwords are optional
//! (absent ones skip that seed user with a warning).

use std::sync::Arc;

use anyhow::Context;

use gatekey_auth::TokenConfig;
use gatekey_infra::SeedUsers;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub token: Arc<TokenConfig>,
    pub seed_users: SeedUsers,
    pub bind_addr: String,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let signing_key = require("GATEKEY_SIGNING_KEY")?;
        let issuer = require("GATEKEY_ISSUER")?;
        let audiences = parse_audiences(&require("GATEKEY_AUDIENCES")?);
        let expiry: i64 = require("GATEKEY_DEFAULT_EXPIRY_MINUTES")?
            .parse()
            .context("GATEKEY_DEFAULT_EXPIRY_MINUTES must be an integer")?;

        let token = TokenConfig::new(signing_key.into_bytes(), issuer, audiences, expiry)
            .context("invalid token configuration")?;

        Ok(Self {
            token: Arc::new(token),
            seed_users: SeedUsers {
                support_password: optional("GATEKEY_SEED_SUPPORT_PASSWORD"),
                dev_password: optional("GATEKEY_SEED_DEV_PASSWORD"),
                admin_password: optional("GATEKEY_SEED_ADMIN_PASSWORD"),
            },
            bind_addr: optional("GATEKEY_BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.into()),
        })
    }
}

fn require(name: &'static str) -> anyhow::Result<String> {
    std::env::var(name).with_context(|| format!("{name} must be set"))
}

fn optional(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

/// Split the comma-separated audience list, dropping blank entries.
fn parse_audiences(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|a| !a.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn audiences_are_split_and_trimmed() {
        assert_eq!(
            parse_audiences("app, admin-ui ,,reporting"),
            vec!["app", "admin-ui", "reporting"]
        );
    }

    #[test]
    fn blank_audience_list_parses_to_empty() {
        // TokenConfig::new rejects the empty set downstream.
        assert!(parse_audiences(" , ").is_empty());
    }
}
