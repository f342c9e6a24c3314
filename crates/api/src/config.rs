//! Process configuration, read from the environment.

use std::net::SocketAddr;

use anyhow::{bail, Context};

use loanledger_accounting::IdentifierLimits;

pub const BIND_ADDR_VAR: &str = "LEDGER_BIND_ADDR";
pub const MIN_IDENTIFIER_LENGTH_VAR: &str = "LEDGER_MIN_IDENTIFIER_LENGTH";
pub const MAX_IDENTIFIER_LENGTH_VAR: &str = "LEDGER_MAX_IDENTIFIER_LENGTH";

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub identifier_limits: IdentifierLimits,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            identifier_limits: IdentifierLimits::default(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Unset or blank keys take defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let get = |key: &str| match lookup(key) {
            Some(v) if v.trim().is_empty() => {
                tracing::warn!(key, "blank configuration value, using default");
                None
            }
            other => other,
        };
        let defaults = IdentifierLimits::default();

        let bind_addr = get(BIND_ADDR_VAR)
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .trim()
            .parse::<SocketAddr>()
            .with_context(|| format!("{BIND_ADDR_VAR} must be a socket address"))?;

        let min = match get(MIN_IDENTIFIER_LENGTH_VAR) {
            Some(v) => v
                .trim()
                .parse::<usize>()
                .with_context(|| format!("{MIN_IDENTIFIER_LENGTH_VAR} must be a non-negative integer"))?,
            None => defaults.min,
        };
        let max = match get(MAX_IDENTIFIER_LENGTH_VAR) {
            Some(v) => v
                .trim()
                .parse::<usize>()
                .with_context(|| format!("{MAX_IDENTIFIER_LENGTH_VAR} must be a non-negative integer"))?,
            None => defaults.max,
        };

        if min > max {
            bail!("{MIN_IDENTIFIER_LENGTH_VAR} ({min}) exceeds {MAX_IDENTIFIER_LENGTH_VAR} ({max})");
        }

        Ok(Self {
            bind_addr,
            identifier_limits: IdentifierLimits::new(min, max),
        })
    }
}
