//! Service configuration management.
//!
//! Consolidates all environment variable reads and provides validated configuration.

use poker_player::{DecisionConfig, HeadsUpStyle};
use std::net::SocketAddr;

/// Default listen address of the bot protocol
pub const DEFAULT_BIND: &str = "0.0.0.0:1337";

/// Largest river bluff probability accepted from the environment
pub const MAX_BLUFF_PROBABILITY: f64 = 0.25;

/// Complete service configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct PlayerConfig {
    /// Service bind address
    pub bind: SocketAddr,
    /// Prometheus exporter address; no exporter when unset
    pub metrics_bind: Option<SocketAddr>,
    /// Seed for reproducible play; OS entropy when unset
    pub rng_seed: Option<u64>,
    /// Decision policy handed to the engine
    pub decision: DecisionConfig,
}

impl PlayerConfig {
    /// Load configuration from environment variables
    ///
    /// # Arguments
    ///
    /// * `bind_override` - Optional bind address override (from CLI args)
    ///
    /// # Errors
    ///
    /// Returns error if a variable is set to something unusable
    pub fn from_env(bind_override: Option<SocketAddr>) -> Result<Self, ConfigError> {
        Self::from_lookup(bind_override, |key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(bind_override: Option<SocketAddr>, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bind = match bind_override {
            Some(bind) => bind,
            None => parse_addr(
                "PLAYER_BIND",
                &lookup("PLAYER_BIND").unwrap_or_else(|| DEFAULT_BIND.to_string()),
            )?,
        };

        let metrics_bind = lookup("METRICS_BIND")
            .map(|addr| parse_addr("METRICS_BIND", &addr))
            .transpose()?;

        let rng_seed = lookup("PLAYER_RNG_SEED")
            .map(|seed| {
                seed.parse().map_err(|_| ConfigError::Invalid {
                    var: "PLAYER_RNG_SEED".to_string(),
                    reason: format!("Not an unsigned integer: {seed}"),
                })
            })
            .transpose()?;

        let heads_up_style = match lookup("PLAYER_HEADS_UP_STYLE") {
            Some(style) => style.parse::<HeadsUpStyle>().map_err(|reason| ConfigError::Invalid {
                var: "PLAYER_HEADS_UP_STYLE".to_string(),
                reason,
            })?,
            None => HeadsUpStyle::default(),
        };

        let defaults = DecisionConfig::default();
        let decision = DecisionConfig {
            fold_threshold: parse_or(&lookup, "PLAYER_FOLD_THRESHOLD", defaults.fold_threshold),
            raise_threshold: parse_or(&lookup, "PLAYER_RAISE_THRESHOLD", defaults.raise_threshold),
            value_threshold: parse_or(&lookup, "PLAYER_VALUE_THRESHOLD", defaults.value_threshold),
            call_threshold: parse_or(&lookup, "PLAYER_CALL_THRESHOLD", defaults.call_threshold),
            aggressive_table: parse_or(
                &lookup,
                "PLAYER_AGGRESSIVE_TABLE",
                defaults.aggressive_table,
            ),
            bluff_probability: parse_or(
                &lookup,
                "PLAYER_BLUFF_PROBABILITY",
                defaults.bluff_probability,
            ),
            heads_up_style,
            ..defaults
        };

        Ok(PlayerConfig {
            bind,
            metrics_bind,
            rng_seed,
            decision,
        })
    }

    /// Validate configuration after loading
    ///
    /// # Returns
    ///
    /// * `Result<(), ConfigError>` - Success or validation error
    pub fn validate(&self) -> Result<(), ConfigError> {
        let decision = &self.decision;
        let thresholds = [
            ("PLAYER_FOLD_THRESHOLD", decision.fold_threshold),
            ("PLAYER_RAISE_THRESHOLD", decision.raise_threshold),
            ("PLAYER_VALUE_THRESHOLD", decision.value_threshold),
            ("PLAYER_CALL_THRESHOLD", decision.call_threshold),
            ("PLAYER_AGGRESSIVE_TABLE", decision.aggressive_table),
        ];
        for (var, value) in thresholds {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::Invalid {
                    var: var.to_string(),
                    reason: format!("Must be between 0 and 1, got {value}"),
                });
            }
        }

        if decision.fold_threshold >= decision.raise_threshold {
            return Err(ConfigError::Invalid {
                var: "PLAYER_FOLD_THRESHOLD".to_string(),
                reason: format!(
                    "Must be lower than the raise threshold ({})",
                    decision.raise_threshold
                ),
            });
        }

        if !(0.0..=MAX_BLUFF_PROBABILITY).contains(&decision.bluff_probability) {
            return Err(ConfigError::Invalid {
                var: "PLAYER_BLUFF_PROBABILITY".to_string(),
                reason: format!("Must be between 0 and {MAX_BLUFF_PROBABILITY}"),
            });
        }

        if self.metrics_bind == Some(self.bind) {
            return Err(ConfigError::Invalid {
                var: "METRICS_BIND".to_string(),
                reason: format!("Clashes with the service address ({})", self.bind),
            });
        }

        Ok(())
    }
}

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration for {var}: {reason}")]
    Invalid { var: String, reason: String },
}

fn parse_addr(var: &str, addr: &str) -> Result<SocketAddr, ConfigError> {
    addr.parse().map_err(|_| ConfigError::Invalid {
        var: var.to_string(),
        reason: format!("Not a socket address: {addr}"),
    })
}

/// Helper to parse a variable with default fallback
fn parse_or<T, F>(lookup: &F, key: &str, default: T) -> T
where
    T: std::str::FromStr,
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
