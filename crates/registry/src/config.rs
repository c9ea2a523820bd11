//! Registry configuration (provisioning policy, price validation).
//!
//! Values come from code (`Default` + `with_*` setters) or from the
//! environment:
//!
//! | Variable | Values | Default |
//! |---|---|---|
//! | `BAZAAR_PROVISION_POLICY` | `reject`, `return-existing` | `reject` |
//! | `BAZAAR_ALLOW_ZERO_PRICE` | `true`, `false` | `true` |
//! | `BAZAAR_MAX_PRICE` | integer, smallest currency unit | unset |

use core::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use bazaar_catalog::{Price, PriceRule};

pub const ENV_PROVISION_POLICY: &str = "BAZAAR_PROVISION_POLICY";
pub const ENV_ALLOW_ZERO_PRICE: &str = "BAZAAR_ALLOW_ZERO_PRICE";
pub const ENV_MAX_PRICE: &str = "BAZAAR_MAX_PRICE";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var}: invalid value '{value}' (expected {expected})")]
    InvalidValue {
        var: &'static str,
        value: String,
        expected: &'static str,
    },
}

/// What a second `provision_catalog` call for the same participant does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProvisionPolicy {
    /// Fail with `AlreadyProvisioned`.
    #[default]
    RejectExisting,
    /// Hand back the catalog provisioned the first time.
    ReturnExisting,
}

impl FromStr for ProvisionPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "reject" | "reject-existing" => Ok(Self::RejectExisting),
            "return-existing" | "return" => Ok(Self::ReturnExisting),
            _ => Err(ConfigError::InvalidValue {
                var: ENV_PROVISION_POLICY,
                value: s.to_string(),
                expected: "'reject' or 'return-existing'",
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RegistryConfig {
    pub provision_policy: ProvisionPolicy,
    /// Rule every catalog provisioned by this registry applies to new items.
    pub price_rule: PriceRule,
}

impl RegistryConfig {
    pub fn with_provision_policy(mut self, policy: ProvisionPolicy) -> Self {
        self.provision_policy = policy;
        self
    }

    pub fn with_price_rule(mut self, rule: PriceRule) -> Self {
        self.price_rule = rule;
        self
    }

    /// Read configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through an arbitrary key lookup; unset keys keep
    /// their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup(ENV_PROVISION_POLICY) {
            config.provision_policy = raw.parse()?;
        }

        if let Some(raw) = lookup(ENV_ALLOW_ZERO_PRICE) {
            config.price_rule.allow_zero = parse_bool(ENV_ALLOW_ZERO_PRICE, &raw)?;
        }

        if let Some(raw) = lookup(ENV_MAX_PRICE) {
            let max = raw
                .trim()
                .parse::<u128>()
                .map_err(|_| ConfigError::InvalidValue {
                    var: ENV_MAX_PRICE,
                    value: raw.clone(),
                    expected: "a non-negative integer",
                })?;
            config.price_rule.max = Some(Price::new(max));
        }

        Ok(config)
    }
}

fn parse_bool(var: &'static str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            var,
            value: raw.to_string(),
            expected: "'true' or 'false'",
        }),
    }
}
