// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::time::Duration;

use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use serde_with::{DisplayFromStr, PickFirst, serde_as};
use thiserror::Error;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub const ENV_VAR_TYPESENSE_NODES: &str = "TYPESENSE_NODES";
pub const ENV_VAR_TYPESENSE_ADMIN_API_KEY: &str = "TYPESENSE_ADMIN_API_KEY";
pub const ENV_VAR_TYPESENSE_NUM_RETRIES: &str = "TYPESENSE_NUM_RETRIES";
pub const ENV_VAR_TYPESENSE_RETRY_INTERVAL_SECONDS: &str = "TYPESENSE_RETRY_INTERVAL_SECONDS";
pub const ENV_VAR_TYPESENSE_CONNECTION_TIMEOUT_SECONDS: &str =
    "TYPESENSE_CONNECTION_TIMEOUT_SECONDS";
pub const ENV_VAR_TYPESENSE_HEALTHCHECK_INTERVAL_SECONDS: &str =
    "TYPESENSE_HEALTHCHECK_INTERVAL_SECONDS";
pub const ENV_VAR_TYPESENSE_STRICT_KEY_SYNC: &str = "TYPESENSE_STRICT_KEY_SYNC";

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display, strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum TypesenseProtocol {
    Http,
    Https,
}

#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypesenseNode {
    pub host: String,
    // Node lists commonly carry the port as a string
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    pub port: u16,
    pub protocol: TypesenseProtocol,
}

impl TypesenseNode {
    pub fn url(&self) -> String {
        format!("{}://{}:{}", self.protocol, self.host, self.port)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Connection settings of the search server client
#[derive(Debug, Clone)]
pub struct TypesenseClientConfig {
    pub nodes: Vec<TypesenseNode>,
    pub admin_api_key: SecretString,
    pub num_retries: u32,
    pub retry_interval: Duration,
    pub connection_timeout: Duration,
    pub healthcheck_interval: Duration,
}

impl TypesenseClientConfig {
    pub const DEFAULT_NUM_RETRIES: u32 = 3;
    pub const DEFAULT_RETRY_INTERVAL: Duration = Duration::from_secs(1);
    pub const DEFAULT_CONNECTION_TIMEOUT: Duration = Duration::from_secs(3);
    pub const DEFAULT_HEALTHCHECK_INTERVAL: Duration = Duration::from_secs(60);

    pub fn new(nodes: Vec<TypesenseNode>, admin_api_key: SecretString) -> Self {
        Self {
            nodes,
            admin_api_key,
            num_retries: Self::DEFAULT_NUM_RETRIES,
            retry_interval: Self::DEFAULT_RETRY_INTERVAL,
            connection_timeout: Self::DEFAULT_CONNECTION_TIMEOUT,
            healthcheck_interval: Self::DEFAULT_HEALTHCHECK_INTERVAL,
        }
    }

    pub fn load_from_env() -> Result<Self, ConfigLoadError> {
        Self::load_from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads the settings through `lookup`, which maps a variable name to its
    /// value. Only the node list and the admin key are mandatory.
    pub fn load_from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigLoadError> {
        let nodes_json = require(&lookup, ENV_VAR_TYPESENSE_NODES)?;
        let nodes: Vec<TypesenseNode> =
            serde_json::from_str(&nodes_json).map_err(|e| ConfigLoadError::InvalidValue {
                name: ENV_VAR_TYPESENSE_NODES,
                reason: e.to_string(),
            })?;
        if nodes.is_empty() {
            return Err(ConfigLoadError::InvalidValue {
                name: ENV_VAR_TYPESENSE_NODES,
                reason: "at least one node is required".to_string(),
            });
        }

        let admin_api_key = SecretString::from(require(&lookup, ENV_VAR_TYPESENSE_ADMIN_API_KEY)?);

        let mut config = Self::new(nodes, admin_api_key);

        if let Some(value) = lookup(ENV_VAR_TYPESENSE_NUM_RETRIES) {
            config.num_retries = value.trim().parse().map_err(|e: std::num::ParseIntError| {
                ConfigLoadError::InvalidValue {
                    name: ENV_VAR_TYPESENSE_NUM_RETRIES,
                    reason: e.to_string(),
                }
            })?;
        }
        if let Some(value) = lookup(ENV_VAR_TYPESENSE_RETRY_INTERVAL_SECONDS) {
            config.retry_interval =
                parse_seconds(ENV_VAR_TYPESENSE_RETRY_INTERVAL_SECONDS, &value)?;
        }
        if let Some(value) = lookup(ENV_VAR_TYPESENSE_CONNECTION_TIMEOUT_SECONDS) {
            config.connection_timeout =
                parse_seconds(ENV_VAR_TYPESENSE_CONNECTION_TIMEOUT_SECONDS, &value)?;
        }
        if let Some(value) = lookup(ENV_VAR_TYPESENSE_HEALTHCHECK_INTERVAL_SECONDS) {
            config.healthcheck_interval =
                parse_seconds(ENV_VAR_TYPESENSE_HEALTHCHECK_INTERVAL_SECONDS, &value)?;
        }

        Ok(config)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Behavior of key rotation when the server no longer knows the stored key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApiKeySyncConfig {
    /// Fail the save instead of silently issuing a brand-new key
    pub strict: bool,
}

impl Default for ApiKeySyncConfig {
    fn default() -> Self {
        Self { strict: true }
    }
}

impl ApiKeySyncConfig {
    pub fn strict() -> Self {
        Self { strict: true }
    }

    pub fn lenient() -> Self {
        Self { strict: false }
    }

    pub fn load_from_env() -> Result<Self, ConfigLoadError> {
        Self::load_from_lookup(|name| std::env::var(name).ok())
    }

    pub fn load_from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigLoadError> {
        let Some(value) = lookup(ENV_VAR_TYPESENSE_STRICT_KEY_SYNC) else {
            return Ok(Self::default());
        };

        let strict = match value.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => true,
            "0" | "false" | "no" | "off" => false,
            _ => {
                return Err(ConfigLoadError::InvalidValue {
                    name: ENV_VAR_TYPESENSE_STRICT_KEY_SYNC,
                    reason: format!("expected a boolean, got '{value}'"),
                });
            }
        };

        Ok(Self { strict })
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

fn require(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
) -> Result<String, ConfigLoadError> {
    lookup(name)
        .filter(|v| !v.trim().is_empty())
        .ok_or(ConfigLoadError::Missing { name })
}

fn parse_seconds(name: &'static str, value: &str) -> Result<Duration, ConfigLoadError> {
    let invalid = |reason: String| ConfigLoadError::InvalidValue { name, reason };

    let seconds: f64 = value
        .trim()
        .parse()
        .map_err(|e: std::num::ParseFloatError| invalid(e.to_string()))?;
    Duration::try_from_secs_f64(seconds).map_err(|e| invalid(e.to_string()))
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigLoadError {
    #[error("Required setting '{name}' is not set")]
    Missing { name: &'static str },

    #[error("Setting '{name}' has an invalid value: {reason}")]
    InvalidValue { name: &'static str, reason: String },
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////


////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
