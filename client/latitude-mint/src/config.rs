use std::str::FromStr;
use std::time::Duration;

use crate::error::{ConfigError, MintError};
use crate::operations::metadata_builder::validate_label;
use crate::util::constants::{
    DEFAULT_CONFIRM_TIMEOUT, DEFAULT_NFT_NAME, DEFAULT_NFT_SYMBOL, DEFAULT_PINNING_API_URL,
    DEFAULT_PINNING_GATEWAY_URL, DEFAULT_POLL_INTERVAL, DEFAULT_RPC_URL, MAX_NAME_LENGTH,
    MAX_SYMBOL_LENGTH,
};

/// Pinning service endpoint and credentials
#[derive(Clone, PartialEq, Eq)]
pub struct PinningConfig {
    pub api_url: String,
    pub gateway_url: String,
    /// Bearer token
    pub jwt: String,
}

impl std::fmt::Debug for PinningConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PinningConfig")
            .field("api_url", &self.api_url)
            .field("gateway_url", &self.gateway_url)
            .field("jwt", &"<redacted>")
            .finish()
    }
}

/// Settings the pipeline itself reads
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    pub nft_name: String,
    pub nft_symbol: String,
    pub confirm_timeout: Duration,
    pub poll_interval: Duration,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            nft_name: DEFAULT_NFT_NAME.to_string(),
            nft_symbol: DEFAULT_NFT_SYMBOL.to_string(),
            confirm_timeout: DEFAULT_CONFIRM_TIMEOUT,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }
}

impl PipelineConfig {
    /// Name and symbol must fit the on-chain metadata limits.
    pub fn validate_labels(&self) -> Result<(), MintError> {
        validate_label("name", &self.nft_name, MAX_NAME_LENGTH)?;
        validate_label("symbol", &self.nft_symbol, MAX_SYMBOL_LENGTH)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub rpc_url: String,
    pub pipeline: PipelineConfig,
    pinning_api_url: String,
    pinning_gateway_url: String,
    pinning_jwt: Option<String>,
}

impl AppConfig {
    /// Load settings from the process environment, after reading `.env`
    /// if one exists.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = PipelineConfig::default();

        let confirm_timeout = match get("LATITUDE_CONFIRM_TIMEOUT_SECS") {
            Some(raw) => Duration::from_secs(parse("LATITUDE_CONFIRM_TIMEOUT_SECS", &raw)?),
            None => defaults.confirm_timeout,
        };
        let poll_interval = match get("LATITUDE_POLL_INTERVAL_MS") {
            Some(raw) => Duration::from_millis(parse("LATITUDE_POLL_INTERVAL_MS", &raw)?),
            None => defaults.poll_interval,
        };
        if poll_interval.is_zero() {
            return Err(ConfigError::Invalid {
                key: "LATITUDE_POLL_INTERVAL_MS",
                value: "0".to_string(),
            });
        }

        Ok(Self {
            rpc_url: get("LATITUDE_RPC_URL").unwrap_or_else(|| DEFAULT_RPC_URL.to_string()),
            pinning_api_url: get("PINATA_API_URL")
                .unwrap_or_else(|| DEFAULT_PINNING_API_URL.to_string()),
            pinning_gateway_url: get("PINATA_GATEWAY_URL")
                .unwrap_or_else(|| DEFAULT_PINNING_GATEWAY_URL.to_string()),
            pinning_jwt: get("PINATA_JWT"),
            pipeline: PipelineConfig {
                nft_name: label(
                    "LATITUDE_NFT_NAME",
                    get("LATITUDE_NFT_NAME").unwrap_or(defaults.nft_name),
                    MAX_NAME_LENGTH,
                )?,
                nft_symbol: label(
                    "LATITUDE_NFT_SYMBOL",
                    get("LATITUDE_NFT_SYMBOL").unwrap_or(defaults.nft_symbol),
                    MAX_SYMBOL_LENGTH,
                )?,
                confirm_timeout,
                poll_interval,
            },
        })
    }

    /// Pinning settings; only minting needs them, so the token is checked here.
    pub fn pinning(&self) -> Result<PinningConfig, ConfigError> {
        let jwt = self
            .pinning_jwt
            .clone()
            .ok_or(ConfigError::Missing("PINATA_JWT"))?;
        Ok(PinningConfig {
            api_url: self.pinning_api_url.clone(),
            gateway_url: self.pinning_gateway_url.clone(),
            jwt,
        })
    }
}

fn label(key: &'static str, value: String, max: usize) -> Result<String, ConfigError> {
    if value.len() > max {
        return Err(ConfigError::Invalid { key, value });
    }
    Ok(value)
}

fn parse<T: FromStr>(key: &'static str, raw: &str) -> Result<T, ConfigError> {
    raw.trim().parse().map_err(|_| ConfigError::Invalid {
        key,
        value: raw.to_string(),
    })
}
