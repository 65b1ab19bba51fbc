//! Application configuration.

use crate::consts::cli_consts::{DEFAULT_IPFS_GATEWAY, DEFAULT_LOAD_TIMEOUT_SECS, NATIVE_DECIMALS};
use crate::error::DashboardError;
use crate::keys::parse_address;
use crate::network::Network;
use alloy_primitives::Address;
use serde::{Deserialize, Serialize};
use std::{fs, path::Path, path::PathBuf, time::Duration};

const CONFIG_DIR: &str = ".creator-dashboard";
const CONFIG_FILE: &str = "config.json";

/// Returns the path of the config file in the user's home directory.
pub fn get_config_path() -> Result<PathBuf, std::io::Error> {
    let home = home::home_dir().ok_or_else(|| {
        std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "Unable to determine home directory",
        )
    })?;
    Ok(home.join(CONFIG_DIR).join(CONFIG_FILE))
}

fn default_ipfs_gateway() -> String {
    DEFAULT_IPFS_GATEWAY.to_string()
}

fn default_unit_decimals() -> u8 {
    NATIVE_DECIMALS
}

fn default_load_timeout_secs() -> u64 {
    DEFAULT_LOAD_TIMEOUT_SECS
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// JSON-RPC endpoint of the wallet-backed provider.
    pub rpc_url: String,
    /// Address of the marketplace contract.
    pub marketplace_address: String,
    /// Address of the ERC-721 token contract.
    pub token_address: String,
    /// Account to query as. When unset the provider is asked for its accounts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account: Option<String>,
    /// Chain id the provider must report.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chain_id: Option<u64>,
    #[serde(default = "default_ipfs_gateway")]
    pub ipfs_gateway: String,
    /// Decimal exponent of the native unit prices are quoted in.
    #[serde(default = "default_unit_decimals")]
    pub unit_decimals: u8,
    #[serde(default = "default_load_timeout_secs")]
    pub load_timeout_secs: u64,
}

/// Values supplied on the command line that take precedence over the file.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub rpc_url: Option<String>,
    pub marketplace_address: Option<String>,
    pub token_address: Option<String>,
    pub account: Option<String>,
    pub chain_id: Option<u64>,
    pub ipfs_gateway: Option<String>,
}

/// Contract addresses after validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContractAddresses {
    pub marketplace: Address,
    pub token: Address,
}

impl Config {
    /// Create Config with the given endpoint and contract addresses.
    pub fn new(rpc_url: String, marketplace_address: String, token_address: String) -> Self {
        Config {
            rpc_url,
            marketplace_address,
            token_address,
            account: None,
            chain_id: None,
            ipfs_gateway: default_ipfs_gateway(),
            unit_decimals: default_unit_decimals(),
            load_timeout_secs: default_load_timeout_secs(),
        }
    }

    /// Config skeleton pointing at a network's default endpoint, without contracts.
    pub fn for_network(network: Network) -> Self {
        let mut config = Config::new(network.rpc_url(), String::new(), String::new());
        config.chain_id = Some(network.chain_id());
        config
    }

    /// Loads configuration from a JSON file at the given path.
    ///
    /// # Errors
    /// Returns an `std::io::Error` if reading from file fails or JSON is invalid.
    pub fn load_from_file(path: &Path) -> Result<Self, std::io::Error> {
        let buf = fs::read(path)?;
        let config: Config = serde_json::from_slice(&buf)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        Ok(config)
    }

    /// Saves the configuration to a JSON file at the given path.
    ///
    /// Directories will be created if they don't exist. This method overwrites existing files.
    ///
    /// # Errors
    /// Returns an `std::io::Error` if writing to file fails or serialization fails.
    pub fn save(&self, path: &Path) -> Result<(), std::io::Error> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(|e| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("Serialization failed: {}", e),
            )
        })?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Deletes the config file, if present.
    pub fn clear(path: &Path) -> Result<(), std::io::Error> {
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }

    /// Applies command-line values on top of this configuration.
    pub fn with_overrides(mut self, overrides: ConfigOverrides) -> Self {
        if let Some(rpc_url) = overrides.rpc_url {
            self.rpc_url = rpc_url;
        }
        if let Some(marketplace) = overrides.marketplace_address {
            self.marketplace_address = marketplace;
        }
        if let Some(token) = overrides.token_address {
            self.token_address = token;
        }
        if overrides.account.is_some() {
            self.account = overrides.account;
        }
        if overrides.chain_id.is_some() {
            self.chain_id = overrides.chain_id;
        }
        if let Some(gateway) = overrides.ipfs_gateway {
            self.ipfs_gateway = gateway;
        }
        self
    }

    /// Validates and returns the two contract addresses.
    pub fn contract_addresses(&self) -> Result<ContractAddresses, DashboardError> {
        let marketplace = parse_address(&self.marketplace_address).map_err(|e| {
            DashboardError::Config(format!("marketplace address: {}", e))
        })?;
        let token = parse_address(&self.token_address)
            .map_err(|e| DashboardError::Config(format!("token address: {}", e)))?;
        Ok(ContractAddresses { marketplace, token })
    }

    /// Validates and returns the configured account, if any.
    pub fn account_address(&self) -> Result<Option<Address>, DashboardError> {
        self.account
            .as_deref()
            .map(|account| {
                parse_address(account)
                    .map_err(|e| DashboardError::Config(format!("account: {}", e)))
            })
            .transpose()
    }

    /// Checks every field that the loader depends on.
    pub fn validate(&self) -> Result<(), DashboardError> {
        if !(self.rpc_url.starts_with("http://") || self.rpc_url.starts_with("https://")) {
            return Err(DashboardError::Config(format!(
                "RPC URL must be http(s): {:?}",
                self.rpc_url
            )));
        }
        if self.load_timeout_secs == 0 {
            return Err(DashboardError::Config(
                "load timeout must be at least one second".to_string(),
            ));
        }
        if self.unit_decimals > 77 {
            return Err(DashboardError::Config(format!(
                "unit decimals {} exceed the uint256 range",
                self.unit_decimals
            )));
        }
        self.contract_addresses()?;
        self.account_address()?;
        Ok(())
    }

    pub fn load_timeout(&self) -> Duration {
        Duration::from_secs(self.load_timeout_secs)
    }
}
