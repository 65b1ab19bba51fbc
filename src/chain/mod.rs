//! Chain access layer: provider client, wallet connection and contract proxies.

use crate::chain::error::RpcError;
use crate::error::DashboardError;
use alloy_primitives::{Address, U256};
use std::fmt::{Debug, Formatter};
use std::sync::Arc;

pub mod contracts;
pub mod error;
pub mod rpc;
pub mod wallet;

pub use contracts::{MarketContract, NftContract};
pub use rpc::RpcProvider;
pub use wallet::RpcWallet;

#[cfg(test)]
use mockall::automock;

/// One `MarketItem` record as returned by the marketplace contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawMarketItem {
    pub item_id: U256,
    pub nft_contract: Address,
    pub token_id: U256,
    pub seller: Address,
    pub owner: Address,
    pub price: U256,
    pub sold: bool,
}

/// Read-only contract call transport.
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait ContractCaller: Send + Sync {
    /// Executes `data` against `to` as `from` without creating a transaction.
    async fn call(&self, from: Address, to: Address, data: Vec<u8>) -> Result<Vec<u8>, RpcError>;
}

/// Provider methods needed to establish a wallet session.
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait WalletBackend: Send + Sync {
    /// Endpoint description for error messages.
    fn endpoint(&self) -> String;

    /// `eth_chainId`.
    async fn chain_id(&self) -> Result<u64, RpcError>;

    /// `eth_requestAccounts`, which may prompt the user for authorization.
    async fn request_accounts(&self) -> Result<Vec<Address>, RpcError>;

    /// `eth_accounts`.
    async fn accounts(&self) -> Result<Vec<Address>, RpcError>;
}

/// Establishes a wallet-backed session for a load.
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait WalletConnector: Send + Sync {
    async fn connect(&self) -> Result<WalletSession, DashboardError>;
}

/// A connected account plus the transport used to query on its behalf.
#[derive(Clone)]
pub struct WalletSession {
    account: Address,
    chain_id: u64,
    caller: Arc<dyn ContractCaller>,
}

impl WalletSession {
    pub fn new(account: Address, chain_id: u64, caller: Arc<dyn ContractCaller>) -> Self {
        Self {
            account,
            chain_id,
            caller,
        }
    }

    pub fn account(&self) -> Address {
        self.account
    }

    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }

    /// Calls `to` with `data`, using the session account as the caller context.
    pub async fn call(&self, to: Address, data: Vec<u8>) -> Result<Vec<u8>, RpcError> {
        self.caller.call(self.account, to, data).await
    }
}

impl Debug for WalletSession {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WalletSession")
            .field("account", &self.account)
            .field("chain_id", &self.chain_id)
            .finish_non_exhaustive()
    }
}
