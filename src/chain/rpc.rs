//! Ethereum provider client for a wallet-backed JSON-RPC endpoint.

use super::error::RpcError;
use super::{ContractCaller, WalletBackend};
use crate::consts::cli_consts::http;
use alloy::providers::{Provider, RootProvider};
use alloy::rpc::client::RpcClient;
use alloy::rpc::types::TransactionRequest;
use alloy::transports::http::Http;
use alloy_primitives::{Address, Bytes};
use log::debug;
use reqwest::{ClientBuilder, Url};

// User-Agent string with CLI version
const USER_AGENT: &str = concat!("creator-dashboard/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone)]
pub struct RpcProvider {
    provider: RootProvider,
    url: String,
}

impl RpcProvider {
    pub fn new(url: impl Into<String>) -> Result<Self, RpcError> {
        let url = url.into();
        let endpoint = Url::parse(&url).map_err(|e| RpcError::InvalidUrl(format!("{url}: {e}")))?;
        let client = ClientBuilder::new()
            .connect_timeout(http::connect_timeout())
            .timeout(http::request_timeout())
            .user_agent(USER_AGENT)
            .build()?;

        let transport = Http::with_client(client, endpoint);
        let provider = RootProvider::new(RpcClient::new(transport, false));
        Ok(Self { provider, url })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait::async_trait]
impl ContractCaller for RpcProvider {
    async fn call(&self, from: Address, to: Address, data: Vec<u8>) -> Result<Vec<u8>, RpcError> {
        debug!("eth_call {} -> {} ({} bytes)", from, to, data.len());
        let request = TransactionRequest::default()
            .from(from)
            .to(to)
            .input(Bytes::from(data).into());
        let output = self.provider.call(request).await?;
        Ok(output.to_vec())
    }
}

#[async_trait::async_trait]
impl WalletBackend for RpcProvider {
    fn endpoint(&self) -> String {
        self.url.clone()
    }

    async fn chain_id(&self) -> Result<u64, RpcError> {
        debug!("eth_chainId -> {}", self.url);
        Ok(self.provider.get_chain_id().await?)
    }

    async fn request_accounts(&self) -> Result<Vec<Address>, RpcError> {
        debug!("eth_requestAccounts -> {}", self.url);
        let accounts: Vec<Address> = self
            .provider
            .raw_request("eth_requestAccounts".into(), ())
            .await?;
        Ok(accounts)
    }

    async fn accounts(&self) -> Result<Vec<Address>, RpcError> {
        debug!("eth_accounts -> {}", self.url);
        Ok(self.provider.get_accounts().await?)
    }
}
