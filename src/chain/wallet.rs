//! Wallet connection over an Ethereum provider.

use super::{ContractCaller, RpcProvider, WalletBackend, WalletConnector, WalletSession};
use crate::error::DashboardError;
use alloy_primitives::Address;
use std::sync::Arc;

/// Connects to the provider, checks the chain and picks the querying account.
pub struct RpcWallet {
    backend: Arc<dyn WalletBackend>,
    caller: Arc<dyn ContractCaller>,
    account: Option<Address>,
    expected_chain_id: Option<u64>,
}

impl RpcWallet {
    pub fn new(
        backend: Arc<dyn WalletBackend>,
        caller: Arc<dyn ContractCaller>,
        account: Option<Address>,
        expected_chain_id: Option<u64>,
    ) -> Self {
        Self {
            backend,
            caller,
            account,
            expected_chain_id,
        }
    }

    /// Wallet that uses one provider both to connect and to query.
    pub fn over_rpc(
        client: Arc<RpcProvider>,
        account: Option<Address>,
        expected_chain_id: Option<u64>,
    ) -> Self {
        Self::new(client.clone(), client, account, expected_chain_id)
    }

    async fn resolve_account(&self) -> Result<Address, DashboardError> {
        if let Some(account) = self.account {
            return Ok(account);
        }

        let accounts = match self.backend.request_accounts().await {
            Ok(accounts) => accounts,
            Err(e) if e.is_user_rejection() => {
                return Err(DashboardError::WalletConnection(
                    "authorization was declined".to_string(),
                ));
            }
            // Plain nodes do not implement eth_requestAccounts.
            Err(e) if e.is_method_not_found() => self.backend.accounts().await.map_err(|e| {
                DashboardError::WalletConnection(format!("failed to list accounts: {}", e))
            })?,
            Err(e) => {
                return Err(DashboardError::WalletConnection(format!(
                    "failed to request accounts: {}",
                    e
                )));
            }
        };

        accounts.into_iter().next().ok_or_else(|| {
            DashboardError::WalletConnection(format!(
                "provider at {} exposes no accounts; pass --account",
                self.backend.endpoint()
            ))
        })
    }
}

#[async_trait::async_trait]
impl WalletConnector for RpcWallet {
    async fn connect(&self) -> Result<WalletSession, DashboardError> {
        let chain_id = self.backend.chain_id().await.map_err(|e| {
            DashboardError::WalletConnection(format!(
                "no compatible provider at {}: {}",
                self.backend.endpoint(),
                e
            ))
        })?;

        if let Some(expected) = self.expected_chain_id {
            if expected != chain_id {
                return Err(DashboardError::WalletConnection(format!(
                    "provider is on chain {} but chain {} is configured",
                    chain_id, expected
                )));
            }
        }

        let account = self.resolve_account().await?;
        Ok(WalletSession::new(account, chain_id, self.caller.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::super::error::RpcError;
    use super::super::{MockContractCaller, MockWalletBackend};
    use super::*;

    const ACCOUNT: Address = Address::repeat_byte(0x42);

    fn backend_on_chain(chain_id: u64) -> MockWalletBackend {
        let mut backend = MockWalletBackend::new();
        backend
            .expect_endpoint()
            .return_const("http://127.0.0.1:8545".to_string());
        backend.expect_chain_id().returning(move || Ok(chain_id));
        backend
    }

    fn wallet(backend: MockWalletBackend, account: Option<Address>, chain: Option<u64>) -> RpcWallet {
        RpcWallet::new(
            Arc::new(backend),
            Arc::new(MockContractCaller::new()),
            account,
            chain,
        )
    }

    #[tokio::test]
    async fn configured_account_skips_account_request() {
        let mut backend = backend_on_chain(31337);
        backend.expect_request_accounts().never();

        let session = wallet(backend, Some(ACCOUNT), Some(31337))
            .connect()
            .await
            .unwrap();
        assert_eq!(session.account(), ACCOUNT);
        assert_eq!(session.chain_id(), 31337);
    }

    #[tokio::test]
    async fn first_requested_account_is_used() {
        let mut backend = backend_on_chain(1);
        backend
            .expect_request_accounts()
            .returning(|| Ok(vec![ACCOUNT, Address::repeat_byte(0x43)]));

        let session = wallet(backend, None, None).connect().await.unwrap();
        assert_eq!(session.account(), ACCOUNT);
    }

    #[tokio::test]
    async fn falls_back_to_eth_accounts() {
        let mut backend = backend_on_chain(1);
        backend.expect_request_accounts().returning(|| {
            Err(RpcError::Rpc {
                code: -32601,
                message: "method not found".to_string(),
            })
        });
        backend.expect_accounts().returning(|| Ok(vec![ACCOUNT]));

        let session = wallet(backend, None, None).connect().await.unwrap();
        assert_eq!(session.account(), ACCOUNT);
    }

    #[tokio::test]
    async fn declined_authorization_is_a_wallet_error() {
        let mut backend = backend_on_chain(1);
        backend.expect_request_accounts().returning(|| {
            Err(RpcError::Rpc {
                code: 4001,
                message: "User rejected the request.".to_string(),
            })
        });

        let err = wallet(backend, None, None).connect().await.unwrap_err();
        assert!(
            matches!(err, DashboardError::WalletConnection(ref msg) if msg.contains("declined"))
        );
    }

    #[tokio::test]
    async fn no_accounts_is_a_wallet_error() {
        let mut backend = backend_on_chain(1);
        backend.expect_request_accounts().returning(|| Ok(Vec::new()));

        let err = wallet(backend, None, None).connect().await.unwrap_err();
        assert!(matches!(err, DashboardError::WalletConnection(_)));
    }

    #[tokio::test]
    async fn unreachable_provider_is_a_wallet_error() {
        let mut backend = MockWalletBackend::new();
        backend
            .expect_endpoint()
            .return_const("http://127.0.0.1:1".to_string());
        backend.expect_chain_id().returning(|| {
            Err(RpcError::Http {
                status: 502,
                message: "bad gateway".to_string(),
            })
        });

        let err = wallet(backend, Some(ACCOUNT), None).connect().await.unwrap_err();
        assert!(
            matches!(err, DashboardError::WalletConnection(ref msg) if msg.starts_with("no compatible provider"))
        );
    }

    #[tokio::test]
    async fn chain_mismatch_is_rejected() {
        let backend = backend_on_chain(1);
        let err = wallet(backend, Some(ACCOUNT), Some(31337))
            .connect()
            .await
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Wallet connection failed: provider is on chain 1 but chain 31337 is configured"
        );
    }
}
