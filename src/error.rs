//! Error types surfaced by a dashboard load

use crate::chain::error::RpcError;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DashboardError {
    /// No compatible wallet, no exposed account, or the user declined.
    #[error("Wallet connection failed: {0}")]
    WalletConnection(String),

    /// A read against one of the two contracts failed.
    #[error("Contract call {contract}.{method} failed: {source}")]
    ContractCall {
        contract: &'static str,
        method: &'static str,
        source: RpcError,
    },

    /// The metadata document could not be fetched or is malformed.
    #[error("Metadata fetch for token {token_id} ({uri}) failed: {reason}")]
    MetadataFetch {
        token_id: u64,
        uri: String,
        reason: String,
    },

    /// An on-chain integer cannot be represented losslessly.
    #[error("{field} {value} exceeds the safe integer range")]
    PriceOrIdOverflow { field: &'static str, value: String },

    #[error("Load timed out after {0:?}")]
    Timeout(Duration),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl DashboardError {
    /// Short label for the error kind, used as the error panel title.
    pub fn kind(&self) -> &'static str {
        match self {
            DashboardError::WalletConnection(_) => "WALLET",
            DashboardError::ContractCall { .. } => "CONTRACT",
            DashboardError::MetadataFetch { .. } => "METADATA",
            DashboardError::PriceOrIdOverflow { .. } => "OVERFLOW",
            DashboardError::Timeout(_) => "TIMEOUT",
            DashboardError::Config(_) => "CONFIG",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_failing_piece() {
        let err = DashboardError::ContractCall {
            contract: "NFTMarket",
            method: "fetchItemsCreated",
            source: RpcError::InvalidResponse("empty result".to_string()),
        };
        assert_eq!(
            err.to_string(),
            "Contract call NFTMarket.fetchItemsCreated failed: Invalid response: empty result"
        );

        let err = DashboardError::PriceOrIdOverflow {
            field: "tokenId",
            value: "9007199254740992".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "tokenId 9007199254740992 exceeds the safe integer range"
        );
        assert_eq!(err.kind(), "OVERFLOW");
    }
}
