//! Error handling for the chain access layer

use alloy::transports::{TransportError, TransportErrorKind};
use thiserror::Error;

/// EIP-1193 "user rejected request".
const USER_REJECTED: i64 = 4001;
/// EIP-1474 "method not found".
const METHOD_NOT_FOUND: i64 = -32601;

#[derive(Debug, Error)]
pub enum RpcError {
    /// Reqwest error while building the HTTP client.
    #[error("Reqwest error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("HTTP error with status {status}: {message}")]
    Http { status: u16, message: String },

    /// JSON-RPC error object returned by the node (reverts included).
    #[error("RPC error {code}: {message}")]
    Rpc { code: i64, message: String },

    /// Any other provider failure: connection, serialization, null response.
    #[error("Transport error: {0}")]
    Transport(TransportError),

    #[error("Invalid RPC URL {0}")]
    InvalidUrl(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("ABI decoding error: {0}")]
    Abi(#[from] alloy::sol_types::Error),
}

impl From<TransportError> for RpcError {
    fn from(err: TransportError) -> Self {
        match err {
            TransportError::ErrorResp(payload) => RpcError::Rpc {
                code: payload.code,
                message: payload.message.to_string(),
            },
            TransportError::Transport(TransportErrorKind::HttpError(http)) => RpcError::Http {
                status: http.status,
                message: http.body,
            },
            other => RpcError::Transport(other),
        }
    }
}

impl RpcError {
    pub fn is_user_rejection(&self) -> bool {
        matches!(self, RpcError::Rpc { code: USER_REJECTED, .. })
    }

    /// Whether the provider does not implement the requested method.
    pub fn is_method_not_found(&self) -> bool {
        matches!(self, RpcError::Rpc { code: METHOD_NOT_FOUND, .. })
    }
}
