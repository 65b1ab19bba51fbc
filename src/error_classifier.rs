use crate::chain::error::RpcError;
use crate::error::DashboardError;
use crate::logging::LogLevel;

#[derive(Debug, Clone)]
pub struct ErrorClassifier;

impl ErrorClassifier {
    pub fn new() -> Self {
        Self
    }

    pub fn classify_rpc_error(&self, error: &RpcError) -> LogLevel {
        match error {
            // Temporary server issues
            RpcError::Http { status, .. } if *status == 429 => LogLevel::Warn,
            RpcError::Http { status, .. } if (500..=599).contains(status) => LogLevel::Warn,

            // Auth and malformed responses
            RpcError::Http { status, .. } if *status == 401 || *status == 403 => LogLevel::Error,
            RpcError::Abi(_) | RpcError::InvalidResponse(_) => LogLevel::Error,
            RpcError::Rpc { .. } => LogLevel::Error,

            // Network issues - usually temporary
            _ => LogLevel::Warn,
        }
    }

    pub fn classify_load_error(&self, error: &DashboardError) -> LogLevel {
        match error {
            DashboardError::ContractCall { source, .. } => self.classify_rpc_error(source),
            DashboardError::MetadataFetch { .. } => LogLevel::Warn,
            DashboardError::Timeout(_) => LogLevel::Warn,
            DashboardError::WalletConnection(_) => LogLevel::Error,
            DashboardError::PriceOrIdOverflow { .. } => LogLevel::Error,
            DashboardError::Config(_) => LogLevel::Error,
        }
    }
}

impl Default for ErrorClassifier {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn server_errors_are_warnings() {
        let classifier = ErrorClassifier::new();
        let err = RpcError::Http {
            status: 503,
            message: "unavailable".to_string(),
        };
        assert_eq!(classifier.classify_rpc_error(&err), LogLevel::Warn);
    }

    #[test]
    fn reverts_and_decode_failures_are_errors() {
        let classifier = ErrorClassifier::new();
        let revert = DashboardError::ContractCall {
            contract: "NFTMarket",
            method: "fetchItemsCreated",
            source: RpcError::Rpc {
                code: 3,
                message: "execution reverted".to_string(),
            },
        };
        assert_eq!(classifier.classify_load_error(&revert), LogLevel::Error);
        assert_eq!(
            classifier.classify_load_error(&DashboardError::Timeout(Duration::from_secs(1))),
            LogLevel::Warn
        );
    }
}
