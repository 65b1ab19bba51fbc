use std::fmt::{Debug, Display, Formatter};
use std::str::FromStr;

/// The chain networks the dashboard knows default endpoints for.
#[derive(Clone, Default, Copy, PartialEq, Eq)]
pub enum Network {
    /// Local development node (hardhat / anvil).
    #[default]
    Local,
    /// Sepolia public testnet.
    Sepolia,
}

impl Network {
    /// Returns the default JSON-RPC endpoint associated with the network.
    pub fn rpc_url(&self) -> String {
        match self {
            Network::Local => "http://127.0.0.1:8545".to_string(),
            Network::Sepolia => "https://rpc.sepolia.org".to_string(),
        }
    }

    /// Returns the chain id the network is expected to report.
    pub fn chain_id(&self) -> u64 {
        match self {
            Network::Local => 31337,
            Network::Sepolia => 11_155_111,
        }
    }

    pub fn from_chain_id(chain_id: u64) -> Option<Network> {
        [Network::Local, Network::Sepolia]
            .into_iter()
            .find(|network| network.chain_id() == chain_id)
    }
}

/// Human-readable label for the chain a session is pinned to.
pub fn describe_chain(chain_id: Option<u64>) -> String {
    match chain_id {
        Some(id) => match Network::from_chain_id(id) {
            Some(network) => format!("{} (chain {})", network, id),
            None => format!("chain {}", id),
        },
        None => "any chain".to_string(),
    }
}

impl FromStr for Network {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "local" | "localhost" => Ok(Network::Local),
            "sepolia" => Ok(Network::Sepolia),
            _ => Err(()),
        }
    }
}

impl Display for Network {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Network::Local => write!(f, "Local"),
            Network::Sepolia => write!(f, "Sepolia"),
        }
    }
}

impl Debug for Network {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Network::{}, RPC: {}", self, self.rpc_url())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("SEPOLIA".parse::<Network>(), Ok(Network::Sepolia));
        assert_eq!("localhost".parse::<Network>(), Ok(Network::Local));
        assert!("mainnet".parse::<Network>().is_err());
    }

    #[test]
    fn describes_known_and_unknown_chains() {
        assert_eq!(describe_chain(Some(31337)), "Local (chain 31337)");
        assert_eq!(describe_chain(Some(11_155_111)), "Sepolia (chain 11155111)");
        assert_eq!(describe_chain(Some(5)), "chain 5");
        assert_eq!(describe_chain(None), "any chain");
    }

    #[test]
    fn debug_shows_endpoint() {
        assert_eq!(
            format!("{:?}", Network::Local),
            "Network::Local, RPC: http://127.0.0.1:8545"
        );
    }
}
