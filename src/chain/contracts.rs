//! Typed proxies for the marketplace and token contracts.

use super::error::RpcError;
use super::{RawMarketItem, WalletSession};
use crate::error::DashboardError;
use alloy::sol;
use alloy::sol_types::SolCall;
use alloy_primitives::{Address, U256};

const MARKET_CONTRACT: &str = "NFTMarket";
const TOKEN_CONTRACT: &str = "NFT";

sol! {
    struct MarketItem {
        uint256 itemId;
        address nftContract;
        uint256 tokenId;
        address seller;
        address owner;
        uint256 price;
        bool sold;
    }

    interface NFTMarket {
        function fetchItemsCreated() external view returns (MarketItem[] memory);
    }

    interface NFT {
        function tokenURI(uint256 tokenId) external view returns (string memory);
    }
}

impl From<MarketItem> for RawMarketItem {
    fn from(item: MarketItem) -> Self {
        Self {
            item_id: item.itemId,
            nft_contract: item.nftContract,
            token_id: item.tokenId,
            seller: item.seller,
            owner: item.owner,
            price: item.price,
            sold: item.sold,
        }
    }
}

/// Marketplace contract bound to a session.
#[derive(Debug, Clone)]
pub struct MarketContract {
    address: Address,
    session: WalletSession,
}

impl MarketContract {
    pub fn new(address: Address, session: WalletSession) -> Self {
        Self { address, session }
    }

    /// Items created by the session account, in contract order.
    pub async fn fetch_items_created(&self) -> Result<Vec<RawMarketItem>, DashboardError> {
        let wrap = |source: RpcError| DashboardError::ContractCall {
            contract: MARKET_CONTRACT,
            method: "fetchItemsCreated",
            source,
        };

        let data = NFTMarket::fetchItemsCreatedCall {}.abi_encode();
        let output = self.session.call(self.address, data).await.map_err(wrap)?;
        if output.is_empty() {
            // A call to an address without code returns nothing.
            return Err(wrap(RpcError::InvalidResponse(format!(
                "empty return data; is {} deployed on chain {}?",
                self.address,
                self.session.chain_id()
            ))));
        }
        let items = NFTMarket::fetchItemsCreatedCall::abi_decode_returns(&output)
            .map_err(|e| wrap(e.into()))?;
        Ok(items.into_iter().map(RawMarketItem::from).collect())
    }
}

/// ERC-721 token contract bound to a session.
#[derive(Debug, Clone)]
pub struct NftContract {
    address: Address,
    session: WalletSession,
}

impl NftContract {
    pub fn new(address: Address, session: WalletSession) -> Self {
        Self { address, session }
    }

    pub async fn token_uri(&self, token_id: U256) -> Result<String, DashboardError> {
        let wrap = |source: RpcError| DashboardError::ContractCall {
            contract: TOKEN_CONTRACT,
            method: "tokenURI",
            source,
        };

        let data = NFT::tokenURICall { tokenId: token_id }.abi_encode();
        let output = self.session.call(self.address, data).await.map_err(wrap)?;
        NFT::tokenURICall::abi_decode_returns(&output).map_err(|e| wrap(e.into()))
    }
}


#[cfg(test)]
mod tests {
    use super::super::MockContractCaller;
    use super::test_encoding::{encode_market_items, encode_string, token_uri_argument};
    use super::*;
    use mockall::predicate::eq;
    use std::sync::Arc;

    const MARKET: Address = Address::repeat_byte(0xaa);
    const TOKEN: Address = Address::repeat_byte(0xbb);
    const ACCOUNT: Address = Address::repeat_byte(0x01);

    fn session(caller: MockContractCaller) -> WalletSession {
        WalletSession::new(ACCOUNT, 31337, Arc::new(caller))
    }

    fn item(token_id: u64, price: &str, sold: bool) -> RawMarketItem {
        RawMarketItem {
            item_id: U256::from(token_id),
            nft_contract: TOKEN,
            token_id: U256::from(token_id),
            seller: ACCOUNT,
            owner: Address::ZERO,
            price: price.parse().unwrap(),
            sold,
        }
    }

    #[test]
    fn selectors_match_deployed_contracts() {
        assert_eq!(NFT::tokenURICall::SELECTOR, [0xc8, 0x7b, 0x56, 0xdd]);
        assert_eq!(
            NFTMarket::fetchItemsCreatedCall::SIGNATURE,
            "fetchItemsCreated()"
        );
    }

    #[tokio::test]
    async fn fetch_items_created_calls_as_session_account() {
        let items = vec![
            item(1, "2000000000000000000", true),
            item(2, "500000000000000000", false),
        ];
        let encoded = encode_market_items(&items);

        let mut caller = MockContractCaller::new();
        caller
            .expect_call()
            .with(
                eq(ACCOUNT),
                eq(MARKET),
                eq(NFTMarket::fetchItemsCreatedCall::SELECTOR.to_vec()),
            )
            .times(1)
            .returning(move |_, _, _| Ok(encoded.clone()));

        let market = MarketContract::new(MARKET, session(caller));
        assert_eq!(market.fetch_items_created().await.unwrap(), items);
    }

    #[tokio::test]
    async fn empty_return_data_is_a_contract_error() {
        let mut caller = MockContractCaller::new();
        caller.expect_call().returning(|_, _, _| Ok(Vec::new()));

        let market = MarketContract::new(MARKET, session(caller));
        let err = market.fetch_items_created().await.unwrap_err();
        assert!(matches!(
            err,
            DashboardError::ContractCall {
                contract: "NFTMarket",
                method: "fetchItemsCreated",
                source: RpcError::InvalidResponse(_),
            }
        ));
    }

    #[tokio::test]
    async fn truncated_return_data_is_a_decode_error() {
        let mut encoded = encode_market_items(&[item(1, "1", false)]);
        encoded.truncate(encoded.len() - 1);
        let mut caller = MockContractCaller::new();
        caller
            .expect_call()
            .returning(move |_, _, _| Ok(encoded.clone()));

        let market = MarketContract::new(MARKET, session(caller));
        let err = market.fetch_items_created().await.unwrap_err();
        assert!(matches!(
            err,
            DashboardError::ContractCall {
                source: RpcError::Abi(_),
                ..
            }
        ));
    }

    #[tokio::test]
    async fn token_uri_encodes_token_id() {
        let mut caller = MockContractCaller::new();
        caller
            .expect_call()
            .withf(|from, to, data| {
                *from == ACCOUNT
                    && *to == TOKEN
                    && data[..4] == NFT::tokenURICall::SELECTOR
                    && token_uri_argument(data) == U256::from(42u8)
            })
            .returning(|_, _, _| Ok(encode_string("ipfs://cid/42.json")));

        let token = NftContract::new(TOKEN, session(caller));
        assert_eq!(
            token.token_uri(U256::from(42u8)).await.unwrap(),
            "ipfs://cid/42.json"
        );
    }

    #[tokio::test]
    async fn reverted_token_uri_is_reported_against_token_contract() {
        let mut caller = MockContractCaller::new();
        caller.expect_call().returning(|_, _, _| {
            Err(RpcError::Rpc {
                code: 3,
                message: "execution reverted: nonexistent token".to_string(),
            })
        });

        let token = NftContract::new(TOKEN, session(caller));
        let err = token.token_uri(U256::from(9u8)).await.unwrap_err();
        assert!(err.to_string().starts_with("Contract call NFT.tokenURI failed"));
    }
}
