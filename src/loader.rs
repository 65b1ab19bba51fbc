//! Dashboard loader: wallet connection, contract reads and metadata fan-out.

use crate::chain::error::RpcError;
use crate::chain::{MarketContract, NftContract, RawMarketItem, WalletConnector};
use crate::config::ContractAddresses;
use crate::error::DashboardError;
use crate::error_classifier::ErrorClassifier;
use crate::events::{EventSender, EventType, Source};
use crate::listing::{ListingView, Listings, find_duplicate_token_id};
use crate::logging::LogLevel;
use crate::metadata::MetadataFetcher;
use crate::units::to_safe_integer;
use futures::future::try_join_all;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;

/// Result of one load, tagged with the generation that requested it.
#[derive(Debug)]
pub struct LoadOutcome {
    pub generation: u64,
    pub result: Result<Listings, DashboardError>,
}

#[derive(Clone)]
pub struct DashboardLoader {
    wallet: Arc<dyn WalletConnector>,
    metadata: Arc<dyn MetadataFetcher>,
    contracts: ContractAddresses,
    unit_decimals: u8,
    timeout: Duration,
    events: Option<EventSender>,
}

impl DashboardLoader {
    pub fn new(
        wallet: Arc<dyn WalletConnector>,
        metadata: Arc<dyn MetadataFetcher>,
        contracts: ContractAddresses,
        unit_decimals: u8,
        timeout: Duration,
    ) -> Self {
        Self {
            wallet,
            metadata,
            contracts,
            unit_decimals,
            timeout,
            events: None,
        }
    }

    /// Report progress to an event stream.
    pub fn with_events(mut self, events: EventSender) -> Self {
        self.events = Some(events);
        self
    }

    /// Copy of this loader whose events carry `generation`.
    pub fn for_generation(&self, generation: u64) -> Self {
        Self {
            events: self.events.as_ref().map(|e| e.for_generation(generation)),
            ..self.clone()
        }
    }

    async fn emit(&self, source: Source, msg: String, event_type: EventType, level: LogLevel) {
        if let Some(events) = &self.events {
            events.send(source, msg, event_type, level).await;
        }
    }

    /// Loads every listing created by the connected account.
    ///
    /// All-or-nothing: any failing record fails the whole load, and the whole
    /// load is bounded by the configured timeout.
    pub async fn load_listings(&self) -> Result<Listings, DashboardError> {
        let result = match tokio::time::timeout(self.timeout, self.load_inner()).await {
            Ok(result) => result,
            Err(_) => Err(DashboardError::Timeout(self.timeout)),
        };

        match &result {
            Ok(listings) => {
                self.emit(
                    Source::Loader,
                    format!(
                        "Loaded {} listings ({} sold)",
                        listings.all().len(),
                        listings.sold().len()
                    ),
                    EventType::Success,
                    LogLevel::Info,
                )
                .await;
            }
            Err(e) => {
                let level = ErrorClassifier::new().classify_load_error(e);
                self.emit(Source::Loader, e.to_string(), EventType::Error, level)
                    .await;
            }
        }
        result
    }

    async fn load_inner(&self) -> Result<Listings, DashboardError> {
        self.emit(
            Source::Wallet,
            "Connecting to wallet provider".to_string(),
            EventType::Waiting,
            LogLevel::Info,
        )
        .await;
        let session = self.wallet.connect().await?;
        self.emit(
            Source::Wallet,
            format!(
                "Connected as {} on chain {}",
                session.account(),
                session.chain_id()
            ),
            EventType::Success,
            LogLevel::Info,
        )
        .await;

        let market = MarketContract::new(self.contracts.marketplace, session.clone());
        let token = NftContract::new(self.contracts.token, session);

        let items = market.fetch_items_created().await?;
        if let Some(token_id) = find_duplicate_token_id(&items) {
            return Err(DashboardError::ContractCall {
                contract: "NFTMarket",
                method: "fetchItemsCreated",
                source: RpcError::InvalidResponse(format!("duplicate token id {}", token_id)),
            });
        }
        self.emit(
            Source::Marketplace,
            format!("Found {} created items", items.len()),
            EventType::Refresh,
            LogLevel::Info,
        )
        .await;

        let listings = try_join_all(items.iter().map(|item| self.resolve_item(&token, item))).await?;
        Ok(Listings::new(listings))
    }

    /// Resolves one record: token URI, metadata document and numeric conversions.
    async fn resolve_item(
        &self,
        token: &NftContract,
        item: &RawMarketItem,
    ) -> Result<ListingView, DashboardError> {
        let token_id = to_safe_integer(item.token_id, "tokenId")?;
        let uri = token.token_uri(item.token_id).await?;
        let document =
            self.metadata
                .fetch(&uri)
                .await
                .map_err(|e| DashboardError::MetadataFetch {
                    token_id,
                    uri: uri.clone(),
                    reason: e.to_string(),
                })?;
        self.emit(
            Source::Metadata,
            format!("Resolved token {} ({})", token_id, document.name),
            EventType::Refresh,
            LogLevel::Debug,
        )
        .await;
        ListingView::new(item, document, self.unit_decimals)
    }
}

/// Runs one load in the background and delivers its outcome.
///
/// Progress events are tagged with `generation`. A shutdown signal aborts the
/// load without delivering anything, and a closed outcome channel drops the
/// result.
pub fn spawn_load(
    loader: Arc<DashboardLoader>,
    generation: u64,
    outcomes: mpsc::Sender<LoadOutcome>,
    mut shutdown: broadcast::Receiver<()>,
) -> JoinHandle<()> {
    let loader = loader.for_generation(generation);
    tokio::spawn(async move {
        tokio::select! {
            biased;
            _ = shutdown.recv() => {}
            result = loader.load_listings() => {
                let _ = outcomes.send(LoadOutcome { generation, result }).await;
            }
        }
    })
}
