//! Session setup and initialization

use crate::chain::{RpcProvider, RpcWallet};
use crate::config::Config;
use crate::consts::cli_consts::EVENT_QUEUE_SIZE;
use crate::events::{Event, EventSender};
use crate::loader::DashboardLoader;
use crate::metadata::HttpMetadataClient;
use crate::network::describe_chain;
use crate::ui::dashboard::SessionInfo;
use std::error::Error;
use std::sync::Arc;
use tokio::sync::{broadcast, mpsc};

/// Session data for both TUI and headless modes
pub struct SessionData {
    /// Event receiver for loader progress events
    pub event_receiver: mpsc::Receiver<Event>,
    /// Shutdown sender to abort in-flight loads
    pub shutdown_sender: broadcast::Sender<()>,
    /// Loader shared by every load generation
    pub loader: Arc<DashboardLoader>,
    /// Facts shown alongside the listings
    pub info: SessionInfo,
}

/// Builds the provider client, wallet connector, metadata client and loader.
///
/// The configuration is validated first, so a bad address or URL fails here
/// instead of inside the first load.
pub fn setup_session(config: &Config) -> Result<SessionData, Box<dyn Error>> {
    config.validate()?;
    let contracts = config.contract_addresses()?;

    let rpc = Arc::new(RpcProvider::new(config.rpc_url.clone())?);
    let rpc_url = rpc.url().to_string();
    let wallet = RpcWallet::over_rpc(rpc, config.account_address()?, config.chain_id);
    let metadata = HttpMetadataClient::new(config.ipfs_gateway.clone())?;

    let (event_sender, event_receiver) = mpsc::channel(EVENT_QUEUE_SIZE);
    let (shutdown_sender, _) = broadcast::channel(1);

    let loader = DashboardLoader::new(
        Arc::new(wallet),
        Arc::new(metadata),
        contracts,
        config.unit_decimals,
        config.load_timeout(),
    )
    .with_events(EventSender::new(event_sender));

    Ok(SessionData {
        event_receiver,
        shutdown_sender,
        loader: Arc::new(loader),
        info: SessionInfo {
            network: describe_chain(config.chain_id),
            rpc_url,
            marketplace: contracts.marketplace.to_string(),
            token: contracts.token.to_string(),
        },
    })
}
