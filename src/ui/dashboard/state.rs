//! Dashboard state management
//!
//! Contains the main dashboard state struct, the load lifecycle and the view
//! selection that drives rendering.

use crate::consts::cli_consts::MAX_ACTIVITY_LOGS;
use crate::events::Event as LoaderEvent;
use crate::listing::{ListingView, Listings};
use crate::ui::app::UIConfig;

use std::collections::VecDeque;
use std::time::Instant;

/// Lifecycle of the listings shown on the dashboard.
///
/// Replacing the whole value publishes the listings, the sold subset and the
/// "load completed" flag in one step.
#[derive(Debug, Clone)]
pub enum LoadState {
    Loading { started_at: Instant },
    Loaded(Listings),
    Failed { kind: String, message: String },
}

impl LoadState {
    pub fn loading() -> Self {
        LoadState::Loading {
            started_at: Instant::now(),
        }
    }

    pub fn is_completed(&self) -> bool {
        !matches!(self, LoadState::Loading { .. })
    }

    /// Selects what the dashboard shows for this state.
    pub fn view(&self) -> DashboardView<'_> {
        match self {
            LoadState::Loading { .. } => DashboardView::Loading,
            LoadState::Failed { kind, message } => DashboardView::Failed { kind, message },
            LoadState::Loaded(listings) if listings.is_empty() => DashboardView::NoAssets,
            LoadState::Loaded(listings) => DashboardView::Listings {
                created: listings.all(),
                sold: (!listings.sold().is_empty()).then(|| listings.sold()),
            },
        }
    }
}

/// What the dashboard renders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DashboardView<'a> {
    Loading,
    Failed {
        kind: &'a str,
        message: &'a str,
    },
    /// Completed load with nothing created: only the notice is shown.
    NoAssets,
    Listings {
        created: &'a [ListingView],
        /// `None` when nothing has sold; the sold section is omitted.
        sold: Option<&'a [ListingView]>,
    },
}

/// Static facts about the session shown in the info panel.
#[derive(Debug, Clone, Default)]
pub struct SessionInfo {
    /// Chain the session is pinned to, e.g. "Local (chain 31337)".
    pub network: String,
    pub rpc_url: String,
    pub marketplace: String,
    pub token: String,
}

#[derive(Debug)]
pub struct DashboardState {
    pub session: SessionInfo,
    /// Account reported by the wallet once connected.
    pub account: Option<String>,
    /// The start time of the application, used for computing uptime.
    pub start_time: Instant,
    /// Queue of events waiting to be processed
    pub pending_events: VecDeque<LoaderEvent>,
    /// Activity logs for display
    pub activity_logs: VecDeque<LoaderEvent>,
    /// Whether to enable background colors
    pub with_background_color: bool,
    /// Animation tick counter
    pub tick: usize,

    load: LoadState,
    /// Generation of the most recently requested load.
    generation: u64,
    /// Timestamp of the last completed load
    last_loaded_at: Option<String>,
    /// Index of the first listing card shown in each section.
    listing_scroll: usize,
}

impl DashboardState {
    pub fn new(session: SessionInfo, start_time: Instant, ui_config: UIConfig) -> Self {
        Self {
            session,
            account: None,
            start_time,
            pending_events: VecDeque::new(),
            activity_logs: VecDeque::new(),
            with_background_color: ui_config.with_background_color,
            tick: 0,
            load: LoadState::loading(),
            generation: 0,
            last_loaded_at: None,
            listing_scroll: 0,
        }
    }

    pub fn load(&self) -> &LoadState {
        &self.load
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn last_loaded_at(&self) -> &Option<String> {
        &self.last_loaded_at
    }

    pub fn listing_scroll(&self) -> usize {
        self.listing_scroll
    }

    // Setters for updaters
    pub(super) fn set_load(&mut self, load: LoadState) {
        self.load = load;
    }

    pub(super) fn set_generation(&mut self, generation: u64) {
        self.generation = generation;
    }

    pub(super) fn set_last_loaded_at(&mut self, timestamp: Option<String>) {
        self.last_loaded_at = timestamp;
    }

    pub(super) fn set_listing_scroll(&mut self, offset: usize) {
        self.listing_scroll = offset;
    }

    /// Add an event to activity logs with size limit
    pub fn add_to_activity_log(&mut self, event: LoaderEvent) {
        if self.activity_logs.len() >= MAX_ACTIVITY_LOGS {
            self.activity_logs.pop_front();
        }
        self.activity_logs.push_back(event);
    }

    /// Add an event to the processing queue.
    ///
    /// Events from a load superseded by a reload are dropped.
    pub fn add_event(&mut self, event: LoaderEvent) {
        if event.generation != 0 && event.generation != self.generation {
            return;
        }
        self.pending_events.push_back(event);
    }
}
