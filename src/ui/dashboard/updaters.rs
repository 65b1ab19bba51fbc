//! Dashboard state update logic
//!
//! Contains all methods for updating dashboard state from events and load outcomes

use super::state::{DashboardState, LoadState};

use crate::events::{Event as LoaderEvent, EventType, Source};
use crate::loader::LoadOutcome;

use chrono::Local;

impl DashboardState {
    /// Advance the animation tick and drain queued events.
    pub fn update(&mut self) {
        self.tick += 1;

        while let Some(event) = self.pending_events.pop_front() {
            self.add_to_activity_log(event.clone());
            self.process_event(&event);
        }
    }

    fn process_event(&mut self, event: &LoaderEvent) {
        if event.source == Source::Wallet && event.event_type == EventType::Success {
            if let Some(account) = Self::extract_account(&event.msg) {
                self.account = Some(account);
            }
        }
    }

    /// Start a new load generation and return its number.
    ///
    /// Outcomes tagged with an older generation are ignored from here on.
    pub fn begin_reload(&mut self) -> u64 {
        let generation = self.generation() + 1;
        self.set_generation(generation);
        self.set_load(LoadState::loading());
        self.set_listing_scroll(0);
        generation
    }

    /// Move the listings by `delta` cards, keeping at least one created card in view.
    pub fn scroll_listings(&mut self, delta: isize) {
        let last = match self.load() {
            LoadState::Loaded(listings) => listings.all().len().saturating_sub(1),
            _ => 0,
        };
        let offset = self.listing_scroll().saturating_add_signed(delta).min(last);
        self.set_listing_scroll(offset);
    }

    pub fn scroll_listings_to_top(&mut self) {
        self.set_listing_scroll(0);
    }

    /// Publish a finished load. Returns `false` if the outcome was stale.
    pub fn apply_outcome(&mut self, outcome: LoadOutcome) -> bool {
        if outcome.generation != self.generation() {
            return false;
        }
        let load = match outcome.result {
            Ok(listings) => LoadState::Loaded(listings),
            Err(e) => LoadState::Failed {
                kind: e.kind().to_string(),
                message: e.to_string(),
            },
        };
        self.set_load(load);
        self.set_last_loaded_at(Some(Local::now().format("%Y-%m-%d %H:%M:%S").to_string()));
        true
    }
}

// Helper functions for event parsing
impl DashboardState {
    /// Extract the account from "Connected as ACCOUNT on chain N".
    fn extract_account(msg: &str) -> Option<String> {
        let pattern = "Connected as ";
        let start = msg.find(pattern)? + pattern.len();
        msg[start..]
            .split_whitespace()
            .next()
            .map(|account| account.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DashboardError;
    use crate::listing::Listings;
    use crate::listing::fixtures::listing;
    use crate::logging::LogLevel;
    use crate::ui::app::UIConfig;
    use crate::ui::dashboard::state::{DashboardView, SessionInfo};
    use std::time::Instant;

    fn state() -> DashboardState {
        DashboardState::new(SessionInfo::default(), Instant::now(), UIConfig::new(false))
    }

    fn loaded(generation: u64) -> LoadOutcome {
        LoadOutcome {
            generation,
            result: Ok(Listings::new(vec![listing(1, "1000000000000000000", true)])),
        }
    }

    #[test]
    fn applies_current_generation() {
        let mut state = state();
        let generation = state.begin_reload();
        assert!(state.apply_outcome(loaded(generation)));
        assert!(state.load().is_completed());
        assert!(state.last_loaded_at().is_some());
    }

    #[test]
    fn drops_stale_outcome_after_reload() {
        let mut state = state();
        let first = state.begin_reload();
        let second = state.begin_reload();
        assert!(!state.apply_outcome(loaded(first)));
        assert_eq!(state.load().view(), DashboardView::Loading);
        assert!(state.apply_outcome(loaded(second)));
    }

    #[test]
    fn failure_becomes_error_state() {
        let mut state = state();
        let generation = state.begin_reload();
        state.apply_outcome(LoadOutcome {
            generation,
            result: Err(DashboardError::WalletConnection("no provider".to_string())),
        });
        assert_eq!(
            state.load().view(),
            DashboardView::Failed {
                kind: "WALLET",
                message: "Wallet connection failed: no provider"
            }
        );
    }

    #[test]
    fn reload_clears_previous_listings() {
        let mut state = state();
        let generation = state.begin_reload();
        state.apply_outcome(loaded(generation));
        state.begin_reload();
        assert!(!state.load().is_completed());
    }

    #[test]
    fn scrolling_stays_within_created_listings() {
        let mut state = state();
        let generation = state.begin_reload();
        state.apply_outcome(LoadOutcome {
            generation,
            result: Ok(Listings::new(
                (1..=8).map(|id| listing(id, "1", id % 2 == 0)).collect(),
            )),
        });

        state.scroll_listings(-1);
        assert_eq!(state.listing_scroll(), 0);
        state.scroll_listings(5);
        assert_eq!(state.listing_scroll(), 5);
        state.scroll_listings(5);
        assert_eq!(state.listing_scroll(), 7);
        state.scroll_listings(-2);
        assert_eq!(state.listing_scroll(), 5);
        state.scroll_listings_to_top();
        assert_eq!(state.listing_scroll(), 0);

        state.scroll_listings(3);
        state.begin_reload();
        assert_eq!(state.listing_scroll(), 0);
        state.scroll_listings(1);
        assert_eq!(state.listing_scroll(), 0);
    }

    #[test]
    fn wallet_event_sets_account() {
        let mut state = state();
        state.add_event(LoaderEvent::new(
            Source::Wallet,
            "Connected as 0xAbC0000000000000000000000000000000000001 on chain 31337".to_string(),
            EventType::Success,
            LogLevel::Info,
        ));
        state.update();
        assert_eq!(
            state.account.as_deref(),
            Some("0xAbC0000000000000000000000000000000000001")
        );
        assert_eq!(state.activity_logs.len(), 1);
        assert!(state.pending_events.is_empty());
    }

    #[test]
    fn superseded_load_events_are_ignored() {
        let mut state = state();
        let first = state.begin_reload();
        let second = state.begin_reload();
        let connected = |account: &str, generation: u64| {
            LoaderEvent::new(
                Source::Wallet,
                format!("Connected as {} on chain 1", account),
                EventType::Success,
                LogLevel::Info,
            )
            .with_generation(generation)
        };

        state.add_event(connected("0xOld", first));
        state.update();
        assert_eq!(state.account, None);
        assert!(state.activity_logs.is_empty());

        state.add_event(connected("0xNew", second));
        state.update();
        assert_eq!(state.account.as_deref(), Some("0xNew"));
        assert_eq!(state.activity_logs.len(), 1);
    }

    #[test]
    fn extracts_account_from_message() {
        assert_eq!(
            DashboardState::extract_account("Connected as 0x01 on chain 1"),
            Some("0x01".to_string())
        );
        assert_eq!(DashboardState::extract_account("Connecting"), None);
    }
}
