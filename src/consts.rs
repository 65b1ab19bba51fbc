pub mod cli_consts {
    //! Dashboard Configuration Constants
    //!
    //! Organized by functional area.

    // =============================================================================
    // UI CONFIGURATION
    // =============================================================================

    /// The maximum number of events to keep in the activity logs.
    pub const MAX_ACTIVITY_LOGS: usize = 100;

    /// Maximum number of buffered loader events.
    pub const EVENT_QUEUE_SIZE: usize = 100;

    /// How long the splash screen stays up before the dashboard.
    pub const SPLASH_DURATION_MS: u64 = 1_500;

    /// Listing cards moved by PgUp/PgDn.
    pub const LISTING_PAGE_CARDS: isize = 5;

    // =============================================================================
    // CHAIN CONFIGURATION
    // =============================================================================

    /// Decimal exponent of ether (1 ETH = 10^18 wei).
    pub const NATIVE_DECIMALS: u8 = 18;

    /// Symbol rendered next to prices.
    pub const NATIVE_SYMBOL: &str = "ETH";

    /// Largest integer representable without loss in an IEEE-754 double (2^53 - 1).
    pub const MAX_SAFE_INTEGER: u64 = 9_007_199_254_740_991;

    // =============================================================================
    // NETWORK CONFIGURATION
    // =============================================================================

    /// Default gateway used to dereference `ipfs://` metadata URIs.
    pub const DEFAULT_IPFS_GATEWAY: &str = "https://ipfs.io/ipfs/";

    /// Upper bound on a whole dashboard load (seconds).
    pub const DEFAULT_LOAD_TIMEOUT_SECS: u64 = 30;

    /// HTTP timeouts for RPC and metadata requests.
    pub mod http {
        use std::time::Duration;

        pub const CONNECT_TIMEOUT_SECS: u64 = 10;
        pub const REQUEST_TIMEOUT_SECS: u64 = 20;

        pub const fn connect_timeout() -> Duration {
            Duration::from_secs(CONNECT_TIMEOUT_SECS)
        }

        pub const fn request_timeout() -> Duration {
            Duration::from_secs(REQUEST_TIMEOUT_SECS)
        }
    }
}
