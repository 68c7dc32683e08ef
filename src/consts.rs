pub mod cli_consts {
    //! War room constants
    //!
    //! Fixed paths, limits and timeouts, grouped by the component that uses them.

    // =============================================================================
    // LOCAL STATE
    // =============================================================================

    /// Directory (under $HOME) holding the persisted settings.
    pub const CONFIG_DIR: &str = ".warroom";

    /// File name of the persisted settings blob.
    pub const CONFIG_FILE: &str = "config.json";

    /// The maximum number of events to keep in the activity log.
    pub const MAX_ACTIVITY_LOGS: usize = 100;

    /// Buffer size of the channel carrying request outcomes to the UI loop.
    pub const OUTCOME_QUEUE_SIZE: usize = 64;

    /// Member search results shown at once. Display only.
    pub const MAX_MEMBER_RESULTS: usize = 200;

    // =============================================================================
    // NETWORK CONFIGURATION
    // =============================================================================

    pub mod network {
        use std::time::Duration;

        /// Header carrying the static API key.
        pub const API_KEY_HEADER: &str = "X-API-Key";

        pub const CONNECT_TIMEOUT_SECS: u64 = 10;
        pub const REQUEST_TIMEOUT_SECS: u64 = 20;

        pub const fn connect_timeout() -> Duration {
            Duration::from_secs(CONNECT_TIMEOUT_SECS)
        }

        pub const fn request_timeout() -> Duration {
            Duration::from_secs(REQUEST_TIMEOUT_SECS)
        }
    }

    // =============================================================================
    // GATEWAY ENDPOINTS
    // =============================================================================

    pub mod gateway {
        pub const CORE_STATUS: &str = "/api/core/status";
        pub const CORE_HEALTH: &str = "/api/core/health";
        pub const MODULES: &str = "/api/modules";
    }

    // =============================================================================
    // RELAY ENDPOINTS
    // =============================================================================

    pub mod relay {
        pub const HEALTH: &str = "/health";
        pub const GUILD_STATE: &str = "/api/dashboard/guild/state";
        pub const CHANNEL_RENAME: &str = "/api/dashboard/channel/rename";
        pub const CHANNEL_MOVE: &str = "/api/dashboard/channel/move";
        pub const CHANNEL_DELETE: &str = "/api/dashboard/channel/delete";
        pub const CHANNEL_CREATE: &str = "/api/dashboard/channel/create";
        pub const CATEGORY_CREATE: &str = "/api/dashboard/category/create";
        pub const ROLE_CREATE: &str = "/api/dashboard/role/create";
        pub const MEMBER_ROLE_REMOVE: &str = "/api/dashboard/member/role/remove";
        pub const COMMAND_EXECUTE: &str = "/api/dashboard/commands/execute";
        pub const SNAPSHOT_TAKE: &str = "/api/snapshot/take";
    }
}
