// Application state module
// Immutable per-process state shared by every connection

use crate::config::Config;
use crate::routing::Router;

/// Application state: configuration plus the route table.
///
/// Built once at startup and shared read-only across connections; request
/// handling takes no locks.
pub struct AppState {
    pub config: Config,
    pub router: Router,
}

impl AppState {
    pub const fn new(config: Config, router: Router) -> Self {
        Self { config, router }
    }
}
