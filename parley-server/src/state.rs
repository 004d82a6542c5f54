//! Application state.

use parley_core::{ChatService, CompletionBackend, Database};
use std::sync::Arc;
use std::time::Instant;

use crate::config::Config;

/// Shared application state
pub struct AppState {
    /// Server configuration
    pub config: Arc<Config>,
    /// Conversation store
    pub db: Arc<Database>,
    /// Conversation engine (lifecycle + turn submission)
    pub chat: Arc<ChatService>,
    /// Upstream completion backend (also probed by the health check)
    pub completion: Arc<dyn CompletionBackend>,
    /// Server start time
    pub start_time: Instant,
}

impl AppState {
    /// Create new application state
    pub fn new(
        config: Config,
        db: Database,
        completion: Arc<dyn CompletionBackend>,
    ) -> Arc<Self> {
        let db = Arc::new(db);
        let chat = Arc::new(ChatService::new(
            Arc::clone(&db),
            Arc::clone(&completion),
            config.history_limit,
        ));
        Arc::new(Self {
            config: Arc::new(config),
            db,
            chat,
            completion,
            start_time: Instant::now(),
        })
    }
}
