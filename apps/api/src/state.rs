use std::sync::Arc;

use crate::auth::IdentityProvider;
use crate::llm_client::CompletionProvider;
use crate::market::MarketDataSource;
use crate::roleplay::DialogueEngine;
use crate::store::{PackStore, SessionStore};

/// Shared application state injected into all route handlers via Axum extractors.
/// Every client in here is constructed once in `main`.
#[derive(Clone)]
pub struct AppState {
    pub packs: Arc<dyn PackStore>,
    pub sessions: Arc<dyn SessionStore>,
    /// Language-model access for content generation. `engine` holds its own handle.
    pub llm: Arc<dyn CompletionProvider>,
    /// Pluggable compensation source. Default: TableEstimator.
    pub market: Arc<dyn MarketDataSource>,
    pub identity: Arc<dyn IdentityProvider>,
    pub engine: DialogueEngine,
}
