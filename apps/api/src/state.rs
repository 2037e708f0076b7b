use std::sync::Arc;

use crate::jobs::orchestrator::Orchestrator;
use crate::profile::store::ProfileStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Arc<Orchestrator>,
    pub profiles: Arc<dyn ProfileStore>,
}
