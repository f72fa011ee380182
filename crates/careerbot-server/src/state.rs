use std::sync::Arc;

use careerbot_llm::gateway::Gateway;
use careerbot_storage::store::DocumentStore;

/// Shared application state, injected into all route handlers via Axum state.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn DocumentStore>,
    pub gateway: Arc<Gateway>,
}
