use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::ResumeModel;
use crate::sessions::SessionStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Model collaborator behind a trait so tests can stub the network call.
    pub model: Arc<dyn ResumeModel>,
    /// Session-scoped batch results; see `sessions.rs`.
    pub sessions: SessionStore,
    pub config: Config,
}
