use std::sync::Arc;
use tokio::sync::Notify;

use websess_core::SessionStore;

use crate::config::Settings;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<SessionStore>,
    pub settings: Arc<Settings>,
    /// Signaled by `GET /stop`; the serve loop drains and exits.
    pub shutdown: Arc<Notify>,
}

impl AppState {
    pub fn new(store: Arc<SessionStore>, settings: Arc<Settings>) -> Self {
        Self {
            store,
            settings,
            shutdown: Arc::new(Notify::new()),
        }
    }
}
