//! Shared application state for all routes.

use crate::config::AppConfig;
use crate::store::RiddleStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn RiddleStore>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(store: Arc<dyn RiddleStore>, config: AppConfig) -> Self {
        AppState {
            store,
            config: Arc::new(config),
        }
    }
}
