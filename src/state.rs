use std::sync::Arc;
use crate::config::Config;
use crate::services::TodoService;

// Application state shared between handlers
#[derive(Clone)]
pub struct AppState {
    pub service: TodoService,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(service: TodoService, config: Config) -> Self {
        Self {
            service,
            config: Arc::new(config),
        }
    }

    /// Opens the data files named in `config` and wraps everything up.
    pub fn from_config(config: Config) -> Self {
        let service = TodoService::open(&config.storage);
        Self::new(service, config)
    }
}
