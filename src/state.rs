use crate::api::{ApiError, BotApiClient};
use crate::config::AppConfig;

/// Shared application state, handed to handlers as `web::Data<AppState>`.
pub struct AppState {
    pub api: BotApiClient,
    pub config: AppConfig,
}

impl AppState {
    pub fn new(config: AppConfig) -> Result<Self, ApiError> {
        let api = BotApiClient::new(&config.api)?;
        Ok(Self { api, config })
    }

    pub fn app_name(&self) -> &str {
        &self.config.app_name
    }
}
