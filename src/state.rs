use std::sync::Arc;

use crate::config::Config;
use crate::seed::SeedStore;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub http_client: reqwest::Client,
    /// One-shot upload results awaiting consumption by the results view.
    pub seeds: Arc<SeedStore>,
}

impl AppState {
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let http_client = reqwest::Client::builder()
            .connect_timeout(std::time::Duration::from_secs(config.connect_timeout_secs))
            .timeout(std::time::Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            config,
            http_client,
            seeds: Arc::new(SeedStore::new()),
        })
    }
}
