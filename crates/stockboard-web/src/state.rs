use std::sync::Arc;

use stockboard_core::{
    DashboardSettings, MemoizedFetcher, PriceSource, ProviderId, SyntheticSource, YahooAdapter,
};

use crate::config::Config;

/// Shared application state, passed to route handlers via `axum::extract::State`.
pub struct AppState {
    pub fetcher: MemoizedFetcher,
    pub settings: DashboardSettings,
}

impl AppState {
    pub fn new(fetcher: MemoizedFetcher, settings: DashboardSettings) -> Arc<Self> {
        Arc::new(Self { fetcher, settings })
    }

    pub fn from_config(config: &Config) -> Arc<Self> {
        let source: Arc<dyn PriceSource> = match config.provider {
            ProviderId::Yahoo => Arc::new(
                YahooAdapter::default()
                    .with_base_url(config.yahoo_base_url.as_str())
                    .with_timeout_ms(config.timeout_ms),
            ),
            ProviderId::Synthetic => Arc::new(SyntheticSource),
        };

        Self::new(MemoizedFetcher::new(source), config.settings())
    }
}
