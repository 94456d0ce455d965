//! Memoized fetch of daily price history.
//!
//! [`MemoizedFetcher`] is the only path from the dashboard to a provider. It
//! folds every provider result into a [`FetchOutcome`] and remembers it for
//! the lifetime of the process, so a given `(ticker, start, end)` triple
//! reaches the network at most once.

use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info, warn};

use crate::cache::MemoCache;
use crate::data_source::PriceSource;
use crate::{PriceSeries, ProviderId, Query};

/// What a dashboard lookup produced.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    Found { series: Arc<PriceSeries> },
    /// The provider answered with no rows.
    Empty,
    /// The provider call failed; `message` is shown to the user verbatim.
    Failed { message: String },
}

impl FetchOutcome {
    pub fn series(&self) -> Option<&PriceSeries> {
        match self {
            Self::Found { series } => Some(series),
            Self::Empty | Self::Failed { .. } => None,
        }
    }
}

/// Provider front that memoizes outcomes by [`Query`].
#[derive(Clone)]
pub struct MemoizedFetcher {
    source: Arc<dyn PriceSource>,
    cache: MemoCache<Query, FetchOutcome>,
}

impl MemoizedFetcher {
    pub fn new(source: Arc<dyn PriceSource>) -> Self {
        Self {
            source,
            cache: MemoCache::new(),
        }
    }

    pub fn provider(&self) -> ProviderId {
        self.source.id()
    }

    /// Fetch `query`, contacting the provider only on the first call for it.
    ///
    /// Never fails: provider errors become [`FetchOutcome::Failed`] and are
    /// remembered like any other outcome.
    pub async fn fetch(&self, query: &Query) -> FetchOutcome {
        let lookup = self
            .cache
            .get_or_init(query.clone(), || self.fetch_uncached(query))
            .await;

        if lookup.hit {
            debug!(%query, "price history served from memo cache");
        }
        lookup.value
    }

    /// Number of distinct queries with a remembered outcome.
    pub async fn cached_queries(&self) -> usize {
        self.cache.len().await
    }

    pub async fn clear(&self) {
        self.cache.clear().await;
    }

    async fn fetch_uncached(&self, query: &Query) -> FetchOutcome {
        let provider = self.source.id();
        let started = Instant::now();
        let result = self.source.daily_bars(query).await;
        let latency_ms = started.elapsed().as_millis() as u64;

        match result {
            Ok(series) if series.is_empty() => {
                info!(%query, %provider, latency_ms, "provider returned no rows");
                FetchOutcome::Empty
            }
            Ok(series) => {
                info!(%query, %provider, latency_ms, rows = series.len(), "fetched price history");
                FetchOutcome::Found {
                    series: Arc::new(series),
                }
            }
            Err(error) => {
                warn!(
                    %query,
                    %provider,
                    latency_ms,
                    code = error.code(),
                    %error,
                    "price history fetch failed"
                );
                FetchOutcome::Failed {
                    message: error.message().to_owned(),
                }
            }
        }
    }
}
