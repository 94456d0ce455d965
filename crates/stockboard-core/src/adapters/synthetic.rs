use std::future::Future;
use std::pin::Pin;

use time::{Duration, Weekday};

use crate::data_source::{PriceSource, SourceError};
use crate::{Bar, PriceSeries, ProviderId, Query, Symbol};

/// Tickers the offline source knows about; anything else is "not found".
pub const SYNTHETIC_CATALOG: [&str; 5] = ["AAPL", "MSFT", "SPY", "QQQ", "005930.KS"];

/// Deterministic offline provider for demos and tests.
///
/// Prices are derived from the symbol alone, so the same query always
/// produces the same bars. Weekends are skipped.
#[derive(Debug, Clone, Copy, Default)]
pub struct SyntheticSource;

impl SyntheticSource {
    pub fn knows(symbol: &Symbol) -> bool {
        SYNTHETIC_CATALOG.contains(&symbol.as_str())
    }

    fn generate(query: &Query) -> Result<PriceSeries, SourceError> {
        let symbol = query.symbol();
        if !Self::knows(symbol) {
            return Ok(PriceSeries::empty(symbol.clone()));
        }

        let seed = symbol_seed(symbol);
        let mut bars = Vec::new();
        let mut date = query.start();

        while date < query.end() {
            if !matches!(date.weekday(), Weekday::Saturday | Weekday::Sunday) {
                let index = bars.len() as u64;
                let base = 90.0 + (seed.wrapping_add(index) % 350) as f64 / 10.0;
                let bar = Bar::new(
                    date,
                    base,
                    base + 1.20,
                    base - 0.80,
                    base + 0.30,
                    Some(20_000 + (seed.wrapping_add(index * 37) % 5_000) * 25),
                )
                .map_err(|e| SourceError::internal(e.to_string()))?;
                bars.push(bar);
            }
            date += Duration::days(1);
        }

        Ok(PriceSeries::new(symbol.clone(), bars))
    }
}

impl PriceSource for SyntheticSource {
    fn id(&self) -> ProviderId {
        ProviderId::Synthetic
    }

    fn daily_bars<'a>(
        &'a self,
        query: &'a Query,
    ) -> Pin<Box<dyn Future<Output = Result<PriceSeries, SourceError>> + Send + 'a>> {
        Box::pin(async move { Self::generate(query) })
    }
}

fn symbol_seed(symbol: &Symbol) -> u64 {
    symbol.as_str().bytes().fold(0_u64, |acc, byte| {
        acc.wrapping_mul(33).wrapping_add(u64::from(byte))
    })
}
