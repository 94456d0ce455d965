use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use serde::Deserialize;
use time::OffsetDateTime;
use tracing::{debug, warn};

use crate::data_source::{PriceSource, SourceError};
use crate::domain::unix_midnight;
use crate::http_client::{HttpClient, HttpRequest, ReqwestHttpClient, DEFAULT_TIMEOUT_MS};
use crate::{Bar, PriceSeries, ProviderId, Query, Symbol};

pub const DEFAULT_BASE_URL: &str = "https://query2.finance.yahoo.com";

const REFERER: &str = "https://finance.yahoo.com/";
const NOT_FOUND_CODE: &str = "Not Found";

/// Yahoo Finance chart adapter for daily history.
#[derive(Clone)]
pub struct YahooAdapter {
    http_client: Arc<dyn HttpClient>,
    base_url: String,
    timeout_ms: u64,
}

impl Default for YahooAdapter {
    fn default() -> Self {
        Self::with_http_client(Arc::new(ReqwestHttpClient::new()))
    }
}

impl YahooAdapter {
    pub fn with_http_client(http_client: Arc<dyn HttpClient>) -> Self {
        Self {
            http_client,
            base_url: DEFAULT_BASE_URL.to_owned(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_owned();
        self
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Chart endpoint for `query`; `period2` is exclusive.
    pub fn chart_endpoint(&self, query: &Query) -> String {
        format!(
            "{}/v8/finance/chart/{}?period1={}&period2={}&interval=1d&events=history&includeAdjustedClose=true",
            self.base_url,
            urlencoding::encode(query.symbol().as_str()),
            unix_midnight(query.start()),
            unix_midnight(query.end()),
        )
    }

    async fn fetch_chart(&self, query: &Query) -> Result<PriceSeries, SourceError> {
        let endpoint = self.chart_endpoint(query);
        debug!(%query, %endpoint, "requesting yahoo chart");

        let request = HttpRequest::get(endpoint)
            .with_header("referer", REFERER)
            .with_timeout_ms(self.timeout_ms);

        let response = self.http_client.execute(request).await.map_err(|e| {
            SourceError::unavailable(format!("yahoo transport error: {}", e.message()))
        })?;

        if response.is_success() {
            return parse_chart_response(query.symbol(), &response.body);
        }

        // Unknown tickers come back as 404 with a structured chart error.
        if response.status == 404 {
            if let Ok(series) = parse_chart_response(query.symbol(), &response.body) {
                return Ok(series);
            }
        }

        warn!(%query, status = response.status, "yahoo chart request failed");
        if response.status == 400 {
            return Err(SourceError::invalid_request(format!(
                "yahoo rejected the request with status {}",
                response.status
            )));
        }
        Err(SourceError::unavailable(format!(
            "yahoo returned status {}",
            response.status
        )))
    }
}

impl PriceSource for YahooAdapter {
    fn id(&self) -> ProviderId {
        ProviderId::Yahoo
    }

    fn daily_bars<'a>(
        &'a self,
        query: &'a Query,
    ) -> Pin<Box<dyn Future<Output = Result<PriceSeries, SourceError>> + Send + 'a>> {
        Box::pin(self.fetch_chart(query))
    }
}

/// Normalize a chart payload into a series.
///
/// A "Not Found" chart error and a result without timestamps both yield an
/// empty series. Rows missing any OHLC value are dropped; every other row is
/// kept exactly as the provider reported it.
pub fn parse_chart_response(symbol: &Symbol, body: &str) -> Result<PriceSeries, SourceError> {
    let response: YahooChartResponse = serde_json::from_str(body)
        .map_err(|e| SourceError::internal(format!("failed to parse yahoo chart: {e}")))?;

    if let Some(error) = response.chart.error {
        if error.code == NOT_FOUND_CODE {
            return Ok(PriceSeries::empty(symbol.clone()));
        }
        return Err(SourceError::unavailable(format!(
            "yahoo chart API error: {}: {}",
            error.code,
            error.description.unwrap_or_default()
        )));
    }

    let Some(result) = response.chart.result.and_then(|results| results.into_iter().next())
    else {
        return Ok(PriceSeries::empty(symbol.clone()));
    };

    let gmt_offset = result.meta.map(|meta| meta.gmtoffset).unwrap_or(0);
    let first_quote = result.indicators.quote.into_iter().next();
    let (Some(timestamps), Some(quote)) = (result.timestamp, first_quote) else {
        return Ok(PriceSeries::empty(symbol.clone()));
    };

    let mut bars = Vec::with_capacity(timestamps.len());
    for (i, &ts) in timestamps.iter().enumerate() {
        let (Some(Some(open)), Some(Some(high)), Some(Some(low)), Some(Some(close))) = (
            quote.open.get(i),
            quote.high.get(i),
            quote.low.get(i),
            quote.close.get(i),
        ) else {
            continue;
        };

        // Bars are stamped at the session open; the exchange offset keeps the trading day.
        let date = OffsetDateTime::from_unix_timestamp(ts + gmt_offset)
            .map_err(|e| SourceError::internal(format!("invalid timestamp {ts}: {e}")))?
            .date();
        let volume = quote
            .volume
            .get(i)
            .copied()
            .flatten()
            .and_then(|v| u64::try_from(v).ok());

        // Rows are kept as reported; Yahoo closes can sit just outside [low, high].
        match Bar::observed(date, *open, *high, *low, *close, volume) {
            Some(bar) => bars.push(bar),
            None => debug!(%symbol, ts, "dropping yahoo row with non-finite price"),
        }
    }

    Ok(PriceSeries::new(symbol.clone(), bars))
}

#[derive(Debug, Clone, Deserialize)]
struct YahooChartResponse {
    chart: YahooChartData,
}

#[derive(Debug, Clone, Deserialize)]
struct YahooChartData {
    #[serde(default)]
    result: Option<Vec<YahooChartResult>>,
    #[serde(default)]
    error: Option<YahooChartError>,
}

#[derive(Debug, Clone, Deserialize)]
struct YahooChartError {
    code: String,
    #[serde(default)]
    description: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct YahooChartResult {
    #[serde(default)]
    meta: Option<YahooChartMeta>,
    #[serde(default)]
    timestamp: Option<Vec<i64>>,
    indicators: YahooChartIndicators,
}

#[derive(Debug, Clone, Deserialize)]
struct YahooChartMeta {
    #[serde(default)]
    gmtoffset: i64,
}

#[derive(Debug, Clone, Deserialize)]
struct YahooChartIndicators {
    #[serde(default)]
    quote: Vec<YahooChartQuote>,
}

#[derive(Debug, Clone, Deserialize)]
struct YahooChartQuote {
    #[serde(default)]
    open: Vec<Option<f64>>,
    #[serde(default)]
    high: Vec<Option<f64>>,
    #[serde(default)]
    low: Vec<Option<f64>>,
    #[serde(default)]
    close: Vec<Option<f64>>,
    #[serde(default)]
    volume: Vec<Option<i64>>,
}
