//! Price source trait and its error type.
//!
//! This module defines the adapter contract ([`PriceSource`]) every market-data
//! provider implements. The dashboard only ever asks one question of a
//! provider: the daily bars for a [`Query`].
//!
//! # Example
//!
//! ```rust,ignore
//! use stockboard_core::{PriceSource, Query, SourceError, YahooAdapter};
//!
//! async fn closes(adapter: &YahooAdapter, query: &Query) -> Result<(), SourceError> {
//!     let series = adapter.daily_bars(query).await?;
//!     for bar in &series.bars {
//!         println!("{}: {:.2}", bar.date, bar.close);
//!     }
//!     Ok(())
//! }
//! ```

use std::fmt::{Display, Formatter};
use std::future::Future;
use std::pin::Pin;

use crate::{PriceSeries, ProviderId, Query};

/// Adapter-level error classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceErrorKind {
    Unavailable,
    InvalidRequest,
    Internal,
}

/// Structured provider error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceError {
    kind: SourceErrorKind,
    message: String,
}

impl SourceError {
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::Unavailable,
            message: message.into(),
        }
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::InvalidRequest,
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::Internal,
            message: message.into(),
        }
    }

    pub const fn kind(&self) -> SourceErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub const fn code(&self) -> &'static str {
        match self.kind {
            SourceErrorKind::Unavailable => "source.unavailable",
            SourceErrorKind::InvalidRequest => "source.invalid_request",
            SourceErrorKind::Internal => "source.internal",
        }
    }
}

impl Display for SourceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.message, self.code())
    }
}

impl std::error::Error for SourceError {}

/// Market-data provider contract.
///
/// Implementations must be `Send + Sync`; one instance is shared by every
/// request the server handles.
pub trait PriceSource: Send + Sync {
    /// Returns the provider identifier used in logs.
    fn id(&self) -> ProviderId;

    /// Fetches daily OHLCV bars for `query.symbol()` over `[start, end)`.
    ///
    /// An unknown ticker is not an error: providers report it as an empty
    /// series.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] when the provider is unreachable, answers
    /// with a non-success status, or sends a payload that cannot be parsed.
    fn daily_bars<'a>(
        &'a self,
        query: &'a Query,
    ) -> Pin<Box<dyn Future<Output = Result<PriceSeries, SourceError>> + Send + 'a>>;
}
