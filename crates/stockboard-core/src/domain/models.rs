use serde::{Deserialize, Serialize};
use time::Date;

use crate::{Symbol, ValidationError};

/// Daily OHLCV record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    #[serde(with = "crate::domain::date::iso")]
    pub date: Date,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: Option<u64>,
}

impl Bar {
    pub fn new(
        date: Date,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: Option<u64>,
    ) -> Result<Self, ValidationError> {
        validate_non_negative("open", open)?;
        validate_non_negative("high", high)?;
        validate_non_negative("low", low)?;
        validate_non_negative("close", close)?;

        if high < low {
            return Err(ValidationError::InvalidBarRange);
        }

        if open < low || open > high || close < low || close > high {
            return Err(ValidationError::InvalidBarBounds);
        }

        Ok(Self {
            date,
            open,
            high,
            low,
            close,
            volume,
        })
    }

    /// Bar as a provider reported it. No bounds are enforced; only rows
    /// carrying a non-finite price are rejected.
    pub fn observed(
        date: Date,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: Option<u64>,
    ) -> Option<Self> {
        [open, high, low, close]
            .iter()
            .all(|value| value.is_finite())
            .then_some(Self {
                date,
                open,
                high,
                low,
                close,
                volume,
            })
    }
}

/// Date-ordered daily bars for one symbol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceSeries {
    pub symbol: Symbol,
    pub bars: Vec<Bar>,
}

impl PriceSeries {
    /// Build a series ordered by date. The sort is stable and no bar is dropped.
    pub fn new(symbol: Symbol, mut bars: Vec<Bar>) -> Self {
        bars.sort_by_key(|bar| bar.date);
        Self { symbol, bars }
    }

    pub fn empty(symbol: Symbol) -> Self {
        Self {
            symbol,
            bars: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    /// The last `n` bars, oldest first.
    pub fn tail(&self, n: usize) -> &[Bar] {
        let start = self.bars.len().saturating_sub(n);
        &self.bars[start..]
    }

    pub fn close_points(&self) -> Vec<(Date, f64)> {
        self.bars.iter().map(|bar| (bar.date, bar.close)).collect()
    }

    /// Volume per bar; a missing volume is reported as zero.
    pub fn volume_points(&self) -> Vec<(Date, f64)> {
        self.bars
            .iter()
            .map(|bar| (bar.date, bar.volume.unwrap_or(0) as f64))
            .collect()
    }
}

fn validate_non_negative(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::NonFiniteValue { field });
    }
    if value < 0.0 {
        return Err(ValidationError::NegativeValue { field });
    }
    Ok(())
}
