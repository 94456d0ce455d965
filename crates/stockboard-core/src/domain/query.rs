use std::fmt::{Display, Formatter};

use serde::Serialize;
use time::Date;

use crate::domain::date::format_date;
use crate::{Symbol, ValidationError};

/// One dashboard lookup: a ticker over `[start, end)`.
///
/// `start < end` holds for every constructed value, which makes a `Query`
/// safe to hand to a provider and usable as a memoization key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Query {
    symbol: Symbol,
    #[serde(with = "crate::domain::date::iso")]
    start: Date,
    #[serde(with = "crate::domain::date::iso")]
    end: Date,
}

impl Query {
    pub fn new(symbol: Symbol, start: Date, end: Date) -> Result<Self, ValidationError> {
        if start >= end {
            return Err(ValidationError::InvalidDateRange {
                start: format_date(start),
                end: format_date(end),
            });
        }

        Ok(Self { symbol, start, end })
    }

    pub fn symbol(&self) -> &Symbol {
        &self.symbol
    }

    pub const fn start(&self) -> Date {
        self.start
    }

    pub const fn end(&self) -> Date {
        self.end
    }
}

impl Display for Query {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {}..{}",
            self.symbol,
            format_date(self.start),
            format_date(self.end)
        )
    }
}
