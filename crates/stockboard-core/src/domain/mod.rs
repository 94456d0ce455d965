//! # Domain Models
//!
//! Canonical domain types for the dashboard.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Symbol`] | Validated, upper-cased ticker |
//! | [`Query`] | Ticker plus an ordered date range |
//! | [`Bar`] | Daily OHLCV record |
//! | [`PriceSeries`] | Date-ordered bars for one symbol |
//!
//! All types enforce their invariants at construction time:
//!
//! ```rust
//! use stockboard_core::{Query, Symbol, ValidationError};
//! use time::macros::date;
//!
//! let symbol = Symbol::parse("005930.ks")?;
//! assert_eq!(symbol.as_str(), "005930.KS");
//!
//! let reversed = Query::new(symbol, date!(2023 - 06 - 01), date!(2023 - 01 - 01));
//! assert!(matches!(reversed, Err(ValidationError::InvalidDateRange { .. })));
//! # Ok::<(), ValidationError>(())
//! ```

pub mod date;
mod models;
mod query;
mod symbol;

pub use date::{format_date, parse_date, today_utc, unix_midnight};
pub use models::{Bar, PriceSeries};
pub use query::Query;
pub use symbol::Symbol;
