//! # Stockboard Core
//!
//! Domain types and the data pipeline behind the stockboard dashboard.
//!
//! ## Overview
//!
//! - **Domain models** for tickers, date-range queries, and daily OHLCV bars
//! - **Price source trait** with a Yahoo Finance adapter and an offline source
//! - **Memoized fetcher** that contacts a provider at most once per query
//! - **Render plan** describing what a front end draws for one request
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`adapters`] | Provider adapters (Yahoo, synthetic) |
//! | [`cache`] | Process-lifetime memo table |
//! | [`dashboard`] | Input resolution and render plan |
//! | [`data_source`] | Price source trait and error type |
//! | [`domain`] | Domain models (Symbol, Query, Bar, PriceSeries) |
//! | [`error`] | Validation errors |
//! | [`fetch`] | Memoized fetch and its outcome type |
//! | [`http_client`] | HTTP client abstraction |
//! | [`source`] | Provider identifiers |
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │  Web driver     │
//! └────────┬────────┘
//!          │ FormState
//!          ▼
//! ┌─────────────────┐     ┌──────────────────┐
//! │  build_plan     │────▶│ MemoizedFetcher  │
//! └────────┬────────┘     └────────┬─────────┘
//!          │                       │ cache miss
//!          ▼                       ▼
//! ┌─────────────────┐     ┌──────────────────┐
//! │  RenderPlan     │     │ PriceSource      │
//! └─────────────────┘     │ (Yahoo/synthetic)│
//!                         └──────────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use stockboard_core::{build_plan, DashboardInput, DashboardSettings, FormState,
//!     MemoizedFetcher, SyntheticSource, today_utc};
//!
//! #[tokio::main]
//! async fn main() {
//!     let settings = DashboardSettings::default();
//!     let fetcher = MemoizedFetcher::new(Arc::new(SyntheticSource));
//!     let form = FormState::resolve(DashboardInput::default(), today_utc(), &settings);
//!     let plan = build_plan(form, &fetcher, &settings).await;
//!     println!("{}", serde_json::to_string_pretty(&plan).unwrap());
//! }
//! ```

pub mod adapters;
pub mod cache;
pub mod dashboard;
pub mod data_source;
pub mod domain;
pub mod error;
pub mod fetch;
pub mod http_client;
pub mod source;

// Adapter implementations
pub use adapters::{SyntheticSource, YahooAdapter};

// Caching
pub use cache::{CacheLookup, MemoCache};

// Dashboard plan
pub use dashboard::{
    build_plan, ChartPoint, ChartSeries, CloseRow, DashboardInput, DashboardSettings, Element,
    FormState, PlanStatus, RenderPlan,
};

// Data source trait and errors
pub use data_source::{PriceSource, SourceError, SourceErrorKind};

// Domain models
pub use domain::{format_date, parse_date, today_utc, Bar, PriceSeries, Query, Symbol};

// Error types
pub use error::ValidationError;

// Memoized fetch
pub use fetch::{FetchOutcome, MemoizedFetcher};

// HTTP client types
pub use http_client::{HttpClient, HttpError, HttpRequest, HttpResponse, ReqwestHttpClient};

// Source identifiers
pub use source::ProviderId;
