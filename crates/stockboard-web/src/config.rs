//! Command-line and environment configuration for the dashboard server.
//!
//! Every flag has an environment fallback so the server can be configured
//! from a unit file or container definition without a wrapper script.
//!
//! | Option | Env | Default |
//! |--------|-----|---------|
//! | `--bind` | `STOCKBOARD_BIND` | `127.0.0.1` |
//! | `--port` | `STOCKBOARD_PORT` | `8501` |
//! | `--provider` | `STOCKBOARD_PROVIDER` | `yahoo` |
//! | `--timeout-ms` | `STOCKBOARD_TIMEOUT_MS` | `10000` |
//! | `--yahoo-base-url` | `STOCKBOARD_YAHOO_BASE_URL` | `https://query2.finance.yahoo.com` |
//! | `--default-ticker` | `STOCKBOARD_DEFAULT_TICKER` | `AAPL` |
//! | `--lookback-days` | `STOCKBOARD_LOOKBACK_DAYS` | `365` (1 to 36500) |
//! | `--tail-rows` | `STOCKBOARD_TAIL_ROWS` | `5` |

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use clap::Parser;
use stockboard_core::adapters::DEFAULT_BASE_URL;
use stockboard_core::dashboard::{DEFAULT_LOOKBACK_DAYS, DEFAULT_TAIL_ROWS, DEFAULT_TICKER};
use stockboard_core::http_client::DEFAULT_TIMEOUT_MS;
use stockboard_core::{DashboardSettings, ProviderId};

const MAX_LOOKBACK_DAYS: i64 = 36_500;

/// Daily stock price dashboard.
///
/// Serves an HTML page with the recent closes, a closing-price line chart,
/// and a volume bar chart for one ticker over a date range.
#[derive(Debug, Clone, Parser)]
#[command(name = "stockboard", author, version, about = "Daily stock price dashboard")]
pub struct Config {
    /// Address to listen on (IPv4 or IPv6).
    #[arg(long, env = "STOCKBOARD_BIND", default_value_t = IpAddr::V4(Ipv4Addr::LOCALHOST))]
    pub bind: IpAddr,

    /// Port to listen on.
    #[arg(long, env = "STOCKBOARD_PORT", default_value_t = 8501)]
    pub port: u16,

    /// Price provider (yahoo, synthetic).
    #[arg(long, env = "STOCKBOARD_PROVIDER", default_value_t = ProviderId::Yahoo)]
    pub provider: ProviderId,

    /// Per-request timeout for provider calls, in milliseconds.
    #[arg(long, env = "STOCKBOARD_TIMEOUT_MS", default_value_t = DEFAULT_TIMEOUT_MS)]
    pub timeout_ms: u64,

    /// Yahoo Finance base URL.
    #[arg(long, env = "STOCKBOARD_YAHOO_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub yahoo_base_url: String,

    /// Ticker shown when the form is first opened.
    #[arg(long, env = "STOCKBOARD_DEFAULT_TICKER", default_value = DEFAULT_TICKER)]
    pub default_ticker: String,

    /// Days between the default start date and today (1 to 36500).
    #[arg(
        long,
        env = "STOCKBOARD_LOOKBACK_DAYS",
        default_value_t = DEFAULT_LOOKBACK_DAYS,
        value_parser = clap::value_parser!(u32).range(1..=MAX_LOOKBACK_DAYS)
    )]
    pub lookback_days: u32,

    /// Rows in the recent-close table.
    #[arg(long, env = "STOCKBOARD_TAIL_ROWS", default_value_t = DEFAULT_TAIL_ROWS)]
    pub tail_rows: usize,
}

impl Config {
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::from((self.bind, self.port))
    }

    pub fn settings(&self) -> DashboardSettings {
        DashboardSettings {
            default_ticker: self.default_ticker.trim().to_uppercase(),
            lookback_days: self.lookback_days,
            tail_rows: self.tail_rows,
        }
    }
}
