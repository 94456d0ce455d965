//! Dashboard render plan.
//!
//! A page request is resolved into a [`FormState`], then [`build_plan`]
//! turns it into a [`RenderPlan`]: the ordered sidebar and main-area
//! elements a front end should draw. An invalid date range short-circuits
//! the plan with [`PlanStatus::Halted`] before any fetch happens.
//!
//! ```text
//! DashboardInput ──resolve──▶ FormState ──build_plan──▶ RenderPlan
//!                                              │
//!                                              ▼
//!                                      MemoizedFetcher
//! ```

use serde::Serialize;
use time::{Date, Duration};
use tracing::debug;

use crate::domain::format_date;
use crate::fetch::{FetchOutcome, MemoizedFetcher};
use crate::{Bar, PriceSeries, Query, Symbol};

pub const DEFAULT_TICKER: &str = "AAPL";
pub const DEFAULT_LOOKBACK_DAYS: u32 = 365;
pub const DEFAULT_TAIL_ROWS: usize = 5;

pub const SIDEBAR_HEADER: &str = "Stock data settings";
pub const TICKER_LABEL: &str = "Ticker (e.g. AAPL, 005930.KS)";
pub const START_LABEL: &str = "Start date";
pub const END_LABEL: &str = "End date";
pub const INVALID_RANGE_MESSAGE: &str = "⚠️ The start date must be before the end date.";
pub const FOOTER_MARKDOWN: &str = "**Note:** US stocks use the bare ticker. Korean stocks need \
the listing code followed by `.KS` (KOSPI) or `.KQ` (KOSDAQ). (e.g. Samsung Electronics -> 005930.KS)";

/// Knobs an operator can change without touching the flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardSettings {
    pub default_ticker: String,
    pub lookback_days: u32,
    pub tail_rows: usize,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            default_ticker: DEFAULT_TICKER.to_owned(),
            lookback_days: DEFAULT_LOOKBACK_DAYS,
            tail_rows: DEFAULT_TAIL_ROWS,
        }
    }
}

/// Raw control values; `None` means the control was left at its default.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DashboardInput {
    pub ticker: Option<String>,
    pub start: Option<Date>,
    pub end: Option<Date>,
}

/// Control values after defaults are applied, echoed back into the form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormState {
    pub ticker: String,
    #[serde(with = "crate::domain::date::iso")]
    pub start: Date,
    #[serde(with = "crate::domain::date::iso")]
    pub end: Date,
}

impl FormState {
    /// Apply defaults: ticker from settings, `end = today`,
    /// `start = today - lookback_days`. The ticker is trimmed and upper-cased.
    pub fn resolve(input: DashboardInput, today: Date, settings: &DashboardSettings) -> Self {
        let ticker = input
            .ticker
            .unwrap_or_else(|| settings.default_ticker.clone())
            .trim()
            .to_uppercase();
        let start = input
            .start
            .unwrap_or_else(|| lookback_start(today, settings.lookback_days));
        let end = input.end.unwrap_or(today);

        Self { ticker, start, end }
    }
}

/// `today - days`, clamped to the earliest representable date.
fn lookback_start(today: Date, days: u32) -> Date {
    today.saturating_sub(Duration::days(i64::from(days)))
}

/// One `(date, value)` sample of a chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPoint {
    #[serde(with = "crate::domain::date::iso")]
    pub date: Date,
    pub value: f64,
}

/// A single date-indexed numeric column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSeries {
    pub label: String,
    pub points: Vec<ChartPoint>,
}

impl ChartSeries {
    fn from_points(label: &str, points: Vec<(Date, f64)>) -> Self {
        Self {
            label: label.to_owned(),
            points: points
                .into_iter()
                .map(|(date, value)| ChartPoint { date, value })
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// A row of the recent-close table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CloseRow {
    #[serde(with = "crate::domain::date::iso")]
    pub date: Date,
    pub close: f64,
}

/// Something the front end draws, in order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Element {
    Title { text: String },
    Header { text: String },
    Subheader { text: String },
    CloseTable { symbol: String, rows: Vec<CloseRow> },
    LineChart { series: ChartSeries },
    BarChart { series: ChartSeries },
    Error { text: String },
    Warning { text: String },
    Markdown { text: String },
    Divider,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanStatus {
    Rendered,
    /// Rendering stopped at a validation error; nothing follows it.
    Halted,
}

/// Everything one page request renders.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderPlan {
    pub form: FormState,
    pub sidebar: Vec<Element>,
    pub main: Vec<Element>,
    pub status: PlanStatus,
}

impl RenderPlan {
    pub fn is_halted(&self) -> bool {
        self.status == PlanStatus::Halted
    }

    /// All elements, sidebar first.
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.sidebar.iter().chain(self.main.iter())
    }
}

/// Build the plan for `form`.
///
/// Steps: validate the range (halting on failure), fetch through the memo
/// cache, lay out the data widgets or the not-found warning, then append the
/// help footer.
pub async fn build_plan(
    form: FormState,
    fetcher: &MemoizedFetcher,
    settings: &DashboardSettings,
) -> RenderPlan {
    let mut sidebar = vec![Element::Header {
        text: SIDEBAR_HEADER.to_owned(),
    }];

    if form.start >= form.end {
        debug!(
            start = %format_date(form.start),
            end = %format_date(form.end),
            "halting on invalid date range"
        );
        sidebar.push(Element::Error {
            text: INVALID_RANGE_MESSAGE.to_owned(),
        });
        return RenderPlan {
            form,
            sidebar,
            main: Vec::new(),
            status: PlanStatus::Halted,
        };
    }

    let outcome = match Symbol::parse(&form.ticker) {
        Ok(symbol) => match Query::new(symbol, form.start, form.end) {
            Ok(query) => fetcher.fetch(&query).await,
            Err(error) => FetchOutcome::Failed {
                message: error.to_string(),
            },
        },
        Err(error) => FetchOutcome::Failed {
            message: error.to_string(),
        },
    };

    let main = match &outcome {
        FetchOutcome::Found { series } => data_elements(&form, series, settings.tail_rows),
        FetchOutcome::Empty => vec![not_found_warning(&form.ticker)],
        FetchOutcome::Failed { message } => vec![
            Element::Error {
                text: format!("An error occurred while fetching data: {message}"),
            },
            not_found_warning(&form.ticker),
        ],
    };

    sidebar.push(Element::Divider);
    sidebar.push(Element::Markdown {
        text: FOOTER_MARKDOWN.to_owned(),
    });

    RenderPlan {
        form,
        sidebar,
        main,
        status: PlanStatus::Rendered,
    }
}

fn data_elements(form: &FormState, series: &PriceSeries, tail_rows: usize) -> Vec<Element> {
    vec![
        Element::Title {
            text: format!("{} stock price analysis", form.ticker),
        },
        Element::Subheader {
            text: String::from("Close"),
        },
        Element::CloseTable {
            symbol: series.symbol.to_string(),
            rows: series.tail(tail_rows).iter().map(close_row).collect(),
        },
        Element::Subheader {
            text: format!(
                "Closing price from {} to {}",
                format_date(form.start),
                format_date(form.end)
            ),
        },
        Element::LineChart {
            series: ChartSeries::from_points("Close", series.close_points()),
        },
        Element::Subheader {
            text: String::from("Trading volume (Volume)"),
        },
        Element::BarChart {
            series: ChartSeries::from_points("Volume", series.volume_points()),
        },
    ]
}

fn close_row(bar: &Bar) -> CloseRow {
    CloseRow {
        date: bar.date,
        close: bar.close,
    }
}

fn not_found_warning(ticker: &str) -> Element {
    Element::Warning {
        text: format!("No stock data found for '{ticker}'. Please check the ticker symbol."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn resolve_applies_defaults() {
        let form = FormState::resolve(
            DashboardInput::default(),
            date!(2024 - 03 - 01),
            &DashboardSettings::default(),
        );

        assert_eq!(form.ticker, "AAPL");
        assert_eq!(form.end, date!(2024 - 03 - 01));
        assert_eq!(form.start, date!(2023 - 03 - 02));
    }

    #[test]
    fn huge_lookback_clamps_instead_of_overflowing() {
        let settings = DashboardSettings {
            lookback_days: u32::MAX,
            ..DashboardSettings::default()
        };
        let form = FormState::resolve(DashboardInput::default(), date!(2024 - 03 - 01), &settings);

        assert_eq!(form.start, Date::MIN);
        assert!(form.start < form.end);
    }

    #[test]
    fn resolve_normalizes_ticker_case() {
        let input = DashboardInput {
            ticker: Some(String::from(" 005930.ks ")),
            ..DashboardInput::default()
        };
        let form = FormState::resolve(input, date!(2024 - 03 - 01), &DashboardSettings::default());
        assert_eq!(form.ticker, "005930.KS");
    }

    #[test]
    fn elements_serialize_with_kind_tag() {
        let value = serde_json::to_value(Element::Warning {
            text: String::from("w"),
        })
        .expect("serializes");
        assert_eq!(value, serde_json::json!({"kind": "warning", "text": "w"}));

        let divider = serde_json::to_value(Element::Divider).expect("serializes");
        assert_eq!(divider, serde_json::json!({"kind": "divider"}));
    }
}
