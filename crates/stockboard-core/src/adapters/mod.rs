mod synthetic;
mod yahoo;

pub use synthetic::{SyntheticSource, SYNTHETIC_CATALOG};
pub use yahoo::{parse_chart_response, YahooAdapter, DEFAULT_BASE_URL};
