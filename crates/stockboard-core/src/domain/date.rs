use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{Date, OffsetDateTime, Time};

use crate::ValidationError;

const ISO_DATE: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]");

/// Parse a calendar date in `YYYY-MM-DD` form.
pub fn parse_date(input: &str) -> Result<Date, ValidationError> {
    Date::parse(input.trim(), ISO_DATE).map_err(|_| ValidationError::InvalidDate {
        value: input.to_owned(),
    })
}

/// Render a calendar date as `YYYY-MM-DD`.
pub fn format_date(date: Date) -> String {
    format!(
        "{:04}-{:02}-{:02}",
        date.year(),
        u8::from(date.month()),
        date.day()
    )
}

/// Current calendar date in UTC.
pub fn today_utc() -> Date {
    OffsetDateTime::now_utc().date()
}

/// Unix seconds at 00:00 UTC of `date`.
pub fn unix_midnight(date: Date) -> i64 {
    date.with_time(Time::MIDNIGHT).assume_utc().unix_timestamp()
}

/// Serde adapter that keeps dates as `YYYY-MM-DD` strings on the wire.
pub mod iso {
    use serde::de::Error as DeError;
    use serde::{Deserialize, Deserializer, Serializer};
    use time::Date;

    pub fn serialize<S>(date: &Date, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&super::format_date(*date))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Date, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        super::parse_date(&value).map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn parses_iso_dates() {
        assert_eq!(parse_date("2023-01-01").expect("must parse"), date!(2023 - 01 - 01));
        assert_eq!(parse_date(" 2024-02-29 ").expect("leap day"), date!(2024 - 02 - 29));
    }

    #[test]
    fn rejects_malformed_dates() {
        for raw in ["2023-13-01", "2023/01/01", "", "yesterday"] {
            let err = parse_date(raw).expect_err("must fail");
            assert!(matches!(err, ValidationError::InvalidDate { .. }));
        }
    }

    #[test]
    fn formats_with_zero_padding() {
        assert_eq!(format_date(date!(2023 - 06 - 01)), "2023-06-01");
    }

    #[test]
    fn midnight_is_utc_epoch_seconds() {
        assert_eq!(unix_midnight(date!(1970 - 01 - 02)), 86_400);
        assert_eq!(unix_midnight(date!(2023 - 01 - 01)), 1_672_531_200);
    }
}
