//! Calendar-date helpers for the `YYYY-MM-DD` strings stored in the dataset.
//!
//! Measurement dates are kept as TEXT so that range filters can use plain
//! string comparison. Every handler that accepts or derives a date goes
//! through [`parse_date`] so malformed input surfaces as a typed error
//! instead of an unhandled fault.

use time::{format_description::BorrowedFormatItem, macros::format_description, util, Date, Month};

const DATE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("'{input}' is not a valid YYYY-MM-DD date: {source}")]
    Parse {
        input: String,
        source: time::error::Parse,
    },
    #[error("failed to format date: {0}")]
    Format(#[from] time::error::Format),
}

/// Parse a `YYYY-MM-DD` string into a typed date.
pub fn parse_date(input: &str) -> Result<Date, Error> {
    Date::parse(input, DATE_FORMAT).map_err(|source| Error::Parse {
        input: input.to_owned(),
        source,
    })
}

/// Format a date back into the dataset's `YYYY-MM-DD` form.
pub fn format_date(date: Date) -> Result<String, Error> {
    Ok(date.format(DATE_FORMAT)?)
}

/// Month-aware subtraction, not a fixed number of days.
///
/// The day is clamped to the length of the target month, so
/// 2017-03-31 minus 6 months is 2016-09-30.
pub fn months_back(date: Date, months: i32) -> Date {
    let total = date.year() * 12 + i32::from(date.month() as u8) - 1 - months;
    let year = total.div_euclid(12);
    let month =
        Month::try_from((total.rem_euclid(12) + 1) as u8).expect("rem_euclid(12) + 1 is in 1..=12");
    let day = date.day().min(util::days_in_year_month(year, month));
    Date::from_calendar_date(year, month, day).expect("day is clamped to the month length")
}
