//! Pure format validators for dates, times, and phone numbers.
//!
//! No state, no side effects — failures are expressed purely as boolean
//! results (or `None` from the parse helpers), never as errors.

use chrono::{NaiveDate, NaiveTime};

/// Fixed calendar date format: day/month/year.
pub const DATE_FMT: &str = "%d/%m/%Y";

/// Fixed 24-hour time format: hour:minute.
pub const TIME_FMT: &str = "%H:%M";

/// Parse a date string under [`DATE_FMT`].
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, DATE_FMT).ok()
}

/// Parse a time string under [`TIME_FMT`].
pub fn parse_time(s: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(s, TIME_FMT).ok()
}

/// True iff `s` parses as a calendar date in DD/MM/YYYY form.
pub fn valid_date(s: &str) -> bool {
    parse_date(s).is_some()
}

/// True iff `s` parses as a 24-hour HH:MM time.
pub fn valid_time(s: &str) -> bool {
    parse_time(s).is_some()
}

/// True if `s` is empty (phone is optional), else true iff the digit-only
/// projection of `s` has exactly 9 digits.
pub fn valid_phone(s: &str) -> bool {
    if s.is_empty() {
        return true;
    }
    s.chars().filter(|c| c.is_ascii_digit()).count() == 9
}
