//! Format matrix for the pure date/time/phone validators.

use agenda_core::validate::{parse_date, parse_time, valid_date, valid_phone, valid_time};

#[test]
fn accepts_well_formed_dates() {
    assert!(valid_date("01/01/2025"));
    assert!(valid_date("31/12/1999"));
    assert!(valid_date("29/02/2024")); // leap day
}

#[test]
fn rejects_malformed_dates() {
    assert!(!valid_date(""));
    assert!(!valid_date("2025-01-01")); // ISO order, wrong separators
    assert!(!valid_date("01-01-2025"));
    assert!(!valid_date("31/02/2025")); // no such calendar day
    assert!(!valid_date("29/02/2025")); // not a leap year
    assert!(!valid_date("99/99/9999"));
    assert!(!valid_date("01/01/2025 extra"));
}

#[test]
fn accepts_well_formed_times() {
    assert!(valid_time("00:00"));
    assert!(valid_time("09:00"));
    assert!(valid_time("23:59"));
}

#[test]
fn rejects_malformed_times() {
    assert!(!valid_time(""));
    assert!(!valid_time("24:00"));
    assert!(!valid_time("09:60"));
    assert!(!valid_time("0900"));
    assert!(!valid_time("09:00:00"));
    assert!(!valid_time("noon"));
}

#[test]
fn phone_is_optional_but_nine_digits_when_present() {
    assert!(valid_phone(""));
    assert!(valid_phone("600112233"));
    // Separators are stripped before counting.
    assert!(valid_phone("600-112-233"));
    assert!(valid_phone("600 112 233"));
}

#[test]
fn rejects_phones_without_exactly_nine_digits() {
    assert!(!valid_phone("12345678")); // 8 digits
    assert!(!valid_phone("1234567890")); // 10 digits
    assert!(!valid_phone("+34 600112233")); // prefix digits count too
    assert!(!valid_phone("telephone"));
}

#[test]
fn parse_helpers_mirror_the_validators() {
    assert!(parse_date("01/01/2025").is_some());
    assert!(parse_date("31/02/2025").is_none());
    assert!(parse_time("09:30").is_some());
    assert!(parse_time("25:00").is_none());
}
