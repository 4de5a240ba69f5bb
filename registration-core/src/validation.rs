//! Identifier format checks run before step advance and submission.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // ASCII classes on purpose: `\d` would also accept non-ASCII digits.
    static ref AADHAAR_PATTERN: Regex =
        Regex::new(r"^[0-9]{12}$").expect("aadhaar pattern compiles");
    static ref PAN_PATTERN: Regex =
        Regex::new(r"^[A-Z]{5}[0-9]{4}[A-Z]$").expect("pan pattern compiles");
}

/// Exactly 12 decimal digits.
pub fn is_valid_aadhaar(value: &str) -> bool {
    AADHAAR_PATTERN.is_match(value)
}

/// 5 uppercase letters, 4 digits, 1 uppercase letter.
pub fn is_valid_pan(value: &str) -> bool {
    PAN_PATTERN.is_match(value)
}
