//! Field rules shared by the doctor, hospital and login forms.

use chrono::{DateTime, NaiveDate, NaiveTime};
use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("static regex is valid")
});

pub const PASSWORD_MIN_LEN: usize = 8;
pub const USERNAME_MIN_LEN: usize = 4;
pub const USERNAME_MAX_LEN: usize = 20;

pub fn is_valid_email(email: &str) -> bool {
    EMAIL.is_match(email) && email.len() <= 254
}

/// Returns every password-strength message that applies, in form order.
pub fn password_issues(password: &str) -> Vec<&'static str> {
    let mut issues = Vec::new();

    if password.chars().count() < PASSWORD_MIN_LEN {
        issues.push("Password must be at least 8 characters long");
    }
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        issues.push("Password must contain at least one uppercase letter");
    }
    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        issues.push("Password must contain at least one lowercase letter");
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        issues.push("Password must contain at least one number");
    }
    if password.chars().all(|c| c.is_ascii_alphanumeric()) {
        issues.push("Password must contain at least one special character");
    }

    issues
}

/// Username messages in form order; an empty name gets both the required
/// and the minimum-length message.
pub fn username_issues(username: &str) -> Vec<&'static str> {
    let len = username.chars().count();
    let mut issues = Vec::new();

    if len == 0 {
        issues.push("Username is required");
    }
    if len < USERNAME_MIN_LEN {
        issues.push("Username must be at least 4 characters");
    }
    if len > USERNAME_MAX_LEN {
        issues.push("Username must be at most 20 characters");
    }

    issues
}

pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Parses a wall-clock time in `HH:MM` or `HH:MM:SS` form.
pub fn parse_time_of_day(value: &str) -> Option<NaiveTime> {
    let value = value.trim();
    NaiveTime::parse_from_str(value, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M:%S"))
        .ok()
}

/// Parses an ISO calendar date; full RFC 3339 timestamps are cut to their date.
pub fn parse_iso_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(value) {
        return Some(timestamp.date_naive());
    }
    value
        .get(..10)
        .filter(|_| value.as_bytes().get(10).is_some_and(|b| *b == b'T' || *b == b' '))
        .and_then(|prefix| NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok())
}
