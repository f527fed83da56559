//
//  apigee-mint
//  util/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Utility Module
//!
//! Small helpers shared by the command-line front end.
//!
//! ## Categories
//!
//! - **Time Utilities**: [`format_millis`], [`format_relative_millis`], [`parse_date`]
//! - **String Utilities**: [`truncate`], [`mask_secret`]
//!
//! ## Example
//!
//! ```rust
//! use apigee_mint::util::{parse_date, truncate};
//!
//! assert!(parse_date("2026-02-01").is_ok());
//! assert_eq!(truncate("a very long description", 15), "a very long ...");
//! ```

use anyhow::{bail, Result};
use chrono::{DateTime, Local, NaiveDate, Utc};

/// Date format Mint uses for rate plan start and end dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Formats an Edge timestamp (milliseconds since the Unix epoch) as a local
/// datetime string.
///
/// # Returns
///
/// `"YYYY-MM-DD HH:MM:SS"` in the local timezone, or `"Unknown"` when the
/// timestamp is out of range.
///
/// # Example
///
/// ```rust
/// use apigee_mint::util::format_millis;
///
/// let formatted = format_millis(1_704_067_200_000);
/// assert_eq!(formatted.len(), 19);
/// ```
pub fn format_millis(millis: i64) -> String {
    match DateTime::from_timestamp_millis(millis) {
        Some(dt) => {
            let local: DateTime<Local> = dt.into();
            local.format("%Y-%m-%d %H:%M:%S").to_string()
        }
        None => "Unknown".to_string(),
    }
}

/// Formats an Edge timestamp relative to now ("3 days ago").
///
/// Months and years are approximated as 30 and 365 days.
pub fn format_relative_millis(millis: i64) -> String {
    let diff = (Utc::now().timestamp_millis() - millis) / 1000;

    if diff < 0 {
        return "in the future".to_string();
    }

    let (value, unit) = match diff {
        d if d < 60 => return "just now".to_string(),
        d if d < 3600 => (d / 60, "minute"),
        d if d < 86400 => (d / 3600, "hour"),
        d if d < 2_592_000 => (d / 86400, "day"),
        d if d < 31_536_000 => (d / 2_592_000, "month"),
        d => (d / 31_536_000, "year"),
    };
    format!("{} {}{} ago", value, unit, if value == 1 { "" } else { "s" })
}

/// Validates a `YYYY-MM-DD` date and returns it normalized.
///
/// # Errors
///
/// Fails when the input is not a calendar date in that format.
pub fn parse_date(input: &str) -> Result<String> {
    match NaiveDate::parse_from_str(input.trim(), DATE_FORMAT) {
        Ok(date) => Ok(date.format(DATE_FORMAT).to_string()),
        Err(_) => bail!("Invalid date '{}'. Expected YYYY-MM-DD", input),
    }
}

/// Truncates to at most `max_len` characters, ending in "..." when cut.
///
/// Counts characters, not bytes.
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        return s.to_string();
    }
    if max_len > 3 {
        let head: String = s.chars().take(max_len - 3).collect();
        format!("{}...", head)
    } else {
        s.chars().take(max_len).collect()
    }
}

/// Masks a secret for display, keeping the last four characters.
pub fn mask_secret(secret: &str) -> String {
    let count = secret.chars().count();
    if count <= 4 {
        return "*".repeat(count);
    }
    let tail: String = secret.chars().skip(count - 4).collect();
    format!("{}{}", "*".repeat(count - 4), tail)
}
