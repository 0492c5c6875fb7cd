//
//  drone-client
//  util/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Utility Module
//!
//! Small helpers shared by the resource types.
//!
//! ## Categories
//!
//! - **Time Utilities**: [`timestamp_to_datetime`], [`format_duration`]
//! - **String Utilities**: [`short_sha`]
//!
//! ## Example
//!
//! ```rust
//! use std::time::Duration;
//! use drone_client::util::{format_duration, short_sha};
//!
//! assert_eq!(format_duration(Duration::from_secs(125)), "2m 5s");
//! assert_eq!(short_sha("0123456789abcdef"), "01234567");
//! ```

use std::time::Duration;

use chrono::{DateTime, Utc};

/// Length of an abbreviated commit hash.
pub const SHORT_SHA_LEN: usize = 8;

/// Converts a Unix timestamp in seconds to a UTC date-time.
///
/// The server uses `0` for "not set", so `0` and negative values yield
/// `None`, as do values chrono cannot represent.
///
/// # Example
///
/// ```rust
/// use drone_client::util::timestamp_to_datetime;
///
/// let dt = timestamp_to_datetime(1704067200).unwrap();
/// assert_eq!(dt.to_rfc3339(), "2024-01-01T00:00:00+00:00");
/// assert!(timestamp_to_datetime(0).is_none());
/// ```
pub fn timestamp_to_datetime(timestamp: i64) -> Option<DateTime<Utc>> {
    if timestamp <= 0 {
        return None;
    }
    DateTime::from_timestamp(timestamp, 0)
}

/// Formats a duration into a human-readable compact string.
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
/// use drone_client::util::format_duration;
///
/// assert_eq!(format_duration(Duration::from_secs(45)), "45s");
/// assert_eq!(format_duration(Duration::from_secs(125)), "2m 5s");
/// assert_eq!(format_duration(Duration::from_secs(3665)), "1h 1m");
/// assert_eq!(format_duration(Duration::from_secs(90000)), "1d 1h");
/// ```
///
/// # Notes
///
/// - Only whole seconds are considered.
/// - Two units at most are shown.
pub fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();

    if secs < 60 {
        format!("{}s", secs)
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else if secs < 86400 {
        format!("{}h {}m", secs / 3600, (secs % 3600) / 60)
    } else {
        format!("{}d {}h", secs / 86400, (secs % 86400) / 3600)
    }
}

/// Abbreviates a commit hash to its first [`SHORT_SHA_LEN`] characters.
///
/// Hashes that are already short are returned unchanged.
pub fn short_sha(sha: &str) -> &str {
    match sha.char_indices().nth(SHORT_SHA_LEN) {
        Some((idx, _)) => &sha[..idx],
        None => sha,
    }
}
