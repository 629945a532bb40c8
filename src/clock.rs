// SPDX-License-Identifier: Apache-2.0
// Copyright (C) 2025 Michael Dippery <michael@monkey-robot.com>

//! All things time-related.

pub use chrono::{DateTime, FixedOffset, TimeDelta, Utc};
use chrono::{ParseResult, Timelike};

/// The format Twitter uses for timestamps in API responses,
/// e.g., `Wed Oct 10 20:19:24 +0000 2018`.
pub const TWITTER_DATE_FORMAT: &str = "%a %b %d %H:%M:%S %z %Y";

/// Tells time and returns the time.
///
/// Generally you will want to retrieve time using [`SystemClock`],
/// but in tests you may want to implement a `Clock` with a fixed time.
pub trait Clock {
    /// The current time.
    fn now(&self) -> DateTime<Utc>;

    /// Time remaining until the given Unix timestamp, or zero if it has
    /// already passed.
    fn until(&self, timestamp: i64) -> TimeDelta {
        let remaining = timestamp - self.now().timestamp();
        TimeDelta::seconds(remaining.max(0))
    }
}

/// Interacts with the system clock to get the current time.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Parses a timestamp in Twitter's format.
///
/// The offset in the timestamp is preserved, which for the Twitter API is
/// always UTC.
///
/// # Examples
///
/// ```
/// use chrono::{Datelike, Timelike};
/// use tweetcorpus::clock::parse_twitter_date;
/// let date = parse_twitter_date("Wed Oct 10 20:19:24 +0000 2018").unwrap();
/// assert_eq!(date.year(), 2018);
/// assert_eq!(date.hour(), 20);
/// ```
pub fn parse_twitter_date(timestamp: &str) -> ParseResult<DateTime<FixedOffset>> {
    DateTime::parse_from_str(timestamp, TWITTER_DATE_FORMAT)
}

/// The hour of the day (0 to 23) in a Twitter timestamp, in the
/// timestamp's own offset.
pub fn hour_of_day(timestamp: &str) -> ParseResult<u32> {
    Ok(parse_twitter_date(timestamp)?.hour())
}
