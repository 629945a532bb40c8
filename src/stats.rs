// SPDX-License-Identifier: Apache-2.0
// Copyright (C) 2025 Michael Dippery <michael@monkey-robot.com>

//! Descriptive statistics about a corpus of tweets.

use crate::clock;
use crate::text::tokenize;
use crate::tweet::{self, Tweet};
use counter::Counter;
use itertools::{Itertools, MinMaxResult};
use std::ops::RangeInclusive;
use thiserror::Error;

/// Number of empty bins added to either side of the token histogram.
pub const TOKEN_PADDING: i64 = 5;

/// Every hour of the day, in the order they are plotted.
pub const HOURS: RangeInclusive<i64> = 0..=23;

/// An error computing statistics.
#[derive(Debug, Error)]
pub enum Error {
    /// Statistics cannot be computed over no tweets.
    #[error("Cannot compute statistics for an empty corpus")]
    EmptyCorpus,

    /// A tweet was missing a field or had a field of the wrong type.
    #[error("{0}")]
    Tweet(#[from] tweet::Error),

    /// A tweet's `created_at` field could not be parsed.
    #[error("Invalid timestamp '{timestamp}': {source}")]
    Timestamp {
        timestamp: String,
        source: chrono::ParseError,
    },
}

/// Statistics summarizing a corpus.
#[derive(Clone, Debug, PartialEq)]
pub struct Statistics {
    screen_name: String,
    token_counts: Vec<usize>,
    min_tokens: usize,
    max_tokens: usize,
    mean_tokens: f64,
    mean_mentions: f64,
    mean_hashtags: f64,
    mean_retweets: f64,
    mean_favorites: f64,
    first_created_at: String,
    last_created_at: String,
    hours: Vec<u32>,
}

impl Statistics {
    /// Computes statistics for a corpus of tweets, newest first.
    ///
    /// Returns an error if the corpus is empty or any tweet is missing
    /// a field the statistics are computed from.
    pub fn from_corpus(tweets: &[Tweet]) -> Result<Self, Error> {
        let (Some(newest), Some(oldest)) = (tweets.first(), tweets.last()) else {
            return Err(Error::EmptyCorpus);
        };

        let token_counts = tweets.iter().map(token_count).collect::<Result<Vec<_>, _>>()?;
        let (min_tokens, max_tokens) = match token_counts.iter().minmax() {
            MinMaxResult::NoElements => return Err(Error::EmptyCorpus),
            MinMaxResult::OneElement(n) => (*n, *n),
            MinMaxResult::MinMax(min, max) => (*min, *max),
        };

        let mentions = tweets.iter().map(Tweet::mention_count).collect::<Result<Vec<_>, _>>()?;
        let hashtags = tweets.iter().map(Tweet::hashtag_count).collect::<Result<Vec<_>, _>>()?;
        let retweets = tweets.iter().map(Tweet::retweet_count).collect::<Result<Vec<_>, _>>()?;
        let favorites = tweets.iter().map(Tweet::favorite_count).collect::<Result<Vec<_>, _>>()?;
        let hours = tweets.iter().map(hour_of_day).collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            screen_name: newest.screen_name()?.to_string(),
            mean_tokens: mean(token_counts.iter().map(|&n| n as f64)),
            token_counts,
            min_tokens,
            max_tokens,
            mean_mentions: mean(mentions.into_iter().map(|n| n as f64)),
            mean_hashtags: mean(hashtags.into_iter().map(|n| n as f64)),
            mean_retweets: mean(retweets.into_iter().map(|n| n as f64)),
            mean_favorites: mean(favorites.into_iter().map(|n| n as f64)),
            first_created_at: oldest.created_at()?.to_string(),
            last_created_at: newest.created_at()?.to_string(),
            hours,
        })
    }

    /// Screen name of the author of the newest tweet.
    pub fn screen_name(&self) -> &str {
        &self.screen_name
    }

    /// Number of tweets in the corpus.
    pub fn count(&self) -> usize {
        self.token_counts.len()
    }

    /// Number of tokens in each tweet, in corpus order.
    pub fn token_counts(&self) -> &[usize] {
        &self.token_counts
    }

    pub fn min_tokens(&self) -> usize {
        self.min_tokens
    }

    pub fn max_tokens(&self) -> usize {
        self.max_tokens
    }

    pub fn mean_tokens(&self) -> f64 {
        self.mean_tokens
    }

    pub fn mean_mentions(&self) -> f64 {
        self.mean_mentions
    }

    pub fn mean_hashtags(&self) -> f64 {
        self.mean_hashtags
    }

    pub fn mean_retweets(&self) -> f64 {
        self.mean_retweets
    }

    pub fn mean_favorites(&self) -> f64 {
        self.mean_favorites
    }

    /// Timestamp of the oldest tweet, which is the last one in the corpus.
    pub fn first_created_at(&self) -> &str {
        &self.first_created_at
    }

    /// Timestamp of the newest tweet, which is the first one in the corpus.
    pub fn last_created_at(&self) -> &str {
        &self.last_created_at
    }

    /// The hour of the day each tweet was posted, in corpus order.
    pub fn hours(&self) -> &[u32] {
        &self.hours
    }

    /// Distribution of token counts, with one bin for every count from
    /// [`TOKEN_PADDING`] below the minimum to [`TOKEN_PADDING`] above the
    /// maximum.
    pub fn token_histogram(&self) -> Histogram {
        let range = (self.min_tokens as i64 - TOKEN_PADDING)..=(self.max_tokens as i64 + TOKEN_PADDING);
        Histogram::new(self.token_counts.iter().map(|&n| n as i64), range)
    }

    /// Distribution of posting times, with one bin for each hour of the day.
    pub fn hour_histogram(&self) -> Histogram {
        Histogram::new(self.hours.iter().map(|&h| i64::from(h)), HOURS)
    }
}

/// Number of tokens in a tweet's text.
pub fn token_count(tweet: &Tweet) -> Result<usize, tweet::Error> {
    Ok(tokenize(tweet.full_text()?).len())
}

/// The hour of the day (0 to 23) a tweet was posted, as written in its
/// timestamp.
pub fn hour_of_day(tweet: &Tweet) -> Result<u32, Error> {
    let timestamp = tweet.created_at()?;
    clock::hour_of_day(timestamp).map_err(|source| Error::Timestamp {
        timestamp: timestamp.to_string(),
        source,
    })
}

fn mean(values: impl ExactSizeIterator<Item = f64>) -> f64 {
    let n = values.len();
    if n == 0 {
        0.0
    } else {
        values.sum::<f64>() / n as f64
    }
}

/// A value and the number of times it occurs.
pub type Bin = (i64, usize);

/// Counts of values over a fixed, contiguous range with one bin per
/// integer.
#[derive(Clone, Debug, PartialEq)]
pub struct Histogram {
    bins: Vec<Bin>,
}

impl Histogram {
    /// Counts `values` into one bin for each integer in `range`.
    ///
    /// Values outside `range` are not counted.
    ///
    /// # Examples
    ///
    /// ```
    /// use tweetcorpus::stats::Histogram;
    /// let histogram = Histogram::new([1, 3, 3, 9], 0..=4);
    /// assert_eq!(histogram.bins(), &[(0, 0), (1, 1), (2, 0), (3, 2), (4, 0)]);
    /// ```
    pub fn new(values: impl IntoIterator<Item = i64>, range: RangeInclusive<i64>) -> Self {
        let counts = values.into_iter().collect::<Counter<_>>();
        let bins = range.map(|value| (value, counts[&value])).collect();
        Self { bins }
    }

    /// Every bin, in ascending order of value.
    pub fn bins(&self) -> &[Bin] {
        &self.bins
    }

    /// The count in the fullest bin.
    pub fn max_count(&self) -> usize {
        self.bins.iter().map(|(_, count)| *count).max().unwrap_or(0)
    }

    /// Number of values counted.
    pub fn total(&self) -> usize {
        self.bins.iter().map(|(_, count)| count).sum()
    }
}
