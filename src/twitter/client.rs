// SPDX-License-Identifier: Apache-2.0
// Copyright (C) 2025 Michael Dippery <michael@monkey-robot.com>

//! Clients for reading a user's timeline from the Twitter API.
//!
//! Twitter only hands out a timeline a page at a time, newest tweets first.
//! To walk further back, each request asks for tweets no newer than one
//! less than the oldest tweet seen so far (the `max_id` cursor), until
//! Twitter runs out of tweets or the caller has as many as it wants.

use crate::filter::TweetFilter;
use crate::http::HTTPError;
use crate::tweet::{self, Tweet};
use crate::twitter::service::Service;
use log::{debug, info, warn};
use thiserror::Error;

/// Decides when a timeline has been exhausted.
///
/// Twitter documents neither rule, so both are offered.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Exhaustion {
    /// Keep paging until a request comes back empty. This costs one extra
    /// request but never stops early.
    #[default]
    EmptyPage,

    /// Stop as soon as a page comes back with fewer tweets than were
    /// asked for.
    ShortPage,
}

/// How a download finished.
#[derive(Debug)]
pub enum Outcome {
    /// Every available tweet was read, or the requested maximum was reached.
    Complete(Vec<Tweet>),

    /// Twitter stopped answering because of rate limiting. Holds the tweets
    /// accepted before that happened.
    PartialDueToRateLimit(Vec<Tweet>),

    /// The download failed and the tweets read so far were discarded.
    Failed(Error),
}

impl Outcome {
    /// True if every available tweet was read.
    pub fn is_complete(&self) -> bool {
        matches!(self, Outcome::Complete(_))
    }

    /// The downloaded tweets, or an error if the download failed.
    ///
    /// Tweets from a download cut short by rate limiting are still
    /// returned.
    pub fn into_result(self) -> Result<Vec<Tweet>, Error> {
        match self {
            Outcome::Complete(tweets) | Outcome::PartialDueToRateLimit(tweets) => Ok(tweets),
            Outcome::Failed(err) => Err(err),
        }
    }
}

/// A client error.
#[derive(Debug, Error)]
pub enum Error {
    /// An error from the underlying HTTP service.
    #[error("Service error: {0}")]
    Service(#[from] HTTPError),

    /// An error parsing data.
    #[error("Parse error: {0}")]
    Parse(#[from] tweet::Error),
}

/// Downloads a user's original tweets.
#[derive(Debug)]
pub struct Downloader<S: Service> {
    service: S,
    filter: TweetFilter,
    exhaustion: Exhaustion,
}

impl<S: Service> Downloader<S> {
    /// Creates a new downloader that reads tweets from `service` and keeps
    /// the ones accepted by the [default filter](TweetFilter::default).
    pub fn new(service: S) -> Self {
        Self {
            service,
            filter: TweetFilter::default(),
            exhaustion: Exhaustion::default(),
        }
    }

    /// Uses `filter` to decide which tweets to keep.
    pub fn filter(mut self, filter: TweetFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Uses `exhaustion` to decide when there are no more tweets to read.
    pub fn exhaustion(mut self, exhaustion: Exhaustion) -> Self {
        self.exhaustion = exhaustion;
        self
    }

    /// Downloads `screen_name`'s accepted tweets, newest first.
    ///
    /// If `max_tweets` is given, at most that many tweets are returned and
    /// no more pages are requested once it is reached. Otherwise the
    /// timeline is read until Twitter has nothing older to give.
    pub async fn download(&self, screen_name: &str, max_tweets: Option<usize>) -> Outcome {
        let mut tweets = Vec::new();
        match self.download_into(&mut tweets, screen_name, max_tweets).await {
            Ok(()) => {
                info!("Downloaded {} tweets from {screen_name}", tweets.len());
                Outcome::Complete(tweets)
            }
            Err(Error::Service(err)) if err.is_rate_limit() => {
                warn!("Rate limited after {} tweets from {screen_name}", tweets.len());
                Outcome::PartialDueToRateLimit(tweets)
            }
            Err(err) => Outcome::Failed(err),
        }
    }

    async fn download_into(
        &self,
        tweets: &mut Vec<Tweet>,
        screen_name: &str,
        max_tweets: Option<usize>,
    ) -> Result<(), Error> {
        let page_size = self.service.page_size();
        let mut max_id = None;

        while !is_full(tweets, max_tweets) {
            debug!("Requesting {page_size} tweets from {screen_name} with max_id {max_id:?}");
            let data = self
                .service
                .get_timeline(screen_name, page_size, max_id)
                .await?;
            let page = Tweet::parse_page(&data)?;
            let page_len = page.len();
            debug!("Received {page_len} tweets");

            let mut oldest: Option<u64> = None;
            for tweet in page {
                let id = tweet.id()?;
                oldest = Some(oldest.map_or(id, |oldest| oldest.min(id)));
                if self.filter.accepts(&tweet) {
                    tweets.push(tweet);
                    if is_full(tweets, max_tweets) {
                        return Ok(());
                    }
                }
            }

            let Some(oldest) = oldest else {
                break;
            };
            if self.exhaustion == Exhaustion::ShortPage && page_len < page_size {
                break;
            }

            // Nothing can be older than tweet 0, and a cursor that doesn't
            // move back would request the same page forever.
            let next = match oldest.checked_sub(1) {
                Some(next) if max_id.is_none_or(|max_id| next < max_id) => next,
                _ => break,
            };
            max_id = Some(next);
        }

        Ok(())
    }
}

fn is_full(tweets: &[Tweet], max_tweets: Option<usize>) -> bool {
    max_tweets.is_some_and(|max| tweets.len() >= max)
}
