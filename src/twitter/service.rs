// SPDX-License-Identifier: Apache-2.0
// Copyright (C) 2025 Michael Dippery <michael@monkey-robot.com>

//! HTTPS connector for the Twitter API.
//!
//! Service structures in this module provide a low-level way to interact
//! with the Twitter API over HTTPS, essentially a specialized HTTPS client
//! specifically for reading user timelines.

use crate::clock::{Clock, SystemClock, TimeDelta};
use crate::http::{HTTPError, HTTPResult, HTTPService};
use crate::twitter::Credentials;
use crate::twitter::oauth::{Param, Signer};
use log::{debug, warn};
use reqwest::{Client, Response, StatusCode, header};

/// Maximum number of tweets Twitter will return from a single timeline
/// request.
pub const PAGE_SIZE: usize = 200;

/// A service for retrieving tweets from a user's timeline.
///
/// Using this trait, clients can implement different ways of connecting
/// to the Twitter API, such as an actual connector for production code,
/// and a mocked connector for testing purposes.
pub trait Service {
    /// Number of tweets requested per page.
    fn page_size(&self) -> usize {
        PAGE_SIZE
    }

    /// Retrieves up to `count` of `screen_name`'s most recent tweets,
    /// newest first, as a raw JSON array.
    ///
    /// If `max_id` is given, only tweets with an ID less than or equal to
    /// it are returned.
    fn get_timeline(
        &self,
        screen_name: &str,
        count: usize,
        max_id: Option<u64>,
    ) -> impl Future<Output = HTTPResult<String>> + Send;
}

impl<S: Service> Service for &S {
    fn page_size(&self) -> usize {
        (**self).page_size()
    }

    fn get_timeline(
        &self,
        screen_name: &str,
        count: usize,
        max_id: Option<u64>,
    ) -> impl Future<Output = HTTPResult<String>> + Send {
        (**self).get_timeline(screen_name, count, max_id)
    }
}

/// A service that contacts the Twitter API directly to retrieve tweets.
///
/// By default the service waits out rate limits: when Twitter responds
/// with HTTP 429, it sleeps until the rate limit window resets and tries
/// again, a few times at most, before giving up and returning
/// [`HTTPError::RateLimited`].
#[derive(Debug)]
pub struct TwitterService<'a, C: Clock = SystemClock> {
    client: Client,
    credentials: &'a Credentials,
    clock: C,
    wait_on_rate_limit: bool,
    timeline_url: String,
}

impl<'a> TwitterService<'a> {
    /// Creates a new Twitter service authenticated with `credentials`.
    pub fn new(credentials: &'a Credentials) -> HTTPResult<Self> {
        Self::with_clock(credentials, SystemClock)
    }
}

impl<'a, C: Clock + Sync> TwitterService<'a, C> {
    const TIMELINE_URL: &'static str = "https://api.twitter.com/1.1/statuses/user_timeline.json";

    /// Times to wait out a rate limit on a single request before giving up.
    const MAX_RATE_LIMIT_WAITS: usize = 3;

    /// Length of Twitter's rate limit window in minutes, used when a 429
    /// response does not say when the window resets.
    const RATE_LIMIT_WINDOW: i64 = 15;

    /// Creates a new Twitter service that reads the time from `clock`.
    pub fn with_clock(credentials: &'a Credentials, clock: C) -> HTTPResult<Self> {
        let client = Self::client()?;
        Ok(Self {
            client,
            credentials,
            clock,
            wait_on_rate_limit: true,
            timeline_url: Self::TIMELINE_URL.to_string(),
        })
    }

    /// Sends timeline requests to `url` instead of Twitter's endpoint.
    pub fn with_timeline_url(mut self, url: impl Into<String>) -> Self {
        self.timeline_url = url.into();
        self
    }

    /// Sets whether the service should sleep and retry when rate limited,
    /// or return an error immediately.
    pub fn wait_on_rate_limit(mut self, wait: bool) -> Self {
        self.wait_on_rate_limit = wait;
        self
    }

    fn query(&self, screen_name: &str, count: usize, max_id: Option<u64>) -> Vec<Param> {
        let mut params = vec![
            (String::from("screen_name"), screen_name.to_string()),
            (String::from("count"), count.to_string()),
            (String::from("tweet_mode"), String::from("extended")),
        ];
        if let Some(max_id) = max_id {
            params.push((String::from("max_id"), max_id.to_string()));
        }
        params
    }

    async fn send(&self, params: &[Param]) -> HTTPResult<Response> {
        let authorization =
            Signer::new(self.credentials).authorization("GET", &self.timeline_url, params, &self.clock);
        let resp = self
            .client
            .get(&self.timeline_url)
            .query(params)
            .header(header::AUTHORIZATION, authorization)
            .send()
            .await?;
        Ok(resp)
    }

    fn rate_limit_reset(resp: &Response) -> Option<i64> {
        resp.headers()
            .get("x-rate-limit-reset")?
            .to_str()
            .ok()?
            .parse()
            .ok()
    }

    /// How long to sleep before retrying after a rate limit that resets
    /// at `reset`.
    fn backoff(&self, reset: Option<i64>) -> TimeDelta {
        match reset {
            // One extra second so we don't wake up just before the reset.
            Some(reset) => self.clock.until(reset) + TimeDelta::seconds(1),
            None => TimeDelta::minutes(Self::RATE_LIMIT_WINDOW),
        }
    }

    async fn body(resp: Response) -> HTTPResult<String> {
        if !resp.status().is_success() {
            Err(HTTPError::Http(resp.status()))
        } else {
            let content_type = resp
                .headers()
                .get(header::CONTENT_TYPE)
                .ok_or(HTTPError::MissingContentType)?
                .to_str()?;
            if !content_type.starts_with("application/json") {
                Err(HTTPError::UnexpectedContentType(content_type.to_string()))
            } else {
                Ok(resp.text().await?)
            }
        }
    }
}

impl<C: Clock> HTTPService for TwitterService<'_, C> {}

impl<C: Clock + Sync> Service for TwitterService<'_, C> {
    async fn get_timeline(
        &self,
        screen_name: &str,
        count: usize,
        max_id: Option<u64>,
    ) -> HTTPResult<String> {
        let params = self.query(screen_name, count, max_id);
        let mut waits = 0;

        loop {
            let resp = self.send(&params).await?;
            if resp.status() != StatusCode::TOO_MANY_REQUESTS {
                return Self::body(resp).await;
            }

            let reset = Self::rate_limit_reset(&resp);
            if !self.wait_on_rate_limit || waits >= Self::MAX_RATE_LIMIT_WAITS {
                return Err(HTTPError::RateLimited { reset });
            }

            let delay = self.backoff(reset);
            warn!("Rate limited by Twitter, waiting {}s", delay.num_seconds());
            tokio::time::sleep(delay.to_std().unwrap_or_default()).await;
            waits += 1;
            debug!("Retrying timeline request for {screen_name} after rate limit");
        }
    }
}
