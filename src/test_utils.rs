use crate::clock::{Clock, DateTime, Utc};
use crate::http::{HTTPError, HTTPResult};
use crate::tweet::Tweet;
use crate::twitter::service::{PAGE_SIZE, Service};
use reqwest::StatusCode;
use serde_json::json;
use std::fs;
use std::sync::Mutex;

pub fn do_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn load_data(file: &str) -> String {
    fs::read_to_string(format!("tests/data/{file}.json")).expect("could not find test data")
}

/// An original tweet, reply, or retweet in the given language.
pub fn tweet_with(id: u64, lang: &str, is_reply: bool, is_retweet: bool) -> Tweet {
    let mut tweet = json!({
        "created_at": "Mon Aug 31 18:04:12 +0000 2020",
        "id": id,
        "id_str": id.to_string(),
        "full_text": format!("Tweet number {id}"),
        "in_reply_to_status_id": if is_reply { json!(id + 1) } else { json!(null) },
        "lang": lang,
        "entities": {"hashtags": [], "user_mentions": []},
        "retweet_count": 0,
        "favorite_count": 0,
        "user": {"screen_name": "corpusbot"},
    });
    if is_retweet {
        tweet["retweeted_status"] = json!({"id": id + 1});
    }
    serde_json::from_value(tweet).expect("invalid test tweet")
}

/// An original English tweet with the given text and timestamp.
pub fn tweet_saying(id: u64, text: &str, created_at: &str) -> Tweet {
    let mut fields = tweet_with(id, "en", false, false).fields().clone();
    fields.insert(String::from("full_text"), json!(text));
    fields.insert(String::from("created_at"), json!(created_at));
    Tweet::new(fields)
}

#[derive(Debug, Default)]
struct Calls {
    cursors: Vec<Option<u64>>,
}

/// Serves a canned timeline, newest tweet first, the way Twitter would.
#[derive(Debug)]
pub struct TestService {
    timeline: Vec<Tweet>,
    body: Option<String>,
    page_size: usize,
    rate_limited_after: Option<usize>,
    failing_after: Option<(usize, StatusCode)>,
    ignore_cursor: bool,
    calls: Mutex<Calls>,
}

impl TestService {
    pub fn new(timeline: Vec<Tweet>) -> Self {
        Self {
            timeline,
            body: None,
            page_size: PAGE_SIZE,
            rate_limited_after: None,
            failing_after: None,
            ignore_cursor: false,
            calls: Mutex::new(Calls::default()),
        }
    }

    /// A service that answers every request with `body`.
    pub fn with_body(body: &str) -> Self {
        Self {
            body: Some(body.to_string()),
            ..Self::new(vec![])
        }
    }

    pub fn page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Every request after the first `n` is rate limited.
    pub fn rate_limited_after(mut self, n: usize) -> Self {
        self.rate_limited_after = Some(n);
        self
    }

    /// Every request after the first `n` fails with `status`.
    pub fn failing_after(mut self, n: usize, status: StatusCode) -> Self {
        self.failing_after = Some((n, status));
        self
    }

    /// Always serves the newest page, whatever `max_id` is.
    pub fn ignore_cursor(mut self) -> Self {
        self.ignore_cursor = true;
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.lock().expect("poisoned").cursors.len()
    }

    pub fn cursors(&self) -> Vec<Option<u64>> {
        self.calls.lock().expect("poisoned").cursors.clone()
    }

    fn respond(&self, count: usize, max_id: Option<u64>) -> HTTPResult<String> {
        let call = {
            let mut calls = self.calls.lock().expect("poisoned");
            calls.cursors.push(max_id);
            calls.cursors.len() - 1
        };

        if self.rate_limited_after.is_some_and(|n| call >= n) {
            return Err(HTTPError::RateLimited { reset: None });
        }
        if let Some((n, status)) = self.failing_after {
            if call >= n {
                return Err(HTTPError::Http(status));
            }
        }
        if let Some(body) = &self.body {
            return Ok(body.clone());
        }

        let max_id = if self.ignore_cursor { None } else { max_id };
        let page = self
            .timeline
            .iter()
            .filter(|tweet| match (max_id, tweet.id()) {
                (Some(max_id), Ok(id)) => id <= max_id,
                _ => true,
            })
            .take(count)
            .collect::<Vec<_>>();
        Ok(serde_json::to_string(&page).expect("could not serialize test timeline"))
    }
}

impl Service for TestService {
    fn page_size(&self) -> usize {
        self.page_size
    }

    async fn get_timeline(
        &self,
        _screen_name: &str,
        count: usize,
        max_id: Option<u64>,
    ) -> HTTPResult<String> {
        self.respond(count, max_id)
    }
}

pub struct FrozenClock {
    datetime: DateTime<Utc>,
}

impl FrozenClock {
    pub fn new(datetime: DateTime<Utc>) -> Self {
        FrozenClock { datetime }
    }
}

impl Default for FrozenClock {
    fn default() -> Self {
        let datetime = DateTime::parse_from_rfc3339("2025-05-23T10:13:00-07:00")
            .expect("invalid date supplied")
            .with_timezone(&Utc);
        Self::new(datetime)
    }
}

impl Clock for FrozenClock {
    fn now(&self) -> DateTime<Utc> {
        self.datetime
    }
}
