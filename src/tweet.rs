// SPDX-License-Identifier: Apache-2.0
// Copyright (C) 2025 Michael Dippery <michael@monkey-robot.com>

//! A tweet, more or less exactly as the Twitter API delivers it.
//!
//! Tweets are never reshaped into a fixed structure. Each one is kept as
//! the JSON object Twitter sent, in the order Twitter sent its fields, so
//! a saved corpus holds everything that was downloaded and can be read
//! back field-for-field. The methods here pull out the handful of fields
//! the rest of the crate actually looks at.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// A single tweet.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Tweet(Map<String, Value>);

/// A page of tweets as returned by a single timeline request, newest first.
pub type Page = Vec<Tweet>;

impl Tweet {
    /// Wraps an already-parsed JSON object.
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// Parses the body of a `statuses/user_timeline` response into a page
    /// of tweets.
    pub fn parse_page(data: &str) -> Result<Page, Error> {
        Ok(serde_json::from_str(data)?)
    }

    /// All of the tweet's fields.
    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    /// The value of a top-level field, if present.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// The tweet's unique numeric ID.
    pub fn id(&self) -> Result<u64, Error> {
        self.field(&["id"])?
            .as_u64()
            .ok_or_else(|| Error::InvalidField(String::from("id")))
    }

    /// The BCP 47 language code Twitter detected for the tweet, if any.
    pub fn lang(&self) -> Option<&str> {
        self.get("lang").and_then(Value::as_str)
    }

    /// True if the tweet was posted in reply to another tweet.
    pub fn is_reply(&self) -> bool {
        self.get("in_reply_to_status_id")
            .is_some_and(|id| !id.is_null())
    }

    /// True if the tweet is a retweet of another tweet.
    pub fn is_retweet(&self) -> bool {
        self.0.contains_key("retweeted_status")
    }

    /// The tweet's text.
    ///
    /// Tweets requested in extended mode carry their untruncated text in
    /// `full_text`; older payloads only have `text`.
    pub fn full_text(&self) -> Result<&str, Error> {
        let text = self.get("full_text").or_else(|| self.get("text"));
        text.and_then(Value::as_str)
            .ok_or_else(|| Error::MissingField(String::from("full_text")))
    }

    /// Number of users mentioned in the tweet.
    pub fn mention_count(&self) -> Result<usize, Error> {
        self.array_len(&["entities", "user_mentions"])
    }

    /// Number of hashtags in the tweet.
    pub fn hashtag_count(&self) -> Result<usize, Error> {
        self.array_len(&["entities", "hashtags"])
    }

    /// Number of times the tweet has been retweeted.
    pub fn retweet_count(&self) -> Result<u64, Error> {
        self.counter("retweet_count")
    }

    /// Number of times the tweet has been favorited.
    pub fn favorite_count(&self) -> Result<u64, Error> {
        self.counter("favorite_count")
    }

    /// The tweet's creation timestamp, exactly as Twitter formats it
    /// (e.g., `Wed Oct 10 20:19:24 +0000 2018`).
    pub fn created_at(&self) -> Result<&str, Error> {
        self.string(&["created_at"])
    }

    /// Screen name of the tweet's author.
    pub fn screen_name(&self) -> Result<&str, Error> {
        self.string(&["user", "screen_name"])
    }

    fn field(&self, path: &[&str]) -> Result<&Value, Error> {
        let missing = || Error::MissingField(path.join("."));
        let (first, rest) = path.split_first().ok_or_else(missing)?;
        let mut value = self.get(first).ok_or_else(missing)?;
        for key in rest {
            value = value.get(key).ok_or_else(missing)?;
        }
        Ok(value)
    }

    fn string(&self, path: &[&str]) -> Result<&str, Error> {
        self.field(path)?
            .as_str()
            .ok_or_else(|| Error::InvalidField(path.join(".")))
    }

    fn counter(&self, key: &str) -> Result<u64, Error> {
        self.field(&[key])?
            .as_u64()
            .ok_or_else(|| Error::InvalidField(String::from(key)))
    }

    fn array_len(&self, path: &[&str]) -> Result<usize, Error> {
        self.field(path)?
            .as_array()
            .map(Vec::len)
            .ok_or_else(|| Error::InvalidField(path.join(".")))
    }
}

/// An error reading data out of a tweet.
#[derive(Debug, Error)]
pub enum Error {
    /// The response was not a JSON array of tweet objects.
    #[error("Could not parse tweets: {0}")]
    Json(#[from] serde_json::Error),

    /// A field the caller needed was not present.
    #[error("Tweet is missing field '{0}'")]
    MissingField(String),

    /// A field was present but had the wrong type.
    #[error("Tweet has an invalid value for field '{0}'")]
    InvalidField(String),
}

#[cfg(test)]
mod tests {
    mod parse {
        use super::super::*;
        use crate::test_utils::load_data;

        #[test]
        fn it_parses_a_page_of_tweets() {
            let page = Tweet::parse_page(&load_data("timeline")).unwrap();
            assert_eq!(page.len(), 5);
        }

        #[test]
        fn it_parses_an_empty_page() {
            let page = Tweet::parse_page("[]").unwrap();
            assert!(page.is_empty());
        }

        #[test]
        fn it_fails_to_parse_something_that_is_not_a_list_of_tweets() {
            let page = Tweet::parse_page(r#"{"errors": [{"code": 34}]}"#);
            assert!(matches!(page, Err(Error::Json(_))));
        }

        #[test]
        fn it_preserves_field_order() {
            let page = Tweet::parse_page(&load_data("timeline")).unwrap();
            let keys = page[0].fields().keys().take(3).collect::<Vec<_>>();
            assert_eq!(keys, vec!["created_at", "id", "id_str"]);
        }
    }

    mod fields {
        use crate::test_utils::load_data;
        use crate::tweet::{Error, Tweet};
        use serde_json::json;

        fn newest() -> Tweet {
            Tweet::parse_page(&load_data("timeline")).unwrap().remove(0)
        }

        #[test]
        fn it_returns_its_id() {
            assert_eq!(newest().id().unwrap(), 1300150000000000005);
        }

        #[test]
        fn it_returns_its_language() {
            assert_eq!(newest().lang(), Some("en"));
        }

        #[test]
        fn it_returns_its_text() {
            let tweet = newest();
            let text = tweet.full_text().unwrap();
            assert!(text.starts_with("Shipping the new release today!"));
        }

        #[test]
        fn it_falls_back_to_truncated_text() {
            let tweet: Tweet = serde_json::from_value(json!({"text": "short"})).unwrap();
            assert_eq!(tweet.full_text().unwrap(), "short");
        }

        #[test]
        fn it_counts_its_entities() {
            let tweet = newest();
            assert_eq!(tweet.mention_count().unwrap(), 2);
            assert_eq!(tweet.hashtag_count().unwrap(), 1);
        }

        #[test]
        fn it_returns_its_engagement() {
            let tweet = newest();
            assert_eq!(tweet.retweet_count().unwrap(), 12);
            assert_eq!(tweet.favorite_count().unwrap(), 40);
        }

        #[test]
        fn it_returns_its_creation_date() {
            assert_eq!(
                newest().created_at().unwrap(),
                "Mon Aug 31 18:04:12 +0000 2020"
            );
        }

        #[test]
        fn it_returns_its_author() {
            assert_eq!(newest().screen_name().unwrap(), "corpusbot");
        }

        #[test]
        fn it_knows_it_is_not_a_reply_or_a_retweet() {
            let tweet = newest();
            assert!(!tweet.is_reply());
            assert!(!tweet.is_retweet());
        }

        #[test]
        fn it_reports_missing_nested_fields() {
            let tweet: Tweet = serde_json::from_value(json!({"entities": {}})).unwrap();
            let err = tweet.mention_count().unwrap_err();
            assert!(
                matches!(&err, Error::MissingField(field) if field == "entities.user_mentions"),
                "{err:?}"
            );
        }

        #[test]
        fn it_reports_fields_with_the_wrong_type() {
            let tweet: Tweet = serde_json::from_value(json!({"id": "12"})).unwrap();
            assert!(matches!(tweet.id(), Err(Error::InvalidField(_))));
        }
    }

    mod replies_and_retweets {
        use crate::tweet::Tweet;
        use serde_json::json;

        #[test]
        fn it_treats_a_null_reply_target_as_an_original_tweet() {
            let tweet: Tweet =
                serde_json::from_value(json!({"in_reply_to_status_id": null})).unwrap();
            assert!(!tweet.is_reply());
        }

        #[test]
        fn it_treats_a_missing_reply_target_as_an_original_tweet() {
            let tweet: Tweet = serde_json::from_value(json!({})).unwrap();
            assert!(!tweet.is_reply());
        }

        #[test]
        fn it_detects_replies() {
            let tweet: Tweet =
                serde_json::from_value(json!({"in_reply_to_status_id": 42})).unwrap();
            assert!(tweet.is_reply());
        }

        #[test]
        fn it_detects_retweets() {
            let tweet: Tweet =
                serde_json::from_value(json!({"retweeted_status": {"id": 42}})).unwrap();
            assert!(tweet.is_retweet());
        }
    }
}
