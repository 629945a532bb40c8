// SPDX-License-Identifier: Apache-2.0
// Copyright (C) 2025 Michael Dippery <michael@monkey-robot.com>

//! Decides which tweets belong in a corpus.
//!
//! A corpus should only contain things the account holder actually wrote,
//! in one language: no retweets, which are somebody else's words, and no
//! replies, which only make sense as part of a conversation.

use crate::tweet::Tweet;

/// Language collected when none is specified.
pub const DEFAULT_LANGUAGE: &str = "en";

/// Accepts original tweets written in a single language.
#[derive(Clone, Debug, PartialEq)]
pub struct TweetFilter {
    language: String,
}

impl TweetFilter {
    /// Creates a filter accepting tweets in the given `language`, which
    /// should be a language code as reported by Twitter, such as `en` or
    /// `de`.
    pub fn new(language: impl Into<String>) -> Self {
        let language = language.into();
        Self { language }
    }

    /// The language code accepted by this filter.
    pub fn language(&self) -> &str {
        &self.language
    }

    /// True if `tweet` is in the filter's language and is neither a reply
    /// nor a retweet.
    ///
    /// A tweet with no language at all is never accepted.
    pub fn accepts(&self, tweet: &Tweet) -> bool {
        tweet.lang() == Some(self.language())
            && !tweet.is_reply()
            && !tweet.is_retweet()
    }
}

impl Default for TweetFilter {
    fn default() -> Self {
        Self::new(DEFAULT_LANGUAGE)
    }
}

/// True if `tweet` is an original English tweet.
///
/// Shorthand for [`TweetFilter::accepts()`] with the default filter.
pub fn accepted(tweet: &Tweet) -> bool {
    TweetFilter::default().accepts(tweet)
}
