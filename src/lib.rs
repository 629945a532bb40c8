// SPDX-License-Identifier: Apache-2.0
// Copyright (C) 2025 Michael Dippery <michael@monkey-robot.com>

//! tweetcorpus builds a small corpus out of a Twitter user's tweets. It
//! walks back through the user's timeline a page at a time, keeps only
//! their original tweets in a single language (no replies and no
//! retweets), and saves them to a JSON file. It can also describe the
//! corpus: how long the tweets are, how many mentions, hashtags, retweets,
//! and favorites they get, and what time of day they were posted.
//!
//! # Examples
//!
//! (In all examples, replace `twitter_user` with the actual screen name of
//! a Twitter user.)
//!
//! Save every English original tweet Twitter will give you to
//! `twitter_user.json`:
//!
//! ```bash
//! tweetcorpus twitter_user
//! ```
//!
//! Save at most 1,000 tweets, gzipped, to `twitter_user.json.gz`:
//!
//! ```bash
//! tweetcorpus -n 1000 -z twitter_user
//! ```
//!
//! Print statistics about the corpus and plot histograms of token counts
//! and posting times to `twitter_user-histograms.pdf`:
//!
//! ```bash
//! tweetcorpus --stats twitter_user
//! ```
//!
//! Get usage and help for the tool:
//!
//! ```bash
//! tweetcorpus --help
//! ```
//!
//! # Twitter API Setup
//!
//! Reading timelines requires a Twitter developer account with access to
//! the v1.1 API. Create an app, generate its consumer key and secret and
//! an access token and secret, and save all four in a JSON file:
//!
//! ```json
//! {
//!     "consumer_key": "...",
//!     "consumer_secret": "...",
//!     "access_token": "...",
//!     "access_secret": "..."
//! }
//! ```
//!
//! By default tweetcorpus reads `tokens.json` in the current directory.
//! Point `$TWEETCORPUS_KEYS` or the `--keys` option at the file to keep it
//! somewhere else.
//!
//! Twitter limits how often a timeline can be read. When the limit is hit,
//! tweetcorpus waits for it to reset and carries on; pass `--no-wait` to
//! stop instead and keep the tweets downloaded so far.
//!
//! # License
//!
//! tweetcorpus is licensed under the terms of the [Apache License 2.0].
//! Please see the LICENSE file accompanying this source code or visit the
//! previous link for more information on licensing.
//!
//! [Apache License 2.0]: https://www.apache.org/licenses/LICENSE-2.0

pub mod cli;
pub mod clock;
pub mod conf;
pub mod corpus;
pub mod filter;
pub mod http;
pub mod plot;
pub mod stats;
pub mod text;
pub mod tweet;
pub mod twitter;
pub mod view;

#[cfg(test)]
mod test_utils;
