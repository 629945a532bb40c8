// SPDX-License-Identifier: Apache-2.0
// Copyright (C) 2025 Michael Dippery <michael@monkey-robot.com>

//! Environment and configuration utilities.

use std::env;
use std::path::{Path, PathBuf};

/// Environment variable naming the credentials file.
pub const KEYS_ENV: &str = "TWEETCORPUS_KEYS";

/// Credentials file used when no other is given, relative to the current
/// directory.
pub const DEFAULT_KEYS_FILE: &str = "tokens.json";

/// Returns the path of the file holding Twitter API credentials.
///
/// An explicitly supplied `path` always wins. Otherwise the path is taken
/// from `$TWEETCORPUS_KEYS`, falling back to `tokens.json` in the current
/// directory.
///
/// # Examples
///
/// An explicit path is used as is:
///
/// ```
/// use std::path::{Path, PathBuf};
/// use tweetcorpus::conf::keys_path;
/// # use temp_env::with_var;
/// # with_var("TWEETCORPUS_KEYS", Some("/etc/keys.json"), || {
/// let path = keys_path(Some(Path::new("mine.json")));
/// assert_eq!(path, PathBuf::from("mine.json"));
/// # });
/// ```
///
/// Otherwise `$TWEETCORPUS_KEYS` is consulted:
///
/// ```
/// use std::path::PathBuf;
/// use tweetcorpus::conf::keys_path;
/// # use temp_env::with_var;
/// # with_var("TWEETCORPUS_KEYS", Some("/etc/keys.json"), || {
/// assert_eq!(keys_path(None), PathBuf::from("/etc/keys.json"));
/// # });
/// ```
///
/// And if it is not set, `tokens.json` is used:
///
/// ```
/// use std::path::PathBuf;
/// use tweetcorpus::conf::keys_path;
/// # use temp_env::with_var_unset;
/// # with_var_unset("TWEETCORPUS_KEYS", || {
/// assert_eq!(keys_path(None), PathBuf::from("tokens.json"));
/// # });
/// ```
pub fn keys_path(path: Option<&Path>) -> PathBuf {
    match path {
        Some(path) => path.to_path_buf(),
        None => env::var_os(KEYS_ENV)
            .filter(|path| !path.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_KEYS_FILE)),
    }
}

/// Where a user's corpus is saved, before any compression.
///
/// ```
/// use std::path::PathBuf;
/// use tweetcorpus::conf::corpus_path;
/// assert_eq!(corpus_path("corpusbot"), PathBuf::from("corpusbot.json"));
/// ```
pub fn corpus_path(screen_name: &str) -> PathBuf {
    PathBuf::from(format!("{screen_name}.json"))
}

/// Where the histograms of a user's corpus are saved.
pub fn histogram_path(screen_name: &str) -> PathBuf {
    PathBuf::from(format!("{screen_name}-histograms.pdf"))
}
