// SPDX-License-Identifier: Apache-2.0
// Copyright (C) 2025 Michael Dippery <michael@monkey-robot.com>

//! Authentication for the Twitter API.

use serde::Deserialize;
use std::path::Path;
use std::{fmt, fs, io};
use thiserror::Error;

/// The four OAuth 1.0a secrets needed to make requests on behalf of a
/// Twitter account.
///
/// Credentials are usually read from a JSON file:
///
/// ```json
/// {
///     "consumer_key": "...",
///     "consumer_secret": "...",
///     "access_token": "...",
///     "access_secret": "..."
/// }
/// ```
#[derive(Clone, Deserialize, PartialEq)]
pub struct Credentials {
    consumer_key: String,
    consumer_secret: String,
    access_token: String,
    access_secret: String,
}

impl Credentials {
    /// Creates a new set of credentials from their component keys.
    pub fn new(
        consumer_key: impl Into<String>,
        consumer_secret: impl Into<String>,
        access_token: impl Into<String>,
        access_secret: impl Into<String>,
    ) -> Self {
        Self {
            consumer_key: consumer_key.into(),
            consumer_secret: consumer_secret.into(),
            access_token: access_token.into(),
            access_secret: access_secret.into(),
        }
    }

    /// Reads credentials from the JSON file at `path`.
    ///
    /// Returns an error if the file cannot be read or does not contain
    /// all four keys.
    pub fn from_file(path: impl AsRef<Path>) -> AuthResult {
        let data = fs::read_to_string(path)?;
        Self::parse(&data)
    }

    /// Parses credentials from a JSON string.
    ///
    /// # Examples
    ///
    /// ```
    /// use tweetcorpus::twitter::Credentials;
    /// let data = r#"{
    ///     "consumer_key": "ck",
    ///     "consumer_secret": "cs",
    ///     "access_token": "at",
    ///     "access_secret": "as"
    /// }"#;
    /// let credentials = Credentials::parse(data).unwrap();
    /// assert_eq!(credentials.consumer_key(), "ck");
    /// ```
    pub fn parse(data: &str) -> AuthResult {
        Ok(serde_json::from_str(data)?)
    }

    /// Identifies the application to Twitter.
    pub fn consumer_key(&self) -> &str {
        &self.consumer_key
    }

    /// Secret paired with the [consumer key](Credentials::consumer_key).
    pub fn consumer_secret(&self) -> &str {
        &self.consumer_secret
    }

    /// Identifies the account the application acts on behalf of.
    pub fn access_token(&self) -> &str {
        &self.access_token
    }

    /// Secret paired with the [access token](Credentials::access_token).
    pub fn access_secret(&self) -> &str {
        &self.access_secret
    }
}

// Keeps secrets out of logs and panic messages.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("consumer_key", &self.consumer_key)
            .field("consumer_secret", &"<redacted>")
            .field("access_token", &self.access_token)
            .field("access_secret", &"<redacted>")
            .finish()
    }
}

/// Standard result type for [`Credentials`] creation.
pub type AuthResult = Result<Credentials, AuthError>;

/// Indicates an error when loading credentials.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The credentials file could not be read.
    #[error("Could not read credentials: {0}")]
    Io(#[from] io::Error),

    /// The credentials file is not valid JSON or is missing a key.
    #[error("Could not parse credentials: {0}")]
    Parse(#[from] serde_json::Error),
}
