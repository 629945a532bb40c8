// SPDX-License-Identifier: Apache-2.0
// Copyright (C) 2025 Michael Dippery <michael@monkey-robot.com>

//! OAuth 1.0a request signing.
//!
//! Every request to the Twitter API is signed with HMAC-SHA1 over a
//! canonical "base string" built from the HTTP method, the URL, and every
//! query and OAuth parameter. See Twitter's [Creating a signature] guide
//! for the gory details.
//!
//! [Creating a signature]: https://developer.twitter.com/en/docs/authentication/oauth-1-0a/creating-a-signature

use crate::clock::Clock;
use crate::twitter::Credentials;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use hmac::{Hmac, Mac};
use log::trace;
use rand::Rng;
use rand::distributions::Alphanumeric;
use sha1::Sha1;

/// A request parameter as a name-value pair.
pub type Param = (String, String);

/// Signs requests on behalf of the account identified by a set of
/// credentials.
#[derive(Debug)]
pub struct Signer<'a> {
    credentials: &'a Credentials,
}

impl<'a> Signer<'a> {
    /// Creates a signer for the given credentials.
    pub fn new(credentials: &'a Credentials) -> Self {
        Self { credentials }
    }

    /// Builds the value of the `Authorization` header for a request.
    ///
    /// `params` are the request's query parameters, which are covered by
    /// the signature. The timestamp comes from `clock` and a fresh nonce
    /// is generated for every call.
    pub fn authorization<C: Clock>(
        &self,
        method: &str,
        url: &str,
        params: &[Param],
        clock: &C,
    ) -> String {
        let timestamp = clock.now().timestamp().to_string();
        self.authorization_with(method, url, params, &timestamp, &nonce())
    }

    fn authorization_with(
        &self,
        method: &str,
        url: &str,
        params: &[Param],
        timestamp: &str,
        nonce: &str,
    ) -> String {
        let mut oauth_params = self.oauth_params(timestamp, nonce);
        let all_params = params
            .iter()
            .chain(oauth_params.iter())
            .cloned()
            .collect::<Vec<_>>();
        let signature = signature(
            method,
            url,
            &all_params,
            self.credentials.consumer_secret(),
            self.credentials.access_secret(),
        );
        oauth_params.push((String::from("oauth_signature"), signature));
        oauth_params.sort();

        let fields = oauth_params
            .iter()
            .map(|(k, v)| format!("{}=\"{}\"", encode(k), encode(v)))
            .collect::<Vec<_>>()
            .join(", ");
        format!("OAuth {fields}")
    }

    fn oauth_params(&self, timestamp: &str, nonce: &str) -> Vec<Param> {
        [
            ("oauth_consumer_key", self.credentials.consumer_key()),
            ("oauth_nonce", nonce),
            ("oauth_signature_method", "HMAC-SHA1"),
            ("oauth_timestamp", timestamp),
            ("oauth_token", self.credentials.access_token()),
            ("oauth_version", "1.0"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
    }
}

/// Percent-encodes a string as RFC 3986 requires, which is what OAuth
/// expects: everything except `A-Z a-z 0-9 - . _ ~` is escaped.
pub fn encode(s: &str) -> String {
    urlencoding::encode(s).into_owned()
}

/// A random 32-character alphanumeric nonce.
pub fn nonce() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(32)
        .map(char::from)
        .collect()
}

/// The OAuth signature base string for a request.
///
/// `params` must include both the request parameters and the OAuth
/// parameters (minus the signature itself).
pub fn base_string(method: &str, url: &str, params: &[Param]) -> String {
    let mut encoded = params
        .iter()
        .map(|(k, v)| (encode(k), encode(v)))
        .collect::<Vec<_>>();
    encoded.sort();

    let param_string = encoded
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&");

    format!(
        "{}&{}&{}",
        method.to_uppercase(),
        encode(url),
        encode(&param_string)
    )
}

/// Computes the HMAC-SHA1 signature of a request, base64-encoded.
pub fn signature(
    method: &str,
    url: &str,
    params: &[Param],
    consumer_secret: &str,
    token_secret: &str,
) -> String {
    let base = base_string(method, url, params);
    trace!("OAuth base string: {base}");

    let key = format!("{}&{}", encode(consumer_secret), encode(token_secret));
    let mut mac =
        Hmac::<Sha1>::new_from_slice(key.as_bytes()).expect("HMAC can take a key of any size");
    mac.update(base.as_bytes());
    STANDARD.encode(mac.finalize().into_bytes())
}
