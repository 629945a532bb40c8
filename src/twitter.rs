// SPDX-License-Identifier: Apache-2.0
// Copyright (C) 2025 Michael Dippery <michael@monkey-robot.com>

//! Twitter API clients and services for communicating with Twitter over HTTP.

pub mod auth;
pub mod client;
pub mod oauth;
pub mod service;

pub use auth::Credentials;
pub use client::{Downloader, Outcome};
