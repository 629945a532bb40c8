// SPDX-License-Identifier: Apache-2.0
// Copyright (C) 2025 Michael Dippery <michael@monkey-robot.com>

//! Drives the command-line program.

use crate::conf;
use crate::corpus;
use crate::filter::{DEFAULT_LANGUAGE, TweetFilter};
use crate::http::HTTPError;
use crate::plot;
use crate::stats::{self, Statistics};
use crate::tweet::Tweet;
use crate::twitter::auth::AuthError;
use crate::twitter::client::{self, Exhaustion};
use crate::twitter::service::{Service, TwitterService};
use crate::twitter::{Credentials, Downloader, Outcome};
use crate::view::{ViewOptions, Viewable};
use clap::Parser;
use clap_verbosity_flag::Verbosity;
use log::debug;
use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};
use std::process;
use thiserror::Error;

/// Prints `message` to stderr and exits with `error_code`.
pub fn die(error_code: i32, message: &str) -> ! {
    eprintln!("{}", message);
    process::exit(error_code);
}

/// Program configuration.
#[derive(Debug, Parser)]
#[command(version)]
#[command(about = "Downloads a Twitter user's original tweets into a corpus", long_about = None)]
pub struct Config {
    #[command(flatten)]
    verbosity: Verbosity,

    /// Twitter screen name, without the leading @
    screen_name: String,

    /// Print statistics about the corpus and plot histograms to a PDF
    #[arg(short, long, default_value_t = false)]
    stats: bool,

    /// JSON file holding Twitter API credentials [default: $TWEETCORPUS_KEYS or tokens.json]
    #[arg(short, long, value_name = "PATH")]
    keys: Option<PathBuf>,

    /// Keep at most N tweets
    #[arg(short = 'n', long, value_name = "N")]
    max: Option<usize>,

    /// Compress the saved corpus with gzip
    #[arg(short = 'z', long, default_value_t = false)]
    compress: bool,

    /// Only keep tweets in this language
    #[arg(long, value_name = "CODE", default_value = DEFAULT_LANGUAGE)]
    lang: String,

    /// Stop as soon as Twitter returns a partial page
    #[arg(long, default_value_t = false)]
    stop_on_short_page: bool,

    /// Stop with the tweets downloaded so far instead of waiting out rate limits
    #[arg(long, default_value_t = false)]
    no_wait: bool,
}

impl Config {
    pub fn verbosity(&self) -> Verbosity {
        self.verbosity
    }

    pub fn screen_name(&self) -> &str {
        &self.screen_name
    }

    fn exhaustion(&self) -> Exhaustion {
        if self.stop_on_short_page {
            Exhaustion::ShortPage
        } else {
            Exhaustion::EmptyPage
        }
    }

    fn filter(&self) -> TweetFilter {
        TweetFilter::new(&self.lang)
    }
}

/// An error that stops the program.
#[derive(Debug, Error)]
pub enum Error {
    #[error("{0}")]
    Auth(#[from] AuthError),

    #[error("{0}")]
    Service(#[from] HTTPError),

    #[error("Could not download tweets: {0}")]
    Download(#[from] client::Error),

    #[error("Could not save corpus: {0}")]
    Corpus(#[from] corpus::Error),

    #[error("Could not compute statistics: {0}")]
    Stats(#[from] stats::Error),

    #[error("Could not plot histograms: {0}")]
    Plot(#[from] plot::Error),
}

/// Runs the command-line program.
#[derive(Debug)]
pub struct Runner {
    config: Config,
    credentials: Credentials,
}

impl Runner {
    /// Create a new program runner using the given `config`.
    ///
    /// Returns an error if the credentials file cannot be loaded.
    pub fn new(config: Config) -> Result<Runner, Error> {
        let path = conf::keys_path(config.keys.as_deref());
        debug!("Reading credentials from {}", path.display());
        let credentials = Credentials::from_file(&path)?;
        Ok(Self {
            config,
            credentials,
        })
    }

    /// Run the command-line program using its stored configuration options.
    pub async fn run(&self) -> Result<(), Error> {
        let service =
            TwitterService::new(&self.credentials)?.wait_on_rate_limit(!self.config.no_wait);
        self.run_with(service, Path::new(".")).await
    }

    /// Downloads tweets from `service` and writes the corpus, and the
    /// histograms if asked for, into `dir`.
    ///
    /// The corpus is saved before any statistics are computed, so it is
    /// kept even if they fail.
    async fn run_with<S: Service>(&self, service: S, dir: &Path) -> Result<(), Error> {
        let tweets = self.download(service).await?;

        let path = dir.join(conf::corpus_path(self.config.screen_name()));
        let path = corpus::save(&tweets, path, self.config.compress)?;
        println!("Saved {} tweets to {}", tweets.len(), path.display());

        if self.config.stats {
            self.run_stats(&tweets, dir)?;
        }

        Ok(())
    }

    async fn download<S: Service>(&self, service: S) -> Result<Vec<Tweet>, Error> {
        let outcome = Downloader::new(service)
            .filter(self.config.filter())
            .exhaustion(self.config.exhaustion())
            .download(self.config.screen_name(), self.config.max)
            .await;

        match outcome {
            Outcome::Complete(tweets) => Ok(tweets),
            Outcome::PartialDueToRateLimit(tweets) => {
                eprintln!("{}", rate_limit_notice(tweets.len()));
                Ok(tweets)
            }
            Outcome::Failed(err) => Err(err.into()),
        }
    }

    fn run_stats(&self, tweets: &[Tweet], dir: &Path) -> Result<(), Error> {
        let stats = Statistics::from_corpus(tweets)?;
        let opts = ViewOptions::build()
            .color(io::stdout().is_terminal())
            .build();
        println!("{}", stats.view(&opts));

        let path = dir.join(conf::histogram_path(stats.screen_name()));
        let path = plot::render_statistics(&stats, path)?;
        println!("Saved histograms to {}", path.display());
        Ok(())
    }
}

fn rate_limit_notice(count: usize) -> String {
    format!("Twitter rate limit reached; keeping the {count} tweets downloaded so far")
}
