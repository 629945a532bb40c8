// SPDX-License-Identifier: Apache-2.0
// Copyright (C) 2025 Michael Dippery <michael@monkey-robot.com>

//! Saving and loading a downloaded corpus.
//!
//! A corpus is stored as a single pretty-printed JSON array of tweets,
//! optionally gzipped.

use crate::tweet::Tweet;
use flate2::Compression;
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use log::{debug, info};
use serde::Serialize;
use serde_json::Serializer;
use serde_json::ser::PrettyFormatter;
use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Extension given to compressed corpora.
pub const GZIP_EXTENSION: &str = "gz";

/// Standard result type for corpus operations.
pub type Result<T> = std::result::Result<T, Error>;

/// An error reading or writing a corpus.
#[derive(Debug, Error)]
pub enum Error {
    /// The corpus file could not be read or written.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The corpus could not be serialized, or the file did not contain
    /// a corpus.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Writes `tweets` to `path` as JSON indented by four spaces, replacing
/// anything already there.
///
/// If `compress` is true, the JSON is gzipped into a file with `.gz`
/// appended to `path` and the uncompressed file is removed.
///
/// Returns the path of the file that was left on disk.
pub fn save(tweets: &[Tweet], path: impl AsRef<Path>, compress: bool) -> Result<PathBuf> {
    let path = path.as_ref();
    let data = to_json(tweets)?;
    fs::write(path, &data)?;
    debug!("Wrote {} bytes to {}", data.len(), path.display());

    if !compress {
        info!("Saved {} tweets to {}", tweets.len(), path.display());
        return Ok(path.to_path_buf());
    }

    let gz_path = gzip_path(path);
    let mut encoder = GzEncoder::new(BufWriter::new(File::create(&gz_path)?), Compression::default());
    encoder.write_all(&data)?;
    encoder.finish()?.flush()?;
    fs::remove_file(path)?;
    info!("Saved {} tweets to {}", tweets.len(), gz_path.display());
    Ok(gz_path)
}

/// Reads a corpus written by [`save`].
///
/// Files ending in `.gz` are decompressed first.
pub fn load(path: impl AsRef<Path>) -> Result<Vec<Tweet>> {
    let path = path.as_ref();
    let reader = BufReader::new(File::open(path)?);
    let reader: Box<dyn Read> = if is_compressed(path) {
        Box::new(GzDecoder::new(reader))
    } else {
        Box::new(reader)
    };
    Ok(serde_json::from_reader(reader)?)
}

/// `path` with `.gz` appended.
///
/// # Examples
///
/// ```
/// use std::path::PathBuf;
/// use tweetcorpus::corpus::gzip_path;
/// assert_eq!(gzip_path("corpusbot.json"), PathBuf::from("corpusbot.json.gz"));
/// ```
pub fn gzip_path(path: impl AsRef<Path>) -> PathBuf {
    let mut name = OsString::from(path.as_ref());
    name.push(".");
    name.push(GZIP_EXTENSION);
    PathBuf::from(name)
}

fn is_compressed(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == GZIP_EXTENSION)
}

fn to_json(tweets: &[Tweet]) -> Result<Vec<u8>> {
    let mut data = Vec::new();
    let mut serializer = Serializer::with_formatter(&mut data, PrettyFormatter::with_indent(b"    "));
    tweets.serialize(&mut serializer)?;
    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{load_data, tweet_with};
    use tempfile::TempDir;

    fn timeline() -> Vec<Tweet> {
        Tweet::parse_page(&load_data("timeline")).unwrap()
    }

    mod save {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn it_saves_a_corpus_as_json() {
            let dir = TempDir::new().unwrap();
            let path = dir.path().join("corpusbot.json");
            let saved = save(&timeline(), &path, false).unwrap();
            assert_eq!(saved, path);
            assert!(path.exists());
        }

        #[test]
        fn it_indents_with_four_spaces() {
            let dir = TempDir::new().unwrap();
            let path = dir.path().join("corpusbot.json");
            save(&[tweet_with(1, "en", false, false)], &path, false).unwrap();
            let data = fs::read_to_string(&path).unwrap();
            assert!(data.starts_with("[\n    {\n        \"created_at\""), "{data}");
        }

        #[test]
        fn it_overwrites_an_existing_corpus() {
            let dir = TempDir::new().unwrap();
            let path = dir.path().join("corpusbot.json");
            fs::write(&path, "this is not a corpus").unwrap();
            save(&timeline(), &path, false).unwrap();
            assert_eq!(load(&path).unwrap(), timeline());
        }

        #[test]
        fn it_saves_an_empty_corpus() {
            let dir = TempDir::new().unwrap();
            let path = dir.path().join("corpusbot.json");
            save(&[], &path, false).unwrap();
            assert_eq!(fs::read_to_string(&path).unwrap(), "[]");
        }

        #[test]
        fn it_fails_if_the_directory_does_not_exist() {
            let dir = TempDir::new().unwrap();
            let path = dir.path().join("nope").join("corpusbot.json");
            assert!(matches!(save(&timeline(), &path, false), Err(Error::Io(_))));
        }
    }

    mod compress {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn it_replaces_the_corpus_with_a_gzipped_copy() {
            let dir = TempDir::new().unwrap();
            let path = dir.path().join("corpusbot.json");
            let saved = save(&timeline(), &path, true).unwrap();
            assert_eq!(saved, dir.path().join("corpusbot.json.gz"));
            assert!(saved.exists());
            assert!(!path.exists());
        }

        #[test]
        fn it_compresses_exactly_the_uncompressed_bytes() {
            let dir = TempDir::new().unwrap();
            let plain = dir.path().join("plain.json");
            let packed = dir.path().join("packed.json");
            save(&timeline(), &plain, false).unwrap();
            let packed = save(&timeline(), &packed, true).unwrap();

            let mut decompressed = Vec::new();
            GzDecoder::new(File::open(&packed).unwrap())
                .read_to_end(&mut decompressed)
                .unwrap();
            assert_eq!(decompressed, fs::read(&plain).unwrap());
        }
    }

    mod load {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn it_loads_a_saved_corpus_field_for_field() {
            let dir = TempDir::new().unwrap();
            let path = save(&timeline(), dir.path().join("corpusbot.json"), false).unwrap();
            let loaded = load(&path).unwrap();
            assert_eq!(loaded, timeline());
            let keys = |tweet: &Tweet| tweet.fields().keys().cloned().collect::<Vec<_>>();
            assert_eq!(keys(&loaded[0]), keys(&timeline()[0]));
        }

        #[test]
        fn it_loads_a_compressed_corpus() {
            let dir = TempDir::new().unwrap();
            let path = save(&timeline(), dir.path().join("corpusbot.json"), true).unwrap();
            assert_eq!(load(&path).unwrap(), timeline());
        }

        #[test]
        fn it_fails_on_a_file_that_is_not_a_corpus() {
            let dir = TempDir::new().unwrap();
            let path = dir.path().join("corpusbot.json");
            fs::write(&path, r#"{"id": 1}"#).unwrap();
            assert!(matches!(load(&path), Err(Error::Json(_))));
        }

        #[test]
        fn it_fails_on_a_missing_file() {
            let dir = TempDir::new().unwrap();
            assert!(matches!(load(dir.path().join("corpusbot.json")), Err(Error::Io(_))));
        }
    }
}
