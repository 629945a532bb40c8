// SPDX-License-Identifier: Apache-2.0
// Copyright (C) 2025 Michael Dippery <michael@monkey-robot.com>

//! Helpful utilities for working with text.

use htmlentity::entity::{self, ICodedDataTrait};
use regex::Regex;
use std::sync::LazyLock;

/// Converts HTML entities into their single-character equivalents.
///
/// For example, Twitter returns "&" as "&amp;", ">" as "&gt;",
/// and "<" as "&lt;"; this function will convert those HTML
/// entities into single, human-readable characters.
///
/// Leading and trailing whitespace will also be trimmed from the string.
///
/// # Examples
///
/// ```
/// use tweetcorpus::text::convert_html_entities;
/// let raw = "&lt;This &amp; That&gt;";
/// let converted = convert_html_entities(raw);
/// assert_eq!(converted, "<This & That>");
/// ```
///
/// ```
/// use tweetcorpus::text::convert_html_entities;
/// let raw = "  &lt;This &amp; That&gt;  ";
/// let converted = convert_html_entities(raw);
/// assert_eq!(converted, "<This & That>");
/// ```
///
/// ```
/// use tweetcorpus::text::convert_html_entities;
/// let raw = "";
/// let converted = convert_html_entities(raw);
/// assert_eq!(converted, raw);
/// ```
pub fn convert_html_entities(text: &str) -> String {
    let text = text.trim();
    entity::decode(text.as_bytes())
        .to_string()
        .unwrap_or(text.to_string())
}

// Alternatives are tried in order at each position, so the more specific
// shapes (URLs, emoticons, handles) have to come before plain words.
const TOKEN_PATTERNS: &[&str] = &[
    // URLs
    r#"(?:https?://|www\.)[^\s<>"]+"#,
    // Phone numbers, with optional country and area codes
    r"(?:(?:\+?[01][ *\-.\)]*)?(?:[\(]?\d{3}[ *\-.\)]*)?\d{3}[ *\-.\)]*\d{4})",
    // Emoticons: eyes, optional nose, mouth (or the reverse), and hearts
    r#"[<>]?[:;=8][\-o\*']?[\)\]\(\[dDpP/:\}\{@\|\\]"#,
    r#"[\)\]\(\[dDpP/:\}\{@\|\\][\-o\*']?[:;=8][<>]?"#,
    r"</?3",
    // HTML tags
    r"<[^>\s]+>",
    // ASCII arrows
    r"[\-]+>|<[\-]+",
    // Twitter handles
    r"@\w+",
    // Hashtags
    r"#+\w+(?:['\-]\w+)*",
    // Email addresses
    r"[\w.+\-]+@[\w\-]+\.(?:[\w\-]\.?)+[\w\-]",
    // Words with apostrophes or dashes
    r"[^\W\d_](?:[^\W\d_]|['\-_])+[^\W\d_]",
    // Numbers, including fractions and decimals
    r"[+\-]?\d+[,/.:\-]\d+[+\-]?",
    // Words without apostrophes or dashes
    r"\w+",
    // Ellipses
    r"\.(?:\s*\.)+",
    // Everything else that isn't whitespace
    r"\S",
];

static TOKENIZER: LazyLock<Regex> = LazyLock::new(|| {
    let pattern = TOKEN_PATTERNS.join("|");
    Regex::new(&pattern).expect("token patterns should form a valid regex")
});

/// Splits the text of a tweet into tokens.
///
/// The tokenizer understands the informal conventions of tweets, so
/// handles, hashtags, URLs, and emoticons come out as single tokens rather
/// than being split apart at their punctuation. HTML entities are decoded
/// before tokenizing.
///
/// # Examples
///
/// ```
/// use tweetcorpus::text::tokenize;
/// let tokens = tokenize("@remy: This is waaaaayyyy too much for you!!!!!!");
/// assert_eq!(
///     tokens,
///     vec!["@remy", ":", "This", "is", "waaaaayyyy", "too", "much", "for", "you",
///          "!", "!", "!", "!", "!", "!"],
/// );
/// ```
pub fn tokenize(text: &str) -> Vec<String> {
    let text = convert_html_entities(text);
    TOKENIZER
        .find_iter(&text)
        .map(|m| m.as_str().to_string())
        .collect()
}
