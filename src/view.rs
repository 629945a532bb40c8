// SPDX-License-Identifier: Apache-2.0
// Copyright (C) 2025 Michael Dippery <michael@monkey-robot.com>

//! Draws viewable objects into a terminal window.

use crate::stats::Statistics;
use colored::Colorize;
use indoc::formatdoc;

/// View renderer options.
#[derive(Debug, Default)]
pub struct ViewOptions {
    color: bool,
}

impl ViewOptions {
    /// Incrementally builds a new set of view options.
    ///
    /// # Examples
    ///
    /// ```
    /// use tweetcorpus::view::ViewOptions;
    /// let opts = ViewOptions::build().color(true).build();
    /// ```
    pub fn build() -> ViewOptionsBuilder {
        ViewOptionsBuilder::default()
    }

    fn label(&self, label: &str) -> String {
        if self.color {
            label.bold().to_string()
        } else {
            label.to_string()
        }
    }
}

/// A builder for view options.
///
/// You probably don't want to use this directly; call [`ViewOptions::build()`]
/// and construct it incrementally instead.
#[derive(Debug, Default)]
#[must_use]
pub struct ViewOptionsBuilder {
    color: bool,
}

impl ViewOptionsBuilder {
    /// Sets whether labels are highlighted with terminal colors.
    pub fn color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    /// Finalizes the [`ViewOptions`].
    pub fn build(self) -> ViewOptions {
        ViewOptions { color: self.color }
    }
}

/// Marks an item that can be converted into a string for display on a terminal.
pub trait Viewable {
    /// Converts the item into a string for display on a terminal.
    fn view(&self, opts: &ViewOptions) -> String;
}

impl Viewable for Statistics {
    fn view(&self, opts: &ViewOptions) -> String {
        formatdoc! {"
            {} @{}
            {} {}
            {} {}
            {} {}
            {} {:.2}
            {} {:.2}
            {} {:.2}
            {} {:.2}
            {} {:.2}
            {} {}
            {} {}",
            opts.label("Statistics for"), self.screen_name(),
            opts.label("Tweets:"), self.count(),
            opts.label("Minimum tokens:"), self.min_tokens(),
            opts.label("Maximum tokens:"), self.max_tokens(),
            opts.label("Average tokens:"), self.mean_tokens(),
            opts.label("Average mentions:"), self.mean_mentions(),
            opts.label("Average hashtags:"), self.mean_hashtags(),
            opts.label("Average retweets:"), self.mean_retweets(),
            opts.label("Average favorites:"), self.mean_favorites(),
            opts.label("First tweet:"), self.first_created_at(),
            opts.label("Last tweet:"), self.last_created_at(),
        }
    }
}
