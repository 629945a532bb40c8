// SPDX-License-Identifier: Apache-2.0
// Copyright (C) 2025 Michael Dippery <michael@monkey-robot.com>

//! Histograms of corpus statistics, rendered to PDF.
//!
//! Each histogram is drawn on its own landscape A4 page. Layout is worked
//! out in millimeters by the plain functions in this module and only then
//! handed to [`printpdf`] for drawing.

use crate::stats::{Histogram, Statistics};
use log::info;
use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Line, Mm, PdfDocument, PdfLayerReference, Point, Rect,
    Rgb,
};
use std::fs::File;
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};
use thiserror::Error;

const PAGE_WIDTH: f32 = 297.0;
const PAGE_HEIGHT: f32 = 210.0;
const LAYER: &str = "Histogram";

/// Most labels drawn along either axis.
const MAX_TICKS: usize = 25;

/// An error rendering histograms.
#[derive(Debug, Error)]
pub enum Error {
    /// The PDF could not be created.
    #[error("Could not render PDF: {0}")]
    Pdf(#[from] printpdf::Error),

    /// The PDF could not be written to disk.
    #[error("Could not write PDF: {0}")]
    Io(#[from] io::Error),
}

/// A histogram and the labels to draw with it.
#[derive(Debug)]
pub struct Chart {
    title: String,
    x_label: &'static str,
    y_label: &'static str,
    histogram: Histogram,
}

impl Chart {
    /// Distribution of the number of tokens in each tweet.
    pub fn tokens(stats: &Statistics) -> Self {
        Self {
            title: format!(
                "A histogram of numbers of tokens in all tweets of @{}",
                stats.screen_name()
            ),
            x_label: "number of tokens",
            y_label: "frequency",
            histogram: stats.token_histogram(),
        }
    }

    /// Distribution of the hour of the day tweets were posted.
    pub fn hours(stats: &Statistics) -> Self {
        Self {
            title: format!(
                "A histogram of the times (in UTC) of tweets of @{}",
                stats.screen_name()
            ),
            x_label: "time",
            y_label: "frequency",
            histogram: stats.hour_histogram(),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn histogram(&self) -> &Histogram {
        &self.histogram
    }
}

/// A rectangle on the page, in millimeters from the bottom-left corner.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Area {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Area {
    /// The region of a page that bars are drawn in, leaving room for the
    /// title and axis labels.
    pub fn plot() -> Self {
        Self {
            x: 30.0,
            y: 30.0,
            width: PAGE_WIDTH - 50.0,
            height: PAGE_HEIGHT - 60.0,
        }
    }

    fn top(&self) -> f32 {
        self.y + self.height
    }

    fn right(&self) -> f32 {
        self.x + self.width
    }
}

/// Lays out one bar per nonempty bin of `histogram` across `area`.
///
/// Bins share the width of the area equally and the fullest bin reaches
/// the top of the area.
pub fn bars(histogram: &Histogram, area: &Area) -> Vec<Area> {
    let bins = histogram.bins();
    let max_count = histogram.max_count();
    if bins.is_empty() || max_count == 0 {
        return vec![];
    }

    let bin_width = area.width / bins.len() as f32;
    bins.iter()
        .enumerate()
        .filter(|(_, (_, count))| *count > 0)
        .map(|(i, (_, count))| Area {
            x: area.x + i as f32 * bin_width,
            y: area.y,
            width: bin_width,
            height: area.height * *count as f32 / max_count as f32,
        })
        .collect()
}

/// The distance between labeled values so that no more than `max_ticks`
/// labels are drawn for `n` values.
pub fn tick_step(n: usize, max_ticks: usize) -> usize {
    n.div_ceil(max_ticks.max(1)).max(1)
}

/// Counts labeled on the vertical axis, from zero up to at least
/// `max_count`.
pub fn count_ticks(max_count: usize) -> Vec<usize> {
    let step = tick_step(max_count, 5);
    (0..=max_count.div_ceil(step) * step).step_by(step).collect()
}

/// Renders `charts` into a PDF at `path`, one chart per page.
pub fn render(charts: &[Chart], path: impl AsRef<Path>) -> Result<PathBuf, Error> {
    let path = path.as_ref();
    let title = charts.first().map_or("Histograms", |chart| chart.title());
    let (doc, page, layer) = PdfDocument::new(title, Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), LAYER);
    let font = doc.add_builtin_font(BuiltinFont::Helvetica)?;

    for (i, chart) in charts.iter().enumerate() {
        let layer = if i == 0 {
            doc.get_page(page).get_layer(layer)
        } else {
            let (page, layer) = doc.add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), LAYER);
            doc.get_page(page).get_layer(layer)
        };
        draw(&layer, &font, chart, &Area::plot());
    }

    doc.save(&mut BufWriter::new(File::create(path)?))?;
    info!("Wrote {} histograms to {}", charts.len(), path.display());
    Ok(path.to_path_buf())
}

/// Renders the token and posting-time histograms for a corpus into a PDF
/// at `path`.
pub fn render_statistics(stats: &Statistics, path: impl AsRef<Path>) -> Result<PathBuf, Error> {
    render(&[Chart::tokens(stats), Chart::hours(stats)], path)
}

fn draw(layer: &PdfLayerReference, font: &IndirectFontRef, chart: &Chart, area: &Area) {
    let histogram = chart.histogram();

    layer.use_text(chart.title(), 14.0, Mm(area.x), Mm(area.top() + 12.0), font);
    layer.use_text(chart.x_label, 10.0, Mm(area.x + area.width / 2.0), Mm(area.y - 18.0), font);
    layer.use_text(chart.y_label, 10.0, Mm(area.x - 25.0), Mm(area.top() + 4.0), font);

    layer.set_fill_color(Color::Rgb(Rgb::new(0.5, 0.65, 0.85, None)));
    for bar in bars(histogram, area) {
        layer.add_rect(Rect::new(
            Mm(bar.x),
            Mm(bar.y),
            Mm(bar.x + bar.width),
            Mm(bar.y + bar.height),
        ));
    }

    layer.set_outline_color(Color::Rgb(Rgb::new(0.0, 0.0, 0.0, None)));
    layer.set_outline_thickness(0.5);
    layer.add_line(polyline(&[
        (area.x, area.top()),
        (area.x, area.y),
        (area.right(), area.y),
    ]));

    layer.set_fill_color(Color::Rgb(Rgb::new(0.0, 0.0, 0.0, None)));
    let bins = histogram.bins();
    if !bins.is_empty() {
        let bin_width = area.width / bins.len() as f32;
        let step = tick_step(bins.len(), MAX_TICKS);
        for (i, (value, _)) in bins.iter().enumerate().step_by(step) {
            let x = area.x + (i as f32 + 0.5) * bin_width;
            layer.use_text(value.to_string(), 8.0, Mm(x - 1.5), Mm(area.y - 6.0), font);
        }
    }

    let max_count = histogram.max_count().max(1);
    for count in count_ticks(histogram.max_count()) {
        if count <= max_count {
            let y = area.y + area.height * count as f32 / max_count as f32;
            layer.use_text(count.to_string(), 8.0, Mm(area.x - 8.0), Mm(y - 1.0), font);
        }
    }
}

fn polyline(points: &[(f32, f32)]) -> Line {
    Line {
        points: points
            .iter()
            .map(|&(x, y)| (Point::new(Mm(x), Mm(y)), false))
            .collect(),
        is_closed: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::accepted;
    use crate::test_utils::load_data;
    use crate::tweet::Tweet;

    fn statistics() -> Statistics {
        let tweets = Tweet::parse_page(&load_data("timeline"))
            .unwrap()
            .into_iter()
            .filter(accepted)
            .collect::<Vec<_>>();
        Statistics::from_corpus(&tweets).unwrap()
    }

    fn area() -> Area {
        Area {
            x: 10.0,
            y: 20.0,
            width: 100.0,
            height: 50.0,
        }
    }

    mod layout {
        use super::*;

        #[test]
        fn it_draws_one_bar_per_nonempty_bin() {
            let histogram = Histogram::new([0, 1, 1, 3], 0..=4);
            let bars = bars(&histogram, &area());
            assert_eq!(bars.len(), 3);
        }

        #[test]
        fn it_scales_bars_to_the_fullest_bin() {
            let histogram = Histogram::new([0, 1, 1, 3], 0..=4);
            let bars = bars(&histogram, &area());
            assert_eq!(
                bars[1],
                Area {
                    x: 30.0,
                    y: 20.0,
                    width: 20.0,
                    height: 50.0
                }
            );
            assert_eq!(bars[0].height, 25.0);
            assert_eq!(bars[2].x, 70.0);
        }

        #[test]
        fn it_draws_nothing_for_an_empty_histogram() {
            let histogram = Histogram::new(Vec::new(), 0..=4);
            assert!(bars(&histogram, &area()).is_empty());
        }

        #[test]
        fn it_spaces_out_labels() {
            assert_eq!(tick_step(24, 25), 1);
            assert_eq!(tick_step(60, 25), 3);
            assert_eq!(tick_step(0, 25), 1);
        }

        #[test]
        fn it_labels_counts_from_zero() {
            assert_eq!(count_ticks(3), vec![0, 1, 2, 3]);
            assert_eq!(count_ticks(12), vec![0, 3, 6, 9, 12]);
            assert_eq!(count_ticks(0), vec![0]);
        }
    }

    mod charts {
        use super::*;

        #[test]
        fn it_titles_charts_after_the_author() {
            let stats = statistics();
            assert_eq!(
                Chart::tokens(&stats).title(),
                "A histogram of numbers of tokens in all tweets of @corpusbot"
            );
            assert!(Chart::hours(&stats).title().ends_with("@corpusbot"));
        }

        #[test]
        fn it_charts_every_hour() {
            let chart = Chart::hours(&statistics());
            assert_eq!(chart.histogram().bins().len(), 24);
        }
    }

    mod render {
        use super::*;
        use std::fs;
        use tempfile::TempDir;

        #[test]
        fn it_writes_a_pdf() {
            let dir = TempDir::new().unwrap();
            let path = dir.path().join("corpusbot-histograms.pdf");
            let written = render_statistics(&statistics(), &path).unwrap();
            assert_eq!(written, path);
            let data = fs::read(&path).unwrap();
            assert!(data.starts_with(b"%PDF"));
        }
    }
}
