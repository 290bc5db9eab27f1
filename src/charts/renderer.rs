//! Static Chart Renderer
//! Saves the analysis charts as PNG images using plotters.
//!
//! Layout mirrors the interactive charts:
//! 1. Ranking: "Top N YouTubers ranking by {metric}", one bar per channel,
//!    channel names rotated under the x-axis
//! 2. Scatter: "Subscribers vs. Video Views", semi-transparent points

use crate::charts::ChartPlotter;
use crate::data::{RankedChannel, RankingMetric};
use plotters::coord::ranged1d::SegmentValue;
use plotters::prelude::*;
use plotters::style::FontTransform;
use std::fmt::Display;
use std::path::Path;
use thiserror::Error;

pub const DEFAULT_SIZE: (u32, u32) = (1200, 800);

const BAR: RGBColor = RGBColor(52, 152, 219);
const POINT: RGBColor = RGBColor(31, 119, 180);
const FONT: &str = "sans-serif";

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Nothing to draw")]
    NoData,
    #[error("Drawing failed: {0}")]
    Draw(String),
}

fn draw_err<E: Display>(e: E) -> RenderError {
    RenderError::Draw(e.to_string())
}

pub struct StaticChartRenderer;

impl StaticChartRenderer {
    /// Render the ranking bar chart to a PNG file.
    pub fn render_ranking_png(
        path: &Path,
        ranked: &[RankedChannel],
        metric: RankingMetric,
        size: (u32, u32),
    ) -> Result<(), RenderError> {
        if ranked.is_empty() {
            return Err(RenderError::NoData);
        }

        let root = BitMapBackend::new(path, size).into_drawing_area();
        root.fill(&WHITE).map_err(draw_err)?;

        let names: Vec<String> = ranked.iter().map(|r| r.name.clone()).collect();
        let y_max = Self::axis_upper_bound(ranked.iter().map(|r| r.value));

        let mut chart = ChartBuilder::on(&root)
            .caption(
                format!("Top {} YouTubers ranking by {}", ranked.len(), metric),
                (FONT, 26),
            )
            .margin(20)
            .x_label_area_size(160)
            .y_label_area_size(90)
            .build_cartesian_2d((0..ranked.len()).into_segmented(), 0f64..y_max)
            .map_err(draw_err)?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_desc("Youtuber")
            .y_desc(format!("Number of {}", metric))
            .x_labels(ranked.len())
            .x_label_formatter(&|segment| match segment {
                SegmentValue::CenterOf(i) | SegmentValue::Exact(i) => {
                    names.get(*i).cloned().unwrap_or_default()
                }
                SegmentValue::Last => String::new(),
            })
            .x_label_style((FONT, 14).into_font().transform(FontTransform::Rotate90))
            .y_label_formatter(&|v| ChartPlotter::format_compact(*v))
            .draw()
            .map_err(draw_err)?;

        chart
            .draw_series(
                Histogram::vertical(&chart)
                    .style(BAR.filled())
                    .margin(10)
                    .data(ranked.iter().enumerate().map(|(i, r)| (i, r.value))),
            )
            .map_err(draw_err)?;

        root.present().map_err(draw_err)?;
        log::info!("Saved ranking chart to {}", path.display());
        Ok(())
    }

    /// Render the subscribers-vs-views scatter plot to a PNG file.
    pub fn render_scatter_png(
        path: &Path,
        points: &[[f64; 2]],
        size: (u32, u32),
    ) -> Result<(), RenderError> {
        if points.is_empty() {
            return Err(RenderError::NoData);
        }

        let root = BitMapBackend::new(path, size).into_drawing_area();
        root.fill(&WHITE).map_err(draw_err)?;

        let x_max = Self::axis_upper_bound(points.iter().map(|p| p[0]));
        let y_max = Self::axis_upper_bound(points.iter().map(|p| p[1]));

        let mut chart = ChartBuilder::on(&root)
            .caption("Subscribers vs. Video Views", (FONT, 26))
            .margin(20)
            .x_label_area_size(60)
            .y_label_area_size(90)
            .build_cartesian_2d(0f64..x_max, 0f64..y_max)
            .map_err(draw_err)?;

        chart
            .configure_mesh()
            .x_desc(RankingMetric::Subscribers.display_name())
            .y_desc(RankingMetric::VideoViews.display_name())
            .x_label_formatter(&|v| ChartPlotter::format_compact(*v))
            .y_label_formatter(&|v| ChartPlotter::format_compact(*v))
            .draw()
            .map_err(draw_err)?;

        chart
            .draw_series(
                points
                    .iter()
                    .map(|p| Circle::new((p[0], p[1]), 4, POINT.mix(0.5).filled())),
            )
            .map_err(draw_err)?;

        root.present().map_err(draw_err)?;
        log::info!("Saved scatter plot to {}", path.display());
        Ok(())
    }

    /// Upper axis bound: the maximum plus headroom, rounded up to a nice step.
    pub fn axis_upper_bound(values: impl Iterator<Item = f64>) -> f64 {
        let max = values.filter(|v| v.is_finite()).fold(0.0f64, f64::max);
        if max <= 0.0 {
            return 1.0;
        }

        let step = Self::nice_step(max * 1.1, 8);
        ((max * 1.1) / step).ceil() * step
    }

    fn nice_step(range: f64, target_steps: usize) -> f64 {
        let raw_step = range / target_steps as f64;
        let magnitude = 10f64.powf(raw_step.log10().floor());
        let normalized = raw_step / magnitude;

        let nice = if normalized <= 1.0 {
            1.0
        } else if normalized <= 2.0 {
            2.0
        } else if normalized <= 5.0 {
            5.0
        } else {
            10.0
        };

        nice * magnitude
    }
}
