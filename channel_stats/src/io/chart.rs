//! SVG line charts of the synthetic history.

use std::path::PathBuf;

use async_trait::async_trait;
use plotters::coord::Shift;
use plotters::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::io::sink::{DataSink, SinkError, file_stem, write_file};
use crate::models::bundle::StatsBundle;
use crate::models::history::{HistorySeries, Metric, SyntheticHistory};
use crate::report::format_thousands;

const CHART_SIZE: (u32, u32) = (1200, 600);
const COMBINED_SIZE: (u32, u32) = (1200, 1200);
const TEXT_COLOR: RGBColor = RGBColor(235, 235, 235);

/// Chart colours as `#RRGGBB` strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ChartPalette {
    pub subscribers: String,
    pub views: String,
    pub videos: String,
    pub background: String,
    pub grid: String,
}

impl Default for ChartPalette {
    fn default() -> Self {
        Self {
            subscribers: "#FF0000".into(),
            views: "#00D4AA".into(),
            videos: "#FF6B35".into(),
            background: "#0F0F0F".into(),
            grid: "#272727".into(),
        }
    }
}

impl ChartPalette {
    pub fn metric_color(&self, metric: Metric) -> RGBColor {
        let hex = match metric {
            Metric::Subscribers => &self.subscribers,
            Metric::Views => &self.views,
            Metric::Videos => &self.videos,
        };
        parse_hex_color(hex).unwrap_or(RGBColor(255, 255, 255))
    }

    pub fn background_color(&self) -> RGBColor {
        parse_hex_color(&self.background).unwrap_or(RGBColor(15, 15, 15))
    }

    pub fn grid_color(&self) -> RGBColor {
        parse_hex_color(&self.grid).unwrap_or(RGBColor(39, 39, 39))
    }

    /// Names of fields whose value is not a valid `#RRGGBB` colour.
    pub fn invalid_fields(&self) -> Vec<&'static str> {
        [
            ("subscribers", &self.subscribers),
            ("views", &self.views),
            ("videos", &self.videos),
            ("background", &self.background),
            ("grid", &self.grid),
        ]
        .into_iter()
        .filter(|(_, v)| parse_hex_color(v).is_none())
        .map(|(k, _)| k)
        .collect()
    }
}

/// Parses `#RRGGBB` (the leading `#` is optional).
pub fn parse_hex_color(hex: &str) -> Option<RGBColor> {
    let digits = hex.trim().trim_start_matches('#');
    if digits.len() != 6 || !digits.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
    Some(RGBColor(channel(0)?, channel(2)?, channel(4)?))
}

/// Y-axis bounds with 10 % padding, never below zero.
fn y_range(values: &[u64]) -> (u64, u64) {
    let (Some(&min_val), Some(&max_val)) = (values.iter().min(), values.iter().max()) else {
        return (0, 100);
    };
    let padding = ((max_val - min_val) as f64 * 0.1).max(1.0) as u64;
    (min_val.saturating_sub(padding), max_val.saturating_add(padding))
}

fn render_err<E: std::fmt::Debug>(e: E) -> SinkError {
    SinkError::Render {
        message: format!("{e:?}"),
    }
}

fn draw_panel<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    series: &HistorySeries,
    caption: &str,
    palette: &ChartPalette,
    font_size: u32,
) -> Result<(), SinkError> {
    if series.is_empty() {
        return Err(SinkError::Empty {
            message: format!("{} history has no points", series.metric),
        });
    }

    let values = series.values();
    let labels: Vec<String> = series
        .dates()
        .iter()
        .map(|d| d.format("%Y-%m").to_string())
        .collect();
    let x_max = values.len().max(2) - 1;
    let (y_min, y_max) = y_range(&values);

    let line_color = palette.metric_color(series.metric);
    let grid_color = palette.grid_color();

    let mut chart = ChartBuilder::on(area)
        .caption(caption, ("sans-serif", font_size).into_font().color(&TEXT_COLOR))
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(100)
        .build_cartesian_2d(0usize..x_max, y_min..y_max)
        .map_err(render_err)?;

    chart
        .configure_mesh()
        .x_desc("Date")
        .y_desc(series.metric.label())
        .x_labels(labels.len().min(12))
        .y_labels(8)
        .axis_style(ShapeStyle::from(&RGBColor(120, 120, 120)).stroke_width(2))
        .light_line_style(ShapeStyle::from(&grid_color).stroke_width(1))
        .bold_line_style(ShapeStyle::from(&grid_color).stroke_width(1))
        .label_style(("sans-serif", 14).into_font().color(&TEXT_COLOR))
        .axis_desc_style(("sans-serif", 16).into_font().color(&TEXT_COLOR))
        .x_label_formatter(&|x| labels.get(*x).cloned().unwrap_or_default())
        .y_label_formatter(&|y| format_thousands(*y))
        .draw()
        .map_err(render_err)?;

    let points: Vec<(usize, u64)> = values.iter().copied().enumerate().collect();

    chart
        .draw_series(
            AreaSeries::new(points.clone(), y_min, &line_color.mix(0.2))
                .border_style(line_color.stroke_width(3)),
        )
        .map_err(render_err)?;
    chart
        .draw_series(
            points
                .iter()
                .map(|&(x, y)| Circle::new((x, y), 5, line_color.filled())),
        )
        .map_err(render_err)?;

    Ok(())
}

/// Renders one metric's history as an SVG document.
pub fn render_metric_svg(
    series: &HistorySeries,
    channel_title: &str,
    palette: &ChartPalette,
) -> Result<String, SinkError> {
    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, CHART_SIZE).into_drawing_area();
        root.fill(&palette.background_color()).map_err(render_err)?;
        let caption = format!("{} (synthetic) - {}", series.metric.label(), channel_title);
        draw_panel(&root, series, &caption, palette, 26)?;
        root.present().map_err(render_err)?;
    }
    Ok(svg)
}

/// Renders all three metrics stacked in one SVG document.
pub fn render_combined_svg(
    history: &SyntheticHistory,
    channel_title: &str,
    palette: &ChartPalette,
) -> Result<String, SinkError> {
    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, COMBINED_SIZE).into_drawing_area();
        root.fill(&palette.background_color()).map_err(render_err)?;
        let root = root
            .titled(
                &format!("Channel development (synthetic) - {channel_title}"),
                ("sans-serif", 28).into_font().color(&TEXT_COLOR),
            )
            .map_err(render_err)?;

        let panels = root.split_evenly((3, 1));
        for (panel, metric) in panels.iter().zip(Metric::ALL) {
            draw_panel(panel, history.series(metric), metric.label(), palette, 20)?;
        }
        root.present().map_err(render_err)?;
    }
    Ok(svg)
}

/// Writes one SVG per metric plus a combined chart into a directory.
pub struct ChartSink {
    output_dir: PathBuf,
    palette: ChartPalette,
}

impl ChartSink {
    pub fn new(output_dir: impl Into<PathBuf>, palette: ChartPalette) -> Self {
        Self {
            output_dir: output_dir.into(),
            palette,
        }
    }
}

#[async_trait]
impl DataSink for ChartSink {
    type Output = Vec<PathBuf>;

    async fn write(&self, bundle: &StatsBundle) -> Result<Vec<PathBuf>, SinkError> {
        let title = &bundle.channel.title;
        let stem = file_stem(title);
        let mut written = Vec::with_capacity(4);

        for metric in Metric::ALL {
            let svg = render_metric_svg(bundle.history.series(metric), title, &self.palette)?;
            let name = format!("{stem}_{}.svg", metric.as_str());
            written.push(write_file(&self.output_dir, &name, svg.as_bytes()).await?);
        }

        let svg = render_combined_svg(&bundle.history, title, &self.palette)?;
        let name = format!("{stem}_combined.svg");
        written.push(write_file(&self.output_dir, &name, svg.as_bytes()).await?);

        info!(dir = %self.output_dir.display(), files = written.len(), "charts written");
        Ok(written)
    }
}
