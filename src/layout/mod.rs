pub mod curve;
pub mod scale;
mod text;
mod types;

pub use curve::{Curve, PathCommand, closed_path, path_to_svg};
pub use scale::{PolarGrid, RadiusScale};
pub use text::format_percent;
pub use types::*;

use crate::config::{LayoutConfig, RadarOptions};
use crate::error::ChartError;
use crate::ir::Dataset;
use crate::theme::Theme;
use text::{text_width, wrap_words};
use tracing::debug;

/// Positions every primitive of the chart for `dataset`, which is expected in
/// draw order.
pub fn compute_layout(
    dataset: &Dataset,
    options: &RadarOptions,
    theme: &Theme,
    config: &LayoutConfig,
) -> Result<RadarLayout, ChartError> {
    options.validate()?;
    if dataset.series.is_empty() {
        return Err(ChartError::EmptyData);
    }
    let total = dataset.axis_count();
    if total == 0 {
        return Err(ChartError::EmptySeries { series: 0 });
    }

    let max_value = options.max_value.max(dataset.observed_max);
    if !(max_value > 0.0) {
        return Err(ChartError::DegenerateScale);
    }
    let radius = options.w.min(options.h) / 2.0;
    let grid = PolarGrid::new(total, RadiusScale::new(max_value, radius));
    let levels = options.levels;

    // Outer rings first so the inner ones paint over them.
    let grid_circles = (1..=levels)
        .rev()
        .map(|level| GridCircle {
            level,
            radius: radius / levels as f32 * level as f32,
        })
        .collect();

    let fast = config.fast_text_metrics;
    let line_px = theme.font_size * config.label_line_height;
    let axes = dataset
        .axes
        .iter()
        .enumerate()
        .map(|(index, label)| {
            let lines = wrap_words(
                label,
                options.wrap_width,
                theme.font_size,
                &theme.font_family,
                fast,
            );
            let width = lines
                .iter()
                .map(|line| text_width(line, theme.font_size, &theme.font_family, fast))
                .fold(0.0, f32::max);
            let height = lines.len() as f32 * line_px;
            AxisLayout {
                index,
                angle: grid.axis_angle(index),
                line_end: grid.project(index, max_value * config.axis_overshoot),
                label_anchor: grid.project(index, max_value * options.label_factor),
                label: TextBlock {
                    lines,
                    width,
                    height,
                },
            }
        })
        .collect();

    let level_labels = (1..=levels)
        .rev()
        .map(|level| LevelLabel {
            level,
            x: config.level_label_x,
            y: -(level as f32) * radius / levels as f32,
            text: format_percent(max_value * level as f32 / levels as f32),
        })
        .collect();

    let curve = if options.round_strokes {
        Curve::CardinalClosed {
            tension: config.curve_tension,
        }
    } else {
        Curve::LinearClosed
    };

    let blobs = dataset
        .series
        .iter()
        .enumerate()
        .map(|(series_idx, series)| {
            let points: Vec<PointLayout> = series
                .points
                .iter()
                .enumerate()
                .map(|(axis, point)| {
                    let (x, y) = grid.project(axis, point.value);
                    PointLayout {
                        axis,
                        value: point.value,
                        x,
                        y,
                        id: point.id.clone(),
                        name: point.name.clone(),
                        description: point.description.clone(),
                    }
                })
                .collect();
            let vertices: Vec<(f32, f32)> = points.iter().map(|p| (p.x, p.y)).collect();
            BlobLayout {
                series: series_idx,
                series_id: series.id.clone(),
                name: series.name.clone(),
                color: series.color.clone(),
                average: series.average,
                path: closed_path(&vertices, curve),
                points,
            }
        })
        .collect();

    let margin = options.margin;
    let layout = RadarLayout {
        width: options.w + margin.left + margin.right,
        height: options.h + margin.top + margin.bottom,
        origin: (options.w / 2.0 + margin.left, options.h / 2.0 + margin.top),
        radius,
        max_value,
        grid,
        font_size: theme.font_size,
        opacity_circles: options.opacity_circles,
        grid_circles,
        axes,
        level_labels,
        blobs,
        blob_style: BlobStyle {
            opacity_area: options.opacity_area,
            opacity_stroke: options.opacity_stroke,
            opacity_point: options.opacity_point,
            stroke_width: options.stroke_width,
            dot_radius: options.dot_radius,
            hit_radius: options.dot_radius * config.hit_radius_factor,
        },
        label_line_height: config.label_line_height,
        label_dy: config.label_dy,
        level_label_dy: config.level_label_dy,
    };
    debug!(
        axes = total,
        series = layout.blobs.len(),
        max_value,
        radius,
        "computed radar layout"
    );
    Ok(layout)
}
