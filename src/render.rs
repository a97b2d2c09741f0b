use crate::config::RenderConfig;
use crate::interaction::{RadarChart, class_suffix};
use crate::layout::{AxisLayout, BlobLayout, RadarLayout, path_to_svg};
use crate::scene::{Display, ElementId, ElementStyle, Scene, SeriesHandles};
use crate::theme::Theme;
use anyhow::Result;
use std::path::Path;
use tracing::info;

/// SVG for the chart in its current presentation state.
pub fn render_chart_svg(chart: &RadarChart) -> String {
    let config = chart.config();
    render_svg(chart.layout(), chart.scene(), &config.theme, &config.render)
}

pub fn render_svg(layout: &RadarLayout, scene: &Scene, theme: &Theme, config: &RenderConfig) -> String {
    let mut svg = String::new();
    let width = layout.width;
    let height = layout.height;

    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" id=\"{}\" width=\"{width}\" height=\"{height}\" viewBox=\"0 0 {width} {height}\">",
        escape_xml(&config.svg_id)
    ));
    if theme.background != "none" {
        svg.push_str(&format!(
            "<rect width=\"100%\" height=\"100%\" fill=\"{}\"/>",
            escape_xml(&theme.background)
        ));
    }

    svg.push_str(&format!(
        "<g transform=\"translate({:.2},{:.2})\">",
        layout.origin.0, layout.origin.1
    ));
    svg.push_str(
        "<defs><filter id=\"glow\"><feGaussianBlur stdDeviation=\"0\" result=\"coloredBlur\"/><feMerge><feMergeNode in=\"coloredBlur\"/><feMergeNode in=\"SourceGraphic\"/></feMerge></filter></defs>",
    );

    svg.push_str("<g class=\"axisWrapper\">");
    for circle in &layout.grid_circles {
        svg.push_str(&format!(
            "<circle class=\"gridCircle\" r=\"{:.2}\" fill=\"{}\" stroke=\"{}\" fill-opacity=\"{}\" filter=\"url(#glow)\"/>",
            circle.radius,
            escape_xml(&theme.grid_fill),
            escape_xml(&theme.grid_stroke),
            layout.opacity_circles
        ));
    }
    for axis in &layout.axes {
        svg.push_str(&axis_svg(axis, layout, theme));
    }
    for label in &layout.level_labels {
        svg.push_str(&format!(
            "<text class=\"axisLabel\" x=\"{:.2}\" y=\"{:.2}\" dy=\"{}em\" font-size=\"{}px\" font-family=\"{}\" fill=\"{}\">{}</text>",
            label.x,
            label.y,
            layout.level_label_dy,
            theme.font_size,
            escape_xml(&theme.font_family),
            escape_xml(&theme.label_color),
            escape_xml(&label.text)
        ));
    }
    svg.push_str("</g>");

    for (blob, handles) in layout.blobs.iter().zip(scene.series()) {
        svg.push_str(&blob_svg(blob, handles, layout, scene));
    }
    for (blob, handles) in layout.blobs.iter().zip(scene.series()) {
        let suffix = class_suffix(&blob.series_id);
        svg.push_str("<g class=\"radarCircleWrapper\">");
        for (point, id) in blob.points.iter().zip(&handles.hit_circles) {
            svg.push_str(&format!(
                "<circle class=\"radarInvisibleCircle spiderInvisible{suffix}\" data-element=\"{}\" r=\"{:.2}\" cx=\"{:.2}\" cy=\"{:.2}\" fill=\"none\" pointer-events=\"all\"{}/>",
                id.0,
                layout.blob_style.hit_radius,
                point.x,
                point.y,
                visibility_attrs(scene.style(*id))
            ));
        }
        svg.push_str("</g>");
    }

    svg.push_str("</g></svg>");
    svg
}

fn axis_svg(axis: &AxisLayout, layout: &RadarLayout, theme: &Theme) -> String {
    let mut out = String::from("<g class=\"axis\">");
    out.push_str(&format!(
        "<line class=\"line\" x1=\"0\" y1=\"0\" x2=\"{:.2}\" y2=\"{:.2}\" stroke=\"{}\" stroke-width=\"{}px\"/>",
        axis.line_end.0,
        axis.line_end.1,
        escape_xml(&theme.axis_stroke),
        theme.axis_stroke_width
    ));
    let (x, y) = axis.label_anchor;
    out.push_str(&format!(
        "<text class=\"legend\" x=\"{x:.2}\" y=\"{y:.2}\" dy=\"{}em\" text-anchor=\"middle\" font-size=\"{}px\" font-family=\"{}\" fill=\"{}\">",
        layout.label_dy,
        theme.font_size,
        escape_xml(&theme.font_family),
        escape_xml(&theme.label_color)
    ));
    for (idx, line) in axis.label.lines.iter().enumerate() {
        let dy = idx as f32 * layout.label_line_height + layout.label_dy;
        out.push_str(&format!(
            "<tspan x=\"{x:.2}\" y=\"{y:.2}\" dy=\"{dy:.2}em\">{}</tspan>",
            escape_xml(line)
        ));
    }
    out.push_str("</text></g>");
    out
}

fn blob_svg(blob: &BlobLayout, handles: &SeriesHandles, layout: &RadarLayout, scene: &Scene) -> String {
    let suffix = class_suffix(&blob.series_id);
    let color = escape_xml(&blob.color);
    let d = path_to_svg(&blob.path);
    let style = layout.blob_style;
    let opacity = |id: ElementId, fallback: f32| scene.style(id).map(|s| s.opacity).unwrap_or(fallback);

    let mut out = String::from("<g class=\"radarWrapper\">");
    out.push_str(&format!(
        "<path class=\"radarArea spiderArea{suffix}\" data-element=\"{}\" d=\"{d}\" fill=\"{color}\" fill-opacity=\"{}\"{}/>",
        handles.area.0,
        opacity(handles.area, style.opacity_area),
        visibility_attrs(scene.style(handles.area))
    ));
    out.push_str(&format!(
        "<path class=\"radarStroke spiderStroke{suffix}\" data-element=\"{}\" d=\"{d}\" stroke-width=\"{}px\" stroke=\"{color}\" stroke-opacity=\"{}\" fill=\"none\" filter=\"url(#glow)\"{}/>",
        handles.stroke.0,
        style.stroke_width,
        opacity(handles.stroke, style.opacity_stroke),
        visibility_attrs(scene.style(handles.stroke))
    ));
    for (point, id) in blob.points.iter().zip(&handles.markers) {
        out.push_str(&format!(
            "<circle class=\"radarCircle spiderCircle{suffix}\" data-element=\"{}\" r=\"{:.2}\" cx=\"{:.2}\" cy=\"{:.2}\" fill=\"{color}\" fill-opacity=\"{}\"{}/>",
            id.0,
            style.dot_radius,
            point.x,
            point.y,
            opacity(*id, style.opacity_point),
            visibility_attrs(scene.style(*id))
        ));
    }
    out.push_str("</g>");
    out
}

fn visibility_attrs(style: Option<ElementStyle>) -> String {
    let Some(style) = style else {
        return String::new();
    };
    let mut attrs = String::new();
    if style.display == Display::None {
        attrs.push_str(" style=\"display:none\"");
    }
    if style.hidden {
        attrs.push_str(" hidden=\"true\"");
    }
    attrs
}

pub fn write_output_svg(svg: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, svg)?;
            info!(path = %path.display(), bytes = svg.len(), "wrote svg");
        }
        None => {
            print!("{}", svg);
        }
    }
    Ok(())
}

#[cfg(feature = "png")]
pub fn write_output_png(svg: &str, output: &Path, render_cfg: &RenderConfig, theme: &Theme) -> Result<()> {
    let mut opt = usvg::Options::default();
    if let Some(family) = theme
        .font_family
        .split(',')
        .map(|part| part.trim().trim_matches('"').trim_matches('\''))
        .find(|part| !part.is_empty())
    {
        opt.font_family = family.to_string();
    }
    opt.fontdb_mut().load_system_fonts();
    opt.default_size = usvg::Size::from_wh(render_cfg.width, render_cfg.height)
        .ok_or_else(|| anyhow::anyhow!("Invalid default raster size"))?;

    let tree = usvg::Tree::from_str(svg, &opt)?;
    let size = tree.size().to_int_size();
    let mut pixmap = resvg::tiny_skia::Pixmap::new(size.width(), size.height())
        .ok_or_else(|| anyhow::anyhow!("Failed to allocate pixmap"))?;

    let mut pixmap_mut = pixmap.as_mut();
    resvg::render(&tree, resvg::tiny_skia::Transform::default(), &mut pixmap_mut);
    pixmap.save_png(output)?;
    info!(path = %output.display(), width = size.width(), height = size.height(), "wrote png");
    Ok(())
}

pub(crate) fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
