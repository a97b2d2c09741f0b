use crate::error::ChartError;
use crate::theme::{CATEGORY10, Theme};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margin {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Margin {
    pub fn uniform(value: f32) -> Self {
        Self {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }
}

impl Default for Margin {
    fn default() -> Self {
        Self::uniform(20.0)
    }
}

/// The caller-facing chart options.
///
/// Keys and defaults follow the option record hosts already pass to radar
/// chart scripts, so an existing options object can be loaded unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RadarOptions {
    /// Width of the circle area.
    pub w: f32,
    /// Height of the circle area.
    pub h: f32,
    pub margin: Margin,
    /// Number of concentric background circles.
    pub levels: usize,
    /// Floor for the value represented by the outermost circle.
    pub max_value: f32,
    /// How far past the outer circle axis labels sit, as a multiple of it.
    pub label_factor: f32,
    /// Pixel width after which an axis label wraps.
    pub wrap_width: f32,
    pub opacity_area: f32,
    pub opacity_stroke: f32,
    pub opacity_point: f32,
    pub dot_radius: f32,
    pub opacity_circles: f32,
    pub stroke_width: f32,
    /// Smooth the blob outline with a closed cardinal curve.
    pub round_strokes: bool,
    /// Ordinal palette, assigned to series ids in input order.
    pub color: Vec<String>,
    /// Name of the point field holding the axis label.
    pub axis_name: String,
    /// Name of the point field holding the numeric value.
    pub value: String,
    /// Draw larger blobs first so smaller ones stay visible on top.
    pub sort_areas: bool,
}

impl Default for RadarOptions {
    fn default() -> Self {
        Self {
            w: 800.0,
            h: 800.0,
            margin: Margin::default(),
            levels: 4,
            max_value: 0.0,
            label_factor: 1.25,
            wrap_width: 60.0,
            opacity_area: 0.35,
            opacity_stroke: 1.0,
            opacity_point: 1.0,
            dot_radius: 4.0,
            opacity_circles: 0.05,
            stroke_width: 2.0,
            round_strokes: false,
            color: CATEGORY10.iter().map(|c| c.to_string()).collect(),
            axis_name: "axis".to_string(),
            value: "value".to_string(),
            sort_areas: true,
        }
    }
}

impl RadarOptions {
    /// Options used by the interactive spider chart page: a wide side margin
    /// for labels, eleven percentage levels up to 55% and smoothed blobs
    /// without outlines or markers.
    pub fn interactive_preset(viewport_width: f32, viewport_height: f32) -> Self {
        let margin = Margin {
            top: 75.0,
            right: 125.0,
            bottom: 75.0,
            left: 125.0,
        };
        let width = (700.0_f32.min(viewport_width - 10.0) - margin.left - margin.right).max(1.0);
        let height = width
            .min(viewport_height - margin.top - margin.bottom - 20.0)
            .max(1.0);
        Self {
            w: width,
            h: height,
            margin,
            max_value: 0.55,
            levels: 11,
            round_strokes: true,
            label_factor: 1.25,
            wrap_width: 100.0,
            axis_name: "description".to_string(),
            value: "value".to_string(),
            opacity_stroke: 0.0,
            dot_radius: 0.0,
            opacity_area: 0.6,
            ..Self::default()
        }
    }

    /// Replaces every field the override defines and keeps the rest.
    pub fn apply(&mut self, overrides: OptionsFile) {
        if let Some(v) = overrides.w {
            self.w = v;
        }
        if let Some(v) = overrides.h {
            self.h = v;
        }
        if let Some(margin) = overrides.margin {
            if let Some(v) = margin.top {
                self.margin.top = v;
            }
            if let Some(v) = margin.right {
                self.margin.right = v;
            }
            if let Some(v) = margin.bottom {
                self.margin.bottom = v;
            }
            if let Some(v) = margin.left {
                self.margin.left = v;
            }
        }
        if let Some(v) = overrides.levels {
            self.levels = v;
        }
        if let Some(v) = overrides.max_value {
            self.max_value = v;
        }
        if let Some(v) = overrides.label_factor {
            self.label_factor = v;
        }
        if let Some(v) = overrides.wrap_width {
            self.wrap_width = v;
        }
        if let Some(v) = overrides.opacity_area {
            self.opacity_area = v;
        }
        if let Some(v) = overrides.opacity_stroke {
            self.opacity_stroke = v;
        }
        if let Some(v) = overrides.opacity_point {
            self.opacity_point = v;
        }
        if let Some(v) = overrides.dot_radius {
            self.dot_radius = v;
        }
        if let Some(v) = overrides.opacity_circles {
            self.opacity_circles = v;
        }
        if let Some(v) = overrides.stroke_width {
            self.stroke_width = v;
        }
        if let Some(v) = overrides.round_strokes {
            self.round_strokes = v;
        }
        if let Some(v) = overrides.color {
            self.color = v;
        }
        if let Some(v) = overrides.axis_name {
            self.axis_name = v;
        }
        if let Some(v) = overrides.value {
            self.value = v;
        }
        if let Some(v) = overrides.sort_areas {
            self.sort_areas = v;
        }
    }

    pub fn validate(&self) -> Result<(), ChartError> {
        let numbers = [
            ("w", self.w),
            ("h", self.h),
            ("margin.top", self.margin.top),
            ("margin.right", self.margin.right),
            ("margin.bottom", self.margin.bottom),
            ("margin.left", self.margin.left),
            ("maxValue", self.max_value),
            ("labelFactor", self.label_factor),
            ("wrapWidth", self.wrap_width),
            ("opacityArea", self.opacity_area),
            ("opacityStroke", self.opacity_stroke),
            ("opacityPoint", self.opacity_point),
            ("dotRadius", self.dot_radius),
            ("opacityCircles", self.opacity_circles),
            ("strokeWidth", self.stroke_width),
        ];
        if let Some((name, _)) = numbers.iter().find(|(_, v)| !v.is_finite()) {
            return Err(ChartError::InvalidOptions(format!("`{name}` must be finite")));
        }
        if self.w <= 0.0 || self.h <= 0.0 {
            return Err(ChartError::InvalidOptions(
                "`w` and `h` must be positive".to_string(),
            ));
        }
        if self.levels == 0 {
            return Err(ChartError::InvalidOptions(
                "`levels` must be at least 1".to_string(),
            ));
        }
        if self.color.is_empty() {
            return Err(ChartError::InvalidOptions(
                "`color` palette is empty".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MarginFile {
    pub top: Option<f32>,
    pub right: Option<f32>,
    pub bottom: Option<f32>,
    pub left: Option<f32>,
}

/// Chart option overrides; absent keys keep their defaults and unknown keys
/// are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionsFile {
    pub w: Option<f32>,
    pub h: Option<f32>,
    pub margin: Option<MarginFile>,
    pub levels: Option<usize>,
    pub max_value: Option<f32>,
    pub label_factor: Option<f32>,
    pub wrap_width: Option<f32>,
    pub opacity_area: Option<f32>,
    pub opacity_stroke: Option<f32>,
    pub opacity_point: Option<f32>,
    pub dot_radius: Option<f32>,
    pub opacity_circles: Option<f32>,
    pub stroke_width: Option<f32>,
    pub round_strokes: Option<bool>,
    pub color: Option<Vec<String>>,
    pub axis_name: Option<String>,
    pub value: Option<String>,
    pub sort_areas: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Line spacing of wrapped axis labels, in ems.
    pub label_line_height: f32,
    /// Baseline shift of the first axis label line, in ems.
    pub label_dy: f32,
    pub level_label_x: f32,
    pub level_label_dy: f32,
    /// Axis lines run this far past the outer circle, as a multiple of it.
    pub axis_overshoot: f32,
    /// Hit circles are this much larger than the visible markers.
    pub hit_radius_factor: f32,
    /// Cardinal spline tension used when strokes are rounded.
    pub curve_tension: f32,
    pub fast_text_metrics: bool,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            label_line_height: 1.4,
            label_dy: 0.35,
            level_label_x: 4.0,
            level_label_dy: 0.4,
            axis_overshoot: 1.1,
            hit_radius_factor: 1.5,
            curve_tension: 0.0,
            fast_text_metrics: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InteractionConfig {
    pub dim_opacity: f32,
    pub highlight_area_opacity: f32,
    pub highlight_ms: u64,
    pub restore_ms: u64,
    pub tooltip_fade_ms: u64,
    pub toggle_ms: u64,
    pub tooltip_offset_x: f32,
    pub series_tooltip_offset_y: f32,
    pub point_tooltip_offset_y: f32,
    /// Caption in front of the series average in the tooltip.
    pub average_label: String,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            dim_opacity: 0.1,
            highlight_area_opacity: 0.8,
            highlight_ms: 50,
            restore_ms: 200,
            tooltip_fade_ms: 500,
            toggle_ms: 50,
            tooltip_offset_x: 20.0,
            series_tooltip_offset_y: -40.0,
            point_tooltip_offset_y: -20.0,
            average_label: "Average".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Fallback raster size when the SVG carries none.
    pub width: f32,
    pub height: f32,
    pub svg_id: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 900.0,
            height: 900.0,
            svg_id: "radarChartSvg".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub theme: Theme,
    pub options: RadarOptions,
    pub layout: LayoutConfig,
    pub interaction: InteractionConfig,
    pub render: RenderConfig,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ThemeVariables {
    font_family: Option<String>,
    font_size: Option<f32>,
    label_color: Option<String>,
    grid_fill: Option<String>,
    grid_stroke: Option<String>,
    axis_stroke: Option<String>,
    axis_stroke_width: Option<f32>,
    background: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InteractionFile {
    dim_opacity: Option<f32>,
    highlight_area_opacity: Option<f32>,
    highlight_ms: Option<u64>,
    restore_ms: Option<u64>,
    tooltip_fade_ms: Option<u64>,
    toggle_ms: Option<u64>,
    average_label: Option<String>,
}

/// A config file is a chart options object, optionally carrying theme and
/// interaction sections next to the option keys.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    theme: Option<String>,
    theme_variables: Option<ThemeVariables>,
    interaction: Option<InteractionFile>,
    fast_text: Option<bool>,
    #[serde(flatten)]
    options: OptionsFile,
}

/// Parses an options object. JSON5 syntax is accepted so script-style
/// literals with comments and unquoted keys load as-is.
pub fn parse_options(source: &str) -> anyhow::Result<OptionsFile> {
    Ok(json5::from_str(source)?)
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let config = Config::default();
    let Some(path) = path else {
        return Ok(config);
    };
    let contents = std::fs::read_to_string(path)?;
    apply_config_source(config, &contents)
}

pub fn apply_config_source(mut config: Config, source: &str) -> anyhow::Result<Config> {
    let parsed: ConfigFile = json5::from_str(source)?;

    if let Some(theme_name) = parsed.theme.as_deref() {
        match Theme::by_name(theme_name) {
            Some(theme) => config.theme = theme,
            None => warn!(theme = theme_name, "unknown theme name ignored"),
        }
    }

    if let Some(vars) = parsed.theme_variables {
        if let Some(v) = vars.font_family {
            config.theme.font_family = v;
        }
        if let Some(v) = vars.font_size {
            config.theme.font_size = v;
        }
        if let Some(v) = vars.label_color {
            config.theme.label_color = v;
        }
        if let Some(v) = vars.grid_fill {
            config.theme.grid_fill = v;
        }
        if let Some(v) = vars.grid_stroke {
            config.theme.grid_stroke = v;
        }
        if let Some(v) = vars.axis_stroke {
            config.theme.axis_stroke = v;
        }
        if let Some(v) = vars.axis_stroke_width {
            config.theme.axis_stroke_width = v;
        }
        if let Some(v) = vars.background {
            config.theme.background = v;
        }
    }

    if let Some(interaction) = parsed.interaction {
        if let Some(v) = interaction.dim_opacity {
            config.interaction.dim_opacity = v;
        }
        if let Some(v) = interaction.highlight_area_opacity {
            config.interaction.highlight_area_opacity = v;
        }
        if let Some(v) = interaction.highlight_ms {
            config.interaction.highlight_ms = v;
        }
        if let Some(v) = interaction.restore_ms {
            config.interaction.restore_ms = v;
        }
        if let Some(v) = interaction.tooltip_fade_ms {
            config.interaction.tooltip_fade_ms = v;
        }
        if let Some(v) = interaction.toggle_ms {
            config.interaction.toggle_ms = v;
        }
        if let Some(v) = interaction.average_label {
            config.interaction.average_label = v;
        }
    }

    if let Some(v) = parsed.fast_text {
        config.layout.fast_text_metrics = v;
    }

    config.options.apply(parsed.options);
    debug!(options = ?config.options, "resolved chart options");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defined_override_wins_and_missing_keeps_default() {
        let mut options = RadarOptions::default();
        options.apply(OptionsFile {
            levels: Some(7),
            round_strokes: Some(true),
            ..Default::default()
        });
        assert_eq!(options.levels, 7);
        assert!(options.round_strokes);
        assert_eq!(options.w, 800.0);
        assert_eq!(options.wrap_width, 60.0);
        assert_eq!(options.axis_name, "axis");
    }

    #[test]
    fn partial_margin_keeps_other_sides() {
        let mut options = RadarOptions::default();
        options.apply(OptionsFile {
            margin: Some(MarginFile {
                left: Some(100.0),
                ..Default::default()
            }),
            ..Default::default()
        });
        assert_eq!(options.margin.left, 100.0);
        assert_eq!(options.margin.top, 20.0);
    }

    #[test]
    fn parse_options_accepts_script_literals_and_ignores_unknown_keys() {
        let source = r#"{
            w: 400, // width of the circle
            levels: 11,
            roundStrokes: true,
            axisName: "description",
            unknownKey: [1, 2, 3],
        }"#;
        let parsed = parse_options(source).unwrap();
        let mut options = RadarOptions::default();
        options.apply(parsed);
        assert_eq!(options.w, 400.0);
        assert_eq!(options.levels, 11);
        assert!(options.round_strokes);
        assert_eq!(options.axis_name, "description");
    }

    #[test]
    fn config_source_reads_theme_and_interaction() {
        let source = r##"{
            theme: "modern",
            themeVariables: { labelColor: "#123456" },
            interaction: { averageLabel: "Average tariff" },
            fastText: true,
            opacityArea: 0.6,
        }"##;
        let config = apply_config_source(Config::default(), source).unwrap();
        assert_eq!(config.theme.label_color, "#123456");
        assert_eq!(config.theme.background, "#FFFFFF");
        assert_eq!(config.interaction.average_label, "Average tariff");
        assert!(config.layout.fast_text_metrics);
        assert_eq!(config.options.opacity_area, 0.6);
    }

    #[test]
    fn interactive_preset_sizes_from_viewport() {
        let options = RadarOptions::interactive_preset(1280.0, 900.0);
        assert_eq!(options.w, 450.0);
        assert_eq!(options.h, 450.0);
        assert_eq!(options.levels, 11);
        assert_eq!(options.axis_name, "description");

        let short = RadarOptions::interactive_preset(1280.0, 400.0);
        assert_eq!(short.h, 230.0);
    }

    #[test]
    fn validate_rejects_zero_levels_and_empty_palette() {
        let mut options = RadarOptions {
            levels: 0,
            ..Default::default()
        };
        assert!(options.validate().is_err());
        options.levels = 3;
        options.color.clear();
        assert!(options.validate().is_err());
        options.color.push("red".to_string());
        assert!(options.validate().is_ok());
    }
}
