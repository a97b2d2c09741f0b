#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod error;
pub mod interaction;
pub mod ir;
pub mod layout;
pub mod layout_dump;
pub mod render;
pub mod scene;
pub mod text_metrics;
pub mod theme;

#[cfg(feature = "cli")]
pub use cli::run;
pub use config::{Config, LayoutConfig, OptionsFile, RadarOptions, load_config, parse_options};
pub use error::ChartError;
pub use interaction::{ChartEvent, PointerPosition, RadarChart, Transition};
pub use ir::{Dataset, parse_series};
pub use layout::compute_layout;
pub use render::{render_chart_svg, render_svg};
pub use theme::Theme;

/// Parses `data` and renders the chart with every series visible.
pub fn render_radar(data: &str, config: Config) -> anyhow::Result<String> {
    let chart = RadarChart::from_json(data, config)?;
    Ok(render_chart_svg(&chart))
}
