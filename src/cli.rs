use crate::config::{Config, RadarOptions, apply_config_source};
use crate::interaction::{ChartEvent, PointerPosition, RadarChart};
use crate::layout_dump::write_layout_dump;
use crate::render::{render_chart_svg, write_output_svg};
use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "radar", version, about = "Radar (spider) chart renderer")]
pub struct Args {
    /// Input series file (.json) or '-' for stdin
    #[arg(short = 'i', long = "input")]
    pub input: Option<PathBuf>,

    /// Output file (svg/png). Defaults to stdout for SVG if omitted.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short = 'e', long = "outputFormat", value_enum, default_value = "svg")]
    pub output_format: OutputFormat,

    /// Chart options file (JSON or JSON5 object with radar chart option keys)
    #[arg(short = 'c', long = "configFile")]
    pub config: Option<PathBuf>,

    /// Width of the circle area, overriding the options file
    #[arg(short = 'w', long = "width")]
    pub width: Option<f32>,

    /// Height of the circle area, overriding the options file
    #[arg(short = 'H', long = "height")]
    pub height: Option<f32>,

    /// Size the chart for a page viewport, e.g. 1280x800
    #[arg(long = "viewport", value_parser = parse_viewport)]
    pub viewport: Option<(f32, f32)>,

    /// Series id to render unchecked (repeatable)
    #[arg(long = "hide")]
    pub hide: Vec<String>,

    /// Series id to render in its hovered state
    #[arg(long = "highlight")]
    pub highlight: Option<String>,

    /// Write the computed layout as JSON
    #[arg(long = "dumpLayout")]
    pub dump_layout: Option<PathBuf>,

    /// Debug logging
    #[arg(short = 'v', long = "verbose", conflicts_with = "quiet")]
    pub verbose: bool,

    /// Errors only
    #[arg(short = 'q', long = "quiet")]
    pub quiet: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Svg,
    Png,
}

pub fn run() -> Result<()> {
    let args = Args::parse();
    setup_logging(args.verbose, args.quiet);

    let config = resolve_config(&args)?;
    let input = read_input(args.input.as_deref())?;
    let mut chart = RadarChart::from_json(&input, config)?;
    apply_presentation(&mut chart, &args.hide, args.highlight.as_deref())?;

    if let Some(path) = args.dump_layout.as_deref() {
        write_layout_dump(path, chart.layout(), chart.scene())?;
        info!(path = %path.display(), "wrote layout dump");
    }

    let svg = render_chart_svg(&chart);
    match args.output_format {
        OutputFormat::Svg => write_output_svg(&svg, args.output.as_deref())?,
        OutputFormat::Png => write_png(&svg, &args, chart.config())?,
    }
    Ok(())
}

fn setup_logging(verbose: bool, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(io::stderr)
        .try_init();
}

/// Options are layered: defaults or the viewport preset, then the options
/// file, then explicit size flags.
fn resolve_config(args: &Args) -> Result<Config> {
    let mut config = Config::default();
    if let Some((width, height)) = args.viewport {
        config.options = RadarOptions::interactive_preset(width, height);
        debug!(width, height, "applied viewport preset");
    }
    if let Some(path) = args.config.as_deref() {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("reading options file {}", path.display()))?;
        config = apply_config_source(config, &contents)
            .with_context(|| format!("parsing options file {}", path.display()))?;
    }
    if let Some(width) = args.width {
        config.options.w = width;
    }
    if let Some(height) = args.height {
        config.options.h = height;
    }
    Ok(config)
}

fn apply_presentation(chart: &mut RadarChart, hide: &[String], highlight: Option<&str>) -> Result<()> {
    for series_id in hide {
        if chart.is_visible(series_id).is_none() {
            return Err(anyhow::anyhow!("Unknown series id '{}'", series_id));
        }
        if chart.is_visible(series_id) == Some(true) {
            chart.handle(ChartEvent::CheckboxClick {
                series_id: series_id.clone(),
            });
        }
    }
    if let Some(series_id) = highlight {
        let series = chart
            .dataset()
            .series_index(series_id)
            .ok_or_else(|| anyhow::anyhow!("Unknown series id '{}'", series_id))?;
        let target = chart
            .scene()
            .handles(series)
            .map(|handles| handles.area)
            .ok_or_else(|| anyhow::anyhow!("Series '{}' has no area", series_id))?;
        chart.handle(ChartEvent::PointerOver {
            target,
            pointer: PointerPosition::default(),
        });
    }
    Ok(())
}

#[cfg(feature = "png")]
fn write_png(svg: &str, args: &Args, config: &Config) -> Result<()> {
    let output = ensure_output(&args.output, "png")?;
    crate::render::write_output_png(svg, &output, &config.render, &config.theme)
}

#[cfg(not(feature = "png"))]
fn write_png(_svg: &str, _args: &Args, _config: &Config) -> Result<()> {
    Err(anyhow::anyhow!("PNG output requires the `png` feature"))
}

fn read_input(path: Option<&Path>) -> Result<String> {
    if let Some(path) = path
        && path != Path::new("-")
    {
        return std::fs::read_to_string(path)
            .with_context(|| format!("reading input {}", path.display()));
    }
    let mut buf = String::new();
    io::stdin().read_to_string(&mut buf)?;
    Ok(buf)
}

#[cfg(feature = "png")]
fn ensure_output(output: &Option<PathBuf>, ext: &str) -> Result<PathBuf> {
    if let Some(path) = output {
        return Ok(path.clone());
    }
    Err(anyhow::anyhow!("Output path required for {} output", ext))
}

fn parse_viewport(raw: &str) -> Result<(f32, f32), String> {
    let (w, h) = raw
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got '{raw}'"))?;
    let parse = |part: &str| {
        part.trim()
            .parse::<f32>()
            .ok()
            .filter(|v| v.is_finite() && *v > 0.0)
            .ok_or_else(|| format!("invalid viewport dimension '{part}'"))
    };
    Ok((parse(w)?, parse(h)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    const DATA: &str = r#"[
        {"values":[{"axis":"A","value":0.1,"id":"x"},{"axis":"B","value":0.2,"id":"x"},{"axis":"C","value":0.3,"id":"x"}]},
        {"values":[{"axis":"A","value":0.3,"id":"y"},{"axis":"B","value":0.2,"id":"y"},{"axis":"C","value":0.3,"id":"y"}]}
    ]"#;

    #[test]
    fn parses_viewport_dimensions() {
        assert_eq!(parse_viewport("1280x800"), Ok((1280.0, 800.0)));
        assert_eq!(parse_viewport("640X480"), Ok((640.0, 480.0)));
        assert!(parse_viewport("1280").is_err());
        assert!(parse_viewport("0x10").is_err());
    }

    #[test]
    fn size_flags_override_viewport_preset() {
        let args = Args::try_parse_from(["radar", "--viewport", "1280x900", "-w", "300"]).unwrap();
        let config = resolve_config(&args).unwrap();
        assert_eq!(config.options.w, 300.0);
        assert_eq!(config.options.h, 450.0);
        assert_eq!(config.options.levels, 11);
    }

    #[test]
    fn hide_and_highlight_drive_the_chart_state() {
        let mut config = Config::default();
        config.layout.fast_text_metrics = true;
        let mut chart = RadarChart::from_json(DATA, config).unwrap();
        apply_presentation(&mut chart, &["x".to_string()], Some("y")).unwrap();
        assert_eq!(chart.is_visible("x"), Some(false));
        assert!(chart.tooltip().is_shown());
        assert!(apply_presentation(&mut chart, &["zzz".to_string()], None).is_err());
    }

    #[cfg(feature = "png")]
    #[test]
    fn png_output_needs_an_explicit_path() {
        assert!(ensure_output(&None, "png").is_err());
        let path = PathBuf::from("chart.png");
        assert_eq!(ensure_output(&Some(path.clone()), "png").unwrap(), path);
    }

    #[test]
    fn quiet_and_verbose_conflict() {
        assert!(Args::try_parse_from(["radar", "-v", "-q"]).is_err());
    }
}
