use crate::layout::{PathCommand, RadarLayout};
use crate::scene::{ElementStyle, Scene};
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

#[derive(Debug, Serialize)]
pub struct LayoutDump {
    pub width: f32,
    pub height: f32,
    pub origin: [f32; 2],
    pub radius: f32,
    pub max_value: f32,
    pub angle_slice: f32,
    pub levels: Vec<f32>,
    pub axes: Vec<AxisDump>,
    pub level_labels: Vec<String>,
    pub blobs: Vec<BlobDump>,
}

#[derive(Debug, Serialize)]
pub struct AxisDump {
    pub index: usize,
    pub angle: f32,
    pub line_end: [f32; 2],
    pub label_anchor: [f32; 2],
    pub label_lines: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct BlobDump {
    pub series_id: String,
    pub name: String,
    pub color: String,
    pub average: f32,
    pub path: Vec<PathCommand>,
    pub points: Vec<[f32; 2]>,
    pub area_style: Option<ElementStyle>,
}

impl LayoutDump {
    pub fn from_layout(layout: &RadarLayout, scene: &Scene) -> Self {
        let axes = layout
            .axes
            .iter()
            .map(|axis| AxisDump {
                index: axis.index,
                angle: axis.angle,
                line_end: [axis.line_end.0, axis.line_end.1],
                label_anchor: [axis.label_anchor.0, axis.label_anchor.1],
                label_lines: axis.label.lines.clone(),
            })
            .collect();

        let blobs = layout
            .blobs
            .iter()
            .map(|blob| BlobDump {
                series_id: blob.series_id.clone(),
                name: blob.name.clone(),
                color: blob.color.clone(),
                average: blob.average,
                path: blob.path.clone(),
                points: blob.points.iter().map(|p| [p.x, p.y]).collect(),
                area_style: scene
                    .handles(blob.series)
                    .and_then(|handles| scene.style(handles.area)),
            })
            .collect();

        LayoutDump {
            width: layout.width,
            height: layout.height,
            origin: [layout.origin.0, layout.origin.1],
            radius: layout.radius,
            max_value: layout.max_value,
            angle_slice: layout.grid.angle_slice,
            levels: layout.grid_circles.iter().map(|c| c.radius).collect(),
            axes,
            level_labels: layout.level_labels.iter().map(|l| l.text.clone()).collect(),
            blobs,
        }
    }
}

pub fn write_layout_dump(path: &Path, layout: &RadarLayout, scene: &Scene) -> anyhow::Result<()> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    let dump = LayoutDump::from_layout(layout, scene);
    serde_json::to_writer_pretty(writer, &dump)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::interaction::RadarChart;

    #[test]
    fn dump_serializes_geometry_and_paths() {
        let mut config = Config::default();
        config.layout.fast_text_metrics = true;
        let chart = RadarChart::from_json(
            r#"[{"values":[{"axis":"A","value":1},{"axis":"B","value":2},{"axis":"C","value":3}]}]"#,
            config,
        )
        .unwrap();
        let dump = LayoutDump::from_layout(chart.layout(), chart.scene());
        assert_eq!(dump.levels.len(), 4);
        assert_eq!(dump.axes.len(), 3);
        assert_eq!(dump.blobs[0].points.len(), 3);
        let json = serde_json::to_value(&dump).unwrap();
        assert!(json["blobs"][0]["path"][0].get("MoveTo").is_some());
        assert_eq!(json["blobs"][0]["path"][3], "Close");
        assert_eq!(json["blobs"][0]["area_style"]["display"], "inline");
    }
}
