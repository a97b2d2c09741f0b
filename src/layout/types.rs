use super::curve::PathCommand;
use super::scale::PolarGrid;

#[derive(Debug, Clone)]
pub struct TextBlock {
    pub lines: Vec<String>,
    pub width: f32,
    pub height: f32,
}

#[derive(Debug, Clone, Copy)]
pub struct GridCircle {
    pub level: usize,
    pub radius: f32,
}

#[derive(Debug, Clone)]
pub struct AxisLayout {
    pub index: usize,
    pub angle: f32,
    pub line_end: (f32, f32),
    pub label_anchor: (f32, f32),
    pub label: TextBlock,
}

#[derive(Debug, Clone)]
pub struct LevelLabel {
    pub level: usize,
    pub x: f32,
    pub y: f32,
    pub text: String,
}

#[derive(Debug, Clone)]
pub struct PointLayout {
    pub axis: usize,
    pub value: f32,
    pub x: f32,
    pub y: f32,
    pub id: String,
    pub name: String,
    pub description: String,
}

/// Area, outline and markers of one series.
#[derive(Debug, Clone)]
pub struct BlobLayout {
    /// Index of the series in `Dataset::series`.
    pub series: usize,
    pub series_id: String,
    pub name: String,
    pub color: String,
    pub average: f32,
    pub path: Vec<PathCommand>,
    pub points: Vec<PointLayout>,
}

/// Presentation defaults every blob starts from.
#[derive(Debug, Clone, Copy)]
pub struct BlobStyle {
    pub opacity_area: f32,
    pub opacity_stroke: f32,
    pub opacity_point: f32,
    pub stroke_width: f32,
    pub dot_radius: f32,
    pub hit_radius: f32,
}

#[derive(Debug, Clone)]
pub struct RadarLayout {
    pub width: f32,
    pub height: f32,
    /// Translation of the chart center inside the canvas.
    pub origin: (f32, f32),
    pub radius: f32,
    pub max_value: f32,
    pub grid: PolarGrid,
    pub font_size: f32,
    pub opacity_circles: f32,
    pub grid_circles: Vec<GridCircle>,
    pub axes: Vec<AxisLayout>,
    pub level_labels: Vec<LevelLabel>,
    pub blobs: Vec<BlobLayout>,
    pub blob_style: BlobStyle,
    pub label_line_height: f32,
    pub label_dy: f32,
    pub level_label_dy: f32,
}
