use serde::{Deserialize, Serialize};

/// The ten-color categorical palette series colors are drawn from by default.
pub const CATEGORY10: [&str; 10] = [
    "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#7f7f7f",
    "#bcbd22", "#17becf",
];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Theme {
    pub font_family: String,
    pub font_size: f32,
    pub label_color: String,
    pub grid_fill: String,
    pub grid_stroke: String,
    pub axis_stroke: String,
    pub axis_stroke_width: f32,
    /// `"none"` leaves the canvas transparent.
    pub background: String,
}

impl Theme {
    pub fn radar_default() -> Self {
        Self {
            font_family: "calibri, sans-serif".to_string(),
            font_size: 10.0,
            label_color: "#666666".to_string(),
            grid_fill: "#CDCDCD".to_string(),
            grid_stroke: "#CDCDCD".to_string(),
            axis_stroke: "white".to_string(),
            axis_stroke_width: 2.0,
            background: "none".to_string(),
        }
    }

    pub fn modern() -> Self {
        Self {
            font_family: "Inter, Segoe UI, system-ui, -apple-system, sans-serif".to_string(),
            font_size: 11.0,
            label_color: "#1C2430".to_string(),
            grid_fill: "#EEF2F8".to_string(),
            grid_stroke: "#C7D2E5".to_string(),
            axis_stroke: "#FFFFFF".to_string(),
            axis_stroke_width: 1.5,
            background: "#FFFFFF".to_string(),
        }
    }

    pub fn by_name(name: &str) -> Option<Self> {
        match name {
            "modern" => Some(Self::modern()),
            "default" | "base" | "radar" => Some(Self::radar_default()),
            _ => None,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::radar_default()
    }
}
