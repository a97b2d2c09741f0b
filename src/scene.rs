use crate::layout::RadarLayout;
use serde::{Deserialize, Serialize};

/// Handle of one interactive element of the chart. Rendered as the
/// `data-element` attribute so hosts can route pointer events back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ElementId(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ElementKind {
    Area,
    Stroke,
    Marker { axis: usize },
    HitCircle { axis: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Display {
    Inline,
    None,
}

/// Mutable presentation state. `opacity` is the fill opacity of areas and
/// markers and the stroke opacity of outlines.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ElementStyle {
    pub opacity: f32,
    pub display: Display,
    pub hidden: bool,
}

impl ElementStyle {
    fn visible(opacity: f32) -> Self {
        Self {
            opacity,
            display: Display::Inline,
            hidden: false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SceneElement {
    pub id: ElementId,
    pub kind: ElementKind,
    /// Index of the owning series in draw order.
    pub series: usize,
    pub style: ElementStyle,
}

/// Every element a series owns.
#[derive(Debug, Clone)]
pub struct SeriesHandles {
    pub series: usize,
    pub series_id: String,
    pub area: ElementId,
    pub stroke: ElementId,
    pub markers: Vec<ElementId>,
    pub hit_circles: Vec<ElementId>,
}

impl SeriesHandles {
    pub fn all(&self) -> impl Iterator<Item = ElementId> + '_ {
        [self.area, self.stroke]
            .into_iter()
            .chain(self.markers.iter().copied())
            .chain(self.hit_circles.iter().copied())
    }
}

#[derive(Debug, Clone)]
pub struct Scene {
    elements: Vec<SceneElement>,
    series: Vec<SeriesHandles>,
}

impl Scene {
    /// Allocates handles in paint order: each blob's area, stroke and markers,
    /// then every blob's hit circles on top.
    pub fn build(layout: &RadarLayout) -> Self {
        let style = layout.blob_style;
        let mut elements = Vec::new();
        fn push(elements: &mut Vec<SceneElement>, kind: ElementKind, series: usize, opacity: f32) -> ElementId {
            let id = ElementId(elements.len());
            elements.push(SceneElement {
                id,
                kind,
                series,
                style: ElementStyle::visible(opacity),
            });
            id
        }

        let mut series = Vec::with_capacity(layout.blobs.len());
        for blob in &layout.blobs {
            let area = push(&mut elements, ElementKind::Area, blob.series, style.opacity_area);
            let stroke = push(&mut elements, ElementKind::Stroke, blob.series, style.opacity_stroke);
            let markers = blob
                .points
                .iter()
                .map(|p| {
                    push(
                        &mut elements,
                        ElementKind::Marker { axis: p.axis },
                        blob.series,
                        style.opacity_point,
                    )
                })
                .collect();
            series.push(SeriesHandles {
                series: blob.series,
                series_id: blob.series_id.clone(),
                area,
                stroke,
                markers,
                hit_circles: Vec::new(),
            });
        }
        for (blob, handles) in layout.blobs.iter().zip(series.iter_mut()) {
            handles.hit_circles = blob
                .points
                .iter()
                .map(|p| push(&mut elements, ElementKind::HitCircle { axis: p.axis }, blob.series, 1.0))
                .collect();
        }

        Self { elements, series }
    }

    pub fn elements(&self) -> &[SceneElement] {
        &self.elements
    }

    pub fn element(&self, id: ElementId) -> Option<&SceneElement> {
        self.elements.get(id.0)
    }

    pub fn element_mut(&mut self, id: ElementId) -> Option<&mut SceneElement> {
        self.elements.get_mut(id.0)
    }

    pub fn style(&self, id: ElementId) -> Option<ElementStyle> {
        self.element(id).map(|element| element.style)
    }

    pub fn series(&self) -> &[SeriesHandles] {
        &self.series
    }

    pub fn handles(&self, series: usize) -> Option<&SeriesHandles> {
        self.series.iter().find(|handles| handles.series == series)
    }

    pub fn areas(&self) -> Vec<ElementId> {
        self.series.iter().map(|handles| handles.area).collect()
    }

    pub fn markers(&self) -> Vec<ElementId> {
        self.series
            .iter()
            .flat_map(|handles| handles.markers.iter().copied())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{LayoutConfig, RadarOptions};
    use crate::ir::parse_series;
    use crate::layout::compute_layout;
    use crate::theme::Theme;

    fn scene() -> Scene {
        let data = r#"[
            {"values":[{"axis":"A","value":1,"id":"x"},{"axis":"B","value":2,"id":"x"},{"axis":"C","value":3,"id":"x"}]},
            {"values":[{"axis":"A","value":3,"id":"y"},{"axis":"B","value":3,"id":"y"},{"axis":"C","value":3,"id":"y"}]}
        ]"#;
        let options = RadarOptions::default();
        let dataset = parse_series(data, &options).unwrap();
        let layout = compute_layout(
            &dataset,
            &options,
            &Theme::radar_default(),
            &LayoutConfig {
                fast_text_metrics: true,
                ..Default::default()
            },
        )
        .unwrap();
        Scene::build(&layout)
    }

    #[test]
    fn every_series_owns_area_stroke_markers_and_hit_circles() {
        let scene = scene();
        assert_eq!(scene.series().len(), 2);
        assert_eq!(scene.elements().len(), 2 * (2 + 3 + 3));
        for handles in scene.series() {
            assert_eq!(handles.markers.len(), 3);
            assert_eq!(handles.hit_circles.len(), 3);
            for id in handles.all() {
                assert_eq!(scene.element(id).unwrap().series, handles.series);
            }
        }
    }

    #[test]
    fn hit_circles_are_allocated_after_all_blobs() {
        let scene = scene();
        let last_marker = scene.markers().into_iter().map(|id| id.0).max().unwrap();
        for handles in scene.series() {
            assert!(handles.hit_circles.iter().all(|id| id.0 > last_marker));
        }
    }

    #[test]
    fn initial_styles_come_from_blob_defaults() {
        let scene = scene();
        let handles = &scene.series()[0];
        assert_eq!(scene.style(handles.area).unwrap().opacity, 0.35);
        assert_eq!(scene.style(handles.stroke).unwrap().opacity, 1.0);
        assert_eq!(scene.style(handles.markers[0]).unwrap().display, Display::Inline);
        assert!(scene.element(ElementId(999)).is_none());
    }
}
