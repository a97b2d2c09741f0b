//! Pointer and checkbox handling for a rendered chart.
//!
//! Handlers run synchronously and write final style values into the scene
//! immediately. The returned [`Transition`]s describe the same changes with
//! the durations a host should animate them over; a newer transition on the
//! same element simply supersedes an older one.

use crate::config::Config;
use crate::error::ChartError;
use crate::ir::{Dataset, parse_series};
use crate::layout::{RadarLayout, compute_layout, format_percent};
use crate::render::escape_xml;
use crate::scene::{Display, ElementId, ElementKind, Scene};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::time::Duration;
use tracing::debug;

/// Pointer location in page coordinates, carried by every pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PointerPosition {
    pub x: f32,
    pub y: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ChartEvent {
    PointerOver {
        target: ElementId,
        pointer: PointerPosition,
    },
    PointerMove {
        target: ElementId,
        pointer: PointerPosition,
    },
    PointerOut {
        target: ElementId,
    },
    #[serde(rename_all = "camelCase")]
    CheckboxClick {
        series_id: String,
    },
    SelectAll {
        checked: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", content = "id", rename_all = "camelCase")]
pub enum TransitionTarget {
    Element(ElementId),
    Tooltip,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "property", content = "value", rename_all = "camelCase")]
pub enum StyleChange {
    Opacity(f32),
    Display(Display),
    Hidden(bool),
    Position { left: f32, top: f32 },
    Content(TooltipContent),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Transition {
    pub target: TransitionTarget,
    pub change: StyleChange,
    pub duration_ms: u64,
}

impl Transition {
    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TooltipContent {
    pub title: String,
    pub body: String,
}

impl TooltipContent {
    /// Markup for the overlay element.
    pub fn html(&self) -> String {
        format!(
            "<b><font size=\"3\">{}</font></b><br/>{}",
            escape_xml(&self.title),
            escape_xml(&self.body)
        )
    }
}

/// The overlay shown next to the pointer. It is not part of the SVG.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tooltip {
    pub opacity: f32,
    pub left: f32,
    pub top: f32,
    pub content: Option<TooltipContent>,
}

impl Tooltip {
    pub fn html(&self) -> String {
        self.content
            .as_ref()
            .map(TooltipContent::html)
            .unwrap_or_default()
    }

    pub fn is_shown(&self) -> bool {
        self.opacity > 0.0
    }
}

impl Default for Tooltip {
    fn default() -> Self {
        Self {
            opacity: 0.0,
            left: 0.0,
            top: 0.0,
            content: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Checkbox {
    pub series_id: String,
    /// Position of the series in the caller's input.
    pub input_index: usize,
    /// DOM id of the host checkbox bound to this series.
    pub element_id: String,
    pub checked: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LegendEntry {
    pub series_id: String,
    pub name: String,
    pub color: String,
    pub checkbox_id: String,
    pub checked: bool,
}

/// A laid-out chart together with its live presentation state.
#[derive(Debug, Clone)]
pub struct RadarChart {
    dataset: Dataset,
    layout: RadarLayout,
    scene: Scene,
    tooltip: Tooltip,
    /// One per series, in the caller's input order.
    checkboxes: Vec<Checkbox>,
    config: Config,
}

impl RadarChart {
    pub fn new(dataset: Dataset, config: Config) -> Result<Self, ChartError> {
        let layout = compute_layout(&dataset, &config.options, &config.theme, &config.layout)?;
        let scene = Scene::build(&layout);
        let mut used_ids = HashSet::new();
        let checkboxes = dataset
            .input_order()
            .into_iter()
            .map(|idx| {
                let series = &dataset.series[idx];
                let mut element_id = format!("checkbox{}", class_suffix(&series.id));
                if !used_ids.insert(element_id.clone()) {
                    // Distinct ids can sanitize to the same suffix.
                    element_id = format!("{element_id}_{}", series.input_index);
                    used_ids.insert(element_id.clone());
                }
                Checkbox {
                    series_id: series.id.clone(),
                    input_index: series.input_index,
                    element_id,
                    checked: true,
                }
            })
            .collect();
        Ok(Self {
            dataset,
            layout,
            scene,
            tooltip: Tooltip::default(),
            checkboxes,
            config,
        })
    }

    pub fn from_json(data: &str, config: Config) -> Result<Self, ChartError> {
        let dataset = parse_series(data, &config.options)?;
        Self::new(dataset, config)
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn layout(&self) -> &RadarLayout {
        &self.layout
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn tooltip(&self) -> &Tooltip {
        &self.tooltip
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn checkboxes(&self) -> &[Checkbox] {
        &self.checkboxes
    }

    pub fn all_checked(&self) -> bool {
        self.checkboxes.iter().all(|c| c.checked)
    }

    pub fn is_visible(&self, series_id: &str) -> Option<bool> {
        self.checkbox(series_id).map(|checkbox| checkbox.checked)
    }

    pub fn legend(&self) -> Vec<LegendEntry> {
        self.checkboxes
            .iter()
            .filter_map(|checkbox| {
                let series = self
                    .dataset
                    .series
                    .iter()
                    .find(|s| s.input_index == checkbox.input_index)?;
                Some(LegendEntry {
                    series_id: series.id.clone(),
                    name: series.name.clone(),
                    color: series.color.clone(),
                    checkbox_id: checkbox.element_id.clone(),
                    checked: checkbox.checked,
                })
            })
            .collect()
    }

    pub fn handle(&mut self, event: ChartEvent) -> Vec<Transition> {
        debug!(?event, "chart event");
        let mut out = Vec::new();
        match event {
            ChartEvent::PointerOver { target, pointer } => self.pointer_over(target, pointer, &mut out),
            ChartEvent::PointerMove { target, pointer } => self.pointer_move(target, pointer, &mut out),
            ChartEvent::PointerOut { target } => self.pointer_out(target, &mut out),
            ChartEvent::CheckboxClick { series_id } => self.click_checkbox(&series_id, &mut out),
            ChartEvent::SelectAll { checked } => self.select_all(checked, &mut out),
        }
        out
    }

    fn target(&self, target: ElementId) -> Option<(ElementKind, usize)> {
        let element = self.scene.element(target);
        if element.is_none() {
            debug!(element = target.0, "pointer event on unknown element ignored");
        }
        element.map(|element| (element.kind, element.series))
    }

    fn pointer_over(&mut self, target: ElementId, pointer: PointerPosition, out: &mut Vec<Transition>) {
        let Some((kind, series)) = self.target(target) else {
            return;
        };
        match kind {
            ElementKind::Area | ElementKind::Stroke => {
                self.show_series_tooltip(series, pointer, out);
                self.highlight(series, out);
            }
            ElementKind::HitCircle { axis } => self.show_point_tooltip(series, axis, pointer, out),
            ElementKind::Marker { .. } => {}
        }
    }

    fn pointer_move(&mut self, target: ElementId, pointer: PointerPosition, out: &mut Vec<Transition>) {
        if let Some((ElementKind::Area | ElementKind::Stroke, series)) = self.target(target) {
            self.show_series_tooltip(series, pointer, out);
        }
    }

    fn pointer_out(&mut self, target: ElementId, out: &mut Vec<Transition>) {
        let Some((kind, _)) = self.target(target) else {
            return;
        };
        match kind {
            ElementKind::Area | ElementKind::Stroke => {
                self.restore_opacities(out);
                self.hide_tooltip(out);
            }
            ElementKind::HitCircle { .. } => self.hide_tooltip(out),
            ElementKind::Marker { .. } => {}
        }
    }

    /// Dims every area and marker, then brings the hovered series back.
    fn highlight(&mut self, series: usize, out: &mut Vec<Transition>) {
        let cfg = &self.config.interaction;
        let (dim, area_opacity, duration) = (cfg.dim_opacity, cfg.highlight_area_opacity, cfg.highlight_ms);
        let point_opacity = self.layout.blob_style.opacity_point;
        for id in self.scene.areas().into_iter().chain(self.scene.markers()) {
            self.set(id, StyleChange::Opacity(dim), duration, out);
        }
        let Some(handles) = self.scene.handles(series).cloned() else {
            return;
        };
        self.set(handles.area, StyleChange::Opacity(area_opacity), duration, out);
        for id in handles.markers {
            self.set(id, StyleChange::Opacity(point_opacity), duration, out);
        }
    }

    fn restore_opacities(&mut self, out: &mut Vec<Transition>) {
        let duration = self.config.interaction.restore_ms;
        let style = self.layout.blob_style;
        for id in self.scene.areas() {
            self.set(id, StyleChange::Opacity(style.opacity_area), duration, out);
        }
        for id in self.scene.markers() {
            self.set(id, StyleChange::Opacity(style.opacity_point), duration, out);
        }
    }

    fn show_series_tooltip(&mut self, series: usize, pointer: PointerPosition, out: &mut Vec<Transition>) {
        let Some(data) = self.dataset.series.get(series) else {
            return;
        };
        let content = TooltipContent {
            title: data.name.clone(),
            body: format!(
                "{}: {}",
                self.config.interaction.average_label,
                format_percent(data.average)
            ),
        };
        let offset_y = self.config.interaction.series_tooltip_offset_y;
        self.show_tooltip(content, pointer, offset_y, out);
    }

    fn show_point_tooltip(
        &mut self,
        series: usize,
        axis: usize,
        pointer: PointerPosition,
        out: &mut Vec<Transition>,
    ) {
        let Some(point) = self.dataset.series.get(series).and_then(|s| s.points.get(axis)) else {
            return;
        };
        let content = TooltipContent {
            title: point.name.clone(),
            body: format!("{}: {}", point.description, format_percent(point.value)),
        };
        let offset_y = self.config.interaction.point_tooltip_offset_y;
        self.show_tooltip(content, pointer, offset_y, out);
    }

    fn show_tooltip(
        &mut self,
        content: TooltipContent,
        pointer: PointerPosition,
        offset_y: f32,
        out: &mut Vec<Transition>,
    ) {
        let left = pointer.x + self.config.interaction.tooltip_offset_x;
        let top = pointer.y + offset_y;
        self.tooltip.opacity = 1.0;
        self.tooltip.left = left;
        self.tooltip.top = top;
        self.tooltip.content = Some(content.clone());
        for change in [
            StyleChange::Opacity(1.0),
            StyleChange::Content(content),
            StyleChange::Position { left, top },
        ] {
            out.push(Transition {
                target: TransitionTarget::Tooltip,
                change,
                duration_ms: 0,
            });
        }
    }

    fn hide_tooltip(&mut self, out: &mut Vec<Transition>) {
        self.tooltip.opacity = 0.0;
        out.push(Transition {
            target: TransitionTarget::Tooltip,
            change: StyleChange::Opacity(0.0),
            duration_ms: self.config.interaction.tooltip_fade_ms,
        });
    }

    fn checkbox(&self, series_id: &str) -> Option<&Checkbox> {
        self.checkboxes.iter().find(|c| c.series_id == series_id)
    }

    fn click_checkbox(&mut self, series_id: &str, out: &mut Vec<Transition>) {
        let Some(position) = self.checkboxes.iter().position(|c| c.series_id == series_id) else {
            debug!(series_id, "click on unknown series checkbox ignored");
            return;
        };
        self.toggle_checkbox(position, out);
    }

    /// Flips the checkbox at `position` and runs its change handler.
    fn toggle_checkbox(&mut self, position: usize, out: &mut Vec<Transition>) {
        let Some(checkbox) = self.checkboxes.get_mut(position) else {
            return;
        };
        checkbox.checked = !checkbox.checked;
        let (checked, input_index) = (checkbox.checked, checkbox.input_index);
        self.checkbox_changed(input_index, checked, out);
    }

    fn checkbox_changed(&mut self, input_index: usize, checked: bool, out: &mut Vec<Transition>) {
        let Some(series) = self
            .dataset
            .series
            .iter()
            .position(|s| s.input_index == input_index)
        else {
            return;
        };
        let Some(handles) = self.scene.handles(series).cloned() else {
            return;
        };
        let duration = self.config.interaction.toggle_ms;
        let display = if checked { Display::Inline } else { Display::None };
        for id in handles.all() {
            self.set(id, StyleChange::Display(display), duration, out);
            self.set(id, StyleChange::Hidden(!checked), duration, out);
        }
    }

    /// Clicks every checkbox that disagrees with `checked`, in input order.
    fn select_all(&mut self, checked: bool, out: &mut Vec<Transition>) {
        let pending: Vec<usize> = self
            .checkboxes
            .iter()
            .enumerate()
            .filter(|(_, c)| c.checked != checked)
            .map(|(position, _)| position)
            .collect();
        for position in pending {
            self.toggle_checkbox(position, out);
        }
    }

    fn set(&mut self, id: ElementId, change: StyleChange, duration_ms: u64, out: &mut Vec<Transition>) {
        let Some(element) = self.scene.element_mut(id) else {
            return;
        };
        match &change {
            StyleChange::Opacity(value) => element.style.opacity = *value,
            StyleChange::Display(display) => element.style.display = *display,
            StyleChange::Hidden(hidden) => element.style.hidden = *hidden,
            StyleChange::Position { .. } | StyleChange::Content(_) => return,
        }
        out.push(Transition {
            target: TransitionTarget::Element(id),
            change,
            duration_ms,
        });
    }
}

/// Series ids turned into something safe inside class names and DOM ids.
pub fn class_suffix(id: &str) -> String {
    id.chars()
        .map(|ch| if ch.is_ascii_alphanumeric() || ch == '-' || ch == '_' { ch } else { '_' })
        .collect()
}
