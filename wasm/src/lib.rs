use radar_chart_renderer::config::apply_config_source;
use radar_chart_renderer::scene::ElementId;
use radar_chart_renderer::{ChartEvent, Config, PointerPosition, RadarChart, render_chart_svg};
use wasm_bindgen::prelude::*;

/// Browsers have no system font database to measure with.
fn build_config(options_json: Option<&str>) -> Result<Config, String> {
    let mut config = Config::default();
    config.layout.fast_text_metrics = true;
    match options_json {
        Some(raw) => apply_config_source(config, raw).map_err(|error| error.to_string()),
        None => Ok(config),
    }
}

fn build_chart(data_json: &str, options_json: Option<&str>) -> Result<RadarChart, String> {
    let config = build_config(options_json)?;
    RadarChart::from_json(data_json, config).map_err(|error| error.to_string())
}

fn to_js(error: String) -> JsValue {
    JsValue::from_str(&error)
}

#[wasm_bindgen]
pub fn render_radar_svg(data_json: &str, options_json: Option<String>) -> Result<String, JsValue> {
    let chart = build_chart(data_json, options_json.as_deref()).map_err(to_js)?;
    Ok(render_chart_svg(&chart))
}

/// A live chart: the host forwards DOM events and applies the returned
/// transitions (JSON array) to the elements tagged with `data-element`.
#[wasm_bindgen]
pub struct RadarChartHandle {
    chart: RadarChart,
}

#[wasm_bindgen]
impl RadarChartHandle {
    #[wasm_bindgen(constructor)]
    pub fn new(data_json: &str, options_json: Option<String>) -> Result<RadarChartHandle, JsValue> {
        let chart = build_chart(data_json, options_json.as_deref()).map_err(to_js)?;
        Ok(Self { chart })
    }

    pub fn svg(&self) -> String {
        render_chart_svg(&self.chart)
    }

    pub fn pointer_over(&mut self, element: usize, x: f32, y: f32) -> String {
        self.dispatch(ChartEvent::PointerOver {
            target: ElementId(element),
            pointer: PointerPosition { x, y },
        })
    }

    pub fn pointer_move(&mut self, element: usize, x: f32, y: f32) -> String {
        self.dispatch(ChartEvent::PointerMove {
            target: ElementId(element),
            pointer: PointerPosition { x, y },
        })
    }

    pub fn pointer_out(&mut self, element: usize) -> String {
        self.dispatch(ChartEvent::PointerOut {
            target: ElementId(element),
        })
    }

    pub fn click_checkbox(&mut self, series_id: &str) -> String {
        self.dispatch(ChartEvent::CheckboxClick {
            series_id: series_id.to_string(),
        })
    }

    pub fn select_all(&mut self, checked: bool) -> String {
        self.dispatch(ChartEvent::SelectAll { checked })
    }

    pub fn tooltip_html(&self) -> String {
        self.chart.tooltip().html()
    }

    pub fn legend_json(&self) -> String {
        serde_json::to_string(&self.chart.legend()).unwrap_or_else(|_| "[]".to_string())
    }
}

impl RadarChartHandle {
    fn dispatch(&mut self, event: ChartEvent) -> String {
        let transitions = self.chart.handle(event);
        serde_json::to_string(&transitions).unwrap_or_else(|_| "[]".to_string())
    }
}
