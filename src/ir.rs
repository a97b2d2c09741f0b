use crate::config::RadarOptions;
use crate::error::ChartError;
use serde::Serialize;
use serde_json::{Map, Value};
use std::cmp::Ordering;
use std::collections::HashMap;

#[derive(Debug, Clone, Serialize)]
pub struct Point {
    pub axis: String,
    pub value: f32,
    pub id: String,
    pub name: String,
    pub description: String,
    /// Index of the owning series in `Dataset::series`.
    pub series: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct Series {
    pub id: String,
    pub name: String,
    pub description: String,
    pub color: String,
    pub average: f32,
    /// Position of the series in the caller's data.
    pub input_index: usize,
    pub points: Vec<Point>,
}

/// Validated chart data, in draw order.
#[derive(Debug, Clone, Serialize)]
pub struct Dataset {
    pub series: Vec<Series>,
    pub axes: Vec<String>,
    /// Largest point value across every series.
    pub observed_max: f32,
}

impl Dataset {
    pub fn axis_count(&self) -> usize {
        self.axes.len()
    }

    pub fn series_index(&self, id: &str) -> Option<usize> {
        self.series.iter().position(|series| series.id == id)
    }

    /// Series in the order the caller supplied them.
    pub fn input_order(&self) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.series.len()).collect();
        order.sort_by_key(|&idx| self.series[idx].input_index);
        order
    }
}

/// Parses a JSON array of `{ "values": [...] }` records (or an object with a
/// `series` array) into a dataset ready for layout.
pub fn parse_series(input: &str, options: &RadarOptions) -> Result<Dataset, ChartError> {
    let root: Value = serde_json::from_str(input)?;
    let records = match root {
        Value::Array(items) => items,
        Value::Object(mut map) => match map.remove("series") {
            Some(Value::Array(items)) => items,
            _ => return Err(ChartError::EmptyData),
        },
        _ => return Err(ChartError::EmptyData),
    };
    build_dataset(&records, options)
}

pub fn build_dataset(records: &[Value], options: &RadarOptions) -> Result<Dataset, ChartError> {
    if records.is_empty() {
        return Err(ChartError::EmptyData);
    }

    let mut series = Vec::with_capacity(records.len());
    for (series_idx, record) in records.iter().enumerate() {
        series.push(parse_record(series_idx, record, options)?);
    }

    let mut seen: HashMap<&str, usize> = HashMap::new();
    for (idx, s) in series.iter().enumerate() {
        if let Some(&first) = seen.get(s.id.as_str()) {
            return Err(ChartError::DuplicateSeriesId {
                series: idx,
                first,
                id: s.id.clone(),
            });
        }
        seen.insert(&s.id, idx);
    }

    let expected = series[0].points.len();
    for (idx, s) in series.iter().enumerate() {
        if s.points.len() != expected {
            return Err(ChartError::AxisCountMismatch {
                series: idx,
                expected,
                found: s.points.len(),
            });
        }
    }

    assign_colors(&mut series, &options.color);

    if options.sort_areas {
        // Larger blobs first so smaller ones end up on top.
        series.sort_by(|a, b| {
            b.average
                .partial_cmp(&a.average)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.input_index.cmp(&b.input_index))
        });
    }
    for (idx, s) in series.iter_mut().enumerate() {
        for point in &mut s.points {
            point.series = idx;
        }
    }

    let axes = series[0].points.iter().map(|p| p.axis.clone()).collect();
    let observed_max = series
        .iter()
        .flat_map(|s| s.points.iter().map(|p| p.value))
        .fold(f32::NEG_INFINITY, f32::max);

    Ok(Dataset {
        series,
        axes,
        observed_max,
    })
}

fn parse_record(series_idx: usize, record: &Value, options: &RadarOptions) -> Result<Series, ChartError> {
    let values = record
        .get("values")
        .and_then(Value::as_array)
        .ok_or_else(|| ChartError::MissingField {
            series: series_idx,
            index: 0,
            field: "values".to_string(),
        })?;
    if values.is_empty() {
        return Err(ChartError::EmptySeries { series: series_idx });
    }

    let key = record.get("key").and_then(Value::as_object);
    let first = values[0].as_object();
    let lookup = |field: &str| {
        key.and_then(|k| k.get(field))
            .or_else(|| first.and_then(|p| p.get(field)))
            .and_then(value_to_label)
    };
    let id = lookup("id").unwrap_or_else(|| series_idx.to_string());
    let name = lookup("name").unwrap_or_else(|| id.clone());
    let description = key
        .and_then(|k| k.get("description"))
        .and_then(value_to_label)
        .unwrap_or_default();

    let mut points = Vec::with_capacity(values.len());
    for (index, raw) in values.iter().enumerate() {
        let empty = Map::new();
        let fields = raw.as_object().unwrap_or(&empty);
        let axis = fields
            .get(&options.axis_name)
            .and_then(value_to_label)
            .ok_or_else(|| ChartError::MissingField {
                series: series_idx,
                index,
                field: options.axis_name.clone(),
            })?;
        let value = match fields.get(&options.value) {
            None | Some(Value::Null) => {
                return Err(ChartError::MissingField {
                    series: series_idx,
                    index,
                    field: options.value.clone(),
                });
            }
            Some(v) => {
                let wide = v.as_f64().ok_or_else(|| ChartError::InvalidValue {
                    series: series_idx,
                    index,
                    field: options.value.clone(),
                })?;
                let narrow = wide as f32;
                if !narrow.is_finite() {
                    return Err(ChartError::ValueOutOfRange {
                        series: series_idx,
                        index,
                        field: options.value.clone(),
                    });
                }
                narrow
            }
        };
        points.push(Point {
            axis,
            value,
            id: fields
                .get("id")
                .and_then(value_to_label)
                .unwrap_or_else(|| id.clone()),
            name: fields
                .get("name")
                .and_then(value_to_label)
                .unwrap_or_else(|| name.clone()),
            description: fields
                .get("description")
                .and_then(value_to_label)
                .unwrap_or_default(),
            series: series_idx,
        });
    }

    let average = points.iter().map(|p| p.value).sum::<f32>() / points.len() as f32;
    Ok(Series {
        id,
        name,
        description,
        color: String::new(),
        average,
        input_index: series_idx,
        points,
    })
}

/// Ordinal color assignment in input order, wrapping around when the
/// palette runs out.
fn assign_colors(series: &mut [Series], palette: &[String]) {
    for (idx, s) in series.iter_mut().enumerate() {
        s.color = palette
            .get(idx % palette.len().max(1))
            .cloned()
            .unwrap_or_else(|| "black".to_string());
    }
}

fn value_to_label(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Some(i.to_string())
            } else if let Some(u) = n.as_u64() {
                Some(u.to_string())
            } else {
                n.as_f64().map(|f| {
                    if f.fract() == 0.0 && f.abs() < 1e15 {
                        format!("{}", f as i64)
                    } else {
                        f.to_string()
                    }
                })
            }
        }
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series_json(averages: &[(u32, f32)]) -> String {
        let records: Vec<String> = averages
            .iter()
            .map(|(id, value)| {
                format!(
                    r#"{{"values":[{{"axis":"A","value":{value},"id":{id},"name":"S{id}"}},{{"axis":"B","value":{value},"id":{id},"name":"S{id}"}},{{"axis":"C","value":{value},"id":{id},"name":"S{id}"}}]}}"#
                )
            })
            .collect();
        format!("[{}]", records.join(","))
    }

    #[test]
    fn sorts_series_by_descending_average() {
        let data = series_json(&[(1, 3.0), (2, 1.0), (3, 2.0)]);
        let dataset = parse_series(&data, &RadarOptions::default()).unwrap();
        let averages: Vec<f32> = dataset.series.iter().map(|s| s.average).collect();
        assert_eq!(averages, vec![3.0, 2.0, 1.0]);
        let ids: Vec<&str> = dataset.series.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "3", "2"]);
    }

    #[test]
    fn sort_can_be_disabled() {
        let data = series_json(&[(1, 1.0), (2, 3.0)]);
        let options = RadarOptions {
            sort_areas: false,
            ..Default::default()
        };
        let dataset = parse_series(&data, &options).unwrap();
        assert_eq!(dataset.series[0].id, "1");
        assert_eq!(dataset.series[1].id, "2");
    }

    #[test]
    fn colors_follow_input_order_not_draw_order() {
        let data = series_json(&[(1, 1.0), (2, 3.0)]);
        let dataset = parse_series(&data, &RadarOptions::default()).unwrap();
        let first = &dataset.series[dataset.series_index("1").unwrap()];
        let second = &dataset.series[dataset.series_index("2").unwrap()];
        assert_eq!(first.color, "#1f77b4");
        assert_eq!(second.color, "#ff7f0e");
        assert_eq!(dataset.input_order(), vec![1, 0]);
    }

    #[test]
    fn points_point_back_at_their_series() {
        let data = series_json(&[(1, 1.0), (2, 3.0)]);
        let dataset = parse_series(&data, &RadarOptions::default()).unwrap();
        for (idx, series) in dataset.series.iter().enumerate() {
            assert!(series.points.iter().all(|p| p.series == idx && p.id == series.id));
        }
    }

    #[test]
    fn key_record_takes_precedence_for_identity() {
        let data = r#"[{"key":{"id":"eu","name":"European Union"},
            "values":[{"axis":"Food","value":0.2,"id":"x","name":"ignored"}]}]"#;
        let dataset = parse_series(data, &RadarOptions::default()).unwrap();
        assert_eq!(dataset.series[0].id, "eu");
        assert_eq!(dataset.series[0].name, "European Union");
        assert_eq!(dataset.series[0].points[0].id, "x");
    }

    #[test]
    fn custom_field_names_are_used() {
        let data = r#"{"series":[{"values":[
            {"description":"Food","share":0.25},
            {"description":"Fuel","share":0.5}]}]}"#;
        let options = RadarOptions {
            axis_name: "description".to_string(),
            value: "share".to_string(),
            ..Default::default()
        };
        let dataset = parse_series(data, &options).unwrap();
        assert_eq!(dataset.axes, vec!["Food", "Fuel"]);
        assert_eq!(dataset.observed_max, 0.5);
        assert_eq!(dataset.series[0].id, "0");
    }

    #[test]
    fn rejects_empty_and_mismatched_input() {
        let options = RadarOptions::default();
        assert!(matches!(parse_series("[]", &options), Err(ChartError::EmptyData)));
        assert!(matches!(
            parse_series(r#"[{"values":[]}]"#, &options),
            Err(ChartError::EmptySeries { series: 0 })
        ));
        let mismatched = r#"[
            {"values":[{"axis":"A","value":1},{"axis":"B","value":2}]},
            {"values":[{"axis":"A","value":1}]}]"#;
        assert!(matches!(
            parse_series(mismatched, &options),
            Err(ChartError::AxisCountMismatch {
                series: 1,
                expected: 2,
                found: 1
            })
        ));
    }

    #[test]
    fn rejects_missing_and_non_numeric_values() {
        let options = RadarOptions::default();
        assert!(matches!(
            parse_series(r#"[{"values":[{"axis":"A"}]}]"#, &options),
            Err(ChartError::MissingField { .. })
        ));
        assert!(matches!(
            parse_series(r#"[{"values":[{"axis":"A","value":"high"}]}]"#, &options),
            Err(ChartError::InvalidValue { .. })
        ));
    }

    #[test]
    fn values_beyond_f32_are_out_of_range() {
        let err = parse_series(r#"[{"values":[{"axis":"A","value":1e39}]}]"#, &RadarOptions::default())
            .unwrap_err();
        assert!(matches!(err, ChartError::ValueOutOfRange { series: 0, index: 0, .. }));
        assert!(err.to_string().contains("out of range"));
    }

    #[test]
    fn repeated_series_ids_are_rejected() {
        let data = r#"[
            {"values":[{"axis":"A","value":1,"id":"x"},{"axis":"B","value":2,"id":"x"}]},
            {"values":[{"axis":"A","value":2,"id":"y"},{"axis":"B","value":1,"id":"y"}]},
            {"values":[{"axis":"A","value":3,"id":"x"},{"axis":"B","value":3,"id":"x"}]}]"#;
        let err = parse_series(data, &RadarOptions::default()).unwrap_err();
        match err {
            ChartError::DuplicateSeriesId { series, first, id } => {
                assert_eq!((series, first), (2, 0));
                assert_eq!(id, "x");
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn palette_wraps_in_input_order() {
        let data = series_json(&[(1, 1.0), (2, 2.0), (3, 3.0)]);
        let options = RadarOptions {
            color: vec!["red".to_string(), "blue".to_string()],
            ..Default::default()
        };
        let dataset = parse_series(&data, &options).unwrap();
        let color_of = |id: &str| dataset.series[dataset.series_index(id).unwrap()].color.clone();
        assert_eq!(color_of("1"), "red");
        assert_eq!(color_of("2"), "blue");
        assert_eq!(color_of("3"), "red");
    }
}
