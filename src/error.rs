use thiserror::Error;

/// Everything that can make a chart impossible to lay out.
///
/// Series are referred to by their position in the input, which is the order
/// the caller sees in the data file.
#[derive(Debug, Error)]
pub enum ChartError {
    #[error("invalid chart data: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("chart data contains no series")]
    EmptyData,

    #[error("series {series} has no points")]
    EmptySeries { series: usize },

    #[error("series {series} has {found} points but the chart has {expected} axes")]
    AxisCountMismatch {
        series: usize,
        expected: usize,
        found: usize,
    },

    #[error("series {series}, point {index}: missing field `{field}`")]
    MissingField {
        series: usize,
        index: usize,
        field: String,
    },

    #[error("series {series}, point {index}: field `{field}` is not a number")]
    InvalidValue {
        series: usize,
        index: usize,
        field: String,
    },

    #[error("series {series}, point {index}: field `{field}` is out of range")]
    ValueOutOfRange {
        series: usize,
        index: usize,
        field: String,
    },

    #[error("series {series} repeats the id `{id}` of series {first}")]
    DuplicateSeriesId {
        series: usize,
        first: usize,
        id: String,
    },

    #[error("maximum chart value must be positive")]
    DegenerateScale,

    #[error("invalid options: {0}")]
    InvalidOptions(String),
}
