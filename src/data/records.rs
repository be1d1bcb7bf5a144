use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

/// One pie wedge: a category and its share.
///
/// `value` is already on a 0–100 scale for the record the percent readout reports.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct ProportionRecord {
    /// Category label; also the color-scale key.
    pub name: String,
    /// Share of the whole; `NaN` when the source field was not numeric.
    pub value: f64,
    /// Remaining source columns, untouched.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub fields: BTreeMap<String, String>,
}

impl ProportionRecord {
    /// Record without extra columns.
    pub fn new(name: impl Into<String>, value: f64) -> Self {
        Self {
            name: name.into(),
            value,
            fields: BTreeMap::new(),
        }
    }
}

/// One observation in a time series.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct SeriesPoint {
    /// Series the point belongs to.
    pub key: String,
    /// Ordinal position within its series.
    pub name: usize,
    /// Observation instant.
    pub date: DateTime<Utc>,
    /// Integer count; `NaN` when the source field was not numeric.
    pub value: f64,
}

/// Points sharing one key, ascending by date.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Series {
    /// Identity of the series across redraws.
    pub key: String,
    /// Observations.
    pub points: Vec<SeriesPoint>,
}

impl Series {
    /// Largest finite value, if any.
    pub fn max_value(&self) -> Option<f64> {
        self.points
            .iter()
            .map(|p| p.value)
            .filter(|v| !v.is_nan())
            .reduce(f64::max)
    }
}

/// Multi-line chart input.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct MultiSeries {
    /// Distinct observation dates, ascending; the x domain.
    pub dates: Vec<DateTime<Utc>>,
    /// One entry per key, in `keys` order.
    pub series: Vec<Series>,
    /// Series keys in declaration or first-appearance order; the color domain.
    pub keys: Vec<String>,
}

/// A dated count.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct DatedValue {
    /// Observation instant.
    pub date: DateTime<Utc>,
    /// Integer count; `NaN` when not numeric.
    pub value: f64,
}

/// One group's participation split.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct ParticipationRecord {
    /// Participating share.
    pub participation: f64,
    /// Non-participating share.
    pub non_participation: f64,
    /// Remaining source columns, untouched.
    pub fields: BTreeMap<String, String>,
}
