//! Data points and the chart projection derived from them

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Name of the single series when no name is configured
pub const DEFAULT_SERIES_NAME: &str = "Sample Dataset";

/// Free-form metadata attached to a data point
pub type Metadata = BTreeMap<String, serde_json::Value>;

/// One timestamped, labeled sample feeding the chart
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DataPoint {
    pub id: String,
    pub label: String,
    pub value: f64,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

impl DataPoint {
    pub fn new(
        id: impl Into<String>,
        label: impl Into<String>,
        value: f64,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            value,
            timestamp,
            metadata: None,
        }
    }

    pub fn with_metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = Some(metadata);
        self
    }
}

/// Visual hints handed to the chart collaborator with each series
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct SeriesStyle {
    pub background_color: String,
    pub border_color: String,
    pub border_width: f32,
    pub fill: bool,
    pub tension: f32,
}

impl Default for SeriesStyle {
    fn default() -> Self {
        Self {
            background_color: "rgba(75, 192, 192, 0.2)".to_string(),
            border_color: "rgba(75, 192, 192, 1)".to_string(),
            border_width: 1.0,
            fill: true,
            tension: 0.4,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Series {
    pub name: String,
    pub values: Vec<f64>,
    pub style: SeriesStyle,
}

/// Label/value projection of the current data points
///
/// `labels[i]` and every `series[_].values[i]` describe `points[i]`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ChartSeries {
    pub labels: Vec<String>,
    pub series: Vec<Series>,
}

impl ChartSeries {
    /// Project `points` into a single named series, in point order
    pub fn from_points(points: &[DataPoint], name: &str, style: &SeriesStyle) -> Self {
        let mut labels = Vec::with_capacity(points.len());
        let mut values = Vec::with_capacity(points.len());

        for point in points {
            labels.push(point.label.clone());
            values.push(point.value);
        }

        Self {
            labels,
            series: vec![Series {
                name: name.to_string(),
                values,
                style: style.clone(),
            }],
        }
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}
