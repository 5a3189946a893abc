//! Attribute histograms returned by calchistogram.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::de;
use super::entity::{AcademicEntity, Attribute};

/// Distribution of one attribute over the entities matching an expression.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Histogram {
    /// Attribute name (e.g. `Y`).
    #[serde(default)]
    pub attribute: Option<String>,

    /// Number of distinct values.
    #[serde(rename(deserialize = "distinct_values"), alias = "values", default)]
    pub values: u64,

    /// Total number of values.
    #[serde(rename(deserialize = "total_count"), alias = "count", default)]
    pub count: u64,

    /// Buckets, most frequent first.
    #[serde(rename(deserialize = "histogram"), alias = "data", default, deserialize_with = "de::nullable")]
    pub data: Vec<HistogramValue>,
}

impl AcademicEntity for Histogram {
    const ATTRIBUTES: &'static [Attribute] = &[
        Attribute::new("attribute", "attribute", "Attribute"),
        Attribute::new("values", "distinct_values", "Values"),
        Attribute::new("count", "total_count", "Count"),
        Attribute::new("data", "histogram", "Data"),
    ];
}

impl Histogram {
    /// Attribute name or "?".
    #[must_use]
    pub fn attribute_or_default(&self) -> &str {
        self.attribute.as_deref().unwrap_or("?")
    }

    /// Largest bucket count.
    #[must_use]
    pub fn max_count(&self) -> u64 {
        self.data.iter().map(|bucket| bucket.count).max().unwrap_or(0)
    }
}

/// One histogram bucket.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HistogramValue {
    /// Attribute value; a number or a string depending on the attribute.
    #[serde(default)]
    pub value: Value,

    /// Log probability mass of the bucket.
    #[serde(rename(deserialize = "prob"), alias = "probability", default)]
    pub probability: f64,

    /// Number of entities with this value.
    #[serde(default)]
    pub count: u64,
}

impl AcademicEntity for HistogramValue {
    const ATTRIBUTES: &'static [Attribute] = &[
        Attribute::new("value", "value", "Values"),
        Attribute::new("probability", "prob", "Probability"),
        Attribute::new("count", "count", "Count"),
    ];
}

impl HistogramValue {
    /// Bucket value rendered as a label.
    #[must_use]
    pub fn label(&self) -> String {
        match &self.value {
            Value::String(s) => s.clone(),
            Value::Null => "null".to_string(),
            other => other.to_string(),
        }
    }
}
