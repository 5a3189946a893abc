//! Response envelopes for each endpoint.

use serde::{Deserialize, Serialize};

use super::de;
use super::{Histogram, Interpretation};

/// Body of an interpret response.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InterpretResponse {
    /// Query as understood by the API.
    #[serde(default)]
    pub query: Option<String>,

    /// Interpretations, most likely first.
    #[serde(default, deserialize_with = "de::nullable")]
    pub interpretations: Vec<Interpretation>,
}

/// Body of an evaluate response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluateResponse<T> {
    /// Expression that was evaluated.
    #[serde(default)]
    pub expr: Option<String>,

    /// Matching entities.
    #[serde(default = "Vec::new")]
    pub entities: Vec<T>,
}

/// Body of a calchistogram response.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HistogramResponse {
    /// Expression that was evaluated.
    #[serde(default)]
    pub expr: Option<String>,

    /// Number of matching entities.
    #[serde(default)]
    pub num_entities: u64,

    /// One histogram per requested attribute.
    #[serde(default, deserialize_with = "de::nullable")]
    pub histograms: Vec<Histogram>,
}
