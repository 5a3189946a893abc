//! Similarity endpoint query.

use super::{FormBody, text_arg};
use crate::error::{QueryError, QueryResult};

/// Query for `/similarity`: semantic similarity of two strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SimilarityQuery {
    /// First string.
    pub s1: Option<String>,
    /// Second string.
    pub s2: Option<String>,
}

impl SimilarityQuery {
    /// Path relative to the base URL.
    pub const PATH: &'static str = "/similarity";

    /// Create a query comparing two strings.
    #[must_use]
    pub fn new(s1: impl Into<String>, s2: impl Into<String>) -> Self {
        Self { s1: Some(s1.into()), s2: Some(s2.into()) }
    }

    /// Build from a loose argument map.
    pub fn from_arguments(args: &serde_json::Map<String, serde_json::Value>) -> QueryResult<Self> {
        Ok(Self { s1: text_arg(args, "s1"), s2: text_arg(args, "s2") })
    }

    /// Form body for the POST request.
    pub fn form(&self) -> QueryResult<FormBody> {
        match (&self.s1, &self.s2) {
            (Some(s1), Some(s2)) => Ok(vec![("s1", s1.clone()), ("s2", s2.clone())]),
            _ => Err(QueryError::required("Similarity needs two strings to compare")),
        }
    }
}
