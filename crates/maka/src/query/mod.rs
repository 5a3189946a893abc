//! Query construction for the Academic Knowledge endpoints.
//!
//! Each endpoint has a builder with the API's defaults. Builders render to
//! an ordered form body; required parameters are checked at that point.

mod evaluate;
pub mod expr;
mod interpret;
mod similarity;

pub use evaluate::{CalcHistogramQuery, EvaluateQuery};
pub use interpret::InterpretQuery;
pub use similarity::SimilarityQuery;

use serde_json::{Map, Value};

use crate::error::{QueryError, QueryResult};

/// Ordered form fields sent as the POST body.
pub type FormBody = Vec<(&'static str, String)>;

/// Kinds of queries the API knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryType {
    /// Attribute histograms (`/calchistogram`).
    Histogram,
    /// Natural-language interpretation (`/interpret`).
    Interpret,
    /// Entity retrieval (`/evaluate`).
    Evaluate,
    /// String similarity (`/similarity`).
    Similarity,
    /// Graph traversal; not supported by this client.
    GraphTraversal,
}

impl QueryType {
    /// Endpoint path, if this client supports the query type.
    #[must_use]
    pub const fn path(self) -> Option<&'static str> {
        match self {
            Self::Histogram => Some(CalcHistogramQuery::PATH),
            Self::Interpret => Some(InterpretQuery::PATH),
            Self::Evaluate => Some(EvaluateQuery::PATH),
            Self::Similarity => Some(SimilarityQuery::PATH),
            Self::GraphTraversal => None,
        }
    }
}

/// A query for any supported endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AcademicQuery {
    /// `/calchistogram`
    Histogram(CalcHistogramQuery),
    /// `/interpret`
    Interpret(InterpretQuery),
    /// `/evaluate`
    Evaluate(EvaluateQuery),
    /// `/similarity`
    Similarity(SimilarityQuery),
}

impl AcademicQuery {
    /// Build a query of the given type from loose arguments.
    ///
    /// Keys not present keep their defaults. Integer parameters accept
    /// numbers or numeric strings.
    pub fn from_arguments(query_type: QueryType, args: &Map<String, Value>) -> QueryResult<Self> {
        match query_type {
            QueryType::Histogram => CalcHistogramQuery::from_arguments(args).map(Self::Histogram),
            QueryType::Interpret => InterpretQuery::from_arguments(args).map(Self::Interpret),
            QueryType::Evaluate => EvaluateQuery::from_arguments(args).map(Self::Evaluate),
            QueryType::Similarity => SimilarityQuery::from_arguments(args).map(Self::Similarity),
            QueryType::GraphTraversal => Err(QueryError::UnsupportedQueryType(query_type)),
        }
    }

    /// Type of this query.
    #[must_use]
    pub const fn query_type(&self) -> QueryType {
        match self {
            Self::Histogram(_) => QueryType::Histogram,
            Self::Interpret(_) => QueryType::Interpret,
            Self::Evaluate(_) => QueryType::Evaluate,
            Self::Similarity(_) => QueryType::Similarity,
        }
    }

    /// Endpoint path relative to the base URL.
    #[must_use]
    pub const fn path(&self) -> &'static str {
        match self {
            Self::Histogram(_) => CalcHistogramQuery::PATH,
            Self::Interpret(_) => InterpretQuery::PATH,
            Self::Evaluate(_) => EvaluateQuery::PATH,
            Self::Similarity(_) => SimilarityQuery::PATH,
        }
    }

    /// Form body for the POST request.
    pub fn form(&self) -> QueryResult<FormBody> {
        match self {
            Self::Histogram(q) => q.form(),
            Self::Interpret(q) => q.form(),
            Self::Evaluate(q) => q.form(),
            Self::Similarity(q) => q.form(),
        }
    }
}

/// Read a text argument; numbers are accepted in their textual form.
pub(crate) fn text_arg(args: &Map<String, Value>, key: &str) -> Option<String> {
    match args.get(key)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Read a non-negative integer argument.
pub(crate) fn uint_arg(args: &Map<String, Value>, key: &str) -> QueryResult<Option<u32>> {
    let value = match args.get(key) {
        None | Some(Value::Null) => return Ok(None),
        Some(value) => value,
    };

    let parsed = match value {
        Value::Number(n) => n.as_u64().and_then(|v| u32::try_from(v).ok()),
        Value::String(s) => s.trim().parse::<u32>().ok(),
        Value::Bool(b) => Some(u32::from(*b)),
        _ => None,
    };

    match parsed {
        Some(v) => Ok(Some(v)),
        None => Err(QueryError::format(key, value.to_string())),
    }
}
