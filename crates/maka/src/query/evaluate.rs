//! Evaluate and calchistogram endpoint queries.

use super::{FormBody, text_arg, uint_arg};
use crate::config::api;
use crate::error::{QueryError, QueryResult};

/// Query for `/evaluate`: fetch entities matching an expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvaluateQuery {
    /// Query expression (required).
    pub expr: Option<String>,
    /// Comma-separated attribute codes to return (`*` for all).
    pub attributes: String,
    /// Maximum number of entities.
    pub count: u32,
    /// Index of the first entity.
    pub offset: u32,
    /// Model name.
    pub model: String,
}

impl Default for EvaluateQuery {
    fn default() -> Self {
        Self {
            expr: None,
            attributes: "Id".to_string(),
            count: api::MAX_PAGE_RESULTS,
            offset: 0,
            model: api::MODEL.to_string(),
        }
    }
}

impl EvaluateQuery {
    /// Path relative to the base URL.
    pub const PATH: &'static str = "/evaluate";

    /// Create a query for the given expression.
    #[must_use]
    pub fn new(expr: impl Into<String>) -> Self {
        Self { expr: Some(expr.into()), ..Self::default() }
    }

    /// Set the expression.
    #[must_use]
    pub fn with_expr(mut self, expr: impl Into<String>) -> Self {
        self.expr = Some(expr.into());
        self
    }

    /// Set the returned attributes.
    #[must_use]
    pub fn with_attributes(mut self, attributes: impl Into<String>) -> Self {
        self.attributes = attributes.into();
        self
    }

    /// Set the maximum number of entities.
    #[must_use]
    pub const fn with_count(mut self, count: u32) -> Self {
        self.count = count;
        self
    }

    /// Set the index of the first entity.
    #[must_use]
    pub const fn with_offset(mut self, offset: u32) -> Self {
        self.offset = offset;
        self
    }

    /// Set the model name.
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Same query, one page further on.
    #[must_use]
    pub fn next_page(&self) -> Self {
        Self { offset: self.offset.saturating_add(self.count), ..self.clone() }
    }

    /// Build from a loose argument map; absent keys keep their defaults.
    pub fn from_arguments(args: &serde_json::Map<String, serde_json::Value>) -> QueryResult<Self> {
        let defaults = Self::default();
        Ok(Self {
            expr: text_arg(args, "expr"),
            attributes: text_arg(args, "attributes").unwrap_or(defaults.attributes),
            count: uint_arg(args, "count")?.unwrap_or(defaults.count),
            offset: uint_arg(args, "offset")?.unwrap_or(defaults.offset),
            model: text_arg(args, "model").unwrap_or(defaults.model),
        })
    }

    /// Form body for the POST request.
    pub fn form(&self) -> QueryResult<FormBody> {
        let expr = self.expr.as_ref().ok_or_else(|| QueryError::required("Evaluate needs an expr"))?;

        Ok(vec![
            ("expr", expr.clone()),
            ("attributes", self.attributes.clone()),
            ("count", self.count.to_string()),
            ("offset", self.offset.to_string()),
            ("model", self.model.clone()),
        ])
    }
}

/// Query for `/calchistogram`: value distributions of attributes over
/// the entities matching an expression.
///
/// Takes the same parameters as [`EvaluateQuery`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CalcHistogramQuery(pub EvaluateQuery);

impl CalcHistogramQuery {
    /// Path relative to the base URL.
    pub const PATH: &'static str = "/calchistogram";

    /// Create a query for the given expression.
    #[must_use]
    pub fn new(expr: impl Into<String>) -> Self {
        Self(EvaluateQuery::new(expr))
    }

    /// Set the attributes to compute histograms for.
    #[must_use]
    pub fn with_attributes(self, attributes: impl Into<String>) -> Self {
        Self(self.0.with_attributes(attributes))
    }

    /// Set the maximum number of buckets per histogram.
    #[must_use]
    pub fn with_count(self, count: u32) -> Self {
        Self(self.0.with_count(count))
    }

    /// Set the index of the first bucket.
    #[must_use]
    pub fn with_offset(self, offset: u32) -> Self {
        Self(self.0.with_offset(offset))
    }

    /// Build from a loose argument map; absent keys keep their defaults.
    pub fn from_arguments(args: &serde_json::Map<String, serde_json::Value>) -> QueryResult<Self> {
        EvaluateQuery::from_arguments(args).map(Self)
    }

    /// Form body for the POST request.
    pub fn form(&self) -> QueryResult<FormBody> {
        self.0.form()
    }
}

impl From<EvaluateQuery> for CalcHistogramQuery {
    fn from(query: EvaluateQuery) -> Self {
        Self(query)
    }
}
