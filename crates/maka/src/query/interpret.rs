//! Interpret endpoint query.

use super::{FormBody, text_arg, uint_arg};
use crate::config::api;
use crate::error::{QueryError, QueryResult};

/// Query for `/interpret`: turn natural language into expressions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterpretQuery {
    /// Natural-language query (required).
    pub query: Option<String>,
    /// Generate auto-completion suggestions.
    pub complete: bool,
    /// Maximum number of interpretations.
    pub count: u32,
    /// Index of the first interpretation.
    pub offset: u32,
    /// Server-side timeout in milliseconds.
    pub timeout: u32,
    /// Model name.
    pub model: String,
}

impl Default for InterpretQuery {
    fn default() -> Self {
        Self {
            query: None,
            complete: false,
            count: api::MAX_PAGE_RESULTS,
            offset: 0,
            timeout: api::INTERPRET_TIMEOUT_MS,
            model: api::MODEL.to_string(),
        }
    }
}

impl InterpretQuery {
    /// Path relative to the base URL.
    pub const PATH: &'static str = "/interpret";

    /// Create a query for the given text.
    #[must_use]
    pub fn new(query: impl Into<String>) -> Self {
        Self { query: Some(query.into()), ..Self::default() }
    }

    /// Set the query text.
    #[must_use]
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    /// Enable or disable auto-completion.
    #[must_use]
    pub const fn with_complete(mut self, complete: bool) -> Self {
        self.complete = complete;
        self
    }

    /// Set the maximum number of interpretations.
    #[must_use]
    pub const fn with_count(mut self, count: u32) -> Self {
        self.count = count;
        self
    }

    /// Set the index of the first interpretation.
    #[must_use]
    pub const fn with_offset(mut self, offset: u32) -> Self {
        self.offset = offset;
        self
    }

    /// Set the server-side timeout in milliseconds.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: u32) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the model name.
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Build from a loose argument map; absent keys keep their defaults.
    pub fn from_arguments(args: &serde_json::Map<String, serde_json::Value>) -> QueryResult<Self> {
        let defaults = Self::default();
        Ok(Self {
            query: text_arg(args, "query"),
            complete: uint_arg(args, "complete")?.map_or(defaults.complete, |v| v != 0),
            count: uint_arg(args, "count")?.unwrap_or(defaults.count),
            offset: uint_arg(args, "offset")?.unwrap_or(defaults.offset),
            timeout: uint_arg(args, "timeout")?.unwrap_or(defaults.timeout),
            model: text_arg(args, "model").unwrap_or(defaults.model),
        })
    }

    /// Form body for the POST request.
    pub fn form(&self) -> QueryResult<FormBody> {
        let query = self.query.as_ref().ok_or_else(|| QueryError::required("Interpret needs a query"))?;

        Ok(vec![
            ("query", query.clone()),
            ("complete", u8::from(self.complete).to_string()),
            ("count", self.count.to_string()),
            ("offset", self.offset.to_string()),
            ("timeout", self.timeout.to_string()),
            ("model", self.model.clone()),
        ])
    }
}
