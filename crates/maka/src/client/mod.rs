//! Microsoft Academic Knowledge API client.
//!
//! Provides an async HTTP client with:
//! - Connection pooling via reqwest
//! - Retry middleware with exponential backoff
//! - A fixed delay before each request
//! - Response caching with 5-minute TTL

mod middleware;

use std::time::Duration;

use moka::future::Cache;
use reqwest::header::CONTENT_TYPE;
use reqwest_middleware::ClientWithMiddleware;
use serde::de::DeserializeOwned;

use crate::config::Config;
use crate::error::{ClientError, ClientResult};
use crate::models::{
    EvaluateResponse, Histogram, HistogramResponse, InterpretResponse, Interpretation, Paper,
};
use crate::query::{
    AcademicQuery, CalcHistogramQuery, EvaluateQuery, FormBody, InterpretQuery, SimilarityQuery,
};

/// Parsed result of [`AcademicClient::execute`].
#[derive(Debug, Clone)]
pub enum QueryOutcome {
    /// Interpret results.
    Interpretations(Vec<Interpretation>),
    /// Evaluate results.
    Papers(Vec<Paper>),
    /// Calchistogram results.
    Histograms(Vec<Histogram>),
    /// Similarity score.
    Similarity(f64),
}

/// Academic Knowledge API client.
#[derive(Clone)]
pub struct AcademicClient {
    /// HTTP client with middleware.
    client: ClientWithMiddleware,

    /// Response cache.
    cache: Cache<String, serde_json::Value>,

    /// Subscription key (optional until a request is made).
    subscription_key: Option<String>,

    /// API base URL.
    base_url: String,

    /// Delay before each request.
    rate_limit_delay: Duration,
}

impl AcademicClient {
    /// Create a new client with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns error if HTTP client initialization fails or the
    /// subscription key is not a valid header value.
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let client = middleware::build_client(&config)?;

        let cache = Cache::builder()
            .max_capacity(config.cache_max_size)
            .time_to_live(config.cache_ttl)
            .build();

        Ok(Self {
            client,
            cache,
            subscription_key: config.subscription_key,
            base_url: config.base_url,
            rate_limit_delay: config.rate_limit_delay,
        })
    }

    /// Check if a subscription key is configured.
    #[must_use]
    pub fn has_subscription_key(&self) -> bool {
        self.subscription_key.is_some()
    }

    /// Base URL requests are sent to.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Interpret a natural-language query.
    ///
    /// # Errors
    ///
    /// Returns error on API failure or if the query is incomplete.
    pub async fn interpret(&self, query: &InterpretQuery) -> ClientResult<Vec<Interpretation>> {
        let form = query.form()?;
        let response: InterpretResponse = self.post_json(InterpretQuery::PATH, &form).await?;
        Ok(response.interpretations)
    }

    /// Evaluate an expression, parsing entities as papers.
    ///
    /// # Errors
    ///
    /// Returns error on API failure or if the query is incomplete.
    pub async fn evaluate(&self, query: &EvaluateQuery) -> ClientResult<Vec<Paper>> {
        self.evaluate_entities(query).await
    }

    /// Evaluate an expression, parsing entities as `T`.
    ///
    /// # Errors
    ///
    /// Returns error on API failure or if the query is incomplete.
    pub async fn evaluate_entities<T>(&self, query: &EvaluateQuery) -> ClientResult<Vec<T>>
    where
        T: DeserializeOwned,
    {
        let form = query.form()?;
        let response: EvaluateResponse<T> = self.post_json(EvaluateQuery::PATH, &form).await?;
        Ok(response.entities)
    }

    /// Compute attribute histograms.
    ///
    /// # Errors
    ///
    /// Returns error on API failure or if the query is incomplete.
    pub async fn calc_histogram(&self, query: &CalcHistogramQuery) -> ClientResult<Vec<Histogram>> {
        let form = query.form()?;
        let response: HistogramResponse = self.post_json(CalcHistogramQuery::PATH, &form).await?;
        Ok(response.histograms)
    }

    /// Similarity between two strings.
    ///
    /// # Errors
    ///
    /// Returns error on API failure or if the body is not a number.
    pub async fn similarity(&self, query: &SimilarityQuery) -> ClientResult<f64> {
        let form = query.form()?;
        let text = self.post_text(SimilarityQuery::PATH, &form).await?;
        parse_similarity(&text)
    }

    /// Run any supported query.
    ///
    /// # Errors
    ///
    /// Returns error on API failure or if the query is incomplete.
    pub async fn execute(&self, query: &AcademicQuery) -> ClientResult<QueryOutcome> {
        match query {
            AcademicQuery::Histogram(q) => self.calc_histogram(q).await.map(QueryOutcome::Histograms),
            AcademicQuery::Interpret(q) => self.interpret(q).await.map(QueryOutcome::Interpretations),
            AcademicQuery::Evaluate(q) => self.evaluate(q).await.map(QueryOutcome::Papers),
            AcademicQuery::Similarity(q) => self.similarity(q).await.map(QueryOutcome::Similarity),
        }
    }

    /// POST a form and parse the JSON body, going through the cache.
    async fn post_json<T>(&self, path: &str, form: &FormBody) -> ClientResult<T>
    where
        T: DeserializeOwned,
    {
        self.require_key()?;

        let cache_key = self.cache_key("POST", path, form);
        if let Some(cached) = self.cache.get(&cache_key).await {
            tracing::debug!(path, "Cache hit");
            return serde_json::from_value(cached).map_err(ClientError::from);
        }

        let text = self.post_text(path, form).await?;
        let value: serde_json::Value = serde_json::from_str(&text)?;

        self.cache.insert(cache_key, value.clone()).await;

        serde_json::from_value(value).map_err(ClientError::from)
    }

    /// POST a form and return the raw body.
    async fn post_text(&self, path: &str, form: &FormBody) -> ClientResult<String> {
        self.require_key()?;

        let url = format!("{}{}", self.base_url, path);
        let body = serde_urlencoded::to_string(form)?;

        // Rate limit
        tokio::time::sleep(self.rate_limit_delay).await;

        tracing::debug!(%url, %body, "Sending request");

        let response = self
            .client
            .post(&url)
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(body)
            .send()
            .await?;

        let response = self.handle_response(response).await?;
        let text = response.text().await?;

        tracing::debug!(%url, body = %text, "Received response");

        Ok(text)
    }

    fn require_key(&self) -> ClientResult<()> {
        if self.subscription_key.is_none() {
            return Err(ClientError::MissingSubscriptionKey);
        }
        Ok(())
    }

    /// Handle API response status codes.
    async fn handle_response(
        &self,
        response: reqwest::Response,
    ) -> ClientResult<reqwest::Response> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        match status.as_u16() {
            429 => {
                let retry_after = response
                    .headers()
                    .get("Retry-After")
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(60);

                Err(ClientError::rate_limited(retry_after))
            }
            code @ (401 | 403) => {
                let text = response.text().await.unwrap_or_default();
                Err(ClientError::unauthorized(code, text))
            }
            404 => {
                let text = response.text().await.unwrap_or_default();
                Err(ClientError::not_found(text))
            }
            400 => {
                let text = response.text().await.unwrap_or_default();
                Err(ClientError::bad_request(text))
            }
            500..=599 => {
                let text = response.text().await.unwrap_or_default();
                Err(ClientError::server(status.as_u16(), text))
            }
            _ => {
                let text = response.text().await.unwrap_or_default();
                Err(ClientError::UnexpectedStatus { status: status.as_u16(), message: text })
            }
        }
    }

    /// Generate cache key.
    fn cache_key(&self, method: &str, path: &str, form: &FormBody) -> String {
        use md5::{Digest, Md5};

        let mut hasher = Md5::new();
        hasher.update(method.as_bytes());
        hasher.update(b"|");
        hasher.update(self.base_url.as_bytes());
        hasher.update(path.as_bytes());
        hasher.update(b"|");

        for (k, v) in form {
            hasher.update(k.as_bytes());
            hasher.update(b"=");
            hasher.update(v.as_bytes());
            hasher.update(b"&");
        }

        format!("{:x}", hasher.finalize())
    }
}

impl std::fmt::Debug for AcademicClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AcademicClient")
            .field("base_url", &self.base_url)
            .field("has_subscription_key", &self.has_subscription_key())
            .finish()
    }
}

/// Parse the similarity endpoint's bare-number body.
fn parse_similarity(text: &str) -> ClientResult<f64> {
    let trimmed = text.trim().trim_matches('"');
    trimmed
        .parse::<f64>()
        .map_err(|_| ClientError::InvalidResponse(format!("expected a number, got {text:?}")))
}
