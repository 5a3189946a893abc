//! Microsoft Academic Knowledge API client
//!
//! Builds queries for the Academic Knowledge endpoints, sends them with a
//! subscription key, and parses the responses into typed entities.
//!
//! # Features
//!
//! - **Four endpoints**: interpret, evaluate, calchistogram, similarity
//! - **Typed entities**: papers, authors, affiliations, fields of study,
//!   journals, conferences
//! - **Author harvesting**: an author's papers plus the papers citing them,
//!   fetched with bounded concurrency
//! - **Cached**: 5-minute TTL cache reduces API calls
//!
//! # Example
//!
//! ```no_run
//! use maka::{client::AcademicClient, config::Config, query::EvaluateQuery};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env()?;
//!     let client = AcademicClient::new(config)?;
//!
//!     let query = EvaluateQuery::new("Composite(AA.AuN=='albert einstein')")
//!         .with_attributes("Id,Ti,Y,CC");
//!     for paper in client.evaluate(&query).await? {
//!         println!("{} ({:?})", paper.title_or_default(), paper.year);
//!     }
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod formatters;
pub mod harvest;
pub mod models;
pub mod query;

pub use client::AcademicClient;
pub use config::Config;
pub use error::{ClientError, QueryError};
