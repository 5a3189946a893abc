//! Author publication harvesting.
//!
//! Resolves an author name through interpret, pages through the author's
//! papers with evaluate, then fetches the papers citing each of them with
//! a bounded number of requests in flight.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use futures::stream::{self, StreamExt};
use serde::{Deserialize, Serialize};

use crate::client::AcademicClient;
use crate::config::api;
use crate::error::ClientResult;
use crate::models::{Interpretation, Paper};
use crate::query::{EvaluateQuery, InterpretQuery, expr};

/// Harvest tuning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HarvestOptions {
    /// Citation fetches in flight at once.
    pub workers: usize,
    /// Entities requested per evaluate page.
    pub page_size: u32,
    /// Stop paging after this many pages per expression.
    pub max_pages: Option<u32>,
    /// Attributes requested for every paper.
    pub attributes: String,
}

impl Default for HarvestOptions {
    fn default() -> Self {
        Self {
            workers: api::WORKERS,
            page_size: api::MAX_PAGE_RESULTS,
            max_pages: None,
            attributes: "*".to_string(),
        }
    }
}

/// Everything found for one author.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AuthorReport {
    /// Author name as given.
    pub author: String,
    /// Normalized names the API matched the author to.
    pub aliases: Vec<String>,
    /// The author's papers, each with its citing papers in `cites`.
    pub articles: Vec<Paper>,
}

impl AuthorReport {
    /// Empty report for an author.
    #[must_use]
    pub fn empty(author: impl Into<String>) -> Self {
        Self { author: author.into(), ..Self::default() }
    }

    /// Output file name: the author name without whitespace, plus `.json`.
    #[must_use]
    pub fn file_name(&self) -> String {
        let stem: String = self
            .author
            .chars()
            .filter(|c| !c.is_whitespace() && !matches!(c, '/' | '\\'))
            .collect();
        format!("{stem}.json")
    }

    /// Number of citing papers across all articles.
    #[must_use]
    pub fn total_citing(&self) -> usize {
        self.articles.iter().map(|paper| paper.cites.len()).sum()
    }

    /// Write the report as pretty JSON into `dir`, returning the path.
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be written.
    pub fn write_to(&self, dir: &Path) -> anyhow::Result<PathBuf> {
        let path = dir.join(self.file_name());
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(&path, json)
            .with_context(|| format!("failed to write {}", path.display()))?;
        Ok(path)
    }
}

/// What a batch run wrote and which authors failed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchSummary {
    /// Report files written, in author order.
    pub written: Vec<PathBuf>,
    /// Authors whose harvest or report write failed.
    pub failed: Vec<String>,
}

impl BatchSummary {
    /// True when every author was written.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Fetches an author's papers and the papers citing them.
#[derive(Debug, Clone)]
pub struct AuthorHarvester {
    client: Arc<AcademicClient>,
    options: HarvestOptions,
}

impl AuthorHarvester {
    /// Create a harvester.
    #[must_use]
    pub fn new(client: Arc<AcademicClient>, options: HarvestOptions) -> Self {
        Self { client, options }
    }

    /// Harvesting options in use.
    #[must_use]
    pub const fn options(&self) -> &HarvestOptions {
        &self.options
    }

    /// Harvest one author.
    ///
    /// Failures while resolving the author or listing their papers are
    /// returned. A failure fetching one paper's citations leaves that
    /// paper's `cites` empty.
    ///
    /// # Errors
    ///
    /// Returns error if the interpret or paper evaluate calls fail.
    pub async fn run(&self, author: &str) -> ClientResult<AuthorReport> {
        let query = InterpretQuery::new(expr::author_query(author));
        let interpretations = self.client.interpret(&query).await?;

        let values: Vec<&str> =
            interpretations.iter().filter_map(Interpretation::first_value).collect();

        let mut aliases: Vec<String> = Vec::new();
        for name in values.iter().flat_map(|value| expr::author_names_in(value)) {
            if !aliases.contains(&name) {
                aliases.push(name);
            }
        }

        let Some(papers_expr) = expr::or_all(&values) else {
            tracing::info!(author, "No interpretation matched the author");
            return Ok(AuthorReport { aliases, ..AuthorReport::empty(author) });
        };

        let articles = self.fetch_all(&papers_expr).await?;
        tracing::info!(author, papers = articles.len(), "Fetched papers");

        let articles = self.attach_citations(articles).await;

        Ok(AuthorReport { author: author.to_string(), aliases, articles })
    }

    /// Harvest several authors one after another, writing each report into
    /// `dir` as soon as it is ready.
    ///
    /// A harvest or write failure is logged and the next author is tried.
    /// `on_written` is called for every report that reached disk.
    pub async fn run_batch<F>(&self, authors: &[String], dir: &Path, mut on_written: F) -> BatchSummary
    where
        F: FnMut(&AuthorReport, &Path),
    {
        let mut summary = BatchSummary::default();

        for author in authors {
            let written = match self.run(author).await {
                Ok(report) => report.write_to(dir).map(|path| (report, path)),
                Err(err) => Err(err.into()),
            };

            match written {
                Ok((report, path)) => {
                    tracing::info!(author = %author, path = %path.display(), "Wrote report");
                    on_written(&report, &path);
                    summary.written.push(path);
                }
                Err(err) => {
                    let error = format!("{err:#}");
                    tracing::error!(author = %author, error, "Harvest failed");
                    summary.failed.push(author.clone());
                }
            }
        }

        summary
    }

    /// Page through every entity matching `expr`, dropping repeated IDs.
    async fn fetch_all(&self, expr: &str) -> ClientResult<Vec<Paper>> {
        let page_size = self.options.page_size;
        let mut query = EvaluateQuery::new(expr)
            .with_attributes(self.options.attributes.clone())
            .with_count(page_size);

        let mut papers = Vec::new();
        let mut seen = HashSet::new();
        let mut pages = 0;

        loop {
            let page = self.client.evaluate(&query).await?;
            pages += 1;

            let full = page_size > 0 && page.len() >= page_size as usize;
            for paper in page {
                if seen.insert(paper.id) {
                    papers.push(paper);
                }
            }

            if !full || self.options.max_pages.is_some_and(|max| pages >= max) {
                break;
            }
            query = query.next_page();
        }

        Ok(papers)
    }

    /// Fill in `cites` for every article, `workers` requests at a time.
    async fn attach_citations(&self, mut articles: Vec<Paper>) -> Vec<Paper> {
        let ids: Vec<(usize, u64)> =
            articles.iter().enumerate().map(|(index, paper)| (index, paper.id)).collect();

        let mut results = stream::iter(ids)
            .map(|(index, id)| async move {
                let cites = self.fetch_all(&expr::references(id)).await;
                (index, id, cites)
            })
            .buffer_unordered(self.options.workers.max(1));

        while let Some((index, id, result)) = results.next().await {
            match result {
                Ok(cites) => {
                    tracing::debug!(paper = id, cites = cites.len(), "Fetched citing papers");
                    articles[index].cites = cites;
                }
                Err(err) => {
                    tracing::warn!(paper = id, error = %err, "Failed to fetch citing papers");
                }
            }
        }

        articles
    }
}

/// Read a batch file of author names, one per line.
///
/// # Errors
///
/// Returns error if the file is not a `.txt` file or cannot be read.
pub fn read_author_list(path: &Path) -> anyhow::Result<Vec<String>> {
    let is_txt = path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("txt"));
    if !is_txt {
        anyhow::bail!("author list must be a .txt file: {}", path.display());
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;

    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}
