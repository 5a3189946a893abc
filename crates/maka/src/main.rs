//! maka - Microsoft Academic Knowledge API command-line tool
//!
//! Harvests author publications and runs single API queries.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::de::DeserializeOwned;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use maka::{
    AcademicClient,
    config::{Config, api},
    formatters,
    harvest::{AuthorHarvester, AuthorReport, HarvestOptions, read_author_list},
    models::{
        AcademicEntity, Affiliation, Author, ConferenceInstance, ConferenceSeries, Entity,
        FieldOfStudy, Journal, Paper, ResponseFormat,
    },
    query::{CalcHistogramQuery, EvaluateQuery, InterpretQuery, SimilarityQuery},
};

/// Legacy numeric log level variable (1=error .. 4=debug).
const LEGACY_LOG_LEVEL_ENV: &str = "LOG_LEVEL";

#[derive(Parser, Debug)]
#[command(name = "maka")]
#[command(about = "Query the Microsoft Academic Knowledge API")]
#[command(version)]
struct Cli {
    /// Academic Knowledge API subscription key
    #[arg(long, global = true, env = "MAKA_SUBSCRIPTION_KEY", hide_env_values = true)]
    subscription_key: Option<String>,

    /// API base URL
    #[arg(long, global = true, env = "MAKA_BASE_URL")]
    base_url: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Output logs as JSON
    #[arg(long, global = true)]
    json_logs: bool,

    /// Output format for results
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Markdown)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Harvest one author's papers and the papers citing them
    Author {
        /// Author name, e.g. "albert einstein"
        #[arg(long)]
        author: String,

        #[command(flatten)]
        harvest: HarvestArgs,
    },

    /// Harvest every author listed in a .txt file, one per line
    Authors {
        /// File with one author name per line
        file: PathBuf,

        #[command(flatten)]
        harvest: HarvestArgs,
    },

    /// Compute attribute histograms for an expression
    Histogram {
        /// Query expression
        #[arg(long)]
        expr: String,

        /// Attributes to histogram
        #[arg(long, default_value = "Id")]
        attributes: String,

        /// Number of entities to consider
        #[arg(long, default_value_t = api::MAX_PAGE_RESULTS)]
        count: u32,
    },

    /// Similarity between two strings
    Similarity {
        /// First string
        #[arg(long)]
        s1: String,

        /// Second string
        #[arg(long)]
        s2: String,
    },

    /// Interpret a natural-language query
    Interpret {
        /// Natural-language query
        #[arg(long)]
        query: String,

        /// Maximum number of interpretations
        #[arg(long, default_value_t = api::MAX_PAGE_RESULTS)]
        count: u32,

        /// Generate completion suggestions
        #[arg(long)]
        complete: bool,
    },

    /// Fetch entities matching an expression
    Evaluate {
        /// Query expression
        #[arg(long)]
        expr: String,

        /// Attribute codes to return
        #[arg(long, default_value = "Id,Ti,Y,CC,AA.AuN")]
        attributes: String,

        /// Maximum number of entities
        #[arg(long, default_value_t = api::MAX_PAGE_RESULTS)]
        count: u32,

        /// Index of the first entity
        #[arg(long, default_value_t = 0)]
        offset: u32,

        /// Entity kind to parse results as
        #[arg(long, value_enum, default_value_t = EntityArg::Paper)]
        entity: EntityArg,
    },
}

#[derive(clap::Args, Debug)]
struct HarvestArgs {
    /// Citation requests in flight at once
    #[arg(long, default_value_t = api::WORKERS)]
    workers: usize,

    /// Directory the report files are written to
    #[arg(long, default_value = ".")]
    output_dir: PathBuf,

    /// Stop paging after this many pages per expression
    #[arg(long)]
    max_pages: Option<u32>,
}

impl HarvestArgs {
    fn options(&self) -> HarvestOptions {
        HarvestOptions {
            workers: self.workers.max(1),
            max_pages: self.max_pages,
            ..HarvestOptions::default()
        }
    }
}

#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
enum OutputFormat {
    /// Human-readable Markdown and text
    #[default]
    Markdown,
    /// JSON
    Json,
}

impl From<OutputFormat> for ResponseFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Markdown => Self::Markdown,
            OutputFormat::Json => Self::Json,
        }
    }
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum EntityArg {
    Paper,
    Author,
    Journal,
    ConferenceSeries,
    ConferenceInstance,
    Affiliation,
    FieldOfStudy,
}

impl From<EntityArg> for Entity {
    fn from(arg: EntityArg) -> Self {
        match arg {
            EntityArg::Paper => Self::Paper,
            EntityArg::Author => Self::Author,
            EntityArg::Journal => Self::Journal,
            EntityArg::ConferenceSeries => Self::ConferenceSeries,
            EntityArg::ConferenceInstance => Self::ConferenceInstance,
            EntityArg::Affiliation => Self::Affiliation,
            EntityArg::FieldOfStudy => Self::FieldOfStudy,
        }
    }
}

/// Map the legacy numeric level onto a filter directive.
fn legacy_log_level(value: &str) -> Option<&'static str> {
    match value.trim() {
        "1" => Some("error"),
        "2" => Some("warn"),
        "3" => Some("info"),
        "4" => Some("debug"),
        _ => None,
    }
}

fn init_tracing(log_level: Option<&str>, json: bool) {
    let fallback = log_level.map(str::to_string).unwrap_or_else(|| {
        std::env::var(LEGACY_LOG_LEVEL_ENV)
            .ok()
            .and_then(|value| legacy_log_level(&value))
            .unwrap_or("warn")
            .to_string()
    });

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    let subscriber = tracing_subscriber::registry().with(filter);

    if json {
        subscriber.with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr)).init();
    } else {
        subscriber
            .with(tracing_subscriber::fmt::layer().compact().with_writer(std::io::stderr))
            .init();
    }
}

fn build_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = Config::from_env()?;

    if let Some(key) = cli.subscription_key.as_deref().filter(|key| !key.is_empty()) {
        config.subscription_key = Some(key.to_string());
    }
    if let Some(base_url) = cli.base_url.as_deref() {
        config = config.with_base_url(base_url)?;
    }

    Ok(config)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.log_level.as_deref(), cli.json_logs);

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "Starting maka");

    let config = build_config(&cli)?;
    let client = Arc::new(AcademicClient::new(config)?);
    if !client.has_subscription_key() {
        anyhow::bail!("no subscription key: pass --subscription-key or set MAKA_SUBSCRIPTION_KEY");
    }

    let format = ResponseFormat::from(cli.format);

    match cli.command {
        Command::Author { author, harvest } => {
            let harvester = AuthorHarvester::new(Arc::clone(&client), harvest.options());
            let report = harvester
                .run(&author)
                .await
                .with_context(|| format!("failed to harvest {author}"))?;
            let path = report.write_to(&harvest.output_dir)?;
            tracing::info!(author = %author, path = %path.display(), "Wrote report");
            print_report(&report, &path, format)?;
        }
        Command::Authors { file, harvest } => {
            let authors = read_author_list(&file)?;
            tracing::info!(authors = authors.len(), file = %file.display(), "Harvesting author list");

            let harvester = AuthorHarvester::new(Arc::clone(&client), harvest.options());
            let summary = harvester
                .run_batch(&authors, &harvest.output_dir, |report, path| {
                    if let Err(err) = print_report(report, path, format) {
                        tracing::warn!(author = %report.author, error = %err, "Failed to print report");
                    }
                })
                .await;
            if !summary.is_success() {
                anyhow::bail!(
                    "{} of {} authors failed: {}",
                    summary.failed.len(),
                    authors.len(),
                    summary.failed.join(", ")
                );
            }
        }
        Command::Histogram { expr, attributes, count } => {
            let query = CalcHistogramQuery::new(expr).with_attributes(attributes).with_count(count);
            let histograms = client.calc_histogram(&query).await.context("calchistogram failed")?;
            if format.is_json() {
                let values: Vec<_> = histograms.iter().map(formatters::compact_histogram).collect();
                print_json(&values)?;
            } else {
                print!("{}", formatters::format_histogram_chart(&histograms));
            }
        }
        Command::Similarity { s1, s2 } => {
            let query = SimilarityQuery::new(s1.as_str(), s2.as_str());
            let score = client.similarity(&query).await.context("similarity failed")?;
            if format.is_json() {
                print_json(&serde_json::json!({"s1": s1, "s2": s2, "similarity": score}))?;
            } else {
                println!("{}", formatters::format_similarity(&s1, &s2, score));
            }
        }
        Command::Interpret { query, count, complete } => {
            let request =
                InterpretQuery::new(query.as_str()).with_count(count).with_complete(complete);
            let interpretations = client.interpret(&request).await.context("interpret failed")?;
            if format.is_json() {
                let values: Vec<_> =
                    interpretations.iter().map(formatters::compact_interpretation).collect();
                print_json(&values)?;
            } else {
                print!("{}", formatters::format_interpretations_markdown(&query, &interpretations));
            }
        }
        Command::Evaluate { expr, attributes, count, offset, entity } => {
            let query = EvaluateQuery::new(expr)
                .with_attributes(attributes)
                .with_count(count)
                .with_offset(offset);
            match entity {
                EntityArg::Paper => {
                    let papers = client.evaluate(&query).await.context("evaluate failed")?;
                    if format.is_json() {
                        let values: Vec<_> = papers.iter().map(formatters::compact_paper).collect();
                        print_json(&values)?;
                    } else {
                        print!("{}", formatters::format_papers_markdown(&papers));
                    }
                }
                EntityArg::Author => evaluate_as::<Author>(&client, &query, entity, format).await?,
                EntityArg::Journal => {
                    evaluate_as::<Journal>(&client, &query, entity, format).await?;
                }
                EntityArg::ConferenceSeries => {
                    evaluate_as::<ConferenceSeries>(&client, &query, entity, format).await?;
                }
                EntityArg::ConferenceInstance => {
                    evaluate_as::<ConferenceInstance>(&client, &query, entity, format).await?;
                }
                EntityArg::Affiliation => {
                    evaluate_as::<Affiliation>(&client, &query, entity, format).await?;
                }
                EntityArg::FieldOfStudy => {
                    evaluate_as::<FieldOfStudy>(&client, &query, entity, format).await?;
                }
            }
        }
    }

    Ok(())
}

/// Evaluate and print entities of a non-paper kind.
async fn evaluate_as<T>(
    client: &AcademicClient,
    query: &EvaluateQuery,
    entity: EntityArg,
    format: ResponseFormat,
) -> anyhow::Result<()>
where
    T: AcademicEntity + DeserializeOwned,
{
    let kind = Entity::from(entity);
    let entities: Vec<T> = client
        .evaluate_entities(query)
        .await
        .with_context(|| format!("evaluate failed for {kind} entities"))?;

    if format.is_json() {
        let values = entities
            .iter()
            .map(AcademicEntity::as_value)
            .collect::<serde_json::Result<Vec<_>>>()?;
        print_json(&values)?;
    } else {
        print!("{}", formatters::format_entities_markdown(kind.name(), &entities));
    }
    Ok(())
}

/// Print the summary of a report already written to `path`.
fn print_report(report: &AuthorReport, path: &Path, format: ResponseFormat) -> anyhow::Result<()> {
    if format.is_json() {
        print_json(&formatters::compact_report(report))?;
    } else {
        print!("{}", formatters::format_report_markdown(report));
        println!("\nWritten to {}", path.display());
    }
    Ok(())
}

fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
