//! Rendering of query results: Markdown and text for terminals, compact
//! JSON for scripts.

mod json;
mod markdown;

pub use json::{compact_histogram, compact_interpretation, compact_paper, compact_report};
pub use markdown::{
    format_entities_markdown, format_histogram_chart, format_interpretations_markdown,
    format_paper_markdown, format_papers_markdown, format_report_markdown, format_similarity,
};
