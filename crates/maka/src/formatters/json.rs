//! Compact JSON output.

use serde_json::{Value, json};

use crate::harvest::AuthorReport;
use crate::models::{Histogram, Interpretation, Paper};

/// Create a compact paper representation for JSON output.
#[must_use]
pub fn compact_paper(paper: &Paper) -> Value {
    let mut obj = json!({
        "id": paper.id,
        "title": paper.title_or_default(),
        "year": paper.year,
        "citations": paper.citations(),
    });

    // Add authors as names only
    if !paper.authors.is_empty() {
        obj["authors"] =
            json!(paper.authors.iter().map(|a| a.name_or_default()).collect::<Vec<_>>());
    }

    // Add optional fields only if present
    if let Some(venue) = paper.venue() {
        obj["venue"] = json!(venue);
    }

    if let Some(doi) = paper.doi() {
        obj["doi"] = json!(doi);
    }

    if !paper.field_of_study.is_empty() {
        obj["fields"] = json!(
            paper.field_of_study.iter().map(|f| f.name_or_default()).collect::<Vec<_>>()
        );
    }

    if !paper.cites.is_empty() {
        obj["citedBy"] = json!(paper.cites.len());
    }

    obj
}

/// Compact interpretation: the parse and each rule's value.
#[must_use]
pub fn compact_interpretation(interpretation: &Interpretation) -> Value {
    json!({
        "parse": interpretation.parse,
        "rules": interpretation
            .rules
            .iter()
            .map(|rule| json!({"name": rule.name, "value": rule.value}))
            .collect::<Vec<_>>(),
    })
}

/// Compact histogram: attribute, totals and (value, count) pairs.
#[must_use]
pub fn compact_histogram(histogram: &Histogram) -> Value {
    json!({
        "attribute": histogram.attribute_or_default(),
        "distinctValues": histogram.values,
        "totalCount": histogram.count,
        "buckets": histogram
            .data
            .iter()
            .map(|bucket| json!({"value": bucket.value, "count": bucket.count}))
            .collect::<Vec<_>>(),
    })
}

/// Compact harvest summary.
#[must_use]
pub fn compact_report(report: &AuthorReport) -> Value {
    json!({
        "author": report.author,
        "aliases": report.aliases,
        "papers": report.articles.len(),
        "citingPapers": report.total_citing(),
        "articles": report.articles.iter().map(compact_paper).collect::<Vec<_>>(),
    })
}
