//! Markdown and plain-text output.

use serde_json::Value;

use crate::harvest::AuthorReport;
use crate::models::{AcademicEntity, Histogram, Interpretation, Paper};

/// Width of the longest bar in a histogram chart.
const BAR_WIDTH: usize = 40;

/// Format a list of papers as Markdown.
#[must_use]
pub fn format_papers_markdown(papers: &[Paper]) -> String {
    if papers.is_empty() {
        return "No papers found.".to_string();
    }

    let mut output = format!("# Papers ({} results)\n\n", papers.len());

    for (i, paper) in papers.iter().enumerate() {
        output.push_str(&format_paper_markdown(paper, i + 1));
        output.push_str("\n---\n\n");
    }

    output
}

/// Format a single paper as Markdown.
#[must_use]
pub fn format_paper_markdown(paper: &Paper, index: usize) -> String {
    let mut output = String::new();

    // Title
    output.push_str(&format!("## {}. {}\n\n", index, paper.title_or_default()));

    // Authors
    if !paper.authors.is_empty() {
        output.push_str(&format!("**Authors**: {}\n\n", paper.author_names()));
    }

    // Year and citations
    let mut meta = Vec::new();
    if let Some(year) = paper.year {
        meta.push(format!("**Year**: {year}"));
    }
    meta.push(format!("**Citations**: {}", paper.citations()));

    if let Some(venue) = paper.venue() {
        meta.push(format!("**Venue**: {venue}"));
    }

    output.push_str(&format!("{}\n\n", meta.join(" | ")));

    // Fields of study
    if !paper.field_of_study.is_empty() {
        let fields: Vec<&str> = paper.field_of_study.iter().map(|f| f.name_or_default()).collect();
        output.push_str(&format!("**Fields**: {}\n\n", fields.join(", ")));
    }

    // Links
    let mut ids = Vec::new();
    if let Some(doi) = paper.doi() {
        ids.push(format!("[DOI](https://doi.org/{doi})"));
    }
    ids.push(format!("ID: {}", paper.id));
    output.push_str(&format!("**Links**: {}\n\n", ids.join(" | ")));

    // Abstract
    if let Some(text) = paper.abstract_text() {
        output.push_str(&format!("**Abstract**: {text}\n\n"));
    }

    if !paper.cites.is_empty() {
        output.push_str(&format!("**Cited by** {} harvested papers\n", paper.cites.len()));
    }

    output
}

/// Format any entity list as labelled attribute lines.
///
/// Nested lists are shown as item counts.
#[must_use]
pub fn format_entities_markdown<T: AcademicEntity>(kind: &str, entities: &[T]) -> String {
    if entities.is_empty() {
        return format!("No {kind} entities found.");
    }

    let mut output = format!("# {kind} ({} results)\n\n", entities.len());

    for (i, entity) in entities.iter().enumerate() {
        output.push_str(&format!("## {}\n\n", i + 1));
        for attr in T::ATTRIBUTES {
            let text = match entity.get(attr.key) {
                Some(Value::String(s)) => s,
                Some(Value::Array(items)) if items.is_empty() => continue,
                Some(Value::Array(items)) => format!("{} items", items.len()),
                Some(Value::Object(_)) | None => continue,
                Some(other) => other.to_string(),
            };
            output.push_str(&format!("- **{}**: {}\n", attr.label, text));
        }
        output.push('\n');
    }

    output
}

/// Format interpretations as Markdown.
#[must_use]
pub fn format_interpretations_markdown(query: &str, interpretations: &[Interpretation]) -> String {
    if interpretations.is_empty() {
        return format!("No interpretations found for \"{query}\".");
    }

    let mut output = format!("# Interpretations of \"{query}\"\n\n");

    for (i, interpretation) in interpretations.iter().enumerate() {
        output.push_str(&format!("## {}\n\n", i + 1));
        for rule in &interpretation.rules {
            output.push_str(&format!(
                "- `{}` ({}): `{}`\n",
                rule.name.as_deref().unwrap_or("?"),
                rule.kind.as_deref().unwrap_or("?"),
                rule.value.as_deref().unwrap_or("")
            ));
        }
        output.push('\n');
    }

    output
}

/// Render histograms as horizontal text bar charts.
#[must_use]
pub fn format_histogram_chart(histograms: &[Histogram]) -> String {
    if histograms.is_empty() {
        return "No histograms returned.".to_string();
    }

    let mut output = String::new();

    for histogram in histograms {
        output.push_str(&format!(
            "Histogram for {} ({} distinct values, {} total)\n\n",
            histogram.attribute_or_default(),
            histogram.values,
            histogram.count
        ));

        let labels: Vec<String> = histogram.data.iter().map(|bucket| bucket.label()).collect();
        let label_width = labels.iter().map(|l| l.chars().count()).max().unwrap_or(0);
        let max = histogram.max_count();

        for (label, bucket) in labels.iter().zip(&histogram.data) {
            output.push_str(&format!(
                "{label:>label_width$} | {} {}\n",
                "#".repeat(bar_length(bucket.count, max)),
                bucket.count
            ));
        }
        output.push('\n');
    }

    output
}

/// Bar length scaled to [`BAR_WIDTH`]; non-zero counts get at least one mark.
fn bar_length(count: u64, max: u64) -> usize {
    if count == 0 || max == 0 {
        return 0;
    }
    let scaled = (count as f64 / max as f64 * BAR_WIDTH as f64).round() as usize;
    scaled.clamp(1, BAR_WIDTH)
}

/// One-line similarity result.
#[must_use]
pub fn format_similarity(s1: &str, s2: &str, score: f64) -> String {
    format!("Similarity between \"{s1}\" and \"{s2}\" is {score}")
}

/// Summary of a harvest as Markdown.
#[must_use]
pub fn format_report_markdown(report: &AuthorReport) -> String {
    let mut output = format!("# {}\n\n", report.author);

    if !report.aliases.is_empty() {
        output.push_str(&format!("**Matched as**: {}\n\n", report.aliases.join(", ")));
    }

    output.push_str(&format!(
        "**Papers**: {} | **Citing papers harvested**: {}\n\n",
        report.articles.len(),
        report.total_citing()
    ));

    for (i, paper) in report.articles.iter().enumerate() {
        output.push_str(&format!(
            "{}. {} ({}) - {} citations, {} harvested\n",
            i + 1,
            paper.title_or_default(),
            paper.year.map_or_else(|| "n.d.".to_string(), |y| y.to_string()),
            paper.citations(),
            paper.cites.len()
        ));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bar_length() {
        assert_eq!(bar_length(0, 10), 0);
        assert_eq!(bar_length(10, 10), BAR_WIDTH);
        assert_eq!(bar_length(5, 10), BAR_WIDTH / 2);
        assert_eq!(bar_length(1, 1000), 1);
    }

    #[test]
    fn test_format_entities_uses_labels() {
        use crate::models::FieldOfStudy;

        let field = FieldOfStudy {
            id: 7,
            name: Some("physics".to_string()),
            num_citations: 12,
            ..Default::default()
        };
        let output = format_entities_markdown("field of study", &[field]);

        assert!(output.contains("# field of study (1 results)"));
        assert!(output.contains("- **ID**: 7"));
        assert!(output.contains("physics"));
        assert!(!output.contains("items"));
    }

    #[test]
    fn test_format_similarity() {
        assert_eq!(
            format_similarity("a", "b", 0.5),
            "Similarity between \"a\" and \"b\" is 0.5"
        );
    }
}
