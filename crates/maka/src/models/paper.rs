//! Paper data model matching the Academic Knowledge entity schema.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::de;
use super::entity::{AcademicEntity, Attribute};
use super::{Author, ConferenceSeries, FieldOfStudy, Journal};

/// A paper returned by the evaluate endpoint.
///
/// Deserializes from the API's attribute codes (`Ti`, `AA`, `CC`, ...) and
/// serializes with readable names.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Paper {
    /// Paper ID.
    #[serde(rename(deserialize = "Id"), alias = "id", default)]
    pub id: u64,

    /// Normalized paper title.
    #[serde(rename(deserialize = "Ti"), alias = "title", default)]
    pub title: Option<String>,

    /// Authors, in publication order.
    #[serde(rename(deserialize = "AA"), alias = "authors", default, deserialize_with = "de::nullable")]
    pub authors: Vec<Author>,

    /// Publication year.
    #[serde(rename(deserialize = "Y"), alias = "year", default)]
    pub year: Option<i32>,

    /// Publication date (YYYY-MM-DD).
    #[serde(rename(deserialize = "D"), alias = "date", default)]
    pub date: Option<String>,

    /// Citation count.
    #[serde(rename(deserialize = "CC"), alias = "num_citations", default, deserialize_with = "de::nullable")]
    pub num_citations: u64,

    /// Papers citing this one, filled in while harvesting.
    #[serde(rename(deserialize = "Ci"), alias = "cites", default, deserialize_with = "de::nullable")]
    pub cites: Vec<Paper>,

    /// Fields of study.
    #[serde(rename(deserialize = "F"), alias = "field_of_study", default, deserialize_with = "de::nullable")]
    pub field_of_study: Vec<FieldOfStudy>,

    /// Journal the paper appeared in.
    #[serde(rename(deserialize = "J"), alias = "journal", default)]
    pub journal: Option<Journal>,

    /// Conference series the paper appeared in.
    #[serde(rename(deserialize = "C"), alias = "conference", default)]
    pub conference: Option<ConferenceSeries>,

    /// IDs of referenced papers.
    #[serde(rename(deserialize = "RId"), alias = "references", default, deserialize_with = "de::nullable")]
    pub references: Vec<u64>,

    /// Words from the title and abstract.
    #[serde(rename(deserialize = "W"), alias = "excerpt", default, deserialize_with = "de::nullable")]
    pub excerpt: Vec<String>,

    /// Extended metadata.
    #[serde(rename(deserialize = "E"), alias = "metadata", default, deserialize_with = "de::embedded_json")]
    pub metadata: Option<PaperMetadata>,

    /// Digital Object Identifier.
    #[serde(rename(deserialize = "DOI"), alias = "doi", default)]
    pub doi: Option<String>,

    /// Original (display) title.
    #[serde(rename(deserialize = "DN"), alias = "display_name", default)]
    pub display_name: Option<String>,
}

impl AcademicEntity for Paper {
    const ATTRIBUTES: &'static [Attribute] = &[
        Attribute::new("id", "Id", "ID"),
        Attribute::new("title", "Ti", "Title"),
        Attribute::new("authors", "AA", "Authors"),
        Attribute::new("year", "Y", "Year"),
        Attribute::new("date", "D", "Date"),
        Attribute::new("num_citations", "CC", "Nbr of Cites"),
        Attribute::new("cites", "Ci", "Cites"),
        Attribute::new("field_of_study", "F", "Field of Study"),
        Attribute::new("journal", "J", "Journal"),
        Attribute::new("conference", "C", "Conference"),
        Attribute::new("references", "RId", "References"),
        Attribute::new("excerpt", "W", "Excerpt"),
        Attribute::new("metadata", "E", "Metadata"),
        Attribute::new("doi", "DOI", "DOI"),
        Attribute::new("display_name", "DN", "Display Name"),
    ];
}

impl Paper {
    /// Best available title: display name (top level or from `E`), then the
    /// normalized title, then "Untitled".
    #[must_use]
    pub fn title_or_default(&self) -> &str {
        self.display_name
            .as_deref()
            .or_else(|| self.metadata.as_ref()?.name.as_deref())
            .or(self.title.as_deref())
            .unwrap_or("Untitled")
    }

    /// DOI from the paper or its extended metadata.
    #[must_use]
    pub fn doi(&self) -> Option<&str> {
        self.doi.as_deref().or_else(|| self.metadata.as_ref()?.doi.as_deref())
    }

    /// Citation count.
    #[must_use]
    pub const fn citations(&self) -> u64 {
        self.num_citations
    }

    /// Get the first author's name if available.
    #[must_use]
    pub fn first_author(&self) -> Option<&str> {
        self.authors.first().map(Author::name_or_default)
    }

    /// Get author names as a comma-separated string.
    #[must_use]
    pub fn author_names(&self) -> String {
        self.authors.iter().map(Author::name_or_default).collect::<Vec<_>>().join(", ")
    }

    /// Venue name from the journal, conference, or extended metadata.
    #[must_use]
    pub fn venue(&self) -> Option<&str> {
        self.journal
            .as_ref()
            .and_then(|j| j.name.as_deref())
            .or_else(|| self.conference.as_ref()?.name.as_deref())
            .or_else(|| self.metadata.as_ref()?.venue.as_deref())
    }

    /// Reconstructed abstract, if the inverted abstract was requested.
    #[must_use]
    pub fn abstract_text(&self) -> Option<String> {
        self.metadata.as_ref()?.inverted_abstract.as_ref().map(InvertedAbstract::to_text)
    }
}

/// Extended paper metadata (the `E` attribute).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PaperMetadata {
    /// Display name of the paper.
    #[serde(rename(deserialize = "DN"), alias = "name", default)]
    pub name: Option<String>,

    /// Sources (URLs) for the paper.
    #[serde(rename(deserialize = "S"), alias = "sources", default, deserialize_with = "de::nullable")]
    pub sources: Vec<Source>,

    /// Full venue name.
    #[serde(rename(deserialize = "VFN"), alias = "venue", default)]
    pub venue: Option<String>,

    /// Journal volume.
    #[serde(rename(deserialize = "V"), alias = "volume", default, deserialize_with = "de::string_or_number")]
    pub volume: Option<String>,

    /// Journal issue.
    #[serde(rename(deserialize = "I"), alias = "issue", default, deserialize_with = "de::string_or_number")]
    pub issue: Option<String>,

    /// First page.
    #[serde(rename(deserialize = "FP"), alias = "first_page", default, deserialize_with = "de::string_or_number")]
    pub first_page: Option<String>,

    /// Last page.
    #[serde(rename(deserialize = "LP"), alias = "last_page", default, deserialize_with = "de::string_or_number")]
    pub last_page: Option<String>,

    /// Digital Object Identifier.
    #[serde(rename(deserialize = "DOI"), alias = "doi", default)]
    pub doi: Option<String>,

    /// Citation contexts, keyed by the cited paper ID.
    #[serde(rename(deserialize = "CC"), alias = "citation_contexts", default, deserialize_with = "de::nullable")]
    pub citation_contexts: BTreeMap<String, Vec<String>>,

    /// Abstract as an inverted index.
    #[serde(rename(deserialize = "IA"), alias = "inverted_abstract", default)]
    pub inverted_abstract: Option<InvertedAbstract>,
}

impl AcademicEntity for PaperMetadata {
    const ATTRIBUTES: &'static [Attribute] = &[
        Attribute::new("name", "DN", "Display Name"),
        Attribute::new("sources", "S", "Sources"),
        Attribute::new("venue", "VFN", "Venue"),
        Attribute::new("volume", "V", "Volume"),
        Attribute::new("issue", "I", "Issue"),
        Attribute::new("first_page", "FP", "First Page"),
        Attribute::new("last_page", "LP", "Last Page"),
        Attribute::new("doi", "DOI", "Digital Object Id"),
        Attribute::new("citation_contexts", "CC", "Citation Contexts"),
        Attribute::new("inverted_abstract", "IA", "Inverted Abstract"),
    ];
}

/// A web source for a paper.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    /// Source type (1 = HTML, 2 = text, 3 = PDF, ...).
    #[serde(rename(serialize = "type", deserialize = "Ty"), alias = "type", default)]
    pub kind: Option<u32>,

    /// Source URL.
    #[serde(rename(deserialize = "U"), alias = "url", default)]
    pub url: Option<String>,
}

/// Abstract stored as word -> positions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvertedAbstract {
    /// Number of words in the abstract.
    #[serde(rename(deserialize = "IndexLength"), alias = "index_length", default)]
    pub index_length: usize,

    /// Positions of each word.
    #[serde(rename(deserialize = "InvertedIndex"), alias = "inverted_index", default, deserialize_with = "de::nullable")]
    pub inverted_index: BTreeMap<String, Vec<usize>>,
}

impl InvertedAbstract {
    /// Rebuild the abstract text.
    ///
    /// Words are ordered by position; gaps are skipped and a position taken
    /// twice keeps one word. `index_length` is not trusted.
    #[must_use]
    pub fn to_text(&self) -> String {
        let mut words: Vec<(usize, &str)> = self
            .inverted_index
            .iter()
            .flat_map(|(word, positions)| positions.iter().map(move |&pos| (pos, word.as_str())))
            .collect();

        words.sort_unstable();
        words.dedup_by_key(|(pos, _)| *pos);

        words.into_iter().map(|(_, word)| word).collect::<Vec<_>>().join(" ")
    }
}
