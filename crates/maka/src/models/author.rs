//! Author data model matching the Academic Knowledge entity schema.

use serde::{Deserialize, Serialize};

use super::de;
use super::entity::{AcademicEntity, Attribute};
use super::Affiliation;

/// An author, either a paper's `AA` entry or an author entity.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Author {
    /// Author ID.
    #[serde(rename(deserialize = "AuId"), alias = "Id", alias = "id", default)]
    pub id: u64,

    /// Normalized author name.
    #[serde(rename(deserialize = "AuN"), alias = "name", default)]
    pub name: Option<String>,

    /// Original author name.
    #[serde(rename(deserialize = "DAuN"), alias = "display_name", default)]
    pub display_name: Option<String>,

    /// Total citation count.
    #[serde(rename(deserialize = "CC"), alias = "num_citations", default, deserialize_with = "de::nullable")]
    pub num_citations: u64,

    /// Extended metadata.
    #[serde(rename(deserialize = "E"), alias = "metadata", default, deserialize_with = "de::embedded_json")]
    pub metadata: Option<AuthorMetadata>,

    /// Normalized affiliation name on a paper.
    #[serde(rename(deserialize = "AfN"), alias = "affiliation", default)]
    pub affiliation: Option<String>,

    /// Affiliation ID on a paper.
    #[serde(rename(deserialize = "AfId"), alias = "affiliation_id", default)]
    pub affiliation_id: Option<u64>,

    /// 1-based position in the paper's author list.
    #[serde(rename(deserialize = "S"), alias = "position", default)]
    pub position: Option<u32>,
}

impl AcademicEntity for Author {
    const ATTRIBUTES: &'static [Attribute] = &[
        Attribute::new("id", "AuId", "ID"),
        Attribute::new("name", "AuN", "Normalized Name"),
        Attribute::new("display_name", "DAuN", "Name"),
        Attribute::new("num_citations", "CC", "Citations"),
        Attribute::new("metadata", "E", "Metadata"),
        Attribute::new("affiliation", "AfN", "Affiliation"),
        Attribute::new("affiliation_id", "AfId", "Affiliation ID"),
        Attribute::new("position", "S", "Position"),
    ];
}

impl Author {
    /// Display name, normalized name, or "Unknown".
    #[must_use]
    pub fn name_or_default(&self) -> &str {
        self.display_name.as_deref().or(self.name.as_deref()).unwrap_or("Unknown")
    }

    /// Citation count.
    #[must_use]
    pub const fn citations(&self) -> u64 {
        self.num_citations
    }

    /// Affiliation on the paper, or the last known one.
    #[must_use]
    pub fn affiliation_name(&self) -> Option<&str> {
        self.affiliation
            .as_deref()
            .or_else(|| self.metadata.as_ref()?.affiliation.as_ref()?.name.as_deref())
    }
}

/// Extended author metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AuthorMetadata {
    /// Last known affiliation.
    #[serde(rename(deserialize = "LKA"), alias = "affiliation", default)]
    pub affiliation: Option<Affiliation>,
}

impl AcademicEntity for AuthorMetadata {
    const ATTRIBUTES: &'static [Attribute] = &[Attribute::new("affiliation", "LKA", "Affiliation")];
}
