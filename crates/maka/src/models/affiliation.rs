//! Affiliation data model.

use serde::{Deserialize, Serialize};

use super::de;
use super::entity::{AcademicEntity, Attribute};

/// An institution authors are affiliated with.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Affiliation {
    /// Affiliation ID.
    #[serde(rename(deserialize = "AfId"), alias = "Id", alias = "id", default)]
    pub id: u64,

    /// Normalized name.
    #[serde(rename(deserialize = "AfN"), alias = "name", default)]
    pub name: Option<String>,

    /// Display name.
    #[serde(rename(deserialize = "DAfN"), alias = "display_name", default)]
    pub display_name: Option<String>,

    /// Total citation count.
    #[serde(rename(deserialize = "CC"), alias = "num_citations", default, deserialize_with = "de::nullable")]
    pub num_citations: u64,

    /// Extended metadata.
    #[serde(rename(deserialize = "E"), alias = "metadata", default, deserialize_with = "de::embedded_json")]
    pub metadata: Option<AffiliationMetadata>,
}

impl AcademicEntity for Affiliation {
    const ATTRIBUTES: &'static [Attribute] = &[
        Attribute::new("id", "AfId", "ID"),
        Attribute::new("name", "AfN", "Normalized Name"),
        Attribute::new("display_name", "DAfN", "Name"),
        Attribute::new("num_citations", "CC", "Citations"),
        Attribute::new("metadata", "E", "Metadata"),
    ];
}

/// Extended affiliation metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AffiliationMetadata {
    /// Number of papers published under this affiliation.
    #[serde(rename(deserialize = "PC"), alias = "paper_count", default)]
    pub paper_count: Option<u64>,
}

impl AcademicEntity for AffiliationMetadata {
    const ATTRIBUTES: &'static [Attribute] = &[Attribute::new("paper_count", "PC", "Paper Count")];
}
