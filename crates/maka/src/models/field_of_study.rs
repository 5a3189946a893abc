//! Field of study data model.

use serde::{Deserialize, Serialize};

use super::de;
use super::entity::{AcademicEntity, Attribute};

/// A node in the field-of-study hierarchy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldOfStudy {
    /// Field ID.
    #[serde(rename(deserialize = "FId"), alias = "Id", alias = "id", default)]
    pub id: u64,

    /// Normalized name.
    #[serde(rename(deserialize = "FN"), alias = "name", default)]
    pub name: Option<String>,

    /// Display name.
    #[serde(rename(deserialize = "DFN"), alias = "display_name", default)]
    pub display_name: Option<String>,

    /// Total citation count.
    #[serde(rename(deserialize = "CC"), alias = "num_citations", default, deserialize_with = "de::nullable")]
    pub num_citations: u64,

    /// Level in the hierarchy (0 is the top).
    #[serde(rename(deserialize = "FL"), alias = "hierarchy_level", default)]
    pub hierarchy_level: Option<u32>,

    /// Parent fields.
    #[serde(rename(deserialize = "FP"), alias = "parent", default, deserialize_with = "de::nullable")]
    pub parent: Vec<FieldOfStudy>,

    /// Child fields.
    #[serde(rename(deserialize = "FC"), alias = "children", default, deserialize_with = "de::nullable")]
    pub children: Vec<FieldOfStudy>,
}

impl AcademicEntity for FieldOfStudy {
    const ATTRIBUTES: &'static [Attribute] = &[
        Attribute::new("id", "FId", "ID"),
        Attribute::new("name", "FN", "Normalized Name"),
        Attribute::new("display_name", "DFN", "Name"),
        Attribute::new("num_citations", "CC", "Citations"),
        Attribute::new("hierarchy_level", "FL", "Level in hierarchy"),
        Attribute::new("parent", "FP", "Parent"),
        Attribute::new("children", "FC", "Children"),
    ];
}

impl FieldOfStudy {
    /// Display name, normalized name, or "Unknown".
    #[must_use]
    pub fn name_or_default(&self) -> &str {
        self.display_name.as_deref().or(self.name.as_deref()).unwrap_or("Unknown")
    }
}
