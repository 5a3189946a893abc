//! Journal and conference data models.

use serde::{Deserialize, Serialize};

use super::de;
use super::entity::{AcademicEntity, Attribute};
use super::FieldOfStudy;

/// A journal.
///
/// As a paper's `J` attribute the ID arrives as `JId`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Journal {
    /// Journal ID.
    #[serde(rename(deserialize = "Id"), alias = "JId", alias = "id", default)]
    pub id: u64,

    /// Normalized name.
    #[serde(rename(deserialize = "JN"), alias = "name", default)]
    pub name: Option<String>,

    /// Display name.
    #[serde(rename(deserialize = "DJN"), alias = "display_name", default)]
    pub display_name: Option<String>,

    /// Total citation count.
    #[serde(rename(deserialize = "CC"), alias = "num_citations", default, deserialize_with = "de::nullable")]
    pub num_citations: u64,
}

impl AcademicEntity for Journal {
    const ATTRIBUTES: &'static [Attribute] = &[
        Attribute::new("id", "Id", "ID"),
        Attribute::new("name", "JN", "Normalized Name"),
        Attribute::new("display_name", "DJN", "Name"),
        Attribute::new("num_citations", "CC", "Citations"),
    ];
}

/// A conference series.
///
/// As a paper's `C` attribute the ID arrives as `CId`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConferenceSeries {
    /// Series ID.
    #[serde(rename(deserialize = "Id"), alias = "CId", alias = "id", default)]
    pub id: u64,

    /// Normalized name.
    #[serde(rename(deserialize = "CN"), alias = "name", default)]
    pub name: Option<String>,

    /// Display name.
    #[serde(rename(deserialize = "DCN"), alias = "display_name", default)]
    pub display_name: Option<String>,

    /// Total citation count.
    #[serde(rename(deserialize = "CC"), alias = "num_citations", default, deserialize_with = "de::nullable")]
    pub num_citations: u64,

    /// Fields of study.
    #[serde(rename(deserialize = "F"), alias = "field_of_study", default, deserialize_with = "de::nullable")]
    pub field_of_study: Vec<FieldOfStudy>,
}

impl AcademicEntity for ConferenceSeries {
    const ATTRIBUTES: &'static [Attribute] = &[
        Attribute::new("id", "Id", "ID"),
        Attribute::new("name", "CN", "Normalized Name"),
        Attribute::new("display_name", "DCN", "Name"),
        Attribute::new("num_citations", "CC", "Citations"),
        Attribute::new("field_of_study", "F", "Field of Study"),
    ];
}

/// A single edition of a conference.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConferenceInstance {
    /// Instance ID.
    #[serde(rename(deserialize = "Id"), alias = "CIId", alias = "id", default)]
    pub id: u64,

    /// Normalized name.
    #[serde(rename(deserialize = "CIN"), alias = "name", default)]
    pub name: Option<String>,

    /// Display name.
    #[serde(rename(deserialize = "DCN"), alias = "display_name", default)]
    pub display_name: Option<String>,

    /// Location.
    #[serde(rename(deserialize = "CIL"), alias = "location", default)]
    pub location: Option<String>,

    /// Start date.
    #[serde(rename(deserialize = "CISD"), alias = "start_date", default)]
    pub start_date: Option<String>,

    /// End date.
    #[serde(rename(deserialize = "CIED"), alias = "end_date", default)]
    pub end_date: Option<String>,

    /// Parent conference series.
    #[serde(rename(deserialize = "PCS"), alias = "conference_series", default)]
    pub conference_series: Option<ConferenceSeries>,

    /// Total citation count.
    #[serde(rename(deserialize = "CC"), alias = "num_citations", default, deserialize_with = "de::nullable")]
    pub num_citations: u64,

    /// Extended metadata.
    #[serde(rename(deserialize = "E"), alias = "metadata", default, deserialize_with = "de::embedded_json")]
    pub metadata: Option<ConferenceInstanceMetadata>,
}

impl AcademicEntity for ConferenceInstance {
    const ATTRIBUTES: &'static [Attribute] = &[
        Attribute::new("id", "Id", "ID"),
        Attribute::new("name", "CIN", "Normalized Name"),
        Attribute::new("display_name", "DCN", "Name"),
        Attribute::new("location", "CIL", "Location"),
        Attribute::new("start_date", "CISD", "Start Date"),
        Attribute::new("end_date", "CIED", "End Date"),
        Attribute::new("conference_series", "PCS", "Conference Series"),
        Attribute::new("num_citations", "CC", "Citations"),
        Attribute::new("metadata", "E", "Metadata"),
    ];
}

/// Extended conference instance metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConferenceInstanceMetadata {
    /// Full conference name.
    #[serde(rename(deserialize = "FN"), alias = "full_name", default)]
    pub full_name: Option<String>,
}

impl AcademicEntity for ConferenceInstanceMetadata {
    const ATTRIBUTES: &'static [Attribute] = &[Attribute::new("full_name", "FN", "Full Name")];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_journal_accepts_paper_style_id() {
        let journal: Journal = serde_json::from_str(r#"{"JId": 137773608, "JN": "nature"}"#).unwrap();
        assert_eq!(journal.id, 137_773_608);
        assert_eq!(journal.name.as_deref(), Some("nature"));
    }

    #[test]
    fn test_conference_instance_with_series() {
        let json = r#"{
            "Id": 5, "CIN": "icse 2017", "CIL": "Buenos Aires",
            "PCS": {"CId": 1174403976, "CN": "icse"},
            "E": {"FN": "International Conference on Software Engineering"}
        }"#;
        let instance: ConferenceInstance = serde_json::from_str(json).unwrap();

        assert_eq!(instance.location.as_deref(), Some("Buenos Aires"));
        assert_eq!(instance.conference_series.as_ref().map(|s| s.id), Some(1_174_403_976));
        assert_eq!(
            instance.metadata.and_then(|m| m.full_name).as_deref(),
            Some("International Conference on Software Engineering")
        );
    }
}
