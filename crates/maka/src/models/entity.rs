//! Entity kinds and the attribute table shared by every model.

use serde::Serialize;
use serde_json::Value;

/// Entity kinds exposed by the Academic Knowledge API.
///
/// The discriminants match the API's `Ty` attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Entity {
    /// A paper.
    Paper = 0,
    /// An author.
    Author = 1,
    /// A journal.
    Journal = 2,
    /// A conference series.
    ConferenceSeries = 3,
    /// A single conference instance.
    ConferenceInstance = 4,
    /// An affiliation (institution).
    Affiliation = 5,
    /// A field of study.
    FieldOfStudy = 6,
}

impl Entity {
    /// All entity kinds, in code order.
    pub const ALL: [Self; 7] = [
        Self::Paper,
        Self::Author,
        Self::Journal,
        Self::ConferenceSeries,
        Self::ConferenceInstance,
        Self::Affiliation,
        Self::FieldOfStudy,
    ];

    /// Numeric code used by the API.
    #[must_use]
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Look up an entity kind by its API code.
    #[must_use]
    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.get(usize::from(code)).copied()
    }

    /// Human-readable name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Paper => "paper",
            Self::Author => "author",
            Self::Journal => "journal",
            Self::ConferenceSeries => "conference series",
            Self::ConferenceInstance => "conference instance",
            Self::Affiliation => "affiliation",
            Self::FieldOfStudy => "field of study",
        }
    }
}

impl std::fmt::Display for Entity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// One attribute of an entity: readable key, API code and display label.
///
/// Position in [`AcademicEntity::ATTRIBUTES`] is the display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Attribute {
    /// Readable key, used when serializing.
    pub key: &'static str,
    /// Short attribute code used by the API.
    pub code: &'static str,
    /// User-facing label.
    pub label: &'static str,
}

impl Attribute {
    /// Create a new attribute descriptor.
    #[must_use]
    pub const fn new(key: &'static str, code: &'static str, label: &'static str) -> Self {
        Self { key, code, label }
    }
}

/// Dictionary-like access shared by all API objects.
pub trait AcademicEntity: Serialize {
    /// Attribute table in display order.
    const ATTRIBUTES: &'static [Attribute];

    /// Find an attribute by readable key, falling back to the API code.
    #[must_use]
    fn attribute(key_or_code: &str) -> Option<&'static Attribute> {
        Self::ATTRIBUTES
            .iter()
            .find(|attr| attr.key == key_or_code)
            .or_else(|| Self::ATTRIBUTES.iter().find(|attr| attr.code == key_or_code))
    }

    /// User-facing label for an attribute.
    #[must_use]
    fn label(key_or_code: &str) -> Option<&'static str> {
        Self::attribute(key_or_code).map(|attr| attr.label)
    }

    /// Get an attribute value by readable key or API code.
    ///
    /// Returns `None` for unknown keys, absent values and entities that
    /// fail to serialize.
    #[must_use]
    fn get(&self, key_or_code: &str) -> Option<Value> {
        let attr = Self::attribute(key_or_code)?;
        match self.as_value().ok()? {
            Value::Object(mut map) => map.remove(attr.key).filter(|value| !value.is_null()),
            _ => None,
        }
    }

    /// Serialize into a JSON value keyed by readable names.
    ///
    /// # Errors
    ///
    /// Returns error if the entity cannot be represented as JSON.
    fn as_value(&self) -> serde_json::Result<Value> {
        serde_json::to_value(self)
    }

    /// Serialize into a JSON string keyed by readable names.
    fn as_json(&self, pretty: bool) -> serde_json::Result<String> {
        if pretty { serde_json::to_string_pretty(self) } else { serde_json::to_string(self) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_codes_round_trip() {
        for entity in Entity::ALL {
            assert_eq!(Entity::from_code(entity.code()), Some(entity));
        }
        assert_eq!(Entity::from_code(7), None);
        assert_eq!(Entity::Paper.code(), 0);
        assert_eq!(Entity::FieldOfStudy.code(), 6);
    }

    #[test]
    fn test_entity_display() {
        assert_eq!(Entity::ConferenceSeries.to_string(), "conference series");
    }

    #[derive(Serialize)]
    struct TupleKeyed {
        counts: std::collections::BTreeMap<(u8, u8), u32>,
    }

    impl AcademicEntity for TupleKeyed {
        const ATTRIBUTES: &'static [Attribute] = &[Attribute::new("counts", "C", "Counts")];
    }

    #[test]
    fn test_as_value_reports_serialization_error() {
        let entity = TupleKeyed { counts: std::collections::BTreeMap::from([((1, 2), 3)]) };

        assert!(entity.as_value().is_err());
        assert_eq!(entity.get("counts"), None);
    }
}
