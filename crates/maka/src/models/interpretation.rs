//! Interpretations of natural-language queries.

use serde::{Deserialize, Serialize};

use super::de;
use super::entity::{AcademicEntity, Attribute};

/// One reading of an interpret query.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Interpretation {
    /// Parse tree of the query, as XML.
    #[serde(default)]
    pub parse: Option<String>,

    /// Rules matched by this interpretation.
    #[serde(default, deserialize_with = "de::nullable")]
    pub rules: Vec<InterpretationRule>,
}

impl AcademicEntity for Interpretation {
    const ATTRIBUTES: &'static [Attribute] = &[
        Attribute::new("parse", "parse", "Parsing Explanation"),
        Attribute::new("rules", "rules", "Rules"),
    ];
}

impl Interpretation {
    /// Value of the first rule, usually a query expression.
    #[must_use]
    pub fn first_value(&self) -> Option<&str> {
        self.rules.first()?.value.as_deref()
    }
}

/// A rule of an interpretation, with its output flattened.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawRule")]
pub struct InterpretationRule {
    /// Grammar rule name.
    pub name: Option<String>,

    /// Output type (usually "query").
    #[serde(rename = "type")]
    pub kind: Option<String>,

    /// Output value, e.g. `Composite(AA.AuN=='albert einstein')`.
    pub value: Option<String>,
}

impl AcademicEntity for InterpretationRule {
    const ATTRIBUTES: &'static [Attribute] = &[
        Attribute::new("name", "name", "Name"),
        Attribute::new("type", "type", "Type"),
        Attribute::new("value", "value", "Value"),
    ];
}

/// Wire form of a rule: the API nests type and value under `output`,
/// while files written by this crate keep them at the top level.
#[derive(Deserialize)]
struct RawRule {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    output: Option<RuleOutput>,
    #[serde(default, rename = "type")]
    kind: Option<String>,
    #[serde(default)]
    value: Option<String>,
}

#[derive(Deserialize)]
struct RuleOutput {
    #[serde(default, rename = "type")]
    kind: Option<String>,
    #[serde(default)]
    value: Option<String>,
}

impl From<RawRule> for InterpretationRule {
    fn from(raw: RawRule) -> Self {
        let (kind, value) = match raw.output {
            Some(output) => (output.kind.or(raw.kind), output.value.or(raw.value)),
            None => (raw.kind, raw.value),
        };
        Self { name: raw.name, kind, value }
    }
}
