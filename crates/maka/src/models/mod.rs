//! Data models for Academic Knowledge API entities.
//!
//! Models deserialize from the API's short attribute codes and serialize
//! with readable snake_case names. Both spellings are accepted on input,
//! so files written by this crate load back.

pub(crate) mod de;

mod affiliation;
mod author;
mod entity;
mod enums;
mod field_of_study;
mod histogram;
mod interpretation;
mod paper;
mod response;
mod venue;

pub use affiliation::{Affiliation, AffiliationMetadata};
pub use author::{Author, AuthorMetadata};
pub use entity::{AcademicEntity, Attribute, Entity};
pub use enums::ResponseFormat;
pub use field_of_study::FieldOfStudy;
pub use histogram::{Histogram, HistogramValue};
pub use interpretation::{Interpretation, InterpretationRule};
pub use paper::{InvertedAbstract, Paper, PaperMetadata, Source};
pub use response::{EvaluateResponse, HistogramResponse, InterpretResponse};
pub use venue::{ConferenceInstance, ConferenceInstanceMetadata, ConferenceSeries, Journal};
