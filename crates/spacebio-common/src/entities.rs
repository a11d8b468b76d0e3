//! Publication model.
//!
//! `PublicationIn` is what callers hand us (HTTP body, CSV row, JSON object);
//! `PublicationRecord` is the validated, identified row both stores receive.

use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::error::{Result, SpacebioError};

/// Embedding input used when a publication has neither abstract nor title text.
pub const FALLBACK_EMBEDDING_TEXT: &str = "No abstract";

/// Incoming publication payload.
///
/// `title` is optional at the type level so a missing title is reported as a
/// validation error rather than a deserialization failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PublicationIn {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, rename = "abstract")]
    pub abstract_text: Option<String>,
    #[serde(default)]
    pub doi: Option<String>,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub mission: Option<String>,
    #[serde(default)]
    pub repository: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub organisms: Vec<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub hazards: Vec<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub assays: Vec<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub outcomes: Vec<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub keywords: Vec<String>,
}

fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

impl PublicationIn {
    /// Validate and attach an identity.
    pub fn into_record(self, id: Uuid) -> Result<PublicationRecord> {
        let title = match self.title {
            Some(t) if !t.trim().is_empty() => t,
            _ => return Err(SpacebioError::validation("Title field is required")),
        };

        Ok(PublicationRecord {
            id,
            title,
            abstract_text: self.abstract_text.unwrap_or_default(),
            doi: self.doi,
            year: self.year,
            mission: self.mission,
            repository: self.repository,
            link: self.link,
            summary: self.summary,
            organisms: self.organisms,
            hazards: self.hazards,
            assays: self.assays,
            outcomes: self.outcomes,
            keywords: self.keywords,
            embedding: None,
        })
    }
}

/// A validated publication with its canonical id.
///
/// The same `id` keys the relational row and the graph node.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PublicationRecord {
    pub id: Uuid,
    pub title: String,
    #[serde(rename = "abstract")]
    pub abstract_text: String,
    pub doi: Option<String>,
    pub year: Option<i32>,
    pub mission: Option<String>,
    pub repository: Option<String>,
    pub link: Option<String>,
    pub summary: Option<String>,
    pub organisms: Vec<String>,
    pub hazards: Vec<String>,
    pub assays: Vec<String>,
    pub outcomes: Vec<String>,
    pub keywords: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub embedding: Option<Vec<f32>>,
}

impl PublicationRecord {
    /// Text the embedding is computed from: abstract, then title, then a fixed placeholder.
    pub fn embedding_source(&self) -> &str {
        if !self.abstract_text.trim().is_empty() {
            &self.abstract_text
        } else if !self.title.trim().is_empty() {
            &self.title
        } else {
            FALLBACK_EMBEDDING_TEXT
        }
    }
}

/// Typed edge from a Publication node to a named target node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Relation {
    Studies,
    HasHazard,
    UsedAssay,
}

impl Relation {
    pub const ALL: [Relation; 3] = [Relation::Studies, Relation::HasHazard, Relation::UsedAssay];

    pub fn edge_type(&self) -> &'static str {
        match self {
            Relation::Studies   => "STUDIES",
            Relation::HasHazard => "HAS_HAZARD",
            Relation::UsedAssay => "USED_ASSAY",
        }
    }

    pub fn target_label(&self) -> &'static str {
        match self {
            Relation::Studies   => "Organism",
            Relation::HasHazard => "Hazard",
            Relation::UsedAssay => "Assay",
        }
    }

    /// Name of the publication attribute holding the target names.
    pub fn attribute(&self) -> &'static str {
        match self {
            Relation::Studies   => "organisms",
            Relation::HasHazard => "hazards",
            Relation::UsedAssay => "assays",
        }
    }

    pub fn targets<'a>(&self, record: &'a PublicationRecord) -> &'a [String] {
        match self {
            Relation::Studies   => &record.organisms,
            Relation::HasHazard => &record.hazards,
            Relation::UsedAssay => &record.assays,
        }
    }
}
