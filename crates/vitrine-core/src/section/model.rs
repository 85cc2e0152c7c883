//! Section domain model.
//!
//! This module contains the `Section` entity and its typed content
//! variants, plus the wire-level types exchanged with the persistence
//! gateway (`StoredSection`, `SectionPatch`, `SectionDraft`,
//! `SectionOrder`).
//!
//! Content arriving from the gateway is plain JSON; it only becomes a
//! typed [`SectionContent`] after passing through the section schema
//! (see [`super::schema`]), which knows per section id how card payloads
//! are shaped.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use strum_macros::Display;

/// The structural kind governing how a section's content must be shaped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SectionType {
    /// A single rich-text (HTML) string
    Text,
    /// An ordered sequence of plain strings
    List,
    /// An ordered collection of typed card records
    Cards,
}

/// One named, orderable, visibility-toggleable block of portfolio content.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Section {
    /// Stable slug, unique within the sections collection; the merge key
    pub id: String,
    /// Display title
    pub title: String,
    /// Structural kind of `content`
    #[serde(rename = "type")]
    pub kind: SectionType,
    /// Sort position; ties keep insertion order
    pub order: i64,
    /// Whether the public renderer shows this section
    pub visible: bool,
    /// Typed content, shape matching `kind`
    pub content: SectionContent,
}

/// Typed section content. Serializes as the bare shape (no tag); the
/// declared section type is the tag, carried by the section itself.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SectionContent {
    Text(String),
    List(Vec<String>),
    Cards(CardsContent),
}

/// Card collection layout.
///
/// Most cards sections are flat lists; the theses section maps domain
/// names to lists. Which variant applies is declared per section id by the
/// schema, never inferred from the JSON shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CardsContent {
    Flat(Vec<CardRecord>),
    Grouped(BTreeMap<String, Vec<CardRecord>>),
}

impl CardsContent {
    /// Iterates all card records regardless of layout.
    pub fn records(&self) -> Box<dyn Iterator<Item = &CardRecord> + '_> {
        match self {
            CardsContent::Flat(records) => Box::new(records.iter()),
            CardsContent::Grouped(groups) => Box::new(groups.values().flatten()),
        }
    }
}

/// One structured entry within a cards section.
///
/// The recognized shapes form a closed set, one per recognized section id;
/// `Custom` covers cards sections created through the admin panel that the
/// schema has no dedicated shape for.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CardRecord {
    Course(CourseCard),
    Publication(PublicationCard),
    Thesis(ThesisCard),
    Project(ProjectCard),
    Responsibility(ResponsibilityCard),
    Competence(CompetenceCard),
    Custom(CustomCard),
}

impl CardRecord {
    /// Stable id, unique within the owning section.
    pub fn id(&self) -> &str {
        match self {
            CardRecord::Course(c) => &c.id,
            CardRecord::Publication(c) => &c.id,
            CardRecord::Thesis(c) => &c.id,
            CardRecord::Project(c) => &c.id,
            CardRecord::Responsibility(c) => &c.id,
            CardRecord::Competence(c) => &c.id,
            CardRecord::Custom(c) => &c.id,
        }
    }

    /// Color gradient tag used for display.
    pub fn color(&self) -> &str {
        match self {
            CardRecord::Course(c) => &c.color,
            CardRecord::Publication(c) => &c.color,
            CardRecord::Thesis(c) => &c.color,
            CardRecord::Project(c) => &c.color,
            CardRecord::Responsibility(c) => &c.color,
            CardRecord::Competence(c) => &c.color,
            CardRecord::Custom(c) => &c.color,
        }
    }

    /// Symbolic icon name, if the card stores one.
    pub fn icon(&self) -> Option<&str> {
        match self {
            CardRecord::Course(c) => c.icon.as_deref(),
            CardRecord::Publication(c) => c.icon.as_deref(),
            CardRecord::Thesis(_) => None,
            CardRecord::Project(c) => c.icon.as_deref(),
            CardRecord::Responsibility(c) => c.icon.as_deref(),
            CardRecord::Competence(c) => c.icon.as_deref(),
            CardRecord::Custom(c) => c.icon.as_deref(),
        }
    }
}

/// A taught course.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseCard {
    pub id: String,
    #[serde(default)]
    pub title: String,
    /// Course code, e.g. "CE-402"
    #[serde(default)]
    pub code: String,
    /// Degree level, e.g. "MSc"
    #[serde(default)]
    pub level: String,
    #[serde(default)]
    pub semester: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default)]
    pub color: String,
}

/// A published work.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublicationCard {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub authors: Vec<String>,
    /// Journal or conference name
    #[serde(default)]
    pub venue: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doi: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default)]
    pub color: String,
}

/// A supervised thesis. Theses are grouped by research domain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThesisCard {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub student: String,
    /// Degree the thesis was written for, e.g. "MSc"
    #[serde(default)]
    pub degree: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(default)]
    pub color: String,
}

/// A research project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectCard {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Funding line, e.g. the grant programme
    #[serde(default)]
    pub funding: String,
    #[serde(default)]
    pub period: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default)]
    pub color: String,
}

/// An institutional responsibility.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponsibilityCard {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub organization: String,
    #[serde(default)]
    pub period: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default)]
    pub color: String,
}

/// A competence area with its list of skills.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompetenceCard {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub items: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default)]
    pub color: String,
}

/// A card in an admin-created cards section with no dedicated shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomCard {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default)]
    pub color: String,
}

// ============================================================================
// Wire types
// ============================================================================

/// Partial section overlay.
///
/// Doubles as the per-section gateway fetch shape and the update payload:
/// only present fields participate in a merge. `content` stays raw JSON
/// until validated by the schema against the effective section type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SectionPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<SectionType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visible: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<serde_json::Value>,
}

impl SectionPatch {
    /// Overlays another patch onto this one, the other side winning per field.
    pub fn overlay(&mut self, other: &SectionPatch) {
        if other.title.is_some() {
            self.title = other.title.clone();
        }
        if other.kind.is_some() {
            self.kind = other.kind;
        }
        if other.order.is_some() {
            self.order = other.order;
        }
        if other.visible.is_some() {
            self.visible = other.visible;
        }
        if other.content.is_some() {
            self.content = other.content.clone();
        }
    }
}

/// A section as persisted by the gateway: an id plus whatever fields the
/// store has a record of.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredSection {
    pub id: String,
    #[serde(flatten)]
    pub patch: SectionPatch,
}

/// Payload for creating a section; the gateway generates the id and the
/// caller computes the order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionDraft {
    pub title: String,
    #[serde(rename = "type")]
    pub kind: SectionType,
    #[serde(default)]
    pub content: serde_json::Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visible: Option<bool>,
}

/// One entry of the atomic reorder batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionOrder {
    pub id: String,
    pub order: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_section_type_wire_names() {
        assert_eq!(serde_json::to_value(SectionType::Text).unwrap(), json!("text"));
        assert_eq!(serde_json::to_value(SectionType::Cards).unwrap(), json!("cards"));
        let parsed: SectionType = serde_json::from_value(json!("list")).unwrap();
        assert_eq!(parsed, SectionType::List);
    }

    #[test]
    fn test_section_serializes_type_field() {
        let section = Section {
            id: "about".to_string(),
            title: "About".to_string(),
            kind: SectionType::Text,
            order: 1,
            visible: true,
            content: SectionContent::Text("<p>Hi</p>".to_string()),
        };
        let value = serde_json::to_value(&section).unwrap();
        assert_eq!(value["type"], json!("text"));
        assert_eq!(value["content"], json!("<p>Hi</p>"));
    }

    #[test]
    fn test_stored_section_flattens_patch() {
        let value = json!({
            "id": "about",
            "title": "About me",
            "type": "text",
            "content": "<p>Hello</p>"
        });
        let stored: StoredSection = serde_json::from_value(value).unwrap();
        assert_eq!(stored.id, "about");
        assert_eq!(stored.patch.title.as_deref(), Some("About me"));
        assert_eq!(stored.patch.kind, Some(SectionType::Text));
        assert!(stored.patch.order.is_none());
    }

    #[test]
    fn test_patch_overlay() {
        let mut stored = SectionPatch {
            title: Some("Courses".to_string()),
            visible: Some(true),
            ..Default::default()
        };
        stored.overlay(&SectionPatch {
            visible: Some(false),
            order: Some(3),
            ..Default::default()
        });
        assert_eq!(stored.title.as_deref(), Some("Courses"));
        assert_eq!(stored.visible, Some(false));
        assert_eq!(stored.order, Some(3));
    }

    #[test]
    fn test_cards_content_records_iterates_groups() {
        let mut groups = BTreeMap::new();
        groups.insert(
            "Hydraulics".to_string(),
            vec![CardRecord::Thesis(ThesisCard {
                id: "t1".to_string(),
                title: "Flow modelling".to_string(),
                student: "M. Rossi".to_string(),
                degree: "MSc".to_string(),
                year: Some(2023),
                color: "sky".to_string(),
            })],
        );
        let content = CardsContent::Grouped(groups);
        let ids: Vec<&str> = content.records().map(|r| r.id()).collect();
        assert_eq!(ids, vec!["t1"]);
    }
}
