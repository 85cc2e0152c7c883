//! Section schema: the contract content must satisfy per section type.
//!
//! For `cards` sections the schema also declares, per section id, which
//! card shape the records have and whether the collection is a flat list
//! or grouped by domain. The layout is declared here and never inferred
//! from the JSON shape alone.

use serde_json::Value;

use super::model::{
    CardRecord, CardsContent, CompetenceCard, CourseCard, CustomCard, ProjectCard,
    PublicationCard, ResponsibilityCard, SectionContent, SectionType, ThesisCard,
};
use crate::error::{Result, VitrineError};
use std::collections::BTreeMap;

/// Section id of the taught-courses block.
pub const COURSES_SECTION: &str = "courses";
/// Section id of the publications block.
pub const PUBLICATIONS_SECTION: &str = "publications";
/// Section id of the supervised-theses block (the one grouped cards section).
pub const THESES_SECTION: &str = "theses";
/// Section id of the research-projects block.
pub const PROJECTS_SECTION: &str = "projects";
/// Section id of the institutional-responsibilities block.
pub const RESPONSIBILITIES_SECTION: &str = "responsibilities";
/// Section id of the competences block.
pub const COMPETENCES_SECTION: &str = "competences";

/// The recognized card shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardKind {
    Course,
    Publication,
    Thesis,
    Project,
    Responsibility,
    Competence,
    /// Cards sections unknown to the schema (admin-created)
    Custom,
}

impl CardKind {
    /// Returns the card shape records of the given section carry.
    pub fn for_section(section_id: &str) -> CardKind {
        match section_id {
            COURSES_SECTION => CardKind::Course,
            PUBLICATIONS_SECTION => CardKind::Publication,
            THESES_SECTION => CardKind::Thesis,
            PROJECTS_SECTION => CardKind::Project,
            RESPONSIBILITIES_SECTION => CardKind::Responsibility,
            COMPETENCES_SECTION => CardKind::Competence,
            _ => CardKind::Custom,
        }
    }
}

/// Whether a cards section is a flat list or grouped by domain name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardsLayout {
    Flat,
    Grouped,
}

impl CardsLayout {
    /// Returns the declared layout for the given section id.
    ///
    /// Exactly the theses section is grouped; every other id, including
    /// admin-created ones, is a flat list.
    pub fn for_section(section_id: &str) -> CardsLayout {
        if section_id == THESES_SECTION {
            CardsLayout::Grouped
        } else {
            CardsLayout::Flat
        }
    }
}

/// Checks that `value` structurally conforms to the given section type.
pub fn validate_content(section_id: &str, kind: SectionType, value: &Value) -> Result<()> {
    decode_content(section_id, kind, value).map(|_| ())
}

/// Decodes raw gateway content into typed [`SectionContent`].
///
/// # Errors
///
/// Returns a `Shape` error when the value does not conform to the declared
/// type: non-string text, non-string-array list, a cards payload whose
/// layout or record shape does not match the schema's declaration for
/// `section_id`, or duplicate card ids within the section.
pub fn decode_content(section_id: &str, kind: SectionType, value: &Value) -> Result<SectionContent> {
    match kind {
        SectionType::Text => match value.as_str() {
            Some(text) => Ok(SectionContent::Text(text.to_string())),
            None => Err(VitrineError::shape(format!(
                "section '{section_id}': text content must be a string"
            ))),
        },
        SectionType::List => {
            let items = value.as_array().ok_or_else(|| {
                VitrineError::shape(format!(
                    "section '{section_id}': list content must be an array"
                ))
            })?;
            let mut entries = Vec::with_capacity(items.len());
            for item in items {
                match item.as_str() {
                    Some(entry) => entries.push(entry.to_string()),
                    None => {
                        return Err(VitrineError::shape(format!(
                            "section '{section_id}': list entries must be strings"
                        )));
                    }
                }
            }
            Ok(SectionContent::List(entries))
        }
        SectionType::Cards => decode_cards(section_id, value).map(SectionContent::Cards),
    }
}

/// Returns the empty content of the given type, respecting the cards
/// layout declared for `section_id`.
pub fn empty_content(section_id: &str, kind: SectionType) -> SectionContent {
    match kind {
        SectionType::Text => SectionContent::Text(String::new()),
        SectionType::List => SectionContent::List(Vec::new()),
        SectionType::Cards => match CardsLayout::for_section(section_id) {
            CardsLayout::Flat => SectionContent::Cards(CardsContent::Flat(Vec::new())),
            CardsLayout::Grouped => SectionContent::Cards(CardsContent::Grouped(BTreeMap::new())),
        },
    }
}

fn decode_cards(section_id: &str, value: &Value) -> Result<CardsContent> {
    let card_kind = CardKind::for_section(section_id);
    let content = match CardsLayout::for_section(section_id) {
        CardsLayout::Flat => {
            let items = value.as_array().ok_or_else(|| {
                VitrineError::shape(format!(
                    "section '{section_id}': cards content must be an array"
                ))
            })?;
            let records = decode_card_list(section_id, card_kind, items)?;
            CardsContent::Flat(records)
        }
        CardsLayout::Grouped => {
            let groups = value.as_object().ok_or_else(|| {
                VitrineError::shape(format!(
                    "section '{section_id}': cards content must map domain names to card lists"
                ))
            })?;
            let mut decoded = BTreeMap::new();
            for (domain, cards) in groups {
                let items = cards.as_array().ok_or_else(|| {
                    VitrineError::shape(format!(
                        "section '{section_id}': domain '{domain}' must hold a card list"
                    ))
                })?;
                decoded.insert(domain.clone(), decode_card_list(section_id, card_kind, items)?);
            }
            CardsContent::Grouped(decoded)
        }
    };
    ensure_unique_card_ids(section_id, &content)?;
    Ok(content)
}

fn decode_card_list(
    section_id: &str,
    card_kind: CardKind,
    items: &[Value],
) -> Result<Vec<CardRecord>> {
    items
        .iter()
        .map(|item| decode_card(section_id, card_kind, item))
        .collect()
}

fn decode_card(section_id: &str, card_kind: CardKind, value: &Value) -> Result<CardRecord> {
    let map_err = |err: serde_json::Error| {
        VitrineError::shape(format!("section '{section_id}': malformed card record: {err}"))
    };
    let record = match card_kind {
        CardKind::Course => {
            CardRecord::Course(serde_json::from_value::<CourseCard>(value.clone()).map_err(map_err)?)
        }
        CardKind::Publication => CardRecord::Publication(
            serde_json::from_value::<PublicationCard>(value.clone()).map_err(map_err)?,
        ),
        CardKind::Thesis => {
            CardRecord::Thesis(serde_json::from_value::<ThesisCard>(value.clone()).map_err(map_err)?)
        }
        CardKind::Project => CardRecord::Project(
            serde_json::from_value::<ProjectCard>(value.clone()).map_err(map_err)?,
        ),
        CardKind::Responsibility => CardRecord::Responsibility(
            serde_json::from_value::<ResponsibilityCard>(value.clone()).map_err(map_err)?,
        ),
        CardKind::Competence => CardRecord::Competence(
            serde_json::from_value::<CompetenceCard>(value.clone()).map_err(map_err)?,
        ),
        CardKind::Custom => {
            CardRecord::Custom(serde_json::from_value::<CustomCard>(value.clone()).map_err(map_err)?)
        }
    };
    if record.id().is_empty() {
        return Err(VitrineError::shape(format!(
            "section '{section_id}': card records must carry a non-empty id"
        )));
    }
    Ok(record)
}

fn ensure_unique_card_ids(section_id: &str, content: &CardsContent) -> Result<()> {
    let mut seen = std::collections::HashSet::new();
    for record in content.records() {
        if !seen.insert(record.id()) {
            return Err(VitrineError::shape(format!(
                "section '{section_id}': duplicate card id '{}'",
                record.id()
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_text_content() {
        let content = decode_content("about", SectionType::Text, &json!("<p>Hi</p>")).unwrap();
        assert_eq!(content, SectionContent::Text("<p>Hi</p>".to_string()));

        let err = decode_content("about", SectionType::Text, &json!(42)).unwrap_err();
        assert!(err.is_shape());
    }

    #[test]
    fn test_list_content() {
        let content =
            decode_content("research-interests", SectionType::List, &json!(["a", "b"])).unwrap();
        assert_eq!(
            content,
            SectionContent::List(vec!["a".to_string(), "b".to_string()])
        );

        let err =
            decode_content("research-interests", SectionType::List, &json!(["a", 1])).unwrap_err();
        assert!(err.is_shape());
    }

    #[test]
    fn test_flat_cards_decode() {
        let value = json!([
            { "id": "c1", "title": "Hydraulics", "code": "CE-210", "color": "sky" },
            { "id": "c2", "title": "Structural Analysis", "color": "violet" }
        ]);
        let content = decode_content(COURSES_SECTION, SectionType::Cards, &value).unwrap();
        match content {
            SectionContent::Cards(CardsContent::Flat(records)) => {
                assert_eq!(records.len(), 2);
                assert!(matches!(records[0], CardRecord::Course(_)));
                assert_eq!(records[1].id(), "c2");
            }
            other => panic!("unexpected content: {other:?}"),
        }
    }

    #[test]
    fn test_theses_are_grouped_never_inferred() {
        let grouped = json!({
            "Hydraulics": [ { "id": "t1", "title": "Flow modelling", "color": "sky" } ]
        });
        let content = decode_content(THESES_SECTION, SectionType::Cards, &grouped).unwrap();
        assert!(matches!(
            content,
            SectionContent::Cards(CardsContent::Grouped(_))
        ));

        // A flat array is a shape error for theses even though it would be
        // a perfectly valid cards payload elsewhere.
        let flat = json!([ { "id": "t1", "color": "sky" } ]);
        let err = decode_content(THESES_SECTION, SectionType::Cards, &flat).unwrap_err();
        assert!(err.is_shape());
    }

    #[test]
    fn test_malformed_cards_payload() {
        let err = decode_content(COURSES_SECTION, SectionType::Cards, &json!(42)).unwrap_err();
        assert!(err.is_shape());

        let err =
            decode_content(COURSES_SECTION, SectionType::Cards, &json!([{ "title": "no id" }]))
                .unwrap_err();
        assert!(err.is_shape());
    }

    #[test]
    fn test_duplicate_card_ids_rejected() {
        let value = json!([
            { "id": "c1", "color": "sky" },
            { "id": "c1", "color": "violet" }
        ]);
        let err = decode_content(COURSES_SECTION, SectionType::Cards, &value).unwrap_err();
        assert!(err.is_shape());
    }

    #[test]
    fn test_unknown_cards_section_uses_custom_flat() {
        let value = json!([ { "id": "x1", "title": "Talk", "color": "amber" } ]);
        let content = decode_content("invited-talks", SectionType::Cards, &value).unwrap();
        match content {
            SectionContent::Cards(CardsContent::Flat(records)) => {
                assert!(matches!(records[0], CardRecord::Custom(_)));
            }
            other => panic!("unexpected content: {other:?}"),
        }
    }

    #[test]
    fn test_empty_content_layouts() {
        assert_eq!(
            empty_content("about", SectionType::Text),
            SectionContent::Text(String::new())
        );
        assert!(matches!(
            empty_content(THESES_SECTION, SectionType::Cards),
            SectionContent::Cards(CardsContent::Grouped(_))
        ));
        assert!(matches!(
            empty_content(COURSES_SECTION, SectionType::Cards),
            SectionContent::Cards(CardsContent::Flat(_))
        ));
    }
}
