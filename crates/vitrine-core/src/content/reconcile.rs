//! Reconciliation engine.
//!
//! Produces one consistent `{profile, sections}` state from the default
//! baseline and whatever the persistence gateway returned, tolerating
//! partial or malformed gateway data. Nothing in this module returns an
//! error to the caller: questionable input falls back to the default side
//! and is reported on the diagnostic log channel only.

use serde_json::Value;
use tracing::warn;

use super::defaults::{default_profile, default_sections};
use super::model::PortfolioContent;
use crate::profile::ProfilePatch;
use crate::section::schema::{decode_content, empty_content};
use crate::section::{Section, SectionPatch, SectionType, StoredSection};

/// Merges persisted gateway data onto the default baseline.
///
/// - Profile: present patch fields win over the default profile; an absent
///   patch leaves the defaults verbatim.
/// - Sections: each default section is overlaid with the stored record of
///   the same id, if any; stored sections unknown to the baseline are
///   appended afterwards in their original order. No section from either
///   side is ever dropped, so the output count is always >= the default
///   count.
pub fn reconcile(
    profile: Option<ProfilePatch>,
    sections: Option<Vec<StoredSection>>,
) -> PortfolioContent {
    let mut merged_profile = default_profile();
    if let Some(patch) = profile {
        patch.apply_to(&mut merged_profile);
    }

    let mut merged_sections = default_sections();
    if let Some(stored) = sections {
        let default_count = merged_sections.len() as i64;
        let mut appended = 0i64;
        for record in stored {
            match merged_sections.iter_mut().find(|s| s.id == record.id) {
                // Covers defaults and already-appended duplicates alike, so
                // a repeated id can never appear twice in the output.
                Some(section) => merge_section(section, &record.patch),
                None => {
                    appended += 1;
                    merged_sections.push(materialize_section(record, default_count + appended));
                }
            }
        }
    }

    PortfolioContent {
        profile: merged_profile,
        sections: merged_sections,
    }
}

/// Shallow-merges a stored patch onto a section, present fields winning.
///
/// Content is decoded against the effective type; a malformed payload
/// keeps the section's prior valid content (and prior type) and emits a
/// warning. A type change that carries no content resets the content to
/// that type's empty shape, since content must always match the declared
/// type.
pub fn merge_section(section: &mut Section, patch: &SectionPatch) {
    if let Some(title) = &patch.title {
        section.title = title.clone();
    }
    if let Some(order) = patch.order {
        section.order = order;
    }
    if let Some(visible) = patch.visible {
        section.visible = visible;
    }

    let effective_kind = patch.kind.unwrap_or(section.kind);
    match &patch.content {
        Some(value) => match decode_content(&section.id, effective_kind, value) {
            Ok(content) => {
                section.kind = effective_kind;
                section.content = content;
            }
            Err(err) => {
                warn!(
                    section_id = %section.id,
                    %err,
                    "stored content does not match its declared type; keeping prior content"
                );
            }
        },
        None => {
            if effective_kind != section.kind {
                warn!(
                    section_id = %section.id,
                    from = %section.kind,
                    to = %effective_kind,
                    "stored type change carries no content; resetting to empty content"
                );
                section.kind = effective_kind;
                section.content = empty_content(&section.id, effective_kind);
            }
        }
    }
}

/// Builds a full section from a stored record the baseline knows nothing
/// about. Missing fields get conservative defaults; undecodable content
/// becomes the empty content of the declared type, with a warning.
fn materialize_section(record: StoredSection, fallback_order: i64) -> Section {
    let StoredSection { id, patch } = record;
    let kind = patch.kind.unwrap_or(SectionType::Text);
    let content = match &patch.content {
        Some(value) => match decode_content(&id, kind, value) {
            Ok(content) => content,
            Err(err) => {
                warn!(section_id = %id, %err, "stored section has malformed content; using empty content");
                empty_content(&id, kind)
            }
        },
        None => empty_content(&id, kind),
    };
    Section {
        title: patch.title.unwrap_or_default(),
        kind,
        order: patch.order.unwrap_or(fallback_order),
        visible: patch.visible.unwrap_or(true),
        content,
        id,
    }
}

/// Leniently parses a raw gateway profile body.
///
/// A structurally invalid body is treated as absent: the caller falls back
/// to the default profile and the problem is only reported as a warning.
pub fn parse_profile_patch(value: &Value) -> Option<ProfilePatch> {
    match serde_json::from_value::<ProfilePatch>(value.clone()) {
        Ok(patch) => Some(patch),
        Err(err) => {
            warn!(%err, "gateway profile response is not a profile record; using defaults");
            None
        }
    }
}

/// Leniently parses a raw gateway sections body.
///
/// A body that is not a list is treated as absent. Entries that are not
/// section records (e.g. missing an id) are skipped with a warning; the
/// remaining entries still participate in the merge.
pub fn parse_stored_sections(value: &Value) -> Option<Vec<StoredSection>> {
    let items = match value.as_array() {
        Some(items) => items,
        None => {
            warn!("gateway sections response is not a list; using defaults");
            return None;
        }
    };
    let mut records = Vec::with_capacity(items.len());
    for item in items {
        match serde_json::from_value::<StoredSection>(item.clone()) {
            Ok(record) => records.push(record),
            Err(err) => {
                warn!(%err, "skipping malformed section record in gateway response");
            }
        }
    }
    Some(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::section::schema::COURSES_SECTION;
    use crate::section::{CardsContent, SectionContent};
    use serde_json::json;
    use std::collections::HashSet;

    #[test]
    fn test_identity_when_gateway_absent() {
        let merged = reconcile(None, None);
        assert_eq!(merged.profile, default_profile());
        assert_eq!(merged.sections, default_sections());
    }

    #[test]
    fn test_profile_overlay_gateway_wins_per_field() {
        let merged = reconcile(
            Some(ProfilePatch {
                name: Some("Renamed Owner".to_string()),
                ..Default::default()
            }),
            None,
        );
        assert_eq!(merged.profile.name, "Renamed Owner");
        assert_eq!(merged.profile.email, default_profile().email);
    }

    #[test]
    fn test_default_section_overlaid_by_id() {
        let stored = vec![StoredSection {
            id: "about".to_string(),
            patch: SectionPatch {
                title: Some("Who I am".to_string()),
                visible: Some(false),
                content: Some(json!("<p>Updated</p>")),
                ..Default::default()
            },
        }];
        let merged = reconcile(None, Some(stored));
        let about = merged.section("about").unwrap();
        assert_eq!(about.title, "Who I am");
        assert!(!about.visible);
        assert_eq!(about.content, SectionContent::Text("<p>Updated</p>".to_string()));
        // Position and order are untouched
        assert_eq!(about.order, 1);
    }

    #[test]
    fn test_default_sections_survive_missing_store_records() {
        // Store only knows one section; every default must still be there.
        let stored = vec![StoredSection {
            id: "about".to_string(),
            patch: SectionPatch::default(),
        }];
        let merged = reconcile(None, Some(stored));
        let default_ids: HashSet<String> =
            default_sections().into_iter().map(|s| s.id).collect();
        let merged_ids: HashSet<String> =
            merged.sections.iter().map(|s| s.id.clone()).collect();
        assert!(default_ids.is_subset(&merged_ids));
        assert!(merged.sections.len() >= default_ids.len());
    }

    #[test]
    fn test_unknown_sections_appended_in_original_order() {
        let stored = vec![
            StoredSection {
                id: "awards".to_string(),
                patch: SectionPatch {
                    title: Some("Awards".to_string()),
                    kind: Some(SectionType::List),
                    content: Some(json!(["Best paper 2023"])),
                    ..Default::default()
                },
            },
            StoredSection {
                id: "talks".to_string(),
                patch: SectionPatch {
                    title: Some("Invited Talks".to_string()),
                    kind: Some(SectionType::Text),
                    content: Some(json!("<p>…</p>")),
                    ..Default::default()
                },
            },
        ];
        let merged = reconcile(None, Some(stored));
        let n = default_sections().len();
        assert_eq!(merged.sections[n].id, "awards");
        assert_eq!(merged.sections[n + 1].id, "talks");
        // Appended sections sort after the defaults
        assert_eq!(merged.sections[n].order, (n as i64) + 1);
        assert_eq!(merged.sections[n + 1].order, (n as i64) + 2);
        assert!(merged.sections[n].visible);
    }

    #[test]
    fn test_malformed_stored_content_keeps_default_content() {
        let stored = vec![StoredSection {
            id: COURSES_SECTION.to_string(),
            patch: SectionPatch {
                title: Some("Teaching".to_string()),
                content: Some(json!(42)),
                ..Default::default()
            },
        }];
        let merged = reconcile(None, Some(stored));
        let courses = merged.section(COURSES_SECTION).unwrap();
        // The well-formed field applied; the malformed content did not.
        assert_eq!(courses.title, "Teaching");
        let default_courses = default_sections()
            .into_iter()
            .find(|s| s.id == COURSES_SECTION)
            .unwrap();
        assert_eq!(courses.content, default_courses.content);
    }

    #[test]
    fn test_kind_change_without_content_resets_to_empty() {
        let stored = vec![StoredSection {
            id: "about".to_string(),
            patch: SectionPatch {
                kind: Some(SectionType::List),
                ..Default::default()
            },
        }];
        let merged = reconcile(None, Some(stored));
        let about = merged.section("about").unwrap();
        assert_eq!(about.kind, SectionType::List);
        assert_eq!(about.content, SectionContent::List(Vec::new()));
    }

    #[test]
    fn test_materialized_cards_section_uses_custom_flat_layout() {
        let stored = vec![StoredSection {
            id: "gallery".to_string(),
            patch: SectionPatch {
                kind: Some(SectionType::Cards),
                content: Some(json!([{ "id": "g1", "title": "Flume", "color": "sky" }])),
                ..Default::default()
            },
        }];
        let merged = reconcile(None, Some(stored));
        let gallery = merged.section("gallery").unwrap();
        assert!(matches!(
            gallery.content,
            SectionContent::Cards(CardsContent::Flat(_))
        ));
    }

    #[test]
    fn test_parse_stored_sections_not_a_list() {
        assert!(parse_stored_sections(&json!({ "oops": true })).is_none());
        assert!(parse_stored_sections(&json!("nope")).is_none());
    }

    #[test]
    fn test_parse_stored_sections_skips_bad_entries() {
        let parsed = parse_stored_sections(&json!([
            { "id": "about", "title": "About me" },
            { "title": "no id here" },
            42
        ]))
        .unwrap();
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].id, "about");
    }

    #[test]
    fn test_parse_profile_patch_invalid_is_none() {
        assert!(parse_profile_patch(&json!([1, 2, 3])).is_none());
        assert!(parse_profile_patch(&json!({ "name": "Ok" })).is_some());
    }
}
