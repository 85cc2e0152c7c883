//! The merged content state object.

use serde::Serialize;

use crate::profile::Profile;
use crate::section::Section;

/// One consistent `{profile, sections}` state, as produced by
/// reconciliation.
///
/// The public renderer only ever reads this; editors mutate it through the
/// content accessors.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PortfolioContent {
    pub profile: Profile,
    pub sections: Vec<Section>,
}

impl PortfolioContent {
    /// Finds a section by id.
    pub fn section(&self, id: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.id == id)
    }

    /// Finds a section by id for mutation.
    pub fn section_mut(&mut self, id: &str) -> Option<&mut Section> {
        self.sections.iter_mut().find(|s| s.id == id)
    }

    /// Sections in display order: stable sort by `order`, ties keeping
    /// insertion order.
    pub fn sections_sorted(&self) -> Vec<&Section> {
        let mut sorted: Vec<&Section> = self.sections.iter().collect();
        sorted.sort_by_key(|s| s.order);
        sorted
    }

    /// The public renderer's read path: display order, hidden sections
    /// filtered out.
    pub fn visible_sections(&self) -> Vec<&Section> {
        self.sections_sorted()
            .into_iter()
            .filter(|s| s.visible)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{default_profile, default_sections};
    use crate::section::{SectionContent, SectionType};

    fn content_with_orders(orders: &[(&str, i64, bool)]) -> PortfolioContent {
        PortfolioContent {
            profile: default_profile(),
            sections: orders
                .iter()
                .map(|(id, order, visible)| Section {
                    id: id.to_string(),
                    title: id.to_string(),
                    kind: SectionType::Text,
                    order: *order,
                    visible: *visible,
                    content: SectionContent::Text(String::new()),
                })
                .collect(),
        }
    }

    #[test]
    fn test_sections_sorted_is_stable_on_ties() {
        let content = content_with_orders(&[("a", 2, true), ("b", 1, true), ("c", 2, true)]);
        let ids: Vec<&str> = content.sections_sorted().iter().map(|s| s.id.as_str()).collect();
        // a and c tie on order 2; insertion order breaks the tie
        assert_eq!(ids, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_visible_sections_filters_hidden() {
        let content = content_with_orders(&[("a", 1, true), ("b", 2, false), ("c", 3, true)]);
        let ids: Vec<&str> = content.visible_sections().iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "c"]);
    }

    #[test]
    fn test_section_lookup() {
        let content = PortfolioContent {
            profile: default_profile(),
            sections: default_sections(),
        };
        assert!(content.section("about").is_some());
        assert!(content.section("missing").is_none());
    }
}
