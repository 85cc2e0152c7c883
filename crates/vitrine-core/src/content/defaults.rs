//! Default content baseline.
//!
//! The authoritative profile and section list used when no persisted data
//! exists, and as the merge base otherwise. Both factories are pure and
//! deterministic: no I/O, no generated ids. Every id below is a fixed
//! literal, so merges are stable across runs. Callers that need the same
//! instance twice hold a reference themselves; there is no shared
//! singleton.

use std::collections::BTreeMap;

use crate::profile::{Language, Profile};
use crate::section::schema::{
    COMPETENCES_SECTION, COURSES_SECTION, PROJECTS_SECTION, PUBLICATIONS_SECTION,
    RESPONSIBILITIES_SECTION, THESES_SECTION,
};
use crate::section::{
    CardRecord, CardsContent, CompetenceCard, CourseCard, ProjectCard, PublicationCard,
    ResponsibilityCard, Section, SectionContent, SectionType, ThesisCard,
};

/// Returns the baseline profile.
pub fn default_profile() -> Profile {
    Profile {
        name: "Lucia Ferrante".to_string(),
        nationality: "Italian".to_string(),
        email: "lucia.ferrante@unibrera.it".to_string(),
        phone: "+39 02 5550 1234".to_string(),
        position: "Associate Professor of Hydraulic Engineering".to_string(),
        affiliation: "Department of Civil and Environmental Engineering, University of Brera"
            .to_string(),
        mission: "<p>My work sits at the intersection of river mechanics and urban water \
                  infrastructure. I teach future engineers to reason from first principles, \
                  and I build numerical models that help cities live with their rivers \
                  rather than against them.</p>"
            .to_string(),
        languages: vec![
            Language {
                name: "Italian".to_string(),
                color: "emerald".to_string(),
            },
            Language {
                name: "English".to_string(),
                color: "sky".to_string(),
            },
            Language {
                name: "French".to_string(),
                color: "violet".to_string(),
            },
        ],
        photo: None,
    }
}

/// Returns the baseline section list, in default display order.
pub fn default_sections() -> Vec<Section> {
    vec![
        Section {
            id: "about".to_string(),
            title: "About".to_string(),
            kind: SectionType::Text,
            order: 1,
            visible: true,
            content: SectionContent::Text(
                "<p>I am a hydraulic engineer and educator. After a PhD on sediment \
                 transport in gravel-bed rivers, I joined the University of Brera, where \
                 I lead the river dynamics group. My research combines flume experiments, \
                 field campaigns and open-source numerical modelling.</p>"
                    .to_string(),
            ),
        },
        Section {
            id: "research-interests".to_string(),
            title: "Research Interests".to_string(),
            kind: SectionType::List,
            order: 2,
            visible: true,
            content: SectionContent::List(vec![
                "Sediment transport in gravel-bed rivers".to_string(),
                "Urban flood resilience and nature-based solutions".to_string(),
                "Free-surface flow numerical modelling".to_string(),
                "Hydraulic structures and fish passage design".to_string(),
            ]),
        },
        Section {
            id: COURSES_SECTION.to_string(),
            title: "Courses".to_string(),
            kind: SectionType::Cards,
            order: 3,
            visible: true,
            content: SectionContent::Cards(CardsContent::Flat(vec![
                CardRecord::Course(CourseCard {
                    id: "course-hydraulics-1".to_string(),
                    title: "Hydraulics I".to_string(),
                    code: "CE-210".to_string(),
                    level: "BSc".to_string(),
                    semester: "Fall".to_string(),
                    description: "Fundamentals of fluid statics and incompressible flow, \
                                  with laboratory sessions in the department flume."
                        .to_string(),
                    icon: Some("flask-conical".to_string()),
                    color: "sky".to_string(),
                }),
                CardRecord::Course(CourseCard {
                    id: "course-river-mechanics".to_string(),
                    title: "River Mechanics".to_string(),
                    code: "CE-431".to_string(),
                    level: "MSc".to_string(),
                    semester: "Spring".to_string(),
                    description: "Sediment transport, channel morphology and restoration \
                                  design, taught around a semester-long case study."
                        .to_string(),
                    icon: Some("globe".to_string()),
                    color: "emerald".to_string(),
                }),
                CardRecord::Course(CourseCard {
                    id: "course-computational-hydraulics".to_string(),
                    title: "Computational Hydraulics".to_string(),
                    code: "CE-512".to_string(),
                    level: "MSc".to_string(),
                    semester: "Fall".to_string(),
                    description: "Finite-volume methods for shallow-water equations; \
                                  students extend an open-source solver as coursework."
                        .to_string(),
                    icon: Some("presentation".to_string()),
                    color: "violet".to_string(),
                }),
            ])),
        },
        Section {
            id: PUBLICATIONS_SECTION.to_string(),
            title: "Publications".to_string(),
            kind: SectionType::Cards,
            order: 4,
            visible: true,
            content: SectionContent::Cards(CardsContent::Flat(vec![
                CardRecord::Publication(PublicationCard {
                    id: "pub-bedload-2023".to_string(),
                    title: "Bedload pulses in engineered gravel-bed reaches".to_string(),
                    authors: vec![
                        "L. Ferrante".to_string(),
                        "M. Okonkwo".to_string(),
                        "S. Lindqvist".to_string(),
                    ],
                    venue: "Journal of Hydraulic Engineering".to_string(),
                    year: Some(2023),
                    doi: Some("10.1061/JHEND8.HYENG-13204".to_string()),
                    icon: Some("scroll-text".to_string()),
                    color: "amber".to_string(),
                }),
                CardRecord::Publication(PublicationCard {
                    id: "pub-urban-flood-2021".to_string(),
                    title: "Quantifying retention benefits of daylighted urban streams"
                        .to_string(),
                    authors: vec!["L. Ferrante".to_string(), "A. Keller".to_string()],
                    venue: "Water Resources Research".to_string(),
                    year: Some(2021),
                    doi: Some("10.1029/2021WR029877".to_string()),
                    icon: Some("scroll-text".to_string()),
                    color: "sky".to_string(),
                }),
            ])),
        },
        Section {
            id: THESES_SECTION.to_string(),
            title: "Theses Supervised".to_string(),
            kind: SectionType::Cards,
            order: 5,
            visible: true,
            content: SectionContent::Cards(CardsContent::Grouped({
                let mut groups = BTreeMap::new();
                groups.insert(
                    "River Restoration".to_string(),
                    vec![
                        CardRecord::Thesis(ThesisCard {
                            id: "thesis-restoration-melzi".to_string(),
                            title: "Gravel augmentation downstream of the Adda weir"
                                .to_string(),
                            student: "G. Melzi".to_string(),
                            degree: "MSc".to_string(),
                            year: Some(2023),
                            color: "emerald".to_string(),
                        }),
                        CardRecord::Thesis(ThesisCard {
                            id: "thesis-restoration-bauer".to_string(),
                            title: "Vegetation roughness in restored floodplains".to_string(),
                            student: "H. Bauer".to_string(),
                            degree: "MSc".to_string(),
                            year: Some(2022),
                            color: "sky".to_string(),
                        }),
                    ],
                );
                groups.insert(
                    "Urban Hydraulics".to_string(),
                    vec![CardRecord::Thesis(ThesisCard {
                        id: "thesis-urban-costa".to_string(),
                        title: "Real-time control of combined sewer overflows".to_string(),
                        student: "R. Costa".to_string(),
                        degree: "PhD".to_string(),
                        year: Some(2024),
                        color: "violet".to_string(),
                    })],
                );
                groups
            })),
        },
        Section {
            id: PROJECTS_SECTION.to_string(),
            title: "Projects".to_string(),
            kind: SectionType::Cards,
            order: 6,
            visible: true,
            content: SectionContent::Cards(CardsContent::Flat(vec![
                CardRecord::Project(ProjectCard {
                    id: "project-riverlab".to_string(),
                    title: "RiverLab".to_string(),
                    description: "A shared open flume facility instrumented for particle \
                                  tracking, serving three research groups."
                        .to_string(),
                    funding: "National Research Infrastructure Fund".to_string(),
                    period: "2022 - 2026".to_string(),
                    icon: Some("microscope".to_string()),
                    color: "sky".to_string(),
                }),
                CardRecord::Project(ProjectCard {
                    id: "project-spongecities".to_string(),
                    title: "SpongeCities".to_string(),
                    description: "EU consortium quantifying how blue-green infrastructure \
                                  changes urban flood frequency curves."
                        .to_string(),
                    funding: "Horizon Europe".to_string(),
                    period: "2023 - 2027".to_string(),
                    icon: Some("globe".to_string()),
                    color: "emerald".to_string(),
                }),
            ])),
        },
        Section {
            id: RESPONSIBILITIES_SECTION.to_string(),
            title: "Responsibilities".to_string(),
            kind: SectionType::Cards,
            order: 7,
            visible: true,
            content: SectionContent::Cards(CardsContent::Flat(vec![
                CardRecord::Responsibility(ResponsibilityCard {
                    id: "resp-msc-coordinator".to_string(),
                    title: "MSc Programme Coordinator".to_string(),
                    organization: "Department of Civil and Environmental Engineering"
                        .to_string(),
                    period: "2021 - present".to_string(),
                    icon: Some("graduation-cap".to_string()),
                    color: "violet".to_string(),
                }),
                CardRecord::Responsibility(ResponsibilityCard {
                    id: "resp-editor-jhe".to_string(),
                    title: "Associate Editor".to_string(),
                    organization: "Journal of Hydraulic Engineering".to_string(),
                    period: "2022 - present".to_string(),
                    icon: Some("pen-tool".to_string()),
                    color: "amber".to_string(),
                }),
            ])),
        },
        Section {
            id: COMPETENCES_SECTION.to_string(),
            title: "Competences".to_string(),
            kind: SectionType::Cards,
            order: 8,
            visible: true,
            content: SectionContent::Cards(CardsContent::Flat(vec![
                CardRecord::Competence(CompetenceCard {
                    id: "comp-modelling".to_string(),
                    title: "Numerical Modelling".to_string(),
                    items: vec![
                        "Shallow-water solvers".to_string(),
                        "Morphodynamic coupling".to_string(),
                        "Uncertainty quantification".to_string(),
                    ],
                    icon: Some("target".to_string()),
                    color: "sky".to_string(),
                }),
                CardRecord::Competence(CompetenceCard {
                    id: "comp-fieldwork".to_string(),
                    title: "Field & Laboratory Methods".to_string(),
                    items: vec![
                        "ADCP surveying".to_string(),
                        "Particle image velocimetry".to_string(),
                        "Sediment sampling campaigns".to_string(),
                    ],
                    icon: Some("flask-conical".to_string()),
                    color: "emerald".to_string(),
                }),
            ])),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_defaults_are_deterministic() {
        assert_eq!(default_profile(), default_profile());
        assert_eq!(default_sections(), default_sections());
    }

    #[test]
    fn test_section_ids_are_unique_and_non_empty() {
        let sections = default_sections();
        let mut seen = HashSet::new();
        for section in &sections {
            assert!(!section.id.is_empty());
            assert!(seen.insert(section.id.clone()), "duplicate id {}", section.id);
        }
        assert_eq!(sections.len(), 8);
    }

    #[test]
    fn test_card_ids_are_unique_within_each_section() {
        for section in default_sections() {
            if let SectionContent::Cards(cards) = &section.content {
                let mut seen = HashSet::new();
                for record in cards.records() {
                    assert!(
                        seen.insert(record.id().to_string()),
                        "duplicate card id {} in {}",
                        record.id(),
                        section.id
                    );
                }
            }
        }
    }

    #[test]
    fn test_default_order_is_sequential() {
        let orders: Vec<i64> = default_sections().iter().map(|s| s.order).collect();
        assert_eq!(orders, vec![1, 2, 3, 4, 5, 6, 7, 8]);
    }

    #[test]
    fn test_theses_section_is_grouped() {
        let sections = default_sections();
        let theses = sections.iter().find(|s| s.id == THESES_SECTION).unwrap();
        assert!(matches!(
            theses.content,
            SectionContent::Cards(CardsContent::Grouped(_))
        ));
    }
}
