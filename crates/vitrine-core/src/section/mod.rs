//! Section domain module.
//!
//! Sections are the central polymorphic entity of the portfolio: one named,
//! orderable, visibility-toggleable block whose `content` shape is governed
//! by its declared type.
//!
//! # Module Structure
//!
//! - `model`: Section entity, typed content variants, card records, wire types
//! - `schema`: per-type structural validation and per-section-id card decoding
//! - `icon`: closed registry resolving symbolic icon names at render time

mod icon;
mod model;
pub mod schema;

pub use icon::Icon;
pub use model::{
    CardRecord, CardsContent, CompetenceCard, CourseCard, CustomCard, ProjectCard,
    PublicationCard, ResponsibilityCard, Section, SectionContent, SectionDraft, SectionOrder,
    SectionPatch, SectionType, StoredSection, ThesisCard,
};
