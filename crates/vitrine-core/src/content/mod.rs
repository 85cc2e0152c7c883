//! Content domain module.
//!
//! # Module Structure
//!
//! - `model`: the merged `{profile, sections}` state object
//! - `defaults`: the default content baseline (pure factories)
//! - `reconcile`: merges persisted gateway data onto the baseline
//! - `gateway`: the persistence gateway trait consumed by the accessors

mod defaults;
pub mod gateway;
mod model;
mod reconcile;

pub use defaults::{default_profile, default_sections};
pub use gateway::ContentGateway;
pub use model::PortfolioContent;
pub use reconcile::{merge_section, parse_profile_patch, parse_stored_sections, reconcile};
