//! Profile domain module.
//!
//! Contains the portfolio owner's profile model and the partial overlay
//! used for fetching and updating it.

mod model;

pub use model::{Language, Profile, ProfilePatch};
