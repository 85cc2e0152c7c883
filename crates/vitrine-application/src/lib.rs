//! Application layer: the content accessors.
//!
//! [`ContentService`] is the only entry point renderers and editors use to
//! read merged portfolio content and to request mutations. It owns the
//! in-memory merged state and talks to the persistence gateway through the
//! [`vitrine_core::content::ContentGateway`] trait.

mod content_service;
mod state;


pub use content_service::ContentService;
pub use state::{ContentState, SessionPhase};
