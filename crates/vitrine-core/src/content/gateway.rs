//! Persistence gateway trait.
//!
//! Defines the interface through which content is fetched and saved.
//! The backing service is opaque to this workspace; implementations live
//! in the infrastructure crate (HTTP client, in-memory store).

use crate::error::Result;
use crate::profile::ProfilePatch;
use crate::section::{SectionDraft, SectionOrder, SectionPatch, StoredSection};

/// An abstract gateway for persisting portfolio content.
///
/// This trait decouples the content accessors from the specific backing
/// service (REST API, in-memory store for tests). All fetch operations
/// distinguish "the store has no record" (`Ok(None)`) from "the store is
/// unreachable or answered garbage" (`Err(Gateway)`); the reconciliation
/// layer treats both as "use defaults" but only the latter is surfaced as
/// an error to the session state.
#[async_trait::async_trait]
pub trait ContentGateway: Send + Sync {
    /// Retrieves the stored profile record for an owner.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(patch))`: the stored partial profile
    /// - `Ok(None)`: the store has no profile record yet
    /// - `Err(VitrineError)`: the gateway failed
    async fn fetch_profile(&self, owner_id: &str) -> Result<Option<ProfilePatch>>;

    /// Persists a partial profile update.
    async fn save_profile(&self, owner_id: &str, patch: &ProfilePatch) -> Result<()>;

    /// Retrieves all stored section records for an owner.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(records))`: the stored sections
    /// - `Ok(None)`: the store has no sections record yet
    /// - `Err(VitrineError)`: the gateway failed
    async fn fetch_sections(&self, owner_id: &str) -> Result<Option<Vec<StoredSection>>>;

    /// Persists a partial update of one section.
    async fn save_section(
        &self,
        owner_id: &str,
        section_id: &str,
        patch: &SectionPatch,
    ) -> Result<()>;

    /// Creates a section from a draft.
    ///
    /// # Returns
    ///
    /// The id generated by the store for the new section.
    async fn create_section(&self, owner_id: &str, draft: &SectionDraft) -> Result<String>;

    /// Deletes a section by id.
    async fn delete_section(&self, owner_id: &str, section_id: &str) -> Result<()>;

    /// Rewrites the display order of all listed sections.
    ///
    /// This is a single batch request on purpose: reordering must never be
    /// sent as one call per section, where a partial failure would leave
    /// the store half-reordered.
    async fn reorder_sections(&self, owner_id: &str, order: &[SectionOrder]) -> Result<()>;
}
