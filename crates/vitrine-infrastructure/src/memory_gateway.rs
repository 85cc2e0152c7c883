//! In-memory implementation of the content gateway.
//!
//! Backs tests and offline/dev flows. Stores the same partial records the
//! real service would, so reconciliation behaves identically against it.

use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::Mutex;
use uuid::Uuid;

use vitrine_core::content::gateway::ContentGateway;
use vitrine_core::error::{Result, VitrineError};
use vitrine_core::profile::ProfilePatch;
use vitrine_core::section::{SectionDraft, SectionOrder, SectionPatch, StoredSection};

/// Gateway that keeps everything in process memory.
#[derive(Default)]
pub struct InMemoryContentGateway {
    profile: Mutex<Option<ProfilePatch>>,
    sections: Mutex<Vec<StoredSection>>,
    failing: AtomicBool,
}

impl InMemoryContentGateway {
    /// Creates an empty gateway.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a gateway pre-seeded with stored records.
    pub fn seeded(profile: Option<ProfilePatch>, sections: Vec<StoredSection>) -> Self {
        Self {
            profile: Mutex::new(profile),
            sections: Mutex::new(sections),
            failing: AtomicBool::new(false),
        }
    }

    /// Makes every subsequent call fail with a gateway error.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    fn check_available(&self) -> Result<()> {
        if self.failing.load(Ordering::SeqCst) {
            Err(VitrineError::gateway("in-memory gateway switched to failing"))
        } else {
            Ok(())
        }
    }
}

#[async_trait::async_trait]
impl ContentGateway for InMemoryContentGateway {
    async fn fetch_profile(&self, _owner_id: &str) -> Result<Option<ProfilePatch>> {
        self.check_available()?;
        Ok(self.profile.lock().await.clone())
    }

    async fn save_profile(&self, _owner_id: &str, patch: &ProfilePatch) -> Result<()> {
        self.check_available()?;
        let mut stored = self.profile.lock().await;
        match stored.as_mut() {
            Some(existing) => existing.overlay(patch),
            None => *stored = Some(patch.clone()),
        }
        Ok(())
    }

    async fn fetch_sections(&self, _owner_id: &str) -> Result<Option<Vec<StoredSection>>> {
        self.check_available()?;
        let sections = self.sections.lock().await;
        if sections.is_empty() {
            Ok(None)
        } else {
            Ok(Some(sections.clone()))
        }
    }

    async fn save_section(
        &self,
        _owner_id: &str,
        section_id: &str,
        patch: &SectionPatch,
    ) -> Result<()> {
        self.check_available()?;
        let mut sections = self.sections.lock().await;
        match sections.iter_mut().find(|s| s.id == section_id) {
            Some(stored) => {
                stored.patch.overlay(patch);
                Ok(())
            }
            None => {
                // A section the store has no record of yet is still a valid
                // update target: defaults live client-side only.
                sections.push(StoredSection {
                    id: section_id.to_string(),
                    patch: patch.clone(),
                });
                Ok(())
            }
        }
    }

    async fn create_section(&self, _owner_id: &str, draft: &SectionDraft) -> Result<String> {
        self.check_available()?;
        let id = format!("section-{}", Uuid::new_v4());
        self.sections.lock().await.push(StoredSection {
            id: id.clone(),
            patch: SectionPatch {
                title: Some(draft.title.clone()),
                kind: Some(draft.kind),
                content: Some(draft.content.clone()),
                visible: draft.visible,
                ..Default::default()
            },
        });
        Ok(id)
    }

    async fn delete_section(&self, _owner_id: &str, section_id: &str) -> Result<()> {
        self.check_available()?;
        let mut sections = self.sections.lock().await;
        let before = sections.len();
        sections.retain(|s| s.id != section_id);
        if sections.len() == before {
            return Err(VitrineError::not_found("Section", section_id));
        }
        Ok(())
    }

    async fn reorder_sections(&self, _owner_id: &str, order: &[SectionOrder]) -> Result<()> {
        self.check_available()?;
        let mut sections = self.sections.lock().await;
        for entry in order {
            match sections.iter_mut().find(|s| s.id == entry.id) {
                Some(stored) => stored.patch.order = Some(entry.order),
                None => sections.push(StoredSection {
                    id: entry.id.clone(),
                    patch: SectionPatch {
                        order: Some(entry.order),
                        ..Default::default()
                    },
                }),
            }
        }
        Ok(())
    }
}
