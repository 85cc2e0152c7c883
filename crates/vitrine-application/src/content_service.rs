//! Content accessors.
//!
//! `ContentService` owns the in-memory merged state and is the only place
//! mutations happen. Every mutation is two-phase: the gateway call first,
//! the local state update only after the gateway accepted. A failed call
//! leaves the last good state in place, flagged stale, and surfaces the
//! error as the operation's result value.

use std::collections::HashSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, warn};

use vitrine_core::auth::OwnerSession;
use vitrine_core::content::{ContentGateway, PortfolioContent, merge_section, reconcile};
use vitrine_core::error::{Result, VitrineError};
use vitrine_core::profile::ProfilePatch;
use vitrine_core::section::{Section, SectionDraft, SectionOrder, SectionPatch, schema};

use crate::state::{ContentState, SessionPhase};

/// The read/write entry point for portfolio content.
///
/// Holds the merged state behind a `RwLock`; readers get clones, and the
/// public renderer never sees a blank or half-written state. Mutations are
/// serialized through an internal async mutex, so two edits never
/// interleave against the same in-memory state.
pub struct ContentService {
    /// Persistence backend
    gateway: Arc<dyn ContentGateway>,
    /// Authenticated owner; without it the gateway is never called
    session: Option<OwnerSession>,
    /// The session's merged-content state
    state: RwLock<ContentState>,
    /// Serializes mutations and syncs
    mutation_lock: Mutex<()>,
    /// Bumped on every local apply; lets a slow sync report that it is
    /// overwriting newer local state instead of doing so silently
    sync_epoch: AtomicU64,
}

impl ContentService {
    /// Creates a service over the given gateway and owner session.
    ///
    /// Pass `None` for the session to serve the default baseline without
    /// any gateway traffic (the public site before login).
    pub fn new(gateway: Arc<dyn ContentGateway>, session: Option<OwnerSession>) -> Self {
        Self {
            gateway,
            session,
            state: RwLock::new(ContentState::default()),
            mutation_lock: Mutex::new(()),
            sync_epoch: AtomicU64::new(0),
        }
    }

    /// The owner session this service was created with, if any.
    pub fn session(&self) -> Option<&OwnerSession> {
        self.session.as_ref()
    }

    // ========================================================================
    // Read path
    // ========================================================================

    /// Fetches and reconciles content, then returns the resulting state.
    ///
    /// This never fails: a gateway problem leaves the session `Ready` with
    /// the last good content (or the default baseline on first load), the
    /// stale flag set and the error recorded.
    pub async fn load(&self) -> ContentState {
        let _guard = self.mutation_lock.lock().await;
        self.sync_locked().await;
        self.view().await
    }

    /// Re-runs the load on demand.
    pub async fn refresh(&self) -> ContentState {
        self.load().await
    }

    /// A snapshot of the session state (phase, stale flag, last error).
    pub async fn view(&self) -> ContentState {
        self.state.read().await.clone()
    }

    /// The current merged content, loading it first if necessary.
    pub async fn content(&self) -> PortfolioContent {
        {
            let state = self.state.read().await;
            if let Some(content) = &state.content {
                return content.clone();
            }
        }
        let _guard = self.mutation_lock.lock().await;
        if self.state.read().await.content.is_none() {
            self.sync_locked().await;
        }
        match self.state.read().await.content.clone() {
            Some(content) => content,
            // sync_locked always leaves content behind; fall back anyway
            None => reconcile(None, None),
        }
    }

    // ========================================================================
    // Mutations
    // ========================================================================

    /// Updates the profile.
    ///
    /// On gateway success the patch is applied locally and the full
    /// reconcile is re-run, so the in-memory state reflects the
    /// authoritative merge rather than just the optimistic partial.
    pub async fn update_profile(&self, patch: ProfilePatch) -> Result<()> {
        let _guard = self.mutation_lock.lock().await;
        let owner = self.require_owner()?;
        self.ensure_loaded_locked().await;

        debug!("updating profile");
        self.set_loading().await;
        if let Err(err) = self.gateway.save_profile(&owner, &patch).await {
            self.record_failure(&err).await;
            return Err(err);
        }

        // The save took; reflect it immediately, then re-run the
        // authoritative merge. A failed re-fetch keeps the optimistic
        // state and only flags it stale.
        self.apply_mutation(|content| patch.apply_to(&mut content.profile))
            .await;
        self.sync_locked().await;
        Ok(())
    }

    /// Shallow-merges a partial update onto an existing section.
    ///
    /// # Errors
    ///
    /// - `NotFound` when no section has the given id (checked before any
    ///   gateway call)
    /// - `Validation` when the patch carries an empty title
    /// - `Shape` when the patch content does not match the effective type
    /// - `Gateway` when the backing call fails; local state is untouched
    pub async fn update_section(&self, section_id: &str, patch: SectionPatch) -> Result<()> {
        let _guard = self.mutation_lock.lock().await;
        let owner = self.require_owner()?;
        self.ensure_loaded_locked().await;

        if let Some(title) = &patch.title {
            if title.trim().is_empty() {
                return Err(VitrineError::validation("section title cannot be empty"));
            }
        }
        let current_kind = {
            let state = self.state.read().await;
            match state.content.as_ref().and_then(|c| c.section(section_id)) {
                Some(section) => section.kind,
                None => return Err(VitrineError::not_found("Section", section_id)),
            }
        };
        let effective_kind = patch.kind.unwrap_or(current_kind);
        if let Some(value) = &patch.content {
            schema::validate_content(section_id, effective_kind, value)?;
        }

        debug!(section_id, "updating section");
        self.set_loading().await;
        match self.gateway.save_section(&owner, section_id, &patch).await {
            Ok(()) => {
                self.apply_mutation(|content| {
                    if let Some(section) = content.section_mut(section_id) {
                        merge_section(section, &patch);
                    }
                })
                .await;
                Ok(())
            }
            Err(err) => {
                self.record_failure(&err).await;
                Err(err)
            }
        }
    }

    /// Toggles whether the public renderer shows a section.
    pub async fn set_section_visibility(&self, section_id: &str, visible: bool) -> Result<()> {
        self.update_section(
            section_id,
            SectionPatch {
                visible: Some(visible),
                ..Default::default()
            },
        )
        .await
    }

    /// Creates a section from a draft and appends it to the collection.
    ///
    /// The display order is computed as the current section count plus
    /// one; the store generates the id.
    ///
    /// # Returns
    ///
    /// The generated id of the new section.
    pub async fn add_section(&self, draft: SectionDraft) -> Result<String> {
        let _guard = self.mutation_lock.lock().await;
        let owner = self.require_owner()?;
        self.ensure_loaded_locked().await;

        if draft.title.trim().is_empty() {
            return Err(VitrineError::validation("section title cannot be empty"));
        }
        if !draft.content.is_null() {
            // A not-yet-created id can only get the flat custom layout.
            schema::validate_content("", draft.kind, &draft.content)?;
        }
        let order = {
            let state = self.state.read().await;
            state.content.as_ref().map_or(0, |c| c.sections.len()) as i64 + 1
        };

        debug!(title = %draft.title, "adding section");
        self.set_loading().await;
        match self.gateway.create_section(&owner, &draft).await {
            Ok(new_id) => {
                let content_value = &draft.content;
                let section_content = if content_value.is_null() {
                    schema::empty_content(&new_id, draft.kind)
                } else {
                    match schema::decode_content(&new_id, draft.kind, content_value) {
                        Ok(content) => content,
                        Err(err) => {
                            warn!(%err, "draft content does not decode under the generated id; using empty content");
                            schema::empty_content(&new_id, draft.kind)
                        }
                    }
                };
                let section = Section {
                    id: new_id.clone(),
                    title: draft.title.clone(),
                    kind: draft.kind,
                    order,
                    visible: draft.visible.unwrap_or(true),
                    content: section_content,
                };
                self.apply_mutation(move |content| content.sections.push(section))
                    .await;
                Ok(new_id)
            }
            Err(err) => {
                self.record_failure(&err).await;
                Err(err)
            }
        }
    }

    /// Deletes a section by id.
    pub async fn delete_section(&self, section_id: &str) -> Result<()> {
        let _guard = self.mutation_lock.lock().await;
        let owner = self.require_owner()?;
        self.ensure_loaded_locked().await;

        {
            let state = self.state.read().await;
            if state
                .content
                .as_ref()
                .and_then(|c| c.section(section_id))
                .is_none()
            {
                return Err(VitrineError::not_found("Section", section_id));
            }
        }

        debug!(section_id, "deleting section");
        self.set_loading().await;
        match self.gateway.delete_section(&owner, section_id).await {
            Ok(()) => {
                self.apply_mutation(|content| content.sections.retain(|s| s.id != section_id))
                    .await;
                Ok(())
            }
            Err(err) => {
                self.record_failure(&err).await;
                Err(err)
            }
        }
    }

    /// Rewrites the display order so the listed sections come first, in
    /// the given sequence; unlisted sections follow in their prior order.
    ///
    /// The gateway receives the whole order as one batch request, so a
    /// partial failure cannot leave the store half-reordered.
    pub async fn reorder_sections(&self, ordered_ids: &[String]) -> Result<()> {
        let _guard = self.mutation_lock.lock().await;
        let owner = self.require_owner()?;
        self.ensure_loaded_locked().await;

        {
            let state = self.state.read().await;
            for id in ordered_ids {
                if state
                    .content
                    .as_ref()
                    .and_then(|c| c.section(id))
                    .is_none()
                {
                    return Err(VitrineError::not_found("Section", id.clone()));
                }
            }
        }
        let batch: Vec<SectionOrder> = ordered_ids
            .iter()
            .enumerate()
            .map(|(i, id)| SectionOrder {
                id: id.clone(),
                order: (i as i64) + 1,
            })
            .collect();

        debug!(count = ordered_ids.len(), "reordering sections");
        self.set_loading().await;
        match self.gateway.reorder_sections(&owner, &batch).await {
            Ok(()) => {
                self.apply_mutation(|content| {
                    let listed: HashSet<&str> =
                        ordered_ids.iter().map(|id| id.as_str()).collect();
                    let trailing: Vec<String> = content
                        .sections_sorted()
                        .iter()
                        .filter(|s| !listed.contains(s.id.as_str()))
                        .map(|s| s.id.clone())
                        .collect();
                    for (i, id) in ordered_ids.iter().enumerate() {
                        if let Some(section) = content.section_mut(id) {
                            section.order = (i as i64) + 1;
                        }
                    }
                    let base = ordered_ids.len() as i64;
                    for (j, id) in trailing.iter().enumerate() {
                        if let Some(section) = content.section_mut(id) {
                            section.order = base + 1 + j as i64;
                        }
                    }
                })
                .await;
                Ok(())
            }
            Err(err) => {
                self.record_failure(&err).await;
                Err(err)
            }
        }
    }

    // ========================================================================
    // Internals
    // ========================================================================

    fn require_owner(&self) -> Result<String> {
        self.session
            .as_ref()
            .map(|s| s.id.clone())
            .ok_or_else(|| {
                VitrineError::validation("no owner session; sign in before editing content")
            })
    }

    async fn ensure_loaded_locked(&self) {
        if self.state.read().await.content.is_none() {
            self.sync_locked().await;
        }
    }

    async fn set_loading(&self) {
        self.state.write().await.phase = SessionPhase::Loading;
    }

    /// Fetches both halves from the gateway and applies the reconciled
    /// result. Callers must hold the mutation lock.
    async fn sync_locked(&self) {
        self.set_loading().await;

        let Some(owner) = self.session.as_ref().map(|s| s.id.clone()) else {
            debug!("no owner session; serving default content");
            let merged = reconcile(None, None);
            self.apply_synced(merged).await;
            return;
        };

        let epoch_at_start = self.sync_epoch.load(Ordering::SeqCst);
        let mut sync_error: Option<VitrineError> = None;
        let profile = match self.gateway.fetch_profile(&owner).await {
            Ok(patch) => patch,
            Err(err) => {
                warn!(%err, "profile fetch failed");
                sync_error = Some(err);
                None
            }
        };
        let sections = match self.gateway.fetch_sections(&owner).await {
            Ok(records) => records,
            Err(err) => {
                warn!(%err, "sections fetch failed");
                sync_error.get_or_insert(err);
                None
            }
        };

        match sync_error {
            None => {
                if self.sync_epoch.load(Ordering::SeqCst) != epoch_at_start {
                    warn!(
                        "local state changed while syncing; replacing it with the freshly reconciled merge"
                    );
                }
                self.apply_synced(reconcile(profile, sections)).await;
            }
            Some(err) => {
                let mut state = self.state.write().await;
                if state.content.is_none() {
                    // First load: serve what reconciliation can still
                    // produce from the halves that did arrive.
                    state.content = Some(reconcile(profile, sections));
                }
                state.phase = SessionPhase::Ready;
                state.stale = true;
                state.last_error = Some(err);
            }
        }
    }

    async fn apply_synced(&self, merged: PortfolioContent) {
        let mut state = self.state.write().await;
        state.content = Some(merged);
        state.phase = SessionPhase::Ready;
        state.stale = false;
        state.last_error = None;
        state.last_synced_at = Some(Utc::now().to_rfc3339());
    }

    /// Applies a local mutation after a successful gateway call.
    async fn apply_mutation<F>(&self, mutate: F)
    where
        F: FnOnce(&mut PortfolioContent),
    {
        let mut state = self.state.write().await;
        if let Some(content) = state.content.as_mut() {
            mutate(content);
        }
        state.phase = SessionPhase::Ready;
        state.stale = false;
        state.last_error = None;
        state.last_synced_at = Some(Utc::now().to_rfc3339());
        self.sync_epoch.fetch_add(1, Ordering::SeqCst);
    }

    async fn record_failure(&self, err: &VitrineError) {
        let mut state = self.state.write().await;
        state.phase = SessionPhase::Ready;
        state.stale = true;
        state.last_error = Some(err.clone());
    }
}
