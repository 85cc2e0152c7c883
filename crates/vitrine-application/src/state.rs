//! Session state model.
//!
//! Tracks where the content session is in its lifecycle and what the last
//! sync attempt left behind. The state never goes blank after a failure:
//! the last good merged content keeps being served, flagged stale.

use serde::Serialize;
use vitrine_core::content::PortfolioContent;
use vitrine_core::error::VitrineError;

/// Lifecycle phase of the content session.
///
/// `Unloaded -> Loading -> Ready`; every mutation passes through `Loading`
/// again while the gateway round-trip is in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum SessionPhase {
    #[default]
    Unloaded,
    Loading,
    Ready,
}

/// The session's view of the merged content.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ContentState {
    /// Current lifecycle phase
    pub phase: SessionPhase,
    /// Last good merged content; `None` only before the first load
    pub content: Option<PortfolioContent>,
    /// True when the served content may lag the store (last sync failed)
    pub stale: bool,
    /// Error the last failed gateway interaction left behind
    pub last_error: Option<VitrineError>,
    /// RFC 3339 timestamp of the last successful sync
    pub last_synced_at: Option<String>,
}

impl ContentState {
    /// True once the session serves content, stale or not.
    pub fn is_ready(&self) -> bool {
        self.phase == SessionPhase::Ready
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_state_is_unloaded() {
        let state = ContentState::default();
        assert_eq!(state.phase, SessionPhase::Unloaded);
        assert!(state.content.is_none());
        assert!(!state.stale);
        assert!(!state.is_ready());
    }
}
