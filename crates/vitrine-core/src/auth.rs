//! Authentication collaborator boundary.
//!
//! The actual login flow lives outside this workspace; the content layer
//! only sees the resulting owner session, whose presence gates whether
//! gateway calls are attempted at all.

use serde::{Deserialize, Serialize};

/// An authenticated portfolio owner.
///
/// Without a session the content layer never talks to the gateway and
/// serves the default baseline instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnerSession {
    /// Owner identifier used as the gateway key
    pub id: String,
    /// Owner e-mail as reported by the authentication collaborator
    pub email: String,
}

impl OwnerSession {
    /// Creates a session for the given owner id and e-mail.
    pub fn new(id: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            email: email.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new() {
        let session = OwnerSession::new("owner-1", "owner@example.edu");
        assert_eq!(session.id, "owner-1");
        assert_eq!(session.email, "owner@example.edu");
    }
}
