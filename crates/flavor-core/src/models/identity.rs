// ABOUTME: Session identity model and two-state authentication machine
// ABOUTME: Defines Identity and SessionState (Anonymous or Authenticated)
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::recipe::AuthorRef;
use serde::{Deserialize, Serialize};

/// Authenticated user snapshot held for the current session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Stable identity ID
    pub id: String,
    /// Display name
    pub username: String,
    /// Contact email
    pub email: String,
    /// Optional avatar URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

impl Identity {
    /// Create an identity without an avatar
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        username: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            username: username.into(),
            email: email.into(),
            avatar: None,
        }
    }

    /// Attach an avatar URL
    #[must_use]
    pub fn with_avatar(mut self, avatar: impl Into<String>) -> Self {
        self.avatar = Some(avatar.into());
        self
    }

    /// Author snapshot to embed into recipes created by this identity
    #[must_use]
    pub fn author_ref(&self) -> AuthorRef {
        AuthorRef::new(self.id.clone(), self.username.clone())
    }
}

/// Session authentication state
///
/// `Anonymous -> Authenticated` on login or register, `Authenticated ->
/// Anonymous` on logout, and `Authenticated -> Authenticated` when a new login
/// replaces the identity.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SessionState {
    /// No identity
    #[default]
    Anonymous,
    /// Identity present
    Authenticated {
        /// The session identity
        user: Identity,
    },
}

impl SessionState {
    /// Whether an identity is present
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated { .. })
    }

    /// Current identity, if any
    #[must_use]
    pub const fn identity(&self) -> Option<&Identity> {
        match self {
            Self::Anonymous => None,
            Self::Authenticated { user } => Some(user),
        }
    }
}
