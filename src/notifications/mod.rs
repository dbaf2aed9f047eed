// ABOUTME: Store change notifications delivered over broadcast channels
// ABOUTME: Defines the generic EventStream plus recipe and session event types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Change notifications.
//!
//! Each store owns one [`EventStream`]. Events are published while the store's
//! write guard is held, so a subscriber observes them in commit order and
//! before the mutating call returns.

use crate::constants::events::DEFAULT_EVENT_BUFFER;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tracing::trace;

/// Multi-subscriber event channel
#[derive(Debug, Clone)]
pub struct EventStream<E: Clone> {
    sender: broadcast::Sender<E>,
}

impl<E: Clone> EventStream<E> {
    /// Create a stream whose subscribers may lag by at most `buffer` events
    #[must_use]
    pub fn new(buffer: usize) -> Self {
        let (sender, _receiver) = broadcast::channel(buffer.max(1));
        Self { sender }
    }

    /// Subscribe to events published after this call
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<E> {
        self.sender.subscribe()
    }

    /// Publish an event, returning how many subscribers received it
    pub fn publish(&self, event: E) -> usize {
        // A send error only means nobody is listening.
        match self.sender.send(event) {
            Ok(receivers) => receivers,
            Err(_) => {
                trace!("Event dropped, no subscribers");
                0
            }
        }
    }

    /// Number of live subscribers
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl<E: Clone> Default for EventStream<E> {
    fn default() -> Self {
        Self::new(DEFAULT_EVENT_BUFFER)
    }
}

/// Recipe store change
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RecipeEvent {
    /// Loading flag flipped
    LoadingChanged {
        /// New flag value
        is_loading: bool,
    },
    /// Collection populated by `fetch_all`
    RecipesLoaded {
        /// Collection size after loading
        count: usize,
        /// Whether the default set was inserted
        seeded: bool,
    },
    /// Record appended
    RecipeCreated {
        /// New record ID
        recipe_id: String,
    },
    /// Record merged with a patch
    RecipeUpdated {
        /// Updated record ID
        recipe_id: String,
    },
    /// Record removed
    RecipeDeleted {
        /// Removed record ID
        recipe_id: String,
    },
    /// Favorite membership flipped
    FavoriteToggled {
        /// Identity whose favorites changed
        user_id: String,
        /// Recipe toggled
        recipe_id: String,
        /// Membership after the toggle
        is_favorite: bool,
    },
    /// Last-error message set
    ErrorRaised {
        /// Display message
        message: String,
    },
}

/// How a session was established
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionAction {
    /// Existing account signed in
    Login,
    /// New account signed up
    Register,
}

/// Identity store change
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionEvent {
    /// Identity set (possibly replacing another)
    LoggedIn {
        /// New identity ID
        user_id: String,
        /// Login or register
        action: SessionAction,
    },
    /// Identity cleared
    LoggedOut {
        /// Identity that signed out, if one was present
        user_id: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_publish_reaches_subscribers_in_order() {
        let stream = EventStream::<RecipeEvent>::new(8);
        let mut rx = stream.subscribe();
        assert_eq!(stream.subscriber_count(), 1);

        stream.publish(RecipeEvent::RecipeCreated {
            recipe_id: "a".into(),
        });
        stream.publish(RecipeEvent::RecipeDeleted {
            recipe_id: "a".into(),
        });

        assert_eq!(
            rx.recv().await.unwrap(),
            RecipeEvent::RecipeCreated {
                recipe_id: "a".into()
            }
        );
        assert_eq!(
            rx.recv().await.unwrap(),
            RecipeEvent::RecipeDeleted {
                recipe_id: "a".into()
            }
        );
    }

    #[test]
    fn test_publish_without_subscribers_is_harmless() {
        let stream = EventStream::<SessionEvent>::default();
        let delivered = stream.publish(SessionEvent::LoggedOut { user_id: None });
        assert_eq!(delivered, 0);
    }

    #[test]
    fn test_event_serialization_tag() {
        let json = serde_json::to_value(SessionEvent::LoggedIn {
            user_id: "user1".into(),
            action: SessionAction::Register,
        })
        .unwrap();
        assert_eq!(json["type"], "logged_in");
        assert_eq!(json["action"], "register");
    }
}
