//! Game events and the notifier that carries them to observers.
//!
//! The engine publishes events; observers (statistics, achievements, the
//! console) subscribe to them. The engine never knows who is listening.

use crate::game::GameOutcome;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::trace;

/// Events raised by the engine during a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A session started
    NewGame { at: NaiveDateTime },

    /// The dice were rolled
    Roll {
        /// Sum of both dice
        value: u8,
        at: NaiveDateTime,
    },

    /// The session reached a terminal state
    GameEnd {
        outcome: GameOutcome,
        at: NaiveDateTime,
    },

    /// User-facing text
    Message { text: String },
}

impl GameEvent {
    pub fn message(text: impl Into<String>) -> Self {
        GameEvent::Message { text: text.into() }
    }

    pub fn kind(&self) -> EventKind {
        match self {
            GameEvent::NewGame { .. } => EventKind::NewGame,
            GameEvent::Roll { .. } => EventKind::Roll,
            GameEvent::GameEnd { .. } => EventKind::GameEnd,
            GameEvent::Message { .. } => EventKind::Message,
        }
    }
}

/// Discriminant of a `GameEvent`, used to filter subscriptions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    NewGame,
    Roll,
    GameEnd,
    Message,
}

/// A failure raised by an event handler
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("event handler failed: {0}")]
pub struct SubscriberError(pub String);

impl SubscriberError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self(reason.into())
    }
}

/// Callback invoked for each published event
pub type Handler = Box<dyn FnMut(&GameEvent) -> Result<(), SubscriberError>>;

struct Subscription {
    /// `None` receives every event
    kind: Option<EventKind>,
    handler: Handler,
}

/// Synchronous multicast of game events.
///
/// Handlers run in registration order. A handler error stops the dispatch
/// and is returned to the publisher as-is.
#[derive(Default)]
pub struct Notifier {
    subscriptions: Vec<Subscription>,
}

impl Notifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler for every event
    pub fn subscribe<F>(&mut self, handler: F)
    where
        F: FnMut(&GameEvent) -> Result<(), SubscriberError> + 'static,
    {
        self.subscriptions.push(Subscription {
            kind: None,
            handler: Box::new(handler),
        });
    }

    /// Register a handler for one kind of event
    pub fn subscribe_to<F>(&mut self, kind: EventKind, handler: F)
    where
        F: FnMut(&GameEvent) -> Result<(), SubscriberError> + 'static,
    {
        self.subscriptions.push(Subscription {
            kind: Some(kind),
            handler: Box::new(handler),
        });
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscriptions.len()
    }

    /// Deliver an event to every matching handler
    pub fn publish(&mut self, event: &GameEvent) -> Result<(), SubscriberError> {
        let kind = event.kind();
        trace!(?kind, "publishing event");

        for sub in &mut self.subscriptions {
            if sub.kind.map_or(true, |k| k == kind) {
                (sub.handler)(event)?;
            }
        }
        Ok(())
    }
}

impl std::fmt::Debug for Notifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Notifier")
            .field("subscribers", &self.subscriptions.len())
            .finish()
    }
}
