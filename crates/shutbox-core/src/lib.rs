//! Shutbox - a single-player Shut the Box engine
//!
//! This crate provides the core game logic for Shutbox, including:
//! - Board of nine tiles and their shut state
//! - Move legality for a dice roll
//! - Game state machine with win/loss detection
//! - Event notifier decoupling the engine from its observers
//! - Session statistics and achievements computed from the event stream
//!
//! # Architecture
//!
//! The engine is platform-agnostic and does no console I/O of its own. It
//! talks to the outside world through small traits: [`DiceSource`],
//! [`Clock`], [`OutputSink`], [`PlayerInput`] and [`ScoreBehavior`].
//! Statistics never live in the engine; [`SessionStats`] subscribes to the
//! [`Notifier`] and derives everything from published [`GameEvent`]s.
//!
//! # Modules
//!
//! - [`board`]: Tiles and the board
//! - [`dice`]: Rolls and dice sources
//! - [`clock`]: Timestamps for events
//! - [`moves`]: Legal-move resolution
//! - [`events`]: Game events and the notifier
//! - [`stats`]: Statistic collectors
//! - [`achievements`]: Achievement predicates
//! - [`session`]: Statistics subscriber and end-of-game report
//! - [`personality`]: Score feedback strategy
//! - [`game`]: Game state machine

pub mod achievements;
pub mod board;
pub mod clock;
pub mod dice;
pub mod events;
pub mod game;
pub mod moves;
pub mod personality;
pub mod session;
pub mod stats;

// Re-export commonly used types
pub use achievements::{Achievement, AchievementSet};
pub use board::{Board, Tile, TileNumber};
pub use clock::{Clock, ManualClock, SystemClock};
pub use dice::{DiceSource, RandomDice, Roll, ScriptedDice};
pub use events::{EventKind, GameEvent, Notifier, SubscriberError};
pub use game::{
    GameEngine, GameError, GameOutcome, GamePhase, OutputSink, PlayerInput, TurnRoll,
};
pub use moves::{LegalMoves, RollOutcome};
pub use personality::{ParsePersonalityError, Personality, PersonalityFeedback, ScoreBehavior};
pub use session::{GameReport, SessionStats};
pub use stats::{RollCollector, StatisticCollector, TimeCollector};
