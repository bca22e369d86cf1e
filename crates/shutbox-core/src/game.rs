//! Core game state machine.
//!
//! This module contains the `GameEngine`, which drives one session at a time:
//! roll, resolve the legal moves, apply the player's selection, check for a
//! terminal state, and publish events for any observers.
//!
//! Phases flow `NotStarted -> InTurn -> (InTurn | Won | Lost)`. `Won` and
//! `Lost` end the session; `start_game` begins a fresh one.

use crate::board::{Board, TileNumber};
use crate::clock::{Clock, SystemClock};
use crate::dice::{DiceSource, RandomDice, Roll};
use crate::events::{GameEvent, Notifier, SubscriberError};
use crate::moves::{self, LegalMoves, RollOutcome};
use crate::personality::ScoreBehavior;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

const GOOD_LUCK: &str = "Good luck!!";
const INVALID_SELECTION: &str = "Invalid selection. Please choose one of the available options:";

/// Game phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// No session has been started
    NotStarted,
    /// A session is running
    InTurn,
    /// Every tile was shut
    Won,
    /// A roll left no legal move
    Lost,
}

impl GamePhase {
    pub fn is_terminal(&self) -> bool {
        self.outcome().is_some()
    }

    pub fn outcome(&self) -> Option<GameOutcome> {
        match self {
            GamePhase::Won => Some(GameOutcome::Won),
            GamePhase::Lost => Some(GameOutcome::Lost),
            GamePhase::NotStarted | GamePhase::InTurn => None,
        }
    }
}

/// How a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOutcome {
    Won,
    Lost,
}

impl From<GameOutcome> for GamePhase {
    fn from(outcome: GameOutcome) -> Self {
        match outcome {
            GameOutcome::Won => GamePhase::Won,
            GameOutcome::Lost => GamePhase::Lost,
        }
    }
}

/// Errors that can occur when driving the engine
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("A game is already in progress")]
    AlreadyStarted,

    #[error("No game has been started")]
    NotStarted,

    #[error("Game is over")]
    GameOver,

    #[error("Dice already rolled, choose a tile first")]
    RollPending,

    #[error("Roll the dice before choosing a tile")]
    NoPendingRoll,

    #[error("Tile {tile} is not a legal move (options: {options:?})")]
    InvalidSelection {
        tile: TileNumber,
        options: Vec<TileNumber>,
    },

    #[error("Player input closed")]
    InputClosed,

    #[error(transparent)]
    Subscriber(#[from] SubscriberError),
}

/// Where the engine writes prompts and board views
pub trait OutputSink {
    fn display(&mut self, text: &str);
}

impl<F: FnMut(&str)> OutputSink for F {
    fn display(&mut self, text: &str) {
        self(text)
    }
}

/// Where the engine reads the player's tile choice.
///
/// `None` means the input is closed.
pub trait PlayerInput {
    fn read_selection(&mut self) -> Option<String>;
}

impl<I: Iterator<Item = String>> PlayerInput for I {
    fn read_selection(&mut self) -> Option<String> {
        self.next()
    }
}

/// The dice of the current turn and what they allow
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnRoll {
    pub roll: Roll,
    pub outcome: RollOutcome,
}

#[derive(Debug, Clone)]
struct PendingRoll {
    roll: Roll,
    moves: LegalMoves,
}

/// Drives a single-player session
pub struct GameEngine<S: ScoreBehavior> {
    board: Board,
    phase: GamePhase,
    /// Roll waiting for a selection
    pending: Option<PendingRoll>,
    notifier: Notifier,
    /// Message texts not yet shown by the blocking driver
    outbox: Vec<String>,
    dice: Box<dyn DiceSource>,
    clock: Box<dyn Clock>,
    scorer: S,
}

impl<S: ScoreBehavior> GameEngine<S> {
    /// Create an engine with random dice and the system clock
    pub fn new(scorer: S) -> Self {
        Self {
            board: Board::new(),
            phase: GamePhase::NotStarted,
            pending: None,
            notifier: Notifier::new(),
            outbox: Vec::new(),
            dice: Box::new(RandomDice::new()),
            clock: Box::new(SystemClock),
            scorer,
        }
    }

    pub fn with_dice(mut self, dice: impl DiceSource + 'static) -> Self {
        self.dice = Box::new(dice);
        self
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn scorer(&self) -> &S {
        &self.scorer
    }

    /// Legal moves of the roll waiting for a selection, if any
    pub fn pending_moves(&self) -> Option<&LegalMoves> {
        self.pending.as_ref().map(|p| &p.moves)
    }

    /// Register observers here before starting a game
    pub fn notifier_mut(&mut self) -> &mut Notifier {
        &mut self.notifier
    }

    fn publish(&mut self, event: GameEvent) -> Result<(), GameError> {
        if let GameEvent::Message { text } = &event {
            self.outbox.push(text.clone());
        }
        self.notifier.publish(&event)?;
        Ok(())
    }

    fn ensure_in_turn(&self) -> Result<(), GameError> {
        match self.phase {
            GamePhase::InTurn => Ok(()),
            GamePhase::NotStarted => Err(GameError::NotStarted),
            GamePhase::Won | GamePhase::Lost => Err(GameError::GameOver),
        }
    }

    /// Begin a new session on a fresh board
    pub fn start_game(&mut self) -> Result<(), GameError> {
        if self.phase == GamePhase::InTurn {
            return Err(GameError::AlreadyStarted);
        }

        self.board.reset();
        self.pending = None;
        self.outbox.clear();
        self.phase = GamePhase::InTurn;
        debug!("new game started");

        let at = self.clock.now();
        self.publish(GameEvent::NewGame { at })?;
        self.publish(GameEvent::message(GOOD_LUCK))
    }

    /// Roll the dice for this turn.
    ///
    /// A roll with no legal move ends the game as `Lost`.
    pub fn roll(&mut self) -> Result<TurnRoll, GameError> {
        self.ensure_in_turn()?;
        if self.pending.is_some() {
            return Err(GameError::RollPending);
        }

        let roll = self.dice.roll();
        let outcome = moves::resolve(roll, &self.board);
        debug!(die1 = roll.die1, die2 = roll.die2, ?outcome, "dice rolled");

        match &outcome {
            RollOutcome::Choose(moves) => {
                self.pending = Some(PendingRoll {
                    roll,
                    moves: moves.clone(),
                });
            }
            RollOutcome::NoLegalMove => {
                self.finish(GameOutcome::Lost);
                self.publish_roll(roll)?;
                self.announce_end(GameOutcome::Lost)?;
            }
        }

        Ok(TurnRoll { roll, outcome })
    }

    /// Shut one of the tiles the pending roll allows
    pub fn select(&mut self, tile: TileNumber) -> Result<GamePhase, GameError> {
        self.ensure_in_turn()?;
        let pending = self.pending.as_ref().ok_or(GameError::NoPendingRoll)?;
        if !pending.moves.contains(tile) {
            warn!(tile, options = %pending.moves, "rejected selection");
            return Err(GameError::InvalidSelection {
                tile,
                options: pending.moves.to_vec(),
            });
        }

        let roll = pending.roll;
        self.pending = None;
        self.board.shut(tile);
        debug!(tile, left = self.board.tiles_left(), "tile shut");

        // The phase is settled before any observer runs
        let cleared = self.board.is_cleared();
        if cleared {
            self.finish(GameOutcome::Won);
        }
        self.publish_roll(roll)?;
        if cleared {
            self.announce_end(GameOutcome::Won)?;
        }
        Ok(self.phase)
    }

    fn publish_roll(&mut self, roll: Roll) -> Result<(), GameError> {
        let at = self.clock.now();
        self.publish(GameEvent::Roll {
            value: roll.sum(),
            at,
        })
    }

    fn finish(&mut self, outcome: GameOutcome) {
        self.phase = outcome.into();
        self.pending = None;
        debug!(?outcome, left = self.board.tiles_left(), "game over");
    }

    /// Publish the score message and `GameEnd`
    fn announce_end(&mut self, outcome: GameOutcome) -> Result<(), GameError> {
        let score = self.scorer.score(&self.board);
        let text = match outcome {
            GameOutcome::Won => score.to_string(),
            GameOutcome::Lost => format!("GAME OVER!\n\n{}", score),
        };
        self.publish(GameEvent::message(text))?;

        let at = self.clock.now();
        self.publish(GameEvent::GameEnd { outcome, at })
    }

    /// Show queued message texts on `output`
    fn flush_messages(&mut self, output: &mut dyn OutputSink) {
        for text in self.outbox.drain(..) {
            output.display(&text);
        }
    }

    /// Play one turn: show the board, roll, and ask for a tile until the
    /// player names a legal one.
    pub fn play_turn(
        &mut self,
        input: &mut dyn PlayerInput,
        output: &mut dyn OutputSink,
    ) -> Result<GamePhase, GameError> {
        self.ensure_in_turn()?;
        self.flush_messages(output);
        output.display(&self.board.to_string());

        let TurnRoll { roll, outcome } = match self.roll() {
            Ok(turn) => turn,
            Err(e) => {
                self.flush_messages(output);
                return Err(e);
            }
        };
        output.display(&format!("You rolled {}", roll));

        let moves = match outcome {
            RollOutcome::Choose(moves) => moves,
            RollOutcome::NoLegalMove => {
                self.flush_messages(output);
                return Ok(self.phase);
            }
        };

        output.display(&format!(
            "Options: {}. Enter the number of the tile you want to shut:",
            moves
        ));
        loop {
            let line = input.read_selection().ok_or(GameError::InputClosed)?;
            match line.trim().parse::<TileNumber>() {
                Ok(tile) if moves.contains(tile) => {
                    let phase = self.select(tile);
                    self.flush_messages(output);
                    return phase;
                }
                _ => {
                    warn!(input = %line.trim(), "invalid selection");
                    output.display(INVALID_SELECTION);
                }
            }
        }
    }

    /// Start a session and play it to the end
    pub fn run(
        &mut self,
        input: &mut dyn PlayerInput,
        output: &mut dyn OutputSink,
    ) -> Result<GameOutcome, GameError> {
        let started = self.start_game();
        self.flush_messages(output);
        started?;
        loop {
            if let Some(outcome) = self.play_turn(input, output)?.outcome() {
                return Ok(outcome);
            }
        }
    }
}

impl<S: ScoreBehavior + std::fmt::Debug> std::fmt::Debug for GameEngine<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameEngine")
            .field("board", &self.board)
            .field("phase", &self.phase)
            .field("pending", &self.pending)
            .field("notifier", &self.notifier)
            .field("scorer", &self.scorer)
            .finish()
    }
}
