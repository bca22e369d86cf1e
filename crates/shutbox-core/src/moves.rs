//! Move legality: which tiles a roll allows the player to shut.

use crate::board::{Board, TileNumber, MAX_TILE};
use crate::dice::Roll;
use std::collections::BTreeSet;
use std::fmt;

/// The distinct tile numbers a roll allows, in ascending order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegalMoves(BTreeSet<TileNumber>);

impl LegalMoves {
    pub fn contains(&self, tile: TileNumber) -> bool {
        self.0.contains(&tile)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = TileNumber> + '_ {
        self.0.iter().copied()
    }

    pub fn to_vec(&self) -> Vec<TileNumber> {
        self.iter().collect()
    }
}

impl fmt::Display for LegalMoves {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let options: Vec<String> = self.iter().map(|n| n.to_string()).collect();
        write!(f, "{}", options.join(", "))
    }
}

/// Result of resolving a roll against the board
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RollOutcome {
    /// At least one tile can be shut; the player picks one
    Choose(LegalMoves),
    /// Nothing can be shut: the game is lost
    NoLegalMove,
}

impl RollOutcome {
    pub fn is_terminal(&self) -> bool {
        matches!(self, RollOutcome::NoLegalMove)
    }
}

/// Candidate tiles for a roll: each die and their sum, kept only if on the
/// board and still open.
pub fn legal_moves(roll: Roll, board: &Board) -> BTreeSet<TileNumber> {
    [roll.die1, roll.die2, roll.sum()]
        .into_iter()
        .filter(|&n| n <= MAX_TILE && !board.is_shut(n))
        .collect()
}

/// Resolve a roll into either a choice of moves or a loss
pub fn resolve(roll: Roll, board: &Board) -> RollOutcome {
    let moves = legal_moves(roll, board);
    if moves.is_empty() {
        RollOutcome::NoLegalMove
    } else {
        RollOutcome::Choose(LegalMoves(moves))
    }
}
