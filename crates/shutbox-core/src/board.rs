//! Board representation: the nine numbered tiles and their shut state.
//!
//! This module contains:
//! - The `Tile` type with its number and hidden character
//! - The `Board` holding exactly one tile per number 1..=9
//! - Shut/lookup queries used by the move resolver and the engine

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Tile number on the board (1-9)
pub type TileNumber = u8;

/// Lowest tile number
pub const MIN_TILE: TileNumber = 1;

/// Highest tile number
pub const MAX_TILE: TileNumber = 9;

/// Characters revealed under each tile once it is shut, spelling `*JACKPOT*`
const HIDDEN_CHARS: [char; 9] = ['*', 'J', 'A', 'C', 'K', 'P', 'O', 'T', '*'];

/// A single numbered tile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    number: TileNumber,
    /// Character shown in place of the number once shut
    hidden: char,
    is_shut: bool,
}

impl Tile {
    /// Create an open tile
    pub fn new(number: TileNumber, hidden: char) -> Self {
        Self {
            number,
            hidden,
            is_shut: false,
        }
    }

    pub fn number(&self) -> TileNumber {
        self.number
    }

    pub fn hidden(&self) -> char {
        self.hidden
    }

    pub fn is_shut(&self) -> bool {
        self.is_shut
    }

    /// Shut the tile. Returns false if it was already shut.
    fn shut(&mut self) -> bool {
        !std::mem::replace(&mut self.is_shut, true)
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_shut {
            write!(f, "[{}]", self.hidden)
        } else {
            write!(f, "[{}]", self.number)
        }
    }
}

/// The game board: tiles 1..=9 in ascending order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    tiles: Vec<Tile>,
}

impl Board {
    /// Create a board with every tile open
    pub fn new() -> Self {
        let tiles = (MIN_TILE..=MAX_TILE)
            .zip(HIDDEN_CHARS)
            .map(|(number, hidden)| Tile::new(number, hidden))
            .collect();
        Self { tiles }
    }

    /// Reopen every tile for a new session
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    fn tile_mut(&mut self, number: TileNumber) -> Option<&mut Tile> {
        self.tiles.iter_mut().find(|t| t.number == number)
    }

    /// Get a tile by number
    pub fn tile(&self, number: TileNumber) -> Option<&Tile> {
        self.tiles.iter().find(|t| t.number == number)
    }

    /// All tiles in ascending order
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Shut a tile.
    ///
    /// Best-effort: shutting an already-shut tile or a number that is not on
    /// the board leaves the board unchanged. Returns whether a tile changed.
    pub fn shut(&mut self, number: TileNumber) -> bool {
        self.tile_mut(number).map(Tile::shut).unwrap_or(false)
    }

    /// True only if a tile with this number exists and is shut
    pub fn is_shut(&self, number: TileNumber) -> bool {
        self.tile(number).is_some_and(Tile::is_shut)
    }

    /// Numbers of every tile still open
    pub fn unshut_numbers(&self) -> BTreeSet<TileNumber> {
        self.tiles
            .iter()
            .filter(|t| !t.is_shut)
            .map(|t| t.number)
            .collect()
    }

    /// Count of open tiles
    pub fn tiles_left(&self) -> usize {
        self.tiles.iter().filter(|t| !t.is_shut).count()
    }

    /// The box is shut when no tile is left open
    pub fn is_cleared(&self) -> bool {
        self.tiles.iter().all(Tile::is_shut)
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for tile in &self.tiles {
            write!(f, "{}", tile)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_board_has_nine_open_tiles() {
        let board = Board::new();
        assert_eq!(board.tiles().len(), 9);
        assert_eq!(board.unshut_numbers(), (1..=9).collect());
        assert!(!board.is_cleared());
    }

    #[test]
    fn test_shut_removes_from_unshut() {
        let mut board = Board::new();
        assert!(board.shut(4));
        assert!(board.is_shut(4));
        assert!(!board.unshut_numbers().contains(&4));
        assert_eq!(board.tiles_left(), 8);
    }

    #[test]
    fn test_shut_is_idempotent() {
        let mut board = Board::new();
        board.shut(7);
        let before = board.clone();

        assert!(!board.shut(7));
        assert_eq!(board, before);
    }

    #[test]
    fn test_shut_invalid_number_is_noop() {
        let mut board = Board::new();
        assert!(!board.shut(0));
        assert!(!board.shut(10));
        assert!(!board.shut(12));
        assert_eq!(board, Board::new());
        assert!(!board.is_shut(0));
        assert!(!board.is_shut(12));
    }

    #[test]
    fn test_unshut_is_complement_of_shut() {
        let mut board = Board::new();
        for n in [2, 3, 5, 8] {
            board.shut(n);
        }
        for n in MIN_TILE..=MAX_TILE {
            assert_ne!(board.is_shut(n), board.unshut_numbers().contains(&n));
        }
    }

    #[test]
    fn test_cleared_after_all_shut() {
        let mut board = Board::new();
        for n in MIN_TILE..=MAX_TILE {
            board.shut(n);
        }
        assert!(board.is_cleared());
        assert!(board.unshut_numbers().is_empty());

        board.reset();
        assert_eq!(board.tiles_left(), 9);
    }

    #[test]
    fn test_display_reveals_jackpot() {
        let mut board = Board::new();
        assert_eq!(board.to_string(), "[1][2][3][4][5][6][7][8][9]");

        for n in MIN_TILE..=MAX_TILE {
            board.shut(n);
        }
        assert_eq!(board.to_string(), "[*][J][A][C][K][P][O][T][*]");
    }
}
