//! Dice rolls and the sources that produce them.

use rand::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;

/// A roll of two six-sided dice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Roll {
    pub die1: u8,
    pub die2: u8,
}

impl Roll {
    pub fn new(die1: u8, die2: u8) -> Self {
        debug_assert!((1..=6).contains(&die1) && (1..=6).contains(&die2));
        Self { die1, die2 }
    }

    /// Total of both dice (2-12)
    pub fn sum(&self) -> u8 {
        self.die1 + self.die2
    }
}

impl fmt::Display for Roll {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} + {} = {}", self.die1, self.die2, self.sum())
    }
}

/// Something that can roll two dice
pub trait DiceSource {
    fn roll(&mut self) -> Roll;
}

/// Uniformly random dice
pub struct RandomDice {
    rng: StdRng,
}

impl RandomDice {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Deterministic dice for replays
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomDice {
    fn default() -> Self {
        Self::new()
    }
}

impl DiceSource for RandomDice {
    fn roll(&mut self) -> Roll {
        Roll::new(self.rng.gen_range(1..=6), self.rng.gen_range(1..=6))
    }
}

/// Plays back a fixed list of rolls, then falls back to random dice.
pub struct ScriptedDice {
    rolls: VecDeque<Roll>,
    fallback: RandomDice,
}

impl ScriptedDice {
    pub fn new(rolls: impl IntoIterator<Item = (u8, u8)>) -> Self {
        Self {
            rolls: rolls.into_iter().map(|(a, b)| Roll::new(a, b)).collect(),
            fallback: RandomDice::with_seed(0),
        }
    }

    /// Rolls not yet played
    pub fn remaining(&self) -> usize {
        self.rolls.len()
    }
}

impl DiceSource for ScriptedDice {
    fn roll(&mut self) -> Roll {
        self.rolls
            .pop_front()
            .unwrap_or_else(|| self.fallback.roll())
    }
}
