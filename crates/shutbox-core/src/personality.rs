//! End-of-game feedback: the score strategy and its personalities.

use crate::board::Board;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Turns a final board into something to show the player.
///
/// Has no effect on the rules; the engine only calls it at terminal states.
pub trait ScoreBehavior {
    type Output: fmt::Display;

    fn score(&self, board: &Board) -> Self::Output;
}

/// Tone of the feedback messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Personality {
    #[default]
    Normal,
    Friendly,
    Evil,
}

/// The fixed messages of one personality
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Messages {
    /// More than three tiles left
    pub bad_attempt: &'static str,
    /// Two or three tiles left
    pub ok_attempt: &'static str,
    /// One tile left
    pub good_attempt: &'static str,
    pub win: &'static str,
}

const NORMAL: Messages = Messages {
    bad_attempt: "Poor attempt! Try again!",
    ok_attempt: "Fair attempt! Try again!",
    good_attempt: "Soooo close! Try again!",
    win: "Congratulations, you have shut the box!",
};

const FRIENDLY: Messages = Messages {
    bad_attempt: "Oh no! You can do better than that!",
    ok_attempt: "Not bad! Try again!",
    good_attempt: "So close! Try again!",
    win: "Congratulations, you have shut the box!",
};

const EVIL: Messages = Messages {
    bad_attempt: "Pathetic. The box laughs at you.",
    ok_attempt: "Almost competent. Almost.",
    good_attempt: "One tile short. How delicious.",
    win: "Fine. You shut the box. Don't get used to it.",
};

impl Personality {
    pub const ALL: [Personality; 3] = [
        Personality::Normal,
        Personality::Friendly,
        Personality::Evil,
    ];

    pub fn messages(&self) -> &'static Messages {
        match self {
            Personality::Normal => &NORMAL,
            Personality::Friendly => &FRIENDLY,
            Personality::Evil => &EVIL,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Personality::Normal => "Normal",
            Personality::Friendly => "Friendly",
            Personality::Evil => "Evil",
        }
    }
}

impl fmt::Display for Personality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown personality: {0}")]
pub struct ParsePersonalityError(pub String);

/// Accepts a name (`normal`, `friendly`, `evil`) or a menu number (`1`-`3`)
impl FromStr for Personality {
    type Err = ParsePersonalityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "1" | "normal" => Ok(Personality::Normal),
            "2" | "friendly" => Ok(Personality::Friendly),
            "3" | "evil" => Ok(Personality::Evil),
            other => Err(ParsePersonalityError(other.to_string())),
        }
    }
}

/// Scores a board by how many tiles are left, in a personality's voice
#[derive(Debug, Clone, Copy, Default)]
pub struct PersonalityFeedback {
    personality: Personality,
}

impl PersonalityFeedback {
    pub fn new(personality: Personality) -> Self {
        Self { personality }
    }

    pub fn personality(&self) -> Personality {
        self.personality
    }
}

impl ScoreBehavior for PersonalityFeedback {
    type Output = String;

    fn score(&self, board: &Board) -> String {
        let messages = self.personality.messages();
        let message = match board.tiles_left() {
            0 => messages.win,
            1 => messages.good_attempt,
            2..=3 => messages.ok_attempt,
            _ => messages.bad_attempt,
        };
        message.to_string()
    }
}
