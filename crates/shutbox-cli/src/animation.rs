//! Dice bounce animation shown before every roll.

use shutbox_core::{DiceSource, Roll};
use std::io::Write;
use std::thread;
use std::time::Duration;
use tracing::warn;

/// Height the dice are dropped from
const DROP_HEIGHT: u32 = 6;

const GRID_WIDTH: usize = 12;
const DIE1_COLUMN: usize = 3;
const DIE2_COLUMN: usize = 8;

/// Heights of a bouncing object.
///
/// Falls from `start` to 1, rises back to the reduced height, falls again,
/// losing `step` each bounce until the height reaches 0.
/// `new(3, 1)` yields `3, 2, 1, 2, 1`.
#[derive(Debug, Clone)]
pub struct BounceSequence {
    start: u32,
    step: u32,
    current: u32,
    falling: bool,
    pos: u32,
}

impl BounceSequence {
    pub fn new(start: u32, step: u32) -> Self {
        Self {
            start,
            step: step.max(1),
            current: start,
            falling: true,
            pos: start,
        }
    }

    /// Rewind to the first height
    pub fn restart(&mut self) {
        *self = Self::new(self.start, self.step);
    }
}

impl Iterator for BounceSequence {
    type Item = u32;

    fn next(&mut self) -> Option<u32> {
        loop {
            if self.current == 0 {
                return None;
            }

            if self.falling {
                let height = self.pos;
                if height <= 1 {
                    self.falling = false;
                    self.current = self.current.saturating_sub(self.step);
                    self.pos = 2;
                } else {
                    self.pos -= 1;
                }
                return Some(height);
            }

            if self.pos > self.current {
                self.falling = true;
                self.current = self.current.saturating_sub(self.step);
                self.pos = self.current;
                continue;
            }
            let height = self.pos;
            self.pos += 1;
            return Some(height);
        }
    }
}

/// What each cell of an animation frame is drawn with
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Glyphs {
    pub die1: String,
    pub die2: String,
    pub ground: String,
    pub space: String,
}

impl Glyphs {
    pub fn emoji() -> Self {
        Self {
            die1: "🎲".into(),
            die2: "🎲".into(),
            ground: "🟩".into(),
            space: "🟦".into(),
        }
    }

    pub fn characters() -> Self {
        Self {
            die1: "o".into(),
            die2: "o".into(),
            ground: "=".into(),
            space: " ".into(),
        }
    }
}

impl Default for Glyphs {
    fn default() -> Self {
        Self::emoji()
    }
}

/// One animation frame: rows from `height` down to the ground row 0
pub fn render_frame(die1: u32, die2: u32, height: u32, glyphs: &Glyphs) -> String {
    let mut frame = String::new();
    for row in (0..=height).rev() {
        for col in 0..GRID_WIDTH {
            let cell = if col == DIE1_COLUMN && row == die1 {
                &glyphs.die1
            } else if col == DIE2_COLUMN && row == die2 {
                &glyphs.die2
            } else if row == 0 {
                &glyphs.ground
            } else {
                &glyphs.space
            };
            frame.push_str(cell);
        }
        frame.push('\n');
    }
    frame
}

/// ASCII face of a die
pub fn dice_face(number: u8) -> &'static str {
    match number {
        1 => "[     ]\n[  *  ]\n[     ]",
        2 => "[*    ]\n[     ]\n[    *]",
        3 => "[*    ]\n[  *  ]\n[    *]",
        4 => "[*   *]\n[     ]\n[*   *]",
        5 => "[*   *]\n[  *  ]\n[*   *]",
        6 => "[*   *]\n[*   *]\n[*   *]",
        _ => "[ ??? ]\n[ ??? ]\n[ ??? ]",
    }
}

/// Both faces side by side
pub fn render_roll(roll: Roll) -> String {
    dice_face(roll.die1)
        .lines()
        .zip(dice_face(roll.die2).lines())
        .map(|(a, b)| format!("{}  {}", a, b))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Wraps a dice source: bounces the dice on screen, then shows the faces
pub struct AnimatedDice<D, W> {
    inner: D,
    frame_delay: Duration,
    glyphs: Glyphs,
    writer: W,
}

impl<D: DiceSource, W: Write> AnimatedDice<D, W> {
    pub fn new(inner: D, frame_delay: Duration, glyphs: Glyphs, writer: W) -> Self {
        Self {
            inner,
            frame_delay,
            glyphs,
            writer,
        }
    }

    fn emit(&mut self, text: &str) {
        if let Err(e) = write!(self.writer, "{}", text).and_then(|_| self.writer.flush()) {
            warn!(error = %e, "failed to draw dice");
        }
    }

    fn bounce(&mut self) {
        let mut die1 = BounceSequence::new(DROP_HEIGHT, 1);
        let mut die2 = BounceSequence::new(DROP_HEIGHT - 2, 1);
        let (mut h1, mut h2) = (DROP_HEIGHT, DROP_HEIGHT - 2);

        loop {
            let (next1, next2) = (die1.next(), die2.next());
            if next1.is_none() && next2.is_none() {
                break;
            }
            h1 = next1.unwrap_or(h1);
            h2 = next2.unwrap_or(h2);

            // clear screen, cursor home
            let frame = render_frame(h1, h2, DROP_HEIGHT, &self.glyphs);
            self.emit(&format!("\x1B[2J\x1B[H{}", frame));
            thread::sleep(self.frame_delay);
        }
    }
}

impl<D: DiceSource, W: Write> DiceSource for AnimatedDice<D, W> {
    fn roll(&mut self) -> Roll {
        if !self.frame_delay.is_zero() {
            self.bounce();
        }
        let roll = self.inner.roll();
        self.emit(&format!("{}\n", render_roll(roll)));
        roll
    }
}
