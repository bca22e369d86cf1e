//! Console input/output and the menus around a game.

use crate::animation::Glyphs;
use shutbox_core::{OutputSink, Personality, PlayerInput};
use std::io::{BufRead, Write};
use tracing::warn;

/// Reads one line per selection
pub struct ConsoleInput<R> {
    reader: R,
}

impl<R: BufRead> ConsoleInput<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: BufRead> PlayerInput for ConsoleInput<R> {
    fn read_selection(&mut self) -> Option<String> {
        let mut line = String::new();
        match self.reader.read_line(&mut line) {
            Ok(0) => None,
            Ok(_) => Some(line.trim_end().to_string()),
            Err(e) => {
                warn!(error = %e, "failed to read input");
                None
            }
        }
    }
}

const RED: &str = "\x1B[31m";
const GREEN: &str = "\x1B[32m";
const RESET: &str = "\x1B[0m";

/// Writes one line per message
pub struct ConsoleOutput<W> {
    writer: W,
    colour: bool,
}

impl<W: Write> ConsoleOutput<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            colour: false,
        }
    }

    /// Colour board lines: open tiles red, shut tiles green
    pub fn with_colour(mut self, colour: bool) -> Self {
        self.colour = colour;
        self
    }
}

/// Colour a rendered board, or `None` when `text` is not one.
///
/// A board is a run of `[c]` cells; digits are open tiles.
pub fn colour_board(text: &str) -> Option<String> {
    let chars: Vec<char> = text.chars().collect();
    if chars.is_empty() || chars.len() % 3 != 0 {
        return None;
    }

    let mut coloured = String::new();
    for cell in chars.chunks(3) {
        let (open, label) = match cell {
            ['[', c, ']'] => (c.is_ascii_digit(), *c),
            _ => return None,
        };
        let colour = if open { RED } else { GREEN };
        coloured.push_str(&format!("{}[{}]{}", colour, label, RESET));
    }
    Some(coloured)
}

impl<W: Write> OutputSink for ConsoleOutput<W> {
    fn display(&mut self, text: &str) {
        let coloured = if self.colour { colour_board(text) } else { None };
        let line = coloured.as_deref().unwrap_or(text);
        if let Err(e) = writeln!(self.writer, "{}", line).and_then(|_| self.writer.flush()) {
            warn!(error = %e, "failed to write output");
        }
    }
}

/// Ask for a personality. Anything unrecognised picks the default.
///
/// Returns `None` when the input is closed.
pub fn choose_personality(
    input: &mut dyn PlayerInput,
    output: &mut dyn OutputSink,
) -> Option<Personality> {
    output.display("Welcome to Shut the Box!\n");
    output.display("Please select a personality:");
    for (i, personality) in Personality::ALL.iter().enumerate() {
        output.display(&format!("{}: {}", i + 1, personality));
    }
    output.display("\nAny other input will result in the default personality.\n");

    let line = input.read_selection()?;
    Some(line.parse().unwrap_or_else(|_| {
        warn!(input = %line, "unknown personality, using default");
        Personality::default()
    }))
}

/// Ask for the animation glyphs: emoji with two choices per element, or any
/// single character per element. Anything unrecognised keeps the standard emoji.
///
/// Returns `None` when the input is closed.
pub fn choose_glyphs(input: &mut dyn PlayerInput, output: &mut dyn OutputSink) -> Option<Glyphs> {
    output.display("Do you want to play with emojis or chars?\n1: Emojis\n2: Characters");
    output.display("Any other input will result in standard emojis.\n");

    match input.read_selection()?.trim() {
        "1" => {
            output.display("You have chosen to play with emojis.");
            Some(Glyphs {
                die1: pick_emoji(input, output, "dice 1", "🎲", "🎱")?,
                die2: pick_emoji(input, output, "dice 2", "🎲", "🎱")?,
                ground: pick_emoji(input, output, "the ground", "🟩", "🟨")?,
                space: pick_emoji(input, output, "the space", "🟦", "🟪")?,
            })
        }
        "2" => {
            output.display("You have chosen to play with characters.");
            let defaults = Glyphs::characters();
            Some(Glyphs {
                die1: pick_char(input, output, "dice 1", &defaults.die1)?,
                die2: pick_char(input, output, "dice 2", &defaults.die2)?,
                ground: pick_char(input, output, "the ground", &defaults.ground)?,
                space: pick_char(input, output, "the space", &defaults.space)?,
            })
        }
        _ => {
            output.display("You have chosen to play with the standard emojis.");
            Some(Glyphs::emoji())
        }
    }
}

fn pick_emoji(
    input: &mut dyn PlayerInput,
    output: &mut dyn OutputSink,
    element: &str,
    standard: &str,
    alternative: &str,
) -> Option<String> {
    output.display(&format!(
        "Do you want option 1 or 2 for {}?\n1: {}\n2: {}",
        element, standard, alternative
    ));
    let choice = if input.read_selection()?.trim() == "2" {
        alternative
    } else {
        standard
    };
    Some(choice.to_string())
}

/// Exactly one character, otherwise `fallback`
fn pick_char(
    input: &mut dyn PlayerInput,
    output: &mut dyn OutputSink,
    element: &str,
    fallback: &str,
) -> Option<String> {
    output.display(&format!("Please enter a char for {}", element));
    let line = input.read_selection()?;
    let mut chars = line.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c.to_string()),
        _ => {
            warn!(input = %line, element, "expected a single character");
            Some(fallback.to_string())
        }
    }
}

/// Ask whether to play another game. An empty line means yes.
pub fn play_again(input: &mut dyn PlayerInput, output: &mut dyn OutputSink) -> bool {
    output.display("Press Enter to play again or type 'exit' to quit.");
    match input.read_selection() {
        Some(line) => !line.trim().eq_ignore_ascii_case("exit"),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_console_input_reads_lines() {
        let mut input = ConsoleInput::new(Cursor::new("7\r\n 3\n"));
        assert_eq!(input.read_selection(), Some("7".to_string()));
        assert_eq!(input.read_selection(), Some(" 3".to_string()));
        assert_eq!(input.read_selection(), None);
    }

    #[test]
    fn test_console_output_writes_lines() {
        let mut buffer = Vec::new();
        {
            let mut output = ConsoleOutput::new(&mut buffer);
            output.display("[1][2]");
            output.display("You rolled 1 + 1 = 2");
        }
        assert_eq!(
            String::from_utf8(buffer).unwrap(),
            "[1][2]\nYou rolled 1 + 1 = 2\n"
        );
    }

    #[test]
    fn test_choose_personality() {
        let mut silent = |_: &str| {};
        let mut input = ConsoleInput::new(Cursor::new("3\n"));
        assert_eq!(
            choose_personality(&mut input, &mut silent),
            Some(Personality::Evil)
        );

        let mut input = ConsoleInput::new(Cursor::new("banana\n"));
        assert_eq!(
            choose_personality(&mut input, &mut silent),
            Some(Personality::Normal)
        );

        let mut input = ConsoleInput::new(Cursor::new(""));
        assert_eq!(choose_personality(&mut input, &mut silent), None);
    }

    #[test]
    fn test_console_output_colours_boards_only() {
        let mut buffer = Vec::new();
        {
            let mut output = ConsoleOutput::new(&mut buffer).with_colour(true);
            output.display("[1][*]");
            output.display("Good luck!!");
        }
        assert_eq!(
            String::from_utf8(buffer).unwrap(),
            "\x1B[31m[1]\x1B[0m\x1B[32m[*]\x1B[0m\nGood luck!!\n"
        );
    }

    #[test]
    fn test_colour_board_rejects_other_text() {
        assert_eq!(colour_board(""), None);
        assert_eq!(colour_board("abc"), None);
        assert_eq!(colour_board("[1][2"), None);
        assert!(colour_board("[1][2][3][4][5][6][7][8][9]").is_some());
    }

    #[test]
    fn test_choose_glyphs() {
        let mut silent = |_: &str| {};

        let mut input = ConsoleInput::new(Cursor::new("1\n2\n1\n2\nx\n"));
        assert_eq!(
            choose_glyphs(&mut input, &mut silent),
            Some(Glyphs {
                die1: "🎱".into(),
                die2: "🎲".into(),
                ground: "🟨".into(),
                space: "🟦".into(),
            })
        );

        let mut input = ConsoleInput::new(Cursor::new("2\n#\nab\n_\n.\n"));
        assert_eq!(
            choose_glyphs(&mut input, &mut silent),
            Some(Glyphs {
                die1: "#".into(),
                die2: "o".into(),
                ground: "_".into(),
                space: ".".into(),
            })
        );

        let mut input = ConsoleInput::new(Cursor::new("7\n"));
        assert_eq!(choose_glyphs(&mut input, &mut silent), Some(Glyphs::emoji()));

        let mut input = ConsoleInput::new(Cursor::new("2\n#\n"));
        assert_eq!(choose_glyphs(&mut input, &mut silent), None);
    }

    #[test]
    fn test_play_again() {
        let mut silent = |_: &str| {};
        let mut input = ConsoleInput::new(Cursor::new("\nEXIT\n"));
        assert!(play_again(&mut input, &mut silent));
        assert!(!play_again(&mut input, &mut silent));
        assert!(!play_again(&mut input, &mut silent));
    }
}
