//! Runtime configuration read from the environment.

use crate::animation::Glyphs;
use shutbox_core::{ParsePersonalityError, Personality};
use std::str::FromStr;
use thiserror::Error;

/// Default frame delay of the dice bounce
const DEFAULT_ANIMATION_MS: u64 = 20;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("SHUTBOX_PERSONALITY: {0}")]
    Personality(#[from] ParsePersonalityError),

    #[error("{var}: expected a non-negative integer, got {value:?}")]
    InvalidNumber { var: &'static str, value: String },

    #[error("SHUTBOX_SUMMARY: expected \"json\" or \"text\", got {0:?}")]
    InvalidSummary(String),

    #[error("SHUTBOX_GLYPHS: expected \"emoji\" or \"chars\", got {0:?}")]
    InvalidGlyphs(String),
}

/// How the end-of-game report is printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SummaryFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for SummaryFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(SummaryFormat::Text),
            "json" => Ok(SummaryFormat::Json),
            _ => Err(ConfigError::InvalidSummary(s.to_string())),
        }
    }
}

/// Which glyph set the dice animation uses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlyphStyle {
    Emoji,
    Chars,
}

impl GlyphStyle {
    pub fn glyphs(self) -> Glyphs {
        match self {
            GlyphStyle::Emoji => Glyphs::emoji(),
            GlyphStyle::Chars => Glyphs::characters(),
        }
    }
}

impl FromStr for GlyphStyle {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "emoji" | "emojis" => Ok(GlyphStyle::Emoji),
            "chars" | "characters" => Ok(GlyphStyle::Chars),
            _ => Err(ConfigError::InvalidGlyphs(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Skips the personality menu when set
    pub personality: Option<Personality>,
    /// Seed for deterministic dice
    pub seed: Option<u64>,
    /// Bounce frame delay; 0 disables the animation
    pub animation_ms: u64,
    pub summary: SummaryFormat,
    /// Skips the glyph menu when set
    pub glyphs: Option<GlyphStyle>,
    /// Red/green board tiles
    pub colour: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            personality: None,
            seed: None,
            animation_ms: DEFAULT_ANIMATION_MS,
            summary: SummaryFormat::Text,
            glyphs: None,
            colour: true,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build a config from any variable lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Config::default();

        if let Some(value) = lookup("SHUTBOX_PERSONALITY") {
            config.personality = Some(value.parse()?);
        }
        if let Some(value) = lookup("SHUTBOX_SEED") {
            config.seed = Some(parse_number("SHUTBOX_SEED", &value)?);
        }
        if let Some(value) = lookup("SHUTBOX_ANIMATION_MS") {
            config.animation_ms = parse_number("SHUTBOX_ANIMATION_MS", &value)?;
        }
        if let Some(value) = lookup("SHUTBOX_SUMMARY") {
            config.summary = value.parse()?;
        }
        if let Some(value) = lookup("SHUTBOX_GLYPHS") {
            config.glyphs = Some(value.parse()?);
        }
        if lookup("NO_COLOR").is_some_and(|value| !value.is_empty()) {
            config.colour = false;
        }

        Ok(config)
    }
}

fn parse_number(var: &'static str, value: &str) -> Result<u64, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidNumber {
            var,
            value: value.to_string(),
        })
}
