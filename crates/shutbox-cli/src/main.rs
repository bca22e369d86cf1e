//! Shutbox console game.

use shutbox_core::{
    GameEngine, GameError, OutputSink, Personality, PersonalityFeedback, PlayerInput, RandomDice,
    SessionStats,
};
use std::io;
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod animation;
mod config;
mod console;

use animation::{AnimatedDice, Glyphs};
use config::{Config, SummaryFormat};
use console::{ConsoleInput, ConsoleOutput};

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let config = Config::from_env()?;
    info!(?config, "Starting Shutbox...");

    let mut input = ConsoleInput::new(io::stdin().lock());
    let mut output = ConsoleOutput::new(io::stdout()).with_colour(config.colour);

    for session in 0u64.. {
        let personality = match config.personality {
            Some(personality) => personality,
            None => match console::choose_personality(&mut input, &mut output) {
                Some(personality) => personality,
                None => break,
            },
        };

        let glyphs = match config.glyphs {
            Some(style) => style.glyphs(),
            None => match console::choose_glyphs(&mut input, &mut output) {
                Some(glyphs) => glyphs,
                None => break,
            },
        };

        let seed = config.seed.map(|seed| seed.wrapping_add(session));
        let setup = Session {
            personality,
            glyphs,
            seed,
        };
        if !play_session(&config, setup, &mut input, &mut output)? {
            break;
        }
        if !console::play_again(&mut input, &mut output) {
            break;
        }
    }

    info!("Goodbye");
    Ok(())
}

/// Choices made before a game starts
struct Session {
    personality: Personality,
    glyphs: Glyphs,
    seed: Option<u64>,
}

/// Play one game. Returns false when the player's input closed mid-game.
fn play_session(
    config: &Config,
    session: Session,
    input: &mut dyn PlayerInput,
    output: &mut dyn OutputSink,
) -> anyhow::Result<bool> {
    let Session {
        personality,
        glyphs,
        seed,
    } = session;
    let dice = match seed {
        Some(seed) => RandomDice::with_seed(seed),
        None => RandomDice::new(),
    };
    let dice = AnimatedDice::new(
        dice,
        Duration::from_millis(config.animation_ms),
        glyphs,
        io::stdout(),
    );
    let mut engine = GameEngine::new(PersonalityFeedback::new(personality)).with_dice(dice);

    let summary = config.summary;
    SessionStats::default().attach(engine.notifier_mut(), move |report| match summary {
        SummaryFormat::Text => println!("{}", report),
        SummaryFormat::Json => match serde_json::to_string(report) {
            Ok(line) => println!("{}", line),
            Err(e) => warn!(error = %e, "failed to serialize game report"),
        },
    });

    info!(%personality, ?seed, "new session");
    match engine.run(input, output) {
        Ok(outcome) => {
            info!(?outcome, tiles_left = engine.board().tiles_left(), "session finished");
            Ok(true)
        }
        Err(GameError::InputClosed) => {
            info!("input closed, leaving game");
            Ok(false)
        }
        Err(e) => Err(e.into()),
    }
}
