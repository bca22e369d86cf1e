//! Session statistics subscriber and the end-of-game report.
//!
//! `SessionStats` listens to the engine's events: it resets on `NewGame`,
//! samples every `Roll`, and at `GameEnd` evaluates achievements and builds
//! a `GameReport`.

use crate::achievements::AchievementSet;
use crate::events::{GameEvent, Notifier};
use crate::game::GameOutcome;
use crate::stats::{RollCollector, StatisticCollector, TimeCollector};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use tracing::debug;

/// Summary of a finished game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameReport {
    pub outcome: GameOutcome,
    /// Halved mean of the roll sums
    pub average_roll: f64,
    pub started: NaiveDateTime,
    pub ended: NaiveDateTime,
    pub average_roll_interval_ms: i64,
    /// Names of unlocked achievements
    pub achievements: Vec<String>,
}

impl fmt::Display for GameReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f)?;
        writeln!(f, "STATISTICS:")?;
        writeln!(f, "Average Roll: {}", self.average_roll)?;
        writeln!(f, "Game started: {}", self.started.format("%Y-%m-%d %H:%M:%S"))?;
        writeln!(f, "Game ended: {}", self.ended.format("%Y-%m-%d %H:%M:%S"))?;
        writeln!(
            f,
            "Average Roll Time in milliseconds: {}",
            self.average_roll_interval_ms
        )?;
        writeln!(f)?;
        writeln!(f, "ACHIEVEMENTS:")?;
        if self.achievements.is_empty() {
            writeln!(f, "No achievements unlocked this game.")?;
        }
        for name in &self.achievements {
            writeln!(f, "Achievement Unlocked: {}", name)?;
        }
        write!(f, "Thanks for playing!")
    }
}

/// Statistics and achievements for the current session
#[derive(Debug)]
pub struct SessionStats {
    rolls: RollCollector,
    times: TimeCollector,
    achievements: AchievementSet,
    last_report: Option<GameReport>,
}

impl SessionStats {
    pub fn new(achievements: AchievementSet) -> Self {
        Self {
            rolls: RollCollector::new(),
            times: TimeCollector::new(),
            achievements,
            last_report: None,
        }
    }

    /// Subscribe to `notifier`. `on_report` is called with every report.
    ///
    /// Returns a shared handle so the caller can read the statistics after
    /// a game.
    pub fn attach<F>(self, notifier: &mut Notifier, mut on_report: F) -> Rc<RefCell<Self>>
    where
        F: FnMut(&GameReport) + 'static,
    {
        let stats = Rc::new(RefCell::new(self));
        let handle = Rc::clone(&stats);
        notifier.subscribe(move |event| {
            let report = handle.borrow_mut().observe(event);
            if let Some(report) = report {
                on_report(&report);
            }
            Ok(())
        });
        stats
    }

    /// Apply one event. Returns the report when the event ends the game.
    pub fn observe(&mut self, event: &GameEvent) -> Option<GameReport> {
        match event {
            GameEvent::NewGame { at } => {
                self.rolls.reset();
                self.times.reset();
                self.times.collect(*at);
                self.last_report = None;
                None
            }
            GameEvent::Roll { value, at } => {
                self.rolls.collect(f64::from(*value));
                self.times.collect(*at);
                None
            }
            GameEvent::GameEnd { outcome, at } => {
                let report = self.report(*outcome, *at);
                debug!(
                    ?outcome,
                    unlocked = report.achievements.len(),
                    "game report ready"
                );
                self.last_report = Some(report.clone());
                Some(report)
            }
            GameEvent::Message { .. } => None,
        }
    }

    fn report(&self, outcome: GameOutcome, ended: NaiveDateTime) -> GameReport {
        let average_roll = self.rolls.result();
        let started = self.times.result();
        GameReport {
            outcome,
            average_roll,
            started,
            ended,
            average_roll_interval_ms: self.times.average_interval().num_milliseconds(),
            achievements: self.achievements.evaluate(average_roll, started),
        }
    }

    pub fn rolls(&self) -> &RollCollector {
        &self.rolls
    }

    pub fn times(&self) -> &TimeCollector {
        &self.times
    }

    pub fn last_report(&self) -> Option<&GameReport> {
        self.last_report.as_ref()
    }
}

impl Default for SessionStats {
    fn default() -> Self {
        Self::new(AchievementSet::standard())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 2, 29)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    #[test]
    fn test_report_after_full_game() {
        let mut stats = SessionStats::default();
        assert!(stats.observe(&GameEvent::NewGame { at: at(23, 0) }).is_none());
        stats.observe(&GameEvent::Roll {
            value: 4,
            at: at(23, 2),
        });
        stats.observe(&GameEvent::Roll {
            value: 6,
            at: at(23, 4),
        });

        let report = stats
            .observe(&GameEvent::GameEnd {
                outcome: GameOutcome::Lost,
                at: at(23, 5),
            })
            .unwrap();

        assert_eq!(report.average_roll, 2.5);
        assert_eq!(report.started, at(23, 0));
        assert_eq!(report.ended, at(23, 5));
        assert_eq!(
            report.average_roll_interval_ms,
            Duration::minutes(2).num_milliseconds()
        );
        assert_eq!(
            report.achievements,
            vec!["Don't get into gambling.", "Night Owl"]
        );
        assert_eq!(stats.last_report(), Some(&report));
    }

    #[test]
    fn test_new_game_resets() {
        let mut stats = SessionStats::default();
        stats.observe(&GameEvent::NewGame { at: at(8, 0) });
        stats.observe(&GameEvent::Roll {
            value: 12,
            at: at(8, 1),
        });
        stats.observe(&GameEvent::NewGame { at: at(9, 0) });

        assert!(stats.rolls().is_empty());
        assert_eq!(stats.times().len(), 1);
        assert_eq!(stats.times().result(), at(9, 0));
        assert!(stats.last_report().is_none());
    }

    #[test]
    fn test_messages_are_ignored() {
        let mut stats = SessionStats::default();
        assert!(stats.observe(&GameEvent::message("Good luck!!")).is_none());
        assert!(stats.rolls().is_empty());
    }

    #[test]
    fn test_attach_delivers_reports() {
        let mut notifier = Notifier::new();
        let reports = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&reports);
        let stats = SessionStats::default().attach(&mut notifier, move |r| {
            sink.borrow_mut().push(r.clone());
        });

        notifier
            .publish(&GameEvent::NewGame { at: at(18, 0) })
            .unwrap();
        notifier
            .publish(&GameEvent::Roll {
                value: 12,
                at: at(18, 1),
            })
            .unwrap();
        notifier
            .publish(&GameEvent::GameEnd {
                outcome: GameOutcome::Won,
                at: at(18, 2),
            })
            .unwrap();

        assert_eq!(reports.borrow().len(), 1);
        assert_eq!(reports.borrow()[0].achievements, vec!["Weighted Dice"]);
        assert_eq!(stats.borrow().rolls().result(), 6.0);
    }

    #[test]
    fn test_report_display() {
        let report = GameReport {
            outcome: GameOutcome::Won,
            average_roll: 3.5,
            started: at(17, 0),
            ended: at(17, 3),
            average_roll_interval_ms: 1500,
            achievements: vec![],
        };
        let text = report.to_string();
        assert!(text.contains("STATISTICS:"));
        assert!(text.contains("Average Roll: 3.5"));
        assert!(text.contains("Game started: 2024-02-29 17:00:00"));
        assert!(text.contains("Average Roll Time in milliseconds: 1500"));
        assert!(text.contains("No achievements unlocked this game."));
        assert!(text.ends_with("Thanks for playing!"));
    }
}
