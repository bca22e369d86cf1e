//! Achievements: named predicates over the final session statistics.

use chrono::{NaiveDateTime, Timelike};

const HOUR: u32 = 3600;

/// A named condition on a statistic
pub struct Achievement<T> {
    name: String,
    condition: Box<dyn Fn(&T) -> bool>,
}

impl<T> Achievement<T> {
    pub fn new(name: impl Into<String>, condition: impl Fn(&T) -> bool + 'static) -> Self {
        Self {
            name: name.into(),
            condition: Box::new(condition),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_achieved(&self, value: &T) -> bool {
        (self.condition)(value)
    }
}

impl<T> std::fmt::Debug for Achievement<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Achievement").field("name", &self.name).finish()
    }
}

/// Achievements evaluated at the end of every game
#[derive(Debug, Default)]
pub struct AchievementSet {
    /// Checked against the roll collector's result
    roll: Vec<Achievement<f64>>,
    /// Checked against the time collector's result (the first timestamp)
    time: Vec<Achievement<NaiveDateTime>>,
}

impl AchievementSet {
    /// An empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in catalogue
    pub fn standard() -> Self {
        let mut set = Self::new();
        set.add_roll(Achievement::new("Weighted Dice", |avg: &f64| *avg > 5.0));
        set.add_roll(Achievement::new("Don't get into gambling.", |avg: &f64| {
            *avg < 3.0
        }));
        set.add_time(Achievement::new("Night Owl", |t: &NaiveDateTime| {
            let secs = t.num_seconds_from_midnight();
            secs > 20 * HOUR || secs < 6 * HOUR
        }));
        set.add_time(Achievement::new(
            "Shouldn't You be working??",
            |t: &NaiveDateTime| (10..16).contains(&t.hour()),
        ));
        set.add_time(Achievement::new("3l173", |t: &NaiveDateTime| {
            t.hour() == 13 && t.minute() == 37
        }));
        set
    }

    pub fn add_roll(&mut self, achievement: Achievement<f64>) {
        self.roll.push(achievement);
    }

    pub fn add_time(&mut self, achievement: Achievement<NaiveDateTime>) {
        self.time.push(achievement);
    }

    pub fn len(&self) -> usize {
        self.roll.len() + self.time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Names of unlocked achievements, roll achievements first, each group
    /// in registration order.
    pub fn evaluate(&self, roll_average: f64, first_roll: NaiveDateTime) -> Vec<String> {
        let rolls = self
            .roll
            .iter()
            .filter(|a| a.is_achieved(&roll_average))
            .map(|a| a.name.clone());
        let times = self
            .time
            .iter()
            .filter(|a| a.is_achieved(&first_roll))
            .map(|a| a.name.clone());
        rolls.chain(times).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 10)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    fn unlocked(avg: f64, time: NaiveDateTime) -> Vec<String> {
        AchievementSet::standard().evaluate(avg, time)
    }

    #[test]
    fn test_standard_catalogue_size() {
        assert_eq!(AchievementSet::standard().len(), 5);
        assert!(AchievementSet::new().is_empty());
    }

    #[test]
    fn test_night_owl() {
        assert!(unlocked(4.0, at(23, 0)).contains(&"Night Owl".to_string()));
        assert!(unlocked(4.0, at(5, 59)).contains(&"Night Owl".to_string()));
        assert!(!unlocked(4.0, at(12, 0)).contains(&"Night Owl".to_string()));
        assert!(!unlocked(4.0, at(20, 0)).contains(&"Night Owl".to_string()));
        assert!(!unlocked(4.0, at(6, 0)).contains(&"Night Owl".to_string()));
    }

    #[test]
    fn test_daytime_window() {
        let name = "Shouldn't You be working??".to_string();
        assert!(unlocked(4.0, at(10, 0)).contains(&name));
        assert!(unlocked(4.0, at(15, 59)).contains(&name));
        assert!(!unlocked(4.0, at(16, 0)).contains(&name));
        assert!(!unlocked(4.0, at(9, 59)).contains(&name));
    }

    #[test]
    fn test_easter_egg() {
        assert_eq!(
            unlocked(4.0, at(13, 37)),
            vec!["Shouldn't You be working??", "3l173"]
        );
        assert!(!unlocked(4.0, at(13, 38)).contains(&"3l173".to_string()));
    }

    #[test]
    fn test_roll_average_thresholds() {
        assert_eq!(unlocked(5.5, at(18, 0)), vec!["Weighted Dice"]);
        assert_eq!(unlocked(2.5, at(18, 0)), vec!["Don't get into gambling."]);
        assert!(unlocked(5.0, at(18, 0)).is_empty());
        assert!(unlocked(3.0, at(18, 0)).is_empty());
    }

    #[test]
    fn test_roll_achievements_listed_before_time() {
        assert_eq!(
            unlocked(1.0, at(23, 30)),
            vec!["Don't get into gambling.", "Night Owl"]
        );
    }

    #[test]
    fn test_custom_achievement() {
        let mut set = AchievementSet::new();
        set.add_roll(Achievement::new("Snake Eyes", |avg: &f64| *avg == 1.0));
        assert_eq!(set.evaluate(1.0, at(0, 0)), vec!["Snake Eyes"]);
        assert!(set.evaluate(2.0, at(0, 0)).is_empty());
    }
}
