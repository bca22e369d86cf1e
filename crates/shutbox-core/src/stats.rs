//! Statistic collectors: running aggregations over roll values and times.

use chrono::{Duration, NaiveDateTime};

/// Accumulates samples of one kind and derives an aggregate from them
pub trait StatisticCollector {
    type Sample;
    type Output;

    /// Record a sample
    fn collect(&mut self, sample: Self::Sample);
    /// Drop every sample
    fn reset(&mut self);
    /// Aggregate of the collected samples; a fixed default when empty
    fn result(&self) -> Self::Output;
}

/// Collects roll sums.
///
/// The result is the mean of the collected values halved, which is the
/// per-die average of a two-dice roll. Empty collectors report 0.
#[derive(Debug, Clone, Default)]
pub struct RollCollector {
    values: Vec<f64>,
}

impl RollCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl StatisticCollector for RollCollector {
    type Sample = f64;
    type Output = f64;

    fn collect(&mut self, sample: f64) {
        self.values.push(sample);
    }

    fn reset(&mut self) {
        self.values.clear();
    }

    fn result(&self) -> f64 {
        if self.values.is_empty() {
            return 0.0;
        }
        let mean = self.values.iter().sum::<f64>() / self.values.len() as f64;
        mean / 2.0
    }
}

/// Collects event timestamps
#[derive(Debug, Clone, Default)]
pub struct TimeCollector {
    values: Vec<NaiveDateTime>,
}

impl TimeCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Average gap between consecutive samples: (last - first) / (count - 1).
    /// Zero with fewer than two samples.
    pub fn average_interval(&self) -> Duration {
        let (Some(first), Some(last)) = (self.values.iter().min(), self.values.iter().max())
        else {
            return Duration::zero();
        };
        if self.values.len() < 2 {
            return Duration::zero();
        }
        (*last - *first) / (self.values.len() as i32 - 1)
    }
}

impl StatisticCollector for TimeCollector {
    type Sample = NaiveDateTime;
    type Output = NaiveDateTime;

    fn collect(&mut self, sample: NaiveDateTime) {
        self.values.push(sample);
    }

    fn reset(&mut self) {
        self.values.clear();
    }

    /// The earliest timestamp collected
    fn result(&self) -> NaiveDateTime {
        self.values.iter().min().copied().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, 15)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    #[test]
    fn test_roll_average_is_halved() {
        let mut rolls = RollCollector::new();
        rolls.collect(4.0);
        rolls.collect(6.0);
        assert_eq!(rolls.result(), 2.5);
    }

    #[test]
    fn test_empty_roll_collector_is_zero() {
        let rolls = RollCollector::new();
        assert_eq!(rolls.result(), 0.0);
    }

    #[test]
    fn test_roll_reset() {
        let mut rolls = RollCollector::new();
        rolls.collect(12.0);
        rolls.reset();
        assert!(rolls.is_empty());
        rolls.collect(2.0);
        assert_eq!(rolls.result(), 1.0);
    }

    #[test]
    fn test_single_time_sample() {
        let mut times = TimeCollector::new();
        times.collect(at(14, 0));
        assert_eq!(times.result(), at(14, 0));
        assert_eq!(times.average_interval(), Duration::zero());
    }

    #[test]
    fn test_two_samples_ten_minutes_apart() {
        let mut times = TimeCollector::new();
        times.collect(at(14, 0));
        times.collect(at(14, 10));
        assert_eq!(times.average_interval(), Duration::minutes(10));
    }

    #[test]
    fn test_average_interval_over_many_samples() {
        let mut times = TimeCollector::new();
        for m in [0, 1, 5, 9] {
            times.collect(at(8, m));
        }
        assert_eq!(times.average_interval(), Duration::minutes(3));
    }

    #[test]
    fn test_time_result_is_earliest() {
        let mut times = TimeCollector::new();
        times.collect(at(10, 30));
        times.collect(at(9, 15));
        times.collect(at(11, 0));
        assert_eq!(times.result(), at(9, 15));
    }

    #[test]
    fn test_empty_time_collector_defaults() {
        let times = TimeCollector::new();
        assert_eq!(times.result(), NaiveDateTime::default());
        assert_eq!(times.average_interval(), Duration::zero());
    }

    #[test]
    fn test_reset_then_new_game_timestamp() {
        let mut times = TimeCollector::new();
        times.collect(at(1, 0));
        times.collect(at(2, 0));
        times.reset();
        times.collect(at(21, 0));
        assert_eq!(times.len(), 1);
        assert_eq!(times.result(), at(21, 0));
    }
}
