use std::fmt::Display;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::helpers::math::rounded_ratio;

/// Session date and the number of sets logged in it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSummary {
    pub date: NaiveDate,
    pub exercise_count: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientStats {
    pub total_sessions: u64,
    pub total_exercises: u64,
    pub last_session_date: Option<NaiveDate>,
    pub avg_session_exercises: u64,
}

impl ClientStats {
    pub fn new(sessions: &[SessionSummary]) -> Self {
        let total_sessions = sessions.len() as u64;
        let total_exercises = sessions.iter().map(|s| s.exercise_count).sum();

        Self {
            total_sessions,
            total_exercises,
            last_session_date: sessions.iter().map(|s| s.date).max(),
            avg_session_exercises: rounded_ratio(total_exercises, total_sessions),
        }
    }
}

impl Display for ClientStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let last = self
            .last_session_date
            .map(|date| date.to_string())
            .unwrap_or_else(|| "-".to_string());

        f.write_fmt(format_args!(
            "Sessions: {}\nExercises: {}\nLast session: {}\nAvg exercises per session: {}",
            self.total_sessions, self.total_exercises, last, self.avg_session_exercises
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(day: u32, exercise_count: u64) -> SessionSummary {
        SessionSummary {
            date: NaiveDate::from_ymd_opt(2025, 5, day).unwrap(),
            exercise_count,
        }
    }

    #[test]
    fn empty_stats() {
        assert_eq!(ClientStats::new(&[]), ClientStats::default());
    }

    #[test]
    fn sums_and_rounds() {
        let stats = ClientStats::new(&[
            summary(2, 3),
            summary(9, 5),
            summary(5, 4),
            summary(7, 4),
        ]);

        assert_eq!(stats.total_sessions, 4);
        assert_eq!(stats.total_exercises, 16);
        assert_eq!(stats.avg_session_exercises, 4);
        assert_eq!(
            stats.last_session_date,
            Some(NaiveDate::from_ymd_opt(2025, 5, 9).unwrap())
        );
    }

    #[test]
    fn average_rounds_half_up() {
        let stats = ClientStats::new(&[summary(1, 1), summary(2, 2)]);
        assert_eq!(stats.avg_session_exercises, 2);
    }
}
