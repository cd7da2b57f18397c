use std::{collections::BTreeMap, fmt::Display};

use chrono::NaiveDate;
use fitcoach_types::ExerciseSet;
use serde::{Deserialize, Serialize};

use crate::helpers::{
    math::{mean, round_float},
    text::{capitalize_first, normalize_exercise_name},
};

/// A session together with every set logged in it.
#[derive(Debug, Clone)]
pub struct SessionEntries {
    pub session_id: i32,
    pub date: NaiveDate,
    pub entries: Vec<ExerciseSet>,
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ProgressTrend {
    Improving,
    Stagnant,
    Declining,
}

/// Best weight and summed volume of one exercise within one session.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SessionAggregate {
    pub date: NaiveDate,
    pub max_weight: f64,
    pub total_volume: f64,
}

impl SessionAggregate {
    fn first(date: NaiveDate, set: &ExerciseSet) -> Self {
        Self {
            date,
            max_weight: set.weight,
            total_volume: set.volume(),
        }
    }

    fn add(&mut self, set: &ExerciseSet) {
        self.max_weight = self.max_weight.max(set.weight);
        self.total_volume += set.volume();
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseProgress {
    pub exercise_name: String,
    pub trend: ProgressTrend,
    /// Newest session first
    pub last_three_sessions: Vec<SessionAggregate>,
    /// `None` when the oldest of the three sessions had no volume
    pub change_percent: Option<f64>,
    pub suggestion: Option<String>,
}

/// Classifies per-exercise volume trends over a client's latest sessions.
///
/// Only the [`ProgressAnalyzer::SESSION_WINDOW`] most recent sessions are looked at. An
/// exercise is reported once it shows up in at least [`ProgressAnalyzer::MIN_SESSIONS`] of
/// them, comparing the mean volume of its two latest sessions with the third latest.
pub struct ProgressAnalyzer {
    sessions: Vec<SessionEntries>,
}

impl ProgressAnalyzer {
    pub const SESSION_WINDOW: usize = 10;
    pub const MIN_SESSIONS: usize = 3;

    /// Change in percent above which volume counts as moving.
    const CHANGE_THRESHOLD: f64 = 5.0;

    pub fn new(mut sessions: Vec<SessionEntries>) -> Self {
        sessions.sort_by(|a, b| {
            b.date
                .cmp(&a.date)
                .then_with(|| b.session_id.cmp(&a.session_id))
        });
        sessions.truncate(Self::SESSION_WINDOW);
        Self { sessions }
    }

    pub fn analyze(&self) -> Vec<ExerciseProgress> {
        if self.sessions.len() < Self::MIN_SESSIONS {
            return Vec::new();
        }

        self.history()
            .into_iter()
            .filter(|(_, history)| history.len() >= Self::MIN_SESSIONS)
            .map(|(name, history)| Self::progress(&name, history))
            .collect()
    }

    /// Per exercise aggregates, one per session, newest session first.
    fn history(&self) -> BTreeMap<String, Vec<SessionAggregate>> {
        let mut history: BTreeMap<String, Vec<SessionAggregate>> = BTreeMap::new();

        for session in &self.sessions {
            let mut in_session: BTreeMap<String, SessionAggregate> = BTreeMap::new();
            for set in &session.entries {
                let name = normalize_exercise_name(&set.name);
                if name.is_empty() {
                    continue;
                }

                in_session
                    .entry(name)
                    .and_modify(|aggregate| aggregate.add(set))
                    .or_insert_with(|| SessionAggregate::first(session.date, set));
            }

            for (name, aggregate) in in_session {
                history.entry(name).or_default().push(aggregate);
            }
        }

        history
    }

    fn progress(name: &str, mut history: Vec<SessionAggregate>) -> ExerciseProgress {
        history.truncate(Self::MIN_SESSIONS);
        let (trend, change_percent) = Self::classify(&history);

        let suggestion = match trend {
            ProgressTrend::Improving => None,
            ProgressTrend::Declining => Some(format!(
                "Consider deloading or checking recovery for {name}"
            )),
            ProgressTrend::Stagnant => Some(format!(
                "No progress on {name} in last 3 sessions. Consider progressive overload or variation."
            )),
        };

        ExerciseProgress {
            exercise_name: capitalize_first(name),
            trend,
            last_three_sessions: history,
            change_percent,
            suggestion,
        }
    }

    fn classify(history: &[SessionAggregate]) -> (ProgressTrend, Option<f64>) {
        let [latest, previous, older, ..] = history else {
            return (ProgressTrend::Stagnant, None);
        };

        let avg_recent = mean(&[latest.total_volume, previous.total_volume]);
        let avg_older = older.total_volume;

        // No baseline to compare against, any recent volume is progress
        if avg_older == 0.0 {
            let trend = if avg_recent > 0.0 {
                ProgressTrend::Improving
            } else {
                ProgressTrend::Stagnant
            };
            return (trend, None);
        }

        let change_percent = (avg_recent - avg_older) / avg_older * 100.0;
        let trend = if change_percent > Self::CHANGE_THRESHOLD {
            ProgressTrend::Improving
        } else if change_percent < -Self::CHANGE_THRESHOLD {
            ProgressTrend::Declining
        } else {
            ProgressTrend::Stagnant
        };

        (trend, Some(change_percent))
    }
}

impl Display for ExerciseProgress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.exercise_name, self.trend)?;
        if let Some(change) = self.change_percent {
            write!(f, " ({:+}%)", round_float(change))?;
        }
        for session in &self.last_three_sessions {
            write!(
                f,
                "\n  {}  max {}kg  volume {}",
                session.date,
                session.max_weight,
                round_float(session.total_volume)
            )?;
        }
        if let Some(suggestion) = &self.suggestion {
            write!(f, "\n  -> {suggestion}")?;
        }
        Ok(())
    }
}
