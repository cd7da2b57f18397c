use std::fmt::Display;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::helpers::math::round_float;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightPoint {
    pub date: NaiveDate,
    pub weight: f64,
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
pub enum WeightDirection {
    Losing,
    Gaining,
    Stable,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightTrend {
    pub direction: WeightDirection,
    /// kg per week over the recent window
    pub weekly_change: f64,
    /// kg between the first and last log
    pub total_change: f64,
    pub data: Vec<WeightPoint>,
}

pub struct WeightTrendAnalyzer;

impl WeightTrendAnalyzer {
    pub const MIN_LOGS: usize = 2;
    /// Number of latest logs used for the weekly rate.
    pub const RECENT_WINDOW: usize = 7;
    /// Weekly change in kg inside which weight counts as stable.
    const STABLE_BAND: f64 = 0.2;

    /// Weekly change is scaled by `logs / 7`, so it assumes roughly one log per day.
    /// Sparse or bursty logging skews it.
    pub fn analyze(mut data: Vec<WeightPoint>) -> Option<WeightTrend> {
        if data.len() < Self::MIN_LOGS {
            return None;
        }
        data.sort_by_key(|point| point.date);

        let (first, last) = (data.first()?, data.last()?);
        let total_change = last.weight - first.weight;

        let recent = &data[data.len().saturating_sub(Self::RECENT_WINDOW)..];
        let weekly_change = match recent {
            [first, .., last] => (last.weight - first.weight) / (recent.len() as f64 / 7.0),
            _ => 0.0,
        };

        let direction = if weekly_change < -Self::STABLE_BAND {
            WeightDirection::Losing
        } else if weekly_change > Self::STABLE_BAND {
            WeightDirection::Gaining
        } else {
            WeightDirection::Stable
        };

        Some(WeightTrend {
            direction,
            weekly_change,
            total_change,
            data,
        })
    }
}

impl Display for WeightTrend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!(
            "Trend: {}\nWeekly change: {:+}kg\nTotal change: {:+}kg",
            self.direction,
            round_float(self.weekly_change),
            round_float(self.total_change),
        ))?;
        for point in &self.data {
            write!(f, "\n  {}  {}kg", point.date, point.weight)?;
        }
        Ok(())
    }
}
