pub(crate) mod progress;
pub use progress::{ExerciseProgress, ProgressAnalyzer, ProgressTrend, SessionAggregate, SessionEntries};

pub(crate) mod weight_trend;
pub use weight_trend::{WeightDirection, WeightPoint, WeightTrend, WeightTrendAnalyzer};

pub(crate) mod stats;
pub use stats::{ClientStats, SessionSummary};

pub(crate) mod overview;
pub use overview::ClientOverview;

pub mod helpers;
