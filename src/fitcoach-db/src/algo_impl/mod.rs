mod overview;
mod progress;
mod stats;
mod weight_trend;
