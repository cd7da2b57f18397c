use std::fmt::Display;

use chrono::NaiveDate;
use fitcoach_types::Client;
use serde::{Deserialize, Serialize};

use crate::helpers::math::round_float;

/// Profile header numbers for a client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientOverview {
    pub client: Client,
    /// Latest logged weight, or the start weight when nothing was logged
    pub current_weight: f64,
    pub weight_change: f64,
    pub days_since_start: i64,
}

impl ClientOverview {
    pub fn new(client: Client, latest_weight: Option<f64>, today: NaiveDate) -> Self {
        let current_weight = latest_weight.unwrap_or(client.start_weight);
        Self {
            weight_change: current_weight - client.start_weight,
            days_since_start: client.days_since_start(today),
            current_weight,
            client,
        }
    }
}

impl Display for ClientOverview {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let client = &self.client;
        writeln!(f, "#{} {}", client.id, client.name)?;
        writeln!(f, "  Age: {}  Height: {}cm", client.age, client.height)?;
        writeln!(
            f,
            "  Weight: {}kg ({:+}kg since start)",
            self.current_weight,
            round_float(self.weight_change)
        )?;
        writeln!(f, "  Goal: {}", client.goal)?;
        if !client.injuries.is_empty() {
            writeln!(f, "  Injuries: {}", client.injuries)?;
        }
        write!(
            f,
            "  Started: {} ({} days)",
            client.start_date, self.days_since_start
        )
    }
}
