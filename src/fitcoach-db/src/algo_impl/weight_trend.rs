use fitcoach_algos::{WeightPoint, WeightTrend, WeightTrendAnalyzer};

use crate::DatabaseHandler;

impl DatabaseHandler {
    pub async fn analyze_weight_trend(&self, client_id: i32) -> anyhow::Result<Option<WeightTrend>> {
        let points = self
            .weight_history(client_id)
            .await?
            .into_iter()
            .map(|log| WeightPoint {
                date: log.date,
                weight: log.weight,
            })
            .collect();

        Ok(WeightTrendAnalyzer::analyze(points))
    }
}
