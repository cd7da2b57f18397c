use fitcoach_algos::{ClientStats, SessionSummary};

use crate::DatabaseHandler;

impl DatabaseHandler {
    pub async fn client_stats(&self, client_id: i32) -> anyhow::Result<ClientStats> {
        let sessions = self.client_sessions(client_id, None).await?;
        let ids: Vec<i32> = sessions.iter().map(|session| session.id).collect();
        let counts = self.exercise_counts(&ids).await?;

        let summaries: Vec<_> = sessions
            .iter()
            .map(|session| SessionSummary {
                date: session.date,
                exercise_count: counts.get(&session.id).copied().unwrap_or_default(),
            })
            .collect();

        Ok(ClientStats::new(&summaries))
    }
}
