use chrono::NaiveDate;
use fitcoach_algos::ClientOverview;

use crate::DatabaseHandler;

impl DatabaseHandler {
    /// `None` when the client does not exist.
    pub async fn client_overview(
        &self,
        client_id: i32,
        today: NaiveDate,
    ) -> anyhow::Result<Option<ClientOverview>> {
        let Some(client) = self.get_client(client_id).await? else {
            return Ok(None);
        };
        let latest = self
            .latest_weight_log(client_id)
            .await?
            .map(|log| log.weight);

        Ok(Some(ClientOverview::new(client, latest, today)))
    }
}
