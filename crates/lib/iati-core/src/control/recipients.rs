use iati_model::{Status, TopRecipientsRequest, TopRecipientsResult};
use tracing::info;

use super::{ControlError, IatiControlPlane};
use crate::{normalize, query};

impl IatiControlPlane {
    /// Ranks receiver organisations by summed transaction value.
    ///
    /// # Errors
    /// Returns `ControlError::Fetch` if the datastore request fails.
    pub async fn top_recipients(
        &self,
        request: TopRecipientsRequest,
    ) -> Result<TopRecipientsResult, ControlError> {
        let query = query::top_recipients(&request);
        let response = self.fetcher.select(&query).await?;
        let top_recipients = normalize::top_recipients(&response);
        info!(
            top_n = request.top_n,
            returned = top_recipients.len(),
            "recipient ranking complete"
        );

        Ok(TopRecipientsResult {
            status: Status::Success,
            parameters: request,
            top_recipients,
        })
    }
}
