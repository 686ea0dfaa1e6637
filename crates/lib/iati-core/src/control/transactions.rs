use iati_model::{Status, TransactionSearchRequest, TransactionSearchResult};
use tracing::info;

use super::{ControlError, IatiControlPlane};
use crate::{normalize, query};

impl IatiControlPlane {
    /// Searches transactions with optional keyword, country, value, and date
    /// filters, returning value statistics and type/currency breakdowns.
    ///
    /// # Errors
    /// Returns `ControlError::Fetch` if the datastore request fails.
    pub async fn search_transactions(
        &self,
        request: TransactionSearchRequest,
    ) -> Result<TransactionSearchResult, ControlError> {
        let query = query::transaction_search(&request);
        let response = self.fetcher.select(&query).await?;
        let summary = normalize::transaction_summary(&response);
        info!(
            q = %query.q,
            total_transactions = summary.total_transactions,
            "transaction search complete"
        );

        Ok(TransactionSearchResult {
            status: Status::Success,
            parameters: request,
            summary,
            sample_transactions: response.into_docs(),
        })
    }
}
