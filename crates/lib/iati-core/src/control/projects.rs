use iati_model::{ProjectSearchRequest, ProjectSearchResult, Status};
use tracing::info;

use super::{ControlError, IatiControlPlane};
use crate::{normalize, query};

impl IatiControlPlane {
    /// Searches activity titles for a keyword and summarizes sector and status
    /// breakdowns alongside a sample of matching projects.
    ///
    /// # Errors
    /// Returns `ControlError::Fetch` if the datastore request fails.
    pub async fn search_projects(
        &self,
        request: ProjectSearchRequest,
    ) -> Result<ProjectSearchResult, ControlError> {
        let query = query::project_search(&request);
        let response = self.fetcher.select(&query).await?;
        let summary = normalize::project_summary(&response);
        info!(
            keyword = %request.keyword,
            total_found = summary.total_found,
            "project search complete"
        );

        Ok(ProjectSearchResult {
            status: Status::Success,
            parameters: request,
            summary,
            sample_projects: response.into_docs(),
        })
    }
}
