use iati_core::control::ControlError;
use iati_core::validate;
use iati_model::{
    DEFAULT_FACET_LIMIT,
    DEFAULT_SAMPLE_SIZE,
    DEFAULT_TOP_N,
    MAX_FACET_LIMIT,
    MAX_TOP_N,
    ProjectSearchRequest,
    TopRecipientsRequest,
    TransactionSearchRequest,
};
use rmcp::{
    ErrorData,
    handler::server::wrapper::Parameters,
    model::{CallToolResult, Content},
    schemars,
    tool,
    tool_router,
};
use serde::{Deserialize, Serialize};

use crate::{IatiMcp, helpers};

/// Parameters for keyword search over IATI projects.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct GetIatiProjectsParams {
    /// Keyword matched anywhere in the project title.
    pub keyword: String,
    /// ISO 3166-1 alpha-2 recipient country code, e.g. `KE`.
    pub country_code: Option<String>,
    /// Number of sample projects to return (default 5).
    pub sample_size: Option<usize>,
    /// Maximum buckets per facet, 1-100 (default 50).
    pub facet_limit: Option<usize>,
}

/// Parameters for filtered transaction search.
#[derive(Debug, Clone, Default, Serialize, Deserialize, schemars::JsonSchema)]
pub struct SearchTransactionsParams {
    /// Keyword matched anywhere in the parent project title.
    pub keyword: Option<String>,
    /// ISO 3166-1 alpha-2 recipient country code, e.g. `KE`.
    pub country_code: Option<String>,
    /// Lowest transaction value to include.
    pub min_value: Option<f64>,
    /// Highest transaction value to include.
    pub max_value: Option<f64>,
    /// First transaction date to include, `YYYY-MM-DD`.
    pub start_date: Option<String>,
    /// Last transaction date to include, `YYYY-MM-DD`.
    pub end_date: Option<String>,
    /// Number of sample transactions to return (default 5).
    pub sample_size: Option<usize>,
    /// Maximum buckets per facet, 1-100 (default 50).
    pub facet_limit: Option<usize>,
}

/// Parameters for ranking receiving organisations.
#[derive(Debug, Clone, Default, Serialize, Deserialize, schemars::JsonSchema)]
pub struct TopAidRecipientsParams {
    /// ISO 3166-1 alpha-2 recipient country code, e.g. `KE`.
    pub country_code: Option<String>,
    /// Number of organisations to return, 1-100 (default 10).
    pub top_n: Option<usize>,
    /// First transaction date to include, `YYYY-MM-DD`.
    pub start_date: Option<String>,
    /// Last transaction date to include, `YYYY-MM-DD`.
    pub end_date: Option<String>,
}

impl TryFrom<GetIatiProjectsParams> for ProjectSearchRequest {
    type Error = ControlError;

    fn try_from(params: GetIatiProjectsParams) -> Result<Self, Self::Error> {
        Ok(Self {
            keyword: params.keyword,
            country_code: validate::optional_text(params.country_code),
            sample_size: params.sample_size.unwrap_or(DEFAULT_SAMPLE_SIZE),
            facet_limit: validate::bounded(
                "facet_limit",
                params.facet_limit.unwrap_or(DEFAULT_FACET_LIMIT),
                1,
                MAX_FACET_LIMIT,
            )?,
        })
    }
}

impl TryFrom<SearchTransactionsParams> for TransactionSearchRequest {
    type Error = ControlError;

    fn try_from(params: SearchTransactionsParams) -> Result<Self, Self::Error> {
        Ok(Self {
            keyword: validate::optional_text(params.keyword),
            country_code: validate::optional_text(params.country_code),
            min_value: validate::non_negative("min_value", params.min_value)?,
            max_value: validate::non_negative("max_value", params.max_value)?,
            start_date: validate::parse_optional_date("start_date", params.start_date.as_deref())?,
            end_date: validate::parse_optional_date("end_date", params.end_date.as_deref())?,
            sample_size: params.sample_size.unwrap_or(DEFAULT_SAMPLE_SIZE),
            facet_limit: validate::bounded(
                "facet_limit",
                params.facet_limit.unwrap_or(DEFAULT_FACET_LIMIT),
                1,
                MAX_FACET_LIMIT,
            )?,
        })
    }
}

impl TryFrom<TopAidRecipientsParams> for TopRecipientsRequest {
    type Error = ControlError;

    fn try_from(params: TopAidRecipientsParams) -> Result<Self, Self::Error> {
        Ok(Self {
            country_code: validate::optional_text(params.country_code),
            top_n: validate::bounded("top_n", params.top_n.unwrap_or(DEFAULT_TOP_N), 1, MAX_TOP_N)?,
            start_date: validate::parse_optional_date("start_date", params.start_date.as_deref())?,
            end_date: validate::parse_optional_date("end_date", params.end_date.as_deref())?,
        })
    }
}

#[tool_router(router = tool_router_search, vis = "pub")]
impl IatiMcp {
    #[tool(description = "Search IATI projects by title keyword, optionally within one recipient country. Returns total matches, top sectors, activity status counts, and sample projects.")]
    async fn get_iati_projects(
        &self,
        Parameters(params): Parameters<GetIatiProjectsParams>,
    ) -> Result<CallToolResult, ErrorData> {
        let request = ProjectSearchRequest::try_from(params).map_err(helpers::map_err)?;
        let result = self
            .control()
            .search_projects(request)
            .await
            .map_err(helpers::map_err)?;
        Ok(CallToolResult::success(vec![Content::json(result)?]))
    }

    #[tool(description = "Search IATI transactions by keyword, country, value range, and date range (YYYY-MM-DD). Returns transaction count, total and average value, currency and type breakdowns, and sample transactions.")]
    async fn search_transactions(
        &self,
        Parameters(params): Parameters<SearchTransactionsParams>,
    ) -> Result<CallToolResult, ErrorData> {
        let request = TransactionSearchRequest::try_from(params).map_err(helpers::map_err)?;
        let result = self
            .control()
            .search_transactions(request)
            .await
            .map_err(helpers::map_err)?;
        Ok(CallToolResult::success(vec![Content::json(result)?]))
    }

    #[tool(description = "Rank organisations receiving aid by total transaction value, optionally within a country and date range (YYYY-MM-DD).")]
    async fn top_aid_recipients(
        &self,
        Parameters(params): Parameters<TopAidRecipientsParams>,
    ) -> Result<CallToolResult, ErrorData> {
        let request = TopRecipientsRequest::try_from(params).map_err(helpers::map_err)?;
        let result = self
            .control()
            .top_recipients(request)
            .await
            .map_err(helpers::map_err)?;
        Ok(CallToolResult::success(vec![Content::json(result)?]))
    }
}
