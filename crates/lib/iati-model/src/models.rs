use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Sample rows returned when the caller does not ask for a size.
pub const DEFAULT_SAMPLE_SIZE: usize = 5;
/// Facet bucket limit used when the caller does not ask for one.
pub const DEFAULT_FACET_LIMIT: usize = 50;
/// Upper bound accepted for facet bucket limits.
pub const MAX_FACET_LIMIT: usize = 100;
/// Recipients ranked when the caller does not ask for a count.
pub const DEFAULT_TOP_N: usize = 10;
/// Upper bound accepted for the recipient ranking size.
pub const MAX_TOP_N: usize = 100;

/// Keyword and facet search over activity records.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProjectSearchRequest {
    pub keyword: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country_code: Option<String>,
    pub sample_size: usize,
    pub facet_limit: usize,
}

impl ProjectSearchRequest {
    #[must_use]
    pub fn new(keyword: impl Into<String>) -> Self {
        Self {
            keyword: keyword.into(),
            country_code: None,
            sample_size: DEFAULT_SAMPLE_SIZE,
            facet_limit: DEFAULT_FACET_LIMIT,
        }
    }

    #[must_use]
    pub fn with_country_code(mut self, country_code: impl Into<String>) -> Self {
        self.country_code = Some(country_code.into());
        self
    }

    #[must_use]
    pub const fn with_sample_size(mut self, sample_size: usize) -> Self {
        self.sample_size = sample_size;
        self
    }

    #[must_use]
    pub const fn with_facet_limit(mut self, facet_limit: usize) -> Self {
        self.facet_limit = facet_limit;
        self
    }
}

/// Filtered search over transaction records with value statistics.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TransactionSearchRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keyword: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_value: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_value: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    pub sample_size: usize,
    pub facet_limit: usize,
}

impl Default for TransactionSearchRequest {
    fn default() -> Self {
        Self {
            keyword: None,
            country_code: None,
            min_value: None,
            max_value: None,
            start_date: None,
            end_date: None,
            sample_size: DEFAULT_SAMPLE_SIZE,
            facet_limit: DEFAULT_FACET_LIMIT,
        }
    }
}

/// Ranking of receiver organisations by summed transaction value.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TopRecipientsRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country_code: Option<String>,
    pub top_n: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
}

impl Default for TopRecipientsRequest {
    fn default() -> Self {
        Self {
            country_code: None,
            top_n: DEFAULT_TOP_N,
            start_date: None,
            end_date: None,
        }
    }
}

/// Outcome marker carried by every result envelope.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    #[default]
    Success,
}

/// A single facet bucket: a code and the number of matching documents.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FacetCount {
    pub code: String,
    pub count: u64,
}

impl FacetCount {
    #[must_use]
    pub fn new(code: impl Into<String>, count: u64) -> Self {
        Self {
            code: code.into(),
            count,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct ProjectSummary {
    pub total_found: u64,
    pub top_sectors: Vec<FacetCount>,
    pub activity_statuses: Vec<FacetCount>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProjectSearchResult {
    pub status: Status,
    pub parameters: ProjectSearchRequest,
    pub summary: ProjectSummary,
    pub sample_projects: Vec<Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct TransactionSummary {
    pub total_transactions: u64,
    pub total_value: f64,
    pub average_value: f64,
    pub currency_breakdown: Vec<FacetCount>,
    pub transaction_types: Vec<FacetCount>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TransactionSearchResult {
    pub status: Status,
    pub parameters: TransactionSearchRequest,
    pub summary: TransactionSummary,
    pub sample_transactions: Vec<Value>,
}

/// A receiver organisation ranked by summed transaction value.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Recipient {
    pub organisation: String,
    pub transaction_count: u64,
    pub total_value: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TopRecipientsResult {
    pub status: Status,
    pub parameters: TopRecipientsRequest,
    pub top_recipients: Vec<Recipient>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn project_request_defaults() {
        let request = ProjectSearchRequest::new("health");
        assert_eq!(request.sample_size, DEFAULT_SAMPLE_SIZE);
        assert_eq!(request.facet_limit, DEFAULT_FACET_LIMIT);
        assert!(request.country_code.is_none());
    }

    #[test]
    fn echoed_parameters_omit_absent_filters() {
        let request = TransactionSearchRequest {
            keyword: Some("water".to_string()),
            start_date: NaiveDate::from_ymd_opt(2020, 1, 1),
            ..TransactionSearchRequest::default()
        };
        let echoed = serde_json::to_value(&request).expect("request should serialize");

        assert_eq!(echoed["keyword"], "water");
        assert_eq!(echoed["start_date"], "2020-01-01");
        assert_eq!(echoed["sample_size"], 5);
        assert!(echoed.get("country_code").is_none());
        assert!(echoed.get("end_date").is_none());
    }

    #[test]
    fn status_serializes_lowercase() {
        let value = serde_json::to_value(Status::Success).expect("status should serialize");
        assert_eq!(value, "success");
    }
}
