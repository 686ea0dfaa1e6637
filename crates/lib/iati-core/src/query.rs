//! Builds datastore queries from typed operation requests.
//!
//! Caller-supplied keyword and code values are interpolated verbatim. Reserved
//! query-syntax characters are not escaped, so a value such as `a:b` or `x OR y`
//! changes the meaning of the resulting expression.

use chrono::NaiveDate;
use iati_model::schema::{
    ENDPOINT_ACTIVITY,
    ENDPOINT_TRANSACTION,
    FACET_TOP_RECIPIENTS,
    FIELD_ACTIVITY_STATUS,
    FIELD_RECEIVER_ORG,
    FIELD_RECIPIENT_COUNTRY,
    FIELD_SECTOR_CODE,
    FIELD_TITLE,
    FIELD_TRANSACTION_CURRENCY,
    FIELD_TRANSACTION_DATE,
    FIELD_TRANSACTION_TYPE,
    FIELD_TRANSACTION_VALUE,
    METRIC_TOTAL_VALUE,
    PROJECT_FIELDS,
    TRANSACTION_FIELDS,
};
use iati_model::{ProjectSearchRequest, TopRecipientsRequest, TransactionSearchRequest};
use serde_json::{Map, Value, json};

/// Query expression matching every document.
pub const MATCH_ALL: &str = "*:*";
const UNBOUNDED: &str = "*";
const FACET_MINCOUNT: usize = 1;

/// Flat facet counts requested alongside a search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FacetDirective {
    pub fields: Vec<&'static str>,
    pub limit: usize,
    pub mincount: usize,
}

/// A fully built request against one datastore endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct UpstreamQuery {
    pub endpoint: &'static str,
    pub q: String,
    pub filters: Vec<String>,
    pub rows: usize,
    pub fields: Vec<&'static str>,
    pub facet: Option<FacetDirective>,
    pub stats_field: Option<&'static str>,
    pub json_facet: Option<Value>,
}

impl UpstreamQuery {
    /// Renders the query as ordered URL parameters. Repeated keys (`facet.field`,
    /// `fq`) appear once per value.
    #[must_use]
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("q", self.q.clone()),
            ("rows", self.rows.to_string()),
            ("wt", "json".to_string()),
        ];
        if !self.fields.is_empty() {
            params.push(("fl", self.fields.join(",")));
        }
        if let Some(facet) = &self.facet {
            params.push(("facet", "true".to_string()));
            for field in &facet.fields {
                params.push(("facet.field", (*field).to_string()));
            }
            params.push(("facet.limit", facet.limit.to_string()));
            params.push(("facet.mincount", facet.mincount.to_string()));
        }
        if let Some(field) = self.stats_field {
            params.push(("stats", "true".to_string()));
            params.push(("stats.field", field.to_string()));
        }
        for filter in &self.filters {
            params.push(("fq", filter.clone()));
        }
        if let Some(spec) = &self.json_facet {
            params.push(("json.facet", spec.to_string()));
        }
        params
    }
}

/// `field:*value*`
#[must_use]
pub fn wildcard_clause(field: &str, value: &str) -> String {
    format!("{field}:*{value}*")
}

/// `field:value`
#[must_use]
pub fn equals_clause(field: &str, value: &str) -> String {
    format!("{field}:{value}")
}

/// `field:[min TO max]`, with a missing bound rendered as `*`. Returns `None`
/// when neither bound is set.
#[must_use]
pub fn value_range_clause(field: &str, min: Option<f64>, max: Option<f64>) -> Option<String> {
    if min.is_none() && max.is_none() {
        return None;
    }
    let lower = min.map_or_else(|| UNBOUNDED.to_string(), |value| value.to_string());
    let upper = max.map_or_else(|| UNBOUNDED.to_string(), |value| value.to_string());
    Some(format!("{field}:[{lower} TO {upper}]"))
}

/// `field:[start-of-day TO end-of-day]` in UTC, with a missing bound rendered
/// as `*`. Returns `None` when neither date is set.
#[must_use]
pub fn date_range_clause(
    field: &str,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> Option<String> {
    if start.is_none() && end.is_none() {
        return None;
    }
    let lower = start.map_or_else(
        || UNBOUNDED.to_string(),
        |date| format!("{}T00:00:00Z", date.format("%Y-%m-%d")),
    );
    let upper = end.map_or_else(
        || UNBOUNDED.to_string(),
        |date| format!("{}T23:59:59Z", date.format("%Y-%m-%d")),
    );
    Some(format!("{field}:[{lower} TO {upper}]"))
}

/// Joins clauses with `AND`; an empty set matches everything.
#[must_use]
pub fn conjunction(clauses: &[String]) -> String {
    if clauses.is_empty() {
        MATCH_ALL.to_string()
    } else {
        clauses.join(" AND ")
    }
}

/// Keyword search over activity titles with sector and status facets.
#[must_use]
pub fn project_search(request: &ProjectSearchRequest) -> UpstreamQuery {
    let mut clauses = vec![wildcard_clause(FIELD_TITLE, &request.keyword)];
    if let Some(country) = request.country_code.as_deref() {
        clauses.push(equals_clause(FIELD_RECIPIENT_COUNTRY, country));
    }

    UpstreamQuery {
        endpoint: ENDPOINT_ACTIVITY,
        q: conjunction(&clauses),
        filters: Vec::new(),
        rows: request.sample_size,
        fields: PROJECT_FIELDS.to_vec(),
        facet: Some(FacetDirective {
            fields: vec![FIELD_SECTOR_CODE, FIELD_ACTIVITY_STATUS],
            limit: request.facet_limit,
            mincount: FACET_MINCOUNT,
        }),
        stats_field: None,
        json_facet: None,
    }
}

/// Filtered transaction search with type/currency facets and value statistics.
#[must_use]
pub fn transaction_search(request: &TransactionSearchRequest) -> UpstreamQuery {
    let mut clauses = Vec::new();
    if let Some(keyword) = request.keyword.as_deref() {
        clauses.push(wildcard_clause(FIELD_TITLE, keyword));
    }
    if let Some(country) = request.country_code.as_deref() {
        clauses.push(equals_clause(FIELD_RECIPIENT_COUNTRY, country));
    }
    clauses.extend(value_range_clause(
        FIELD_TRANSACTION_VALUE,
        request.min_value,
        request.max_value,
    ));
    clauses.extend(date_range_clause(
        FIELD_TRANSACTION_DATE,
        request.start_date,
        request.end_date,
    ));

    UpstreamQuery {
        endpoint: ENDPOINT_TRANSACTION,
        q: conjunction(&clauses),
        filters: Vec::new(),
        rows: request.sample_size,
        fields: TRANSACTION_FIELDS.to_vec(),
        facet: Some(FacetDirective {
            fields: vec![FIELD_TRANSACTION_TYPE, FIELD_TRANSACTION_CURRENCY],
            limit: request.facet_limit,
            mincount: FACET_MINCOUNT,
        }),
        stats_field: Some(FIELD_TRANSACTION_VALUE),
        json_facet: None,
    }
}

/// Aggregation-only query ranking receiver organisations by summed value.
#[must_use]
pub fn top_recipients(request: &TopRecipientsRequest) -> UpstreamQuery {
    let mut filters = Vec::new();
    if let Some(country) = request.country_code.as_deref() {
        filters.push(equals_clause(FIELD_RECIPIENT_COUNTRY, country));
    }
    filters.extend(date_range_clause(
        FIELD_TRANSACTION_DATE,
        request.start_date,
        request.end_date,
    ));

    UpstreamQuery {
        endpoint: ENDPOINT_TRANSACTION,
        q: MATCH_ALL.to_string(),
        filters,
        rows: 0,
        fields: Vec::new(),
        facet: None,
        stats_field: None,
        json_facet: Some(recipient_facet_spec(request.top_n)),
    }
}

fn recipient_facet_spec(top_n: usize) -> Value {
    let mut metrics = Map::new();
    metrics.insert(
        METRIC_TOTAL_VALUE.to_string(),
        Value::String(format!("sum({FIELD_TRANSACTION_VALUE})")),
    );
    let terms = json!({
        "type": "terms",
        "field": FIELD_RECEIVER_ORG,
        "limit": top_n,
        "sort": format!("{METRIC_TOTAL_VALUE} desc"),
        "facet": metrics,
    });

    let mut spec = Map::new();
    spec.insert(FACET_TOP_RECIPIENTS.to_string(), terms);
    Value::Object(spec)
}
