//! Projects decoded datastore replies into operation summaries.

use iati_model::schema::{
    FACET_TOP_RECIPIENTS,
    FIELD_ACTIVITY_STATUS,
    FIELD_SECTOR_CODE,
    FIELD_TRANSACTION_CURRENCY,
    FIELD_TRANSACTION_TYPE,
    FIELD_TRANSACTION_VALUE,
    METRIC_TOTAL_VALUE,
};
use iati_model::{FacetCount, ProjectSummary, Recipient, TransactionSummary};
use serde_json::Value;

use crate::upstream::SolrResponse;
use crate::upstream::response::number_as_u64;

/// Sector buckets kept in a project summary.
pub const TOP_SECTOR_LIMIT: usize = 10;

/// Pairs an alternating `[code, count, code, count, ...]` sequence into facet
/// counts, keeping engine order. A trailing unpaired code is dropped.
#[must_use]
pub fn pair_facet_counts(flat: &[Value]) -> Vec<FacetCount> {
    flat.chunks_exact(2)
        .map(|pair| FacetCount::new(facet_code(&pair[0]), number_as_u64(&pair[1])))
        .collect()
}

fn facet_code(value: &Value) -> String {
    match value {
        Value::String(code) => code.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[must_use]
pub fn project_summary(response: &SolrResponse) -> ProjectSummary {
    let mut top_sectors = pair_facet_counts(response.facet_field(FIELD_SECTOR_CODE));
    top_sectors.truncate(TOP_SECTOR_LIMIT);

    ProjectSummary {
        total_found: response.response.num_found,
        top_sectors,
        activity_statuses: pair_facet_counts(response.facet_field(FIELD_ACTIVITY_STATUS)),
    }
}

#[must_use]
pub fn transaction_summary(response: &SolrResponse) -> TransactionSummary {
    let stats = response.field_stats(FIELD_TRANSACTION_VALUE);

    TransactionSummary {
        total_transactions: stats.count,
        total_value: stats.sum,
        average_value: stats.mean,
        currency_breakdown: pair_facet_counts(response.facet_field(FIELD_TRANSACTION_CURRENCY)),
        transaction_types: pair_facet_counts(response.facet_field(FIELD_TRANSACTION_TYPE)),
    }
}

/// Recipient buckets in the engine's ranking order.
#[must_use]
pub fn top_recipients(response: &SolrResponse) -> Vec<Recipient> {
    response
        .facet_buckets(FACET_TOP_RECIPIENTS)
        .into_iter()
        .map(|bucket| Recipient {
            organisation: facet_code(&bucket.val),
            transaction_count: bucket.count,
            total_value: bucket.metric(METRIC_TOTAL_VALUE),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn decode(value: Value) -> SolrResponse {
        serde_json::from_value(value).expect("response should decode")
    }

    #[test]
    fn pairs_alternating_sequence_in_order() {
        let pairs = pair_facet_counts(&[json!("a"), json!(1), json!("b"), json!(2)]);
        assert_eq!(pairs, vec![FacetCount::new("a", 1), FacetCount::new("b", 2)]);
    }

    #[test]
    fn drops_trailing_unpaired_code() {
        let pairs = pair_facet_counts(&[json!("a"), json!(1), json!("b")]);
        assert_eq!(pairs, vec![FacetCount::new("a", 1)]);
    }

    #[test]
    fn numeric_codes_become_strings() {
        let pairs = pair_facet_counts(&[json!(110), json!(4)]);
        assert_eq!(pairs, vec![FacetCount::new("110", 4)]);
    }

    #[test]
    fn sector_breakdown_truncates_to_ten() {
        let mut sectors = Vec::new();
        let mut statuses = Vec::new();
        for index in 0..15_u64 {
            sectors.push(json!(format!("SEC{index}")));
            sectors.push(json!(100 - index));
            statuses.push(json!(index.to_string()));
            statuses.push(json!(index));
        }
        let response = decode(json!({
            "response": {"numFound": 99, "docs": []},
            "facet_counts": {"facet_fields": {
                "sector_code": sectors,
                "activity_status_code": statuses
            }}
        }));

        let summary = project_summary(&response);

        assert_eq!(summary.total_found, 99);
        assert_eq!(summary.top_sectors.len(), TOP_SECTOR_LIMIT);
        assert_eq!(summary.top_sectors[0], FacetCount::new("SEC0", 100));
        assert_eq!(summary.top_sectors[9], FacetCount::new("SEC9", 91));
        assert_eq!(summary.activity_statuses.len(), 15);
    }

    #[test]
    fn missing_stats_default_to_zero() {
        let summary = transaction_summary(&decode(json!({
            "response": {"numFound": 0, "docs": []}
        })));

        assert_eq!(summary.total_transactions, 0);
        assert!(summary.total_value.abs() < f64::EPSILON);
        assert!(summary.average_value.abs() < f64::EPSILON);
        assert!(summary.currency_breakdown.is_empty());
        assert!(summary.transaction_types.is_empty());
    }

    #[test]
    fn transaction_summary_reads_stats_and_facets() {
        let summary = transaction_summary(&decode(json!({
            "facet_counts": {"facet_fields": {
                "transaction_value_currency": ["USD", 7, "EUR", 3],
                "transaction_transaction_type_code": ["3", 6, "4", 4]
            }},
            "stats": {"stats_fields": {"transaction_value": {
                "count": 10,
                "sum": 2500.0,
                "mean": 250.0
            }}}
        })));

        assert_eq!(summary.total_transactions, 10);
        assert!((summary.total_value - 2500.0).abs() < f64::EPSILON);
        assert!((summary.average_value - 250.0).abs() < f64::EPSILON);
        assert_eq!(
            summary.currency_breakdown,
            vec![FacetCount::new("USD", 7), FacetCount::new("EUR", 3)]
        );
        assert_eq!(
            summary.transaction_types,
            vec![FacetCount::new("3", 6), FacetCount::new("4", 4)]
        );
    }

    #[test]
    fn recipients_keep_engine_ranking() {
        let recipients = top_recipients(&decode(json!({
            "facets": {"count": 14, "top_recipients": {"buckets": [
                {"val": "OrgA", "count": 10, "total_value": 500},
                {"val": "OrgB", "count": 4, "total_value": 200}
            ]}}
        })));

        assert_eq!(
            recipients,
            vec![
                Recipient {
                    organisation: "OrgA".to_string(),
                    transaction_count: 10,
                    total_value: 500.0,
                },
                Recipient {
                    organisation: "OrgB".to_string(),
                    transaction_count: 4,
                    total_value: 200.0,
                },
            ]
        );
    }

    #[test]
    fn missing_buckets_yield_empty_ranking() {
        assert!(top_recipients(&decode(json!({"facets": {"count": 0}}))).is_empty());
    }
}
