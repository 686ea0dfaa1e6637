use std::collections::HashMap;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Decoded datastore reply. Every section is optional upstream; absent, `null`
/// or wrongly shaped sections decode to empty defaults so the normalizer never
/// branches on presence.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SolrResponse {
    #[serde(default, deserialize_with = "lenient")]
    pub response: ResultSet,
    #[serde(default, deserialize_with = "lenient")]
    pub facet_counts: FacetCounts,
    #[serde(default, deserialize_with = "lenient")]
    pub stats: StatsBlock,
    #[serde(default, deserialize_with = "lenient")]
    pub facets: JsonFacets,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResultSet {
    #[serde(rename = "numFound", default, deserialize_with = "lenient_u64")]
    pub num_found: u64,
    #[serde(default, deserialize_with = "lenient")]
    pub docs: Vec<Value>,
}

/// Flat facets: each field maps to an alternating `[code, count, ...]` list.
/// Entries are kept raw and read per field.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FacetCounts {
    #[serde(default, deserialize_with = "lenient")]
    pub facet_fields: HashMap<String, Value>,
}

/// Per-field statistics, kept raw and decoded per field.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StatsBlock {
    #[serde(default, deserialize_with = "lenient")]
    pub stats_fields: HashMap<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct FieldStats {
    #[serde(default, deserialize_with = "lenient_u64")]
    pub count: u64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub sum: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub mean: f64,
}

/// Nested JSON facet results keyed by facet name.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct JsonFacets {
    #[serde(default, deserialize_with = "lenient_u64")]
    pub count: u64,
    #[serde(flatten)]
    pub named: HashMap<String, Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct TermsFacet {
    #[serde(default, deserialize_with = "lenient")]
    buckets: Vec<FacetBucket>,
}

/// One terms-facet bucket with its computed sub-aggregates.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FacetBucket {
    #[serde(default)]
    pub val: Value,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub count: u64,
    #[serde(flatten)]
    pub metrics: HashMap<String, Value>,
}

impl FacetBucket {
    /// Numeric sub-aggregate by name, 0 when absent or non-numeric.
    #[must_use]
    pub fn metric(&self, name: &str) -> f64 {
        self.metrics.get(name).map_or(0.0, number_as_f64)
    }
}

impl SolrResponse {
    /// Raw flat facet sequence for a field, empty when not returned or not a
    /// list.
    #[must_use]
    pub fn facet_field(&self, field: &str) -> &[Value] {
        self.facet_counts
            .facet_fields
            .get(field)
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Statistics for a field, zeroed when not returned or not an object.
    #[must_use]
    pub fn field_stats(&self, field: &str) -> FieldStats {
        self.stats
            .stats_fields
            .get(field)
            .and_then(|stats| FieldStats::deserialize(stats).ok())
            .unwrap_or_default()
    }

    /// Buckets of a named terms facet, empty when not returned.
    #[must_use]
    pub fn facet_buckets(&self, name: &str) -> Vec<FacetBucket> {
        self.facets
            .named
            .get(name)
            .and_then(|facet| TermsFacet::deserialize(facet).ok())
            .map(|facet| facet.buckets)
            .unwrap_or_default()
    }

    /// Consumes the response, returning the document list.
    #[must_use]
    pub fn into_docs(self) -> Vec<Value> {
        self.response.docs
    }
}

/// Decodes a section through `Value`, falling back to the default when the
/// shape does not match.
fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(T::deserialize(value).unwrap_or_default())
}

fn lenient_u64<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(number_as_u64(&value))
}

fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(number_as_f64(&value))
}

/// Finite numeric value of a JSON number or numeric string, otherwise 0.
pub(crate) fn number_as_f64(value: &Value) -> f64 {
    let number = match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    };
    number.filter(|number| number.is_finite()).unwrap_or(0.0)
}

/// Non-negative integral value of a JSON number or numeric string, otherwise 0.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub(crate) fn number_as_u64(value: &Value) -> u64 {
    if let Some(count) = value.as_u64() {
        return count;
    }
    let number = number_as_f64(value);
    if number > 0.0 { number as u64 } else { 0 }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn decode(value: Value) -> SolrResponse {
        serde_json::from_value(value).expect("response should decode")
    }

    #[test]
    fn empty_payload_decodes_to_defaults() {
        let response = decode(json!({}));
        assert_eq!(response.response.num_found, 0);
        assert!(response.response.docs.is_empty());
        assert!(response.facet_field("sector_code").is_empty());
        assert_eq!(response.field_stats("transaction_value"), FieldStats::default());
        assert!(response.facet_buckets("top_recipients").is_empty());
    }

    #[test]
    fn null_sections_decode_to_defaults() {
        let response = decode(json!({
            "response": null,
            "facet_counts": {"facet_fields": null},
            "stats": {"stats_fields": {"transaction_value": null}},
            "facets": null
        }));
        assert_eq!(response.response.num_found, 0);
        assert_eq!(response.field_stats("transaction_value"), FieldStats::default());
    }

    #[test]
    fn non_list_docs_decode_to_empty() {
        let response = decode(json!({
            "response": {"numFound": 3, "docs": {"not": "a list"}}
        }));
        assert_eq!(response.response.num_found, 3);
        assert!(response.into_docs().is_empty());
    }

    #[test]
    fn map_shaped_facet_field_reads_as_empty() {
        let response = decode(json!({
            "facet_counts": {"facet_fields": {
                "sector_code": {"SEC1": 5},
                "activity_status_code": ["2", 4]
            }}
        }));
        assert!(response.facet_field("sector_code").is_empty());
        assert_eq!(response.facet_field("activity_status_code"), &[json!("2"), json!(4)]);
    }

    #[test]
    fn malformed_field_stats_read_as_zero() {
        let response = decode(json!({
            "stats": {"stats_fields": {
                "transaction_value": "oops",
                "other_value": {"count": 2, "sum": 10.0, "mean": 5.0}
            }}
        }));
        assert_eq!(response.field_stats("transaction_value"), FieldStats::default());
        assert_eq!(response.field_stats("other_value").count, 2);
    }

    #[test]
    fn wrongly_shaped_sections_decode_to_defaults() {
        let response = decode(json!({
            "response": "oops",
            "facet_counts": [1, 2],
            "stats": 7,
            "facets": {"count": 2, "top_recipients": {"buckets": "none"}}
        }));
        assert_eq!(response.response.num_found, 0);
        assert!(response.facet_field("sector_code").is_empty());
        assert_eq!(response.facets.count, 2);
        assert!(response.facet_buckets("top_recipients").is_empty());
    }

    #[test]
    fn nan_mean_reads_as_zero() {
        let response = decode(json!({
            "stats": {"stats_fields": {"transaction_value": {
                "count": 0,
                "sum": 0.0,
                "mean": "NaN"
            }}}
        }));
        let stats = response.field_stats("transaction_value");
        assert_eq!(stats.count, 0);
        assert!(stats.mean.abs() < f64::EPSILON);
    }

    #[test]
    fn json_facet_buckets_keep_metrics() {
        let response = decode(json!({
            "facets": {
                "count": 14,
                "top_recipients": {"buckets": [
                    {"val": "OrgA", "count": 10, "total_value": 500.0},
                    {"val": "OrgB", "count": 4}
                ]}
            }
        }));
        assert_eq!(response.facets.count, 14);

        let buckets = response.facet_buckets("top_recipients");
        assert_eq!(buckets.len(), 2);
        assert_eq!(buckets[0].val, "OrgA");
        assert!((buckets[0].metric("total_value") - 500.0).abs() < f64::EPSILON);
        assert!(buckets[1].metric("total_value").abs() < f64::EPSILON);
    }

    #[test]
    fn numeric_helpers_tolerate_odd_shapes() {
        assert_eq!(number_as_u64(&json!(7)), 7);
        assert_eq!(number_as_u64(&json!(7.9)), 7);
        assert_eq!(number_as_u64(&json!(-3)), 0);
        assert_eq!(number_as_u64(&json!("12")), 12);
        assert_eq!(number_as_u64(&json!(null)), 0);
        assert!((number_as_f64(&json!("2.5")) - 2.5).abs() < f64::EPSILON);
        assert!(number_as_f64(&json!({"nested": 1})).abs() < f64::EPSILON);
    }
}
