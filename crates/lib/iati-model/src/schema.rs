/// Endpoint path for activity (project) records.
pub const ENDPOINT_ACTIVITY: &str = "activity/select";
/// Endpoint path for transaction records.
pub const ENDPOINT_TRANSACTION: &str = "transaction/select";

pub const FIELD_IATI_IDENTIFIER: &str = "iati_identifier";
pub const FIELD_TITLE: &str = "title_narrative";
pub const FIELD_SECTOR_CODE: &str = "sector_code";
pub const FIELD_ACTIVITY_STATUS: &str = "activity_status_code";
pub const FIELD_RECIPIENT_COUNTRY: &str = "recipient_country_code";

pub const FIELD_TRANSACTION_VALUE: &str = "transaction_value";
pub const FIELD_TRANSACTION_CURRENCY: &str = "transaction_value_currency";
pub const FIELD_TRANSACTION_TYPE: &str = "transaction_transaction_type_code";
pub const FIELD_TRANSACTION_DATE: &str = "transaction_transaction_date_iso_date";
pub const FIELD_RECEIVER_ORG: &str = "transaction_receiver_org_narrative";

/// Name of the nested JSON facet used for recipient ranking.
pub const FACET_TOP_RECIPIENTS: &str = "top_recipients";
/// Name of the summed sub-aggregate inside each recipient bucket.
pub const METRIC_TOTAL_VALUE: &str = "total_value";

/// Fields returned for sample projects.
pub const PROJECT_FIELDS: [&str; 5] = [
    FIELD_IATI_IDENTIFIER,
    FIELD_TITLE,
    FIELD_SECTOR_CODE,
    FIELD_ACTIVITY_STATUS,
    FIELD_RECIPIENT_COUNTRY,
];

/// Fields returned for sample transactions.
pub const TRANSACTION_FIELDS: [&str; 8] = [
    FIELD_IATI_IDENTIFIER,
    FIELD_TITLE,
    FIELD_TRANSACTION_TYPE,
    FIELD_TRANSACTION_VALUE,
    FIELD_TRANSACTION_CURRENCY,
    FIELD_TRANSACTION_DATE,
    FIELD_RECIPIENT_COUNTRY,
    FIELD_RECEIVER_ORG,
];
