use std::borrow::Cow;

use iati_core::control::ControlError;
use iati_core::upstream::FetchError;
use rmcp::ErrorData;
use rmcp::model::ErrorCode;
use serde_json::json;

pub(crate) fn mcp_err(code: ErrorCode, message: impl Into<Cow<'static, str>>) -> ErrorData {
    ErrorData {
        code,
        message: message.into(),
        data: None,
    }
}

pub(crate) fn map_err(err: ControlError) -> ErrorData {
    match err {
        ControlError::InvalidParameter(message) => mcp_err(ErrorCode::INVALID_PARAMS, message),
        ControlError::Fetch(FetchError::Http { status, status_text }) => ErrorData {
            code: ErrorCode::INTERNAL_ERROR,
            message: format!("upstream returned HTTP {status} {status_text}").into(),
            data: Some(json!({ "upstream_status": status, "upstream_status_text": status_text })),
        },
        ControlError::Fetch(err @ FetchError::Transport(_)) => {
            mcp_err(ErrorCode::INTERNAL_ERROR, err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_errors_carry_status() {
        let err = map_err(ControlError::Fetch(FetchError::Http {
            status: 503,
            status_text: "Service Unavailable".to_string(),
        }));

        assert_eq!(err.code, ErrorCode::INTERNAL_ERROR);
        assert!(err.message.contains("503"));
        let data = err.data.expect("status data should be attached");
        assert_eq!(data["upstream_status"], 503);
    }

    #[test]
    fn invalid_parameters_map_to_invalid_params() {
        let err = map_err(ControlError::InvalidParameter("top_n out of range".to_string()));
        assert_eq!(err.code, ErrorCode::INVALID_PARAMS);
        assert_eq!(err.message, "top_n out of range");
    }
}
