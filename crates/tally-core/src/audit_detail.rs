//! Typed audit context payloads.
//!
//! The `context` column is schema-less JSON. These types fix the shape of the
//! payloads Tally itself writes so readers can deserialize them.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Context for `KYC_API_REQUEST` and `KYC_API_ERROR` entries.
///
/// `request` and `response` are already sanitized when this is built.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct KycApiCallDetail {
    pub provider: String,
    pub endpoint: String,
    pub method: String,
    pub request: Option<serde_json::Value>,
    pub response: Option<serde_json::Value>,
    /// Elapsed time, e.g. `"120ms"`. `None` for untimed calls.
    pub response_time: Option<String>,
    pub status_code: u16,
}

impl KycApiCallDetail {
    /// Render elapsed milliseconds the way dashboards display them.
    #[must_use]
    pub fn format_response_time(millis: u128) -> String {
        format!("{millis}ms")
    }

    /// Parse `"120ms"` back into milliseconds.
    #[must_use]
    pub fn response_time_millis(&self) -> Option<u64> {
        self.response_time
            .as_deref()
            .and_then(|t| t.strip_suffix("ms"))
            .and_then(|n| n.parse().ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn kyc_detail_uses_camel_case_keys() {
        let detail = KycApiCallDetail {
            provider: "sumsub".into(),
            endpoint: "/resources/applicants".into(),
            method: "POST".into(),
            request: Some(json!({"externalUserId": "usr-1"})),
            response: None,
            response_time: Some(KycApiCallDetail::format_response_time(120)),
            status_code: 200,
        };
        let value = serde_json::to_value(&detail).unwrap();
        assert_eq!(value["responseTime"], "120ms");
        assert_eq!(value["statusCode"], 200);
        assert_eq!(detail.response_time_millis(), Some(120));
    }

    #[test]
    fn response_time_millis_handles_missing_or_bad_values() {
        let mut detail = KycApiCallDetail {
            provider: "sumsub".into(),
            endpoint: "/x".into(),
            method: "GET".into(),
            request: None,
            response: None,
            response_time: None,
            status_code: 500,
        };
        assert_eq!(detail.response_time_millis(), None);
        detail.response_time = Some("fast".into());
        assert_eq!(detail.response_time_millis(), None);
    }
}
