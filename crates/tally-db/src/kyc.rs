//! KYC provider call logging.
//!
//! Wraps outbound calls to the identity-verification provider. The wrapper
//! is observational: it times the call, writes a sanitized audit entry, and
//! hands the call's own result back unchanged. Audit write failures here are
//! swallowed through [`best_effort`]; they never replace the provider's
//! result or error.

use std::fmt;
use std::future::Future;
use std::time::{Duration, Instant};

use serde::Serialize;
use serde_json::{Value, json};
use tally_core::actions::{ENTITY_KYC_SESSION, KYC_API_ERROR, KYC_API_REQUEST};
use tally_core::audit_detail::KycApiCallDetail;
use tally_core::entities::AuditLogEntry;
use tally_core::sanitize::sanitize_opt;
use thiserror::Error;

use crate::error::DatabaseError;
use crate::non_critical::{best_effort, best_effort_sync};
use crate::params::LogParamsBuilder;
use crate::service::AuditService;

/// Status recorded for successful calls.
pub const STATUS_OK: u16 = 200;

/// Status recorded when a failed call's error carries none.
pub const STATUS_SERVER_ERROR: u16 = 500;

/// An error from a provider call that may carry an HTTP status.
pub trait ProviderError: fmt::Display {
    fn status_code(&self) -> Option<u16> {
        None
    }
}

impl ProviderError for anyhow::Error {}

/// Error returned by KYC provider clients.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct KycProviderError {
    pub status: Option<u16>,
    pub message: String,
}

impl KycProviderError {
    pub fn new(status: Option<u16>, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }
}

impl ProviderError for KycProviderError {
    fn status_code(&self) -> Option<u16> {
        self.status
    }
}

/// Identifies one provider call.
#[derive(Debug, Clone, Copy)]
pub struct KycCall<'a> {
    pub session_id: &'a str,
    pub provider: &'a str,
    pub endpoint: &'a str,
    pub method: &'a str,
}

impl AuditService {
    /// Await `fut`, log it as `KYC_API_REQUEST` on success or
    /// `KYC_API_ERROR` on failure, and return its result untouched.
    ///
    /// # Errors
    ///
    /// Returns exactly the error produced by `fut`.
    pub async fn measure_api_call<T, E, F>(
        &self,
        call: KycCall<'_>,
        request: Option<&Value>,
        fut: F,
    ) -> Result<T, E>
    where
        F: Future<Output = Result<T, E>>,
        T: Serialize,
        E: ProviderError,
    {
        let start = Instant::now();
        let result = fut.await;
        let elapsed = start.elapsed();

        let (action, response, status_code) = match &result {
            Ok(value) => (
                KYC_API_REQUEST,
                best_effort_sync("serialize KYC response", || serde_json::to_value(value)),
                STATUS_OK,
            ),
            Err(error) => (
                KYC_API_ERROR,
                Some(json!({ "error": error.to_string() })),
                error.status_code().unwrap_or(STATUS_SERVER_ERROR),
            ),
        };

        let detail = api_call_detail(call, request, response.as_ref(), status_code, Some(elapsed));
        self.record_api_call(call.session_id, action, &detail).await;
        result
    }

    /// Log a provider call whose status is already known, e.g. a webhook
    /// receipt. Statuses of 400 and above are logged as `KYC_API_ERROR`.
    /// Failures to write are logged and swallowed.
    pub async fn log_api_call_with_status(
        &self,
        call: KycCall<'_>,
        request: Option<&Value>,
        response: Option<&Value>,
        status_code: u16,
        response_time: Option<Duration>,
    ) {
        let detail = api_call_detail(call, request, response, status_code, response_time);
        let action = if status_code < 400 {
            KYC_API_REQUEST
        } else {
            KYC_API_ERROR
        };
        self.record_api_call(call.session_id, action, &detail).await;
    }

    async fn record_api_call(&self, session_id: &str, action: &str, detail: &KycApiCallDetail) {
        best_effort(
            "log KYC API call",
            self.write_api_call(session_id, action, detail),
        )
        .await;
    }

    async fn write_api_call(
        &self,
        session_id: &str,
        action: &str,
        detail: &KycApiCallDetail,
    ) -> Result<AuditLogEntry, DatabaseError> {
        let context = serde_json::to_value(detail).map_err(anyhow::Error::from)?;
        let params = LogParamsBuilder::new(action, ENTITY_KYC_SESSION, session_id)
            .context(context)
            .build();
        self.log(params).await
    }
}

fn api_call_detail(
    call: KycCall<'_>,
    request: Option<&Value>,
    response: Option<&Value>,
    status_code: u16,
    response_time: Option<Duration>,
) -> KycApiCallDetail {
    KycApiCallDetail {
        provider: call.provider.to_string(),
        endpoint: call.endpoint.to_string(),
        method: call.method.to_string(),
        request: sanitize_opt(request),
        response: sanitize_opt(response),
        response_time: response_time.map(|d| KycApiCallDetail::format_response_time(d.as_millis())),
        status_code,
    }
}
