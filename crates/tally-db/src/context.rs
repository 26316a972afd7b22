//! Request context resolution.
//!
//! The HTTP layer enters a request scope with [`with_request_headers`]; any
//! audit write awaited inside that scope picks up the client IP and user
//! agent without threading them through every call.
//!
//! Outside a request scope (background jobs, CLI) resolution falls back to
//! the `"unknown"` sentinel and logs a warning. It never fails.

use std::future::Future;

use http::HeaderMap;
use serde::{Deserialize, Serialize};

use crate::non_critical::best_effort_sync;

/// Sentinel stored when the client IP cannot be determined.
pub const UNKNOWN_IP: &str = "unknown";

tokio::task_local! {
    static REQUEST_HEADERS: HeaderMap;
}

/// Client network identity attached to an audit entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestContext {
    pub ip_address: String,
    pub user_agent: Option<String>,
}

impl RequestContext {
    #[must_use]
    pub fn new(ip_address: impl Into<String>, user_agent: Option<String>) -> Self {
        Self {
            ip_address: ip_address.into(),
            user_agent,
        }
    }

    /// Context used when no request is in scope.
    #[must_use]
    pub fn unknown() -> Self {
        Self::new(UNKNOWN_IP, None)
    }
}

/// Run `fut` with `headers` as the current request scope.
pub async fn with_request_headers<F: Future>(headers: HeaderMap, fut: F) -> F::Output {
    REQUEST_HEADERS.scope(headers, fut).await
}

/// Synchronous variant of [`with_request_headers`].
pub fn with_request_headers_sync<R>(headers: HeaderMap, f: impl FnOnce() -> R) -> R {
    REQUEST_HEADERS.sync_scope(headers, f)
}

/// Extract IP and user agent from request headers.
///
/// IP priority: first entry of `x-forwarded-for`, then `x-real-ip`, then
/// `"unknown"`.
#[must_use]
pub fn context_from_headers(headers: &HeaderMap) -> RequestContext {
    let forwarded = header_str(headers, "x-forwarded-for")
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty());
    let real_ip = header_str(headers, "x-real-ip")
        .map(str::trim)
        .filter(|v| !v.is_empty());

    let ip_address = forwarded.or(real_ip).unwrap_or(UNKNOWN_IP);
    let user_agent = header_str(headers, "user-agent").map(ToString::to_string);

    RequestContext::new(ip_address, user_agent)
}

/// Resolve the context of the request currently in scope.
#[must_use]
pub fn resolve_context() -> RequestContext {
    best_effort_sync("resolve request context", || {
        REQUEST_HEADERS.try_with(context_from_headers)
    })
    .unwrap_or_else(RequestContext::unknown)
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}
