//! Best-effort execution for work that must never fail the caller.
//!
//! Audit logging documents business operations; it must not block or break
//! them. Every place in Tally that swallows an error goes through one of
//! these two functions, so the swallowing is visible and always logged.

use std::fmt::Display;
use std::future::Future;

/// Await `fut`; on error, log a warning naming `operation` and return `None`.
pub async fn best_effort<T, E, F>(operation: &str, fut: F) -> Option<T>
where
    F: Future<Output = Result<T, E>>,
    E: Display,
{
    match fut.await {
        Ok(value) => Some(value),
        Err(error) => {
            tracing::warn!(operation, %error, "non-critical operation failed");
            None
        }
    }
}

/// Synchronous counterpart of [`best_effort`].
pub fn best_effort_sync<T, E, F>(operation: &str, f: F) -> Option<T>
where
    F: FnOnce() -> Result<T, E>,
    E: Display,
{
    match f() {
        Ok(value) => Some(value),
        Err(error) => {
            tracing::warn!(operation, %error, "non-critical operation failed");
            None
        }
    }
}
