//! Payload sanitization for audit logging.
//!
//! Request and response bodies from external systems pass through
//! [`sanitize`] before they reach the audit table:
//! - values under sensitive keys become `"[REDACTED]"`, whatever their type
//! - nested objects and arrays are walked recursively
//! - strings over [`MAX_STRING_CHARS`] characters are truncated with a
//!   suffix naming how many characters were dropped
//!
//! The input is never mutated. A scalar at the top level passes through.

use serde_json::{Map, Value};

/// Replacement for sensitive values.
pub const REDACTED: &str = "[REDACTED]";

/// Maximum characters kept from a string value.
pub const MAX_STRING_CHARS: usize = 500;

/// Lowercased key fragments whose values are always redacted.
pub const SENSITIVE_KEY_FRAGMENTS: &[&str] = &[
    "password",
    "secret",
    "token",
    "apikey",
    "api_key",
    "authorization",
    "x-app-token",
    "x-app-access-sig",
    "x-app-access-ts",
];

/// Sanitize a payload. See the module docs for the rules.
#[must_use]
pub fn sanitize(payload: &Value) -> Value {
    match payload {
        Value::Object(_) | Value::Array(_) => sanitize_value(payload),
        _ => payload.clone(),
    }
}

/// [`sanitize`] for optional payloads. `None` stays `None`.
#[must_use]
pub fn sanitize_opt(payload: Option<&Value>) -> Option<Value> {
    payload.map(sanitize)
}

/// Whether `key` names a value that must never be logged.
#[must_use]
pub fn is_sensitive_key(key: &str) -> bool {
    let lower = key.to_lowercase();
    SENSITIVE_KEY_FRAGMENTS.iter().any(|s| lower.contains(s))
}

fn sanitize_value(value: &Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut sanitized = Map::with_capacity(map.len());
            for (key, val) in map {
                if is_sensitive_key(key) {
                    sanitized.insert(key.clone(), Value::String(REDACTED.to_string()));
                } else {
                    sanitized.insert(key.clone(), sanitize_value(val));
                }
            }
            Value::Object(sanitized)
        }
        Value::Array(items) => Value::Array(items.iter().map(sanitize_value).collect()),
        Value::String(s) => Value::String(truncate(s)),
        _ => value.clone(),
    }
}

fn truncate(s: &str) -> String {
    let total = s.chars().count();
    if total <= MAX_STRING_CHARS {
        return s.to_string();
    }
    let kept: String = s.chars().take(MAX_STRING_CHARS).collect();
    format!("{kept}... [truncated {} chars]", total - MAX_STRING_CHARS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn redacts_at_depth_zero() {
        let sanitized = sanitize(&json!({"password": "hunter2", "username": "alice"}));
        assert_eq!(sanitized["password"], REDACTED);
        assert_eq!(sanitized["username"], "alice");
    }

    #[test]
    fn redacts_at_depth_one() {
        let sanitized = sanitize(&json!({"auth": {"api_key": "k-123", "scope": "read"}}));
        assert_eq!(sanitized["auth"]["api_key"], REDACTED);
        assert_eq!(sanitized["auth"]["scope"], "read");
    }

    #[test]
    fn redacts_at_depth_three() {
        let payload = json!({"a": {"b": {"c": {"clientSecret": "s", "keep": 1}}}});
        let sanitized = sanitize(&payload);
        assert_eq!(sanitized["a"]["b"]["c"]["clientSecret"], REDACTED);
        assert_eq!(sanitized["a"]["b"]["c"]["keep"], 1);
    }

    #[test]
    fn redacts_every_sensitive_fragment() {
        let payload = json!({
            "password": 1,
            "secret": true,
            "accessToken": "t",
            "apiKey": "k",
            "api_key": "k",
            "Authorization": "Bearer xyz",
            "X-App-Token": "abc",
            "X-App-Access-Sig": "sig",
            "X-App-Access-Ts": 1_700_000_000
        });
        let sanitized = sanitize(&payload);
        for key in payload.as_object().unwrap().keys() {
            assert_eq!(sanitized[key], REDACTED, "{key}");
        }
    }

    #[test]
    fn redacts_whole_subtree_under_sensitive_key() {
        let sanitized = sanitize(&json!({"tokens": {"refresh": "r", "access": "a"}}));
        assert_eq!(sanitized["tokens"], REDACTED);
    }

    #[test]
    fn redacts_headers_and_keeps_body() {
        let payload = json!({
            "headers": {"Authorization": "Bearer xyz", "X-App-Token": "abc"},
            "body": {"username": "alice"}
        });
        let sanitized = sanitize(&payload);
        assert_eq!(sanitized["headers"]["Authorization"], REDACTED);
        assert_eq!(sanitized["headers"]["X-App-Token"], REDACTED);
        assert_eq!(sanitized["body"]["username"], "alice");
    }

    #[test]
    fn walks_arrays() {
        let payload = json!({"users": [{"name": "a", "password": "p1"}, {"name": "b", "password": "p2"}]});
        let sanitized = sanitize(&payload);
        assert_eq!(sanitized["users"][0]["name"], "a");
        assert_eq!(sanitized["users"][0]["password"], REDACTED);
        assert_eq!(sanitized["users"][1]["password"], REDACTED);
    }

    #[test]
    fn string_of_exactly_limit_is_untouched() {
        let s = "x".repeat(MAX_STRING_CHARS);
        let sanitized = sanitize(&json!({"document": s}));
        assert_eq!(sanitized["document"], Value::String(s));
    }

    #[test]
    fn string_over_limit_is_truncated_with_count() {
        let s = "x".repeat(MAX_STRING_CHARS + 1);
        let sanitized = sanitize(&json!({"document": s}));
        let expected = format!("{}... [truncated 1 chars]", "x".repeat(MAX_STRING_CHARS));
        assert_eq!(sanitized["document"], Value::String(expected));
    }

    #[test]
    fn truncation_counts_characters_not_bytes() {
        let s = "é".repeat(MAX_STRING_CHARS + 3);
        let sanitized = sanitize(&json!({"name": s}));
        let out = sanitized["name"].as_str().unwrap();
        assert!(out.starts_with(&"é".repeat(MAX_STRING_CHARS)));
        assert!(out.ends_with("... [truncated 3 chars]"));
    }

    #[test]
    fn truncates_strings_inside_arrays() {
        let s = "y".repeat(MAX_STRING_CHARS + 10);
        let sanitized = sanitize(&json!({"images": [s]}));
        assert!(
            sanitized["images"][0]
                .as_str()
                .unwrap()
                .ends_with("[truncated 10 chars]")
        );
    }

    #[test]
    fn scalars_pass_through() {
        let long = Value::String("z".repeat(MAX_STRING_CHARS * 2));
        assert_eq!(sanitize(&long), long);
        assert_eq!(sanitize(&Value::Null), Value::Null);
        assert_eq!(sanitize(&json!(42)), json!(42));
    }

    #[test]
    fn none_passes_through() {
        assert_eq!(sanitize_opt(None), None);
        assert_eq!(
            sanitize_opt(Some(&json!({"token": "t"}))),
            Some(json!({"token": REDACTED}))
        );
    }

    #[test]
    fn input_is_not_mutated() {
        let payload = json!({"password": "hunter2"});
        let _ = sanitize(&payload);
        assert_eq!(payload["password"], "hunter2");
    }
}
